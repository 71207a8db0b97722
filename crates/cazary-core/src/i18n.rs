//! Translation lookup.
//!
//! Strings are keyed by their English source text. A `Translator` resolves
//! one locale's table up front; lookups that miss return the source text.

use std::collections::HashMap;

use serde::Deserialize;

/// Locale tag to translation table, as produced by the string-table build step.
///
/// Locale tags are stored lowercase so `en-US` and `en-us` resolve the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, HashMap<String, String>>")]
pub struct TranslationData {
    locales: HashMap<String, HashMap<String, String>>,
}

impl From<HashMap<String, HashMap<String, String>>> for TranslationData {
    fn from(raw: HashMap<String, HashMap<String, String>>) -> Self {
        let mut data = TranslationData::default();
        for (tag, table) in raw {
            data.insert_locale(&tag, table);
        }
        data
    }
}

impl TranslationData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON form: `{"ja": {"Bold": "太字", ...}, ...}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add (or merge into) the table for `tag`.
    pub fn insert_locale(&mut self, tag: &str, table: HashMap<String, String>) {
        self.locales
            .entry(tag.to_ascii_lowercase())
            .or_default()
            .extend(table);
    }

    /// Add a table from a `<lang>.data` file.
    ///
    /// Returns false when the file name is not a locale data file. The `_`
    /// locale is the translator template and is skipped.
    pub fn add_data_file(&mut self, file_name: &str, contents: &str) -> bool {
        let Some(lang) = file_name.strip_suffix(".data") else {
            return false;
        };
        let is_word = !lang.is_empty() && lang.chars().all(|c| c.is_alphanumeric() || c == '_');
        if !is_word || lang == "_" {
            return false;
        }
        self.insert_locale(lang, parse_data_file(contents));
        true
    }

    pub fn table(&self, tag: &str) -> Option<&HashMap<String, String>> {
        self.locales.get(&tag.to_ascii_lowercase())
    }
}

/// Parse tab-separated `source<TAB>translation` lines.
///
/// Comment lines (`#`), empty lines and lines without a tab are ignored. Any
/// text after a second tab is ignored too.
pub fn parse_data_file(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut pieces = line.splitn(3, '\t');
            let source = pieces.next()?;
            let translated = pieces.next()?;
            Some((source.to_string(), translated.to_string()))
        })
        .collect()
}

/// Translation table resolved for one locale.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    locale: Option<String>,
    table: HashMap<String, String>,
}

impl Translator {
    /// Translator that returns every string unchanged.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Resolve the table for `locale`.
    ///
    /// Tries the exact tag, then the tag with its region subtag stripped
    /// (`en-us` -> `en`), then falls back to no translation.
    pub fn for_locale(data: &TranslationData, locale: Option<&str>) -> Self {
        let Some(locale) = locale else {
            tracing::debug!("no locale detected, strings stay untranslated");
            return Self::identity();
        };

        let base = locale.split('-').next().unwrap_or(locale);
        let table = data.table(locale).or_else(|| data.table(base));
        match table {
            Some(table) => {
                tracing::debug!(locale, entries = table.len(), "loaded translation table");
                Self {
                    locale: Some(locale.to_string()),
                    table: table.clone(),
                }
            }
            None => {
                tracing::debug!(locale, "no translation table for locale");
                Self {
                    locale: Some(locale.to_string()),
                    table: HashMap::new(),
                }
            }
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Localized form of `text`, or `text` itself.
    pub fn translate<'a>(&'a self, text: &'a str) -> &'a str {
        self.table.get(text).map(String::as_str).unwrap_or(text)
    }
}
