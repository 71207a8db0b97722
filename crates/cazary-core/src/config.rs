//! Widget options.
//!
//! Options are merged field by field over the defaults below, so callers only
//! pass what they want to change.

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::i18n::TranslationData;
use crate::layout::{Preset, ToolbarLayout};
use crate::markup::placeholder_rule;

/// Which view of the content is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EditorMode {
    /// Rendered rich-text editing.
    #[default]
    Rte,
    /// Raw HTML source in the original element.
    Html,
}

impl EditorMode {
    /// `"html"` selects source mode; anything else is rich-text.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("html") {
            EditorMode::Html
        } else {
            EditorMode::Rte
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EditorMode::Rte => "rte",
            EditorMode::Html => "html",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Rte => EditorMode::Html,
            EditorMode::Html => EditorMode::Rte,
        }
    }
}

impl<'de> Deserialize<'de> for EditorMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(EditorMode::from_name(&raw))
    }
}

/// The `commands` option: a preset name or explicit rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CommandsOption {
    /// `"MINIMAL"`, `"STANDARD"` or `"FULL"`. Any other string is read as a
    /// single row of tokens.
    Named(String),
    Rows(Vec<String>),
}

impl Default for CommandsOption {
    fn default() -> Self {
        CommandsOption::Named("STANDARD".to_string())
    }
}

impl CommandsOption {
    pub fn layout(&self) -> ToolbarLayout {
        match self {
            CommandsOption::Named(name) => match Preset::from_name(name) {
                Some(preset) => ToolbarLayout::preset(preset),
                None => ToolbarLayout::from_rows(&[name]),
            },
            CommandsOption::Rows(rows) => ToolbarLayout::from_rows(rows),
        }
    }
}

pub const DEFAULT_STYLE: &str = "body{margin:0px;padding:8px;}p{margin:0px;padding:0px;}";

pub const DEFAULT_FONT_NAMES: &[&str] = &[
    "sans-serif",
    "serif",
    "cursive",
    "fantasy",
    "monospace",
    "Arial",
    "Arial Black",
    "Comic Sans MS",
    "Courier New",
    "Narrow",
    "Garamond",
    "Georgia",
    "Impact",
    "Tahoma",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

pub const DEFAULT_COLORS: &[&[&str]] = &[
    &["#ffffff", "#ffcccc", "#ffcc99", "#ffff99", "#ffffcc", "#99ff99", "#99ffff", "#ccffff", "#ccccff", "#ffccff"],
    &["#cccccc", "#ff6666", "#ff9966", "#ffff66", "#ffff33", "#66ff99", "#33ffff", "#66ffff", "#9999ff", "#ff99ff"],
    &["#bbbbbb", "#ff0000", "#ff9900", "#ffcc66", "#ffff00", "#33ff33", "#66cccc", "#33ccff", "#6666cc", "#cc66cc"],
    &["#999999", "#cc0000", "#ff6600", "#ffcc33", "#ffcc00", "#33cc00", "#00cccc", "#3366ff", "#6633ff", "#cc33cc"],
    &["#666666", "#990000", "#cc6600", "#cc9933", "#999900", "#009900", "#339999", "#3333ff", "#6600cc", "#993399"],
    &["#333333", "#660000", "#993300", "#996633", "#666600", "#006600", "#336666", "#000099", "#333399", "#663366"],
    &["#000000", "#330000", "#663300", "#663333", "#333300", "#003300", "#003333", "#000066", "#330099", "#330033"],
];

/// Options for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub mode: EditorMode,
    /// CSS injected into the editing document.
    pub style: String,
    pub fontnames: Vec<String>,
    pub colors: Vec<Vec<String>>,
    pub commands: CommandsOption,
    /// Localized strings keyed by locale tag.
    pub translations: TranslationData,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            mode: EditorMode::Rte,
            style: DEFAULT_STYLE.to_string(),
            fontnames: DEFAULT_FONT_NAMES.iter().map(|s| s.to_string()).collect(),
            colors: DEFAULT_COLORS
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
            commands: CommandsOption::default(),
            translations: TranslationData::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn layout(&self) -> ToolbarLayout {
        self.commands.layout()
    }

    /// Stylesheet for the editing document, with a placeholder rule appended
    /// when the original element has a placeholder.
    pub fn editor_style(&self, placeholder: Option<&str>) -> String {
        match placeholder {
            Some(text) => format!("{}{}", self.style, placeholder_rule(text)),
            None => self.style.clone(),
        }
    }
}
