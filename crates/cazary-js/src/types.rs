//! Types exposed to JavaScript via wasm-bindgen.

use std::collections::HashMap;

use cazary_core::{CommandsOption, EditorMode, StatusSnapshot, TranslationData, WidgetConfig};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Options accepted by `attach`. Every field is optional and falls back to
/// the widget defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct CazaryOptions {
    /// `"rte"` or `"html"`.
    #[tsify(optional)]
    pub mode: Option<String>,
    /// CSS injected into the editing document.
    #[tsify(optional)]
    pub style: Option<String>,
    #[tsify(optional)]
    pub fontnames: Option<Vec<String>>,
    #[tsify(optional)]
    pub colors: Option<Vec<Vec<String>>>,
    /// `"MINIMAL"`, `"STANDARD"`, `"FULL"`, or rows of space-separated commands.
    #[tsify(optional)]
    pub commands: Option<JsCommands>,
    /// Locale tag to source string to translation.
    #[tsify(optional)]
    pub translations: Option<HashMap<String, HashMap<String, String>>>,
    /// Translation files in the tab-separated `.data` format, keyed by file
    /// name (`ja.data`).
    #[tsify(optional)]
    pub data_files: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[serde(untagged)]
pub enum JsCommands {
    Named(String),
    Rows(Vec<String>),
}

impl CazaryOptions {
    /// Merge over the defaults.
    pub fn into_config(self) -> WidgetConfig {
        let mut config = WidgetConfig::default();
        if let Some(mode) = self.mode {
            config.mode = EditorMode::from_name(&mode);
        }
        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(fontnames) = self.fontnames {
            config.fontnames = fontnames;
        }
        if let Some(colors) = self.colors {
            config.colors = colors;
        }
        if let Some(commands) = self.commands {
            config.commands = match commands {
                JsCommands::Named(name) => CommandsOption::Named(name),
                JsCommands::Rows(rows) => CommandsOption::Rows(rows),
            };
        }

        let mut translations = self
            .translations
            .map(TranslationData::from)
            .unwrap_or_default();
        for (file_name, contents) in self.data_files.unwrap_or_default() {
            if !translations.add_data_file(&file_name, &contents) {
                tracing::debug!(file_name = %file_name, "skipping translation file");
            }
        }
        config.translations = translations;
        config
    }
}

/// Toolbar status of a widget.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct CazaryStatus {
    /// Command name to `"normal"`, `"active"` or `"disabled"`.
    pub states: HashMap<String, String>,
    pub font_name: Option<String>,
    pub font_size: Option<String>,
    pub fore_color: Option<String>,
    pub back_color: Option<String>,
}

impl From<&StatusSnapshot> for CazaryStatus {
    fn from(status: &StatusSnapshot) -> Self {
        use cazary_core::Command;

        Self {
            states: status
                .states()
                .map(|(command, state)| (command.name().to_string(), state.name().to_string()))
                .collect(),
            font_name: status.value(Command::FontName).map(str::to_string),
            font_size: status.value(Command::FontSize).map(str::to_string),
            fore_color: status.value(Command::ForeColor).map(str::to_string),
            back_color: status.value(Command::BackColor).map(str::to_string),
        }
    }
}
