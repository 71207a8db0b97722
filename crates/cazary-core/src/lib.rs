//! cazary-core: rich-text widget logic without DOM dependencies.
//!
//! This crate provides:
//! - `Command` - the closed command vocabulary and its toolbar layout
//! - `WidgetConfig` - per-instance options merged with defaults
//! - `StatusSnapshot` - format state folded from the selection's ancestors
//! - `PanelCoordinator` - the single open panel shared by all instances
//! - `Controller` - mode switching, panel lifecycle and toolbar refresh,
//!   generic over the `RichTextEditor` and `WidgetView` platform traits

pub mod command;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod i18n;
pub mod layout;
pub mod markup;
pub mod panel;
pub mod platform;
pub mod status;
pub mod toolbar;
pub mod validate;

pub use command::{Command, CommandAction, HILITE_COLOR, UnknownCommand};
pub use config::{CommandsOption, EditorMode, WidgetConfig};
pub use controller::{ClickOutcome, Controller, InstanceId, PanelOutcome, SharedPanels};
pub use debounce::{DEBOUNCE_MS, ValueWatch};
pub use error::ConfigError;
pub use i18n::{TranslationData, Translator};
pub use layout::{Preset, ToolbarItem, ToolbarLayout};
pub use markup::{document_shell, normalize_markup, placeholder_rule};
pub use panel::{
    FormKind, FormPanel, ItemLook, OpenPanel, PanelContent, PanelCoordinator, PanelItem,
    PanelKind, PanelRequest, build_panel,
};
pub use platform::{RichTextEditor, WidgetView};
pub use smol_str::SmolStr;
pub use status::{CommandState, NodeFacts, StatusSnapshot, StyleFacts};
pub use toolbar::{ToolbarUpdate, font_size_label, status_updates};
pub use validate::{is_email, is_url};
