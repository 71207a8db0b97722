//! Browser DOM layer for the cazary rich-text widget.
//!
//! Implements the `cazary-core` platform traits over an iframe in design
//! mode and the DOM around it. Assumes a `wasm32-unknown-unknown` target.
//!
//! # Architecture
//!
//! - `editor_core`: the editing document, command execution and status walk
//! - `selection`: standard and legacy TextRange selection backends
//! - `toolbar`: toolbar DOM and status rendering
//! - `panels`: panel DOM, list and form handlers, preview debounce
//! - `widget`: assembly, page and editor event wiring, the shared panel slot
//! - `locale`: navigator language detection
//!
//! # Re-exports
//!
//! This crate re-exports `cazary-core` for convenience, so consumers only
//! need to depend on `cazary-browser`.

// Re-export core crate
pub use cazary_core;
pub use cazary_core::*;

mod dom;
pub mod editor_core;
pub mod error;
pub mod locale;
pub mod panels;
pub mod selection;
pub mod toolbar;
pub mod widget;

pub use editor_core::EditorCore;
pub use error::WidgetError;
pub use locale::detect_locale;
pub use panels::PanelHandle;
pub use selection::{LegacySelection, SelectionBackend, StandardSelection};
pub use toolbar::ToolbarDom;
pub use widget::{
    BrowserView, SOURCE_CLASS, SourceElement, Widget, WidgetController, attach, close_all_panels,
    shared_panels,
};
