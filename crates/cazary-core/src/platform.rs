//! Platform abstraction traits for the widget.
//!
//! The controller drives the widget through these traits. The browser crate
//! implements them over an iframe in design mode and the surrounding DOM;
//! tests implement them in memory.

use crate::command::Command;
use crate::config::EditorMode;
use crate::panel::PanelContent;
use crate::status::StatusSnapshot;
use crate::toolbar::ToolbarUpdate;

/// The editable rich-text surface.
///
/// Methods take `&self`: the surface is a handle onto state owned by the
/// platform (a document), not state owned by the caller.
pub trait RichTextEditor {
    /// Focus the surface and run `command` with an optional parameter.
    ///
    /// Commands without a native counterpart are ignored.
    fn exec_command(&self, command: Command, parameter: Option<&str>);

    /// Whether the engine reports `command` as executable right now.
    fn can_exec_command(&self, command: Command) -> bool;

    /// Current markup, normalized.
    fn value(&self) -> String;

    /// Replace the markup wholesale.
    fn set_value(&self, html: &str);

    /// Format state of the current selection.
    fn current_status(&self) -> StatusSnapshot;

    /// Selected text, or an empty string.
    fn selected_text(&self) -> String;

    /// Replace the selection with plain text.
    fn insert_text(&self, text: &str, remove_formatting: bool);

    /// Focus the surface, restoring the last saved selection.
    fn set_focus(&self);

    /// Whether the surface has no text content.
    fn is_empty(&self) -> bool;

    /// Mark the surface as empty, for placeholder styling.
    fn set_empty_marker(&self, empty: bool);
}

/// Everything around the editing surface: the original element, the toolbar
/// and the panels.
pub trait WidgetView {
    /// Keeps an open panel alive; dropping it closes the panel.
    type Panel;

    /// Value of the original source element.
    fn source_value(&self) -> String;

    fn set_source_value(&self, value: &str);

    fn focus_source(&self);

    /// Show the view for `mode` and set the toolbar's mode-dependent state.
    ///
    /// In HTML mode every control except `source` is disabled and `source`
    /// is marked active; in rich-text mode both marks are cleared.
    fn show_mode(&self, mode: EditorMode);

    fn apply_update(&self, update: &ToolbarUpdate);

    /// Build and show the panel for `command` below its toolbar control, and
    /// mark the control active until the panel is dropped.
    fn open_panel(&self, command: Command, content: &PanelContent) -> Self::Panel;
}
