//! Per-instance widget controller.
//!
//! Owns the mode state machine (rich-text vs. HTML source), routes toolbar
//! clicks and panel submissions to the editor, and keeps the toolbar in sync
//! with the editor's status after every interaction.

use std::cell::RefCell;
use std::rc::Rc;

use crate::command::{Command, CommandAction};
use crate::config::{EditorMode, WidgetConfig};
use crate::i18n::Translator;
use crate::panel::{FormKind, PanelCoordinator, PanelKind, PanelRequest, build_panel};
use crate::platform::{RichTextEditor, WidgetView};
use crate::status::{CommandState, StatusSnapshot};
use crate::toolbar::status_updates;

/// Identifies one widget instance on the page.
pub type InstanceId = u32;

/// Panel coordinator shared by every instance on the page.
pub type SharedPanels<P> = Rc<RefCell<PanelCoordinator<P>>>;

/// What a toolbar click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The control was disabled; focus was restored and nothing ran.
    Ignored,
    Executed,
    ModeToggled,
    Panel(PanelOutcome),
}

/// What a panel request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Opened,
    /// The same panel was already open and has been closed.
    Closed,
    /// The command has no panel.
    Unavailable,
}

pub struct Controller<E, V: WidgetView> {
    id: InstanceId,
    editor: E,
    view: V,
    panels: SharedPanels<V::Panel>,
    config: WidgetConfig,
    translator: Translator,
    mode: EditorMode,
    status: StatusSnapshot,
}

impl<E: RichTextEditor, V: WidgetView> Controller<E, V> {
    /// Create a controller. Call [`start`](Self::start) to enter the
    /// configured mode.
    pub fn new(
        id: InstanceId,
        editor: E,
        view: V,
        panels: SharedPanels<V::Panel>,
        config: WidgetConfig,
        translator: Translator,
    ) -> Self {
        Self {
            id,
            editor,
            view,
            panels,
            mode: config.mode,
            config,
            translator,
            status: StatusSnapshot::new(),
        }
    }

    pub fn start(&mut self) {
        match self.mode {
            EditorMode::Rte => self.enter_rte(),
            EditorMode::Html => self.enter_html(),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Status as of the last refresh.
    pub fn status(&self) -> &StatusSnapshot {
        &self.status
    }

    // === Mode ===

    pub fn toggle_mode(&mut self) {
        self.close_panels();
        match self.mode {
            EditorMode::Rte => self.enter_html(),
            EditorMode::Html => self.enter_rte(),
        }
    }

    fn enter_rte(&mut self) {
        let value = self.view.source_value();
        self.editor.set_value(&value);
        self.update_empty_marker();

        self.mode = EditorMode::Rte;
        self.view.show_mode(EditorMode::Rte);
        self.refresh_status();
        tracing::debug!(id = self.id, "entered rich-text mode");
    }

    fn enter_html(&mut self) {
        let html = self.editor.value();
        self.view.set_source_value(&html);

        self.mode = EditorMode::Html;
        self.view.show_mode(EditorMode::Html);
        tracing::debug!(id = self.id, "entered source mode");
    }

    // === Value ===

    /// Content of whichever view is active.
    pub fn value(&self) -> String {
        match self.mode {
            EditorMode::Rte => self.editor.value(),
            EditorMode::Html => self.view.source_value(),
        }
    }

    /// Replace the content of both views.
    pub fn set_value(&mut self, html: &str) {
        self.editor.set_value(html);
        self.view.set_source_value(html);
        self.update_empty_marker();
        self.refresh_status();
    }

    /// Copy the editor content into the original element.
    pub fn sync_source(&self) {
        if self.mode == EditorMode::Rte {
            self.view.set_source_value(&self.editor.value());
        }
    }

    // === Toolbar ===

    /// Whether the control for `command` is currently disabled.
    pub fn is_disabled(&self, command: Command) -> bool {
        match self.mode {
            EditorMode::Html => command != Command::Source,
            EditorMode::Rte => self.status.state(command) == CommandState::Disabled,
        }
    }

    /// Handle a click on the toolbar control for `command`.
    pub fn click(&mut self, command: Command) -> ClickOutcome {
        if self.is_disabled(command) {
            tracing::trace!(id = self.id, %command, "ignoring click on disabled control");
            self.focus();
            return ClickOutcome::Ignored;
        }

        match command.action() {
            CommandAction::ToggleSource => {
                self.toggle_mode();
                self.focus();
                ClickOutcome::ModeToggled
            }
            CommandAction::Panel(_) => ClickOutcome::Panel(self.open_panel(command)),
            CommandAction::Native => {
                self.execute(command, None);
                ClickOutcome::Executed
            }
        }
    }

    /// Close any panel, run `command`, and refresh the toolbar.
    pub fn execute(&mut self, command: Command, parameter: Option<&str>) {
        self.close_panels();
        tracing::debug!(id = self.id, %command, ?parameter, "executing command");
        self.editor.exec_command(command, parameter);
        self.refresh_status();
    }

    /// Re-read the editor status and push it to the toolbar.
    pub fn refresh_status(&mut self) {
        if self.mode != EditorMode::Rte {
            return;
        }
        self.status = self.editor.current_status();
        for update in status_updates(&self.status, &self.translator) {
            self.view.apply_update(&update);
        }
    }

    fn update_empty_marker(&self) {
        self.editor.set_empty_marker(self.editor.is_empty());
    }

    /// Deferred handler for typing and pasting in the editor.
    pub fn content_changed(&mut self) {
        self.refresh_status();
        self.update_empty_marker();
    }

    /// The editor gained focus or was clicked.
    pub fn editor_activated(&mut self) {
        self.close_panels();
        self.refresh_status();
    }

    /// Focus the active view.
    pub fn focus(&self) {
        match self.mode {
            EditorMode::Rte => self.editor.set_focus(),
            EditorMode::Html => self.view.focus_source(),
        }
    }

    /// Replace the editor selection with plain text.
    pub fn insert_text(&mut self, text: &str, remove_formatting: bool) {
        if self.mode != EditorMode::Rte {
            return;
        }
        self.editor.insert_text(text, remove_formatting);
        self.refresh_status();
    }

    // === Panels ===

    /// Open the panel for `command`, or close it if it is already open for
    /// this instance. Any other open panel is closed first.
    pub fn open_panel(&mut self, command: Command) -> PanelOutcome {
        let Some(content) = build_panel(command, &self.config, &self.translator) else {
            return PanelOutcome::Unavailable;
        };

        let request = self.panels.borrow_mut().request(self.id, command);
        match request {
            PanelRequest::Toggled(open) => {
                drop(open);
                tracing::trace!(id = self.id, %command, "panel toggled closed");
                self.focus();
                PanelOutcome::Closed
            }
            PanelRequest::Vacant(previous) => {
                drop(previous);
                let handle = self.view.open_panel(command, &content);
                let displaced = self.panels.borrow_mut().install(self.id, command, handle);
                drop(displaced);
                tracing::trace!(id = self.id, %command, "panel opened");
                PanelOutcome::Opened
            }
        }
    }

    /// Close the open panel, whichever instance owns it.
    pub fn close_panels(&self) -> bool {
        let released = self.panels.borrow_mut().release();
        released.is_some()
    }

    /// Close the open panel only if this instance owns it.
    pub fn close_own_panel(&self) -> bool {
        let owned = matches!(self.panels.borrow().current(), Some((owner, _)) if owner == self.id);
        owned && self.close_panels()
    }

    /// An item of a list panel was picked.
    pub fn select(&mut self, command: Command, parameter: &str) {
        self.execute(command, Some(parameter));
    }

    /// A form panel was submitted with `input`.
    ///
    /// Returns false when the input is rejected; the panel stays open and the
    /// caller should refocus the field.
    pub fn submit(&mut self, command: Command, input: &str) -> bool {
        let kind = match command.panel() {
            Some(PanelKind::InsertImage) => FormKind::Image,
            Some(PanelKind::CreateLink) => FormKind::Link,
            _ => return false,
        };
        match kind.resolve(input) {
            Some(target) => {
                self.execute(command, Some(&target));
                true
            }
            None => {
                tracing::debug!(id = self.id, %command, "rejected panel input");
                false
            }
        }
    }

    /// Tear down: close this instance's panel and hand back the platform parts.
    pub fn into_parts(self) -> (E, V) {
        self.close_own_panel();
        (self.editor, self.view)
    }
}
