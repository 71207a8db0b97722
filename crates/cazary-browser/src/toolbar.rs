//! Toolbar DOM.
//!
//! ```html
//! <div class="cazary-commands-wrapper">
//!   <ul class="cazary-commands-list">
//!     <li unselectable="on" class="cazary-command-bold" title="Bold" data-command="bold">Bold</li>
//!     ...
//!   </ul>
//!   ...
//! </div>
//! ```

use cazary_core::{Command, CommandState, EditorMode, ToolbarLayout, ToolbarUpdate, Translator};
use web_sys::{Document, Element, EventTarget, HtmlElement, Node};

use crate::dom::{ACTIVE_CLASS, DISABLED_CLASS, closest_from, create, set_class};
use crate::error::WidgetError;

const COMMAND_ATTR: &str = "data-command";

pub struct ToolbarDom {
    wrapper: Element,
    controls: Vec<(Command, HtmlElement)>,
}

impl ToolbarDom {
    pub fn build(
        document: &Document,
        layout: &ToolbarLayout,
        translator: &Translator,
    ) -> Result<Self, WidgetError> {
        let wrapper: Element = create(document, "div")?;
        wrapper.set_class_name("cazary-commands-wrapper");

        let mut controls = Vec::new();
        for row in layout.rows() {
            let list: Element = create(document, "ul")?;
            list.set_class_name("cazary-commands-list");
            for item in row {
                let text = translator.translate(item.label());
                let control: HtmlElement = create(document, "li")?;
                control.set_attribute("unselectable", "on")?;
                control.set_title(text);
                control.set_class_name(&item.class_name());
                control.set_text_content(Some(text));
                if let Some(command) = item.command() {
                    control.set_attribute(COMMAND_ATTR, command.name())?;
                    controls.push((command, control.clone()));
                }
                list.append_child(&control)?;
            }
            wrapper.append_child(&list)?;
        }

        Ok(Self { wrapper, controls })
    }

    pub fn element(&self) -> &Element {
        &self.wrapper
    }

    /// Every control for `command`, in layout order.
    pub fn controls(&self, command: Command) -> impl Iterator<Item = &HtmlElement> {
        self.controls
            .iter()
            .filter(move |(c, _)| *c == command)
            .map(|(_, control)| control)
    }

    pub fn set_active(&self, command: Command, active: bool) {
        for control in self.controls(command) {
            set_class(control, ACTIVE_CLASS, active);
        }
    }

    /// In HTML mode every control but `source` is disabled and `source` is
    /// marked active.
    pub fn show_mode(&self, mode: EditorMode) {
        let html = mode == EditorMode::Html;
        for (command, control) in &self.controls {
            if *command == Command::Source {
                set_class(control, ACTIVE_CLASS, html);
            } else {
                set_class(control, DISABLED_CLASS, html);
            }
        }
    }

    pub fn apply(&self, update: &ToolbarUpdate) {
        match update {
            ToolbarUpdate::Label {
                command,
                text,
                font_family,
            } => {
                for control in self.controls(*command) {
                    let label = text.clone().unwrap_or_else(|| control.title());
                    control.set_text_content(Some(&label));
                    set_style(control, "font-family", font_family.as_deref());
                }
            }
            ToolbarUpdate::Swatch { command, color } => {
                for control in self.controls(*command) {
                    set_style(control, "background-color", color.as_deref());
                }
            }
            ToolbarUpdate::State { command, state } => {
                for control in self.controls(*command) {
                    set_class(control, ACTIVE_CLASS, *state == CommandState::Active);
                    set_class(control, DISABLED_CLASS, *state == CommandState::Disabled);
                }
            }
        }
    }
}

fn set_style(control: &HtmlElement, property: &str, value: Option<&str>) {
    let style = control.style();
    let result = match value {
        Some(value) => style.set_property(property, value),
        None => style.remove_property(property).map(|_| ()),
    };
    if let Err(e) = result {
        tracing::warn!(property, "updating toolbar style failed: {:?}", e);
    }
}

/// Command of the toolbar control an event was dispatched to.
pub fn command_at(toolbar: &Element, target: Option<EventTarget>) -> Option<Command> {
    let control = closest_from(target, "li[data-command]")?;
    let node: &Node = control.as_ref();
    if !toolbar.contains(Some(node)) {
        return None;
    }
    Command::from_name(&control.get_attribute(COMMAND_ATTR)?)
}
