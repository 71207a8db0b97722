//! The editing surface: an iframe document in design mode.
//!
//! `EditorCore` implements [`RichTextEditor`] over the iframe's document,
//! normalizing command names and output markup across engines.

use cazary_core::{
    Command, HILITE_COLOR, NodeFacts, RichTextEditor, StatusSnapshot, StyleFacts, document_shell,
    normalize_markup,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlDocument, HtmlElement, HtmlIFrameElement, Window};

use crate::error::WidgetError;
use crate::selection::{SelectionBackend, backend_for};

/// Class set on the body while it has no text.
pub const EMPTY_CLASS: &str = "empty";

pub struct EditorCore {
    window: Window,
    document: HtmlDocument,
    selection: Box<dyn SelectionBackend>,
}

impl EditorCore {
    /// Turn `frame` into an editor holding `value`, styled by `style`.
    ///
    /// The frame must already be attached to the page.
    pub fn new(frame: &HtmlIFrameElement, value: &str, style: &str) -> Result<Self, WidgetError> {
        let window = frame.content_window().ok_or(WidgetError::MissingDocument)?;
        let document = frame
            .content_document()
            .ok_or(WidgetError::MissingDocument)?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| WidgetError::MissingDocument)?;

        document.set_design_mode("on");
        document.open()?;
        document.write_1(&document_shell(style))?;
        document.close()?;

        let selection = backend_for(&window, &document);
        let core = Self {
            window,
            document,
            selection,
        };
        core.set_value(value);
        tracing::debug!("editor document ready");
        Ok(core)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }

    /// Native command to issue for `command`. Background color uses
    /// `hilitecolor` where the engine supports it.
    fn native_command(&self, command: Command) -> Option<&'static str> {
        match command {
            Command::BackColor if self.selection.query_command_enabled(HILITE_COLOR) => {
                Some(HILITE_COLOR)
            }
            _ => command.native_name(),
        }
    }

    fn ancestor_facts(&self) -> Vec<NodeFacts> {
        let mut facts = Vec::new();
        let mut node = self.selection.anchor_node();
        while let Some(current) = node {
            if let Some(element) = current.dyn_ref::<Element>() {
                facts.push(element_facts(element));
            }
            node = current.parent_node();
        }
        facts
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// The reflected `align` property. Only elements whose interface defines it
/// (div, p, table, headings and the like) have one.
fn align_property(element: &Element) -> Option<String> {
    let align = JsValue::from_str("align");
    if !js_sys::Reflect::has(element, &align).unwrap_or(false) {
        return None;
    }
    non_empty(js_sys::Reflect::get(element, &align).ok()?.as_string())
}

fn element_facts(element: &Element) -> NodeFacts {
    let mut facts = NodeFacts::element(&element.tag_name());
    if facts.tag.as_deref() == Some("font") {
        facts.font_face = non_empty(element.get_attribute("face"));
        facts.font_size = non_empty(element.get_attribute("size"));
        facts.font_color = non_empty(element.get_attribute("color"));
    }
    facts.align = align_property(element);

    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let style = html.style();
        let property = |name: &str| non_empty(style.get_property_value(name).ok());
        facts.style = StyleFacts {
            font_family: property("font-family"),
            font_weight: property("font-weight"),
            font_style: property("font-style"),
            text_decoration: property("text-decoration"),
            color: property("color"),
            background_color: property("background-color"),
            vertical_align: property("vertical-align"),
            text_align: property("text-align"),
        };
    }
    facts
}

impl RichTextEditor for EditorCore {
    fn exec_command(&self, command: Command, parameter: Option<&str>) {
        let Some(name) = self.native_command(command) else {
            return;
        };
        self.set_focus();
        self.selection.exec_command(name, parameter);
    }

    fn can_exec_command(&self, command: Command) -> bool {
        command
            .native_name()
            .is_some_and(|name| self.selection.query_command_enabled(name))
    }

    fn value(&self) -> String {
        let html = self.body().map(|body| body.inner_html()).unwrap_or_default();
        normalize_markup(&html)
    }

    fn set_value(&self, html: &str) {
        match self.body() {
            Some(body) => body.set_inner_html(html),
            None => tracing::warn!("editor document has no body"),
        }
    }

    fn current_status(&self) -> StatusSnapshot {
        let selected = self.selection.selected_text();
        let ancestors = self.ancestor_facts();
        let status =
            StatusSnapshot::compute(&selected, |command| self.can_exec_command(command), &ancestors);
        self.selection.save_selection();
        status
    }

    fn selected_text(&self) -> String {
        self.selection.selected_text()
    }

    fn insert_text(&self, text: &str, remove_formatting: bool) {
        self.selection.insert_at_selection(text);
        if remove_formatting {
            self.exec_command(Command::RemoveFormat, None);
        } else {
            self.set_focus();
        }
    }

    fn set_focus(&self) {
        if let Err(e) = self.window.focus() {
            tracing::debug!("editor window focus failed: {:?}", e);
        }
        self.selection.restore_selection();
    }

    fn is_empty(&self) -> bool {
        self.body()
            .and_then(|body| body.text_content())
            .is_none_or(|text| text.is_empty())
    }

    fn set_empty_marker(&self, empty: bool) {
        let Some(body) = self.body() else {
            return;
        };
        if let Err(e) = body.class_list().toggle_with_force(EMPTY_CLASS, empty) {
            tracing::debug!("toggling empty marker failed: {:?}", e);
        }
    }
}
