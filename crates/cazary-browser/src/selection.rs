//! Selection access for the editing document.
//!
//! Engines expose the selection either through `window.getSelection()` and
//! the Range API, or through the legacy `document.selection` TextRange. A
//! backend is picked once per editor. Every probe is fallible and recovers
//! to an empty result.

use std::cell::RefCell;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Node, Selection, Window};

/// Selection and command access for one editing document.
pub trait SelectionBackend {
    fn document(&self) -> &HtmlDocument;

    /// Selected text, or an empty string.
    fn selected_text(&self) -> String;

    /// Node the selection starts from.
    fn anchor_node(&self) -> Option<Node>;

    /// Replace the selection with a plain text node.
    fn insert_at_selection(&self, text: &str);

    /// Remember the current selection so focus can restore it.
    fn save_selection(&self);

    /// Reapply the remembered selection, if any.
    fn restore_selection(&self);

    fn query_command_enabled(&self, name: &str) -> bool {
        match self.document().query_command_enabled(name) {
            Ok(enabled) => enabled,
            Err(e) => {
                tracing::debug!(command = name, "queryCommandEnabled threw: {:?}", e);
                false
            }
        }
    }

    fn exec_command(&self, name: &str, parameter: Option<&str>) {
        let document = self.document();
        let result = match parameter {
            Some(value) => document.exec_command_with_show_ui_and_value(name, false, value),
            None => document.exec_command(name),
        };
        if let Err(e) = result {
            tracing::warn!(command = name, "execCommand failed: {:?}", e);
        }
    }
}

/// Pick the backend the window supports.
pub fn backend_for(window: &Window, document: &HtmlDocument) -> Box<dyn SelectionBackend> {
    let standard = js_sys::Reflect::has(window, &JsValue::from_str("getSelection")).unwrap_or(false);
    if standard {
        Box::new(StandardSelection::new(window.clone(), document.clone()))
    } else {
        tracing::debug!("getSelection unavailable, using TextRange selection");
        Box::new(LegacySelection::new(document.clone()))
    }
}

/// `window.getSelection()` backend.
///
/// The engine keeps the selection of an unfocused document, so saving and
/// restoring are no-ops.
pub struct StandardSelection {
    window: Window,
    document: HtmlDocument,
}

impl StandardSelection {
    pub fn new(window: Window, document: HtmlDocument) -> Self {
        Self { window, document }
    }

    fn selection(&self) -> Option<Selection> {
        match self.window.get_selection() {
            Ok(selection) => selection,
            Err(e) => {
                tracing::debug!("getSelection threw: {:?}", e);
                None
            }
        }
    }
}

impl SelectionBackend for StandardSelection {
    fn document(&self) -> &HtmlDocument {
        &self.document
    }

    fn selected_text(&self) -> String {
        let Some(selection) = self.selection() else {
            return String::new();
        };
        if selection.range_count() == 0 {
            return String::new();
        }
        selection
            .get_range_at(0)
            .map(|range| String::from(range.to_string()))
            .unwrap_or_default()
    }

    fn anchor_node(&self) -> Option<Node> {
        self.selection()?.anchor_node()
    }

    fn insert_at_selection(&self, text: &str) {
        let Some(selection) = self.selection() else {
            return;
        };
        let node = self.document.create_text_node(text);
        if let Err(e) = selection.delete_from_document() {
            tracing::debug!("deleteFromDocument failed: {:?}", e);
        }
        if selection.range_count() == 0 {
            tracing::debug!("no range to insert text into");
            return;
        }
        let inserted = selection
            .get_range_at(0)
            .and_then(|range| range.insert_node(&node));
        if let Err(e) = inserted {
            tracing::warn!("insertNode failed: {:?}", e);
        }
    }

    fn save_selection(&self) {}

    fn restore_selection(&self) {}
}

/// `document.selection` TextRange backend, reached through reflection.
pub struct LegacySelection {
    document: HtmlDocument,
    range: RefCell<Option<JsValue>>,
}

impl LegacySelection {
    pub fn new(document: HtmlDocument) -> Self {
        Self {
            document,
            range: RefCell::new(None),
        }
    }

    fn text_range(&self) -> Option<JsValue> {
        let selection = js_sys::Reflect::get(&self.document, &JsValue::from_str("selection"))
            .ok()
            .filter(|s| !s.is_undefined() && !s.is_null())?;
        match call_method(&selection, "createRange") {
            Ok(range) => Some(range),
            Err(e) => {
                tracing::debug!("createRange failed: {:?}", e);
                None
            }
        }
    }
}

impl SelectionBackend for LegacySelection {
    fn document(&self) -> &HtmlDocument {
        &self.document
    }

    fn selected_text(&self) -> String {
        self.text_range()
            .and_then(|range| js_sys::Reflect::get(&range, &JsValue::from_str("text")).ok())
            .and_then(|text| text.as_string())
            .unwrap_or_default()
    }

    fn anchor_node(&self) -> Option<Node> {
        let range = self.text_range()?;
        call_method(&range, "parentElement")
            .ok()?
            .dyn_into::<Node>()
            .ok()
    }

    fn insert_at_selection(&self, text: &str) {
        let Some(range) = self.text_range() else {
            return;
        };
        if let Err(e) = js_sys::Reflect::set(&range, &JsValue::from_str("text"), &JsValue::from_str(text)) {
            tracing::warn!("setting TextRange text failed: {:?}", e);
        }
    }

    fn save_selection(&self) {
        *self.range.borrow_mut() = self.text_range();
    }

    fn restore_selection(&self) {
        if let Some(range) = self.range.borrow().as_ref() {
            if let Err(e) = call_method(range, "select") {
                tracing::debug!("TextRange select failed: {:?}", e);
            }
        }
    }
}

fn call_method(target: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    let method: js_sys::Function = js_sys::Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    method.call0(target)
}
