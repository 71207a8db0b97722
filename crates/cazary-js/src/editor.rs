//! JsCazary - the widget handle for JavaScript.

use wasm_bindgen::prelude::*;
use web_sys::Element;

use cazary_browser::{Command, Widget};

use crate::types::{CazaryOptions, CazaryStatus};

/// Turn `element` (a textarea or text input) into a rich-text widget.
///
/// `options` is a `CazaryOptions` object, or `undefined` for the defaults.
#[wasm_bindgen]
pub fn attach(element: Element, options: JsValue) -> Result<JsCazary, JsError> {
    let options: CazaryOptions = if options.is_undefined() || options.is_null() {
        CazaryOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
    };
    let config = options.into_config();
    let widget = cazary_browser::attach(element, config)?;
    Ok(JsCazary {
        widget: Some(widget),
    })
}

/// A widget attached to the page.
#[wasm_bindgen]
pub struct JsCazary {
    widget: Option<Widget>,
}

impl JsCazary {
    fn widget(&self) -> Result<&Widget, JsError> {
        self.widget
            .as_ref()
            .ok_or_else(|| JsError::new("Widget has been detached"))
    }
}

#[wasm_bindgen]
impl JsCazary {
    /// Instance id, unique on the page.
    pub fn id(&self) -> Result<u32, JsError> {
        Ok(self.widget()?.id())
    }

    /// Current HTML of the active view.
    pub fn value(&self) -> Result<String, JsError> {
        Ok(self.widget()?.value()?)
    }

    /// Replace the content of the editor and the original element.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, html: &str) -> Result<(), JsError> {
        Ok(self.widget()?.set_value(html)?)
    }

    /// `"rte"` or `"html"`.
    pub fn mode(&self) -> Result<String, JsError> {
        Ok(self.widget()?.mode()?.name().to_string())
    }

    /// Switch between rich-text and source views. Returns the new mode.
    #[wasm_bindgen(js_name = toggleMode)]
    pub fn toggle_mode(&self) -> Result<String, JsError> {
        Ok(self.widget()?.toggle_mode()?.name().to_string())
    }

    /// Run a command by name. Returns false when the command is disabled.
    #[wasm_bindgen(js_name = execCommand)]
    pub fn exec_command(&self, name: &str, parameter: Option<String>) -> Result<bool, JsError> {
        let command: Command = name
            .parse()
            .map_err(|e| JsError::new(&format!("Invalid command: {}", e)))?;
        Ok(self.widget()?.exec_command(command, parameter.as_deref())?)
    }

    /// Replace the selection with plain text.
    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&self, text: &str, remove_format: bool) -> Result<(), JsError> {
        Ok(self.widget()?.insert_text(text, remove_format)?)
    }

    #[wasm_bindgen(js_name = selectedText)]
    pub fn selected_text(&self) -> Result<String, JsError> {
        Ok(self.widget()?.selected_text()?)
    }

    /// Toolbar status as of the last refresh.
    pub fn status(&self) -> Result<CazaryStatus, JsError> {
        let widget = self.widget()?;
        let controller = widget
            .controller()
            .try_borrow()
            .map_err(|_| JsError::new("Widget is busy"))?;
        Ok(CazaryStatus::from(controller.status()))
    }

    pub fn focus(&self) -> Result<(), JsError> {
        Ok(self.widget()?.focus()?)
    }

    /// Remove the widget and restore the original element.
    pub fn detach(&mut self) -> Result<(), JsError> {
        let widget = self
            .widget
            .take()
            .ok_or_else(|| JsError::new("Widget has been detached"))?;
        widget.detach().map_err(|widget| {
            self.widget = Some(widget);
            JsError::new("Widget is busy")
        })
    }
}
