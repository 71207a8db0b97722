use wasm_bindgen::JsValue;

/// Failures while building or driving a widget in the DOM.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum WidgetError {
    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("element <{0}> cannot be turned into an editor")]
    UnsupportedElement(String),

    #[error("editor frame has no document")]
    MissingDocument,

    #[error("widget is busy handling another event")]
    Busy,
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        WidgetError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
