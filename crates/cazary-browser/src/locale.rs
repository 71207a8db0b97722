//! Browser locale detection.

use wasm_bindgen::JsValue;

/// Navigator properties that may carry the UI language, most specific first.
const LANGUAGE_PROPERTIES: [&str; 3] = ["browserLanguage", "language", "userLanguage"];

/// Locale tag reported by the browser, if any.
pub fn detect_locale() -> Option<String> {
    let window = web_sys::window()?;
    let navigator: JsValue = window.navigator().into();

    LANGUAGE_PROPERTIES.iter().find_map(|property| {
        match js_sys::Reflect::get(&navigator, &JsValue::from_str(property)) {
            Ok(value) => value.as_string().filter(|tag| !tag.is_empty()),
            Err(e) => {
                tracing::debug!(property, "navigator probe failed: {:?}", e);
                None
            }
        }
    })
}
