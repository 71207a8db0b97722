//! Small DOM helpers shared by the toolbar, panels and widget.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::error::WidgetError;

pub const ACTIVE_CLASS: &str = "cazary-active";
pub const DISABLED_CLASS: &str = "cazary-disabled";

/// Create an element and cast it to the expected type.
pub fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, WidgetError> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| WidgetError::Dom(format!("<{tag}> has an unexpected type")))
}

/// Show or hide an element through its inline `display`.
pub fn set_visible(element: &HtmlElement, visible: bool) {
    let display = if visible { "" } else { "none" };
    if let Err(e) = element.style().set_property("display", display) {
        tracing::warn!("setting display failed: {:?}", e);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!(class, "toggling class failed: {:?}", e);
    }
}

/// Nearest element matching `selector` at or above the event target.
pub fn closest_from(target: Option<EventTarget>, selector: &str) -> Option<Element> {
    let element = target?.dyn_into::<Element>().ok()?;
    element.closest(selector).ok().flatten()
}

pub fn is_escape(event: &Event) -> bool {
    event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|key| key.key() == "Escape")
}
