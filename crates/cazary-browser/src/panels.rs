//! Panel DOM.
//!
//! Renders a [`PanelContent`] below its toolbar control and wires the panel's
//! events back to the owning controller. The returned [`PanelHandle`] keeps
//! the panel alive; dropping it removes the panel and unmarks the control.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use cazary_core::{
    Command, DEBOUNCE_MS, FormKind, FormPanel, InstanceId, ItemLook, PanelContent, PanelItem,
    ValueWatch,
};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::dom::{ACTIVE_CLASS, closest_from, create, set_class, set_visible};
use crate::error::WidgetError;
use crate::widget::{WidgetController, with_controller};

const PARAM_ATTR: &str = "data-param";

/// An open panel. Dropping it closes the panel.
pub struct PanelHandle {
    command: Command,
    root: HtmlElement,
    controls: Vec<HtmlElement>,
    _listeners: Vec<EventListener>,
}

impl PanelHandle {
    pub fn command(&self) -> Command {
        self.command
    }

    pub fn element(&self) -> &HtmlElement {
        &self.root
    }
}

impl Drop for PanelHandle {
    fn drop(&mut self) {
        self.root.remove();
        for control in &self.controls {
            set_class(control, ACTIVE_CLASS, false);
        }
        tracing::trace!(command = %self.command, "panel closed");
    }
}

/// Build the panel for `command`, place it below the first of `controls` and
/// mark the controls active.
pub fn open(
    owner: InstanceId,
    command: Command,
    content: &PanelContent,
    controls: Vec<HtmlElement>,
    controller: Weak<RefCell<WidgetController>>,
) -> Result<PanelHandle, WidgetError> {
    let document = gloo_utils::document();
    let anchor = controls
        .first()
        .ok_or_else(|| WidgetError::Dom(format!("no toolbar control for {command}")))?;

    let root: HtmlElement = create(&document, "div")?;
    root.set_class_name(&format!("cazary-panel cazary-panel-{}", command.name()));
    root.set_attribute("data-id", &owner.to_string())?;
    root.set_attribute("data-command", command.name())?;
    place_below(&root, anchor)?;

    let mut listeners = Vec::new();
    let focus_target = match content {
        PanelContent::Select { list_class, rows } => {
            for row in rows {
                let list: Element = render_list(&document, list_class, row)?;
                root.append_child(&list)?;
            }
            None
        }
        PanelContent::Form(form) => {
            let parts = render_form(&document, form)?;
            root.append_child(&parts.form)?;
            listeners.extend(form_listeners(command, form.kind, &parts, controller.clone()));
            Some(parts.field)
        }
    };

    // Clicks inside the panel never reach the page handler that closes panels.
    listeners.push(EventListener::new(&root, "click", move |event| {
        event.stop_propagation();
        let Some(item) = closest_from(event.target(), "li[data-param]") else {
            return;
        };
        let Some(param) = item.get_attribute(PARAM_ATTR) else {
            return;
        };
        with_controller(&controller, |c| c.select(command, &param));
    }));

    gloo_utils::body().append_child(&root)?;
    for control in &controls {
        set_class(control, ACTIVE_CLASS, true);
    }
    if let Some(field) = focus_target {
        if let Err(e) = field.focus() {
            tracing::debug!("focusing panel field failed: {:?}", e);
        }
    }

    Ok(PanelHandle {
        command,
        root,
        controls,
        _listeners: listeners,
    })
}

fn place_below(root: &HtmlElement, anchor: &HtmlElement) -> Result<(), WidgetError> {
    let rect = anchor.get_bounding_client_rect();
    let window = gloo_utils::window();
    let left = rect.left() + window.scroll_x().unwrap_or(0.0);
    let top = rect.bottom() + window.scroll_y().unwrap_or(0.0);

    let style = root.style();
    style.set_property("left", &format!("{left}px"))?;
    style.set_property("top", &format!("{top}px"))?;
    Ok(())
}

fn render_list(
    document: &Document,
    list_class: &str,
    items: &[PanelItem],
) -> Result<Element, WidgetError> {
    let list: Element = create(document, "ul")?;
    list.set_class_name(list_class);
    for item in items {
        let entry: HtmlElement = create(document, "li")?;
        entry.set_attribute("unselectable", "on")?;
        entry.set_title(&item.label);
        entry.set_attribute(PARAM_ATTR, &item.param)?;
        match &item.look {
            ItemLook::FontFamily(family) => {
                entry.style().set_property("font-family", family)?;
                entry.set_text_content(Some(&item.label));
            }
            ItemLook::FontSize(size) => {
                let font: Element = create(document, "font")?;
                font.set_attribute("size", &size.to_string())?;
                font.set_text_content(Some(&item.label));
                entry.append_child(&font)?;
            }
            ItemLook::Background(color) => {
                entry.style().set_property("background-color", color)?;
                entry.set_text_content(Some(&item.label));
            }
        }
        list.append_child(&entry)?;
    }
    Ok(list)
}

struct FormParts {
    form: HtmlFormElement,
    field: HtmlInputElement,
    preview: HtmlElement,
    preview_target: Element,
}

// <form action="#" novalidate>
//   <div>
//     <fieldset><legend>..</legend><input type="text" class="FIELD" required placeholder=".."></fieldset>
//     <input type="submit" class="cazary-widget-submit" value="..">
//   </div>
//   <fieldset class="cazary-widget-preview"><legend>..</legend><img|iframe class="PREVIEW"></fieldset>
// </form>
fn render_form(document: &Document, panel: &FormPanel) -> Result<FormParts, WidgetError> {
    let form: HtmlFormElement = create(document, "form")?;
    form.set_action("#");
    form.set_no_validate(true);

    let body: Element = create(document, "div")?;
    let fieldset: Element = create(document, "fieldset")?;
    let legend: Element = create(document, "legend")?;
    legend.set_text_content(Some(&panel.legend));
    let field: HtmlInputElement = create(document, "input")?;
    field.set_type("text");
    field.set_class_name(panel.kind.field_class());
    field.set_required(true);
    field.set_placeholder(&panel.placeholder);
    fieldset.append_child(&legend)?;
    fieldset.append_child(&field)?;

    let submit: HtmlInputElement = create(document, "input")?;
    submit.set_type("submit");
    submit.set_class_name("cazary-widget-submit");
    submit.set_value(&panel.submit_label);
    body.append_child(&fieldset)?;
    body.append_child(&submit)?;

    let preview: HtmlElement = create(document, "fieldset")?;
    preview.set_class_name("cazary-widget-preview");
    let preview_legend: Element = create(document, "legend")?;
    preview_legend.set_text_content(Some(&panel.preview_legend));
    let preview_tag = match panel.kind {
        FormKind::Image => "img",
        FormKind::Link => "iframe",
    };
    let preview_target: Element = create(document, preview_tag)?;
    preview_target.set_class_name(panel.kind.preview_class());
    preview.append_child(&preview_legend)?;
    preview.append_child(&preview_target)?;

    form.append_child(&body)?;
    form.append_child(&preview)?;

    Ok(FormParts {
        form,
        field,
        preview,
        preview_target,
    })
}

fn form_listeners(
    command: Command,
    kind: FormKind,
    parts: &FormParts,
    controller: Weak<RefCell<WidgetController>>,
) -> Vec<EventListener> {
    let field = parts.field.clone();
    let on_submit = EventListener::new_with_options(
        &parts.form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let value = field.value();
            let mut accepted = false;
            with_controller(&controller, |c| accepted = c.submit(command, &value));
            if !accepted {
                if let Err(e) = field.focus() {
                    tracing::debug!("refocusing panel field failed: {:?}", e);
                }
            }
        },
    );

    let watch = Rc::new(RefCell::new(ValueWatch::new()));
    let mut listeners = vec![on_submit];
    for event_type in ["keydown", "paste"] {
        let field = parts.field.clone();
        let preview = parts.preview.clone();
        let target = parts.preview_target.clone();
        let watch = watch.clone();
        listeners.push(EventListener::new(&parts.field, event_type, move |_| {
            let field = field.clone();
            let preview = preview.clone();
            let target = target.clone();
            let watch = watch.clone();
            // The new value is only readable once the event has been processed.
            Timeout::new(DEBOUNCE_MS, move || {
                update_preview(kind, &field, &preview, &target, &watch);
            })
            .forget();
        }));
    }
    listeners
}

fn update_preview(
    kind: FormKind,
    field: &HtmlInputElement,
    preview: &HtmlElement,
    target: &Element,
    watch: &RefCell<ValueWatch>,
) {
    let value = field.value();
    if !watch.borrow_mut().observe(&value) {
        return;
    }
    match kind.preview(&value) {
        Some(url) => {
            set_visible(preview, true);
            if let Err(e) = target.set_attribute("src", url) {
                tracing::warn!("setting preview source failed: {:?}", e);
            }
        }
        None => set_visible(preview, false),
    }
}
