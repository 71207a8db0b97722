//! Widget assembly and event wiring.
//!
//! ```html
//! <div class="cazary">
//!   <div class="cazary-commands-wrapper">...</div>
//!   <iframe class="cazary-edit"></iframe>
//!   <textarea class="cazary-source">...</textarea>
//! </div>
//! ```
//!
//! The original element is moved into the wrapper and hidden while the
//! rich-text view is active.

use std::cell::{Cell, OnceCell, RefCell, RefMut};
use std::rc::{Rc, Weak};

use cazary_core::{
    ClickOutcome, Command, CommandAction, Controller, DEBOUNCE_MS, EditorMode, InstanceId,
    PanelContent, PanelCoordinator, RichTextEditor, SharedPanels, ToolbarUpdate, Translator,
    WidgetConfig, WidgetView,
};
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlDocument, HtmlElement, HtmlIFrameElement, HtmlInputElement,
    HtmlTextAreaElement, Window,
};

use crate::dom::{create, is_escape, set_visible};
use crate::editor_core::EditorCore;
use crate::error::WidgetError;
use crate::locale::detect_locale;
use crate::panels::{self, PanelHandle};
use crate::toolbar::{ToolbarDom, command_at};

/// Class added to the original element while it is managed by a widget.
pub const SOURCE_CLASS: &str = "cazary-source";

pub type WidgetController = Controller<EditorCore, BrowserView>;

/// Panel slot; `None` when rendering failed and nothing is on screen.
pub type PanelSlot = Option<PanelHandle>;

thread_local! {
    static PANELS: SharedPanels<PanelSlot> = Rc::new(RefCell::new(PanelCoordinator::new()));
    static NEXT_ID: Cell<InstanceId> = const { Cell::new(1) };
    static PAGE_LISTENERS: Cell<bool> = const { Cell::new(false) };
}

/// The coordinator shared by every widget on the page.
pub fn shared_panels() -> SharedPanels<PanelSlot> {
    PANELS.with(Rc::clone)
}

/// Close the open panel, whichever widget owns it.
pub fn close_all_panels() {
    let released = PANELS.with(|panels| panels.try_borrow_mut().ok().and_then(|mut p| p.release()));
    drop(released);
}

/// Run `action` against the controller if it is still alive and not already
/// handling an event.
///
/// Events fired synchronously while the controller works (focus events from
/// `window.focus()`, for one) are dropped.
pub(crate) fn with_controller(
    controller: &Weak<RefCell<WidgetController>>,
    action: impl FnOnce(&mut WidgetController),
) {
    let Some(controller) = controller.upgrade() else {
        return;
    };
    let Ok(mut guard) = controller.try_borrow_mut() else {
        tracing::trace!("controller busy, skipping nested event");
        return;
    };
    action(&mut guard);
}

/// The element the widget was attached to.
pub enum SourceElement {
    TextArea(HtmlTextAreaElement),
    Input(HtmlInputElement),
}

impl SourceElement {
    pub fn from_element(element: Element) -> Result<Self, WidgetError> {
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(textarea) => return Ok(SourceElement::TextArea(textarea)),
            Err(element) => element,
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Ok(SourceElement::Input(input)),
            Err(element) => Err(WidgetError::UnsupportedElement(
                element.tag_name().to_ascii_lowercase(),
            )),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            SourceElement::TextArea(textarea) => textarea,
            SourceElement::Input(input) => input,
        }
    }

    pub fn value(&self) -> String {
        match self {
            SourceElement::TextArea(textarea) => textarea.value(),
            SourceElement::Input(input) => input.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            SourceElement::TextArea(textarea) => textarea.set_value(value),
            SourceElement::Input(input) => input.set_value(value),
        }
    }
}

/// DOM around the editing surface.
pub struct BrowserView {
    id: InstanceId,
    wrapper: HtmlElement,
    frame: HtmlIFrameElement,
    source: SourceElement,
    toolbar: ToolbarDom,
    controller: OnceCell<Weak<RefCell<WidgetController>>>,
}

impl BrowserView {
    fn bind(&self, controller: Weak<RefCell<WidgetController>>) {
        if self.controller.set(controller).is_err() {
            tracing::warn!(id = self.id, "view already bound");
        }
    }

    pub fn wrapper(&self) -> &HtmlElement {
        &self.wrapper
    }

    pub fn frame(&self) -> &HtmlIFrameElement {
        &self.frame
    }

    pub fn source(&self) -> &SourceElement {
        &self.source
    }

    pub fn toolbar(&self) -> &ToolbarDom {
        &self.toolbar
    }

    /// Put the original element back where the wrapper is and remove the
    /// wrapper.
    fn restore(self) {
        let source = self.source.element();
        if let Err(e) = self.wrapper.before_with_node_1(source) {
            tracing::warn!(id = self.id, "restoring source element failed: {:?}", e);
        }
        if let Err(e) = source.class_list().remove_1(SOURCE_CLASS) {
            tracing::debug!("removing source class failed: {:?}", e);
        }
        set_visible(source, true);
        self.wrapper.remove();
    }
}

impl WidgetView for BrowserView {
    type Panel = PanelSlot;

    fn source_value(&self) -> String {
        self.source.value()
    }

    fn set_source_value(&self, value: &str) {
        self.source.set_value(value);
    }

    fn focus_source(&self) {
        if let Err(e) = self.source.element().focus() {
            tracing::debug!("focusing source element failed: {:?}", e);
        }
    }

    fn show_mode(&self, mode: EditorMode) {
        let rte = mode == EditorMode::Rte;
        set_visible(self.source.element(), !rte);
        set_visible(&self.frame, rte);
        self.toolbar.show_mode(mode);
    }

    fn apply_update(&self, update: &ToolbarUpdate) {
        self.toolbar.apply(update);
    }

    fn open_panel(&self, command: Command, content: &PanelContent) -> PanelSlot {
        let Some(controller) = self.controller.get().cloned() else {
            tracing::warn!(id = self.id, "panel requested before the view was bound");
            return None;
        };
        let controls = self.toolbar.controls(command).cloned().collect();
        match panels::open(self.id, command, content, controls, controller) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(id = self.id, %command, "opening panel failed: {}", e);
                None
            }
        }
    }
}

/// A live widget. Dropping it leaves the DOM in place but stops handling
/// events; call [`Widget::detach`] to tear it down.
pub struct Widget {
    id: InstanceId,
    controller: Rc<RefCell<WidgetController>>,
    listeners: Vec<EventListener>,
}

/// Turn `origin` (a textarea or text input) into a rich-text widget.
pub fn attach(origin: Element, config: WidgetConfig) -> Result<Widget, WidgetError> {
    let source = SourceElement::from_element(origin)?;
    let document = gloo_utils::document();
    install_page_listeners(&document);

    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    let translator = Translator::for_locale(&config.translations, detect_locale().as_deref());

    let origin = source.element();
    let width = origin.offset_width();
    let height = origin.offset_height();

    let wrapper: HtmlElement = create(&document, "div")?;
    wrapper.set_class_name("cazary");
    if width > 0 {
        wrapper.style().set_property("width", &format!("{width}px"))?;
    }
    let toolbar = ToolbarDom::build(&document, &config.layout(), &translator)?;
    wrapper.append_child(toolbar.element())?;

    let frame: HtmlIFrameElement = create(&document, "iframe")?;
    frame.set_class_name("cazary-edit");
    set_visible(&frame, false);
    if height > 0 {
        frame.style().set_property("height", &format!("{height}px"))?;
    }
    wrapper.append_child(&frame)?;

    origin.before_with_node_1(&wrapper)?;
    wrapper.append_child(origin)?;
    origin.class_list().add_1(SOURCE_CLASS)?;
    set_visible(origin, false);

    let placeholder = origin.get_attribute("placeholder");
    let style = config.editor_style(placeholder.as_deref());
    let editor = EditorCore::new(&frame, &source.value(), &style)?;
    let editor_window = editor.window().clone();
    let editor_document = editor.document().clone();

    let view = BrowserView {
        id,
        wrapper,
        frame,
        source,
        toolbar,
        controller: OnceCell::new(),
    };
    let controller = Rc::new(RefCell::new(Controller::new(
        id,
        editor,
        view,
        shared_panels(),
        config,
        translator,
    )));
    controller.borrow().view().bind(Rc::downgrade(&controller));
    controller.borrow_mut().start();

    let mut listeners = editor_listeners(&controller, &editor_window, &editor_document);
    listeners.push(toolbar_listener(&controller));
    tracing::debug!(id, "widget attached");

    Ok(Widget {
        id,
        controller,
        listeners,
    })
}

/// Page-wide handlers that close the open panel. Installed once.
fn install_page_listeners(document: &Document) {
    if PAGE_LISTENERS.with(|installed| installed.replace(true)) {
        return;
    }
    EventListener::new(document, "click", |_| close_all_panels()).forget();
    EventListener::new(document, "keydown", |event| {
        if is_escape(event) {
            close_all_panels();
        }
    })
    .forget();
}

fn immediate(
    controller: &Weak<RefCell<WidgetController>>,
    action: fn(&mut WidgetController),
) -> impl FnMut(&Event) + 'static {
    let controller = controller.clone();
    move |_| with_controller(&controller, action)
}

fn deferred(
    controller: &Weak<RefCell<WidgetController>>,
    delay: u32,
    action: fn(&mut WidgetController),
) -> impl FnMut(&Event) + 'static {
    let controller = controller.clone();
    move |_| {
        let controller = controller.clone();
        Timeout::new(delay, move || with_controller(&controller, action)).forget();
    }
}

fn editor_listeners(
    controller: &Rc<RefCell<WidgetController>>,
    window: &Window,
    document: &HtmlDocument,
) -> Vec<EventListener> {
    let weak = Rc::downgrade(controller);
    vec![
        EventListener::new(document, "select", immediate(&weak, WidgetController::refresh_status)),
        EventListener::new(document, "mouseup", immediate(&weak, WidgetController::editor_activated)),
        EventListener::new(document, "keydown", |event| {
            if is_escape(event) {
                close_all_panels();
            }
        }),
        EventListener::new(document, "keyup", deferred(&weak, DEBOUNCE_MS, WidgetController::content_changed)),
        EventListener::new(document, "paste", deferred(&weak, DEBOUNCE_MS, WidgetController::content_changed)),
        EventListener::new(window, "focus", immediate(&weak, WidgetController::editor_activated)),
        // Blur can fire while the controller is mid-update (a panel field
        // taking focus), so the copy runs on the next tick.
        EventListener::new(window, "blur", deferred(&weak, 0, |c| c.sync_source())),
    ]
}

fn toolbar_listener(controller: &Rc<RefCell<WidgetController>>) -> EventListener {
    let weak = Rc::downgrade(controller);
    let toolbar = controller.borrow().view().toolbar().element().clone();
    let root = toolbar.clone();
    EventListener::new(&toolbar, "click", move |event| {
        let Some(command) = command_at(&root, event.target()) else {
            return;
        };
        let mut outcome = None;
        with_controller(&weak, |c| outcome = Some(c.click(command)));
        // Panel clicks must not reach the page handler, which would close the
        // panel again straight away.
        if !matches!(outcome, Some(ClickOutcome::Executed | ClickOutcome::ModeToggled)) {
            event.stop_propagation();
        }
    })
}

impl Widget {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn controller(&self) -> &Rc<RefCell<WidgetController>> {
        &self.controller
    }

    fn controller_mut(&self) -> Result<RefMut<'_, WidgetController>, WidgetError> {
        self.controller.try_borrow_mut().map_err(|_| WidgetError::Busy)
    }

    pub fn value(&self) -> Result<String, WidgetError> {
        Ok(self.controller_mut()?.value())
    }

    pub fn set_value(&self, html: &str) -> Result<(), WidgetError> {
        self.controller_mut()?.set_value(html);
        Ok(())
    }

    pub fn mode(&self) -> Result<EditorMode, WidgetError> {
        Ok(self.controller_mut()?.mode())
    }

    pub fn toggle_mode(&self) -> Result<EditorMode, WidgetError> {
        let mut controller = self.controller_mut()?;
        controller.toggle_mode();
        Ok(controller.mode())
    }

    /// Run `command` as if its control had been used. Returns false when the
    /// command is currently disabled.
    pub fn exec_command(&self, command: Command, parameter: Option<&str>) -> Result<bool, WidgetError> {
        let mut controller = self.controller_mut()?;
        match command.action() {
            CommandAction::ToggleSource => controller.toggle_mode(),
            _ if controller.is_disabled(command) => return Ok(false),
            _ => controller.execute(command, parameter),
        }
        Ok(true)
    }

    pub fn insert_text(&self, text: &str, remove_formatting: bool) -> Result<(), WidgetError> {
        self.controller_mut()?.insert_text(text, remove_formatting);
        Ok(())
    }

    pub fn selected_text(&self) -> Result<String, WidgetError> {
        Ok(self.controller_mut()?.editor().selected_text())
    }

    pub fn focus(&self) -> Result<(), WidgetError> {
        self.controller_mut()?.focus();
        Ok(())
    }

    /// Remove the widget and give the original element back its place, value
    /// and visibility.
    ///
    /// Fails while another handle to the controller is alive; the widget is
    /// handed back unchanged and keeps handling events.
    pub fn detach(self) -> Result<(), Widget> {
        let Widget {
            id,
            controller,
            listeners,
        } = self;
        let controller = match Rc::try_unwrap(controller) {
            Ok(controller) => controller.into_inner(),
            Err(controller) => {
                tracing::warn!(id, "controller still shared, widget not detached");
                return Err(Widget {
                    id,
                    controller,
                    listeners,
                });
            }
        };
        drop(listeners);

        controller.sync_source();
        let (_editor, view) = controller.into_parts();
        view.restore();
        tracing::debug!(id, "widget detached");
        Ok(())
    }
}
