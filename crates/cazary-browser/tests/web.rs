//! WASM browser tests for cazary-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use cazary_browser::{
    Command, CommandState, CommandsOption, EditorMode, RichTextEditor, SOURCE_CLASS, Widget,
    WidgetConfig, WidgetError, attach, close_all_panels, detect_locale,
};
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

fn textarea(value: &str) -> HtmlTextAreaElement {
    let document = gloo_utils::document();
    let textarea: HtmlTextAreaElement = document
        .create_element("textarea")
        .unwrap()
        .dyn_into()
        .unwrap();
    textarea.set_value(value);
    gloo_utils::body().append_child(&textarea).unwrap();
    textarea
}

fn widget(value: &str, config: WidgetConfig) -> (Widget, HtmlTextAreaElement) {
    let origin = textarea(value);
    let widget = attach(origin.clone().into(), config).unwrap();
    (widget, origin)
}

fn control(widget: &Widget, command: Command) -> HtmlElement {
    widget
        .controller()
        .borrow()
        .view()
        .toolbar()
        .controls(command)
        .next()
        .cloned()
        .unwrap()
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

fn open_panels() -> u32 {
    gloo_utils::document()
        .query_selector_all(".cazary-panel")
        .unwrap()
        .length()
}

/// Select `start..end` of the first text node inside `selector` in the
/// editing document.
fn select_text(widget: &Widget, selector: &str, start: u32, end: u32) {
    let controller = widget.controller().borrow();
    let editor = controller.editor();
    let text = editor
        .document()
        .query_selector(selector)
        .unwrap()
        .unwrap()
        .first_child()
        .unwrap();
    let range = editor.document().create_range().unwrap();
    range.set_start(&text, start).unwrap();
    range.set_end(&text, end).unwrap();
    let selection = editor.window().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
    selection.add_range(&range).unwrap();
}

fn body_text(widget: &Widget) -> String {
    let controller = widget.controller().borrow();
    controller
        .editor()
        .document()
        .body()
        .unwrap()
        .text_content()
        .unwrap_or_default()
}

fn full_toolbar() -> WidgetConfig {
    WidgetConfig {
        commands: CommandsOption::Named("FULL".to_string()),
        ..WidgetConfig::default()
    }
}

// === Assembly ===

#[wasm_bindgen_test]
fn test_attach_normalizes_value() {
    let (widget, _) = widget("<p>hi</p>", WidgetConfig::default());
    assert_eq!(widget.value().unwrap(), "<div>hi</div>");
    assert_eq!(widget.mode().unwrap(), EditorMode::Rte);
}

#[wasm_bindgen_test]
fn test_attach_wraps_origin() {
    let (widget, origin) = widget("", WidgetConfig::default());
    let wrapper = widget.controller().borrow().view().wrapper().clone();
    assert!(has_class(&wrapper, "cazary"));
    assert!(has_class(&origin, SOURCE_CLASS));
    assert_eq!(origin.parent_element().unwrap(), Element::from(wrapper.clone()));
    assert_eq!(origin.style().get_property_value("display").unwrap(), "none");
    assert!(wrapper.query_selector("iframe.cazary-edit").unwrap().is_some());
}

#[wasm_bindgen_test]
fn test_attach_rejects_other_elements() {
    let div = gloo_utils::document().create_element("div").unwrap();
    match attach(div, WidgetConfig::default()) {
        Err(WidgetError::UnsupportedElement(tag)) => assert_eq!(tag, "div"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("div should be rejected"),
    }
}

#[wasm_bindgen_test]
fn test_attach_accepts_text_input() {
    let document = gloo_utils::document();
    let input: HtmlInputElement = document.create_element("input").unwrap().dyn_into().unwrap();
    input.set_value("<em>x</em>");
    gloo_utils::body().append_child(&input).unwrap();
    let widget = attach(input.into(), WidgetConfig::default()).unwrap();
    assert_eq!(widget.value().unwrap(), "<i>x</i>");
}

#[wasm_bindgen_test]
fn test_toolbar_layout() {
    let (widget, _) = widget("", WidgetConfig::default());
    let wrapper = widget.controller().borrow().view().wrapper().clone();
    let rows = wrapper.query_selector_all("ul.cazary-commands-list").unwrap();
    assert_eq!(rows.length(), 3);
    let bold = control(&widget, Command::Bold);
    assert_eq!(bold.title(), "Bold");
    assert_eq!(bold.text_content().unwrap(), "Bold");
    assert!(wrapper.query_selector("li.cazary-command-separator").unwrap().is_some());
}

#[wasm_bindgen_test]
fn test_placeholder_marks_empty_body() {
    let origin = textarea("");
    origin.set_placeholder("Type here");
    let widget = attach(origin.into(), WidgetConfig::default()).unwrap();
    let controller = widget.controller().borrow();
    let body = controller.editor().document().body().unwrap();
    assert!(has_class(&body, "empty"));
    assert!(controller.editor().is_empty());
}

#[wasm_bindgen_test]
fn test_attach_with_empty_layout() {
    let config = WidgetConfig {
        commands: CommandsOption::Rows(Vec::new()),
        ..WidgetConfig::default()
    };
    let (widget, _) = widget("<div>x</div>", config);
    let wrapper = widget.controller().borrow().view().wrapper().clone();
    assert_eq!(wrapper.query_selector_all("li").unwrap().length(), 0);
    assert_eq!(widget.value().unwrap(), "<div>x</div>");
}

// === Editing surface ===

#[wasm_bindgen_test]
fn test_status_walks_ancestors() {
    let (widget, _) = widget(
        r##"<div><b><font face="Georgia" color="#f00">xy</font></b></div>"##,
        WidgetConfig::default(),
    );
    select_text(&widget, "font", 1, 1);

    let status = widget.controller().borrow().editor().current_status();
    assert_eq!(status.state(Command::Bold), CommandState::Active);
    assert_eq!(status.state(Command::Italic), CommandState::Normal);
    assert_eq!(status.value(Command::FontName), Some("Georgia"));
    assert_eq!(status.value(Command::ForeColor), Some("#f00"));
    assert_eq!(status.value(Command::FontSize), None);
    assert_eq!(status.state(Command::CreateLink), CommandState::Disabled);
}

#[wasm_bindgen_test]
fn test_status_reads_inline_style() {
    let (widget, _) = widget(
        r#"<div><span style="font-style: italic; text-decoration: underline">xy</span></div>"#,
        WidgetConfig::default(),
    );
    select_text(&widget, "span", 1, 1);

    let status = widget.controller().borrow().editor().current_status();
    assert_eq!(status.state(Command::Italic), CommandState::Active);
    assert_eq!(status.state(Command::Underline), CommandState::Active);
    assert_eq!(status.state(Command::Bold), CommandState::Normal);
}

#[wasm_bindgen_test]
fn test_align_only_from_elements_that_define_it() {
    let (widget, _) = widget(
        r#"<div align="center"><span align="right">xy</span></div>"#,
        WidgetConfig::default(),
    );
    select_text(&widget, "span", 1, 1);

    let status = widget.controller().borrow().editor().current_status();
    assert_eq!(status.state(Command::JustifyCenter), CommandState::Active);
    assert_eq!(status.state(Command::JustifyRight), CommandState::Normal);
}

#[wasm_bindgen_test]
fn test_selection_enables_link() {
    let (widget, _) = widget("<div>hello world</div>", WidgetConfig::default());
    select_text(&widget, "div", 0, 5);

    assert_eq!(widget.selected_text().unwrap(), "hello");
    let status = widget.controller().borrow().editor().current_status();
    assert_ne!(status.state(Command::CreateLink), CommandState::Disabled);
}

#[wasm_bindgen_test]
fn test_insert_text_replaces_selection() {
    let (widget, _) = widget("<div>abc</div>", WidgetConfig::default());
    select_text(&widget, "div", 1, 2);
    widget.insert_text("y", false).unwrap();
    assert_eq!(widget.value().unwrap(), "<div>ayc</div>");
}

#[wasm_bindgen_test]
fn test_insert_text_with_remove_format() {
    let (widget, _) = widget("<div><b>abc</b></div>", WidgetConfig::default());
    select_text(&widget, "b", 1, 2);
    widget.insert_text("y", true).unwrap();
    assert_eq!(body_text(&widget), "ayc");
}

#[wasm_bindgen_test]
fn test_back_color_applies_background() {
    let (widget, _) = widget("<div>abc</div>", WidgetConfig::default());
    select_text(&widget, "div", 0, 3);
    assert!(widget.exec_command(Command::BackColor, Some("#ffff00")).unwrap());
    assert!(widget.value().unwrap().contains("background-color"));
    assert_eq!(body_text(&widget), "abc");
}

// === Modes ===

#[wasm_bindgen_test]
fn test_toggle_round_trip() {
    let (widget, origin) = widget("<div>a <b>b</b></div>", WidgetConfig::default());
    let before = widget.value().unwrap();

    assert_eq!(widget.toggle_mode().unwrap(), EditorMode::Html);
    assert_eq!(origin.value(), before);
    assert!(has_class(&control(&widget, Command::Bold), "cazary-disabled"));
    assert!(has_class(&control(&widget, Command::Source), "cazary-active"));

    assert_eq!(widget.toggle_mode().unwrap(), EditorMode::Rte);
    assert_eq!(widget.value().unwrap(), before);
    assert!(!has_class(&control(&widget, Command::Bold), "cazary-disabled"));
    assert!(!has_class(&control(&widget, Command::Source), "cazary-active"));
}

#[wasm_bindgen_test]
fn test_source_control_toggles_mode() {
    let (widget, _) = widget("", WidgetConfig::default());
    control(&widget, Command::Source).click();
    assert_eq!(widget.mode().unwrap(), EditorMode::Html);
    control(&widget, Command::Source).click();
    assert_eq!(widget.mode().unwrap(), EditorMode::Rte);
}

#[wasm_bindgen_test]
fn test_html_mode_refuses_commands() {
    let config = WidgetConfig {
        mode: EditorMode::Html,
        ..WidgetConfig::default()
    };
    let (widget, _) = widget("", config);
    assert!(!widget.exec_command(Command::Bold, None).unwrap());

    close_all_panels();
    control(&widget, Command::FontName).click();
    assert_eq!(open_panels(), 0);
}

#[wasm_bindgen_test]
fn test_set_value_updates_both_views() {
    let (widget, origin) = widget("", WidgetConfig::default());
    widget.set_value("<strong>bold</strong>").unwrap();
    assert_eq!(widget.value().unwrap(), "<b>bold</b>");
    assert_eq!(origin.value(), "<strong>bold</strong>");
}

// === Panels ===

#[wasm_bindgen_test]
fn test_panels_are_exclusive() {
    close_all_panels();
    let (a, _) = widget("", WidgetConfig::default());
    let (b, _) = widget("", WidgetConfig::default());

    let font = control(&a, Command::FontName);
    font.click();
    assert_eq!(open_panels(), 1);
    assert!(has_class(&font, "cazary-active"));

    control(&b, Command::ForeColor).click();
    assert_eq!(open_panels(), 1);
    assert!(!has_class(&font, "cazary-active"));
    let panel = gloo_utils::document()
        .query_selector(".cazary-panel")
        .unwrap()
        .unwrap();
    assert!(has_class(&panel, "cazary-panel-forecolor"));
    assert_eq!(panel.get_attribute("data-id").unwrap(), b.id().to_string());

    control(&b, Command::ForeColor).click();
    assert_eq!(open_panels(), 0);
}

#[wasm_bindgen_test]
fn test_page_click_closes_panel() {
    close_all_panels();
    let (widget, _) = widget("", WidgetConfig::default());
    control(&widget, Command::FontSize).click();
    assert_eq!(open_panels(), 1);

    gloo_utils::body().click();
    assert_eq!(open_panels(), 0);
}

#[wasm_bindgen_test]
fn test_list_item_runs_command() {
    close_all_panels();
    let (widget, _) = widget("", WidgetConfig::default());
    control(&widget, Command::FontSize).click();

    let items = gloo_utils::document()
        .query_selector_all(".cazary-panel-fontsize li")
        .unwrap();
    assert_eq!(items.length(), 7);
    let item: HtmlElement = items.item(2).unwrap().dyn_into().unwrap();
    assert_eq!(item.get_attribute("data-param").unwrap(), "3");
    item.click();
    assert_eq!(open_panels(), 0);
}

#[wasm_bindgen_test]
fn test_form_rejects_invalid_url() {
    close_all_panels();
    let (widget, _) = widget("", full_toolbar());
    control(&widget, Command::InsertImage).click();
    assert_eq!(open_panels(), 1);

    let document = gloo_utils::document();
    let field: HtmlInputElement = document
        .query_selector(".cazary-widget-insertimage-url")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let submit: HtmlElement = document
        .query_selector(".cazary-panel .cazary-widget-submit")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();

    field.set_value("not a url");
    submit.click();
    assert_eq!(open_panels(), 1);

    field.set_value("http://example.com/a.png");
    submit.click();
    assert_eq!(open_panels(), 0);
}

#[wasm_bindgen_test]
fn test_form_rejects_empty_field() {
    close_all_panels();
    let (widget, _) = widget("", full_toolbar());
    control(&widget, Command::InsertImage).click();
    assert_eq!(open_panels(), 1);

    let document = gloo_utils::document();
    let form: web_sys::HtmlFormElement = document
        .query_selector(".cazary-panel form")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert!(form.no_validate());

    let submit: HtmlElement = document
        .query_selector(".cazary-panel .cazary-widget-submit")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    submit.click();
    assert_eq!(open_panels(), 1);

    let field: HtmlInputElement = document
        .query_selector(".cazary-widget-insertimage-url")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(field.value(), "");
    field.set_value("https://example.com/b.png");
    submit.click();
    assert_eq!(open_panels(), 0);
}

// === Teardown ===

#[wasm_bindgen_test]
fn test_detach_restores_origin() {
    let (widget, origin) = widget("<p>x</p>", WidgetConfig::default());
    assert!(widget.detach().is_ok());

    assert!(!has_class(&origin, SOURCE_CLASS));
    assert_eq!(origin.value(), "<div>x</div>");
    assert_eq!(origin.style().get_property_value("display").unwrap(), "");
    let parent = origin.parent_element().unwrap();
    assert!(!has_class(&parent, "cazary"));
}

#[wasm_bindgen_test]
fn test_detach_hands_back_shared_widget() {
    let (widget, origin) = widget("", WidgetConfig::default());
    let shared = widget.controller().clone();

    let Err(widget) = widget.detach() else {
        panic!("detach should fail while the controller is shared");
    };
    assert!(has_class(&origin, SOURCE_CLASS));
    control(&widget, Command::Source).click();
    assert_eq!(widget.mode().unwrap(), EditorMode::Html);

    drop(shared);
    assert!(widget.detach().is_ok());
    assert!(!has_class(&origin, SOURCE_CLASS));
}

#[wasm_bindgen_test]
fn test_detect_locale() {
    let locale = detect_locale();
    assert!(locale.is_some_and(|tag| !tag.is_empty()));
}
