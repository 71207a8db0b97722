//! Panels: the floating selectors and forms that supply a command parameter.
//!
//! `build_panel` describes a panel's content; the platform layer renders it.
//! `PanelCoordinator` owns the one panel that may be open at a time across
//! every widget instance on the page.

use smol_str::SmolStr;

use crate::command::Command;
use crate::config::WidgetConfig;
use crate::i18n::Translator;
use crate::toolbar::font_size_label;
use crate::validate::{is_email, is_url};

/// Panel flavours, one per parameterized command group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    FontName,
    FontSize,
    Color,
    InsertImage,
    CreateLink,
}

impl PanelKind {
    /// List panels run their command as soon as an item is clicked.
    pub fn is_list(self) -> bool {
        matches!(self, PanelKind::FontName | PanelKind::FontSize | PanelKind::Color)
    }
}

/// How a list item previews its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLook {
    /// Rendered in the named font family.
    FontFamily(String),
    /// Rendered at a legacy font size (1-7).
    FontSize(u8),
    /// Rendered as a swatch of the color.
    Background(String),
}

/// One selectable entry of a list panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    pub label: String,
    pub param: SmolStr,
    pub look: ItemLook,
}

/// URL form flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Image,
    Link,
}

impl FormKind {
    pub fn field_class(self) -> &'static str {
        match self {
            FormKind::Image => "cazary-widget-insertimage-url",
            FormKind::Link => "cazary-widget-createlink-url",
        }
    }

    pub fn preview_class(self) -> &'static str {
        match self {
            FormKind::Image => "cazary-widget-preview-insertimage",
            FormKind::Link => "cazary-widget-preview-createlink",
        }
    }

    /// Parameter to submit for `input`, or `None` when the input is rejected.
    ///
    /// Links accept email addresses, which become `mailto:` URLs.
    pub fn resolve(self, input: &str) -> Option<String> {
        match self {
            FormKind::Link if is_email(input) => Some(format!("mailto:{input}")),
            _ if is_url(input) => Some(input.to_string()),
            _ => None,
        }
    }

    /// URL to show in the preview, if the input is previewable.
    pub fn preview(self, input: &str) -> Option<&str> {
        is_url(input).then_some(input)
    }
}

/// A URL entry form with a live preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPanel {
    pub kind: FormKind,
    pub legend: String,
    pub placeholder: String,
    pub submit_label: String,
    pub preview_legend: String,
}

/// Renderable content of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    /// Rows of selectable items; each row renders as one list.
    Select {
        list_class: &'static str,
        rows: Vec<Vec<PanelItem>>,
    },
    Form(FormPanel),
}

impl PanelContent {
    pub fn items(&self) -> impl Iterator<Item = &PanelItem> {
        let rows: &[Vec<PanelItem>] = match self {
            PanelContent::Select { rows, .. } => rows,
            PanelContent::Form(_) => &[],
        };
        rows.iter().flatten()
    }
}

/// Describe the panel for `command`, or `None` if it has no panel.
pub fn build_panel(
    command: Command,
    config: &WidgetConfig,
    translator: &Translator,
) -> Option<PanelContent> {
    let content = match command.panel()? {
        PanelKind::FontName => PanelContent::Select {
            list_class: "cazary-widget-select",
            rows: vec![
                config
                    .fontnames
                    .iter()
                    .map(|name| PanelItem {
                        label: name.clone(),
                        param: SmolStr::new(name),
                        look: ItemLook::FontFamily(name.clone()),
                    })
                    .collect(),
            ],
        },
        PanelKind::FontSize => PanelContent::Select {
            list_class: "cazary-widget-select",
            rows: vec![
                (1u8..=7)
                    .map(|size| PanelItem {
                        label: font_size_label(size)
                            .map(|label| translator.translate(label).to_string())
                            .unwrap_or_default(),
                        param: SmolStr::new(size.to_string()),
                        look: ItemLook::FontSize(size),
                    })
                    .collect(),
            ],
        },
        PanelKind::Color => PanelContent::Select {
            list_class: "cazary-widget-select-color",
            rows: config
                .colors
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|color| PanelItem {
                            label: color.clone(),
                            param: SmolStr::new(color),
                            look: ItemLook::Background(color.clone()),
                        })
                        .collect()
                })
                .collect(),
        },
        PanelKind::InsertImage => PanelContent::Form(FormPanel {
            kind: FormKind::Image,
            legend: translator.translate("Input image URL").to_string(),
            placeholder: translator
                .translate("http://example.com/path/to/image.jpg")
                .to_string(),
            submit_label: translator.translate("Insert").to_string(),
            preview_legend: translator.translate("Preview").to_string(),
        }),
        PanelKind::CreateLink => PanelContent::Form(FormPanel {
            kind: FormKind::Link,
            legend: translator
                .translate("Input link URL or E-mail address")
                .to_string(),
            placeholder: translator
                .translate("http://example.com/, someone@example.com")
                .to_string(),
            submit_label: translator.translate("Insert").to_string(),
            preview_legend: translator.translate("Preview").to_string(),
        }),
    };
    Some(content)
}

/// The panel currently open, with the platform handle that keeps it alive.
#[derive(Debug)]
pub struct OpenPanel<H> {
    pub owner: u32,
    pub command: Command,
    pub handle: H,
}

/// Outcome of asking to open a panel.
#[derive(Debug)]
pub enum PanelRequest<H> {
    /// The same panel was already open; it has been released and nothing
    /// should be opened.
    Toggled(OpenPanel<H>),
    /// The caller may install a new panel. Holds whatever panel was released
    /// to make room.
    Vacant(Option<OpenPanel<H>>),
}

/// Holder of the single open panel.
///
/// Dropping a released `OpenPanel` is what closes it, so callers should let
/// released values fall out of scope after their borrow of the coordinator
/// has ended.
#[derive(Debug)]
pub struct PanelCoordinator<H> {
    open: Option<OpenPanel<H>>,
}

impl<H> Default for PanelCoordinator<H> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<H> PanelCoordinator<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for `owner`'s panel for `command`.
    pub fn request(&mut self, owner: u32, command: Command) -> PanelRequest<H> {
        match self.open.take() {
            Some(open) if open.owner == owner && open.command == command => {
                PanelRequest::Toggled(open)
            }
            other => PanelRequest::Vacant(other),
        }
    }

    /// Install a newly built panel. Returns any panel it displaced.
    pub fn install(&mut self, owner: u32, command: Command, handle: H) -> Option<OpenPanel<H>> {
        self.open.replace(OpenPanel {
            owner,
            command,
            handle,
        })
    }

    /// Take the open panel, if any.
    pub fn release(&mut self) -> Option<OpenPanel<H>> {
        self.open.take()
    }

    /// Owner and command of the open panel.
    pub fn current(&self) -> Option<(u32, Command)> {
        self.open.as_ref().map(|p| (p.owner, p.command))
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}
