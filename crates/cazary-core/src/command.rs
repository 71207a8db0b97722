//! Command vocabulary.
//!
//! Every toolbar button maps to one `Command`. The lowercase name doubles as
//! the native `execCommand` identifier and as the `cazary-command-<name>`
//! class suffix.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::panel::PanelKind;

/// Native command some engines need in place of `backcolor` to highlight text
/// instead of painting the page background.
pub const HILITE_COLOR: &str = "hilitecolor";

/// A formatting or editing command offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Command {
    FontName,
    FontSize,
    Bold,
    Italic,
    Underline,
    StrikeThrough,
    RemoveFormat,
    ForeColor,
    BackColor,
    Superscript,
    Subscript,
    JustifyLeft,
    JustifyCenter,
    JustifyRight,
    JustifyFull,
    Indent,
    Outdent,
    InsertOrderedList,
    InsertUnorderedList,
    InsertHorizontalRule,
    InsertImage,
    CreateLink,
    Unlink,
    Undo,
    Redo,
    /// Toggle between the rich-text view and the raw HTML source.
    Source,
}

/// What a toolbar click on a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Run the native editing command directly.
    Native,
    /// Open a panel that supplies the command's parameter.
    Panel(PanelKind),
    /// Switch between rich-text and source mode.
    ToggleSource,
}

impl Command {
    pub const ALL: [Command; 26] = [
        Command::FontName,
        Command::FontSize,
        Command::Bold,
        Command::Italic,
        Command::Underline,
        Command::StrikeThrough,
        Command::RemoveFormat,
        Command::ForeColor,
        Command::BackColor,
        Command::Superscript,
        Command::Subscript,
        Command::JustifyLeft,
        Command::JustifyCenter,
        Command::JustifyRight,
        Command::JustifyFull,
        Command::Indent,
        Command::Outdent,
        Command::InsertOrderedList,
        Command::InsertUnorderedList,
        Command::InsertHorizontalRule,
        Command::InsertImage,
        Command::CreateLink,
        Command::Unlink,
        Command::Undo,
        Command::Redo,
        Command::Source,
    ];

    /// Stable lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Command::FontName => "fontname",
            Command::FontSize => "fontsize",
            Command::Bold => "bold",
            Command::Italic => "italic",
            Command::Underline => "underline",
            Command::StrikeThrough => "strikethrough",
            Command::RemoveFormat => "removeformat",
            Command::ForeColor => "forecolor",
            Command::BackColor => "backcolor",
            Command::Superscript => "superscript",
            Command::Subscript => "subscript",
            Command::JustifyLeft => "justifyleft",
            Command::JustifyCenter => "justifycenter",
            Command::JustifyRight => "justifyright",
            Command::JustifyFull => "justifyfull",
            Command::Indent => "indent",
            Command::Outdent => "outdent",
            Command::InsertOrderedList => "insertorderedlist",
            Command::InsertUnorderedList => "insertunorderedlist",
            Command::InsertHorizontalRule => "inserthorizontalrule",
            Command::InsertImage => "insertimage",
            Command::CreateLink => "createlink",
            Command::Unlink => "unlink",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Source => "source",
        }
    }

    /// Look up a command by identifier, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Command::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// English toolbar label, used as the translation key.
    pub fn label(self) -> &'static str {
        match self {
            Command::FontName => "Font",
            Command::FontSize => "Size",
            Command::Bold => "Bold",
            Command::Italic => "Italic",
            Command::Underline => "Underline",
            Command::StrikeThrough => "Strike-Through",
            Command::RemoveFormat => "Remove Format",
            Command::ForeColor => "Foreground Color",
            Command::BackColor => "Background Color",
            Command::Superscript => "Superscript",
            Command::Subscript => "Subscript",
            Command::JustifyLeft => "Justify Left",
            Command::JustifyCenter => "Justify Center",
            Command::JustifyRight => "Justify Right",
            Command::JustifyFull => "Justify Full",
            Command::Indent => "Indent",
            Command::Outdent => "Outdent",
            Command::InsertOrderedList => "Ordered List",
            Command::InsertUnorderedList => "Unordered List",
            Command::InsertHorizontalRule => "Horizontal Rule",
            Command::InsertImage => "Insert Image",
            Command::CreateLink => "Insert Link",
            Command::Unlink => "Unlink",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Source => "Show Source",
        }
    }

    pub fn action(self) -> CommandAction {
        match self {
            Command::FontName => CommandAction::Panel(PanelKind::FontName),
            Command::FontSize => CommandAction::Panel(PanelKind::FontSize),
            Command::ForeColor | Command::BackColor => CommandAction::Panel(PanelKind::Color),
            Command::InsertImage => CommandAction::Panel(PanelKind::InsertImage),
            Command::CreateLink => CommandAction::Panel(PanelKind::CreateLink),
            Command::Source => CommandAction::ToggleSource,
            _ => CommandAction::Native,
        }
    }

    pub fn panel(self) -> Option<PanelKind> {
        match self.action() {
            CommandAction::Panel(kind) => Some(kind),
            _ => None,
        }
    }

    /// Name passed to the engine's `execCommand`, if this command has one.
    pub fn native_name(self) -> Option<&'static str> {
        match self {
            Command::Source => None,
            other => Some(other.name()),
        }
    }

    /// CSS class carried by the command's toolbar control.
    pub fn class_name(self) -> String {
        format!("cazary-command-{}", self.name())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Unrecognized command identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_name(s).ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
