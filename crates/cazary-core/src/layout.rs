//! Toolbar layout: rows of command tokens and the named presets.

use crate::command::Command;

/// One slot in a toolbar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Command(Command),
    /// Visual separator, written as `|` in a layout row.
    Separator,
}

impl ToolbarItem {
    /// Parse a single layout token. Unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        if token == "|" || token.eq_ignore_ascii_case("separator") {
            return Some(ToolbarItem::Separator);
        }
        Command::from_name(token).map(ToolbarItem::Command)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolbarItem::Command(command) => command.name(),
            ToolbarItem::Separator => "separator",
        }
    }

    /// English label; separators have none.
    pub fn label(self) -> &'static str {
        match self {
            ToolbarItem::Command(command) => command.label(),
            ToolbarItem::Separator => "",
        }
    }

    pub fn class_name(self) -> String {
        format!("cazary-command-{}", self.name())
    }

    pub fn command(self) -> Option<Command> {
        match self {
            ToolbarItem::Command(command) => Some(command),
            ToolbarItem::Separator => None,
        }
    }
}

/// Named toolbar presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Minimal,
    Standard,
    Full,
}

const MINIMAL_ROWS: &[&str] = &["bold italic underline strikethrough removeformat"];

const STANDARD_ROWS: &[&str] = &[
    "fontname fontsize",
    "bold italic underline strikethrough removeformat | forecolor backcolor | superscript subscript",
    "source",
];

const FULL_ROWS: &[&str] = &[
    "fontname fontsize",
    "bold italic underline strikethrough removeformat | forecolor backcolor | superscript subscript",
    "justifyleft justifycenter justifyright justifyfull | indent outdent | insertorderedlist insertunorderedlist",
    "inserthorizontalrule insertimage createlink unlink",
    "undo redo",
    "source",
];

impl Preset {
    /// Preset names are matched exactly, as in `"STANDARD"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MINIMAL" => Some(Preset::Minimal),
            "STANDARD" => Some(Preset::Standard),
            "FULL" => Some(Preset::Full),
            _ => None,
        }
    }

    pub fn rows(self) -> &'static [&'static str] {
        match self {
            Preset::Minimal => MINIMAL_ROWS,
            Preset::Standard => STANDARD_ROWS,
            Preset::Full => FULL_ROWS,
        }
    }
}

/// Parsed toolbar: rows of items in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolbarLayout {
    rows: Vec<Vec<ToolbarItem>>,
}

impl ToolbarLayout {
    /// Parse rows of space-separated tokens.
    ///
    /// Tokens are matched case-insensitively; unknown tokens are dropped.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .split(' ')
                    .filter(|token| !token.is_empty())
                    .filter_map(|token| {
                        let item = ToolbarItem::parse(token);
                        if item.is_none() {
                            tracing::debug!(token, "skipping unknown toolbar token");
                        }
                        item
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn preset(preset: Preset) -> Self {
        Self::from_rows(preset.rows())
    }

    pub fn rows(&self) -> &[Vec<ToolbarItem>] {
        &self.rows
    }

    /// Every command in the layout, in display order, duplicates included.
    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.rows
            .iter()
            .flatten()
            .filter_map(|item| item.command())
    }

    pub fn contains(&self, command: Command) -> bool {
        self.commands().any(|c| c == command)
    }
}
