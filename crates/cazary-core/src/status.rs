//! Command status snapshot.
//!
//! The snapshot is folded from the facts of every node between the selection
//! anchor and the document root, innermost first. Active marks accumulate;
//! value slots (font name, size, colors) keep the first non-empty value seen,
//! so the closest ancestor wins.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::command::Command;

/// Tri-state shown by a toolbar control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandState {
    #[default]
    Normal,
    Active,
    Disabled,
}

impl CommandState {
    pub fn name(self) -> &'static str {
        match self {
            CommandState::Normal => "normal",
            CommandState::Active => "active",
            CommandState::Disabled => "disabled",
        }
    }
}

/// Inline style properties of one node. Empty values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleFacts {
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub text_decoration: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub vertical_align: Option<String>,
    pub text_align: Option<String>,
}

/// What the status fold needs to know about one ancestor node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFacts {
    /// Lowercase tag name; `None` for text and document nodes.
    pub tag: Option<String>,
    /// `face`, `size` and `color` attributes of a `<font>` element.
    pub font_face: Option<String>,
    pub font_size: Option<String>,
    pub font_color: Option<String>,
    /// Legacy `align` attribute.
    pub align: Option<String>,
    pub style: StyleFacts,
}

impl NodeFacts {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            ..Self::default()
        }
    }
}

/// Format state of the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    states: BTreeMap<Command, CommandState>,
    font_name: Option<String>,
    font_size: Option<String>,
    fore_color: Option<String>,
    back_color: Option<String>,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSnapshot {
    /// Commands whose toolbar control shows a tri-state.
    pub const TRACKED: [Command; 16] = [
        Command::Bold,
        Command::Italic,
        Command::Underline,
        Command::StrikeThrough,
        Command::Superscript,
        Command::Subscript,
        Command::JustifyLeft,
        Command::JustifyCenter,
        Command::JustifyRight,
        Command::JustifyFull,
        Command::InsertOrderedList,
        Command::InsertUnorderedList,
        Command::CreateLink,
        Command::Unlink,
        Command::Undo,
        Command::Redo,
    ];

    /// Commands whose toolbar control shows a value instead of a state.
    pub const VALUED: [Command; 4] = [
        Command::FontName,
        Command::FontSize,
        Command::ForeColor,
        Command::BackColor,
    ];

    /// Commands that depend on engine support and may be disabled.
    pub const CAPABILITY_CHECKED: [Command; 4] =
        [Command::CreateLink, Command::Unlink, Command::Undo, Command::Redo];

    /// Every tracked command normal, every value unset.
    pub fn new() -> Self {
        Self {
            states: Self::TRACKED
                .into_iter()
                .map(|c| (c, CommandState::Normal))
                .collect(),
            font_name: None,
            font_size: None,
            fore_color: None,
            back_color: None,
        }
    }

    /// Fold a snapshot from the selection state and the anchor's ancestors.
    ///
    /// `ancestors` runs from the anchor node outward to the root.
    pub fn compute<'a, F, I>(selected_text: &str, can_exec: F, ancestors: I) -> Self
    where
        F: Fn(Command) -> bool,
        I: IntoIterator<Item = &'a NodeFacts>,
    {
        let mut status = Self::new();
        if selected_text.is_empty() {
            status.set_state(Command::CreateLink, CommandState::Disabled);
            status.set_state(Command::Unlink, CommandState::Disabled);
        }
        for command in Self::CAPABILITY_CHECKED {
            if !can_exec(command) {
                status.set_state(command, CommandState::Disabled);
            }
        }
        ancestors.into_iter().fold(status, |mut status, node| {
            status.absorb(node);
            status
        })
    }

    pub fn state(&self, command: Command) -> CommandState {
        self.states.get(&command).copied().unwrap_or_default()
    }

    pub fn set_state(&mut self, command: Command, state: CommandState) {
        self.states.insert(command, state);
    }

    /// Tri-state of every tracked command.
    pub fn states(&self) -> impl Iterator<Item = (Command, CommandState)> + '_ {
        self.states.iter().map(|(c, s)| (*c, *s))
    }

    /// Current value of a valued command.
    pub fn value(&self, command: Command) -> Option<&str> {
        match command {
            Command::FontName => self.font_name.as_deref(),
            Command::FontSize => self.font_size.as_deref(),
            Command::ForeColor => self.fore_color.as_deref(),
            Command::BackColor => self.back_color.as_deref(),
            _ => None,
        }
    }

    fn activate(&mut self, command: Command) {
        self.set_state(command, CommandState::Active);
    }

    fn fill(&mut self, command: Command, value: Option<&str>) {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return;
        };
        let slot = match command {
            Command::FontName => &mut self.font_name,
            Command::FontSize => &mut self.font_size,
            Command::ForeColor => &mut self.fore_color,
            Command::BackColor => &mut self.back_color,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    fn activate_alignment(&mut self, align: &str) {
        match align.to_ascii_lowercase().as_str() {
            "left" => self.activate(Command::JustifyLeft),
            "center" => self.activate(Command::JustifyCenter),
            "right" => self.activate(Command::JustifyRight),
            "justify" => self.activate(Command::JustifyFull),
            _ => {}
        }
    }

    /// Merge one ancestor's facts into the snapshot.
    pub fn absorb(&mut self, node: &NodeFacts) {
        match node.tag.as_deref() {
            Some("b" | "strong") => self.activate(Command::Bold),
            Some("i" | "em") => self.activate(Command::Italic),
            Some("u") => self.activate(Command::Underline),
            Some("s" | "strike" | "del") => self.activate(Command::StrikeThrough),
            Some("sup") => self.activate(Command::Superscript),
            Some("sub") => self.activate(Command::Subscript),
            Some("ol") => self.activate(Command::InsertOrderedList),
            Some("ul") => self.activate(Command::InsertUnorderedList),
            Some("font") => {
                self.fill(Command::FontName, node.font_face.as_deref());
                self.fill(Command::FontSize, node.font_size.as_deref());
                self.fill(Command::ForeColor, node.font_color.as_deref());
            }
            _ => {}
        }

        if let Some(align) = &node.align {
            self.activate_alignment(align);
        }

        let style = &node.style;
        self.fill(Command::FontName, style.font_family.as_deref());
        if let Some(weight) = &style.font_weight {
            if matches!(weight.to_ascii_lowercase().as_str(), "bold" | "bolder") {
                self.activate(Command::Bold);
            }
        }
        if let Some(font_style) = &style.font_style {
            if matches!(font_style.to_ascii_lowercase().as_str(), "italic" | "oblique") {
                self.activate(Command::Italic);
            }
        }
        if let Some(decoration) = &style.text_decoration {
            let decoration = decoration.to_ascii_lowercase();
            if decoration.contains("underline") {
                self.activate(Command::Underline);
            }
            if decoration.contains("line-through") {
                self.activate(Command::StrikeThrough);
            }
        }
        self.fill(Command::ForeColor, style.color.as_deref());
        self.fill(Command::BackColor, style.background_color.as_deref());
        if let Some(vertical) = &style.vertical_align {
            match vertical.to_ascii_lowercase().as_str() {
                "super" => self.activate(Command::Superscript),
                "sub" => self.activate(Command::Subscript),
                _ => {}
            }
        }
        if let Some(align) = &style.text_align {
            self.activate_alignment(align);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_enabled(_: Command) -> bool {
        true
    }

    fn font(face: &str, size: &str, color: &str) -> NodeFacts {
        NodeFacts {
            font_face: Some(face.to_string()).filter(|s| !s.is_empty()),
            font_size: Some(size.to_string()).filter(|s| !s.is_empty()),
            font_color: Some(color.to_string()).filter(|s| !s.is_empty()),
            ..NodeFacts::element("font")
        }
    }

    #[test]
    fn test_default_all_normal() {
        let status = StatusSnapshot::compute("x", all_enabled, &[]);
        for command in StatusSnapshot::TRACKED {
            assert_eq!(status.state(command), CommandState::Normal);
        }
        for command in StatusSnapshot::VALUED {
            assert_eq!(status.value(command), None);
        }
    }

    #[test]
    fn test_links_disabled_without_selection() {
        let status = StatusSnapshot::compute("", all_enabled, &[]);
        assert_eq!(status.state(Command::CreateLink), CommandState::Disabled);
        assert_eq!(status.state(Command::Unlink), CommandState::Disabled);
        assert_eq!(status.state(Command::Undo), CommandState::Normal);
    }

    #[test]
    fn test_engine_capability_disables() {
        let status = StatusSnapshot::compute("x", |c| c != Command::Redo, &[]);
        assert_eq!(status.state(Command::Redo), CommandState::Disabled);
        assert_eq!(status.state(Command::Undo), CommandState::Normal);
        assert_eq!(status.state(Command::CreateLink), CommandState::Normal);
    }

    #[test]
    fn test_tags_activate_commands() {
        let chain = [
            NodeFacts::default(), // text node
            NodeFacts::element("STRONG"),
            NodeFacts::element("em"),
            NodeFacts::element("strike"),
            NodeFacts::element("sup"),
            NodeFacts::element("li"),
            NodeFacts::element("ul"),
            NodeFacts::element("body"),
        ];
        let status = StatusSnapshot::compute("x", all_enabled, &chain);
        assert_eq!(status.state(Command::Bold), CommandState::Active);
        assert_eq!(status.state(Command::Italic), CommandState::Active);
        assert_eq!(status.state(Command::StrikeThrough), CommandState::Active);
        assert_eq!(status.state(Command::Superscript), CommandState::Active);
        assert_eq!(status.state(Command::InsertUnorderedList), CommandState::Active);
        assert_eq!(status.state(Command::InsertOrderedList), CommandState::Normal);
        assert_eq!(status.state(Command::Underline), CommandState::Normal);
    }

    #[test]
    fn test_closest_font_wins() {
        let chain = [
            font("Georgia", "", ""),
            font("Verdana", "5", "#ff0000"),
            font("", "2", "#00ff00"),
        ];
        let status = StatusSnapshot::compute("x", all_enabled, &chain);
        assert_eq!(status.value(Command::FontName), Some("Georgia"));
        assert_eq!(status.value(Command::FontSize), Some("5"));
        assert_eq!(status.value(Command::ForeColor), Some("#ff0000"));
        assert_eq!(status.value(Command::BackColor), None);
    }

    #[test]
    fn test_style_facts() {
        let span = NodeFacts {
            style: StyleFacts {
                font_weight: Some("bolder".into()),
                font_style: Some("Oblique".into()),
                text_decoration: Some("underline line-through".into()),
                background_color: Some("rgb(255, 255, 0)".into()),
                vertical_align: Some("sub".into()),
                ..StyleFacts::default()
            },
            ..NodeFacts::element("span")
        };
        let block = NodeFacts {
            style: StyleFacts {
                text_align: Some("center".into()),
                font_family: Some("serif".into()),
                color: Some("blue".into()),
                ..StyleFacts::default()
            },
            ..NodeFacts::element("div")
        };
        let status = StatusSnapshot::compute("x", all_enabled, &[span, block]);
        assert_eq!(status.state(Command::Bold), CommandState::Active);
        assert_eq!(status.state(Command::Italic), CommandState::Active);
        assert_eq!(status.state(Command::Underline), CommandState::Active);
        assert_eq!(status.state(Command::StrikeThrough), CommandState::Active);
        assert_eq!(status.state(Command::Subscript), CommandState::Active);
        assert_eq!(status.state(Command::JustifyCenter), CommandState::Active);
        assert_eq!(status.value(Command::BackColor), Some("rgb(255, 255, 0)"));
        assert_eq!(status.value(Command::FontName), Some("serif"));
        assert_eq!(status.value(Command::ForeColor), Some("blue"));
    }

    #[test]
    fn test_font_tag_beats_outer_style() {
        let chain = [
            font("", "", "#123456"),
            NodeFacts {
                style: StyleFacts {
                    color: Some("red".into()),
                    ..StyleFacts::default()
                },
                ..NodeFacts::element("span")
            },
        ];
        let status = StatusSnapshot::compute("x", all_enabled, &chain);
        assert_eq!(status.value(Command::ForeColor), Some("#123456"));
    }

    #[test]
    fn test_align_attribute() {
        let chain = [NodeFacts {
            align: Some("JUSTIFY".into()),
            ..NodeFacts::element("p")
        }];
        let status = StatusSnapshot::compute("x", all_enabled, &chain);
        assert_eq!(status.state(Command::JustifyFull), CommandState::Active);
        assert_eq!(status.state(Command::JustifyLeft), CommandState::Normal);
    }
}
