//! Toolbar rendering rules.
//!
//! Turns a status snapshot into per-control updates the view applies.

use crate::command::Command;
use crate::i18n::Translator;
use crate::status::{CommandState, StatusSnapshot};

/// Translation key for a legacy font size (1-7).
pub fn font_size_label(size: u8) -> Option<&'static str> {
    Some(match size {
        1 => "Size 1",
        2 => "Size 2",
        3 => "Size 3",
        4 => "Size 4",
        5 => "Size 5",
        6 => "Size 6",
        7 => "Size 7",
        _ => return None,
    })
}

/// Change to apply to every toolbar control of `command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarUpdate {
    /// Show `text` as the control's label, or its stored title when `None`.
    Label {
        command: Command,
        text: Option<String>,
        font_family: Option<String>,
    },
    /// Paint the control with `color`, or clear its background when `None`.
    Swatch {
        command: Command,
        color: Option<String>,
    },
    /// Set the active/disabled classes.
    State {
        command: Command,
        state: CommandState,
    },
}

/// Updates for every control the snapshot has an opinion on.
pub fn status_updates(status: &StatusSnapshot, translator: &Translator) -> Vec<ToolbarUpdate> {
    let font_name = status.value(Command::FontName).map(str::to_string);
    let font_size = status.value(Command::FontSize).map(|size| {
        let key = size.trim().parse::<u8>().ok().and_then(font_size_label);
        match key {
            Some(key) => translator.translate(key).to_string(),
            None => size.to_string(),
        }
    });

    let mut updates = vec![
        ToolbarUpdate::Label {
            command: Command::FontName,
            text: font_name.clone(),
            font_family: font_name,
        },
        ToolbarUpdate::Label {
            command: Command::FontSize,
            text: font_size,
            font_family: None,
        },
        ToolbarUpdate::Swatch {
            command: Command::ForeColor,
            color: status.value(Command::ForeColor).map(str::to_string),
        },
        ToolbarUpdate::Swatch {
            command: Command::BackColor,
            color: status.value(Command::BackColor).map(str::to_string),
        },
    ];
    updates.extend(
        status
            .states()
            .map(|(command, state)| ToolbarUpdate::State { command, state }),
    );
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::TranslationData;
    use crate::status::NodeFacts;

    fn find(updates: &[ToolbarUpdate], command: Command) -> &ToolbarUpdate {
        updates
            .iter()
            .find(|u| match u {
                ToolbarUpdate::Label { command: c, .. }
                | ToolbarUpdate::Swatch { command: c, .. }
                | ToolbarUpdate::State { command: c, .. } => *c == command,
            })
            .unwrap()
    }

    #[test]
    fn test_unset_values_fall_back() {
        let updates = status_updates(&StatusSnapshot::new(), &Translator::identity());
        assert_eq!(
            find(&updates, Command::FontName),
            &ToolbarUpdate::Label {
                command: Command::FontName,
                text: None,
                font_family: None
            }
        );
        assert_eq!(
            find(&updates, Command::BackColor),
            &ToolbarUpdate::Swatch {
                command: Command::BackColor,
                color: None
            }
        );
        assert_eq!(updates.len(), 4 + StatusSnapshot::TRACKED.len());
    }

    #[test]
    fn test_values_rendered() {
        let mut data = TranslationData::new();
        data.add_data_file("ja.data", "Size 5\t大\n");
        let translator = Translator::for_locale(&data, Some("ja"));

        let chain = [NodeFacts {
            font_face: Some("Georgia".into()),
            font_size: Some("5".into()),
            font_color: Some("#ff0000".into()),
            ..NodeFacts::element("font")
        }];
        let status = StatusSnapshot::compute("", |_| true, &chain);
        let updates = status_updates(&status, &translator);

        assert_eq!(
            find(&updates, Command::FontName),
            &ToolbarUpdate::Label {
                command: Command::FontName,
                text: Some("Georgia".into()),
                font_family: Some("Georgia".into())
            }
        );
        assert_eq!(
            find(&updates, Command::FontSize),
            &ToolbarUpdate::Label {
                command: Command::FontSize,
                text: Some("大".into()),
                font_family: None
            }
        );
        assert_eq!(
            find(&updates, Command::ForeColor),
            &ToolbarUpdate::Swatch {
                command: Command::ForeColor,
                color: Some("#ff0000".into())
            }
        );
        assert_eq!(
            find(&updates, Command::CreateLink),
            &ToolbarUpdate::State {
                command: Command::CreateLink,
                state: CommandState::Disabled
            }
        );
    }

    #[test]
    fn test_font_size_labels() {
        assert_eq!(font_size_label(1), Some("Size 1"));
        assert_eq!(font_size_label(0), None);
        assert_eq!(font_size_label(8), None);
    }
}
