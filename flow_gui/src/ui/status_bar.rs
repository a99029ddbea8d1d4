//! Status Bar (Bottom)
//!
//! Displays:
//! - Derived quantities of the active dashboard (divide, maximum head)
//! - Diagnostics explaining undefined samples

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Render the status bar
pub fn view_status_bar<'a>(derived: Option<String>, diagnostics: &'a [String]) -> Element<'a, Message> {
    let notes = if diagnostics.is_empty() {
        "Ready".to_string()
    } else {
        diagnostics.join("  |  ")
    };
    let note_color = if diagnostics.is_empty() {
        [0.4, 0.4, 0.4]
    } else {
        [0.6, 0.3, 0.0]
    };

    row![
        text(derived.unwrap_or_default()).size(11),
        Space::new().width(Length::Fill),
        text(notes).size(10).color(note_color),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
