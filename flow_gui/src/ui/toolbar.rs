//! Toolbar component
//!
//! Application title, one button per dashboard and the theme toggle.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::{Message, Tab};

/// Render the application header with dashboard tabs
pub fn view_header(active: Tab, dark_mode: bool) -> Element<'static, Message> {
    let theme_label = if dark_mode { "Light Mode" } else { "Dark Mode" };

    row![
        text("Phreatic").size(24),
        Space::new().width(16),
        tab_button("Radial Flow", Tab::Radial, active),
        tab_button("Recharge", Tab::Recharge, active),
        Space::new().width(Length::Fill),
        button(text(theme_label).size(11))
            .on_press(Message::ToggleDarkMode)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .spacing(4)
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}

fn tab_button(label: &'static str, tab: Tab, active: Tab) -> Element<'static, Message> {
    button(text(label).size(12))
        .on_press(Message::SelectTab(tab))
        .padding(Padding::from([4, 12]))
        .style(if tab == active { button::primary } else { button::secondary })
        .into()
}
