//! Labelled slider rows

use iced::widget::{column, row, slider, text, Space};
use iced::{Element, Length};

use flow_core::config::SliderSpec;

use crate::Message;

/// A caption with the current value above a slider bound to `spec`.
pub fn labeled_slider<'a>(
    label: &'a str,
    spec: &SliderSpec,
    value: f64,
    on_change: impl Fn(f64) -> Message + 'a,
) -> Element<'a, Message> {
    column![
        row![
            text(label).size(11),
            Space::new().width(Length::Fill),
            text(spec.format(value)).size(11),
        ],
        slider(spec.min..=spec.max, spec.clamp(value), on_change).step(spec.step),
    ]
    .spacing(2)
    .into()
}
