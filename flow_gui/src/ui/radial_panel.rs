//! Radial flow dashboard
//!
//! Left: the solved-variable selector and one slider per input. The slider
//! of the solved variable is hidden. Right: the solved variable against
//! radius.

use iced::widget::{column, radio, row, rule, text, Column, Space};
use iced::{Element, Length, Padding};

use flow_core::calculations::{RadialParam, SolveFor};

use super::shared::controls::labeled_slider;
use super::shared::plot_canvas::view_plot;
use crate::{App, Message, PlotId};

/// Render the radial dashboard
pub fn view(app: &App) -> Element<'_, Message> {
    let selector = SolveFor::ALL.iter().fold(
        column![text("Solve for").size(14), Space::new().height(4)].spacing(6),
        |col, &solve_for| {
            col.push(
                radio(
                    solve_for.display_name(),
                    solve_for,
                    Some(app.solve_for),
                    Message::SolveForSelected,
                )
                .size(14)
                .text_size(12),
            )
        },
    );

    let sliders = RadialParam::ALL
        .iter()
        .filter(|param| app.visibility.is_visible(**param))
        .fold(Column::new().spacing(10), |col, &param| {
            col.push(labeled_slider(
                param.label(),
                app.config.radial.spec(param),
                param.get(&app.radial_input),
                move |value| Message::RadialChanged(param, value),
            ))
        });

    let controls = column![
        selector,
        Space::new().height(12),
        text("Parameters").size(14),
        Space::new().height(4),
        sliders,
    ]
    .width(Length::Fixed(320.0))
    .padding(Padding::from([4, 8]));

    row![
        controls,
        rule::vertical(1),
        view_plot(&app.radial_figure, PlotId::Radial),
    ]
    .spacing(8)
    .into()
}
