//! Recharge dashboard
//!
//! Left: five sliders, the flow-arrow toggle and the derived divide and
//! maximum head. Right: the elevation plot above the flux plot.

use iced::widget::{checkbox, column, row, rule, text, Column, Space};
use iced::{Element, Length, Padding};

use flow_core::calculations::RechargeParam;

use super::shared::controls::labeled_slider;
use super::shared::plot_canvas::view_plot;
use crate::{App, Message, PlotId};

/// Render the recharge dashboard
pub fn view(app: &App) -> Element<'_, Message> {
    let sliders = RechargeParam::ALL
        .iter()
        .fold(Column::new().spacing(10), |col, &param| {
            col.push(labeled_slider(
                param.label(),
                app.config.recharge.spec(param),
                param.get(&app.recharge_input),
                move |value| Message::RechargeChanged(param, value),
            ))
        });

    let arrows_toggle = checkbox(app.show_arrows)
        .label("Show flow arrows")
        .on_toggle(Message::ToggleArrows)
        .text_size(11);

    let derived = column![
        text(format!("Groundwater divide d = {:.1} m", app.divide_m)).size(11),
        text(format!("Maximum head h_max = {:.2} m", app.max_head_m)).size(11),
    ]
    .spacing(4);

    let controls = column![
        text("Parameters").size(14),
        Space::new().height(4),
        sliders,
        Space::new().height(8),
        arrows_toggle,
        Space::new().height(12),
        derived,
    ]
    .width(Length::Fixed(320.0))
    .padding(Padding::from([4, 8]));

    let plots = column![
        view_plot(&app.elevation_figure, PlotId::Elevation),
        view_plot(&app.flux_figure, PlotId::Flux),
    ]
    .spacing(8)
    .width(Length::Fill);

    row![controls, rule::vertical(1), plots].spacing(8).into()
}
