//! Canvas rendering of `flow_core` figures
//!
//! Draws the title, bands, traces (broken at gaps), axes with tick labels
//! and a legend. Scrolling the wheel over the plot area publishes a zoom
//! message; the viewport itself lives in the figure so it survives patches.

use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{button, column, container, text, Canvas};
use iced::{mouse, Color, Element, Length, Padding, Point, Rectangle, Renderer, Size, Theme};

use flow_core::config::format_to_step;
use flow_core::plot::{Figure, Trace, Viewport};

use crate::{Message, PlotId};

const MARGIN_LEFT: f32 = 64.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 30.0;
const MARGIN_BOTTOM: f32 = 40.0;

/// Wheel zoom per scrolled line
const ZOOM_STEP: f64 = 1.2;
/// Approximate pixels per scrolled line on touchpads
const PIXELS_PER_LINE: f32 = 40.0;
const TARGET_TICKS: usize = 6;

/// Canvas program for one figure
pub struct FigureCanvas<'a> {
    figure: &'a Figure,
    plot: PlotId,
}

impl<'a> FigureCanvas<'a> {
    pub fn new(figure: &'a Figure, plot: PlotId) -> Self {
        Self { figure, plot }
    }
}

/// A filling canvas with a "Reset view" button below it.
pub fn view_plot(figure: &Figure, plot: PlotId) -> Element<'_, Message> {
    let canvas = Canvas::new(FigureCanvas::new(figure, plot))
        .width(Length::Fill)
        .height(Length::Fill);

    column![
        container(canvas).height(Length::Fill),
        button(text("Reset view").size(11))
            .on_press(Message::ResetView(plot))
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .spacing(4)
    .width(Length::Fill)
    .height(Length::FillPortion(1))
    .into()
}

/// Region inside the margins where data is drawn
fn plot_area(size: Size) -> Rectangle {
    Rectangle {
        x: MARGIN_LEFT,
        y: MARGIN_TOP,
        width: (size.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        height: (size.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
    }
}

/// Map a data point into plot-area pixels (origin at the area's top-left).
fn to_pixels(window: &Viewport, area: Size, x: f64, y: f64) -> Point {
    let (nx, ny) = window.normalize(x, y);
    Point::new(
        (nx * area.width as f64) as f32,
        ((1.0 - ny) * area.height as f64) as f32,
    )
}

fn rgb_color(rgb: [f32; 3], alpha: f32) -> Color {
    Color::from_rgba(rgb[0], rgb[1], rgb[2], alpha)
}

impl FigureCanvas<'_> {
    fn draw_bands(&self, frame: &mut Frame, window: &Viewport, area: Size) {
        for band in &self.figure.bands {
            let top = to_pixels(window, area, window.x_min, band.y1.max(band.y0)).y;
            let bottom = to_pixels(window, area, window.x_min, band.y1.min(band.y0)).y;
            let top = top.clamp(0.0, area.height);
            let bottom = bottom.clamp(0.0, area.height);
            if bottom <= top {
                continue;
            }
            frame.fill_rectangle(
                Point::new(0.0, top),
                Size::new(area.width, bottom - top),
                rgb_color(band.color.to_f32(), band.opacity),
            );
        }
    }

    fn draw_trace(&self, frame: &mut Frame, trace: &Trace, window: &Viewport, area: Size) {
        let color = rgb_color(trace.color.to_f32(), 1.0);
        for segment in trace.segments() {
            if let [(x, y)] = segment[..] {
                let marker = Path::circle(to_pixels(window, area, x, y), trace.width + 1.0);
                frame.fill(&marker, color);
                continue;
            }
            let path = Path::new(|builder| {
                let mut points = segment.iter().map(|&(x, y)| to_pixels(window, area, x, y));
                if let Some(first) = points.next() {
                    builder.move_to(first);
                }
                for point in points {
                    builder.line_to(point);
                }
            });
            frame.stroke(&path, Stroke::default().with_color(color).with_width(trace.width));
        }
    }

    fn draw_axes(&self, frame: &mut Frame, window: &Viewport, area: Rectangle, color: Color) {
        let grid_color = Color { a: 0.15, ..color };

        let outline = Path::rectangle(Point::new(area.x, area.y), area.size());
        frame.stroke(&outline, Stroke::default().with_color(color).with_width(1.0));

        let x_step = tick_step(window.width(), TARGET_TICKS);
        for x in ticks(window.x_min, window.x_max, x_step) {
            let px = area.x + to_pixels(window, area.size(), x, window.y_min).x;
            let grid = Path::line(Point::new(px, area.y), Point::new(px, area.y + area.height));
            frame.stroke(&grid, Stroke::default().with_color(grid_color).with_width(1.0));
            frame.fill_text(Text {
                content: format_to_step(x, x_step),
                position: Point::new(px, area.y + area.height + 4.0),
                color,
                size: iced::Pixels(10.0),
                align_x: iced::alignment::Horizontal::Center.into(),
                ..Text::default()
            });
        }

        let y_step = tick_step(window.height(), TARGET_TICKS);
        for y in ticks(window.y_min, window.y_max, y_step) {
            let py = area.y + to_pixels(window, area.size(), window.x_min, y).y;
            let grid = Path::line(Point::new(area.x, py), Point::new(area.x + area.width, py));
            frame.stroke(&grid, Stroke::default().with_color(grid_color).with_width(1.0));
            frame.fill_text(Text {
                content: format_to_step(y, y_step),
                position: Point::new(area.x - 6.0, py - 6.0),
                color,
                size: iced::Pixels(10.0),
                align_x: iced::alignment::Horizontal::Right.into(),
                ..Text::default()
            });
        }

        frame.fill_text(Text {
            content: self.figure.x_label.clone(),
            position: Point::new(area.x + area.width / 2.0, area.y + area.height + 20.0),
            color,
            size: iced::Pixels(11.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: self.figure.y_label.clone(),
            position: Point::new(4.0, 14.0),
            color,
            size: iced::Pixels(11.0),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: self.figure.title.clone(),
            position: Point::new(area.x + area.width / 2.0, 4.0),
            color,
            size: iced::Pixels(13.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });
    }

    fn draw_legend(&self, frame: &mut Frame, area: Rectangle, color: Color) {
        let entry_height = 14.0;
        let right = area.x + area.width - 8.0;
        let mut y = area.y + 8.0;

        for trace in self.figure.traces.iter().filter(|t| !t.is_empty()) {
            let swatch = Path::line(Point::new(right - 18.0, y + 6.0), Point::new(right, y + 6.0));
            frame.stroke(
                &swatch,
                Stroke::default()
                    .with_color(rgb_color(trace.color.to_f32(), 1.0))
                    .with_width(trace.width),
            );
            frame.fill_text(Text {
                content: trace.name.clone(),
                position: Point::new(right - 22.0, y),
                color,
                size: iced::Pixels(10.0),
                align_x: iced::alignment::Horizontal::Right.into(),
                ..Text::default()
            });
            y += entry_height;
        }
    }
}

impl canvas::Program<Message> for FigureCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) = event else {
            return None;
        };
        let position = cursor.position_in(bounds)?;
        let area = plot_area(bounds.size());
        if !area.contains(position) {
            return None;
        }

        let lines = match delta {
            mouse::ScrollDelta::Lines { y, .. } => *y,
            mouse::ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_LINE,
        };
        if lines == 0.0 {
            return None;
        }

        // Scrolling up zooms in about the cursor
        let factor = ZOOM_STEP.powf(-f64::from(lines));
        let fx = f64::from((position.x - area.x) / area.width);
        let fy = 1.0 - f64::from((position.y - area.y) / area.height);

        Some(
            canvas::Action::publish(Message::Zoom {
                plot: self.plot,
                factor,
                fx,
                fy,
            })
            .and_capture(),
        )
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let text_color = theme.palette().text;
        let area = plot_area(bounds.size());
        let window = self.figure.view_window();

        frame.with_clip(area, |frame| {
            self.draw_bands(frame, &window, area.size());
            for trace in &self.figure.traces {
                self.draw_trace(frame, trace, &window, area.size());
            }
        });

        self.draw_axes(&mut frame, &window, area, text_color);
        self.draw_legend(&mut frame, area, text_color);

        vec![frame.into_geometry()]
    }
}

/// A 1-2-5 step giving roughly `target` ticks over `span`.
fn tick_step(span: f64, target: usize) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of `step` inside [min, max].
fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).take(64).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_step_is_one_two_five() {
        assert_eq!(tick_step(1000.0, 5), 200.0);
        assert_eq!(tick_step(10.0, 5), 2.0);
        assert_eq!(tick_step(0.5, 5), 0.1);
        assert_eq!(tick_step(0.0, 5), 1.0);
        assert_eq!(tick_step(f64::NAN, 5), 1.0);
    }

    #[test]
    fn test_ticks_stay_inside_window() {
        let t = ticks(-4.0, 19.0, 5.0);
        assert_eq!(t, vec![0.0, 5.0, 10.0, 15.0]);
        assert!(ticks(0.0, f64::INFINITY, 1.0).is_empty());
    }

    #[test]
    fn test_pixels_flip_y() {
        let window = Viewport { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0 };
        let area = Size::new(100.0, 50.0);
        assert_eq!(to_pixels(&window, area, 0.0, 0.0), Point::new(0.0, 50.0));
        assert_eq!(to_pixels(&window, area, 10.0, 10.0), Point::new(100.0, 0.0));
    }
}
