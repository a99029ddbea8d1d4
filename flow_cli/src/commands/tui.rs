//! Terminal dashboard
//!
//! Both dashboards in one screen, driven from the keyboard:
//!
//! | Key | Action |
//! |-----|--------|
//! | Tab | switch between radial and recharge |
//! | ↑ / ↓ | choose a parameter |
//! | ← / → | adjust it by one slider step |
//! | 1-4 | solve for Q, K, h1 or h2 |
//! | a | toggle flow arrows |
//! | q / Esc | quit |
//!
//! The parameter being solved for has no slider and is skipped.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Chart, Dataset, GraphType, LegendPosition, List, ListItem, ListState, Paragraph,
};
use ratatui::{DefaultTerminal, Frame};

use flow_core::calculations::{RadialInput, RadialParam, RechargeInput, RechargeParam, SolveFor};
use flow_core::config::{format_to_step, DashboardConfig, SliderSpec};
use flow_core::plot::{render_radial, render_recharge, Figure, SliderVisibility, Trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Radial,
    Recharge,
}

/// Whether the event loop keeps going
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Dashboard state; figures are retained and patched on every change.
struct Dashboard {
    config: DashboardConfig,
    tab: Tab,

    solve_for: SolveFor,
    radial_input: RadialInput,
    visibility: SliderVisibility,
    radial_figure: Figure,
    radial_selected: usize,
    radial_diagnostics: Vec<String>,

    recharge_input: RechargeInput,
    show_arrows: bool,
    elevation_figure: Figure,
    flux_figure: Figure,
    divide_m: f64,
    max_head_m: f64,
    recharge_selected: usize,
    recharge_diagnostics: Vec<String>,
}

impl Dashboard {
    fn new(config: DashboardConfig) -> Self {
        let solve_for = config.radial.solve_for;
        let radial_input = config.radial.initial_input();
        let radial = render_radial(solve_for, &radial_input);

        let recharge_input = config.recharge.initial_input();
        let show_arrows = config.recharge.show_arrows;
        let recharge = render_recharge(&recharge_input, show_arrows);

        Dashboard {
            tab: Tab::Radial,
            solve_for,
            radial_input,
            visibility: radial.visibility,
            radial_figure: radial.figure,
            radial_selected: 0,
            radial_diagnostics: radial.diagnostics,
            recharge_input,
            show_arrows,
            elevation_figure: recharge.elevation,
            flux_figure: recharge.flux,
            divide_m: recharge.divide_m,
            max_head_m: recharge.max_head_m,
            recharge_selected: 0,
            recharge_diagnostics: recharge.diagnostics,
            config,
        }
    }

    /// Radial parameters that currently have a slider
    fn radial_params(&self) -> Vec<RadialParam> {
        RadialParam::ALL
            .into_iter()
            .filter(|param| self.visibility.is_visible(*param))
            .collect()
    }

    fn handle_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = match self.tab {
                    Tab::Radial => Tab::Recharge,
                    Tab::Recharge => Tab::Radial,
                };
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.solve_for = SolveFor::ALL[index];
                self.tab = Tab::Radial;
                self.refresh_radial();
            }
            KeyCode::Char('a') => {
                self.show_arrows = !self.show_arrows;
                self.refresh_recharge();
            }
            _ => {}
        }
        Flow::Continue
    }

    fn move_selection(&mut self, delta: isize) {
        let len = match self.tab {
            Tab::Radial => self.radial_params().len(),
            Tab::Recharge => RechargeParam::ALL.len(),
        };
        let selected = match self.tab {
            Tab::Radial => &mut self.radial_selected,
            Tab::Recharge => &mut self.recharge_selected,
        };
        if len == 0 {
            return;
        }
        *selected = (*selected as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn adjust(&mut self, steps: i32) {
        match self.tab {
            Tab::Radial => {
                let Some(&param) = self.radial_params().get(self.radial_selected) else {
                    return;
                };
                let spec = self.config.radial.spec(param);
                let value = spec.nudge(param.get(&self.radial_input), steps);
                param.set(&mut self.radial_input, value);
                self.refresh_radial();
            }
            Tab::Recharge => {
                let Some(&param) = RechargeParam::ALL.get(self.recharge_selected) else {
                    return;
                };
                let spec = self.config.recharge.spec(param);
                let value = spec.nudge(param.get(&self.recharge_input), steps);
                param.set(&mut self.recharge_input, value);
                self.refresh_recharge();
            }
        }
    }

    /// Re-render the radial dashboard and patch its retained figure.
    fn refresh_radial(&mut self) {
        let view = render_radial(self.solve_for, &self.radial_input);
        self.visibility = view.visibility;
        self.radial_diagnostics = view.diagnostics;
        patch_figure(&mut self.radial_figure, view.figure);
        let len = self.radial_params().len();
        self.radial_selected = self.radial_selected.min(len.saturating_sub(1));
    }

    fn refresh_recharge(&mut self) {
        let view = render_recharge(&self.recharge_input, self.show_arrows);
        self.divide_m = view.divide_m;
        self.max_head_m = view.max_head_m;
        self.recharge_diagnostics = view.diagnostics;
        patch_figure(&mut self.elevation_figure, view.elevation);
        patch_figure(&mut self.flux_figure, view.flux);
    }

    fn diagnostics(&self) -> &[String] {
        match self.tab {
            Tab::Radial => &self.radial_diagnostics,
            Tab::Recharge => &self.recharge_diagnostics,
        }
    }
}

fn patch_figure(shown: &mut Figure, fresh: Figure) {
    if let Err(e) = shown.update_from(&fresh) {
        tracing::debug!(code = e.error_code(), "trace layout changed, replacing figure");
        *shown = fresh;
    }
}

/// Run the dashboard until the user quits
pub fn execute(config: DashboardConfig) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, Dashboard::new(config));
    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, mut dashboard: Dashboard) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, &dashboard))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if dashboard.handle_key(key.code) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

fn draw(frame: &mut Frame, dashboard: &Dashboard) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(frame.area());
    let [controls, plots] =
        Layout::horizontal([Constraint::Length(46), Constraint::Min(0)]).areas(body);

    let tab_style = |tab: Tab| {
        if tab == dashboard.tab {
            Style::new().add_modifier(Modifier::REVERSED)
        } else {
            Style::new()
        }
    };
    let title = Line::from(vec![
        " Phreatic ".into(),
        Span::styled(" Radial Flow ", tab_style(Tab::Radial)),
        " ".into(),
        Span::styled(" Recharge ", tab_style(Tab::Recharge)),
    ]);
    frame.render_widget(Paragraph::new(title), header);

    match dashboard.tab {
        Tab::Radial => {
            draw_radial_controls(frame, dashboard, controls);
            render_figure(frame, &dashboard.radial_figure, plots);
        }
        Tab::Recharge => {
            draw_recharge_controls(frame, dashboard, controls);
            let [top, bottom] =
                Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(plots);
            render_figure(frame, &dashboard.elevation_figure, top);
            render_figure(frame, &dashboard.flux_figure, bottom);
        }
    }

    let diagnostics = dashboard.diagnostics();
    let status = if diagnostics.is_empty() {
        "Tab switch | ↑↓ select | ←→ adjust | 1-4 solve for | a arrows | q quit".to_string()
    } else {
        diagnostics.join(" | ")
    };
    frame.render_widget(
        Paragraph::new(status).style(Style::new().fg(Color::Yellow)),
        footer,
    );
}

fn slider_item(label: &str, spec: &SliderSpec, value: f64) -> ListItem<'static> {
    ListItem::new(format!("{:<36}{:>8}", label, spec.format(value)))
}

fn draw_radial_controls(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let [selector, params] =
        Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);

    let choices: Vec<ListItem> = SolveFor::ALL
        .iter()
        .enumerate()
        .map(|(i, solve_for)| {
            let mark = if *solve_for == dashboard.solve_for { "(*)" } else { "( )" };
            ListItem::new(format!("{} {} {}", i + 1, mark, solve_for.display_name()))
        })
        .collect();
    frame.render_widget(
        List::new(choices).block(Block::bordered().title("Solve for")),
        selector,
    );

    let items: Vec<ListItem> = dashboard
        .radial_params()
        .into_iter()
        .map(|param| {
            slider_item(
                param.label(),
                dashboard.config.radial.spec(param),
                param.get(&dashboard.radial_input),
            )
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(dashboard.radial_selected));
    frame.render_stateful_widget(
        List::new(items)
            .block(Block::bordered().title("Parameters"))
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED)),
        params,
        &mut state,
    );
}

fn draw_recharge_controls(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let [params, derived] =
        Layout::vertical([Constraint::Length(7), Constraint::Min(0)]).areas(area);

    let items: Vec<ListItem> = RechargeParam::ALL
        .iter()
        .map(|param| {
            slider_item(
                param.label(),
                dashboard.config.recharge.spec(*param),
                param.get(&dashboard.recharge_input),
            )
        })
        .collect();
    let mut state = ListState::default().with_selected(Some(dashboard.recharge_selected));
    frame.render_stateful_widget(
        List::new(items)
            .block(Block::bordered().title("Parameters"))
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED)),
        params,
        &mut state,
    );

    let lines = vec![
        Line::from(format!("Divide d        = {:.1} m", dashboard.divide_m)),
        Line::from(format!("Max head h_max  = {:.2} m", dashboard.max_head_m)),
        Line::from(format!(
            "Flow arrows     = {}",
            if dashboard.show_arrows { "shown" } else { "hidden" }
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title("Derived")),
        derived,
    );
}

/// Chart of every non-empty trace, split at gaps.
fn render_figure(frame: &mut Frame, figure: &Figure, area: Rect) {
    let window = figure.view_window();

    let series: Vec<(&Trace, Vec<Vec<(f64, f64)>>)> = figure
        .traces
        .iter()
        .filter(|trace| !trace.is_empty())
        .map(|trace| (trace, trace.segments()))
        .collect();

    let datasets: Vec<Dataset> = series
        .iter()
        .flat_map(|(trace, segments)| {
            let color = Color::Rgb(trace.color.r, trace.color.g, trace.color.b);
            segments.iter().enumerate().map(move |(i, points)| {
                let dataset = Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::new().fg(color))
                    .data(points);
                // Only the first segment carries the legend entry
                if i == 0 {
                    dataset.name(trace.name.clone())
                } else {
                    dataset
                }
            })
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(figure.title.clone()))
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(axis(&figure.x_label, window.x_min, window.x_max))
        .y_axis(axis(&figure.y_label, window.y_min, window.y_max));
    frame.render_widget(chart, area);
}

fn axis(title: &str, min: f64, max: f64) -> Axis<'static> {
    let mid = (min + max) / 2.0;
    let step = (max - min).abs() / 2.0;
    Axis::default()
        .title(title.to_string())
        .style(Style::new().fg(Color::Gray))
        .bounds([min, max])
        .labels([min, mid, max].map(|v| format_to_step(v, step / 10.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::plot::Viewport;

    fn dashboard() -> Dashboard {
        Dashboard::new(DashboardConfig::default())
    }

    #[test]
    fn test_tab_switch_and_quit() {
        let mut d = dashboard();
        assert_eq!(d.handle_key(KeyCode::Tab), Flow::Continue);
        assert_eq!(d.tab, Tab::Recharge);
        assert_eq!(d.handle_key(KeyCode::Tab), Flow::Continue);
        assert_eq!(d.tab, Tab::Radial);
        assert_eq!(d.handle_key(KeyCode::Char('q')), Flow::Quit);
        assert_eq!(d.handle_key(KeyCode::Esc), Flow::Quit);
    }

    #[test]
    fn test_solved_parameter_is_skipped() {
        let mut d = dashboard();
        d.handle_key(KeyCode::Char('2'));
        assert_eq!(d.solve_for, SolveFor::Conductivity);
        let params = d.radial_params();
        assert_eq!(params.len(), 5);
        assert!(!params.contains(&RadialParam::Conductivity));
        assert_eq!(d.radial_figure.trace_names(), vec!["K"]);
    }

    #[test]
    fn test_selection_wraps() {
        let mut d = dashboard();
        d.handle_key(KeyCode::Up);
        assert_eq!(d.radial_selected, 4);
        d.handle_key(KeyCode::Down);
        assert_eq!(d.radial_selected, 0);
    }

    #[test]
    fn test_adjust_steps_and_clamps() {
        let mut d = dashboard();
        d.handle_key(KeyCode::Tab);
        // Length is the last recharge parameter
        d.handle_key(KeyCode::Up);
        assert_eq!(RechargeParam::ALL[d.recharge_selected], RechargeParam::Length);
        d.handle_key(KeyCode::Right);
        assert_eq!(d.recharge_input.l_m, 1010.0);
        for _ in 0..200 {
            d.handle_key(KeyCode::Right);
        }
        assert_eq!(d.recharge_input.l_m, 2000.0);
        assert_eq!(d.elevation_figure.x_range, Some((0.0, 2000.0)));
    }

    #[test]
    fn test_arrow_toggle_keeps_trace_layout() {
        let mut d = dashboard();
        d.handle_key(KeyCode::Tab);
        assert!(d.show_arrows);
        d.handle_key(KeyCode::Char('a'));
        assert!(!d.show_arrows);
        assert_eq!(d.elevation_figure.traces.len(), 4);
        assert!(d.elevation_figure.traces[2].is_empty());
    }

    fn zoomed(figure: &mut Figure) -> Viewport {
        let window = figure.view_window().zoom(0.5, 0.5, 0.5);
        figure.viewport = Some(window);
        window
    }

    #[test]
    fn test_zoom_survives_parameter_change() {
        let mut d = dashboard();
        d.handle_key(KeyCode::Tab);
        let window = zoomed(&mut d.elevation_figure);
        d.handle_key(KeyCode::Right);
        assert_eq!(d.elevation_figure.viewport, Some(window));
    }
}
