//! # Phreatic Desktop Dashboard
//!
//! Interactive plots of the radial-flow and recharge relations, built with
//! Iced. Every slider, radio or checkbox event re-renders through
//! `flow_core` and patches the figure on screen, so a zoomed view survives
//! parameter changes.

mod ui;

use std::path::PathBuf;

use clap::Parser;
use iced::widget::{column, container, rule};
use iced::{Element, Length, Padding, Theme};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use flow_core::calculations::{RadialInput, RadialParam, RechargeInput, RechargeParam, SolveFor};
use flow_core::config::{load_or_default, DashboardConfig};
use flow_core::plot::{render_radial, render_recharge, Figure, SliderVisibility};

/// Groundwater formula dashboard
#[derive(Parser)]
#[command(name = "flow_gui")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive groundwater formula dashboard", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Slider configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Radial,
    Recharge,
}

/// Plots that can be zoomed independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotId {
    Radial,
    Elevation,
    Flux,
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectTab(Tab),
    ToggleDarkMode,

    // Radial dashboard
    SolveForSelected(SolveFor),
    RadialChanged(RadialParam, f64),

    // Recharge dashboard
    RechargeChanged(RechargeParam, f64),
    ToggleArrows(bool),

    // Plot navigation
    Zoom {
        plot: PlotId,
        factor: f64,
        fx: f64,
        fy: f64,
    },
    ResetView(PlotId),
}

pub struct App {
    pub config: DashboardConfig,
    pub tab: Tab,
    pub dark_mode: bool,

    pub solve_for: SolveFor,
    pub radial_input: RadialInput,
    pub visibility: SliderVisibility,
    pub radial_figure: Figure,
    pub radial_diagnostics: Vec<String>,

    pub recharge_input: RechargeInput,
    pub show_arrows: bool,
    pub elevation_figure: Figure,
    pub flux_figure: Figure,
    pub divide_m: f64,
    pub max_head_m: f64,
    pub recharge_diagnostics: Vec<String>,
}

impl App {
    fn new(config: DashboardConfig) -> Self {
        let solve_for = config.radial.solve_for;
        let radial_input = config.radial.initial_input();
        let radial = render_radial(solve_for, &radial_input);

        let recharge_input = config.recharge.initial_input();
        let show_arrows = config.recharge.show_arrows;
        let recharge = render_recharge(&recharge_input, show_arrows);

        App {
            tab: Tab::Radial,
            dark_mode: config.dark_mode,
            solve_for,
            radial_input,
            visibility: radial.visibility,
            radial_figure: radial.figure,
            radial_diagnostics: radial.diagnostics,
            recharge_input,
            show_arrows,
            elevation_figure: recharge.elevation,
            flux_figure: recharge.flux,
            divide_m: recharge.divide_m,
            max_head_m: recharge.max_head_m,
            recharge_diagnostics: recharge.diagnostics,
            config,
        }
    }

    fn title(&self) -> String {
        match self.tab {
            Tab::Radial => format!("Phreatic - Radial Flow ({})", self.solve_for.symbol()),
            Tab::Recharge => "Phreatic - Recharge".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::SelectTab(tab) => self.tab = tab,
            Message::ToggleDarkMode => self.dark_mode = !self.dark_mode,

            Message::SolveForSelected(solve_for) => {
                self.solve_for = solve_for;
                self.refresh_radial();
            }
            Message::RadialChanged(param, value) => {
                param.set(&mut self.radial_input, value);
                self.refresh_radial();
            }

            Message::RechargeChanged(param, value) => {
                param.set(&mut self.recharge_input, value);
                self.refresh_recharge();
            }
            Message::ToggleArrows(show) => {
                self.show_arrows = show;
                self.refresh_recharge();
            }

            Message::Zoom { plot, factor, fx, fy } => {
                let figure = self.figure_mut(plot);
                let window = figure.view_window();
                figure.viewport = Some(window.zoom(factor, fx, fy));
            }
            Message::ResetView(plot) => self.figure_mut(plot).viewport = None,
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let body = match self.tab {
            Tab::Radial => ui::radial_panel::view(self),
            Tab::Recharge => ui::recharge_panel::view(self),
        };

        let (derived, diagnostics) = match self.tab {
            Tab::Radial => (None, &self.radial_diagnostics),
            Tab::Recharge => (
                Some(format!(
                    "d = {:.1} m    h_max = {:.2} m",
                    self.divide_m, self.max_head_m
                )),
                &self.recharge_diagnostics,
            ),
        };

        let content = column![
            ui::toolbar::view_header(self.tab, self.dark_mode),
            rule::horizontal(1),
            container(body).height(Length::Fill),
            rule::horizontal(1),
            ui::status_bar::view_status_bar(derived, diagnostics),
        ]
        .spacing(6);

        container(content)
            .padding(Padding::from([8, 12]))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn refresh_radial(&mut self) {
        let view = render_radial(self.solve_for, &self.radial_input);
        self.visibility = view.visibility;
        self.radial_diagnostics = view.diagnostics;
        patch_figure(&mut self.radial_figure, view.figure);
    }

    fn refresh_recharge(&mut self) {
        let view = render_recharge(&self.recharge_input, self.show_arrows);
        self.divide_m = view.divide_m;
        self.max_head_m = view.max_head_m;
        self.recharge_diagnostics = view.diagnostics;
        patch_figure(&mut self.elevation_figure, view.elevation);
        patch_figure(&mut self.flux_figure, view.flux);
    }

    fn figure_mut(&mut self, plot: PlotId) -> &mut Figure {
        match plot {
            PlotId::Radial => &mut self.radial_figure,
            PlotId::Elevation => &mut self.elevation_figure,
            PlotId::Flux => &mut self.flux_figure,
        }
    }
}

/// Bring the figure on screen up to date, keeping its viewport.
///
/// A new trace layout (another solved variable) replaces the figure.
fn patch_figure(shown: &mut Figure, fresh: Figure) {
    match shown.update_from(&fresh) {
        Ok(changed) => tracing::debug!(figure = %shown.title, changed, "patched figure"),
        Err(e) => {
            tracing::debug!(code = e.error_code(), "trace layout changed, replacing figure");
            *shown = fresh;
        }
    }
}

fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config = load_or_default(cli.config.as_deref());
    tracing::info!(solve_for = config.radial.solve_for.symbol(), "starting dashboard");

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window_size((1180.0, 780.0))
        .run()?;

    Ok(())
}
