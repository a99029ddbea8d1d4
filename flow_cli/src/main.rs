//! # Phreatic CLI
//!
//! Evaluates the groundwater relations from the command line and hosts a
//! terminal dashboard.
//!
//! ```text
//! flow_cli radial --solve-for h1 --discharge 300
//! flow_cli recharge --length 1500 --json
//! flow_cli --config phreatic.json tui
//! ```

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use flow_core::config::load_or_default;

/// Groundwater formula calculator
#[derive(Parser)]
#[command(name = "flow_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Groundwater flow formulas: radial flow to a well and recharge strips", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Slider configuration file (JSON); defaults come from here
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the radial-flow relation over radius
    Radial(commands::radial::RadialArgs),
    /// Water table and flux of a strip with uniform recharge
    Recharge(commands::recharge::RechargeArgs),
    /// Interactive terminal dashboard
    Tui,
}

fn init_logging(log_level: &str, quiet: bool) -> anyhow::Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    // The dashboard owns the terminal; log lines would tear its frames
    if quiet {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::sink).finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, matches!(cli.command, Commands::Tui))?;

    let config = load_or_default(cli.config.as_deref());

    match cli.command {
        Commands::Radial(args) => commands::radial::execute(args, &config),
        Commands::Recharge(args) => commands::recharge::execute(args, &config),
        Commands::Tui => commands::tui::execute(config),
    }
}
