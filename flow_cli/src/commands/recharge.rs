//! Recharge command
//!
//! Evaluates the water table and flux of an unconfined strip between two
//! fixed heads with uniform recharge.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use flow_core::calculations::sampling::finite_max;
use flow_core::calculations::{RechargeInput, RechargeParam};
use flow_core::config::DashboardConfig;
use flow_core::plot::quiver::flow_arrows;
use flow_core::plot::recharge::elevation_trace;
use flow_core::plot::{render_recharge, RechargeView};

/// Recharge arguments; unset parameters take the configured defaults
#[derive(Args)]
pub struct RechargeArgs {
    /// Head at x = 0, h1 (m)
    #[arg(long)]
    pub h1: Option<f64>,

    /// Head at x = L, h2 (m)
    #[arg(long)]
    pub h2: Option<f64>,

    /// Hydraulic conductivity K (m/day)
    #[arg(long)]
    pub conductivity: Option<f64>,

    /// Recharge rate W (m/day)
    #[arg(long)]
    pub recharge: Option<f64>,

    /// Strip length L (m)
    #[arg(long)]
    pub length: Option<f64>,

    /// Include flow arrows in the elevation figure
    #[arg(long, conflicts_with = "no_arrows")]
    pub arrows: bool,

    /// Leave flow arrows out of the elevation figure
    #[arg(long)]
    pub no_arrows: bool,

    /// Print both figures as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Scalar results printed by the summary and embedded in the JSON report
#[derive(Debug, Serialize)]
struct RechargeReport {
    input: RechargeInput,
    divide_m: f64,
    max_head_m: f64,
    flux_left_m2_per_day: f64,
    flux_right_m2_per_day: f64,
    arrow_count: usize,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a RechargeReport,
    view: &'a RechargeView,
}

/// Execute the recharge command
pub fn execute(args: RechargeArgs, config: &DashboardConfig) -> Result<()> {
    let mut input = config.recharge.initial_input();
    let overrides = [
        (RechargeParam::LeftHead, args.h1),
        (RechargeParam::RightHead, args.h2),
        (RechargeParam::Conductivity, args.conductivity),
        (RechargeParam::Recharge, args.recharge),
        (RechargeParam::Length, args.length),
    ];
    for (param, value) in overrides {
        if let Some(value) = value {
            param.set(&mut input, value);
        }
    }

    let show_arrows = if args.arrows {
        true
    } else if args.no_arrows {
        false
    } else {
        config.recharge.show_arrows
    };

    info!(l_m = input.l_m, show_arrows, "evaluating recharge strip");
    let view = render_recharge(&input, show_arrows);
    for note in &view.diagnostics {
        warn!("{}", note);
    }

    let report = report(&input, &view, show_arrows);
    if args.json {
        let output = JsonOutput { report: &report, view: &view };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", summary(&report));
    }
    Ok(())
}

fn report(input: &RechargeInput, view: &RechargeView, show_arrows: bool) -> RechargeReport {
    let arrow_count = if show_arrows {
        view.elevation
            .traces
            .get(elevation_trace::HEAD)
            .and_then(|head| finite_max(&head.y))
            .map_or(0, |peak| flow_arrows(input, peak).len())
    } else {
        0
    };

    RechargeReport {
        input: *input,
        divide_m: view.divide_m,
        max_head_m: view.max_head_m,
        flux_left_m2_per_day: input.flux_at(0.0),
        flux_right_m2_per_day: input.flux_at(input.l_m),
        arrow_count,
    }
}

fn summary(report: &RechargeReport) -> String {
    let input = &report.input;
    let mut out = String::new();
    out.push_str(&format!(
        "Recharge strip: L = {} m, h1 = {} m, h2 = {} m, K = {} m/d, W = {} m/d\n",
        input.l_m, input.h1_m, input.h2_m, input.k_m_per_day, input.w_m_per_day
    ));
    out.push_str(&format!("  Divide d        = {:.2} m\n", report.divide_m));
    out.push_str(&format!("  Max head h_max  = {:.4} m\n", report.max_head_m));
    out.push_str(&format!("  Flux q(0)       = {:.4} m²/day\n", report.flux_left_m2_per_day));
    out.push_str(&format!("  Flux q(L)       = {:.4} m²/day\n", report.flux_right_m2_per_day));
    out.push_str(&format!("  Flow arrows     = {}\n", report.arrow_count));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_values() {
        let input = RechargeInput::default();
        let view = render_recharge(&input, true);
        let report = report(&input, &view, true);
        assert!((report.divide_m - 610.0).abs() < 1e-9);
        assert!((report.flux_left_m2_per_day + 0.61).abs() < 1e-12);
        assert!((report.flux_right_m2_per_day - 0.39).abs() < 1e-12);
        assert!(report.arrow_count > 0);

        let text = summary(&report);
        assert!(text.contains("Divide d        = 610.00 m"));
        assert!(text.contains("q(0)       = -0.6100"));
    }

    #[test]
    fn test_hidden_arrows_count_zero() {
        let input = RechargeInput::default();
        let view = render_recharge(&input, false);
        assert_eq!(report(&input, &view, false).arrow_count, 0);
    }
}
