//! Radial-flow command
//!
//! Solves the Dupuit-Forchheimer well relation for one variable over the
//! fixed radius sequence and prints a summary (or the figure as JSON).

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use flow_core::calculations::{RadialInput, RadialParam, SolveFor};
use flow_core::config::DashboardConfig;
use flow_core::plot::{render_radial, RadialView};

use super::finite_range;

/// Radial-flow arguments; unset parameters take the configured defaults
#[derive(Args)]
pub struct RadialArgs {
    /// Variable to solve for (Q, K, h1, h2)
    #[arg(short, long)]
    pub solve_for: Option<SolveFor>,

    /// Well discharge Q (m3/day)
    #[arg(long)]
    pub discharge: Option<f64>,

    /// Hydraulic conductivity K (m/day)
    #[arg(long)]
    pub conductivity: Option<f64>,

    /// Head at the inner radius h1 (m)
    #[arg(long)]
    pub h1: Option<f64>,

    /// Head at the outer radius h2 (m)
    #[arg(long)]
    pub h2: Option<f64>,

    /// Inner radius r1 (m)
    #[arg(long)]
    pub r1: Option<f64>,

    /// Outer radius r2 (m)
    #[arg(long)]
    pub r2: Option<f64>,

    /// Print the figure as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl RadialArgs {
    fn overrides(&self) -> [(RadialParam, Option<f64>, &'static str); 6] {
        [
            (RadialParam::Discharge, self.discharge, "--discharge"),
            (RadialParam::Conductivity, self.conductivity, "--conductivity"),
            (RadialParam::InnerHead, self.h1, "--h1"),
            (RadialParam::OuterHead, self.h2, "--h2"),
            (RadialParam::InnerRadius, self.r1, "--r1"),
            (RadialParam::OuterRadius, self.r2, "--r2"),
        ]
    }
}

/// Execute the radial command
pub fn execute(args: RadialArgs, config: &DashboardConfig) -> Result<()> {
    let solve_for = args.solve_for.unwrap_or(config.radial.solve_for);
    let mut input = config.radial.initial_input();

    for (param, value, flag) in args.overrides() {
        let Some(value) = value else { continue };
        if !param.is_input_for(solve_for) {
            warn!("{} is being solved for; ignoring {}", solve_for.symbol(), flag);
            continue;
        }
        param.set(&mut input, value);
    }

    info!(solve_for = solve_for.symbol(), "evaluating radial flow");
    let view = render_radial(solve_for, &input);
    for note in &view.diagnostics {
        warn!("{}", note);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", summary(&input, &view));
    }
    Ok(())
}

fn summary(input: &RadialInput, view: &RadialView) -> String {
    let solve_for = view.solve_for;
    let symbol = solve_for.symbol();
    let unit = solve_for.unit();

    let inputs: Vec<String> = RadialParam::ALL
        .iter()
        .filter(|param| param.is_input_for(solve_for))
        .map(|param| format!("{} = {}", short_name(*param), param.get(input)))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("Radial flow: solving for {} [{}]\n", solve_for, unit));
    out.push_str(&format!("  Inputs: {}\n", inputs.join(", ")));

    let Some(trace) = view.figure.traces.first() else {
        return out;
    };
    if let (Some(&r_first), Some(&r_last)) = (trace.x.first(), trace.x.last()) {
        out.push_str(&format!(
            "  Radii:  {} samples from {:.3} m to {:.1} m\n",
            trace.x.len(),
            r_first,
            r_last
        ));
    }
    for (&r, &value) in [trace.x.first().zip(trace.y.first()), trace.x.last().zip(trace.y.last())]
        .into_iter()
        .flatten()
    {
        out.push_str(&format!("  {} at r = {:.3} m: {:.4} {}\n", symbol, r, value, unit));
    }
    match finite_range(&trace.y) {
        Some((lo, hi)) => out.push_str(&format!("  Range:  {:.4} to {:.4} {}\n", lo, hi, unit)),
        None => out.push_str("  Range:  undefined everywhere\n"),
    }
    out
}

fn short_name(param: RadialParam) -> &'static str {
    match param {
        RadialParam::Discharge => "Q",
        RadialParam::Conductivity => "K",
        RadialParam::InnerHead => "h1",
        RadialParam::OuterHead => "h2",
        RadialParam::InnerRadius => "r1",
        RadialParam::OuterRadius => "r2",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_omits_solved_variable() {
        let input = RadialInput::default();
        let view = render_radial(SolveFor::Conductivity, &input);
        let text = summary(&input, &view);
        assert!(text.contains("hydraulic conductivity (K)"));
        assert!(text.contains("Q = 272.83"));
        assert!(!text.contains("K = 8"));
        assert!(text.contains("1000 samples"));
    }

    #[test]
    fn test_summary_reports_undefined_range() {
        let input = RadialInput { q_m3_per_day: 1.0e9, ..RadialInput::default() };
        let view = render_radial(SolveFor::InnerHead, &input);
        assert!(summary(&input, &view).contains("undefined everywhere"));
    }
}
