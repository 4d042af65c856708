//! Plain-text rendering of a simulation for terminal output.

use crate::core::{RateProfile, SimulationInput, SimulationResult};

pub fn format_multiplier(multiplier: f64) -> String {
    format!("{multiplier:.2}x")
}

pub fn format_report(
    inputs: &SimulationInput,
    rates: &RateProfile,
    result: &SimulationResult,
) -> String {
    let mut out = String::new();

    out.push_str("=== cashcycle - 12-month growth comparison ===\n");
    out.push_str(&format!(
        "Contribution margin: {:.1}%  ROAS: {:.2}  Net terms: {} days\n",
        inputs.contribution_margin * 100.0,
        inputs.roas,
        inputs.net_terms_days
    ));
    out.push_str(&format!(
        "Growth per cycle: {:.2}%  Cycle length: traditional {:.2} mo, fast {:.2} mo\n",
        rates.growth_per_cycle * 100.0,
        rates.traditional_cycle_months,
        rates.fast_cycle_months
    ));
    out.push_str(&format!(
        "Monthly rate: traditional {:.2}%, fast {:.2}%\n\n",
        rates.traditional_monthly_rate * 100.0,
        rates.fast_monthly_rate * 100.0
    ));

    out.push_str(&format!("{:>5}  {:>11}  {:>8}\n", "Month", "Traditional", "Fast"));
    for point in &result.series {
        out.push_str(&format!(
            "{:>5}  {:>11.2}  {:>8.2}\n",
            point.month, point.traditional, point.fast
        ));
    }

    out.push('\n');
    if let Some(last) = result.final_point() {
        out.push_str(&format!(
            "Month {} index: traditional {:.2}, fast {:.2}\n",
            last.month, last.traditional, last.fast
        ));
    }
    out.push_str(&format!(
        "12-month multiplier: {}\n",
        format_multiplier(result.multiplier)
    ));
    out
}
