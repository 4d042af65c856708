use super::types::{IndexedPoint, RateProfile, SimulationInput, SimulationResult};

pub const HORIZON_MONTHS: u32 = 12;
pub const TRADITIONAL_CYCLE_MONTHS: f64 = 3.5;
pub const MAX_GROWTH_PER_CYCLE: f64 = 0.35;
pub const MIN_FAST_CYCLE_MONTHS: f64 = 0.75;

// Execution and conversion-lag friction applied to the excess return.
const GROWTH_FRICTION: f64 = 0.14;
// Diminishing benefit of higher excess return.
const GROWTH_EXPONENT: f64 = 0.7;
const FAST_CYCLE_BASE_MONTHS: f64 = 1.0;
const FAST_CYCLE_BASE_TERMS_DAYS: f64 = 30.0;
const FAST_CYCLE_MONTHS_PER_TERM_DAY: f64 = 0.004;
// Acquisition cost and audience saturation, compounding monthly.
const MONTHLY_DECAY: f64 = 0.96;

/// Profit generated per dollar reinvested, floored at zero so the fractional
/// power below always sees a non-negative base.
fn excess_return(contribution_margin: f64, roas: f64) -> f64 {
    (contribution_margin * (roas - 1.0)).max(0.0)
}

fn growth_per_cycle(excess_return: f64) -> f64 {
    (GROWTH_FRICTION * excess_return.powf(GROWTH_EXPONENT)).min(MAX_GROWTH_PER_CYCLE)
}

/// Longer supplier terms let the next order go out before the current one is
/// paid for, which compresses the cash cycle down to the floor.
fn fast_cycle_months(net_terms_days: u32) -> f64 {
    let compression =
        (net_terms_days as f64 - FAST_CYCLE_BASE_TERMS_DAYS) * FAST_CYCLE_MONTHS_PER_TERM_DAY;
    (FAST_CYCLE_BASE_MONTHS - compression).max(MIN_FAST_CYCLE_MONTHS)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn decay_factor(month: u32) -> f64 {
    MONTHLY_DECAY.powf(f64::from(month - 1))
}

/// Derives the shared per-cycle growth and the two monthly rates.
///
/// Both operating models use the same growth per cycle; only the cycle length
/// differs, so cash-cycle speed is the sole driver of the comparison.
pub fn derive_rates(inputs: &SimulationInput) -> RateProfile {
    let excess_return = excess_return(inputs.contribution_margin, inputs.roas);
    let growth_per_cycle = growth_per_cycle(excess_return);
    let fast_cycle_months = fast_cycle_months(inputs.net_terms_days);

    RateProfile {
        excess_return,
        growth_per_cycle,
        traditional_cycle_months: TRADITIONAL_CYCLE_MONTHS,
        fast_cycle_months,
        traditional_monthly_rate: growth_per_cycle / TRADITIONAL_CYCLE_MONTHS,
        fast_monthly_rate: growth_per_cycle / fast_cycle_months,
    }
}

/// Compounds both monthly rates over the horizon.
///
/// Each index is rounded to two decimals every month and the rounded value is
/// what the next month multiplies, so the output reproduces the displayed
/// trajectory exactly.
pub fn compound(rates: &RateProfile) -> SimulationResult {
    let mut series = Vec::with_capacity(HORIZON_MONTHS as usize + 1);
    let mut traditional = 1.0;
    let mut fast = 1.0;
    series.push(IndexedPoint {
        month: 0,
        traditional,
        fast,
    });

    for month in 1..=HORIZON_MONTHS {
        let decay = decay_factor(month);
        traditional =
            round_to_hundredths(traditional * (1.0 + rates.traditional_monthly_rate * decay));
        fast = round_to_hundredths(fast * (1.0 + rates.fast_monthly_rate * decay));
        series.push(IndexedPoint {
            month,
            traditional,
            fast,
        });
    }

    SimulationResult {
        series,
        multiplier: final_multiplier(traditional, fast),
    }
}

fn final_multiplier(traditional: f64, fast: f64) -> f64 {
    // Zero growth leaves both indices at the baseline; report parity rather
    // than leaning on the division.
    if traditional == 1.0 && fast == 1.0 {
        return 1.0;
    }
    fast / traditional
}

pub fn run_simulation(inputs: &SimulationInput) -> SimulationResult {
    compound(&derive_rates(inputs))
}

/// Runs one 12-month comparison of the traditional and fast-cycle models.
pub fn simulate(contribution_margin: f64, roas: f64, net_terms_days: u32) -> SimulationResult {
    run_simulation(&SimulationInput::new(
        contribution_margin,
        roas,
        net_terms_days,
    ))
}
