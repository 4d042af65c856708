mod engine;
mod types;

pub use engine::{
    HORIZON_MONTHS, MAX_GROWTH_PER_CYCLE, MIN_FAST_CYCLE_MONTHS, TRADITIONAL_CYCLE_MONTHS,
    compound, derive_rates, run_simulation, simulate,
};
pub use types::{
    IndexedPoint, REFERENCE_MARGIN_RANGE, REFERENCE_NET_TERMS_DAYS, REFERENCE_ROAS_RANGE,
    RateProfile, SimulationInput, SimulationResult,
};
