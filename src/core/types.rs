use serde::Serialize;

pub const REFERENCE_MARGIN_RANGE: (f64, f64) = (0.20, 0.80);
pub const REFERENCE_ROAS_RANGE: (f64, f64) = (1.5, 6.0);
pub const REFERENCE_NET_TERMS_DAYS: [u32; 4] = [30, 45, 60, 90];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub contribution_margin: f64,
    pub roas: f64,
    pub net_terms_days: u32,
}

impl SimulationInput {
    pub fn new(contribution_margin: f64, roas: f64, net_terms_days: u32) -> Self {
        Self {
            contribution_margin,
            roas,
            net_terms_days,
        }
    }

    /// Restricts the inputs to the ranges the interactive controls offer.
    ///
    /// Net terms snap to the nearest reference term; an exact tie picks the shorter one.
    pub fn clamped_to_reference(self) -> Self {
        let (margin_lo, margin_hi) = REFERENCE_MARGIN_RANGE;
        let (roas_lo, roas_hi) = REFERENCE_ROAS_RANGE;
        let net_terms_days = REFERENCE_NET_TERMS_DAYS
            .iter()
            .copied()
            .min_by_key(|terms| terms.abs_diff(self.net_terms_days))
            .unwrap_or(REFERENCE_NET_TERMS_DAYS[0]);

        Self {
            contribution_margin: self.contribution_margin.clamp(margin_lo, margin_hi),
            roas: self.roas.clamp(roas_lo, roas_hi),
            net_terms_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateProfile {
    pub excess_return: f64,
    pub growth_per_cycle: f64,
    pub traditional_cycle_months: f64,
    pub fast_cycle_months: f64,
    pub traditional_monthly_rate: f64,
    pub fast_monthly_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedPoint {
    pub month: u32,
    pub traditional: f64,
    pub fast: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub series: Vec<IndexedPoint>,
    pub multiplier: f64,
}

impl SimulationResult {
    pub fn final_point(&self) -> Option<&IndexedPoint> {
        self.series.last()
    }
}
