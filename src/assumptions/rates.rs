//! Annual-to-monthly rate conversion

/// Convert an annual percentage rate (APY or CAGR, e.g. `4.5` for 4.5%)
/// into the equivalent monthly compounding rate.
///
/// Negative annual rates are floored at zero: the simulation never models
/// depreciation, so a -3% CAGR compounds at 0%, not -0.25%/month.
pub fn monthly_rate(annual_pct: f64) -> f64 {
    let r = (annual_pct / 100.0).max(0.0);
    (1.0 + r).powf(1.0 / 12.0) - 1.0
}
