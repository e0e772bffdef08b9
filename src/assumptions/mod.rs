//! Projection assumptions: target, growth defaults, and contribution plan

mod rates;

pub use rates::monthly_rate;

use serde::{Deserialize, Serialize};

/// Quote provider used by the price refresh batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceProvider {
    /// No provider configured; price refresh is rejected
    #[default]
    None,
    Yahoo,
    Stooq,
    #[serde(rename = "alphavantage")]
    AlphaVantage,
}

impl PriceProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceProvider::None => "none",
            PriceProvider::Yahoo => "yahoo",
            PriceProvider::Stooq => "stooq",
            PriceProvider::AlphaVantage => "alphavantage",
        }
    }
}

/// Per-user projection assumptions
///
/// `basis` is informational only; projection output always reports a
/// 12-months-per-year basis regardless of this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assumptions {
    /// Net worth target in dollars
    pub target: f64,

    /// Day-count basis (informational)
    pub basis: u32,

    /// Default annual growth rate (percent) for holdings without an override
    pub default_cagr: f64,

    /// Global monthly contribution, split across holdings by starting weight
    pub monthly_contrib: f64,

    /// Annual percentage yield (percent) applied to cash holdings
    pub cash_apy: f64,

    /// Configured quote provider for ticker price refresh
    #[serde(default)]
    pub price_provider: PriceProvider,

    /// Alpha Vantage API key, if the provider needs one
    #[serde(default)]
    pub alpha_key: String,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            target: 1_000_000.0,
            basis: 365,
            default_cagr: 7.0,
            monthly_contrib: 0.0,
            cash_apy: 4.5,
            price_provider: PriceProvider::None,
            alpha_key: String::new(),
        }
    }
}

impl Assumptions {
    /// Monthly compounding rate for cash holdings
    pub fn cash_monthly_rate(&self) -> f64 {
        monthly_rate(self.cash_apy)
    }

    /// Monthly compounding rate for a growth holding, honoring an override
    pub fn growth_monthly_rate(&self, cagr_override: Option<f64>) -> f64 {
        monthly_rate(cagr_override.unwrap_or(self.default_cagr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let asm = Assumptions::default();
        assert_eq!(asm.target, 1_000_000.0);
        assert_eq!(asm.basis, 365);
        assert_eq!(asm.default_cagr, 7.0);
        assert_eq!(asm.cash_apy, 4.5);
        assert_eq!(asm.monthly_contrib, 0.0);
        assert_eq!(asm.price_provider, PriceProvider::None);
    }

    #[test]
    fn test_override_beats_default_cagr() {
        let asm = Assumptions::default();
        assert_relative_eq!(asm.growth_monthly_rate(Some(10.0)), monthly_rate(10.0));
        assert_relative_eq!(asm.growth_monthly_rate(None), monthly_rate(7.0));
    }

    #[test]
    fn test_negative_override_is_an_override() {
        // A negative CAGR override does not fall back to the default; it
        // clamps to 0% growth in the rate conversion instead.
        let asm = Assumptions::default();
        assert_eq!(asm.growth_monthly_rate(Some(-4.0)), 0.0);
    }

    #[test]
    fn test_provider_wire_names() {
        let json = serde_json::to_string(&PriceProvider::AlphaVantage).unwrap();
        assert_eq!(json, "\"alphavantage\"");
        let p: PriceProvider = serde_json::from_str("\"stooq\"").unwrap();
        assert_eq!(p, PriceProvider::Stooq);
    }

    #[test]
    fn test_assumptions_round_trip() {
        let asm = Assumptions {
            target: 2_000_000.0,
            price_provider: PriceProvider::Yahoo,
            ..Assumptions::default()
        };
        let json = serde_json::to_string(&asm).unwrap();
        let back: Assumptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.target, 2_000_000.0);
        assert_eq!(back.price_provider, PriceProvider::Yahoo);
    }
}
