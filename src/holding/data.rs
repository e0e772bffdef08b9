//! Holding data structures for the net worth ledger

use serde::{Deserialize, Serialize};

/// A single asset entry contributing to net worth.
///
/// The wire tag for fixed-growth holdings is `"cagr"`: those rows carry a
/// dollar value that grows at a flat annual rate, with no market price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Holding {
    /// Cash balance, grows at the assumptions cash APY
    Cash {
        name: String,
        /// Dollar balance
        amount: f64,
        #[serde(default)]
        monthly_contribution: f64,
    },
    /// Market-priced position: units of a ticker symbol
    Ticker {
        name: String,
        units: f64,
        /// Last known unit price; non-positive means unset
        #[serde(default)]
        price: f64,
        /// Annual growth override (percent); None uses the default CAGR
        #[serde(default)]
        cagr: Option<f64>,
        #[serde(default)]
        monthly_contribution: f64,
    },
    /// Fixed-growth value (real estate, private equity, ...)
    #[serde(rename = "cagr")]
    FixedGrowth {
        name: String,
        /// Current dollar value
        current_value: f64,
        /// Annual growth override (percent); None uses the default CAGR
        #[serde(default)]
        cagr: Option<f64>,
        #[serde(default)]
        monthly_contribution: f64,
    },
}

impl Holding {
    pub fn name(&self) -> &str {
        match self {
            Holding::Cash { name, .. }
            | Holding::Ticker { name, .. }
            | Holding::FixedGrowth { name, .. } => name,
        }
    }

    /// Per-holding monthly contribution added after each month's compounding
    pub fn monthly_contribution(&self) -> f64 {
        match self {
            Holding::Cash {
                monthly_contribution,
                ..
            }
            | Holding::Ticker {
                monthly_contribution,
                ..
            }
            | Holding::FixedGrowth {
                monthly_contribution,
                ..
            } => *monthly_contribution,
        }
    }

    /// CAGR override, if any (cash has none; it grows at the cash APY)
    pub fn cagr_override(&self) -> Option<f64> {
        match self {
            Holding::Cash { .. } => None,
            Holding::Ticker { cagr, .. } | Holding::FixedGrowth { cagr, .. } => *cagr,
        }
    }

    /// Ticker symbol uppercased, for ticker holdings only
    pub fn ticker_symbol(&self) -> Option<String> {
        match self {
            Holding::Ticker { name, .. } => Some(name.to_uppercase()),
            _ => None,
        }
    }

    /// Resolve the holding's starting dollar value.
    ///
    /// Tickers with a non-positive own price fall back to `cached_price`
    /// (the user's price cache, looked up by uppercased symbol); if that is
    /// also non-positive or absent, the position is worth 0.
    pub fn start_value(&self, cached_price: Option<f64>) -> f64 {
        match self {
            Holding::Cash { amount, .. } => *amount,
            Holding::Ticker { units, price, .. } => {
                let px = if *price > 0.0 {
                    *price
                } else {
                    cached_price.unwrap_or(0.0)
                };
                if px > 0.0 {
                    units * px
                } else {
                    0.0
                }
            }
            Holding::FixedGrowth { current_value, .. } => *current_value,
        }
    }

    /// Wire tag for this holding kind
    pub fn kind(&self) -> &'static str {
        match self {
            Holding::Cash { .. } => "cash",
            Holding::Ticker { .. } => "ticker",
            Holding::FixedGrowth { .. } => "cagr",
        }
    }
}
