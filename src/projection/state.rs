//! Simulation state for one projection run

use crate::assumptions::Assumptions;
use crate::holding::Holding;
use std::collections::HashMap;

/// Per-holding arrays driving the monthly fold.
///
/// Rates, contributions, and weights are computed once from the snapshot and
/// stay read-only for the whole run; only `values` evolves.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current dollar value per holding
    values: Vec<f64>,

    /// Monthly compounding rate per holding
    rates: Vec<f64>,

    /// Per-holding monthly contribution
    contributions: Vec<f64>,

    /// Fixed share of the global contribution per holding.
    /// Computed from starting values and never recomputed from drift.
    weights: Vec<f64>,

    /// Total at snapshot time, before any compounding
    start_total: f64,
}

impl SimulationState {
    /// Build the state from a holdings snapshot.
    ///
    /// `price_cache` maps uppercased ticker symbols to the most recent cached
    /// price; it backstops tickers whose own price is unset.
    pub fn from_snapshot(
        holdings: &[Holding],
        assumptions: &Assumptions,
        price_cache: &HashMap<String, f64>,
    ) -> Self {
        let values: Vec<f64> = holdings
            .iter()
            .map(|h| {
                let cached = h
                    .ticker_symbol()
                    .and_then(|sym| price_cache.get(&sym).copied());
                h.start_value(cached)
            })
            .collect();

        let start_total: f64 = values.iter().sum();

        // Fixed contribution weights from the starting mix. A zero-value
        // portfolio splits the global contribution into equal shares.
        let weights: Vec<f64> = if start_total > 0.0 {
            values.iter().map(|v| v / start_total).collect()
        } else {
            let share = 1.0 / values.len().max(1) as f64;
            vec![share; values.len()]
        };

        let rates: Vec<f64> = holdings
            .iter()
            .map(|h| match h {
                Holding::Cash { .. } => assumptions.cash_monthly_rate(),
                _ => assumptions.growth_monthly_rate(h.cagr_override()),
            })
            .collect();

        let contributions: Vec<f64> = holdings.iter().map(|h| h.monthly_contribution()).collect();

        Self {
            values,
            rates,
            contributions,
            weights,
            start_total,
        }
    }

    pub fn start_total(&self) -> f64 {
        self.start_total
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Advance one month: compound every holding, then apply contributions.
    /// Contributions land strictly after compounding, so new money never
    /// earns the month it arrives. Returns the new portfolio total.
    pub fn step(&mut self, global_contribution: f64) -> f64 {
        for (value, rate) in self.values.iter_mut().zip(&self.rates) {
            *value *= 1.0 + rate;
        }

        for i in 0..self.values.len() {
            self.values[i] += global_contribution * self.weights[i] + self.contributions[i];
        }

        self.values.iter().sum()
    }
}
