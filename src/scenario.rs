//! Scenario runner for what-if projection sweeps
//!
//! Holds one set of base assumptions and runs many projections against the
//! same holdings snapshot with varied assumptions, in parallel.

use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::HashMap;

use crate::assumptions::Assumptions;
use crate::holding::Holding;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default(),
        }
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }

    /// Run a single projection with the base assumptions
    pub fn run(
        &self,
        holdings: &[Holding],
        price_cache: &HashMap<String, f64>,
        today: NaiveDate,
    ) -> ProjectionResult {
        let engine =
            ProjectionEngine::new(self.base_assumptions.clone(), ProjectionConfig::default());
        engine.project(holdings, price_cache, today)
    }

    /// Run one projection per assumptions variant, in parallel
    pub fn run_scenarios(
        &self,
        holdings: &[Holding],
        price_cache: &HashMap<String, f64>,
        variants: &[Assumptions],
        today: NaiveDate,
    ) -> Vec<ProjectionResult> {
        variants
            .par_iter()
            .map(|assumptions| {
                let engine =
                    ProjectionEngine::new(assumptions.clone(), ProjectionConfig::default());
                engine.project(holdings, price_cache, today)
            })
            .collect()
    }

    /// Sweep global monthly contribution levels against the base assumptions
    pub fn sweep_contributions(
        &self,
        holdings: &[Holding],
        price_cache: &HashMap<String, f64>,
        levels: &[f64],
        today: NaiveDate,
    ) -> Vec<ProjectionResult> {
        let variants: Vec<Assumptions> = levels
            .iter()
            .map(|&monthly_contrib| Assumptions {
                monthly_contrib,
                ..self.base_assumptions.clone()
            })
            .collect();
        self.run_scenarios(holdings, price_cache, &variants, today)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings() -> Vec<Holding> {
        vec![Holding::Cash {
            name: "Savings".into(),
            amount: 100_000.0,
            monthly_contribution: 0.0,
        }]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn test_contribution_sweep_shape() {
        let runner = ScenarioRunner::new();
        let results =
            runner.sweep_contributions(&holdings(), &HashMap::new(), &[0.0, 1_000.0], today());
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.table.len() == 780));
    }

    #[test]
    fn test_bigger_contribution_never_crosses_later() {
        let runner = ScenarioRunner::new();
        let results = runner.sweep_contributions(
            &holdings(),
            &HashMap::new(),
            &[0.0, 1_000.0, 5_000.0],
            today(),
        );

        let days: Vec<u32> = results
            .iter()
            .map(|r| r.days_to_target.expect("all variants cross within 65y"))
            .collect();
        assert!(days[1] <= days[0]);
        assert!(days[2] <= days[1]);
    }

    #[test]
    fn test_sweep_leaves_base_assumptions_alone() {
        let runner = ScenarioRunner::new();
        runner.sweep_contributions(&holdings(), &HashMap::new(), &[9_999.0], today());
        assert_eq!(runner.assumptions().monthly_contrib, 0.0);
    }
}
