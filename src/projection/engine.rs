//! Core projection engine for monthly net worth compounding

use chrono::{NaiveDate, Utc};
use std::collections::HashMap;

use crate::assumptions::Assumptions;
use crate::holding::Holding;

use super::calendar::{add_months, first_of_next_month};
use super::result::{Checkpoint, MonthPoint, ProjectionResult, CHECKPOINT_DAYS};
use super::state::SimulationState;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub projection_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_months: 780, // 65 years
        }
    }
}

/// Approximate elapsed days for a count of elapsed months, using a
/// 365/12-day month
pub fn approx_day_count(months_elapsed: u32) -> u32 {
    (months_elapsed as f64 * (365.0 / 12.0)).round() as u32
}

/// Main projection engine
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self {
            assumptions,
            config,
        }
    }

    /// Run the projection for a holdings snapshot.
    ///
    /// `price_cache` backs ticker holdings whose own price is unset (keyed
    /// by uppercased symbol). `today` anchors the calendar: month 0 is
    /// labeled with the first of the following month.
    pub fn project(
        &self,
        holdings: &[Holding],
        price_cache: &HashMap<String, f64>,
        today: NaiveDate,
    ) -> ProjectionResult {
        let mut state = SimulationState::from_snapshot(holdings, &self.assumptions, price_cache);
        let start_total = state.start_total();

        let mut table = Vec::with_capacity(self.config.projection_months as usize);
        let mut checkpoints = vec![Checkpoint {
            day: 0,
            total: start_total,
        }];
        let mut millionaire_date: Option<NaiveDate> = None;
        let mut crossing_month: Option<u32> = None;

        let label0 = first_of_next_month(today);

        for m in 0..self.config.projection_months {
            let total = state.step(self.assumptions.monthly_contrib);

            let label = add_months(label0, m);
            table.push(MonthPoint { date: label, total });

            // A checkpoint is recorded only when the approximate day count
            // lands exactly on one of the fixed marks.
            let approx_days = approx_day_count(m + 1);
            if CHECKPOINT_DAYS[1..].contains(&approx_days) {
                checkpoints.push(Checkpoint {
                    day: approx_days,
                    total,
                });
            }

            // Only the first crossing counts; later months aren't checked.
            if crossing_month.is_none() && total >= self.assumptions.target {
                millionaire_date = Some(label);
                crossing_month = Some(m);
            }
        }

        // +1: elapsed months inclusive of the crossing month
        let days_to_target = crossing_month.map(|k| approx_day_count(k + 1));

        ProjectionResult {
            run_at: Utc::now(),
            start_total,
            target: self.assumptions.target,
            basis: 12,
            millionaire_date,
            days_to_target,
            checkpoints,
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::monthly_rate;
    use approx::assert_relative_eq;
    use chrono::Datelike;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn single_cash(amount: f64) -> Vec<Holding> {
        vec![Holding::Cash {
            name: "Savings".into(),
            amount,
            monthly_contribution: 0.0,
        }]
    }

    fn engine(assumptions: Assumptions) -> ProjectionEngine {
        ProjectionEngine::new(assumptions, ProjectionConfig::default())
    }

    #[test]
    fn test_table_spans_full_horizon_with_month_start_labels() {
        let result = engine(Assumptions::default()).project(
            &single_cash(10_000.0),
            &HashMap::new(),
            today(),
        );

        assert_eq!(result.table.len(), 780);
        assert_eq!(
            result.table[0].date,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
        for pair in result.table.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        assert!(result.table.iter().all(|p| p.date.day() == 1));
    }

    #[test]
    fn test_first_checkpoint_is_day_zero_start_total() {
        let result = engine(Assumptions::default()).project(
            &single_cash(10_000.0),
            &HashMap::new(),
            today(),
        );
        assert_eq!(result.checkpoints[0].day, 0);
        assert_eq!(result.checkpoints[0].total, 10_000.0);
        assert_eq!(result.start_total, 10_000.0);
        assert_eq!(result.basis, 12);
    }

    #[test]
    fn test_checkpoint_days_are_the_exact_matches() {
        // With a 365/12-day month, rounding (m+1)*365/12 lands exactly on
        // 30 (m=0), 365 (m=11), 730 (m=23), and 1095 (m=35); the 90 and 180
        // marks fall between months (91 and 183) and are never recorded.
        let result = engine(Assumptions::default()).project(
            &single_cash(10_000.0),
            &HashMap::new(),
            today(),
        );
        let days: Vec<u32> = result.checkpoints.iter().map(|c| c.day).collect();
        assert_eq!(days, vec![0, 30, 365, 730, 1095]);
        assert!(days.iter().all(|d| CHECKPOINT_DAYS.contains(d)));
    }

    #[test]
    fn test_checkpoint_totals_match_table() {
        let result = engine(Assumptions::default()).project(
            &single_cash(10_000.0),
            &HashMap::new(),
            today(),
        );
        // Day 365 corresponds to month index 11
        let cp = result.checkpoints.iter().find(|c| c.day == 365).unwrap();
        assert_eq!(cp.total, result.table[11].total);
    }

    #[test]
    fn test_half_million_cash_doubles_on_schedule() {
        // $500k at 4.5% APY, no contributions, $1M target: the crossing
        // month must match the closed-form n in 500000*(1+r)^n >= 1000000.
        let asm = Assumptions::default();
        let result = engine(asm).project(&single_cash(500_000.0), &HashMap::new(), today());

        let r = monthly_rate(4.5);
        let n = (2.0_f64.ln() / (1.0 + r).ln()).ceil() as u32; // months to double

        let date = result.millionaire_date.expect("crossing expected");
        assert_eq!(date, add_months(first_of_next_month(today()), n - 1));
        assert_eq!(result.days_to_target, Some(approx_day_count(n)));

        // The crossing month's table entry is the first at or above target
        let k = (n - 1) as usize;
        assert!(result.table[k].total >= 1_000_000.0);
        assert!(result.table[k - 1].total < 1_000_000.0);
        assert_eq!(result.table[k].date, date);
    }

    #[test]
    fn test_days_and_date_are_null_together() {
        // 0% growth, no contributions: the target is never reached
        let asm = Assumptions {
            cash_apy: 0.0,
            ..Assumptions::default()
        };
        let result = engine(asm).project(&single_cash(10_000.0), &HashMap::new(), today());
        assert!(result.millionaire_date.is_none());
        assert!(result.days_to_target.is_none());
    }

    #[test]
    fn test_totals_grow_monotonically() {
        let asm = Assumptions {
            monthly_contrib: 250.0,
            ..Assumptions::default()
        };
        let holdings = vec![
            Holding::Cash {
                name: "Cash".into(),
                amount: 20_000.0,
                monthly_contribution: 100.0,
            },
            Holding::FixedGrowth {
                name: "Fund".into(),
                current_value: 80_000.0,
                cagr: None,
                monthly_contribution: 0.0,
            },
        ];
        let result = engine(asm).project(&holdings, &HashMap::new(), today());
        for pair in result.table.windows(2) {
            assert!(pair[1].total >= pair[0].total);
        }
        assert!(result.table[0].total >= result.start_total);
    }

    #[test]
    fn test_empty_portfolio_stays_at_zero() {
        let result = engine(Assumptions::default()).project(&[], &HashMap::new(), today());
        assert_eq!(result.start_total, 0.0);
        assert!(result.table.iter().all(|p| p.total == 0.0));
        assert!(result.millionaire_date.is_none());
        assert!(result.days_to_target.is_none());
    }

    #[test]
    fn test_identical_snapshots_project_identically() {
        let asm = Assumptions {
            monthly_contrib: 300.0,
            ..Assumptions::default()
        };
        let holdings = vec![
            Holding::Ticker {
                name: "VTI".into(),
                units: 50.0,
                price: 260.0,
                cagr: Some(8.0),
                monthly_contribution: 150.0,
            },
            Holding::Cash {
                name: "Cash".into(),
                amount: 15_000.0,
                monthly_contribution: 0.0,
            },
        ];

        let a = engine(asm.clone()).project(&holdings, &HashMap::new(), today());
        let b = engine(asm).project(&holdings, &HashMap::new(), today());
        assert_eq!(a.table, b.table);
        assert_eq!(a.checkpoints, b.checkpoints);
        assert_eq!(a.millionaire_date, b.millionaire_date);
        assert_eq!(a.days_to_target, b.days_to_target);
    }

    #[test]
    fn test_target_already_met_crosses_in_month_zero() {
        let asm = Assumptions {
            target: 5_000.0,
            ..Assumptions::default()
        };
        let result = engine(asm).project(&single_cash(10_000.0), &HashMap::new(), today());
        assert_eq!(
            result.millionaire_date,
            Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
        );
        // Month index 0, one elapsed month
        assert_eq!(result.days_to_target, Some(30));
    }

    #[test]
    fn test_mixed_holdings_blend_rates() {
        // One cash and one fixed-growth holding compound independently
        let asm = Assumptions::default();
        let holdings = vec![
            Holding::Cash {
                name: "Cash".into(),
                amount: 1_000.0,
                monthly_contribution: 0.0,
            },
            Holding::FixedGrowth {
                name: "Fund".into(),
                current_value: 1_000.0,
                cagr: Some(12.0),
                monthly_contribution: 0.0,
            },
        ];
        let result = engine(asm).project(&holdings, &HashMap::new(), today());
        let expected =
            1_000.0 * (1.0 + monthly_rate(4.5)) + 1_000.0 * (1.0 + monthly_rate(12.0));
        assert_relative_eq!(result.table[0].total, expected, epsilon = 1e-9);
    }
}
