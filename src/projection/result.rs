//! Projection output structures

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of day offsets ever recorded as checkpoints
pub const CHECKPOINT_DAYS: [u32; 7] = [0, 30, 90, 180, 365, 730, 1095];

/// One recorded (day-offset, total) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub day: u32,
    pub total: f64,
}

/// One month of the full projection table, labeled with the first of the
/// calendar month it lands on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub date: NaiveDate,
    pub total: f64,
}

/// Complete projection result
///
/// `millionaire_date` and `days_to_target` are both null exactly when the
/// total never reaches the target inside the simulated horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// When the run happened
    pub run_at: DateTime<Utc>,

    /// Portfolio total at snapshot time
    pub start_total: f64,

    /// Net worth target
    pub target: f64,

    /// Months-per-year basis; always 12
    pub basis: u32,

    /// First month-start at which the total meets or exceeds the target
    pub millionaire_date: Option<NaiveDate>,

    /// Approximate day count to the crossing month, inclusive
    pub days_to_target: Option<u32>,

    /// Sparse checkpoints at the fixed day offsets; `(0, start_total)` first
    pub checkpoints: Vec<Checkpoint>,

    /// Full monthly table over the whole horizon
    pub table: Vec<MonthPoint>,
}

impl ProjectionResult {
    /// The persistable summary: everything except the monthly table, which
    /// is returned to the immediate caller only.
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            run_at: self.run_at,
            start_total: self.start_total,
            target: self.target,
            basis: self.basis,
            millionaire_date: self.millionaire_date,
            days_to_target: self.days_to_target,
        }
    }
}

/// Summary record persisted by the caller, one per run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub run_at: DateTime<Utc>,
    pub start_total: f64,
    pub target: f64,
    pub basis: u32,
    pub millionaire_date: Option<NaiveDate>,
    pub days_to_target: Option<u32>,
}
