//! Monthly compounding projection: engine, state, calendar, and results

pub mod calendar;
mod engine;
mod result;
mod state;

pub use engine::{approx_day_count, ProjectionConfig, ProjectionEngine};
pub use result::{Checkpoint, MonthPoint, ProjectionResult, ProjectionSummary, CHECKPOINT_DAYS};
pub use state::SimulationState;
