//! Net Worth System - monthly compounding projection engine with
//! millionaire-date tracking
//!
//! This library provides:
//! - A holdings ledger (cash, market tickers, fixed-growth assets)
//! - Annual-to-monthly rate normalization
//! - A 65-year calendar-anchored projection with target-crossing detection
//! - Pluggable quote providers for ticker price refresh
//! - An in-memory per-user record store backing the HTTP surface

pub mod assumptions;
pub mod holding;
pub mod pricing;
pub mod projection;
pub mod scenario;
pub mod store;

// Re-export commonly used types
pub use assumptions::{monthly_rate, Assumptions, PriceProvider};
pub use holding::Holding;
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
pub use store::RecordStore;
