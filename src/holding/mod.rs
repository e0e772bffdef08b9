//! Holdings: asset entries and CSV import

mod data;
pub mod loader;

pub use data::Holding;
pub use loader::{load_holdings, load_holdings_from_reader};
