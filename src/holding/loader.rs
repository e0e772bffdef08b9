//! Load holdings from CSV ledgers
//!
//! Column layout mirrors the flat storage row: `Units` carries the cash
//! amount for cash rows and the current dollar value for fixed-growth rows.

use super::Holding;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row for a holdings ledger
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Units")]
    units: f64,
    #[serde(rename = "Price", default)]
    price: f64,
    #[serde(rename = "CAGR", default)]
    cagr: f64,
    #[serde(rename = "MonthlyContrib", default)]
    monthly_contrib: f64,
}

impl CsvRow {
    fn to_holding(self) -> Result<Holding, Box<dyn Error>> {
        // A stored CAGR of exactly 0 means "no override"
        let cagr = (self.cagr != 0.0).then_some(self.cagr);

        match self.kind.as_str() {
            "cash" => Ok(Holding::Cash {
                name: self.name,
                amount: self.units,
                monthly_contribution: self.monthly_contrib,
            }),
            "ticker" => Ok(Holding::Ticker {
                name: self.name,
                units: self.units,
                price: self.price,
                cagr,
                monthly_contribution: self.monthly_contrib,
            }),
            "cagr" => Ok(Holding::FixedGrowth {
                name: self.name,
                current_value: self.units,
                cagr,
                monthly_contribution: self.monthly_contrib,
            }),
            other => Err(format!("Unknown holding type: {}", other).into()),
        }
    }
}

/// Load all holdings from a CSV file
pub fn load_holdings<P: AsRef<Path>>(path: P) -> Result<Vec<Holding>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut holdings = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        holdings.push(row.to_holding()?);
    }

    Ok(holdings)
}

/// Load holdings from any reader (e.g., string buffer, network stream)
pub fn load_holdings_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<Holding>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut holdings = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        holdings.push(row.to_holding()?);
    }

    Ok(holdings)
}
