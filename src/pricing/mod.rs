//! Ticker quote retrieval from external providers
//!
//! Each provider lives in its own module; payload parsing is split from
//! transport so it can be tested without a network.

mod alpha_vantage;
mod stooq;
mod yahoo;

use log::{info, warn};
use reqwest::Client;
use thiserror::Error;

use crate::assumptions::PriceProvider;

/// A fetched quote plus its provenance tag
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub price: f64,
    pub source: String,
}

/// Errors from quote retrieval
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success HTTP status from the provider
    #[error("{provider}: http {status}")]
    Http { provider: &'static str, status: u16 },

    /// Response arrived but carried no usable quote
    #[error("{provider}: no quote for symbol")]
    MissingQuote { provider: &'static str },

    /// Response payload could not be interpreted
    #[error("{provider}: malformed payload: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },

    /// No provider configured for this user
    #[error("no price provider configured")]
    NoProvider,

    /// Transport-level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Fetch the latest price for `ticker` from the configured provider
pub async fn fetch_price(
    client: &Client,
    provider: PriceProvider,
    ticker: &str,
    api_key: &str,
) -> Result<PriceQuote, ProviderError> {
    match provider {
        PriceProvider::None => Err(ProviderError::NoProvider),
        PriceProvider::Yahoo => yahoo::fetch(client, ticker).await,
        PriceProvider::Stooq => stooq::fetch(client, ticker).await,
        PriceProvider::AlphaVantage => alpha_vantage::fetch(client, ticker, api_key).await,
    }
}

/// Outcome of one refresh batch
#[derive(Debug)]
pub struct RefreshOutcome {
    /// Successfully fetched quotes, in ticker order
    pub updated: Vec<(String, PriceQuote)>,
    /// Count of tickers whose fetch failed
    pub failed: u32,
}

/// Fetch quotes for every ticker, continuing past individual failures.
///
/// A failure for one ticker is logged and counted; it never aborts the batch
/// and never undoes quotes fetched before it.
pub async fn refresh_all(
    client: &Client,
    provider: PriceProvider,
    api_key: &str,
    tickers: &[String],
) -> RefreshOutcome {
    let mut updated = Vec::new();
    let mut failed = 0;

    for ticker in tickers {
        match fetch_price(client, provider, ticker, api_key).await {
            Ok(quote) => {
                info!(
                    "price.update ticker={} price={} source={}",
                    ticker, quote.price, quote.source
                );
                updated.push((ticker.clone(), quote));
            }
            Err(err) => {
                warn!("price.fail ticker={} err={}", ticker, err);
                failed += 1;
            }
        }
    }

    RefreshOutcome { updated, failed }
}
