//! Yahoo Finance quote endpoint

use reqwest::Client;
use serde::Deserialize;

use super::{PriceQuote, ProviderError};

const PROVIDER_ID: &str = "yahoo";

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: Option<QuoteResponse>,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<QuoteRow>,
}

#[derive(Debug, Deserialize)]
struct QuoteRow {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "postMarketPrice")]
    post_market_price: Option<f64>,
    #[serde(rename = "preMarketPrice")]
    pre_market_price: Option<f64>,
}

pub(super) async fn fetch(client: &Client, ticker: &str) -> Result<PriceQuote, ProviderError> {
    let url = format!("https://query1.finance.yahoo.com/v7/finance/quote?symbols={ticker}");
    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(ProviderError::Http {
            provider: PROVIDER_ID,
            status: resp.status().as_u16(),
        });
    }
    let envelope: QuoteEnvelope = resp.json().await?;
    extract_price(envelope)
}

/// Pick the first populated market price: regular, then post-, then pre-market
fn extract_price(envelope: QuoteEnvelope) -> Result<PriceQuote, ProviderError> {
    let row = envelope
        .quote_response
        .and_then(|r| r.result.into_iter().next())
        .ok_or(ProviderError::MissingQuote {
            provider: PROVIDER_ID,
        })?;

    let price = row
        .regular_market_price
        .or(row.post_market_price)
        .or(row.pre_market_price)
        .ok_or(ProviderError::MissingQuote {
            provider: PROVIDER_ID,
        })?;

    Ok(PriceQuote {
        price,
        source: PROVIDER_ID.to_string(),
    })
}
