//! Stooq CSV quote endpoint
//!
//! Stooq serves one CSV row per symbol; US equities usually need a `.us`
//! suffix, so a bare-symbol miss is retried with the suffix appended.

use reqwest::Client;

use super::{PriceQuote, ProviderError};

const PROVIDER_ID: &str = "stooq";

/// Close price column in the `sd2t2ohlcv` layout
const CLOSE_COLUMN: usize = 6;

pub(super) async fn fetch(client: &Client, ticker: &str) -> Result<PriceQuote, ProviderError> {
    match fetch_symbol(client, &ticker.to_lowercase()).await {
        Ok(quote) => Ok(quote),
        Err(_) => fetch_symbol(client, &format!("{}.us", ticker).to_lowercase()).await,
    }
}

async fn fetch_symbol(client: &Client, symbol: &str) -> Result<PriceQuote, ProviderError> {
    let url = format!("https://stooq.com/q/l/?s={symbol}&f=sd2t2ohlcv&h&e=csv");
    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(ProviderError::Http {
            provider: PROVIDER_ID,
            status: resp.status().as_u16(),
        });
    }
    let text = resp.text().await?;
    parse_close(&text)
}

/// Extract the close price from the single-quote CSV payload
fn parse_close(text: &str) -> Result<PriceQuote, ProviderError> {
    let mut reader = csv::Reader::from_reader(text.trim().as_bytes());
    let record = reader
        .records()
        .next()
        .ok_or(ProviderError::MissingQuote {
            provider: PROVIDER_ID,
        })?
        .map_err(|e| ProviderError::Malformed {
            provider: PROVIDER_ID,
            detail: e.to_string(),
        })?;

    let close = record.get(CLOSE_COLUMN).ok_or(ProviderError::MissingQuote {
        provider: PROVIDER_ID,
    })?;

    let price = close.parse::<f64>().map_err(|_| ProviderError::Malformed {
        provider: PROVIDER_ID,
        detail: format!("close not numeric: {close}"),
    })?;

    Ok(PriceQuote {
        price,
        source: PROVIDER_ID.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Symbol,Date,Time,Open,High,Low,Close,Volume";

    #[test]
    fn test_parse_close_price() {
        let payload = format!(
            "{HEADER}\naapl.us,2026-08-06,22:00:00,226.5,229.1,225.8,228.42,41235600\n"
        );
        let quote = parse_close(&payload).unwrap();
        assert_eq!(quote.price, 228.42);
        assert_eq!(quote.source, "stooq");
    }

    #[test]
    fn test_header_only_payload_is_missing_quote() {
        let err = parse_close(&format!("{HEADER}\n")).unwrap_err();
        assert!(matches!(err, ProviderError::MissingQuote { .. }));
    }

    #[test]
    fn test_unknown_symbol_marker_is_malformed() {
        // Stooq answers unknown symbols with N/D fields
        let payload = format!("{HEADER}\nxxxx,N/D,N/D,N/D,N/D,N/D,N/D,N/D\n");
        let err = parse_close(&payload).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }
}
