//! Alpha Vantage GLOBAL_QUOTE endpoint
//!
//! The free tier answers over-limit calls with a 200 plus a "Note" body, so
//! a syntactically valid response may still carry no quote.

use reqwest::Client;
use serde::Deserialize;

use super::{PriceQuote, ProviderError};

const PROVIDER_ID: &str = "alphavantage";

#[derive(Debug, Deserialize)]
struct GlobalQuoteEnvelope {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "globalQuote")]
    global_quote_alt: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "05. Price")]
    price_alt: Option<String>,
}

pub(super) async fn fetch(
    client: &Client,
    ticker: &str,
    api_key: &str,
) -> Result<PriceQuote, ProviderError> {
    let key = if api_key.is_empty() { "demo" } else { api_key };
    let url = format!(
        "https://www.alphavantage.co/query?function=GLOBAL_QUOTE&symbol={ticker}&apikey={key}"
    );
    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(ProviderError::Http {
            provider: PROVIDER_ID,
            status: resp.status().as_u16(),
        });
    }
    let envelope: GlobalQuoteEnvelope = resp.json().await?;
    extract_price(envelope)
}

fn extract_price(envelope: GlobalQuoteEnvelope) -> Result<PriceQuote, ProviderError> {
    let quote = match envelope.global_quote.or(envelope.global_quote_alt) {
        Some(q) => q,
        None => {
            // Rate-limit notes arrive as a 200; surface them as the detail
            return Err(match envelope.note {
                Some(note) => ProviderError::Malformed {
                    provider: PROVIDER_ID,
                    detail: note,
                },
                None => ProviderError::MissingQuote {
                    provider: PROVIDER_ID,
                },
            });
        }
    };

    let raw = quote
        .price
        .or(quote.price_alt)
        .ok_or(ProviderError::MissingQuote {
            provider: PROVIDER_ID,
        })?;

    let price = raw.parse::<f64>().map_err(|_| ProviderError::Malformed {
        provider: PROVIDER_ID,
        detail: format!("price not numeric: {raw}"),
    })?;

    Ok(PriceQuote {
        price,
        source: PROVIDER_ID.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GlobalQuoteEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_global_quote_price() {
        let envelope = parse(r#"{"Global Quote":{"05. price":"187.3300"}}"#);
        let quote = extract_price(envelope).unwrap();
        assert_eq!(quote.price, 187.33);
        assert_eq!(quote.source, "alphavantage");
    }

    #[test]
    fn test_alternate_casing_accepted() {
        let envelope = parse(r#"{"globalQuote":{"05. Price":"42.5"}}"#);
        assert_eq!(extract_price(envelope).unwrap().price, 42.5);
    }

    #[test]
    fn test_rate_limit_note_surfaces_as_detail() {
        let envelope = parse(r#"{"Note":"API call frequency is 5 calls per minute"}"#);
        match extract_price(envelope) {
            Err(ProviderError::Malformed { detail, .. }) => {
                assert!(detail.contains("5 calls per minute"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_is_missing_quote() {
        let envelope = parse("{}");
        assert!(matches!(
            extract_price(envelope),
            Err(ProviderError::MissingQuote { .. })
        ));
    }
}
