use std::time::Duration;

use reqwest::header;
use serde_json::Value;

use crate::config::{Config, UpstreamMode};

/* API contains the logic for calling the external pricing service.
 * Links the bot's logic with anything it needs from the internet.
 * Called and used by the handlers only.
 */

// Fiat currencies a rate is quoted in, in CurrencyRate field order.
const PAIR_FIATS: [&str; 3] = ["usd", "eur", "rub"];
const TICKER_FIATS: [&str; 3] = ["USD", "EUR", "RUB"];

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(8);

/// Integer prices of one unit of an asset, one field per fiat
/// currency. Built fresh on every lookup and discarded after the
/// reply is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyRate {
    pub usd: i64,
    pub eur: i64,
    pub rub: i64,
}

impl CurrencyRate {
    /* Casting truncates toward zero, never rounds. All three values
     * truncating to zero means the upstream does not know the asset,
     * which is promoted to a hard error.
     */
    fn from_values(asset_code: &str, values: [f64; 3]) -> Result<CurrencyRate, FetchError> {
        let rate = CurrencyRate {
            usd: values[0] as i64,
            eur: values[1] as i64,
            rub: values[2] as i64,
        };

        if rate.usd == 0 && rate.eur == 0 && rate.rub == 0 {
            return Err(FetchError::UnknownAsset(asset_code.to_string()));
        }

        Ok(rate)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Upstream request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Upstream response has no usable price")]
    MissingPrice,
    #[error("Unknown asset code: {0}")]
    UnknownAsset(String),
}

pub struct RateClient {
    client: reqwest::Client,
    base_url: String,
    mode: UpstreamMode,
}

impl RateClient {
    pub fn new(config: &Config) -> Result<RateClient, FetchError> {
        let mut h = header::HeaderMap::new();
        h.insert(
            "Accept",
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(h)
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        Ok(RateClient {
            client,
            base_url: config.upstream_base_url.clone(),
            mode: config.upstream_mode,
        })
    }

    /* Fetches the current rate of one asset against all three fiat
     * currencies. A fiat lookup that fails or cannot be parsed
     * degrades to zero instead of failing the whole call, so the user
     * still gets the pairs the upstream does know. Only an all-zero
     * result is an error.
     */
    pub async fn fetch_rate(&self, asset_code: &str) -> Result<CurrencyRate, FetchError> {
        let mut values = [0.0; 3];

        match self.mode {
            UpstreamMode::PairByPair => {
                for (value, fiat) in values.iter_mut().zip(PAIR_FIATS) {
                    match self.fetch_pair(asset_code, fiat).await {
                        Ok(price) => *value = price,
                        Err(err) => {
                            log::warn!("Lookup {asset_code}-{fiat} degraded to zero: {err}");
                        }
                    }
                }
            }
            UpstreamMode::TickerAll => match self.fetch_ticker().await {
                Ok(body) => {
                    for (value, fiat) in values.iter_mut().zip(TICKER_FIATS) {
                        match extract_ticker_price(&body, fiat) {
                            Ok(price) => *value = price,
                            Err(err) => {
                                log::warn!("Ticker {fiat} degraded to zero: {err}");
                            }
                        }
                    }
                }
                Err(err) => {
                    log::warn!("Ticker request failed: {err}");
                }
            },
        }

        CurrencyRate::from_values(asset_code, values)
    }

    // One (asset, fiat) pair against the per-pair endpoint.
    async fn fetch_pair(&self, asset_code: &str, fiat: &str) -> Result<f64, FetchError> {
        let url = format!("{}/api/full/{}-{}", self.base_url, asset_code, fiat);
        let body: Value = self.client.get(url).send().await?.json().await?;
        extract_pair_price(&body)
    }

    // All three fiats at once. The ticker endpoint is bound to a
    // single asset upstream-side, so the code is not part of the URL.
    async fn fetch_ticker(&self) -> Result<Value, FetchError> {
        let url = format!("{}/ticker", self.base_url);
        let body = self.client.get(url).send().await?.json().await?;
        Ok(body)
    }
}

// Price at `ticker.price` in a per-pair response.
fn extract_pair_price(body: &Value) -> Result<f64, FetchError> {
    body.get("ticker")
        .and_then(|ticker| ticker.get("price"))
        .and_then(price_value)
        .ok_or(FetchError::MissingPrice)
}

// Price at `{FIAT}.last` in a ticker response.
fn extract_ticker_price(body: &Value, fiat: &str) -> Result<f64, FetchError> {
    body.get(fiat)
        .and_then(|entry| entry.get("last"))
        .and_then(price_value)
        .ok_or(FetchError::MissingPrice)
}

// The upstreams encode prices either as a JSON number or as a number
// wrapped in a string, depending on endpoint. Accept both.
fn price_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pair_price_from_string() {
        let body = json!({"ticker": {"price": "123.99"}});
        assert_eq!(extract_pair_price(&body).unwrap(), 123.99);
    }

    #[test]
    fn test_pair_price_from_number() {
        let body = json!({"ticker": {"price": 50000.5}});
        assert_eq!(extract_pair_price(&body).unwrap(), 50000.5);
    }

    #[test]
    fn test_pair_price_missing() {
        let body = json!({"error": "pair not found"});
        assert!(matches!(
            extract_pair_price(&body),
            Err(FetchError::MissingPrice)
        ));
    }

    #[test]
    fn test_pair_price_garbage_string() {
        let body = json!({"ticker": {"price": "not a number"}});
        assert!(matches!(
            extract_pair_price(&body),
            Err(FetchError::MissingPrice)
        ));
    }

    #[test]
    fn test_ticker_price() {
        let body = json!({
            "USD": {"last": 50000.5},
            "EUR": {"last": 46000.0},
            "RUB": {"last": 4500000.25}
        });
        assert_eq!(extract_ticker_price(&body, "USD").unwrap(), 50000.5);
        assert_eq!(extract_ticker_price(&body, "RUB").unwrap(), 4500000.25);
    }

    #[test]
    fn test_ticker_price_missing_fiat() {
        let body = json!({"USD": {"last": 50000.5}});
        assert!(matches!(
            extract_ticker_price(&body, "EUR"),
            Err(FetchError::MissingPrice)
        ));
    }

    #[test]
    fn test_rate_truncates_never_rounds() {
        let rate = CurrencyRate::from_values("BTC", [123.99, 45.5, 4500000.75]).unwrap();
        assert_eq!(
            rate,
            CurrencyRate {
                usd: 123,
                eur: 45,
                rub: 4500000,
            }
        );
    }

    #[test]
    fn test_all_zero_is_unknown_asset() {
        let result = CurrencyRate::from_values("ZZZ", [0.0, 0.0, 0.0]);
        match result {
            Err(FetchError::UnknownAsset(code)) => assert_eq!(code, "ZZZ"),
            other => panic!("expected UnknownAsset, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_unit_prices_count_as_zero() {
        // 0.9 truncates to 0, so an asset worth less than one unit in
        // every fiat is indistinguishable from an unknown one.
        let result = CurrencyRate::from_values("DOGE", [0.9, 0.8, 0.7]);
        assert!(matches!(result, Err(FetchError::UnknownAsset(_))));
    }

    #[test]
    fn test_partial_zero_is_ok() {
        let rate = CurrencyRate::from_values("BTC", [50000.0, 0.0, 0.0]).unwrap();
        assert_eq!(rate.usd, 50000);
        assert_eq!(rate.eur, 0);
        assert_eq!(rate.rub, 0);
    }
}
