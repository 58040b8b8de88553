use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{header, StatusCode};
use serde_json::{Number, Value};
use yahoo_finance_api as yahoo;

use super::constants::market::{DAILY_INTERVAL, LATEST_RANGE};

#[derive(thiserror::Error, Debug)]
pub enum MarketError {
    #[error("Request failed: {0}")]
    Transport(reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),
    #[error("Market data error for {symbol}: {message}")]
    Provider { symbol: String, message: String },
    #[error("No price data for {0}")]
    NoData(String),
    #[error("Failed to set up market data client: {0}")]
    Connector(String),
}

impl From<reqwest::Error> for MarketError {
    fn from(request_error: reqwest::Error) -> MarketError {
        MarketError::Transport(request_error)
    }
}

// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

// Source of historical daily closes.
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn daily_closes(&self, symbol: &str, range: &str)
        -> Result<Vec<PricePoint>, MarketError>;
}

/* Yahoo Finance backed market data.
 * `range` takes Yahoo's range strings, e.g. "1d", "5d", "1mo".
 */
pub struct YahooMarketData {
    connector: yahoo::YahooConnector,
}

impl YahooMarketData {
    pub fn new() -> Result<Self, MarketError> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|err| MarketError::Connector(err.to_string()))?;

        Ok(Self { connector })
    }
}

#[async_trait]
impl MarketData for YahooMarketData {
    async fn daily_closes(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<Vec<PricePoint>, MarketError> {
        log::debug!("Fetching {} daily closes for {}", range, symbol);

        let response = self
            .connector
            .get_quote_range(symbol, DAILY_INTERVAL, range)
            .await
            .map_err(|err| MarketError::Provider {
                symbol: symbol.to_string(),
                message: err.to_string(),
            })?;

        closes_from_quotes(symbol, response.quotes())
    }
}

/* Turns Yahoo quotes into a sorted close series.
 * Yahoo reports a range without trading data as an error; that is an empty series here.
 * Rows without a finite close are skipped.
 */
fn closes_from_quotes(
    symbol: &str,
    quotes: Result<Vec<yahoo::Quote>, yahoo::YahooError>,
) -> Result<Vec<PricePoint>, MarketError> {
    let quotes = match quotes {
        Ok(quotes) => quotes,
        Err(yahoo::YahooError::NoResult) | Err(yahoo::YahooError::NoQuotes) => {
            log::warn!("Yahoo returned no quotes for {}", symbol);
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(MarketError::Provider {
                symbol: symbol.to_string(),
                message: err.to_string(),
            })
        }
    };

    let mut points: Vec<PricePoint> = quotes
        .iter()
        .filter(|quote| quote.close.is_finite())
        .filter_map(|quote| {
            Utc.timestamp_opt(quote.timestamp, 0)
                .single()
                .map(|timestamp| PricePoint {
                    timestamp,
                    close: quote.close,
                })
        })
        .collect();
    points.sort_by_key(|point| point.timestamp);

    Ok(points)
}

// Fetches the Bitcoin/USD spot price from a CoinGecko style endpoint.
// The number is returned as the provider wrote it.
pub async fn fetch_bitcoin_price(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Number, MarketError> {
    let response = client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .timeout(timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(MarketError::Status(status));
    }

    let body: Value = response.json().await?;
    parse_bitcoin_price(&body)
}

// Extracts `bitcoin.usd` from a simple price response.
pub fn parse_bitcoin_price(body: &Value) -> Result<Number, MarketError> {
    match body.get("bitcoin").and_then(|coin| coin.get("usd")) {
        Some(Value::Number(price)) => Ok(price.clone()),
        _ => Err(MarketError::UnexpectedFormat(body.to_string())),
    }
}

// Latest daily close of a ticker. An empty series is an error.
pub async fn fetch_latest_close<M: MarketData + ?Sized>(
    market: &M,
    symbol: &str,
) -> Result<f64, MarketError> {
    let closes = market.daily_closes(symbol, LATEST_RANGE).await?;
    closes
        .last()
        .map(|point| point.close)
        .ok_or_else(|| MarketError::NoData(symbol.to_string()))
}
