//! Yahoo Finance data fetcher
//!
//! Spot quotes, option expirations, call chains and weekly price history
//! from Yahoo Finance's unofficial JSON API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

use super::source::MarketDataSource;
use crate::core::{
    Contract, HistoricalSample, HistoricalSeries, LeapError, LeapResult, Lookback,
};

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const TIMEOUT_SECS: u64 = 30;

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> LeapResult<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Client against a different host (e.g., query2 or a local mock)
    pub fn with_base_url(base_url: impl Into<String>) -> LeapResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| LeapError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> LeapResult<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LeapError::network(e.to_string()))?;

        if let Some(err) = status_error(response.status(), url) {
            return Err(err);
        }

        response
            .json()
            .map_err(|e| LeapError::data_unavailable(format!("Failed to parse {}: {}", url, e)))
    }

    /// Get current market price for a symbol
    pub fn get_quote(&self, symbol: &str) -> LeapResult<f64> {
        let url = format!("{}/v7/finance/quote?symbols={}", self.base_url, symbol);
        let response: YahooQuoteResponse = self.get_json(&url)?;
        parse_quote(response, symbol)
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> LeapResult<Vec<NaiveDate>> {
        let url = format!("{}/v7/finance/options/{}", self.base_url, symbol);
        let response: YahooOptionsResponse = self.get_json(&url)?;
        parse_expirations(response, symbol)
    }

    /// Get call listings for a specific expiration
    pub fn get_call_chain(&self, symbol: &str, expiry: NaiveDate) -> LeapResult<Vec<Contract>> {
        // Yahoo keys expirations by midnight UTC of the expiry date
        let expiry_ts = expiry
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| LeapError::invalid_parameter(format!("bad expiry {}", expiry)))?;

        let url = format!(
            "{}/v7/finance/options/{}?date={}",
            self.base_url, symbol, expiry_ts
        );
        let response: YahooOptionsResponse = self.get_json(&url)?;
        parse_calls(response, symbol, expiry)
    }

    /// Get weekly bars with dividend events for the lookback window
    pub fn get_weekly_history(&self, symbol: &str, lookback: Lookback) -> LeapResult<HistoricalSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1wk&events=div",
            self.base_url,
            symbol,
            lookback.range_param()
        );
        let response: YahooChartResponse = self.get_json(&url)?;
        let series = parse_history(response, symbol)?;

        tracing::info!(
            "Fetched {} weekly bars for {} ({})",
            series.len(),
            symbol,
            lookback
        );
        Ok(series)
    }
}

impl MarketDataSource for YahooClient {
    fn spot_price(&self, symbol: &str) -> LeapResult<f64> {
        self.get_quote(symbol)
    }

    fn expirations(&self, symbol: &str) -> LeapResult<Vec<NaiveDate>> {
        self.get_expirations(symbol)
    }

    fn call_chain(&self, symbol: &str, expiry: NaiveDate) -> LeapResult<Vec<Contract>> {
        self.get_call_chain(symbol, expiry)
    }

    fn weekly_history(&self, symbol: &str, lookback: Lookback) -> LeapResult<HistoricalSeries> {
        self.get_weekly_history(symbol, lookback)
    }
}

/// Map an HTTP error status. Client errors mean the request itself is bad
/// (e.g., unknown symbol) except 429, which clears on its own.
fn status_error(status: reqwest::StatusCode, url: &str) -> Option<LeapError> {
    if status.is_success() {
        None
    } else if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
        Some(LeapError::data_unavailable(format!("HTTP {} from {}", status, url)))
    } else {
        Some(LeapError::network(format!("HTTP {} from {}", status, url)))
    }
}

fn parse_quote(response: YahooQuoteResponse, symbol: &str) -> LeapResult<f64> {
    let quote = response
        .quote_response
        .result
        .into_iter()
        .next()
        .ok_or_else(|| LeapError::data_unavailable(format!("No quote data returned for {}", symbol)))?;

    quote
        .regular_market_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| LeapError::data_unavailable(format!("No market price for {}", symbol)))
}

fn first_chain(response: YahooOptionsResponse, symbol: &str) -> LeapResult<YahooOptionChainData> {
    response
        .option_chain
        .result
        .into_iter()
        .next()
        .ok_or_else(|| LeapError::data_unavailable(format!("No options data returned for {}", symbol)))
}

fn parse_expirations(response: YahooOptionsResponse, symbol: &str) -> LeapResult<Vec<NaiveDate>> {
    let chain = first_chain(response, symbol)?;

    let mut expiries: Vec<NaiveDate> = chain
        .expiration_dates
        .iter()
        .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
        .collect();
    expiries.sort();
    expiries.dedup();

    Ok(expiries)
}

fn parse_calls(response: YahooOptionsResponse, symbol: &str, expiry: NaiveDate) -> LeapResult<Vec<Contract>> {
    let chain = first_chain(response, symbol)?;

    let options = chain.options.into_iter().next().ok_or_else(|| {
        LeapError::data_unavailable(format!("No chain for {} expiring {}", symbol, expiry))
    })?;

    let mut calls: Vec<Contract> = options
        .calls
        .into_iter()
        .filter_map(|data| convert_call(data, expiry))
        .collect();
    calls.sort_by(|a, b| a.strike.total_cmp(&b.strike));

    Ok(calls)
}

/// Convert Yahoo option data to a contract; listings without a strike are skipped
fn convert_call(data: YahooOptionData, expiry: NaiveDate) -> Option<Contract> {
    let strike = data.strike?;

    let mut contract = Contract::new(expiry, strike).with_quote(data.bid, data.ask);
    contract.volume = data.volume.and_then(|v| u64::try_from(v).ok());
    contract.last_trade = data
        .last_trade_date
        .and_then(|ts| DateTime::from_timestamp(ts, 0));
    contract.contract_symbol = data.contract_symbol;

    Some(contract)
}

fn parse_history(response: YahooChartResponse, symbol: &str) -> LeapResult<HistoricalSeries> {
    if let Some(err) = response.chart.error {
        return Err(LeapError::data_unavailable(format!(
            "{}: {}",
            err.code.unwrap_or_default(),
            err.description.unwrap_or_default()
        )));
    }

    let data = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| LeapError::data_unavailable(format!("No history returned for {}", symbol)))?;

    let timestamps = data.timestamp.unwrap_or_default();
    let closes = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let dividends: Vec<(i64, f64)> = data
        .events
        .and_then(|e| e.dividends)
        .map(|divs| divs.into_values().map(|d| (d.date, d.amount)).collect())
        .unwrap_or_default();

    let mut samples = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let close = match closes.get(i).copied().flatten() {
            Some(c) => c,
            None => continue,
        };
        let timestamp = match DateTime::<Utc>::from_timestamp(ts, 0) {
            Some(t) => t,
            None => continue,
        };

        // A dividend belongs to the bar whose week it falls in
        let week_end = timestamps
            .get(i + 1)
            .copied()
            .unwrap_or(ts + Duration::weeks(1).num_seconds());
        let dividend: f64 = dividends
            .iter()
            .filter(|(date, _)| *date >= ts && *date < week_end)
            .map(|(_, amount)| amount)
            .sum();

        samples.push(HistoricalSample::new(timestamp, close).with_dividend(dividend));
    }

    samples.sort_by_key(|s| s.timestamp);
    Ok(HistoricalSeries::new(symbol, samples))
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "lastTradeDate")]
    last_trade_date: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartData>>,
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    timestamp: Option<Vec<i64>>,
    events: Option<YahooChartEvents>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooChartEvents {
    dividends: Option<HashMap<String, YahooDividend>>,
}

#[derive(Debug, Deserialize)]
struct YahooDividend {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooBars>,
}

#[derive(Debug, Deserialize)]
struct YahooBars {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
