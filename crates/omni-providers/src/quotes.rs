//! Stock quotes and price history from the Yahoo Finance chart API.
//!
//! One chart request supplies the price bars and most headline numbers.
//! Market cap and P/E come from a separate quote request that is allowed to
//! fail; those fields then show as unavailable.

use crate::http::ApiClient;
use crate::traits::QuoteProvider;
use async_trait::async_trait;
use chrono::DateTime;
use omni_common::{
    ChartPeriod, ExtendedHours, Lookup, OmniError, PriceHistory, PricePoint, Result,
    StockQuote, StockSnapshot, Ticker, TradingSession,
};
use omni_config::StocksConfig;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const PROVIDER: &str = "Quotes";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    long_name: Option<String>,
    short_name: Option<String>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
    regular_market_volume: Option<f64>,
    current_trading_period: Option<TradingPeriods>,
}

#[derive(Debug, Deserialize)]
struct TradingPeriods {
    regular: Option<SessionWindow>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct SessionWindow {
    start: i64,
    end: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteSeries {
    open: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<QuoteFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteFields {
    market_cap: Option<f64>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<f64>,
}

/// Figures that only the quote endpoint reports.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fundamentals {
    /// Market capitalization in dollars.
    pub market_cap: Option<u64>,
    /// Trailing price to earnings.
    pub pe_ratio: Option<f64>,
}

/// Parses a `v7/finance/quote` body.
pub fn parse_fundamentals(body: &str) -> Result<Fundamentals> {
    let envelope: QuoteEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .quote_response
        .result
        .into_iter()
        .next()
        .map(|fields| Fundamentals {
            market_cap: fields
                .market_cap
                .filter(|cap| cap.is_finite() && *cap >= 0.0)
                .map(|cap| cap as u64),
            pe_ratio: fields.trailing_pe.filter(|pe| pe.is_finite()),
        })
        .unwrap_or_default())
}

/// Builds a snapshot from a `v8/finance/chart` body.
///
/// `Ok(None)` means the symbol is unknown or the period has no bars.
pub fn snapshot_from_chart(
    ticker: &Ticker,
    period: ChartPeriod,
    body: &str,
    fundamentals: Fundamentals,
) -> Result<Option<StockSnapshot>> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return match envelope.chart.error {
            Some(ChartApiError { code: Some(code), .. }) if code == "Not Found" => Ok(None),
            Some(ChartApiError { description, code }) => Err(OmniError::provider(
                PROVIDER,
                description
                    .or(code)
                    .unwrap_or_else(|| "Chart request failed".to_string()),
            )),
            None => Ok(None),
        };
    };

    let history = build_history(period, &result);
    if history.is_empty() {
        return Ok(None);
    }

    Ok(Some(build_snapshot(ticker, period, result.meta, history, fundamentals)))
}

fn build_history(period: ChartPeriod, result: &ChartResult) -> PriceHistory {
    let regular = result
        .meta
        .current_trading_period
        .as_ref()
        .and_then(|periods| periods.regular);
    let series = result.indicators.quote.first();

    let points = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let series = series?;
            let close = (*series.close.get(i)?)?;
            let open = series.open.get(i).copied().flatten();
            let session = if period == ChartPeriod::OneDay {
                classify_session(ts, regular)
            } else {
                TradingSession::Regular
            };

            Some(PricePoint {
                timestamp: DateTime::from_timestamp(ts, 0)?,
                open,
                close,
                session,
            })
        })
        .collect();

    let previous_close = if period == ChartPeriod::OneDay {
        result
            .meta
            .previous_close
            .or(result.meta.chart_previous_close)
    } else {
        None
    };

    PriceHistory {
        points,
        previous_close,
    }
}

fn classify_session(timestamp: i64, regular: Option<SessionWindow>) -> TradingSession {
    match regular {
        Some(window) if timestamp < window.start => TradingSession::Pre,
        Some(window) if timestamp >= window.end => TradingSession::Post,
        _ => TradingSession::Regular,
    }
}

fn build_snapshot(
    ticker: &Ticker,
    period: ChartPeriod,
    meta: ChartMeta,
    history: PriceHistory,
    fundamentals: Fundamentals,
) -> StockSnapshot {
    let last_regular = history
        .points
        .iter()
        .rev()
        .find(|p| p.session == TradingSession::Regular);

    let current_price = meta
        .regular_market_price
        .or_else(|| last_regular.map(|p| p.close))
        .or_else(|| history.last_close())
        .unwrap_or_default();

    let baseline = if period == ChartPeriod::OneDay {
        history.previous_close.unwrap_or(current_price)
    } else {
        history.first_close().unwrap_or(current_price)
    };

    let change = current_price - baseline;
    let change_pct = percent(change, baseline);

    let open_price = if period == ChartPeriod::OneDay {
        history
            .points
            .iter()
            .find(|p| p.session == TradingSession::Regular)
            .or_else(|| history.points.first())
            .and_then(|p| p.open)
    } else {
        history.points.last().and_then(|p| p.open)
    };

    let extended = if period == ChartPeriod::OneDay {
        history.points.last().and_then(|last| {
            let label = match last.session {
                TradingSession::Pre => "Pre-market",
                TradingSession::Post => "After hours",
                TradingSession::Regular => return None,
            };
            let move_since_close = last.close - current_price;
            Some(ExtendedHours {
                label: label.to_string(),
                price: last.close,
                change: move_since_close,
                change_pct: percent(move_since_close, current_price),
            })
        })
    } else {
        None
    };

    let name = meta
        .long_name
        .or(meta.short_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| ticker.to_string());

    let quote = StockQuote {
        ticker: ticker.clone(),
        name,
        current_price,
        change,
        change_pct,
        open_price,
        volume: meta
            .regular_market_volume
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64),
        market_cap: fundamentals.market_cap,
        high_52w: meta.fifty_two_week_high,
        low_52w: meta.fifty_two_week_low,
        pe_ratio: fundamentals.pe_ratio,
        extended,
    };

    StockSnapshot {
        ticker: ticker.clone(),
        period,
        quote,
        history,
    }
}

fn percent(change: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        change / base * 100.0
    }
}

/// Quote client for Yahoo Finance
pub struct YahooQuoteClient {
    http: Arc<ApiClient>,
    config: StocksConfig,
}

impl YahooQuoteClient {
    /// Create a client sharing `http`
    pub fn new(http: Arc<ApiClient>, config: StocksConfig) -> Self {
        Self { http, config }
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    async fn fetch_chart(&self, ticker: &Ticker, period: ChartPeriod) -> Result<String> {
        let url = format!("{}/v8/finance/chart/{}", self.base(), ticker);
        let query = [
            ("range", period.range()),
            ("interval", period.interval()),
            (
                "includePrePost",
                if period.includes_extended_hours() {
                    "true"
                } else {
                    "false"
                },
            ),
        ];

        self.http
            .request_text(PROVIDER, |client| {
                client
                    .get(&url)
                    .header(reqwest::header::USER_AGENT, &self.config.user_agent)
                    .query(&query)
            })
            .await
    }

    async fn fetch_fundamentals(&self, ticker: &Ticker) -> Fundamentals {
        let url = format!("{}/v7/finance/quote", self.base());
        let result = self
            .http
            .request_text(PROVIDER, |client| {
                client
                    .get(&url)
                    .header(reqwest::header::USER_AGENT, &self.config.user_agent)
                    .query(&[("symbols", ticker.as_str())])
            })
            .await
            .and_then(|body| parse_fundamentals(&body));

        result.unwrap_or_else(|e| {
            debug!("Fundamentals unavailable for {}: {}", ticker, e);
            Fundamentals::default()
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteClient {
    #[instrument(skip(self, ticker), fields(ticker = %ticker))]
    async fn fetch_snapshot(
        &self,
        ticker: &Ticker,
        period: ChartPeriod,
    ) -> Lookup<StockSnapshot> {
        info!("Fetching stock snapshot");

        let (chart, fundamentals) =
            tokio::join!(self.fetch_chart(ticker, period), self.fetch_fundamentals(ticker));

        let result =
            chart.and_then(|body| snapshot_from_chart(ticker, period, &body, fundamentals));

        if let Err(e) = &result {
            if e.status_code() != Some(404) {
                warn!("Quote lookup failed: {}", e);
            }
        }

        Lookup::from_result(result)
    }
}
