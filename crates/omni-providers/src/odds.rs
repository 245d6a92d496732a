//! Betting lines from the Pinnacle odds API on RapidAPI.

use crate::http::ApiClient;
use crate::traits::OddsProvider;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use omni_common::{Lookup, Moneyline, OddsEvent, Result, Sport, Spread, Total};
use omni_config::OddsConfig;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const PROVIDER: &str = "Odds API";

/// Market type for MLB side props that carry no game lines.
const SKIPPED_RESULTING_UNIT: &str = "Hits + Runs + Errors";

const STARTS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
struct MarketsResponse {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    home: String,
    away: String,
    starts: String,
    #[serde(default)]
    event_type: Option<String>,
    #[serde(default)]
    resulting_unit: Option<String>,
    #[serde(default)]
    periods: Option<RawPeriods>,
}

#[derive(Debug, Deserialize)]
struct RawPeriods {
    num_0: Option<RawPeriod>,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    money_line: Option<RawMoneyline>,
    spreads: Option<Map<String, Value>>,
    totals: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawMoneyline {
    home: Option<f64>,
    away: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSpread {
    hdp: f64,
    home: Option<f64>,
    away: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTotal {
    points: f64,
    over: Option<f64>,
    under: Option<f64>,
}

/// Parses a `kit/v1/markets` response into events.
///
/// Events with an unparseable start time are dropped with a warning; side
/// markets (`Hits + Runs + Errors`) are dropped silently.
pub fn parse_markets(body: &str) -> Result<Vec<OddsEvent>> {
    let response: MarketsResponse = serde_json::from_str(body)?;

    Ok(response
        .events
        .into_iter()
        .filter(|event| event.resulting_unit.as_deref() != Some(SKIPPED_RESULTING_UNIT))
        .filter_map(convert_event)
        .collect())
}

fn convert_event(raw: RawEvent) -> Option<OddsEvent> {
    let starts = match NaiveDateTime::parse_from_str(&raw.starts, STARTS_FORMAT) {
        Ok(naive) => naive.and_utc(),
        Err(e) => {
            warn!(home = %raw.home, away = %raw.away, starts = %raw.starts, "Dropping event with bad start time: {}", e);
            return None;
        }
    };

    let period = raw.periods.and_then(|periods| periods.num_0);
    let (moneyline, spread, total) = match period {
        Some(period) => (
            period
                .money_line
                .filter(|ml| ml.home.is_some() || ml.away.is_some())
                .map(|ml| Moneyline {
                    home: ml.home,
                    away: ml.away,
                }),
            first_market::<RawSpread>(period.spreads.as_ref()).map(|s| Spread {
                handicap: s.hdp,
                home: s.home,
                away: s.away,
            }),
            first_market::<RawTotal>(period.totals.as_ref()).map(|t| Total {
                points: t.points,
                over: t.over,
                under: t.under,
            }),
        ),
        None => (None, None, None),
    };

    Some(OddsEvent {
        home: raw.home,
        away: raw.away,
        starts,
        live: raw.event_type.as_deref() == Some("live"),
        moneyline,
        spread,
        total,
    })
}

/// Main line of a keyed market map: the first entry in document order.
fn first_market<T: for<'de> Deserialize<'de>>(markets: Option<&Map<String, Value>>) -> Option<T> {
    let (key, value) = markets?.iter().next()?;
    match serde_json::from_value(value.clone()) {
        Ok(market) => Some(market),
        Err(e) => {
            debug!(key = %key, "Skipping malformed market: {}", e);
            None
        }
    }
}

/// Odds client for the RapidAPI Pinnacle feed
pub struct PinnacleOddsClient {
    http: Arc<ApiClient>,
    config: OddsConfig,
}

impl PinnacleOddsClient {
    /// Create a client sharing `http`
    pub fn new(http: Arc<ApiClient>, config: OddsConfig) -> Self {
        Self { http, config }
    }

    fn markets_url(&self) -> String {
        format!("{}/kit/v1/markets", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl OddsProvider for PinnacleOddsClient {
    #[instrument(skip(self))]
    async fn fetch_events(&self, sport: Sport) -> Lookup<Vec<OddsEvent>> {
        info!("Fetching {} lines", sport.display_name());

        let url = self.markets_url();
        let (sport_id, league_id) = sport.odds_ids();
        let query = [
            ("sport_id", sport_id.to_string()),
            ("is_have_odds", "true".to_string()),
            ("league_ids", league_id.to_string()),
        ];

        let result = self
            .http
            .request_text(PROVIDER, |client| {
                client
                    .get(&url)
                    .header("x-rapidapi-key", &self.config.api_key)
                    .header("x-rapidapi-host", &self.config.api_host)
                    .query(&query)
            })
            .await
            .and_then(|body| parse_markets(&body));

        if let Err(e) = &result {
            warn!("Odds lookup failed: {}", e);
        }

        Lookup::from_items(result)
    }
}
