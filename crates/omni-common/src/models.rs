//! Data records handed from the providers to the formatting core.
//!
//! Every record here is an immutable snapshot already validated at the
//! provider boundary; optional fields are genuinely optional upstream.

use crate::types::{ChartPeriod, Ticker};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One game with its betting markets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsEvent {
    /// Home team name.
    pub home: String,
    /// Away team name.
    pub away: String,
    /// Scheduled start.
    pub starts: DateTime<Utc>,
    /// Whether the game is in progress.
    pub live: bool,
    /// Full-game moneyline.
    pub moneyline: Option<Moneyline>,
    /// Main spread line.
    pub spread: Option<Spread>,
    /// Main totals line.
    pub total: Option<Total>,
}

/// Moneyline prices in decimal odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moneyline {
    pub home: Option<f64>,
    pub away: Option<f64>,
}

/// Spread line; `handicap` applies to the home side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub handicap: f64,
    pub home: Option<f64>,
    pub away: Option<f64>,
}

/// Totals line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Total {
    pub points: f64,
    pub over: Option<f64>,
    pub under: Option<f64>,
}

/// Injured players of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInjuries {
    pub team: String,
    pub players: Vec<PlayerInjury>,
}

/// One row of an injury report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInjury {
    pub name: String,
    pub position: String,
    pub return_date: String,
    /// Status text as published, e.g. `Out` or `Day-To-Day`.
    pub status: String,
    pub comment: String,
}

/// Two-level injury severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjurySeverity {
    /// Day-to-day or questionable.
    Minor,
    /// Anything else (out, injured reserve, suspension...).
    Serious,
}

impl PlayerInjury {
    /// Severity derived from the published status.
    pub fn severity(&self) -> InjurySeverity {
        match self.status.trim() {
            "Day-To-Day" | "Questionable" => InjurySeverity::Minor,
            _ => InjurySeverity::Serious,
        }
    }
}

/// Trading session a price bar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradingSession {
    Pre,
    Regular,
    Post,
}

/// One price bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub close: f64,
    pub session: TradingSession,
}

/// Price bars for the requested period, oldest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    pub points: Vec<PricePoint>,
    /// Close of the previous session, when the provider reports it.
    pub previous_close: Option<f64>,
}

impl PriceHistory {
    /// Whether no bars were returned.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First close in the period.
    pub fn first_close(&self) -> Option<f64> {
        self.points.first().map(|p| p.close)
    }

    /// Last close in the period.
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Lowest and highest close.
    pub fn close_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.close).fold(None, |acc, close| {
            Some(match acc {
                None => (close, close),
                Some((lo, hi)) => (lo.min(close), hi.max(close)),
            })
        })
    }
}

/// Pre or post market move relative to the regular-session price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedHours {
    /// "Pre-market" or "After hours".
    pub label: String,
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
}

/// Headline figures for a stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub ticker: Ticker,
    /// Company name, or the ticker when the provider has none.
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_pct: f64,
    pub open_price: Option<f64>,
    pub volume: Option<u64>,
    pub market_cap: Option<u64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub extended: Option<ExtendedHours>,
}

/// Everything the stock command needs for one reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub ticker: Ticker,
    pub period: ChartPeriod,
    pub quote: StockQuote,
    pub history: PriceHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(status: &str) -> PlayerInjury {
        PlayerInjury {
            name: "Player".to_string(),
            position: "QB".to_string(),
            return_date: "Oct 20".to_string(),
            status: status.to_string(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_injury_severity() {
        assert_eq!(player("Day-To-Day").severity(), InjurySeverity::Minor);
        assert_eq!(player("Questionable").severity(), InjurySeverity::Minor);
        assert_eq!(player("Out").severity(), InjurySeverity::Serious);
        assert_eq!(player("Injured Reserve").severity(), InjurySeverity::Serious);
        assert_eq!(player("day-to-day").severity(), InjurySeverity::Serious);
    }

    #[test]
    fn test_close_bounds() {
        let mut history = PriceHistory::default();
        assert_eq!(history.close_bounds(), None);

        for (i, close) in [10.0, 12.5, 9.0].into_iter().enumerate() {
            history.points.push(PricePoint {
                timestamp: DateTime::from_timestamp(1_700_000_000 + i as i64 * 300, 0).unwrap(),
                open: None,
                close,
                session: TradingSession::Regular,
            });
        }

        assert_eq!(history.close_bounds(), Some((9.0, 12.5)));
        assert_eq!(history.first_close(), Some(10.0));
        assert_eq!(history.last_close(), Some(9.0));
    }
}
