//! Test utilities and shared fixtures for Omni Bot.
//!
//! Enabled with the `testing` feature so the other crates can build their
//! tests on the same sample games, injury reports and stock snapshots.

use crate::models::{
    ExtendedHours, Moneyline, OddsEvent, PlayerInjury, PriceHistory, PricePoint, Spread,
    StockQuote, StockSnapshot, TeamInjuries, Total, TradingSession,
};
use crate::types::{ChartPeriod, Ticker};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a fixed timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sample betting data.
pub mod odds_fixtures {
    use super::*;

    /// A pre-game event with every market present.
    pub fn sample_event(home: &str, away: &str) -> OddsEvent {
        OddsEvent {
            home: home.to_string(),
            away: away.to_string(),
            starts: mock_timestamp(2026, 10, 19, 17, 0, 0),
            live: false,
            moneyline: Some(Moneyline {
                home: Some(1.5),
                away: Some(2.8),
            }),
            spread: Some(Spread {
                handicap: -3.5,
                home: Some(1.91),
                away: Some(2.0),
            }),
            total: Some(Total {
                points: 47.5,
                over: Some(1.95),
                under: Some(1.9),
            }),
        }
    }

    /// `count` distinct events.
    pub fn sample_slate(count: usize) -> Vec<OddsEvent> {
        (0..count)
            .map(|i| sample_event(&format!("Home Team {i}"), &format!("Away Team {i}")))
            .collect()
    }
}

/// Sample injury reports.
pub mod injury_fixtures {
    use super::*;

    /// One player row.
    pub fn player(name: &str, status: &str) -> PlayerInjury {
        PlayerInjury {
            name: name.to_string(),
            position: "WR".to_string(),
            return_date: "Oct 26".to_string(),
            status: status.to_string(),
            comment: "Hamstring".to_string(),
        }
    }

    /// A team with one minor and one serious injury.
    pub fn sample_team(team: &str) -> TeamInjuries {
        TeamInjuries {
            team: team.to_string(),
            players: vec![
                player("A. Receiver", "Questionable"),
                player("B. Lineman", "Out"),
            ],
        }
    }
}

/// Sample market data.
pub mod stock_fixtures {
    use super::*;

    /// A quote for `symbol` up 1.5% on the day.
    pub fn sample_quote(symbol: &str) -> StockQuote {
        StockQuote {
            ticker: symbol.parse::<Ticker>().unwrap(),
            name: "Apple Inc.".to_string(),
            current_price: 182.4,
            change: 2.7,
            change_pct: 1.5,
            open_price: Some(180.1),
            volume: Some(51_234_567),
            market_cap: Some(2_891_200_000_000),
            high_52w: Some(199.62),
            low_52w: Some(164.08),
            pe_ratio: Some(28.46),
            extended: None,
        }
    }

    /// An after-hours move for the sample quote.
    pub fn sample_extended() -> ExtendedHours {
        ExtendedHours {
            label: "After hours".to_string(),
            price: 181.9,
            change: -0.5,
            change_pct: -0.27,
        }
    }

    /// `count` five-minute bars of a gently rising regular session.
    pub fn sample_history(count: usize) -> PriceHistory {
        let start = mock_timestamp(2026, 10, 16, 13, 30, 0);
        let points = (0..count)
            .map(|i| PricePoint {
                timestamp: start + Duration::minutes(5 * i as i64),
                open: Some(180.0 + i as f64 * 0.05),
                close: 180.0 + i as f64 * 0.05 + (i as f64).sin() * 0.3,
                session: TradingSession::Regular,
            })
            .collect();

        PriceHistory {
            points,
            previous_close: Some(179.7),
        }
    }

    /// A one-day snapshot with a full regular session.
    pub fn sample_snapshot(symbol: &str) -> StockSnapshot {
        let quote = sample_quote(symbol);
        StockSnapshot {
            ticker: quote.ticker.clone(),
            period: ChartPeriod::OneDay,
            quote,
            history: sample_history(78),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_mock_timestamp() {
        let timestamp = mock_timestamp(2024, 1, 1, 12, 0, 0);
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.month(), 1);
        assert_eq!(timestamp.day(), 1);
        assert_eq!(timestamp.hour(), 12);
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_fixtures_are_consistent() {
        let snapshot = stock_fixtures::sample_snapshot("aapl");
        assert_eq!(snapshot.ticker.as_str(), "AAPL");
        assert_eq!(snapshot.history.points.len(), 78);
        assert!(snapshot
            .history
            .points
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));

        assert_eq!(odds_fixtures::sample_slate(3).len(), 3);
        assert_eq!(injury_fixtures::sample_team("Bears").players.len(), 2);
    }
}
