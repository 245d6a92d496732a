//! Collaborator traits the command layer depends on.
//!
//! Each call reports a [`Lookup`] instead of an error: the commands only
//! need to know whether there is something to show, nothing to show, or a
//! failure worth telling the user about.

use async_trait::async_trait;
use omni_common::{ChartPeriod, Lookup, OddsEvent, Sport, StockSnapshot, TeamInjuries, Ticker};

/// Source of betting lines.
#[async_trait]
pub trait OddsProvider: Send + Sync {
    /// Upcoming and live games for `sport`, in provider order.
    async fn fetch_events(&self, sport: Sport) -> Lookup<Vec<OddsEvent>>;
}

/// Source of injury reports.
#[async_trait]
pub trait InjuryProvider: Send + Sync {
    /// Injury report for every team in `sport`.
    async fn fetch_injuries(&self, sport: Sport) -> Lookup<Vec<TeamInjuries>>;
}

/// Question answering backend.
#[async_trait]
pub trait AssistantProvider: Send + Sync {
    /// Free-text answer to `query`.
    async fn ask(&self, query: &str) -> Lookup<String>;
}

/// Source of stock quotes and price history.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Quote plus price bars for `ticker` over `period`.
    async fn fetch_snapshot(&self, ticker: &Ticker, period: ChartPeriod)
        -> Lookup<StockSnapshot>;
}
