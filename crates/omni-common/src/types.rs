//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::{OmniError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A league the odds and injury commands know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    /// National Football League.
    Nfl,
    /// National Basketball Association.
    Nba,
    /// Major League Baseball.
    Mlb,
}

impl Sport {
    /// Every supported sport, in the order they are offered to users.
    pub const ALL: [Sport; 3] = [Sport::Nfl, Sport::Nba, Sport::Mlb];

    /// Lowercase code used in commands and URLs.
    pub fn code(self) -> &'static str {
        match self {
            Sport::Nfl => "nfl",
            Sport::Nba => "nba",
            Sport::Mlb => "mlb",
        }
    }

    /// League acronym for display.
    pub fn display_name(self) -> &'static str {
        match self {
            Sport::Nfl => "NFL",
            Sport::Nba => "NBA",
            Sport::Mlb => "MLB",
        }
    }

    /// Odds provider `(sport_id, league_id)` pair.
    pub fn odds_ids(self) -> (u32, u32) {
        match self {
            Sport::Nfl => (7, 889),
            Sport::Nba => (3, 487),
            Sport::Mlb => (9, 246),
        }
    }

    /// Embed title for the betting lines command.
    pub fn lines_title(self) -> String {
        format!("{} Lines", self.display_name())
    }

    /// Embed title for the injury report command.
    pub fn injuries_title(self) -> String {
        format!("{} Injuries", self.display_name())
    }

    /// Comma separated list of accepted codes, for error messages.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|sport| sport.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sport {
    type Err = OmniError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sport| sport.code() == wanted)
            .ok_or_else(|| {
                OmniError::validation_field(
                    format!("Invalid sport. Choose from: {}", Self::choices()),
                    "sport",
                )
            })
    }
}

/// Time span shown by the stock command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartPeriod {
    /// Today, intraday with extended hours.
    #[default]
    OneDay,
    /// Last five sessions, intraday with extended hours.
    FiveDays,
    /// One month of daily bars.
    OneMonth,
    /// Three months of daily bars.
    ThreeMonths,
    /// Six months of daily bars.
    SixMonths,
    /// One year of daily bars.
    OneYear,
    /// Five years of daily bars.
    FiveYears,
}

impl ChartPeriod {
    /// Every supported period, in the order they are offered to users.
    pub const ALL: [ChartPeriod; 7] = [
        ChartPeriod::OneDay,
        ChartPeriod::FiveDays,
        ChartPeriod::OneMonth,
        ChartPeriod::ThreeMonths,
        ChartPeriod::SixMonths,
        ChartPeriod::OneYear,
        ChartPeriod::FiveYears,
    ];

    /// User-facing code. `m` means months here.
    pub fn code(self) -> &'static str {
        match self {
            ChartPeriod::OneDay => "1d",
            ChartPeriod::FiveDays => "5d",
            ChartPeriod::OneMonth => "1m",
            ChartPeriod::ThreeMonths => "3m",
            ChartPeriod::SixMonths => "6m",
            ChartPeriod::OneYear => "1y",
            ChartPeriod::FiveYears => "5y",
        }
    }

    /// Range code understood by the quote provider.
    pub fn range(self) -> &'static str {
        match self {
            ChartPeriod::OneMonth => "1mo",
            ChartPeriod::ThreeMonths => "3mo",
            ChartPeriod::SixMonths => "6mo",
            other => other.code(),
        }
    }

    /// Bar interval requested from the quote provider.
    pub fn interval(self) -> &'static str {
        match self {
            ChartPeriod::OneDay => "5m",
            ChartPeriod::FiveDays => "30m",
            _ => "1d",
        }
    }

    /// Whether pre and post market bars are requested.
    pub fn includes_extended_hours(self) -> bool {
        matches!(self, ChartPeriod::OneDay | ChartPeriod::FiveDays)
    }

    /// Phrase used after the change figure, e.g. "past month".
    pub fn phrase(self) -> &'static str {
        match self {
            ChartPeriod::OneDay => "today",
            ChartPeriod::FiveDays => "past 5 days",
            ChartPeriod::OneMonth => "past month",
            ChartPeriod::ThreeMonths => "past 3 months",
            ChartPeriod::SixMonths => "past 6 months",
            ChartPeriod::OneYear => "past year",
            ChartPeriod::FiveYears => "past 5 years",
        }
    }

    /// Comma separated list of accepted codes, for error messages.
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|period| period.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ChartPeriod {
    type Err = OmniError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|period| period.code() == wanted)
            .ok_or_else(|| {
                OmniError::validation_field(
                    format!("Invalid period. Choose from: {}", Self::choices()),
                    "period",
                )
            })
    }
}

/// An upper-cased stock symbol such as `AAPL` or `BRK.B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Longest symbol accepted.
    pub const MAX_LEN: usize = 10;

    /// The symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = OmniError;

    fn from_str(s: &str) -> Result<Self> {
        let symbol = s.trim().to_uppercase();
        let valid_chars = symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

        if symbol.is_empty() || symbol.chars().count() > Self::MAX_LEN || !valid_chars {
            return Err(OmniError::validation_field(
                format!("Invalid ticker symbol: {}", s.trim()),
                "ticker",
            ));
        }
        Ok(Self(symbol))
    }
}

/// Outcome of asking an external collaborator for data.
///
/// Keeps "nothing to show" apart from "could not find out".
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The provider returned usable data.
    Found(T),
    /// The provider answered, but had nothing for this request.
    NotFound,
    /// The provider could not be reached or answered with garbage.
    TransientError(String),
}

impl<T> Lookup<T> {
    /// Classifies a provider call. HTTP 404 counts as "not found".
    pub fn from_result(result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::NotFound,
            Err(e) if e.status_code() == Some(404) => Lookup::NotFound,
            Err(e) => Lookup::TransientError(e.to_string()),
        }
    }
}

impl<T> Lookup<Vec<T>> {
    /// Classifies a provider call returning a collection; empty means not found.
    pub fn from_items(result: Result<Vec<T>>) -> Self {
        Self::from_result(result.map(|items| (!items.is_empty()).then_some(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_parsing_is_case_insensitive() {
        assert_eq!("NFL".parse::<Sport>().unwrap(), Sport::Nfl);
        assert_eq!(" nba ".parse::<Sport>().unwrap(), Sport::Nba);
        assert_eq!("Mlb".parse::<Sport>().unwrap(), Sport::Mlb);
    }

    #[test]
    fn test_invalid_sport_lists_choices() {
        let err = "nhl".parse::<Sport>().unwrap_err();
        assert!(err.to_string().contains("Invalid sport. Choose from: nfl, nba, mlb"));
    }

    #[test]
    fn test_sport_metadata() {
        assert_eq!(Sport::Nfl.odds_ids(), (7, 889));
        assert_eq!(Sport::Mlb.odds_ids(), (9, 246));
        assert_eq!(Sport::Nba.odds_ids(), (3, 487));
        assert_eq!(Sport::Nba.lines_title(), "NBA Lines");
        assert_eq!(Sport::Mlb.injuries_title(), "MLB Injuries");
    }

    #[test]
    fn test_period_codes_and_ranges() {
        let period: ChartPeriod = "3m".parse().unwrap();
        assert_eq!(period, ChartPeriod::ThreeMonths);
        assert_eq!(period.range(), "3mo");
        assert_eq!(period.interval(), "1d");
        assert!(!period.includes_extended_hours());

        assert_eq!(ChartPeriod::OneDay.interval(), "5m");
        assert_eq!(ChartPeriod::FiveDays.interval(), "30m");
        assert!(ChartPeriod::FiveDays.includes_extended_hours());
        assert_eq!(ChartPeriod::default(), ChartPeriod::OneDay);
    }

    #[test]
    fn test_invalid_period() {
        let err = "2w".parse::<ChartPeriod>().unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid period. Choose from: 1d, 5d, 1m, 3m, 6m, 1y, 5y"));
        assert!("1mo".parse::<ChartPeriod>().is_err());
    }

    #[test]
    fn test_ticker_validation() {
        assert_eq!("aapl".parse::<Ticker>().unwrap().as_str(), "AAPL");
        assert_eq!(" brk.b ".parse::<Ticker>().unwrap().as_str(), "BRK.B");
        assert_eq!("^gspc".parse::<Ticker>().unwrap().as_str(), "^GSPC");
        assert!("".parse::<Ticker>().is_err());
        assert!("AAPL; DROP".parse::<Ticker>().is_err());
        assert!("ABCDEFGHIJK".parse::<Ticker>().is_err());
    }

    #[test]
    fn test_lookup_classification() {
        let found: Lookup<u8> = Lookup::from_result(Ok(Some(3)));
        assert_eq!(found, Lookup::Found(3));

        let missing: Lookup<u8> = Lookup::from_result(Ok(None));
        assert_eq!(missing, Lookup::NotFound);

        let gone: Lookup<u8> =
            Lookup::from_result(Err(OmniError::provider_with_status("Quotes", "gone", 404)));
        assert_eq!(gone, Lookup::NotFound);

        let failed: Lookup<u8> = Lookup::from_result(Err(OmniError::network("timed out")));
        assert!(matches!(failed, Lookup::TransientError(reason) if reason.contains("timed out")));
    }

    #[test]
    fn test_lookup_from_items() {
        assert_eq!(Lookup::from_items(Ok(Vec::<u8>::new())), Lookup::NotFound);
        assert_eq!(Lookup::from_items(Ok(vec![1u8])), Lookup::Found(vec![1]));
    }
}
