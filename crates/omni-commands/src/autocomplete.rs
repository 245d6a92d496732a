//! Autocomplete handlers for slash command parameters.

use crate::framework::Context;
use omni_common::{ChartPeriod, Sport};

/// Codes containing `partial`, ignoring case, in their listed order.
pub fn matching_choices<'a, I>(codes: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = partial.trim().to_lowercase();
    codes
        .into_iter()
        .filter(|code| code.to_lowercase().contains(&wanted))
        .map(str::to_string)
        .collect()
}

/// Suggests sport codes.
pub async fn autocomplete_sport(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching_choices(Sport::ALL.iter().map(|sport| sport.code()), partial)
}

/// Suggests chart period codes.
pub async fn autocomplete_period(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching_choices(ChartPeriod::ALL.iter().map(|period| period.code()), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sports(partial: &str) -> Vec<String> {
        matching_choices(Sport::ALL.iter().map(|sport| sport.code()), partial)
    }

    #[test]
    fn test_sport_suggestions() {
        assert_eq!(sports(""), vec!["nfl", "nba", "mlb"]);
        assert_eq!(sports("N"), vec!["nfl", "nba"]);
        assert_eq!(sports("b"), vec!["nba", "mlb"]);
        assert!(sports("nhl").is_empty());
    }

    #[test]
    fn test_period_suggestions() {
        let periods = |partial| {
            matching_choices(ChartPeriod::ALL.iter().map(|period| period.code()), partial)
        };
        assert_eq!(periods("d"), vec!["1d", "5d"]);
        assert_eq!(periods("M"), vec!["1m", "3m", "6m"]);
        assert_eq!(periods("5"), vec!["5d", "5y"]);
    }
}
