//! Betting odds formatting and the text blocks built from provider data.

use crate::models::{InjurySeverity, OddsEvent, TeamInjuries};
use crate::utils::NOT_AVAILABLE;
use std::fmt;
use thiserror::Error;

/// Errors raised while converting odds.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OddsError {
    /// Decimal odds must pay out more than the stake; 1.0 and below have no
    /// American equivalent.
    #[error("Decimal odds must be greater than 1.0, got {0}")]
    InvalidDecimalOdds(f64),
}

/// Odds quoted relative to a 100-unit stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AmericanOdds(i64);

impl AmericanOdds {
    /// Signed value, e.g. `-110` or `150`.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Converts decimal odds to American odds.
///
/// `>= 2.0` gives the underdog form `+((d - 1) * 100)`, anything lower the
/// favourite form `-100 / (d - 1)`. Fractions are truncated toward zero.
pub fn decimal_to_american(decimal_odds: f64) -> Result<AmericanOdds, OddsError> {
    if !decimal_odds.is_finite() || decimal_odds <= 1.0 {
        return Err(OddsError::InvalidDecimalOdds(decimal_odds));
    }

    let raw = if decimal_odds >= 2.0 {
        (decimal_odds - 1.0) * 100.0
    } else {
        -100.0 / (decimal_odds - 1.0)
    };

    Ok(AmericanOdds(raw.trunc() as i64))
}

/// American odds text for an optional price, `N/A` when missing or invalid.
pub fn american_or_na(decimal_odds: Option<f64>) -> String {
    decimal_odds
        .and_then(|odds| decimal_to_american(odds).ok())
        .map_or_else(|| NOT_AVAILABLE.to_string(), |odds| odds.to_string())
}

/// Fixed one-decimal representation, e.g. `47.5` or `-3.0`.
pub fn format_with_decimal(value: f64) -> String {
    format!("{:.1}", normalize_zero(value))
}

/// Spread handicap with an explicit `+` for positive lines.
pub fn format_handicap(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_with_decimal(value))
    } else {
        format_with_decimal(value)
    }
}

/// Formats one game as a text block.
///
/// Returns `None` for events without a moneyline; the provider omits it for
/// games that are off the board, usually live ones.
pub fn format_event_block(event: &OddsEvent) -> Option<String> {
    let moneyline = event.moneyline?;
    let mut block = String::new();

    if event.live {
        block.push_str("\u{1F7E2} **_LIVE_**\n");
    }
    block.push_str(&format!("**Home:** _{}_\n", event.home));
    block.push_str(&format!("**Away:** _{}_\n", event.away));
    block.push_str(&format!("**Time:** <t:{}>\n", event.starts.timestamp()));
    block.push_str(&format!(
        "**ML - Home:** _{}_, **Away:** _{}_\n",
        american_or_na(moneyline.home),
        american_or_na(moneyline.away)
    ));

    if let Some(spread) = event.spread {
        block.push_str(&format!(
            "**Spread - Home:** _{} {}_, **Away:** _{} {}_\n",
            format_handicap(spread.handicap),
            american_or_na(spread.home),
            format_handicap(-spread.handicap),
            american_or_na(spread.away)
        ));
    }

    if let Some(total) = event.total {
        let points = format_with_decimal(total.points);
        block.push_str(&format!(
            "**Total Points:** _o{points} {}, u{points} {}_\n",
            american_or_na(total.over),
            american_or_na(total.under)
        ));
    }

    block.push('\n');
    Some(block)
}

/// Formats one team's injury report as a text block.
pub fn format_team_injuries(team: &TeamInjuries) -> String {
    let mut block = format!("**{}**\n", team.team);

    for player in &team.players {
        let icon = match player.severity() {
            InjurySeverity::Minor => "\u{1F7E1}",
            InjurySeverity::Serious => "\u{1F534}",
        };
        block.push_str(&format!("{icon} _{} - {}_\n", player.name, player.return_date));
    }

    block.push('\n');
    block
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
