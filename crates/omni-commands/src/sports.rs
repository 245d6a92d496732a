//! `/lines` and `/injuries`.

use crate::autocomplete::autocomplete_sport;
use crate::framework::{Context, Error};
use crate::reply::{chunked_embeds, send_outcome, CommandOutcome};
use omni_common::{
    format_event_block, format_team_injuries, generate_response_list, Lookup, Sport,
    MAX_MESSAGE_LENGTH,
};
use omni_providers::{InjuryProvider, OddsProvider};
use tracing::{info, instrument, warn};

/// Embed color shared by the sports commands.
pub const SPORTS_EMBED_COLOR: u32 = 0x9CAFBE;

fn parse_sport(input: &str) -> Result<Sport, CommandOutcome> {
    input
        .parse::<Sport>()
        .map_err(|_| CommandOutcome::notice(format!("Invalid sport. Choose from: {}", Sport::choices())))
}

/// Betting lines for `sport_input`, one embed per chunk of games.
#[instrument(skip(odds))]
pub async fn build_lines_reply(odds: &dyn OddsProvider, sport_input: &str) -> CommandOutcome {
    let sport = match parse_sport(sport_input) {
        Ok(sport) => sport,
        Err(notice) => return notice,
    };

    let no_lines = || {
        CommandOutcome::notice(format!(
            "No {} lines are available right now.",
            sport.display_name()
        ))
    };

    match odds.fetch_events(sport).await {
        Lookup::Found(events) => {
            let blocks: Vec<String> = events.iter().filter_map(format_event_block).collect();
            if blocks.is_empty() {
                return no_lines();
            }

            info!(games = blocks.len(), "Replying with lines");
            chunked_embeds(
                generate_response_list(blocks, MAX_MESSAGE_LENGTH),
                Some(sport.lines_title().as_str()),
                SPORTS_EMBED_COLOR,
            )
        }
        Lookup::NotFound => no_lines(),
        Lookup::TransientError(reason) => {
            warn!("Lines unavailable: {}", reason);
            CommandOutcome::notice(format!(
                "❌ Could not fetch {} lines: {reason}",
                sport.display_name()
            ))
        }
    }
}

/// Injury report for `sport_input`, optionally narrowed to teams whose name
/// contains `team` (ignoring case).
#[instrument(skip(injuries))]
pub async fn build_injuries_reply(
    injuries: &dyn InjuryProvider,
    sport_input: &str,
    team: Option<&str>,
) -> CommandOutcome {
    let sport = match parse_sport(sport_input) {
        Ok(sport) => sport,
        Err(notice) => return notice,
    };
    let team = team.map(str::trim).filter(|team| !team.is_empty());

    let mut teams = match injuries.fetch_injuries(sport).await {
        Lookup::Found(teams) => teams,
        Lookup::NotFound => {
            return CommandOutcome::notice(format!(
                "No {} injuries are reported right now.",
                sport.display_name()
            ))
        }
        Lookup::TransientError(reason) => {
            warn!("Injury report unavailable: {}", reason);
            return CommandOutcome::notice(format!(
                "❌ Could not fetch {} injuries: {reason}",
                sport.display_name()
            ));
        }
    };

    if let Some(team) = team {
        let wanted = team.to_lowercase();
        teams.retain(|entry| entry.team.to_lowercase().contains(&wanted));
        if teams.is_empty() {
            return CommandOutcome::notice(format!(
                "No {} injury report found for team: **{team}**",
                sport.display_name()
            ));
        }
    }

    info!(teams = teams.len(), "Replying with injuries");
    chunked_embeds(
        generate_response_list(teams.iter().map(format_team_injuries), MAX_MESSAGE_LENGTH),
        Some(sport.injuries_title().as_str()),
        SPORTS_EMBED_COLOR,
    )
}

mod inner {
    #![allow(missing_docs)]

    use super::*;

    /// Get betting lines for a league
    #[poise::command(slash_command)]
    pub async fn lines(
        ctx: Context<'_>,
        #[description = "League (nfl, nba, mlb)"]
        #[autocomplete = "autocomplete_sport"]
        sport: String,
    ) -> Result<(), Error> {
        info!(user = %ctx.author().name, sport = %sport, "/lines");
        ctx.defer().await?;

        let outcome = build_lines_reply(ctx.data().odds.as_ref(), &sport).await;
        send_outcome(ctx, outcome).await
    }

    /// Get injury reports for a league
    #[poise::command(slash_command)]
    pub async fn injuries(
        ctx: Context<'_>,
        #[description = "League (nfl, nba, mlb)"]
        #[autocomplete = "autocomplete_sport"]
        sport: String,
        #[description = "Only show teams whose name contains this"] team: Option<String>,
    ) -> Result<(), Error> {
        info!(user = %ctx.author().name, sport = %sport, team = ?team, "/injuries");
        ctx.defer().await?;

        let outcome =
            build_injuries_reply(ctx.data().injuries.as_ref(), &sport, team.as_deref()).await;
        send_outcome(ctx, outcome).await
    }
}

pub use inner::*;
