//! Poise framework setup and command registration logic.

use chrono::{DateTime, Utc};
use omni_charts::ChartRenderer;
use omni_config::Config;
use omni_providers::{AssistantProvider, InjuryProvider, OddsProvider, QuoteProvider};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Betting lines source.
    pub odds: Arc<dyn OddsProvider>,
    /// Injury report source.
    pub injuries: Arc<dyn InjuryProvider>,
    /// AI backend for `/ask`.
    pub assistant: Arc<dyn AssistantProvider>,
    /// Stock quote source.
    pub quotes: Arc<dyn QuoteProvider>,
    /// Stock chart renderer.
    pub charts: Arc<dyn ChartRenderer>,
    /// When the bot started, for `/info`.
    pub started_at: DateTime<Utc>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every slash command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::general::help(),
        crate::general::ping(),
        crate::general::info(),
        crate::general::serverinfo(),
        crate::sports::lines(),
        crate::sports::injuries(),
        crate::ask::ask(),
        crate::stocks::stock(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, "Command failed: {}", error);
            if let Err(e) = ctx.say("❌ Something went wrong while running that command.").await {
                warn!("Could not report command failure: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Creates the Poise framework.
///
/// Commands are registered in `guild_id` when given (visible immediately),
/// otherwise globally.
pub fn create_framework(data: Data, guild_id: Option<u64>) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");

                let commands = &framework.options().commands;
                match guild_id {
                    Some(id) => {
                        poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id))
                            .await?;
                        info!(guild_id = id, count = commands.len(), "Registered guild commands");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands).await?;
                        info!(count = commands.len(), "Registered global commands");
                    }
                }

                Ok(data)
            })
        })
        .build()
}
