//! General utility commands: help, ping, info and serverinfo.
//! These only read bot state and never call an external provider.

use crate::framework::{Context, Error};
use crate::reply::{send_outcome, CommandOutcome, EmbedPlan, ReplyMessage};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::info;

/// Help embed color.
pub const HELP_EMBED_COLOR: u32 = 0x00FF00;
/// Bot information embed color.
pub const INFO_EMBED_COLOR: u32 = 0x3498DB;
/// Server information embed color.
pub const SERVER_EMBED_COLOR: u32 = 0x9B59B6;

/// Embed color for a gateway latency: green, yellow, then red.
pub const fn latency_color(latency_ms: u128) -> u32 {
    if latency_ms < 100 {
        0x00FF00
    } else if latency_ms < 200 {
        0xFFFF00
    } else {
        0xFF0000
    }
}

/// Command list grouped by category.
pub fn help_embed() -> EmbedPlan {
    EmbedPlan::new(HELP_EMBED_COLOR)
        .title("🤖 Omni Bot - Command List")
        .description("Here are all available commands:")
        .field(
            "🏈 Sports Commands",
            "`/lines <sport>` - Get betting lines (nfl, nba, mlb)\n\
             `/injuries <sport> [team]` - Get injury reports (nfl, nba, mlb)",
            false,
        )
        .field("🤖 AI Commands", "`/ask <query>` - Ask the AI anything", false)
        .field(
            "📈 Stock Commands",
            "`/stock <ticker> [period]` - Get a stock quote and chart (1d, 5d, 1m, 3m, 6m, 1y, 5y)",
            false,
        )
        .field(
            "⚙️ General Commands",
            "`/help` - Show this message\n\
             `/ping` - Check bot latency\n\
             `/info` - Show bot information\n\
             `/serverinfo` - Show server information",
            false,
        )
        .footer("Use / to see all commands with autocomplete")
}

/// Latency reply.
pub fn ping_embed(latency_ms: u128) -> EmbedPlan {
    EmbedPlan::new(latency_color(latency_ms))
        .title("🏓 Pong!")
        .description(format!("Bot latency: **{latency_ms}ms**"))
}

/// `2d 3h 4m 5s`, leading zero units omitted.
pub fn format_uptime(uptime: TimeDelta) -> String {
    let total = uptime.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        total % 86_400 / 3_600,
        total % 3_600 / 60,
        total % 60,
    );

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Snapshot of the bot's state for `/info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotStats {
    /// Guilds the bot is in.
    pub servers: usize,
    /// Cached users.
    pub users: usize,
    /// Gateway latency.
    pub latency_ms: u128,
    /// Time since startup.
    pub uptime: TimeDelta,
}

/// Bot information reply.
pub fn info_embed(stats: &BotStats, now: DateTime<Utc>) -> EmbedPlan {
    EmbedPlan::new(INFO_EMBED_COLOR)
        .title("ℹ️ Bot Information")
        .description("Omni Bot - Your all-in-one Discord assistant")
        .field("👥 Servers", stats.servers.to_string(), true)
        .field("👤 Users", stats.users.to_string(), true)
        .field("📊 Latency", format!("{}ms", stats.latency_ms), true)
        .field("⏱️ Uptime", format_uptime(stats.uptime), true)
        .field(
            "✨ Features",
            "• Sports betting lines\n• Injury reports\n• AI chat assistant\n• Stock quotes and charts",
            false,
        )
        .footer(format!("Omni Bot v{}", env!("CARGO_PKG_VERSION")))
        .timestamp(now)
}

/// Guild details for `/serverinfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStats {
    /// Guild name.
    pub name: String,
    /// Icon URL, when the guild has one.
    pub icon_url: Option<String>,
    /// Owner's user id.
    pub owner_id: u64,
    /// Member count.
    pub members: u64,
    /// Channel count.
    pub channels: usize,
    /// Role count.
    pub roles: usize,
    /// Custom emoji count.
    pub emojis: usize,
    /// Guild creation time.
    pub created_at: DateTime<Utc>,
}

/// Server information reply.
pub fn server_info_embed(stats: &ServerStats) -> EmbedPlan {
    let embed = EmbedPlan::new(SERVER_EMBED_COLOR)
        .title(format!("📊 {}", stats.name))
        .description("Server Information")
        .field("👑 Owner", format!("<@{}>", stats.owner_id), true)
        .field("👥 Members", stats.members.to_string(), true)
        .field("💬 Channels", stats.channels.to_string(), true)
        .field(
            "📅 Created",
            stats.created_at.format("%B %d, %Y").to_string(),
            true,
        )
        .field("🎭 Roles", stats.roles.to_string(), true)
        .field("😀 Emojis", stats.emojis.to_string(), true);

    match &stats.icon_url {
        Some(url) => embed.thumbnail(url),
        None => embed,
    }
}

fn single(embed: EmbedPlan) -> CommandOutcome {
    CommandOutcome::Embeds(vec![ReplyMessage::embed(embed)])
}

// Inner module to keep poise's generated items out of missing_docs
mod inner {
    #![allow(missing_docs)]

    use super::*;

    /// Show all available commands
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
        info!(user = %ctx.author().name, "/help");
        send_outcome(ctx, single(help_embed())).await
    }

    /// Check bot latency
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
        let latency = ctx.ping().await.as_millis();
        info!(user = %ctx.author().name, latency_ms = %latency, "/ping");
        send_outcome(ctx, single(ping_embed(latency))).await
    }

    /// Show bot information
    #[poise::command(slash_command)]
    pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
        let now = Utc::now();
        let stats = BotStats {
            servers: ctx.cache().guild_count(),
            users: ctx.cache().user_count(),
            latency_ms: ctx.ping().await.as_millis(),
            uptime: now - ctx.data().started_at,
        };
        info!(user = %ctx.author().name, servers = stats.servers, "/info");
        send_outcome(ctx, single(info_embed(&stats, now))).await
    }

    /// Show server information
    #[poise::command(slash_command)]
    pub async fn serverinfo(ctx: Context<'_>) -> Result<(), Error> {
        info!(user = %ctx.author().name, "/serverinfo");

        let stats = ctx.guild().map(|guild| ServerStats {
            name: guild.name.clone(),
            icon_url: guild.icon_url(),
            owner_id: guild.owner_id.get(),
            members: guild.member_count,
            channels: guild.channels.len(),
            roles: guild.roles.len(),
            emojis: guild.emojis.len(),
            created_at: DateTime::from_timestamp(guild.id.created_at().unix_timestamp(), 0)
                .unwrap_or_default(),
        });

        let outcome = match stats {
            Some(stats) => single(server_info_embed(&stats)),
            None => CommandOutcome::notice("❌ This command can only be used in a server."),
        };
        send_outcome(ctx, outcome).await
    }
}

pub use inner::*;
