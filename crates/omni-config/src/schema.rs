//! Configuration schema definitions.
//!
//! Every section carries `#[serde(default)]`, so a config file only needs the
//! values that differ from [`Config::default`].

use omni_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Omni Bot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord connection settings.
    pub discord: DiscordConfig,
    /// Shared HTTP client settings.
    pub http: HttpConfig,
    /// Betting odds provider.
    pub odds: OddsConfig,
    /// Injury report source.
    pub injuries: InjuriesConfig,
    /// AI completion provider.
    pub ai: AiConfig,
    /// Stock quote and chart data provider.
    pub stocks: StocksConfig,
    /// Chart image settings.
    pub chart: ChartConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Register commands in this guild only (instant), instead of globally.
    pub guild_id: Option<u64>,
}

/// Settings shared by every outbound HTTP call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Idle connections kept per host.
    pub max_idle_per_host: usize,
    /// Requests per second allowed across all providers.
    pub rate_limit_per_sec: u32,
    /// Retries after the first attempt for transient failures.
    pub max_retries: usize,
}

impl HttpConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Betting odds provider (RapidAPI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// RapidAPI key.
    pub api_key: String,
    /// RapidAPI host header value.
    pub api_host: String,
}

/// Injury report page source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjuriesConfig {
    /// Site root; the sport code is appended as `/{sport}/injuries`.
    pub base_url: String,
    /// Browser User-Agent sent with the page request.
    pub user_agent: String,
}

/// OpenAI-compatible chat completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// System message sent before the user's question.
    pub system_prompt: String,
}

/// Stock market data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StocksConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

/// Chart image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Logging section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `omni_providers=debug,info`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_format: bool,
    /// Multi-line pretty output (ignored with `json_format`).
    pub pretty_format: bool,
    /// Also write logs to this file.
    pub file_path: Option<PathBuf>,
}

impl LoggingSettings {
    /// Converts to the logging system's configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json_format,
            pretty_format: self.pretty_format,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}
