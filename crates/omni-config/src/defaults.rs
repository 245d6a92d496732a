//! Default values for every configuration section.

use crate::schema::*;

/// Browser User-Agent used for page scraping.
pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "omni-bot.toml";

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            max_idle_per_host: 10,
            rate_limit_per_sec: 5,
            max_retries: 3,
        }
    }
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pinnacle-odds.p.rapidapi.com".to_string(),
            api_key: String::new(),
            api_host: "pinnacle-odds.p.rapidapi.com".to_string(),
        }
    }
}

impl Default for InjuriesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.espn.com".to_string(),
            user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
            system_prompt: "You are a helpful assistant".to_string(),
        }
    }
}

impl Default for StocksConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
        }
    }
}
