//! Configuration loading: TOML file, then environment overrides, then validation.

use crate::defaults::DEFAULT_CONFIG_FILE;
use crate::schema::Config;
use crate::validator::ConfigValidator;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "OMNI_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// One or more settings are invalid
    #[error("Configuration validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),
}

impl From<ConfigError> for omni_common::OmniError {
    fn from(err: ConfigError) -> Self {
        omni_common::OmniError::config_with_source("Could not load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `OMNI_CONFIG_PATH`, else `omni-bot.toml` in the
    /// working directory, else defaults; environment overrides apply on top.
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_from_file(path);
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::load_from_file(DEFAULT_CONFIG_FILE);
        }

        info!("No config file found, using defaults and environment");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        Self::finish(config)
    }

    /// Load configuration from a specific file with environment overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration");

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        Self::apply_env_overrides(&mut config)?;
        Self::finish(config)
    }

    /// Parse a TOML document; omitted keys take their defaults.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply process environment variables on top of `config`.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`.
    ///
    /// Where two names are listed the first one set wins.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&'static str]| {
            names
                .iter()
                .find_map(|name| lookup(name).map(|value| (*name, value)))
        };

        if let Some((_, token)) = first(&["DISCORD_TOKEN", "TOKEN"]) {
            config.discord.token = token;
        }

        if let Some((var, guild)) = first(&["DISCORD_GUILD_ID"]) {
            config.discord.guild_id = Some(parse_env(var, &guild)?);
        }

        if let Some((_, key)) = first(&["RAPIDAPI_KEY", "X-RAPIDAPI-KEY"]) {
            config.odds.api_key = key;
        }

        if let Some((_, host)) = first(&["RAPIDAPI_HOST", "X-RAPIDAPI-HOST"]) {
            config.odds.api_host = host;
        }

        if let Some((_, key)) = first(&["DEEPSEEK_API_KEY"]) {
            config.ai.api_key = key;
        }

        if let Some((_, model)) = first(&["AI_MODEL"]) {
            config.ai.model = model;
        }

        if let Some((_, level)) = first(&["LOG_LEVEL"]) {
            config.logging.level = level;
        }

        if let Some((var, timeout)) = first(&["HTTP_TIMEOUT"]) {
            config.http.timeout_seconds = parse_env(var, &timeout)?;
        }

        if let Some((var, retries)) = first(&["HTTP_MAX_RETRIES"]) {
            config.http.max_retries = parse_env(var, &retries)?;
        }

        Ok(())
    }

    fn finish(config: Config) -> Result<Config, ConfigError> {
        let report = ConfigValidator::validate(&config);

        for warning in &report.warnings {
            warn!("{warning}");
        }

        if !report.is_valid() {
            return Err(ConfigError::ValidationError(report.errors));
        }

        debug!(
            guild_scoped = config.discord.guild_id.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::EnvParseError {
            var: var.to_string(),
            source: Box::new(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let config = ConfigLoader::parse(
            "[discord]\ntoken = \"abc\"\nguild_id = 42\n\n[chart]\nwidth = 800\n",
        )
        .unwrap();

        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.discord.guild_id, Some(42));
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.height, 600);
        assert_eq!(config.ai.model, "deepseek-chat");
    }

    #[test]
    fn test_invalid_toml() {
        let result = ConfigLoader::parse("[discord\ntoken = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides_prefer_first_name() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(
            &mut config,
            overrides(&[
                ("TOKEN", "legacy"),
                ("DISCORD_TOKEN", "primary"),
                ("X-RAPIDAPI-KEY", "rapid"),
                ("HTTP_TIMEOUT", " 30 "),
                ("DISCORD_GUILD_ID", "1234"),
            ]),
        )
        .unwrap();

        assert_eq!(config.discord.token, "primary");
        assert_eq!(config.odds.api_key, "rapid");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.discord.guild_id, Some(1234));
    }

    #[test]
    fn test_overrides_fall_back_to_legacy_names() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(
            &mut config,
            overrides(&[("TOKEN", "legacy"), ("X-RAPIDAPI-HOST", "odds.example")]),
        )
        .unwrap();

        assert_eq!(config.discord.token, "legacy");
        assert_eq!(config.odds.api_host, "odds.example");
    }

    #[test]
    fn test_override_parse_error_names_variable() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides_from(
            &mut config,
            overrides(&[("HTTP_MAX_RETRIES", "many")]),
        )
        .unwrap_err();

        assert!(
            matches!(&err, ConfigError::EnvParseError { var, .. } if var == "HTTP_MAX_RETRIES")
        );
        assert!(err.to_string().contains("HTTP_MAX_RETRIES"));
    }

    #[test]
    fn test_finish_rejects_missing_token() {
        let config = ConfigLoader::parse("[discord]\ntoken = \"\"\n").unwrap();
        let result = ConfigLoader::finish(config);

        match result {
            Err(ConfigError::ValidationError(errors)) => {
                assert!(errors.iter().any(|e| e.contains("Discord token")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file_reads_chart_section() {
        let file = create_test_config_file(
            "[discord]\ntoken = \"file-token\"\n\n[chart]\nwidth = 640\nheight = 320\n",
        );
        let config = ConfigLoader::load_from_file(file.path()).unwrap();

        assert_eq!((config.chart.width, config.chart.height), (640, 320));
        assert!(!config.discord.token.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ConfigLoader::load_from_file("/definitely/not/here/omni-bot.toml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
