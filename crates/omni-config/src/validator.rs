//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use url::Url;

/// Everything wrong with a configuration, collected in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that stop the bot from starting.
    pub errors: Vec<String>,
    /// Problems that only disable a feature.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether no blocking problems were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every issue found.
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::default();

        if config.discord.token.trim().is_empty() {
            report
                .errors
                .push("Discord token cannot be empty (set DISCORD_TOKEN)".to_string());
        }

        for (section, url) in [
            ("odds", &config.odds.base_url),
            ("injuries", &config.injuries.base_url),
            ("ai", &config.ai.base_url),
            ("stocks", &config.stocks.base_url),
        ] {
            if let Err(e) = check_url(url) {
                report
                    .errors
                    .push(format!("{section}.base_url '{url}' is invalid: {e}"));
            }
        }

        if config.chart.width == 0 || config.chart.height == 0 {
            report
                .errors
                .push("chart.width and chart.height must be non-zero".to_string());
        }

        if config.http.rate_limit_per_sec == 0 {
            report
                .errors
                .push("http.rate_limit_per_sec must be non-zero".to_string());
        }

        if config.http.timeout_seconds == 0 {
            report
                .errors
                .push("http.timeout_seconds must be non-zero".to_string());
        }

        if config.odds.api_key.is_empty() {
            report
                .warnings
                .push("No RapidAPI key configured; /lines will fail".to_string());
        }

        if config.ai.api_key.is_empty() {
            report
                .warnings
                .push("No AI API key configured; /ask will fail".to_string());
        }

        report
    }
}

fn check_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config.odds.api_key = "rapid".to_string();
        config.ai.api_key = "deepseek".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        let report = ConfigValidator::validate(&valid_config());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_all_issues_reported_together() {
        let mut config = valid_config();
        config.discord.token = "  ".to_string();
        config.stocks.base_url = "not a url".to_string();
        config.ai.base_url = "ftp://api.example.com".to_string();
        config.chart.height = 0;

        let report = ConfigValidator::validate(&config);
        assert_eq!(report.errors.len(), 4);
        assert!(report.errors[1].starts_with("ai.base_url"));
        assert!(report.errors[2].starts_with("stocks.base_url"));
    }

    #[test]
    fn test_missing_provider_keys_are_warnings() {
        let mut config = valid_config();
        config.odds.api_key.clear();
        config.ai.api_key.clear();

        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
    }
}
