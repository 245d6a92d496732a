//! Integration tests for omni-bot crate.
//!
//! These tests cover provider wiring without connecting to Discord.

use omni_bot::{BotError, OmniBot};
use omni_common::test_utils::init_test_logging;
use omni_common::{Lookup, OmniError};
use omni_config::{Config, ConfigError, ConfigLoader};

fn config_with_token() -> Config {
    let mut config = Config::default();
    config.discord.token = "test-token".to_string();
    config
}

#[tokio::test]
async fn test_build_data_wires_every_provider() {
    init_test_logging();

    let bot = OmniBot::new(config_with_token());
    let data = bot.build_data().unwrap();

    assert_eq!(data.charts.name(), "stock_price");
    assert_eq!(data.config.discord.token, "test-token");
    assert!(data.started_at <= chrono::Utc::now());
}

#[tokio::test]
async fn test_missing_ai_key_reaches_the_user_as_a_failure() {
    let bot = OmniBot::new(config_with_token());
    let data = bot.build_data().unwrap();

    let answer = data.assistant.ask("hello").await;
    assert!(matches!(answer, Lookup::TransientError(_)));
}

#[test]
fn test_config_errors_convert() {
    let err = ConfigLoader::parse("discord = 5").unwrap_err();
    let bot_err: BotError = err.into();
    assert!(matches!(bot_err, BotError::Config(ConfigError::ParseError(_))));

    let bot_err: BotError = OmniError::network("down").into();
    assert!(bot_err.to_string().starts_with("Setup error"));
}
