//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use chrono::Utc;
use omni_charts::StockChartRenderer;
use omni_commands::{create_framework, Data};
use omni_config::Config;
use omni_providers::{
    ApiClient, ChatCompletionClient, EspnInjuryClient, PinnacleOddsClient, YahooQuoteClient,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, info};

/// Main bot structure.
pub struct OmniBot {
    config: Arc<Config>,
}

impl OmniBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Shared command data: every provider built from the configuration,
    /// all sharing one rate-limited HTTP client.
    pub fn build_data(&self) -> BotResult<Data> {
        let http = Arc::new(ApiClient::new(&self.config.http)?);
        debug!(
            rate_limit = self.config.http.rate_limit_per_sec,
            retries = self.config.http.max_retries,
            "Built shared HTTP client"
        );

        Ok(Data {
            config: Arc::clone(&self.config),
            odds: Arc::new(PinnacleOddsClient::new(
                Arc::clone(&http),
                self.config.odds.clone(),
            )),
            injuries: Arc::new(EspnInjuryClient::new(
                Arc::clone(&http),
                self.config.injuries.clone(),
            )),
            assistant: Arc::new(ChatCompletionClient::new(
                Arc::clone(&http),
                self.config.ai.clone(),
            )),
            quotes: Arc::new(YahooQuoteClient::new(http, self.config.stocks.clone())),
            charts: Arc::new(StockChartRenderer::new(&self.config.chart)),
            started_at: Utc::now(),
        })
    }

    /// Starts the bot and runs until the gateway connection ends.
    pub async fn start(&self) -> BotResult<()> {
        let data = self.build_data()?;
        let framework = create_framework(data, self.config.discord.guild_id);

        let mut client = serenity::ClientBuilder::new(
            &self.config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework)
        .await?;

        info!("Connecting to Discord");
        client.start().await?;
        Ok(())
    }
}
