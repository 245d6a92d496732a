//! `/stock`: quote embed with a price chart.

use crate::autocomplete::autocomplete_period;
use crate::framework::{Context, Error};
use crate::reply::{send_outcome, CommandOutcome, EmbedPlan, ReplyAttachment, ReplyMessage};
use omni_charts::ChartRenderer;
use omni_common::{
    format_market_cap, format_price, format_ratio, format_volume, ChartPeriod, ExtendedHours,
    Lookup, StockSnapshot, Ticker,
};
use omni_providers::QuoteProvider;
use tracing::{info, instrument, warn};

/// Embed color when the price is flat or up.
pub const GAIN_EMBED_COLOR: u32 = 0x00FF00;
/// Embed color when the price is down.
pub const LOSS_EMBED_COLOR: u32 = 0xFF0000;

/// `AAPL_chart.png`
pub fn chart_file_name(ticker: &Ticker) -> String {
    format!("{ticker}_chart.png")
}

/// Quote embed for `snapshot`, without the chart.
pub fn stock_embed(snapshot: &StockSnapshot) -> EmbedPlan {
    let quote = &snapshot.quote;
    let rising = quote.change >= 0.0;
    let (color, arrow) = if rising {
        (GAIN_EMBED_COLOR, "⬆️")
    } else {
        (LOSS_EMBED_COLOR, "⬇️")
    };

    let title = format!(
        "📈 {} - {}\n${:.2}\n{:+.2} ({:+.2}%) {} {}",
        snapshot.ticker,
        quote.name,
        quote.current_price,
        quote.change,
        quote.change_pct,
        arrow,
        snapshot.period.phrase()
    );

    let mut embed = EmbedPlan::new(color).title(title);
    if let Some(extended) = &quote.extended {
        embed = embed.description(extended_hours_line(extended));
    }

    embed
        .field("📂 Open", format_price(quote.open_price), true)
        .field("📈 52W High", format_price(quote.high_52w), true)
        .field("💼 Market Cap", format_market_cap(quote.market_cap), true)
        .field("📦 Volume", format_volume(quote.volume), true)
        .field("📉 52W Low", format_price(quote.low_52w), true)
        .field("📊 P/E Ratio", format_ratio(quote.pe_ratio), true)
}

fn extended_hours_line(extended: &ExtendedHours) -> String {
    let icon = if extended.change >= 0.0 { "🟢" } else { "🔴" };
    format!(
        "`{icon} {}: ${:.2} {:+.2} ({:+.2}%)`",
        extended.label, extended.price, extended.change, extended.change_pct
    )
}

/// Quote and chart for `ticker_input` over `period_input`.
///
/// Both inputs are validated before the quote provider is called. A chart
/// that fails to render only drops the image.
#[instrument(skip(quotes, charts))]
pub async fn build_stock_reply(
    quotes: &dyn QuoteProvider,
    charts: &dyn ChartRenderer,
    ticker_input: &str,
    period_input: &str,
) -> CommandOutcome {
    let Ok(period) = period_input.parse::<ChartPeriod>() else {
        return CommandOutcome::notice(format!(
            "❌ Invalid period. Choose from: {}",
            ChartPeriod::choices()
        ));
    };
    let ticker = match ticker_input.parse::<Ticker>() {
        Ok(ticker) => ticker,
        Err(_) => {
            return CommandOutcome::notice(format!(
                "❌ Invalid ticker symbol: **{}**",
                ticker_input.trim().to_uppercase()
            ))
        }
    };

    let snapshot = match quotes.fetch_snapshot(&ticker, period).await {
        Lookup::Found(snapshot) => snapshot,
        Lookup::NotFound => {
            return CommandOutcome::notice(format!(
                "❌ Could not find data for ticker: **{ticker}**"
            ))
        }
        Lookup::TransientError(reason) => {
            warn!("Quote unavailable: {}", reason);
            return CommandOutcome::notice(format!(
                "❌ Could not fetch data for ticker: **{ticker}** ({reason})"
            ));
        }
    };

    let attachment = match charts.render(&snapshot).await {
        Ok(data) => Some(ReplyAttachment {
            file_name: chart_file_name(&ticker),
            data,
        }),
        Err(e) => {
            warn!(renderer = charts.name(), "Sending quote without chart: {}", e);
            None
        }
    };

    info!(chart = attachment.is_some(), "Replying with quote");
    CommandOutcome::Embeds(vec![ReplyMessage {
        embed: stock_embed(&snapshot),
        attachment,
    }])
}

mod inner {
    #![allow(missing_docs)]

    use super::*;

    /// Get stock information and chart
    #[poise::command(slash_command)]
    pub async fn stock(
        ctx: Context<'_>,
        #[description = "Stock symbol (e.g., AAPL, TSLA, GOOGL)"] ticker: String,
        #[description = "Chart time period"]
        #[autocomplete = "autocomplete_period"]
        period: Option<String>,
    ) -> Result<(), Error> {
        let period = period.unwrap_or_else(|| ChartPeriod::default().code().to_string());
        info!(user = %ctx.author().name, ticker = %ticker, period = %period, "/stock");
        ctx.defer().await?;

        let data = ctx.data();
        let outcome =
            build_stock_reply(data.quotes.as_ref(), data.charts.as_ref(), &ticker, &period).await;
        send_outcome(ctx, outcome).await
    }
}

pub use inner::*;
