//! `/ask`: AI question answering.

use crate::framework::{Context, Error};
use crate::reply::{chunked_embeds, send_outcome, CommandOutcome};
use omni_common::{generate_response_list, split_text, Lookup, MAX_MESSAGE_LENGTH};
use omni_providers::AssistantProvider;
use tracing::{info, instrument, warn};

/// Embed color for AI answers.
pub const ASK_EMBED_COLOR: u32 = 0x4E6BFD;

/// Answer `query`, split over as many embeds as the answer needs.
#[instrument(skip(assistant, query), fields(query_len = query.len()))]
pub async fn build_ask_reply(assistant: &dyn AssistantProvider, query: &str) -> CommandOutcome {
    let query = query.trim();
    if query.is_empty() {
        return CommandOutcome::notice("❌ Please provide a question to ask.");
    }

    let answer = match assistant.ask(query).await {
        Lookup::Found(answer) => answer,
        Lookup::NotFound => {
            warn!("Assistant returned an empty answer");
            return error_embed("the AI returned an empty answer");
        }
        Lookup::TransientError(reason) => {
            warn!("Assistant unavailable: {}", reason);
            return error_embed(&reason);
        }
    };

    let chunks = generate_response_list(split_text(&answer, MAX_MESSAGE_LENGTH), MAX_MESSAGE_LENGTH);
    info!(chunks = chunks.len(), "Replying with answer");
    chunked_embeds(chunks, None, ASK_EMBED_COLOR)
}

fn error_embed(reason: &str) -> CommandOutcome {
    chunked_embeds(
        [format!("Error getting AI response: {reason}")],
        None,
        ASK_EMBED_COLOR,
    )
}

mod inner {
    #![allow(missing_docs)]

    use super::*;

    /// Ask the AI a question
    #[poise::command(slash_command)]
    pub async fn ask(
        ctx: Context<'_>,
        #[description = "Your question"] query: String,
    ) -> Result<(), Error> {
        info!(user = %ctx.author().name, "/ask");
        ctx.defer().await?;

        let outcome = build_ask_reply(ctx.data().assistant.as_ref(), &query).await;
        send_outcome(ctx, outcome).await
    }
}

pub use inner::*;
