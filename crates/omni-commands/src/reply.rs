//! Framework-independent description of a command's reply.
//!
//! Builders return a [`CommandOutcome`]; only [`send_outcome`] touches
//! Discord, which keeps the builders testable with mock collaborators.

use crate::framework::{Context, Error};
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use poise::CreateReply;
use tracing::{debug, warn};

/// One embed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field heading.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field shares its row with neighbours.
    pub inline: bool,
}

/// Contents of one embed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbedPlan {
    /// Embed title.
    pub title: Option<String>,
    /// Embed body.
    pub description: Option<String>,
    /// Sidebar color as `0xRRGGBB`.
    pub color: u32,
    /// Fields in display order.
    pub fields: Vec<EmbedField>,
    /// Footer text.
    pub footer: Option<String>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
    /// Timestamp shown next to the footer.
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmbedPlan {
    /// Empty embed with the given color.
    pub fn new(color: u32) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Set the footer text.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set the thumbnail URL.
    #[must_use]
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub const fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    fn to_embed(&self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::new().color(self.color);

        if let Some(title) = &self.title {
            embed = embed.title(title);
        }
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        for field in &self.fields {
            embed = embed.field(&field.name, &field.value, field.inline);
        }
        if let Some(footer) = &self.footer {
            embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
        }
        if let Some(url) = &self.thumbnail {
            embed = embed.thumbnail(url);
        }
        if let Some(at) = self.timestamp {
            match serenity::Timestamp::from_unix_timestamp(at.timestamp()) {
                Ok(timestamp) => embed = embed.timestamp(timestamp),
                Err(e) => warn!("Dropping embed timestamp: {}", e),
            }
        }

        embed
    }
}

/// A file sent with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyAttachment {
    /// File name as seen by Discord.
    pub file_name: String,
    /// File contents.
    pub data: Vec<u8>,
}

/// One message: an embed, optionally with an image attachment shown in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMessage {
    /// The embed.
    pub embed: EmbedPlan,
    /// Image displayed inside the embed.
    pub attachment: Option<ReplyAttachment>,
}

impl ReplyMessage {
    /// Message with an embed and no attachment.
    pub const fn embed(embed: EmbedPlan) -> Self {
        Self {
            embed,
            attachment: None,
        }
    }

    fn into_reply(self) -> CreateReply {
        let mut embed = self.embed.to_embed();
        let mut reply = CreateReply::default();

        if let Some(attachment) = self.attachment {
            embed = embed.image(format!("attachment://{}", attachment.file_name));
            reply = reply.attachment(serenity::CreateAttachment::bytes(
                attachment.data,
                attachment.file_name,
            ));
        }

        reply.embed(embed)
    }
}

/// Messages sent in order, one per response chunk.
pub type ReplyPlan = Vec<ReplyMessage>;

/// What a command answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// One or more embed messages.
    Embeds(ReplyPlan),
    /// A single plain-text message, used for validation failures and
    /// "nothing to show" answers.
    Notice(String),
}

impl CommandOutcome {
    /// Plain-text notice.
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice(text.into())
    }

    /// Notice text, if this is a notice.
    pub fn as_notice(&self) -> Option<&str> {
        match self {
            Self::Notice(text) => Some(text),
            Self::Embeds(_) => None,
        }
    }

    /// Planned messages, if this is an embed reply.
    pub fn messages(&self) -> &[ReplyMessage] {
        match self {
            Self::Embeds(messages) => messages,
            Self::Notice(_) => &[],
        }
    }
}

/// One embed per chunk, all sharing `title` and `color`.
pub fn chunked_embeds<I>(chunks: I, title: Option<&str>, color: u32) -> CommandOutcome
where
    I: IntoIterator<Item = String>,
{
    CommandOutcome::Embeds(
        chunks
            .into_iter()
            .map(|chunk| {
                let embed = EmbedPlan::new(color).description(chunk);
                ReplyMessage::embed(match title {
                    Some(title) => embed.title(title),
                    None => embed,
                })
            })
            .collect(),
    )
}

/// Send `outcome` as follow-up messages, in order.
pub async fn send_outcome(ctx: Context<'_>, outcome: CommandOutcome) -> Result<(), Error> {
    match outcome {
        CommandOutcome::Notice(text) => {
            ctx.say(text).await?;
        }
        CommandOutcome::Embeds(messages) => {
            debug!(count = messages.len(), "Sending embed reply");
            for message in messages {
                ctx.send(message.into_reply()).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_plan_builder() {
        let plan = EmbedPlan::new(0x9CAFBE)
            .title("NFL Lines")
            .description("body")
            .field("a", "1", true)
            .field("b", "2", false)
            .footer("foot");

        assert_eq!(plan.color, 0x9CAFBE);
        assert_eq!(plan.title.as_deref(), Some("NFL Lines"));
        assert_eq!(plan.fields.len(), 2);
        assert!(!plan.fields[1].inline);
        assert_eq!(plan.footer.as_deref(), Some("foot"));
    }

    #[test]
    fn test_chunked_embeds_keeps_order() {
        let outcome = chunked_embeds(
            vec!["one".to_string(), "two".to_string()],
            Some("NBA Lines"),
            0x9CAFBE,
        );
        let messages = outcome.messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].embed.description.as_deref(), Some("one"));
        assert_eq!(messages[1].embed.description.as_deref(), Some("two"));
        assert!(messages
            .iter()
            .all(|m| m.embed.title.as_deref() == Some("NBA Lines")));
    }

    #[test]
    fn test_notice_accessors() {
        let outcome = CommandOutcome::notice("nope");
        assert_eq!(outcome.as_notice(), Some("nope"));
        assert!(outcome.messages().is_empty());
    }
}
