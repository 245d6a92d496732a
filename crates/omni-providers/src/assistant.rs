//! Question answering through an OpenAI-compatible chat completions API.

use crate::http::ApiClient;
use crate::traits::AssistantProvider;
use async_trait::async_trait;
use omni_common::Lookup;
use omni_config::AiConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const PROVIDER: &str = "AI";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completion response body.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if it has any.
    pub fn answer(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

/// DeepSeek (or any OpenAI-compatible) chat client
pub struct ChatCompletionClient {
    http: Arc<ApiClient>,
    config: AiConfig,
}

impl ChatCompletionClient {
    /// Create a client sharing `http`
    pub fn new(http: Arc<ApiClient>, config: AiConfig) -> Self {
        Self { http, config }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl AssistantProvider for ChatCompletionClient {
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    async fn ask(&self, query: &str) -> Lookup<String> {
        if self.config.api_key.is_empty() {
            return Lookup::TransientError("no AI API key is configured".to_string());
        }

        info!(model = %self.config.model, "Requesting completion");

        let url = self.completions_url();
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            stream: false,
        };

        let result = self
            .http
            .request_json::<ChatResponse, _>(PROVIDER, |client| {
                client
                    .post(&url)
                    .bearer_auth(&self.config.api_key)
                    .json(&body)
            })
            .await
            .map(ChatResponse::answer);

        if let Err(e) = &result {
            warn!("Completion failed: {}", e);
        }

        Lookup::from_result(result)
    }
}
