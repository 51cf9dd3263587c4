//! Commentary providers: the Anthropic Messages API and OpenAI chat.
//!
//! Each provider is an [`Analyst`]. [`Commentator`] picks one from
//! [`ProviderSettings`] so callers hold a single concrete type.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::analysis::Analyst;

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Which service writes the commentary.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Claude models via the Messages API.
    #[display("anthropic")]
    Anthropic,
    /// GPT models via chat completions.
    #[display("openai")]
    OpenAI,
}

impl Provider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

/// Everything needed to reach a provider.
#[derive(Clone)]
pub struct ProviderSettings {
    /// Target service.
    pub provider: Provider,
    /// Model name.
    pub model: String,
    /// Response length cap.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    api_key: String,
}

impl ProviderSettings {
    /// Bundles a provider choice with its key and sampling settings.
    pub fn new(
        provider: Provider,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            model,
            max_tokens,
            temperature,
            api_key,
        }
    }
}

/// Keeps the key out of logs.
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// Why a provider call produced no commentary.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ProviderError {
    /// The request never got a response.
    #[display("{} request failed: {}", provider, reason)]
    Transport {
        /// Service contacted.
        provider: Provider,
        /// Underlying failure.
        reason: String,
    },
    /// The service answered with an error.
    #[display("{} returned {}: {}", provider, status, message)]
    Rejected {
        /// Service contacted.
        provider: Provider,
        /// HTTP status, or 0 when the client library hides it.
        status: u16,
        /// Message from the service.
        message: String,
    },
    /// The response held no text.
    #[display("{} response contained no commentary", _0)]
    Empty(Provider),
}

impl std::error::Error for ProviderError {}

/// Request body for `POST /v1/messages`.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [UserTurn<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserTurn<'a> {
    role: &'static str,
    content: &'a str,
}

/// The parts of a Messages response the commentator reads.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// Text blocks joined in order.
    fn commentary(self) -> Option<String> {
        let text: Vec<String> = self
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();
        let joined = text.join("\n");
        (!joined.trim().is_empty()).then_some(joined)
    }
}

/// Error body returned by the Messages API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extracts the service's message from an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Commentary from Claude.
#[derive(Debug, Clone)]
pub struct AnthropicCommentator {
    http: reqwest::Client,
    settings: ProviderSettings,
}

impl AnthropicCommentator {
    /// Creates a commentator for `settings`.
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    fn transport(reason: impl std::fmt::Display) -> ProviderError {
        ProviderError::Transport {
            provider: Provider::Anthropic,
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Analyst for AnthropicCommentator {
    #[instrument(skip_all, fields(model = %self.settings.model))]
    async fn analyze(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system,
            messages: [UserTurn {
                role: "user",
                content: prompt,
            }],
        };

        debug!(prompt_len = prompt.len(), "Posting to Messages API");
        let response = self
            .http
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;

        let status = response.status();
        let text = response.text().await.map_err(Self::transport)?;
        if !status.is_success() {
            let message = api_error_message(&text);
            warn!(%status, %message, "Messages API refused request");
            return Err(ProviderError::Rejected {
                provider: Provider::Anthropic,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&text).map_err(Self::transport)?;
        let commentary = parsed
            .commentary()
            .ok_or(ProviderError::Empty(Provider::Anthropic))?;
        info!(len = commentary.len(), "Commentary received");
        Ok(commentary)
    }
}

/// Commentary from a GPT model.
#[derive(Debug, Clone)]
pub struct OpenAiCommentator {
    client: async_openai::Client<OpenAIConfig>,
    settings: ProviderSettings,
}

impl OpenAiCommentator {
    /// Creates a commentator for `settings`.
    pub fn new(settings: ProviderSettings) -> Self {
        let client = async_openai::Client::with_config(
            OpenAIConfig::new().with_api_key(settings.api_key.clone()),
        );
        Self { client, settings }
    }

    fn invalid_request(reason: impl std::fmt::Display) -> ProviderError {
        ProviderError::Transport {
            provider: Provider::OpenAI,
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Analyst for OpenAiCommentator {
    #[instrument(skip_all, fields(model = %self.settings.model))]
    async fn analyze(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system)
            .build()
            .map_err(Self::invalid_request)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(Self::invalid_request)?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.settings.model.as_str())
            .messages([
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .max_completion_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature)
            .build()
            .map_err(Self::invalid_request)?;

        debug!(prompt_len = prompt.len(), "Requesting chat completion");
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!(error = %e, "Chat completion failed");
            ProviderError::Rejected {
                provider: Provider::OpenAI,
                status: 0,
                message: e.to_string(),
            }
        })?;

        let commentary = response
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::Empty(Provider::OpenAI))?;
        info!(len = commentary.len(), "Commentary received");
        Ok(commentary)
    }
}

/// The configured provider.
#[derive(Debug, Clone)]
pub enum Commentator {
    /// Claude.
    Anthropic(AnthropicCommentator),
    /// GPT.
    OpenAI(OpenAiCommentator),
}

impl Commentator {
    /// Builds the commentator `settings` selects.
    #[instrument(fields(provider = %settings.provider, model = %settings.model))]
    pub fn connect(settings: ProviderSettings) -> Self {
        match settings.provider {
            Provider::Anthropic => Commentator::Anthropic(AnthropicCommentator::new(settings)),
            Provider::OpenAI => Commentator::OpenAI(OpenAiCommentator::new(settings)),
        }
    }
}

#[async_trait]
impl Analyst for Commentator {
    async fn analyze(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        match self {
            Commentator::Anthropic(inner) => inner.analyze(system, prompt).await,
            Commentator::OpenAI(inner) => inner.analyze(system, prompt).await,
        }
    }
}
