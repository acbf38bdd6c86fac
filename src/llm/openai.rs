use anyhow::{Result, bail};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::{LlmClient, LlmInput, LlmRequest};
use crate::config::LlmConfig;

/// Calls an OpenAI-compatible chat completions endpoint with a bearer token.
pub struct ChatCompletionsClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl ChatCompletionsClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    fn build_messages(request: &LlmRequest) -> Vec<Message> {
        let system = Message {
            role: "system",
            content: MessageContent::Text(request.instruction.clone()),
        };
        let user = match &request.input {
            LlmInput::Text(text) => Message {
                role: "user",
                content: MessageContent::Text(text.clone()),
            },
            LlmInput::Image { media_type, data } => Message {
                role: "user",
                content: MessageContent::Parts(vec![ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{};base64,{}", media_type, STANDARD.encode(data)),
                    },
                }]),
            },
        };
        vec![system, user]
    }

    fn parse_response(resp: ApiResponse) -> Result<String> {
        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("completion response has no message content"))?;

        if text.trim().is_empty() {
            bail!("completion service returned empty response");
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        let token = self.config.token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "authentication failed: no API token configured. Set {}.",
                crate::consts::TOKEN_ENV_VAR
            )
        })?;

        let messages = Self::build_messages(request);
        let body = ApiRequest {
            model: &self.config.model,
            messages: &messages,
        };

        tracing::debug!(
            model = %self.config.model,
            url = %self.config.api_url,
            "requesting completion"
        );

        let resp = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            if matches!(
                status,
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN
            ) {
                bail!("authentication failed ({}): {}", status, text);
            }
            bail!("completion API error ({}): {}", status, text);
        }

        let api_resp: ApiResponse = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("malformed completion response: {}", e))?;

        if let Some(usage) = &api_resp.usage {
            tracing::debug!(
                input = usage.prompt_tokens,
                output = usage.completion_tokens,
                "completion tokens"
            );
        }

        Self::parse_response(api_resp)
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
