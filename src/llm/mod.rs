pub mod mock;
pub mod openai;

use anyhow::Result;
use async_trait::async_trait;

/// What the model is asked to look at.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmInput {
    Text(String),
    Image { media_type: String, data: Vec<u8> },
}

/// A single completion request: a fixed instruction plus one piece of content.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub instruction: String,
    pub input: LlmInput,
}

impl LlmRequest {
    pub fn text(instruction: &str, content: impl Into<String>) -> Self {
        Self {
            instruction: instruction.to_string(),
            input: LlmInput::Text(content.into()),
        }
    }

    pub fn image(instruction: &str, media_type: &str, data: Vec<u8>) -> Self {
        Self {
            instruction: instruction.to_string(),
            input: LlmInput::Image {
                media_type: media_type.to_string(),
                data,
            },
        }
    }
}

/// A remote completion service. Returns the generated text; an empty or
/// malformed response is an error.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<String>;
}
