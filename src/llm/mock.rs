use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{LlmClient, LlmRequest};

/// A scripted client for tests. Returns pre-defined responses in order and
/// records every request it sees.
pub struct MockLlm {
    responses: Vec<Result<String, String>>,
    index: AtomicUsize,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client that answers every request with the same text.
    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let i = self.index.fetch_add(1, Ordering::SeqCst);
        // A single scripted response repeats forever.
        let response = if self.responses.len() == 1 {
            self.responses.first()
        } else {
            self.responses.get(i)
        };
        match response {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!("{}", message)),
            None => Err(anyhow::anyhow!(
                "MockLlm: no more responses (called {} times)",
                i + 1
            )),
        }
    }
}
