//! Translates an engine outcome into a structured response.

use serde_json::{Value, json};

use crate::engine::Engine;
use crate::error::TaskError;

/// Status code plus JSON body, ready for whatever transport sits in front.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn success() -> Self {
        Self {
            status: 200,
            body: json!({ "status": "success" }),
        }
    }

    pub fn failure(err: &TaskError) -> Self {
        Self {
            status: err.status(),
            body: json!({
                "status": "error",
                "kind": err.kind(),
                "message": err.to_string(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

impl From<Result<(), TaskError>> for Response {
    fn from(result: Result<(), TaskError>) -> Self {
        match result {
            Ok(()) => Response::success(),
            Err(e) => Response::failure(&e),
        }
    }
}

/// Run one task instruction and report the outcome.
pub async fn handle(engine: &dyn Engine, task: &str) -> Response {
    engine.run(task).await.into()
}
