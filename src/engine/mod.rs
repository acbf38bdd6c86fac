pub mod executor;
pub mod locks;

use async_trait::async_trait;

use crate::error::TaskError;

/// The outermost boundary. main.rs and the request handler only know this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Resolve `task` and run the matching operation to completion.
    async fn run(&self, task: &str) -> Result<(), TaskError>;
}
