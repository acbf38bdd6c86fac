pub mod shell;

use anyhow::Result;
use async_trait::async_trait;

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCall {
    /// Build a call from a base command line plus a trailing target path.
    pub fn with_target(base: &[String], target: &std::path::Path) -> Result<Self> {
        let (program, rest) = base
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("empty command line"))?;
        let mut args = rest.to_vec();
        args.push(target.to_string_lossy().into_owned());
        Ok(Self {
            program: program.clone(),
            args,
        })
    }
}

/// Runs external tools. Non-zero exit status is an error.
#[async_trait]
pub trait ShellRunner: Send + Sync {
    async fn run(&self, call: &ToolCall) -> Result<()>;
}

/// Records calls instead of spawning processes. Optionally fails every call.
#[derive(Default)]
pub struct RecordingRunner {
    calls: std::sync::Mutex<Vec<ToolCall>>,
    fail_with: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Calls seen so far, in order.
    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ShellRunner for RecordingRunner {
    async fn run(&self, call: &ToolCall) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call.clone());
        match &self.fail_with {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(()),
        }
    }
}
