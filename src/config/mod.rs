//! Process-wide settings, built once at startup and passed into
//! constructors. Nothing below `main` reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{
    DEFAULT_API_URL, DEFAULT_FORMATTER, DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_MODEL, DEFAULT_ROOT,
};

/// Settings for the completion service client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token. `None` lets startup proceed; remote operations then
    /// fail at call time.
    pub token: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    /// Human-readable auth state for the banner and `/whoami`.
    pub fn auth_status(&self) -> &'static str {
        match &self.token {
            Some(_) => "token ✓",
            None => "not authenticated",
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory every operation path is relative to.
    pub root: PathBuf,
    pub llm: LlmConfig,
    /// Formatter command line; the target file is appended.
    pub formatter: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            llm: LlmConfig::default(),
            formatter: DEFAULT_FORMATTER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Config rooted at `root` with every other field defaulted.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Parse a formatter command line like `"npx prettier@3.4.2 --write"`.
    pub fn parse_formatter(line: &str) -> anyhow::Result<Vec<String>> {
        let parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if parts.is_empty() {
            anyhow::bail!("formatter command is empty");
        }
        Ok(parts)
    }
}
