use anyhow::{Result, bail};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

use super::{ShellRunner, ToolCall};

/// Maximum output size in bytes quoted in an error. Anything beyond this is truncated.
const MAX_OUTPUT_BYTES: usize = 4_000;

/// Safe environment variables to pass through. Everything else is stripped.
const SAFE_ENV_VARS: &[&str] = &[
    "PATH",
    "HOME",
    "USER",
    "SHELL",
    "LANG",
    "LC_ALL",
    "TERM",
    "TZ",
    "NODE_PATH",
    "NPM_CONFIG_CACHE",
];

/// Configuration for the process runner.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub working_dir: PathBuf,
    pub max_output_bytes: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from(crate::consts::DEFAULT_ROOT),
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }
}

/// Spawns real processes with a sanitized environment.
pub struct ProcessRunner {
    config: ShellConfig,
}

impl ProcessRunner {
    pub fn new(config: ShellConfig) -> Self {
        Self { config }
    }

    fn truncate_output(output: &str, max_bytes: usize) -> String {
        if output.len() <= max_bytes {
            return output.to_string();
        }
        let mut end = max_bytes;
        while !output.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}\n\n[truncated: showing {}/{} bytes]",
            &output[..end],
            end,
            output.len()
        )
    }

    fn filtered_env() -> Vec<(String, String)> {
        SAFE_ENV_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|val| (key.to_string(), val)))
            .collect()
    }
}

#[async_trait]
impl ShellRunner for ProcessRunner {
    async fn run(&self, call: &ToolCall) -> Result<()> {
        tracing::debug!(program = %call.program, args = ?call.args, "spawning tool");

        let output = Command::new(&call.program)
            .args(&call.args)
            .current_dir(&self.config.working_dir)
            .env_clear()
            .envs(Self::filtered_env())
            .output()
            .await
            .map_err(|e| anyhow::anyhow!("failed to spawn {}: {}", call.program, e))?;

        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{} exited with code {}\nstdout: {}\nstderr: {}",
            call.program,
            output.status.code().unwrap_or(-1),
            Self::truncate_output(&stdout, self.config.max_output_bytes),
            Self::truncate_output(&stderr, self.config.max_output_bytes)
        )
    }
}
