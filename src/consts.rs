//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Default data root when `--root` is not given.
pub const DEFAULT_ROOT: &str = "/data";

/// Environment variable holding the bearer token for the completion service.
pub const TOKEN_ENV_VAR: &str = "AIPROXY_TOKEN";

/// OpenAI-compatible chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// HTTP timeout for completion requests, in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Formatter invocation. The target path is appended as the last argument.
pub const DEFAULT_FORMATTER: &[&str] = &["npx", "prettier@3.4.2", "--write"];

/// Maximum number of log files read by the recent-logs operation.
pub const RECENT_LOG_LIMIT: usize = 10;

/// Ticket category summed by the gold-sales operation.
pub const GOLD_TICKET_TYPE: &str = "Gold";

/// String written when an aggregate query returns no value.
pub const NULL_MARKER: &str = "null";
