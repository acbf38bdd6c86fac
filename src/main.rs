use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use datawright::banner::{BannerInfo, print_banner, print_session_summary};
use datawright::commands::{self, CommandResult, SessionInfo};
use datawright::config::{Config, LlmConfig};
use datawright::consts::{
    DEFAULT_API_URL, DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_MODEL, DEFAULT_ROOT, TOKEN_ENV_VAR,
};
use datawright::engine::executor::{EngineConfig, TaskEngine};
use datawright::handler::{self, Response};
use datawright::llm::openai::ChatCompletionsClient;
use datawright::store::sqlite::SqliteReader;
use datawright::tools::shell::{ProcessRunner, ShellConfig};

#[derive(Parser)]
#[command(
    name = "datawright",
    version,
    about = "One sentence in, one file out."
)]
struct Cli {
    /// Data root every operation reads from and writes to
    #[arg(short, long, env = "DATAWRIGHT_ROOT", default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Completion model
    #[arg(long, env = "DATAWRIGHT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible chat completions URL
    #[arg(long, env = "DATAWRIGHT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Completion request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_LLM_TIMEOUT_SECS)]
    timeout: u64,

    /// Formatter command line; the target file is appended
    #[arg(long, env = "DATAWRIGHT_FORMATTER")]
    formatter: Option<String>,

    /// Run a single task and exit (non-interactive)
    #[arg(long)]
    run: Option<String>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(Config, Option<String>)> {
        let mut config = Config::with_root(self.root);
        config.llm = LlmConfig {
            token: std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()),
            api_url: self.api_url,
            model: self.model,
            timeout: Duration::from_secs(self.timeout),
        };
        if let Some(line) = &self.formatter {
            config.formatter = Config::parse_formatter(line)?;
        }
        Ok((config, self.run))
    }
}

fn print_response(resp: &Response) {
    if resp.is_success() {
        println!("=> success");
    } else {
        eprintln!(
            "error[{}]: {}",
            resp.body["kind"].as_str().unwrap_or("unknown"),
            resp.body["message"].as_str().unwrap_or_default()
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "datawright=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let (config, run) = Cli::parse().into_config()?;

    if config.llm.token.is_none() {
        tracing::warn!("{} is not set; remote operations will fail", TOKEN_ENV_VAR);
    }

    let shell = Arc::new(ProcessRunner::new(ShellConfig {
        working_dir: config.root.clone(),
        ..ShellConfig::default()
    }));
    let llm = Arc::new(ChatCompletionsClient::new(config.llm.clone())?);
    let store = Arc::new(SqliteReader::new());
    let engine = TaskEngine::new(EngineConfig::from(&config), shell, llm, store);

    // Single task mode
    if let Some(task) = run {
        let resp = handler::handle(&engine, &task).await;
        print_response(&resp);
        if !resp.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let formatter = config.formatter.join(" ");
    print_banner(&BannerInfo {
        root: &config.root,
        model: &config.llm.model,
        auth_status: config.llm.auth_status(),
        formatter: &formatter,
    });

    let info = SessionInfo {
        root: &config.root,
        model: &config.llm.model,
        auth_status: config.llm.auth_status(),
        formatter: &formatter,
    };

    let (mut succeeded, mut failed) = (0usize, 0usize);

    // REPL — async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\ndatawright> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let task = line.trim();
        if task.is_empty() {
            continue;
        }

        match commands::dispatch(task, &info) {
            CommandResult::Quit => break,
            CommandResult::Handled => continue,
            CommandResult::NotACommand => {}
        }

        // Ctrl+C during a task aborts the task, not the REPL
        tokio::select! {
            resp = handler::handle(&engine, task) => {
                print_response(&resp);
                if resp.is_success() {
                    succeeded += 1;
                } else {
                    failed += 1;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n\ninterrupted");
            }
        }
    }

    print_session_summary(succeeded, failed);
    Ok(())
}
