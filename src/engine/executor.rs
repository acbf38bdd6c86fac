use async_trait::async_trait;
use chrono::Weekday;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Engine;
use super::locks::PathLocks;
use crate::catalog::{InputKind, Operation, OperationId};
use crate::consts::RECENT_LOG_LIMIT;
use crate::error::TaskError;
use crate::llm::{LlmClient, LlmRequest};
use crate::ops::{contacts, dates, docs, logs, remote, tickets};
use crate::resolver;
use crate::store::StoreReader;
use crate::tools::{ShellRunner, ToolCall};

/// Settings the engine needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub root: PathBuf,
    pub formatter: Vec<String>,
}

impl From<&crate::config::Config> for EngineConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            root: config.root.clone(),
            formatter: config.formatter.clone(),
        }
    }
}

/// Runs catalog operations against a data root.
///
/// Wires together a resolver, the three collaborators, and a per-output
/// lock table. Holds no other state between invocations.
pub struct TaskEngine {
    config: EngineConfig,
    shell: Arc<dyn ShellRunner>,
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn StoreReader>,
    locks: PathLocks,
}

impl TaskEngine {
    pub fn new(
        config: EngineConfig,
        shell: Arc<dyn ShellRunner>,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn StoreReader>,
    ) -> Self {
        Self {
            config,
            shell,
            llm,
            store,
            locks: PathLocks::new(),
        }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.config.root.join(relative)
    }

    /// Run an already-resolved operation: preconditions, algorithm, output.
    pub async fn execute(&self, op: &'static Operation) -> Result<(), TaskError> {
        let outputs: Vec<PathBuf> = op.outputs.iter().map(|o| self.path(o)).collect();
        let _guards = self.locks.acquire(&outputs).await;

        self.check_preconditions(op).await?;

        let Some(contents) = self.compute(op).await? else {
            return Ok(());
        };

        // Every catalog entry that produces contents declares exactly one output.
        for output in outputs {
            write_output(output, contents.clone().into_bytes())
                .await
                .map_err(|e| TaskError::io(op.name, e))?;
        }
        Ok(())
    }

    async fn check_preconditions(&self, op: &Operation) -> Result<(), TaskError> {
        for input in op.inputs {
            let path = self.path(input.path);
            let present = match tokio::fs::metadata(&path).await {
                Ok(meta) => match input.kind {
                    InputKind::File => meta.is_file(),
                    InputKind::Dir => meta.is_dir(),
                },
                Err(_) => false,
            };
            if !present {
                return Err(TaskError::MissingInput {
                    path,
                    kind: input.kind,
                });
            }
        }
        Ok(())
    }

    /// Produce the output contents. `None` means the operation wrote in place.
    async fn compute(&self, op: &'static Operation) -> Result<Option<String>, TaskError> {
        let name = op.name;
        let output = match op.id {
            OperationId::FormatMarkdown => {
                let target = self.path("format.md");
                let call = ToolCall::with_target(&self.config.formatter, &target)
                    .map_err(|e| TaskError::tool(name, e))?;
                self.shell
                    .run(&call)
                    .await
                    .map_err(|e| TaskError::tool(name, e))?;
                return Ok(None);
            }
            OperationId::CountWednesdays => {
                let content = self.read_text(name, "dates.txt").await?;
                dates::count_weekday(&content, Weekday::Wed)
                    .map_err(|e| TaskError::invalid(name, e))?
                    .to_string()
            }
            OperationId::SortContacts => {
                let content = self.read_text(name, "contacts.json").await?;
                contacts::sort_contacts(&content).map_err(|e| TaskError::invalid(name, e))?
            }
            OperationId::RecentLogs => {
                logs::recent_first_lines(&self.path("logs"), RECENT_LOG_LIMIT)
                    .await
                    .map_err(|e| TaskError::io(name, format!("{e:#}")))?
            }
            OperationId::MarkdownIndex => {
                let index = docs::title_index(&self.path("docs"))
                    .await
                    .map_err(|e| TaskError::io(name, format!("{e:#}")))?;
                docs::render_index(&index).map_err(|e| TaskError::io(name, format!("{e:#}")))?
            }
            OperationId::ExtractEmailSender => {
                let email = self.read_text(name, "email.txt").await?;
                let reply = self.ask(name, &remote::email_sender_request(&email)).await?;
                remote::email_sender_output(&reply)
            }
            OperationId::ExtractCreditCard => {
                let image = self.read_bytes(name, "credit-card.png").await?;
                let reply = self.ask(name, &remote::credit_card_request(image)).await?;
                remote::credit_card_output(&reply)
            }
            OperationId::SimilarComments => {
                let comments = self.read_text(name, "comments.txt").await?;
                let reply = self
                    .ask(name, &remote::similar_comments_request(&comments))
                    .await?;
                remote::similar_comments_output(&reply)
            }
            OperationId::GoldTicketSales => self
                .store
                .scalar(
                    &self.path("ticket-sales.db"),
                    tickets::REVENUE_QUERY,
                    &tickets::gold_params(),
                )
                .await
                .map_err(|e| TaskError::tool(name, e))?
                .to_string(),
        };
        Ok(Some(output))
    }

    async fn ask(&self, name: &'static str, request: &LlmRequest) -> Result<String, TaskError> {
        self.llm
            .complete(request)
            .await
            .map_err(|e| TaskError::remote(name, e))
    }

    async fn read_text(&self, name: &'static str, relative: &str) -> Result<String, TaskError> {
        let path = self.path(relative);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| {
                TaskError::io(name, format!("failed to read {}: {}", path.display(), e))
            })
    }

    async fn read_bytes(&self, name: &'static str, relative: &str) -> Result<Vec<u8>, TaskError> {
        let path = self.path(relative);
        tokio::fs::read(&path)
            .await
            .map_err(|e| {
                TaskError::io(name, format!("failed to read {}: {}", path.display(), e))
            })
    }
}

#[async_trait]
impl Engine for TaskEngine {
    async fn run(&self, task: &str) -> Result<(), TaskError> {
        let op = resolver::resolve(task).inspect_err(|e| {
            tracing::warn!(kind = e.kind(), task, "no operation matches task");
        })?;
        tracing::info!(operation = op.name, "resolved task");

        match self.execute(op).await {
            Ok(()) => {
                tracing::info!(operation = op.name, "operation completed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    operation = op.name,
                    kind = e.kind(),
                    error = %e,
                    "operation failed"
                );
                Err(e)
            }
        }
    }
}

/// Run [`write_atomic`] off the async runtime.
async fn write_output(path: PathBuf, contents: Vec<u8>) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || write_atomic(&path, &contents))
        .await
        .map_err(std::io::Error::other)?
}

/// Write `contents` to a temp file next to `path`, then rename over it.
/// Readers see either the old file or the complete new one.
fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
