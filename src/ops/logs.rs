use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Suffix a file must carry to count as a log.
pub const LOG_SUFFIX: &str = ".log";

/// `.log` files directly in `dir`, most recently modified first.
/// Equal timestamps fall back to file name so the order is reproducible.
pub async fn recent_log_files(dir: &Path, limit: usize) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to list {}", dir.display()))?;

    let mut logs: Vec<(SystemTime, PathBuf)> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(LOG_SUFFIX));
        if !is_log {
            continue;
        }
        let meta = entry.metadata().await?;
        if !meta.is_file() {
            continue;
        }
        logs.push((meta.modified()?, path));
    }

    logs.sort_by(|(ta, pa), (tb, pb)| tb.cmp(ta).then_with(|| pa.cmp(pb)));
    logs.truncate(limit);
    Ok(logs.into_iter().map(|(_, path)| path).collect())
}

/// First line of a file with surrounding whitespace removed. Empty files
/// yield an empty string.
pub async fn first_line(path: &Path) -> Result<String> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(line.trim().to_string())
}

/// First lines of the `limit` most recent logs, newline-joined.
pub async fn recent_first_lines(dir: &Path, limit: usize) -> Result<String> {
    let files = recent_log_files(dir, limit).await?;
    let mut lines = Vec::with_capacity(files.len());
    for file in &files {
        lines.push(first_line(file).await?);
    }
    Ok(lines.join("\n"))
}
