use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Prefix of a level-one markdown heading.
const H1_PREFIX: &str = "# ";

/// Text after the first line starting with `"# "`, trimmed.
pub fn first_h1(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|line| line.strip_prefix(H1_PREFIX))
        .map(str::trim)
}

/// Map each `.md` file directly in `dir` to its first H1 title.
/// Files without an H1 are left out. Keys are ordered by file name.
pub async fn title_index(dir: &Path) -> Result<BTreeMap<String, String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to list {}", dir.display()))?;

    let mut index = BTreeMap::new();
    while let Some(entry) = entries.next_entry().await? {
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.ends_with(".md") || !entry.metadata().await?.is_file() {
            continue;
        }
        let content = tokio::fs::read_to_string(entry.path())
            .await
            .with_context(|| format!("failed to read {}", entry.path().display()))?;
        if let Some(title) = first_h1(&content) {
            index.insert(name, title.to_string());
        }
    }
    Ok(index)
}

/// Render the index as 2-space indented JSON.
pub fn render_index(index: &BTreeMap<String, String>) -> Result<String> {
    Ok(serde_json::to_string_pretty(index)?)
}
