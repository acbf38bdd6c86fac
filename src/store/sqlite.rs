use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use super::{Scalar, StoreReader};

/// SQLite-backed reader. Every call opens the file read-only and closes it
/// when done, so no connection state outlives a request.
#[derive(Debug, Default)]
pub struct SqliteReader;

impl SqliteReader {
    pub fn new() -> Self {
        Self
    }

    fn query_scalar(db: &Path, query: &str, params: &[String]) -> Result<Scalar> {
        let conn = Connection::open_with_flags(
            db,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open database {}", db.display()))?;

        let mut stmt = conn.prepare(query).context("failed to prepare query")?;
        let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
        let Some(row) = rows.next()? else {
            return Ok(Scalar::Null);
        };

        let value = match row.get_ref(0)? {
            ValueRef::Null => Scalar::Null,
            ValueRef::Integer(n) => Scalar::Integer(n),
            ValueRef::Real(x) => Scalar::Real(x),
            ValueRef::Text(bytes) => Scalar::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(_) => anyhow::bail!("query returned a blob, expected a scalar"),
        };
        Ok(value)
    }
}

#[async_trait]
impl StoreReader for SqliteReader {
    async fn scalar(&self, db: &Path, query: &str, params: &[String]) -> Result<Scalar> {
        tracing::debug!(db = %db.display(), query, ?params, "running aggregate query");
        let db = db.to_path_buf();
        let query = query.to_string();
        let params = params.to_vec();
        tokio::task::spawn_blocking(move || Self::query_scalar(&db, &query, &params))
            .await
            .context("query task panicked")?
    }
}
