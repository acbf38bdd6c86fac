pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// A single value returned by an aggregate query.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    /// Whole reals below 1e16 print with one decimal (`25.0`, not `25`).
    /// Every other real uses Rust's shortest round-trip decimal, never
    /// exponent notation (`0.00001`, `1e16` as `10000000000000000`). Null
    /// prints as a marker rather than a made-up number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str(crate::consts::NULL_MARKER),
            Scalar::Integer(n) => write!(f, "{n}"),
            Scalar::Real(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            Scalar::Real(x) => write!(f, "{x}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Read-only access to a relational data file.
#[async_trait]
pub trait StoreReader: Send + Sync {
    /// Run `query` with positional `params` against the database at `db` and
    /// return the first column of the first row. No rows is [`Scalar::Null`].
    async fn scalar(&self, db: &Path, query: &str, params: &[String]) -> Result<Scalar>;
}
