//! Maps a free-text instruction to one catalog entry.

use crate::catalog::{CATALOG, Operation};
use crate::error::TaskError;

/// Return the first operation, in declaration order, whose phrase occurs
/// in the lowercased instruction.
pub fn resolve(task: &str) -> Result<&'static Operation, TaskError> {
    let lower = task.to_lowercase();
    CATALOG
        .iter()
        .find(|op| lower.contains(op.phrase))
        .ok_or_else(|| TaskError::UnrecognizedTask {
            task: task.to_string(),
        })
}
