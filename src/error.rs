//! Failure taxonomy for task execution.
//!
//! Collaborators and helpers return [`anyhow::Result`]; the engine converts
//! at the operation boundary into a [`TaskError`], which carries the kind,
//! the operation that failed and a human-readable message.

use std::path::PathBuf;

use crate::catalog::InputKind;

/// Why a task did not complete.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("unrecognized task: {task}")]
    UnrecognizedTask { task: String },

    #[error("{kind} {} not found", path.display())]
    MissingInput { path: PathBuf, kind: InputKind },

    #[error("{operation}: invalid input: {message}")]
    InvalidInput {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: tool failed: {message}")]
    ToolFailure {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: remote service failed: {message}")]
    RemoteServiceFailure {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: i/o error: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },
}

impl TaskError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskError::UnrecognizedTask { .. } => "unrecognized_task",
            TaskError::MissingInput { .. } => "missing_input",
            TaskError::InvalidInput { .. } => "invalid_input",
            TaskError::ToolFailure { .. } => "tool_failure",
            TaskError::RemoteServiceFailure { .. } => "remote_service_failure",
            TaskError::Io { .. } => "io",
        }
    }

    /// HTTP-style status for the response.
    pub fn status(&self) -> u16 {
        match self {
            TaskError::UnrecognizedTask { .. } => 400,
            TaskError::MissingInput { .. } => 404,
            TaskError::InvalidInput { .. } => 422,
            TaskError::ToolFailure { .. } | TaskError::Io { .. } => 500,
            TaskError::RemoteServiceFailure { .. } => 502,
        }
    }

    pub(crate) fn invalid(operation: &'static str, err: anyhow::Error) -> Self {
        TaskError::InvalidInput {
            operation,
            message: format!("{err:#}"),
        }
    }

    pub(crate) fn tool(operation: &'static str, err: anyhow::Error) -> Self {
        TaskError::ToolFailure {
            operation,
            message: format!("{err:#}"),
        }
    }

    pub(crate) fn remote(operation: &'static str, err: anyhow::Error) -> Self {
        TaskError::RemoteServiceFailure {
            operation,
            message: format!("{err:#}"),
        }
    }

    pub(crate) fn io(operation: &'static str, err: impl std::fmt::Display) -> Self {
        TaskError::Io {
            operation,
            message: err.to_string(),
        }
    }
}
