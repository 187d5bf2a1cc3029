//! Error types for Tiller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primary error type for all Tiller operations.
#[derive(Error, Debug)]
pub enum TillerError {
    /// The model provider could not be reached or rejected the request.
    /// Fatal to the run.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The fragment sequence failed mid-consumption. Fatal to the run,
    /// distinguished from cancellation-induced termination.
    #[error("Stream error: {0}")]
    Stream(String),

    /// An individual tool invocation failed. Isolated and non-fatal; the
    /// dispatcher converts it into a textual result for the model.
    #[error("Tool execution error: {tool}: {message}")]
    ToolExecution { tool: String, message: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Turn limit of {0} exceeded")]
    TurnLimit(usize),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl TillerError {
    /// Create a tool execution error.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Provider(_) => ErrorCategory::Provider,
            Self::Stream(_) => ErrorCategory::Stream,
            Self::ToolExecution { .. } => ErrorCategory::ToolExecution,
            Self::InvalidSettings(_) | Self::TurnLimit(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::InvalidState(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this error terminates a run. Tool failures never do; they
    /// re-enter the conversation as textual results.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ToolExecution { .. })
    }
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Provider,
    Stream,
    ToolExecution,
    Configuration,
    Serialization,
    Timeout,
    Unknown,
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TillerError>;
