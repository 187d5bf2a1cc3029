//! Tool executor contract.

use async_trait::async_trait;

use crate::error::TillerError;

/// Executes named tool invocations on behalf of the dispatcher.
///
/// The orchestration core treats any returned error identically regardless
/// of cause: it becomes a textual failure result for that invocation and is
/// fed back to the model.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, name: &str, args: &serde_json::Value) -> Result<String, TillerError>;
}
