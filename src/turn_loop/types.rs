//! Run identity, status, result, and handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::types::{Turn, Usage};

/// Unique run identifier.
pub type RunId = Uuid;

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
    Canceled,
}

/// Result of a run.
///
/// `turns` is the final conversation history, consistent up to the last
/// fully completed turn; the caller decides whether to persist, resume, or
/// discard it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default)]
    pub finished_at: DateTime<Utc>,
}

impl RunResult {
    pub fn completed(final_text: impl Into<String>, turns: Vec<Turn>, usage: Usage) -> Self {
        Self {
            status: RunStatus::Completed,
            final_text: Some(final_text.into()),
            error: None,
            turns,
            usage,
            finished_at: Utc::now(),
        }
    }

    pub fn failed(error: impl Into<String>, turns: Vec<Turn>, usage: Usage) -> Self {
        Self {
            status: RunStatus::Failed,
            final_text: None,
            error: Some(error.into()),
            turns,
            usage,
            finished_at: Utc::now(),
        }
    }

    pub fn canceled(turns: Vec<Turn>, usage: Usage) -> Self {
        Self {
            status: RunStatus::Canceled,
            final_text: None,
            error: None,
            turns,
            usage,
            finished_at: Utc::now(),
        }
    }
}

/// Handle for an in-flight spawned run.
///
/// The caller holds the handle and its cancellation token; there is no
/// global registry of in-flight runs.
#[derive(Debug)]
pub struct RunHandle {
    run_id: RunId,
    cancel: CancellationToken,
    result_rx: oneshot::Receiver<RunResult>,
}

impl RunHandle {
    pub(crate) fn new(
        run_id: RunId,
        cancel: CancellationToken,
    ) -> (Self, oneshot::Sender<RunResult>) {
        let (result_tx, result_rx) = oneshot::channel();
        (
            Self {
                run_id,
                cancel,
                result_rx,
            },
            result_tx,
        )
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// The run's cancellation token.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Request cooperative cancellation. Idempotent.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    /// Wait for the run to reach a terminal state.
    pub async fn wait(self) -> RunResult {
        self.result_rx
            .await
            .unwrap_or_else(|_| RunResult::canceled(Vec::new(), Usage::default()))
    }
}
