//! Tool call events and the callback sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TillerError;
use crate::types::{FunctionCall, GroundingMetadata};

/// Record of one requested tool invocation and its eventual result.
///
/// Created when the driver wraps an extracted function call; the result is
/// attached exactly once by the dispatcher. Events are forwarded to the
/// sink for external bookkeeping and never deleted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallEvent {
    pub id: String,
    pub call: FunctionCall,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl ToolCallEvent {
    pub fn new(id: impl Into<String>, call: FunctionCall) -> Self {
        Self {
            id: id.into(),
            call,
            result: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }
}

/// Observer for everything a run makes externally visible.
///
/// All calls are fire-and-forget from the driver's perspective. The
/// driver's own emissions are sequential, but [`on_tool_result`] may be
/// invoked from concurrently settling invocations, so implementations must
/// tolerate concurrent calls. Exactly one of [`on_complete`], [`on_error`],
/// [`on_cancel`] fires per run, and it fires last.
///
/// [`on_tool_result`]: CallbackSink::on_tool_result
/// [`on_complete`]: CallbackSink::on_complete
/// [`on_error`]: CallbackSink::on_error
/// [`on_cancel`]: CallbackSink::on_cancel
pub trait CallbackSink: Send + Sync {
    /// Full accumulated text after each text fragment (including text
    /// carried over from truncated turns).
    fn on_text_chunk(&self, _text: &str) {}

    /// A model turn requested these tool invocations.
    fn on_new_tool_calls(&self, _events: &[ToolCallEvent]) {}

    /// One invocation settled, success or isolated failure.
    fn on_tool_result(&self, _event_id: &str, _result: &str) {}

    fn on_complete(&self, _final_text: &str, _grounding: Option<&GroundingMetadata>) {}

    fn on_error(&self, _error: &TillerError) {}

    fn on_cancel(&self) {}
}

/// Sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CallbackSink for NullSink {}
