//! Tool dispatch fan-out.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::events::{CallbackSink, ToolCallEvent};
use crate::error::TillerError;
use crate::tools::ToolExecutor;
use crate::types::FunctionResult;

/// How a dispatch ended.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Every invocation settled; results are in event-creation order.
    Settled(Vec<FunctionResult>),
    /// Cancellation observed before submission; no tool was invoked.
    Aborted,
}

/// Execute a batch of tool invocations concurrently.
///
/// Each invocation is isolated: an executor error becomes that event's
/// textual failure result and does not disturb its siblings. The sink's
/// `on_tool_result` fires per invocation as it settles, in settle order;
/// the returned results are assembled in event-creation order. Once
/// submitted, the fan-out only returns after every invocation has settled,
/// even if cancellation arrives mid-flight.
pub async fn dispatch(
    events: &mut [ToolCallEvent],
    executor: &Arc<dyn ToolExecutor>,
    cancel: &CancellationToken,
    sink: &Arc<dyn CallbackSink>,
) -> DispatchOutcome {
    if cancel.is_cancelled() {
        return DispatchOutcome::Aborted;
    }

    let invocations: Vec<_> = events
        .iter()
        .map(|event| {
            let executor = executor.clone();
            let sink = sink.clone();
            let event_id = event.id.clone();
            let call = event.call.clone();
            async move {
                let text = match executor.execute(&call.name, &call.args).await {
                    Ok(text) => text,
                    Err(error) => {
                        tracing::warn!(tool = %call.name, error = %error, "tool invocation failed");
                        format!("Tool execution failed. Reason: {}", failure_reason(&error))
                    }
                };
                sink.on_tool_result(&event_id, &text);
                (text, Utc::now())
            }
        })
        .collect();

    let settled = futures::future::join_all(invocations).await;

    let mut results = Vec::with_capacity(events.len());
    for (event, (text, finished_at)) in events.iter_mut().zip(settled) {
        event.result = Some(text.clone());
        event.finished_at = Some(finished_at);
        results.push(FunctionResult::new(event.call.name.clone(), text));
    }
    DispatchOutcome::Settled(results)
}

/// The human-readable reason fed back to the model for a failed invocation.
fn failure_reason(error: &TillerError) -> String {
    match error {
        TillerError::ToolExecution { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
