//! Turn driver: the top-level control loop.
//!
//! One run is a single sequential control flow over the states
//! requesting-model, interpreting-stream, then one of dispatching-tools,
//! awaiting-plan-edit, or continuing-truncated, looping back until a
//! terminal completed, failed, or canceled state. The driver exclusively
//! owns the conversation history for the run and only ever appends to it.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::approvals::{resolve_plan, PlanApprovalHandler, PlanDecision};
use super::dispatch::{dispatch, DispatchOutcome};
use super::events::{CallbackSink, ToolCallEvent};
use super::interpreter::interpret;
use super::outcome::{NextAction, TurnOutcome};
use super::types::{RunHandle, RunId, RunResult};
use crate::error::TillerError;
use crate::provider::{ModelProvider, ModelRequest};
use crate::tools::ToolExecutor;
use crate::types::{GenerationSettings, Part, Turn, Usage};

/// Synthetic caller text requesting continuation of truncated output.
const CONTINUE_REQUEST: &str = "Continue the previous response exactly where it left off.";

/// Synthetic caller text approving a plan for execution.
const PLAN_APPROVED_REQUEST: &str = "The plan is approved. Proceed with execution.";

/// Drives turns until a terminal outcome is reached or cancellation is
/// observed.
#[derive(Clone)]
pub struct TurnDriver {
    provider: Arc<dyn ModelProvider>,
    executor: Arc<dyn ToolExecutor>,
    plan_handler: Option<PlanApprovalHandler>,
    ids: Arc<dyn crate::util::IdGenerator>,
}

impl TurnDriver {
    pub fn new(provider: Arc<dyn ModelProvider>, executor: Arc<dyn ToolExecutor>) -> Self {
        Self {
            provider,
            executor,
            plan_handler: None,
            ids: Arc::new(crate::util::UuidIdGenerator),
        }
    }

    /// Configure the plan approval handler. Without one, a gated plan
    /// auto-approves unedited.
    pub fn with_plan_handler(mut self, handler: PlanApprovalHandler) -> Self {
        self.plan_handler = Some(handler);
        self
    }

    /// Substitute the event identifier source (deterministic in tests).
    pub fn with_id_generator(mut self, ids: Arc<dyn crate::util::IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Run to a terminal state.
    ///
    /// Returns only once the run has completed, failed, or been canceled;
    /// exactly one terminal sink callback fires before it returns.
    pub async fn run(
        &self,
        history: Vec<Turn>,
        settings: GenerationSettings,
        cancel: CancellationToken,
        sink: Arc<dyn CallbackSink>,
    ) -> RunResult {
        self.run_inner(Uuid::new_v4(), history, settings, cancel, sink)
            .await
    }

    /// Start a run on a background task.
    ///
    /// The returned handle owns the run's cancellation token; abort and
    /// wait through it.
    pub fn spawn(
        &self,
        history: Vec<Turn>,
        settings: GenerationSettings,
        sink: Arc<dyn CallbackSink>,
    ) -> RunHandle {
        let run_id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let (handle, result_tx) = RunHandle::new(run_id, cancel.clone());
        let driver = self.clone();
        tokio::spawn(async move {
            let result = driver
                .run_inner(run_id, history, settings, cancel, sink)
                .await;
            let _ = result_tx.send(result);
        });
        handle
    }

    async fn run_inner(
        &self,
        run_id: RunId,
        mut history: Vec<Turn>,
        settings: GenerationSettings,
        cancel: CancellationToken,
        sink: Arc<dyn CallbackSink>,
    ) -> RunResult {
        tracing::debug!(
            run_id = %run_id,
            provider = self.provider.provider_name(),
            turns = history.len(),
            "run start"
        );

        let mut usage = Usage::default();

        if let Err(error) = settings.validate() {
            sink.on_error(&error);
            return RunResult::failed(error.to_string(), history, usage);
        }

        // Text carried across truncated turns; the final emitted text is
        // the concatenation.
        let mut carried = String::new();
        // The plan gate fires at most once per run.
        let mut plan_approved = false;
        let mut turn_index = 0usize;

        loop {
            if cancel.is_cancelled() {
                sink.on_cancel();
                return RunResult::canceled(history, usage);
            }

            turn_index += 1;
            if turn_index > settings.max_turns {
                let error = TillerError::TurnLimit(settings.max_turns);
                tracing::warn!(run_id = %run_id, error = %error, "run failed");
                sink.on_error(&error);
                return RunResult::failed(error.to_string(), history, usage);
            }

            let request = ModelRequest {
                turns: history.clone(),
                settings: settings.clone(),
            };
            let fragments = match self.provider.generate(&request).await {
                Ok(fragments) => fragments,
                Err(error) => {
                    if cancel.is_cancelled() {
                        sink.on_cancel();
                        return RunResult::canceled(history, usage);
                    }
                    tracing::warn!(run_id = %run_id, error = %error, "provider request failed");
                    sink.on_error(&error);
                    return RunResult::failed(error.to_string(), history, usage);
                }
            };
            if cancel.is_cancelled() {
                sink.on_cancel();
                return RunResult::canceled(history, usage);
            }

            let outcome = interpret(
                fragments,
                &cancel,
                &carried,
                &settings,
                plan_approved,
                sink.as_ref(),
            )
            .await;

            match outcome {
                TurnOutcome::Running {
                    text,
                    usage: turn_usage,
                    next,
                } => {
                    usage.merge(&turn_usage);
                    match next {
                        NextAction::AppendToolResults { calls } => {
                            let mut events: Vec<ToolCallEvent> = calls
                                .into_iter()
                                .map(|call| ToolCallEvent::new(self.ids.next_id(), call))
                                .collect();
                            tracing::debug!(
                                run_id = %run_id,
                                turn = turn_index,
                                calls = events.len(),
                                "dispatching tool calls"
                            );

                            let mut parts = Vec::with_capacity(events.len() + 1);
                            if !text.is_empty() {
                                parts.push(Part::Text { text });
                            }
                            parts.extend(events.iter().map(|e| Part::FunctionCall(e.call.clone())));
                            history.push(Turn::model_parts(parts));

                            sink.on_new_tool_calls(&events);
                            match dispatch(&mut events, &self.executor, &cancel, &sink).await {
                                DispatchOutcome::Aborted => {
                                    sink.on_cancel();
                                    return RunResult::canceled(history, usage);
                                }
                                DispatchOutcome::Settled(results) => {
                                    // Results settled after cancellation are
                                    // kept for diagnostics via the sink but
                                    // never re-enter the conversation.
                                    if cancel.is_cancelled() {
                                        sink.on_cancel();
                                        return RunResult::canceled(history, usage);
                                    }
                                    history.push(Turn::caller_results(results));
                                }
                            }
                        }
                        NextAction::ContinueEditedPlan { plan } => {
                            let decision =
                                resolve_plan(run_id, plan, self.plan_handler.as_ref()).await;
                            if cancel.is_cancelled() {
                                sink.on_cancel();
                                return RunResult::canceled(history, usage);
                            }
                            match decision {
                                PlanDecision::Cancel => {
                                    tracing::debug!(run_id = %run_id, "plan declined, run canceled");
                                    cancel.cancel();
                                    sink.on_cancel();
                                    return RunResult::canceled(history, usage);
                                }
                                PlanDecision::Approved { text: plan_text } => {
                                    sink.on_text_chunk(&plan_text);
                                    history.push(Turn::model(plan_text));
                                    history.push(Turn::caller(PLAN_APPROVED_REQUEST));
                                    plan_approved = true;
                                }
                            }
                        }
                        NextAction::ContinueTruncated { accumulated } => {
                            tracing::debug!(
                                run_id = %run_id,
                                turn = turn_index,
                                carried_len = accumulated.len(),
                                "continuing truncated generation"
                            );
                            if !text.is_empty() {
                                history.push(Turn::model(text));
                            }
                            history.push(Turn::caller(CONTINUE_REQUEST));
                            carried = accumulated;
                        }
                    }
                }
                TurnOutcome::Complete {
                    text,
                    grounding,
                    usage: turn_usage,
                } => {
                    usage.merge(&turn_usage);
                    let final_text = text.replace(&settings.continuation_marker, "");
                    sink.on_complete(&final_text, grounding.as_ref());
                    tracing::debug!(run_id = %run_id, turns = turn_index, "run completed");
                    return RunResult::completed(final_text, history, usage);
                }
                TurnOutcome::Error { error } => {
                    if cancel.is_cancelled() {
                        sink.on_cancel();
                        return RunResult::canceled(history, usage);
                    }
                    tracing::warn!(run_id = %run_id, error = %error, "run failed");
                    sink.on_error(&error);
                    return RunResult::failed(error.to_string(), history, usage);
                }
                TurnOutcome::Aborted => {
                    sink.on_cancel();
                    return RunResult::canceled(history, usage);
                }
            }
        }
    }
}

impl std::fmt::Debug for TurnDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnDriver")
            .field("provider", &self.provider.provider_name())
            .field("plan_handler", &self.plan_handler.is_some())
            .finish()
    }
}
