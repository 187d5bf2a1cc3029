//! Stream interpreter: reduces one fragment sequence into a [`TurnOutcome`].

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::events::CallbackSink;
use super::outcome::{NextAction, TurnOutcome};
use crate::error::TillerError;
use crate::provider::FragmentStream;
use crate::types::{FinishReason, FunctionCall, GenerationSettings, GroundingMetadata, Usage};

/// Consume one model turn's fragment sequence.
///
/// The sequence is pulled to exhaustion exactly once, with the cancellation
/// token checked between pulls. Text fragments accumulate and are surfaced
/// through [`CallbackSink::on_text_chunk`] as the full accumulated text
/// (`prior_text` plus everything seen this turn). Function-call fragments
/// are collected in arrival order.
///
/// On exhaustion the outcome is classified, in priority order: collected
/// function calls, then truncation (a `Length` finish or the continuation
/// marker in the text), then an unapproved plan checkpoint, then
/// completion.
pub async fn interpret(
    mut fragments: FragmentStream,
    cancel: &CancellationToken,
    prior_text: &str,
    settings: &GenerationSettings,
    plan_approved: bool,
    sink: &dyn CallbackSink,
) -> TurnOutcome {
    let mut acc = String::new();
    let mut calls: Vec<FunctionCall> = Vec::new();
    let mut finish: Option<FinishReason> = None;
    let mut grounding: Option<GroundingMetadata> = None;
    let mut usage = Usage::default();

    loop {
        if cancel.is_cancelled() {
            return TurnOutcome::Aborted;
        }
        let Some(item) = fragments.next().await else {
            break;
        };
        match item {
            Ok(fragment) => {
                if let Some(text) = fragment.text {
                    if !text.is_empty() {
                        acc.push_str(&text);
                        sink.on_text_chunk(&format!("{prior_text}{acc}"));
                    }
                }
                calls.extend(fragment.function_calls);
                if let Some(reason) = fragment.finish {
                    finish = Some(reason);
                }
                if let Some(meta) = fragment.grounding {
                    grounding = Some(meta);
                }
                if let Some(turn_usage) = fragment.usage {
                    usage.merge(&turn_usage);
                }
            }
            Err(error) => {
                if cancel.is_cancelled() {
                    return TurnOutcome::Aborted;
                }
                tracing::warn!(error = %error, "fragment sequence failed mid-consumption");
                return TurnOutcome::Error { error };
            }
        }
    }

    tracing::debug!(
        text_len = acc.len(),
        calls = calls.len(),
        finish = finish.map(|f| f.to_string()).as_deref(),
        "turn stream exhausted"
    );

    if !calls.is_empty() {
        return TurnOutcome::Running {
            text: acc,
            usage,
            next: NextAction::AppendToolResults { calls },
        };
    }

    if matches!(finish, Some(FinishReason::Safety)) {
        return TurnOutcome::Error {
            error: TillerError::Stream("model output blocked by safety filter".into()),
        };
    }

    let truncated =
        matches!(finish, Some(FinishReason::Length)) || acc.contains(&settings.continuation_marker);
    if truncated {
        let stripped = strip_marker(&acc, &settings.continuation_marker);
        let accumulated = format!("{prior_text}{stripped}");
        return TurnOutcome::Running {
            text: stripped,
            usage,
            next: NextAction::ContinueTruncated { accumulated },
        };
    }

    if settings.plan_approval && !plan_approved && acc.contains(&settings.plan_marker) {
        let plan = strip_marker(&acc, &settings.plan_marker).trim().to_string();
        return TurnOutcome::Running {
            text: acc,
            usage,
            next: NextAction::ContinueEditedPlan { plan },
        };
    }

    TurnOutcome::Complete {
        text: format!("{prior_text}{acc}"),
        grounding,
        usage,
    }
}

/// Remove every occurrence of a literal marker.
fn strip_marker(text: &str, marker: &str) -> String {
    text.replace(marker, "")
}
