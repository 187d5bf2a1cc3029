//! Interpreted turn outcomes.

use crate::error::TillerError;
use crate::types::{FunctionCall, GroundingMetadata, Usage};

/// What one interpreted model turn amounts to.
///
/// Produced fresh by the interpreter for each turn, consumed immediately by
/// the driver, never persisted.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The run continues; `text` is this turn's accumulated text.
    Running {
        text: String,
        usage: Usage,
        next: NextAction,
    },
    /// Terminal: `text` is the full final text across continued turns.
    Complete {
        text: String,
        grounding: Option<GroundingMetadata>,
        usage: Usage,
    },
    /// Terminal: classified provider or stream failure.
    Error { error: TillerError },
    /// Terminal: cancellation observed.
    Aborted,
}

/// The driver's next move after a `Running` turn.
///
/// Classification priority is load-bearing: function calls over truncation
/// over an unapproved plan checkpoint.
#[derive(Debug)]
pub enum NextAction {
    /// Execute the requested calls and append their results as one caller
    /// turn.
    AppendToolResults { calls: Vec<FunctionCall> },
    /// Block on the plan gate, then resume with the approved plan text.
    ContinueEditedPlan { plan: String },
    /// Issue a follow-up turn; `accumulated` is the marker-stripped text
    /// across all truncated turns so far.
    ContinueTruncated { accumulated: String },
}
