//! Streaming fragment types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::message::FunctionCall;
use super::usage::Usage;

/// One incremental unit of model output.
///
/// A provider's fragment sequence yields these until the turn ends; only
/// the final fragment carries a [`FinishReason`], and grounding/usage, when
/// present, arrive with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamFragment {
    /// Incremental text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Function calls requested in this fragment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub function_calls: Vec<FunctionCall>,
    /// Why the turn ended (final fragment only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<FinishReason>,
    /// Source references backing the generated text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding: Option<GroundingMetadata>,
    /// Token usage for the turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl StreamFragment {
    /// A fragment carrying only a text delta.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A fragment carrying a single function call.
    pub fn call(call: FunctionCall) -> Self {
        Self {
            function_calls: vec![call],
            ..Self::default()
        }
    }

    /// A terminal fragment carrying only a finish reason.
    pub fn finish(reason: FinishReason) -> Self {
        Self {
            finish: Some(reason),
            ..Self::default()
        }
    }

    pub fn with_finish(mut self, reason: FinishReason) -> Self {
        self.finish = Some(reason);
        self
    }

    pub fn with_grounding(mut self, grounding: GroundingMetadata) -> Self {
        self.grounding = Some(grounding);
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Why a model turn ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop.
    Stop,
    /// Output token budget exhausted.
    Length,
    /// Blocked by the provider's safety filter.
    Safety,
}

/// Source references surfaced by the provider for a completed turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroundingMetadata {
    pub sources: Vec<SourceReference>,
}

/// A single grounding source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub uri: String,
}
