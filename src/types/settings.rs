//! Run settings and tool declarations.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::TillerError;

/// Default marker the model appends when it was cut off and wants a
/// follow-up turn to keep writing.
pub const CONTINUATION_MARKER: &str = "[CONTINUE]";

/// Default marker opening a strategic plan that awaits approval.
pub const PLAN_MARKER: &str = "[PLAN]";

/// Default cap on model turns within a single run.
pub const DEFAULT_MAX_TURNS: usize = 20;

/// Settings controlling one run. Constructed once by the caller and never
/// mutated by the driver.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    pub system_instruction: Option<String>,
    /// Tools advertised to the model.
    #[builder(default)]
    #[serde(default)]
    pub tools: Vec<ToolDeclaration>,
    /// Whether a model-proposed plan must pass the approval gate before
    /// tool-using execution proceeds.
    #[builder(default)]
    #[serde(default)]
    pub plan_approval: bool,
    /// Cap on model turns per run; exceeding it fails the run.
    #[builder(default = DEFAULT_MAX_TURNS)]
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Literal marker signalling truncated output.
    #[builder(default = CONTINUATION_MARKER.to_string())]
    #[serde(default = "default_continuation_marker")]
    pub continuation_marker: String,
    /// Literal marker opening an unapproved plan.
    #[builder(default = PLAN_MARKER.to_string())]
    #[serde(default = "default_plan_marker")]
    pub plan_marker: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: None,
            max_output_tokens: None,
            system_instruction: None,
            tools: Vec::new(),
            plan_approval: false,
            max_turns: DEFAULT_MAX_TURNS,
            continuation_marker: CONTINUATION_MARKER.to_string(),
            plan_marker: PLAN_MARKER.to_string(),
        }
    }
}

impl GenerationSettings {
    /// Validate once at run start.
    pub fn validate(&self) -> Result<(), TillerError> {
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(TillerError::InvalidSettings(format!(
                    "temperature {t} outside [0.0, 2.0]"
                )));
            }
        }
        if let Some(max) = self.max_output_tokens {
            if max == 0 {
                return Err(TillerError::InvalidSettings(
                    "max_output_tokens must be positive".into(),
                ));
            }
        }
        if self.max_turns == 0 {
            return Err(TillerError::InvalidSettings(
                "max_turns must be at least 1".into(),
            ));
        }
        if self.continuation_marker.is_empty() || self.plan_marker.is_empty() {
            return Err(TillerError::InvalidSettings(
                "markers must be non-empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

fn default_continuation_marker() -> String {
    CONTINUATION_MARKER.to_string()
}

fn default_plan_marker() -> String {
    PLAN_MARKER.to_string()
}

/// Tool declaration advertised to the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    /// JSON Schema object describing the parameters.
    pub parameters: serde_json::Value,
}
