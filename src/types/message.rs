//! Conversation turns and their parts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One role-tagged unit of conversation history.
///
/// A turn holds an ordered sequence of [`Part`]s. History is append-only:
/// the driver never edits a turn after pushing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Turn {
    /// Create a caller turn with a single text part.
    pub fn caller(text: impl Into<String>) -> Self {
        Self {
            role: Role::Caller,
            parts: vec![Part::Text { text: text.into() }],
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a model turn with a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text { text: text.into() }],
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a model turn from pre-assembled parts.
    pub fn model_parts(parts: Vec<Part>) -> Self {
        Self {
            role: Role::Model,
            parts,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create the caller turn answering a batch of function calls.
    ///
    /// Holds one [`Part::FunctionResult`] per call, in request order.
    pub fn caller_results(results: Vec<FunctionResult>) -> Self {
        Self {
            role: Role::Caller,
            parts: results.into_iter().map(Part::FunctionResult).collect(),
            timestamp: Some(Utc::now()),
        }
    }

    /// Extract the text content, concatenating all text parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Function calls requested in this turn.
    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::FunctionCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    /// Function results carried by this turn.
    pub fn function_results(&self) -> Vec<&FunctionResult> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::FunctionResult(result) => Some(result),
                _ => None,
            })
            .collect()
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Caller,
    Model,
}

/// Atomic content unit within a turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Text { text: String },
    FunctionCall(FunctionCall),
    FunctionResult(FunctionResult),
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: serde_json::Value,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// The outcome of one tool invocation, fed back to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResult {
    pub name: String,
    pub content: String,
}

impl FunctionResult {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
