//! Core data types.

pub mod message;
pub mod settings;
pub mod stream;
pub mod usage;

pub use message::{FunctionCall, FunctionResult, Part, Role, Turn};
pub use settings::{
    GenerationSettings, ToolDeclaration, CONTINUATION_MARKER, DEFAULT_MAX_TURNS, PLAN_MARKER,
};
pub use stream::{FinishReason, GroundingMetadata, SourceReference, StreamFragment};
pub use usage::Usage;
