//! Convenience re-exports for common use.

pub use crate::error::{Result, TillerError};
pub use crate::provider::{FragmentStream, ModelProvider, ModelRequest};
pub use crate::tools::{FnTool, Tool, ToolExecutor, ToolParameters, ToolRegistry};
pub use crate::turn_loop::{
    CallbackSink, CancellationToken, NullSink, PlanApprovalHandler, PlanApprovalRequest,
    PlanDecision, RunHandle, RunResult, RunStatus, ToolCallEvent, TurnDriver,
};
pub use crate::types::{
    FinishReason, FunctionCall, FunctionResult, GenerationSettings, GroundingMetadata, Part, Role,
    StreamFragment, ToolDeclaration, Turn, Usage,
};
