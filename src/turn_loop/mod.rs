//! The orchestration core: turn driver, stream interpreter, tool dispatch.

pub mod approvals;
pub mod dispatch;
pub mod driver;
pub mod events;
pub mod interpreter;
pub mod outcome;
pub mod types;

pub use approvals::{PlanApprovalHandler, PlanApprovalRequest, PlanDecision};
pub use dispatch::{dispatch, DispatchOutcome};
pub use driver::TurnDriver;
pub use events::{CallbackSink, NullSink, ToolCallEvent};
pub use interpreter::interpret;
pub use outcome::{NextAction, TurnOutcome};
pub use types::{RunHandle, RunId, RunResult, RunStatus};

pub use tokio_util::sync::CancellationToken;
