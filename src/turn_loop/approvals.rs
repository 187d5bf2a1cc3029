//! Plan approval gate.
//!
//! Gate policy: enforced only when [`GenerationSettings::plan_approval`] is
//! set and a handler is configured on the driver. With the flag set but no
//! handler (a non-interactive context), the plan auto-approves unedited.
//!
//! [`GenerationSettings::plan_approval`]: crate::types::GenerationSettings

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::RunId;

/// A plan awaiting external approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanApprovalRequest {
    pub run_id: RunId,
    /// The proposed plan text, marker stripped.
    pub plan: String,
}

/// Decision returned by the approval handler.
#[derive(Debug, Clone)]
pub enum PlanDecision {
    /// Proceed with this (possibly edited) plan text.
    Approved { text: String },
    /// Abandon the run.
    Cancel,
}

/// Async callback resolving a [`PlanApprovalRequest`].
pub type PlanApprovalHandler = Arc<
    dyn Fn(PlanApprovalRequest) -> Pin<Box<dyn Future<Output = PlanDecision> + Send>>
        + Send
        + Sync,
>;

/// Resolve the gate for one proposed plan.
pub(crate) async fn resolve_plan(
    run_id: RunId,
    plan: String,
    handler: Option<&PlanApprovalHandler>,
) -> PlanDecision {
    match handler {
        None => PlanDecision::Approved { text: plan },
        Some(handler) => handler(PlanApprovalRequest { run_id, plan }).await,
    }
}
