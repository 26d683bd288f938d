//! Trait contracts for the assessment harness.
//!
//! The core codes against these interfaces, not against concrete transports
//! or orchestrators. The invocation channel and the orchestrator live outside
//! this workspace; these traits are the boundary.

use async_trait::async_trait;

use crate::catalog::AssessmentContext;
use crate::errors::ShakedownError;
use crate::report::Report;

/// The invocation channel to the remote tool server.
///
/// No guarantee on latency, and no guarantee on which error-signaling
/// convention the server uses — the result is an opaque JSON value that the
/// response classifier picks apart. Calls may fail outright; assessors catch
/// those failures per test and never let them propagate.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Invoke a named capability with the given parameters.
    async fn call_tool(
        &self,
        name: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ShakedownError>;
}

/// Contract shared by the four assessors.
///
/// Each assessor receives the context by reference, runs its tests strictly
/// sequentially, and returns a self-contained report. `assess` is infallible
/// by design: a single capability's failure degrades the report's metrics and
/// status, it never aborts the run or surfaces an error to the orchestrator.
#[async_trait]
pub trait Assessor: Send + Sync {
    /// Module-specific metric shape carried in the report.
    type Metrics;

    /// Short identifier used in logs (e.g. "security").
    fn name(&self) -> &'static str;

    /// Run this assessor's tests against the context and produce a report.
    async fn assess(&self, ctx: &AssessmentContext) -> Report<Self::Metrics>;
}
