//! Shared assessor behavior.
//!
//! The four assessors share a small set of behaviors: deriving a status from
//! a pass rate, racing remote invocations against a timeout, advisory pacing
//! between batches of tests, and judging whether a failure message looks like
//! intentional validation. These are composed free functions and small value
//! types rather than a base-class hierarchy.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use shakedown_types::errors::ShakedownError;
use shakedown_types::report::AssessmentStatus;
use shakedown_types::traits::ToolInvoker;

/// Maximum characters captured from a response into evidence fields.
const CAPTURE_LIMIT: usize = 300;

/// Keywords that mark a failure message as intentional validation rather
/// than a generic crash.
const MEANINGFUL_KEYWORDS: &[&str] = &[
    "invalid",
    "required",
    "missing",
    "expected",
    "must",
    "type",
    "parameter",
    "argument",
    "unsupported",
    "not allowed",
    "too long",
    "too large",
    "exceed",
    "out of range",
];

/// Derive the tri-state status from a 0–100 percentage.
///
/// ≥80 passes, ≥50 needs more info, anything lower fails.
pub fn status_from_percentage(pct: f64) -> AssessmentStatus {
    if pct >= 80.0 {
        AssessmentStatus::Pass
    } else if pct >= 50.0 {
        AssessmentStatus::NeedMoreInfo
    } else {
        AssessmentStatus::Fail
    }
}

/// `part / whole × 100`, or 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// How a raced invocation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeFailure {
    /// The timer settled first. The remote call is not cancelled — a late
    /// result is dropped, and the remote side may still have executed.
    TimedOut,
    /// The invocation channel rejected or failed the call.
    Failed(String),
}

impl InvokeFailure {
    /// Human-readable failure description.
    pub fn message(&self) -> String {
        match self {
            InvokeFailure::TimedOut => "invocation timed out".to_string(),
            InvokeFailure::Failed(msg) => msg.clone(),
        }
    }
}

/// Race a tool invocation against a timer; whichever settles first wins.
pub async fn invoke_with_timeout(
    invoker: &dyn ToolInvoker,
    name: &str,
    params: Value,
    timeout: Duration,
) -> Result<Value, InvokeFailure> {
    match tokio::time::timeout(timeout, invoker.call_tool(name, params)).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(ShakedownError::Timeout(msg))) => {
            debug!(tool = %name, "channel-side timeout: {msg}");
            Err(InvokeFailure::TimedOut)
        }
        Ok(Err(err)) => Err(InvokeFailure::Failed(err.to_string())),
        Err(_elapsed) => Err(InvokeFailure::TimedOut),
    }
}

/// Advisory pacing: suspend briefly after every `batch` tests.
///
/// Keeps sequential test loops from overwhelming the remote side. This is
/// pacing on our side only, not backpressure from the server.
pub struct Pacer {
    batch: usize,
    delay: Duration,
    count: usize,
}

impl Pacer {
    /// A pacer that sleeps `delay` after every `batch` ticks.
    pub fn new(batch: usize, delay: Duration) -> Self {
        Self {
            batch,
            delay,
            count: 0,
        }
    }

    /// Record one completed test, sleeping if the batch boundary was hit.
    pub async fn tick(&mut self) {
        self.count += 1;
        if self.batch > 0 && self.count % self.batch == 0 {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Total ticks recorded so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Whether a failure message looks like intentional validation.
///
/// Matches a curated keyword set, or accepts any message long enough to be
/// descriptive. Distinguishes deliberate rejection from generic crashes.
pub fn meaningful_error(message: &str) -> bool {
    let lowered = message.to_lowercase();
    MEANINGFUL_KEYWORDS.iter().any(|k| lowered.contains(k)) || message.trim().len() >= 20
}

/// Capped capture of a response for evidence fields.
pub fn truncate_for_capture(text: &str) -> String {
    if text.len() <= CAPTURE_LIMIT {
        return text.to_string();
    }
    let mut end = CAPTURE_LIMIT;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Per-test progress logging, promoted to info level when verbose.
pub fn log_test(verbose: bool, assessor: &str, tool: &str, detail: &str) {
    if verbose {
        info!(assessor = %assessor, tool = %tool, "{detail}");
    } else {
        debug!(assessor = %assessor, tool = %tool, "{detail}");
    }
}
