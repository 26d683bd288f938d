//! Assessment report types.
//!
//! Each assessor returns exactly one [`Report`] per run: module-specific
//! metrics plus a status, a derived explanation, and ordered actionable
//! recommendations. Reports are immutable value objects — no report outlives
//! the `assess` call that produced it, and aggregation across assessors is
//! the orchestrator's job, never the core's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================
// Status and envelope
// ============================================================

/// Tri-state verdict derived from a pass-rate or score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    /// The module meets the bar.
    Pass,
    /// Inconclusive — needs human attention or more data.
    NeedMoreInfo,
    /// The module is below the bar.
    Fail,
}

/// The self-contained output of one assessor run.
#[derive(Debug, Clone, Serialize)]
pub struct Report<M> {
    /// Identifier for this run of this assessor.
    pub run_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// How long the run took, in milliseconds.
    pub duration_ms: u64,
    /// Module-specific metrics.
    pub metrics: M,
    /// Verdict for this module.
    pub status: AssessmentStatus,
    /// Human-readable summary of what was found.
    pub explanation: String,
    /// Ordered list of actionable recommendations.
    pub recommendations: Vec<String>,
}

impl<M> Report<M> {
    /// Build a report envelope around finished metrics.
    pub fn new(
        metrics: M,
        status: AssessmentStatus,
        explanation: String,
        recommendations: Vec<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            duration_ms,
            metrics,
            status,
            explanation,
            recommendations,
        }
    }
}

// ============================================================
// Documentation metrics
// ============================================================

/// A fenced code block extracted from the README.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExample {
    /// Language tag on the fence (empty if untagged).
    pub language: String,
    /// The code block body.
    pub code: String,
    /// Nearest preceding non-heading line, used as a description.
    pub description: Option<String>,
}

/// Metrics produced by the documentation assessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationMetrics {
    /// Whether any README text was supplied.
    pub has_readme: bool,
    /// Install-related keywords found in the README.
    pub has_install_instructions: bool,
    /// Usage-related keywords found in the README.
    pub has_usage_guide: bool,
    /// API-reference-related keywords found in the README.
    pub has_api_reference: bool,
    /// Code blocks found plus tools documented via README mention.
    pub example_count: usize,
    /// Extracted fenced code blocks.
    pub code_examples: Vec<CodeExample>,
    /// Tools with a description or a verbatim README mention.
    pub documented_tools: usize,
    /// Tools with neither a description nor a README mention.
    pub missing_examples: Vec<String>,
}

// ============================================================
// Functionality metrics
// ============================================================

/// Per-tool outcome of the functionality check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCheck {
    /// Name of the tool that was exercised.
    pub tool_name: String,
    /// Whether the tool responded without error markers.
    pub working: bool,
    /// What went wrong, for broken tools.
    pub detail: Option<String>,
    /// Round-trip time of the invocation, when one was made.
    pub response_time_ms: Option<u64>,
}

/// Metrics produced by the functionality assessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalityMetrics {
    /// Size of the capability catalog.
    pub total_tools: usize,
    /// How many tools were actually exercised.
    pub tested_tools: usize,
    /// Names of tools that responded cleanly.
    pub working_tools: Vec<String>,
    /// Names of tools that failed, errored, or timed out.
    pub broken_tools: Vec<String>,
    /// Names of tools skipped (auto-testing disabled).
    pub untested_tools: Vec<String>,
    /// tested / total × 100.
    pub coverage_percentage: f64,
    /// working / tested × 100; drives the status bands.
    pub working_percentage: f64,
    /// Per-tool details, in catalog order.
    pub checks: Vec<ToolCheck>,
}

// ============================================================
// Error-handling metrics
// ============================================================

/// The four negative-test classes run against each sampled tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTestKind {
    /// Required parameters withheld entirely.
    MissingRequired,
    /// Every parameter sent with a mismatched primitive type.
    WrongType,
    /// Enum violations, malformed formats, out-of-range numbers.
    InvalidValues,
    /// A 100,000-character value in the first string parameter.
    ExcessiveInput,
}

impl ErrorTestKind {
    /// Stable snake_case label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorTestKind::MissingRequired => "missing_required",
            ErrorTestKind::WrongType => "wrong_type",
            ErrorTestKind::InvalidValues => "invalid_values",
            ErrorTestKind::ExcessiveInput => "excessive_input",
        }
    }
}

/// Record of a single negative test against a single tool.
///
/// Carries the tool name verbatim so findings stay traceable; never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorTestDetail {
    /// Name of the tool under test.
    pub tool_name: String,
    /// Which negative-test class this record belongs to.
    pub kind: ErrorTestKind,
    /// The parameters that were sent.
    pub input: serde_json::Value,
    /// Truncated capture of the response or failure message.
    pub response: Option<String>,
    /// Whether the tool handled the bad input acceptably.
    pub passed: bool,
    /// Why the test failed, when it did.
    pub reason: Option<String>,
}

/// Metrics produced by the error-handling assessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlingMetrics {
    /// How many tools were sampled.
    pub tools_tested: usize,
    /// Tests that passed, including vacuous passes.
    pub tests_passed: usize,
    /// Tests that failed.
    pub tests_failed: usize,
    /// Tests passed vacuously (tool structurally lacks the parameter class).
    pub vacuous_passes: usize,
    /// Weighted percentage, 0–100.
    pub compliance_score: f64,
    /// Every test record, in execution order.
    pub details: Vec<ErrorTestDetail>,
}

// ============================================================
// Security metrics
// ============================================================

/// Severity tag attached to a security test pattern.
///
/// Ordered so that aggregation can take a maximum: Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Informational or low-impact finding.
    Low,
    /// Exploitable under some conditions.
    Medium,
    /// Directly exploitable.
    High,
}

/// Outcome of sending one attack pattern to one tool.
///
/// The `test_name`/`payload`/`risk_level` triple is fixed per-pattern
/// metadata; the rest is joined at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityTestResult {
    /// Name of the attack pattern.
    pub test_name: String,
    /// The payload string that was sent.
    pub payload: String,
    /// Pre-assigned severity of this pattern.
    pub risk_level: RiskLevel,
    /// Name of the tool that received the payload.
    pub tool_name: String,
    /// Whether the tool looked vulnerable to this pattern.
    pub vulnerable: bool,
    /// What tripped the detection (or why the tool looked safe).
    pub evidence: Option<String>,
    /// Truncated capture of the tool's response.
    pub response: Option<String>,
}

/// Metrics produced by the security assessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    /// Total pattern × tool tests executed (including supplementary probes).
    pub total_tests: usize,
    /// One entry per catalog pattern per eligible tool, in execution order.
    pub results: Vec<SecurityTestResult>,
    /// Findings from the supplementary probes (metadata exposure,
    /// sandbox escape, tool shadowing).
    pub probe_findings: Vec<SecurityTestResult>,
    /// The vulnerable subset of `results` and `probe_findings`.
    pub vulnerabilities: Vec<SecurityTestResult>,
    /// Aggregated risk across all findings.
    pub overall_risk: RiskLevel,
}
