//! Error-handling assessment.
//!
//! Sends four classes of deliberately bad input to a sampled subset of the
//! catalog and judges the quality of each rejection. A test passes only when
//! the tool returns an error whose message fits the vocabulary expected for
//! that class of mistake — any error at all is enough for invalid values,
//! while oversized input may also be handled gracefully. Tests a tool
//! structurally cannot run (no required parameters, no string property) pass
//! vacuously rather than count against it.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::debug;

use shakedown_types::catalog::{AssessmentContext, ToolDescriptor};
use shakedown_types::report::{
    AssessmentStatus, ErrorHandlingMetrics, ErrorTestDetail, ErrorTestKind, Report,
};
use shakedown_types::traits::Assessor;

use crate::classify::{classify, looks_like_tool, Classification, ErrorCode};
use crate::support::{
    invoke_with_timeout, log_test, meaningful_error, truncate_for_capture, InvokeFailure, Pacer,
};
use crate::synth::InputSynthesizer;

/// Fixed per-test timeout for negative tests.
const ERROR_TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON-RPC "invalid params" code, accepted for missing-required rejections.
const INVALID_PARAMS_CODE: i64 = -32602;

/// Compliance bands: PASS ≥70, NEED_MORE_INFO ≥40, else FAIL.
fn status_from_compliance(score: f64) -> AssessmentStatus {
    if score >= 70.0 {
        AssessmentStatus::Pass
    } else if score >= 40.0 {
        AssessmentStatus::NeedMoreInfo
    } else {
        AssessmentStatus::Fail
    }
}

/// Outcome of one negative test before scoring.
struct TestOutcome {
    passed: bool,
    reason: Option<String>,
    response: Option<String>,
    classification: Option<Classification>,
    vacuous: bool,
}

impl TestOutcome {
    fn vacuous() -> Self {
        Self {
            passed: true,
            reason: None,
            response: None,
            classification: None,
            vacuous: true,
        }
    }
}

/// Assesses input-validation and error-reporting quality.
pub struct ErrorHandlingAssessor {
    synthesizer: InputSynthesizer,
    missing_required_re: Regex,
    wrong_type_re: Regex,
}

impl Default for ErrorHandlingAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorHandlingAssessor {
    pub fn new() -> Self {
        Self {
            synthesizer: InputSynthesizer::new(),
            // Vocabulary expected when a required parameter is withheld.
            missing_required_re: Regex::new(
                r"(?i)(required|missing|must\s+(provide|supply|specify)|expected\s+.*(param|argument|field))",
            )
            .unwrap(),
            // Vocabulary expected when a parameter has the wrong type.
            wrong_type_re: Regex::new(r"(?i)(type|expected|must\s+be|invalid|not\s+an?\s)").unwrap(),
        }
    }

    /// Build the input for one test kind, or `None` for a vacuous pass.
    fn build_input(&self, tool: &ToolDescriptor, kind: ErrorTestKind) -> Option<Map<String, Value>> {
        let schema = tool.input_schema.as_ref();
        match kind {
            ErrorTestKind::MissingRequired => {
                if tool.required().is_empty() {
                    None
                } else {
                    Some(Map::new())
                }
            }
            ErrorTestKind::WrongType => {
                tool.has_properties().then(|| self.synthesizer.wrong_type(schema))
            }
            ErrorTestKind::InvalidValues => {
                tool.has_properties().then(|| self.synthesizer.invalid_value(schema))
            }
            ErrorTestKind::ExcessiveInput => self.synthesizer.oversized(schema),
        }
    }

    /// Judge an error message against the vocabulary for a test kind.
    fn message_fits(&self, kind: ErrorTestKind, message: &str, code: &Option<ErrorCode>) -> bool {
        match kind {
            ErrorTestKind::MissingRequired => {
                self.missing_required_re.is_match(message)
                    || matches!(code, Some(ErrorCode::Number(INVALID_PARAMS_CODE)))
            }
            ErrorTestKind::WrongType => self.wrong_type_re.is_match(message),
            ErrorTestKind::InvalidValues => true,
            ErrorTestKind::ExcessiveInput => meaningful_error(message),
        }
    }

    async fn run_test(
        &self,
        ctx: &AssessmentContext,
        tool: &ToolDescriptor,
        kind: ErrorTestKind,
    ) -> (Value, TestOutcome) {
        let Some(input) = self.build_input(tool, kind) else {
            log_test(
                ctx.config.verbose_logging,
                "error_handling",
                &tool.name,
                &format!("{} passes vacuously", kind.label()),
            );
            return (json!({}), TestOutcome::vacuous());
        };
        let input_value = Value::Object(input);

        let outcome = match invoke_with_timeout(
            ctx.invoker.as_ref(),
            &tool.name,
            input_value.clone(),
            ERROR_TEST_TIMEOUT,
        )
        .await
        {
            Ok(result) => {
                let classification = classify(&result);
                let response = Some(truncate_for_capture(&result.to_string()));
                if classification.is_error {
                    let message = classification.message.clone().unwrap_or_default();
                    let passed = self.message_fits(kind, &message, &classification.code);
                    TestOutcome {
                        passed,
                        reason: (!passed).then(|| {
                            format!("error message does not describe the {} problem", kind.label())
                        }),
                        response,
                        classification: Some(classification),
                        vacuous: false,
                    }
                } else if kind == ErrorTestKind::ExcessiveInput {
                    // Graceful handling of oversized input is acceptable.
                    TestOutcome {
                        passed: true,
                        reason: None,
                        response,
                        classification: Some(classification),
                        vacuous: false,
                    }
                } else {
                    TestOutcome {
                        passed: false,
                        reason: Some("accepted invalid input without an error".to_string()),
                        response,
                        classification: Some(classification),
                        vacuous: false,
                    }
                }
            }
            Err(InvokeFailure::TimedOut) => TestOutcome {
                passed: false,
                reason: Some("invocation timed out".to_string()),
                response: None,
                classification: None,
                vacuous: false,
            },
            // A thrown failure still counts as intentional validation when
            // its message is meaningful; otherwise it is a generic crash.
            Err(InvokeFailure::Failed(message)) => {
                let passed = meaningful_error(&message);
                TestOutcome {
                    passed,
                    reason: (!passed)
                        .then(|| "crashed with a non-descriptive error".to_string()),
                    response: Some(truncate_for_capture(&message)),
                    classification: Some(Classification {
                        is_error: true,
                        message: Some(message),
                        code: None,
                    }),
                    vacuous: false,
                }
            }
        };

        (input_value, outcome)
    }

    /// Weighted points for one passed, non-vacuous test.
    fn earned_points(tool: &ToolDescriptor, classification: &Option<Classification>) -> u64 {
        let mut earned = 100;
        let Some(classification) = classification else {
            return earned;
        };
        if let Some(message) = &classification.message {
            let names_field = tool
                .properties()
                .map(|props| props.keys().any(|name| message.contains(name.as_str())))
                .unwrap_or(false)
                || tool.required().iter().any(|name| message.contains(name));
            if names_field {
                earned += 10;
            }
            if message.len() > 30 {
                earned += 5;
            }
        }
        if classification.code.is_some() {
            earned += 5;
        }
        earned
    }
}

#[async_trait]
impl Assessor for ErrorHandlingAssessor {
    type Metrics = ErrorHandlingMetrics;

    fn name(&self) -> &'static str {
        "error_handling"
    }

    async fn assess(&self, ctx: &AssessmentContext) -> Report<Self::Metrics> {
        let started = Instant::now();

        // Malformed descriptors are excluded from sampling, never fatal.
        let valid_tools: Vec<&ToolDescriptor> = ctx
            .tools
            .iter()
            .filter(|tool| {
                serde_json::to_value(tool)
                    .map(|v| looks_like_tool(&v))
                    .unwrap_or(false)
            })
            .collect();
        let sample_size = ctx.config.error_sample_size(valid_tools.len());
        let sampled = &valid_tools[..sample_size];

        debug!(
            sampled = sample_size,
            catalog = ctx.tools.len(),
            "running error-handling tests"
        );

        let mut details = Vec::new();
        let mut earned: u64 = 0;
        let mut possible: u64 = 0;
        let mut vacuous_passes = 0;
        let mut failed_kinds: Vec<ErrorTestKind> = Vec::new();
        let mut pacer = Pacer::new(5, Duration::from_millis(250));

        for tool in sampled {
            for kind in [
                ErrorTestKind::MissingRequired,
                ErrorTestKind::WrongType,
                ErrorTestKind::InvalidValues,
                ErrorTestKind::ExcessiveInput,
            ] {
                let (input, outcome) = self.run_test(ctx, tool, kind).await;

                possible += 100;
                if outcome.vacuous {
                    vacuous_passes += 1;
                    earned += 100;
                } else if outcome.passed {
                    earned += Self::earned_points(tool, &outcome.classification);
                } else if !failed_kinds.contains(&kind) {
                    failed_kinds.push(kind);
                }

                details.push(ErrorTestDetail {
                    tool_name: tool.name.clone(),
                    kind,
                    input,
                    response: outcome.response,
                    passed: outcome.passed,
                    reason: outcome.reason,
                });

                if !outcome.vacuous {
                    pacer.tick().await;
                }
            }
        }

        let tests_passed = details.iter().filter(|d| d.passed).count();
        let tests_failed = details.len() - tests_passed;
        let compliance_score = if possible == 0 {
            100.0
        } else {
            (earned as f64 / possible as f64 * 100.0).min(100.0)
        };
        let status = status_from_compliance(compliance_score);

        let explanation = format!(
            "Sampled {} tool(s): {tests_passed} of {} negative test(s) passed \
             ({vacuous_passes} vacuously); compliance score {compliance_score:.0}.",
            sampled.len(),
            details.len(),
        );

        let mut recommendations = Vec::new();
        for kind in &failed_kinds {
            recommendations.push(match kind {
                ErrorTestKind::MissingRequired => {
                    "Reject calls that omit required parameters with a descriptive error \
                     (JSON-RPC code -32602)."
                        .to_string()
                }
                ErrorTestKind::WrongType => {
                    "Reject type-mismatched parameters with messages naming the expected type."
                        .to_string()
                }
                ErrorTestKind::InvalidValues => {
                    "Validate enum, format, and range constraints before executing.".to_string()
                }
                ErrorTestKind::ExcessiveInput => {
                    "Guard against oversized inputs with explicit size limits.".to_string()
                }
            });
        }

        let metrics = ErrorHandlingMetrics {
            tools_tested: sampled.len(),
            tests_passed,
            tests_failed,
            vacuous_passes,
            compliance_score,
            details,
        };

        Report::new(
            metrics,
            status,
            explanation,
            recommendations,
            started.elapsed().as_millis() as u64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use shakedown_types::config::AssessmentConfig;
    use shakedown_types::errors::ShakedownError;
    use shakedown_types::traits::ToolInvoker;

    /// A server with strict, descriptive validation.
    struct StrictInvoker;

    #[async_trait]
    impl ToolInvoker for StrictInvoker {
        async fn call_tool(&self, _name: &str, params: Value) -> Result<Value, ShakedownError> {
            let obj = params.as_object().cloned().unwrap_or_default();
            if !obj.contains_key("query") {
                return Ok(json!({
                    "error": {
                        "message": "Missing required parameter 'query' for this operation",
                        "code": -32602
                    }
                }));
            }
            if !obj["query"].is_string() {
                return Ok(json!({
                    "error": {"message": "Parameter 'query' must be a string", "code": -32602}
                }));
            }
            if obj["query"].as_str().is_some_and(|q| q.len() > 10_000) {
                return Ok(json!({
                    "error": {"message": "Parameter 'query' exceeds the maximum length", "code": -32602}
                }));
            }
            if obj["query"].as_str().is_some_and(str::is_empty) {
                return Ok(json!({
                    "error": {"message": "Parameter 'query' must not be empty", "code": -32602}
                }));
            }
            Ok(json!({"content": [{"type": "text", "text": "ok"}]}))
        }
    }

    /// A server that accepts anything.
    struct PermissiveInvoker;

    #[async_trait]
    impl ToolInvoker for PermissiveInvoker {
        async fn call_tool(&self, _name: &str, _params: Value) -> Result<Value, ShakedownError> {
            Ok(json!({"content": [{"type": "text", "text": "done, thanks"}]}))
        }
    }

    /// A server that crashes with a one-word panic.
    struct CrashingInvoker;

    #[async_trait]
    impl ToolInvoker for CrashingInvoker {
        async fn call_tool(&self, _name: &str, _params: Value) -> Result<Value, ShakedownError> {
            Err(ShakedownError::Invoke("oops".to_string()))
        }
    }

    /// A server that rejects everything with descriptive thrown errors.
    struct ThrowingValidatorInvoker;

    #[async_trait]
    impl ToolInvoker for ThrowingValidatorInvoker {
        async fn call_tool(&self, _name: &str, _params: Value) -> Result<Value, ShakedownError> {
            Err(ShakedownError::Invoke(
                "invalid arguments: parameter validation failed".to_string(),
            ))
        }
    }

    fn query_tool(name: &str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.to_string(),
            description: None,
            input_schema: Some(json!({
                "type": "object",
                "properties": {"query": {"type": "string"}},
                "required": ["query"]
            })),
        }
    }

    fn context(tools: Vec<ToolDescriptor>, invoker: Arc<dyn ToolInvoker>) -> AssessmentContext {
        AssessmentContext {
            tools,
            invoker,
            readme: None,
            package_meta: None,
            config: AssessmentConfig::default(),
        }
    }

    fn details_for<'a>(
        report: &'a Report<ErrorHandlingMetrics>,
        kind: ErrorTestKind,
    ) -> Vec<&'a ErrorTestDetail> {
        report
            .metrics
            .details
            .iter()
            .filter(|d| d.kind == kind)
            .collect()
    }

    // ---------------------------------------------------------
    // Vacuous passes
    // ---------------------------------------------------------

    #[tokio::test]
    async fn test_no_required_params_missing_test_passes_vacuously() {
        let tool = ToolDescriptor {
            name: "no_required".to_string(),
            description: None,
            input_schema: Some(json!({
                "type": "object",
                "properties": {"verbose": {"type": "boolean"}}
            })),
        };
        let ctx = context(vec![tool], Arc::new(PermissiveInvoker));
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;

        let missing = details_for(&report, ErrorTestKind::MissingRequired);
        assert_eq!(missing.len(), 1);
        assert!(missing[0].passed);
        assert!(report.metrics.vacuous_passes >= 1);
    }

    #[tokio::test]
    async fn test_no_string_property_oversized_passes_vacuously() {
        let tool = ToolDescriptor {
            name: "numbers_only".to_string(),
            description: None,
            input_schema: Some(json!({
                "type": "object",
                "properties": {"count": {"type": "integer"}},
                "required": ["count"]
            })),
        };
        let ctx = context(vec![tool], Arc::new(PermissiveInvoker));
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;

        let oversized = details_for(&report, ErrorTestKind::ExcessiveInput);
        assert_eq!(oversized.len(), 1);
        assert!(oversized[0].passed);
    }

    #[tokio::test]
    async fn test_schemaless_tool_passes_everything_vacuously() {
        let tool = ToolDescriptor {
            name: "bare".to_string(),
            description: None,
            input_schema: None,
        };
        let ctx = context(vec![tool], Arc::new(PermissiveInvoker));
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;

        assert_eq!(report.metrics.vacuous_passes, 4);
        assert_eq!(report.metrics.tests_failed, 0);
        assert_eq!(report.metrics.compliance_score, 100.0);
    }

    // ---------------------------------------------------------
    // Strict and permissive servers
    // ---------------------------------------------------------

    #[tokio::test]
    async fn test_strict_server_scores_high() {
        let ctx = context(vec![query_tool("search")], Arc::new(StrictInvoker));
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;

        assert_eq!(report.metrics.tests_failed, 0);
        assert_eq!(report.metrics.compliance_score, 100.0);
        assert_eq!(report.status, AssessmentStatus::Pass);
        assert!(report.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_permissive_server_scores_low() {
        let ctx = context(vec![query_tool("search")], Arc::new(PermissiveInvoker));
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;

        // Missing-required, wrong-type, and invalid-value all slip through;
        // only oversized passes (graceful non-crash).
        assert_eq!(report.metrics.tests_failed, 3);
        assert!(report.metrics.compliance_score < 40.0);
        assert_eq!(report.status, AssessmentStatus::Fail);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("required parameters")));
    }

    // ---------------------------------------------------------
    // Thrown failures
    // ---------------------------------------------------------

    #[tokio::test]
    async fn test_meaningful_thrown_error_passes() {
        let ctx = context(
            vec![query_tool("search")],
            Arc::new(ThrowingValidatorInvoker),
        );
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;
        assert_eq!(report.metrics.tests_failed, 0);
    }

    #[tokio::test]
    async fn test_generic_crash_fails() {
        let ctx = context(vec![query_tool("search")], Arc::new(CrashingInvoker));
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;

        let missing = details_for(&report, ErrorTestKind::MissingRequired);
        assert!(!missing[0].passed);
        assert_eq!(
            missing[0].reason.as_deref(),
            Some("crashed with a non-descriptive error")
        );
    }

    // ---------------------------------------------------------
    // Sampling
    // ---------------------------------------------------------

    #[tokio::test]
    async fn test_sampling_limit_respected() {
        let tools = vec![query_tool("a"), query_tool("b"), query_tool("c")];
        let mut ctx = context(tools, Arc::new(StrictInvoker));
        ctx.config.max_tools_to_test_for_errors = 2;
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;
        assert_eq!(report.metrics.tools_tested, 2);
        assert_eq!(report.metrics.details.len(), 8);
    }

    #[tokio::test]
    async fn test_negative_limit_means_all() {
        let tools = vec![query_tool("a"), query_tool("b"), query_tool("c")];
        let mut ctx = context(tools, Arc::new(StrictInvoker));
        ctx.config.max_tools_to_test_for_errors = -1;
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;
        assert_eq!(report.metrics.tools_tested, 3);
    }

    #[tokio::test]
    async fn test_malformed_descriptor_excluded() {
        let malformed = ToolDescriptor {
            name: "  ".to_string(),
            description: None,
            input_schema: None,
        };
        let ctx = context(
            vec![malformed, query_tool("real")],
            Arc::new(StrictInvoker),
        );
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;
        assert_eq!(report.metrics.tools_tested, 1);
        assert!(report.metrics.details.iter().all(|d| d.tool_name == "real"));
    }

    // ---------------------------------------------------------
    // Score monotonicity
    // ---------------------------------------------------------

    #[tokio::test]
    async fn test_compliance_monotonic_in_passed_tests() {
        let tools = vec![query_tool("search")];

        let none_pass = context(tools.clone(), Arc::new(CrashingInvoker));
        let some_pass = context(tools.clone(), Arc::new(PermissiveInvoker));
        let all_pass = context(tools, Arc::new(StrictInvoker));

        let assessor = ErrorHandlingAssessor::new();
        let s0 = assessor.assess(&none_pass).await.metrics.compliance_score;
        let s1 = assessor.assess(&some_pass).await.metrics.compliance_score;
        let s2 = assessor.assess(&all_pass).await.metrics.compliance_score;

        assert!(s0 <= s1, "{s0} <= {s1}");
        assert!(s1 <= s2, "{s1} <= {s2}");
    }

    #[tokio::test]
    async fn test_empty_catalog_is_vacuously_compliant() {
        let ctx = context(vec![], Arc::new(CrashingInvoker));
        let report = ErrorHandlingAssessor::new().assess(&ctx).await;
        assert_eq!(report.metrics.tools_tested, 0);
        assert_eq!(report.metrics.compliance_score, 100.0);
    }
}
