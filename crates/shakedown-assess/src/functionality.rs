//! Functionality assessment.
//!
//! Invokes every capability once with synthesized minimal valid input and
//! classifies it working or broken. Synthesized parameters are validated
//! locally against the schema first — a tool whose own schema cannot be
//! satisfied is broken without spending a remote call. Remote invocations
//! race the configured timeout; a late result after a lost race is dropped,
//! the remote side may still have executed.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use shakedown_types::catalog::{AssessmentContext, ToolDescriptor};
use shakedown_types::report::{AssessmentStatus, FunctionalityMetrics, Report, ToolCheck};
use shakedown_types::traits::Assessor;

use crate::classify::{classify, response_text};
use crate::support::{
    invoke_with_timeout, log_test, percentage, status_from_percentage, InvokeFailure,
};
use crate::synth::InputSynthesizer;

/// Error-ish substrings searched in otherwise clean response text.
const ERROR_MARKERS: &[&str] = &["error", "failed", "invalid"];

/// Assesses whether each capability works at all.
#[derive(Default)]
pub struct FunctionalityAssessor {
    synthesizer: InputSynthesizer,
}

impl FunctionalityAssessor {
    pub fn new() -> Self {
        Self {
            synthesizer: InputSynthesizer::new(),
        }
    }

    /// Validate synthesized parameters against the tool's own schema.
    ///
    /// Checks required-key presence and primitive-type agreement; integer
    /// and number are treated as compatible.
    fn validate_locally(tool: &ToolDescriptor, params: &Map<String, Value>) -> Result<(), String> {
        for name in tool.required() {
            if !params.contains_key(name) {
                return Err(format!("could not synthesize required parameter '{name}'"));
            }
        }
        let Some(props) = tool.properties() else {
            return Ok(());
        };
        for (name, value) in params {
            let Some(declared) = props
                .get(name)
                .and_then(|p| p.get("type"))
                .and_then(Value::as_str)
            else {
                continue;
            };
            let matches = match declared {
                "string" => value.is_string(),
                "number" | "integer" => value.is_number(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                _ => true,
            };
            if !matches {
                return Err(format!(
                    "synthesized parameter '{name}' does not match declared type '{declared}'"
                ));
            }
        }
        Ok(())
    }

    /// Layered broken-response detection on top of the classifier.
    fn broken_reason(result: &Value) -> Option<String> {
        let classification = classify(result);
        if classification.is_error {
            return Some(
                classification
                    .message
                    .unwrap_or_else(|| "tool returned an error".to_string()),
            );
        }

        // HTTP-like status field.
        if let Some(status) = result.get("status").and_then(Value::as_u64) {
            if status >= 400 {
                return Some(format!("response carried status {status}"));
            }
        }

        // Error-ish text in an otherwise clean response.
        let text = response_text(result).to_lowercase();
        if ERROR_MARKERS.iter().any(|m| text.contains(m)) {
            return Some("response text contains error markers".to_string());
        }

        None
    }
}

#[async_trait]
impl Assessor for FunctionalityAssessor {
    type Metrics = FunctionalityMetrics;

    fn name(&self) -> &'static str {
        "functionality"
    }

    async fn assess(&self, ctx: &AssessmentContext) -> Report<Self::Metrics> {
        let started = Instant::now();
        let total_tools = ctx.tools.len();
        let timeout = Duration::from_millis(ctx.config.test_timeout_ms);

        if !ctx.config.auto_test {
            debug!("auto-testing disabled; recording all tools as untested");
            let untested: Vec<String> = ctx.tools.iter().map(|t| t.name.clone()).collect();
            let metrics = FunctionalityMetrics {
                total_tools,
                tested_tools: 0,
                working_tools: Vec::new(),
                broken_tools: Vec::new(),
                untested_tools: untested,
                coverage_percentage: 0.0,
                working_percentage: 0.0,
                checks: Vec::new(),
            };
            return Report::new(
                metrics,
                AssessmentStatus::NeedMoreInfo,
                format!("Auto-testing is disabled; {total_tools} tool(s) were not exercised."),
                vec!["Enable auto_test to exercise each tool once.".to_string()],
                started.elapsed().as_millis() as u64,
            );
        }

        let mut checks = Vec::new();
        let mut working_tools = Vec::new();
        let mut broken_tools = Vec::new();

        for tool in &ctx.tools {
            let params = self.synthesizer.valid(tool.input_schema.as_ref());

            if let Err(reason) = Self::validate_locally(tool, &params) {
                log_test(ctx.config.verbose_logging, self.name(), &tool.name, &reason);
                broken_tools.push(tool.name.clone());
                checks.push(ToolCheck {
                    tool_name: tool.name.clone(),
                    working: false,
                    detail: Some(reason),
                    response_time_ms: None,
                });
                continue;
            }

            let call_started = Instant::now();
            let outcome = invoke_with_timeout(
                ctx.invoker.as_ref(),
                &tool.name,
                Value::Object(params),
                timeout,
            )
            .await;
            let elapsed_ms = call_started.elapsed().as_millis() as u64;

            let detail = match outcome {
                Ok(result) => Self::broken_reason(&result),
                Err(InvokeFailure::TimedOut) => Some("invocation timed out".to_string()),
                Err(InvokeFailure::Failed(msg)) => Some(msg),
            };

            match detail {
                None => {
                    log_test(ctx.config.verbose_logging, self.name(), &tool.name, "working");
                    working_tools.push(tool.name.clone());
                    checks.push(ToolCheck {
                        tool_name: tool.name.clone(),
                        working: true,
                        detail: None,
                        response_time_ms: Some(elapsed_ms),
                    });
                }
                Some(reason) => {
                    log_test(ctx.config.verbose_logging, self.name(), &tool.name, &reason);
                    broken_tools.push(tool.name.clone());
                    checks.push(ToolCheck {
                        tool_name: tool.name.clone(),
                        working: false,
                        detail: Some(reason),
                        response_time_ms: Some(elapsed_ms),
                    });
                }
            }
        }

        let tested_tools = checks.len();
        let coverage_percentage = percentage(tested_tools, total_tools);
        let working_percentage = percentage(working_tools.len(), tested_tools);
        let status = status_from_percentage(working_percentage);

        let explanation = format!(
            "Tested {tested_tools} of {total_tools} tool(s): {} working, {} broken.{}",
            working_tools.len(),
            broken_tools.len(),
            if broken_tools.is_empty() {
                String::new()
            } else {
                format!(" Broken: {}.", broken_tools.join(", "))
            }
        );

        let mut recommendations = Vec::new();
        if !broken_tools.is_empty() {
            recommendations.push(format!(
                "Investigate the broken tool(s): {}.",
                broken_tools.join(", ")
            ));
        }
        if checks.iter().any(|c| c.response_time_ms.is_none() && !c.working) {
            recommendations.push(
                "Fix input schemas that cannot be satisfied by their own declarations."
                    .to_string(),
            );
        }

        let metrics = FunctionalityMetrics {
            total_tools,
            tested_tools,
            working_tools,
            broken_tools,
            untested_tools: Vec::new(),
            coverage_percentage,
            working_percentage,
            checks,
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
