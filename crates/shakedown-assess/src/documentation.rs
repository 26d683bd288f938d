//! Documentation assessment.
//!
//! Pure static analysis — no remote calls. Judges the README text and the
//! capability catalog on five axes: README presence, install instructions,
//! usage guide, API reference, and worked examples. A capability counts as
//! documented when it carries a non-empty description or its name appears
//! verbatim in the README.

use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use shakedown_types::catalog::AssessmentContext;
use shakedown_types::report::{CodeExample, DocumentationMetrics, Report};
use shakedown_types::traits::Assessor;

use crate::support::{percentage, status_from_percentage};

const INSTALL_KEYWORDS: &[&str] = &[
    "install",
    "installation",
    "setup",
    "getting started",
    "npm install",
    "pip install",
    "cargo install",
    "docker",
];

const USAGE_KEYWORDS: &[&str] = &[
    "usage",
    "example",
    "examples",
    "how to",
    "quick start",
    "quickstart",
];

const API_KEYWORDS: &[&str] = &[
    "api",
    "reference",
    "tools",
    "methods",
    "parameters",
    "endpoints",
    "schema",
];

/// Assesses documentation completeness from static text alone.
#[derive(Debug, Default)]
pub struct DocumentationAssessor;

impl DocumentationAssessor {
    pub fn new() -> Self {
        Self
    }

    /// Extract fenced code blocks with their language tags.
    ///
    /// The nearest preceding non-heading prose line becomes the block's
    /// description.
    pub fn extract_code_examples(readme: &str) -> Vec<CodeExample> {
        let mut examples = Vec::new();
        let mut in_block = false;
        let mut language = String::new();
        let mut body: Vec<&str> = Vec::new();
        let mut last_prose: Option<String> = None;
        let mut description: Option<String> = None;

        for line in readme.lines() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("```") {
                if in_block {
                    examples.push(CodeExample {
                        language: std::mem::take(&mut language),
                        code: body.join("\n"),
                        description: description.take(),
                    });
                    body.clear();
                    in_block = false;
                } else {
                    in_block = true;
                    language = rest.trim().to_string();
                    description = last_prose.clone();
                }
                continue;
            }

            if in_block {
                body.push(line);
            } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
                last_prose = Some(trimmed.to_string());
            }
        }

        examples
    }

    fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| haystack.contains(k))
    }
}

#[async_trait]
impl Assessor for DocumentationAssessor {
    type Metrics = DocumentationMetrics;

    fn name(&self) -> &'static str {
        "documentation"
    }

    async fn assess(&self, ctx: &AssessmentContext) -> Report<Self::Metrics> {
        let started = Instant::now();
        let readme = ctx.readme.as_deref().unwrap_or("");
        let has_readme = !readme.trim().is_empty();
        let lowered = readme.to_lowercase();

        let code_examples = Self::extract_code_examples(readme);
        let has_install_instructions = has_readme && Self::contains_any(&lowered, INSTALL_KEYWORDS);
        let has_usage_guide = has_readme && Self::contains_any(&lowered, USAGE_KEYWORDS);
        let has_api_reference = has_readme && Self::contains_any(&lowered, API_KEYWORDS);

        let mut documented_tools = 0;
        let mut mentioned_in_readme = 0;
        let mut missing_examples = Vec::new();
        for tool in &ctx.tools {
            let described = tool
                .description
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty());
            let mentioned = has_readme && readme.contains(tool.name.as_str());
            if mentioned {
                mentioned_in_readme += 1;
            }
            if described || mentioned {
                documented_tools += 1;
            } else {
                missing_examples.push(tool.name.clone());
            }
        }

        let example_count = code_examples.len() + mentioned_in_readme;

        let score = [
            has_readme,
            has_install_instructions,
            has_usage_guide,
            has_api_reference,
            example_count >= 3,
        ]
        .iter()
        .filter(|b| **b)
        .count();
        let pct = percentage(score, 5);
        let status = status_from_percentage(pct);

        debug!(
            score = score,
            examples = example_count,
            documented = documented_tools,
            "documentation assessment complete"
        );

        let explanation = if has_readme {
            format!(
                "README scored {score}/5: {example_count} example(s) found, \
                 {documented_tools} of {} tool(s) documented, install instructions {}, \
                 usage guide {}, API reference {}.",
                ctx.tools.len(),
                present(has_install_instructions),
                present(has_usage_guide),
                present(has_api_reference),
            )
        } else {
            format!(
                "No README content was provided; {} tool(s) rely on their own descriptions.",
                ctx.tools.len()
            )
        };

        let mut recommendations = Vec::new();
        if !has_readme {
            recommendations.push("Add a README describing the server and its tools.".to_string());
        }
        if !has_install_instructions {
            recommendations
                .push("Add installation instructions (an Install or Setup section).".to_string());
        }
        if !has_usage_guide {
            recommendations.push("Add a usage guide with worked examples.".to_string());
        }
        if !has_api_reference {
            recommendations
                .push("Add an API reference covering each tool and its parameters.".to_string());
        }
        if example_count < 3 {
            recommendations.push(format!(
                "Add more code examples ({example_count} found, at least 3 recommended)."
            ));
        }
        if !missing_examples.is_empty() {
            recommendations.push(format!(
                "Document the following tools: {}.",
                missing_examples.join(", ")
            ));
        }

        let metrics = DocumentationMetrics {
            has_readme,
            has_install_instructions,
            has_usage_guide,
            has_api_reference,
            example_count,
            code_examples,
            documented_tools,
            missing_examples,
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

fn present(b: bool) -> &'static str {
    if b {
        "present"
    } else {
        "missing"
    }
}
