//! Assessment run configuration.
//!
//! The orchestrator constructs one [`AssessmentConfig`] per run, either
//! programmatically or from a YAML file. Assessors read it through the
//! context and never mutate it.

use serde::{Deserialize, Serialize};

use crate::errors::ShakedownError;

/// Per-feature enable map.
///
/// The orchestrator consults this to decide which assessors to run; the core
/// carries it so a single config file describes the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentCategories {
    /// Run the documentation assessor.
    #[serde(default = "default_true")]
    pub documentation: bool,
    /// Run the functionality assessor.
    #[serde(default = "default_true")]
    pub functionality: bool,
    /// Run the error-handling assessor.
    #[serde(default = "default_true")]
    pub error_handling: bool,
    /// Run the security assessor.
    #[serde(default = "default_true")]
    pub security: bool,
}

impl Default for AssessmentCategories {
    fn default() -> Self {
        Self {
            documentation: true,
            functionality: true,
            error_handling: true,
            security: true,
        }
    }
}

/// Feature toggles, timeouts, and sampling limits for one assessment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Whether the functionality assessor may invoke tools at all.
    #[serde(default = "default_true")]
    pub auto_test: bool,
    /// Advisory: downstream consumers may skip tools found broken.
    #[serde(default)]
    pub skip_broken_tools: bool,
    /// Per-test timeout in milliseconds for functionality and security tests.
    #[serde(default = "default_test_timeout_ms")]
    pub test_timeout_ms: u64,
    /// How many tools the error-handling assessor samples. Negative = all.
    #[serde(default = "default_max_tools_for_errors")]
    pub max_tools_to_test_for_errors: i64,
    /// Promote per-test progress logs from debug to info level.
    #[serde(default)]
    pub verbose_logging: bool,
    /// Per-feature enable map.
    #[serde(default)]
    pub categories: AssessmentCategories,
}

fn default_true() -> bool {
    true
}
fn default_test_timeout_ms() -> u64 {
    10_000
}
fn default_max_tools_for_errors() -> i64 {
    5
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            auto_test: true,
            skip_broken_tools: false,
            test_timeout_ms: default_test_timeout_ms(),
            max_tools_to_test_for_errors: default_max_tools_for_errors(),
            verbose_logging: false,
            categories: AssessmentCategories::default(),
        }
    }
}

impl AssessmentConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ShakedownError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ShakedownError::Config(format!("failed to parse config: {e}")))
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_file(path: &std::path::Path) -> Result<Self, ShakedownError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShakedownError::Config(format!("failed to read config at {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// How many tools the error-handling assessor should sample from a
    /// catalog of `available` valid tools. Negative limits mean "all".
    pub fn error_sample_size(&self, available: usize) -> usize {
        if self.max_tools_to_test_for_errors < 0 {
            available
        } else {
            available.min(self.max_tools_to_test_for_errors as usize)
        }
    }
}
