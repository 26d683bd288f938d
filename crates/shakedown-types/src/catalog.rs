//! Capability catalog types.
//!
//! A remote tool server advertises a catalog of callable capabilities, each
//! with a name and a JSON-schema-shaped parameter contract. The catalog is
//! supplied once per assessment run and is never mutated by the core.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::AssessmentConfig;
use crate::traits::ToolInvoker;

/// A callable capability advertised by the remote tool server.
///
/// The input schema is kept as a loose [`serde_json::Value`] because remote
/// servers supply arbitrary JSON-schema-shaped structures; all structure
/// probing happens in the classifier and synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description, if the server provides one.
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Option<serde_json::Value>,
}

impl ToolDescriptor {
    /// The schema's `properties` map, if the schema declares one.
    pub fn properties(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.input_schema
            .as_ref()
            .and_then(|s| s.get("properties"))
            .and_then(|p| p.as_object())
    }

    /// Names listed in the schema's `required` array.
    pub fn required(&self) -> Vec<&str> {
        self.input_schema
            .as_ref()
            .and_then(|s| s.get("required"))
            .and_then(|r| r.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }

    /// Whether the schema declares at least one input property.
    pub fn has_properties(&self) -> bool {
        self.properties().is_some_and(|p| !p.is_empty())
    }
}

/// Everything an assessor needs for one run.
///
/// Constructed once per run by the orchestrator and passed to each assessor
/// independently. Read-only to assessors — they own their own accumulator
/// lists and share no mutable state through the context.
#[derive(Clone)]
pub struct AssessmentContext {
    /// The capability catalog, in server-declared order. Order defines test order.
    pub tools: Vec<ToolDescriptor>,
    /// The invocation channel to the remote tool server.
    pub invoker: Arc<dyn ToolInvoker>,
    /// README text shipped with the server, if any.
    pub readme: Option<String>,
    /// Package metadata (name, version, etc.), if any.
    pub package_meta: Option<serde_json::Value>,
    /// Feature toggles, timeouts, and sampling limits for this run.
    pub config: AssessmentConfig,
}

impl std::fmt::Debug for AssessmentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentContext")
            .field("tools", &self.tools.len())
            .field("has_readme", &self.readme.is_some())
            .field("config", &self.config)
            .finish()
    }
}
