//! Schema-driven input synthesis.
//!
//! Given a JSON-schema-shaped parameter contract the synthesizer produces
//! four classes of input: minimal valid parameters, type-violating
//! parameters, boundary/invalid-value parameters, and oversized parameters.
//! These approximate the minimal set of negative-test classes any
//! input-validating system must be judged against, independent of domain.
//!
//! Example values come from a pluggable [`ExampleStrategy`] so the heuristic
//! table can be swapped or extended without touching the assessors that
//! consume it.

use serde_json::{json, Map, Value};

/// Length of the value substituted by oversized synthesis.
pub const OVERSIZED_LEN: usize = 100_000;

/// Name-substring heuristics for string parameters, tried in order.
const STRING_HEURISTICS: &[(&str, &str)] = &[
    ("path", "/tmp/shakedown-sample.txt"),
    ("file", "/tmp/shakedown-sample.txt"),
    ("dir", "/tmp"),
    ("email", "user@example.com"),
    ("url", "https://example.com/"),
    ("uri", "https://example.com/"),
    ("query", "test query"),
    ("search", "test query"),
    ("name", "sample"),
    ("title", "sample"),
    ("id", "test-id-1"),
    ("date", "2024-01-01"),
];

/// Optional parameters worth including in minimal valid input when the
/// schema declares at least one required parameter.
const IMPORTANT_PARAMS: &[&str] = &[
    "query", "path", "file", "content", "text", "data", "input", "message", "format", "limit",
];

/// Pluggable example-value generation: `schema → value`.
///
/// The default [`HeuristicStrategy`] keys string values on substrings of the
/// parameter name; alternative strategies (per-domain generators, recorded
/// fixtures) can be swapped in without touching the assessors.
pub trait ExampleStrategy: Send + Sync {
    /// Produce a schema-appropriate example value for a named parameter.
    fn value_for(&self, prop_name: &str, schema: &Value) -> Value;
}

/// Default context-aware example generation.
pub struct HeuristicStrategy;

impl ExampleStrategy for HeuristicStrategy {
    fn value_for(&self, prop_name: &str, schema: &Value) -> Value {
        // Enumerated properties always use the first declared variant.
        if let Some(first) = schema
            .get("enum")
            .and_then(Value::as_array)
            .and_then(|e| e.first())
        {
            return first.clone();
        }

        let ty = schema.get("type").and_then(Value::as_str).unwrap_or("");
        match ty {
            "string" => Value::String(self.string_value(prop_name, schema)),
            "number" | "integer" => json!(numeric_in_bounds(schema)),
            "boolean" => json!(true),
            "array" => match schema.get("items") {
                Some(items) => json!([self.value_for(prop_name, items)]),
                None => json!([]),
            },
            "object" => {
                let mut nested = Map::new();
                if let Some(props) = schema.get("properties").and_then(Value::as_object) {
                    let required: Vec<&str> = schema
                        .get("required")
                        .and_then(Value::as_array)
                        .map(|r| r.iter().filter_map(Value::as_str).collect())
                        .unwrap_or_default();
                    for (name, prop_schema) in props {
                        if required.contains(&name.as_str()) {
                            nested.insert(name.clone(), self.value_for(name, prop_schema));
                        }
                    }
                }
                Value::Object(nested)
            }
            // Untyped property: fall back to a neutral string.
            _ => json!("test"),
        }
    }
}

impl HeuristicStrategy {
    fn string_value(&self, prop_name: &str, schema: &Value) -> String {
        // Declared formats win over name heuristics.
        match schema.get("format").and_then(Value::as_str) {
            Some("email") => return "user@example.com".to_string(),
            Some("uri") | Some("url") => return "https://example.com/".to_string(),
            Some("date") => return "2024-01-01".to_string(),
            Some("date-time") => return "2024-01-01T00:00:00Z".to_string(),
            _ => {}
        }

        let lowered = prop_name.to_lowercase();
        for (needle, value) in STRING_HEURISTICS {
            if lowered.contains(needle) {
                return pad_to_min_length(value, schema);
            }
        }
        pad_to_min_length("test", schema)
    }
}

/// A numeric value satisfying declared minimum/maximum bounds.
fn numeric_in_bounds(schema: &Value) -> f64 {
    let minimum = schema.get("minimum").and_then(Value::as_f64);
    let maximum = schema.get("maximum").and_then(Value::as_f64);
    match (minimum, maximum) {
        (Some(min), _) => min,
        (None, Some(max)) if max < 1.0 => max,
        _ => 1.0,
    }
}

/// Repeat the base value until it satisfies a declared `minLength`.
fn pad_to_min_length(base: &str, schema: &Value) -> String {
    let min_len = schema
        .get("minLength")
        .and_then(Value::as_u64)
        .unwrap_or(0) as usize;
    let mut out = base.to_string();
    while out.len() < min_len {
        out.push('x');
    }
    out
}

/// Whether an optional property is worth including in minimal valid input.
fn is_important(name: &str, schema: &Value) -> bool {
    let lowered = name.to_lowercase();
    IMPORTANT_PARAMS.iter().any(|p| lowered == *p)
        || schema.get("default").is_some()
        || schema.get("enum").is_some()
}

/// Synthesizes the four input classes from a parameter schema.
pub struct InputSynthesizer {
    strategy: Box<dyn ExampleStrategy>,
}

impl Default for InputSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSynthesizer {
    /// Synthesizer with the default name-keyed heuristics.
    pub fn new() -> Self {
        Self {
            strategy: Box::new(HeuristicStrategy),
        }
    }

    /// Synthesizer with a custom example strategy.
    pub fn with_strategy(strategy: Box<dyn ExampleStrategy>) -> Self {
        Self { strategy }
    }

    /// Minimal valid parameters.
    ///
    /// Every required property gets a type-appropriate value. Tools with
    /// zero required parameters are assumed to work parameter-free, so no
    /// optional property is included for them; otherwise optional
    /// properties come along only when they look important (curated name
    /// list, declared `default`, or enum).
    pub fn valid(&self, schema: Option<&Value>) -> Map<String, Value> {
        let mut params = Map::new();
        let Some(schema) = schema else {
            return params;
        };
        let Some(props) = schema.get("properties").and_then(Value::as_object) else {
            return params;
        };
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if required.is_empty() {
            return params;
        }

        for (name, prop_schema) in props {
            if required.contains(&name.as_str()) {
                params.insert(name.clone(), self.strategy.value_for(name, prop_schema));
            } else if is_important(name, prop_schema) {
                let value = prop_schema
                    .get("default")
                    .cloned()
                    .unwrap_or_else(|| self.strategy.value_for(name, prop_schema));
                params.insert(name.clone(), value);
            }
        }

        // Required names the properties map forgot to declare still need a value.
        for name in required {
            if !params.contains_key(name) {
                params.insert(name.to_string(), json!("test"));
            }
        }

        params
    }

    /// Type-violating parameters: every declared property gets a value of a
    /// different primitive kind than declared.
    pub fn wrong_type(&self, schema: Option<&Value>) -> Map<String, Value> {
        let mut params = Map::new();
        let Some(props) = schema
            .and_then(|s| s.get("properties"))
            .and_then(Value::as_object)
        else {
            return params;
        };

        for (name, prop_schema) in props {
            let ty = prop_schema.get("type").and_then(Value::as_str).unwrap_or("");
            let value = match ty {
                "string" => json!(12345),
                "number" | "integer" => json!("not-a-number"),
                "boolean" => json!("not-a-boolean"),
                "array" => json!("not-an-array"),
                "object" => json!("not-an-object"),
                _ => json!(12345),
            };
            params.insert(name.clone(), value);
        }
        params
    }

    /// Boundary/invalid-value parameters.
    ///
    /// String properties get an enum-violating sentinel, a malformed value
    /// for declared formats, or an empty string. Numeric properties get one
    /// past a declared bound, or an extreme value absent both bounds.
    pub fn invalid_value(&self, schema: Option<&Value>) -> Map<String, Value> {
        let mut params = Map::new();
        let Some(props) = schema
            .and_then(|s| s.get("properties"))
            .and_then(Value::as_object)
        else {
            return params;
        };

        for (name, prop_schema) in props {
            let ty = prop_schema.get("type").and_then(Value::as_str).unwrap_or("");
            let value = if prop_schema.get("enum").is_some() {
                Some(json!("__not_a_valid_choice__"))
            } else {
                match ty {
                    "string" => match prop_schema.get("format").and_then(Value::as_str) {
                        Some("email") => Some(json!("not-an-email")),
                        Some("uri") | Some("url") => Some(json!("not a valid uri")),
                        _ => Some(json!("")),
                    },
                    "number" | "integer" => {
                        let minimum = prop_schema.get("minimum").and_then(Value::as_f64);
                        let maximum = prop_schema.get("maximum").and_then(Value::as_f64);
                        match (minimum, maximum) {
                            (Some(min), _) => Some(json!(min - 1.0)),
                            (None, Some(max)) => Some(json!(max + 1.0)),
                            (None, None) => Some(json!(-999_999_999.0)),
                        }
                    }
                    _ => None,
                }
            };
            if let Some(value) = value {
                params.insert(name.clone(), value);
            }
        }
        params
    }

    /// Oversized parameters: the first string-typed property is replaced
    /// with a 100,000-character value on top of otherwise valid input.
    ///
    /// Returns `None` when no string property exists — the caller must skip
    /// the test as a vacuous pass, since a capability cannot be faulted for
    /// failing to reject oversized input it structurally cannot receive.
    pub fn oversized(&self, schema: Option<&Value>) -> Option<Map<String, Value>> {
        let props = schema?.get("properties").and_then(Value::as_object)?;
        let target = props.iter().find_map(|(name, prop_schema)| {
            (prop_schema.get("type").and_then(Value::as_str) == Some("string"))
                .then(|| name.clone())
        })?;

        let mut params = self.valid(schema);
        params.insert(target, Value::String("x".repeat(OVERSIZED_LEN)));
        Some(params)
    }
}
