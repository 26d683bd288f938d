//! Response classification.
//!
//! Remote tool servers signal errors through any of three incompatible
//! conventions: a boolean `isError` flag, a structured `error` object, or a
//! `content` array carrying an error-typed entry. Nothing on the wire says
//! which convention a server uses, so classification reconstructs a closed
//! sum type from the loose JSON value by trying each convention in a fixed
//! priority order, defaulting to "not an error" only after all checks fail.

use serde_json::Value;

/// Error code carried by a structured error object.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    /// Numeric code (e.g. JSON-RPC -32602).
    Number(i64),
    /// Textual code (e.g. "EINVAL").
    Text(String),
}

impl ErrorCode {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(ErrorCode::Number),
            Value::String(s) => Some(ErrorCode::Text(s.clone())),
            _ => None,
        }
    }
}

/// The wire shape of an invocation result, reconstructed from loose JSON.
///
/// Variants are ordered by classification priority: an explicit error flag
/// wins over a structured error object, which wins over an error-typed
/// content entry. Anything else is opaque.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// The result carries `isError: true`.
    ErrorFlagged {
        /// Message recovered from the result's content, if any.
        message: Option<String>,
    },
    /// The result carries a structured `error` object.
    StructuredError {
        /// The error message ("Unknown error" if absent).
        message: String,
        /// The error code, if one was supplied.
        code: Option<ErrorCode>,
    },
    /// The result's `content` array contains an error-typed entry.
    ContentError {
        /// Text of the error entry ("Unknown error" if absent).
        message: String,
    },
    /// No known error convention matched.
    Opaque,
}

impl ResponseShape {
    /// Reconstruct the shape of a raw invocation result.
    pub fn of(result: &Value) -> Self {
        // 1. Explicit boolean error flag.
        if result.get("isError").and_then(Value::as_bool) == Some(true) {
            let message = content_text(result).filter(|t| !t.is_empty());
            return ResponseShape::ErrorFlagged { message };
        }

        // 2. Structured error object (or bare error string).
        if let Some(error) = result.get("error") {
            match error {
                Value::Object(obj) => {
                    let message = obj
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown error")
                        .to_string();
                    let code = obj.get("code").and_then(ErrorCode::from_value);
                    return ResponseShape::StructuredError { message, code };
                }
                Value::String(s) => {
                    return ResponseShape::StructuredError {
                        message: s.clone(),
                        code: None,
                    };
                }
                _ => {}
            }
        }

        // 3. An error-typed entry in the content array.
        if let Some(entries) = result.get("content").and_then(Value::as_array) {
            for entry in entries {
                if entry.get("type").and_then(Value::as_str) == Some("error") {
                    let message = entry
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown error")
                        .to_string();
                    return ResponseShape::ContentError { message };
                }
            }
        }

        ResponseShape::Opaque
    }

    /// Whether this shape signals an error.
    pub fn is_error(&self) -> bool {
        !matches!(self, ResponseShape::Opaque)
    }
}

/// Flat classification of an invocation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Whether the result signals an error.
    pub is_error: bool,
    /// The error message, if one could be recovered.
    pub message: Option<String>,
    /// The error code, if one was supplied.
    pub code: Option<ErrorCode>,
}

/// Classify a raw invocation result as error or success.
pub fn classify(result: &Value) -> Classification {
    match ResponseShape::of(result) {
        ResponseShape::ErrorFlagged { message } => Classification {
            is_error: true,
            message,
            code: None,
        },
        ResponseShape::StructuredError { message, code } => Classification {
            is_error: true,
            message: Some(message),
            code,
        },
        ResponseShape::ContentError { message } => Classification {
            is_error: true,
            message: Some(message),
            code: None,
        },
        ResponseShape::Opaque => Classification {
            is_error: false,
            message: None,
            code: None,
        },
    }
}

/// Type-guard for capability descriptors arriving as loose JSON.
///
/// Rejects descriptors with a missing or empty name, or with an
/// `inputSchema` that is not an object. Capabilities failing this check are
/// excluded from error-handling sampling instead of crashing the run.
pub fn looks_like_tool(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let has_name = obj
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.trim().is_empty());
    if !has_name {
        return false;
    }
    match obj.get("inputSchema") {
        None | Some(Value::Null) | Some(Value::Object(_)) => true,
        Some(_) => false,
    }
}

/// Text of the first text-bearing content entry, if any.
fn content_text(result: &Value) -> Option<String> {
    let entries = result.get("content").and_then(Value::as_array)?;
    entries
        .iter()
        .find_map(|e| e.get("text").and_then(Value::as_str))
        .map(str::to_string)
}

/// Flatten an invocation result into searchable text.
///
/// Content-array entries contribute their `text` fields; bare strings pass
/// through; anything else is rendered as compact JSON so reflection-based
/// heuristics still see every field.
pub fn response_text(result: &Value) -> String {
    match result {
        Value::String(s) => s.clone(),
        Value::Object(obj) => {
            if let Some(entries) = obj.get("content").and_then(Value::as_array) {
                let texts: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("text").and_then(Value::as_str))
                    .collect();
                if !texts.is_empty() {
                    return texts.join("\n");
                }
            }
            result.to_string()
        }
        _ => result.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ---------------------------------------------------------
    // Convention 1: explicit isError flag
    // ---------------------------------------------------------

    #[test]
    fn test_is_error_flag_true() {
        let result = json!({
            "isError": true,
            "content": [{"type": "text", "text": "something broke"}]
        });
        let c = classify(&result);
        assert!(c.is_error);
        assert_eq!(c.message.as_deref(), Some("something broke"));
    }

    #[test]
    fn test_is_error_flag_false_falls_through() {
        let result = json!({
            "isError": false,
            "error": {"message": "late error", "code": -32000}
        });
        // The flag is false, so the structured error convention still applies.
        let c = classify(&result);
        assert!(c.is_error);
        assert_eq!(c.message.as_deref(), Some("late error"));
        assert_eq!(c.code, Some(ErrorCode::Number(-32000)));
    }

    #[test]
    fn test_is_error_flag_without_content() {
        let c = classify(&json!({"isError": true}));
        assert!(c.is_error);
        assert_eq!(c.message, None);
    }

    // ---------------------------------------------------------
    // Convention 2: structured error object
    // ---------------------------------------------------------

    #[test]
    fn test_structured_error_with_message_and_code() {
        let c = classify(&json!({"error": {"message": "missing parameter", "code": -32602}}));
        assert!(c.is_error);
        assert_eq!(c.message.as_deref(), Some("missing parameter"));
        assert_eq!(c.code, Some(ErrorCode::Number(-32602)));
    }

    #[test]
    fn test_structured_error_defaults_unknown_message() {
        let c = classify(&json!({"error": {"code": "EINVAL"}}));
        assert!(c.is_error);
        assert_eq!(c.message.as_deref(), Some("Unknown error"));
        assert_eq!(c.code, Some(ErrorCode::Text("EINVAL".to_string())));
    }

    #[test]
    fn test_bare_string_error() {
        let c = classify(&json!({"error": "it went sideways"}));
        assert!(c.is_error);
        assert_eq!(c.message.as_deref(), Some("it went sideways"));
        assert_eq!(c.code, None);
    }

    // ---------------------------------------------------------
    // Convention 3: error-typed content entry
    // ---------------------------------------------------------

    #[test]
    fn test_content_error_entry() {
        let result = json!({
            "content": [
                {"type": "text", "text": "partial output"},
                {"type": "error", "text": "validation rejected input"}
            ]
        });
        let c = classify(&result);
        assert!(c.is_error);
        assert_eq!(c.message.as_deref(), Some("validation rejected input"));
    }

    #[test]
    fn test_content_error_entry_without_text() {
        let c = classify(&json!({"content": [{"type": "error"}]}));
        assert!(c.is_error);
        assert_eq!(c.message.as_deref(), Some("Unknown error"));
    }

    // ---------------------------------------------------------
    // Priority ordering
    // ---------------------------------------------------------

    #[test]
    fn test_flag_wins_over_structured_error() {
        let result = json!({
            "isError": true,
            "error": {"message": "structured"},
            "content": [{"type": "text", "text": "flagged"}]
        });
        assert!(matches!(
            ResponseShape::of(&result),
            ResponseShape::ErrorFlagged { .. }
        ));
    }

    #[test]
    fn test_structured_wins_over_content_error() {
        let result = json!({
            "error": {"message": "structured"},
            "content": [{"type": "error", "text": "from content"}]
        });
        assert!(matches!(
            ResponseShape::of(&result),
            ResponseShape::StructuredError { .. }
        ));
    }

    // ---------------------------------------------------------
    // Not an error
    // ---------------------------------------------------------

    #[test]
    fn test_clean_result_is_opaque() {
        let result = json!({"content": [{"type": "text", "text": "all good"}]});
        assert_eq!(ResponseShape::of(&result), ResponseShape::Opaque);
        assert!(!classify(&result).is_error);
    }

    #[test]
    fn test_non_object_results_are_opaque() {
        assert!(!classify(&json!("plain text")).is_error);
        assert!(!classify(&json!(42)).is_error);
        assert!(!classify(&json!(null)).is_error);
        assert!(!classify(&json!(["a", "b"])).is_error);
    }

    // ---------------------------------------------------------
    // Descriptor type-guard
    // ---------------------------------------------------------

    #[test]
    fn test_looks_like_tool_accepts_minimal() {
        assert!(looks_like_tool(&json!({"name": "search"})));
        assert!(looks_like_tool(&json!({
            "name": "search",
            "inputSchema": {"type": "object", "properties": {}}
        })));
    }

    #[test]
    fn test_looks_like_tool_rejects_garbage() {
        assert!(!looks_like_tool(&json!(null)));
        assert!(!looks_like_tool(&json!("search")));
        assert!(!looks_like_tool(&json!({})));
        assert!(!looks_like_tool(&json!({"name": ""})));
        assert!(!looks_like_tool(&json!({"name": "   "})));
        assert!(!looks_like_tool(&json!({"name": 42})));
        assert!(!looks_like_tool(&json!({"name": "x", "inputSchema": "string"})));
        assert!(!looks_like_tool(&json!({"name": "x", "inputSchema": [1, 2]})));
    }

    #[test]
    fn test_looks_like_tool_allows_null_schema() {
        assert!(looks_like_tool(&json!({"name": "x", "inputSchema": null})));
    }

    // ---------------------------------------------------------
    // Response text flattening
    // ---------------------------------------------------------

    #[test]
    fn test_response_text_joins_content() {
        let result = json!({
            "content": [
                {"type": "text", "text": "line one"},
                {"type": "text", "text": "line two"}
            ]
        });
        assert_eq!(response_text(&result), "line one\nline two");
    }

    #[test]
    fn test_response_text_plain_string() {
        assert_eq!(response_text(&json!("hello")), "hello");
    }

    #[test]
    fn test_response_text_falls_back_to_json() {
        let text = response_text(&json!({"status": 200, "body": "ok"}));
        assert!(text.contains("200"));
        assert!(text.contains("ok"));
    }
}
