//! Assessment engine for remote tool servers.
//!
//! Four independent assessors share a common contract: given an
//! [`AssessmentContext`](shakedown_types::catalog::AssessmentContext) they
//! each produce one self-contained report. Assessors never call each other
//! and share no mutable state — the only shared machinery is the response
//! classifier, the input synthesizer, and a handful of support functions
//! (status banding, timeout racing, advisory pacing).
//!
//! - **classify**: turns an arbitrary invocation result into a definite
//!   error/success verdict across three incompatible error conventions
//! - **synth**: produces valid, type-violating, invalid-value, and
//!   oversized inputs from a JSON-schema-shaped parameter contract
//! - **documentation / functionality / error_handling / security**: the
//!   four assessors

pub mod classify;
pub mod documentation;
pub mod error_handling;
pub mod functionality;
pub mod security;
pub mod support;
pub mod synth;

pub use documentation::DocumentationAssessor;
pub use error_handling::ErrorHandlingAssessor;
pub use functionality::FunctionalityAssessor;
pub use security::SecurityAssessor;
