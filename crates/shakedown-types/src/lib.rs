//! Shared types, traits, and errors for the shakedown assessment harness.
//!
//! This crate is the foundation that the assessment crates depend on.
//! It contains:
//! - **Trait contracts** (`traits`) — the invocation channel and assessor interfaces
//! - **Catalog types** (`catalog`) — capability descriptors and the per-run context
//! - **Report types** (`report`) — status, metrics, and test-record value objects
//! - **Config types** (`config`) — run configuration with YAML loading
//! - **Error types** (`errors`) — unified error handling

pub mod catalog;
pub mod config;
pub mod errors;
pub mod report;
pub mod traits;

// Re-export commonly used types at the crate root for convenience.
pub use catalog::{AssessmentContext, ToolDescriptor};
pub use config::{AssessmentCategories, AssessmentConfig};
pub use errors::ShakedownError;
pub use report::*;
pub use traits::{Assessor, ToolInvoker};
