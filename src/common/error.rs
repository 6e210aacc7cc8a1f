//! Error types for the tutorial runner
//!
//! Every collaborator failure is fatal: the first failing step aborts the
//! run. The collaborator's own stderr is the primary diagnostic; these
//! errors only add which phase failed and how the process exited.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tutorial runner
#[derive(Error, Debug)]
pub enum Error {
    // === Argument Errors ===
    #[error("Unknown installation mode '{0}'. Expected 'helm' or 'stackablectl'")]
    InvalidArgument(String),

    // === Preflight Errors ===
    #[error("Required tool '{name}' not found: {detail}")]
    ToolNotFound { name: String, detail: String },

    // === Phase Errors ===
    #[error("Operator installation failed: {0}")]
    Installation(String),

    #[error("Failed to apply manifest '{path}': {detail}")]
    Apply { path: String, detail: String },

    #[error("Rollout of {workload} did not complete: {detail}")]
    Rollout { workload: String, detail: String },

    #[error("Failed to start port-forward to service '{service}': {detail}")]
    PortForward { service: String, detail: String },

    #[error("Producing to topic '{topic}' failed: {detail}")]
    Produce { topic: String, detail: String },

    #[error("Consuming from topic '{topic}' failed: {detail}")]
    Consume { topic: String, detail: String },

    // The terminal, documentation-correctness-relevant failure
    #[error("Consumed output does not contain the test payload '{payload}'")]
    Assertion { payload: String },

    // === Interruption ===
    #[error("Interrupted")]
    Interrupted,

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a tool-not-found error from a `which` lookup failure
    pub fn tool_not_found(name: &str, error: &which::Error) -> Self {
        Self::ToolNotFound {
            name: name.to_string(),
            detail: error.to_string(),
        }
    }

    /// Create an apply error for a manifest path
    pub fn apply(path: &std::path::Path, detail: impl Into<String>) -> Self {
        Self::Apply {
            path: path.display().to_string(),
            detail: detail.into(),
        }
    }
}
