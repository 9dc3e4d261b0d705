use thiserror::Error;

/// Errors raised by the outer surfaces of the crate (input, options, tools).
///
/// Extraction itself never fails: malformed nodes are skipped and an empty
/// document simply yields an empty result.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters for tool '{tool}': {reason}")]
    InvalidParams { tool: String, reason: String },

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error("Locator '{locator}' matched {count} elements, expected exactly one")]
    LocatorNotUnique { locator: String, count: usize },
}

pub type Result<T> = std::result::Result<T, ForgeError>;
