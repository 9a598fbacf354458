//! Error types for the script translator.
//!
//! - [`TranslateError`] - Rule compilation and translation failures
//! - [`StoreError`] - Last-input store errors
//! - [`CliError`] - Top-level errors surfaced by the CLI
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Translation Errors
// =============================================================================

/// Errors raised while compiling or applying rules.
///
/// These never escape [`crate::translate`]: the translator reports them on the
/// diagnostic channel and hands back the untouched source.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The rule pattern is not a valid regular expression.
    #[error("Invalid pattern in rule '{rule}': {message}")]
    InvalidPattern { rule: String, message: String },

    /// The replacement references a capture group the pattern does not define.
    #[error("Rule '{rule}' references unknown capture group '{reference}'")]
    UnknownCapture { rule: String, reference: String },

    /// Rule set JSON could not be read or written.
    #[error("Rule set JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rule set file could not be read.
    #[error("Failed to read rule set: {0}")]
    Io(#[from] std::io::Error),
}

impl TranslateError {
    /// Name of the rule at fault, when a single rule is to blame
    pub fn rule(&self) -> Option<&str> {
        match self {
            TranslateError::InvalidPattern { rule, .. } | TranslateError::UnknownCapture { rule, .. } => {
                Some(rule)
            }
            TranslateError::Json(_) | TranslateError::Io(_) => None,
        }
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the last-input store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// CLI Errors (top-level)
// =============================================================================

/// Errors reported by the `bruno-translate` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rule set could not be loaded.
    #[error("{0}")]
    Translate(#[from] TranslateError),

    /// Store error.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Reading the input or writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for rule and translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
