//! Error types for the matching engine
use thiserror::Error;

/// Main error type for matching operations
///
/// A value that matches no declaration is not an error: `dispatch` reports it
/// as `Ok(None)`. Errors only arise from caller-supplied code or from
/// explicitly fallible construction.
#[derive(Error, Debug)]
pub enum MatchError {
    /// A callback failed while producing a result
    #[error("Callback error: {0}")]
    Callback(String),

    /// A predicate or guard failed while deciding
    #[error("Predicate error: {0}")]
    Predicate(String),

    /// Pattern could not be compiled
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern source
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration is invalid or incomplete
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// JSON conversion failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatchError {
    /// Build a callback failure from any displayable error
    pub fn callback(err: impl std::fmt::Display) -> Self {
        MatchError::Callback(err.to_string())
    }

    /// Build a predicate failure from any displayable error
    pub fn predicate(err: impl std::fmt::Display) -> Self {
        MatchError::Predicate(err.to_string())
    }
}

/// Result type alias for matching operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Error chain helper for adding context
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context with format
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ErrorContext<T> for Result<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(e, msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e, f()))
    }
}

// Keeps the variant so callers can still tell callback and predicate failures apart.
fn wrap(err: MatchError, msg: String) -> MatchError {
    match err {
        MatchError::Callback(inner) => MatchError::Callback(format!("{}: {}", msg, inner)),
        MatchError::Predicate(inner) => MatchError::Predicate(format!("{}: {}", msg, inner)),
        MatchError::Configuration(inner) => {
            MatchError::Configuration(format!("{}: {}", msg, inner))
        }
        MatchError::InvalidPattern { pattern, reason } => MatchError::InvalidPattern {
            pattern,
            reason: format!("{}: {}", msg, reason),
        },
        other => MatchError::Callback(format!("{}: {}", msg, other)),
    }
}
