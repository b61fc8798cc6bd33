//! bias loading errors

use crate::bias::PredicateMode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BiasError {
    #[error("predicate '{name}' already registered as {existing}, found {found}")]
    DuplicateMode {
        name: String,
        existing: String,
        found: String,
    },
    #[error("unknown predicate '{0}'")]
    UnknownPredicate(String),
    #[error("alias group {group:?}: '{predicate}' has signature {found}, expected {expected}")]
    ArityMismatch {
        group: Vec<String>,
        predicate: String,
        expected: String,
        found: String,
    },
    #[error("alias group has no members")]
    EmptyAliasGroup,
    #[error("invalid mode for '{name}': {reason}")]
    InvalidMode { name: String, reason: String },
    #[error("invalid exclusion for '{predicate}': body positions start at 1, found {position}")]
    InvalidExclusion { predicate: String, position: usize },
    #[error("bound {0} must be at least 1")]
    InvalidBound(&'static str),
}

impl BiasError {
    pub(crate) fn duplicate_mode(existing: &PredicateMode, found: &PredicateMode) -> Self {
        Self::DuplicateMode {
            name: found.name.clone(),
            existing: existing.signature(),
            found: found.signature(),
        }
    }

    pub(crate) fn invalid_mode(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMode {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Fatal error raised before any search begins.
#[derive(Debug, thiserror::Error)]
pub enum BiasLoadError {
    #[error("inconsistent bias: {0}")]
    Declaration(#[from] BiasError),
    #[error("malformed bias declarations: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
