//! Error types for liquefaction evaluation.
//!
//! Both variants are local-input validation failures. They abort the single
//! calculation they belong to and are never mapped onto a classification band.

/// Errors raised by the critical-value resolver and the index engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiquefactionError {
    /// A site parameter is outside its enumerated set, or a depth is negative
    /// or not a finite number.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    /// The site cannot be evaluated: no layers, a non-positive N-value or
    /// thickness, or a layer whose critical value could not be resolved.
    #[error("invalid site: {reason}")]
    InvalidSite { reason: String },
}

impl LiquefactionError {
    pub(crate) fn parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        LiquefactionError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn site(reason: impl Into<String>) -> Self {
        LiquefactionError::InvalidSite {
            reason: reason.into(),
        }
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, LiquefactionError>;
