//! Error types for promptforge.
//!
//! Only storage I/O, id-based lookups and the optional completion helper
//! can fail. Parsing, building, rendering, optimizing and diffing always
//! produce a best-effort value and never return these errors.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for promptforge operations.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// User provided invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// Quality checks failed and the caller asked for strict handling.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Persisted data exists but could not be decoded. The data is left untouched.
    #[error("Failed to decode stored '{name}': {reason}")]
    DecodeError { name: String, reason: String },

    /// An id did not match any stored record.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Reading or writing the storage backend failed.
    #[error("Storage operation failed: {0}")]
    StorageError(String),

    /// The text-completion helper failed or exceeded its latency bound.
    #[error("Completion helper failed: {0}")]
    CompletionError(String),
}

impl ForgeError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ForgeError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ForgeError::UserError(_) => exit_codes::USER_ERROR,
            ForgeError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            ForgeError::DecodeError { .. } => exit_codes::STORAGE_FAILURE,
            ForgeError::StorageError(_) => exit_codes::STORAGE_FAILURE,
            ForgeError::NotFound { .. } => exit_codes::NOT_FOUND,
            ForgeError::CompletionError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for promptforge operations.
pub type Result<T> = std::result::Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = ForgeError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = ForgeError::ValidationError("goal missing".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn decode_and_storage_errors_share_exit_code() {
        let decode = ForgeError::DecodeError {
            name: "library".to_string(),
            reason: "expected value".to_string(),
        };
        let storage = ForgeError::StorageError("disk full".to_string());
        assert_eq!(decode.exit_code(), exit_codes::STORAGE_FAILURE);
        assert_eq!(storage.exit_code(), exit_codes::STORAGE_FAILURE);
    }

    #[test]
    fn not_found_has_correct_exit_code() {
        let err = ForgeError::not_found("prompt", "abc");
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForgeError::not_found("version", "v-9");
        assert_eq!(err.to_string(), "version not found: v-9");

        let err = ForgeError::DecodeError {
            name: "templates".to_string(),
            reason: "trailing comma".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode stored 'templates': trailing comma"
        );

        let err = ForgeError::ValidationError("2 checks failed".to_string());
        assert_eq!(err.to_string(), "Validation failed: 2 checks failed");
    }
}
