//! Error types for qdraw
//!
//! One error enum for the whole workspace. Every validation failure is
//! raised eagerly, at construction time, before any column is assigned
//! or any cell is rendered.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for qdraw
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QdrawError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Circuit constructed with no wires
    #[error("Circuit must have at least one wire")]
    WireCountZero,

    /// Wire index 0 (wires are 1-based)
    #[error("Wire index 0 is invalid: wires are numbered from 1")]
    WireIndexZero,

    /// Wire index beyond the circuit's wire count
    #[error("Wire {wire} out of range: circuit has {num_wires} wire(s)")]
    WireOutOfRange { wire: usize, num_wires: usize },

    /// The same wire listed twice in one operation
    #[error("Duplicate wire {wire} in operation operands")]
    DuplicateWire { wire: usize },

    /// Operation with no operand wires
    #[error("Operation has an empty wire list")]
    EmptyWireList,

    /// Parameter count does not match the kind's arity
    #[error("Gate '{kind}' expects {expected} parameter(s), got {got}")]
    ParamArity {
        kind: String,
        expected: usize,
        got: usize,
    },

    /// Initial-state descriptor count does not fit the wire count
    #[error("Initial state has {descriptors} descriptor(s) but circuit has {num_wires} wire(s)")]
    InitialStateArity {
        descriptors: usize,
        num_wires: usize,
    },

    /// Shot count must be positive
    #[error("Shot count must be positive")]
    ZeroShots,

    // ========================================================================
    // Layout Errors
    // ========================================================================
    /// Unrecognized layout-mode selector
    #[error("Unsupported layout mode '{0}': expected 'serial' or 'packed'")]
    UnsupportedMode(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Gate kind the backend cannot construct an operator for
    #[error("Backend does not support gate kind '{0}'")]
    UnsupportedKind(String),

    /// Backend execution error
    #[error("Backend error: {0}")]
    BackendError(String),

    // ========================================================================
    // Format Errors
    // ========================================================================
    /// Label formatting failure (reserved; the angle formatter is total)
    #[error("Format error: {0}")]
    FormatError(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for qdraw operations
pub type QdrawResult<T> = Result<T, QdrawError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QdrawError {
    fn from(err: serde_json::Error) -> Self {
        QdrawError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QdrawError {
    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QdrawError::WireCountZero
                | QdrawError::WireIndexZero
                | QdrawError::WireOutOfRange { .. }
                | QdrawError::DuplicateWire { .. }
                | QdrawError::EmptyWireList
                | QdrawError::ParamArity { .. }
                | QdrawError::InitialStateArity { .. }
                | QdrawError::ZeroShots
        )
    }

    /// Check if error is a backend error
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            QdrawError::UnsupportedKind(_) | QdrawError::BackendError(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QdrawError::WireOutOfRange {
            wire: 5,
            num_wires: 3,
        };
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_is_validation_error() {
        assert!(QdrawError::WireIndexZero.is_validation_error());
        assert!(QdrawError::DuplicateWire { wire: 2 }.is_validation_error());
        assert!(!QdrawError::UnsupportedMode("grid".into()).is_validation_error());
    }

    #[test]
    fn test_is_backend_error() {
        assert!(QdrawError::UnsupportedKind("FOO".into()).is_backend_error());
        assert!(!QdrawError::ZeroShots.is_backend_error());
    }
}
