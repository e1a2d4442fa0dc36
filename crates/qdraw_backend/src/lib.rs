//! # qdraw Backend
//!
//! The numerical-backend boundary for qdraw: gate records are forwarded
//! one-to-one as [`GateCall`]s to a [`TensorBackend`] that owns the
//! state representation behind an opaque handle. The crate ships a
//! reference statevector implementation, [`SvBackend`], for the
//! built-in gate vocabulary.
//!
//! ## Quick Start
//!
//! ```rust
//! use qdraw_core::prelude::*;
//! use qdraw_backend::prelude::*;
//!
//! let backend = SvBackend::new(2).with_seed(42);
//!
//! let circuit = CircuitBuilder::new(2).h(1).cx(1, 2).build().unwrap();
//! let result = execute(&circuit, &backend, 1000).unwrap();
//!
//! // Bell pair: only the correlated outcomes appear
//! assert!(result.probability("01") == 0.0);
//! assert!(result.probability("10") == 0.0);
//! ```
//!
//! ## Expectation Values
//!
//! ```rust
//! use qdraw_core::prelude::*;
//! use qdraw_backend::prelude::*;
//!
//! let backend = SvBackend::new(1);
//! let circuit = CircuitBuilder::new(1).x(1).build().unwrap();
//!
//! let state = run(&circuit, &backend).unwrap();
//! let z = backend.expectation(&state, 1).unwrap();
//! assert!((z + 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Gate-record forwarding shim
pub mod call;

/// Backend trait and execution drivers
pub mod execution;

/// Reference statevector backend
pub mod statevector;

// ============================================================================
// Re-exports
// ============================================================================

pub use call::GateCall;
pub use execution::{execute, run, ExecutionResult, TensorBackend};
pub use statevector::{SvBackend, SvState};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qdraw_backend::prelude::*;
    //! ```

    pub use crate::call::GateCall;
    pub use crate::execution::{execute, run, ExecutionResult, TensorBackend};
    pub use crate::statevector::{SvBackend, SvState};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qdraw_core::prelude::*;

    #[test]
    fn test_ghz_sampling() {
        let backend = SvBackend::new(3).with_seed(42);
        let circuit = CircuitBuilder::new(3).h(1).cx_chain().build().unwrap();
        let result = execute(&circuit, &backend, 4000).unwrap();

        let p000 = result.probability("000");
        let p111 = result.probability("111");
        assert!((p000 - 0.5).abs() < 0.05);
        assert!((p111 - 0.5).abs() < 0.05);
        assert_eq!(result.total_counts(), 4000);
    }

    #[test]
    fn test_zero_shots_rejected_before_backend_work() {
        let backend = SvBackend::new(1);
        let circuit = CircuitBuilder::new(1).h(1).build().unwrap();
        assert_eq!(
            execute(&circuit, &backend, 0).unwrap_err(),
            QdrawError::ZeroShots
        );
    }

    #[test]
    fn test_circuit_wider_than_backend_rejected() {
        let backend = SvBackend::new(2);
        let circuit = CircuitBuilder::new(3).h(1).build().unwrap();
        assert!(run(&circuit, &backend).is_err());
    }

    #[test]
    fn test_unknown_kind_propagates() {
        let backend = SvBackend::new(2);
        let circuit = CircuitBuilder::new(2)
            .block("QFT", vec![1, 2])
            .build()
            .unwrap();
        assert_eq!(
            run(&circuit, &backend).unwrap_err(),
            QdrawError::UnsupportedKind("QFT".into())
        );
    }

    #[test]
    fn test_initial_state_prepared() {
        let backend = SvBackend::new(2).with_seed(5);
        let circuit = CircuitBuilder::new(2)
            .init_wires(vec![WireState::One, WireState::Zero])
            .build()
            .unwrap();
        let result = execute(&circuit, &backend, 50).unwrap();
        // wire 1 is the low bit: rightmost character
        assert_eq!(result.probability("01"), 1.0);
    }
}
