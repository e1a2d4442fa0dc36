//! # qdraw Core
//!
//! Foundation types, the closed gate-operation model, and the circuit
//! container for qdraw.
//!
//! Operations are modeled as a closed sum over *shapes* (how many wires,
//! which role each wire plays), tagged with an opaque gate kind used for
//! label lookup and backend operator construction. Everything is
//! validated eagerly at construction; the layout and rendering crates
//! never see an invalid circuit.
//!
//! ## Quick Start
//!
//! ```rust
//! use qdraw_core::prelude::*;
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h(1)
//!     .cx(1, 2)
//!     .cx(2, 3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(circuit.num_wires(), 3);
//! assert_eq!(circuit.op_count(), 3);
//! ```
//!
//! ## Explicit Roles
//!
//! Generalized operations beyond the fixed 1–4-wire shapes must state
//! their operand roles; there is no positional convention:
//!
//! ```rust
//! use qdraw_core::prelude::*;
//!
//! let circuit = CircuitBuilder::new(5)
//!     .chain("CCCCX", vec![1, 2, 3, 4], 5)
//!     .block("QFT", vec![1, 2, 3])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(circuit.ops()[0].involved_range(), (1, 5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core type aliases and initial-state descriptors
pub mod types;

/// Error types
pub mod error;

/// Gate operation model
pub mod gate;

/// Circuit container
pub mod circuit;

/// Fluent circuit builder
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use error::{QdrawError, QdrawResult};
pub use gate::{GateOp, Kind, WireRoles};
pub use types::{Angle, Counts, StateSpec, WireId, WireState};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qdraw_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::error::{QdrawError, QdrawResult};
    pub use crate::gate::{GateOp, Kind, WireRoles};
    pub use crate::types::{Angle, Counts, StateSpec, WireId, WireState};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_full_circuit_construction() {
        let circuit = CircuitBuilder::new(4)
            .h_layer()
            .cx_chain()
            .rz(1, 0.25)
            .ccx(1, 2, 4)
            .swap(2, 3)
            .build()
            .unwrap();

        assert_eq!(circuit.num_wires(), 4);
        assert_eq!(circuit.op_count(), 10);
        assert_eq!(circuit.count_parametric(), 1);
    }

    #[test]
    fn test_validation_is_eager() {
        // every failure mode is caught before the circuit exists
        assert!(Circuit::new(0).is_err());
        assert!(CircuitBuilder::new(2).cx(1, 1).build().is_err());
        assert!(CircuitBuilder::new(2).h(0).build().is_err());
        assert!(CircuitBuilder::new(2)
            .init_wires(vec![WireState::Zero])
            .build()
            .is_err());
    }

    #[test]
    fn test_program_order_preserved() {
        let circuit = CircuitBuilder::new(2).x(2).h(1).cx(1, 2).build().unwrap();
        let kinds: Vec<&str> = circuit.ops().iter().map(|op| op.kind().as_str()).collect();
        assert_eq!(kinds, vec!["X", "H", "CX"]);
    }

    #[test]
    fn test_json_roundtrip_full() {
        let circuit = CircuitBuilder::new(3)
            .init_product(vec![WireState::Plus, WireState::Zero, WireState::One])
            .h(1)
            .cp(1, 3, 0.5)
            .build()
            .unwrap();

        let parsed = Circuit::from_json(&circuit.to_json().unwrap()).unwrap();
        assert_eq!(circuit, parsed);
    }
}
