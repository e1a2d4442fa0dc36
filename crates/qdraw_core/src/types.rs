//! Core types for qdraw
//!
//! Fundamental type aliases and the initial-state descriptors consumed
//! by rendering and by backend state preparation.

use crate::error::{QdrawError, QdrawResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Wire identifier (1-indexed: wire 1 is the top row of the diagram)
pub type WireId = usize;

/// Rotation angle in radians
pub type Angle = f64;

/// Measurement counts: bitstring -> count
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Initial-State Descriptors
// ============================================================================

/// Starting state of a single wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireState {
    /// ∣0⟩
    Zero,
    /// ∣1⟩
    One,
    /// ∣+⟩ = ∣0⟩ + ∣1⟩
    Plus,
    /// ∣–⟩ = ∣0⟩ – ∣1⟩
    Minus,
    /// Custom display label (diagram only; backends may reject it)
    Labeled(String),
}

impl WireState {
    /// Display text for the state, without ket decoration
    pub fn label(&self) -> &str {
        match self {
            WireState::Zero => "0",
            WireState::One => "1",
            WireState::Plus => "+",
            WireState::Minus => "-",
            WireState::Labeled(s) => s,
        }
    }
}

impl fmt::Display for WireState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Initial state of a whole circuit
///
/// Either one descriptor broadcast to every wire, one descriptor per
/// wire, or a single product descriptor whose internal arity must equal
/// the circuit's wire count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateSpec {
    /// Same starting state on every wire
    Uniform(WireState),
    /// One starting state per wire, in wire order
    PerWire(Vec<WireState>),
    /// A product state written as one descriptor over all wires
    Product(Vec<WireState>),
}

impl StateSpec {
    /// Validate the descriptor arity against a wire count
    pub fn validate(&self, num_wires: usize) -> QdrawResult<()> {
        match self {
            StateSpec::Uniform(_) => Ok(()),
            StateSpec::PerWire(states) | StateSpec::Product(states) => {
                if states.len() == num_wires {
                    Ok(())
                } else {
                    Err(QdrawError::InitialStateArity {
                        descriptors: states.len(),
                        num_wires,
                    })
                }
            }
        }
    }

    /// Starting state of one wire (1-indexed); `None` on arity mismatch
    pub fn state_of(&self, wire: WireId) -> Option<&WireState> {
        match self {
            StateSpec::Uniform(state) => Some(state),
            StateSpec::PerWire(states) | StateSpec::Product(states) => {
                states.get(wire.checked_sub(1)?)
            }
        }
    }
}

impl Default for StateSpec {
    fn default() -> Self {
        StateSpec::Uniform(WireState::Zero)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_state_labels() {
        assert_eq!(WireState::Zero.label(), "0");
        assert_eq!(WireState::Plus.label(), "+");
        assert_eq!(WireState::Labeled("\\psi".into()).label(), "\\psi");
    }

    #[test]
    fn test_uniform_broadcast() {
        let spec = StateSpec::Uniform(WireState::Plus);
        assert!(spec.validate(7).is_ok());
        assert_eq!(spec.state_of(1), Some(&WireState::Plus));
        assert_eq!(spec.state_of(7), Some(&WireState::Plus));
    }

    #[test]
    fn test_per_wire_arity() {
        let spec = StateSpec::PerWire(vec![WireState::Zero, WireState::One]);
        assert!(spec.validate(2).is_ok());
        assert_eq!(
            spec.validate(3),
            Err(QdrawError::InitialStateArity {
                descriptors: 2,
                num_wires: 3
            })
        );
    }

    #[test]
    fn test_product_arity() {
        let spec = StateSpec::Product(vec![WireState::Zero; 3]);
        assert!(spec.validate(3).is_ok());
        assert!(spec.validate(2).is_err());
    }

    #[test]
    fn test_state_of_positional() {
        let spec = StateSpec::PerWire(vec![WireState::Zero, WireState::One]);
        assert_eq!(spec.state_of(2), Some(&WireState::One));
        assert_eq!(spec.state_of(0), None);
        assert_eq!(spec.state_of(3), None);
    }
}
