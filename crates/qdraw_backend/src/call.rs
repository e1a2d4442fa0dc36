//! Gate-record forwarding shim
//!
//! A [`GateCall`] is the flat record a numerical backend consumes: the
//! kind identifier, the role-ordered wire list, and the parameters,
//! forwarded one-to-one from a [`GateOp`]. No renaming, no reordering;
//! backends that do not recognize a name reject it themselves.

use qdraw_core::{GateOp, WireId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat operator-construction record for a numerical backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate-kind identifier, verbatim
    pub name: String,
    /// Operand wires in role order (1-indexed)
    pub wires: Vec<WireId>,
    /// Parameters, empty for non-parametric gates
    pub params: Vec<f64>,
}

impl GateCall {
    /// Create a call record directly
    pub fn new(name: impl Into<String>, wires: Vec<WireId>, params: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            wires,
            params,
        }
    }
}

impl From<&GateOp> for GateCall {
    fn from(op: &GateOp) -> Self {
        Self {
            name: op.kind().as_str().to_string(),
            wires: op.wires(),
            params: op.params().to_vec(),
        }
    }
}

impl fmt::Display for GateCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.params.is_empty() {
            let text: Vec<String> = self.params.iter().map(|p| format!("{p}")).collect();
            write!(f, "({})", text.join(","))?;
        }
        let wires: Vec<String> = self.wires.iter().map(|w| w.to_string()).collect();
        write!(f, " {}", wires.join(","))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarding_preserves_role_order() {
        // control listed above target stays first
        let call = GateCall::from(&GateOp::cx(3, 1));
        assert_eq!(call.name, "CX");
        assert_eq!(call.wires, vec![3, 1]);
        assert!(call.params.is_empty());
    }

    #[test]
    fn test_forwarding_preserves_params() {
        let call = GateCall::from(&GateOp::rz(2, 0.75));
        assert_eq!(call.name, "Rz");
        assert_eq!(call.wires, vec![2]);
        assert_eq!(call.params, vec![0.75]);
    }

    #[test]
    fn test_forwarding_three_wire() {
        let call = GateCall::from(&GateOp::ccx(2, 1, 3));
        assert_eq!(call.name, "CCX");
        assert_eq!(call.wires, vec![2, 1, 3]);
    }

    #[test]
    fn test_display() {
        let call = GateCall::new("Rx", vec![1], vec![0.5]);
        assert_eq!(call.to_string(), "Rx(0.5) 1");
    }
}
