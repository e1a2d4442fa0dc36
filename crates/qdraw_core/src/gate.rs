//! Gate operation model for qdraw
//!
//! Operations are a closed sum over a fixed set of *shapes*: how many
//! wires an operation touches and which role each wire plays. The gate
//! identity itself is an opaque [`Kind`] used for label lookup and for
//! backend operator construction; it never changes the shape.

use crate::error::{QdrawError, QdrawResult};
use crate::types::{Angle, WireId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Gate Kind
// ============================================================================

/// Opaque gate-kind identifier
///
/// Canonical built-in identifiers are `"H"`, `"X"`, `"Rx"`, `"CX"`,
/// `"SWAP"`, `"CCX"` and friends, but any identifier is accepted: label
/// lookup falls back to the raw text for kinds it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Kind(String);

impl Kind {
    /// Create a kind from an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Kind {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Operand Roles for Generalized Operations
// ============================================================================

/// Explicit operand roles for operations beyond the fixed 1–4-wire
/// shapes
///
/// There is no positional convention for generalized operations: the
/// caller states the roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireRoles {
    /// Controls (in order) followed by a single target
    ControlChain {
        /// Control wires, in chain order
        controls: Vec<WireId>,
        /// The controlled wire
        target: WireId,
    },
    /// An opaque block over an explicit wire list
    Block {
        /// All wires the block covers
        wires: Vec<WireId>,
    },
}

impl WireRoles {
    /// All operand wires in role order
    pub fn wires(&self) -> Vec<WireId> {
        match self {
            WireRoles::ControlChain { controls, target } => {
                let mut ws = controls.clone();
                ws.push(*target);
                ws
            }
            WireRoles::Block { wires } => wires.clone(),
        }
    }
}

// ============================================================================
// Gate Operation
// ============================================================================

/// One operation in a circuit, tagged by shape
///
/// Wire order encodes semantic role (controls before targets); the
/// range helpers below sort only to compute span boundaries and never
/// to reassign roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateOp {
    /// One wire, no parameters
    Single(Kind, WireId),
    /// One wire, with parameters (rotations, phases)
    ParamSingle(Kind, WireId, Vec<Angle>),
    /// Control wire then target wire
    Controlled(Kind, WireId, WireId),
    /// Control wire then target wire, with parameters
    ParamControlled(Kind, WireId, WireId, Vec<Angle>),
    /// Two wires in fixed order (exchange-type or opaque block)
    TwoWire(Kind, WireId, WireId),
    /// Two wires with parameters
    ParamTwoWire(Kind, WireId, WireId, Vec<Angle>),
    /// Three wires in fixed order (e.g. two controls then target)
    ThreeWire(Kind, WireId, WireId, WireId),
    /// Four wires in fixed order (e.g. three controls then target)
    FourWire(Kind, WireId, WireId, WireId, WireId),
    /// Generalized operation with explicit roles
    NWire(Kind, WireRoles),
    /// Generalized operation with explicit roles and parameters
    ParamNWire(Kind, WireRoles, Vec<Angle>),
}

impl GateOp {
    // ========================================================================
    // Shape Accessors
    // ========================================================================

    /// The operation's gate kind
    pub fn kind(&self) -> &Kind {
        match self {
            GateOp::Single(k, _)
            | GateOp::ParamSingle(k, _, _)
            | GateOp::Controlled(k, _, _)
            | GateOp::ParamControlled(k, _, _, _)
            | GateOp::TwoWire(k, _, _)
            | GateOp::ParamTwoWire(k, _, _, _)
            | GateOp::ThreeWire(k, _, _, _)
            | GateOp::FourWire(k, _, _, _, _)
            | GateOp::NWire(k, _)
            | GateOp::ParamNWire(k, _, _) => k,
        }
    }

    /// Operand wires in role order
    pub fn wires(&self) -> Vec<WireId> {
        match self {
            GateOp::Single(_, w) | GateOp::ParamSingle(_, w, _) => vec![*w],
            GateOp::Controlled(_, c, t) | GateOp::ParamControlled(_, c, t, _) => vec![*c, *t],
            GateOp::TwoWire(_, a, b) | GateOp::ParamTwoWire(_, a, b, _) => vec![*a, *b],
            GateOp::ThreeWire(_, a, b, c) => vec![*a, *b, *c],
            GateOp::FourWire(_, a, b, c, d) => vec![*a, *b, *c, *d],
            GateOp::NWire(_, roles) | GateOp::ParamNWire(_, roles, _) => roles.wires(),
        }
    }

    /// Parameters, empty for non-parametric shapes
    pub fn params(&self) -> &[Angle] {
        match self {
            GateOp::ParamSingle(_, _, p)
            | GateOp::ParamControlled(_, _, _, p)
            | GateOp::ParamTwoWire(_, _, _, p)
            | GateOp::ParamNWire(_, _, p) => p,
            _ => &[],
        }
    }

    /// Explicit roles, when the shape carries them
    pub fn roles(&self) -> Option<&WireRoles> {
        match self {
            GateOp::NWire(_, roles) | GateOp::ParamNWire(_, roles, _) => Some(roles),
            _ => None,
        }
    }

    /// Check if the shape carries parameters
    pub fn is_parametric(&self) -> bool {
        matches!(
            self,
            GateOp::ParamSingle(..)
                | GateOp::ParamControlled(..)
                | GateOp::ParamTwoWire(..)
                | GateOp::ParamNWire(..)
        )
    }

    /// Check if the shape is a single control + target pair
    pub fn is_controlled(&self) -> bool {
        matches!(self, GateOp::Controlled(..) | GateOp::ParamControlled(..))
    }

    // ========================================================================
    // Span Extraction
    // ========================================================================

    /// Minimum and maximum wire the operation touches
    ///
    /// Used for collision analysis and rendering spans only; role
    /// information stays in the variant payload.
    pub fn involved_range(&self) -> (WireId, WireId) {
        let wires = self.wires();
        let lo = wires.iter().copied().min().unwrap_or(1);
        let hi = wires.iter().copied().max().unwrap_or(1);
        (lo, hi)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate operand wires and parameter arity against a wire count
    ///
    /// Rejected immediately at construction; scheduling and rendering
    /// only ever see valid operations.
    pub fn validate(&self, num_wires: usize) -> QdrawResult<()> {
        let wires = self.wires();

        if wires.is_empty() {
            return Err(QdrawError::EmptyWireList);
        }
        for (i, &w) in wires.iter().enumerate() {
            if w == 0 {
                return Err(QdrawError::WireIndexZero);
            }
            if w > num_wires {
                return Err(QdrawError::WireOutOfRange { wire: w, num_wires });
            }
            if wires[..i].contains(&w) {
                return Err(QdrawError::DuplicateWire { wire: w });
            }
        }

        if let Some(expected) = expected_params(self.kind()) {
            let got = self.params().len();
            if got != expected {
                return Err(QdrawError::ParamArity {
                    kind: self.kind().to_string(),
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Built-in Constructors
    // ========================================================================

    /// Hadamard
    pub fn h(wire: WireId) -> Self {
        GateOp::Single("H".into(), wire)
    }

    /// Pauli-X
    pub fn x(wire: WireId) -> Self {
        GateOp::Single("X".into(), wire)
    }

    /// Pauli-Y
    pub fn y(wire: WireId) -> Self {
        GateOp::Single("Y".into(), wire)
    }

    /// Pauli-Z
    pub fn z(wire: WireId) -> Self {
        GateOp::Single("Z".into(), wire)
    }

    /// S gate
    pub fn s(wire: WireId) -> Self {
        GateOp::Single("S".into(), wire)
    }

    /// S-dagger
    pub fn sdg(wire: WireId) -> Self {
        GateOp::Single("Sdg".into(), wire)
    }

    /// T gate
    pub fn t(wire: WireId) -> Self {
        GateOp::Single("T".into(), wire)
    }

    /// T-dagger
    pub fn tdg(wire: WireId) -> Self {
        GateOp::Single("Tdg".into(), wire)
    }

    /// Rotation about *x*
    pub fn rx(wire: WireId, theta: Angle) -> Self {
        GateOp::ParamSingle("Rx".into(), wire, vec![theta])
    }

    /// Rotation about *y*
    pub fn ry(wire: WireId, theta: Angle) -> Self {
        GateOp::ParamSingle("Ry".into(), wire, vec![theta])
    }

    /// Rotation about *z*
    pub fn rz(wire: WireId, theta: Angle) -> Self {
        GateOp::ParamSingle("Rz".into(), wire, vec![theta])
    }

    /// Phase gate P(λ)
    pub fn phase(wire: WireId, lambda: Angle) -> Self {
        GateOp::ParamSingle("P".into(), wire, vec![lambda])
    }

    /// Controlled-NOT
    pub fn cx(control: WireId, target: WireId) -> Self {
        GateOp::Controlled("CX".into(), control, target)
    }

    /// Controlled-Y
    pub fn cy(control: WireId, target: WireId) -> Self {
        GateOp::Controlled("CY".into(), control, target)
    }

    /// Controlled-Z
    pub fn cz(control: WireId, target: WireId) -> Self {
        GateOp::Controlled("CZ".into(), control, target)
    }

    /// Controlled phase
    pub fn cp(control: WireId, target: WireId, lambda: Angle) -> Self {
        GateOp::ParamControlled("CP".into(), control, target, vec![lambda])
    }

    /// Controlled x-rotation
    pub fn crx(control: WireId, target: WireId, theta: Angle) -> Self {
        GateOp::ParamControlled("CRx".into(), control, target, vec![theta])
    }

    /// Controlled y-rotation
    pub fn cry(control: WireId, target: WireId, theta: Angle) -> Self {
        GateOp::ParamControlled("CRy".into(), control, target, vec![theta])
    }

    /// Controlled z-rotation
    pub fn crz(control: WireId, target: WireId, theta: Angle) -> Self {
        GateOp::ParamControlled("CRz".into(), control, target, vec![theta])
    }

    /// Swap
    pub fn swap(a: WireId, b: WireId) -> Self {
        GateOp::TwoWire("SWAP".into(), a, b)
    }

    /// Toffoli: two controls then target
    pub fn ccx(c1: WireId, c2: WireId, target: WireId) -> Self {
        GateOp::ThreeWire("CCX".into(), c1, c2, target)
    }

    /// Doubly-controlled Z
    pub fn ccz(c1: WireId, c2: WireId, target: WireId) -> Self {
        GateOp::ThreeWire("CCZ".into(), c1, c2, target)
    }

    /// Fredkin: control then swap pair (drawn as an opaque block)
    pub fn cswap(control: WireId, a: WireId, b: WireId) -> Self {
        GateOp::ThreeWire("CSWAP".into(), control, a, b)
    }

    /// Triply-controlled NOT
    pub fn cccx(c1: WireId, c2: WireId, c3: WireId, target: WireId) -> Self {
        GateOp::FourWire("CCCX".into(), c1, c2, c3, target)
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        let params = self.params();
        if !params.is_empty() {
            let text: Vec<String> = params.iter().map(|p| format!("{p}")).collect();
            write!(f, "({})", text.join(","))?;
        }
        let wires: Vec<String> = self.wires().iter().map(|w| w.to_string()).collect();
        write!(f, " {}", wires.join(","))
    }
}

// ============================================================================
// Parameter Arity
// ============================================================================

/// Expected parameter count for built-in kinds; `None` leaves the count
/// unchecked (unknown kinds only affect display)
fn expected_params(kind: &Kind) -> Option<usize> {
    match kind.as_str() {
        "I" | "H" | "X" | "Y" | "Z" | "S" | "Sdg" | "T" | "Tdg" | "CX" | "CY" | "CZ" | "SWAP"
        | "CCX" | "CCZ" | "CSWAP" | "CCCX" => Some(0),
        "Rx" | "Ry" | "Rz" | "P" | "CP" | "CRx" | "CRy" | "CRz" => Some(1),
        "U" => Some(3),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wires_role_order() {
        assert_eq!(GateOp::h(3).wires(), vec![3]);
        // control listed before target even when numerically above it
        assert_eq!(GateOp::cx(4, 1).wires(), vec![4, 1]);
        assert_eq!(GateOp::ccx(2, 5, 3).wires(), vec![2, 5, 3]);
    }

    #[test]
    fn test_involved_range_ignores_role_order() {
        assert_eq!(GateOp::cx(4, 1).involved_range(), (1, 4));
        assert_eq!(GateOp::ccx(2, 5, 3).involved_range(), (2, 5));
        assert_eq!(GateOp::h(2).involved_range(), (2, 2));
    }

    #[test]
    fn test_range_does_not_reassign_roles() {
        let op = GateOp::cx(4, 1);
        assert_eq!(op.involved_range(), (1, 4));
        // role order untouched by the span computation
        assert_eq!(op.wires(), vec![4, 1]);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GateOp::h(1).validate(2).is_ok());
        assert!(GateOp::cx(1, 2).validate(2).is_ok());
        assert!(GateOp::rx(2, 0.5).validate(2).is_ok());
    }

    #[test]
    fn test_validate_zero_wire() {
        assert_eq!(GateOp::h(0).validate(2), Err(QdrawError::WireIndexZero));
    }

    #[test]
    fn test_validate_out_of_range() {
        assert_eq!(
            GateOp::h(3).validate(2),
            Err(QdrawError::WireOutOfRange {
                wire: 3,
                num_wires: 2
            })
        );
    }

    #[test]
    fn test_validate_duplicate() {
        assert_eq!(
            GateOp::cx(2, 2).validate(3),
            Err(QdrawError::DuplicateWire { wire: 2 })
        );
    }

    #[test]
    fn test_validate_empty_block() {
        let op = GateOp::NWire("QFT".into(), WireRoles::Block { wires: vec![] });
        assert_eq!(op.validate(3), Err(QdrawError::EmptyWireList));
    }

    #[test]
    fn test_validate_param_arity() {
        let op = GateOp::ParamSingle("Rx".into(), 1, vec![0.1, 0.2]);
        assert_eq!(
            op.validate(2),
            Err(QdrawError::ParamArity {
                kind: "Rx".into(),
                expected: 1,
                got: 2
            })
        );
    }

    #[test]
    fn test_unknown_kind_params_unchecked() {
        let op = GateOp::ParamSingle("Givens".into(), 1, vec![0.1, 0.2]);
        assert!(op.validate(2).is_ok());
    }

    #[test]
    fn test_control_chain_roles() {
        let roles = WireRoles::ControlChain {
            controls: vec![1, 2, 3],
            target: 5,
        };
        let op = GateOp::NWire("CCCCX".into(), roles);
        assert_eq!(op.wires(), vec![1, 2, 3, 5]);
        assert_eq!(op.involved_range(), (1, 5));
        assert!(op.validate(5).is_ok());
    }
}
