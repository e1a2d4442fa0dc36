//! Circuit container for qdraw
//!
//! A circuit is a fixed wire count, an ordered operation sequence, and
//! an initial-state descriptor. Program order defines precedence and is
//! never reordered. All validation happens here, at construction; the
//! layout and rendering stages only see valid circuits.

use crate::error::{QdrawError, QdrawResult};
use crate::gate::GateOp;
use crate::types::StateSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable-once-rendered gate-model circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of wires (diagram rows), 1-indexed from the top
    num_wires: usize,

    /// Operation sequence in program order
    ops: Vec<GateOp>,

    /// Per-wire starting states
    init: StateSpec,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty circuit with every wire starting in ∣0⟩
    pub fn new(num_wires: usize) -> QdrawResult<Self> {
        Self::with_init(num_wires, StateSpec::default())
    }

    /// Create an empty circuit with explicit starting states
    pub fn with_init(num_wires: usize, init: StateSpec) -> QdrawResult<Self> {
        if num_wires == 0 {
            return Err(QdrawError::WireCountZero);
        }
        init.validate(num_wires)?;
        Ok(Self {
            num_wires,
            ops: Vec::new(),
            init,
        })
    }

    /// Create from an operation sequence
    pub fn from_ops(num_wires: usize, ops: Vec<GateOp>) -> QdrawResult<Self> {
        let mut circuit = Self::new(num_wires)?;
        for op in ops {
            circuit.push(op)?;
        }
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Append an operation, validating it against the wire count
    pub fn push(&mut self, op: GateOp) -> QdrawResult<()> {
        op.validate(self.num_wires)?;
        self.ops.push(op);
        Ok(())
    }

    /// Append several operations
    pub fn push_all(&mut self, ops: impl IntoIterator<Item = GateOp>) -> QdrawResult<()> {
        for op in ops {
            self.push(op)?;
        }
        Ok(())
    }

    /// Number of wires
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// Operations in program order
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Starting states
    pub fn init(&self) -> &StateSpec {
        &self.init
    }

    /// Operation count
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Check if the circuit has no operations
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Count operations touching exactly one wire
    pub fn count_single(&self) -> usize {
        self.ops.iter().filter(|op| op.wires().len() == 1).count()
    }

    /// Count operations touching two or more wires
    pub fn count_multi(&self) -> usize {
        self.ops.iter().filter(|op| op.wires().len() >= 2).count()
    }

    /// Count parametric operations
    pub fn count_parametric(&self) -> usize {
        self.ops.iter().filter(|op| op.is_parametric()).count()
    }

    // ========================================================================
    // JSON Conversion
    // ========================================================================

    /// Serialize to a JSON string
    pub fn to_json(&self) -> QdrawResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON string, re-validating the contents
    pub fn from_json(json: &str) -> QdrawResult<Self> {
        let parsed: Circuit = serde_json::from_str(json)?;
        // serde bypasses the constructors; re-run the checks
        if parsed.num_wires == 0 {
            return Err(QdrawError::WireCountZero);
        }
        parsed.init.validate(parsed.num_wires)?;
        for op in &parsed.ops {
            op.validate(parsed.num_wires)?;
        }
        Ok(parsed)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circuit({} wires, {} ops, {} parametric)",
            self.num_wires,
            self.ops.len(),
            self.count_parametric()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
