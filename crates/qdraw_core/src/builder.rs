//! Circuit builder for qdraw
//!
//! Fluent construction of circuits. Operations are collected first and
//! validated together in [`CircuitBuilder::build`], so a chain never
//! hides an invalid wire index behind a dropped result.

use crate::circuit::Circuit;
use crate::error::QdrawResult;
use crate::gate::{GateOp, Kind, WireRoles};
use crate::types::{Angle, StateSpec, WireId, WireState};

/// Fluent circuit builder (consuming self pattern)
pub struct CircuitBuilder {
    num_wires: usize,
    ops: Vec<GateOp>,
    init: StateSpec,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a builder for a circuit with the given wire count
    pub fn new(num_wires: usize) -> Self {
        Self {
            num_wires,
            ops: Vec::new(),
            init: StateSpec::default(),
        }
    }

    // ========================================================================
    // Initial States
    // ========================================================================

    /// Start every wire in the same state
    pub fn init_uniform(mut self, state: WireState) -> Self {
        self.init = StateSpec::Uniform(state);
        self
    }

    /// Start each wire in its own state, in wire order
    pub fn init_wires(mut self, states: Vec<WireState>) -> Self {
        self.init = StateSpec::PerWire(states);
        self
    }

    /// Start from a product descriptor over all wires
    pub fn init_product(mut self, states: Vec<WireState>) -> Self {
        self.init = StateSpec::Product(states);
        self
    }

    // ========================================================================
    // Single-Wire Gates
    // ========================================================================

    /// Add Hadamard
    pub fn h(mut self, wire: WireId) -> Self {
        self.ops.push(GateOp::h(wire));
        self
    }

    /// Add Pauli-X
    pub fn x(mut self, wire: WireId) -> Self {
        self.ops.push(GateOp::x(wire));
        self
    }

    /// Add Pauli-Y
    pub fn y(mut self, wire: WireId) -> Self {
        self.ops.push(GateOp::y(wire));
        self
    }

    /// Add Pauli-Z
    pub fn z(mut self, wire: WireId) -> Self {
        self.ops.push(GateOp::z(wire));
        self
    }

    /// Add S gate
    pub fn s(mut self, wire: WireId) -> Self {
        self.ops.push(GateOp::s(wire));
        self
    }

    /// Add T gate
    pub fn t(mut self, wire: WireId) -> Self {
        self.ops.push(GateOp::t(wire));
        self
    }

    /// Add x-rotation
    pub fn rx(mut self, wire: WireId, theta: Angle) -> Self {
        self.ops.push(GateOp::rx(wire, theta));
        self
    }

    /// Add y-rotation
    pub fn ry(mut self, wire: WireId, theta: Angle) -> Self {
        self.ops.push(GateOp::ry(wire, theta));
        self
    }

    /// Add z-rotation
    pub fn rz(mut self, wire: WireId, theta: Angle) -> Self {
        self.ops.push(GateOp::rz(wire, theta));
        self
    }

    /// Add phase gate
    pub fn phase(mut self, wire: WireId, lambda: Angle) -> Self {
        self.ops.push(GateOp::phase(wire, lambda));
        self
    }

    // ========================================================================
    // Multi-Wire Gates
    // ========================================================================

    /// Add controlled-NOT
    pub fn cx(mut self, control: WireId, target: WireId) -> Self {
        self.ops.push(GateOp::cx(control, target));
        self
    }

    /// Add controlled-Z
    pub fn cz(mut self, control: WireId, target: WireId) -> Self {
        self.ops.push(GateOp::cz(control, target));
        self
    }

    /// Add controlled phase
    pub fn cp(mut self, control: WireId, target: WireId, lambda: Angle) -> Self {
        self.ops.push(GateOp::cp(control, target, lambda));
        self
    }

    /// Add controlled z-rotation
    pub fn crz(mut self, control: WireId, target: WireId, theta: Angle) -> Self {
        self.ops.push(GateOp::crz(control, target, theta));
        self
    }

    /// Add swap
    pub fn swap(mut self, a: WireId, b: WireId) -> Self {
        self.ops.push(GateOp::swap(a, b));
        self
    }

    /// Add Toffoli
    pub fn ccx(mut self, c1: WireId, c2: WireId, target: WireId) -> Self {
        self.ops.push(GateOp::ccx(c1, c2, target));
        self
    }

    /// Add Fredkin
    pub fn cswap(mut self, control: WireId, a: WireId, b: WireId) -> Self {
        self.ops.push(GateOp::cswap(control, a, b));
        self
    }

    /// Add a generalized control chain
    pub fn chain(mut self, kind: impl Into<Kind>, controls: Vec<WireId>, target: WireId) -> Self {
        self.ops.push(GateOp::NWire(
            kind.into(),
            WireRoles::ControlChain { controls, target },
        ));
        self
    }

    /// Add an opaque block over an explicit wire list
    pub fn block(mut self, kind: impl Into<Kind>, wires: Vec<WireId>) -> Self {
        self.ops
            .push(GateOp::NWire(kind.into(), WireRoles::Block { wires }));
        self
    }

    /// Add an arbitrary prebuilt operation
    pub fn op(mut self, op: GateOp) -> Self {
        self.ops.push(op);
        self
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Hadamard on every wire
    pub fn h_layer(mut self) -> Self {
        for wire in 1..=self.num_wires {
            self.ops.push(GateOp::h(wire));
        }
        self
    }

    /// CX chain down the register: (1,2), (2,3), …
    pub fn cx_chain(mut self) -> Self {
        for wire in 1..self.num_wires {
            self.ops.push(GateOp::cx(wire, wire + 1));
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Validate everything and produce the circuit
    pub fn build(self) -> QdrawResult<Circuit> {
        let mut circuit = Circuit::with_init(self.num_wires, self.init)?;
        circuit.push_all(self.ops)?;
        Ok(circuit)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(3)
            .h(1)
            .cx(1, 2)
            .cx(2, 3)
            .build()
            .unwrap();
        assert_eq!(circuit.num_wires(), 3);
        assert_eq!(circuit.op_count(), 3);
    }

    #[test]
    fn test_builder_surfaces_bad_wire() {
        let result = CircuitBuilder::new(2).h(1).cx(2, 5).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_layers() {
        let circuit = CircuitBuilder::new(4).h_layer().cx_chain().build().unwrap();
        assert_eq!(circuit.count_single(), 4);
        assert_eq!(circuit.count_multi(), 3);
    }

    #[test]
    fn test_builder_init() {
        let circuit = CircuitBuilder::new(2)
            .init_uniform(WireState::Plus)
            .build()
            .unwrap();
        assert_eq!(circuit.init(), &StateSpec::Uniform(WireState::Plus));
    }

    #[test]
    fn test_builder_chain_and_block() {
        let circuit = CircuitBuilder::new(5)
            .chain("CCCCX", vec![1, 2, 3, 4], 5)
            .block("QFT", vec![2, 3, 4])
            .build()
            .unwrap();
        assert_eq!(circuit.op_count(), 2);
    }
}
