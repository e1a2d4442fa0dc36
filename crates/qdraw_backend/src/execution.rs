//! Backend trait and execution drivers
//!
//! A [`TensorBackend`] owns the numerical state representation behind
//! an opaque handle; this crate only forwards validated gate records to
//! it in program order. Shot counts and measurement wires are validated
//! here, before any backend work starts.

use crate::call::GateCall;
use qdraw_core::{Circuit, Counts, QdrawError, QdrawResult, StateSpec, WireId};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Execution Result
// ============================================================================

/// Result of sampling a circuit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (bitstring -> count)
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Backend name
    pub backend: String,
}

impl ExecutionResult {
    /// Create a new execution result
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            backend: backend.to_string(),
        }
    }

    /// Total count over all outcomes (should equal shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        let count = self.counts.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Most frequent outcome
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(bs, &count)| (bs, count))
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult(shots={}, unique={}, backend={})",
            self.shots,
            self.counts.len(),
            self.backend
        )
    }
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Numerical simulation backend behind an opaque state handle
pub trait TensorBackend {
    /// Opaque state handle
    type State;

    /// Backend name
    fn name(&self) -> &str;

    /// Number of wires the backend can hold
    fn num_wires(&self) -> usize;

    /// Prepare an initial state over `num_wires` wires
    fn prepare(&self, num_wires: usize, init: &StateSpec) -> QdrawResult<Self::State>;

    /// Apply one forwarded gate record
    ///
    /// Backends reject names or operand counts they do not support.
    fn apply(&self, state: &mut Self::State, call: &GateCall) -> QdrawResult<()>;

    /// Sample measurement outcomes
    fn sample(&self, state: &Self::State, shots: u64) -> QdrawResult<Counts>;

    /// Z-expectation value on one wire (1-indexed)
    fn expectation(&self, state: &Self::State, wire: WireId) -> QdrawResult<f64>;
}

// ============================================================================
// Drivers
// ============================================================================

/// Evolve a circuit on a backend, forwarding operations in program order
pub fn run<B: TensorBackend>(circuit: &Circuit, backend: &B) -> QdrawResult<B::State> {
    if circuit.num_wires() > backend.num_wires() {
        return Err(QdrawError::WireOutOfRange {
            wire: circuit.num_wires(),
            num_wires: backend.num_wires(),
        });
    }
    let mut state = backend.prepare(circuit.num_wires(), circuit.init())?;
    for op in circuit.ops() {
        backend.apply(&mut state, &GateCall::from(op))?;
    }
    Ok(state)
}

/// Run and sample; a zero shot count is rejected before any backend work
pub fn execute<B: TensorBackend>(
    circuit: &Circuit,
    backend: &B,
    shots: u64,
) -> QdrawResult<ExecutionResult> {
    if shots == 0 {
        return Err(QdrawError::ZeroShots);
    }
    let state = run(circuit, backend)?;
    let counts = backend.sample(&state, shots)?;
    Ok(ExecutionResult::new(counts, shots, backend.name()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_test_counts() -> Counts {
        let mut counts = HashMap::new();
        counts.insert("00".to_string(), 600);
        counts.insert("01".to_string(), 250);
        counts.insert("11".to_string(), 150);
        counts
    }

    #[test]
    fn test_execution_result() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        assert_eq!(result.total_counts(), 1000);
        assert!((result.probability("00") - 0.6).abs() < 1e-10);
        assert!((result.probability("10") - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_most_frequent() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        let (bs, count) = result.most_frequent().unwrap();
        assert_eq!(bs, "00");
        assert_eq!(count, 600);
    }
}
