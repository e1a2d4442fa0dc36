//! Column assignment
//!
//! Maps each operation to a diagram column, either one column per
//! operation (serial) or by greedy left-to-right packing (packed).
//! Packing respects per-wire occupancy over an operation's *entire*
//! vertical span: the connecting line of a control pair crosses the
//! wires between control and target, so those wires count as occupied
//! even though the operation never acts on them.

use qdraw_core::{Circuit, QdrawError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Layout Mode
// ============================================================================

/// Column-assignment policy, selected per render call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One operation per column, in program order
    Serial,
    /// Greedy order-preserving compaction
    Packed,
}

impl FromStr for LayoutMode {
    type Err = QdrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serial" => Ok(LayoutMode::Serial),
            "packed" => Ok(LayoutMode::Packed),
            _ => Err(QdrawError::UnsupportedMode(s.to_string())),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Serial => write!(f, "serial"),
            LayoutMode::Packed => write!(f, "packed"),
        }
    }
}

// ============================================================================
// Column Layout
// ============================================================================

/// Derived operation-index → column mapping
///
/// Transient: recomputed per render call, never stored on operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    columns: Vec<usize>,
    num_columns: usize,
}

impl ColumnLayout {
    /// Assign a column to every operation under the given mode
    pub fn compute(circuit: &Circuit, mode: LayoutMode) -> Self {
        match mode {
            LayoutMode::Serial => Self::serial(circuit),
            LayoutMode::Packed => Self::packed(circuit),
        }
    }

    /// Column of the operation at `op_idx` (program order)
    pub fn column(&self, op_idx: usize) -> usize {
        self.columns[op_idx]
    }

    /// Columns in program order
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Total diagram width in columns
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    fn serial(circuit: &Circuit) -> Self {
        let count = circuit.op_count();
        Self {
            columns: (0..count).collect(),
            num_columns: count,
        }
    }

    fn packed(circuit: &Circuit) -> Self {
        // frontier[w] holds the next free column of wire w+1
        let mut frontier = vec![0usize; circuit.num_wires()];
        let mut columns = Vec::with_capacity(circuit.op_count());

        for op in circuit.ops() {
            let (lo, hi) = op.involved_range();
            let span = &mut frontier[lo - 1..hi];
            let column = span.iter().copied().max().unwrap_or(0);
            columns.push(column);
            // the whole span is occupied, including wires the operation
            // never acts on: a later box there would overlap the
            // connecting line
            for slot in span.iter_mut() {
                *slot = column + 1;
            }
        }

        let num_columns = frontier.into_iter().max().unwrap_or(0);
        Self {
            columns,
            num_columns,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
