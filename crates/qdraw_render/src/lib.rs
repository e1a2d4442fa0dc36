//! # qdraw Render
//!
//! Column layout and qcircuit diagram rendering for qdraw circuits.
//!
//! The pipeline is pure and synchronous: resolve wire labels, assign a
//! column to each operation (serial or greedily packed), stamp the cell
//! grid, and serialize it into the fixed qcircuit markup grammar. Two
//! renders of the same circuit are byte-identical; renders of different
//! circuits share nothing but the read-only symbol table.
//!
//! ## Quick Start
//!
//! ```rust
//! use qdraw_core::prelude::*;
//! use qdraw_render::{render, LayoutMode};
//!
//! let circuit = CircuitBuilder::new(2).h(1).cx(1, 2).build().unwrap();
//! let markup = render(&circuit, LayoutMode::Packed).unwrap();
//!
//! assert!(markup.starts_with("\\Qcircuit"));
//! assert!(markup.contains("\\gate{H}"));
//! assert!(markup.contains("\\targ{}"));
//! ```
//!
//! ## Layout Modes
//!
//! ```rust
//! use qdraw_core::prelude::*;
//! use qdraw_render::{ColumnLayout, LayoutMode};
//!
//! let circuit = CircuitBuilder::new(3).h(1).h(3).h(1).build().unwrap();
//!
//! // serial: one column per operation
//! let serial = ColumnLayout::compute(&circuit, LayoutMode::Serial);
//! assert_eq!(serial.num_columns(), 3);
//!
//! // packed: disjoint operations share columns
//! let packed = ColumnLayout::compute(&circuit, LayoutMode::Packed);
//! assert_eq!(packed.num_columns(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Gate label formatting and the kind→symbol table
pub mod labels;

/// Wire-label resolution
pub mod initial;

/// Column assignment
pub mod layout;

/// Cell grid and qcircuit serialization
pub mod diagram;

// ============================================================================
// Re-exports
// ============================================================================

pub use diagram::{render, render_with, DiagramCell};
pub use labels::{format_angle, gate_label, symbol_for, GateFamily};
pub use layout::{ColumnLayout, LayoutMode};

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qdraw_core::prelude::*;

    #[test]
    fn test_serial_width_equals_op_count() {
        let circuit = CircuitBuilder::new(4).h_layer().cx_chain().build().unwrap();
        let layout = ColumnLayout::compute(&circuit, LayoutMode::Serial);
        assert_eq!(layout.num_columns(), circuit.op_count());
    }

    #[test]
    fn test_packed_at_most_serial() {
        let circuits = [
            CircuitBuilder::new(2).build().unwrap(),
            CircuitBuilder::new(3).h_layer().build().unwrap(),
            CircuitBuilder::new(5).h_layer().cx_chain().swap(1, 5).build().unwrap(),
        ];
        for circuit in &circuits {
            let packed = ColumnLayout::compute(circuit, LayoutMode::Packed);
            let serial = ColumnLayout::compute(circuit, LayoutMode::Serial);
            assert!(packed.num_columns() <= serial.num_columns());
        }
    }

    #[test]
    fn test_overlap_precedence() {
        // any two range-overlapping operations keep strict column order
        let circuit = CircuitBuilder::new(4)
            .cx(1, 3)
            .h(2)
            .ccx(2, 3, 4)
            .cz(3, 4)
            .build()
            .unwrap();
        let layout = ColumnLayout::compute(&circuit, LayoutMode::Packed);

        let ranges: Vec<(usize, usize)> = circuit
            .ops()
            .iter()
            .map(|op| op.involved_range())
            .collect();
        for later in 1..ranges.len() {
            for earlier in 0..later {
                let overlaps = ranges[earlier].0 <= ranges[later].1
                    && ranges[later].0 <= ranges[earlier].1;
                if overlaps {
                    assert!(layout.column(later) > layout.column(earlier));
                }
            }
        }
    }

    #[test]
    fn test_full_render_pipeline() {
        let circuit = CircuitBuilder::new(3)
            .init_uniform(WireState::Zero)
            .h(1)
            .cx(1, 2)
            .cx(2, 3)
            .rz(1, std::f64::consts::PI / 3.0)
            .build()
            .unwrap();

        let markup = render(&circuit, LayoutMode::Packed).unwrap();
        assert!(markup.contains("\\gate{H}"));
        assert!(markup.contains("\\ctrl{1}"));
        assert!(markup.contains("\\targ{}"));
        assert!(markup.contains("\\gate{R_z(\\pi/3)}"));
    }

    #[test]
    fn test_mode_selector_rejected_before_rendering() {
        let err = "diagonal".parse::<LayoutMode>().unwrap_err();
        assert_eq!(err, QdrawError::UnsupportedMode("diagonal".into()));
    }
}
