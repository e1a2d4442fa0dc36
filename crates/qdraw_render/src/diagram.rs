//! Diagram grid construction and qcircuit serialization
//!
//! Builds an N-row cell grid from a circuit and its column layout, then
//! serializes it into the qcircuit markup grammar. The grammar literals
//! are fixed: downstream typesetting depends on them bit for bit.
//!
//! Continuation cells of a multi-wire box are modeled as an explicit
//! [`DiagramCell::Ghost`] state and filtered out of the serialized row,
//! matching the reference output. Rows spanned by such a box therefore
//! carry fewer visible tokens than their anchor row.

use crate::initial::{lstick, resolve_labels};
use crate::labels::{family_of, gate_label, GateFamily};
use crate::layout::{ColumnLayout, LayoutMode};
use qdraw_core::{Angle, Circuit, GateOp, Kind, QdrawResult, WireId, WireRoles};
use serde::{Deserialize, Serialize};

// ============================================================================
// Markup Literals
// ============================================================================

/// Diagram block opener
pub const CIRCUIT_BEGIN: &str = "\\Qcircuit @C=1em @R=0.7em {\n";

/// Diagram block closer
pub const CIRCUIT_END: &str = "\n}\n";

/// Separator between rows
pub const ROW_SEP: &str = " \\\\\n";

/// Separator between cells in a row
pub const CELL_SEP: &str = " & ";

/// Plain wire continuation
pub const THROUGH: &str = "\\qw";

// ============================================================================
// Diagram Cells
// ============================================================================

/// Rendered token for one (wire, column) position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagramCell {
    /// Plain wire continuation
    Through,
    /// Single- or anchor-wire operator box
    Boxed(String),
    /// Span-opening multi-wire box; `span` counts the extra rows below
    SpanBox {
        /// Rows below the anchor the box covers
        span: usize,
        /// Box label
        label: String,
    },
    /// Suppressed continuation of a multi-wire box on a non-anchor wire
    Ghost,
    /// Control point with a signed row offset to its partner
    Ctrl(isize),
    /// Cross-shape target (controlled bit flip)
    Targ,
    /// Dot-shape target (controlled phase), same glyph as a control
    Dot,
    /// Exchange anchor with a signed row offset to its partner
    SwapAnchor(isize),
    /// Exchange partner mark
    SwapTarget,
}

impl DiagramCell {
    /// Markup token for the cell; `None` for suppressed continuations
    pub fn token(&self) -> Option<String> {
        match self {
            DiagramCell::Through => Some(THROUGH.to_string()),
            DiagramCell::Boxed(label) => Some(format!("\\gate{{{label}}}")),
            DiagramCell::SpanBox { span, label } => {
                Some(format!("\\multigate{{{span}}}{{{label}}}"))
            }
            DiagramCell::Ghost => None,
            DiagramCell::Ctrl(offset) => Some(format!("\\ctrl{{{offset}}}")),
            DiagramCell::Targ => Some("\\targ{}".to_string()),
            DiagramCell::Dot => Some("\\ctrl{0}".to_string()),
            DiagramCell::SwapAnchor(offset) => Some(format!("\\qswap \\qwx[{offset}]")),
            DiagramCell::SwapTarget => Some("\\qswap".to_string()),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a circuit into qcircuit markup under the given layout mode
///
/// Wire labels are resolved first, so a bad initial-state arity fails
/// before any cell exists. The circuit itself was validated at
/// construction; either the full diagram is produced or an error
/// propagates unmodified.
pub fn render(circuit: &Circuit, mode: LayoutMode) -> QdrawResult<String> {
    let labels = resolve_labels(circuit.init(), circuit.num_wires())?;
    let layout = ColumnLayout::compute(circuit, mode);
    let grid = build_grid(circuit, &layout);
    Ok(serialize(&grid, &labels))
}

/// Render with a textual mode selector
///
/// Unrecognized selectors are rejected, never silently defaulted.
pub fn render_with(circuit: &Circuit, selector: &str) -> QdrawResult<String> {
    let mode: LayoutMode = selector.parse()?;
    render(circuit, mode)
}

/// Build the cell grid: every position defaults to a wire continuation,
/// then each operation stamps its cells at its assigned column
pub fn build_grid(circuit: &Circuit, layout: &ColumnLayout) -> Vec<Vec<DiagramCell>> {
    let mut grid =
        vec![vec![DiagramCell::Through; layout.num_columns()]; circuit.num_wires()];
    for (idx, op) in circuit.ops().iter().enumerate() {
        place_op(&mut grid, op, layout.column(idx));
    }
    grid
}

fn place_op(grid: &mut [Vec<DiagramCell>], op: &GateOp, col: usize) {
    match op {
        GateOp::Single(kind, wire) => {
            grid[wire - 1][col] = DiagramCell::Boxed(gate_label(kind, &[]));
        }
        GateOp::ParamSingle(kind, wire, params) => {
            grid[wire - 1][col] = DiagramCell::Boxed(gate_label(kind, params));
        }
        GateOp::Controlled(kind, control, target) => {
            place_controlled(grid, kind, *control, *target, &[], col);
        }
        GateOp::ParamControlled(kind, control, target, params) => {
            place_controlled(grid, kind, *control, *target, params, col);
        }
        GateOp::TwoWire(kind, a, b) => {
            if family_of(kind) == GateFamily::Exchange {
                place_swap(grid, *a, *b, col);
            } else {
                place_span(grid, kind, &[*a, *b], &[], col);
            }
        }
        GateOp::ParamTwoWire(kind, a, b, params) => {
            place_span(grid, kind, &[*a, *b], params, col);
        }
        GateOp::ThreeWire(kind, a, b, c) => {
            place_fixed_multi(grid, kind, &[*a, *b, *c], col);
        }
        GateOp::FourWire(kind, a, b, c, d) => {
            place_fixed_multi(grid, kind, &[*a, *b, *c, *d], col);
        }
        GateOp::NWire(kind, roles) => place_roles(grid, kind, roles, &[], col),
        GateOp::ParamNWire(kind, roles, params) => place_roles(grid, kind, roles, params, col),
    }
}

/// Control + target pair: the target cell shape follows the kind's
/// family; parametric kinds outside the reserved shapes get a labeled
/// box carrying the parameters
fn place_controlled(
    grid: &mut [Vec<DiagramCell>],
    kind: &Kind,
    control: WireId,
    target: WireId,
    params: &[Angle],
    col: usize,
) {
    grid[control - 1][col] = DiagramCell::Ctrl(offset(control, target));
    grid[target - 1][col] = target_cell(kind, params);
}

fn target_cell(kind: &Kind, params: &[Angle]) -> DiagramCell {
    match family_of(kind) {
        GateFamily::Flip => DiagramCell::Targ,
        GateFamily::Phase => DiagramCell::Dot,
        _ => DiagramCell::Boxed(gate_label(kind, params)),
    }
}

/// Fixed three- and four-wire shapes: kinds registered in the flip or
/// phase families read as controls-then-target and draw a control
/// chain; anything else is an opaque spanning box
fn place_fixed_multi(grid: &mut [Vec<DiagramCell>], kind: &Kind, wires: &[WireId], col: usize) {
    match family_of(kind) {
        GateFamily::Flip | GateFamily::Phase => {
            if let Some((target, controls)) = wires.split_last() {
                place_chain(grid, kind, controls, *target, col);
            }
        }
        _ => place_span(grid, kind, wires, &[], col),
    }
}

fn place_roles(
    grid: &mut [Vec<DiagramCell>],
    kind: &Kind,
    roles: &WireRoles,
    params: &[Angle],
    col: usize,
) {
    match roles {
        WireRoles::ControlChain { controls, target } => {
            place_chain(grid, kind, controls, *target, col);
        }
        WireRoles::Block { wires } => place_span(grid, kind, wires, params, col),
    }
}

/// Chain of control marks, each pointing at the next, ending in the
/// family's target shape
fn place_chain(
    grid: &mut [Vec<DiagramCell>],
    kind: &Kind,
    controls: &[WireId],
    target: WireId,
    col: usize,
) {
    for (i, &wire) in controls.iter().enumerate() {
        let next = controls.get(i + 1).copied().unwrap_or(target);
        grid[wire - 1][col] = DiagramCell::Ctrl(offset(wire, next));
    }
    grid[target - 1][col] = target_cell(kind, &[]);
}

/// Span-opening box on the lowest wire; every other wire inside the
/// span is a suppressed continuation
fn place_span(
    grid: &mut [Vec<DiagramCell>],
    kind: &Kind,
    wires: &[WireId],
    params: &[Angle],
    col: usize,
) {
    let lo = wires.iter().copied().min().unwrap_or(1);
    let hi = wires.iter().copied().max().unwrap_or(1);
    grid[lo - 1][col] = DiagramCell::SpanBox {
        span: hi - lo,
        label: gate_label(kind, params),
    };
    for wire in lo + 1..=hi {
        grid[wire - 1][col] = DiagramCell::Ghost;
    }
}

/// Exchange pair: anchor on the lower-numbered wire carries the offset
fn place_swap(grid: &mut [Vec<DiagramCell>], a: WireId, b: WireId, col: usize) {
    let lo = a.min(b);
    let hi = a.max(b);
    grid[lo - 1][col] = DiagramCell::SwapAnchor(offset(lo, hi));
    grid[hi - 1][col] = DiagramCell::SwapTarget;
}

fn offset(from: WireId, to: WireId) -> isize {
    to as isize - from as isize
}

/// Serialize the grid: each row is the wire label, the visible cell
/// tokens, and a trailing wire continuation, joined by the cell
/// separator; rows join under the fixed block literals
fn serialize(grid: &[Vec<DiagramCell>], labels: &[String]) -> String {
    let rows: Vec<String> = grid
        .iter()
        .zip(labels)
        .map(|(cells, label)| {
            let mut tokens = vec![lstick(label)];
            tokens.extend(cells.iter().filter_map(DiagramCell::token));
            tokens.push(THROUGH.to_string());
            tokens.join(CELL_SEP)
        })
        .collect();
    format!("{}{}{}", CIRCUIT_BEGIN, rows.join(ROW_SEP), CIRCUIT_END)
}

// ============================================================================
// Tests
// ============================================================================
