//! Wire-label resolution
//!
//! Turns a circuit's initial-state descriptors into one display label
//! per wire, checked before any row is rendered. Labels are wrapped in
//! the fixed `\lstick{\ket{..}}` decoration at serialization time.

use qdraw_core::{QdrawResult, StateSpec};

/// Resolve one label per wire from the starting-state descriptors
///
/// One descriptor broadcasts; N descriptors (or one product descriptor
/// of arity N) map positionally. Any other count is an arity error,
/// raised here rather than discovered mid-row.
pub fn resolve_labels(init: &StateSpec, num_wires: usize) -> QdrawResult<Vec<String>> {
    init.validate(num_wires)?;
    let labels = match init {
        StateSpec::Uniform(state) => vec![state.label().to_string(); num_wires],
        StateSpec::PerWire(states) | StateSpec::Product(states) => {
            states.iter().map(|s| s.label().to_string()).collect()
        }
    };
    Ok(labels)
}

/// Wrap a wire label in the stick decoration
pub fn lstick(label: &str) -> String {
    format!("\\lstick{{\\ket{{{label}}}}}")
}

// ============================================================================
// Tests
// ============================================================================
