//! Reference statevector backend
//!
//! A small dense-amplitude simulator implementing [`TensorBackend`] for
//! the built-in gate vocabulary. Wire w maps to bit w−1 of the state
//! index, so the leftmost character of a sampled bitstring is the
//! highest-numbered wire.

use crate::call::GateCall;
use crate::execution::TensorBackend;
use num_complex::Complex64;
use qdraw_core::{Counts, QdrawError, QdrawResult, StateSpec, WireId, WireState};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

// ============================================================================
// State Handle
// ============================================================================

/// Dense amplitude vector over all basis states
#[derive(Debug, Clone)]
pub struct SvState {
    amps: Vec<Complex64>,
    num_wires: usize,
}

impl SvState {
    /// Number of wires the state spans
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// Probability of each basis state
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }
}

// ============================================================================
// Backend
// ============================================================================

/// Statevector simulation backend
pub struct SvBackend {
    name: String,
    num_wires: usize,
    seed: Option<u64>,
}

impl SvBackend {
    /// Create a backend holding up to `num_wires` wires
    pub fn new(num_wires: usize) -> Self {
        Self {
            name: "qdraw_statevector".to_string(),
            num_wires,
            seed: None,
        }
    }

    /// Set a sampling seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// ============================================================================
// Bit Helpers
// ============================================================================

fn bit(wire: WireId) -> usize {
    1 << (wire - 1)
}

/// Apply a 2×2 map to each amplitude pair split by `mask`, restricted
/// to basis states where every bit of `ctrl_mask` is set
fn map_pair<F>(amps: &mut [Complex64], mask: usize, ctrl_mask: usize, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    for i in 0..amps.len() {
        if i & mask == 0 && i & ctrl_mask == ctrl_mask {
            let j = i | mask;
            let (a, b) = f(amps[i], amps[j]);
            amps[i] = a;
            amps[j] = b;
        }
    }
}

/// Multiply amplitudes of basis states with every bit of `mask` set
fn phase_if(amps: &mut [Complex64], mask: usize, phase: Complex64) {
    for (i, amp) in amps.iter_mut().enumerate() {
        if i & mask == mask {
            *amp *= phase;
        }
    }
}

/// Exchange the two bits, restricted to `ctrl_mask`
fn swap_bits(amps: &mut [Complex64], m1: usize, m2: usize, ctrl_mask: usize) {
    for i in 0..amps.len() {
        let b1 = i & m1 != 0;
        let b2 = i & m2 != 0;
        if b1 != b2 && i & ctrl_mask == ctrl_mask {
            let j = i ^ m1 ^ m2;
            if i < j {
                amps.swap(i, j);
            }
        }
    }
}

// ============================================================================
// Operand Helpers
// ============================================================================

fn operand(call: &GateCall, idx: usize) -> QdrawResult<WireId> {
    call.wires.get(idx).copied().ok_or_else(|| {
        QdrawError::BackendError(format!(
            "gate '{}' is missing operand {}",
            call.name,
            idx + 1
        ))
    })
}

fn param(call: &GateCall, idx: usize) -> QdrawResult<f64> {
    call.params.get(idx).copied().ok_or_else(|| {
        QdrawError::BackendError(format!(
            "gate '{}' is missing parameter {}",
            call.name,
            idx + 1
        ))
    })
}

fn check_wire(wire: WireId, num_wires: usize) -> QdrawResult<()> {
    if wire == 0 {
        return Err(QdrawError::WireIndexZero);
    }
    if wire > num_wires {
        return Err(QdrawError::WireOutOfRange { wire, num_wires });
    }
    Ok(())
}

// ============================================================================
// TensorBackend Implementation
// ============================================================================

impl TensorBackend for SvBackend {
    type State = SvState;

    fn name(&self) -> &str {
        &self.name
    }

    fn num_wires(&self) -> usize {
        self.num_wires
    }

    fn prepare(&self, num_wires: usize, init: &StateSpec) -> QdrawResult<SvState> {
        if num_wires == 0 {
            return Err(QdrawError::WireCountZero);
        }
        init.validate(num_wires)?;

        let mut amps = vec![Complex64::new(0.0, 0.0); 1 << num_wires];
        amps[0] = Complex64::new(1.0, 0.0);
        let mut state = SvState { amps, num_wires };

        for wire in 1..=num_wires {
            let ws = init.state_of(wire).cloned().unwrap_or(WireState::Zero);
            match ws {
                WireState::Zero => {}
                WireState::One => apply_named(&mut state.amps, "X", wire)?,
                WireState::Plus => apply_named(&mut state.amps, "H", wire)?,
                WireState::Minus => {
                    apply_named(&mut state.amps, "X", wire)?;
                    apply_named(&mut state.amps, "H", wire)?;
                }
                WireState::Labeled(label) => {
                    return Err(QdrawError::BackendError(format!(
                        "cannot prepare labeled state '{label}' numerically"
                    )));
                }
            }
        }
        Ok(state)
    }

    fn apply(&self, state: &mut SvState, call: &GateCall) -> QdrawResult<()> {
        for &wire in &call.wires {
            check_wire(wire, state.num_wires)?;
        }
        let amps = &mut state.amps;

        match call.name.as_str() {
            "I" => {}
            "H" | "X" | "Y" | "Z" | "S" | "Sdg" | "T" | "Tdg" => {
                apply_named(amps, &call.name, operand(call, 0)?)?;
            }
            "Rx" => {
                let (c, s) = half_angle(param(call, 0)?);
                let m = bit(operand(call, 0)?);
                map_pair(amps, m, 0, |a, b| {
                    (a * c - b * Complex64::new(0.0, s), b * c - a * Complex64::new(0.0, s))
                });
            }
            "Ry" => {
                let (c, s) = half_angle(param(call, 0)?);
                let m = bit(operand(call, 0)?);
                map_pair(amps, m, 0, |a, b| (a * c - b * s, a * s + b * c));
            }
            "Rz" => {
                let theta = param(call, 0)?;
                let m = bit(operand(call, 0)?);
                let neg = Complex64::from_polar(1.0, -theta / 2.0);
                let pos = Complex64::from_polar(1.0, theta / 2.0);
                map_pair(amps, m, 0, |a, b| (a * neg, b * pos));
            }
            "P" => {
                let lambda = param(call, 0)?;
                phase_if(amps, bit(operand(call, 0)?), Complex64::from_polar(1.0, lambda));
            }
            "U" => {
                let (theta, phi, lambda) = (param(call, 0)?, param(call, 1)?, param(call, 2)?);
                let (c, s) = half_angle(theta);
                let e_l = Complex64::from_polar(1.0, lambda);
                let e_p = Complex64::from_polar(1.0, phi);
                let m = bit(operand(call, 0)?);
                map_pair(amps, m, 0, |a, b| {
                    (a * c - b * e_l * s, a * e_p * s + b * e_p * e_l * c)
                });
            }
            "CX" => {
                let ctrl = bit(operand(call, 0)?);
                let m = bit(operand(call, 1)?);
                map_pair(amps, m, ctrl, |a, b| (b, a));
            }
            "CY" => {
                let ctrl = bit(operand(call, 0)?);
                let m = bit(operand(call, 1)?);
                map_pair(amps, m, ctrl, |a, b| {
                    (b * Complex64::new(0.0, -1.0), a * Complex64::new(0.0, 1.0))
                });
            }
            "CZ" => {
                let mask = bit(operand(call, 0)?) | bit(operand(call, 1)?);
                phase_if(amps, mask, Complex64::new(-1.0, 0.0));
            }
            "CS" => {
                let mask = bit(operand(call, 0)?) | bit(operand(call, 1)?);
                phase_if(amps, mask, Complex64::new(0.0, 1.0));
            }
            "CP" => {
                let lambda = param(call, 0)?;
                let mask = bit(operand(call, 0)?) | bit(operand(call, 1)?);
                phase_if(amps, mask, Complex64::from_polar(1.0, lambda));
            }
            "CRx" => {
                let (c, s) = half_angle(param(call, 0)?);
                let ctrl = bit(operand(call, 0)?);
                let m = bit(operand(call, 1)?);
                map_pair(amps, m, ctrl, |a, b| {
                    (a * c - b * Complex64::new(0.0, s), b * c - a * Complex64::new(0.0, s))
                });
            }
            "CRy" => {
                let (c, s) = half_angle(param(call, 0)?);
                let ctrl = bit(operand(call, 0)?);
                let m = bit(operand(call, 1)?);
                map_pair(amps, m, ctrl, |a, b| (a * c - b * s, a * s + b * c));
            }
            "CRz" => {
                let theta = param(call, 0)?;
                let ctrl = bit(operand(call, 0)?);
                let m = bit(operand(call, 1)?);
                let neg = Complex64::from_polar(1.0, -theta / 2.0);
                let pos = Complex64::from_polar(1.0, theta / 2.0);
                map_pair(amps, m, ctrl, |a, b| (a * neg, b * pos));
            }
            "SWAP" => {
                swap_bits(amps, bit(operand(call, 0)?), bit(operand(call, 1)?), 0);
            }
            "CCX" => {
                let ctrl = bit(operand(call, 0)?) | bit(operand(call, 1)?);
                let m = bit(operand(call, 2)?);
                map_pair(amps, m, ctrl, |a, b| (b, a));
            }
            "CCZ" => {
                let mask =
                    bit(operand(call, 0)?) | bit(operand(call, 1)?) | bit(operand(call, 2)?);
                phase_if(amps, mask, Complex64::new(-1.0, 0.0));
            }
            "CSWAP" => {
                let ctrl = bit(operand(call, 0)?);
                swap_bits(amps, bit(operand(call, 1)?), bit(operand(call, 2)?), ctrl);
            }
            "CCCX" => {
                let ctrl = bit(operand(call, 0)?)
                    | bit(operand(call, 1)?)
                    | bit(operand(call, 2)?);
                let m = bit(operand(call, 3)?);
                map_pair(amps, m, ctrl, |a, b| (b, a));
            }
            _ => return Err(QdrawError::UnsupportedKind(call.name.clone())),
        }
        Ok(())
    }

    fn sample(&self, state: &SvState, shots: u64) -> QdrawResult<Counts> {
        if shots == 0 {
            return Err(QdrawError::ZeroShots);
        }
        let probs = state.probabilities();
        let mut rng = self.rng();
        let mut counts: Counts = HashMap::new();

        for _ in 0..shots {
            let r: f64 = rng.gen();
            let mut cumsum = 0.0;
            let mut outcome = probs.len() - 1;
            for (i, &p) in probs.iter().enumerate() {
                cumsum += p;
                if r < cumsum {
                    outcome = i;
                    break;
                }
            }
            let bitstring = format!("{:0width$b}", outcome, width = state.num_wires);
            *counts.entry(bitstring).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn expectation(&self, state: &SvState, wire: WireId) -> QdrawResult<f64> {
        check_wire(wire, state.num_wires)?;
        let mask = bit(wire);
        let value = state
            .amps
            .iter()
            .enumerate()
            .map(|(i, amp)| {
                let sign = if i & mask == 0 { 1.0 } else { -1.0 };
                sign * amp.norm_sqr()
            })
            .sum();
        Ok(value)
    }
}

// ============================================================================
// Named Single-Wire Gates
// ============================================================================

fn half_angle(theta: f64) -> (f64, f64) {
    ((theta / 2.0).cos(), (theta / 2.0).sin())
}

/// Apply a named non-parametric single-wire gate; callers have already
/// validated the wire
fn apply_named(amps: &mut [Complex64], name: &str, wire: WireId) -> QdrawResult<()> {
    let m = bit(wire);
    match name {
        "H" => map_pair(amps, m, 0, |a, b| {
            ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
        }),
        "X" => map_pair(amps, m, 0, |a, b| (b, a)),
        "Y" => map_pair(amps, m, 0, |a, b| {
            (b * Complex64::new(0.0, -1.0), a * Complex64::new(0.0, 1.0))
        }),
        "Z" => phase_if(amps, m, Complex64::new(-1.0, 0.0)),
        "S" => phase_if(amps, m, Complex64::new(0.0, 1.0)),
        "Sdg" => phase_if(amps, m, Complex64::new(0.0, -1.0)),
        "T" => phase_if(amps, m, Complex64::from_polar(1.0, PI / 4.0)),
        "Tdg" => phase_if(amps, m, Complex64::from_polar(1.0, -PI / 4.0)),
        _ => return Err(QdrawError::UnsupportedKind(name.to_string())),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::execute;
    use approx::assert_abs_diff_eq;
    use qdraw_core::CircuitBuilder;

    #[test]
    fn test_prepare_zero_state() {
        let backend = SvBackend::new(2);
        let state = backend.prepare(2, &StateSpec::default()).unwrap();
        let probs = state.probabilities();
        assert_abs_diff_eq!(probs[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_prepare_one_and_plus() {
        let backend = SvBackend::new(2);
        let init = StateSpec::PerWire(vec![WireState::One, WireState::Plus]);
        let state = backend.prepare(2, &init).unwrap();
        let probs = state.probabilities();
        // wire 1 set: indices 0b01 and 0b11 split the weight
        assert_abs_diff_eq!(probs[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(probs[3], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_prepare_rejects_labeled_state() {
        let backend = SvBackend::new(1);
        let init = StateSpec::Uniform(WireState::Labeled("\\psi".into()));
        assert!(backend.prepare(1, &init).is_err());
    }

    #[test]
    fn test_expectation_z() {
        let backend = SvBackend::new(1);
        let mut state = backend.prepare(1, &StateSpec::default()).unwrap();
        assert_abs_diff_eq!(backend.expectation(&state, 1).unwrap(), 1.0, epsilon = 1e-12);

        backend
            .apply(&mut state, &GateCall::new("X", vec![1], vec![]))
            .unwrap();
        assert_abs_diff_eq!(backend.expectation(&state, 1).unwrap(), -1.0, epsilon = 1e-12);

        backend
            .apply(&mut state, &GateCall::new("H", vec![1], vec![]))
            .unwrap();
        assert_abs_diff_eq!(backend.expectation(&state, 1).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_expectation_wire_checked() {
        let backend = SvBackend::new(1);
        let state = backend.prepare(1, &StateSpec::default()).unwrap();
        assert!(backend.expectation(&state, 0).is_err());
        assert!(backend.expectation(&state, 2).is_err());
    }

    #[test]
    fn test_unsupported_kind() {
        let backend = SvBackend::new(1);
        let mut state = backend.prepare(1, &StateSpec::default()).unwrap();
        let err = backend
            .apply(&mut state, &GateCall::new("Mystery", vec![1], vec![]))
            .unwrap_err();
        assert_eq!(err, QdrawError::UnsupportedKind("Mystery".into()));
    }

    #[test]
    fn test_swap_moves_excitation() {
        let backend = SvBackend::new(2).with_seed(7);
        let circuit = CircuitBuilder::new(2).x(1).swap(1, 2).build().unwrap();
        let result = execute(&circuit, &backend, 100).unwrap();
        // wire 2 is the high bit: leftmost character of the bitstring
        assert_eq!(result.probability("10"), 1.0);
    }

    #[test]
    fn test_bell_pair_sampling() {
        let backend = SvBackend::new(2).with_seed(42);
        let circuit = CircuitBuilder::new(2).h(1).cx(1, 2).build().unwrap();
        let result = execute(&circuit, &backend, 10_000).unwrap();

        let p00 = result.probability("00");
        let p11 = result.probability("11");
        assert!((p00 - 0.5).abs() < 0.05);
        assert!((p11 - 0.5).abs() < 0.05);
        assert_abs_diff_eq!(p00 + p11, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_toffoli_truth_table() {
        let backend = SvBackend::new(3).with_seed(3);
        let circuit = CircuitBuilder::new(3).x(1).x(2).ccx(1, 2, 3).build().unwrap();
        let result = execute(&circuit, &backend, 50).unwrap();
        assert_eq!(result.probability("111"), 1.0);
    }

    #[test]
    fn test_rotation_matches_flip() {
        // Rx(π) is X up to global phase
        let backend = SvBackend::new(1);
        let mut state = backend.prepare(1, &StateSpec::default()).unwrap();
        backend
            .apply(&mut state, &GateCall::new("Rx", vec![1], vec![PI]))
            .unwrap();
        let probs = state.probabilities();
        assert_abs_diff_eq!(probs[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_seeded_sampling_reproducible() {
        let backend = SvBackend::new(2).with_seed(11);
        let circuit = CircuitBuilder::new(2).h(1).build().unwrap();
        let first = execute(&circuit, &backend, 500).unwrap();
        let second = execute(&circuit, &backend, 500).unwrap();
        assert_eq!(first.counts, second.counts);
    }
}
