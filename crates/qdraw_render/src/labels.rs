//! Gate label formatting
//!
//! Two jobs: canonical text for rotation angles (compact multiples and
//! fractions of π, plain decimal otherwise), and the fixed kind→symbol
//! table with its target-cell shape families. The table is built once
//! and never mutated afterwards, so concurrent renders share it without
//! locking. Unknown kinds fall back to their raw identifier text; label
//! lookup is the one tolerant step in the pipeline.

use qdraw_core::{Angle, Kind};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::OnceLock;

/// Snap tolerance for angle canonicalization
const ANGLE_EPS: f64 = 1e-6;

/// Display symbol of the reference constant (a half turn)
const PI_SYMBOL: &str = "\\pi";

/// Largest denominator tried for fractional angles
const MAX_DENOM: u32 = 16;

// ============================================================================
// Angle Canonicalization
// ============================================================================

/// Canonical text for a rotation angle
///
/// Integer multiples of π render as `0`, `\pi`, `-\pi`, `k\pi`;
/// fractions with denominators up to 16 render as `m\pi/n` (smallest
/// denominator wins); everything else renders with three fractional
/// digits. Total and deterministic.
pub fn format_angle(theta: Angle) -> String {
    let ratio = theta / PI;
    let k = ratio.round();
    if (ratio - k).abs() < ANGLE_EPS {
        let k = k as i64;
        return match k {
            0 => "0".to_string(),
            1 => PI_SYMBOL.to_string(),
            -1 => format!("-{PI_SYMBOL}"),
            _ => format!("{k}{PI_SYMBOL}"),
        };
    }

    for n in 2..=MAX_DENOM {
        let scaled = theta * f64::from(n);
        let m = (scaled / PI).round();
        if m == 0.0 {
            continue;
        }
        if (scaled - m * PI).abs() < ANGLE_EPS {
            let m = m as i64;
            let sign = if m < 0 { "-" } else { "" };
            let coeff = if m.abs() == 1 {
                String::new()
            } else {
                m.abs().to_string()
            };
            return format!("{sign}{coeff}{PI_SYMBOL}/{n}");
        }
    }

    format!("{theta:.3}")
}

// ============================================================================
// Kind → Symbol Table
// ============================================================================

/// How a controlled kind draws its target cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFamily {
    /// Controlled bit flip: cross-shape target
    Flip,
    /// Controlled phase: dot target, same glyph as a control point
    Phase,
    /// Symmetric exchange pair
    Exchange,
    /// Everything else: labeled box
    Boxed,
}

struct SymbolEntry {
    symbol: &'static str,
    family: GateFamily,
}

fn symbol_table() -> &'static HashMap<&'static str, SymbolEntry> {
    static TABLE: OnceLock<HashMap<&'static str, SymbolEntry>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use GateFamily::*;
        let entries = [
            ("I", "I", Boxed),
            ("H", "H", Boxed),
            ("X", "X", Boxed),
            ("Y", "Y", Boxed),
            ("Z", "Z", Boxed),
            ("S", "S", Boxed),
            ("Sdg", "S^\\dag", Boxed),
            ("T", "T", Boxed),
            ("Tdg", "T^\\dag", Boxed),
            ("Rx", "R_x", Boxed),
            ("Ry", "R_y", Boxed),
            ("Rz", "R_z", Boxed),
            ("P", "P", Boxed),
            ("U", "U", Boxed),
            // controlled kinds map to the symbol drawn at the target
            ("CX", "X", Flip),
            ("CY", "Y", Boxed),
            ("CZ", "Z", Phase),
            ("CP", "P", Phase),
            ("CS", "S", Phase),
            ("CRx", "R_x", Boxed),
            ("CRy", "R_y", Boxed),
            ("CRz", "R_z", Boxed),
            ("SWAP", "SWAP", Exchange),
            ("CCX", "X", Flip),
            ("CCZ", "Z", Phase),
            ("CSWAP", "SWAP", Boxed),
            ("CCCX", "X", Flip),
        ];
        entries
            .into_iter()
            .map(|(kind, symbol, family)| (kind, SymbolEntry { symbol, family }))
            .collect()
    })
}

/// Display symbol for a kind; unknown kinds yield their raw identifier
pub fn symbol_for(kind: &Kind) -> String {
    match symbol_table().get(kind.as_str()) {
        Some(entry) => entry.symbol.to_string(),
        None => kind.as_str().to_string(),
    }
}

/// Target-cell family for a kind; unknown kinds draw boxes
pub fn family_of(kind: &Kind) -> GateFamily {
    symbol_table()
        .get(kind.as_str())
        .map(|entry| entry.family)
        .unwrap_or(GateFamily::Boxed)
}

/// Full cell label: symbol plus canonicalized parameters
pub fn gate_label(kind: &Kind, params: &[Angle]) -> String {
    let symbol = symbol_for(kind);
    if params.is_empty() {
        symbol
    } else {
        let text: Vec<String> = params.iter().map(|&p| format_angle(p)).collect();
        format!("{}({})", symbol, text.join(","))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_multiples() {
        assert_eq!(format_angle(0.0), "0");
        assert_eq!(format_angle(PI), "\\pi");
        assert_eq!(format_angle(-PI), "-\\pi");
        assert_eq!(format_angle(2.0 * PI), "2\\pi");
        assert_eq!(format_angle(-3.0 * PI), "-3\\pi");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_angle(PI / 2.0), "\\pi/2");
        assert_eq!(format_angle(PI / 3.0), "\\pi/3");
        assert_eq!(format_angle(-PI / 4.0), "-\\pi/4");
        assert_eq!(format_angle(3.0 * PI / 4.0), "3\\pi/4");
        assert_eq!(format_angle(PI / 16.0), "\\pi/16");
    }

    #[test]
    fn test_near_multiple_snaps() {
        // 1e-7 off an exact multiple still reads as the multiple
        assert_eq!(format_angle(PI + 1e-7), "\\pi");
        assert_eq!(format_angle(PI / 2.0 + 1e-7), "\\pi/2");
    }

    #[test]
    fn test_generic_decimal() {
        assert_eq!(format_angle(0.123456), "0.123");
        assert_eq!(format_angle(-1.7), "-1.700");
    }

    #[test]
    fn test_smallest_denominator_wins() {
        // 2π/4 is π/2
        assert_eq!(format_angle(2.0 * PI / 4.0), "\\pi/2");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(symbol_for(&"H".into()), "H");
        assert_eq!(symbol_for(&"Rx".into()), "R_x");
        assert_eq!(symbol_for(&"Tdg".into()), "T^\\dag");
        assert_eq!(symbol_for(&"CRz".into()), "R_z");
    }

    #[test]
    fn test_unknown_kind_falls_back_to_raw_text() {
        assert_eq!(symbol_for(&"Givens".into()), "Givens");
        assert_eq!(family_of(&"Givens".into()), GateFamily::Boxed);
    }

    #[test]
    fn test_families() {
        assert_eq!(family_of(&"CX".into()), GateFamily::Flip);
        assert_eq!(family_of(&"CCX".into()), GateFamily::Flip);
        assert_eq!(family_of(&"CZ".into()), GateFamily::Phase);
        assert_eq!(family_of(&"CP".into()), GateFamily::Phase);
        assert_eq!(family_of(&"SWAP".into()), GateFamily::Exchange);
        assert_eq!(family_of(&"CRx".into()), GateFamily::Boxed);
    }

    #[test]
    fn test_gate_labels() {
        assert_eq!(gate_label(&"H".into(), &[]), "H");
        assert_eq!(gate_label(&"Rz".into(), &[PI / 2.0]), "R_z(\\pi/2)");
        assert_eq!(gate_label(&"U".into(), &[0.0, PI, 0.123456]), "U(0,\\pi,0.123)");
    }
}
