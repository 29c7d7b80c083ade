//! # Deflection Estimator
//!
//! Vertical midspan deflection under the static wheel loads of one crane,
//! compared with the service class limit L/n.
//!
//! ## Wheel placement
//!
//! - Two wheels that both fit on the span: the pair is placed with its
//!   resultant at midspan (first wheel at L/2 - x_res, kept on the beam)
//!   and the two contributions are superposed at midspan.
//! - Two wheels with a wheel base of at least the span: only one wheel fits,
//!   so the heavier wheel acts alone at midspan.
//! - Any other wheel count: the total load acts at midspan, δ = PL³/48EI.
//!
//! Computed in N, mm and MPa; reported in mm.

use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::equations::beam::point_load_deflection;
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::loads::CraneClass;
use crate::materials::E_STEEL;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionResult {
    pub actual_mm: f64,
    pub limit_mm: f64,
    /// n in L/n
    pub limit_ratio: f64,
    /// actual / limit
    pub ratio: f64,
    pub passes: bool,
}

/// Maximum midspan deflection (mm) for a set of static wheel loads (kN).
///
/// ```rust
/// use runway_core::calculations::deflection::estimate_deflection;
/// use runway_core::calculations::section::{build_section, SectionGeometry};
///
/// let section = build_section(&SectionGeometry::symmetric(600.0, 300.0, 20.0, 10.0)).unwrap();
/// let pair = estimate_deflection(&section, &[100.0, 100.0], 8.0, 2.0).unwrap();
/// let lumped = estimate_deflection(&section, &[200.0], 8.0, 2.0).unwrap();
/// assert!(pair < lumped);
/// ```
pub fn estimate_deflection(section: &Section, wheel_loads_kn: &[f64], span_m: f64, wheel_base_m: f64) -> CalcResult<f64> {
    if !span_m.is_finite() || span_m <= 0.0 {
        return Err(CalcError::invalid_input("span_m", span_m.to_string(), "Span must be positive"));
    }
    if wheel_loads_kn.is_empty() {
        return Err(CalcError::invalid_input("wheel_loads", "[]", "At least one wheel load is required"));
    }

    let l = span_m * 1000.0;
    let wb = wheel_base_m * 1000.0;
    let (e, i) = (E_STEEL, section.ix_mm4);
    let midspan = l / 2.0;

    let delta = match wheel_loads_kn {
        &[p1, p2] if wb < l => {
            let total = p1 + p2;
            let x_resultant = if total > 0.0 { p2 * wb / total } else { wb / 2.0 };
            let x1 = (midspan - x_resultant).clamp(0.0, l - wb);
            point_load_deflection(p1 * 1000.0, x1, l, midspan, e, i)
                + point_load_deflection(p2 * 1000.0, x1 + wb, l, midspan, e, i)
        }
        &[p1, p2] => point_load_deflection(p1.max(p2) * 1000.0, midspan, l, midspan, e, i),
        _ => {
            let total: f64 = wheel_loads_kn.iter().sum();
            total * 1000.0 * l.powi(3) / (48.0 * e * i)
        }
    };

    ensure_finite(delta.abs(), "midspan deflection")
}

/// Deflection compared with the crane class limit.
pub fn check_deflection(
    section: &Section,
    wheel_loads_kn: &[f64],
    span_m: f64,
    wheel_base_m: f64,
    class: CraneClass,
) -> CalcResult<DeflectionResult> {
    let actual = estimate_deflection(section, wheel_loads_kn, span_m, wheel_base_m)?;
    let limit_ratio = class.deflection_limit_ratio();
    let limit = span_m * 1000.0 / limit_ratio;
    Ok(DeflectionResult {
        actual_mm: actual,
        limit_mm: limit,
        limit_ratio,
        ratio: actual / limit,
        passes: actual <= limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::{build_section, SectionGeometry};

    fn girder() -> Section {
        build_section(&SectionGeometry::symmetric(600.0, 300.0, 20.0, 10.0)).unwrap()
    }

    #[test]
    fn test_single_load_at_midspan() {
        let s = girder();
        let d = estimate_deflection(&s, &[100.0], 10.0, 2.0).unwrap();
        let expected = 100_000.0 * 1.0e12 / (48.0 * E_STEEL * s.ix_mm4);
        assert!((d - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_equal_pair_symmetric_about_midspan() {
        let s = girder();
        let l = 10_000.0;
        let d = estimate_deflection(&s, &[50.0, 50.0], 10.0, 2.0).unwrap();
        // Wheels at 4000 and 6000 mm
        let expected = 2.0 * point_load_deflection(50_000.0, 4000.0, l, 5000.0, E_STEEL, s.ix_mm4);
        assert!((d - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_wheel_base_longer_than_span() {
        let s = girder();
        let d = estimate_deflection(&s, &[80.0, 100.0], 3.0, 4.0).unwrap();
        let single = estimate_deflection(&s, &[100.0], 3.0, 4.0).unwrap();
        assert!((d - single).abs() < 1e-12);
    }

    #[test]
    fn test_deflection_limit_by_class() {
        let s = girder();
        let c = check_deflection(&s, &[50.0, 50.0], 10.0, 2.0, CraneClass::D).unwrap();
        assert_eq!(c.limit_ratio, 800.0);
        assert!((c.limit_mm - 12.5).abs() < 1e-12);
        assert!((c.ratio - c.actual_mm / 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let s = girder();
        assert!(estimate_deflection(&s, &[], 10.0, 2.0).is_err());
        assert!(estimate_deflection(&s, &[50.0], 0.0, 2.0).is_err());
    }
}
