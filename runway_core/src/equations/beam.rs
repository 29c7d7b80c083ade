//! # Simply-Supported Beam Formulas
//!
//! Influence functions for a single span with a pin at x = 0 and a roller at
//! x = L, plus superposition helpers for sets of travelling point loads.
//! Units are whatever the caller supplies, provided they are consistent
//! (the load solver uses kN and m, the deflection estimator N and mm).
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `x` = Position along beam from left support
//! - `a` = Load position from left support
//! - `P` = Point load magnitude
//! - `w` = Uniform load intensity (force per unit length)
//! - `R1` = Left reaction, `R2` = Right reaction
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Moment: Positive causes tension on bottom (sagging)
//! - Shear: Positive when left side up relative to right
//! - Deflection: Positive downward
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1

// =============================================================================
// POINT LOAD FORMULAS
// =============================================================================

/// Reactions for point load P at position a on span L
///
/// ```text
///        P
///        ↓
///    ────┬────────────
///    △   a            △
///   R1  ←───────L────→ R2
/// ```
///
/// - R1 = P(L-a)/L
/// - R2 = Pa/L
#[inline]
pub fn point_load_reactions(p: f64, a: f64, l: f64) -> (f64, f64) {
    let r1 = p * (l - a) / l;
    let r2 = p * a / l;
    (r1, r2)
}

/// Shear just right of x for point load P at position a.
///
/// - V(x) = R1       for x < a
/// - V(x) = R1 - P   for x ≥ a
#[inline]
pub fn point_load_shear(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = point_load_reactions(p, a, l);
    if x < a {
        r1
    } else {
        r1 - p
    }
}

/// Moment at x for point load P at position a.
///
/// - M(x) = R1·x           for x ≤ a
/// - M(x) = R1·x - P(x-a)  for x > a
#[inline]
pub fn point_load_moment(p: f64, a: f64, l: f64, x: f64) -> f64 {
    let (r1, _) = point_load_reactions(p, a, l);
    if x <= a {
        r1 * x
    } else {
        r1 * x - p * (x - a)
    }
}

/// Deflection at x for point load P at position a (Roark's Table 8.1, Case 1a)
///
/// For x ≤ a:
/// ```text
/// δ(x) = Pbx(L² - b² - x²) / (6EIL)
/// ```
///
/// For x > a:
/// ```text
/// δ(x) = Pa(L-x)(2Lx - x² - a²) / (6EIL)
/// ```
///
/// where b = L - a
#[inline]
pub fn point_load_deflection(p: f64, a: f64, l: f64, x: f64, e: f64, i: f64) -> f64 {
    let b = l - a;
    let ei = e * i;

    if x <= a {
        p * b * x * (l * l - b * b - x * x) / (6.0 * ei * l)
    } else {
        p * a * (l - x) * (2.0 * l * x - x * x - a * a) / (6.0 * ei * l)
    }
}

// =============================================================================
// UNIFORM LOAD FORMULAS
// =============================================================================

/// Reactions for uniform load w over the full span: R1 = R2 = wL/2
#[inline]
pub fn uniform_load_reactions(w: f64, l: f64) -> (f64, f64) {
    let r = w * l / 2.0;
    (r, r)
}

/// Maximum moment for uniform load: M_max = wL²/8
#[inline]
pub fn uniform_load_max_moment(w: f64, l: f64) -> f64 {
    w * l * l / 8.0
}

/// Maximum deflection for uniform load: δ_max = 5wL⁴ / (384EI)
#[inline]
pub fn uniform_load_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * e * i)
}

// =============================================================================
// SUPERPOSITION OF POINT LOADS
// Loads are (P, a) pairs
// =============================================================================

/// Reactions for a set of point loads: R2 = ΣPa/L, R1 = ΣP - R2
pub fn point_loads_reactions(loads: &[(f64, f64)], l: f64) -> (f64, f64) {
    let total: f64 = loads.iter().map(|(p, _)| p).sum();
    let r2 = loads.iter().map(|(p, a)| p * a).sum::<f64>() / l;
    (total - r2, r2)
}

/// Moment at x from the left free body: M = R1·x - ΣP(x - a) for a < x
pub fn point_loads_moment(loads: &[(f64, f64)], r1: f64, x: f64) -> f64 {
    r1 * x
        - loads
            .iter()
            .filter(|(_, a)| *a < x)
            .map(|(p, a)| p * (x - a))
            .sum::<f64>()
}

/// Shear just left of x: V = R1 - ΣP for a < x
pub fn point_loads_shear_left(loads: &[(f64, f64)], r1: f64, x: f64) -> f64 {
    r1 - loads
        .iter()
        .filter(|(_, a)| *a < x)
        .map(|(p, _)| p)
        .sum::<f64>()
}

/// Shear just right of x: V = R1 - ΣP for a ≤ x
pub fn point_loads_shear_right(loads: &[(f64, f64)], r1: f64, x: f64) -> f64 {
    r1 - loads
        .iter()
        .filter(|(_, a)| *a <= x)
        .map(|(p, _)| p)
        .sum::<f64>()
}

/// Deflection at x by superposing each point load's influence
pub fn point_loads_deflection(loads: &[(f64, f64)], l: f64, x: f64, e: f64, i: f64) -> f64 {
    loads
        .iter()
        .map(|(p, a)| point_load_deflection(*p, *a, l, x, e, i))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_point_load_asymmetric_reactions() {
        // 10 m span, 100 kN at 3 m
        let (r1, r2) = point_load_reactions(100.0, 3.0, 10.0);
        assert!((r1 - 70.0).abs() < EPSILON);
        assert!((r2 - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_point_load_moment_max() {
        // M_max = PL/4 = 100 * 10 / 4
        let m = point_load_moment(100.0, 5.0, 10.0, 5.0);
        assert!((m - 250.0).abs() < EPSILON);
        assert!(point_load_moment(100.0, 5.0, 10.0, 0.0).abs() < EPSILON);
        assert!(point_load_moment(100.0, 5.0, 10.0, 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_point_load_shear_jump() {
        assert!((point_load_shear(100.0, 4.0, 10.0, 3.9) - 60.0).abs() < EPSILON);
        assert!((point_load_shear(100.0, 4.0, 10.0, 4.0) + 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_point_load_deflection_midspan() {
        // δ = PL³/(48EI) for a central load
        let (p, l, e, i): (f64, f64, f64, f64) = (10_000.0, 6000.0, 200_000.0, 8.356e7);
        let expected = p * l.powi(3) / (48.0 * e * i);
        let d = point_load_deflection(p, l / 2.0, l, l / 2.0, e, i);
        assert!((d - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_deflection_symmetry() {
        // Maxwell reciprocity: δ at x from load at a equals δ at a from load at x
        let d1 = point_load_deflection(1.0, 2.0, 10.0, 7.0, 1.0, 1.0);
        let d2 = point_load_deflection(1.0, 7.0, 10.0, 2.0, 1.0, 1.0);
        assert!((d1 - d2).abs() < EPSILON);
    }

    #[test]
    fn test_uniform_load() {
        let (r1, r2) = uniform_load_reactions(2.0, 10.0);
        assert!((r1 - 10.0).abs() < EPSILON && (r2 - 10.0).abs() < EPSILON);
        assert!((uniform_load_max_moment(2.0, 10.0) - 25.0).abs() < EPSILON);
        let d = uniform_load_max_deflection(1.0, 1000.0, 1.0, 1.0);
        assert!((d - 5.0e12 / 384.0).abs() < 1.0);
    }

    #[test]
    fn test_superposition_matches_single_loads() {
        let loads = [(50.0, 3.0), (50.0, 7.0)];
        let (r1, r2) = point_loads_reactions(&loads, 10.0);
        assert!((r1 - 50.0).abs() < EPSILON);
        assert!((r2 - 50.0).abs() < EPSILON);

        let m = point_loads_moment(&loads, r1, 5.0);
        let expected = point_load_moment(50.0, 3.0, 10.0, 5.0) + point_load_moment(50.0, 7.0, 10.0, 5.0);
        assert!((m - expected).abs() < EPSILON);

        // Shear limits at the first load
        assert!((point_loads_shear_left(&loads, r1, 3.0) - 50.0).abs() < EPSILON);
        assert!(point_loads_shear_right(&loads, r1, 3.0).abs() < EPSILON);
    }
}
