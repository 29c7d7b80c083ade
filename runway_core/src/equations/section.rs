//! # Cross-Section Property Formulas
//!
//! Plate formulas used to assemble built-up I-sections from flanges, web and
//! an optional cap channel.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Moment of inertia (second moment of area)
//! - `r` = Radius of gyration (√(I/A))
//! - `b` = Plate width (parallel to the bending axis)
//! - `t` = Plate thickness (perpendicular to the bending axis)
//!
//! ## References
//!
//! - AISC Steel Construction Manual, Part 1: Dimensions and Properties
//! - AISC Design Guide 9: Torsional Analysis of Structural Steel Members
//! - Roark's Formulas for Stress and Strain, 8th Edition, Chapter 3

use crate::errors::{checked_sqrt, CalcResult};

// =============================================================================
// RECTANGULAR PLATE PROPERTIES
// =============================================================================

/// Area of a rectangular plate: A = b × d
#[inline]
pub fn rectangular_area(b: f64, d: f64) -> f64 {
    b * d
}

/// Moment of inertia of a rectangular plate about its own centroid
///
/// ```text
///     ┌─────────┐
///   d │ ════════│ ← centroidal axis at d/2
///     └─────────┘
///          b
/// ```
///
/// I = bd³/12, with `d` measured perpendicular to the axis.
///
/// ```rust
/// use runway_core::equations::section::rectangular_moment_of_inertia;
///
/// // 300 x 20 flange plate about its own axis
/// let i = rectangular_moment_of_inertia(300.0, 20.0);
/// assert!((i - 200_000.0).abs() < 1e-6);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, d: f64) -> f64 {
    b * d.powi(3) / 12.0
}

/// Parallel axis theorem: I = I_own + A·d²
#[inline]
pub fn parallel_axis(i_own: f64, area: f64, distance: f64) -> f64 {
    i_own + area * distance * distance
}

/// Centroid of a set of (area, centroid) parts: ȳ = ΣA·y / ΣA
pub fn composite_centroid(parts: &[(f64, f64)]) -> f64 {
    let area: f64 = parts.iter().map(|(a, _)| a).sum();
    parts.iter().map(|(a, y)| a * y).sum::<f64>() / area
}

/// Radius of gyration r = √(I/A)
pub fn radius_of_gyration(i: f64, area: f64) -> CalcResult<f64> {
    checked_sqrt(i / area, "r = sqrt(I/A)")
}

/// St. Venant torsional constant of a thin open plate: J = b·t³/3
#[inline]
pub fn thin_plate_torsion_constant(b: f64, t: f64) -> f64 {
    b * t.powi(3) / 3.0
}

/// Warping constant of a singly-symmetric I-section
///
/// Cw = ho²·Iyc·Iyt / (Iyc + Iyt), which reduces to Iy·ho²/4 for equal flanges.
#[inline]
pub fn warping_constant(ho: f64, iy_top: f64, iy_bottom: f64) -> f64 {
    ho * ho * iy_top * iy_bottom / (iy_top + iy_bottom)
}

/// Plastic section modulus of a flange plate about its own minor axis: Z = t·b²/4
#[inline]
pub fn plate_plastic_modulus_minor(b: f64, t: f64) -> f64 {
    t * b * b / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_axis() {
        // 300 x 20 plate whose centroid sits 290 mm from the axis
        let a = rectangular_area(300.0, 20.0);
        let i = parallel_axis(rectangular_moment_of_inertia(300.0, 20.0), a, 290.0);
        assert!((i - (200_000.0 + 6000.0 * 290.0 * 290.0)).abs() < 1e-3);
    }

    #[test]
    fn test_composite_centroid() {
        let y = composite_centroid(&[(100.0, 0.0), (300.0, 40.0)]);
        assert!((y - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_warping_constant_symmetric() {
        let iy = 4.5e6;
        let ho = 580.0;
        let cw = warping_constant(ho, iy, iy);
        assert!((cw - (2.0 * iy) * ho * ho / 4.0).abs() / cw < 1e-12);
    }

    #[test]
    fn test_radius_of_gyration_rejects_negative() {
        assert!(radius_of_gyration(-1.0, 10.0).is_err());
        assert!((radius_of_gyration(400.0, 4.0).unwrap() - 10.0).abs() < 1e-12);
    }
}
