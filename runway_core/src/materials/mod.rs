//! # Materials Database
//!
//! Structural steel grades, material constants and the rolled-section
//! catalog used for runway girders and cap channels.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::materials::{SteelGrade, E_STEEL};
//! use runway_core::materials::steel::builtin_shapes;
//!
//! let grade = SteelGrade::S355;
//! assert_eq!(grade.fy_mpa(), 355.0);
//! assert!((E_STEEL / grade.fy_mpa()).sqrt() > 23.0);
//!
//! let ipe = builtin_shapes().lookup("IPE 300").unwrap();
//! assert_eq!(ipe.depth_mm, 300.0);
//! ```

pub mod steel;

pub use steel::{builtin_shapes, ShapeType, SteelShape, SteelShapeDb};

use serde::{Deserialize, Serialize};

/// Modulus of elasticity of structural steel (MPa)
pub const E_STEEL: f64 = 200_000.0;

/// Shear modulus of structural steel (MPa)
pub const G_STEEL: f64 = 77_200.0;

/// Density of structural steel (kg/m³)
pub const STEEL_DENSITY: f64 = 7850.0;

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Structural steel grade with its specified minimum yield and tensile strength.
///
/// Serializes as the grade designation, e.g. `"A572 Gr50"` or `"S355"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteelGrade {
    #[serde(rename = "A36")]
    A36,
    #[serde(rename = "A572 Gr42")]
    A572Gr42,
    #[serde(rename = "A572 Gr50")]
    #[default]
    A572Gr50,
    #[serde(rename = "S235")]
    S235,
    #[serde(rename = "S275")]
    S275,
    #[serde(rename = "S355")]
    S355,
}

impl SteelGrade {
    /// All grades for iteration
    pub const ALL: [SteelGrade; 6] = [
        SteelGrade::A36,
        SteelGrade::A572Gr42,
        SteelGrade::A572Gr50,
        SteelGrade::S235,
        SteelGrade::S275,
        SteelGrade::S355,
    ];

    /// Specified minimum yield stress Fy (MPa)
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::A36 => 250.0,
            SteelGrade::A572Gr42 => 290.0,
            SteelGrade::A572Gr50 => 345.0,
            SteelGrade::S235 => 235.0,
            SteelGrade::S275 => 275.0,
            SteelGrade::S355 => 355.0,
        }
    }

    /// Specified minimum tensile strength Fu (MPa)
    pub fn fu_mpa(&self) -> f64 {
        match self {
            SteelGrade::A36 => 400.0,
            SteelGrade::A572Gr42 => 415.0,
            SteelGrade::A572Gr50 => 450.0,
            SteelGrade::S235 => 360.0,
            SteelGrade::S275 => 430.0,
            SteelGrade::S355 => 510.0,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SteelGrade::A36 => "A36",
            SteelGrade::A572Gr42 => "A572 Gr42",
            SteelGrade::A572Gr50 => "A572 Gr50",
            SteelGrade::S235 => "S235",
            SteelGrade::S275 => "S275",
            SteelGrade::S355 => "S355",
        }
    }

    /// The ratio sqrt(E/Fy) that scales every slenderness limit
    pub fn slenderness_scale(&self) -> f64 {
        (E_STEEL / self.fy_mpa()).sqrt()
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Fy = {:.0} MPa)", self.display_name(), self.fy_mpa())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_strengths() {
        for grade in SteelGrade::ALL {
            assert!(grade.fu_mpa() > grade.fy_mpa(), "{} Fu must exceed Fy", grade.display_name());
        }
        assert_eq!(SteelGrade::A36.fy_mpa(), 250.0);
        assert_eq!(SteelGrade::S355.fu_mpa(), 510.0);
    }

    #[test]
    fn test_slenderness_scale() {
        // sqrt(200000 / 345) = 24.08
        assert!((SteelGrade::A572Gr50.slenderness_scale() - 24.077).abs() < 0.01);
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&SteelGrade::A572Gr50).unwrap();
        assert_eq!(json, "\"A572 Gr50\"");
        let roundtrip: SteelGrade = serde_json::from_str("\"S275\"").unwrap();
        assert_eq!(roundtrip, SteelGrade::S275);
    }
}
