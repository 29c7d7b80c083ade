//! # Flange-to-Web Welds
//!
//! Fillet weld design for the top flange to web connection of a built-up
//! girder (AISC 360-16 J2.2b, J2.4, Table J2.4).
//!
//! The horizontal shear flow `q = V·Q/Ix` is shared by two fillet welds,
//! one on each side of the web.

use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::errors::{CalcError, CalcResult};

/// Ω for fillet welds
pub const OMEGA_WELD: f64 = 2.00;

/// Throat of an equal-leg fillet as a fraction of the leg
pub const THROAT_FACTOR: f64 = 0.707;

/// Weld settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldConfig {
    /// Fillet leg size w (mm)
    pub leg_mm: f64,
    /// Electrode classification strength (MPa); E70XX = 482
    pub fexx_mpa: f64,
}

impl Default for WeldConfig {
    fn default() -> Self {
        Self {
            leg_mm: 6.0,
            fexx_mpa: 482.0,
        }
    }
}

impl WeldConfig {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.leg_mm.is_finite() || self.leg_mm <= 0.0 {
            return Err(CalcError::invalid_input("weld.leg_mm", self.leg_mm.to_string(), "Leg size must be positive"));
        }
        if !self.fexx_mpa.is_finite() || self.fexx_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "weld.fexx_mpa",
                self.fexx_mpa.to_string(),
                "Electrode strength must be positive",
            ));
        }
        Ok(())
    }
}

/// Minimum fillet leg (mm) by the thicker of the joined parts, Table J2.4
pub fn minimum_leg_mm(thickness_mm: f64) -> f64 {
    if thickness_mm <= 6.35 {
        3.0
    } else if thickness_mm <= 12.7 {
        5.0
    } else if thickness_mm <= 19.05 {
        6.0
    } else {
        8.0
    }
}

/// Maximum fillet leg (mm) along the edge of a part, J2.2b
pub fn maximum_leg_mm(thickness_mm: f64) -> f64 {
    if thickness_mm < 6.0 {
        thickness_mm
    } else {
        thickness_mm - 1.6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeldDesign {
    pub leg_mm: f64,
    pub min_leg_mm: f64,
    pub max_leg_mm: f64,
    /// First moment of the top flange about the neutral axis (mm³)
    pub q_first_moment_mm3: f64,
    /// Total shear flow (N/mm)
    pub shear_flow_n_per_mm: f64,
    pub demand_per_weld_n_per_mm: f64,
    /// Allowable strength per weld (N/mm)
    pub capacity_per_weld_n_per_mm: f64,
    /// Governing of strength, minimum and maximum size ratios
    pub ratio: f64,
    pub passes: bool,
}

/// Design the top flange welds for a shear force (kN).
pub fn design_weld(section: &Section, shear_kn: f64, config: &WeldConfig) -> CalcResult<WeldDesign> {
    config.validate()?;
    let g = &section.geometry;
    let (bf, tf, tw) = (g.top_flange_width_mm, g.top_flange_thickness_mm, g.web_thickness_mm);

    let min_leg = minimum_leg_mm(tw.max(g.top_flange_thickness_mm.max(g.bottom_flange_thickness_mm)));
    let max_leg = maximum_leg_mm(tw);

    // === Shear flow ===
    let q = bf * tf * (g.depth_mm - section.y_bar_mm - tf / 2.0);
    let flow = shear_kn.abs() * 1000.0 * q / section.ix_mm4;
    let per_weld = flow / 2.0;

    // === Capacity ===
    let capacity = 0.6 * config.fexx_mpa * THROAT_FACTOR * config.leg_mm / OMEGA_WELD;

    let ratio = (per_weld / capacity).max(min_leg / config.leg_mm).max(config.leg_mm / max_leg);

    Ok(WeldDesign {
        leg_mm: config.leg_mm,
        min_leg_mm: min_leg,
        max_leg_mm: max_leg,
        q_first_moment_mm3: q,
        shear_flow_n_per_mm: flow,
        demand_per_weld_n_per_mm: per_weld,
        capacity_per_weld_n_per_mm: capacity,
        ratio,
        passes: ratio <= 1.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::{build_section, SectionGeometry};

    #[test]
    fn test_leg_size_limits() {
        assert_eq!(minimum_leg_mm(6.0), 3.0);
        assert_eq!(minimum_leg_mm(12.7), 5.0);
        assert_eq!(minimum_leg_mm(16.0), 6.0);
        assert_eq!(minimum_leg_mm(25.0), 8.0);
        assert!((maximum_leg_mm(10.0) - 8.4).abs() < 1e-12);
        assert_eq!(maximum_leg_mm(5.0), 5.0);
    }

    #[test]
    fn test_shear_flow() {
        let s = build_section(&SectionGeometry::symmetric(600.0, 300.0, 20.0, 10.0)).unwrap();
        let w = design_weld(&s, 400.0, &WeldConfig::default()).unwrap();
        // Q = 300·20·(600 - 300 - 10)
        assert!((w.q_first_moment_mm3 - 1_740_000.0).abs() < 1e-6);
        assert!((w.shear_flow_n_per_mm - 400_000.0 * 1_740_000.0 / s.ix_mm4).abs() < 1e-9);
        assert!((w.capacity_per_weld_n_per_mm - 0.6 * 482.0 * 0.707 * 6.0 / 2.0).abs() < 1e-9);
        // Flanges are 20 mm thick, so the 8 mm minimum governs a 6 mm leg
        assert_eq!(w.min_leg_mm, 8.0);
        assert!(!w.passes);
    }

    #[test]
    fn test_adequate_weld_passes() {
        let s = build_section(&SectionGeometry::symmetric(600.0, 300.0, 12.0, 10.0)).unwrap();
        let w = design_weld(&s, 200.0, &WeldConfig { leg_mm: 6.0, fexx_mpa: 482.0 }).unwrap();
        assert!(w.passes, "ratio {}", w.ratio);
    }

    #[test]
    fn test_invalid_leg_rejected() {
        let s = build_section(&SectionGeometry::symmetric(600.0, 300.0, 20.0, 10.0)).unwrap();
        assert!(design_weld(&s, 100.0, &WeldConfig { leg_mm: 0.0, fexx_mpa: 482.0 }).is_err());
    }
}
