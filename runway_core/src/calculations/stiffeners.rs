//! # Web Stiffeners
//!
//! Checks for the three stiffener types used on runway plate girders:
//!
//! - **Transverse** (intermediate) stiffeners: width-thickness ratio,
//!   minimum moment of inertia (G2.3, plus G3.3 when tension field action
//!   governs) and a practical minimum width.
//! - **Bearing** stiffeners at supports: a pair of plates with an effective
//!   web strip checked as a column (J10.8, E3) and in bearing (J7).
//! - **Longitudinal** stiffeners: width-thickness ratio, a simplified
//!   stiffness floor and the position within the compression zone.
//!
//! Each check returns its items with demand, capacity and ratio; the check
//! ratio is the largest item ratio.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "transverse": { "spacing_mm": 1500.0, "thickness_mm": 10.0, "width_mm": 100.0 },
//!   "bearing": { "thickness_mm": 16.0, "width_mm": 120.0 },
//!   "end_panel": false
//! }
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::section::Section;
use super::web_local::BearingLocation;
use crate::equations::section::{parallel_axis, radius_of_gyration, rectangular_moment_of_inertia};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{SteelGrade, E_STEEL};

/// Ω for the bearing stiffener column and bearing checks
pub const OMEGA_STIFFENER: f64 = 2.00;

/// Effective length factor of a bearing stiffener column
pub const BEARING_K: f64 = 0.75;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransverseStiffener {
    /// Clear spacing a between stiffeners
    pub spacing_mm: f64,
    pub thickness_mm: f64,
    /// Outstand from the web face
    pub width_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingStiffener {
    pub thickness_mm: f64,
    pub width_mm: f64,
    /// Corner clip at the web-flange junction
    #[serde(default = "default_clip")]
    pub clip_mm: f64,
}

fn default_clip() -> f64 {
    25.0
}

impl BearingStiffener {
    pub fn new(thickness_mm: f64, width_mm: f64) -> Self {
        Self {
            thickness_mm,
            width_mm,
            clip_mm: default_clip(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalStiffener {
    pub thickness_mm: f64,
    pub width_mm: f64,
    /// Distance from the compression flange as a fraction of the web height
    pub position_ratio: f64,
}

/// Stiffeners fitted to the girder.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StiffenerConfig {
    pub transverse: Option<TransverseStiffener>,
    pub bearing: Option<BearingStiffener>,
    pub longitudinal: Option<LongitudinalStiffener>,
    /// Check the shear panel as an end panel (no tension field action)
    pub end_panel: bool,
}

impl StiffenerConfig {
    pub fn with_transverse(mut self, spacing_mm: f64, thickness_mm: f64, width_mm: f64) -> Self {
        self.transverse = Some(TransverseStiffener {
            spacing_mm,
            thickness_mm,
            width_mm,
        });
        self
    }

    pub fn with_bearing(mut self, thickness_mm: f64, width_mm: f64) -> Self {
        self.bearing = Some(BearingStiffener::new(thickness_mm, width_mm));
        self
    }

    pub fn with_longitudinal(mut self, thickness_mm: f64, width_mm: f64, position_ratio: f64) -> Self {
        self.longitudinal = Some(LongitudinalStiffener {
            thickness_mm,
            width_mm,
            position_ratio,
        });
        self
    }

    pub fn with_end_panel(mut self, end_panel: bool) -> Self {
        self.end_panel = end_panel;
        self
    }

    /// Transverse stiffener spacing, if transverse stiffeners are fitted
    pub fn spacing_mm(&self) -> Option<f64> {
        self.transverse.map(|t| t.spacing_mm)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if let Some(t) = &self.transverse {
            positive("transverse stiffener", "spacing", t.spacing_mm)?;
            positive("transverse stiffener", "thickness", t.thickness_mm)?;
            positive("transverse stiffener", "width", t.width_mm)?;
        }
        if let Some(b) = &self.bearing {
            positive("bearing stiffener", "thickness", b.thickness_mm)?;
            positive("bearing stiffener", "width", b.width_mm)?;
            if !b.clip_mm.is_finite() || b.clip_mm < 0.0 || b.clip_mm >= b.width_mm {
                return Err(CalcError::invalid_geometry(
                    "bearing stiffener",
                    format!("clip {} mm must be non-negative and less than the width {} mm", b.clip_mm, b.width_mm),
                ));
            }
        }
        if let Some(l) = &self.longitudinal {
            positive("longitudinal stiffener", "thickness", l.thickness_mm)?;
            positive("longitudinal stiffener", "width", l.width_mm)?;
            if !(l.position_ratio > 0.0 && l.position_ratio < 1.0) {
                return Err(CalcError::invalid_input(
                    "longitudinal.position_ratio",
                    l.position_ratio.to_string(),
                    "Position must lie strictly inside the web (0 < ratio < 1)",
                ));
            }
        }
        Ok(())
    }
}

fn positive(component: &str, dimension: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_geometry(
            component,
            format!("{} must be positive, got {}", dimension, value),
        ))
    }
}

// ============================================================================
// Results
// ============================================================================

/// One requirement of a stiffener check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StiffenerItem {
    pub name: String,
    pub demand: f64,
    pub capacity: f64,
    pub units: String,
    pub ratio: f64,
    pub ok: bool,
}

impl StiffenerItem {
    fn new(name: &str, demand: f64, capacity: f64, units: &str) -> Self {
        Self::with_ratio(name, demand, capacity, units, demand / capacity)
    }

    fn with_ratio(name: &str, demand: f64, capacity: f64, units: &str, ratio: f64) -> Self {
        Self {
            name: name.to_string(),
            demand,
            capacity,
            units: units.to_string(),
            ratio,
            ok: ratio <= 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StiffenerCheck {
    pub items: Vec<StiffenerItem>,
    /// Largest item ratio
    pub ratio: f64,
    pub passes: bool,
}

impl StiffenerCheck {
    fn from_items(items: Vec<StiffenerItem>) -> Self {
        let ratio = items.iter().map(|i| i.ratio).fold(0.0, f64::max);
        let passes = items.iter().all(|i| i.ok);
        Self { items, ratio, passes }
    }

    pub fn item(&self, name: &str) -> Option<&StiffenerItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

/// All stiffener checks for a girder
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StiffenerChecks {
    pub transverse: Option<StiffenerCheck>,
    pub bearing: Option<StiffenerCheck>,
    pub longitudinal: Option<StiffenerCheck>,
}

/// b/t ≤ 0.56√(E/Fy)
fn width_thickness_item(width_mm: f64, thickness_mm: f64, grade: SteelGrade) -> StiffenerItem {
    StiffenerItem::new("Width/Thickness", width_mm / thickness_mm, 0.56 * grade.slenderness_scale(), "-")
}

// ============================================================================
// Checks
// ============================================================================

/// Transverse stiffener check.
///
/// Ist1 = b·tw³·j with b = min(a, h) and j = max(2.5/(a/h)² - 2, 0.5).
/// When tension field action governs the shear strength, the requirement
/// is raised to Ist2 = h⁴·ρst^1.3/40·(Fy/E)^1.5 if larger.
pub fn check_transverse(
    section: &Section,
    grade: SteelGrade,
    stiffener: &TransverseStiffener,
    tension_field_governs: bool,
) -> StiffenerCheck {
    let hw = section.web_height_mm();
    let tw = section.geometry.web_thickness_mm;
    let (a, t, b) = (stiffener.spacing_mm, stiffener.thickness_mm, stiffener.width_mm);
    let a_h = a / hw;

    let j = (2.5 / (a_h * a_h) - 2.0).max(0.5);
    let ist1 = a.min(hw) * tw.powi(3) * j;
    let rho_st: f64 = 1.0;
    let ist2 = hw.powi(4) * rho_st.powf(1.3) / 40.0 * (grade.fy_mpa() / E_STEEL).powf(1.5);
    let required = if tension_field_governs { ist1.max(ist2) } else { ist1 };

    // Single plate about the web face
    let provided = parallel_axis(rectangular_moment_of_inertia(t, b), t * b, b / 2.0);

    StiffenerCheck::from_items(vec![
        width_thickness_item(b, t, grade),
        StiffenerItem::new("Moment of Inertia", required, provided, "mm⁴"),
        StiffenerItem::new("Min Width", hw / 30.0 + tw, b, "mm"),
    ])
}

/// Allowable column strength (kN) of a bearing stiffener pair with its web
/// strip, AISC E3 with KL = 0.75h.
pub fn bearing_column_capacity(
    section: &Section,
    grade: SteelGrade,
    stiffener: &BearingStiffener,
    location: BearingLocation,
) -> CalcResult<f64> {
    let hw = section.web_height_mm();
    let tw = section.geometry.web_thickness_mm;
    let (t, b) = (stiffener.thickness_mm, stiffener.width_mm);
    let fy = grade.fy_mpa();

    let strip = match location {
        BearingLocation::Support => 25.0 * tw,
        BearingLocation::Interior => 24.0 * tw,
    };
    let area = 2.0 * b * t + strip * tw;
    let inertia = 2.0 * parallel_axis(rectangular_moment_of_inertia(t, b), t * b, b / 2.0 + tw / 2.0)
        + rectangular_moment_of_inertia(strip, tw);
    let r = radius_of_gyration(inertia, area)?;

    let kl_r = BEARING_K * hw / r;
    let fe = PI * PI * E_STEEL / (kl_r * kl_r);
    let fcr = if kl_r <= 4.71 * grade.slenderness_scale() {
        0.658_f64.powf(fy / fe) * fy
    } else {
        0.877 * fe
    };
    Ok(fcr * area / 1000.0 / OMEGA_STIFFENER)
}

/// Bearing stiffener check against the support reaction (kN).
pub fn check_bearing(
    section: &Section,
    grade: SteelGrade,
    stiffener: &BearingStiffener,
    reaction_kn: f64,
    location: BearingLocation,
) -> CalcResult<StiffenerCheck> {
    let (t, b) = (stiffener.thickness_mm, stiffener.width_mm);
    let column = bearing_column_capacity(section, grade, stiffener, location)?;
    let contact_area = 2.0 * (b - stiffener.clip_mm) * t;
    let bearing = 1.8 * grade.fy_mpa() * contact_area / 1000.0 / OMEGA_STIFFENER;

    Ok(StiffenerCheck::from_items(vec![
        width_thickness_item(b, t, grade),
        StiffenerItem::new("Column Capacity", reaction_kn, column, "kN"),
        StiffenerItem::new("Bearing", reaction_kn, bearing, "kN"),
    ]))
}

/// Longitudinal stiffener check.
pub fn check_longitudinal(section: &Section, grade: SteelGrade, stiffener: &LongitudinalStiffener) -> StiffenerCheck {
    let hw = section.web_height_mm();
    let tw = section.geometry.web_thickness_mm;
    let (t, b, pos) = (stiffener.thickness_mm, stiffener.width_mm, stiffener.position_ratio);

    let required = 0.5 * (2.4 * hw * tw.powi(3));
    let provided = rectangular_moment_of_inertia(t, b);
    let position_ratio = (0.1 / pos).max(pos / 0.4);

    StiffenerCheck::from_items(vec![
        width_thickness_item(b, t, grade),
        StiffenerItem::new("Moment of Inertia", required, provided, "mm⁴"),
        StiffenerItem::with_ratio("Position (0.1-0.4 h)", pos, 0.4, "-", position_ratio),
    ])
}

/// Run every configured stiffener check.
///
/// `tension_field_governs` comes from the shear strength and `reaction_kn`
/// is the total support reaction.
pub fn check_stiffeners(
    section: &Section,
    grade: SteelGrade,
    config: &StiffenerConfig,
    tension_field_governs: bool,
    reaction_kn: f64,
) -> CalcResult<StiffenerChecks> {
    config.validate()?;
    let checks = StiffenerChecks {
        transverse: config
            .transverse
            .as_ref()
            .map(|t| check_transverse(section, grade, t, tension_field_governs)),
        bearing: config
            .bearing
            .as_ref()
            .map(|b| check_bearing(section, grade, b, reaction_kn, BearingLocation::Support))
            .transpose()?,
        longitudinal: config
            .longitudinal
            .as_ref()
            .map(|l| check_longitudinal(section, grade, l)),
    };
    debug!(
        transverse = checks.transverse.as_ref().map(|c| c.ratio),
        bearing = checks.bearing.as_ref().map(|c| c.ratio),
        longitudinal = checks.longitudinal.as_ref().map(|c| c.ratio),
        "stiffener checks"
    );
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::{build_section, SectionGeometry};

    fn girder() -> Section {
        // hw = 1160, tw = 8
        build_section(&SectionGeometry::symmetric(1200.0, 300.0, 20.0, 8.0)).unwrap()
    }

    #[test]
    fn test_transverse_inertia_requirement() {
        let s = girder();
        let st = TransverseStiffener {
            spacing_mm: 1160.0,
            thickness_mm: 10.0,
            width_mm: 100.0,
        };
        let check = check_transverse(&s, SteelGrade::A572Gr50, &st, false);
        let inertia = check.item("Moment of Inertia").unwrap();
        // a/h = 1 → j = 0.5; Ist1 = 1160·512·0.5
        assert!((inertia.demand - 296_960.0).abs() < 1e-6);
        // 10·100³/12 + 1000·50²
        assert!((inertia.capacity - (1.0e7 / 12.0 + 2.5e6)).abs() < 1e-6);
        assert!(check.passes);
    }

    #[test]
    fn test_tension_field_raises_inertia_requirement() {
        let s = girder();
        let st = TransverseStiffener {
            spacing_mm: 1160.0,
            thickness_mm: 10.0,
            width_mm: 100.0,
        };
        let without = check_transverse(&s, SteelGrade::A572Gr50, &st, false);
        let with = check_transverse(&s, SteelGrade::A572Gr50, &st, true);
        assert!(with.item("Moment of Inertia").unwrap().demand > without.item("Moment of Inertia").unwrap().demand);
    }

    #[test]
    fn test_slender_stiffener_fails_width_thickness() {
        let s = girder();
        let st = TransverseStiffener {
            spacing_mm: 1500.0,
            thickness_mm: 6.0,
            width_mm: 150.0,
        };
        let check = check_transverse(&s, SteelGrade::A572Gr50, &st, false);
        assert!(!check.item("Width/Thickness").unwrap().ok);
        assert!(!check.passes);
        assert!(check.ratio > 1.0);
    }

    #[test]
    fn test_bearing_stiffener() {
        let s = girder();
        let st = BearingStiffener::new(16.0, 120.0);
        let check = check_bearing(&s, SteelGrade::A572Gr50, &st, 500.0, BearingLocation::Support).unwrap();
        let bearing = check.item("Bearing").unwrap();
        // 1.8·345·2·95·16/1000/2
        assert!((bearing.capacity - 1.8 * 345.0 * 3040.0 / 1000.0 / 2.0).abs() < 1e-9);
        assert!(check.item("Column Capacity").unwrap().capacity > 0.0);
        assert!(check.passes);
    }

    #[test]
    fn test_interior_strip_is_narrower() {
        let s = girder();
        let st = BearingStiffener::new(16.0, 120.0);
        let end = bearing_column_capacity(&s, SteelGrade::A572Gr50, &st, BearingLocation::Support).unwrap();
        let interior = bearing_column_capacity(&s, SteelGrade::A572Gr50, &st, BearingLocation::Interior).unwrap();
        assert!(interior < end);
    }

    #[test]
    fn test_longitudinal_position() {
        let s = girder();
        let good = LongitudinalStiffener {
            thickness_mm: 10.0,
            width_mm: 100.0,
            position_ratio: 0.2,
        };
        let low = LongitudinalStiffener {
            position_ratio: 0.5,
            ..good
        };
        assert!(check_longitudinal(&s, SteelGrade::A572Gr50, &good).passes);
        let check = check_longitudinal(&s, SteelGrade::A572Gr50, &low);
        let position = check.item("Position (0.1-0.4 h)").unwrap();
        assert!((position.ratio - 1.25).abs() < 1e-12);
        assert!(!position.ok);
    }

    #[test]
    fn test_config_validation() {
        let bad_clip = StiffenerConfig::default().with_bearing(12.0, 20.0);
        assert!(bad_clip.validate().is_err());

        let bad_position = StiffenerConfig::default().with_longitudinal(10.0, 80.0, 1.2);
        assert_eq!(bad_position.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let ok = StiffenerConfig::default()
            .with_transverse(1500.0, 10.0, 100.0)
            .with_bearing(16.0, 120.0);
        assert!(ok.validate().is_ok());
        assert_eq!(ok.spacing_mm(), Some(1500.0));
    }

    #[test]
    fn test_only_configured_checks_run() {
        let s = girder();
        let config = StiffenerConfig::default().with_bearing(16.0, 120.0);
        let checks = check_stiffeners(&s, SteelGrade::A572Gr50, &config, false, 300.0).unwrap();
        assert!(checks.transverse.is_none());
        assert!(checks.bearing.is_some());
        assert!(checks.longitudinal.is_none());
    }
}
