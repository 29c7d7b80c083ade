//! # Shear Strength
//!
//! Web shear strength per AISC 360-16 Chapter G:
//!
//! - G2.1: shear yielding and buckling of the web, `Vn = 0.6·Fy·Aw·Cv1`
//! - G3: tension field action in stiffened interior panels
//!
//! ## Applicability of Tension Field Action
//!
//! Tension field action is considered only when all of the following hold:
//!
//! 1. Transverse stiffeners are present (spacing given and positive)
//! 2. a/h ≤ 3.0 and a/h ≤ (260/(h/tw))²
//! 3. The panel is not an end panel
//! 4. The caller enables it
//!
//! When it applies, the governing Vn is the larger of the two strengths.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::calculations::section::{build_section, SectionGeometry};
//! use runway_core::calculations::shear::shear_strength;
//! use runway_core::materials::SteelGrade;
//!
//! let section = build_section(&SectionGeometry::symmetric(1200.0, 300.0, 20.0, 8.0)).unwrap();
//! let unstiffened = shear_strength(&section, SteelGrade::A572Gr50, None, false, true).unwrap();
//! let stiffened = shear_strength(&section, SteelGrade::A572Gr50, Some(1200.0), false, true).unwrap();
//! assert!(stiffened.vn_kn > unstiffened.vn_kn);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::section::{web_area_mm2, Section};
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::materials::{SteelGrade, E_STEEL};

/// Ω for shear without tension field action
pub const OMEGA_SHEAR: f64 = 1.50;

/// Ω for shear with tension field action
pub const OMEGA_SHEAR_TFA: f64 = 1.67;

/// Panels with a/h above this are treated as unstiffened
pub const MAX_ASPECT_RATIO: f64 = 3.0;

/// Shear strength of the web.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearStrength {
    pub kv: f64,
    /// Panel aspect ratio; `None` when unstiffened
    pub a_over_h: Option<f64>,
    pub cv1: f64,
    pub cv2: f64,
    pub aw_mm2: f64,
    pub vn_no_tfa_kn: f64,
    /// Strength with tension field action, when applicable
    pub vn_tfa_kn: Option<f64>,
    pub tension_field_governs: bool,
    pub vn_kn: f64,
    pub omega: f64,
    /// Allowable shear Vn/Ω
    pub va_kn: f64,
}

/// Web plate buckling coefficient kv (G2-5).
///
/// 5.34 when unstiffened or a/h > 3.0; otherwise 5 + 5/(a/h)².
pub fn shear_buckling_coefficient(a_over_h: Option<f64>) -> f64 {
    match a_over_h {
        Some(ratio) if ratio <= MAX_ASPECT_RATIO => 5.0 + 5.0 / (ratio * ratio),
        _ => 5.34,
    }
}

/// Web shear coefficients (Cv1, Cv2) for a web slenderness and kv.
///
/// Both follow three branches on h/tw:
///
/// ```text
///   h/tw ≤ 1.10√(kvE/Fy)           Cv = 1.0
///   h/tw ≤ 1.37√(kvE/Fy)           Cv = 1.10√(kvE/Fy) / (h/tw)
///   otherwise                      Cv = 1.51·kv·E / ((h/tw)²·Fy)
/// ```
///
/// Cv1 scales shear buckling without tension field action; Cv2 is the
/// buckling stress ratio used by G3-2.
pub fn web_shear_coefficients(h_tw: f64, kv: f64, grade: SteelGrade) -> (f64, f64) {
    let fy = grade.fy_mpa();
    let root = (kv * E_STEEL / fy).sqrt();
    let limit1 = 1.10 * root;
    let limit2 = 1.37 * root;

    let cv = if h_tw <= limit1 {
        1.0
    } else if h_tw <= limit2 {
        limit1 / h_tw
    } else {
        1.51 * kv * E_STEEL / (h_tw * h_tw * fy)
    };

    (cv, cv)
}

/// Nominal and allowable shear strength.
///
/// `spacing_mm` is the clear transverse stiffener spacing a.
pub fn shear_strength(
    section: &Section,
    grade: SteelGrade,
    spacing_mm: Option<f64>,
    end_panel: bool,
    use_tension_field: bool,
) -> CalcResult<ShearStrength> {
    let hw = section.web_height_mm();
    let h_tw = section.web_slenderness();
    let fy = grade.fy_mpa();
    let aw = web_area_mm2(section);

    let a_over_h = match spacing_mm {
        Some(a) if !a.is_finite() => {
            return Err(CalcError::invalid_input(
                "stiffener_spacing",
                a.to_string(),
                "Spacing must be a finite length",
            ))
        }
        Some(a) if a > 0.0 => Some(a / hw),
        _ => None,
    };

    // === Without tension field action (G2) ===
    let kv = shear_buckling_coefficient(a_over_h);
    let (cv1, cv2) = web_shear_coefficients(h_tw, kv, grade);
    let vn_no_tfa = ensure_finite(0.6 * fy * aw * cv1 / 1000.0, "Vn (G2-1)")?;

    // === With tension field action (G3) ===
    let tfa_permitted = use_tension_field
        && !end_panel
        && a_over_h.map_or(false, |r| r <= MAX_ASPECT_RATIO && r <= (260.0 / h_tw).powi(2));
    let vn_tfa = match a_over_h {
        Some(r) if tfa_permitted => {
            let field = (1.0 - cv2) / (1.15 * (1.0 + r * r).sqrt());
            Some(ensure_finite(0.6 * fy * aw * (cv2 + field) / 1000.0, "Vn (G3-2)")?)
        }
        _ => None,
    };

    // === Governing ===
    let tension_field_governs = vn_tfa.map_or(false, |v| v > vn_no_tfa);
    let (vn, omega) = match vn_tfa {
        Some(v) if tension_field_governs => (v, OMEGA_SHEAR_TFA),
        _ => (vn_no_tfa, OMEGA_SHEAR),
    };

    debug!(kv, cv1, cv2, vn, tension_field_governs, "shear strength");

    Ok(ShearStrength {
        kv,
        a_over_h,
        cv1,
        cv2,
        aw_mm2: aw,
        vn_no_tfa_kn: vn_no_tfa,
        vn_tfa_kn: vn_tfa,
        tension_field_governs,
        vn_kn: vn,
        omega,
        va_kn: vn / omega,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::{build_section, SectionGeometry};

    fn slender_girder() -> Section {
        // h/tw = 1160/8 = 145
        build_section(&SectionGeometry::symmetric(1200.0, 300.0, 20.0, 8.0)).unwrap()
    }

    #[test]
    fn test_kv() {
        assert_eq!(shear_buckling_coefficient(None), 5.34);
        assert_eq!(shear_buckling_coefficient(Some(3.5)), 5.34);
        assert!((shear_buckling_coefficient(Some(1.0)) - 10.0).abs() < 1e-12);
        assert!((shear_buckling_coefficient(Some(3.0)) - (5.0 + 5.0 / 9.0)).abs() < 1e-12);
    }

    #[test]
    fn test_stocky_web_yields() {
        let s = build_section(&SectionGeometry::symmetric(600.0, 300.0, 20.0, 12.0)).unwrap();
        let v = shear_strength(&s, SteelGrade::A572Gr50, None, false, true).unwrap();
        assert_eq!(v.cv1, 1.0);
        // 0.6·345·560·12 / 1000
        assert!((v.vn_kn - 0.6 * 345.0 * 560.0 * 12.0 / 1000.0).abs() < 1e-9);
        assert_eq!(v.omega, OMEGA_SHEAR);
    }

    #[test]
    fn test_no_stiffeners_matches_tfa_disabled() {
        let s = slender_girder();
        let with_flag = shear_strength(&s, SteelGrade::A572Gr50, None, false, true).unwrap();
        let without = shear_strength(&s, SteelGrade::A572Gr50, None, false, false).unwrap();
        assert_eq!(with_flag, without);
        assert!(with_flag.vn_tfa_kn.is_none());
    }

    #[test]
    fn test_tension_field_governs_interior_panel() {
        let s = slender_girder();
        let v = shear_strength(&s, SteelGrade::A572Gr50, Some(1160.0), false, true).unwrap();
        assert!((v.kv - 10.0).abs() < 1e-9);
        assert!(v.tension_field_governs);
        assert_eq!(v.omega, OMEGA_SHEAR_TFA);
        assert!(v.vn_kn > v.vn_no_tfa_kn);
        assert!((v.va_kn - v.vn_kn / 1.67).abs() < 1e-12);
    }

    #[test]
    fn test_end_panel_excludes_tension_field() {
        let s = slender_girder();
        let v = shear_strength(&s, SteelGrade::A572Gr50, Some(1160.0), true, true).unwrap();
        assert!(v.vn_tfa_kn.is_none());
        assert!(!v.tension_field_governs);
        assert_eq!(v.vn_kn, v.vn_no_tfa_kn);
    }

    #[test]
    fn test_wide_panel_behaves_unstiffened() {
        let s = slender_girder();
        let wide = shear_strength(&s, SteelGrade::A572Gr50, Some(4000.0), false, true).unwrap();
        let none = shear_strength(&s, SteelGrade::A572Gr50, None, false, true).unwrap();
        assert_eq!(wide.kv, 5.34);
        assert_eq!(wide.vn_kn, none.vn_kn);
    }

    #[test]
    fn test_coefficient_branches() {
        let grade = SteelGrade::A572Gr50;
        let root = (5.34 * E_STEEL / 345.0).sqrt();

        assert_eq!(web_shear_coefficients(root, 5.34, grade), (1.0, 1.0));

        let (cv1_mid, cv2_mid) = web_shear_coefficients(1.2 * root, 5.34, grade);
        assert!((cv1_mid - 1.10 / 1.2).abs() < 1e-12);
        assert_eq!(cv1_mid, cv2_mid);

        let h_tw = 2.0 * root;
        let (cv1_slender, cv2_slender) = web_shear_coefficients(h_tw, 5.34, grade);
        assert!((cv1_slender - 1.51 * 5.34 * E_STEEL / (h_tw * h_tw * 345.0)).abs() < 1e-12);
        assert_eq!(cv1_slender, cv2_slender);
    }

    #[test]
    fn test_elastic_buckling_branch_for_very_slender_web() {
        // h/tw = 1160/6 ≈ 193, beyond 1.37√(kvE/Fy) ≈ 76
        let h_tw = 1160.0 / 6.0;
        let grade = SteelGrade::A572Gr50;
        let (cv1, _) = web_shear_coefficients(h_tw, 5.34, grade);
        let elastic = 1.51 * 5.34 * E_STEEL / (h_tw * h_tw * 345.0);
        let inelastic = 1.10 * (5.34 * E_STEEL / 345.0).sqrt() / h_tw;
        assert!((cv1 - elastic).abs() < 1e-12);
        assert!(cv1 < inelastic);

        let s = build_section(&SectionGeometry::symmetric(1200.0, 400.0, 20.0, 6.0)).unwrap();
        let v = shear_strength(&s, grade, None, false, false).unwrap();
        assert!((v.vn_kn - 0.6 * 345.0 * 1160.0 * 6.0 * elastic / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_at_thresholds() {
        let grade = SteelGrade::S355;
        let kv = 5.34;
        let root = (kv * E_STEEL / 355.0).sqrt();
        for limit in [1.10 * root, 1.37 * root] {
            let (below, _) = web_shear_coefficients(limit, kv, grade);
            let (above, _) = web_shear_coefficients(limit * (1.0 + 1e-9), kv, grade);
            assert!((below - above).abs() < 5e-3);
        }
    }
}
