//! # Slenderness Classification
//!
//! Compact / noncompact / slender classification of the compression flange
//! and the web in flexure (AISC 360-16 Table B4.1b). The class of each
//! element selects the flexural provisions used in [`super::flexure`].
//!
//! Comparisons are inclusive at both limits: a ratio equal to λp is
//! compact and a ratio equal to λr is noncompact.

use serde::{Deserialize, Serialize};

use super::section::{Section, SectionKind};
use crate::materials::SteelGrade;

/// Lower and upper bounds on the flange buckling coefficient kc
pub const KC_MIN: f64 = 0.35;
pub const KC_MAX: f64 = 0.76;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlendernessClass {
    Compact,
    Noncompact,
    Slender,
}

impl SlendernessClass {
    fn from_limits(ratio: f64, lambda_p: f64, lambda_r: f64) -> Self {
        if ratio <= lambda_p {
            SlendernessClass::Compact
        } else if ratio <= lambda_r {
            SlendernessClass::Noncompact
        } else {
            SlendernessClass::Slender
        }
    }
}

impl std::fmt::Display for SlendernessClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SlendernessClass::Compact => "compact",
            SlendernessClass::Noncompact => "noncompact",
            SlendernessClass::Slender => "slender",
        };
        write!(f, "{}", s)
    }
}

/// Slenderness ratio of one element with its limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementClassification {
    pub ratio: f64,
    pub lambda_p: f64,
    pub lambda_r: f64,
    pub class: SlendernessClass,
}

impl ElementClassification {
    pub fn new(ratio: f64, lambda_p: f64, lambda_r: f64) -> Self {
        Self {
            ratio,
            lambda_p,
            lambda_r,
            class: SlendernessClass::from_limits(ratio, lambda_p, lambda_r),
        }
    }

    pub fn is_compact(&self) -> bool {
        self.class == SlendernessClass::Compact
    }

    pub fn is_slender(&self) -> bool {
        self.class == SlendernessClass::Slender
    }
}

/// Flange and web classification of a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub flange: ElementClassification,
    pub web: ElementClassification,
    /// Flange buckling coefficient used for built-up flange limits
    pub kc: f64,
}

/// kc = 4/√(h/tw), clamped to [0.35, 0.76]
pub fn flange_buckling_coefficient(web_slenderness: f64) -> f64 {
    (4.0 / web_slenderness.sqrt()).clamp(KC_MIN, KC_MAX)
}

/// Classify the compression flange for flexure.
///
/// Rolled shapes use λr = 1.0√(E/Fy) (Case 10); built-up sections use
/// λr = 0.95√(kc·E/(0.7Fy)) (Case 11).
pub fn classify_flange(bf_2tf: f64, grade: SteelGrade, kind: SectionKind, kc: f64) -> ElementClassification {
    let scale = grade.slenderness_scale();
    let lambda_p = 0.38 * scale;
    let lambda_r = match kind {
        SectionKind::Rolled => 1.0 * scale,
        SectionKind::BuiltUp => 0.95 * (kc / 0.7).sqrt() * scale,
    };
    ElementClassification::new(bf_2tf, lambda_p, lambda_r)
}

/// Classify the web in flexure: λp = 3.76√(E/Fy), λr = 5.70√(E/Fy)
pub fn classify_web(h_tw: f64, grade: SteelGrade) -> ElementClassification {
    let scale = grade.slenderness_scale();
    ElementClassification::new(h_tw, 3.76 * scale, 5.70 * scale)
}

/// Classify both elements of a section.
pub fn classify(section: &Section, grade: SteelGrade) -> Classification {
    let h_tw = section.web_slenderness();
    let kc = flange_buckling_coefficient(h_tw);
    Classification {
        flange: classify_flange(section.flange_slenderness(), grade, section.kind, kc),
        web: classify_web(h_tw, grade),
        kc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section::{build_section, SectionGeometry};

    #[test]
    fn test_web_limits_are_inclusive() {
        let grade = SteelGrade::A572Gr50;
        let scale = grade.slenderness_scale();

        assert_eq!(classify_web(3.76 * scale - 0.01, grade).class, SlendernessClass::Compact);
        assert_eq!(classify_web(3.76 * scale, grade).class, SlendernessClass::Compact);
        assert_eq!(classify_web(5.70 * scale, grade).class, SlendernessClass::Noncompact);
        assert_eq!(classify_web(5.70 * scale + 0.01, grade).class, SlendernessClass::Slender);
    }

    #[test]
    fn test_kc_clamped() {
        assert_eq!(flange_buckling_coefficient(4.0), KC_MAX);
        assert_eq!(flange_buckling_coefficient(400.0), KC_MIN);
        assert!((flange_buckling_coefficient(64.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_built_up_flange_limit_uses_kc() {
        let grade = SteelGrade::S355;
        let rolled = classify_flange(9.0, grade, SectionKind::Rolled, 0.5);
        let built = classify_flange(9.0, grade, SectionKind::BuiltUp, 0.5);
        assert_eq!(rolled.lambda_p, built.lambda_p);
        assert!(built.lambda_r < rolled.lambda_r);
    }

    #[test]
    fn test_classify_slender_girder() {
        // h/tw = 1160/8 = 145 > 5.70·√(200000/345) = 137.2
        let geometry = SectionGeometry::symmetric(1200.0, 300.0, 20.0, 8.0);
        let section = build_section(&geometry).unwrap();
        let c = classify(&section, SteelGrade::A572Gr50);
        assert!(c.web.is_slender());
        assert!(c.flange.is_compact());
        assert_eq!(c, classify(&section, SteelGrade::A572Gr50));
    }
}
