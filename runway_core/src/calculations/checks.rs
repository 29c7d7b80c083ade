//! # Limit-State Checks
//!
//! Every capacity check of a design run is reduced to a [`CheckResult`]
//! tagged with its [`LimitState`]. The governing check is the one with the
//! highest demand/capacity ratio.

use serde::{Deserialize, Serialize};

use crate::equations::Equation;

/// Limit states evaluated for a runway girder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitState {
    Flexure,
    LateralBending,
    CombinedBending,
    Shear,
    WebLocalYielding,
    WebCrippling,
    Deflection,
    Fatigue,
    Weld,
    TransverseStiffener,
    BearingStiffener,
    LongitudinalStiffener,
    ProportionLimits,
}

impl LimitState {
    pub fn display_name(&self) -> &'static str {
        match self {
            LimitState::Flexure => "Flexure",
            LimitState::LateralBending => "Top Flange Lateral Bending",
            LimitState::CombinedBending => "Combined Bending",
            LimitState::Shear => "Shear",
            LimitState::WebLocalYielding => "Web Local Yielding",
            LimitState::WebCrippling => "Web Crippling",
            LimitState::Deflection => "Deflection",
            LimitState::Fatigue => "Fatigue",
            LimitState::Weld => "Flange-to-Web Weld",
            LimitState::TransverseStiffener => "Transverse Stiffener",
            LimitState::BearingStiffener => "Bearing Stiffener",
            LimitState::LongitudinalStiffener => "Longitudinal Stiffener",
            LimitState::ProportionLimits => "Proportion Limits",
        }
    }
}

impl std::fmt::Display for LimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of one limit-state check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "limit_state": "Shear",
///   "demand": 412.6,
///   "capacity": 688.0,
///   "units": "kN",
///   "ratio": 0.60,
///   "equation": "NominalShear",
///   "reference": "AISC 360-16 Section G2.1",
///   "detail": "Cv1 = 1.000, tension field not used",
///   "passes": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub limit_state: LimitState,
    pub demand: f64,
    /// Allowable value the demand is compared with
    pub capacity: f64,
    pub units: String,
    /// demand / capacity, or the governing ratio of a multi-part check
    pub ratio: f64,
    /// Governing equation, for report traceability
    pub equation: Equation,
    /// Code citation of the governing equation
    pub reference: String,
    /// Short note on what governed within the check
    pub detail: String,
    pub passes: bool,
}

impl CheckResult {
    /// Check with ratio demand/capacity
    pub fn new(limit_state: LimitState, demand: f64, capacity: f64, units: &str, equation: Equation) -> Self {
        let ratio = if capacity > 0.0 { demand.abs() / capacity } else { f64::INFINITY };
        Self::with_ratio(limit_state, demand, capacity, units, ratio, equation)
    }

    /// Check whose ratio is computed elsewhere (multi-part checks).
    ///
    /// A NaN ratio is stored as infinity so the check fails and still orders.
    pub fn with_ratio(
        limit_state: LimitState,
        demand: f64,
        capacity: f64,
        units: &str,
        ratio: f64,
        equation: Equation,
    ) -> Self {
        let ratio = if ratio.is_nan() { f64::INFINITY } else { ratio };
        Self {
            limit_state,
            demand,
            capacity,
            units: units.to_string(),
            ratio,
            equation,
            reference: equation.metadata().reference.citation(),
            detail: String::new(),
            passes: ratio <= 1.0,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// One-line summary for reports
    pub fn summary(&self) -> String {
        format!(
            "{:<28} {:>10.2} / {:>10.2} {:<5} ratio {:.3} {}",
            self.limit_state.display_name(),
            self.demand,
            self.capacity,
            self.units,
            self.ratio,
            if self.passes { "OK" } else { "NG" }
        )
    }
}

/// Check with the highest ratio. Ties keep the earlier check.
pub fn governing_check(checks: &[CheckResult]) -> Option<&CheckResult> {
    checks.iter().fold(None, |best, check| match best {
        Some(b) if check.ratio <= b.ratio => Some(b),
        _ => Some(check),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_and_reference() {
        let check = CheckResult::new(LimitState::Shear, 300.0, 600.0, "kN", Equation::NominalShear);
        assert!((check.ratio - 0.5).abs() < 1e-12);
        assert!(check.passes);
        assert!(check.reference.starts_with("AISC 360-16"));
    }

    #[test]
    fn test_zero_capacity_fails_and_governs() {
        let zero = CheckResult::new(LimitState::WebCrippling, 50.0, 0.0, "kN", Equation::NominalShear);
        assert_eq!(zero.ratio, f64::INFINITY);
        assert!(!zero.passes);

        let empty = CheckResult::new(LimitState::Weld, 0.0, 0.0, "kN/mm", Equation::NominalShear);
        assert_eq!(empty.ratio, f64::INFINITY);
        assert!(!empty.passes);

        let nan = CheckResult::with_ratio(LimitState::Fatigue, 1.0, 1.0, "MPa", f64::NAN, Equation::NominalShear);
        assert_eq!(nan.ratio, f64::INFINITY);

        let ok = CheckResult::new(LimitState::Shear, 300.0, 600.0, "kN", Equation::NominalShear);
        let checks = vec![ok.clone(), zero, ok];
        assert_eq!(governing_check(&checks).unwrap().limit_state, LimitState::WebCrippling);
    }

    #[test]
    fn test_negative_demand_uses_magnitude() {
        let check = CheckResult::new(LimitState::Flexure, -150.0, 100.0, "kN·m", Equation::PlasticMoment);
        assert!((check.ratio - 1.5).abs() < 1e-12);
        assert!(!check.passes);
    }

    #[test]
    fn test_governing_check() {
        let checks = vec![
            CheckResult::new(LimitState::Flexure, 80.0, 100.0, "kN·m", Equation::PlasticMoment),
            CheckResult::new(LimitState::Shear, 90.0, 100.0, "kN", Equation::NominalShear),
            CheckResult::new(LimitState::WebCrippling, 90.0, 100.0, "kN", Equation::WebCrippling),
        ];
        let governing = governing_check(&checks).unwrap();
        assert_eq!(governing.limit_state, LimitState::Shear);
        assert!(governing_check(&[]).is_none());
    }

    #[test]
    fn test_summary_flags() {
        let check = CheckResult::new(LimitState::Fatigue, 40.0, 31.0, "MPa", Equation::FatigueStressRange);
        assert!(check.summary().ends_with("NG"));
    }
}
