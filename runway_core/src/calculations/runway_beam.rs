//! # Crane Runway Beam Design
//!
//! Full design run for a simply-supported runway girder carrying one to
//! three overhead cranes:
//!
//! 1. Wheel loads for every crane
//! 2. Moving-load search for the governing moment, shear and reaction
//! 3. Section properties (rolled shape or welded plate girder, optional cap channel)
//! 4. Every capacity check, reduced to the governing ratio
//! 5. Vertical deflection under static wheel loads
//!
//! ## Example
//!
//! ```rust
//! use runway_core::calculations::runway_beam::{calculate, RunwayBeamInput, SectionSpec};
//! use runway_core::loads::CraneParams;
//!
//! let input = RunwayBeamInput::new("RB-1", 6.0)
//!     .with_crane(CraneParams::new(1).with_capacity(5.0).with_bridge(12.0, 0.8))
//!     .with_section(SectionSpec::rolled("HEB 300"));
//!
//! let result = calculate(&input).unwrap();
//! println!("Governing: {}", result.report.governing.summary());
//! assert!(result.report.checks.len() >= 8);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::checks::{governing_check, CheckResult, LimitState};
use super::classification::{classify, Classification};
use super::deflection::{check_deflection, DeflectionResult};
use super::fatigue::{check_fatigue, FatigueCategory, FatigueCheck};
use super::flexure::{
    flexural_strength, lateral_bending, proportion_limits, FlexuralLimitState, FlexuralStrength,
    LateralBending, LtbRegime, ProportionItem, ProportionLimits,
};
use super::moving_load::{find_critical_cases, select_governing, GoverningCases, LoadCase, SearchResolution};
use super::section::{build_section, CapChannel, Section, SectionGeometry, SectionKind};
use super::shear::{shear_strength, ShearStrength};
use super::stiffeners::{check_stiffeners, StiffenerCheck, StiffenerChecks, StiffenerConfig, StiffenerItem};
use super::web_local::{web_local_strength, BearingLocation, RailGeometry, WebLocalStrength};
use super::weld::{design_weld, WeldConfig, WeldDesign};
use crate::equations::beam::{uniform_load_max_moment, uniform_load_reactions};
use crate::equations::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{evaluate_cranes, CraneClass, CraneParams, CraneWheelLoad, WheelLoadSummary};
use crate::materials::{builtin_shapes, SteelGrade};

// ============================================================================
// Demand
// ============================================================================

/// Design forces for the capacity checks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignDemand {
    /// Crane plus self-weight moment (kN·m)
    pub moment_knm: f64,
    /// Crane-only moment, used for fatigue (kN·m)
    pub crane_moment_knm: f64,
    /// Crane plus self-weight shear (kN)
    pub shear_kn: f64,
    /// Crane plus self-weight support reaction (kN)
    pub reaction_kn: f64,
    /// Largest wheel load including impact (kN)
    pub max_wheel_load_kn: f64,
    /// Top flange lateral moment (kN·m)
    pub lateral_moment_knm: f64,
}

impl DesignDemand {
    /// Demand from the governing load cases plus a uniform self-weight (kN/m).
    pub fn from_governing(governing: &GoverningCases, span_m: f64, self_weight_kn_per_m: f64) -> Self {
        let w = self_weight_kn_per_m;
        let (w_reaction, _) = uniform_load_reactions(w, span_m);
        let crane_moment = governing.moment.moment_knm.abs();
        let max_wheel = [&governing.moment, &governing.shear, &governing.reaction]
            .iter()
            .flat_map(|case| case.wheels.iter())
            .map(|wheel| wheel.vertical_kn)
            .fold(0.0, f64::max);

        Self {
            moment_knm: crane_moment + uniform_load_max_moment(w, span_m),
            crane_moment_knm: crane_moment,
            shear_kn: governing.shear.shear_kn + w_reaction,
            reaction_kn: governing.reaction.max_reaction() + w_reaction,
            max_wheel_load_kn: max_wheel,
            lateral_moment_knm: governing.moment.lateral_moment_knm(span_m),
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// Settings of the capacity checks.
///
/// ## JSON Example
///
/// ```json
/// {
///   "tension_field": true,
///   "rail": { "base_width_mm": 50.0, "bearing_allowance_mm": 20.0 },
///   "weld": { "leg_mm": 6.0, "fexx_mpa": 482.0 },
///   "fatigue_category": "E",
///   "crane_class": "C",
///   "design_cycles": null
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    /// Allow tension field action in stiffened interior panels
    pub tension_field: bool,
    pub rail: RailGeometry,
    pub weld: WeldConfig,
    pub fatigue_category: FatigueCategory,
    /// Service class for fatigue cycles and the deflection limit
    pub crane_class: CraneClass,
    /// Overrides the class cycle count
    pub design_cycles: Option<u64>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            tension_field: true,
            rail: RailGeometry::default(),
            weld: WeldConfig::default(),
            fatigue_category: FatigueCategory::default(),
            crane_class: CraneClass::default(),
            design_cycles: None,
        }
    }
}

impl CheckOptions {
    pub fn with_tension_field(mut self, enabled: bool) -> Self {
        self.tension_field = enabled;
        self
    }

    pub fn with_crane_class(mut self, class: CraneClass) -> Self {
        self.crane_class = class;
        self
    }

    pub fn with_fatigue_category(mut self, category: FatigueCategory) -> Self {
        self.fatigue_category = category;
        self
    }

    pub fn with_design_cycles(mut self, cycles: u64) -> Self {
        self.design_cycles = Some(cycles);
        self
    }

    pub fn with_weld(mut self, weld: WeldConfig) -> Self {
        self.weld = weld;
        self
    }

    pub fn with_rail(mut self, rail: RailGeometry) -> Self {
        self.rail = rail;
        self
    }

    /// Fatigue design cycles: the override, else the class value
    pub fn cycles(&self) -> u64 {
        self.design_cycles.unwrap_or_else(|| self.crane_class.design_cycles())
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.weld.validate()?;
        if self.rail.bearing_length_mm() <= 0.0 || !self.rail.bearing_length_mm().is_finite() {
            return Err(CalcError::invalid_input(
                "rail",
                self.rail.bearing_length_mm().to_string(),
                "Bearing length under the rail must be positive",
            ));
        }
        if self.design_cycles == Some(0) {
            return Err(CalcError::invalid_input("design_cycles", "0", "Design cycles must be at least 1"));
        }
        Ok(())
    }
}

// ============================================================================
// Capacity Checks
// ============================================================================

/// Every capacity check of a section under a design demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub classification: Classification,
    pub flexure: FlexuralStrength,
    pub lateral: LateralBending,
    pub shear: ShearStrength,
    pub web_local: WebLocalStrength,
    /// Flange-to-web welds, built-up sections only
    pub weld: Option<WeldDesign>,
    pub stiffeners: StiffenerChecks,
    pub fatigue: FatigueCheck,
    pub proportions: ProportionLimits,
    /// Every check in evaluation order
    pub checks: Vec<CheckResult>,
    /// Check with the highest ratio
    pub governing: CheckResult,
    pub passes: bool,
    pub equations: EquationTracker,
}

impl CapacityReport {
    /// Add a check and update the governing result
    pub fn add_check(&mut self, check: CheckResult) {
        debug!(limit_state = %check.limit_state, ratio = check.ratio, "limit state evaluated");
        if check.ratio > self.governing.ratio {
            self.governing = check.clone();
        }
        self.passes &= check.passes;
        self.checks.push(check);
    }

    /// The check for one limit state, if it was evaluated
    pub fn check(&self, limit_state: LimitState) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.limit_state == limit_state)
    }
}

fn flexure_equation(flexure: &FlexuralStrength) -> Equation {
    match flexure.governing {
        FlexuralLimitState::Yielding => Equation::PlasticMoment,
        FlexuralLimitState::CompressionFlangeYielding => Equation::PlateGirderFlexure,
        FlexuralLimitState::TensionFlangeYielding => Equation::TensionFlangeYielding,
        FlexuralLimitState::LateralTorsionalBuckling if flexure.regime == LtbRegime::Elastic => {
            Equation::ElasticLtbStress
        }
        FlexuralLimitState::LateralTorsionalBuckling => Equation::InelasticLtb,
        FlexuralLimitState::FlangeLocalBuckling => Equation::FlangeLocalBuckling,
    }
}

fn record_flexure_equations(flexure: &FlexuralStrength, tracker: &mut EquationTracker) {
    tracker.record(Equation::LimitingLengthLp, format!("Lp = {:.0} mm", flexure.lp_mm));
    tracker.record(Equation::LimitingLengthLr, format!("Lr = {:.0} mm", flexure.lr_mm));
    if let Some(aw) = flexure.aw {
        tracker.record(Equation::BendingStrengthReduction, format!("aw = {:.2}, Rpg = {:.3}", aw, flexure.rpg));
        tracker.record(Equation::PlateGirderFlexure, "Compression flange yielding");
    } else {
        tracker.record(Equation::PlasticMoment, "Yielding");
    }
    match flexure.regime {
        LtbRegime::NotApplicable => {}
        LtbRegime::Inelastic => tracker.record(Equation::InelasticLtb, "Lp < Lb ≤ Lr"),
        LtbRegime::Elastic => tracker.record(Equation::ElasticLtbStress, "Lb > Lr"),
    }
    if flexure.component(FlexuralLimitState::FlangeLocalBuckling).is_some() {
        tracker.record(Equation::FlangeLocalBuckling, "Noncompact or slender flange");
    }
    if flexure.component(FlexuralLimitState::TensionFlangeYielding).is_some() {
        tracker.record(Equation::TensionFlangeYielding, "Sxt < Sxc");
    }
}

/// Item with the highest ratio; ties keep the earlier item
fn worst_item(check: &StiffenerCheck) -> Option<&StiffenerItem> {
    check.items.iter().fold(None, |best: Option<&StiffenerItem>, item| match best {
        Some(b) if item.ratio <= b.ratio => Some(b),
        _ => Some(item),
    })
}

/// Collapse a multi-item stiffener check to one result, reporting its worst item.
fn stiffener_result(limit_state: LimitState, check: &StiffenerCheck, equation: Equation) -> CheckResult {
    match worst_item(check) {
        Some(item) => CheckResult::with_ratio(limit_state, item.demand, item.capacity, &item.units, check.ratio, equation)
            .with_detail(item.name.clone()),
        None => CheckResult::with_ratio(limit_state, 0.0, 0.0, "-", check.ratio, equation),
    }
}

/// Run every capacity check of a section against a design demand.
///
/// The unbraced length is in mm. Welds are checked for built-up sections only.
/// Deflection is not included here, since it needs the wheel loads; the
/// design run adds it with [`CapacityReport::add_check`].
pub fn run_capacity_checks(
    section: &Section,
    grade: SteelGrade,
    demand: &DesignDemand,
    unbraced_length_mm: f64,
    stiffeners: &StiffenerConfig,
    options: &CheckOptions,
) -> CalcResult<CapacityReport> {
    options.validate()?;
    stiffeners.validate()?;
    let mut equations = EquationTracker::new();
    let mut checks = Vec::new();

    // === Classification ===
    let classification = classify(section, grade);
    equations.record(
        Equation::FlangeSlendernessLimits,
        format!("bf/2tf = {:.2}, {}", classification.flange.ratio, classification.flange.class),
    );
    equations.record(
        Equation::WebSlendernessLimits,
        format!("h/tw = {:.1}, {}", classification.web.ratio, classification.web.class),
    );

    // === Flexure ===
    let flexure = flexural_strength(section, grade, &classification, unbraced_length_mm)?;
    record_flexure_equations(&flexure, &mut equations);
    let flexure_check = CheckResult::new(
        LimitState::Flexure,
        demand.moment_knm,
        flexure.ma_knm,
        "kN·m",
        flexure_equation(&flexure),
    )
    .with_detail(flexure.governing.display_name());
    let flexure_ratio = flexure_check.ratio;
    checks.push(flexure_check);

    // === Lateral bending of the top flange ===
    let lateral = lateral_bending(section, grade, demand.lateral_moment_knm, flexure_ratio);
    equations.record(Equation::LateralThrust, "Lateral wheel loads at the governing moment position");
    equations.record(Equation::TopFlangeLateralBending, "Top flange alone resists lateral thrust");
    checks.push(CheckResult::new(
        LimitState::LateralBending,
        lateral.lateral_moment_knm,
        lateral.capacity_knm,
        "kN·m",
        Equation::TopFlangeLateralBending,
    ));
    checks.push(
        CheckResult::with_ratio(
            LimitState::CombinedBending,
            lateral.combined_ratio,
            1.0,
            "-",
            lateral.combined_ratio,
            Equation::TopFlangeLateralBending,
        )
        .with_detail(format!("{:.3} + {:.3}", lateral.flexure_ratio, lateral.lateral_ratio)),
    );

    // === Shear ===
    let shear = shear_strength(
        section,
        grade,
        stiffeners.spacing_mm(),
        stiffeners.end_panel,
        options.tension_field,
    )?;
    equations.record(Equation::ShearBucklingCoefficient, format!("kv = {:.2}", shear.kv));
    equations.record(Equation::WebShearCoefficient, format!("Cv1 = {:.3}", shear.cv1));
    equations.record(Equation::NominalShear, "Without tension field action");
    let shear_equation = if shear.tension_field_governs {
        equations.record(Equation::TensionFieldShear, format!("Cv2 = {:.3}", shear.cv2));
        Equation::TensionFieldShear
    } else {
        Equation::NominalShear
    };
    checks.push(
        CheckResult::new(LimitState::Shear, demand.shear_kn, shear.va_kn, "kN", shear_equation).with_detail(
            if shear.tension_field_governs {
                "Tension field action"
            } else {
                "No tension field action"
            },
        ),
    );

    // === Web local yielding and crippling under a wheel ===
    let web_local = web_local_strength(section, grade, &options.rail, BearingLocation::Interior)?;
    equations.record(Equation::WebLocalYielding, format!("lb = {:.0} mm", web_local.bearing_length_mm));
    equations.record(Equation::WebCrippling, "Wheel load away from the support");
    checks.push(CheckResult::new(
        LimitState::WebLocalYielding,
        demand.max_wheel_load_kn,
        web_local.yielding_ra_kn,
        "kN",
        Equation::WebLocalYielding,
    ));
    checks.push(CheckResult::new(
        LimitState::WebCrippling,
        demand.max_wheel_load_kn,
        web_local.crippling_ra_kn,
        "kN",
        Equation::WebCrippling,
    ));

    // === Flange-to-web welds ===
    let weld = match section.kind {
        SectionKind::BuiltUp => {
            let weld = design_weld(section, demand.shear_kn, &options.weld)?;
            equations.record(Equation::ShearFlow, format!("q = {:.1} N/mm", weld.shear_flow_n_per_mm));
            equations.record(Equation::FilletWeldStrength, format!("w = {:.0} mm", weld.leg_mm));
            checks.push(
                CheckResult::with_ratio(
                    LimitState::Weld,
                    weld.demand_per_weld_n_per_mm,
                    weld.capacity_per_weld_n_per_mm,
                    "N/mm",
                    weld.ratio,
                    Equation::FilletWeldStrength,
                )
                .with_detail(format!("leg {:.0} mm, min {:.0} mm, max {:.1} mm", weld.leg_mm, weld.min_leg_mm, weld.max_leg_mm)),
            );
            Some(weld)
        }
        SectionKind::Rolled => None,
    };

    // === Stiffeners ===
    let stiffener_checks = check_stiffeners(section, grade, stiffeners, shear.tension_field_governs, demand.reaction_kn)?;
    if let Some(check) = &stiffener_checks.transverse {
        equations.record(Equation::TransverseStiffenerInertia, "Transverse stiffener");
        checks.push(stiffener_result(LimitState::TransverseStiffener, check, Equation::TransverseStiffenerInertia));
    }
    if let Some(check) = &stiffener_checks.bearing {
        equations.record(Equation::BearingStiffenerColumn, "Bearing stiffener at the support");
        equations.record(Equation::StiffenerBearing, "Bearing on the clipped stiffener area");
        let equation = match worst_item(check) {
            Some(item) if item.name == "Bearing" => Equation::StiffenerBearing,
            _ => Equation::BearingStiffenerColumn,
        };
        checks.push(stiffener_result(LimitState::BearingStiffener, check, equation));
    }
    if let Some(check) = &stiffener_checks.longitudinal {
        equations.record(Equation::LongitudinalStiffenerInertia, "Longitudinal stiffener");
        checks.push(stiffener_result(
            LimitState::LongitudinalStiffener,
            check,
            Equation::LongitudinalStiffenerInertia,
        ));
    }

    // === Fatigue ===
    let fatigue = check_fatigue(section, demand.crane_moment_knm, options.cycles(), options.fatigue_category)?;
    equations.record(
        Equation::FatigueStressRange,
        format!("{}, N = {}", fatigue.category, fatigue.cycles),
    );
    checks.push(
        CheckResult::new(
            LimitState::Fatigue,
            fatigue.stress_range_mpa,
            fatigue.allowable_mpa,
            "MPa",
            Equation::FatigueStressRange,
        )
        .with_detail(format!("{}, N = {}", fatigue.category, fatigue.cycles)),
    );

    // === Proportion limits ===
    let proportions = proportion_limits(section, grade, stiffeners.transverse.is_some());
    equations.record(Equation::ProportionLimits, "Web and flange proportions");
    let worst = proportions
        .items
        .iter()
        .fold(None, |best: Option<&ProportionItem>, item| match best {
            Some(b) if item.ratio() <= b.ratio() => Some(b),
            _ => Some(item),
        });
    let (actual, limit, name) = worst.map_or((0.0, 1.0, String::new()), |i| (i.actual, i.limit, i.name.clone()));
    checks.push(
        CheckResult::with_ratio(
            LimitState::ProportionLimits,
            actual,
            limit,
            "-",
            proportions.ratio(),
            Equation::ProportionLimits,
        )
        .with_detail(name),
    );

    for check in &checks {
        debug!(
            limit_state = %check.limit_state,
            demand = check.demand,
            capacity = check.capacity,
            ratio = check.ratio,
            "limit state evaluated"
        );
    }

    let governing = governing_check(&checks)
        .cloned()
        .ok_or_else(|| CalcError::calculation_failed("capacity checks", "no limit states evaluated"))?;
    let passes = checks.iter().all(|c| c.passes);

    Ok(CapacityReport {
        classification,
        flexure,
        lateral,
        shear,
        web_local,
        weld,
        stiffeners: stiffener_checks,
        fatigue,
        proportions,
        checks,
        governing,
        passes,
        equations,
    })
}

// ============================================================================
// Design Input
// ============================================================================

/// Girder cross-section: a catalog shape or welded plates.
///
/// ## JSON Examples
///
/// ```json
/// { "type": "Rolled", "designation": "HEB 500" }
/// ```
///
/// ```json
/// {
///   "type": "BuiltUp",
///   "depth_mm": 900.0,
///   "top_flange_width_mm": 350.0,
///   "top_flange_thickness_mm": 25.0,
///   "bottom_flange_width_mm": 300.0,
///   "bottom_flange_thickness_mm": 20.0,
///   "web_thickness_mm": 10.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectionSpec {
    Rolled { designation: String },
    BuiltUp(SectionGeometry),
}

impl Default for SectionSpec {
    fn default() -> Self {
        SectionSpec::BuiltUp(SectionGeometry::default())
    }
}

impl SectionSpec {
    pub fn rolled(designation: impl Into<String>) -> Self {
        SectionSpec::Rolled {
            designation: designation.into(),
        }
    }

    /// Derive the section, adding a catalog cap channel when given
    pub fn resolve(&self, cap_channel: Option<&str>) -> CalcResult<Section> {
        let cap = cap_channel
            .map(|label| builtin_shapes().lookup_channel(label).and_then(CapChannel::from_catalog))
            .transpose()?;
        match self {
            SectionSpec::Rolled { designation } => {
                let shape = builtin_shapes().lookup(designation)?;
                Section::from_rolled(shape, cap)
            }
            SectionSpec::BuiltUp(geometry) => match cap {
                Some(cap) => build_section(&geometry.clone().with_cap(cap)),
                None => build_section(geometry),
            },
        }
    }
}

/// Input for a runway girder design run.
///
/// Spans are in metres; section and stiffener dimensions in millimetres.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Runway A",
///   "span_m": 8.0,
///   "cranes": [
///     { "crane_id": 1, "capacity_t": 10.0, "bridge_weight_t": 5.0, "trolley_weight_t": 0.72,
///       "bridge_span_m": 20.0, "min_hook_approach_m": 1.0, "wheel_base_m": 2.2 }
///   ],
///   "section": { "type": "Rolled", "designation": "HEB 500" },
///   "cap_channel": "UPN 300",
///   "grade": "S355",
///   "unbraced_length_m": null,
///   "stiffeners": {},
///   "options": { "crane_class": "C", "fatigue_category": "E" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayBeamInput {
    /// User-defined label for this girder (e.g., "Runway A, grid 3-4")
    pub label: String,
    /// Girder span between supports (m)
    pub span_m: f64,
    pub cranes: Vec<CraneParams>,
    pub section: SectionSpec,
    /// Catalog channel laid on the top flange
    #[serde(default)]
    pub cap_channel: Option<String>,
    #[serde(default)]
    pub grade: SteelGrade,
    /// Compression flange unbraced length (m); defaults to the span
    #[serde(default)]
    pub unbraced_length_m: Option<f64>,
    #[serde(default)]
    pub stiffeners: StiffenerConfig,
    #[serde(default)]
    pub options: CheckOptions,
    #[serde(default)]
    pub resolution: SearchResolution,
}

impl RunwayBeamInput {
    pub fn new(label: impl Into<String>, span_m: f64) -> Self {
        Self {
            label: label.into(),
            span_m,
            cranes: Vec::new(),
            section: SectionSpec::default(),
            cap_channel: None,
            grade: SteelGrade::default(),
            unbraced_length_m: None,
            stiffeners: StiffenerConfig::default(),
            options: CheckOptions::default(),
            resolution: SearchResolution::default(),
        }
    }

    pub fn with_crane(mut self, crane: CraneParams) -> Self {
        self.cranes.push(crane);
        self
    }

    pub fn with_section(mut self, section: SectionSpec) -> Self {
        self.section = section;
        self
    }

    pub fn with_cap_channel(mut self, designation: impl Into<String>) -> Self {
        self.cap_channel = Some(designation.into());
        self
    }

    pub fn with_grade(mut self, grade: SteelGrade) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_unbraced_length(mut self, length_m: f64) -> Self {
        self.unbraced_length_m = Some(length_m);
        self
    }

    pub fn with_stiffeners(mut self, stiffeners: StiffenerConfig) -> Self {
        self.stiffeners = stiffeners;
        self
    }

    pub fn with_options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_resolution(mut self, resolution: SearchResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Compression flange unbraced length (mm)
    pub fn unbraced_length_mm(&self) -> f64 {
        self.unbraced_length_m.unwrap_or(self.span_m) * 1000.0
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.span_m.is_finite() || self.span_m <= 0.0 {
            return Err(CalcError::invalid_input("span_m", self.span_m.to_string(), "Span must be positive"));
        }
        if self.cranes.is_empty() {
            return Err(CalcError::invalid_input("cranes", "[]", "At least one crane is required"));
        }
        if let Some(lb) = self.unbraced_length_m {
            if !lb.is_finite() || lb <= 0.0 {
                return Err(CalcError::invalid_input(
                    "unbraced_length_m",
                    lb.to_string(),
                    "Unbraced length must be positive",
                ));
            }
        }
        self.stiffeners.validate()?;
        self.options.validate()?;
        self.resolution.validate()
    }
}

// ============================================================================
// Design Result
// ============================================================================

/// Results of a runway girder design run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayBeamResult {
    pub label: String,
    pub span_m: f64,

    // === Crane Loads ===
    pub wheel_loads: Vec<WheelLoadSummary>,

    // === Load Search ===
    pub load_cases: Vec<LoadCase>,
    pub governing: GoverningCases,

    // === Section ===
    pub section: Section,
    pub grade: SteelGrade,
    /// Self-weight line load (kN/m)
    pub self_weight_kn_per_m: f64,

    // === Checks ===
    pub demand: DesignDemand,
    pub deflection: DeflectionResult,
    pub report: CapacityReport,
}

impl RunwayBeamResult {
    /// Check if every limit state passes
    pub fn passes(&self) -> bool {
        self.report.passes
    }

    /// Highest demand/capacity ratio
    pub fn governing_ratio(&self) -> f64 {
        self.report.governing.ratio
    }

    /// Get the governing limit state
    pub fn governing_limit_state(&self) -> LimitState {
        self.report.governing.limit_state
    }

    pub fn equations(&self) -> &EquationTracker {
        &self.report.equations
    }
}

/// Crane with the largest static wheel load; ties keep the first crane.
fn heaviest_crane(cranes: &[CraneWheelLoad]) -> Option<&CraneWheelLoad> {
    cranes.iter().fold(None, |best: Option<&CraneWheelLoad>, crane| match best {
        Some(b) if crane.static_wheel_loads().0 <= b.static_wheel_loads().0 => Some(b),
        _ => Some(crane),
    })
}

/// Run the full runway girder design.
///
/// # Errors
///
/// - `InvalidInput` / `InvalidGeometry` for bad crane, section or stiffener data
/// - `ShapeNotFound` for an unknown catalog designation
/// - `NoValidLoadCases` when no crane fits on the span
pub fn calculate(input: &RunwayBeamInput) -> CalcResult<RunwayBeamResult> {
    input.validate()?;
    let span = input.span_m;

    // === Crane Loads ===
    let wheel_loads = evaluate_cranes(&input.cranes)?;
    let cranes = input
        .cranes
        .iter()
        .cloned()
        .map(CraneWheelLoad::new)
        .collect::<CalcResult<Vec<_>>>()?;

    // === Governing Load Cases ===
    let load_cases = find_critical_cases(span, &cranes, &input.resolution)?;
    let governing = select_governing(&load_cases)?;

    // === Section and Demand ===
    let section = input.section.resolve(input.cap_channel.as_deref())?;
    let self_weight = section.self_weight_kn_per_m();
    let demand = DesignDemand::from_governing(&governing, span, self_weight);
    debug!(?demand, section = %section.name, "design demand");

    // === Capacity Checks ===
    let mut report = run_capacity_checks(
        &section,
        input.grade,
        &demand,
        input.unbraced_length_mm(),
        &input.stiffeners,
        &input.options,
    )?;

    // === Deflection ===
    let crane = heaviest_crane(&cranes)
        .ok_or_else(|| CalcError::invalid_input("cranes", "[]", "At least one crane is required"))?;
    let static_wheels = vec![crane.static_wheel_loads().0; crane.wheels_per_rail()];
    let deflection = check_deflection(&section, &static_wheels, span, crane.wheel_base_m(), input.options.crane_class)?;
    report.add_check(
        CheckResult::new(
            LimitState::Deflection,
            deflection.actual_mm,
            deflection.limit_mm,
            "mm",
            Equation::MovingLoadDeflection,
        )
        .with_detail(format!("L/{:.0}", deflection.limit_ratio)),
    );

    // === Equations Used ===
    let mut equations = EquationTracker::new();
    equations.record(Equation::CraneMaxReaction, "Rail reactions");
    equations.record(Equation::WheelLoadImpact, "Vertical impact");
    equations.record(Equation::LongitudinalForce, "Tractive force");
    equations.record(Equation::PointLoadReactions, "Moving-load search");
    equations.record(Equation::PointLoadMoment, governing.moment.label.clone());
    equations.record(Equation::PointLoadShear, governing.shear.label.clone());
    equations.record(Equation::UniformLoadMaxMoment, format!("Self-weight {:.2} kN/m", self_weight));
    if section.kind == SectionKind::BuiltUp {
        equations.record(Equation::ParallelAxis, "Plate girder inertia");
        equations.record(Equation::PlasticModulus, "Plastic neutral axis");
    }
    equations.record(Equation::TorsionalConstant, section.name.clone());
    equations.record(Equation::WarpingConstant, section.name.clone());
    equations.record(Equation::EffectiveRadiusRts, section.name.clone());
    equations.merge(std::mem::take(&mut report.equations));
    equations.record(Equation::MovingLoadDeflection, format!("Crane {}", crane.crane_id()));
    equations.record(Equation::DeflectionLimit, input.options.crane_class.to_string());
    report.equations = equations;

    if report.passes {
        info!(
            label = %input.label,
            governing = %report.governing.limit_state,
            ratio = report.governing.ratio,
            "runway girder passes"
        );
    } else {
        warn!(
            label = %input.label,
            governing = %report.governing.limit_state,
            ratio = report.governing.ratio,
            "runway girder fails"
        );
    }

    Ok(RunwayBeamResult {
        label: input.label.clone(),
        span_m: span,
        wheel_loads,
        load_cases,
        governing,
        section,
        grade: input.grade,
        self_weight_kn_per_m: self_weight,
        demand,
        deflection,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_crane(id: u32) -> CraneParams {
        CraneParams::new(id)
            .with_capacity(10.0)
            .with_self_weights(5.0, 0.72)
            .with_bridge(20.0, 1.0)
            .with_wheel_base(2.2)
            .with_wheels_per_rail(2)
    }

    fn plate_girder() -> SectionGeometry {
        SectionGeometry::symmetric(700.0, 300.0, 20.0, 10.0)
    }

    #[test]
    fn test_design_demand_adds_self_weight() {
        let crane = CraneWheelLoad::new(scenario_crane(1)).unwrap();
        let cases = find_critical_cases(8.0, &[crane], &SearchResolution::default()).unwrap();
        let governing = select_governing(&cases).unwrap();
        let demand = DesignDemand::from_governing(&governing, 8.0, 2.0);

        assert!((demand.moment_knm - demand.crane_moment_knm - 2.0 * 64.0 / 8.0).abs() < 1e-9);
        assert!((demand.shear_kn - governing.shear.shear_kn - 8.0).abs() < 1e-9);
        assert!((demand.reaction_kn - governing.reaction.max_reaction() - 8.0).abs() < 1e-9);
        assert!(demand.lateral_moment_knm > 0.0);
    }

    #[test]
    fn test_built_up_design_run() {
        let input = RunwayBeamInput::new("RB-1", 8.0)
            .with_crane(scenario_crane(1))
            .with_section(SectionSpec::BuiltUp(plate_girder()))
            .with_grade(SteelGrade::S355);
        let result = calculate(&input).unwrap();

        assert_eq!(result.wheel_loads.len(), 1);
        assert!(result.report.weld.is_some());
        assert!(result.report.check(LimitState::Weld).is_some());
        assert!(result.report.check(LimitState::Deflection).is_some());
        assert!(result.report.check(LimitState::BearingStiffener).is_none());

        let max_ratio = result.report.checks.iter().map(|c| c.ratio).fold(0.0, f64::max);
        assert_eq!(result.governing_ratio(), max_ratio);
        assert_eq!(result.passes(), result.report.checks.iter().all(|c| c.passes));
        assert!(!result.equations().unique_equations().is_empty());
    }

    #[test]
    fn test_rolled_design_has_no_weld_check() {
        let input = RunwayBeamInput::new("RB-2", 6.0)
            .with_crane(scenario_crane(1))
            .with_section(SectionSpec::rolled("HEB 500"));
        let result = calculate(&input).unwrap();
        assert_eq!(result.section.kind, SectionKind::Rolled);
        assert!(result.report.weld.is_none());
        assert!(result.report.check(LimitState::Weld).is_none());
    }

    #[test]
    fn test_stiffener_checks_reported() {
        let stiffeners = StiffenerConfig::default()
            .with_transverse(1000.0, 10.0, 100.0)
            .with_bearing(16.0, 120.0);
        let input = RunwayBeamInput::new("RB-3", 10.0)
            .with_crane(scenario_crane(1))
            .with_section(SectionSpec::BuiltUp(plate_girder()))
            .with_stiffeners(stiffeners);
        let result = calculate(&input).unwrap();
        assert!(result.report.check(LimitState::TransverseStiffener).is_some());
        assert!(result.report.check(LimitState::BearingStiffener).is_some());
        assert!(result.report.check(LimitState::LongitudinalStiffener).is_none());
    }

    #[test]
    fn test_cap_channel_increases_inertia() {
        let plain = RunwayBeamInput::new("RB-4", 6.0)
            .with_crane(scenario_crane(1))
            .with_section(SectionSpec::rolled("HEB 200"));
        let capped = plain.clone().with_cap_channel("UPN 300");
        let a = calculate(&plain).unwrap();
        let b = calculate(&capped).unwrap();
        assert!(b.section.ix_mm4 > a.section.ix_mm4);
        assert!(b.deflection.actual_mm < a.deflection.actual_mm);
    }

    #[test]
    fn test_unknown_shape() {
        let input = RunwayBeamInput::new("RB-5", 6.0)
            .with_crane(scenario_crane(1))
            .with_section(SectionSpec::rolled("W99X999"));
        assert_eq!(calculate(&input).unwrap_err().error_code(), "SHAPE_NOT_FOUND");
    }

    #[test]
    fn test_no_crane_fits() {
        let input = RunwayBeamInput::new("RB-6", 2.0)
            .with_crane(scenario_crane(1))
            .with_section(SectionSpec::BuiltUp(plate_girder()));
        assert_eq!(calculate(&input).unwrap_err().error_code(), "NO_VALID_LOAD_CASES");
    }

    #[test]
    fn test_invalid_inputs() {
        let no_cranes = RunwayBeamInput::new("RB-7", 6.0);
        assert!(calculate(&no_cranes).is_err());

        let bad_span = RunwayBeamInput::new("RB-8", -1.0).with_crane(scenario_crane(1));
        assert_eq!(calculate(&bad_span).unwrap_err().error_code(), "INVALID_INPUT");

        let zero_cycles = RunwayBeamInput::new("RB-9", 6.0)
            .with_crane(scenario_crane(1))
            .with_options(CheckOptions::default().with_design_cycles(0));
        assert!(calculate(&zero_cycles).is_err());
    }

    #[test]
    fn test_input_json_round_trip() {
        let json = r#"{
            "label": "Runway A",
            "span_m": 8.0,
            "cranes": [{ "crane_id": 1, "capacity_t": 10.0 }],
            "section": { "type": "Rolled", "designation": "HEB 500" },
            "grade": "S355",
            "options": { "crane_class": "D" }
        }"#;
        let input: RunwayBeamInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.section, SectionSpec::rolled("HEB 500"));
        assert_eq!(input.options.crane_class, CraneClass::D);
        assert!(input.options.tension_field);
        assert_eq!(input.resolution, SearchResolution::default());
        assert!(calculate(&input).is_ok());
    }
}
