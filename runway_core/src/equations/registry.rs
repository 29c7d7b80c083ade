//! # Equation Registry
//!
//! Central registry of the formulas applied in a runway girder design.
//! Each equation carries a code reference, a plain-text formula and variable
//! definitions so a design result can list exactly what was used.
//!
//! ## Usage
//!
//! ```rust
//! use runway_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::WebLocalYielding, "Wheel load, interior");
//!
//! let meta = Equation::WebLocalYielding.metadata();
//! assert_eq!(meta.reference.citation(), "AISC 360-16 Section J10.2");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a structural engineering code or standard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// Roark's Formulas for Stress and Strain
    Roarks {
        edition: u8,
        table: &'static str,
        case: &'static str,
    },
    /// AISC 360 - Specification for Structural Steel Buildings
    AISC360 {
        year: u16,
        section: &'static str,
    },
    /// AISC Design Guide (7: Industrial Buildings, 9: Torsional Analysis)
    AiscDesignGuide {
        number: u8,
        section: &'static str,
    },
    /// CMAA Specification 70 - Top Running Bridge and Gantry Cranes
    CMAA70 {
        year: u16,
        section: &'static str,
    },
    /// Fundamental mechanics (no specific code reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Roarks { edition, table, case } => {
                format!("Roark's {}ed, {}, Case {}", edition, table, case)
            }
            CodeReference::AISC360 { year, section } => {
                format!("AISC 360-{} Section {}", year % 100, section)
            }
            CodeReference::AiscDesignGuide { number, section } => {
                format!("AISC Design Guide {}, Section {}", number, section)
            }
            CodeReference::CMAA70 { year, section } => {
                format!("CMAA 70-{} Section {}", year % 100, section)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Roarks { .. } => "Roark's",
            CodeReference::AISC360 { .. } => "AISC 360",
            CodeReference::AiscDesignGuide { .. } => "AISC DG",
            CodeReference::CMAA70 { .. } => "CMAA 70",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

/// AISC 360-16 section reference
const fn aisc(section: &'static str) -> CodeReference {
    CodeReference::AISC360 { year: 2016, section }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Crane wheel loads and impact
    CraneLoads,
    /// Reactions and internal forces from moving loads
    InternalForces,
    /// Section properties (I, S, Z, J, Cw)
    SectionProperties,
    /// Width-to-thickness classification
    Classification,
    /// Flexural strength and LTB
    Flexure,
    /// Shear strength and tension field action
    Shear,
    /// Concentrated forces on the web
    ConcentratedForces,
    /// Transverse, bearing and longitudinal stiffeners
    Stiffeners,
    /// Flange-to-web welds
    Welds,
    /// Fatigue stress range
    Fatigue,
    /// Deflection and serviceability
    Serviceability,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::CraneLoads => "Crane Loads",
            EquationCategory::InternalForces => "Internal Forces",
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::Classification => "Section Classification",
            EquationCategory::Flexure => "Flexure",
            EquationCategory::Shear => "Shear",
            EquationCategory::ConcentratedForces => "Concentrated Forces",
            EquationCategory::Stiffeners => "Stiffeners",
            EquationCategory::Welds => "Welds",
            EquationCategory::Fatigue => "Fatigue",
            EquationCategory::Serviceability => "Serviceability",
        }
    }

    /// Sort order in a report (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::CraneLoads => 1,
            EquationCategory::InternalForces => 2,
            EquationCategory::SectionProperties => 3,
            EquationCategory::Classification => 4,
            EquationCategory::Flexure => 5,
            EquationCategory::Shear => 6,
            EquationCategory::ConcentratedForces => 7,
            EquationCategory::Stiffeners => 8,
            EquationCategory::Welds => 9,
            EquationCategory::Fatigue => 10,
            EquationCategory::Serviceability => 11,
        }
    }

    /// All categories in report order
    pub fn all() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            CraneLoads,
            InternalForces,
            SectionProperties,
            Classification,
            Flexure,
            Shear,
            ConcentratedForces,
            Stiffeners,
            Welds,
            Fatigue,
            Serviceability,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "M", "L", "h/tw")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units (e.g., "kN", "mm", "MPa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every equation applied in a runway girder design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Crane loads
    // -------------------------------------------------------------------------
    /// R_max = P_bridge/2 + P_moving(S - e)/S
    CraneMaxReaction,
    /// P_v = P_wheel(1 + i_v)
    WheelLoadImpact,
    /// H = i_h(P_lift + P_trolley)/(2n)
    LateralThrust,
    /// P_L = i_l·R_max
    LongitudinalForce,

    // -------------------------------------------------------------------------
    // Internal forces
    // -------------------------------------------------------------------------
    /// R2 = ΣPa/L, R1 = ΣP - R2
    PointLoadReactions,
    /// M(x) = R1·x - ΣP(x - a)
    PointLoadMoment,
    /// V(x) = R1 - ΣP
    PointLoadShear,
    /// M = wL²/8 for self-weight
    UniformLoadMaxMoment,

    // -------------------------------------------------------------------------
    // Section properties
    // -------------------------------------------------------------------------
    /// I = Σ(I_own + A·d²)
    ParallelAxis,
    /// Z from the plastic neutral axis
    PlasticModulus,
    /// J = Σbt³/3
    TorsionalConstant,
    /// Cw = ho²·Iyc·Iyt/(Iyc + Iyt)
    WarpingConstant,
    /// rts² = √(Iy·Cw)/Sx
    EffectiveRadiusRts,

    // -------------------------------------------------------------------------
    // Classification
    // -------------------------------------------------------------------------
    /// λp = 0.38√(E/Fy), λr = 1.0√(E/Fy) or 0.95√(kc·E/FL)
    FlangeSlendernessLimits,
    /// λp = 3.76√(E/Fy), λr = 5.70√(E/Fy)
    WebSlendernessLimits,

    // -------------------------------------------------------------------------
    // Flexure
    // -------------------------------------------------------------------------
    /// Mp = Fy·Zx
    PlasticMoment,
    /// Lp = 1.76·ry·√(E/Fy)
    LimitingLengthLp,
    /// Lr = 1.95·rts(E/0.7Fy)·√(Jc/Sxho + √(...))
    LimitingLengthLr,
    /// Mn = Mp - (Mp - 0.7FySx)(Lb - Lp)/(Lr - Lp)
    InelasticLtb,
    /// Fcr = π²E/(Lb/rts)²·√(1 + 0.078·Jc/(Sxho)(Lb/rts)²)
    ElasticLtbStress,
    /// Mn = Mp - (Mp - 0.7FySx)(λ - λpf)/(λrf - λpf)
    FlangeLocalBuckling,
    /// Rpg = 1 - aw/(1200 + 300aw)(hc/tw - 5.7√(E/Fy))
    BendingStrengthReduction,
    /// Mn = Rpg·Fcr·Sxc
    PlateGirderFlexure,
    /// Mn = Fy·Sxt
    TensionFlangeYielding,
    /// Mn,y = Fy·Zy,top
    TopFlangeLateralBending,
    /// h/tw and bf/2tf proportion limits
    ProportionLimits,

    // -------------------------------------------------------------------------
    // Shear
    // -------------------------------------------------------------------------
    /// kv = 5 + 5/(a/h)²
    ShearBucklingCoefficient,
    /// Cv1 piecewise in h/tw
    WebShearCoefficient,
    /// Vn = 0.6·Fy·Aw·Cv1
    NominalShear,
    /// Vn = 0.6FyAw(Cv2 + (1 - Cv2)/(1.15√(1 + (a/h)²)))
    TensionFieldShear,

    // -------------------------------------------------------------------------
    // Concentrated forces
    // -------------------------------------------------------------------------
    /// Rn = Fy·tw(5k + lb)
    WebLocalYielding,
    /// Rn = 0.80tw²(1 + 3(lb/d)(tw/tf)^1.5)√(E·Fy·tf/tw)
    WebCrippling,

    // -------------------------------------------------------------------------
    // Stiffeners
    // -------------------------------------------------------------------------
    /// Ist1 = b·tw³·j
    TransverseStiffenerInertia,
    /// Fcr from the E3 column curve
    BearingStiffenerColumn,
    /// Rn = 1.8·Fy·Apb
    StiffenerBearing,
    /// I_req = 2.4·h·tw³
    LongitudinalStiffenerInertia,

    // -------------------------------------------------------------------------
    // Welds
    // -------------------------------------------------------------------------
    /// q = V·Q/I
    ShearFlow,
    /// Rn = 0.6·FEXX·0.707w per weld
    FilletWeldStrength,

    // -------------------------------------------------------------------------
    // Fatigue and serviceability
    // -------------------------------------------------------------------------
    /// FSR = max((Cf/N)^(1/3), FTH)
    FatigueStressRange,
    /// δ = Σ point load deflections at midspan
    MovingLoadDeflection,
    /// δ_allow = L/n
    DeflectionLimit,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::CraneMaxReaction => EquationMetadata {
                name: "Maximum Rail Reaction",
                description: "Rail reaction with the trolley at minimum hook approach to the near rail",
                formula: "R_max = P_bridge/2 + (P_lift + P_trolley)(S - e_min)/S",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("P_bridge", "Bridge self-weight", "kN"),
                    Variable::new("S", "Bridge span", "m"),
                    Variable::new("e_min", "Minimum hook approach", "m"),
                ],
                assumptions: vec!["Bridge weight shared equally by both rails"],
                category: EquationCategory::CraneLoads,
                source_module: "loads/crane.rs",
                source_function: "rail_reactions",
            },
            Equation::WheelLoadImpact => EquationMetadata {
                name: "Vertical Impact",
                description: "Maximum wheel load amplified for vertical impact",
                formula: "P_v = P_max(1 + i_v)",
                reference: CodeReference::AiscDesignGuide { number: 7, section: "18.3" },
                variables: vec![
                    Variable::new("P_max", "Maximum static wheel load", "kN"),
                    Variable::new("i_v", "Vertical impact factor", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::CraneLoads,
                source_module: "loads/crane.rs",
                source_function: "wheel_load_with_impact",
            },
            Equation::LateralThrust => EquationMetadata {
                name: "Lateral Thrust per Wheel",
                description: "Lateral crane force shared by all wheels of both rails",
                formula: "H = i_h(P_lift + P_trolley)/(2n)",
                reference: CodeReference::AiscDesignGuide { number: 7, section: "18.3" },
                variables: vec![
                    Variable::new("i_h", "Horizontal impact factor", "-"),
                    Variable::new("n", "Wheels per rail", "-"),
                ],
                assumptions: vec!["Applied at the top flange"],
                category: EquationCategory::CraneLoads,
                source_module: "loads/crane.rs",
                source_function: "lateral_per_wheel",
            },
            Equation::LongitudinalForce => EquationMetadata {
                name: "Longitudinal Tractive Force",
                description: "Longitudinal force along the rail from crane braking",
                formula: "P_L = i_l·R_max",
                reference: CodeReference::AiscDesignGuide { number: 7, section: "18.3" },
                variables: vec![Variable::new("i_l", "Longitudinal impact factor", "-")],
                assumptions: vec![],
                category: EquationCategory::CraneLoads,
                source_module: "loads/crane.rs",
                source_function: "longitudinal_force",
            },
            Equation::PointLoadReactions => EquationMetadata {
                name: "Point Load Reactions",
                description: "Support reactions of a simple span under travelling wheels",
                formula: "R2 = ΣP·a/L, R1 = ΣP - R2",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "1a" },
                variables: vec![
                    Variable::new("P", "Wheel load", "kN"),
                    Variable::new("a", "Wheel position from left support", "m"),
                    Variable::new("L", "Girder span", "m"),
                ],
                assumptions: vec!["Simply-supported (pin-roller)"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "point_loads_reactions",
            },
            Equation::PointLoadMoment => EquationMetadata {
                name: "Moving Load Moment",
                description: "Bending moment from the left free body",
                formula: "M(x) = R1·x - ΣP(x - a) for a < x",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "1a" },
                variables: vec![Variable::new("x", "Section position", "m")],
                assumptions: vec!["Positive moment: tension on bottom"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "point_loads_moment",
            },
            Equation::PointLoadShear => EquationMetadata {
                name: "Moving Load Shear",
                description: "Shear force from the left free body, both sides of each wheel",
                formula: "V(x) = R1 - ΣP for a < x",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "1a" },
                variables: vec![Variable::new("x", "Section position", "m")],
                assumptions: vec!["Positive shear: left side up"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "point_loads_shear_left",
            },
            Equation::UniformLoadMaxMoment => EquationMetadata {
                name: "Self-Weight Moment",
                description: "Midspan moment of the girder self-weight",
                formula: "M = wL^2/8",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "2e" },
                variables: vec![Variable::new("w", "Self-weight", "kN/m")],
                assumptions: vec!["Added to the crane moment regardless of location"],
                category: EquationCategory::InternalForces,
                source_module: "equations/beam.rs",
                source_function: "uniform_load_max_moment",
            },
            Equation::ParallelAxis => EquationMetadata {
                name: "Parallel Axis Theorem",
                description: "Major-axis inertia assembled from plates",
                formula: "Ix = Σ(I_own + A·d^2)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A", "Plate area", "mm²"),
                    Variable::new("d", "Plate centroid to neutral axis", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "parallel_axis",
            },
            Equation::PlasticModulus => EquationMetadata {
                name: "Plastic Section Modulus",
                description: "First moment of area about the equal-area axis",
                formula: "Zx = ΣA·|y - y_pna|",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("y_pna", "Plastic neutral axis", "mm")],
                assumptions: vec!["Cap channel lumped at its centroid"],
                category: EquationCategory::SectionProperties,
                source_module: "calculations/section.rs",
                source_function: "plastic_modulus",
            },
            Equation::TorsionalConstant => EquationMetadata {
                name: "Torsional Constant",
                description: "St. Venant constant of thin open plates",
                formula: "J = Σb·t^3/3",
                reference: CodeReference::AiscDesignGuide { number: 9, section: "3.1" },
                variables: vec![Variable::new("t", "Plate thickness", "mm")],
                assumptions: vec!["Thin-walled open section"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "thin_plate_torsion_constant",
            },
            Equation::WarpingConstant => EquationMetadata {
                name: "Warping Constant",
                description: "Warping constant of a singly-symmetric I-section",
                formula: "Cw = ho^2·Iyc·Iyt/(Iyc + Iyt)",
                reference: CodeReference::AiscDesignGuide { number: 9, section: "3.2" },
                variables: vec![Variable::new("ho", "Distance between flange centroids", "mm")],
                assumptions: vec![],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "warping_constant",
            },
            Equation::EffectiveRadiusRts => EquationMetadata {
                name: "Effective Radius of Gyration",
                description: "Radius used for lateral-torsional buckling",
                formula: "rts^2 = sqrt(Iy·Cw)/Sx",
                reference: aisc("F2 (F2-7)"),
                variables: vec![Variable::new("rts", "Effective radius of gyration", "mm")],
                assumptions: vec![],
                category: EquationCategory::SectionProperties,
                source_module: "calculations/section.rs",
                source_function: "build_section",
            },
            Equation::FlangeSlendernessLimits => EquationMetadata {
                name: "Flange Slenderness Limits",
                description: "Compact and noncompact limits for compression flanges",
                formula: "λp = 0.38√(E/Fy); λr = 1.0√(E/Fy) rolled, 0.95√(kc·E/0.7Fy) built-up",
                reference: aisc("B4.1b, Table B4.1b Cases 10-11"),
                variables: vec![
                    Variable::new("bf/2tf", "Flange slenderness", "-"),
                    Variable::new("kc", "4/√(h/tw), 0.35 ≤ kc ≤ 0.76", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::Classification,
                source_module: "calculations/classification.rs",
                source_function: "classify_flange",
            },
            Equation::WebSlendernessLimits => EquationMetadata {
                name: "Web Slenderness Limits",
                description: "Compact and noncompact limits for webs in flexure",
                formula: "λp = 3.76√(E/Fy); λr = 5.70√(E/Fy)",
                reference: aisc("B4.1b, Table B4.1b Case 15"),
                variables: vec![Variable::new("h/tw", "Web slenderness", "-")],
                assumptions: vec![],
                category: EquationCategory::Classification,
                source_module: "calculations/classification.rs",
                source_function: "classify_web",
            },
            Equation::PlasticMoment => EquationMetadata {
                name: "Plastic Moment",
                description: "Yielding limit state",
                formula: "Mp = Fy·Zx",
                reference: aisc("F2.1 (F2-1)"),
                variables: vec![Variable::new("Zx", "Plastic section modulus", "mm³")],
                assumptions: vec![],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "standard_flexure",
            },
            Equation::LimitingLengthLp => EquationMetadata {
                name: "Limiting Length Lp",
                description: "Unbraced length below which LTB does not apply",
                formula: "Lp = 1.76·ry·√(E/Fy)",
                reference: aisc("F2.2 (F2-5)"),
                variables: vec![Variable::new("ry", "Minor-axis radius of gyration", "mm")],
                assumptions: vec![],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "limiting_lengths",
            },
            Equation::LimitingLengthLr => EquationMetadata {
                name: "Limiting Length Lr",
                description: "Unbraced length separating inelastic and elastic LTB",
                formula: "Lr = 1.95·rts·E/(0.7Fy)·√(Jc/(Sx·ho) + √((Jc/(Sx·ho))^2 + 6.76(0.7Fy/E)^2))",
                reference: aisc("F2.2 (F2-6)"),
                variables: vec![Variable::new("c", "1.0 for doubly-symmetric I-shapes", "-")],
                assumptions: vec![],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "limiting_lengths",
            },
            Equation::InelasticLtb => EquationMetadata {
                name: "Inelastic LTB",
                description: "Linear interpolation between Mp and 0.7FySx",
                formula: "Mn = Cb[Mp - (Mp - 0.7Fy·Sx)(Lb - Lp)/(Lr - Lp)] ≤ Mp",
                reference: aisc("F2.2 (F2-2)"),
                variables: vec![Variable::new("Lb", "Unbraced length", "mm")],
                assumptions: vec!["Cb = 1.0"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "standard_flexure",
            },
            Equation::ElasticLtbStress => EquationMetadata {
                name: "Elastic LTB Stress",
                description: "Critical stress for elastic lateral-torsional buckling",
                formula: "Fcr = Cb·π^2·E/(Lb/rts)^2·√(1 + 0.078·Jc/(Sx·ho)·(Lb/rts)^2)",
                reference: aisc("F2.2 (F2-4)"),
                variables: vec![Variable::new("rts", "Effective radius of gyration", "mm")],
                assumptions: vec!["Cb = 1.0"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "standard_flexure",
            },
            Equation::FlangeLocalBuckling => EquationMetadata {
                name: "Compression Flange Local Buckling",
                description: "Reduction for noncompact or slender compression flanges",
                formula: "Mn = Mp - (Mp - 0.7Fy·Sx)(λ - λpf)/(λrf - λpf); slender: 0.9E·kc·Sx/λ^2",
                reference: aisc("F3.2 (F3-1, F3-2), F5.3"),
                variables: vec![Variable::new("λ", "bf/2tf", "-")],
                assumptions: vec![],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "flange_local_buckling",
            },
            Equation::BendingStrengthReduction => EquationMetadata {
                name: "Bending Strength Reduction Factor",
                description: "Reduction for slender-web plate girders",
                formula: "Rpg = 1 - aw/(1200 + 300aw)·(hc/tw - 5.7√(E/Fy)) ≤ 1.0",
                reference: aisc("F5.2 (F5-6)"),
                variables: vec![
                    Variable::new("aw", "hc·tw/(bfc·tfc) ≤ 10", "-"),
                    Variable::new("hc", "Twice the elastic centroid to compression flange distance", "mm"),
                ],
                assumptions: vec!["Clamped to 0.5 ≤ Rpg ≤ 1.0"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "rpg_factor",
            },
            Equation::PlateGirderFlexure => EquationMetadata {
                name: "Plate Girder Flexure",
                description: "Compression flange yielding and LTB for singly-symmetric girders",
                formula: "Mn = Rpg·Fcr·Sxc",
                reference: aisc("F4, F5 (F5-1, F5-2)"),
                variables: vec![Variable::new("Sxc", "Elastic modulus to compression flange", "mm³")],
                assumptions: vec![],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "plate_girder_flexure",
            },
            Equation::TensionFlangeYielding => EquationMetadata {
                name: "Tension Flange Yielding",
                description: "Applies when Sxt < Sxc",
                formula: "Mn = Fy·Sxt",
                reference: aisc("F5.4 (F5-10)"),
                variables: vec![Variable::new("Sxt", "Elastic modulus to tension flange", "mm³")],
                assumptions: vec![],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "plate_girder_flexure",
            },
            Equation::TopFlangeLateralBending => EquationMetadata {
                name: "Top Flange Lateral Bending",
                description: "Lateral crane thrust resisted by the top flange alone",
                formula: "Mn,y = Fy·tf·bf^2/4; fb/Fb + fby/Fby ≤ 1.0",
                reference: CodeReference::AiscDesignGuide { number: 7, section: "18.5" },
                variables: vec![Variable::new("M_lat", "Lateral moment", "kN·m")],
                assumptions: vec!["Lateral loads placed at the governing moment wheel positions"],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "lateral_bending",
            },
            Equation::ProportionLimits => EquationMetadata {
                name: "Plate Girder Proportions",
                description: "Limits on web and flange slenderness",
                formula: "h/tw ≤ 260 unstiffened, ≤ min(11.7√(E/Fy), 270) stiffened; bf/2tf ≤ 1.0√(E/Fy)",
                reference: aisc("F13.2"),
                variables: vec![Variable::new("a/h", "Stiffener aspect ratio", "-")],
                assumptions: vec![],
                category: EquationCategory::Flexure,
                source_module: "calculations/flexure.rs",
                source_function: "proportion_limits",
            },
            Equation::ShearBucklingCoefficient => EquationMetadata {
                name: "Web Plate Buckling Coefficient",
                description: "Buckling coefficient for web panels",
                formula: "kv = 5.34 unstiffened or a/h > 3; kv = 5 + 5/(a/h)^2",
                reference: aisc("G2.1 (G2-5)"),
                variables: vec![Variable::new("a", "Clear stiffener spacing", "mm")],
                assumptions: vec![],
                category: EquationCategory::Shear,
                source_module: "calculations/shear.rs",
                source_function: "shear_buckling_coefficient",
            },
            Equation::WebShearCoefficient => EquationMetadata {
                name: "Web Shear Strength Coefficient",
                description: "Cv1 for shear buckling or yielding of the web",
                formula: "Cv1 = 1.0 for h/tw ≤ 1.10√(kvE/Fy); 1.10√(kvE/Fy)/(h/tw) for h/tw ≤ 1.37√(kvE/Fy); 1.51·kv·E/((h/tw)²·Fy) otherwise",
                reference: aisc("G2.1 (G2-3, G2-4)"),
                variables: vec![Variable::new("kv", "Buckling coefficient", "-")],
                assumptions: vec![],
                category: EquationCategory::Shear,
                source_module: "calculations/shear.rs",
                source_function: "web_shear_coefficients",
            },
            Equation::NominalShear => EquationMetadata {
                name: "Nominal Shear Strength",
                description: "Shear strength without tension field action",
                formula: "Vn = 0.6·Fy·Aw·Cv1",
                reference: aisc("G2.1 (G2-1)"),
                variables: vec![Variable::new("Aw", "h·tw, clear web area", "mm²")],
                assumptions: vec![],
                category: EquationCategory::Shear,
                source_module: "calculations/shear.rs",
                source_function: "shear_strength",
            },
            Equation::TensionFieldShear => EquationMetadata {
                name: "Tension Field Action",
                description: "Post-buckling shear strength of stiffened interior panels",
                formula: "Vn = 0.6·Fy·Aw·(Cv2 + (1 - Cv2)/(1.15√(1 + (a/h)^2)))",
                reference: aisc("G3.2 (G3-2)"),
                variables: vec![Variable::new("Cv2", "Web shear buckling coefficient", "-")],
                assumptions: vec!["a/h ≤ 3 and a/h ≤ (260/(h/tw))^2", "Not an end panel"],
                category: EquationCategory::Shear,
                source_module: "calculations/shear.rs",
                source_function: "shear_strength",
            },
            Equation::WebLocalYielding => EquationMetadata {
                name: "Web Local Yielding",
                description: "Wheel load bearing through the top flange",
                formula: "Rn = Fy·tw·(5k + lb)",
                reference: aisc("J10.2"),
                variables: vec![
                    Variable::new("k", "Flange face to web toe of fillet", "mm"),
                    Variable::new("lb", "Bearing length", "mm"),
                ],
                assumptions: vec!["Interior load"],
                category: EquationCategory::ConcentratedForces,
                source_module: "calculations/web_local.rs",
                source_function: "web_local_yielding",
            },
            Equation::WebCrippling => EquationMetadata {
                name: "Web Crippling",
                description: "Crushing of the web under a concentrated load",
                formula: "Rn = 0.80·tw^2·(1 + 3(lb/d)(tw/tf)^1.5)·√(E·Fy·tf/tw)",
                reference: aisc("J10.3 (J10-4)"),
                variables: vec![Variable::new("tf", "Loaded flange thickness", "mm")],
                assumptions: vec!["Interior load"],
                category: EquationCategory::ConcentratedForces,
                source_module: "calculations/web_local.rs",
                source_function: "web_crippling",
            },
            Equation::TransverseStiffenerInertia => EquationMetadata {
                name: "Transverse Stiffener Inertia",
                description: "Minimum stiffener moment of inertia about the web face",
                formula: "Ist1 = b·tw^3·j, j = max(2.5/(a/h)^2 - 2, 0.5); Ist2 = h^4·ρst^1.3/40·(Fy/E)^1.5",
                reference: aisc("G2.3 (G2-8), G3.3 (G3-4)"),
                variables: vec![Variable::new("b", "Smaller of a and h", "mm")],
                assumptions: vec!["Ist2 applies only when tension field action governs"],
                category: EquationCategory::Stiffeners,
                source_module: "calculations/stiffeners.rs",
                source_function: "check_transverse",
            },
            Equation::BearingStiffenerColumn => EquationMetadata {
                name: "Bearing Stiffener Column",
                description: "Stiffener pair plus web strip as a compression member",
                formula: "Fcr = 0.658^(Fy/Fe)·Fy for KL/r ≤ 4.71√(E/Fy), else 0.877Fe",
                reference: aisc("J10.8, E3"),
                variables: vec![Variable::new("KL", "0.75h", "mm")],
                assumptions: vec!["Web strip 25tw at ends, 24tw interior"],
                category: EquationCategory::Stiffeners,
                source_module: "calculations/stiffeners.rs",
                source_function: "check_bearing",
            },
            Equation::StiffenerBearing => EquationMetadata {
                name: "Stiffener Bearing",
                description: "Bearing on the contact area after corner clips",
                formula: "Rn = 1.8·Fy·Apb",
                reference: aisc("J7 (J7-1)"),
                variables: vec![Variable::new("Apb", "Net contact area", "mm²")],
                assumptions: vec![],
                category: EquationCategory::Stiffeners,
                source_module: "calculations/stiffeners.rs",
                source_function: "check_bearing",
            },
            Equation::LongitudinalStiffenerInertia => EquationMetadata {
                name: "Longitudinal Stiffener Inertia",
                description: "Simplified stiffness floor for a longitudinal web stiffener",
                formula: "I_provided ≥ 0.5·(2.4·h·tw^3)",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("h", "Clear web height", "mm")],
                assumptions: vec!["Placed 0.1h to 0.4h from the compression flange"],
                category: EquationCategory::Stiffeners,
                source_module: "calculations/stiffeners.rs",
                source_function: "check_longitudinal",
            },
            Equation::ShearFlow => EquationMetadata {
                name: "Flange-to-Web Shear Flow",
                description: "Horizontal shear transferred by the top flange welds",
                formula: "q = V·Q/Ix",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("Q", "First moment of the top flange", "mm³")],
                assumptions: vec![],
                category: EquationCategory::Welds,
                source_module: "calculations/weld.rs",
                source_function: "design_weld",
            },
            Equation::FilletWeldStrength => EquationMetadata {
                name: "Fillet Weld Strength",
                description: "Shear strength of the effective throat",
                formula: "Rn = 0.6·FEXX·0.707·w per weld",
                reference: aisc("J2.4 (J2-3), Table J2.4"),
                variables: vec![Variable::new("w", "Leg size", "mm")],
                assumptions: vec!["Two welds share the shear flow"],
                category: EquationCategory::Welds,
                source_module: "calculations/weld.rs",
                source_function: "design_weld",
            },
            Equation::FatigueStressRange => EquationMetadata {
                name: "Allowable Fatigue Stress Range",
                description: "Cycle-dependent allowable stress range with threshold floor",
                formula: "FSR = max((Cf/N)^(1/3), FTH)",
                reference: aisc("Appendix 3 (A-3-1)"),
                variables: vec![
                    Variable::new("Cf", "Category constant", "MPa³"),
                    Variable::new("N", "Design cycles", "-"),
                ],
                assumptions: vec!["Stress range from crane-only moment"],
                category: EquationCategory::Fatigue,
                source_module: "calculations/fatigue.rs",
                source_function: "check_fatigue",
            },
            Equation::MovingLoadDeflection => EquationMetadata {
                name: "Moving Load Deflection",
                description: "Midspan deflection with the wheel resultant positioned at midspan",
                formula: "δ = Σ P·b·x(L^2 - b^2 - x^2)/(6EIL)",
                reference: CodeReference::Roarks { edition: 8, table: "Table 8.1", case: "1e" },
                variables: vec![Variable::new("Ix", "Major-axis inertia", "mm⁴")],
                assumptions: vec!["Static wheel loads without impact"],
                category: EquationCategory::Serviceability,
                source_module: "calculations/deflection.rs",
                source_function: "estimate_deflection",
            },
            Equation::DeflectionLimit => EquationMetadata {
                name: "Deflection Limit",
                description: "Crane service class deflection limit",
                formula: "δ_allow = L/n",
                reference: CodeReference::CMAA70 { year: 2015, section: "1.4.4" },
                variables: vec![Variable::new("n", "600, 800 or 1000 by class", "-")],
                assumptions: vec![],
                category: EquationCategory::Serviceability,
                source_module: "loads/crane.rs",
                source_function: "deflection_limit_ratio",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }
}

/// All equations in the registry
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::CraneMaxReaction,
    Equation::WheelLoadImpact,
    Equation::LateralThrust,
    Equation::LongitudinalForce,
    Equation::PointLoadReactions,
    Equation::PointLoadMoment,
    Equation::PointLoadShear,
    Equation::UniformLoadMaxMoment,
    Equation::ParallelAxis,
    Equation::PlasticModulus,
    Equation::TorsionalConstant,
    Equation::WarpingConstant,
    Equation::EffectiveRadiusRts,
    Equation::FlangeSlendernessLimits,
    Equation::WebSlendernessLimits,
    Equation::PlasticMoment,
    Equation::LimitingLengthLp,
    Equation::LimitingLengthLr,
    Equation::InelasticLtb,
    Equation::ElasticLtbStress,
    Equation::FlangeLocalBuckling,
    Equation::BendingStrengthReduction,
    Equation::PlateGirderFlexure,
    Equation::TensionFlangeYielding,
    Equation::TopFlangeLateralBending,
    Equation::ProportionLimits,
    Equation::ShearBucklingCoefficient,
    Equation::WebShearCoefficient,
    Equation::NominalShear,
    Equation::TensionFieldShear,
    Equation::WebLocalYielding,
    Equation::WebCrippling,
    Equation::TransverseStiffenerInertia,
    Equation::BearingStiffenerColumn,
    Equation::StiffenerBearing,
    Equation::LongitudinalStiffenerInertia,
    Equation::ShearFlow,
    Equation::FilletWeldStrength,
    Equation::FatigueStressRange,
    Equation::MovingLoadDeflection,
    Equation::DeflectionLimit,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where or why it was used (e.g., "Support reaction, crane 2 leading")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a design run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, in report order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let unique = self.unique_equations();
        let mut by_cat: std::collections::HashMap<EquationCategory, Vec<Equation>> =
            std::collections::HashMap::new();

        for eq in unique {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }
}

// ============================================================================
// Markdown Reference
// ============================================================================

/// Render a markdown reference of the given equations, grouped by category.
///
/// ```rust
/// use runway_core::equations::registry::{equations_markdown, ALL_EQUATIONS};
///
/// let markdown = equations_markdown(ALL_EQUATIONS);
/// assert!(markdown.contains("## Shear"));
/// assert!(markdown.contains("Vn = 0.6·Fy·Aw·Cv1"));
/// ```
pub fn equations_markdown(equations: &[Equation]) -> String {
    let mut output = String::with_capacity(16_000);
    output.push_str("# Runway Girder Equations\n\n");

    for category in EquationCategory::all() {
        let in_category: Vec<_> = equations
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .collect();
        if in_category.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));
        for equation in in_category {
            let meta = equation.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** `{}` in `{}`\n\n",
                meta.source_function, meta.source_module
            ));

            for assumption in &meta.assumptions {
                output.push_str(&format!("- {}\n", assumption));
            }
            if !meta.assumptions.is_empty() {
                output.push('\n');
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 41);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} has no source", eq);
        }

        assert!(Equation::NominalShear.metadata().formula.contains("0.6·Fy·Aw"));
        assert!(Equation::WebSlendernessLimits.metadata().formula.contains("5.70"));
    }

    #[test]
    fn test_code_reference_citation() {
        let aisc = CodeReference::AISC360 { year: 2016, section: "G2.1" };
        assert_eq!(aisc.citation(), "AISC 360-16 Section G2.1");
        assert_eq!(aisc.short_form(), "AISC 360");

        let cmaa = CodeReference::CMAA70 { year: 2015, section: "1.4.4" };
        assert_eq!(cmaa.citation(), "CMAA 70-15 Section 1.4.4");
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in EquationCategory::all() {
            assert!(
                !Equation::in_category(category).is_empty(),
                "{} has no equations",
                category.display_name()
            );
        }
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::NominalShear, "Support");
        tracker.record(Equation::WebCrippling, "Wheel");
        tracker.record(Equation::NominalShear, "Stiffened panel");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(tracker.unique_equations(), vec![Equation::NominalShear, Equation::WebCrippling]);

        let by_cat = tracker.by_category();
        assert_eq!(by_cat.len(), 2);
        assert_eq!(by_cat[0].0, EquationCategory::Shear);
        assert_eq!(by_cat[1].0, EquationCategory::ConcentratedForces);
    }

    #[test]
    fn test_merge() {
        let mut a = EquationTracker::new();
        a.record(Equation::PlasticMoment, "Flexure");
        let mut b = EquationTracker::new();
        b.record(Equation::FatigueStressRange, "Fatigue");
        a.merge(b);
        assert_eq!(a.usages().len(), 2);
    }

    #[test]
    fn test_markdown_skips_empty_categories() {
        let markdown = equations_markdown(&[Equation::FatigueStressRange]);
        assert!(markdown.contains("## Fatigue"));
        assert!(!markdown.contains("## Shear"));
        assert!(markdown.contains("AISC 360-16 Section Appendix 3 (A-3-1)"));
    }
}
