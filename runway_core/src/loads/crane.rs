//! # Crane Wheel Loads
//!
//! Derives runway wheel loads from crane data. Two modes are supported:
//!
//! - **Geometry**: the bridge self-weight is shared equally by both runways,
//!   and the trolley plus lifted load is a moving point load on the bridge.
//!   The near rail sees the maximum reaction when the hook is at its minimum
//!   approach to that rail.
//! - **Manufacturer**: static wheel loads supplied by the crane vendor are
//!   used as-is when the supplied maximum is positive.
//!
//! ```text
//!          P_lift + P_trolley
//!                 ↓
//!   ══╤═══════════╧════════════════╤══   bridge
//!     △ ←e_min→                    △
//!   R_max                         R_min
//!     ←──────── bridge span ──────→
//! ```
//!
//! All forces are in kN, lengths in metres and masses in tonnes.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KiloNewtons, Tonnes};

/// Fraction of the maximum wheel load used when a vendor gives no minimum
const DEFAULT_MIN_WHEEL_FRACTION: f64 = 0.2;

// ============================================================================
// Crane Service Class
// ============================================================================

/// CMAA 70 crane service class.
///
/// Drives the design cycle count for fatigue and the vertical deflection limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CraneClass {
    /// Standby or infrequent service
    A,
    /// Light service
    B,
    /// Moderate service
    #[default]
    C,
    /// Heavy service
    D,
    /// Severe service
    E,
    /// Continuous severe service
    F,
}

impl CraneClass {
    /// All classes for iteration
    pub const ALL: [CraneClass; 6] = [
        CraneClass::A,
        CraneClass::B,
        CraneClass::C,
        CraneClass::D,
        CraneClass::E,
        CraneClass::F,
    ];

    /// Service name
    pub fn name(&self) -> &'static str {
        match self {
            CraneClass::A => "Standby",
            CraneClass::B => "Light",
            CraneClass::C => "Moderate",
            CraneClass::D => "Heavy",
            CraneClass::E => "Severe",
            CraneClass::F => "Continuous",
        }
    }

    /// Upper bound of the class cycle range, used as the fatigue design life
    pub fn design_cycles(&self) -> u64 {
        match self {
            CraneClass::A => 100_000,
            CraneClass::B => 500_000,
            CraneClass::C => 2_000_000,
            CraneClass::D => 10_000_000,
            CraneClass::E => 20_000_000,
            CraneClass::F => 50_000_000,
        }
    }

    /// Vertical deflection limit as span/n
    pub fn deflection_limit_ratio(&self) -> f64 {
        match self {
            CraneClass::A | CraneClass::B | CraneClass::C => 600.0,
            CraneClass::D => 800.0,
            CraneClass::E | CraneClass::F => 1000.0,
        }
    }
}

impl std::fmt::Display for CraneClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Class {:?} ({})", self, self.name())
    }
}

// ============================================================================
// Crane Parameters
// ============================================================================

/// Static wheel loads published by the crane manufacturer (kN).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerWheelLoads {
    /// Maximum static wheel load (kN)
    pub max_static_kn: f64,

    /// Minimum static wheel load (kN); 20% of the maximum when absent
    #[serde(default)]
    pub min_static_kn: Option<f64>,

    /// Lateral load per wheel (kN); derived from the horizontal impact factor when absent
    #[serde(default)]
    pub lateral_kn: Option<f64>,
}

/// Input data for one overhead travelling crane.
///
/// ## JSON Example
///
/// ```json
/// {
///   "crane_id": 1,
///   "capacity_t": 10.0,
///   "bridge_weight_t": 5.0,
///   "trolley_weight_t": 0.72,
///   "bridge_span_m": 15.0,
///   "min_hook_approach_m": 1.0,
///   "wheel_base_m": 2.2,
///   "buffer_left_m": 0.29,
///   "buffer_right_m": 0.29,
///   "wheels_per_rail": 2,
///   "vertical_impact": 0.25,
///   "horizontal_impact": 0.20,
///   "longitudinal_impact": 0.10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraneParams {
    /// Identifier used to label load cases and wheels
    pub crane_id: u32,

    /// Rated lifting capacity (t)
    pub capacity_t: f64,

    /// Bridge self-weight excluding trolley (t)
    pub bridge_weight_t: f64,

    /// Trolley (crab) self-weight (t)
    pub trolley_weight_t: f64,

    /// Distance between runway rails (m)
    pub bridge_span_m: f64,

    /// Minimum distance from hook centreline to a runway rail (m)
    pub min_hook_approach_m: f64,

    /// Centre-to-centre distance between adjacent wheels on one rail (m)
    pub wheel_base_m: f64,

    /// Buffer projection beyond the first wheel (m)
    pub buffer_left_m: f64,

    /// Buffer projection beyond the last wheel (m)
    pub buffer_right_m: f64,

    /// Wheels per end truck (per rail)
    pub wheels_per_rail: usize,

    /// Vertical impact factor applied to the maximum wheel load
    pub vertical_impact: f64,

    /// Lateral thrust as a fraction of lifted load plus trolley
    pub horizontal_impact: f64,

    /// Longitudinal tractive force as a fraction of the maximum rail reaction
    pub longitudinal_impact: f64,

    /// Vendor-supplied wheel loads; overrides the geometry derivation when present
    pub manufacturer: Option<ManufacturerWheelLoads>,
}

impl Default for CraneParams {
    fn default() -> Self {
        Self {
            crane_id: 1,
            capacity_t: 10.0,
            bridge_weight_t: 5.0,
            trolley_weight_t: 0.72,
            bridge_span_m: 15.0,
            min_hook_approach_m: 1.0,
            wheel_base_m: 2.2,
            buffer_left_m: 0.29,
            buffer_right_m: 0.29,
            wheels_per_rail: 2,
            vertical_impact: 0.25,
            horizontal_impact: 0.20,
            longitudinal_impact: 0.10,
            manufacturer: None,
        }
    }
}

impl CraneParams {
    /// Default crane data with the given identifier
    pub fn new(crane_id: u32) -> Self {
        Self {
            crane_id,
            ..Self::default()
        }
    }

    /// Set the rated capacity (t)
    pub fn with_capacity(mut self, capacity_t: f64) -> Self {
        self.capacity_t = capacity_t;
        self
    }

    /// Set the bridge and trolley self-weights (t)
    pub fn with_self_weights(mut self, bridge_weight_t: f64, trolley_weight_t: f64) -> Self {
        self.bridge_weight_t = bridge_weight_t;
        self.trolley_weight_t = trolley_weight_t;
        self
    }

    /// Set the bridge span and minimum hook approach (m)
    pub fn with_bridge(mut self, bridge_span_m: f64, min_hook_approach_m: f64) -> Self {
        self.bridge_span_m = bridge_span_m;
        self.min_hook_approach_m = min_hook_approach_m;
        self
    }

    /// Set the wheel spacing (m)
    pub fn with_wheel_base(mut self, wheel_base_m: f64) -> Self {
        self.wheel_base_m = wheel_base_m;
        self
    }

    /// Set the number of wheels per rail
    pub fn with_wheels_per_rail(mut self, wheels_per_rail: usize) -> Self {
        self.wheels_per_rail = wheels_per_rail;
        self
    }

    /// Set the buffer projections (m)
    pub fn with_buffers(mut self, left_m: f64, right_m: f64) -> Self {
        self.buffer_left_m = left_m;
        self.buffer_right_m = right_m;
        self
    }

    /// Set the vertical, horizontal and longitudinal impact factors
    pub fn with_impact_factors(mut self, vertical: f64, horizontal: f64, longitudinal: f64) -> Self {
        self.vertical_impact = vertical;
        self.horizontal_impact = horizontal;
        self.longitudinal_impact = longitudinal;
        self
    }

    /// Use vendor-supplied wheel loads
    pub fn with_manufacturer_loads(mut self, loads: ManufacturerWheelLoads) -> Self {
        self.manufacturer = Some(loads);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let non_negative = [
            ("capacity_t", self.capacity_t),
            ("bridge_weight_t", self.bridge_weight_t),
            ("trolley_weight_t", self.trolley_weight_t),
            ("min_hook_approach_m", self.min_hook_approach_m),
            ("buffer_left_m", self.buffer_left_m),
            ("buffer_right_m", self.buffer_right_m),
            ("vertical_impact", self.vertical_impact),
            ("horizontal_impact", self.horizontal_impact),
            ("longitudinal_impact", self.longitudinal_impact),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a finite, non-negative number",
                ));
            }
        }

        if !self.bridge_span_m.is_finite() || self.bridge_span_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "bridge_span_m",
                self.bridge_span_m.to_string(),
                "Bridge span must be positive",
            ));
        }
        if self.min_hook_approach_m > self.bridge_span_m {
            return Err(CalcError::invalid_input(
                "min_hook_approach_m",
                self.min_hook_approach_m.to_string(),
                "Hook approach cannot exceed the bridge span",
            ));
        }
        if !self.wheel_base_m.is_finite() || self.wheel_base_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "wheel_base_m",
                self.wheel_base_m.to_string(),
                "Wheel base must be positive",
            ));
        }
        if self.wheels_per_rail < 2 {
            return Err(CalcError::invalid_input(
                "wheels_per_rail",
                self.wheels_per_rail.to_string(),
                "An end truck has at least two wheels per rail",
            ));
        }

        if let Some(m) = &self.manufacturer {
            let supplied = [
                ("manufacturer.max_static_kn", Some(m.max_static_kn)),
                ("manufacturer.min_static_kn", m.min_static_kn),
                ("manufacturer.lateral_kn", m.lateral_kn),
            ];
            for (field, value) in supplied {
                if let Some(v) = value {
                    if !v.is_finite() || v < 0.0 {
                        return Err(CalcError::invalid_input(
                            field,
                            v.to_string(),
                            "Must be a finite, non-negative number",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Derived Wheel Loads
// ============================================================================

/// Every load derived for one crane, as plain data for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelLoadSummary {
    pub crane_id: u32,
    /// True when vendor wheel loads were used
    pub from_manufacturer: bool,
    /// Maximum total reaction on one rail (kN)
    pub max_rail_reaction_kn: f64,
    /// Minimum total reaction on one rail (kN)
    pub min_rail_reaction_kn: f64,
    pub max_static_wheel_kn: f64,
    pub min_static_wheel_kn: f64,
    pub max_wheel_with_impact_kn: f64,
    pub min_wheel_with_impact_kn: f64,
    pub lateral_per_wheel_kn: f64,
    pub longitudinal_force_kn: f64,
    pub wheels_per_rail: usize,
    pub wheel_base_m: f64,
    /// Distance from first to last wheel (m)
    pub group_length_m: f64,
}

/// A validated crane. Derived loads are pure functions of the stored parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CraneWheelLoad {
    params: CraneParams,
}

impl TryFrom<CraneParams> for CraneWheelLoad {
    type Error = CalcError;

    fn try_from(params: CraneParams) -> CalcResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl CraneWheelLoad {
    /// Validate and wrap crane parameters
    pub fn new(params: CraneParams) -> CalcResult<Self> {
        Self::try_from(params)
    }

    /// The validated input data
    pub fn params(&self) -> &CraneParams {
        &self.params
    }

    pub fn crane_id(&self) -> u32 {
        self.params.crane_id
    }

    pub fn wheels_per_rail(&self) -> usize {
        self.params.wheels_per_rail
    }

    pub fn wheel_base_m(&self) -> f64 {
        self.params.wheel_base_m
    }

    /// Distance from the first to the last wheel of the end truck (m)
    pub fn group_length_m(&self) -> f64 {
        self.params.wheel_base_m * (self.params.wheels_per_rail - 1) as f64
    }

    /// Vendor loads, when supplied with a positive maximum
    fn manufacturer_loads(&self) -> Option<&ManufacturerWheelLoads> {
        self.params
            .manufacturer
            .as_ref()
            .filter(|m| m.max_static_kn > 0.0)
    }

    /// Weight of lifted load plus trolley, the moving load on the bridge (kN)
    fn moving_load_kn(&self) -> f64 {
        let lift: KiloNewtons = Tonnes(self.params.capacity_t).into();
        let trolley: KiloNewtons = Tonnes(self.params.trolley_weight_t).into();
        (lift + trolley).value()
    }

    /// Maximum and minimum total reaction on one rail (kN)
    pub fn rail_reactions(&self) -> (f64, f64) {
        let n = self.params.wheels_per_rail as f64;
        if self.manufacturer_loads().is_some() {
            let (max_wheel, min_wheel) = self.static_wheel_loads();
            return (max_wheel * n, min_wheel * n);
        }

        let span = self.params.bridge_span_m;
        let e_min = self.params.min_hook_approach_m;
        let bridge: KiloNewtons = Tonnes(self.params.bridge_weight_t).into();
        let bridge_share = bridge.value() / 2.0;
        let p_moving = self.moving_load_kn();

        let r_max = bridge_share + p_moving * (span - e_min) / span;
        let r_min = bridge_share + p_moving * e_min / span;
        (r_max, r_min)
    }

    /// Maximum and minimum static wheel loads (kN), without impact
    pub fn static_wheel_loads(&self) -> (f64, f64) {
        if let Some(m) = self.manufacturer_loads() {
            let min = m
                .min_static_kn
                .filter(|v| *v > 0.0)
                .unwrap_or(m.max_static_kn * DEFAULT_MIN_WHEEL_FRACTION);
            return (m.max_static_kn, min);
        }
        let (r_max, r_min) = self.rail_reactions();
        let n = self.params.wheels_per_rail as f64;
        (r_max / n, r_min / n)
    }

    /// Maximum wheel load including vertical impact (kN)
    pub fn wheel_load_with_impact(&self) -> f64 {
        self.static_wheel_loads().0 * (1.0 + self.params.vertical_impact)
    }

    /// Minimum wheel load including vertical impact (kN)
    pub fn min_wheel_load_with_impact(&self) -> f64 {
        self.static_wheel_loads().1 * (1.0 + self.params.vertical_impact)
    }

    /// Lateral thrust per wheel (kN), shared by the wheels on both rails
    pub fn lateral_per_wheel(&self) -> f64 {
        if let Some(lateral) = self
            .manufacturer_loads()
            .and_then(|m| m.lateral_kn)
            .filter(|v| *v > 0.0)
        {
            return lateral;
        }
        let n = self.params.wheels_per_rail as f64;
        self.params.horizontal_impact * self.moving_load_kn() / (2.0 * n)
    }

    /// Longitudinal tractive force on one rail (kN)
    pub fn longitudinal_force(&self) -> f64 {
        self.params.longitudinal_impact * self.rail_reactions().0
    }

    /// Collect every derived load in one record
    pub fn summary(&self) -> WheelLoadSummary {
        let (r_max, r_min) = self.rail_reactions();
        let (w_max, w_min) = self.static_wheel_loads();
        WheelLoadSummary {
            crane_id: self.crane_id(),
            from_manufacturer: self.manufacturer_loads().is_some(),
            max_rail_reaction_kn: r_max,
            min_rail_reaction_kn: r_min,
            max_static_wheel_kn: w_max,
            min_static_wheel_kn: w_min,
            max_wheel_with_impact_kn: self.wheel_load_with_impact(),
            min_wheel_with_impact_kn: self.min_wheel_load_with_impact(),
            lateral_per_wheel_kn: self.lateral_per_wheel(),
            longitudinal_force_kn: self.longitudinal_force(),
            wheels_per_rail: self.params.wheels_per_rail,
            wheel_base_m: self.params.wheel_base_m,
            group_length_m: self.group_length_m(),
        }
    }
}

/// Validate each crane and derive its wheel loads.
///
/// Fails on the first crane with invalid data; the error names the field.
pub fn evaluate_cranes(params: &[CraneParams]) -> CalcResult<Vec<WheelLoadSummary>> {
    params
        .iter()
        .map(|p| CraneWheelLoad::new(p.clone()).map(|c| c.summary()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::GRAVITY;

    fn scenario_crane() -> CraneWheelLoad {
        CraneWheelLoad::new(
            CraneParams::new(1)
                .with_capacity(10.0)
                .with_self_weights(5.0, 0.72)
                .with_bridge(20.0, 1.0)
                .with_wheel_base(2.2)
                .with_wheels_per_rail(2),
        )
        .unwrap()
    }

    #[test]
    fn test_max_reaction_from_geometry() {
        let crane = scenario_crane();
        let p_bridge = 5.0 * GRAVITY;
        let p_moving = (10.0 + 0.72) * GRAVITY;
        let expected = p_bridge / 2.0 + p_moving * (20.0 - 1.0) / 20.0;

        let (r_max, r_min) = crane.rail_reactions();
        assert!((r_max - expected).abs() < 1e-9);
        assert!((r_min - (p_bridge / 2.0 + p_moving * 1.0 / 20.0)).abs() < 1e-9);

        let (w_max, w_min) = crane.static_wheel_loads();
        assert!((w_max - expected / 2.0).abs() < 1e-9);
        assert!(w_min < w_max);
    }

    #[test]
    fn test_impact_and_horizontal_loads() {
        let crane = scenario_crane();
        let (w_max, _) = crane.static_wheel_loads();
        assert!((crane.wheel_load_with_impact() - 1.25 * w_max).abs() < 1e-9);

        // H = 0.20 × (10 + 0.72) × 9.81 / (2 × 2) = 5.258 kN
        assert!((crane.lateral_per_wheel() - 5.2582).abs() < 1e-3);
        assert!((crane.longitudinal_force() - 0.10 * crane.rail_reactions().0).abs() < 1e-9);
    }

    #[test]
    fn test_manufacturer_loads() {
        let crane = CraneWheelLoad::new(CraneParams::new(3).with_manufacturer_loads(
            ManufacturerWheelLoads {
                max_static_kn: 60.0,
                min_static_kn: None,
                lateral_kn: Some(4.0),
            },
        ))
        .unwrap();

        assert_eq!(crane.static_wheel_loads(), (60.0, 12.0));
        assert_eq!(crane.rail_reactions(), (120.0, 24.0));
        assert_eq!(crane.lateral_per_wheel(), 4.0);
        assert!(crane.summary().from_manufacturer);
    }

    #[test]
    fn test_zero_manufacturer_max_falls_back_to_geometry() {
        let geometry = CraneWheelLoad::new(CraneParams::new(1)).unwrap();
        let zero = CraneWheelLoad::new(CraneParams::new(1).with_manufacturer_loads(
            ManufacturerWheelLoads {
                max_static_kn: 0.0,
                min_static_kn: Some(10.0),
                lateral_kn: None,
            },
        ))
        .unwrap();
        assert_eq!(geometry.static_wheel_loads(), zero.static_wheel_loads());
        assert!(!zero.summary().from_manufacturer);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let crane = scenario_crane();
        assert_eq!(crane.summary(), crane.summary());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let err = CraneWheelLoad::new(CraneParams::new(1).with_wheels_per_rail(1)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "wheels_per_rail"));

        assert!(CraneWheelLoad::new(CraneParams::new(1).with_bridge(0.0, 0.0)).is_err());
        assert!(CraneWheelLoad::new(CraneParams::new(1).with_bridge(10.0, 12.0)).is_err());
        assert!(CraneWheelLoad::new(CraneParams::new(1).with_wheel_base(-1.0)).is_err());
        assert!(CraneWheelLoad::new(CraneParams::new(1).with_capacity(f64::NAN)).is_err());
    }

    #[test]
    fn test_group_length() {
        let crane = CraneWheelLoad::new(
            CraneParams::new(1).with_wheels_per_rail(4).with_wheel_base(1.5),
        )
        .unwrap();
        assert!((crane.group_length_m() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_crane_class_properties() {
        assert_eq!(CraneClass::C.design_cycles(), 2_000_000);
        assert_eq!(CraneClass::D.deflection_limit_ratio(), 800.0);
        assert_eq!(CraneClass::F.name(), "Continuous");
        assert_eq!(CraneClass::default(), CraneClass::C);
    }

    #[test]
    fn test_params_json_defaults() {
        let params: CraneParams = serde_json::from_str(r#"{ "crane_id": 7, "capacity_t": 20.0 }"#).unwrap();
        assert_eq!(params.crane_id, 7);
        assert_eq!(params.capacity_t, 20.0);
        assert_eq!(params.wheels_per_rail, 2);
        assert!(params.manufacturer.is_none());
    }
}
