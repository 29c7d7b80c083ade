//! # Structural Calculations
//!
//! Runway girder design, from the moving-load search to every capacity
//! check. Each part is a pure function over plain, JSON-serializable data:
//!
//! - `*Input` / configuration structs with `Default`, `with_*` builders and `validate()`
//! - `*Result` / strength records carrying every intermediate value for reports
//! - functions returning `CalcResult<T>`
//!
//! ## Available Calculations
//!
//! - [`section`] - Built-up and rolled section properties, cap channels
//! - [`moving_load`] - Wheel placement search and governing-case selection
//! - [`classification`] - Flange and web slenderness classes
//! - [`flexure`] - Flexural strength, top flange lateral bending, proportion limits
//! - [`shear`] - Web shear with and without tension field action
//! - [`web_local`] - Web local yielding and crippling under a wheel
//! - [`stiffeners`] - Transverse, bearing and longitudinal stiffeners
//! - [`weld`] - Flange-to-web fillet welds
//! - [`fatigue`] - Stress range against the allowable range
//! - [`deflection`] - Vertical deflection under static wheel loads
//! - [`checks`] - Limit-state results and the governing ratio
//! - [`runway_beam`] - The full design run

pub mod checks;
pub mod classification;
pub mod deflection;
pub mod fatigue;
pub mod flexure;
pub mod moving_load;
pub mod runway_beam;
pub mod section;
pub mod shear;
pub mod stiffeners;
pub mod web_local;
pub mod weld;

// Re-export commonly used types
pub use checks::{governing_check, CheckResult, LimitState};
pub use classification::{classify, Classification, SlendernessClass};
pub use deflection::{estimate_deflection, DeflectionResult};
pub use fatigue::FatigueCategory;
pub use moving_load::{find_critical_cases, select_governing, GoverningCases, LoadCase, SearchResolution};
pub use runway_beam::{
    calculate, run_capacity_checks, CapacityReport, CheckOptions, DesignDemand, RunwayBeamInput,
    RunwayBeamResult, SectionSpec,
};
pub use section::{build_section, CapChannel, Section, SectionGeometry, SectionKind};
pub use stiffeners::StiffenerConfig;
pub use web_local::RailGeometry;
pub use weld::WeldConfig;
