//! # runway_core - Crane Runway Beam Design Engine
//!
//! `runway_core` checks whether a simply-supported steel girder can carry one
//! to three overhead travelling cranes. It finds the governing wheel
//! placements with a moving-load search, then runs the AISC 360 ASD limit
//! states on the section: flexure, shear, web local effects, stiffeners,
//! welds, fatigue and deflection. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every check names the equation and code clause it used
//!
//! ## Quick Start
//!
//! ```rust
//! use runway_core::calculations::{calculate, RunwayBeamInput, SectionSpec};
//! use runway_core::loads::CraneParams;
//!
//! let input = RunwayBeamInput::new("Runway A", 6.0)
//!     .with_crane(CraneParams::new(1).with_capacity(10.0).with_bridge(20.0, 1.0))
//!     .with_section(SectionSpec::rolled("HEB 400"));
//!
//! let result = calculate(&input).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("governing"));
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Crane data and wheel loads
//! - [`calculations`] - Load search, section properties and capacity checks
//! - [`materials`] - Steel grades and the rolled-shape catalog
//! - [`equations`] - Beam and section formulas, equation registry
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per load case and limit state,
//! `info`/`warn` for the design outcome) and never installs a subscriber.

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, RunwayBeamInput, RunwayBeamResult};
pub use errors::{CalcError, CalcResult};
