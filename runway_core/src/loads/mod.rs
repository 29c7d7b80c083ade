//! Crane loads on runway girders
//!
//! This module converts crane data into the wheel loads that travel along a
//! runway girder, and carries the crane service classification used for
//! fatigue cycle counts and deflection limits.
//!
//! # Overview
//!
//! - [`CraneParams`] - Crane capacity, self-weights, geometry and impact factors
//! - [`CraneWheelLoad`] - Validated crane with its derived wheel loads
//! - [`WheelLoadSummary`] - Plain record of every derived load for one crane
//! - [`CraneClass`] - CMAA 70 service class (A to F)
//!
//! # Example
//!
//! ```
//! use runway_core::loads::{evaluate_cranes, CraneParams};
//!
//! let cranes = vec![
//!     CraneParams::new(1).with_capacity(10.0),
//!     CraneParams::new(2).with_capacity(5.0).with_wheel_base(1.8),
//! ];
//!
//! let summaries = evaluate_cranes(&cranes).unwrap();
//! assert_eq!(summaries.len(), 2);
//! assert!(summaries[0].max_wheel_with_impact_kn > summaries[1].max_wheel_with_impact_kn);
//! ```

pub mod crane;

pub use crane::{
    evaluate_cranes,
    CraneClass,
    CraneParams,
    CraneWheelLoad,
    ManufacturerWheelLoads,
    WheelLoadSummary,
};
