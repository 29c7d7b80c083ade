//! # Structural Engineering Equations
//!
//! Fundamental mechanics used by the load solver and the section model, plus
//! the registry that ties every design formula to its code reference.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported beam formulas and point-load superposition
//! - [`section`] - Plate and built-up section properties
//! - [`registry`] - Equation metadata and usage tracking
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Moment**: Positive causes tension on bottom fiber (sagging)
//! - **Shear**: Positive when left side moves up relative to right
//! - **Deflection**: Positive downward
//! - **Reactions**: Positive upward (resisting gravity)
//!
//! ## References
//!
//! - AISC 360-16: Specification for Structural Steel Buildings
//! - AISC Design Guide 7: Industrial Buildings (crane runways)
//! - CMAA Specification 70
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod beam;
pub mod registry;
pub mod section;

pub use beam::{
    point_load_deflection,
    point_load_moment,
    point_load_reactions,
    point_load_shear,
    point_loads_deflection,
    point_loads_moment,
    point_loads_reactions,
    point_loads_shear_left,
    point_loads_shear_right,
    uniform_load_max_deflection,
    uniform_load_max_moment,
    uniform_load_reactions,
};

pub use section::{
    composite_centroid,
    parallel_axis,
    plate_plastic_modulus_minor,
    radius_of_gyration,
    rectangular_area,
    rectangular_moment_of_inertia,
    thin_plate_torsion_constant,
    warping_constant,
};

pub use registry::{
    equations_markdown,
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
};
