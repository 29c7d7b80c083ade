//! Rolled Steel Section Catalog
//!
//! Section properties for the European and British I-sections used as runway
//! girders, and the channels used as girder caps. Properties are in mm and kg.
//!
//! ## Supported Shape Types
//!
//! - **IPE**: European I-beams
//! - **HEA / HEB**: European wide flange, light and medium series
//! - **UB / UC**: British universal beams and columns
//! - **UPN / PFC**: taper and parallel flange channels (cap channels)
//!
//! ## Example
//!
//! ```rust
//! use runway_core::materials::steel::{builtin_shapes, ShapeType};
//!
//! let db = builtin_shapes();
//! let heb = db.lookup("heb 300").unwrap();
//! assert_eq!(heb.shape_type, ShapeType::HEB);
//! assert_eq!(heb.ix_mm4, Some(252.0e6));
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{CalcError, CalcResult};

/// Steel shape family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    /// European I-beam
    IPE,
    /// European wide flange, light series
    HEA,
    /// European wide flange, medium series
    HEB,
    /// British universal beam
    UB,
    /// British universal column
    UC,
    /// European taper flange channel
    UPN,
    /// British parallel flange channel
    PFC,
}

impl ShapeType {
    /// All shape types for iteration
    pub const ALL: [ShapeType; 7] = [
        ShapeType::IPE,
        ShapeType::HEA,
        ShapeType::HEB,
        ShapeType::UB,
        ShapeType::UC,
        ShapeType::UPN,
        ShapeType::PFC,
    ];

    /// Parse from the designation prefix ("IPE 300" -> IPE)
    pub fn from_designation(s: &str) -> Option<Self> {
        let prefix = s.split_whitespace().next().unwrap_or("");
        match prefix.to_uppercase().as_str() {
            "IPE" => Some(ShapeType::IPE),
            "HEA" => Some(ShapeType::HEA),
            "HEB" => Some(ShapeType::HEB),
            "UB" => Some(ShapeType::UB),
            "UC" => Some(ShapeType::UC),
            "UPN" => Some(ShapeType::UPN),
            "PFC" => Some(ShapeType::PFC),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeType::IPE => "European I-Beam (IPE)",
            ShapeType::HEA => "European Wide Flange (HEA)",
            ShapeType::HEB => "European Wide Flange (HEB)",
            ShapeType::UB => "Universal Beam (UB)",
            ShapeType::UC => "Universal Column (UC)",
            ShapeType::UPN => "Taper Flange Channel (UPN)",
            ShapeType::PFC => "Parallel Flange Channel (PFC)",
        }
    }

    /// Channels are only used as caps, never as the girder itself
    pub fn is_channel(&self) -> bool {
        matches!(self, ShapeType::UPN | ShapeType::PFC)
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Rolled steel shape with catalog section properties.
///
/// I-shapes carry strong-axis properties (`ix_mm4`, `sx_mm3`). Channels carry
/// the centroid distance from the back of the web (`cy_mm`) instead, since
/// their minor axis becomes the girder's strong-axis contribution when the
/// channel is laid flat on the top flange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelShape {
    /// Shape family
    pub shape_type: ShapeType,

    /// Designation (e.g., "IPE 300", "UPN 200")
    pub label: String,

    // === Dimensions ===
    /// Overall depth d (mm)
    pub depth_mm: f64,

    /// Flange width bf (mm)
    pub flange_width_mm: f64,

    /// Flange thickness tf (mm)
    pub flange_thickness_mm: f64,

    /// Web thickness tw (mm)
    pub web_thickness_mm: f64,

    // === Properties ===
    /// Cross-sectional area (mm²)
    pub area_mm2: f64,

    /// Strong-axis moment of inertia (mm⁴), I-shapes only
    pub ix_mm4: Option<f64>,

    /// Weak-axis moment of inertia (mm⁴)
    pub iy_mm4: f64,

    /// Strong-axis elastic section modulus (mm³), I-shapes only
    pub sx_mm3: Option<f64>,

    /// Mass per length (kg/m)
    pub mass_kg_per_m: f64,

    /// Centroid distance from the back of the web (mm), channels only
    pub cy_mm: Option<f64>,
}

impl SteelShape {
    /// Get the shape's display name (same as label)
    pub fn display_name(&self) -> &str {
        &self.label
    }

    /// Clear distance between flanges, d - 2tf
    pub fn clear_web_height_mm(&self) -> f64 {
        self.depth_mm - 2.0 * self.flange_thickness_mm
    }

    /// Flange slenderness bf/(2tf)
    pub fn bf_2tf(&self) -> f64 {
        self.flange_width_mm / (2.0 * self.flange_thickness_mm)
    }
}

impl std::fmt::Display for SteelShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (A={:.0} mm², Iy={:.3e} mm⁴, {:.1} kg/m)",
            self.label, self.area_mm2, self.iy_mm4, self.mass_kg_per_m
        )
    }
}

/// In-memory catalog of steel shapes, indexed by normalized designation.
#[derive(Debug, Clone, Default)]
pub struct SteelShapeDb {
    /// Shapes indexed by normalized label
    shapes: HashMap<String, SteelShape>,

    /// Shapes grouped by type, in insertion order
    by_type: HashMap<ShapeType, Vec<String>>,

    /// Catalog version tag
    pub version: Option<String>,
}

/// "ipe  300" -> "IPE 300"
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

impl SteelShapeDb {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shape into the database
    pub fn insert(&mut self, shape: SteelShape) {
        let key = normalize_label(&shape.label);
        let shape_type = shape.shape_type;

        if self.shapes.insert(key.clone(), shape).is_none() {
            self.by_type.entry(shape_type).or_default().push(key);
        }
    }

    /// Look up a shape by designation.
    ///
    /// Matching ignores case and repeated whitespace.
    pub fn lookup(&self, label: &str) -> CalcResult<&SteelShape> {
        let key = normalize_label(label);
        self.shapes
            .get(&key)
            .ok_or_else(|| CalcError::shape_not_found(label))
    }

    /// Look up a channel for use as a girder cap
    pub fn lookup_channel(&self, label: &str) -> CalcResult<&SteelShape> {
        let shape = self.lookup(label)?;
        if !shape.shape_type.is_channel() {
            return Err(CalcError::invalid_input(
                "cap_channel",
                label,
                "Cap must be a UPN or PFC channel",
            ));
        }
        Ok(shape)
    }

    /// Get all shapes of a specific type, in catalog order
    pub fn shapes_of_type(&self, shape_type: ShapeType) -> Vec<&SteelShape> {
        self.by_type
            .get(&shape_type)
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|l| self.shapes.get(l))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get all channel shapes (UPN and PFC)
    pub fn channel_shapes(&self) -> Vec<&SteelShape> {
        let mut shapes = self.shapes_of_type(ShapeType::UPN);
        shapes.extend(self.shapes_of_type(ShapeType::PFC));
        shapes
    }

    /// Get the number of shapes in the database
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Search for shapes whose designation starts with a pattern ("HEB 3")
    pub fn search(&self, pattern: &str) -> Vec<&SteelShape> {
        let pattern = normalize_label(pattern);
        let mut found: Vec<&SteelShape> = self
            .shapes
            .iter()
            .filter(|(k, _)| k.starts_with(&pattern))
            .map(|(_, v)| v)
            .collect();
        found.sort_by(|a, b| a.label.cmp(&b.label));
        found
    }
}

// ============================================================================
// Built-in Catalog
// ============================================================================

// (label, d, bf, tf, tw, A, Ix, Iy, Sx, mass)
type IShapeRow = (&'static str, f64, f64, f64, f64, f64, f64, f64, f64, f64);

// (label, d, bf, tf, tw, A, Iy, mass, cy)
type ChannelRow = (&'static str, f64, f64, f64, f64, f64, f64, f64, f64);

const IPE_ROWS: &[IShapeRow] = &[
    ("IPE 80", 80.0, 46.0, 5.2, 3.8, 764.0, 0.801e6, 0.0849e6, 20.0e3, 6.0),
    ("IPE 100", 100.0, 55.0, 5.7, 4.1, 1032.0, 1.71e6, 0.159e6, 34.2e3, 8.1),
    ("IPE 120", 120.0, 64.0, 6.3, 4.4, 1321.0, 3.18e6, 0.277e6, 53.0e3, 10.4),
    ("IPE 140", 140.0, 73.0, 6.9, 4.7, 1643.0, 5.41e6, 0.449e6, 77.3e3, 12.9),
    ("IPE 160", 160.0, 82.0, 7.4, 5.0, 2009.0, 8.69e6, 0.683e6, 109.0e3, 15.8),
    ("IPE 180", 180.0, 91.0, 8.0, 5.3, 2395.0, 13.2e6, 1.01e6, 146.0e3, 18.8),
    ("IPE 200", 200.0, 100.0, 8.5, 5.6, 2848.0, 19.4e6, 1.42e6, 194.0e3, 22.4),
    ("IPE 220", 220.0, 110.0, 9.2, 5.9, 3337.0, 27.7e6, 2.05e6, 252.0e3, 26.2),
    ("IPE 240", 240.0, 120.0, 9.8, 6.2, 3912.0, 38.9e6, 2.84e6, 324.0e3, 30.7),
    ("IPE 270", 270.0, 135.0, 10.2, 6.6, 4594.0, 57.9e6, 4.20e6, 429.0e3, 36.1),
    ("IPE 300", 300.0, 150.0, 10.7, 7.1, 5381.0, 83.6e6, 6.04e6, 557.0e3, 42.2),
    ("IPE 330", 330.0, 160.0, 11.5, 7.5, 6261.0, 118.0e6, 7.88e6, 713.0e3, 49.1),
    ("IPE 360", 360.0, 170.0, 12.7, 8.0, 7273.0, 163.0e6, 10.4e6, 904.0e3, 57.1),
    ("IPE 400", 400.0, 180.0, 13.5, 8.6, 8446.0, 231.0e6, 13.2e6, 1160.0e3, 66.3),
    ("IPE 450", 450.0, 190.0, 14.6, 9.4, 9882.0, 337.0e6, 16.8e6, 1500.0e3, 77.6),
    ("IPE 500", 500.0, 200.0, 16.0, 10.2, 11550.0, 482.0e6, 21.4e6, 1930.0e3, 90.7),
    ("IPE 550", 550.0, 210.0, 17.2, 11.1, 13440.0, 671.0e6, 26.7e6, 2440.0e3, 106.0),
    ("IPE 600", 600.0, 220.0, 19.0, 12.0, 15600.0, 921.0e6, 33.9e6, 3070.0e3, 122.0),
    ("IPE 750x137", 753.0, 263.0, 17.0, 11.5, 17440.0, 1603.0e6, 51.5e6, 4260.0e3, 137.0),
    ("IPE 750x147", 753.0, 265.0, 18.5, 12.0, 18730.0, 1743.0e6, 57.2e6, 4630.0e3, 147.0),
    ("IPE 750x173", 762.0, 267.0, 21.6, 14.4, 22040.0, 2050.0e6, 68.2e6, 5380.0e3, 173.0),
    ("IPE 750x196", 770.0, 268.0, 25.4, 15.6, 24990.0, 2400.0e6, 81.4e6, 6240.0e3, 196.0),
];

const HEA_ROWS: &[IShapeRow] = &[
    ("HEA 100", 96.0, 100.0, 8.0, 5.0, 2124.0, 3.49e6, 1.34e6, 72.8e3, 16.7),
    ("HEA 120", 114.0, 120.0, 8.0, 5.0, 2534.0, 6.06e6, 2.31e6, 106.0e3, 19.9),
    ("HEA 140", 133.0, 140.0, 8.5, 5.5, 3142.0, 10.3e6, 3.89e6, 155.0e3, 24.7),
    ("HEA 160", 152.0, 160.0, 9.0, 6.0, 3877.0, 16.7e6, 6.16e6, 220.0e3, 30.4),
    ("HEA 180", 171.0, 180.0, 9.5, 6.0, 4525.0, 25.1e6, 9.25e6, 294.0e3, 35.5),
    ("HEA 200", 190.0, 200.0, 10.0, 6.5, 5383.0, 36.9e6, 13.4e6, 389.0e3, 42.3),
    ("HEA 220", 210.0, 220.0, 11.0, 7.0, 6434.0, 54.1e6, 19.5e6, 515.0e3, 50.5),
    ("HEA 240", 230.0, 240.0, 12.0, 7.5, 7684.0, 77.6e6, 27.7e6, 675.0e3, 60.3),
    ("HEA 260", 250.0, 260.0, 12.5, 7.5, 8682.0, 104.0e6, 36.7e6, 836.0e3, 68.2),
    ("HEA 280", 270.0, 280.0, 13.0, 8.0, 9726.0, 137.0e6, 47.5e6, 1010.0e3, 76.4),
    ("HEA 300", 290.0, 300.0, 14.0, 8.5, 11250.0, 183.0e6, 63.1e6, 1260.0e3, 88.3),
    ("HEA 320", 310.0, 300.0, 15.5, 9.0, 12440.0, 229.0e6, 69.8e6, 1480.0e3, 97.6),
    ("HEA 340", 330.0, 300.0, 16.5, 9.5, 13330.0, 276.0e6, 74.1e6, 1680.0e3, 105.0),
    ("HEA 360", 350.0, 300.0, 17.5, 10.0, 14280.0, 331.0e6, 78.5e6, 1890.0e3, 112.0),
    ("HEA 400", 390.0, 300.0, 19.0, 11.0, 15900.0, 451.0e6, 85.6e6, 2310.0e3, 125.0),
    ("HEA 450", 440.0, 300.0, 21.0, 11.5, 17800.0, 637.0e6, 94.6e6, 2900.0e3, 140.0),
    ("HEA 500", 490.0, 300.0, 23.0, 12.0, 19800.0, 869.0e6, 104.0e6, 3550.0e3, 155.0),
    ("HEA 550", 540.0, 300.0, 24.0, 12.5, 21180.0, 1120.0e6, 111.0e6, 4150.0e3, 166.0),
    ("HEA 600", 590.0, 300.0, 25.0, 13.0, 22640.0, 1410.0e6, 117.0e6, 4790.0e3, 178.0),
    ("HEA 650", 640.0, 300.0, 26.0, 13.5, 24160.0, 1750.0e6, 124.0e6, 5470.0e3, 190.0),
    ("HEA 700", 690.0, 300.0, 27.0, 14.5, 26050.0, 2150.0e6, 131.0e6, 6240.0e3, 204.0),
    ("HEA 800", 790.0, 300.0, 28.0, 15.0, 28570.0, 3030.0e6, 137.0e6, 7680.0e3, 224.0),
    ("HEA 900", 890.0, 300.0, 30.0, 16.0, 32120.0, 4220.0e6, 146.0e6, 9480.0e3, 252.0),
    ("HEA 1000", 990.0, 300.0, 31.0, 16.5, 34680.0, 5530.0e6, 152.0e6, 11180.0e3, 272.0),
];

const HEB_ROWS: &[IShapeRow] = &[
    ("HEB 100", 100.0, 100.0, 10.0, 6.0, 2604.0, 4.50e6, 1.67e6, 89.9e3, 20.4),
    ("HEB 120", 120.0, 120.0, 11.0, 6.5, 3401.0, 8.64e6, 3.18e6, 144.0e3, 26.7),
    ("HEB 140", 140.0, 140.0, 12.0, 7.0, 4296.0, 15.1e6, 5.50e6, 216.0e3, 33.7),
    ("HEB 160", 160.0, 160.0, 13.0, 8.0, 5425.0, 24.9e6, 8.89e6, 311.0e3, 42.6),
    ("HEB 180", 180.0, 180.0, 14.0, 8.5, 6525.0, 38.3e6, 13.6e6, 426.0e3, 51.2),
    ("HEB 200", 200.0, 200.0, 15.0, 9.0, 7808.0, 57.0e6, 20.0e6, 570.0e3, 61.3),
    ("HEB 220", 220.0, 220.0, 16.0, 9.5, 9104.0, 80.9e6, 28.4e6, 736.0e3, 71.5),
    ("HEB 240", 240.0, 240.0, 17.0, 10.0, 10600.0, 112.0e6, 39.2e6, 938.0e3, 83.2),
    ("HEB 260", 260.0, 260.0, 17.5, 10.0, 11840.0, 149.0e6, 51.3e6, 1150.0e3, 93.0),
    ("HEB 280", 280.0, 280.0, 18.0, 10.5, 13140.0, 193.0e6, 65.9e6, 1380.0e3, 103.0),
    ("HEB 300", 300.0, 300.0, 19.0, 11.0, 14910.0, 252.0e6, 85.6e6, 1680.0e3, 117.0),
    ("HEB 320", 320.0, 300.0, 20.5, 11.5, 16130.0, 308.0e6, 93.9e6, 1930.0e3, 127.0),
    ("HEB 340", 340.0, 300.0, 21.5, 12.0, 17090.0, 366.0e6, 96.9e6, 2160.0e3, 134.0),
    ("HEB 360", 360.0, 300.0, 22.5, 12.5, 18060.0, 432.0e6, 101.0e6, 2400.0e3, 142.0),
    ("HEB 400", 400.0, 300.0, 24.0, 13.5, 19780.0, 577.0e6, 108.0e6, 2880.0e3, 155.0),
    ("HEB 450", 450.0, 300.0, 26.0, 14.0, 21830.0, 799.0e6, 117.0e6, 3550.0e3, 171.0),
    ("HEB 500", 500.0, 300.0, 28.0, 14.5, 23860.0, 1072.0e6, 126.0e6, 4290.0e3, 187.0),
    ("HEB 550", 550.0, 300.0, 29.0, 15.0, 25440.0, 1367.0e6, 131.0e6, 4970.0e3, 199.0),
    ("HEB 600", 600.0, 300.0, 30.0, 15.5, 27000.0, 1710.0e6, 135.0e6, 5700.0e3, 212.0),
    ("HEB 650", 650.0, 300.0, 31.0, 16.0, 28630.0, 2110.0e6, 140.0e6, 6480.0e3, 225.0),
    ("HEB 700", 700.0, 300.0, 32.0, 17.0, 30640.0, 2569.0e6, 144.0e6, 7340.0e3, 241.0),
    ("HEB 800", 800.0, 300.0, 33.0, 17.5, 33430.0, 3591.0e6, 149.0e6, 8980.0e3, 262.0),
    ("HEB 900", 900.0, 300.0, 35.0, 18.5, 37110.0, 4941.0e6, 158.0e6, 10980.0e3, 291.0),
    ("HEB 1000", 1000.0, 300.0, 36.0, 19.0, 40040.0, 6444.0e6, 163.0e6, 12890.0e3, 314.0),
];

const UB_ROWS: &[IShapeRow] = &[
    ("UB 305x165x40", 303.4, 165.0, 10.2, 6.0, 5125.0, 85.5e6, 7.64e6, 564.0e3, 40.3),
    ("UB 356x171x51", 355.0, 171.5, 11.5, 7.4, 6490.0, 142.0e6, 9.68e6, 800.0e3, 51.0),
    ("UB 406x178x60", 406.4, 177.9, 12.8, 7.9, 7640.0, 215.0e6, 12.0e6, 1060.0e3, 60.1),
    ("UB 457x191x67", 453.4, 189.9, 12.7, 8.5, 8550.0, 294.0e6, 14.5e6, 1300.0e3, 67.1),
    ("UB 457x191x82", 460.0, 191.3, 16.0, 9.9, 10400.0, 370.0e6, 18.5e6, 1610.0e3, 82.0),
    ("UB 533x210x92", 533.1, 209.3, 15.6, 10.1, 11700.0, 554.0e6, 23.9e6, 2080.0e3, 92.1),
    ("UB 610x229x101", 602.6, 227.6, 14.8, 10.5, 12900.0, 756.0e6, 29.4e6, 2510.0e3, 101.0),
];

const UC_ROWS: &[IShapeRow] = &[
    ("UC 203x203x46", 203.2, 203.6, 11.0, 7.2, 5870.0, 45.7e6, 15.4e6, 450.0e3, 46.1),
    ("UC 203x203x60", 209.6, 205.8, 14.2, 9.4, 7640.0, 61.2e6, 20.5e6, 584.0e3, 60.0),
    ("UC 254x254x73", 254.1, 254.6, 14.2, 8.6, 9320.0, 114.0e6, 39.4e6, 898.0e3, 73.1),
    ("UC 254x254x89", 260.3, 256.3, 17.3, 10.3, 11400.0, 143.0e6, 48.5e6, 1100.0e3, 89.5),
    ("UC 305x305x97", 307.9, 305.3, 15.4, 9.9, 12300.0, 222.0e6, 72.9e6, 1440.0e3, 96.9),
    ("UC 305x305x118", 314.5, 307.4, 18.7, 12.0, 15000.0, 276.0e6, 90.7e6, 1760.0e3, 118.0),
];

const UPN_ROWS: &[ChannelRow] = &[
    ("UPN 100", 100.0, 50.0, 8.5, 6.0, 1350.0, 0.293e6, 10.6, 15.5),
    ("UPN 120", 120.0, 55.0, 9.0, 7.0, 1700.0, 0.432e6, 13.4, 16.0),
    ("UPN 140", 140.0, 60.0, 10.0, 7.0, 2040.0, 0.627e6, 16.0, 17.5),
    ("UPN 160", 160.0, 65.0, 10.5, 7.5, 2400.0, 0.853e6, 18.8, 18.4),
    ("UPN 180", 180.0, 70.0, 11.0, 8.0, 2800.0, 1.14e6, 22.0, 19.2),
    ("UPN 200", 200.0, 75.0, 11.5, 8.5, 3220.0, 1.48e6, 25.3, 20.1),
    ("UPN 220", 220.0, 80.0, 12.5, 9.0, 3740.0, 1.97e6, 29.4, 21.2),
    ("UPN 240", 240.0, 85.0, 13.0, 9.5, 4230.0, 2.48e6, 33.2, 22.0),
    ("UPN 260", 260.0, 90.0, 14.0, 10.0, 4830.0, 3.17e6, 37.9, 23.6),
    ("UPN 280", 280.0, 95.0, 15.0, 10.0, 5330.0, 3.99e6, 41.8, 25.3),
    ("UPN 300", 300.0, 100.0, 16.0, 10.0, 5880.0, 4.95e6, 46.2, 27.0),
];

const PFC_ROWS: &[ChannelRow] = &[
    ("PFC 125", 125.0, 65.0, 9.5, 5.5, 1680.0, 0.631e6, 13.2, 18.6),
    ("PFC 150", 150.0, 75.0, 10.0, 5.5, 2080.0, 1.06e6, 16.3, 21.3),
    ("PFC 180", 180.0, 90.0, 12.5, 6.5, 3220.0, 2.38e6, 25.3, 26.5),
    ("PFC 200", 200.0, 90.0, 14.0, 6.5, 3610.0, 2.69e6, 28.4, 26.1),
    ("PFC 230", 230.0, 90.0, 14.0, 7.5, 4210.0, 2.87e6, 33.0, 25.3),
    ("PFC 260", 260.0, 90.0, 14.0, 8.0, 4670.0, 2.97e6, 36.6, 24.6),
    ("PFC 300", 300.0, 100.0, 16.5, 9.0, 6100.0, 4.68e6, 47.9, 27.8),
];

static BUILTIN_SHAPES: Lazy<SteelShapeDb> = Lazy::new(|| {
    let mut db = SteelShapeDb::new();

    let i_shapes = [
        (ShapeType::IPE, IPE_ROWS),
        (ShapeType::HEA, HEA_ROWS),
        (ShapeType::HEB, HEB_ROWS),
        (ShapeType::UB, UB_ROWS),
        (ShapeType::UC, UC_ROWS),
    ];
    for (shape_type, rows) in i_shapes {
        for &(label, d, bf, tf, tw, a, ix, iy, sx, mass) in rows {
            db.insert(SteelShape {
                shape_type,
                label: label.to_string(),
                depth_mm: d,
                flange_width_mm: bf,
                flange_thickness_mm: tf,
                web_thickness_mm: tw,
                area_mm2: a,
                ix_mm4: Some(ix),
                iy_mm4: iy,
                sx_mm3: Some(sx),
                mass_kg_per_m: mass,
                cy_mm: None,
            });
        }
    }

    for (shape_type, rows) in [(ShapeType::UPN, UPN_ROWS), (ShapeType::PFC, PFC_ROWS)] {
        for &(label, d, bf, tf, tw, a, iy, mass, cy) in rows {
            db.insert(SteelShape {
                shape_type,
                label: label.to_string(),
                depth_mm: d,
                flange_width_mm: bf,
                flange_thickness_mm: tf,
                web_thickness_mm: tw,
                area_mm2: a,
                ix_mm4: None,
                iy_mm4: iy,
                sx_mm3: None,
                mass_kg_per_m: mass,
                cy_mm: Some(cy),
            });
        }
    }

    db.version = Some("builtin-euro-uk".to_string());
    db
});

/// The built-in section catalog, shared for the life of the process.
pub fn builtin_shapes() -> &'static SteelShapeDb {
    &BUILTIN_SHAPES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_type_parsing() {
        assert_eq!(ShapeType::from_designation("IPE 300"), Some(ShapeType::IPE));
        assert_eq!(ShapeType::from_designation("ub 457x191x82"), Some(ShapeType::UB));
        assert_eq!(ShapeType::from_designation("PFC 200"), Some(ShapeType::PFC));
        assert_eq!(ShapeType::from_designation("W14X90"), None);
        assert!(ShapeType::UPN.is_channel());
        assert!(!ShapeType::HEB.is_channel());
    }

    #[test]
    fn test_builtin_shapes() {
        let db = builtin_shapes();
        assert!(!db.is_empty());
        assert_eq!(db.len(), 22 + 24 + 24 + 7 + 6 + 11 + 7);

        let ipe = db.lookup("IPE 300").unwrap();
        assert_eq!(ipe.area_mm2, 5381.0);
        assert_eq!(ipe.sx_mm3, Some(557.0e3));
        assert!((ipe.clear_web_height_mm() - 278.6).abs() < 1e-9);

        // Case and spacing insensitive
        let same = db.lookup("ipe   300").unwrap();
        assert_eq!(ipe.label, same.label);
    }

    #[test]
    fn test_channel_lookup() {
        let db = builtin_shapes();
        let upn = db.lookup_channel("UPN 200").unwrap();
        assert_eq!(upn.cy_mm, Some(20.1));
        assert_eq!(upn.ix_mm4, None);

        let err = db.lookup_channel("HEB 300").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_shape_filtering() {
        let db = builtin_shapes();
        let heb = db.shapes_of_type(ShapeType::HEB);
        assert_eq!(heb.len(), 24);
        assert_eq!(heb[0].label, "HEB 100");
        assert!(heb.iter().all(|s| s.shape_type == ShapeType::HEB));

        assert_eq!(db.channel_shapes().len(), 18);
    }

    #[test]
    fn test_shape_search() {
        let db = builtin_shapes();
        let found = db.search("heb 3");
        assert!(!found.is_empty());
        assert!(found.iter().all(|s| s.label.starts_with("HEB 3")));
    }

    #[test]
    fn test_shape_not_found() {
        let err = builtin_shapes().lookup("IPE 999").unwrap_err();
        assert_eq!(err, CalcError::shape_not_found("IPE 999"));
    }

    #[test]
    fn test_catalog_consistency() {
        // Sx ≈ Ix/(d/2) within catalog rounding for every I-shape
        for shape_type in [ShapeType::IPE, ShapeType::HEA, ShapeType::HEB, ShapeType::UB, ShapeType::UC] {
            for shape in builtin_shapes().shapes_of_type(shape_type) {
                let (ix, sx) = (shape.ix_mm4.unwrap(), shape.sx_mm3.unwrap());
                let ratio = sx / (ix / (shape.depth_mm / 2.0));
                assert!((ratio - 1.0).abs() < 0.05, "{} Sx inconsistent: {}", shape.label, ratio);
            }
        }
    }
}
