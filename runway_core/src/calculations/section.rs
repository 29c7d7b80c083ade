//! # Section Property Model
//!
//! Derives the geometric properties of a runway girder cross-section:
//! a welded built-up I-section (plate girder) or a rolled I-shape from the
//! catalog, either one optionally reinforced by a cap channel on the top
//! flange.
//!
//! ```text
//!        ┌──┬────────────┬──┐   cap channel (web flat on the flange,
//!        │  └────────────┘  │   flanges turned down past the tips)
//!      ══╧══════════════════╧══  top flange     bf_top × tf_top
//!                  ║
//!                  ║             web            hw × tw
//!                  ║
//!          ════════════════      bottom flange  bf_bot × tf_bot
//! ```
//!
//! Derivation is a pure function of geometry: building the same geometry
//! twice gives bit-identical properties. Degenerate plates are rejected with
//! [`CalcError::InvalidGeometry`] before any division happens.
//!
//! ## Units
//!
//! Millimetres throughout (mm, mm², mm³, mm⁴, mm⁶); mass in kg/m.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::section::{
    composite_centroid, parallel_axis, radius_of_gyration, rectangular_area,
    rectangular_moment_of_inertia, thin_plate_torsion_constant, warping_constant,
};
use crate::errors::{checked_sqrt, CalcError, CalcResult};
use crate::materials::{SteelShape, STEEL_DENSITY};

/// Plastic modulus of a rolled I-shape is taken as this multiple of Sx
pub const ROLLED_SHAPE_FACTOR: f64 = 1.12;

const PNA_ITERATIONS: usize = 200;

// ============================================================================
// Geometry Inputs
// ============================================================================

/// Cap channel laid on the top flange.
///
/// `height_mm` is the channel web thickness (the depth it adds above the top
/// flange). `centroid_offset_mm` is measured from the back of the channel
/// web, which is the top fibre of the composite section, and cannot exceed
/// the channel leg or reach below the girder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapChannel {
    /// Catalog designation when taken from the shape database
    #[serde(default)]
    pub designation: Option<String>,
    pub area_mm2: f64,
    /// Channel minor-axis inertia, which bends about the girder's major axis
    pub inertia_mm4: f64,
    pub height_mm: f64,
    pub centroid_offset_mm: f64,
    /// Clear distance between the channel flanges; must fit over the top flange
    #[serde(default)]
    pub clear_depth_mm: Option<f64>,
    /// Length of the channel legs hanging beside the top flange
    #[serde(default)]
    pub leg_length_mm: Option<f64>,
}

impl CapChannel {
    /// Build a cap from a UPN or PFC catalog entry
    pub fn from_catalog(shape: &SteelShape) -> CalcResult<Self> {
        if !shape.shape_type.is_channel() {
            return Err(CalcError::invalid_input(
                "cap_channel",
                shape.label.clone(),
                "Cap reinforcement must be a channel (UPN or PFC)",
            ));
        }
        let cy = shape.cy_mm.ok_or_else(|| {
            CalcError::invalid_input(&shape.label, "cy", "Channel has no centroid distance in the catalog")
        })?;
        Ok(Self {
            designation: Some(shape.label.clone()),
            area_mm2: shape.area_mm2,
            inertia_mm4: shape.iy_mm4,
            height_mm: shape.web_thickness_mm,
            centroid_offset_mm: cy,
            clear_depth_mm: Some(shape.depth_mm - 2.0 * shape.flange_thickness_mm),
            leg_length_mm: Some(shape.flange_width_mm),
        })
    }

    fn validate(&self, top_flange_width_mm: f64, girder_depth_mm: f64) -> CalcResult<()> {
        let positive = [
            ("area_mm2", self.area_mm2),
            ("inertia_mm4", self.inertia_mm4),
            ("height_mm", self.height_mm),
            ("centroid_offset_mm", self.centroid_offset_mm),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_geometry(
                    "cap channel",
                    format!("{} must be positive, got {}", field, value),
                ));
            }
        }
        let reach = match self.leg_length_mm {
            Some(leg) if !leg.is_finite() || leg < self.height_mm => {
                return Err(CalcError::invalid_geometry(
                    "cap channel",
                    format!("leg length {} mm is shorter than the {} mm web", leg, self.height_mm),
                ));
            }
            Some(leg) => leg,
            None => self.height_mm + girder_depth_mm,
        };
        if self.centroid_offset_mm > reach {
            return Err(CalcError::invalid_geometry(
                "cap channel",
                format!(
                    "centroid offset {:.1} mm lies outside the channel (reach {:.1} mm)",
                    self.centroid_offset_mm, reach
                ),
            ));
        }
        if let Some(clear) = self.clear_depth_mm {
            if clear < top_flange_width_mm {
                return Err(CalcError::invalid_geometry(
                    "cap channel",
                    format!(
                        "clear depth {:.1} mm does not fit over a {:.1} mm top flange",
                        clear, top_flange_width_mm
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Plate dimensions of a welded I-section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "depth_mm": 600.0,
///   "top_flange_width_mm": 300.0,
///   "top_flange_thickness_mm": 20.0,
///   "bottom_flange_width_mm": 250.0,
///   "bottom_flange_thickness_mm": 16.0,
///   "web_thickness_mm": 8.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Overall depth of the I-section, excluding any cap
    pub depth_mm: f64,
    pub top_flange_width_mm: f64,
    pub top_flange_thickness_mm: f64,
    pub bottom_flange_width_mm: f64,
    pub bottom_flange_thickness_mm: f64,
    pub web_thickness_mm: f64,
    #[serde(default)]
    pub cap: Option<CapChannel>,
}

impl Default for SectionGeometry {
    fn default() -> Self {
        Self {
            depth_mm: 500.0,
            top_flange_width_mm: 200.0,
            top_flange_thickness_mm: 16.0,
            bottom_flange_width_mm: 150.0,
            bottom_flange_thickness_mm: 12.0,
            web_thickness_mm: 10.0,
            cap: None,
        }
    }
}

impl SectionGeometry {
    /// Doubly-symmetric plate girder
    pub fn symmetric(depth_mm: f64, flange_width_mm: f64, flange_thickness_mm: f64, web_thickness_mm: f64) -> Self {
        Self {
            depth_mm,
            top_flange_width_mm: flange_width_mm,
            top_flange_thickness_mm: flange_thickness_mm,
            bottom_flange_width_mm: flange_width_mm,
            bottom_flange_thickness_mm: flange_thickness_mm,
            web_thickness_mm,
            cap: None,
        }
    }

    pub fn with_top_flange(mut self, width_mm: f64, thickness_mm: f64) -> Self {
        self.top_flange_width_mm = width_mm;
        self.top_flange_thickness_mm = thickness_mm;
        self
    }

    pub fn with_bottom_flange(mut self, width_mm: f64, thickness_mm: f64) -> Self {
        self.bottom_flange_width_mm = width_mm;
        self.bottom_flange_thickness_mm = thickness_mm;
        self
    }

    pub fn with_cap(mut self, cap: CapChannel) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Clear web height between flanges
    pub fn web_height_mm(&self) -> f64 {
        self.depth_mm - self.top_flange_thickness_mm - self.bottom_flange_thickness_mm
    }

    /// Validate plate dimensions.
    pub fn validate(&self) -> CalcResult<()> {
        let plates = [
            ("depth", self.depth_mm),
            ("top flange width", self.top_flange_width_mm),
            ("top flange thickness", self.top_flange_thickness_mm),
            ("bottom flange width", self.bottom_flange_width_mm),
            ("bottom flange thickness", self.bottom_flange_thickness_mm),
            ("web thickness", self.web_thickness_mm),
        ];
        for (component, value) in plates {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_geometry(
                    component,
                    format!("must be a positive dimension, got {}", value),
                ));
            }
        }
        if self.web_height_mm() <= 0.0 {
            return Err(CalcError::invalid_geometry(
                "web",
                format!(
                    "flange thicknesses ({} + {} mm) leave no web in a {} mm deep section",
                    self.top_flange_thickness_mm, self.bottom_flange_thickness_mm, self.depth_mm
                ),
            ));
        }
        if let Some(cap) = &self.cap {
            cap.validate(self.top_flange_width_mm, self.depth_mm)?;
        }
        Ok(())
    }
}

// ============================================================================
// Derived Section
// ============================================================================

/// How the section was made, which selects the flange local buckling limit
/// and whether flange-to-web welds are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// Welded plate girder
    BuiltUp,
    /// Rolled I-shape
    Rolled,
}

/// A cross-section with all derived properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub kind: SectionKind,
    pub geometry: SectionGeometry,

    pub area_mm2: f64,
    /// Elastic neutral axis measured from the bottom fibre
    pub y_bar_mm: f64,
    /// Top fibre height including any cap
    pub total_height_mm: f64,
    pub ix_mm4: f64,
    pub iy_mm4: f64,
    /// Elastic modulus to the top (compression) fibre
    pub sxc_mm3: f64,
    /// Elastic modulus to the bottom (tension) fibre
    pub sxt_mm3: f64,
    pub sy_mm3: f64,
    pub zx_mm3: f64,
    pub rx_mm: f64,
    pub ry_mm: f64,
    /// Effective radius of gyration for LTB
    pub rts_mm: f64,
    pub j_mm4: f64,
    pub cw_mm6: f64,
    /// Distance between flange centroids
    pub ho_mm: f64,
    pub mass_kg_per_m: f64,
}

impl Section {
    /// Build a rolled section from a catalog I-shape, optionally with a cap.
    ///
    /// Catalog A, Ix, Iy and Sx are used directly; Zx = 1.12·Sx,
    /// J = 2·bf·tf³/3 + hw·tw³/3, ho = d - tf and Cw = Iy·ho²/4.
    pub fn from_rolled(shape: &SteelShape, cap: Option<CapChannel>) -> CalcResult<Self> {
        if shape.shape_type.is_channel() {
            return Err(CalcError::invalid_input(
                "section",
                shape.label.clone(),
                "A channel cannot be used as the girder section",
            ));
        }
        let (ix, sx) = match (shape.ix_mm4, shape.sx_mm3) {
            (Some(ix), Some(sx)) => (ix, sx),
            _ => {
                return Err(CalcError::invalid_input(
                    "section",
                    shape.label.clone(),
                    "Catalog entry lacks Ix or Sx",
                ))
            }
        };

        let geometry = SectionGeometry {
            cap: cap.clone(),
            ..SectionGeometry::symmetric(
                shape.depth_mm,
                shape.flange_width_mm,
                shape.flange_thickness_mm,
                shape.web_thickness_mm,
            )
        };
        geometry.validate()?;

        let d = shape.depth_mm;
        let bf = shape.flange_width_mm;
        let tf = shape.flange_thickness_mm;
        let hw = geometry.web_height_mm();

        let mut parts = vec![(shape.area_mm2, d / 2.0)];
        if let Some(cap) = &cap {
            parts.push((cap.area_mm2, d + cap.height_mm - cap.centroid_offset_mm));
        }
        let area = parts.iter().map(|(a, _)| a).sum::<f64>();
        let y_bar = composite_centroid(&parts);
        let total_height = d + cap.as_ref().map_or(0.0, |c| c.height_mm);
        ensure_centroid_within(y_bar, total_height)?;

        let mut ix_total = parallel_axis(ix, shape.area_mm2, d / 2.0 - y_bar);
        if let Some(cap) = &cap {
            let y_cap = d + cap.height_mm - cap.centroid_offset_mm;
            ix_total += parallel_axis(cap.inertia_mm4, cap.area_mm2, y_cap - y_bar);
        }

        let (sxc, sxt) = if cap.is_some() {
            (ix_total / (total_height - y_bar), ix_total / y_bar)
        } else {
            (sx, sx)
        };

        let j = 2.0 * thin_plate_torsion_constant(bf, tf) + thin_plate_torsion_constant(hw, shape.web_thickness_mm);
        let ho = d - tf;
        let cw = shape.iy_mm4 * ho * ho / 4.0;
        let rts = checked_sqrt(checked_sqrt(shape.iy_mm4 * cw, "rts")? / sxc, "rts")?;

        let section = Self {
            name: match &cap {
                Some(c) => format!("{} + {}", shape.label, c.designation.as_deref().unwrap_or("cap")),
                None => shape.label.clone(),
            },
            kind: SectionKind::Rolled,
            geometry,
            area_mm2: area,
            y_bar_mm: y_bar,
            total_height_mm: total_height,
            ix_mm4: ix_total,
            iy_mm4: shape.iy_mm4,
            sxc_mm3: sxc,
            sxt_mm3: sxt,
            sy_mm3: shape.iy_mm4 / (bf / 2.0),
            zx_mm3: ROLLED_SHAPE_FACTOR * sxc.min(sxt),
            rx_mm: radius_of_gyration(ix_total, area)?,
            ry_mm: radius_of_gyration(shape.iy_mm4, area)?,
            rts_mm: rts,
            j_mm4: j,
            cw_mm6: cw,
            ho_mm: ho,
            mass_kg_per_m: shape.mass_kg_per_m + cap.as_ref().map_or(0.0, |c| c.area_mm2 * STEEL_DENSITY / 1e6),
        };
        debug!(name = %section.name, ix = section.ix_mm4, "rolled section built");
        Ok(section)
    }

    /// Clear web height
    pub fn web_height_mm(&self) -> f64 {
        self.geometry.web_height_mm()
    }

    /// Web slenderness h/tw
    pub fn web_slenderness(&self) -> f64 {
        self.web_height_mm() / self.geometry.web_thickness_mm
    }

    /// Top (compression) flange slenderness bf/2tf
    pub fn flange_slenderness(&self) -> f64 {
        self.geometry.top_flange_width_mm / (2.0 * self.geometry.top_flange_thickness_mm)
    }

    /// Governing elastic section modulus (the smaller fibre modulus)
    pub fn sx_min_mm3(&self) -> f64 {
        self.sxc_mm3.min(self.sxt_mm3)
    }

    /// Self-weight as a line load (kN/m)
    pub fn self_weight_kn_per_m(&self) -> f64 {
        self.mass_kg_per_m * crate::materials::GRAVITY / 1000.0
    }
}

// ============================================================================
// Built-up Derivation
// ============================================================================

/// Horizontal plate layer used for centroid and plastic neutral axis work
#[derive(Debug, Clone, Copy)]
struct Layer {
    width: f64,
    y_bottom: f64,
    y_top: f64,
}

impl Layer {
    fn area(&self) -> f64 {
        self.width * (self.y_top - self.y_bottom)
    }

    fn centroid(&self) -> f64 {
        (self.y_bottom + self.y_top) / 2.0
    }

    fn area_below(&self, y: f64) -> f64 {
        self.width * (y.clamp(self.y_bottom, self.y_top) - self.y_bottom)
    }

    /// First moment of area about y, taken as positive on both sides
    fn first_moment_abs(&self, y: f64) -> f64 {
        if y <= self.y_bottom || y >= self.y_top {
            self.area() * (self.centroid() - y).abs()
        } else {
            self.width * ((y - self.y_bottom).powi(2) + (self.y_top - y).powi(2)) / 2.0
        }
    }
}

/// Plastic section modulus from the equal-area axis.
///
/// `lumped` holds (area, y) parts treated as concentrated at their centroid.
fn plastic_modulus(layers: &[Layer], lumped: &[(f64, f64)], top: f64) -> (f64, f64) {
    let total = layers.iter().map(Layer::area).sum::<f64>() + lumped.iter().map(|(a, _)| a).sum::<f64>();
    let half = total / 2.0;
    let area_below = |y: f64| {
        layers.iter().map(|l| l.area_below(y)).sum::<f64>()
            + lumped.iter().filter(|(_, yc)| *yc < y).map(|(a, _)| a).sum::<f64>()
    };

    let (mut lo, mut hi) = (0.0_f64, top);
    for _ in 0..PNA_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if area_below(mid) < half {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let y_pna = 0.5 * (lo + hi);

    let z = layers.iter().map(|l| l.first_moment_abs(y_pna)).sum::<f64>()
        + lumped.iter().map(|(a, y)| a * (y - y_pna).abs()).sum::<f64>();
    (z, y_pna)
}

/// Derive all properties of a built-up plate girder.
///
/// ```rust
/// use runway_core::calculations::section::{build_section, SectionGeometry};
///
/// let geometry = SectionGeometry::symmetric(600.0, 300.0, 20.0, 10.0);
/// let section = build_section(&geometry).unwrap();
/// assert!((section.y_bar_mm - 300.0).abs() < 1e-9);
/// assert!(section.zx_mm3 > section.sxc_mm3);
/// ```
pub fn build_section(geometry: &SectionGeometry) -> CalcResult<Section> {
    geometry.validate()?;

    let d = geometry.depth_mm;
    let (bft, tft) = (geometry.top_flange_width_mm, geometry.top_flange_thickness_mm);
    let (bfb, tfb) = (geometry.bottom_flange_width_mm, geometry.bottom_flange_thickness_mm);
    let tw = geometry.web_thickness_mm;
    let hw = geometry.web_height_mm();

    let layers = [
        Layer { width: bfb, y_bottom: 0.0, y_top: tfb },
        Layer { width: tw, y_bottom: tfb, y_top: tfb + hw },
        Layer { width: bft, y_bottom: tfb + hw, y_top: d },
    ];
    let own_inertia = [
        rectangular_moment_of_inertia(bfb, tfb),
        rectangular_moment_of_inertia(tw, hw),
        rectangular_moment_of_inertia(bft, tft),
    ];

    let mut parts: Vec<(f64, f64)> = layers.iter().map(|l| (l.area(), l.centroid())).collect();
    let mut lumped = Vec::new();
    let mut total_height = d;
    if let Some(cap) = &geometry.cap {
        let y_cap = d + cap.height_mm - cap.centroid_offset_mm;
        parts.push((cap.area_mm2, y_cap));
        lumped.push((cap.area_mm2, y_cap));
        total_height += cap.height_mm;
    }

    let area: f64 = parts.iter().map(|(a, _)| a).sum();
    let y_bar = composite_centroid(&parts);

    let mut ix: f64 = layers
        .iter()
        .zip(own_inertia)
        .map(|(l, i_own)| parallel_axis(i_own, l.area(), l.centroid() - y_bar))
        .sum();
    if let Some(cap) = &geometry.cap {
        ix += parallel_axis(cap.inertia_mm4, cap.area_mm2, d + cap.height_mm - cap.centroid_offset_mm - y_bar);
    }

    let iy_top = rectangular_moment_of_inertia(tft, bft);
    let iy_bottom = rectangular_moment_of_inertia(tfb, bfb);
    let iy = iy_top + iy_bottom + rectangular_moment_of_inertia(hw, tw);

    let sxc = ix / (total_height - y_bar);
    let sxt = ix / y_bar;
    let (zx, y_pna) = plastic_modulus(&layers, &lumped, total_height);

    let ho = d - (tft + tfb) / 2.0;
    let cw = warping_constant(ho, iy_top, iy_bottom);
    let j = thin_plate_torsion_constant(bft, tft)
        + thin_plate_torsion_constant(bfb, tfb)
        + thin_plate_torsion_constant(hw, tw);
    let rts = checked_sqrt(checked_sqrt(iy * cw, "rts")? / sxc, "rts")?;

    ensure_centroid_within(y_bar, total_height)?;
    debug!(area, y_bar, y_pna, ix, zx, "built-up section derived");

    Ok(Section {
        name: match geometry.cap.as_ref().and_then(|c| c.designation.as_deref()) {
            Some(cap) => format!("Built-up {:.0}x{:.0} + {}", d, bft.max(bfb), cap),
            None => format!("Built-up {:.0}x{:.0}", d, bft.max(bfb)),
        },
        kind: SectionKind::BuiltUp,
        geometry: geometry.clone(),
        area_mm2: area,
        y_bar_mm: y_bar,
        total_height_mm: total_height,
        ix_mm4: ix,
        iy_mm4: iy,
        sxc_mm3: sxc,
        sxt_mm3: sxt,
        sy_mm3: iy / (bft.max(bfb) / 2.0),
        zx_mm3: zx,
        rx_mm: radius_of_gyration(ix, area)?,
        ry_mm: radius_of_gyration(iy, area)?,
        rts_mm: rts,
        j_mm4: j,
        cw_mm6: cw,
        ho_mm: ho,
        mass_kg_per_m: area * STEEL_DENSITY / 1e6,
    })
}

fn ensure_centroid_within(y_bar: f64, total_height: f64) -> CalcResult<()> {
    if !(y_bar > 0.0 && y_bar < total_height) {
        return Err(CalcError::invalid_geometry(
            "section",
            format!("centroid {:.1} mm falls outside the {:.1} mm deep section", y_bar, total_height),
        ));
    }
    Ok(())
}

/// Web plate area used by a rectangle check (kept for shear work)
pub(crate) fn web_area_mm2(section: &Section) -> f64 {
    rectangular_area(section.web_height_mm(), section.geometry.web_thickness_mm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::builtin_shapes;

    fn unequal_girder() -> SectionGeometry {
        SectionGeometry::symmetric(500.0, 200.0, 16.0, 10.0).with_bottom_flange(150.0, 12.0)
    }

    #[test]
    fn test_symmetric_girder_properties() {
        let s = build_section(&SectionGeometry::symmetric(600.0, 300.0, 20.0, 10.0)).unwrap();
        // A = 2·300·20 + 560·10
        assert!((s.area_mm2 - 17_600.0).abs() < 1e-9);
        // Ix = 10·560³/12 + 2·(300·20³/12 + 6000·290²)
        let ix = 10.0 * 560.0_f64.powi(3) / 12.0 + 2.0 * (300.0 * 8000.0 / 12.0 + 6000.0 * 290.0 * 290.0);
        assert!((s.ix_mm4 - ix).abs() / ix < 1e-12);
        assert!((s.sxc_mm3 - s.sxt_mm3).abs() < 1e-6);
        // Z = 2·6000·290 + 10·280²
        assert!((s.zx_mm3 - (2.0 * 6000.0 * 290.0 + 10.0 * 280.0 * 280.0)).abs() < 1.0);
        assert!((s.ho_mm - 580.0).abs() < 1e-12);
        assert!((s.mass_kg_per_m - 17_600.0 * 7850.0 / 1e6).abs() < 1e-9);
    }

    #[test]
    fn test_unequal_flanges_shift_centroid_up() {
        let s = build_section(&unequal_girder()).unwrap();
        assert!(s.y_bar_mm > 250.0);
        assert!(s.sxt_mm3 < s.sxc_mm3);
        assert!(s.zx_mm3 > s.sx_min_mm3());
    }

    #[test]
    fn test_derivation_is_bit_identical() {
        let g = unequal_girder();
        assert_eq!(build_section(&g).unwrap(), build_section(&g).unwrap());
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let err = build_section(&SectionGeometry::symmetric(500.0, 200.0, 16.0, 0.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");

        let err = build_section(&SectionGeometry::symmetric(30.0, 200.0, 16.0, 8.0)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidGeometry { ref component, .. } if component == "web"));
    }

    #[test]
    fn test_cap_channel_raises_centroid() {
        let upn = builtin_shapes().lookup_channel("UPN 260").unwrap();
        let cap = CapChannel::from_catalog(upn).unwrap();
        let bare = build_section(&unequal_girder()).unwrap();
        let capped = build_section(&unequal_girder().with_cap(cap.clone())).unwrap();

        assert!(capped.y_bar_mm > bare.y_bar_mm);
        assert!(capped.ix_mm4 > bare.ix_mm4);
        assert!((capped.total_height_mm - (500.0 + cap.height_mm)).abs() < 1e-12);
        assert!(capped.y_bar_mm < capped.total_height_mm);
        assert!((capped.area_mm2 - bare.area_mm2 - cap.area_mm2).abs() < 1e-9);
        // Minor-axis properties exclude the cap
        assert_eq!(capped.iy_mm4, bare.iy_mm4);
    }

    #[test]
    fn test_cap_too_narrow_rejected() {
        let upn = builtin_shapes().lookup_channel("UPN 100").unwrap();
        let cap = CapChannel::from_catalog(upn).unwrap();
        let err = build_section(&unequal_girder().with_cap(cap)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_cap_centroid_outside_channel_rejected() {
        let cap = CapChannel {
            designation: None,
            area_mm2: 5000.0,
            inertia_mm4: 1.0e6,
            height_mm: 10.0,
            centroid_offset_mm: 1000.0,
            clear_depth_mm: None,
            leg_length_mm: None,
        };
        let girder = SectionGeometry::symmetric(600.0, 300.0, 20.0, 10.0);
        let err = build_section(&girder.clone().with_cap(cap.clone())).unwrap_err();
        assert!(matches!(err, CalcError::InvalidGeometry { ref component, .. } if component == "cap channel"));

        // A known leg bounds the offset more tightly than the girder depth
        let on_leg = CapChannel {
            centroid_offset_mm: 90.0,
            leg_length_mm: Some(80.0),
            ..cap.clone()
        };
        assert!(build_section(&girder.clone().with_cap(on_leg)).is_err());

        let plausible = CapChannel {
            centroid_offset_mm: 25.0,
            leg_length_mm: Some(80.0),
            ..cap
        };
        let s = build_section(&girder.with_cap(plausible)).unwrap();
        assert!(s.y_bar_mm > 0.0 && s.y_bar_mm < s.total_height_mm);
    }

    #[test]
    fn test_rolled_section_from_catalog() {
        let ipe = builtin_shapes().lookup("IPE 400").unwrap();
        let s = Section::from_rolled(ipe, None).unwrap();
        assert_eq!(s.kind, SectionKind::Rolled);
        assert_eq!(s.ix_mm4, ipe.ix_mm4.unwrap());
        assert!((s.zx_mm3 - 1.12 * ipe.sx_mm3.unwrap()).abs() < 1e-6);
        assert!((s.ho_mm - (ipe.depth_mm - ipe.flange_thickness_mm)).abs() < 1e-12);
        assert!((s.y_bar_mm - ipe.depth_mm / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rolled_with_cap() {
        let heb = builtin_shapes().lookup("HEB 200").unwrap();
        let upn = builtin_shapes().lookup_channel("UPN 300").unwrap();
        let cap = CapChannel::from_catalog(upn).unwrap();
        let s = Section::from_rolled(heb, Some(cap)).unwrap();
        assert!(s.ix_mm4 > heb.ix_mm4.unwrap());
        assert!(s.sxc_mm3 < s.sxt_mm3);
        assert!(s.name.contains("UPN 300"));
    }

    #[test]
    fn test_channel_rejected_as_girder() {
        let upn = builtin_shapes().lookup_channel("UPN 200").unwrap();
        assert!(Section::from_rolled(upn, None).is_err());
    }
}
