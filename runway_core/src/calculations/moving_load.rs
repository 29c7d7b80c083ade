//! # Moving-Load Envelope Solver
//!
//! Places the wheel groups of one to three cranes on a simply-supported
//! runway span and searches for the placements that produce the largest
//! bending moment, shear and support reaction.
//!
//! ## Search
//!
//! The search is a fixed-resolution linear sweep, not a closed-form optimum.
//! Each candidate placement is evaluated with [`analyze_load`], which samples
//! the span at the supports, every wheel and a uniform partition. The
//! discretization error of a sweep with `n` samples is bounded by the sample
//! step `(L - group length)/(n - 1)`; the sample counts live in
//! [`SearchResolution`].
//!
//! Cases generated:
//!
//! | Cranes | Case | Placement |
//! |--------|------|-----------|
//! | each | Max M | sweep over `[0, L - length]` |
//! | each | Max V (left / right) | first or last wheel on a support |
//! | 2-3 | Max M | train in input order, swept |
//! | 2-3 | Max V | each crane leading at the left support, and mirrored at the right |
//! | 2-3 | Max V (heaviest first) | cranes sorted by wheel load, at the left support |
//! | 2-3 | Max Reaction | every crane order, swept, keeping max(R_left, R_right) |
//!
//! Adjacent cranes keep a clear gap equal to the sum of their facing buffer
//! projections. Any placement that does not fit on the span is skipped;
//! only an empty result is an error.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::calculations::moving_load::{find_critical_cases, select_governing, SearchResolution};
//! use runway_core::loads::{CraneParams, CraneWheelLoad};
//!
//! let crane = CraneWheelLoad::new(CraneParams::new(1).with_capacity(10.0)).unwrap();
//! let cases = find_critical_cases(8.0, &[crane], &SearchResolution::default()).unwrap();
//! let governing = select_governing(&cases).unwrap();
//! assert!(governing.moment.moment_knm > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::beam::{
    point_loads_moment, point_loads_reactions, point_loads_shear_left, point_loads_shear_right,
};
use crate::errors::{CalcError, CalcResult};
use crate::loads::CraneWheelLoad;

/// Most cranes that can share one runway span in the search
pub const MAX_CRANES: usize = 3;

// ============================================================================
// Configuration
// ============================================================================

/// Sample counts of the discretized search.
///
/// ## JSON Example
///
/// ```json
/// {
///   "single_crane_moment": 60,
///   "two_crane_moment": 30,
///   "three_crane_moment": 20,
///   "reaction_sweep": 40,
///   "profile_partitions": 100
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResolution {
    /// Positions tried for a single crane's maximum moment
    pub single_crane_moment: usize,
    /// Positions tried for a two-crane train's maximum moment
    pub two_crane_moment: usize,
    /// Positions tried for a three-crane train's maximum moment
    pub three_crane_moment: usize,
    /// Positions tried per crane order in the reaction sweep
    pub reaction_sweep: usize,
    /// Uniform partitions of the span evaluated by [`analyze_load`]
    pub profile_partitions: usize,
}

impl Default for SearchResolution {
    fn default() -> Self {
        Self {
            single_crane_moment: 60,
            two_crane_moment: 30,
            three_crane_moment: 20,
            reaction_sweep: 40,
            profile_partitions: 100,
        }
    }
}

impl SearchResolution {
    /// Same sample count for every sweep
    pub fn uniform(samples: usize) -> Self {
        Self {
            single_crane_moment: samples,
            two_crane_moment: samples,
            three_crane_moment: samples,
            reaction_sweep: samples,
            profile_partitions: samples,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        let counts = [
            ("single_crane_moment", self.single_crane_moment),
            ("two_crane_moment", self.two_crane_moment),
            ("three_crane_moment", self.three_crane_moment),
            ("reaction_sweep", self.reaction_sweep),
            ("profile_partitions", self.profile_partitions),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(CalcError::invalid_input(field, "0", "Sample count must be at least 1"));
            }
        }
        Ok(())
    }

    fn moment_samples(&self, cranes: usize) -> usize {
        match cranes {
            1 => self.single_crane_moment,
            2 => self.two_crane_moment,
            _ => self.three_crane_moment,
        }
    }
}

// ============================================================================
// Load Cases
// ============================================================================

/// One wheel of a placed crane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelPosition {
    pub crane_id: u32,
    /// 1-based index within the crane's end truck
    pub wheel_index: usize,
    /// Distance from the left support (m)
    pub position_m: f64,
    /// Vertical load including impact (kN)
    pub vertical_kn: f64,
    /// Lateral load (kN)
    pub lateral_kn: f64,
}

/// What a load case was searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseKind {
    MaxMoment,
    MaxShear,
    MaxReaction,
}

/// A placement of wheels with its internal forces.
///
/// Moments and shears come from the left free body. `shear_kn` is the
/// largest shear magnitude, taking both limits at each wheel; `shears`
/// stores the right-hand limit for diagrams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    pub label: String,
    pub kind: CaseKind,
    pub wheels: Vec<WheelPosition>,
    /// Moment with the largest magnitude (kN·m)
    pub moment_knm: f64,
    pub moment_position_m: f64,
    /// Largest shear magnitude (kN)
    pub shear_kn: f64,
    pub shear_position_m: f64,
    pub reaction_left_kn: f64,
    pub reaction_right_kn: f64,
    /// Sample points (m)
    pub positions: Vec<f64>,
    pub moments: Vec<f64>,
    pub shears: Vec<f64>,
}

impl LoadCase {
    fn labelled(mut self, label: impl Into<String>, kind: CaseKind) -> Self {
        self.label = label.into();
        self.kind = kind;
        self
    }

    /// Larger of the two support reactions
    pub fn max_reaction(&self) -> f64 {
        self.reaction_left_kn.max(self.reaction_right_kn)
    }

    /// Sum of the vertical wheel loads
    pub fn total_vertical(&self) -> f64 {
        self.wheels.iter().map(|w| w.vertical_kn).sum()
    }

    /// Largest simple-beam moment from the lateral wheel loads at the same
    /// positions (kN·m). The maximum under point loads occurs at a load.
    pub fn lateral_moment_knm(&self, span_m: f64) -> f64 {
        let loads: Vec<(f64, f64)> = self.wheels.iter().map(|w| (w.lateral_kn, w.position_m)).collect();
        let (r1, _) = point_loads_reactions(&loads, span_m);
        loads
            .iter()
            .map(|(_, a)| point_loads_moment(&loads, r1, *a).abs())
            .fold(0.0, f64::max)
    }
}

/// Evenly spaced samples over `[start, end]`, both ends included.
///
/// A single sample, or a range that has collapsed to a point, yields `[start]`.
pub fn sample_positions(start: f64, end: f64, samples: usize) -> Vec<f64> {
    if samples <= 1 || end <= start {
        return vec![start];
    }
    let step = (end - start) / (samples - 1) as f64;
    (0..samples)
        .map(|i| if i == samples - 1 { end } else { start + step * i as f64 })
        .collect()
}

/// Reactions, moments and shears of a set of wheels on a simple span.
///
/// Evaluated at the supports, each wheel and `partitions` equal divisions of
/// the span. Returns `None` when there are no wheels. Ties keep the first
/// point reached from the left.
pub fn analyze_load(span_m: f64, wheels: Vec<WheelPosition>, partitions: usize) -> Option<LoadCase> {
    if wheels.is_empty() {
        return None;
    }
    let loads: Vec<(f64, f64)> = wheels.iter().map(|w| (w.vertical_kn, w.position_m)).collect();
    let (r_left, r_right) = point_loads_reactions(&loads, span_m);

    let partitions = partitions.max(1);
    let mut positions: Vec<f64> = std::iter::once(0.0)
        .chain(std::iter::once(span_m))
        .chain(wheels.iter().map(|w| w.position_m))
        .chain((0..=partitions).map(|i| i as f64 * span_m / partitions as f64))
        .collect();
    positions.sort_by(f64::total_cmp);
    positions.dedup();

    let mut moments = Vec::with_capacity(positions.len());
    let mut shears = Vec::with_capacity(positions.len());
    let (mut m_idx, mut m_abs) = (0, f64::NEG_INFINITY);
    let (mut v_idx, mut v_abs) = (0, f64::NEG_INFINITY);

    for (i, &x) in positions.iter().enumerate() {
        let m = point_loads_moment(&loads, r_left, x);
        let v_left = point_loads_shear_left(&loads, r_left, x);
        let v_right = point_loads_shear_right(&loads, r_left, x);

        if m.abs() > m_abs {
            m_abs = m.abs();
            m_idx = i;
        }
        let v = v_left.abs().max(v_right.abs());
        if v > v_abs {
            v_abs = v;
            v_idx = i;
        }
        moments.push(m);
        shears.push(v_right);
    }

    Some(LoadCase {
        label: String::new(),
        kind: CaseKind::MaxMoment,
        wheels,
        moment_knm: moments[m_idx],
        moment_position_m: positions[m_idx],
        shear_kn: v_abs,
        shear_position_m: positions[v_idx],
        reaction_left_kn: r_left,
        reaction_right_kn: r_right,
        positions,
        moments,
        shears,
    })
}

// ============================================================================
// Crane Trains
// ============================================================================

/// A crane reduced to its wheel group
#[derive(Debug, Clone, Copy)]
struct WheelGroup<'a> {
    crane: &'a CraneWheelLoad,
    vertical_kn: f64,
    lateral_kn: f64,
    length_m: f64,
}

impl<'a> WheelGroup<'a> {
    fn new(crane: &'a CraneWheelLoad) -> Self {
        Self {
            crane,
            vertical_kn: crane.wheel_load_with_impact(),
            lateral_kn: crane.lateral_per_wheel(),
            length_m: crane.group_length_m(),
        }
    }

    fn id(&self) -> u32 {
        self.crane.crane_id()
    }

    fn wheels_from(&self, start_m: f64) -> impl Iterator<Item = WheelPosition> + '_ {
        let wheel_base = self.crane.wheel_base_m();
        (0..self.crane.wheels_per_rail()).map(move |i| WheelPosition {
            crane_id: self.id(),
            wheel_index: i + 1,
            position_m: start_m + wheel_base * i as f64,
            vertical_kn: self.vertical_kn,
            lateral_kn: self.lateral_kn,
        })
    }

    fn describe(&self) -> String {
        format!("Crane {} ({:.0} t)", self.id(), self.crane.params().capacity_t)
    }
}

/// Clear gap between two adjacent cranes
fn buffer_gap(leading: &WheelGroup, trailing: &WheelGroup) -> f64 {
    leading.crane.params().buffer_right_m + trailing.crane.params().buffer_left_m
}

/// Distance from the first wheel of the first crane to the last wheel of the last
fn train_length(order: &[WheelGroup]) -> f64 {
    let groups: f64 = order.iter().map(|g| g.length_m).sum();
    let gaps: f64 = order.windows(2).map(|pair| buffer_gap(&pair[0], &pair[1])).sum();
    groups + gaps
}

/// Wheels of a crane train whose first wheel sits at `start_m`
fn place_train(order: &[WheelGroup], start_m: f64) -> Vec<WheelPosition> {
    let mut wheels = Vec::new();
    let mut cursor = start_m;
    for (i, group) in order.iter().enumerate() {
        wheels.extend(group.wheels_from(cursor));
        cursor += group.length_m;
        if let Some(next) = order.get(i + 1) {
            cursor += buffer_gap(group, next);
        }
    }
    wheels
}

fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for rest in permutations(n - 1) {
        for slot in 0..=rest.len() {
            let mut order = rest.clone();
            order.insert(slot, n - 1);
            result.push(order);
        }
    }
    result.sort();
    result
}

/// Sweep a train over its feasible range, keeping the case with the largest score
fn sweep<F>(span_m: f64, order: &[WheelGroup], samples: usize, partitions: usize, score: F) -> Option<LoadCase>
where
    F: Fn(&LoadCase) -> f64,
{
    let free = span_m - train_length(order);
    let mut best: Option<(f64, LoadCase)> = None;
    for start in sample_positions(0.0, free, samples) {
        if let Some(case) = analyze_load(span_m, place_train(order, start), partitions) {
            let value = score(&case);
            if best.as_ref().map_or(true, |(b, _)| value > *b) {
                best = Some((value, case));
            }
        }
    }
    best.map(|(_, case)| case)
}

fn single_crane_cases(span_m: f64, group: WheelGroup, resolution: &SearchResolution, cases: &mut Vec<LoadCase>) {
    if group.length_m > span_m {
        debug!(crane = group.id(), length = group.length_m, span_m, "crane longer than span, skipped");
        return;
    }
    let name = group.describe();
    let order = [group];
    let partitions = resolution.profile_partitions;

    if let Some(case) = sweep(span_m, &order, resolution.single_crane_moment, partitions, |c| c.moment_knm.abs()) {
        cases.push(case.labelled(format!("{}: Max M", name), CaseKind::MaxMoment));
    }
    if let Some(case) = analyze_load(span_m, place_train(&order, 0.0), partitions) {
        cases.push(case.labelled(format!("{}: Max V (left)", name), CaseKind::MaxShear));
    }
    if let Some(case) = analyze_load(span_m, place_train(&order, span_m - group.length_m), partitions) {
        cases.push(case.labelled(format!("{}: Max V (right)", name), CaseKind::MaxShear));
    }
}

fn multi_crane_cases(span_m: f64, groups: &[WheelGroup], resolution: &SearchResolution, cases: &mut Vec<LoadCase>) {
    let ids: Vec<String> = groups.iter().map(|g| g.id().to_string()).collect();
    let name = format!("{} Cranes ({})", groups.len(), ids.join("+"));
    let partitions = resolution.profile_partitions;

    let required = train_length(groups);
    if required > span_m {
        debug!(cranes = %name, required, span_m, "crane train longer than span, skipped");
        return;
    }

    // === Max moment, input order ===
    let samples = resolution.moment_samples(groups.len());
    if let Some(case) = sweep(span_m, groups, samples, partitions, |c| c.moment_knm.abs()) {
        cases.push(case.labelled(format!("{}: Max M", name), CaseKind::MaxMoment));
    }

    // === Max shear, each crane leading at a support ===
    for (i, leader) in groups.iter().enumerate() {
        let others = groups.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, g)| *g);

        let left: Vec<WheelGroup> = std::iter::once(*leader).chain(others.clone()).collect();
        if train_length(&left) <= span_m {
            if let Some(case) = analyze_load(span_m, place_train(&left, 0.0), partitions) {
                let label = format!("{}: Max V (crane {} at left support)", name, leader.id());
                cases.push(case.labelled(label, CaseKind::MaxShear));
            }
        }

        let right: Vec<WheelGroup> = others.chain(std::iter::once(*leader)).collect();
        let length = train_length(&right);
        if length <= span_m {
            if let Some(case) = analyze_load(span_m, place_train(&right, span_m - length), partitions) {
                let label = format!("{}: Max V (crane {} at right support)", name, leader.id());
                cases.push(case.labelled(label, CaseKind::MaxShear));
            }
        }
    }

    // === Max shear, heaviest first ===
    let mut heaviest_first = groups.to_vec();
    heaviest_first.sort_by(|a, b| b.vertical_kn.total_cmp(&a.vertical_kn));
    if train_length(&heaviest_first) <= span_m {
        if let Some(case) = analyze_load(span_m, place_train(&heaviest_first, 0.0), partitions) {
            cases.push(case.labelled(format!("{}: Max V (heaviest first)", name), CaseKind::MaxShear));
        }
    }

    // === Max reaction, every crane order ===
    let mut best: Option<LoadCase> = None;
    for permutation in permutations(groups.len()) {
        let order: Vec<WheelGroup> = permutation.iter().map(|&i| groups[i]).collect();
        if train_length(&order) > span_m {
            continue;
        }
        if let Some(case) = sweep(span_m, &order, resolution.reaction_sweep, partitions, LoadCase::max_reaction) {
            if best.as_ref().map_or(true, |b| case.max_reaction() > b.max_reaction()) {
                best = Some(case);
            }
        }
    }
    if let Some(case) = best {
        cases.push(case.labelled(format!("{}: Max Reaction", name), CaseKind::MaxReaction));
    }
}

/// Generate every candidate load case for the cranes on one span.
///
/// Cranes are combined in input order: pairs of neighbours (1+2, 2+3) and
/// the full train of three.
pub fn find_critical_cases(
    span_m: f64,
    cranes: &[CraneWheelLoad],
    resolution: &SearchResolution,
) -> CalcResult<Vec<LoadCase>> {
    if !span_m.is_finite() || span_m <= 0.0 {
        return Err(CalcError::invalid_input("span_m", span_m.to_string(), "Span must be positive"));
    }
    if cranes.is_empty() || cranes.len() > MAX_CRANES {
        return Err(CalcError::invalid_input(
            "cranes",
            cranes.len().to_string(),
            format!("Between 1 and {} cranes are supported", MAX_CRANES),
        ));
    }
    resolution.validate()?;

    let groups: Vec<WheelGroup> = cranes.iter().map(WheelGroup::new).collect();
    let mut cases = Vec::new();

    for group in &groups {
        single_crane_cases(span_m, *group, resolution, &mut cases);
    }
    if groups.len() >= 2 {
        multi_crane_cases(span_m, &groups[0..2], resolution, &mut cases);
    }
    if groups.len() == 3 {
        multi_crane_cases(span_m, &groups[1..3], resolution, &mut cases);
        multi_crane_cases(span_m, &groups, resolution, &mut cases);
    }

    for case in &cases {
        debug!(
            label = %case.label,
            moment_knm = case.moment_knm,
            shear_kn = case.shear_kn,
            reaction_kn = case.max_reaction(),
            "load case"
        );
    }

    if cases.is_empty() {
        return Err(CalcError::no_valid_load_cases(format!(
            "no crane wheel group fits on a {:.2} m span",
            span_m
        )));
    }
    Ok(cases)
}

// ============================================================================
// Governing Cases
// ============================================================================

/// The governing case for each demand type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningCases {
    /// Largest |moment|
    pub moment: LoadCase,
    /// Largest shear magnitude
    pub shear: LoadCase,
    /// Largest max(R_left, R_right)
    pub reaction: LoadCase,
}

fn first_max<'a>(cases: &'a [LoadCase], score: impl Fn(&LoadCase) -> f64) -> Option<&'a LoadCase> {
    cases
        .iter()
        .fold(None, |best: Option<&'a LoadCase>, case| match best {
            Some(b) if score(case) <= score(b) => Some(b),
            _ => Some(case),
        })
}

/// Pick the governing case per demand type. Ties keep the earliest case.
pub fn select_governing(cases: &[LoadCase]) -> CalcResult<GoverningCases> {
    let none = || CalcError::no_valid_load_cases("no load cases to select from");
    Ok(GoverningCases {
        moment: first_max(cases, |c| c.moment_knm.abs()).ok_or_else(none)?.clone(),
        shear: first_max(cases, |c| c.shear_kn).ok_or_else(none)?.clone(),
        reaction: first_max(cases, LoadCase::max_reaction).ok_or_else(none)?.clone(),
    })
}
