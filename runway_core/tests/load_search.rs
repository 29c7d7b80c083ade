//! Properties of the moving-load search over grids of cranes and spans.

use approx::assert_relative_eq;
use runway_core::calculations::moving_load::{find_critical_cases, select_governing, CaseKind, LoadCase, SearchResolution};
use runway_core::loads::{evaluate_cranes, CraneParams, CraneWheelLoad};
use runway_core::materials::GRAVITY;

const SPANS: [f64; 6] = [4.5, 6.0, 8.0, 12.0, 20.0, 30.0];

fn crane(id: u32, capacity_t: f64, wheel_base_m: f64) -> CraneWheelLoad {
    CraneWheelLoad::new(
        CraneParams::new(id)
            .with_capacity(capacity_t)
            .with_self_weights(0.5 * capacity_t, 0.1 * capacity_t)
            .with_bridge(18.0, 1.0)
            .with_wheel_base(wheel_base_m),
    )
    .unwrap()
}

fn fleets() -> Vec<Vec<CraneWheelLoad>> {
    vec![
        vec![crane(1, 10.0, 2.2)],
        vec![crane(1, 5.0, 1.8), crane(2, 10.0, 2.2)],
        vec![crane(1, 20.0, 3.0), crane(2, 5.0, 1.8)],
        vec![crane(1, 10.0, 2.2), crane(2, 10.0, 2.2), crane(3, 5.0, 1.8)],
        vec![crane(1, 5.0, 1.8), crane(2, 20.0, 3.0), crane(3, 10.0, 2.2)],
    ]
}

fn cases_for(span_m: f64, cranes: &[CraneWheelLoad]) -> Vec<LoadCase> {
    find_critical_cases(span_m, cranes, &SearchResolution::default()).unwrap()
}

/// Crane combination a case belongs to, e.g. "2 Cranes (1+2)"
fn combination(case: &LoadCase) -> &str {
    case.label.split(':').next().unwrap_or("")
}

#[test]
fn reactions_balance_wheel_loads() {
    for span in SPANS {
        for fleet in fleets() {
            for case in cases_for(span, &fleet) {
                assert_relative_eq!(
                    case.reaction_left_kn + case.reaction_right_kn,
                    case.total_vertical(),
                    max_relative = 1e-12
                );
            }
        }
    }
}

#[test]
fn heavier_crane_increases_governing_forces() {
    let span = 20.0;
    let light = [crane(1, 10.0, 2.2), crane(2, 5.0, 1.8)];
    let heavy = [crane(1, 10.0, 2.2), crane(2, 8.0, 1.8)];

    let a = select_governing(&cases_for(span, &light)).unwrap();
    let b = select_governing(&cases_for(span, &heavy)).unwrap();

    assert!(b.moment.moment_knm.abs() > a.moment.moment_knm.abs());
    assert!(b.reaction.max_reaction() > a.reaction.max_reaction());
    assert!(b.shear.shear_kn > a.shear.shear_kn);
}

#[test]
fn envelope_never_drops_as_loads_grow() {
    const WHEEL_BASES: [f64; 3] = [1.8, 2.6, 3.4];
    const MULTIPLIERS: [f64; 4] = [1.0, 1.25, 1.5, 2.0];

    for span in SPANS {
        for wheel_base in WHEEL_BASES {
            let mut previous: Option<(f64, f64, f64)> = None;
            for factor in MULTIPLIERS {
                let fleet = [crane(1, 10.0, 2.2), crane(2, 5.0 * factor, wheel_base)];
                let g = select_governing(&cases_for(span, &fleet)).unwrap();
                let current = (g.moment.moment_knm.abs(), g.shear.shear_kn, g.reaction.max_reaction());
                if let Some((moment, shear, reaction)) = previous {
                    let context = format!("span {} m, wheel base {} m, factor {}", span, wheel_base, factor);
                    assert!(current.0 >= moment - 1e-9, "moment dropped: {}", context);
                    assert!(current.1 >= shear - 1e-9, "shear dropped: {}", context);
                    assert!(current.2 >= reaction - 1e-9, "reaction dropped: {}", context);
                }
                previous = Some(current);
            }
        }
    }
}

#[test]
fn group_as_long_as_span_has_one_position() {
    let c = crane(1, 10.0, 2.2);
    let cases = cases_for(c.group_length_m(), &[c.clone()]);
    assert_eq!(cases.len(), 3);
    for case in &cases {
        assert_eq!(case.wheels[0].position_m, 0.0);
        assert_relative_eq!(case.wheels[1].position_m, 2.2, max_relative = 1e-12);
    }
    // Both wheels sit on the supports, so the beam carries no moment
    assert!(cases[0].moment_knm.abs() < 1e-9);
}

#[test]
fn combination_longer_than_span_is_skipped() {
    // 2.2 + 0.58 + 2.2 = 4.98 m fits on 5.0 m but not on 4.5 m
    let pair = [crane(1, 10.0, 2.2), crane(2, 10.0, 2.2)];

    let short = cases_for(4.5, &pair);
    assert_eq!(short.len(), 6);
    assert!(short.iter().all(|c| c.label.starts_with("Crane")));

    let long = cases_for(5.0, &pair);
    assert!(long.iter().any(|c| c.label.starts_with("2 Cranes")));
}

#[test]
fn scenario_rail_reaction() {
    let params = CraneParams::new(1)
        .with_capacity(10.0)
        .with_self_weights(5.0, 0.72)
        .with_bridge(20.0, 1.0)
        .with_wheel_base(2.2)
        .with_wheels_per_rail(2);
    let summary = &evaluate_cranes(&[params]).unwrap()[0];

    let p_bridge = 5.0 * GRAVITY;
    let p_moving = (10.0 + 0.72) * GRAVITY;
    let expected = p_bridge / 2.0 + p_moving * (20.0 - 1.0) / 20.0;
    assert_relative_eq!(summary.max_rail_reaction_kn, expected, max_relative = 1e-12);
    assert_relative_eq!(summary.max_static_wheel_kn, expected / 2.0, max_relative = 1e-12);
    assert_relative_eq!(summary.max_wheel_with_impact_kn, 1.25 * expected / 2.0, max_relative = 1e-12);
}

#[test]
fn reaction_sweep_dominates_every_case_of_its_combination() {
    for span in SPANS {
        for fleet in fleets() {
            let cases = cases_for(span, &fleet);
            for sweep in cases.iter().filter(|c| c.kind == CaseKind::MaxReaction) {
                for case in cases.iter().filter(|c| combination(c) == combination(sweep)) {
                    assert!(
                        sweep.max_reaction() >= case.max_reaction() - 1e-9,
                        "span {} m: '{}' {:.3} kN exceeds '{}' {:.3} kN",
                        span,
                        case.label,
                        case.max_reaction(),
                        sweep.label,
                        sweep.max_reaction()
                    );
                }
            }
        }
    }
}

#[test]
fn governing_reaction_never_below_any_case() {
    for span in SPANS {
        for fleet in fleets() {
            let cases = cases_for(span, &fleet);
            let governing = select_governing(&cases).unwrap();
            for case in &cases {
                assert!(governing.reaction.max_reaction() >= case.max_reaction());
                assert!(governing.moment.moment_knm.abs() >= case.moment_knm.abs());
                assert!(governing.shear.shear_kn >= case.shear_kn);
            }
        }
    }
}

#[test]
fn finer_search_never_lowers_the_moment() {
    let fleet = [crane(1, 10.0, 2.2), crane(2, 5.0, 1.8)];
    let coarse = find_critical_cases(12.0, &fleet, &SearchResolution::uniform(5)).unwrap();
    let fine = find_critical_cases(12.0, &fleet, &SearchResolution::uniform(201)).unwrap();
    let coarse = select_governing(&coarse).unwrap().moment.moment_knm;
    let fine = select_governing(&fine).unwrap().moment.moment_knm;
    // Both grids contain the endpoints; 201 samples also contain every 5-sample point
    assert!(fine >= coarse - 1e-9);
}
