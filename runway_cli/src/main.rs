//! # Runway CLI
//!
//! Command line front end for crane runway girder design.
//!
//! ```text
//! runway_cli --input girder.json          # summary, then the JSON result
//! runway_cli --input girder.json --json   # JSON result only
//! runway_cli --demo                       # built-in two-crane example
//! runway_cli --equations                  # markdown equation reference
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=runway_core=debug` to see every
//! load case and limit state.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use runway_core::calculations::stiffeners::StiffenerConfig;
use runway_core::calculations::{
    calculate, CheckOptions, RunwayBeamInput, RunwayBeamResult, SectionGeometry, SectionSpec,
};
use runway_core::equations::{equations_markdown, ALL_EQUATIONS};
use runway_core::loads::{CraneClass, CraneParams};
use runway_core::materials::SteelGrade;
use runway_core::{CalcError, CalcResult};
use structopt::StructOpt;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(name = "runway_cli", about = "Checks a crane runway girder against AISC 360 (ASD)")]
struct Options {
    /// Design input as JSON
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Print only the JSON result
    #[structopt(long)]
    json: bool,

    /// Run the built-in example
    #[structopt(long)]
    demo: bool,

    /// Print the equation reference as markdown and exit
    #[structopt(long)]
    equations: bool,
}

fn demo_input() -> RunwayBeamInput {
    RunwayBeamInput::new("Demo runway", 8.0)
        .with_crane(
            CraneParams::new(1)
                .with_capacity(10.0)
                .with_self_weights(5.0, 0.72)
                .with_bridge(20.0, 1.0)
                .with_wheel_base(2.2),
        )
        .with_crane(
            CraneParams::new(2)
                .with_capacity(5.0)
                .with_self_weights(3.5, 0.5)
                .with_bridge(20.0, 1.0)
                .with_wheel_base(1.8),
        )
        .with_section(SectionSpec::BuiltUp(
            SectionGeometry::symmetric(700.0, 300.0, 20.0, 10.0).with_bottom_flange(250.0, 16.0),
        ))
        .with_grade(SteelGrade::S355)
        .with_stiffeners(StiffenerConfig::default().with_bearing(16.0, 120.0))
        .with_options(CheckOptions::default().with_crane_class(CraneClass::D))
}

fn load_input(path: &Path) -> CalcResult<RunwayBeamInput> {
    let text = fs::read_to_string(path).map_err(|e| CalcError::Internal {
        message: format!("cannot read {}: {}", path.display(), e),
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn print_summary(result: &RunwayBeamResult) {
    println!("Runway girder: {}", result.label);
    println!("==============={}", "=".repeat(result.label.len()));
    println!();
    println!("Span:    {:.2} m", result.span_m);
    println!("Section: {} ({:?}), {:.1} kg/m", result.section.name, result.section.kind, result.section.mass_kg_per_m);
    println!();

    println!("Crane wheel loads");
    for w in &result.wheel_loads {
        println!(
            "  Crane {}: {:.1} kN static, {:.1} kN with impact, {:.1} kN lateral, {} wheels @ {:.2} m",
            w.crane_id,
            w.max_static_wheel_kn,
            w.max_wheel_with_impact_kn,
            w.lateral_per_wheel_kn,
            w.wheels_per_rail,
            w.wheel_base_m
        );
    }
    println!();

    println!("Governing load cases ({} evaluated)", result.load_cases.len());
    let g = &result.governing;
    println!("  Moment:   {:>9.1} kN·m at {:.2} m  [{}]", g.moment.moment_knm, g.moment.moment_position_m, g.moment.label);
    println!("  Shear:    {:>9.1} kN   at {:.2} m  [{}]", g.shear.shear_kn, g.shear.shear_position_m, g.shear.label);
    println!("  Reaction: {:>9.1} kN            [{}]", g.reaction.max_reaction(), g.reaction.label);
    println!();

    println!("Checks");
    for check in &result.report.checks {
        println!("  {}", check.summary());
    }
    println!();

    let governing = &result.report.governing;
    println!(
        "Governing: {} ratio {:.3} ({})",
        governing.limit_state, governing.ratio, governing.reference
    );
    println!("Result: {}", if result.passes() { "PASS" } else { "FAIL" });
}

fn run(options: &Options) -> CalcResult<()> {
    if options.equations {
        print!("{}", equations_markdown(ALL_EQUATIONS));
        return Ok(());
    }

    let input = match (&options.input, options.demo) {
        (Some(path), _) => load_input(path)?,
        (None, true) => demo_input(),
        (None, false) => {
            return Err(CalcError::invalid_input("input", "", "Pass --input <file.json> or --demo"));
        }
    };

    let result = calculate(&input)?;
    let json = serde_json::to_string_pretty(&result)?;

    if !options.json {
        print_summary(&result);
        println!();
    }
    println!("{}", json);
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = Options::from_args();
    if let Err(e) = run(&options) {
        error!(code = e.error_code(), "{}", e);
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!("{}", json);
        }
        process::exit(1);
    }
}
