use quadsim::{load_scenario, summarize, verlet_step, OperationAverage, Scenario};
use quadsim::{bench_gravity, bench_verlet_curve};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "disk.yaml")]
    file_name: String,

    /// Number of steps to run instead of `t_end / dt`
    #[arg(long)]
    steps: Option<u64>,

    /// Log a progress line every this many steps
    #[arg(long, default_value_t = 10)]
    report_every: u64,

    /// Run the force / integrator benchmarks and exit
    #[arg(long)]
    bench: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_verlet_curve();
        return Ok(());
    }

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name);
    let scenario_cfg = load_scenario(&config_path).context("failed to load scenario")?;

    let mut scenario = Scenario::build_scenario(scenario_cfg);
    if scenario.parameters.theta <= 0.0 {
        warn!("theta = {} <= 0: every query descends to the leaves", scenario.parameters.theta);
    }

    let steps = args.steps.unwrap_or_else(|| scenario.parameters.step_count());
    let report_every = args.report_every.max(1);

    info!(
        "running {} with {} bodies for {} steps",
        args.file_name,
        scenario.system.bodies.len(),
        steps
    );

    let mut ops_avg = OperationAverage::new();
    for step in 1..=steps {
        let report = verlet_step(&mut scenario.system, &scenario.parameters, &scenario.engine);
        let avg = ops_avg.record(report.operations);

        if step % report_every == 0 || step == steps {
            info!(
                "step {step:6}  t = {:.6}  operations per step: {avg:.2}",
                scenario.system.t
            );
        }
    }

    let summary = summarize(&scenario.system);
    info!(
        "done: {} bodies, total mass {:.6e}, com ({:.3}, {:.3}), kinetic energy {:.6e}",
        summary.bodies,
        summary.total_mass,
        summary.com.x,
        summary.com.y,
        summary.kinetic_energy
    );

    Ok(())
}
