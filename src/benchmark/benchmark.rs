use std::hint::black_box;
use std::time::Instant;

use log::info;

use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{Acceleration, BarnesHutGravity, DirectGravity};
use crate::simulation::integrator::verlet_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Bounds, IdAllocator, PointMass, System};
use crate::simulation::vector::NVec2;

const DOMAIN_SIZE: f64 = 2000.0;

/// Time one full force pass (tree build + all queries vs. direct sum) per N
pub fn bench_gravity() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let params = make_params();

    for n in ns {
        let sys = make_system(n);

        let mut out = vec![NVec2::zeros(); n];

        // Time direct
        let t0 = Instant::now();
        let direct = DirectGravity::snapshot(&sys.bodies);
        let direct_ops = force_pass(&direct, &sys.bodies, &mut out);
        black_box(&out);
        let dt_direct = t0.elapsed().as_secs_f64();

        // Time barnes-hut, including the build
        let t1 = Instant::now();
        let tree = QuadTree::build(sys.domain, &sys.bodies, &params);
        let bh = BarnesHutGravity {
            tree: &tree,
            theta: params.theta,
        };
        let bh_ops = force_pass(&bh, &sys.bodies, &mut out);
        black_box(&out);
        let dt_bh = t1.elapsed().as_secs_f64();

        info!(
            "N = {n:5}, direct = {:8.6} s ({direct_ops} ops), BH = {:8.6} s ({bh_ops} ops)",
            dt_direct, dt_bh
        );
    }
}

/// Evaluate `forces` for every body, writing `out[i]` for body `i`.
/// Returns the operations spent.
pub fn force_pass<F: Acceleration>(forces: &F, bodies: &[PointMass], out: &mut [NVec2]) -> u64 {
    let mut ops = 0;
    for (b, a) in bodies.iter().zip(out.iter_mut()) {
        *a = forces.acceleration(b, &mut ops);
    }
    ops
}

/// Benchmark `verlet_step` for a range of n
/// Prints CSV to stdout so it can be pasted into a spreadsheet
pub fn bench_verlet_curve() {
    println!("N,direct_ms,bh_ms");

    let params = make_params();
    let direct_engine = Engine {
        barnes_hut: false,
        parallel: false,
    };
    let bh_engine = Engine::default();

    for n in (200..=6400).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps_direct = if n <= 800 { 5 } else { 1 };
        let steps_bh = if n <= 2000 { 3 } else { 1 };

        let template = make_system(n);

        let mut sys_direct = template.clone();
        let t0 = Instant::now();
        for _ in 0..steps_direct {
            verlet_step(&mut sys_direct, &params, &direct_engine);
        }
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0 / steps_direct as f64;

        let mut sys_bh = template.clone();
        let t1 = Instant::now();
        for _ in 0..steps_bh {
            verlet_step(&mut sys_bh, &params, &bh_engine);
        }
        let ms_bh = t1.elapsed().as_secs_f64() * 1000.0 / steps_bh as f64;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_bh);
    }
}

/// Deterministic system of size `n` spread over the domain, no rand needed
fn make_system(n: usize) -> System {
    let mut ids = IdAllocator::new();
    let half = DOMAIN_SIZE / 2.0;

    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new(
                half + (i_f * 0.37).sin() * half * 0.8,
                half + (i_f * 0.13).cos() * half * 0.8,
            );
            ids.spawn(x, NVec2::zeros(), 1.0)
        })
        .collect();

    System::new(bodies, Bounds::new(NVec2::zeros(), DOMAIN_SIZE, DOMAIN_SIZE))
}

fn make_params() -> Parameters {
    Parameters {
        dt: 1e-4,
        t_end: 1.0,
        leaf_capacity: 8,
        min_cell_size: 2.0,
        theta: 0.5,
    }
}
