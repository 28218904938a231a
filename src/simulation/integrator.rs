//! Fixed-step velocity–Verlet integrator for the particle system
//!
//! One step:
//! 1. build a fresh quadtree over the domain from the current positions
//! 2. per body: drift, query the new acceleration, kick with the average of
//!    old and new acceleration, clamp into the domain
//!
//! The tree is read-only during step 2 and every update touches only its own
//! body, so step 2 may run on the rayon pool (`Engine::parallel`).

use rayon::prelude::*;

use super::barnes_hut::QuadTree;
use super::engine::Engine;
use super::forces::{Acceleration, BarnesHutGravity, DirectGravity};
use super::params::Parameters;
use super::states::{Bounds, PointMass, System};

/// What one step did, for the caller to log or display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub operations: u64, // tree nodes visited (or pairs summed in direct mode)
    pub bodies: usize,
}

/// Advance the system by one step of `params.dt`.
/// Updates positions, velocities, accelerations and `sys.t` in place.
/// `dt > 0` is the caller's responsibility.
pub fn verlet_step(sys: &mut System, params: &Parameters, engine: &Engine) -> StepReport {
    let dt = params.dt;
    let domain = sys.domain;

    let operations = if engine.barnes_hut {
        let tree = QuadTree::build(domain, &sys.bodies, params);
        let gravity = BarnesHutGravity {
            tree: &tree,
            theta: params.theta,
        };
        advance_bodies(&mut sys.bodies, &gravity, dt, &domain, engine.parallel)
    } else {
        let gravity = DirectGravity::snapshot(&sys.bodies);
        advance_bodies(&mut sys.bodies, &gravity, dt, &domain, engine.parallel)
    };

    sys.t += dt;

    StepReport {
        operations,
        bodies: sys.bodies.len(),
    }
}

fn advance_bodies<F>(bodies: &mut [PointMass], forces: &F, dt: f64, domain: &Bounds, parallel: bool) -> u64
where
    F: Acceleration + Sync,
{
    if parallel {
        bodies
            .par_iter_mut()
            .map(|b| advance_body(b, forces, dt, domain))
            .sum()
    } else {
        bodies
            .iter_mut()
            .map(|b| advance_body(b, forces, dt, domain))
            .sum()
    }
}

/// Velocity–Verlet update of a single body, returns the operations it cost
fn advance_body<F: Acceleration>(b: &mut PointMass, forces: &F, dt: f64, domain: &Bounds) -> u64 {
    let mut ops = 0;

    // Drift: x_n+1 = x_n + dt v_n + (1/2 dt^2) a_n
    b.x += b.v * dt + b.a * (0.5 * dt * dt);

    // a_n+1 at the drifted position, against the tree built from x_n
    let a_new = forces.acceleration(b, &mut ops);

    // Kick: v_n+1 = v_n + (dt/2) (a_n + a_n+1)
    b.v += (b.a + a_new) * (0.5 * dt);
    b.a = a_new;

    // hard clamp, no reflection
    b.x = domain.clamp(&b.x);

    ops
}
