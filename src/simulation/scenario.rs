//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//!
//! Particle ids come from one `IdAllocator` per scenario: explicit bodies
//! first, in file order, then generated disk bodies.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{BodyConfig, DiskConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Bounds, IdAllocator, PointMass, System};
use crate::simulation::vector::{NVec2, Vec2Ext};

/// A fully-initialized simulation: settings plus the live system
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        let mut ids = IdAllocator::new();

        // Bodies: map `BodyConfig` -> runtime `PointMass`
        let mut bodies: Vec<PointMass> = cfg
            .bodies
            .iter()
            .map(|bc: &BodyConfig| {
                ids.spawn(
                    NVec2::new(bc.x[0], bc.x[1]),
                    NVec2::new(bc.v[0], bc.v[1]),
                    bc.m,
                )
            })
            .collect();

        let domain = Bounds::new(
            NVec2::new(cfg.domain.corner[0], cfg.domain.corner[1]),
            cfg.domain.width,
            cfg.domain.height,
        );

        if let Some(disk) = &cfg.disk {
            let generated = generate_disk(disk, &domain, &mut ids);
            debug!("disk generator produced {} bodies", generated.len());
            bodies.extend(generated);
        }

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            t_end: p_cfg.t_end,
            leaf_capacity: p_cfg.leaf_capacity,
            min_cell_size: p_cfg.min_cell_size,
            theta: p_cfg.theta,
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            barnes_hut: cfg.engine.barnes_hut,
            parallel: cfg.engine.parallel,
        };

        debug!(
            "scenario built: {} bodies, dt = {}, theta = {}, barnes_hut = {}",
            bodies.len(),
            parameters.dt,
            parameters.theta,
            engine.barnes_hut
        );

        Self {
            engine,
            parameters,
            system: System::new(bodies, domain),
        }
    }
}

/// Sample a rotating disk on a regular grid over `domain`.
///
/// Each grid point with `inner_radius < dist <= radius` from the center is
/// kept with probability `1 - (dist / radius)^2`, so density falls off
/// toward the rim. Kept points move tangentially (counter-clockwise in
/// screen coordinates) with speed `sqrt(velocity_scale * dist)`.
pub fn generate_disk(disk: &DiskConfig, domain: &Bounds, ids: &mut IdAllocator) -> Vec<PointMass> {
    let mut rng = ChaCha8Rng::seed_from_u64(disk.seed);
    let center = NVec2::new(disk.center[0], disk.center[1]);
    let radius2 = disk.radius * disk.radius;
    let inner2 = disk.inner_radius * disk.inner_radius;

    let mut bodies = Vec::new();

    let mut px = domain.corner.x;
    while px < domain.corner.x + domain.width {
        let mut py = domain.corner.y;
        while py < domain.corner.y + domain.height {
            let p = NVec2::new(px, py);
            let dist2 = (center - p).square_length();

            if dist2 <= radius2 && dist2 > inner2 {
                let dist = dist2.sqrt();
                let probability = 1.0 - dist2 / radius2;
                if rng.random::<f64>() < probability {
                    let speed = (disk.velocity_scale * dist).sqrt();
                    let tangent = NVec2::new(py - center.y, center.x - px).tolerant_normalize();
                    bodies.push(ids.spawn(p, tangent * speed, disk.mass));
                }
            }
            py += disk.spacing;
        }
        px += disk.spacing;
    }

    bodies
}
