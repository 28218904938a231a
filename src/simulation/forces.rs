//! Force / acceleration sources for the integrator
//!
//! Defines the per-body [`Acceleration`] trait, the quadtree-backed
//! Barnes–Hut source and a direct pairwise reference

use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::states::PointMass;
use crate::simulation::vector::{NVec2, Vec2Ext};

/// Per-body acceleration query.
/// Implementations must only read shared state so queries can run in parallel.
/// `ops` is incremented by the amount of work done (nodes visited, pairs summed).
pub trait Acceleration {
    fn acceleration(&self, body: &PointMass, ops: &mut u64) -> NVec2;
}

/// Gravity approximated with a frozen [`QuadTree`]
pub struct BarnesHutGravity<'a> {
    pub tree: &'a QuadTree,
    pub theta: f64, // opening angle
}

impl Acceleration for BarnesHutGravity<'_> {
    fn acceleration(&self, body: &PointMass, ops: &mut u64) -> NVec2 {
        self.tree.acceleration_on(body, self.theta, ops)
    }
}

/// Exact pairwise gravity over a snapshot of the bodies.
/// Uses the same unsoftened kernel as the tree, skips the query body's own id
/// and any pair at zero separation
pub struct DirectGravity {
    sources: Vec<PointMass>,
}

impl DirectGravity {
    /// Snapshot the bodies as they are now; later queries see these positions
    pub fn snapshot(bodies: &[PointMass]) -> Self {
        Self {
            sources: bodies.to_vec(),
        }
    }
}

impl Acceleration for DirectGravity {
    fn acceleration(&self, body: &PointMass, ops: &mut u64) -> NVec2 {
        let mut acc = NVec2::zeros();
        for src in &self.sources {
            if src.id == body.id {
                continue;
            }
            *ops += 1;

            // r points from the body toward the source
            let r = src.x - body.x;
            let dist2 = r.square_length();
            if dist2 == 0.0 {
                continue;
            }
            acc += r.tolerant_normalize() * (src.m / dist2);
        }
        acc
    }
}
