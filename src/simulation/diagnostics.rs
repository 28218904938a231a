//! Observability helpers for callers of the integrator.
//! Nothing here prints; the runner decides what to log.

use super::states::System;
use super::vector::{NVec2, Vec2Ext};

/// Running average of the per-step operation count,
/// `avg = 0.5 * avg + 0.5 * ops`
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationAverage {
    value: f64,
}

impl OperationAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one step's count and return the updated average
    pub fn record(&mut self, operations: u64) -> f64 {
        self.value = 0.5 * self.value + 0.5 * operations as f64;
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemSummary {
    pub bodies: usize,
    pub total_mass: f64,
    pub com: NVec2, // zero when the system has no mass
    pub kinetic_energy: f64,
}

pub fn summarize(sys: &System) -> SystemSummary {
    let mut total_mass = 0.0;
    let mut weighted = NVec2::zeros();
    let mut kinetic_energy = 0.0;

    for b in &sys.bodies {
        total_mass += b.m;
        weighted += b.x * b.m;
        kinetic_energy += 0.5 * b.m * b.v.square_length();
    }

    let com = if total_mass != 0.0 {
        weighted / total_mass
    } else {
        NVec2::zeros()
    };

    SystemSummary {
        bodies: sys.bodies.len(),
        total_mass,
        com,
        kinetic_energy,
    }
}
