//! Numerical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - step size and end time,
//! - tree split rule (`leaf_capacity`, `min_cell_size`),
//! - opening-angle threshold `theta`

pub const DEFAULT_DT: f64 = 1e-4;
pub const DEFAULT_LEAF_CAPACITY: usize = 500;
pub const DEFAULT_MIN_CELL_SIZE: f64 = 2.0;
pub const DEFAULT_THETA: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size, must be > 0
    pub t_end: f64, // time end
    pub leaf_capacity: usize, // bodies a leaf may hold before it splits
    pub min_cell_size: f64, // cells this small (either side) never split
    pub theta: f64, // opening angle, smaller = more accurate and slower
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            t_end: 1.0,
            leaf_capacity: DEFAULT_LEAF_CAPACITY,
            min_cell_size: DEFAULT_MIN_CELL_SIZE,
            theta: DEFAULT_THETA,
        }
    }
}

impl Parameters {
    /// Number of fixed steps needed to reach `t_end`
    pub fn step_count(&self) -> u64 {
        (self.t_end / self.dt).round().max(0.0) as u64
    }
}
