//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – force source (tree / direct) and parallel updates
//! - [`ParametersConfig`] – step size, end time and tree tunables
//! - [`DomainConfig`]     – the fixed rectangle the tree covers and bodies are clamped to
//! - [`BodyConfig`]       – initial state for each explicitly listed body
//! - [`DiskConfig`]       – optional generator for a rotating disk of bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   barnes_hut: true        # false -> direct N^2 summation
//!   parallel: false
//!
//! parameters:
//!   dt: 1.0e-4
//!   t_end: 0.1
//!   leaf_capacity: 500      # optional, default 500
//!   min_cell_size: 2.0      # optional, default 2.0
//!   theta: 1.0              # optional, default 1.0
//!
//! domain:
//!   corner: [0.0, 0.0]
//!   width: 2000.0
//!   height: 2000.0
//!
//! bodies:
//!   - x: [ 800.0, 450.0 ]
//!     v: [   0.0,   0.0 ]
//!     m: 1.0e6
//!
//! disk:
//!   center: [800.0, 450.0]
//!   radius: 400.0
//!   inner_radius: 10.0
//!   spacing: 2.0
//!   mass: 1.0e6
//!   velocity_scale: 1.0e5
//!   seed: 42
//! ```
//!
//! Masses carry the gravitational constant; there is no separate `G`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::simulation::params::{DEFAULT_LEAF_CAPACITY, DEFAULT_MIN_CELL_SIZE, DEFAULT_THETA};

/// Engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_true")]
    pub barnes_hut: bool, // `true` - quadtree approximation, `false` - direct N^2 summation
    #[serde(default)]
    pub parallel: bool, // `true` - per-body updates run on the rayon pool
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            barnes_hut: true,
            parallel: false,
        }
    }
}

/// Step size, end time and tree tunables
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,    // time step size
    pub t_end: f64, // time end
    #[serde(default = "default_leaf_capacity")]
    pub leaf_capacity: usize,
    #[serde(default = "default_min_cell_size")]
    pub min_cell_size: f64,
    #[serde(default = "default_theta")]
    pub theta: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DomainConfig {
    pub corner: [f64; 2],
    pub width: f64,
    pub height: f64,
}

/// Configuration for a single body’s initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position
    #[serde(default)]
    pub v: [f64; 2], // Initial velocity
    pub m: f64,      // Mass of the body
}

/// Rotating disk generator.
///
/// Grid points `spacing` apart over the domain are kept with probability
/// `1 - (dist / radius)^2` when `inner_radius < dist <= radius`, and get a
/// tangential velocity of magnitude `sqrt(velocity_scale * dist)`.
#[derive(Deserialize, Debug, Clone)]
pub struct DiskConfig {
    pub center: [f64; 2],
    pub radius: f64,
    #[serde(default)]
    pub inner_radius: f64,
    pub spacing: f64,
    pub mass: f64,
    pub velocity_scale: f64,
    #[serde(default)]
    pub seed: u64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub domain: DomainConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub disk: Option<DiskConfig>,
}

impl ScenarioConfig {
    /// Parse a scenario from a YAML string and validate it
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).context("invalid scenario yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the simulation cannot run with.
    /// `theta <= 0` is allowed: it only forces full-depth traversal.
    pub fn validate(&self) -> Result<()> {
        let p = &self.parameters;
        ensure!(p.dt > 0.0, "parameters.dt must be > 0 (got {})", p.dt);
        ensure!(p.t_end > 0.0, "parameters.t_end must be > 0 (got {})", p.t_end);
        ensure!(p.leaf_capacity > 0, "parameters.leaf_capacity must be at least 1");
        ensure!(
            p.min_cell_size > 0.0,
            "parameters.min_cell_size must be > 0 (got {})",
            p.min_cell_size
        );
        ensure!(p.theta.is_finite(), "parameters.theta must be finite");

        let d = &self.domain;
        ensure!(
            d.width > 0.0 && d.height > 0.0,
            "domain width and height must be > 0 (got {} x {})",
            d.width,
            d.height
        );

        for (i, b) in self.bodies.iter().enumerate() {
            ensure!(b.m > 0.0, "bodies[{i}].m must be > 0 (got {})", b.m);
        }

        if let Some(disk) = &self.disk {
            ensure!(disk.radius > 0.0, "disk.radius must be > 0 (got {})", disk.radius);
            ensure!(disk.spacing > 0.0, "disk.spacing must be > 0 (got {})", disk.spacing);
            ensure!(disk.mass > 0.0, "disk.mass must be > 0 (got {})", disk.mass);
            ensure!(
                disk.inner_radius >= 0.0 && disk.inner_radius < disk.radius,
                "disk.inner_radius must be in [0, radius)"
            );
            ensure!(disk.velocity_scale >= 0.0, "disk.velocity_scale must be >= 0");
        }

        Ok(())
    }
}

/// Load and validate a scenario file
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid scenario {}", path.display()))?;
    Ok(cfg)
}

fn default_true() -> bool {
    true
}

fn default_leaf_capacity() -> usize {
    DEFAULT_LEAF_CAPACITY
}

fn default_min_cell_size() -> f64 {
    DEFAULT_MIN_CELL_SIZE
}

fn default_theta() -> f64 {
    DEFAULT_THETA
}
