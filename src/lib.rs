pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::vector::{NVec2, Vec2Ext};
pub use simulation::states::{Bounds, IdAllocator, PointMass, System};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::barnes_hut::{QuadNode, QuadTree, SplitRule};
pub use simulation::forces::{Acceleration, BarnesHutGravity, DirectGravity};
pub use simulation::integrator::{verlet_step, StepReport};
pub use simulation::diagnostics::{summarize, OperationAverage, SystemSummary};
pub use simulation::scenario::{generate_disk, Scenario};

pub use configuration::config::{load_scenario, BodyConfig, DiskConfig, DomainConfig, EngineConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_verlet_curve, force_pass};
