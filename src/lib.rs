pub mod simulation;
pub mod configuration;
pub mod persistence;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, Bounds, NVec2, SimulationState, ViewState};
pub use simulation::params::Settings;
pub use simulation::forces::{Force, ForceSet, PairwiseGravity};
pub use simulation::integrator::euler_integrator;
pub use simulation::clock::{ClockState, SimulationClock};
pub use simulation::scenario::Simulation;

pub use configuration::config::{BodyConfig, SceneConfig, SettingsConfig};
pub use persistence::templates::{BodyRecord, TemplateStore};

pub use visualization::render::{project, render_pass, unproject, RenderRect};
pub use visualization::viewer::{run_viewer, InsertParams};

pub use benchmark::benchmark::bench_gravity;
