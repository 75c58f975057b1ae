//! Build the fully-initialized runtime simulation from configuration
//!
//! Takes a `SceneConfig` (YAML-facing) and produces the runtime bundle
//! [`Simulation`] containing:
//! - the authoritative state (`SimulationState`: bodies, settings, view)
//! - the active force set (`ForceSet`)
//! - the scheduling clock (`SimulationClock`)
//!
//! The bundle is inserted into Bevy as a `Resource` and consumed by the
//! physics and viewer systems.

use bevy::prelude::Resource;

use crate::configuration::config::SceneConfig;
use crate::simulation::clock::SimulationClock;
use crate::simulation::forces::{ForceSet, PairwiseGravity};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::states::{NVec2, SimulationState};

/// Runtime bundle for one simulation session.
#[derive(Resource)]
pub struct Simulation {
    pub state: SimulationState,
    pub forces: ForceSet,
    pub clock: SimulationClock,
}

impl Simulation {
    pub fn build(cfg: SceneConfig) -> Self {
        let settings = cfg.settings.into_settings();
        let mut state = SimulationState::new(settings);

        // Scene files give velocities in physical units; convert to px per
        // simulated second with the scene's own distance ratio.
        let inv_ratio = state.settings.distance_ratio().recip();
        for bc in &cfg.bodies {
            state.insert_at(
                NVec2::new(bc.x, bc.y),
                NVec2::new(bc.vx * inv_ratio, bc.vy * inv_ratio),
                bc.mass,
                bc.size,
                bc.color.clone(),
                bc.id.clone(),
            );
        }
        log::info!("scene built with {} bodies", state.bodies.len());

        // Register the single production force term
        let forces = ForceSet::new().with(PairwiseGravity);

        Self {
            state,
            forces,
            clock: SimulationClock::new(),
        }
    }

    /// One host-driven tick: measure elapsed wall-clock time and advance,
    /// unless the clock is stopped or a pause lands on this boundary.
    pub fn tick(&mut self) -> bool {
        match self.clock.tick() {
            Some(elapsed) => {
                self.advance(elapsed);
                true
            }
            None => false,
        }
    }

    /// Force accumulation followed by integration over `elapsed_secs` of
    /// real time, converted to simulated seconds by the settings.
    pub fn advance(&mut self, elapsed_secs: f64) {
        self.forces
            .accumulate_all(&mut self.state.bodies, &self.state.settings);
        let dt = elapsed_secs * self.state.settings.time_ratio();
        euler_integrator(&mut self.state.bodies, dt);
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Cancel any pending tick and drop every body. The viewer's reconcile
    /// pass then despawns the per-body entities and shows an empty scene.
    pub fn end(&mut self) {
        self.clock.stop();
        self.state.clear_all();
        log::info!("simulation ended, bodies cleared");
    }
}
