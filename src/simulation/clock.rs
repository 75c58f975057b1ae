//! Cancellable scheduling for the simulation loop
//!
//! The clock is an explicit state machine driven by the host's own frame
//! loop: the host calls [`SimulationClock::tick`] once per available
//! animation tick and steps the physics only when it returns an elapsed
//! time. No fixed tick rate is imposed; each tick's elapsed wall-clock time
//! is measured, not assumed, which makes the simulation framerate
//! independent. A very large elapsed value (a stalled host) produces a
//! correspondingly large position jump; no sub-stepping is performed.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    /// Pause was requested; it takes effect at the next tick boundary.
    PauseRequested,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    state: ClockState,
    last_tick: Option<Instant>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped,
            last_tick: None,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// True while the loop is live, including the window between a pause
    /// request and the tick boundary that honors it.
    pub fn is_running(&self) -> bool {
        self.state != ClockState::Stopped
    }

    /// Begin running from a fresh baseline timestamp. No-op unless stopped.
    pub fn start(&mut self) {
        if self.state == ClockState::Stopped {
            self.state = ClockState::Running;
            self.last_tick = Some(Instant::now());
            log::debug!("clock started");
        }
    }

    /// Request a pause; the in-flight tick still executes. No-op unless
    /// running.
    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::PauseRequested;
        }
    }

    /// Cancel any pending tick and stop immediately (the `end` path).
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
        self.last_tick = None;
    }

    /// Observe one tick boundary.
    ///
    /// Running: measure the wall-clock seconds since the previous boundary,
    /// advance the baseline, and return them. A pending pause is honored
    /// here instead: the clock transitions to stopped and no step runs.
    pub fn tick(&mut self) -> Option<f64> {
        match self.state {
            ClockState::Stopped => None,
            ClockState::PauseRequested => {
                self.state = ClockState::Stopped;
                self.last_tick = None;
                log::debug!("clock paused");
                None
            }
            ClockState::Running => {
                let now = Instant::now();
                let elapsed = self
                    .last_tick
                    .map_or(0.0, |t| now.duration_since(t).as_secs_f64());
                self.last_tick = Some(now);
                Some(elapsed)
            }
        }
    }
}
