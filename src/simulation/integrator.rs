//! Time integration for the gravity sandbox
//!
//! Semi-implicit Euler: the velocity update precedes the position update
//! within the same step, and the position update uses the new velocity.

use super::states::Body;

/// Advance every body by one step of `dt` simulated seconds from its
/// already-accumulated acceleration.
///
/// Per-body order is irrelevant (all cross-body coupling happened during
/// force accumulation). Velocity and position are unclamped; escape
/// trajectories growing without bound are accepted behavior.
pub fn euler_integrator(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        // v_n+1 = v_n + a_n * dt
        b.v += b.a * dt;
        // x_n+1 = x_n + v_n+1 * dt
        b.x += b.v * dt;
    }
}
