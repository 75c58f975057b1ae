//! Force / acceleration contributors for the gravity sandbox
//!
//! Defines the `Force` trait, the `ForceSet` aggregator, and the production
//! term: direct pairwise Newtonian gravity with unit conversion and the
//! stabilization pipeline (separation floor, NaN suppression, acceleration
//! cap).

use crate::simulation::params::Settings;
use crate::simulation::states::{Body, NVec2};

/// Collection of force terms.
/// Each term implements [`Force`] and adds its contribution into the bodies'
/// accumulated acceleration in place.
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute net accelerations for all bodies under `settings`.
    /// Every body's `a` is zeroed first, then each term accumulates into it.
    pub fn accumulate_all(&self, bodies: &mut [Body], settings: &Settings) {
        // Zero the per-tick accumulators
        for b in bodies.iter_mut() {
            b.a = NVec2::zeros();
        }
        // Iterate over all force contributors
        for term in &self.terms {
            term.accumulate(bodies, settings);
        }
    }
}

/// Trait for force sources operating on the body list.
/// Implementations add their contribution to each body's `a`, already
/// expressed in pixel-per-simulated-second^2 units.
pub trait Force {
    fn accumulate(&self, bodies: &mut [Body], settings: &Settings);
}

/// Direct pairwise Newtonian gravity, O(n^2) by design.
///
/// Displacements are read in pixel units and converted to physical units
/// through the settings' distance ratio before the inverse-square law is
/// applied; the result is converted back to pixel units at the end. The
/// separation floor (`d_min`) and the magnitude cap (`a_lim`) bound close
/// encounters; degenerate geometry collapses to zero force instead of NaN.
pub struct PairwiseGravity;

impl Force for PairwiseGravity {
    fn accumulate(&self, bodies: &mut [Body], settings: &Settings) {
        let n = bodies.len();
        if n == 0 { // No bodies, return
            return;
        }

        let ratio = settings.distance_ratio();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &bodies[i];
            if bi.mass == 0.0 {
                // Massless tracer: initiates no pairs and, since every force
                // term carries the mass product, receives none either. Its
                // acceleration stays at the zero set by accumulate_all.
                continue;
            }
            let xi = bi.x; // position of body i
            let mi = bi.mass; // mass of body i

            for j in (i + 1)..n {
                let bj = &bodies[j];
                let xj = bj.x; // position of body j
                let mj = bj.mass; // mass of body j

                // d points from i to j: i is pulled along +d, j along -d
                let d = xj - xi;

                // Physical separation, floored at d_min
                let dist = (d.norm() * ratio).max(settings.d_min);

                // Inverse-square force magnitude
                let f = (mi * mj) / (dist * dist);

                // Directional components; degenerate geometry gives no force
                let mut fx = f * d.x / dist;
                let mut fy = f * d.y / dist;
                if fx.is_nan() {
                    fx = 0.0;
                }
                if fy.is_nan() {
                    fy = 0.0;
                }

                // Equal and opposite
                bodies[i].a.x += fx;
                bodies[i].a.y += fy;
                bodies[j].a.x -= fx;
                bodies[j].a.y -= fy;
            }

            let b = &mut bodies[i];

            // Force sum -> acceleration
            b.a *= settings.g / mi;

            // Magnitude cap, rescaling both axes to preserve direction
            let mag = b.a.norm();
            if mag > settings.a_lim {
                b.a *= settings.a_lim / mag;
            }

            // Back to pixel units
            b.a /= ratio;
        }
    }
}
