//! Core state types for the gravity sandbox.
//!
//! Defines the `Body` point mass, the pan/zoom `ViewState`, and
//! `SimulationState`, the authoritative owner of the body collection and the
//! active `Settings`. All positions live in display/pixel units; velocities
//! are pixels per simulated second.

use nalgebra::Vector2;
use rand::Rng;

use crate::simulation::params::Settings;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position, px
    pub v: NVec2, // velocity, px per simulated second
    pub a: NVec2, // acceleration, rebuilt from scratch every tick
    pub mass: f64, // non-negative; 0 marks a passive tracer
    pub size: f64, // drawn square edge, px (no physical effect)
    pub color: String, // hex color, rendering only
    pub id: Option<String>, // unique among live ids
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, mass: f64, size: f64, color: String, id: Option<String>) -> Self {
        Self {
            x,
            v,
            a: NVec2::zeros(),
            mass: mass.max(0.0),
            size,
            color,
            id,
        }
    }
}

/// Pan/zoom transform, consumed only by rendering and pointer input.
/// Lives next to `Settings` so replacing settings never touches the view.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub zoom: f64,
    pub offset: NVec2, // pan, px of unzoomed display space
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: NVec2::zeros(),
        }
    }
}

/// Axis-aligned rectangle in simulation space, normalized on construction.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: NVec2,
    pub max: NVec2,
}

impl Bounds {
    pub fn new(a: NVec2, b: NVec2) -> Self {
        Self {
            min: NVec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: NVec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }
}

/// Owner of the body collection, the active settings, and the view transform.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub bodies: Vec<Body>,
    pub settings: Settings,
    pub view: ViewState,
}

impl SimulationState {
    pub fn new(settings: Settings) -> Self {
        Self {
            bodies: Vec::new(),
            settings,
            view: ViewState::default(),
        }
    }

    /// Wholesale settings replacement.
    ///
    /// Before the old values are discarded, every body's velocity is rescaled
    /// by the old-to-new ratio of each distance-scale factor, so the physical
    /// velocity a body represents survives the change of pixel scale.
    pub fn apply_settings(&mut self, new: Settings) {
        let scale = (self.settings.d_mul_mil_km / new.d_mul_mil_km)
            * (self.settings.d_mul_px / new.d_mul_px);
        if scale.is_finite() && scale != 1.0 {
            for b in &mut self.bodies {
                b.v *= scale;
            }
            log::debug!("distance scale changed, velocities rescaled by {scale}");
        }
        self.settings = new;
    }

    /// Append one body. A requested id that collides with a live one gets `#`
    /// appended until unique.
    pub fn insert_at(
        &mut self,
        x: NVec2,
        v: NVec2,
        mass: f64,
        size: f64,
        color: String,
        id: Option<String>,
    ) {
        let id = self.resolve_id(id);
        self.bodies.push(Body::new(x, v, mass, size, color, id));
    }

    /// Append `count` bodies at uniformly random positions within `bounds`
    /// (simulation space, i.e. already adjusted for the current pan/zoom),
    /// all sharing the same velocity, mass, size, and color.
    pub fn insert_scatter(
        &mut self,
        count: usize,
        bounds: Bounds,
        v: NVec2,
        mass: f64,
        size: f64,
        color: &str,
    ) {
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            let x = NVec2::new(
                rng.gen_range(bounds.min.x..=bounds.max.x),
                rng.gen_range(bounds.min.y..=bounds.max.y),
            );
            self.bodies.push(Body::new(x, v, mass, size, color.to_owned(), None));
        }
        log::debug!("scattered {count} bodies, {} total", self.bodies.len());
    }

    /// Remove one body by position in the collection.
    pub fn remove(&mut self, index: usize) -> Option<Body> {
        if index < self.bodies.len() {
            Some(self.bodies.remove(index))
        } else {
            None
        }
    }

    /// Remove one body by its id label.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Body> {
        let index = self
            .bodies
            .iter()
            .position(|b| b.id.as_deref() == Some(id))?;
        Some(self.bodies.remove(index))
    }

    pub fn clear_all(&mut self) {
        self.bodies.clear();
    }

    /// Zero every body's velocity. Callable in any run state.
    pub fn reset_velocity(&mut self) {
        for b in &mut self.bodies {
            b.v = NVec2::zeros();
        }
    }

    fn resolve_id(&self, id: Option<String>) -> Option<String> {
        let mut id = id?;
        while self
            .bodies
            .iter()
            .any(|b| b.id.as_deref() == Some(id.as_str()))
        {
            id.push('#');
        }
        Some(id)
    }
}
