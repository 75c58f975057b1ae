//! Canvas projection math, kept free of any rendering backend.
//!
//! Bodies are drawn as filled squares. Projection maps a body's simulation
//! position into canvas coordinates (origin top-left, y down) through the
//! view transform; the returned rect carries the square's top-left corner.

use crate::simulation::states::{Body, SimulationState, ViewState};

/// One draw command: top-left corner, edge length, fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
}

/// Project one body into canvas coordinates.
pub fn project(body: &Body, view: &ViewState, width: f64, height: f64, render_ceil: bool) -> RenderRect {
    let size = body.size;
    let x = (body.x.x + view.offset.x) * view.zoom + width / 2.0 - size / 2.0;
    let y = (body.x.y + view.offset.y) * view.zoom + height / 2.0 - size / 2.0;
    RenderRect {
        x: if render_ceil { x.ceil() } else { x },
        y: if render_ceil { y.ceil() } else { y },
        size,
        color: body.color.clone(),
    }
}

/// Draw list for the whole scene, in body enumeration order.
pub fn render_pass(state: &SimulationState, width: f64, height: f64) -> Vec<RenderRect> {
    state
        .bodies
        .iter()
        .map(|b| project(b, &state.view, width, height, state.settings.render_ceil))
        .collect()
}

/// Invert the projection for pointer input: canvas position (a body center,
/// not a rect corner) back to simulation space.
pub fn unproject(px: f64, py: f64, view: &ViewState, width: f64, height: f64) -> (f64, f64) {
    (
        (px - width / 2.0) / view.zoom - view.offset.x,
        (py - height / 2.0) / view.zoom - view.offset.y,
    )
}
