//! Interactive Bevy 2D viewer.
//!
//! Draws every body as a filled square sprite and reconciles the sprite
//! entities against the body collection each frame. Controls:
//!
//! - Space       start / pause
//! - R           reset all velocities
//! - E           end (clear the scene)
//! - G           scatter bodies over the visible area
//! - S / L       save / load the quick template slot
//! - left click  insert one body at the cursor
//! - right drag  pan (scaled by 1/zoom)
//! - wheel       zoom
//!
//! Losing window focus pauses a running simulation.

use std::path::PathBuf;

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused};

use crate::persistence::templates::TemplateStore;
use crate::simulation::scenario::Simulation;
use crate::simulation::states::{Body, Bounds, NVec2, ViewState};
use crate::visualization::render::unproject;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Parameters applied to pointer- and scatter-inserted bodies.
#[derive(Resource, Debug, Clone)]
pub struct InsertParams {
    pub mass: f64,
    pub size: f64,
    pub color: String,
    pub v: NVec2, // px per simulated second
    pub scatter_count: usize,
}

impl Default for InsertParams {
    fn default() -> Self {
        Self {
            mass: 5.972e24,
            size: 4.0,
            color: "#6fb7ff".to_owned(),
            v: NVec2::zeros(),
            scatter_count: 50,
        }
    }
}

#[derive(Resource)]
struct Templates {
    store: TemplateStore,
    path: PathBuf,
}

/// Template name used by the S/L keyboard shortcuts.
const QUICK_SLOT: &str = "quick";

pub fn run_viewer(simulation: Simulation, store: TemplateStore, store_path: PathBuf) {
    println!(
        "run_viewer: starting Bevy 2D viewer with {} bodies",
        simulation.state.bodies.len()
    );

    App::new()
        .insert_resource(simulation)
        .insert_resource(Templates {
            store,
            path: store_path,
        })
        .init_resource::<InsertParams>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_camera_system)
        .add_systems(
            Update,
            (
                keyboard_system,
                pointer_system,
                focus_system,
                physics_step_system,
                sync_bodies_system,
            )
                .chain(),
        )
        .run();
}

fn setup_camera_system(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

fn physics_step_system(mut sim: ResMut<Simulation>) {
    sim.tick();
}

fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<Simulation>,
    mut templates: ResMut<Templates>,
    insert: Res<InsertParams>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        if sim.is_running() {
            sim.pause();
        } else {
            sim.start();
        }
    }
    if keys.just_pressed(KeyCode::KeyR) {
        sim.state.reset_velocity();
    }
    if keys.just_pressed(KeyCode::KeyE) {
        sim.end();
    }
    if keys.just_pressed(KeyCode::KeyG) {
        let window = windows.single();
        let (w, h) = (window.width() as f64, window.height() as f64);
        let view = sim.state.view.clone();
        let (min_x, min_y) = unproject(0.0, 0.0, &view, w, h);
        let (max_x, max_y) = unproject(w, h, &view, w, h);
        let bounds = Bounds::new(NVec2::new(min_x, min_y), NVec2::new(max_x, max_y));
        sim.state.insert_scatter(
            insert.scatter_count,
            bounds,
            insert.v,
            insert.mass,
            insert.size,
            &insert.color,
        );
    }
    if keys.just_pressed(KeyCode::KeyS) {
        let Templates { store, path } = &mut *templates;
        match store.save(QUICK_SLOT, &sim.state.bodies, &sim.state.settings) {
            Ok(name) => match store.save_file(path) {
                Ok(()) => log::info!("saved template '{name}' to {}", path.display()),
                Err(e) => log::warn!("template store not written: {e:#}"),
            },
            Err(e) => log::warn!("{e:#}"),
        }
    }
    if keys.just_pressed(KeyCode::KeyL) {
        let settings = sim.state.settings.clone();
        match templates.store.load(QUICK_SLOT, &settings) {
            Ok(bodies) => {
                sim.state.bodies = bodies;
                log::info!("loaded template '{QUICK_SLOT}'");
            }
            Err(e) => log::warn!("{e:#}"),
        }
    }
}

fn pointer_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
    insert: Res<InsertParams>,
) {
    for ev in wheel.read() {
        let factor = if ev.y > 0.0 {
            1.1
        } else if ev.y < 0.0 {
            1.0 / 1.1
        } else {
            1.0
        };
        let zoom = (sim.state.view.zoom * factor).clamp(0.05, 50.0);
        sim.state.view.zoom = zoom;
    }

    if buttons.pressed(MouseButton::Right) {
        // Pan deltas shrink as the view zooms in
        let zoom = sim.state.view.zoom;
        for ev in motion.read() {
            sim.state.view.offset.x += ev.delta.x as f64 / zoom;
            sim.state.view.offset.y += ev.delta.y as f64 / zoom;
        }
    } else {
        motion.clear();
    }

    if buttons.just_pressed(MouseButton::Left) {
        let window = windows.single();
        if let Some(cursor) = window.cursor_position() {
            let (w, h) = (window.width() as f64, window.height() as f64);
            let view = sim.state.view.clone();
            let (sx, sy) = unproject(cursor.x as f64, cursor.y as f64, &view, w, h);
            sim.state.insert_at(
                NVec2::new(sx, sy),
                insert.v,
                insert.mass,
                insert.size,
                insert.color.clone(),
                None,
            );
        }
    }
}

fn focus_system(mut events: EventReader<WindowFocused>, mut sim: ResMut<Simulation>) {
    for ev in events.read() {
        if !ev.focused && sim.is_running() {
            log::info!("window unfocused, pausing");
            sim.pause();
        }
    }
}

fn sync_bodies_system(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut query: Query<(Entity, &BodyIndex, &mut Transform, &mut Sprite)>,
) {
    // Insert/remove/end changed the collection: rebuild the sprite set
    if query.iter().count() != sim.state.bodies.len() {
        for (entity, _, _, _) in &query {
            commands.entity(entity).despawn();
        }
        for (i, body) in sim.state.bodies.iter().enumerate() {
            commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: body_color(&body.color),
                        custom_size: Some(Vec2::splat(body.size as f32)),
                        ..Default::default()
                    },
                    transform: body_transform(body, &sim.state.view),
                    ..Default::default()
                },
                BodyIndex(i),
            ));
        }
        return;
    }

    for (_, BodyIndex(i), mut transform, mut sprite) in &mut query {
        if let Some(body) = sim.state.bodies.get(*i) {
            *transform = body_transform(body, &sim.state.view);
            sprite.color = body_color(&body.color);
            sprite.custom_size = Some(Vec2::splat(body.size as f32));
        }
    }
}

/// Simulation y grows downward (canvas convention); Bevy's world y grows up.
fn body_transform(body: &Body, view: &ViewState) -> Transform {
    let x = (body.x.x + view.offset.x) * view.zoom;
    let y = (body.x.y + view.offset.y) * view.zoom;
    Transform::from_xyz(x as f32, -y as f32, 0.0)
}

fn body_color(hex: &str) -> Color {
    Color::hex(hex).unwrap_or(Color::WHITE)
}
