use gravbox::{
    euler_integrator, project, render_pass, unproject, Body, Bounds, ClockState, ForceSet, NVec2,
    PairwiseGravity, SceneConfig, Settings, Simulation, SimulationClock, SimulationState,
    TemplateStore, ViewState,
};

/// Settings whose unit conversions collapse to 1: one pixel is one physical
/// length unit and one real second is one simulated second.
fn unit_settings() -> Settings {
    Settings {
        g: 1.0,
        d_mul_mil_km: 1.0,
        d_mul_px: 1.0e9,
        d_min: 1.0e-6,
        a_lim: 1.0e12,
        time_step_hr: 1.0 / 3600.0,
        time_step_sec: 1.0,
        render_ceil: false,
    }
}

/// Plain body at rest
fn body_at(x: f64, y: f64, mass: f64) -> Body {
    Body::new(
        NVec2::new(x, y),
        NVec2::zeros(),
        mass,
        2.0,
        "#ffffff".to_owned(),
        None,
    )
}

/// Build the production force set
fn gravity_set() -> ForceSet {
    ForceSet::new().with(PairwiseGravity)
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let settings = unit_settings();
    let forces = gravity_set();

    let mut bodies = vec![body_at(0.0, 0.0, 2.0), body_at(1.3, -0.7, 3.0)];
    forces.accumulate_all(&mut bodies, &settings);

    let net = bodies[0].a * bodies[0].mass + bodies[1].a * bodies[1].mass;
    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let settings = unit_settings();
    let forces = gravity_set();

    let mut bodies = vec![body_at(0.0, 0.0, 1.0), body_at(2.0, 1.0, 1.0)];
    forces.accumulate_all(&mut bodies, &settings);

    let d = bodies[1].x - bodies[0].x;
    assert!(bodies[0].a.dot(&d) > 0.0, "Acceleration is not toward second body");
    assert!(bodies[1].a.dot(&d) < 0.0, "Reaction is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let settings = unit_settings();
    let forces = gravity_set();

    let mut near = vec![body_at(0.0, 0.0, 1.0), body_at(10.0, 0.0, 1.0)];
    let mut far = vec![body_at(0.0, 0.0, 1.0), body_at(20.0, 0.0, 1.0)];
    forces.accumulate_all(&mut near, &settings);
    forces.accumulate_all(&mut far, &settings);

    let ratio = near[0].a.norm() / far[0].a.norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected ~4x, got {}", ratio);
}

#[test]
fn zero_mass_body_stays_inert() {
    let settings = unit_settings();
    let forces = gravity_set();

    let mut with_tracer = vec![
        body_at(0.0, 0.0, 5.0),
        body_at(10.0, 0.0, 0.0),
        body_at(20.0, 0.0, 7.0),
    ];
    forces.accumulate_all(&mut with_tracer, &settings);

    // The tracer neither accelerates itself nor disturbs the others
    assert_eq!(with_tracer[1].a.norm(), 0.0);

    let mut without = vec![body_at(0.0, 0.0, 5.0), body_at(20.0, 0.0, 7.0)];
    forces.accumulate_all(&mut without, &settings);

    assert!((with_tracer[0].a - without[0].a).norm() < 1e-15);
    assert!((with_tracer[2].a - without[1].a).norm() < 1e-15);
}

#[test]
fn separation_floor_bounds_close_encounters() {
    let mut settings = unit_settings();
    settings.d_min = 5.0;
    let forces = gravity_set();

    // Coincident bodies: degenerate geometry collapses to zero force
    let mut coincident = vec![body_at(1.0, 1.0, 1.0), body_at(1.0, 1.0, 1.0)];
    forces.accumulate_all(&mut coincident, &settings);
    assert!(coincident[0].a.x.is_finite() && coincident[0].a.y.is_finite());
    assert_eq!(coincident[0].a.norm(), 0.0);

    // A sub-floor separation never exceeds the at-floor pull
    let mut below = vec![body_at(0.0, 0.0, 1.0), body_at(1.0, 0.0, 1.0)];
    let mut at_floor = vec![body_at(0.0, 0.0, 1.0), body_at(5.0, 0.0, 1.0)];
    forces.accumulate_all(&mut below, &settings);
    forces.accumulate_all(&mut at_floor, &settings);

    assert!(below[0].a.norm().is_finite());
    assert!(below[0].a.norm() <= at_floor[0].a.norm());
}

#[test]
fn nan_force_terms_are_suppressed() {
    let mut settings = unit_settings();
    settings.d_min = 0.0; // no floor at all
    let forces = gravity_set();

    let mut bodies = vec![body_at(0.0, 0.0, 1.0), body_at(0.0, 0.0, 1.0)];
    forces.accumulate_all(&mut bodies, &settings);

    assert!(bodies[0].a.x.is_finite() && bodies[0].a.y.is_finite());
    assert!(bodies[1].a.x.is_finite() && bodies[1].a.y.is_finite());
}

#[test]
fn acceleration_clamp_preserves_direction() {
    let mut settings = unit_settings();
    settings.a_lim = 1.0e-3;
    let forces = gravity_set();

    let mut bodies = vec![body_at(0.0, 0.0, 1.0e6), body_at(3.0, 4.0, 1.0e6)];
    forces.accumulate_all(&mut bodies, &settings);

    for b in &bodies {
        assert!(
            b.a.norm() <= settings.a_lim * (1.0 + 1e-12),
            "Clamp exceeded: {}",
            b.a.norm()
        );
    }
    // Both axes were rescaled together: direction still along (3, 4)
    let a = bodies[0].a;
    assert!((a.x * 4.0 - a.y * 3.0).abs() < 1e-12);
    assert!((a.norm() - settings.a_lim).abs() < 1e-9);
}

#[test]
fn accelerations_are_rebuilt_every_pass() {
    let settings = unit_settings();
    let forces = gravity_set();

    let mut bodies = vec![body_at(0.0, 0.0, 1.0), body_at(10.0, 0.0, 1.0)];
    forces.accumulate_all(&mut bodies, &settings);
    let first = bodies[0].a;
    forces.accumulate_all(&mut bodies, &settings);

    // Same geometry, same result: nothing carried over between passes
    assert!((bodies[0].a - first).norm() < 1e-15);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrator_rest_is_a_fixed_point() {
    let mut bodies = vec![body_at(3.0, 4.0, 1.0)];
    for _ in 0..100 {
        euler_integrator(&mut bodies, 0.016);
    }
    assert_eq!(bodies[0].x, NVec2::new(3.0, 4.0));
    assert_eq!(bodies[0].v, NVec2::zeros());
}

#[test]
fn integrator_updates_velocity_before_position() {
    let mut bodies = vec![body_at(0.0, 0.0, 1.0)];
    bodies[0].a = NVec2::new(2.0, 0.0);

    euler_integrator(&mut bodies, 1.0);

    // Position already moved by the new velocity, not the old zero one
    assert_eq!(bodies[0].v, NVec2::new(2.0, 0.0));
    assert_eq!(bodies[0].x, NVec2::new(2.0, 0.0));
}

#[test]
fn two_body_orbit_holds_separation() {
    let settings = unit_settings();
    let d = 100.0;
    let v = (settings.g * 1.0 / (2.0 * d)).sqrt();

    let mut state = SimulationState::new(settings);
    state.insert_at(
        NVec2::new(-d / 2.0, 0.0),
        NVec2::new(0.0, -v),
        1.0,
        2.0,
        "#ffffff".to_owned(),
        None,
    );
    state.insert_at(
        NVec2::new(d / 2.0, 0.0),
        NVec2::new(0.0, v),
        1.0,
        2.0,
        "#ffffff".to_owned(),
        None,
    );

    let mut sim = Simulation {
        state,
        forces: gravity_set(),
        clock: SimulationClock::new(),
    };

    // A bit over one orbital period in 0.5 s slices
    for step in 0..10_000 {
        sim.advance(0.5);
        if step % 100 == 0 {
            let sep = (sim.state.bodies[1].x - sim.state.bodies[0].x).norm();
            assert!(
                (90.0..=110.0).contains(&sep),
                "Orbit drifted to separation {} at step {}",
                sep,
                step
            );
        }
    }
}

#[test]
fn advance_scales_elapsed_time_by_time_ratio() {
    let mut settings = unit_settings();
    settings.time_step_hr = 2.0 / 3600.0; // time ratio 2

    let mut state = SimulationState::new(settings);
    state.insert_at(
        NVec2::zeros(),
        NVec2::new(1.0, 0.0),
        1.0,
        2.0,
        "#ffffff".to_owned(),
        None,
    );
    let mut sim = Simulation {
        state,
        forces: gravity_set(),
        clock: SimulationClock::new(),
    };

    sim.advance(3.0); // 6 simulated seconds
    assert!((sim.state.bodies[0].x.x - 6.0).abs() < 1e-12);
}

// ==================================================================================
// State / collection tests
// ==================================================================================

#[test]
fn velocity_rescales_with_distance_factors() {
    let mut state = SimulationState::new(Settings::default()); // 150 / 1000
    state.insert_at(
        NVec2::zeros(),
        NVec2::new(10.0, 0.0),
        1.0,
        2.0,
        "#ffffff".to_owned(),
        None,
    );

    state.apply_settings(Settings {
        d_mul_mil_km: 300.0,
        ..Settings::default()
    });
    assert_eq!(state.bodies[0].v, NVec2::new(5.0, 0.0));

    state.apply_settings(Settings {
        d_mul_mil_km: 300.0,
        d_mul_px: 2000.0,
        ..Settings::default()
    });
    assert_eq!(state.bodies[0].v, NVec2::new(2.5, 0.0));
}

#[test]
fn scatter_insertion_stays_in_bounds() {
    let mut state = SimulationState::new(Settings::default());
    let bounds = Bounds::new(NVec2::new(-100.0, -50.0), NVec2::new(100.0, 50.0));

    state.insert_scatter(50, bounds, NVec2::zeros(), 1.0, 2.0, "#ffffff");

    assert_eq!(state.bodies.len(), 50);
    for b in &state.bodies {
        assert!((-100.0..=100.0).contains(&b.x.x));
        assert!((-50.0..=50.0).contains(&b.x.y));
    }
}

#[test]
fn id_collisions_get_suffixed() {
    let mut state = SimulationState::new(Settings::default());
    for _ in 0..3 {
        state.insert_at(
            NVec2::zeros(),
            NVec2::zeros(),
            1.0,
            2.0,
            "#ffffff".to_owned(),
            Some("Luna".to_owned()),
        );
    }
    let ids: Vec<_> = state.bodies.iter().map(|b| b.id.clone().unwrap()).collect();
    assert_eq!(ids, vec!["Luna", "Luna#", "Luna##"]);
}

#[test]
fn remove_and_reset_velocity() {
    let mut state = SimulationState::new(Settings::default());
    state.insert_at(
        NVec2::zeros(),
        NVec2::new(1.0, 2.0),
        1.0,
        2.0,
        "#ffffff".to_owned(),
        Some("A".to_owned()),
    );
    state.insert_at(
        NVec2::new(5.0, 0.0),
        NVec2::new(3.0, 4.0),
        1.0,
        2.0,
        "#ffffff".to_owned(),
        Some("B".to_owned()),
    );

    assert!(state.remove_by_id("A").is_some());
    assert!(state.remove_by_id("A").is_none());
    assert_eq!(state.bodies.len(), 1);

    state.reset_velocity();
    assert_eq!(state.bodies[0].v, NVec2::zeros());

    assert!(state.remove(0).is_some());
    assert!(state.remove(0).is_none());
}

#[test]
fn negative_mass_is_clamped_on_insert() {
    let mut state = SimulationState::new(Settings::default());
    state.insert_at(
        NVec2::zeros(),
        NVec2::zeros(),
        -4.0,
        2.0,
        "#ffffff".to_owned(),
        None,
    );
    assert_eq!(state.bodies[0].mass, 0.0);
}

// ==================================================================================
// Clock tests
// ==================================================================================

#[test]
fn clock_pause_lands_on_next_tick_boundary() {
    let mut clock = SimulationClock::new();
    assert_eq!(clock.state(), ClockState::Stopped);
    assert!(clock.tick().is_none());

    clock.start();
    assert_eq!(clock.state(), ClockState::Running);
    clock.start(); // re-entrant start is a no-op
    assert_eq!(clock.state(), ClockState::Running);

    let elapsed = clock.tick().expect("running clock must tick");
    assert!(elapsed >= 0.0);

    clock.pause();
    assert_eq!(clock.state(), ClockState::PauseRequested);
    assert!(clock.is_running()); // still live until the boundary

    assert!(clock.tick().is_none()); // the boundary honors the pause
    assert_eq!(clock.state(), ClockState::Stopped);

    clock.pause(); // pause while stopped is a no-op
    assert_eq!(clock.state(), ClockState::Stopped);
}

#[test]
fn end_clears_bodies_and_stops() {
    let mut state = SimulationState::new(Settings::default());
    state.insert_at(
        NVec2::zeros(),
        NVec2::zeros(),
        1.0,
        2.0,
        "#ffffff".to_owned(),
        None,
    );
    let mut sim = Simulation {
        state,
        forces: gravity_set(),
        clock: SimulationClock::new(),
    };

    sim.start();
    assert!(sim.is_running());

    sim.end();
    assert!(sim.state.bodies.is_empty());
    assert!(!sim.is_running());
    assert!(!sim.tick());
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn scene_build_converts_physical_velocity() {
    let yaml = r#"
settings: {d_mul_mil_km: 2.0, d_mul_px: 1.0e9}
bodies:
  - {x: 1.0, y: 2.0, mass: 10.0, vx: 8.0}
"#;
    let cfg: SceneConfig = serde_yaml::from_str(yaml).unwrap();
    let sim = Simulation::build(cfg);

    // distance ratio is 2: 8 physical units per second is 4 px per second
    let b = &sim.state.bodies[0];
    assert_eq!(b.x, NVec2::new(1.0, 2.0));
    assert!((b.v.x - 4.0).abs() < 1e-12);
    assert_eq!(b.size, 4.0); // defaults fill the unset fields
    assert_eq!(b.color, "#ffffff");
}

#[test]
fn malformed_settings_values_fall_back_to_defaults() {
    let yaml = r#"
settings:
  g: "2.5"
  d_min: nonsense
  a_lim: [1, 2]
"#;
    let cfg: SceneConfig = serde_yaml::from_str(yaml).unwrap();
    let settings = cfg.settings.into_settings();

    assert_eq!(settings.g, 2.5); // number-like string parses
    assert_eq!(settings.d_min, 1.0e9); // garbage falls back
    assert_eq!(settings.a_lim, 1.0);
    assert_eq!(settings.d_mul_px, 1000.0); // missing falls back
}

// ==================================================================================
// Template store tests
// ==================================================================================

#[test]
fn template_save_rejects_empty_collection() {
    let mut store = TemplateStore::new();
    let err = store
        .save("scene", &[], &Settings::default())
        .expect_err("empty collection must be rejected");
    assert!(err.to_string().contains("empty"));
    assert!(store.is_empty());
}

#[test]
fn template_roundtrip_rescales_by_distance_ratio() {
    let saved_under = unit_settings(); // ratio 1
    let loaded_under = Settings {
        d_mul_mil_km: 2.0,
        d_mul_px: 1.0e9, // ratio 2
        ..unit_settings()
    };

    let mut body = body_at(7.0, -3.0, 12.0);
    body.v = NVec2::new(3.0, 0.0);
    body.a = NVec2::new(1.0, 0.0);

    let mut store = TemplateStore::new();
    store.save("scene", &[body], &saved_under).unwrap();

    let restored = store.load("scene", &loaded_under).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].x, NVec2::new(7.0, -3.0));
    assert!((restored[0].v.x - 1.5).abs() < 1e-12);
    assert!((restored[0].a.x - 0.5).abs() < 1e-12);
    assert_eq!(restored[0].mass, 12.0);
}

#[test]
fn template_name_collisions_get_suffixed() {
    let settings = Settings::default();
    let bodies = vec![body_at(0.0, 0.0, 1.0)];

    let mut store = TemplateStore::new();
    assert_eq!(store.save("scene", &bodies, &settings).unwrap(), "scene");
    assert_eq!(store.save("scene", &bodies, &settings).unwrap(), "scene#");
    assert!(store.get("scene").is_some());
    assert!(store.get("scene#").is_some());
}

#[test]
fn template_import_rejects_malformed_content() {
    let settings = Settings::default();
    let mut store = TemplateStore::new();
    store
        .save("scene", &[body_at(0.0, 0.0, 1.0)], &settings)
        .unwrap();

    let err = store
        .import_yaml("templates: [not a map")
        .expect_err("malformed content must be rejected");
    assert!(err.to_string().contains("not valid"));
    assert_eq!(store.len(), 1); // nothing was merged

    let err = store
        .import_yaml("templates: 5")
        .expect_err("wrong shape must be rejected");
    assert!(err.to_string().contains("not valid"));
    assert_eq!(store.len(), 1);
}

#[test]
fn template_import_suffixes_colliding_names() {
    let settings = Settings::default();
    let bodies = vec![body_at(0.0, 0.0, 1.0)];

    let mut source = TemplateStore::new();
    source.save("scene", &bodies, &settings).unwrap();
    let exported = source.to_yaml().unwrap();

    let mut store = TemplateStore::new();
    store.save("scene", &bodies, &settings).unwrap();
    assert_eq!(store.import_yaml(&exported).unwrap(), 1);

    let names: Vec<_> = store.names().collect();
    assert_eq!(names, vec!["scene", "scene#"]);
}

#[test]
fn template_load_missing_name_errors() {
    let store = TemplateStore::new();
    assert!(store.load("ghost", &Settings::default()).is_err());
}

// ==================================================================================
// Projection tests
// ==================================================================================

#[test]
fn project_applies_view_transform() {
    let mut body = body_at(10.0, 20.0, 1.0);
    body.size = 4.0;
    let view = ViewState {
        zoom: 2.0,
        offset: NVec2::new(5.0, -5.0),
    };

    let rect = project(&body, &view, 800.0, 600.0, false);
    assert_eq!(rect.x, 428.0);
    assert_eq!(rect.y, 328.0);
    assert_eq!(rect.size, 4.0);
}

#[test]
fn project_ceil_rounds_up() {
    let mut body = body_at(1.1, 0.0, 1.0);
    body.size = 4.0;
    let view = ViewState {
        zoom: 1.5,
        offset: NVec2::new(5.0, 0.0),
    };

    let rect = project(&body, &view, 800.0, 600.0, true);
    assert_eq!(rect.x, 408.0); // 407.15 rounded up
    assert_eq!(rect.y, 298.0); // already integral
}

#[test]
fn unproject_inverts_project() {
    let body = body_at(12.5, -40.25, 1.0);
    let view = ViewState {
        zoom: 3.0,
        offset: NVec2::new(-17.0, 9.0),
    };

    let rect = project(&body, &view, 800.0, 600.0, false);
    let (sx, sy) = unproject(
        rect.x + rect.size / 2.0,
        rect.y + rect.size / 2.0,
        &view,
        800.0,
        600.0,
    );
    assert!((sx - body.x.x).abs() < 1e-9);
    assert!((sy - body.x.y).abs() < 1e-9);
}

#[test]
fn render_pass_preserves_enumeration_order() {
    let mut state = SimulationState::new(Settings::default());
    for (i, color) in ["#ff0000", "#00ff00", "#0000ff"].iter().enumerate() {
        state.insert_at(
            NVec2::new(i as f64 * 10.0, 0.0),
            NVec2::zeros(),
            1.0,
            2.0,
            (*color).to_owned(),
            None,
        );
    }

    let rects = render_pass(&state, 800.0, 600.0);
    assert_eq!(rects.len(), 3);
    for (rect, body) in rects.iter().zip(&state.bodies) {
        assert_eq!(rect.color, body.color);
    }
}
