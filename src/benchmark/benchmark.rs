use std::time::Instant;

use crate::simulation::forces::{ForceSet, PairwiseGravity};
use crate::simulation::params::Settings;
use crate::simulation::states::{Body, NVec2};

/// Time one direct O(n^2) accumulation pass at increasing body counts.
/// Paste the output directly into a spreadsheet to graph.
pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    let settings = Settings::default();
    let forces = ForceSet::new().with(PairwiseGravity);

    println!("N,pass_ms");
    for n in ns {
        let mut bodies = make_bodies(n);

        // Warm up
        forces.accumulate_all(&mut bodies, &settings);

        let t0 = Instant::now();
        forces.accumulate_all(&mut bodies, &settings);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{n},{ms:.6}");
    }
}

/// Deterministic body cloud of size `n`, no rand needed.
fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            Body::new(
                NVec2::new((i_f * 0.37).sin() * 500.0, (i_f * 0.13).cos() * 500.0),
                NVec2::zeros(),
                1.0e24,
                2.0,
                "#ffffff".to_owned(),
                None,
            )
        })
        .collect()
}
