use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::data::mock::generate_mock_stocks;
use crate::mapping::batch::map_batch;
use crate::market::record::RawStockRecord;
use crate::simulation::engine::PhysicsStepper;
use crate::simulation::params::{SimulationParameters, EQUILIBRIUM_GRAVITY};
use crate::simulation::states::Body;

/// Helper to build a body set of size `n` from repeated mock batches
fn make_bodies(n: usize) -> Vec<Body> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut records: Vec<RawStockRecord> = Vec::with_capacity(n);

    let mut round = 0;
    while records.len() < n {
        for mut r in generate_mock_stocks(&mut rng) {
            if records.len() == n {
                break;
            }
            // tickers must stay unique across rounds
            r.ticker = format!("{}_{}", r.ticker, round);
            records.push(r);
        }
        round += 1;
    }

    map_batch(&records, &mut rng).unwrap_or_default()
}

/// Time one physics frame for growing N, standard and orbital mode.
/// The collision pass is pairwise, so expect roughly 4x per doubling.
pub fn bench_step() {
    let ns = [80, 160, 320, 640, 1280];
    let steps = 20;

    let stepper = PhysicsStepper::new();
    let standard = SimulationParameters::default();
    let orbital = SimulationParameters {
        gravity_strength: EQUILIBRIUM_GRAVITY,
        ..SimulationParameters::default()
    };

    println!("N,standard_ms,orbital_ms");

    for n in ns {
        let template = make_bodies(n);

        let mut bodies = template.clone();
        // Warm-up
        stepper.step(&mut bodies, &standard);

        let t0 = Instant::now();
        for _ in 0..steps {
            stepper.step(&mut bodies, &standard);
        }
        let ms_standard = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut bodies = template.clone();
        stepper.step(&mut bodies, &orbital);

        let t1 = Instant::now();
        for _ in 0..steps {
            stepper.step(&mut bodies, &orbital);
        }
        let ms_orbital = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.4},{:.4}", template.len(), ms_standard, ms_orbital);
    }
}
