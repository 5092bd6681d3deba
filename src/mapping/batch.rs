//! Batch entry point: records → freshly placed bodies
//!
//! Ranges for market cap and volume are computed once over the whole batch,
//! each record is mapped independently, and every body gets a uniformly random
//! starting position in the cube [-20, 20)³.

use rand::Rng;
use tracing::debug;

use crate::error::DataError;
use crate::mapping::metrics::{self, MetricRange};
use crate::mapping::visual::VisualProperties;
use crate::market::record::{validate_batch, RawStockRecord};
use crate::simulation::states::{Body, NVec3};

/// Side length of the spawn cube, centered at the origin
pub const SPAWN_EXTENT: f64 = 40.0;

/// Validate and map a whole batch
pub fn map_batch<R: Rng + ?Sized>(records: &[RawStockRecord], rng: &mut R) -> Result<Vec<Body>, DataError> {
    validate_batch(records)?;

    // validate_batch guarantees at least one record
    let caps = MetricRange::from_values(records.iter().map(|r| r.market_cap)).ok_or(DataError::Empty)?;
    let volumes = MetricRange::from_values(records.iter().map(|r| r.volume)).ok_or(DataError::Empty)?;

    debug!(
        count = records.len(),
        cap_min = caps.min,
        cap_max = caps.max,
        "mapping stock batch"
    );

    let bodies = records
        .iter()
        .map(|r| Body {
            ticker: r.ticker.clone(),
            x: random_position(rng),
            v: metrics::velocity_vector(r.revenue_growth, r.month_change),
            rule_of_40: r.rule_of_40,
            visual: VisualProperties::from_record(r, caps, volumes),
        })
        .collect();

    Ok(bodies)
}

fn random_position<R: Rng + ?Sized>(rng: &mut R) -> NVec3 {
    NVec3::new(
        (rng.gen::<f64>() - 0.5) * SPAWN_EXTENT,
        (rng.gen::<f64>() - 0.5) * SPAWN_EXTENT,
        (rng.gen::<f64>() - 0.5) * SPAWN_EXTENT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::record::sample_record;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn bodies_spawn_inside_cube_with_finite_visuals() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let records: Vec<_> = (0..50)
            .map(|i| {
                let mut r = sample_record(&format!("T{i}"));
                r.market_cap = 1e9 * (i + 1) as f64;
                r.volume = 1e6 * (i + 1) as f64;
                r
            })
            .collect();

        let bodies = map_batch(&records, &mut rng).unwrap();
        assert_eq!(bodies.len(), 50);
        for b in &bodies {
            for c in b.x.iter() {
                assert!((-20.0..20.0).contains(c), "spawned outside cube: {c}");
            }
            assert_eq!(b.v.z, 0.0);
            assert!(b.visual.is_finite());
        }
    }

    #[test]
    fn identical_caps_and_volumes_stay_finite() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let records = vec![sample_record("A"), sample_record("B"), sample_record("C")];
        let bodies = map_batch(&records, &mut rng).unwrap();
        for b in &bodies {
            assert_eq!(b.visual.size, metrics::MIN_BUBBLE_SIZE);
            assert_eq!(b.visual.pulse_speed, metrics::DEFAULT_PULSE_SPEED);
        }
    }

    #[test]
    fn empty_batch_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(map_batch(&[], &mut rng), Err(DataError::Empty)));
    }
}
