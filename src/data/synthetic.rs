use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::model::{Column, HousingDataset, Record};

/// Seed used for the fallback dataset.
pub const DEFAULT_SEED: u64 = 42;
/// Row count of the fallback dataset.
pub const DEFAULT_SAMPLES: usize = 1000;

pub const LONGITUDE: (f64, f64) = (-124.3, -114.3);
pub const LATITUDE: (f64, f64) = (32.5, 42.0);
pub const HOUSING_MEDIAN_AGE: (u32, u32) = (1, 52);
pub const TOTAL_ROOMS: (u32, u32) = (2, 40_000);
pub const TOTAL_BEDROOMS: (u32, u32) = (1, 6_500);
pub const POPULATION: (u32, u32) = (3, 15_000);
pub const HOUSEHOLDS: (u32, u32) = (1, 5_000);
pub const MEDIAN_INCOME: (f64, f64) = (0.5, 15.0);
pub const MEDIAN_HOUSE_VALUE: (u32, u32) = (15_000, 500_000);
pub const OCEAN_PROXIMITY: [&str; 4] = ["INLAND", "NEAR BAY", "NEAR OCEAN", "ISLAND"];

/// Generate `n` placeholder records. Every column is drawn independently and
/// uniformly from a half-open range; the same seed always yields the same
/// dataset.
pub fn generate(seed: u64, n: usize) -> HousingDataset {
    let mut rng = StdRng::seed_from_u64(seed);

    // Column by column, so each column is its own stream of draws.
    let longitude = uniform_f64(&mut rng, n, LONGITUDE);
    let latitude = uniform_f64(&mut rng, n, LATITUDE);
    let age = uniform_u32(&mut rng, n, HOUSING_MEDIAN_AGE);
    let rooms = uniform_u32(&mut rng, n, TOTAL_ROOMS);
    let bedrooms = uniform_u32(&mut rng, n, TOTAL_BEDROOMS);
    let population = uniform_u32(&mut rng, n, POPULATION);
    let households = uniform_u32(&mut rng, n, HOUSEHOLDS);
    let income = uniform_f64(&mut rng, n, MEDIAN_INCOME);
    let value = uniform_u32(&mut rng, n, MEDIAN_HOUSE_VALUE);
    let proximity: Vec<&str> = (0..n)
        .map(|_| OCEAN_PROXIMITY.choose(&mut rng).copied().unwrap_or("INLAND"))
        .collect();

    let records = (0..n)
        .map(|i| Record {
            longitude: longitude[i],
            latitude: latitude[i],
            housing_median_age: Some(age[i]),
            total_rooms: Some(rooms[i]),
            total_bedrooms: Some(bedrooms[i]),
            population: Some(population[i]),
            households: Some(households[i]),
            median_income: income[i],
            median_house_value: f64::from(value[i]),
            ocean_proximity: Some(proximity[i].to_string()),
        })
        .collect();

    log::debug!("generated {n} synthetic records with seed {seed}");
    HousingDataset::new(records, Column::ALL.to_vec())
}

fn uniform_f64(rng: &mut StdRng, n: usize, (lo, hi): (f64, f64)) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(lo..hi)).collect()
}

fn uniform_u32(rng: &mut StdRng, n: usize, (lo, hi): (u32, u32)) -> Vec<u32> {
    (0..n).map(|_| rng.gen_range(lo..hi)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range<T: PartialOrd>(v: T, (lo, hi): (T, T)) -> bool {
        lo <= v && v < hi
    }

    #[test]
    fn test_default_sample_has_1000_rows_and_full_schema() {
        let ds = generate(DEFAULT_SEED, DEFAULT_SAMPLES);
        assert_eq!(ds.len(), 1000);
        assert_eq!(ds.columns, Column::ALL.to_vec());
        assert!(ds.categories.len() <= 4);
    }

    #[test]
    fn test_same_seed_is_byte_identical() {
        let to_csv = |ds: &HousingDataset| {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for r in &ds.records {
                writer.serialize(r).unwrap();
            }
            writer.into_inner().unwrap()
        };
        let a = generate(DEFAULT_SEED, DEFAULT_SAMPLES);
        let b = generate(DEFAULT_SEED, DEFAULT_SAMPLES);
        assert_eq!(a, b);
        assert_eq!(to_csv(&a), to_csv(&b));
        assert_ne!(a, generate(DEFAULT_SEED + 1, DEFAULT_SAMPLES));
    }

    #[test]
    fn test_every_column_within_bounds() {
        let ds = generate(DEFAULT_SEED, DEFAULT_SAMPLES);
        for r in &ds.records {
            assert!(in_range(r.longitude, LONGITUDE));
            assert!(in_range(r.latitude, LATITUDE));
            assert!(in_range(r.housing_median_age.unwrap(), HOUSING_MEDIAN_AGE));
            assert!(in_range(r.total_rooms.unwrap(), TOTAL_ROOMS));
            assert!(in_range(r.total_bedrooms.unwrap(), TOTAL_BEDROOMS));
            assert!(in_range(r.population.unwrap(), POPULATION));
            assert!(in_range(r.households.unwrap(), HOUSEHOLDS));
            assert!(in_range(r.median_income, MEDIAN_INCOME));
            assert!(in_range(r.median_house_value as u32, MEDIAN_HOUSE_VALUE));
            assert_eq!(r.median_house_value.fract(), 0.0);
            assert!(OCEAN_PROXIMITY.contains(&r.ocean_proximity.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_zero_rows() {
        let ds = generate(DEFAULT_SEED, 0);
        assert!(ds.is_empty());
        assert!(ds.has_column(Column::OceanProximity));
    }
}
