use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::types::{Fleet, Package};
use crate::pricing::discount::{Bounds, Discount, DiscountRule};

const CODES: [&str; 4] = ["OFR001", "OFR002", "OFR003", "NA"];

/// The five-package, two-vehicle scenario used across the tests.
pub fn sample_packages() -> Vec<Package> {
    vec![
        Package::new("PKG1", 50.0, 30.0, "OFR001"),
        Package::new("PKG2", 75.0, 125.0, "OFR003"),
        Package::new("PKG3", 175.0, 100.0, "OFR003"),
        Package::new("PKG4", 110.0, 60.0, "OFR002"),
        Package::new("PKG5", 155.0, 95.0, "NA"),
    ]
}

pub fn sample_fleet() -> Fleet {
    Fleet {
        vehicle_count: 2,
        max_speed: 70.0,
        max_weight: 200.0,
    }
}

pub fn sample_rules() -> Vec<DiscountRule> {
    vec![
        rule("OFR001", (0.0, 199.0), (70.0, 200.0), 10.0),
        rule("OFR002", (50.0, 150.0), (100.0, 250.0), 7.0),
        rule("OFR003", (50.0, 250.0), (10.0, 150.0), 5.0),
    ]
}

fn rule(code: &str, distance: (f64, f64), weight: (f64, f64), percentage: f64) -> DiscountRule {
    DiscountRule {
        code: code.to_string(),
        distance: Bounds {
            min: distance.0,
            max: distance.1,
        },
        weight: Bounds {
            min: weight.0,
            max: weight.1,
        },
        discount: Discount::percentage(percentage),
    }
}

/// Seeded random packages with whole-number weights and distances.
pub fn generate_random_packages(count: usize, seed: u64) -> Vec<Package> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let weight = rng.gen_range(1..=200) as f64;
            let distance = rng.gen_range(1..=250) as f64;
            let code = CODES[rng.gen_range(0..CODES.len())];
            Package::new(format!("PKG{}", i + 1), weight, distance, code)
        })
        .collect()
}
