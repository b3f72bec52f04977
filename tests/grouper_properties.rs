use courier::domain::types::{Fleet, Package};
use courier::planning::{plan_batches, sort_batches, ExhaustiveGrouper, SubsetGrouper, WeightedItem};
use proptest::prelude::*;

fn items(weights: &[u32]) -> Vec<WeightedItem> {
    weights
        .iter()
        .enumerate()
        .map(|(index, &w)| WeightedItem {
            index,
            value: w as f64,
        })
        .collect()
}

proptest! {
    #[test]
    fn combinations_fit_and_match_their_sum(
        weights in prop::collection::vec(0u32..120, 0..9),
        capacity in 1u32..300,
    ) {
        let subsets =
            ExhaustiveGrouper.find_subsets_by_target_capacity(&items(&weights), capacity as f64);

        for (sum, combinations) in &subsets {
            prop_assert!(sum.0 <= capacity as f64);
            for combination in combinations {
                let total: f64 = combination.iter().map(|item| item.value).sum();
                prop_assert_eq!(total, sum.0);
                prop_assert!(combination.windows(2).all(|pair| pair[0].index < pair[1].index));
            }
        }
    }

    #[test]
    fn no_feasible_subset_is_omitted(
        weights in prop::collection::vec(0u32..120, 0..9),
        capacity in 1u32..300,
    ) {
        let subsets =
            ExhaustiveGrouper.find_subsets_by_target_capacity(&items(&weights), capacity as f64);
        let found: usize = subsets.values().map(Vec::len).sum();

        let expected = (1u32..(1 << weights.len()))
            .filter(|mask| {
                let sum: u32 = weights
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *mask & (1u32 << i) != 0)
                    .map(|(_, w)| w)
                    .sum();
                sum <= capacity
            })
            .count();

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn batch_order_is_total_and_stable_under_resort(
        specs in prop::collection::vec((1u32..100, 1u32..50), 1..8),
    ) {
        let packages: Vec<Package> = specs
            .iter()
            .enumerate()
            .map(|(i, &(weight, distance))| {
                Package::new(format!("P{i}"), weight as f64, distance as f64, "NA")
            })
            .collect();
        let fleet = Fleet { vehicle_count: 1, max_speed: 10.0, max_weight: 150.0 };

        let batches = plan_batches(&packages, &fleet).unwrap();
        for pair in batches.windows(2) {
            prop_assert!(pair[0].total_weight >= pair[1].total_weight);
            if pair[0].total_weight == pair[1].total_weight {
                prop_assert!(pair[0].max_distance <= pair[1].max_distance);
            }
        }

        let mut resorted = batches.clone();
        sort_batches(&mut resorted);
        prop_assert_eq!(resorted, batches);
    }
}
