use tracing::{debug, info, warn};

use crate::domain::types::{Batch, Fleet, Package};
use crate::error::{CourierError, Result};
use crate::planning::grouper::{ExhaustiveGrouper, SubsetGrouper, WeightedItem};

/// Turns grouped package combinations into prioritised delivery batches.
#[derive(Debug, Default, Clone)]
pub struct BatchPlanner<G = ExhaustiveGrouper> {
    grouper: G,
}

impl BatchPlanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: SubsetGrouper> BatchPlanner<G> {
    pub fn with_grouper(grouper: G) -> Self {
        Self { grouper }
    }

    /// Emit one batch per feasible combination, sorted heaviest first and,
    /// among equal weights, closest first.
    pub fn plan_batches(&self, packages: &[Package], fleet: &Fleet) -> Result<Vec<Batch>> {
        if fleet.is_empty() {
            return Err(CourierError::EmptyFleet);
        }
        if packages.is_empty() {
            return Err(CourierError::NoPackages);
        }

        for pkg in packages.iter().filter(|pkg| pkg.weight > fleet.max_weight) {
            warn!(
                "Package {} ({}) exceeds vehicle capacity {} and cannot be batched",
                pkg.name, pkg.weight, fleet.max_weight
            );
        }

        let weights: Vec<WeightedItem> = packages
            .iter()
            .enumerate()
            .map(|(index, pkg)| WeightedItem {
                index,
                value: pkg.weight,
            })
            .collect();

        let subsets = self
            .grouper
            .find_subsets_by_target_capacity(&weights, fleet.max_weight);

        let mut batches: Vec<Batch> = subsets
            .values()
            .flatten()
            .map(|combination| {
                let members = combination
                    .iter()
                    .map(|item| packages[item.index].clone())
                    .collect();
                Batch::new(members)
            })
            .collect();

        sort_batches(&mut batches);

        info!(
            "Planned {} batches from {} packages (capacity {})",
            batches.len(),
            packages.len(),
            fleet.max_weight
        );
        if let Some(first) = batches.first() {
            debug!(
                "Top batch {} weighs {} with max distance {}",
                first.id, first.total_weight, first.max_distance
            );
        }

        Ok(batches)
    }
}

/// Stable sort by batch priority.
pub fn sort_batches(batches: &mut [Batch]) {
    batches.sort_by(Batch::cmp_priority);
}

pub fn plan_batches(packages: &[Package], fleet: &Fleet) -> Result<Vec<Batch>> {
    BatchPlanner::new().plan_batches(packages, fleet)
}
