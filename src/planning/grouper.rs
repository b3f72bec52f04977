use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{trace, warn};

/// Item counts above this make the exhaustive search noticeably slow.
pub const EXHAUSTIVE_ITEM_WARN_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedItem {
    pub index: usize,
    pub value: f64,
}

/// Exact subset sum used as a map key. Ordered with `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct WeightSum(pub f64);

impl PartialEq for WeightSum {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightSum {}

impl Ord for WeightSum {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for WeightSum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Every achievable sum mapped to all the combinations reaching it.
pub type SubsetsBySum = BTreeMap<WeightSum, Vec<Vec<WeightedItem>>>;

/// Groups weighted items into every combination that fits a capacity.
///
/// Batch construction consumes every sum level, not only the best one, so an
/// implementation must not drop feasible combinations.
pub trait SubsetGrouper {
    fn find_subsets_by_target_capacity(
        &self,
        items: &[WeightedItem],
        capacity: f64,
    ) -> SubsetsBySum;
}

/// Depth-first include/skip enumeration over all subsets.
///
/// Runs in O(2^n) for n items. Package counts per run are expected to be
/// small; a bounded dynamic-programming grouper can replace this one behind
/// [`SubsetGrouper`] without touching callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveGrouper;

impl SubsetGrouper for ExhaustiveGrouper {
    fn find_subsets_by_target_capacity(
        &self,
        items: &[WeightedItem],
        capacity: f64,
    ) -> SubsetsBySum {
        if items.len() > EXHAUSTIVE_ITEM_WARN_LIMIT {
            warn!(
                "Exhaustive grouping over {} items explores up to 2^{} subsets",
                items.len(),
                items.len()
            );
        }

        let mut subsets = SubsetsBySum::new();
        let mut current = Vec::with_capacity(items.len());
        enumerate(items, capacity, 0, 0.0, &mut current, &mut subsets);

        trace!(
            "Found {} distinct sums for {} items under capacity {}",
            subsets.len(),
            items.len(),
            capacity
        );
        subsets
    }
}

fn enumerate(
    items: &[WeightedItem],
    capacity: f64,
    position: usize,
    sum: f64,
    current: &mut Vec<WeightedItem>,
    subsets: &mut SubsetsBySum,
) {
    let Some(item) = items.get(position) else {
        if !current.is_empty() {
            subsets
                .entry(WeightSum(sum))
                .or_default()
                .push(current.clone());
        }
        return;
    };

    let with_item = sum + item.value;
    if with_item <= capacity {
        current.push(*item);
        enumerate(items, capacity, position + 1, with_item, current, subsets);
        current.pop();
    }

    enumerate(items, capacity, position + 1, sum, current, subsets);
}
