pub mod grouper;
pub mod planner;

pub use grouper::{ExhaustiveGrouper, SubsetGrouper, SubsetsBySum, WeightSum, WeightedItem};
pub use planner::{plan_batches, sort_batches, BatchPlanner};
