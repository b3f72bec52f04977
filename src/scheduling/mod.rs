pub mod fleet;
pub mod vehicle;

pub use fleet::{assign_batches, init_vehicles, Schedule};
pub use vehicle::Vehicle;
