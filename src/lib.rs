pub mod cli;
pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod planning;
pub mod pricing;
pub mod report;
pub mod scheduling;
pub mod setup;
pub mod utils;

#[cfg(test)]
mod fixtures;

pub use delivery::DeliverySystem;
pub use error::{CourierError, Result};
