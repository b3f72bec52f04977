use crate::domain::types::{Fleet, Package};

/// Parsed `total-cost` setup block.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalCostSetup {
    pub base_delivery_cost: f64,
    pub packages: Vec<Package>,
}

/// Parsed `delivery-time` setup block: packages plus a trailing fleet line.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTimeSetup {
    pub base_delivery_cost: f64,
    pub packages: Vec<Package>,
    pub fleet: Fleet,
}
