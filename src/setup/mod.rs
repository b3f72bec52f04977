pub mod init;
pub mod init_types;

pub use init::{
    load_delivery_time_inputs, load_discount_rules, load_total_cost_inputs,
    parse_delivery_time_setup, parse_discount_rules, parse_total_cost_setup,
};
pub use init_types::{DeliveryTimeSetup, TotalCostSetup};
