pub mod cost;
pub mod discount;

pub use cost::CostCalculator;
pub use discount::{Bounds, Discount, DiscountKind, DiscountResolver, DiscountRule};
