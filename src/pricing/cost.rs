use tracing::{debug, error};

use crate::config::constant::{DISTANCE_RATE, WEIGHT_RATE};
use crate::domain::types::{Package, PackageCost};
use crate::error::{CourierError, Result};
use crate::pricing::discount::DiscountResolver;

/// Prices packages from a base delivery cost and a discount table.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    base_delivery_cost: f64,
    resolver: DiscountResolver,
}

impl CostCalculator {
    pub fn new(base_delivery_cost: f64, resolver: DiscountResolver) -> Self {
        Self {
            base_delivery_cost,
            resolver,
        }
    }

    pub fn base_delivery_cost(&self) -> f64 {
        self.base_delivery_cost
    }

    pub fn resolver(&self) -> &DiscountResolver {
        &self.resolver
    }

    pub fn delivery_cost(&self, distance: f64, weight: f64) -> f64 {
        self.base_delivery_cost + distance * DISTANCE_RATE + weight * WEIGHT_RATE
    }

    pub fn package_cost(&self, package: &Package) -> Result<PackageCost> {
        let delivery_cost = self.delivery_cost(package.distance, package.weight);
        let discount = self
            .resolver
            .discount_value(
                &package.discount_code,
                package.distance,
                package.weight,
                delivery_cost,
            )
            .inspect_err(|err| {
                if let CourierError::UnknownDiscountCode { code } = err {
                    error!("Discount code {} not found for package {}", code, package.name);
                }
            })?;

        // `discounted` floors the raw difference, not the floored parts.
        let cost = PackageCost {
            original: delivery_cost.floor() as i64,
            discounted: (delivery_cost - discount).floor() as i64,
            discount: discount.floor() as i64,
        };
        debug!(
            "Package {}: cost {} discount {} total {}",
            package.name, cost.original, cost.discount, cost.discounted
        );
        Ok(cost)
    }

    /// Sum of every package's discounted cost.
    pub fn total_cost(&self, packages: &[Package]) -> Result<i64> {
        packages.iter().try_fold(0, |total, package| {
            Ok(total + self.package_cost(package)?.discounted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::data_generator::{sample_packages, sample_rules};
    use crate::pricing::discount::{Bounds, Discount, DiscountRule};

    fn calculator(base: f64) -> CostCalculator {
        CostCalculator::new(base, DiscountResolver::new(sample_rules()))
    }

    #[test]
    fn applies_rates_to_distance_and_weight() {
        assert_eq!(calculator(100.0).delivery_cost(30.0, 5.0), 300.0);
    }

    #[test]
    fn ten_percent_discount_on_matching_package() {
        let rule = DiscountRule {
            code: "TEN".into(),
            distance: Bounds { min: 0.0, max: 100.0 },
            weight: Bounds { min: 0.0, max: 100.0 },
            discount: Discount::percentage(10.0),
        };
        let calculator = CostCalculator::new(100.0, DiscountResolver::new(vec![rule]));

        let cost = calculator
            .package_cost(&Package::new("PKG1", 5.0, 30.0, "TEN"))
            .unwrap();
        assert_eq!(
            cost,
            PackageCost {
                original: 300,
                discounted: 270,
                discount: 30,
            }
        );
    }

    #[test]
    fn discounted_floors_the_raw_difference() {
        let rule = DiscountRule {
            code: "FIX".into(),
            distance: Bounds { min: 0.0, max: 100.0 },
            weight: Bounds { min: 0.0, max: 100.0 },
            discount: Discount::fixed(0.75),
        };
        let calculator = CostCalculator::new(100.5, DiscountResolver::new(vec![rule]));
        let cost = calculator
            .package_cost(&Package::new("P", 0.0, 0.0, "FIX"))
            .unwrap();
        // floor(100.5) - floor(0.75) would give 100
        assert_eq!(cost.original, 100);
        assert_eq!(cost.discount, 0);
        assert_eq!(cost.discounted, 99);
    }

    #[test]
    fn sample_packages_match_known_costs() {
        let calculator = calculator(100.0);
        let costs: Vec<PackageCost> = sample_packages()
            .iter()
            .map(|pkg| calculator.package_cost(pkg).unwrap())
            .collect();

        assert_eq!(costs[0].discount, 0);
        assert_eq!(costs[0].discounted, 750);
        assert_eq!(costs[3].discount, 105);
        assert_eq!(costs[3].discounted, 1395);
    }

    #[test]
    fn total_is_sum_of_discounted_costs() {
        let calculator = calculator(100.0);
        let packages = sample_packages();
        let expected: i64 = packages
            .iter()
            .map(|pkg| calculator.package_cost(pkg).unwrap().discounted)
            .sum();

        assert_eq!(calculator.total_cost(&packages).unwrap(), expected);
    }

    #[test]
    fn unknown_code_fails_the_package() {
        let err = calculator(100.0)
            .package_cost(&Package::new("PKG9", 10.0, 10.0, "NOPE"))
            .unwrap_err();
        assert!(matches!(err, CourierError::UnknownDiscountCode { .. }));
    }
}
