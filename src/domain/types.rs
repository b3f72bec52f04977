use std::cmp::Ordering;

use itertools::Itertools;

use crate::config::constant::BATCH_ID_SEPARATOR;

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub weight: f64,
    pub distance: f64,
    pub discount_code: String,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        distance: f64,
        discount_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            distance,
            discount_code: discount_code.into(),
        }
    }
}

/// Homogeneous fleet description: every vehicle shares speed and capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fleet {
    pub vehicle_count: usize,
    pub max_speed: f64,
    pub max_weight: f64,
}

impl Fleet {
    pub fn is_empty(&self) -> bool {
        self.vehicle_count == 0
    }
}

/// A weight-bounded group of packages shipped together by one vehicle trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub id: String,
    pub packages: Vec<Package>,
    pub total_weight: f64,
    pub max_distance: f64,
}

impl Batch {
    /// Build a batch from its members. Member order is kept and drives the id.
    pub fn new(packages: Vec<Package>) -> Self {
        let id = packages
            .iter()
            .map(|pkg| pkg.name.as_str())
            .join(BATCH_ID_SEPARATOR);
        let total_weight = packages.iter().fold(0.0, |acc, pkg| acc + pkg.weight);
        let max_distance = packages
            .iter()
            .map(|pkg| pkg.distance)
            .fold(0.0, f64::max);

        Self {
            id,
            packages,
            total_weight,
            max_distance,
        }
    }

    // Heavier first, then closer first.
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        other
            .total_weight
            .total_cmp(&self.total_weight)
            .then_with(|| self.max_distance.total_cmp(&other.max_distance))
    }

    pub fn contains(&self, package_name: &str) -> bool {
        self.packages.iter().any(|pkg| pkg.name == package_name)
    }
}

/// Floored currency amounts for one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackageCost {
    pub original: i64,
    pub discounted: i64,
    pub discount: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignedPackage {
    pub package: Package,
    pub delivery_id: String,
    pub vehicle_id: usize,
    pub delivery_time: f64,
    pub cost: PackageCost,
}

/// A batch after it has been handed to a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: String,
    pub vehicle_id: usize,
    pub total_weight: f64,
    pub max_distance: f64,
    pub round_trip_time: f64,
    pub packages: Vec<AssignedPackage>,
}

impl Delivery {
    pub fn package(&self, package_name: &str) -> Option<&AssignedPackage> {
        self.packages
            .iter()
            .find(|pkg| pkg.package.name == package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_derives_id_weight_and_distance_from_members() {
        let batch = Batch::new(vec![
            Package::new("PKG2", 75.0, 125.0, "OFR008"),
            Package::new("PKG4", 110.0, 60.0, "OFR002"),
        ]);

        assert_eq!(batch.id, "PKG2&PKG4");
        assert_eq!(batch.total_weight, 185.0);
        assert_eq!(batch.max_distance, 125.0);
        assert!(batch.contains("PKG4"));
        assert!(!batch.contains("PKG1"));
    }

    #[test]
    fn priority_prefers_heavier_then_closer() {
        let heavy = Batch::new(vec![Package::new("A", 200.0, 100.0, "NA")]);
        let light = Batch::new(vec![Package::new("B", 50.0, 10.0, "NA")]);
        let heavy_close = Batch::new(vec![Package::new("C", 200.0, 20.0, "NA")]);

        assert_eq!(heavy.cmp_priority(&light), Ordering::Less);
        assert_eq!(light.cmp_priority(&heavy), Ordering::Greater);
        assert_eq!(heavy_close.cmp_priority(&heavy), Ordering::Less);
        assert_eq!(heavy.cmp_priority(&heavy.clone()), Ordering::Equal);
    }

    #[test]
    fn empty_fleet_is_detected() {
        let fleet = Fleet {
            vehicle_count: 0,
            max_speed: 70.0,
            max_weight: 200.0,
        };
        assert!(fleet.is_empty());
    }
}
