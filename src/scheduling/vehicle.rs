use crate::domain::types::{AssignedPackage, Batch, Delivery, Package};
use crate::error::{CourierError, Result};
use crate::pricing::cost::CostCalculator;
use crate::utils::travel_time;

/// One fleet member. Carrying capacity is fleet-wide and enforced when
/// batches are planned (`Fleet::max_weight`), so it is not repeated here.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: usize,
    pub max_speed: f64,
    pub jobs: Vec<Delivery>,
    pub cumulative_round_trip_time: f64,
}

impl Vehicle {
    pub fn new(id: usize, max_speed: f64) -> Self {
        Self {
            id,
            max_speed,
            jobs: vec![],
            cumulative_round_trip_time: 0.0,
        }
    }

    /// Out and back to the batch's farthest package.
    pub fn round_trip_time(&self, batch: &Batch) -> f64 {
        2.0 * travel_time(batch.max_distance, self.max_speed)
    }

    pub fn delivery_time(&self, package: &Package) -> f64 {
        travel_time(package.distance, self.max_speed)
    }

    /// Take on `batch`, pricing and timing every member package.
    pub fn add_job(&mut self, batch: &Batch, calculator: &CostCalculator) -> Result<Delivery> {
        let packages = batch
            .packages
            .iter()
            .map(|pkg| {
                Ok(AssignedPackage {
                    package: pkg.clone(),
                    delivery_id: batch.id.clone(),
                    vehicle_id: self.id,
                    delivery_time: self.delivery_time(pkg),
                    cost: calculator.package_cost(pkg)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let delivery = Delivery {
            id: batch.id.clone(),
            vehicle_id: self.id,
            total_weight: batch.total_weight,
            max_distance: batch.max_distance,
            round_trip_time: self.round_trip_time(batch),
            packages,
        };

        self.cumulative_round_trip_time += delivery.round_trip_time;
        self.jobs.push(delivery.clone());
        Ok(delivery)
    }

    pub fn total_round_trip_time(&self) -> f64 {
        self.cumulative_round_trip_time
    }

    pub fn package_delivery_time(&self, package_name: &str) -> Result<f64> {
        self.jobs
            .iter()
            .find_map(|job| job.package(package_name))
            .map(|pkg| pkg.delivery_time)
            .ok_or_else(|| CourierError::PackageNotFound {
                name: package_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::data_generator::sample_rules;
    use crate::pricing::discount::DiscountResolver;

    fn calculator() -> CostCalculator {
        CostCalculator::new(100.0, DiscountResolver::new(sample_rules()))
    }

    #[test]
    fn round_trip_doubles_the_truncated_one_way_time() {
        let vehicle = Vehicle::new(0, 70.0);
        let batch = Batch::new(vec![
            Package::new("PKG2", 75.0, 125.0, "OFR003"),
            Package::new("PKG4", 110.0, 60.0, "OFR002"),
        ]);
        assert_eq!(vehicle.round_trip_time(&batch), 3.56);
    }

    #[test]
    fn add_job_stamps_packages_and_accumulates_time() {
        let mut vehicle = Vehicle::new(1, 70.0);
        let batch = Batch::new(vec![
            Package::new("PKG2", 75.0, 125.0, "OFR003"),
            Package::new("PKG4", 110.0, 60.0, "OFR002"),
        ]);

        let delivery = vehicle.add_job(&batch, &calculator()).unwrap();

        assert_eq!(delivery.vehicle_id, 1);
        assert_eq!(delivery.packages[0].delivery_id, "PKG2&PKG4");
        assert_eq!(delivery.packages[0].delivery_time, 1.78);
        assert_eq!(delivery.packages[1].delivery_time, 0.85);
        assert_eq!(delivery.packages[1].cost.discounted, 1395);
        assert_eq!(vehicle.jobs.len(), 1);
        assert_eq!(vehicle.total_round_trip_time(), 3.56);
        assert_eq!(vehicle.package_delivery_time("PKG4").unwrap(), 0.85);
    }

    #[test]
    fn missing_package_lookup_fails() {
        let vehicle = Vehicle::new(0, 70.0);
        let err = vehicle.package_delivery_time("PKG1").unwrap_err();
        assert!(matches!(err, CourierError::PackageNotFound { name } if name == "PKG1"));
    }
}
