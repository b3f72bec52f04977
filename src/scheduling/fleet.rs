use tracing::{debug, info};

use crate::domain::types::{Batch, Delivery, Fleet};
use crate::error::{CourierError, Result};
use crate::pricing::cost::CostCalculator;
use crate::scheduling::vehicle::Vehicle;

/// Vehicles with their jobs, plus every delivery in assignment order.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    vehicles: Vec<Vehicle>,
    deliveries: Vec<Delivery>,
}

impl Schedule {
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn vehicle(&self, id: usize) -> Result<&Vehicle> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.id == id)
            .ok_or(CourierError::VehicleNotFound { id })
    }

    pub fn delivery(&self, id: &str) -> Option<&Delivery> {
        self.deliveries.iter().find(|delivery| delivery.id == id)
    }

    pub fn vehicle_round_trip_time(&self, id: usize) -> Result<f64> {
        Ok(self.vehicle(id)?.total_round_trip_time())
    }

    pub fn package_delivery_time(&self, package_name: &str) -> Result<f64> {
        self.vehicles
            .iter()
            .find_map(|vehicle| vehicle.package_delivery_time(package_name).ok())
            .ok_or_else(|| CourierError::PackageNotFound {
                name: package_name.to_string(),
            })
    }
}

pub fn init_vehicles(fleet: &Fleet) -> Vec<Vehicle> {
    (0..fleet.vehicle_count)
        .map(|id| Vehicle::new(id, fleet.max_speed))
        .collect()
}

/// Vehicle with the smallest cumulative round-trip time; ties go to the lowest id.
fn least_loaded(vehicles: &mut [Vehicle]) -> Option<&mut Vehicle> {
    vehicles.iter_mut().reduce(|best, vehicle| {
        if vehicle.cumulative_round_trip_time < best.cumulative_round_trip_time {
            vehicle
        } else {
            best
        }
    })
}

/// Greedily hand each batch, in planner order, to the least-loaded vehicle.
///
/// Greedy by arrival order; the result is not a globally balanced schedule.
pub fn assign_batches(
    batches: &[Batch],
    fleet: &Fleet,
    calculator: &CostCalculator,
) -> Result<Schedule> {
    if fleet.is_empty() {
        return Err(CourierError::EmptyFleet);
    }
    if batches.is_empty() {
        return Err(CourierError::NotPlanned);
    }

    let mut vehicles = init_vehicles(fleet);
    let mut deliveries = Vec::with_capacity(batches.len());

    for batch in batches {
        let vehicle = least_loaded(&mut vehicles).ok_or(CourierError::EmptyFleet)?;
        let delivery = vehicle.add_job(batch, calculator)?;
        debug!(
            "Assigned {} to vehicle {} (round trip {:.2}, cumulative {:.2})",
            delivery.id, vehicle.id, delivery.round_trip_time, vehicle.cumulative_round_trip_time
        );
        deliveries.push(delivery);
    }

    info!(
        "Assigned {} deliveries across {} vehicles",
        deliveries.len(),
        vehicles.len()
    );

    Ok(Schedule {
        vehicles,
        deliveries,
    })
}
