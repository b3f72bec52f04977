use std::collections::HashMap;

use tracing::{info, span, Level};

use crate::domain::types::{AssignedPackage, Batch, Delivery, Fleet, Package};
use crate::error::{CourierError, Result};
use crate::planning::planner::BatchPlanner;
use crate::pricing::cost::CostCalculator;
use crate::scheduling::fleet::{assign_batches, Schedule};
use crate::scheduling::vehicle::Vehicle;

/// Owns one run's packages and fleet and sequences planning, scheduling and
/// costing over them.
#[derive(Debug)]
pub struct DeliverySystem {
    fleet: Fleet,
    packages: Vec<Package>,
    calculator: CostCalculator,
    planner: BatchPlanner,
    batches: Vec<Batch>,
    schedule: Option<Schedule>,
    // package name -> annotation from the last delivery carrying it
    assignments: HashMap<String, AssignedPackage>,
}

impl DeliverySystem {
    pub fn new(fleet: Fleet, packages: Vec<Package>, calculator: CostCalculator) -> Self {
        Self {
            fleet,
            packages,
            calculator,
            planner: BatchPlanner::new(),
            batches: vec![],
            schedule: None,
            assignments: HashMap::new(),
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn calculator(&self) -> &CostCalculator {
        &self.calculator
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn plan_delivery(&mut self) -> Result<&[Batch]> {
        let span = span!(Level::INFO, "plan_delivery");
        let _guard = span.enter();

        self.batches = self.planner.plan_batches(&self.packages, &self.fleet)?;
        self.schedule = None;
        self.assignments.clear();
        Ok(&self.batches)
    }

    pub fn assign_deliveries(&mut self) -> Result<&Schedule> {
        let span = span!(Level::INFO, "assign_deliveries");
        let _guard = span.enter();

        let schedule = assign_batches(&self.batches, &self.fleet, &self.calculator)?;

        let mut assignments = HashMap::with_capacity(self.packages.len());
        for pkg in schedule.deliveries().iter().flat_map(|d| &d.packages) {
            assignments.insert(pkg.package.name.clone(), pkg.clone());
        }
        info!(
            "{} of {} packages assigned",
            assignments.len(),
            self.packages.len()
        );

        self.assignments = assignments;
        Ok(&*self.schedule.insert(schedule))
    }

    /// Plan then assign in one step.
    pub fn run(&mut self) -> Result<&Schedule> {
        self.plan_delivery()?;
        self.assign_deliveries()
    }

    pub fn schedule(&self) -> Result<&Schedule> {
        self.schedule.as_ref().ok_or(CourierError::NotPlanned)
    }

    pub fn sorted_deliveries(&self) -> &[Delivery] {
        self.schedule
            .as_ref()
            .map_or(&[][..], |schedule| schedule.deliveries())
    }

    pub fn delivery(&self, id: &str) -> Option<&Delivery> {
        self.schedule.as_ref()?.delivery(id)
    }

    pub fn vehicle(&self, id: usize) -> Result<&Vehicle> {
        self.schedule()?.vehicle(id)
    }

    pub fn package(&self, name: &str) -> Result<&Package> {
        self.packages
            .iter()
            .find(|pkg| pkg.name == name)
            .ok_or_else(|| CourierError::PackageNotFound {
                name: name.to_string(),
            })
    }

    /// `None` when the package exists but no delivery carries it.
    pub fn assignment(&self, name: &str) -> Result<Option<&AssignedPackage>> {
        self.package(name)?;
        Ok(self.assignments.get(name))
    }

    pub fn package_delivery_time(&self, name: &str) -> Result<f64> {
        self.schedule()?.package_delivery_time(name)
    }

    pub fn vehicle_round_trip_time(&self, id: usize) -> Result<f64> {
        self.schedule()?.vehicle_round_trip_time(id)
    }

    /// Sum of the discounted cost over all packages.
    pub fn total_cost(&self) -> Result<i64> {
        self.calculator.total_cost(&self.packages)
    }
}
