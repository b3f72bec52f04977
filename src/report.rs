use std::error::Error;
use std::fmt;
use std::path::Path;

use colored::*;
use csv::Writer;
use tracing::info;

use crate::delivery::DeliverySystem;
use crate::domain::types::Package;
use crate::error::Result;
use crate::pricing::cost::CostCalculator;

/// One output row per package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRow {
    pub name: String,
    pub discount: i64,
    pub cost: i64,
    pub delivery_time: Option<f64>,
}

impl fmt::Display for PackageRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.discount, self.cost)?;
        if let Some(time) = self.delivery_time {
            write!(f, " {time:.2}")?;
        }
        Ok(())
    }
}

pub fn total_cost_rows(
    calculator: &CostCalculator,
    packages: &[Package],
) -> Result<Vec<PackageRow>> {
    packages
        .iter()
        .map(|pkg| {
            let cost = calculator.package_cost(pkg)?;
            Ok(PackageRow {
                name: pkg.name.clone(),
                discount: cost.discount,
                cost: cost.discounted,
                delivery_time: None,
            })
        })
        .collect()
}

/// Rows in input order. Packages no delivery carries are priced but untimed.
pub fn delivery_time_rows(system: &DeliverySystem) -> Result<Vec<PackageRow>> {
    system
        .packages()
        .iter()
        .map(|pkg| {
            let row = match system.assignment(&pkg.name)? {
                Some(assigned) => PackageRow {
                    name: pkg.name.clone(),
                    discount: assigned.cost.discount,
                    cost: assigned.cost.discounted,
                    delivery_time: Some(assigned.delivery_time),
                },
                None => {
                    let cost = system.calculator().package_cost(pkg)?;
                    PackageRow {
                        name: pkg.name.clone(),
                        discount: cost.discount,
                        cost: cost.discounted,
                        delivery_time: None,
                    }
                }
            };
            Ok(row)
        })
        .collect()
}

pub fn print_total_cost(rows: &[PackageRow], total: i64) {
    for row in rows {
        println!("{row}");
    }
    println!("{}", format!("Total Cost: {total}").green());
}

pub fn print_delivery_time(rows: &[PackageRow], system: &DeliverySystem) {
    for row in rows {
        if row.delivery_time.is_some() {
            println!("{row}");
        } else {
            println!("{}", format!("{row} (undeliverable)").red());
        }
    }

    println!();
    println!("{}", "Deliveries:".bold());
    for delivery in system.sorted_deliveries() {
        println!(
            "  {} -> vehicle {} : weight {}, max distance {}, round trip {:.2}",
            delivery.id,
            delivery.vehicle_id,
            delivery.total_weight,
            delivery.max_distance,
            delivery.round_trip_time
        );
    }

    println!("{}", "Vehicles:".bold());
    if let Ok(schedule) = system.schedule() {
        for vehicle in schedule.vehicles() {
            println!(
                "  vehicle {} : {} jobs, round trip total {}",
                vehicle.id,
                vehicle.jobs.len(),
                format!("{:.2}", vehicle.total_round_trip_time()).green()
            );
        }
    }
}

pub fn save_to_csv(
    rows: &[PackageRow],
    filename: &Path,
) -> std::result::Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["package", "discount", "cost", "delivery_time"])?;

    for row in rows {
        wtr.write_record([
            row.name.clone(),
            row.discount.to_string(),
            row.cost.to_string(),
            row.delivery_time
                .map(|time| format!("{time:.2}"))
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    info!("Wrote {} rows to {}", rows.len(), filename.display());
    Ok(())
}
