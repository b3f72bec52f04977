use std::collections::HashSet;
use std::path::Path;

use futures::future::try_join;
use tracing::{debug, info};

use crate::domain::types::{Fleet, Package};
use crate::error::{CourierError, Result};
use crate::pricing::discount::DiscountRule;
use crate::setup::init_types::{DeliveryTimeSetup, TotalCostSetup};

/// A non-blank line with its 1-based position in the source text.
type Line<'a> = (usize, &'a str);

fn content_lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

fn fields<'a>((line_no, line): Line<'a>, expected: usize, what: &str) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(CourierError::invalid_setup(
            line_no,
            format!("{what} needs {expected} fields, found {}", fields.len()),
        ));
    }
    Ok(fields)
}

fn parse_non_negative(line_no: usize, name: &str, raw: &str) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(CourierError::invalid_setup(
            line_no,
            format!("{name} should be a non-negative number, got '{raw}'"),
        )),
    }
}

fn parse_count(line_no: usize, name: &str, raw: &str) -> Result<usize> {
    raw.parse::<usize>().map_err(|_| {
        CourierError::invalid_setup(
            line_no,
            format!("{name} should be a non-negative integer, got '{raw}'"),
        )
    })
}

fn parse_header(line: Line<'_>) -> Result<(f64, usize)> {
    let f = fields(line, 2, "setup header")?;
    let base_delivery_cost = parse_non_negative(line.0, "base delivery cost", f[0])?;
    let package_count = parse_count(line.0, "number of packages", f[1])?;
    Ok((base_delivery_cost, package_count))
}

fn parse_package(line: Line<'_>) -> Result<Package> {
    let f = fields(line, 4, "package line")?;
    Ok(Package::new(
        f[0],
        parse_non_negative(line.0, "package weight", f[1])?,
        parse_non_negative(line.0, "package distance", f[2])?,
        f[3],
    ))
}

fn parse_fleet(line: Line<'_>) -> Result<Fleet> {
    let f = fields(line, 3, "vehicle line")?;
    let vehicle_count = parse_count(line.0, "number of vehicles", f[0])?;
    let max_speed = parse_non_negative(line.0, "max speed", f[1])?;
    if max_speed == 0.0 {
        return Err(CourierError::invalid_setup(line.0, "max speed must be positive"));
    }
    let max_weight = parse_non_negative(line.0, "max carriable weight", f[2])?;
    Ok(Fleet {
        vehicle_count,
        max_speed,
        max_weight,
    })
}

fn parse_packages(header: Line<'_>, expected: usize, lines: &[Line<'_>]) -> Result<Vec<Package>> {
    if lines.len() != expected {
        return Err(CourierError::invalid_setup(
            header.0,
            format!("expected {expected} packages, found {}", lines.len()),
        ));
    }
    if lines.is_empty() {
        return Err(CourierError::invalid_setup(
            header.0,
            "at least one package is required",
        ));
    }

    let mut seen = HashSet::new();
    lines
        .iter()
        .map(|&line| {
            let pkg = parse_package(line)?;
            if !seen.insert(pkg.name.clone()) {
                return Err(CourierError::invalid_setup(
                    line.0,
                    format!("duplicate package name {}", pkg.name),
                ));
            }
            Ok(pkg)
        })
        .collect()
}

/// Parse `<base> <count>` followed by `count` package lines.
pub fn parse_total_cost_setup(text: &str) -> Result<TotalCostSetup> {
    let lines = content_lines(text);
    let Some((&header, rest)) = lines.split_first() else {
        return Err(CourierError::invalid_setup(1, "missing setup header"));
    };

    let (base_delivery_cost, package_count) = parse_header(header)?;
    let packages = parse_packages(header, package_count, rest)?;
    debug!("Parsed {} packages, base cost {}", packages.len(), base_delivery_cost);

    Ok(TotalCostSetup {
        base_delivery_cost,
        packages,
    })
}

/// Like [`parse_total_cost_setup`], with a trailing
/// `<vehicles> <max speed> <max weight>` line.
pub fn parse_delivery_time_setup(text: &str) -> Result<DeliveryTimeSetup> {
    let lines = content_lines(text);
    let Some((&header, rest)) = lines.split_first() else {
        return Err(CourierError::invalid_setup(1, "missing setup header"));
    };
    let Some((&fleet_line, package_lines)) = rest.split_last() else {
        return Err(CourierError::invalid_setup(header.0, "missing vehicle line"));
    };

    let (base_delivery_cost, package_count) = parse_header(header)?;
    let packages = parse_packages(header, package_count, package_lines)?;
    let fleet = parse_fleet(fleet_line)?;
    debug!(
        "Parsed {} packages and {} vehicles ({} speed, {} capacity)",
        packages.len(),
        fleet.vehicle_count,
        fleet.max_speed,
        fleet.max_weight
    );

    Ok(DeliveryTimeSetup {
        base_delivery_cost,
        packages,
        fleet,
    })
}

pub fn parse_discount_rules(json: &str) -> Result<Vec<DiscountRule>> {
    let rules: Vec<DiscountRule> = serde_json::from_str(json)?;
    debug!("Parsed {} discount rules", rules.len());
    Ok(rules)
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CourierError::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub async fn load_discount_rules(path: &Path) -> Result<Vec<DiscountRule>> {
    parse_discount_rules(&read_file(path).await?)
}

/// Read the setup and discount files concurrently; either failure aborts.
pub async fn load_total_cost_inputs(
    setup_path: &Path,
    discount_path: &Path,
) -> Result<(TotalCostSetup, Vec<DiscountRule>)> {
    info!(
        "Loading setup {} and discounts {}",
        setup_path.display(),
        discount_path.display()
    );
    try_join(
        async { parse_total_cost_setup(&read_file(setup_path).await?) },
        load_discount_rules(discount_path),
    )
    .await
}

pub async fn load_delivery_time_inputs(
    setup_path: &Path,
    discount_path: &Path,
) -> Result<(DeliveryTimeSetup, Vec<DiscountRule>)> {
    info!(
        "Loading setup {} and discounts {}",
        setup_path.display(),
        discount_path.display()
    );
    try_join(
        async { parse_delivery_time_setup(&read_file(setup_path).await?) },
        load_discount_rules(discount_path),
    )
    .await
}
