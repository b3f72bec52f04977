use std::error::Error;
use std::path::PathBuf;

use clap::{arg, value_parser, ArgMatches, Command};
use tracing::{debug, info, info_span, Instrument};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::env::{
    self, DEFAULT_LOG_FILTER, DISCOUNT_FILE_VAR, LOG_FILTER_VAR, SETUP_FILE_VAR,
};
use crate::delivery::DeliverySystem;
use crate::pricing::cost::CostCalculator;
use crate::pricing::discount::DiscountResolver;
use crate::report;
use crate::setup::{load_delivery_time_inputs, load_total_cost_inputs};

/// Filter from `directives`, or `DEFAULT_LOG_FILTER` when absent or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize environment and tracing. `.env` goes first so it can set `RUST_LOG`.
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    let dotenv_path = env::load();
    let directives = std::env::var(LOG_FILTER_VAR).ok();

    tracing_subscriber::registry()
        .with(log_filter(directives.as_deref()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    if let Some(path) = dotenv_path {
        debug!("Loaded environment from {}", path.display());
    }
    Ok(())
}

fn input_args(command: Command) -> Command {
    command
        .arg(arg!(-i --interactive "Interactive mode"))
        .arg(
            arg!(-s --setup <FILE> "Setup file (required unless interactive)")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-d --discount <FILE> "Discount code file (required unless interactive)")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-o --output <FILE> "Also write the per-package report as CSV")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
}

pub fn cli() -> Command {
    Command::new("courier")
        .about("Delivery cost and delivery time estimation")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(input_args(
            Command::new("total-cost").about("Calculate the discounted cost of every package"),
        ))
        .subcommand(input_args(
            Command::new("delivery-time")
                .about("Plan deliveries and estimate delivery time of every package"),
        ))
}

/// File paths for one run, resolved from flags then environment.
#[derive(Debug, Clone, PartialEq)]
pub struct InputPaths {
    pub setup: PathBuf,
    pub discount: PathBuf,
    pub output: Option<PathBuf>,
}

impl InputPaths {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        if matches.get_flag("interactive") {
            return Err("interactive mode is not supported yet".into());
        }

        let resolve = |flag: &str, var: &str| {
            matches
                .get_one::<PathBuf>(flag)
                .cloned()
                .or_else(|| env::path_from_env(var))
                .ok_or_else(|| format!("missing --{flag} (or {var})"))
        };

        Ok(Self {
            setup: resolve("setup", SETUP_FILE_VAR)?,
            discount: resolve("discount", DISCOUNT_FILE_VAR)?,
            output: matches.get_one::<PathBuf>("output").cloned(),
        })
    }
}

pub async fn total_cost(paths: &InputPaths) -> Result<(), Box<dyn Error>> {
    let (setup, rules) = load_total_cost_inputs(&paths.setup, &paths.discount).await?;
    let calculator = CostCalculator::new(setup.base_delivery_cost, DiscountResolver::new(rules));

    let rows = report::total_cost_rows(&calculator, &setup.packages)?;
    let total = calculator.total_cost(&setup.packages)?;
    report::print_total_cost(&rows, total);

    if let Some(output) = &paths.output {
        report::save_to_csv(&rows, output)?;
    }
    Ok(())
}

pub async fn delivery_time(paths: &InputPaths) -> Result<(), Box<dyn Error>> {
    let (setup, rules) = load_delivery_time_inputs(&paths.setup, &paths.discount).await?;
    let calculator = CostCalculator::new(setup.base_delivery_cost, DiscountResolver::new(rules));

    let mut system = DeliverySystem::new(setup.fleet, setup.packages, calculator);
    system.plan_delivery()?;
    system.assign_deliveries()?;

    let rows = report::delivery_time_rows(&system)?;
    report::print_delivery_time(&rows, &system);

    if let Some(output) = &paths.output {
        report::save_to_csv(&rows, output)?;
    }
    Ok(())
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("total-cost", sub_m)) => {
            info!("Running total-cost");
            total_cost(&InputPaths::from_matches(sub_m)?)
                .instrument(info_span!("total_cost"))
                .await
        }
        Some(("delivery-time", sub_m)) => {
            info!("Running delivery-time");
            delivery_time(&InputPaths::from_matches(sub_m)?)
                .instrument(info_span!("delivery_time"))
                .await
        }
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}
