//! A thin demonstration CLI: reads a JSON scenario describing containers,
//! items and a sequence of operations, runs them through one [`Engine`],
//! and writes a JSON report of what happened.
//!
//! This is not a host. It has no persistence, no HTTP surface, and no
//! authentication — it exists to exercise the library end to end.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use stow_core::{Container, Engine, EngineConfig, Item, SimulatedClock};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the input scenario JSON file.
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    input: PathBuf,

    /// Path to write the resulting report JSON to. Defaults to stdout.
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    output: Option<PathBuf>,

    /// Log verbosity.
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Debug, Deserialize)]
struct ContainerSpec {
    id: String,
    zone: String,
    width: i64,
    depth: i64,
    height: i64,
}

#[derive(Debug, Deserialize)]
struct ItemSpec {
    id: String,
    name: String,
    width: i64,
    depth: i64,
    height: i64,
    mass: f64,
    priority: u8,
    expiry_date: Option<jiff::civil::Date>,
    usage_limit: u32,
    preferred_zone: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
enum Operation {
    Place { item_id: String },
    Retrieve { item_id: String },
    SimulateDay { #[serde(default)] used_item_ids: Vec<String> },
    IdentifyWaste,
    WasteReturnPlan { undocking_container_id: String, #[serde(default = "default_max_weight")] max_weight: f64 },
    CompleteUndocking { undocking_container_id: String },
}

fn default_max_weight() -> f64 {
    f64::INFINITY
}

#[derive(Debug, Deserialize)]
struct Scenario {
    start_date: jiff::civil::Date,
    #[serde(default)]
    config: Option<ScenarioConfig>,
    containers: Vec<ContainerSpec>,
    items: Vec<ItemSpec>,
    #[serde(default)]
    operations: Vec<Operation>,
}

#[derive(Debug, Deserialize)]
struct ScenarioConfig {
    preferred_zone_bonus: f64,
    depth_penalty_weight: f64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
enum StepReport {
    Place { item_id: String, outcome: serde_json::Value },
    Retrieve { item_id: String, steps: serde_json::Value },
    SimulateDay { date: jiff::civil::Date, changes: serde_json::Value },
    IdentifyWaste { waste: serde_json::Value },
    WasteReturnPlan { plan: serde_json::Value },
    CompleteUndocking { items_removed: usize },
    Error { message: String },
}

fn run_scenario(scenario: Scenario) -> Result<Vec<StepReport>> {
    let config = match scenario.config {
        Some(c) => EngineConfig {
            preferred_zone_bonus: c.preferred_zone_bonus,
            depth_penalty_weight: c.depth_penalty_weight,
        },
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(SimulatedClock::new(scenario.start_date), config);

    for spec in scenario.containers {
        let container = Container::new(spec.id, spec.zone, spec.width, spec.depth, spec.height)
            .context("invalid container in scenario")?;
        engine.add_container(container);
    }
    for spec in scenario.items {
        let item = Item::new(
            spec.id,
            spec.name,
            spec.width,
            spec.depth,
            spec.height,
            spec.mass,
            spec.priority,
            spec.expiry_date,
            spec.usage_limit,
            spec.preferred_zone,
        )
        .context("invalid item in scenario")?;
        engine.add_item(item);
    }

    let mut reports = Vec::with_capacity(scenario.operations.len());
    for op in scenario.operations {
        let report = match op {
            Operation::Place { item_id } => match engine.place_item(&item_id) {
                Ok(outcome) => StepReport::Place {
                    item_id,
                    outcome: serde_json::to_value(outcome)?,
                },
                Err(e) => StepReport::Error { message: e.to_string() },
            },
            Operation::Retrieve { item_id } => match engine.retrieval_plan(&item_id) {
                Ok(steps) => {
                    engine.retrieve_item(&item_id)?;
                    StepReport::Retrieve {
                        item_id,
                        steps: serde_json::to_value(steps)?,
                    }
                }
                Err(e) => StepReport::Error { message: e.to_string() },
            },
            Operation::SimulateDay { used_item_ids } => {
                let (date, changes) = engine.simulate_day(&used_item_ids);
                StepReport::SimulateDay {
                    date,
                    changes: serde_json::to_value(changes)?,
                }
            }
            Operation::IdentifyWaste => StepReport::IdentifyWaste {
                waste: serde_json::to_value(engine.identify_waste())?,
            },
            Operation::WasteReturnPlan { undocking_container_id, max_weight } => {
                match engine.waste_return_plan(&undocking_container_id, max_weight) {
                    Ok(plan) => StepReport::WasteReturnPlan { plan: serde_json::to_value(plan)? },
                    Err(e) => StepReport::Error { message: e.to_string() },
                }
            }
            Operation::CompleteUndocking { undocking_container_id } => {
                match engine.complete_undocking(&undocking_container_id) {
                    Ok(items_removed) => StepReport::CompleteUndocking { items_removed },
                    Err(e) => StepReport::Error { message: e.to_string() },
                }
            }
        };
        reports.push(report);
    }

    Ok(reports)
}

fn init_logger(level: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] [{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("failed to install logger")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level)?;

    let file = File::open(&args.input).with_context(|| format!("could not open {}", args.input.display()))?;
    let scenario: Scenario =
        serde_json::from_reader(BufReader::new(file)).context("scenario is not valid JSON for this schema")?;

    let reports = run_scenario(scenario)?;

    match args.output {
        Some(path) => {
            let out = File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
            serde_json::to_writer_pretty(out, &reports)?;
            log::info!("wrote report to {}", path.display());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
