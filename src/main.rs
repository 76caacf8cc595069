use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use env_logger::{Env, Target};
use log::info;
use quadbeam::{render_plan, render_summary, InputData, ModelPlan, Preset, ResultData, StepKind};

/// Prepare and summarise the tube-on-three-T-beams shell model.
#[derive(Debug, Parser)]
#[command(name = "quadbeam", version, about)]
struct Cli {
    /// Profile preset (CP1, CP2 or CP3).
    #[arg(long, default_value = "cp1", value_parser = parse_preset)]
    preset: Preset,

    /// JSON file with profile parameters; overrides the preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analysis step (linear or buckling).
    #[arg(long, value_parser = parse_step)]
    step: Option<StepKind>,

    /// JSON export of node results to aggregate.
    #[arg(long)]
    results: Option<PathBuf>,

    /// Write the log to this file instead of standard error.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Also print the coordinates handed to the model builder.
    #[arg(long)]
    plan: bool,
}

/// Parse a preset name for clap.
fn parse_preset(value: &str) -> Result<Preset, String> {
    value.parse().map_err(|error| format!("{error}"))
}

/// Parse a step name for clap.
fn parse_step(value: &str) -> Result<StepKind, String> {
    value.parse().map_err(|error| format!("{error}"))
}

/// Route log records to standard error or the requested file.
fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.try_init()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    // Validation and derived geometry both happen on construction.
    let mut data = match &cli.config {
        Some(path) => InputData::load(path)?,
        None => InputData::from_preset(cli.preset)?,
    };
    if let Some(step) = cli.step {
        data = data.with_step(step);
    }
    info!("prepared job {}", data.job_name());

    if cli.plan {
        print!("{}", render_plan(&ModelPlan::new(&data)));
    }

    // Results come from the external solver's post-processing export.
    let results = match &cli.results {
        Some(path) => Some(ResultData::read_json(path, data.derived())?),
        None => None,
    };
    if let Some(results) = &results {
        info!("maximum deflection is {}", results.max_displacement());
    }

    print!("{}", render_summary(&data, results.as_ref()));
    Ok(())
}
