use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use physio_trace::catalog;
use physio_trace::clinical::{metabolic_crowding, status_at};
use physio_trace::config::Scenario;
use physio_trace::output::{self, RunSummary};
use physio_trace::simulation::{compare_activity_levels, simulate, simulate_cohort, CohortConfig};

#[derive(Parser)]
#[command(name = "physio_trace")]
#[command(about = "Plasma concentration and organ load simulation")]
struct Cli {
    /// Scenario file path
    #[arg(short, long, required_unless_present_any = ["list_compounds", "search"])]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Time (hours) to report the clinical status at
    #[arg(short, long)]
    time: Option<f64>,

    /// Also simulate sedentary, normal and hyper-metabolic variants
    #[arg(long)]
    compare_activity: bool,

    /// Number of subjects for a cohort run
    #[arg(long)]
    cohort: Option<usize>,

    /// Random seed for reproducible cohorts
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the compound library and exit
    #[arg(long)]
    list_compounds: bool,

    /// Search the compound library by name or category and exit
    #[arg(long)]
    search: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if cli.list_compounds || cli.search.is_some() {
        let query = cli.search.as_deref().unwrap_or("");
        for compound in catalog::search(query) {
            println!(
                "{:<16} {:<16} {:<15} t1/2={}h tmax={}h threshold={} mg/L ({})",
                compound.id,
                compound.name,
                compound.category,
                compound.half_life_hours,
                compound.time_to_peak_hours,
                compound.toxicity_threshold_mg_l,
                compound.metabolism
            );
        }
        return Ok(());
    }

    let config_path = cli.config.context("--config is required")?;
    let scenario = Scenario::from_file(&config_path)
        .with_context(|| format!("failed to load scenario {:?}", config_path))?;
    info!("Loaded scenario from {:?}", config_path);

    let compounds = scenario.resolve_compounds()?;
    let schedule = scenario.dose_schedule(&compounds);
    let grid = scenario.time_grid()?;
    let subject = &scenario.subject;

    info!(
        "Simulating {} doses of {} compounds over {} time points",
        schedule.len(),
        compounds.len(),
        grid.len()
    );
    let results = simulate(grid.points(), schedule.doses(), &compounds, subject);

    let selected = scenario.selected(&compounds);
    let crowding = metabolic_crowding(&compounds);
    if let Some(warning) = &crowding {
        warn!("{}", warning);
    }

    let mut summary = RunSummary::new(subject, &compounds, selected, &results).with_crowding(crowding);
    if let (Some(time), Some(compound)) = (cli.time.or(scenario.status_time), selected) {
        let status = status_at(&results, time, compound.toxicity_threshold_mg_l);
        if let Some(status) = &status {
            info!("Status at {}h: {} ({:?})", time, status.phase, status.severity);
        }
        summary = summary.with_status(time, status);
    }

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory {:?}", cli.output))?;
    output::save_results(&results, &summary, &cli.output)?;

    if cli.compare_activity {
        let rows = compare_activity_levels(grid.points(), schedule.doses(), &compounds, subject);
        output::save_activity_comparison(&rows, cli.output.join("activity_comparison.csv"))?;
    }

    let cohort_config = match (cli.cohort, &scenario.cohort) {
        (Some(size), Some(config)) => Some(CohortConfig { size, ..config.clone() }),
        (Some(size), None) => Some(CohortConfig { size, ..CohortConfig::default() }),
        (None, config) => config.clone(),
    };
    if let Some(config) = cohort_config {
        let members = simulate_cohort(&config, subject, grid.points(), schedule.doses(), &compounds, cli.seed)?;
        output::save_cohort(&members, &cli.output)?;
    }

    info!("Results saved to {:?}", cli.output);
    Ok(())
}
