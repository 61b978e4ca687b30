use airhealth::{export, ingestion, StudyPipeline};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "airhealth")]
#[command(about = "Joins health-outcome and air-quality datasets for exploratory analysis")]
struct Args {
    /// Path to the health-outcomes CSV (lung cancer screening records)
    health_csv: PathBuf,

    /// Path to the environmental-measurements CSV (air quality records)
    air_csv: PathBuf,

    /// Directory for the merged and summary CSV outputs (default: ./out)
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let health = ingestion::read_csv_path(&args.health_csv, "health")
        .context("failed to load health dataset")?;
    let air = ingestion::read_csv_path(&args.air_csv, "air")
        .context("failed to load air quality dataset")?;

    let output = StudyPipeline::new().run(&health, &air)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let outputs = [
        ("merged.csv", &output.merged),
        ("country_stats.csv", &output.country_stats),
        ("aqi_distribution.csv", &output.aqi_distribution),
    ];
    for (file_name, table) in outputs {
        let path = args.out_dir.join(file_name);
        std::fs::write(&path, export::to_csv(table)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {} ({} rows)", path.display(), table.n_rows());
    }

    println!("{}", export::preview(&output.country_stats, 20));
    println!();
    println!("{}", export::preview(&output.aqi_distribution, 20));

    Ok(())
}
