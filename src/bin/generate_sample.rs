//! Write the fallback sample dataset to disk.
//!
//! Usage: `generate_sample [CSV_PATH] [PARQUET_PATH]`
//! (defaults: `housing.csv`, `housing.parquet`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;

use housing_explorer::config::DashboardConfig;
use housing_explorer::data::{export, synthetic};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let csv_path = args.next().unwrap_or_else(|| PathBuf::from("housing.csv"));
    let parquet_path = args.next().unwrap_or_else(|| PathBuf::from("housing.parquet"));

    let config = DashboardConfig::load();
    let dataset = synthetic::generate(config.seed, config.sample_size);
    let all: Vec<usize> = (0..dataset.len()).collect();

    export::write_csv(&csv_path, &dataset, &all)
        .with_context(|| format!("writing {}", csv_path.display()))?;
    export::write_parquet(&parquet_path, &dataset)
        .with_context(|| format!("writing {}", parquet_path.display()))?;

    let batch = export::to_record_batch(&dataset).context("building record batch")?;
    let preview = pretty_format_batches(&[batch.slice(0, batch.num_rows().min(5))])
        .context("formatting preview")?;
    println!("{preview}");

    println!(
        "Wrote {} records (seed {}) to {} and {}",
        dataset.len(),
        config.seed,
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
