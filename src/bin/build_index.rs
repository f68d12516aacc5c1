use std::path::PathBuf;

use clap::Parser;
use movie_recommender::{index::IndexBuilder, telemetry};

/// Builds the recommender artifacts from a movie CSV
#[derive(Debug, Parser)]
#[command(name = "build-index", version, about)]
struct Args {
    /// CSV with at least title, overview, popularity and vote_average columns
    #[arg(short, long, env = "MOVIES_CSV", default_value = "movies.csv")]
    input: PathBuf,

    /// Directory the three artifacts are written to
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = "artifacts")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();
    let args = Args::parse();

    tracing::info!(input = %args.input.display(), "Building index");
    let (artifacts, report) = IndexBuilder::new().build_from_path(&args.input)?;
    artifacts.save(&args.output_dir)?;

    tracing::info!(
        catalog_rows = artifacts.catalog.len(),
        matrix_shape = ?artifacts.features.matrix.shape(),
        rows_dropped = report.rows_dropped,
        output_dir = %args.output_dir.display(),
        "Model build complete"
    );

    Ok(())
}
