use anyhow::Context;
use clap::Parser;
use labelsheet_core::{SheetConfig, generate_row_images};
use std::path::PathBuf;

/// Render rotated barcode label rows from a (number, code) CSV table.
#[derive(Parser, Debug)]
#[command(name = "labelsheet", version)]
struct Args {
    /// Headerless CSV with two columns: number, barcode text
    #[arg(default_value = "sample_codes.csv")]
    csv: PathBuf,

    /// Directory that receives row_<N>.png files (created if missing)
    #[arg(default_value = "row_images")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labelsheet=info,labelsheet_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let report = generate_row_images(&args.csv, &args.output_dir, &SheetConfig::default())
        .with_context(|| format!("generating labels from {}", args.csv.display()))?;

    tracing::info!(
        labels = report.total_labels,
        rows = report.rows,
        dir = %args.output_dir.display(),
        "done"
    );
    Ok(())
}
