use clap::Parser;
use reportly::{ExportConfig, ExportPipelineBuilder, PipelineError, ReportSource};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reportly")]
#[command(version)]
#[command(about = "Export an AI data analysis result as a paginated PDF report", long_about = None)]
struct Cli {
    /// Analysis payload (JSON with `analysis` and `visualizations`)
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,

    /// Directory the PDF is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Export configuration (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme preset: professional, vibrant, minimal or dark
    #[arg(short, long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExportConfig::from_file(path)?,
        None => ExportConfig::default(),
    };

    let payload = fs::read_to_string(&cli.payload).map_err(|e| {
        PipelineError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read payload from '{}': {}", cli.payload.display(), e),
        ))
    })?;
    let source = ReportSource::from_json(&payload)?;

    let mut builder = ExportPipelineBuilder::new().with_config(config);
    if let Some(theme) = &cli.theme {
        builder = builder.with_theme(theme);
    }
    let pipeline = builder.build()?;

    let path = pipeline.export_to_dir(&source, &cli.out_dir).await?;
    println!("Successfully generated {}", path.display());
    Ok(())
}
