use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use misfold_analyzer::{Analysis, AnalysisEngine, AnalysisRequest, EngineConfig, RemoteAnalyzer};

/// Analyze a protein for misfolding risk and design CRISPR guides.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Protein name, e.g. "Tau protein (MAPT)"
    #[arg(short, long)]
    protein: String,

    /// Optional amino acid sequence
    #[arg(short, long)]
    sequence: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// JSON engine config; defaults to $MISFOLD_CONFIG or the built-in tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the analysis service, e.g. http://localhost:5000/api
    #[arg(long)]
    remote: Option<String>,

    /// Override the simulated latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,
}

fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::from_env()?,
    };
    if let Some(latency_ms) = cli.latency_ms {
        config = config.with_latency_ms(latency_ms);
    }

    let mut engine = match cli.seed {
        Some(seed) => AnalysisEngine::seeded(&config, seed),
        None => AnalysisEngine::from_entropy(&config),
    };

    let mut request = AnalysisRequest::new(cli.protein);
    request.protein_sequence = cli.sequence;

    let analysis = match &cli.remote {
        Some(base_url) => RemoteAnalyzer::new(base_url)?.analyze_with_fallback(&mut engine, &request),
        None => Analysis::LocalSimulated(engine.analyze(&request)),
    };
    info!("Analysis mode: {}", analysis.provenance());

    let doc = analysis.to_json()?;
    let rendered = serde_json::to_string_pretty(&doc).context("failed to render analysis")?;
    println!("{}", rendered);

    Ok(())
}
