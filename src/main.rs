mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vexdb::{MetricKind, ShellConfig};

/// Interactive shell over in-memory vector collections
#[derive(Parser, Debug)]
#[command(name = "vexdb")]
struct Args {
    /// JSON file with shell defaults
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Default number of query results
    #[arg(long)]
    top_k: Option<usize>,

    /// Default query metric (euclidean, cosine, dot)
    #[arg(long)]
    metric: Option<MetricKind>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(top_k) = args.top_k {
        config.default_top_k = top_k;
    }
    if let Some(metric) = args.metric {
        config.default_metric = metric;
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(top_k = config.default_top_k, metric = %config.default_metric, "starting shell");

    let mut session = cli::Session::new(config, args.json);
    cli::run_repl(&mut session)
}
