//! CLI entry point for chain code boundary noise

use chainnoise::io::cli::{Cli, DatasetProcessor};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed; keeping it is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> chainnoise::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut processor = DatasetProcessor::new(cli);
    processor.process()
}
