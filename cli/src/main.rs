use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use expense_tracker_cli::backend::{initialize_backend, io::menu};

fn main() {
    if let Err(e) = run() {
        eprintln!("\nAn unexpected error occurred: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Keep the terminal quiet by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("starting expense tracker session");
    let state = initialize_backend()?;
    menu::run(&state)
}
