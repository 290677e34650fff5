use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod domain;
mod services;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = cli::Cli::parse();
    let config = services::config::load(cli.model.as_deref())?;
    commands::handle_runtime_commands(&cli, &config)
}

// Logs go to stderr so `--json` stdout stays machine-parseable;
// ASCREEN_LOG_FORMAT=json switches the log lines themselves to JSON.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ascreen=info".into());
    let format = std::env::var("ASCREEN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
