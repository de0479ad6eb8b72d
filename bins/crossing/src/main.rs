mod cmd;

use std::path::PathBuf;

use clap::Parser;
use crossing_engine::Direction;

#[derive(Parser)]
#[command(name = "crossing", about = "Translate values across the service boundary")]
struct Cli {
    /// Command schema configuration (.toml or .hcl).
    #[arg(long, default_value = "crossing.toml", env = "CROSSING_CONFIG")]
    config: PathBuf,

    /// `to-internal` or `to-service`.
    #[arg(long, default_value = "to-internal")]
    direction: Direction,

    /// JSON array of values; `-` reads stdin.
    input: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tracing::info!(config = %cli.config.display(), "loading configuration");
    let translator = match cmd::translate::translator_from_config(&cli.config) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    let input = match cmd::translate::read_input(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(input = %cli.input, error = %e, "failed to read input");
            std::process::exit(1);
        }
    };

    match cmd::translate::run(&translator, cli.direction, &input) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            tracing::error!(direction = %cli.direction, error = %e, "translation failed");
            std::process::exit(1);
        }
    }
}
