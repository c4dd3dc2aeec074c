use clap::Parser;
use std::process::ExitCode;
use taiga_sync::{
    commands::{normalize_args, Cli},
    libs::{config, messages::macros::is_debug_mode},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    config::load_env();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taiga_sync=debug")))
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    match cli.menu().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
