use std::process::ExitCode;

use airdraw::config::{AppConfig, setup_logging};
use airdraw::web::AppState;
use clap::Parser;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    let cli = airdraw::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return ExitCode::FAILURE;
    }

    let config = match AppConfig::try_from(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(err) => {
            error!("Failed to set up providers: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = airdraw::web::setup_server(&cli.listen_address, cli.port, state).await {
        error!("Application error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
