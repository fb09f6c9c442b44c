use std::process::ExitCode;

use anyhow::Context;
use luxplayd::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("luxplayd: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Config::load().context("failed to load configuration")?;
    luxplayd::logging::init(&settings.log_filter);

    tracing::info!(
        window = %settings.controller.window,
        time_zone = %settings.time_zone,
        "luxplayd starting"
    );

    luxplayd::serve(&settings, luxplayd::signal::shutdown_signal())
        .await
        .context("startup failed")?;

    tracing::info!("luxplayd stopped");
    Ok(())
}
