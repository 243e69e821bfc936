use anyhow::Result;
use docqa::{analysis::HttpAnalysisClient, config, form::SubmissionController, shell::Shell};
use std::sync::Arc;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Logs go to stderr so they never interleave with the form on stdout
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&log_level)?)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(
        "Starting document Q&A client against {} with log level: {}",
        config.service.endpoint, log_level
    );

    let client = Arc::new(HttpAnalysisClient::new(&config.service)?);
    let controller = SubmissionController::new(client);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(controller, std::io::stdout());
    shell.run(stdin).await?;

    info!("Shutting down");
    Ok(())
}
