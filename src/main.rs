use std::env;

use error_stack::ResultExt;
use gnosis::{
    cli::{cli_adapter::CliAdapter, command::Command},
    config::{app_config::AppConfig, log_config::LogConfig},
    prettyprint::prettyprint::PrettyFormatter,
    Gnosis,
};
use thiserror::Error;
use tracing::{error, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[derive(Debug, Error)]
enum MainError {
    #[error("Failed to set up logging")]
    Logging,
    #[error("Failed to load configuration")]
    Config,
    #[error("Failed to open the Gnosis spreadsheet")]
    Open,
    #[error("Command failed")]
    Command,
}

#[tokio::main]
async fn main() -> error_stack::Result<(), MainError> {
    let args: Vec<String> = env::args().collect();

    if matches!(Command::parse(&args), Ok(Command::Help)) {
        println!("{}", gnosis::cli::command::USAGE);
        return Ok(());
    }

    let config = AppConfig::load().change_context(MainError::Config)?;
    setup_tracing(&config.log).change_context(MainError::Logging)?;
    setup_panic_hook();

    run(config, args).await.map_err(|report| {
        error!("{:?}", report);
        report
    })
}

#[instrument(skip_all)]
async fn run(config: AppConfig, args: Vec<String>) -> error_stack::Result<(), MainError> {
    info!("Starting gnosis CLI");

    let gnosis = Gnosis::connect(config.sheets)
        .await
        .change_context(MainError::Open)?;
    let mut cli_adapter = CliAdapter::new(gnosis);

    let output = cli_adapter
        .run(args)
        .await
        .change_context(MainError::Command)?;
    println!("{output}");
    Ok(())
}

fn setup_tracing(log: &LogConfig) -> std::io::Result<()> {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = match &log.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(false))
                .with_writer(std::sync::Mutex::new(std::fs::File::create(path)?))
                .with_ansi(false),
        ),
        None => None,
    };

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("gnosis", log.tracing_level()),
        )
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
