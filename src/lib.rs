pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod server;
pub mod services;

use cli::{Cli, Commands};
pub use config::Config;
pub use server::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config.general.log_level, config.general.log_json);
    config.validate()?;

    match &cli.command {
        None | Some(Commands::Serve { .. }) => serve(config).await,
        Some(Commands::Filter { file }) => cli::cmd_filter(&config, file.as_deref()).await,
        Some(Commands::Init) => cli::cmd_init(),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if config.observability.metrics_enabled {
        api::observability::install_metrics_exporter(&config.observability)?;
    }

    info!("Starting catalog filter on {}:{}", config.server.host, config.server.port);

    let server = Server::start(&config).await?;
    server.run_until(server::shutdown_signal()).await
}
