use anyhow::Context;
use clap::Parser;
use stories::app::App;
use stories::cli::Args;
use stories::config::Config;
use stories::logging::setup_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config and setup logging first so startup logs are never silently dropped
    let config = Config::load().context("Failed to load config")?;
    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting stories"
    );

    App::new(config).run().await
}
