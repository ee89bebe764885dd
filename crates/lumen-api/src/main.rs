use lumen_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    lumen_api::telemetry::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage directories, routes)
    let (state, router) = lumen_api::setup::initialize_app(config.clone()).await?;

    // Run cleanup on startup, then start the server
    let removed = state.sweeper.sweep().await;
    tracing::info!(removed_files = removed, "Startup cleanup completed");

    lumen_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
