use photoflow_api::setup;
use photoflow_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (backends, services, routes)
    let (_state, router) = setup::initialize_app(&config).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
