use food_service::config::ServiceConfig;
use food_service::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "food_service=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServiceConfig::load()?;
    let bind_address = config.server.bind_address.clone();

    tracing::info!(
        backend = ?config.store.backend,
        identity = ?config.identity.mode,
        "Starting food service"
    );

    ServerBuilder::from_config(&config)
        .await?
        .serve(&bind_address)
        .await
}
