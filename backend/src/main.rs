use anyhow::Context;
use product_api::config::AppConfig;
use product_api::{create_router, init_logging, initialize_backend};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.log_level);

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, config.origin_header()?);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
