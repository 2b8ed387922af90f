use anyhow::Context;

use fromager_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fromager_observability::init();

    let config = AppConfig::from_env()?;
    let services = fromager_api::app::services::build_services(&config.db).await?;
    let app = fromager_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
    }
}
