use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use video_info_service::{API_KEY_VAR, API_PATH, Config, VideoInfoHandler, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    if config.api_key.is_none() {
        warn!("{API_KEY_VAR} is not set, every lookup will fail with a configuration error");
    }

    let addr = config.listen_addr;
    let upstream = config.api_base_url.clone();
    let app = create_router(VideoInfoHandler::from_config(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, %upstream, "serving video info on / and {API_PATH}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
