//! Entry point for the `todo-proxy` HTTP server.

use todo_proxy::{build_app, config::Settings, error::ProxyError};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "todo_proxy=info,todo_proxy_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "todo-proxy stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ProxyError> {
    let settings = Settings::from_env()?;
    info!(
        listen_addr = %settings.listen_addr,
        upstream_timeout_secs = settings.upstream_timeout.as_secs(),
        source = ?settings.source,
        "configuration loaded"
    );

    let app = build_app(&settings)?;
    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    info!(addr = %listener.local_addr()?, "todo-proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
