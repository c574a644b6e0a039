use ignition_app::config::AppConfig;
use ignition_app::startup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ignition_core::init_tracing();

    let config = AppConfig::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to load configuration, using defaults");
        AppConfig::default()
    });

    let state = startup::build_state().await?;
    let router = startup::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "ignition server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ignition server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for Ctrl-C");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
