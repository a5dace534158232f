use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use super::container::Container;
use super::router::build_router;

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    info!(
        %addr,
        model = container.model_name(),
        api_key = container.has_api_key(),
        "Binding HTTP listener"
    );
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, build_router(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
