//! Listener setup and the serve loop.

use axum::Router;
use hokusai_error::{ServerError, ServerErrorKind};
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::info;

/// Bind a TCP listener.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Bind`] if the address cannot be bound.
pub async fn bind<A>(address: A) -> Result<TcpListener, ServerError>
where
    A: ToSocketAddrs + std::fmt::Display,
{
    let label = address.to_string();
    TcpListener::bind(address).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: label,
            message: e.to_string(),
        })
    })
}

/// Serve `router` until the process is stopped.
///
/// # Errors
///
/// Returns [`ServerErrorKind::Serve`] if the server loop fails.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), ServerError> {
    if let Ok(address) = listener.local_addr() {
        info!(%address, "Hokusai listening");
    }
    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))
}
