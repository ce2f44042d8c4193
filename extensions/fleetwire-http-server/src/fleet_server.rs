//! Note: `FleetServer` accepts but does not verify the agents' bearer
//! credentials. Put it behind an authenticating proxy, or supply the check
//! in your own `AgentBackend`, before exposing it beyond a trusted network.

use crate::{AgentBackend, routes};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};

/// Serves the agent protocol endpoints over HTTP.
pub struct FleetServer {
    backend: Arc<dyn AgentBackend>,
}

impl FleetServer {
    pub fn new(backend: Arc<dyn AgentBackend>) -> Self {
        FleetServer { backend }
    }

    /// The axum router with every endpoint, for embedding into a larger app.
    pub fn router(&self) -> Router {
        routes::router(self.backend.clone())
    }

    /// Binds to an address and starts serving.
    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> Result<SocketAddr, axum::BoxError> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_with_listener(listener).await
    }

    /// Starts serving on a pre-bound `TcpListener`.
    ///
    /// Useful with port 0, where the real address is only known after binding.
    pub async fn serve_with_listener(
        self,
        listener: TcpListener,
    ) -> Result<SocketAddr, axum::BoxError> {
        let address = listener.local_addr()?;
        tracing::info!("Fleet server running on {:?}", address);
        axum::serve(listener, self.router()).await?;
        Ok(address)
    }
}
