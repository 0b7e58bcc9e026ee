//! TCP transport implementation.
//!
//! Every accepted connection gets its own MCP session (line-delimited
//! JSON-RPC). All sessions share one server, and therefore one user store.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections until the process is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);
        serve_listener(listener, server).await
    }
}

async fn serve_listener(listener: TcpListener, server: McpServer) -> TransportResult<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                info!("Accepted connection from {}", peer_addr);

                if let Err(e) = stream.set_nodelay(true) {
                    warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                }

                tokio::spawn(handle_connection(server.clone(), stream, peer_addr));
            }
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                // Avoid spinning on persistent accept errors
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    }
}

async fn handle_connection(server: McpServer, stream: TcpStream, peer_addr: SocketAddr) {
    let service = match server.serve(stream).await {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to initialize session for {}: {}", peer_addr, e);
            return;
        }
    };
    debug!("Session established with {}", peer_addr);

    match service.waiting().await {
        Ok(reason) => info!("Client {} disconnected: {:?}", peer_addr, reason),
        Err(e) => warn!("Error while serving client {}: {}", peer_addr, e),
    }
}
