// Server module entry point
// TCP accept loop and per-connection serving for the snapshot server

pub mod connection;
pub mod listener;

// Re-export commonly used functions
pub use listener::create_reusable_listener;

use crate::handler::ServeContext;
use crate::logger;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept connections until the process is terminated externally.
///
/// A failed accept is logged and the loop keeps going; one bad connection
/// never takes the server down.
pub async fn run(listener: TcpListener, ctx: ServeContext) {
    let ctx = Arc::new(ctx);
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                if ctx.access_log {
                    logger::log_connection_accepted(&peer_addr);
                }
                connection::handle_connection(stream, peer_addr, Arc::clone(&ctx));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
