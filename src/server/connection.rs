// Connection handling module
// Serves a single accepted TCP connection

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::handler::{self, ServeContext};
use crate::logger;

/// Serve one accepted connection on a spawned task.
///
/// Keep-alive stays enabled so a client can pull a page and its assets over
/// one connection. Protocol errors end that connection only; they are logged
/// and the accept loop never sees them.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, ctx: Arc<ServeContext>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let ctx = Arc::clone(&ctx);
                async move { handler::handle_request(req, ctx, peer_addr).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
