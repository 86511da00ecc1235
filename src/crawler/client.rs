//! API client module
//!
//! One HTTP/1.1 connection to the remote API, opened once and reused for
//! every request of the crawl. Requests are sent strictly one at a time.

use crate::crawler::CrawlError;
use crate::logger;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::client::conn::http1::{self, SendRequest};
use hyper::header::HOST;
use hyper::{Request, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

/// Client half of the single crawl connection
pub struct ApiClient {
    sender: SendRequest<Empty<Bytes>>,
    host: String,
}

impl ApiClient {
    /// Open the one TCP connection the whole crawl runs over.
    ///
    /// The connection driver runs on a background task until the client is
    /// dropped; driver failures surface as errors on the next request.
    pub async fn connect(server_url: &str) -> Result<Self, CrawlError> {
        let uri: Uri = server_url
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| CrawlError::InvalidUrl {
                url: server_url.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(scheme) = uri.scheme_str() {
            if scheme != "http" {
                return Err(CrawlError::InvalidUrl {
                    url: server_url.to_string(),
                    reason: format!("unsupported scheme '{scheme}'"),
                });
            }
        }

        let host = uri.host().ok_or_else(|| CrawlError::InvalidUrl {
            url: server_url.to_string(),
            reason: "missing host".to_string(),
        })?;
        let port = uri.port_u16().unwrap_or(80);
        let addr = format!("{host}:{port}");

        // Host header carries the port only when it is not the default
        let host_header = if port == 80 {
            host.to_string()
        } else {
            addr.clone()
        };

        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| CrawlError::Connect { addr, source })?;

        let (sender, conn) = http1::handshake::<_, Empty<Bytes>>(TokioIo::new(stream))
            .await
            .map_err(|source| CrawlError::Handshake { source })?;

        tokio::spawn(async move {
            if let Err(err) = conn.await {
                logger::log_error(&format!("Api connection failed: {err}"));
            }
        });

        Ok(Self {
            sender,
            host: host_header,
        })
    }

    /// Fetch one path and return the full response body.
    ///
    /// Anything but `200 OK` is an error; the body is collected completely
    /// so the connection is free for the next request.
    pub async fn get(&mut self, path: &str) -> Result<Bytes, CrawlError> {
        let req = Request::builder()
            .uri(path)
            .header(HOST, &self.host)
            .body(Empty::<Bytes>::new())
            .map_err(|source| CrawlError::InvalidPath {
                path: path.to_string(),
                source,
            })?;

        self.sender
            .ready()
            .await
            .map_err(|source| CrawlError::Request {
                path: path.to_string(),
                source,
            })?;

        let response = self
            .sender
            .send_request(req)
            .await
            .map_err(|source| CrawlError::Request {
                path: path.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(CrawlError::UnexpectedStatus {
                path: path.to_string(),
                status: response.status(),
            });
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|source| CrawlError::Request {
                path: path.to_string(),
                source,
            })?
            .to_bytes();

        Ok(body)
    }
}
