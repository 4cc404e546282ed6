use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::debug;

use crate::http::line::LineReader;
use crate::http::parser::{ParseError, parse_request};
use crate::http::request::Request;
use crate::http::resolver;
use crate::http::response::Response;
use crate::http::site::Site;
use crate::http::writer::ResponseWriter;

/// One client connection, served until it closes or goes idle.
pub struct Connection<S> {
    lines: LineReader<S>,
    site: Arc<Site>,
    writer: ResponseWriter,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(Response),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: Arc<Site>) -> Self {
        let writer = ResponseWriter::new(site.chunk_size);
        Self {
            lines: LineReader::new(stream),
            site,
            writer,
            state: ConnectionState::Reading,
        }
    }

    /// Starts the loop from `state` instead of `Reading`.
    pub fn with_state(mut self, state: ConnectionState) -> Self {
        self.state = state;
        self
    }

    /// Runs the read → respond loop.
    ///
    /// Returns an error only when writing a response failed; the
    /// connection is closed either way.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = self.read_request().await;
                }

                ConnectionState::Processing(req) => {
                    let response = self.handle_request(req).await;
                    self.state = ConnectionState::Writing(response);
                }

                ConnectionState::Writing(response) => {
                    let close = response.closes_connection();
                    if let Err(e) = self
                        .writer
                        .write_to_stream(&response, self.lines.get_mut())
                        .await
                    {
                        self.shutdown().await;
                        return Err(e);
                    }

                    if close {
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::Reading; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    self.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads the next request under a fresh idle deadline and picks the
    /// state that follows.
    async fn read_request(&mut self) -> ConnectionState {
        let result = match timeout(self.site.idle_timeout, parse_request(&mut self.lines)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(partial = self.lines.pending(), "connection timed out");
                return ConnectionState::Closed;
            }
        };

        match result {
            Ok(req) => ConnectionState::Processing(req),
            Err(ParseError::Closed) => {
                debug!("connection closed by peer");
                ConnectionState::Closed
            }
            Err(e) if e.is_bad_request() => {
                debug!(error = %e, "bad request");
                ConnectionState::Writing(Response::bad_request())
            }
            Err(e) => {
                debug!(error = %e, partial = e.bytes_received(), "read failed");
                ConnectionState::Closed
            }
        }
    }

    async fn handle_request(&self, req: Request) -> Response {
        let response = match resolver::resolve(&req.url, &self.site.doc_root).await {
            Some(path) => Response::ok(req, path, &self.site.mime).await,
            None => Response::not_found(req),
        };

        if let Some(req) = &response.request {
            debug!(
                method = req.method.as_str(),
                url = %req.url,
                status = response.status.as_u16(),
                "handled request"
            );
        }
        response
    }

    async fn shutdown(&mut self) {
        // The peer may already be gone.
        let _ = self.lines.get_mut().shutdown().await;
    }
}
