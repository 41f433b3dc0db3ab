use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::http::dispatch::{DispatchOutcome, dispatch};
use crate::http::parser::{find_headers_end, nonzero_content_length};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::route::Router;

const READ_BUFFER_SIZE: usize = 4096;

/// State owned by one accepted connection: the unconsumed receive buffer
/// and the close/error flags that steer the read loop.
pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    router: Arc<Router>,
    state: ConnectionState,
    close_requested: bool,
    write_failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Reading,
    Dispatching,
    Closing,
}

impl Connection {
    pub fn new(stream: TcpStream, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
            router,
            state: ConnectionState::Reading,
            close_requested: false,
            write_failed: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match self.state {
                ConnectionState::Reading => {
                    let n = self.stream.read_buf(&mut self.buffer).await?;

                    if n == 0 {
                        // Client closed connection
                        self.state = ConnectionState::Closing;
                    } else {
                        self.state = ConnectionState::Dispatching;
                    }
                }

                ConnectionState::Dispatching => {
                    self.drain_requests().await;

                    if self.state != ConnectionState::Closing {
                        self.state = ConnectionState::Reading; // go back for more bytes
                    }
                }

                ConnectionState::Closing => {
                    debug!("Ending connection");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Answers every complete request currently buffered, in arrival order.
    ///
    /// The content-length guard runs over the whole buffer first: a request
    /// declaring a body poisons the connection before anything is dispatched,
    /// however many requests are buffered. Draining stops early on a
    /// malformed request, a `Connection: close`, or a failed write.
    async fn drain_requests(&mut self) {
        if nonzero_content_length(&self.buffer) {
            debug!("Buffered request declares a body");
            self.send(&Response::bad_request()).await;
            self.state = ConnectionState::Closing;
            return;
        }

        while let Some(end) = find_headers_end(&self.buffer) {
            // Take the request plus its terminator off the front; the span
            // handed to dispatch keeps a single trailing CRLF.
            let span = self.buffer.split_to(end + 4);
            let result = dispatch(&span[..end + 2], &self.router).await;

            self.send(&result.response).await;

            if result.close_requested {
                self.close_requested = true;
            }
            if result.outcome == DispatchOutcome::FatalMalformed
                || self.close_requested
                || self.write_failed
            {
                self.state = ConnectionState::Closing;
                return;
            }
        }
    }

    async fn send(&mut self, response: &Response) {
        let mut writer = ResponseWriter::new(response);

        if let Err(e) = writer.write_to_stream(&mut self.stream).await {
            warn!("Write to client failed: {}", e);
            self.write_failed = true;
        }
    }
}
