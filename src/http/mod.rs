//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 request pipeline: accumulating bytes
//! from a connection, splitting them into discrete pipelined requests,
//! validating request line and headers, and producing well-formed responses.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the read/dispatch state machine
//! - **`parser`**: Header parsing, request-boundary detection and the request-body guard
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`dispatch`**: Validates one complete request and picks the response
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Bytes received
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Drain complete requests from the buffer,
//!        └──────┬───────────┘   answering each before parsing the next
//!               │
//!               ├─ Buffer exhausted → Reading (same connection)
//!               └─ Malformed request, `Connection: close`,
//!                  write failure or peer EOF → Closing
//! ```
//!
//! A request never carries a body: the boundary between two pipelined
//! requests is exactly the `\r\n\r\n` that terminates the first one's
//! header block.

pub mod connection;
pub mod dispatch;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

/// Protocol version accepted in request lines and emitted in status lines.
pub const HTTP_VERSION: &str = "HTTP/1.1";
