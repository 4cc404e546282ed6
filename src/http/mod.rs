//! HTTP protocol implementation.
//!
//! This module implements the GET-only HTTP/1.1 subset the server speaks,
//! with support for keep-alive connections.
//!
//! # Architecture
//!
//! - **`line`**: Reads CRLF-terminated lines off the connection
//! - **`parser`**: Turns lines into a validated `Request` or a `ParseError`
//! - **`request`**: HTTP request representation and header canonicalization
//! - **`resolver`**: Maps a request target to a file below the document root
//! - **`response`**: The 200 / 400 / 404 outcomes with a builder underneath
//! - **`writer`**: Serializes responses and streams file bodies
//! - **`connection`**: The per-connection request-response state machine
//! - **`site`**: Read-only settings shared by all connections
//! - **`mime`**: MIME type detection based on file extensions
//! - **`date`**: HTTP date formatting
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a request, idle deadline armed
//!        └──────┬──────┘
//!               │ Request parsed         (EOF / timeout → Closed,
//!               ▼                         parse error → Writing 400)
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve path, build 200 or 404
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send head, stream file body
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Connection: close → Closed
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use triton::http::connection::Connection;
//! use triton::http::site::Site;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let site = Arc::new(Site::new("docroot")?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let site = site.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, site);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod date;
pub mod line;
pub mod mime;
pub mod parser;
pub mod request;
pub mod resolver;
pub mod response;
pub mod site;
pub mod writer;
