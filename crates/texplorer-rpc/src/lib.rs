//! Symmetric request/response multiplexer over newline-delimited JSON.
//!
//! Both ends run the same [`RpcConnection`]. Each side draws message ids from
//! its own range (clients count up from zero, servers count down from -1),
//! so requests in both directions can share one stream.

mod connection;
mod envelope;
mod error;

pub use connection::{Handler, RpcConnection, Side};
pub use envelope::{Envelope, ErrorData, PROTOCOL_VERSION, Payload, UNIMPLEMENTED_MESSAGE};
pub use error::RpcError;
