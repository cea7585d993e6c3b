use thiserror::Error;

/// Local failures of the transport. A remote handler failing is not one of
/// these: it arrives as [`Payload::Error`](crate::Payload::Error).
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("connection closed before a response arrived")]
    ConnectionClosed,
    #[error("failed to encode or decode a message")]
    Json(#[from] serde_json::Error),
    #[error("remote error: {msg}")]
    Remote { msg: String, stack: Option<String> },
    #[error("peer answered `{key}` with a request payload")]
    UnexpectedPayload { key: String },
}
