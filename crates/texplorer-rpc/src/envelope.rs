use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version written on every outgoing envelope.
pub const PROTOCOL_VERSION: u32 = 1;

/// Error message sent back for a key without a handler.
pub const UNIMPLEMENTED_MESSAGE: &str = "method unimplemented";

/// One line on the wire.
///
/// ```json
/// {"mid":0,"key":"ping","payload":{"type":"request","data":{"data":"pong"}},"v":1}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Correlates a response with its request.
    pub mid: i64,
    pub key: String,
    pub payload: Payload,
    /// Absent on envelopes from peers that predate versioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<u32>,
}

impl Envelope {
    pub fn new(mid: i64, key: impl Into<String>, payload: Payload) -> Self {
        Envelope {
            mid,
            key: key.into(),
            payload,
            v: Some(PROTOCOL_VERSION),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Payload {
    Request(Value),
    Response(Value),
    Error(ErrorData),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorData {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorData {
            msg: msg.into(),
            stack: None,
        }
    }

    pub(crate) fn from_anyhow(err: &anyhow::Error) -> Self {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        ErrorData {
            msg: err.to_string(),
            stack: (!causes.is_empty()).then(|| causes.join("\n")),
        }
    }
}
