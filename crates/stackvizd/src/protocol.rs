use serde::{Deserialize, Serialize};

/// A framed protocol message (Request or Response).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProtocolMessage {
    #[serde(rename = "request")]
    Request {
        seq: i64,
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        arguments: Option<serde_json::Value>,
    },
    #[serde(rename = "response")]
    Response {
        seq: i64,
        request_seq: i64,
        success: bool,
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<serde_json::Value>,
    },
}

/// Wraps a serialized message in a `Content-Length` header.
pub fn frame(message: &ProtocolMessage) -> serde_json::Result<String> {
    let json = serde_json::to_string(message)?;
    Ok(format!("Content-Length: {}\r\n\r\n{}", json.len(), json))
}

/// Parses a header line, returning the body length if it is `Content-Length`.
pub fn content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse().ok()
}
