//! # Stackvizd
//!
//! Request/response service in front of [`stackviz_core::validate`].
//!
//! Messages are JSON bodies framed with a `Content-Length` header, the same
//! framing the Debug Adapter Protocol uses:
//!
//! ```text
//! Content-Length: 63\r\n
//! \r\n
//! {"type":"request","seq":1,"command":"check","arguments":{...}}
//! ```
//!
//! ## Commands
//!
//! - `check` `{ "expression": "..." }` - verdict fields plus a `timestamp`;
//!   an absent or empty expression is rejected with status 400
//! - `history` `{ "limit"?: n }` - recent checks, newest first
//!
//! History is a bounded ring buffer owned by [`StackVisualizerBackend`]; it
//! is not persisted.

pub mod backend;
pub mod config;
pub mod history;
pub mod protocol;
pub mod session;

pub use backend::{Backend, ServiceError, StackVisualizerBackend};
pub use config::ServerConfig;
pub use history::{History, HistoryEntry};
pub use protocol::ProtocolMessage;
pub use session::Session;

/// Runs a session over stdin/stdout with the given settings.
pub fn run_stdio_session(config: ServerConfig) -> anyhow::Result<()> {
    log::info!(
        "stackvizd ready (history capacity {}, display {})",
        config.history_capacity,
        config.history_display
    );
    let max_frame_bytes = config.max_frame_bytes;
    let mut session =
        Session::new(StackVisualizerBackend::new(config)).with_max_frame_bytes(max_frame_bytes);
    session.run_loop()
}
