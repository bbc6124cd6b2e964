use std::io::{BufRead, Read, Write};

use anyhow::Result;
use serde_json::{Value, json};

use crate::backend::{Backend, ServiceError};
use crate::config::DEFAULT_MAX_FRAME_BYTES;
use crate::protocol::{ProtocolMessage, content_length, frame};

/// Wraps a [`Backend`] and runs the framed request/response loop.
pub struct Session<B: Backend> {
    backend: B,
    seq: i64,
    max_frame_bytes: usize,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            seq: 0,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }

    /// Caps the body size read for a single message.
    pub fn with_max_frame_bytes(mut self, max_frame_bytes: usize) -> Self {
        self.max_frame_bytes = max_frame_bytes;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Serves requests from stdin, writing responses to stdout.
    pub fn run_loop(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        self.run_session(&mut stdin.lock(), &mut stdout)
    }

    /// Serves requests until `reader` reaches EOF.
    pub fn run_session(&mut self, reader: &mut impl BufRead, writer: &mut impl Write) -> Result<()> {
        loop {
            // Headers, up to the blank line.
            let mut length = None;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line)? == 0 {
                    return Ok(());
                }
                let line = line.trim();
                if line.is_empty() {
                    break;
                }
                if let Some(len) = content_length(line) {
                    length = Some(len);
                }
            }

            let Some(length) = length.filter(|len| *len > 0) else {
                log::warn!("frame without Content-Length, skipping");
                continue;
            };

            if length > self.max_frame_bytes {
                log::warn!(
                    "frame of {length} bytes exceeds limit of {}, skipping",
                    self.max_frame_bytes
                );
                let limit = u64::try_from(length).unwrap_or(u64::MAX);
                std::io::copy(&mut reader.by_ref().take(limit), &mut std::io::sink())?;
                continue;
            }

            let mut buffer = vec![0u8; length];
            reader.read_exact(&mut buffer)?;

            match serde_json::from_slice::<ProtocolMessage>(&buffer) {
                Ok(ProtocolMessage::Request {
                    seq,
                    command,
                    arguments,
                }) => self.handle_request(seq, &command, arguments, writer)?,
                Ok(ProtocolMessage::Response { request_seq, .. }) => {
                    log::warn!("ignoring response message for request {request_seq}");
                }
                Err(e) => log::warn!("malformed message: {e}"),
            }
        }
    }

    fn handle_request(
        &mut self,
        seq: i64,
        command: &str,
        arguments: Option<Value>,
        writer: &mut impl Write,
    ) -> Result<()> {
        let arguments = arguments.unwrap_or(Value::Null);
        let result = match command {
            "check" => self.backend.check(arguments),
            "history" => self.backend.history(arguments),
            other => Err(ServiceError::UnknownCommand(other.to_string())),
        };

        let (success, body, message) = match result {
            Ok(body) => (true, Some(body), None),
            Err(e) => {
                if e.is_client_error() {
                    log::warn!("{command} rejected: {e}");
                } else {
                    log::error!("{command} failed: {e}");
                }
                let body = json!({ "status": e.status(), "error": e.to_string() });
                (false, Some(body), Some(e.to_string()))
            }
        };

        let response = ProtocolMessage::Response {
            seq: self.next_seq(),
            request_seq: seq,
            success,
            command: command.to_string(),
            message,
            body,
        };

        writer.write_all(frame(&response)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn next_seq(&mut self) -> i64 {
        self.seq += 1;
        self.seq
    }
}
