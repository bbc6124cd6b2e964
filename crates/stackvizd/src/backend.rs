use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stackviz_core::{Verdict, validate};
use thiserror::Error;

use crate::config::ServerConfig;
use crate::history::{History, HistoryEntry};

/// Failures surfaced to the client. Unbalanced input is not one of them.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Expression is required")]
    MissingExpression,
    #[error("Expression exceeds {limit} characters")]
    ExpressionTooLong { limit: usize },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// HTTP-style status code: 400 for client mistakes, 500 otherwise.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Serialization(_) => 500,
            _ => 400,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status() < 500
    }
}

/// The commands a session dispatches to.
pub trait Backend {
    /// Validates `arguments.expression` and records it in history.
    fn check(&mut self, arguments: Value) -> Result<Value, ServiceError>;

    /// Returns recent checks, newest first.
    fn history(&mut self, arguments: Value) -> Result<Value, ServiceError>;
}

#[derive(Debug, Default, Deserialize)]
struct CheckArguments {
    #[serde(default)]
    expression: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HistoryArguments {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Serialize)]
struct CheckResponse<'a> {
    #[serde(flatten)]
    verdict: &'a Verdict,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
struct HistoryResponse<'a> {
    history: Vec<&'a HistoryEntry>,
}

fn parse_arguments<T: Default + for<'de> Deserialize<'de>>(
    arguments: Value,
) -> Result<T, ServiceError> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(arguments).map_err(|e| ServiceError::InvalidArguments(e.to_string()))
}

/// Validator plus an owned, bounded history of past checks.
pub struct StackVisualizerBackend {
    config: ServerConfig,
    history: History,
    clock: fn() -> DateTime<Utc>,
}

impl StackVisualizerBackend {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            history: History::with_capacity(config.history_capacity),
            config,
            clock: Utc::now,
        }
    }

    /// Replaces the timestamp source.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn recorded(&self) -> &History {
        &self.history
    }
}

impl Backend for StackVisualizerBackend {
    fn check(&mut self, arguments: Value) -> Result<Value, ServiceError> {
        let args: CheckArguments = parse_arguments(arguments)?;
        let expression = match args.expression {
            Some(expression) if !expression.is_empty() => expression,
            _ => return Err(ServiceError::MissingExpression),
        };
        if let Some(limit) = self.config.max_expression_len
            && expression.chars().count() > limit
        {
            return Err(ServiceError::ExpressionTooLong { limit });
        }

        let verdict = validate(&expression);
        let timestamp = (self.clock)();
        log::info!(
            "checked {} chars: balanced={} steps={}",
            expression.chars().count(),
            verdict.balanced,
            verdict.steps.len()
        );

        let body = serde_json::to_value(CheckResponse {
            verdict: &verdict,
            timestamp,
        })?;
        self.history
            .record(HistoryEntry::new(&expression, &verdict, timestamp));
        Ok(body)
    }

    fn history(&mut self, arguments: Value) -> Result<Value, ServiceError> {
        let args: HistoryArguments = parse_arguments(arguments)?;
        let limit = args.limit.unwrap_or(self.config.history_display);
        let body = HistoryResponse {
            history: self.history.recent(limit).collect(),
        };
        Ok(serde_json::to_value(body)?)
    }
}
