use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bracket::BracketKind;

/// Why a scan stopped without reaching `success`.
///
/// The `Display` text of each arm is the message recorded on the
/// corresponding [`TraceStep::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason")]
pub enum Failure {
    /// A closing symbol arrived while the stack was empty.
    #[error("Unbalanced: No matching opening bracket for '{symbol}' at index {position}")]
    UnmatchedCloser {
        #[serde(rename = "char")]
        symbol: char,
        position: usize,
        #[serde(rename = "bracketKind")]
        kind: BracketKind,
    },
    /// A closing symbol closed a frame of a different kind.
    #[error("Mismatch: Expected '{expected}' but found '{actual}' at index {position}")]
    TypeMismatch {
        expected: char,
        actual: char,
        position: usize,
        #[serde(rename = "openedAt")]
        opened_at: usize,
    },
    /// The input ended with frames still on the stack.
    #[error("Unbalanced: {count} unclosed bracket(s) remaining")]
    UnclosedOpeners { count: usize },
}

impl Failure {
    /// Input position the failure is pinned to. Unclosed openers have none.
    pub fn position(&self) -> Option<usize> {
        match self {
            Failure::UnmatchedCloser { position, .. } | Failure::TypeMismatch { position, .. } => {
                Some(*position)
            }
            Failure::UnclosedOpeners { .. } => None,
        }
    }
}

/// One event of the scan, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceStep {
    Push {
        #[serde(rename = "char")]
        symbol: char,
        position: usize,
        #[serde(rename = "bracketKind")]
        kind: BracketKind,
        #[serde(rename = "stackDepth")]
        stack_depth: usize,
        message: String,
    },
    Pop {
        #[serde(rename = "char")]
        symbol: char,
        position: usize,
        #[serde(rename = "bracketKind")]
        kind: BracketKind,
        #[serde(rename = "stackDepth")]
        stack_depth: usize,
        /// Position of the opener this closer matched.
        #[serde(rename = "openedAt")]
        opened_at: usize,
        message: String,
    },
    Error {
        failure: Failure,
        message: String,
    },
    Success {
        message: String,
    },
}

impl TraceStep {
    pub(crate) fn push(symbol: char, position: usize, stack_depth: usize) -> Self {
        TraceStep::Push {
            symbol,
            position,
            kind: BracketKind::of(symbol),
            stack_depth,
            message: format!("Pushed '{symbol}' onto the stack"),
        }
    }

    pub(crate) fn pop(
        opener: char,
        opened_at: usize,
        symbol: char,
        position: usize,
        stack_depth: usize,
    ) -> Self {
        TraceStep::Pop {
            symbol,
            position,
            kind: BracketKind::of(symbol),
            stack_depth,
            opened_at,
            message: format!("Popped '{opener}' for '{symbol}'"),
        }
    }

    pub(crate) fn error(failure: Failure) -> Self {
        TraceStep::Error {
            message: failure.to_string(),
            failure,
        }
    }

    pub(crate) fn success() -> Self {
        TraceStep::Success {
            message: "Expression is balanced".to_string(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TraceStep::Push { message, .. }
            | TraceStep::Pop { message, .. }
            | TraceStep::Error { message, .. }
            | TraceStep::Success { message } => message.as_str(),
        }
    }

    /// Input position this step refers to, used to highlight the current character.
    pub fn position(&self) -> Option<usize> {
        match self {
            TraceStep::Push { position, .. } | TraceStep::Pop { position, .. } => Some(*position),
            TraceStep::Error { failure, .. } => failure.position(),
            TraceStep::Success { .. } => None,
        }
    }

    /// Stack depth after the step, for steps that change it.
    pub fn stack_depth(&self) -> Option<usize> {
        match self {
            TraceStep::Push { stack_depth, .. } | TraceStep::Pop { stack_depth, .. } => {
                Some(*stack_depth)
            }
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TraceStep::Error { .. } | TraceStep::Success { .. })
    }
}

/// The complete result of one validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub balanced: bool,
    pub steps: Vec<TraceStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_position: Option<usize>,
}

impl Verdict {
    /// The `error` or `success` step closing the trace.
    pub fn terminal(&self) -> Option<&TraceStep> {
        self.steps.last().filter(|step| step.is_terminal())
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self.terminal() {
            Some(TraceStep::Error { failure, .. }) => Some(failure),
            _ => None,
        }
    }

    pub fn push_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, TraceStep::Push { .. }))
            .count()
    }

    pub fn pop_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, TraceStep::Pop { .. }))
            .count()
    }

    /// Frames left unmatched when the scan stopped.
    ///
    /// The frame a type mismatch was detected against was never matched, so
    /// it still counts. A trace with more pops than pushes (only possible when
    /// read back from the wire) reports zero; use [`replay`](crate::replay) to
    /// reject such traces.
    pub fn final_depth(&self) -> usize {
        self.push_count().saturating_sub(self.pop_count())
    }
}
