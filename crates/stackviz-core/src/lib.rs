//! # Stackviz Core
//!
//! Bracket balance validation that records every stack operation it performs.
//!
//! ## Overview
//!
//! This crate checks whether a sequence of characters containing the pairs
//! `()`, `[]` and `{}` is correctly nested. Besides the verdict it produces an
//! ordered trace of [`TraceStep`](trace::TraceStep)s (push, pop, error,
//! success) that carries enough detail to animate the stack one event at a
//! time.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   validate()   ┌──────────────┐   Replay    ┌────────────────┐
//! │  &str input  │ ─────────────► │   Verdict    │ ──────────► │ stack snapshots│
//! └──────────────┘                │ balanced     │             └────────────────┘
//!                                 │ steps[]      │   render_trace()
//!                                 │ errorPosition│ ──────────► text report
//!                                 └──────────────┘
//! ```
//!
//! - [`bracket`] - Symbol classification and pairing
//! - [`trace`] - The trace IR: [`TraceStep`](trace::TraceStep), [`Failure`](trace::Failure), [`Verdict`](trace::Verdict)
//! - [`validator`] - The single-pass scan, [`validate`]
//! - [`replay`] - Rebuilds the stack from a trace
//! - [`render`] - Human-readable trace output
//!
//! ## Examples
//!
//! ```
//! use stackviz_core::validate;
//!
//! let verdict = validate("{[()]}");
//! assert!(verdict.balanced);
//! assert_eq!(verdict.push_count(), 3);
//! assert_eq!(verdict.pop_count(), 3);
//! ```
//!
//! Unbalanced input is an ordinary result, not an error:
//!
//! ```
//! use stackviz_core::{validate, trace::Failure};
//!
//! let verdict = validate("({[)]}");
//! assert!(!verdict.balanced);
//! assert_eq!(verdict.error_position, Some(3));
//! assert!(matches!(
//!     verdict.failure(),
//!     Some(Failure::TypeMismatch { expected: ']', actual: ')', .. })
//! ));
//! ```
//!
//! ### Exporting to JSON
//!
//! The trace types implement `serde::Serialize`; steps are tagged by `type`:
//!
//! ```ignore
//! let json = serde_json::to_string_pretty(&stackviz_core::validate("(()"))?;
//! ```

pub mod bracket;
pub mod render;
pub mod replay;
pub mod trace;
pub mod validator;

pub use bracket::{BracketKind, Role, StackFrame};
pub use replay::{Replay, ReplayError, ReplayFrame, replay};
pub use trace::{Failure, TraceStep, Verdict};
pub use validator::validate;

/// Schema version for the trace IR.
///
/// - MAJOR: Breaking changes to step structure
/// - MINOR: New optional fields or step kinds
/// - PATCH: Bug fixes to scan behavior
pub const SCHEMA_VERSION: &str = "1.0.0";
