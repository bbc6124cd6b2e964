use crate::bracket::{BracketKind, Role, StackFrame};
use crate::trace::{Failure, TraceStep, Verdict};

/// Checks whether `input` is correctly nested and records how the answer was reached.
///
/// ## Algorithm
///
/// A single left-to-right pass over the characters of `input`, with a stack of
/// still-open brackets:
///
/// 1. **Opening symbols** (`(`, `[`, `{`) are pushed, emitting a `push` step
/// 2. **Closing symbols** (`)`, `]`, `}`) are checked against the top of the stack:
///    - empty stack: [`Failure::UnmatchedCloser`], scan stops
///    - wrong kind on top: [`Failure::TypeMismatch`], scan stops
///    - otherwise the frame is popped, emitting a `pop` step
/// 3. Every other character is skipped without a step
/// 4. After the last character, a non-empty stack yields a single
///    [`Failure::UnclosedOpeners`] step; an empty one yields `success`
///
/// Positions are zero-based indices into `input.chars()`.
///
/// Unlike a diagnostics pass, this stops at the first failure: the trace ends
/// exactly where the verdict was decided, so it can be replayed step by step.
///
/// ## Examples
///
/// ```
/// use stackviz_core::{validate, TraceStep};
///
/// let verdict = validate("))((");
/// assert!(!verdict.balanced);
/// assert_eq!(verdict.error_position, Some(0));
/// assert_eq!(verdict.steps.len(), 1);
/// assert!(matches!(verdict.steps[0], TraceStep::Error { .. }));
/// ```
pub fn validate(input: &str) -> Verdict {
    let mut scan = Scan::default();

    for (position, ch) in input.chars().enumerate() {
        match Role::of(ch) {
            Role::Opening => scan.open(ch, position),
            Role::Closing => {
                if let Err(failure) = scan.close(ch, position) {
                    return scan.fail(failure);
                }
            }
            Role::Other => {}
        }
    }

    if !scan.stack.is_empty() {
        let count = scan.stack.len();
        return scan.fail(Failure::UnclosedOpeners { count });
    }

    scan.record(TraceStep::success());
    log::debug!("balanced after {} steps", scan.steps.len());
    Verdict {
        balanced: true,
        steps: scan.steps,
        error_position: None,
    }
}

#[derive(Default)]
struct Scan {
    stack: Vec<StackFrame>,
    steps: Vec<TraceStep>,
}

impl Scan {
    fn open(&mut self, ch: char, position: usize) {
        self.stack.push(StackFrame::new(ch, position));
        self.record(TraceStep::push(ch, position, self.stack.len()));
    }

    fn close(&mut self, ch: char, position: usize) -> Result<(), Failure> {
        let Some(top) = self.stack.last().copied() else {
            return Err(Failure::UnmatchedCloser {
                symbol: ch,
                position,
                kind: BracketKind::of(ch),
            });
        };

        match top.expected_closing() {
            Some(expected) if expected == ch => {
                self.stack.pop();
                self.record(TraceStep::pop(
                    top.symbol,
                    top.position,
                    ch,
                    position,
                    self.stack.len(),
                ));
                Ok(())
            }
            expected => Err(Failure::TypeMismatch {
                // Frames only ever hold opening symbols.
                expected: expected.unwrap_or(top.symbol),
                actual: ch,
                position,
                opened_at: top.position,
            }),
        }
    }

    fn fail(mut self, failure: Failure) -> Verdict {
        log::debug!("unbalanced: {failure}");
        let error_position = failure.position();
        self.record(TraceStep::error(failure));
        Verdict {
            balanced: false,
            steps: self.steps,
            error_position,
        }
    }

    fn record(&mut self, step: TraceStep) {
        log::trace!("{}", step.message());
        self.steps.push(step);
    }
}
