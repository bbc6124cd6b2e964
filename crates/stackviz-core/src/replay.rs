//! Rebuilds the stack from a recorded trace.
//!
//! A visualizer receives only the [`TraceStep`] list. Replaying it (push on
//! `push`, pop on `pop`) yields the stack as it looked after each step, which
//! is what gets drawn. Traces produced by [`validate`](crate::validate) always
//! replay cleanly; traces read back from the wire are checked as they go.

use thiserror::Error;

use crate::bracket::StackFrame;
use crate::trace::TraceStep;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("step {step}: pop with an empty stack")]
    PopOnEmpty { step: usize },
    #[error("step {step}: pop does not match the frame on top of the stack")]
    PopMismatch { step: usize },
    #[error("step {step}: trace continues after a terminal step")]
    StepAfterTerminal { step: usize },
    #[error("trace has no terminal step")]
    MissingTerminal,
}

/// The stack after one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFrame<'a> {
    pub index: usize,
    pub step: &'a TraceStep,
    /// Bottom first.
    pub stack: Vec<StackFrame>,
    /// Input position to highlight.
    pub cursor: Option<usize>,
}

/// Iterator over [`ReplayFrame`]s. Stops after the first error.
pub struct Replay<'a> {
    steps: &'a [TraceStep],
    next: usize,
    stack: Vec<StackFrame>,
    finished: bool,
}

impl<'a> Replay<'a> {
    pub fn new(steps: &'a [TraceStep]) -> Self {
        Self {
            steps,
            next: 0,
            stack: Vec::new(),
            finished: false,
        }
    }

    /// Stack as of the last frame yielded.
    pub fn stack(&self) -> &[StackFrame] {
        &self.stack
    }

    fn apply(&mut self, index: usize, step: &TraceStep) -> Result<(), ReplayError> {
        match step {
            TraceStep::Push {
                symbol, position, ..
            } => {
                self.stack.push(StackFrame::new(*symbol, *position));
            }
            TraceStep::Pop { opened_at, .. } => {
                let top = self
                    .stack
                    .pop()
                    .ok_or(ReplayError::PopOnEmpty { step: index })?;
                if top.position != *opened_at {
                    return Err(ReplayError::PopMismatch { step: index });
                }
            }
            TraceStep::Error { .. } | TraceStep::Success { .. } => {}
        }
        Ok(())
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = Result<ReplayFrame<'a>, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let index = self.next;
        let Some(step) = self.steps.get(index) else {
            self.finished = true;
            let ended_on_terminal = self.steps.last().is_some_and(TraceStep::is_terminal);
            return (!ended_on_terminal).then_some(Err(ReplayError::MissingTerminal));
        };
        self.next += 1;

        if index > 0 && self.steps[index - 1].is_terminal() {
            self.finished = true;
            return Some(Err(ReplayError::StepAfterTerminal { step: index }));
        }
        if let Err(e) = self.apply(index, step) {
            self.finished = true;
            return Some(Err(e));
        }

        Some(Ok(ReplayFrame {
            index,
            step,
            stack: self.stack.clone(),
            cursor: step.position(),
        }))
    }
}

/// Replays a whole trace and returns the frames left on the stack.
pub fn replay(steps: &[TraceStep]) -> Result<Vec<StackFrame>, ReplayError> {
    let mut frames = Replay::new(steps);
    for frame in frames.by_ref() {
        frame?;
    }
    Ok(frames.stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;

    #[test]
    fn test_balanced_trace_drains_stack() {
        let verdict = validate("{[()]}");
        assert_eq!(replay(&verdict.steps), Ok(Vec::new()));
    }

    #[test]
    fn test_unclosed_trace_leaves_frames() {
        let verdict = validate("(()");
        let stack = replay(&verdict.steps).unwrap();
        assert_eq!(stack, vec![StackFrame::new('(', 0)]);
    }

    #[test]
    fn test_frames_follow_the_scan() {
        let verdict = validate("([])");
        let depths: Vec<usize> = Replay::new(&verdict.steps)
            .map(|frame| frame.unwrap().stack.len())
            .collect();
        assert_eq!(depths, vec![1, 2, 1, 0, 0]);
    }

    #[test]
    fn test_cursor_tracks_input_position() {
        let verdict = validate("a(b)");
        let cursors: Vec<Option<usize>> = Replay::new(&verdict.steps)
            .map(|frame| frame.unwrap().cursor)
            .collect();
        assert_eq!(cursors, vec![Some(1), Some(3), None]);
    }

    #[test]
    fn test_pop_on_empty_is_rejected() {
        let steps = vec![TraceStep::pop('(', 0, ')', 0, 0), TraceStep::success()];
        assert_eq!(replay(&steps), Err(ReplayError::PopOnEmpty { step: 0 }));
    }

    #[test]
    fn test_pop_of_wrong_frame_is_rejected() {
        let steps = vec![
            TraceStep::push('(', 0, 1),
            TraceStep::pop('(', 5, ')', 6, 0),
            TraceStep::success(),
        ];
        assert_eq!(replay(&steps), Err(ReplayError::PopMismatch { step: 1 }));
    }

    #[test]
    fn test_steps_after_terminal_are_rejected() {
        let steps = vec![TraceStep::success(), TraceStep::push('(', 0, 1)];
        assert_eq!(replay(&steps), Err(ReplayError::StepAfterTerminal { step: 1 }));
    }

    #[test]
    fn test_missing_terminal() {
        let steps = vec![TraceStep::push('(', 0, 1)];
        assert_eq!(replay(&steps), Err(ReplayError::MissingTerminal));
        assert_eq!(replay(&[]), Err(ReplayError::MissingTerminal));
    }
}
