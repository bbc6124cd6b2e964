//! Plain-text rendering of a verdict, one line per step.

use std::fmt::Write;

use crate::bracket::StackFrame;
use crate::replay::Replay;
use crate::trace::Verdict;

/// Renders `verdict` as a numbered step list with the stack after each step.
///
/// The input is echoed line by line, with a caret under the position the
/// verdict failed at, if any. Tabs before the error are kept so the caret
/// lines up; wide characters still count as one column.
pub fn render_trace(input: &str, verdict: &Verdict) -> String {
    let mut out = String::new();
    let mut line_start = 0;
    for line in input.split('\n') {
        let line_len = line.chars().count();
        let _ = writeln!(out, "{line}");
        if let Some(position) = verdict.error_position {
            if (line_start..line_start + line_len).contains(&position) {
                let _ = writeln!(out, "{}^", caret_padding(line, position - line_start));
            }
        }
        // The newline itself takes one position.
        line_start += line_len + 1;
    }

    for frame in Replay::new(&verdict.steps) {
        match frame {
            Ok(frame) => {
                let _ = writeln!(
                    out,
                    "{:>3}. {:<60} stack: {}",
                    frame.index + 1,
                    frame.step.message(),
                    render_stack(&frame.stack)
                );
            }
            Err(e) => {
                let _ = writeln!(out, "  !  {e}");
                break;
            }
        }
    }

    out.push_str(status_line(verdict.balanced));
    out.push('\n');
    out
}

/// Whitespace covering the first `column` chars of `line`, tabs preserved.
fn caret_padding(line: &str, column: usize) -> String {
    line.chars()
        .take(column)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

/// Final status line shown once the whole trace has been played.
pub fn status_line(balanced: bool) -> &'static str {
    if balanced {
        "✅ Expression is balanced"
    } else {
        "❌ Expression is unbalanced"
    }
}

/// Bottom-to-top listing of stack symbols, e.g. `[( [ (]`.
pub fn render_stack(stack: &[StackFrame]) -> String {
    let symbols: Vec<String> = stack.iter().map(|frame| frame.symbol.to_string()).collect();
    format!("[{}]", symbols.join(" "))
}
