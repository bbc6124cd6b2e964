use std::io::Write;

use clap::{Parser, Subcommand};
use stackviz_core::render::{render_stack, render_trace, status_line};
use stackviz_core::{Replay, Verdict, validate};

/// Inputs offered as one-click examples in the visualizer.
const QUICK_EXAMPLES: &[&str] = &["((a+b)*c)", "(()", "{[()]}", "([{}])", "))((", "({[)]}"];

#[derive(Parser)]
#[command(name = "stackviz")]
#[command(about = "Check bracket balance and show the stack trace", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an expression and print the trace
    Check {
        #[arg(value_name = "EXPR")]
        expression: String,
        /// Emit the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the stack after every step, one snapshot per line
    Replay {
        #[arg(value_name = "EXPR")]
        expression: String,
    },
    /// Run the built-in quick examples
    Examples,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    let code = run(&cli.command, &mut stdout)?;
    stdout.flush()?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Executes one subcommand and returns the process exit code.
///
/// `check` exits with 1 when the expression is unbalanced.
fn run(command: &Commands, out: &mut impl Write) -> anyhow::Result<i32> {
    match command {
        Commands::Check { expression, json } => {
            let verdict = validate(expression);
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&verdict)?)?;
            } else {
                write!(out, "{}", render_trace(expression, &verdict))?;
            }
            return Ok(exit_code(&verdict));
        }
        Commands::Replay { expression } => {
            let verdict = validate(expression);
            let chars: Vec<char> = expression.chars().collect();
            for frame in Replay::new(&verdict.steps) {
                let frame = frame?;
                let current = frame
                    .cursor
                    .and_then(|i| chars.get(i))
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    out,
                    "{:>3} {:<2} {:<10} {}",
                    frame.index + 1,
                    current,
                    render_stack(&frame.stack),
                    frame.step.message()
                )?;
            }
            writeln!(out, "{}", status_line(verdict.balanced))?;
        }
        Commands::Examples => {
            for example in QUICK_EXAMPLES {
                let verdict = validate(example);
                let detail = verdict
                    .terminal()
                    .map(|step| step.message().to_string())
                    .unwrap_or_default();
                writeln!(out, "{example:<12} {:<28} {detail}", status_line(verdict.balanced))?;
            }
        }
    }
    Ok(0)
}

fn exit_code(verdict: &Verdict) -> i32 {
    if verdict.balanced {
        0
    } else {
        1
    }
}
