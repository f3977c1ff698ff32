//! CLI support for monkey-lang
//!
//! Provides programmatic access to the `monkey` binary's commands: one-shot
//! execution of a source text and the interactive REPL.

mod repl;
mod run;

pub use repl::{ReplOptions, run_repl, write_parse_errors};
pub use run::{RunOptions, RunResult, execute_run};

use std::{io, sync::Once};

use crate::{EvalError, ParseError};

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The source text has syntax errors
    #[error("{}", render_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Evaluation produced an error value
    #[error("Runtime error: {0}")]
    Runtime(EvalError),

    /// JSON encoding of the result failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No source given and nothing piped to stdin
    #[error("No input provided. Pass a program, use --file, or pipe source to stdin.")]
    NoInput,
}

fn render_parse_errors(errors: &[ParseError]) -> String {
    let lines: Vec<String> = errors.iter().map(|e| format!("\t{}", e)).collect();
    format!("Parse errors:\n{}", lines.join("\n"))
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// With `verbose` the crate logs at debug level; otherwise logging is only
/// enabled when `MONKEY_LOG` holds filter directives (e.g.
/// `MONKEY_LOG=monkey_lang=trace`). Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = if verbose {
            Some(EnvFilter::new("monkey_lang=debug"))
        } else {
            EnvFilter::try_from_env("MONKEY_LOG").ok()
        };

        if let Some(filter) = filter {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
