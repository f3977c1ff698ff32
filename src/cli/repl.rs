//! Interactive read-eval-print loop

use std::io::{self, BufRead, Write};

use crate::{Environment, Evaluator, ParseError, Statement, parse};

/// Options for the REPL
#[derive(Debug, Clone)]
pub struct ReplOptions {
    /// Printed before every line; empty when input is not a terminal
    pub prompt: String,
    /// Echo the parsed program before evaluating it
    pub show_ast: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        ReplOptions {
            prompt: ">> ".to_string(),
            show_ast: false,
        }
    }
}

/// Write syntax errors, one per line under a header.
pub fn write_parse_errors(out: &mut impl Write, errors: &[ParseError]) -> io::Result<()> {
    writeln!(out, "Parse errors:")?;
    for error in errors {
        writeln!(out, "\t{}", error)?;
    }
    Ok(())
}

/// Read lines from `input` until EOF, evaluating each in one long-lived
/// environment so bindings carry over between lines.
///
/// Prompts and results go to `output`. Lines with syntax errors are reported
/// on `errors` and skipped. A line ending in a `let` prints nothing unless it
/// failed; runtime errors are results and go to `output`.
pub fn run_repl<R: BufRead, W: Write, E: Write>(
    input: R,
    mut output: W,
    mut errors: E,
    options: &ReplOptions,
) -> io::Result<()> {
    let env = Environment::new();
    let evaluator = Evaluator::new();
    let mut lines = input.lines();

    loop {
        write!(output, "{}", options.prompt)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let (program, parse_errors) = parse(&line);
        if !parse_errors.is_empty() {
            write_parse_errors(&mut errors, &parse_errors)?;
            errors.flush()?;
            continue;
        }

        if options.show_ast && !program.statements.is_empty() {
            writeln!(output, "{}", program)?;
        }

        let result = evaluator.eval_program(&program, &env);
        let silent = matches!(program.statements.last(), None | Some(Statement::Let { .. }));
        if result.is_error() || !silent {
            writeln!(output, "{}", result)?;
        }
    }

    Ok(())
}
