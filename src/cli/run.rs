//! Execute a Monkey program in one shot

use super::CliError;
use crate::{Environment, Evaluator, Program, Value, parse};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The program source text
    pub source: String,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a run operation
#[derive(Debug)]
pub enum RunResult {
    /// Syntax validation passed
    SyntaxValid(Program),
    /// Program evaluated to a value
    Success { program: Program, value: Value },
}

/// Parse and, unless only syntax is checked, evaluate a program in a fresh
/// environment.
pub fn execute_run(options: &RunOptions) -> Result<RunResult, CliError> {
    let (program, errors) = parse(&options.source);
    if !errors.is_empty() {
        return Err(CliError::Parse(errors));
    }

    if options.syntax_only {
        return Ok(RunResult::SyntaxValid(program));
    }

    let env = Environment::new();
    match Evaluator::new().eval_program(&program, &env) {
        Value::Error(error) => Err(CliError::Runtime(error)),
        value => Ok(RunResult::Success { program, value }),
    }
}
