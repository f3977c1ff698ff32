pub mod ast;
pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BinOp, Block, Expr, Program, Statement, Token, TokenKind, UnaryOp};
pub use builtins::Builtins;
pub use environment::Environment;
pub use evaluator::{EvalError, Evaluator, evaluate};
pub use lexer::Lexer;
pub use output::{to_json, to_json_string};
pub use parser::{ParseError, Parser, parse};
pub use value::Value;
