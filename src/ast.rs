//! # Monkey - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree of the Monkey language, a
//! small dynamically typed language with integers, booleans, strings, arrays,
//! hashes and first-class functions.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, operations, calls, functions)
//! - **[operators]** - Prefix and infix operators
//! - **[statements]** - `let`, `return`, expression statements, blocks and programs
//!
//! ## Quick Start
//!
//! ```text
//! let newAdder = fn(x) { fn(y) { x + y } };
//! let addTwo = newAdder(2);
//! addTwo(3);
//! ```
//!
//! ## Canonical Rendering
//!
//! Every node implements [`std::fmt::Display`]. Operations render fully
//! parenthesized, so the rendering shows how precedence was resolved:
//!
//! ```text
//! a + b * c    =>  (a + (b * c))
//! -a * b       =>  ((-a) * b)
//! a + b - c    =>  ((a + b) - c)
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;
pub mod statements;

pub use tokens::{Position, Token, TokenKind};
pub use expressions::{Expr, FunctionLiteral};
pub use operators::{BinOp, UnaryOp};
pub use statements::{Block, Program, Statement};
