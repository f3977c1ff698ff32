use std::{fmt, rc::Rc};

use crate::ast::{BinOp, Block, UnaryOp};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Every variant renders a canonical, fully parenthesized form through
/// [`fmt::Display`], which is what the parser tests compare against.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a binding or builtin
    ///
    /// # Example
    /// ```text
    /// foobar
    /// ```
    Identifier(String),

    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Integer(i64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// ```
    String(String),

    /// Boolean literal
    Boolean(bool),

    /// Prefix operation
    ///
    /// # Examples
    /// ```text
    /// !ok
    /// -5
    /// ```
    Prefix { op: UnaryOp, right: Box<Expr> },

    /// Infix operation
    ///
    /// # Example
    /// ```text
    /// a + b * c
    /// ```
    Infix {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Conditional expression. Produces the value of the branch taken.
    ///
    /// # Example
    /// ```text
    /// if (x < y) { x } else { y }
    /// ```
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },

    /// Function literal. Shared with every function value created from it.
    ///
    /// # Example
    /// ```text
    /// fn(x, y) { x + y }
    /// ```
    Function(Rc<FunctionLiteral>),

    /// Call of a function or builtin
    ///
    /// # Examples
    /// ```text
    /// add(1, 2 * 3)
    /// fn(x) { x }(5)
    /// ```
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },

    /// Array literal
    ///
    /// # Example
    /// ```text
    /// [1, 2 * 2, "three"]
    /// ```
    Array(Vec<Expr>),

    /// Hash literal, pairs kept in source order
    ///
    /// # Example
    /// ```text
    /// {"one": 1, two: 2, true: 3}
    /// ```
    Hash(Vec<(Expr, Expr)>),

    /// Index into an array or hash
    ///
    /// # Examples
    /// ```text
    /// items[0]
    /// {"a": 1}["a"]
    /// ```
    Index { left: Box<Expr>, index: Box<Expr> },
}

/// Parameters and body of a `fn` literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<String>,
    pub body: Block,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}) {{ {} }}", self.parameters.join(", "), self.body)
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => f.write_str(name),
            Expr::Integer(n) => write!(f, "{}", n),
            Expr::String(s) => write!(f, "\"{}\"", s),
            Expr::Boolean(b) => write!(f, "{}", b),
            Expr::Prefix { op, right } => write!(f, "({}{})", op, right),
            Expr::Infix { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {{ {} }}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {} }}", alternative)?;
                }
                Ok(())
            }
            Expr::Function(literal) => write!(f, "{}", literal),
            Expr::Call {
                function,
                arguments,
            } => write!(f, "{}({})", function, join(arguments)),
            Expr::Array(elements) => write!(f, "[{}]", join(elements)),
            Expr::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Expr::Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}
