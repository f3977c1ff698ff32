use std::fmt;

use crate::ast::Expr;

/// Statement, at program level or inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Binding in the current environment
    ///
    /// # Example
    /// ```text
    /// let x = 5 * 5;
    /// ```
    Let { name: String, value: Expr },

    /// Early exit from the enclosing function (or program)
    ///
    /// # Example
    /// ```text
    /// return x + 1;
    /// ```
    Return(Expr),

    /// Bare expression used as a statement. The trailing `;` is optional.
    Expression(Expr),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// Braced statement sequence used by `if` branches and function bodies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// Root of a parsed source text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}
