use std::rc::Rc;

use crate::{
    ast::{BinOp, Block, Expr, Program, Statement, UnaryOp},
    builtins::Builtins,
    environment::Environment,
    value::{Function, HashPair, HashPairs, NULL, Value, ValueKind},
};

/// Errors that can occur during evaluation.
///
/// These travel as [`Value::Error`] rather than as `Err`: an error is an
/// ordinary value that every evaluation step checks for and hands back up
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Infix operands of different types
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        left: ValueKind,
        op: BinOp,
        right: ValueKind,
    },

    /// Prefix operator applied to a type it does not support
    #[error("unknown operator: {op}{right}")]
    UnknownPrefixOperator { op: UnaryOp, right: ValueKind },

    /// Infix operator applied to a type it does not support
    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        left: ValueKind,
        op: BinOp,
        right: ValueKind,
    },

    /// Name bound neither in scope nor as a builtin
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    /// Call of something that is not a function or builtin
    #[error("not a function: {0}")]
    NotAFunction(ValueKind),

    /// Index expression on a value that is neither an array nor a hash
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ValueKind),

    /// Array indexed with something other than an integer
    #[error("invalid index for {container}: {index}")]
    InvalidIndex {
        container: ValueKind,
        index: ValueKind,
    },

    /// Hash key that is not an integer, boolean or string
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(ValueKind),

    /// Integer division with a zero divisor
    #[error("division by zero")]
    DivisionByZero,

    /// Builtin called with the wrong number of arguments
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },

    /// Builtin called with an argument of a type it cannot handle
    #[error("argument to `{builtin}` not supported, got {got}")]
    UnsupportedArgument {
        builtin: &'static str,
        got: ValueKind,
    },

    /// Array builtin called with something other than an array
    #[error("argument to `{builtin}` must be ARRAY, got {got}")]
    ExpectedArray {
        builtin: &'static str,
        got: ValueKind,
    },
}

/// Hands an error or `return` signal straight back to the caller, otherwise
/// yields the value.
macro_rules! propagate {
    ($value:expr) => {
        match $value {
            signal @ (Value::Error(_) | Value::ReturnValue(_)) => return signal,
            value => value,
        }
    };
}

/// Tree-walking evaluator.
///
/// Holds the builtin table consulted when a name is not bound in scope.
/// Bindings themselves live in the [`Environment`] passed to each call, so
/// one evaluator can serve any number of programs and scopes.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'b> {
    builtins: &'b Builtins,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator<'static> {
    /// Creates an evaluator using the process-wide builtin table.
    pub fn new() -> Self {
        Evaluator {
            builtins: Builtins::global(),
        }
    }
}

impl<'b> Evaluator<'b> {
    pub fn with_builtins(builtins: &'b Builtins) -> Self {
        Evaluator { builtins }
    }

    /// Evaluates a program in `env`.
    ///
    /// Statements run in order until one produces an error or a `return`.
    /// The value of a top-level `return` is unwrapped; errors come back as
    /// [`Value::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use monkey_lang::{Environment, Evaluator, Value, parse};
    ///
    /// let (program, errors) = parse("let double = fn(x) { x * 2 }; double(21)");
    /// assert!(errors.is_empty());
    ///
    /// let env = Environment::new();
    /// let result = Evaluator::new().eval_program(&program, &env);
    /// assert_eq!(result, Value::Integer(42));
    /// ```
    pub fn eval_program(&self, program: &Program, env: &Rc<Environment>) -> Value {
        let mut result = NULL;

        for statement in &program.statements {
            result = self.eval_statement(statement, env);
            if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
                break;
            }
        }

        match result {
            Value::ReturnValue(value) => *value,
            other => other,
        }
    }

    /// Like [`Evaluator::eval_program`] but leaves `return` signals wrapped,
    /// so they keep unwinding through enclosing blocks.
    fn eval_block(&self, block: &Block, env: &Rc<Environment>) -> Value {
        let mut result = NULL;

        for statement in &block.statements {
            result = self.eval_statement(statement, env);
            if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
                return result;
            }
        }

        result
    }

    fn eval_statement(&self, statement: &Statement, env: &Rc<Environment>) -> Value {
        match statement {
            Statement::Let { name, value } => {
                let value = propagate!(self.eval_expression(value, env));
                env.set(name.clone(), value);
                NULL
            }
            Statement::Return(value) => {
                let value = propagate!(self.eval_expression(value, env));
                Value::ReturnValue(Box::new(value))
            }
            Statement::Expression(expr) => self.eval_expression(expr, env),
        }
    }

    pub fn eval_expression(&self, expr: &Expr, env: &Rc<Environment>) -> Value {
        match expr {
            Expr::Integer(n) => Value::Integer(*n),
            Expr::String(s) => Value::String(s.clone()),
            Expr::Boolean(b) => Value::from(*b),
            Expr::Identifier(name) => self.eval_identifier(name, env),
            Expr::Prefix { op, right } => {
                let right = propagate!(self.eval_expression(right, env));
                self.eval_prefix(*op, right)
            }
            Expr::Infix { op, left, right } => {
                let left = propagate!(self.eval_expression(left, env));
                let right = propagate!(self.eval_expression(right, env));
                self.eval_infix(*op, &left, &right)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = propagate!(self.eval_expression(condition, env));
                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    NULL
                }
            }
            Expr::Function(literal) => Value::Function(Rc::new(Function {
                literal: Rc::clone(literal),
                env: Rc::clone(env),
            })),
            Expr::Call {
                function,
                arguments,
            } => {
                let callee = propagate!(self.eval_expression(function, env));
                match self.eval_expressions(arguments, env) {
                    Ok(args) => self.apply_function(&callee, &args),
                    Err(signal) => signal,
                }
            }
            Expr::Array(elements) => match self.eval_expressions(elements, env) {
                Ok(elements) => Value::array(elements),
                Err(signal) => signal,
            },
            Expr::Hash(pairs) => self.eval_hash(pairs, env),
            Expr::Index { left, index } => {
                let left = propagate!(self.eval_expression(left, env));
                let index = propagate!(self.eval_expression(index, env));
                self.eval_index(&left, &index)
            }
        }
    }

    /// Evaluates left to right, stopping at the first error or `return`.
    fn eval_expressions(&self, exprs: &[Expr], env: &Rc<Environment>) -> Result<Vec<Value>, Value> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match self.eval_expression(expr, env) {
                signal @ (Value::Error(_) | Value::ReturnValue(_)) => return Err(signal),
                value => values.push(value),
            }
        }
        Ok(values)
    }

    fn eval_identifier(&self, name: &str, env: &Environment) -> Value {
        env.get(name)
            .or_else(|| self.builtins.get(name).map(Value::Builtin))
            .unwrap_or_else(|| Value::error(EvalError::IdentifierNotFound(name.to_string())))
    }

    fn eval_prefix(&self, op: UnaryOp, right: Value) -> Value {
        match (op, right) {
            (UnaryOp::Not, right) => Value::from(!right.is_truthy()),
            (UnaryOp::Negate, Value::Integer(n)) => Value::Integer(n.wrapping_neg()),
            (UnaryOp::Negate, right) => Value::error(EvalError::UnknownPrefixOperator {
                op,
                right: right.kind(),
            }),
        }
    }

    fn eval_infix(&self, op: BinOp, left: &Value, right: &Value) -> Value {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => self.eval_integer_infix(op, *a, *b),
            (Value::String(a), Value::String(b)) => match op {
                BinOp::Add => Value::String(format!("{}{}", a, b)),
                _ => Value::error(EvalError::UnknownInfixOperator {
                    left: ValueKind::String,
                    op,
                    right: ValueKind::String,
                }),
            },
            (a, b) if a.kind() != b.kind() => Value::error(EvalError::TypeMismatch {
                left: a.kind(),
                op,
                right: b.kind(),
            }),
            (a, b) => match op {
                BinOp::Equal => Value::from(a.is_identical(b)),
                BinOp::NotEqual => Value::from(!a.is_identical(b)),
                _ => Value::error(EvalError::UnknownInfixOperator {
                    left: a.kind(),
                    op,
                    right: b.kind(),
                }),
            },
        }
    }

    fn eval_integer_infix(&self, op: BinOp, a: i64, b: i64) -> Value {
        match op {
            BinOp::Add => Value::Integer(a.wrapping_add(b)),
            BinOp::Subtract => Value::Integer(a.wrapping_sub(b)),
            BinOp::Multiply => Value::Integer(a.wrapping_mul(b)),
            BinOp::Divide if b == 0 => Value::error(EvalError::DivisionByZero),
            BinOp::Divide => Value::Integer(a.wrapping_div(b)),
            BinOp::LessThan => Value::from(a < b),
            BinOp::GreaterThan => Value::from(a > b),
            BinOp::LessEqual => Value::from(a <= b),
            BinOp::GreaterEqual => Value::from(a >= b),
            BinOp::Equal => Value::from(a == b),
            BinOp::NotEqual => Value::from(a != b),
        }
    }

    fn eval_hash(&self, pairs: &[(Expr, Expr)], env: &Rc<Environment>) -> Value {
        let mut hash = HashPairs::default();

        for (key_expr, value_expr) in pairs {
            let key = propagate!(self.eval_expression(key_expr, env));
            let Some(hash_key) = key.hash_key() else {
                return Value::error(EvalError::UnusableHashKey(key.kind()));
            };
            let value = propagate!(self.eval_expression(value_expr, env));
            hash.insert(hash_key, HashPair { key, value });
        }

        Value::hash(hash)
    }

    fn eval_index(&self, left: &Value, index: &Value) -> Value {
        match (left, index) {
            (Value::Array(elements), Value::Integer(i)) => usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned()
                .unwrap_or(NULL),
            (Value::Array(_), other) => Value::error(EvalError::InvalidIndex {
                container: ValueKind::Array,
                index: other.kind(),
            }),
            (Value::Hash(pairs), key) => match key.hash_key() {
                Some(hash_key) => pairs
                    .get(&hash_key)
                    .map(|pair| pair.value.clone())
                    .unwrap_or(NULL),
                None => Value::error(EvalError::UnusableHashKey(key.kind())),
            },
            (other, _) => Value::error(EvalError::IndexNotSupported(other.kind())),
        }
    }

    /// Calls a function or builtin with already evaluated arguments.
    ///
    /// Parameters are bound positionally in a fresh child of the function's
    /// captured environment. Surplus arguments are ignored and parameters
    /// without an argument stay unbound.
    #[tracing::instrument(level = "trace", skip_all, fields(callee = %callee.kind(), args = args.len()))]
    fn apply_function(&self, callee: &Value, args: &[Value]) -> Value {
        let result = match callee {
            Value::Function(function) => {
                let env = Environment::new_enclosed(&function.env);
                for (name, arg) in function.literal.parameters.iter().zip(args) {
                    env.set(name.clone(), arg.clone());
                }
                match self.eval_block(&function.literal.body, &env) {
                    Value::ReturnValue(value) => *value,
                    value => value,
                }
            }
            Value::Builtin(builtin) => builtin.call(args),
            other => Value::error(EvalError::NotAFunction(other.kind())),
        };

        if let Value::Error(error) = &result {
            tracing::debug!(%error, "call produced an error");
        }
        result
    }
}

/// Evaluates `program` in `env` with the standard builtins.
pub fn evaluate(program: &Program, env: &Rc<Environment>) -> Value {
    Evaluator::new().eval_program(program, env)
}
