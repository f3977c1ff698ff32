use std::{
    fmt,
    hash::Hasher,
    rc::Rc,
};

use rustc_hash::{FxHashMap, FxHasher};

use crate::{
    ast::FunctionLiteral, builtins::Builtin, environment::Environment, evaluator::EvalError,
};

/// Type tag of a runtime value, as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Integer => "INTEGER",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Null => "NULL",
            ValueKind::String => "STRING",
            ValueKind::Array => "ARRAY",
            ValueKind::Hash => "HASH",
            ValueKind::Function => "FUNCTION",
            ValueKind::Builtin => "BUILTIN",
            ValueKind::ReturnValue => "RETURN_VALUE",
            ValueKind::Error => "ERROR",
        })
    }
}

/// Key under which a value is stored in a hash.
///
/// Integers and booleans use their own bits, strings a 64-bit hash of their
/// bytes, so equal contents always give equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashKey {
    pub kind: ValueKind,
    pub value: u64,
}

/// Entry of a hash value. The original key is kept for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

pub type HashPairs = FxHashMap<HashKey, HashPair>;

/// A function value: a `fn` literal closed over the environment it was
/// evaluated in.
pub struct Function {
    pub literal: Rc<FunctionLiteral>,
    pub env: Rc<Environment>,
}

// The captured environment usually contains this function, so it is left out.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.literal.parameters)
            .field("body", &self.literal.body.to_string())
            .finish_non_exhaustive()
    }
}

/// A runtime value of the Monkey language.
///
/// Arrays, hashes and functions are reference counted: cloning a value shares
/// the allocation, and the language's `==` compares them by identity.
///
/// # Examples
///
/// ```
/// use monkey_lang::Value;
///
/// let answer = Value::Integer(42);
/// assert_eq!(answer.to_string(), "42");
///
/// let list = Value::array(vec![Value::Integer(1), Value::from("two")]);
/// assert_eq!(list.to_string(), "[1, two]");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),

    Boolean(bool),

    Null,

    String(String),

    Array(Rc<Vec<Value>>),

    Hash(Rc<HashPairs>),

    Function(Rc<Function>),

    Builtin(Builtin),

    /// Value of a `return` statement on its way out of the enclosing
    /// function. Never escapes a call or the program.
    ReturnValue(Box<Value>),

    /// Runtime error, propagated like a return value
    Error(EvalError),
}

pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);
pub const NULL: Value = Value::Null;

impl Value {
    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(elements))
    }

    pub fn hash(pairs: HashPairs) -> Value {
        Value::Hash(Rc::new(pairs))
    }

    pub fn error(error: EvalError) -> Value {
        Value::Error(error)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Hash(_) => ValueKind::Hash,
            Value::Function(_) => ValueKind::Function,
            Value::Builtin(_) => ValueKind::Builtin,
            Value::ReturnValue(_) => ValueKind::ReturnValue,
            Value::Error(_) => ValueKind::Error,
        }
    }

    /// Only `null` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Returns the hash key for integers, booleans and strings.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Value::Integer(n) => *n as u64,
            Value::Boolean(b) => u64::from(*b),
            Value::String(s) => {
                let mut hasher = FxHasher::default();
                hasher.write(s.as_bytes());
                hasher.finish()
            }
            _ => return None,
        };
        Some(HashKey {
            kind: self.kind(),
            value,
        })
    }

    /// Identity comparison used by the language's `==` on non-integer values.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Structural equality, used by tests and by hash pair comparison. Functions
/// compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b { TRUE } else { FALSE }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Human readable rendering, as printed by the REPL.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
            Value::String(s) => f.write_str(s),
            Value::Array(elements) => {
                let items: Vec<String> = elements.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Hash(pairs) => {
                let mut entries: Vec<_> = pairs.iter().collect();
                entries.sort_by_key(|(key, _)| **key);
                let items: Vec<String> = entries
                    .iter()
                    .map(|(_, pair)| format!("{}: {}", pair.key, pair.value))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Value::Function(function) => write!(
                f,
                "fn({}) {{\n{}\n}}",
                function.literal.parameters.join(", "),
                function.literal.body
            ),
            Value::Builtin(_) => f.write_str("builtin function"),
            Value::ReturnValue(value) => write!(f, "{}", value),
            Value::Error(error) => write!(f, "{}", error),
        }
    }
}
