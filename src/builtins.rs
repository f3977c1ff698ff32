//! Native functions available to every program.
//!
//! The table is built once per process and only ever read. Identifier lookup
//! falls back to it when a name is not bound in any enclosing scope, so a
//! program may shadow a builtin with its own `let`.

use std::{fmt, sync::LazyLock};

use rustc_hash::FxHashMap;

use crate::{
    evaluator::EvalError,
    value::{NULL, Value},
};

pub type BuiltinFn = fn(&[Value]) -> Value;

/// A named native function. Builtins check their own arguments and report
/// misuse as an error value.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// Registry of builtin functions, keyed by name.
#[derive(Debug, Clone)]
pub struct Builtins {
    table: FxHashMap<&'static str, Builtin>,
}

static STANDARD: LazyLock<Builtins> = LazyLock::new(Builtins::standard);

impl Builtins {
    /// `len`, `first`, `last`, `rest` and `push`.
    pub fn standard() -> Self {
        let mut builtins = Builtins {
            table: FxHashMap::default(),
        };
        builtins.register("len", len);
        builtins.register("first", first);
        builtins.register("last", last);
        builtins.register("rest", rest);
        builtins.register("push", push);
        builtins
    }

    /// Shared instance of [`Builtins::standard`].
    pub fn global() -> &'static Builtins {
        &STANDARD
    }

    pub fn register(&mut self, name: &'static str, func: BuiltinFn) {
        self.table.insert(name, Builtin { name, func });
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.table.get(name).copied()
    }
}

fn check_arity(args: &[Value], want: usize) -> Result<(), Value> {
    if args.len() == want {
        Ok(())
    } else {
        Err(Value::error(EvalError::WrongArgumentCount {
            got: args.len(),
            want,
        }))
    }
}

/// Validates the single array argument of `first`, `last` and `rest`.
fn single_array<'a>(name: &'static str, args: &'a [Value]) -> Result<&'a [Value], Value> {
    check_arity(args, 1)?;
    array_argument(name, &args[0])
}

fn array_argument<'a>(name: &'static str, arg: &'a Value) -> Result<&'a [Value], Value> {
    match arg {
        Value::Array(elements) => Ok(elements.as_slice()),
        other => Err(Value::error(EvalError::ExpectedArray {
            builtin: name,
            got: other.kind(),
        })),
    }
}

fn len(args: &[Value]) -> Value {
    if let Err(error) = check_arity(args, 1) {
        return error;
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => Value::error(EvalError::UnsupportedArgument {
            builtin: "len",
            got: other.kind(),
        }),
    }
}

fn first(args: &[Value]) -> Value {
    match single_array("first", args) {
        Ok(elements) => elements.first().cloned().unwrap_or(NULL),
        Err(error) => error,
    }
}

fn last(args: &[Value]) -> Value {
    match single_array("last", args) {
        Ok(elements) => elements.last().cloned().unwrap_or(NULL),
        Err(error) => error,
    }
}

fn rest(args: &[Value]) -> Value {
    match single_array("rest", args) {
        Ok([]) => NULL,
        Ok([_, tail @ ..]) => Value::array(tail.to_vec()),
        Err(error) => error,
    }
}

fn push(args: &[Value]) -> Value {
    if let Err(error) = check_arity(args, 2) {
        return error;
    }
    match array_argument("push", &args[0]) {
        Ok(elements) => {
            let mut pushed = Vec::with_capacity(elements.len() + 1);
            pushed.extend_from_slice(elements);
            pushed.push(args[1].clone());
            Value::array(pushed)
        }
        Err(error) => error,
    }
}
