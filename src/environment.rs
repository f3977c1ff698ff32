use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Lexical scope mapping names to values.
///
/// Scopes are shared through `Rc`: the REPL keeps its root scope across
/// lines, every function value holds the scope it was created in, and every
/// call gets a fresh child of that captured scope. Writes go to the scope
/// itself and are seen by every holder; lookups continue into `outer`.
#[derive(Debug, Default)]
pub struct Environment {
    store: RefCell<FxHashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Rc<Self> {
        Rc::new(Environment::default())
    }

    pub fn new_enclosed(outer: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            store: RefCell::default(),
            outer: Some(Rc::clone(outer)),
        })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds `name` in this scope, replacing any previous binding here.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.store.borrow_mut().insert(name.into(), value);
    }
}
