// ABOUTME: Environment module for managing variable bindings and the
// parent chain used for lexical-then-dynamic lookup

use crate::error::LispError;
use crate::value::{Callable, LBuiltin, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Name-to-value table with an optional parent. The parent link is
/// non-owning: a callee's frame only outlives a call whose caller holds
/// the parent, and a closure's captured frame has its parent re-pointed
/// before every body evaluation.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: RefCell<Weak<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no parent
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(Weak::new()),
        })
    }

    /// Looks up a symbol in this frame and parent frames recursively.
    /// Returns a fresh clone, or an unbound-symbol error value.
    pub fn get(&self, name: &str) -> Value {
        if let Some(value) = self.bindings.borrow().get(name) {
            return value.clone();
        }

        let parent = self.parent.borrow().upgrade();
        match parent {
            Some(parent) => parent.get(name),
            None => Value::error(LispError::UnboundSymbol(name.to_string())),
        }
    }

    /// Inserts or replaces a binding in THIS frame
    pub fn put(&self, name: &str, value: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// Walks to the root frame and binds there
    pub fn def(&self, name: &str, value: Value) {
        let parent = self.parent.borrow().upgrade();
        match parent {
            Some(parent) => parent.def(name, value),
            None => self.put(name, value),
        }
    }

    pub fn set_parent(&self, parent: &Rc<Environment>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    /// Clones this frame, cloning every bound value; the parent link is
    /// carried over as-is.
    pub fn deep_clone(&self) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(self.bindings.borrow().clone()),
            parent: RefCell::new(self.parent.borrow().clone()),
        })
    }

    pub fn keys(&self) -> Vec<String> {
        self.bindings.borrow().keys().cloned().collect()
    }

    /// Names starting with `prefix`, for interactive completion
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.bindings
            .borrow()
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn add_builtin_function(&self, name: &str, func: LBuiltin) {
        self.put(name, Value::Function(Callable::Builtin(func)));
    }

    pub fn add_builtin_macro(&self, name: &str, func: LBuiltin) {
        self.put(name, Value::Macro(Callable::Builtin(func)));
    }

    pub fn add_builtin_command(&self, name: &str, func: LBuiltin) {
        self.put(name, Value::Command(func));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let env = Environment::new();
        env.put("x", Value::Integer(42));
        assert_eq!(env.get("x"), Value::Integer(42));
    }

    #[test]
    fn test_unbound_symbol_is_an_error_value() {
        let env = Environment::new();
        assert_eq!(
            env.get("missing").to_string(),
            "Error: Unbound symbol 'missing'!"
        );
    }

    #[test]
    fn test_child_shadows_parent() {
        let parent = Environment::new();
        parent.put("x", Value::Integer(1));

        let child = Environment::new();
        child.set_parent(&parent);
        child.put("x", Value::Integer(2));

        assert_eq!(child.get("x"), Value::Integer(2));
        assert_eq!(parent.get("x"), Value::Integer(1));
    }

    #[test]
    fn test_lookup_walks_parent_chain() {
        let root = Environment::new();
        root.put("a", Value::Integer(1));

        let middle = Environment::new();
        middle.set_parent(&root);
        middle.put("b", Value::Integer(2));

        let leaf = Environment::new();
        leaf.set_parent(&middle);

        assert_eq!(leaf.get("a"), Value::Integer(1));
        assert_eq!(leaf.get("b"), Value::Integer(2));
    }

    #[test]
    fn test_def_binds_at_the_root() {
        let root = Environment::new();
        let child = Environment::new();
        child.set_parent(&root);

        child.def("shared", Value::Integer(9));
        assert_eq!(root.get("shared"), Value::Integer(9));
        assert!(child.keys().is_empty());
    }

    #[test]
    fn test_keys_with_prefix() {
        let env = Environment::new();
        env.put("map", Value::Integer(0));
        env.put("max", Value::Integer(0));
        env.put("min", Value::Integer(0));

        let mut matches = env.keys_with_prefix("ma");
        matches.sort();
        assert_eq!(matches, vec!["map".to_string(), "max".to_string()]);
    }

    #[test]
    fn test_deep_clone_isolates_bindings() {
        let env = Environment::new();
        env.put("x", Value::Integer(1));

        let copy = env.deep_clone();
        copy.put("x", Value::Integer(2));

        assert_eq!(env.get("x"), Value::Integer(1));
        assert_eq!(copy.get("x"), Value::Integer(2));
    }

    #[test]
    fn test_get_clones_out() {
        let env = Environment::new();
        env.put("xs", Value::QExpr(vec![Value::Integer(1)]));

        if let Value::QExpr(mut cells) = env.get("xs") {
            cells.push(Value::Integer(2));
        }
        assert_eq!(env.get("xs"), Value::QExpr(vec![Value::Integer(1)]));
    }
}
