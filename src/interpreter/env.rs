use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::interpreter::procedure::NATIVE_NAMES;
use crate::interpreter::{Procedure, RuntimeError, Value};
use crate::runtime_error;

pub const VERSION: f64 = 0.1;

pub struct Env {
    pub parent: Option<Rc<RefCell<Env>>>,
    pub values: HashMap<String, Value>,
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.parent {
            Some(ref parent) => write!(f, "<Env {:?}>", parent.borrow()),
            None => write!(f, "<Env>"),
        }
    }
}

impl Env {
    /// The global environment: constants plus the native operations.
    pub fn new_root() -> Rc<RefCell<Env>> {
        let mut env = Env {
            parent: None,
            values: HashMap::new(),
        };

        env.define("null".into(), Value::Null);
        env.define("true".into(), Value::Boolean(true));
        env.define("false".into(), Value::Boolean(false));
        env.define("VERSION".into(), Value::Float(VERSION));
        for name in NATIVE_NAMES {
            env.define(name.into(), Value::Procedure(Procedure::Native(name)));
        }
        Rc::new(RefCell::new(env))
    }

    pub fn new_child(parent: Rc<RefCell<Env>>) -> Rc<RefCell<Env>> {
        let env = Env {
            parent: Some(parent),
            values: HashMap::new(),
        };
        Rc::new(RefCell::new(env))
    }

    // Define a variable at the current level, overwriting an existing binding here.
    // A binding of the same name further up is shadowed, not touched.
    pub fn define(&mut self, key: String, value: Value) -> Value {
        self.values.insert(key, value.clone());
        value
    }

    pub fn lookup(env_ref: &Rc<RefCell<Env>>, key: &str) -> Result<Value, RuntimeError> {
        let owner = Env::resolve(env_ref, key)?;
        let value = owner.borrow().values.get(key).cloned();
        match value {
            Some(val) => Ok(val),
            None => runtime_error!(NameResolution, "Variable {} is not defined", key),
        }
    }

    // Overwrite the binding in whichever environment owns it; never creates one
    pub fn assign(env_ref: &Rc<RefCell<Env>>, key: &str, value: Value) -> Result<Value, RuntimeError> {
        let owner = Env::resolve(env_ref, key)?;
        owner.borrow_mut().values.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// The environment in the chain starting at `env_ref` that owns `key`.
    pub fn resolve(env_ref: &Rc<RefCell<Env>>, key: &str) -> Result<Rc<RefCell<Env>>, RuntimeError> {
        let env = env_ref.borrow();
        if env.values.contains_key(key) {
            return Ok(env_ref.clone());
        }
        match env.parent {
            Some(ref parent) => Env::resolve(parent, key),
            None => runtime_error!(NameResolution, "Variable {} is not defined", key),
        }
    }
}

#[cfg(test)]
mod test_env {
    use super::*;

    #[test]
    fn test_global_bindings() {
        let root = Env::new_root();
        assert!(Env::lookup(&root, "null").unwrap().equals(&Value::Null));
        assert!(Env::lookup(&root, "true").unwrap().equals(&Value::Boolean(true)));
        assert!(Env::lookup(&root, "false").unwrap().equals(&Value::Boolean(false)));
        assert!(Env::lookup(&root, "VERSION").unwrap().equals(&Value::Float(0.1)));
        for name in NATIVE_NAMES {
            assert!(matches!(Env::lookup(&root, name).unwrap(), Value::Procedure(Procedure::Native(n)) if n == name));
        }
    }

    #[test]
    fn test_define_overwrites_in_same_scope() {
        let root = Env::new_root();
        root.borrow_mut().define("x".into(), Value::Integer(1));
        root.borrow_mut().define("x".into(), Value::Integer(2));
        assert!(Env::lookup(&root, "x").unwrap().equals(&Value::Integer(2)));
    }

    #[test]
    fn test_shadowing_does_not_leak() {
        let root = Env::new_root();
        root.borrow_mut().define("x".into(), Value::Integer(10));
        let child = Env::new_child(root.clone());
        child.borrow_mut().define("x".into(), Value::Integer(20));
        assert!(Env::lookup(&child, "x").unwrap().equals(&Value::Integer(20)));
        assert!(Env::lookup(&root, "x").unwrap().equals(&Value::Integer(10)));
    }

    #[test]
    fn test_assign_writes_owning_scope() {
        let root = Env::new_root();
        root.borrow_mut().define("x".into(), Value::Integer(10));
        let child = Env::new_child(root.clone());
        let grandchild = Env::new_child(child.clone());

        let result = Env::assign(&grandchild, "x", Value::Integer(20)).unwrap();
        assert!(result.equals(&Value::Integer(20)));
        assert!(Env::lookup(&root, "x").unwrap().equals(&Value::Integer(20)));
        assert!(!child.borrow().values.contains_key("x"));
        assert!(!grandchild.borrow().values.contains_key("x"));
    }

    #[test]
    fn test_assign_resolves_like_lookup() {
        let root = Env::new_root();
        root.borrow_mut().define("x".into(), Value::Integer(1));
        let child = Env::new_child(root.clone());
        child.borrow_mut().define("x".into(), Value::Integer(2));
        let grandchild = Env::new_child(child.clone());

        Env::assign(&grandchild, "x", Value::Integer(3)).unwrap();
        assert!(Env::lookup(&grandchild, "x").unwrap().equals(&Value::Integer(3)));
        assert!(Env::lookup(&child, "x").unwrap().equals(&Value::Integer(3)));
        assert!(Env::lookup(&root, "x").unwrap().equals(&Value::Integer(1)));
    }

    #[test]
    fn test_unresolved_names() {
        let root = Env::new_root();
        let child = Env::new_child(root.clone());
        assert!(matches!(Env::lookup(&child, "nope"), Err(RuntimeError::NameResolution(_))));
        assert!(matches!(Env::assign(&child, "nope", Value::Null), Err(RuntimeError::NameResolution(_))));
        assert!(matches!(Env::resolve(&child, "nope"), Err(RuntimeError::NameResolution(_))));
        // assign never creates a binding
        assert!(!root.borrow().values.contains_key("nope"));
    }

    #[test]
    fn test_resolve_finds_owner() {
        let root = Env::new_root();
        let child = Env::new_child(root.clone());
        child.borrow_mut().define("y".into(), Value::Integer(1));
        let grandchild = Env::new_child(child.clone());

        assert!(Rc::ptr_eq(&Env::resolve(&grandchild, "y").unwrap(), &child));
        assert!(Rc::ptr_eq(&Env::resolve(&grandchild, "+").unwrap(), &root));
    }
}
