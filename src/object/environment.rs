use crate::object::Object;
use indexmap::IndexMap;
use std::{cell::RefCell, rc::Rc};

/// Shared handle to a scope. Closures hold one to the scope they were defined in, which keeps
/// that scope alive after the call that created it has returned.
pub type Env = Rc<RefCell<Environment>>;

/// A single scope of bindings with an optional link to the enclosing scope.
#[derive(Default, Debug)]
pub struct Environment {
    store: IndexMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    /// A fresh scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: &Env) -> Self {
        Environment {
            store: IndexMap::new(),
            outer: Some(Rc::clone(outer)),
        }
    }

    pub fn into_env(self) -> Env {
        Rc::new(RefCell::new(self))
    }

    /// Binds `key` in this scope, shadowing any binding in an enclosing one.
    pub fn set(&mut self, key: &str, value: Object) {
        self.store.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<Object> {
        match self.store.get(key) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(key)),
        }
    }

    /// Names bound directly in this scope, in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.store.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use crate::object::Object;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_walks_outwards() {
        let global = Environment::new().into_env();
        global.borrow_mut().set("x", Object::Integer(1));
        global.borrow_mut().set("y", Object::Integer(2));

        let mut local = Environment::new_enclosed(&global);
        local.set("x", Object::Integer(10));

        assert_eq!(local.get("x"), Some(Object::Integer(10)));
        assert_eq!(local.get("y"), Some(Object::Integer(2)));
        assert_eq!(local.get("z"), None);
        assert_eq!(global.borrow().get("x"), Some(Object::Integer(1)));
    }

    #[test]
    fn outer_changes_are_visible() {
        let global = Environment::new().into_env();
        let local = Environment::new_enclosed(&global);

        global.borrow_mut().set("late", Object::Boolean(true));

        assert_eq!(local.get("late"), Some(Object::Boolean(true)));
    }

    #[test]
    fn names_keep_binding_order() {
        let mut env = Environment::new();
        env.set("b", Object::Null);
        env.set("a", Object::Null);
        env.set("b", Object::Integer(3));

        assert_eq!(env.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
