use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A single lexical scope: a name to value map with a link to the scope it
/// is nested in. The global environment is the one scope with no enclosing
/// link.
///
/// Environments are shared through `Rc<RefCell<..>>` because a closure holds
/// on to the environment it was defined in; mutations through the closure
/// must be visible to every other closure sharing that scope.
#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    variables: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment {
            enclosing,
            variables: HashMap::new(),
        }
    }

    /// Binds a name in this scope. Redefinition is permitted; `nil` is a
    /// valid bound value, distinct from the name being absent.
    pub fn define(&mut self, name: &str, value: Object) {
        self.variables.insert(name.to_string(), value);
    }

    /// Walks the enclosing chain exactly `distance` steps from this scope.
    /// The resolver guarantees the chain is deep enough wherever it recorded
    /// a distance, so a missing link is a bug worth crashing on.
    fn ancestor(&self, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = self.enclosing.clone()
            .unwrap_or_else(|| panic!("enclosing environment to exist at depth 1"));

        for i in 1..distance {
            let parent = environment.borrow().enclosing.clone()
                .unwrap_or_else(|| panic!("enclosing environment to exist at depth {}", i + 1));
            environment = parent;
        }

        environment
    }

    /// Returns the value bound to the name, searching outward through the
    /// enclosing scopes.
    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(variable) = self.variables.get(&name.lexeme) {
            return Ok(variable.clone());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }

        Err(undefined_variable(name))
    }

    /// Returns the value bound to the name exactly `distance` scopes out,
    /// without searching any further.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        if distance > 0 {
            match self.ancestor(distance).borrow().variables.get(&name.lexeme) {
                Some(variable) => Ok(variable.clone()),
                None => Err(undefined_variable(name)),
            }
        } else {
            match self.variables.get(&name.lexeme) {
                Some(variable) => Ok(variable.clone()),
                None => Err(undefined_variable(name)),
            }
        }
    }

    /// Updates an existing binding, searching outward through the enclosing
    /// scopes. Unlike [`define`](Environment::define), assignment to a name
    /// that is bound nowhere is an error.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.variables.contains_key(&name.lexeme) {
            self.variables.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }

        Err(undefined_variable(name))
    }

    /// Updates the binding exactly `distance` scopes out.
    pub fn assign_at(&mut self, distance: usize, name: &Token, value: Object) {
        if distance > 0 {
            self.ancestor(distance).borrow_mut().variables.insert(name.lexeme.clone(), value);
        } else {
            self.variables.insert(name.lexeme.clone(), value);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

fn undefined_variable(name: &Token) -> RuntimeError {
    RuntimeError {
        token: name.clone(),
        message: format!("Undefined variable '{}'.", name.lexeme),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::literal::Literal;

    fn nested() -> (Rc<RefCell<Environment>>, Rc<RefCell<Environment>>) {
        let global = Rc::new(RefCell::new(Environment::default()));
        let local = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&global)))));
        (global, local)
    }

    #[test]
    fn define_then_get() {
        let mut environment = Environment::default();
        environment.define("a", Object::from(1.0));
        assert_eq!(environment.get(&Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn nil_binding_is_distinct_from_absence() {
        let mut environment = Environment::default();
        environment.define("a", Object::from(Literal::Nil));
        assert!(environment.get(&Token::from("a")).is_ok());
        assert!(environment.get(&Token::from("b")).is_err());
    }

    #[test]
    fn get_searches_enclosing_scopes() {
        let (global, local) = nested();
        global.borrow_mut().define("a", Object::from(1.0));
        assert_eq!(local.borrow().get(&Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let (global, local) = nested();
        global.borrow_mut().define("a", Object::from(1.0));
        local.borrow_mut().define("a", Object::from(2.0));
        assert_eq!(local.borrow().get(&Token::from("a")).unwrap(), Object::from(2.0));
        assert_eq!(global.borrow().get(&Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn assign_updates_the_scope_holding_the_name() {
        let (global, local) = nested();
        global.borrow_mut().define("a", Object::from(1.0));
        local.borrow_mut().assign(&Token::from("a"), Object::from(2.0)).unwrap();
        assert_eq!(global.borrow().get(&Token::from("a")).unwrap(), Object::from(2.0));
    }

    #[test]
    fn assign_to_undefined_name_fails() {
        let mut environment = Environment::default();
        assert!(environment.assign(&Token::from("a"), Object::from(1.0)).is_err());
    }

    #[test]
    fn get_at_skips_shadowing_scopes() {
        let (global, local) = nested();
        global.borrow_mut().define("a", Object::from(1.0));
        local.borrow_mut().define("a", Object::from(2.0));
        assert_eq!(local.borrow().get_at(0, &Token::from("a")).unwrap(), Object::from(2.0));
        assert_eq!(local.borrow().get_at(1, &Token::from("a")).unwrap(), Object::from(1.0));
    }

    #[test]
    fn assign_at_targets_one_scope_only() {
        let (global, local) = nested();
        global.borrow_mut().define("a", Object::from(1.0));
        local.borrow_mut().define("a", Object::from(2.0));
        local.borrow_mut().assign_at(1, &Token::from("a"), Object::from(3.0));
        assert_eq!(global.borrow().get(&Token::from("a")).unwrap(), Object::from(3.0));
        assert_eq!(local.borrow().get_at(0, &Token::from("a")).unwrap(), Object::from(2.0));
    }
}
