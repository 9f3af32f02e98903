use std::collections::HashMap;
use std::mem;

use crate::error::{Diagnostics, Error, ResolveError};
use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::stmt::{ClassData, FunctionData, Stmt};
use crate::token::Token;

/// What kind of function body is being resolved, so `return` statements can
/// be checked where they appear.
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// What kind of class body is being resolved, so `this` and `super` can be
/// checked where they appear.
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Static analysis pass between parsing and interpretation.
///
/// Walks the whole AST once, tracking a stack of scopes. For every variable
/// use it records, through the interpreter, how many scopes out the binding
/// lives; names not found in any tracked scope are left to runtime global
/// lookup. The same walk reports the semantic errors that are invisible to
/// the parser: reading a local in its own initializer, redeclaring a local,
/// `return` outside a function, `this` outside a class, a class inheriting
/// from itself.
///
/// Each scope maps a name to whether its initializer has finished resolving.
/// The two-step declare/define split is what catches `var a = a;`.
pub struct Resolver<'i, 'a> {
    interpreter: &'i mut Interpreter<'a>,
    diagnostics: &'i mut Diagnostics,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'i, 'a> Resolver<'i, 'a> {
    pub fn new(interpreter: &'i mut Interpreter<'a>, diagnostics: &'i mut Diagnostics) -> Self {
        Resolver {
            interpreter,
            diagnostics,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Marks the name as existing in the innermost scope, but not yet
    /// usable. Declarations in the global scope are not tracked.
    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: String::from("Already a variable with this name in this scope."),
            }.throw(self.diagnostics);
        }

        scope.insert(name.lexeme.clone(), false);
    }

    /// Marks the name as fully initialized and usable.
    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    /// Finds the innermost scope holding the name and records its distance
    /// for the expression. No hit means the name is global (or undefined,
    /// which only runtime can tell).
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, depth);
                return;
            }
        }
    }

    /// Resolves a function or method body in its own scope, with the
    /// parameters pre-defined.
    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            },

            Stmt::Class(data) => self.resolve_class(data),

            Stmt::Expression(data) => self.resolve_expr(&data.expr),

            Stmt::Function(data) => {
                // Defined before the body resolves, so the function can
                // recurse.
                self.declare(&data.name);
                self.define(&data.name);

                self.resolve_function(data, FunctionType::Function);
            },

            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            },

            Stmt::Print(data) => self.resolve_expr(&data.expr),

            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: String::from("Can't return from top-level code."),
                    }.throw(self.diagnostics);
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: String::from("Can't return a value from an initializer."),
                        }.throw(self.diagnostics);
                    }

                    self.resolve_expr(value);
                }
            },

            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            },

            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            },
        }
    }

    fn resolve_class(&mut self, data: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            if data.name.lexeme == superclass.name.lexeme {
                ResolveError {
                    token: superclass.name.clone(),
                    message: String::from("A class can't inherit from itself."),
                }.throw(self.diagnostics);
            }

            self.current_class = ClassType::Subclass;
            self.resolve_local(superclass.id, &superclass.name);

            // The methods of a subclass close over a scope holding `super`.
            self.begin_scope();
            self.scopes
                .last_mut()
                .expect("scope stack to be non-empty")
                .insert(String::from("super"), true);
        }

        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to be non-empty")
            .insert(String::from("this"), true);

        for method in &data.methods {
            let declaration = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, declaration);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(data.id, &data.name);
            },

            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },

            Expr::Call(data) => {
                self.resolve_expr(&data.callee);
                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            },

            // Property names are looked up dynamically; only the object
            // expression resolves statically.
            Expr::Get(data) => self.resolve_expr(&data.object),

            Expr::Grouping(data) => self.resolve_expr(&data.expr),

            Expr::Literal(_) => {},

            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },

            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            },

            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => {},
                    ClassType::None => {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: String::from("Can't use 'super' outside of a class."),
                        }.throw(self.diagnostics);
                    },
                    ClassType::Class => {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: String::from("Can't use 'super' in a class with no superclass."),
                        }.throw(self.diagnostics);
                    },
                }

                self.resolve_local(data.id, &data.keyword);
            },

            Expr::This(data) => {
                if let ClassType::None = self.current_class {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: String::from("Can't use 'this' outside of a class."),
                    }.throw(self.diagnostics);
                    return;
                }

                self.resolve_local(data.id, &data.keyword);
            },

            Expr::Unary(data) => self.resolve_expr(&data.expr),

            Expr::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&data.name.lexeme) == Some(&false) {
                        ResolveError {
                            token: data.name.clone(),
                            message: String::from("Can't read local variable in its own initializer."),
                        }.throw(self.diagnostics);
                    }
                }

                self.resolve_local(data.id, &data.name);
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    /// Resolves a program and returns whether a compile error was reported.
    fn resolve(source: &str) -> bool {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source, &mut diagnostics).scan_tokens();
        let statements = Parser::new(tokens, &mut diagnostics).parse();
        assert!(!diagnostics.had_error(), "unexpected parse error in {source:?}");

        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        Resolver::new(&mut interpreter, &mut diagnostics).resolve(&statements);

        diagnostics.had_error()
    }

    #[test]
    fn local_variable_in_its_own_initializer() {
        assert!(resolve("{ var a = a; }"));
    }

    #[test]
    fn global_self_reference_is_left_to_runtime() {
        assert!(!resolve("var a = a;"));
    }

    #[test]
    fn duplicate_local_declaration() {
        assert!(resolve("{ var a = 1; var a = 2; }"));
    }

    #[test]
    fn duplicate_global_declaration_is_allowed() {
        assert!(!resolve("var a = 1; var a = 2;"));
    }

    #[test]
    fn return_at_top_level() {
        assert!(resolve("return 1;"));
    }

    #[test]
    fn return_with_value_from_initializer() {
        assert!(resolve("class Foo { init() { return 1; } }"));
    }

    #[test]
    fn bare_return_from_initializer_is_allowed() {
        assert!(!resolve("class Foo { init() { return; } }"));
    }

    #[test]
    fn class_inheriting_from_itself() {
        assert!(resolve("class Foo < Foo {}"));
    }

    #[test]
    fn this_outside_of_a_class() {
        assert!(resolve("print this;"));
    }

    #[test]
    fn super_outside_of_a_class() {
        assert!(resolve("print super.foo;"));
    }

    #[test]
    fn super_without_a_superclass() {
        assert!(resolve("class Foo { bar() { return super.bar(); } }"));
    }
}
