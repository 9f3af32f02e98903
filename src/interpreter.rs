use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Diagnostics, Error, RuntimeError, Unwind};
use crate::expr::{Expr, ExprId};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{ClassData, Stmt};
use crate::token::{Token, Type};

/// Walks the AST and evaluates it.
///
/// Holds the mutable execution state: the global scope, the current
/// environment (swapped on block entry and call, restored on every exit
/// path), and the resolver's side table mapping expression identities to
/// scope depths. `print` output goes through the injected writer so tests
/// can capture it.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Self::global_environment();

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// A fresh global scope with the native bindings installed.
    fn global_environment() -> Rc<RefCell<Environment>> {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::globals() {
            let name = native.name;
            globals.borrow_mut().define(name, Object::from(native));
        }

        globals
    }

    /// Discards all accumulated state. The prompt uses this to give every
    /// line a fresh compile-and-run.
    pub fn reset(&mut self) {
        self.globals = Self::global_environment();
        self.environment = Rc::clone(&self.globals);
        self.locals.clear();
    }

    /// Records how many scopes out the given expression's name lives.
    /// Called by the resolver; expressions it never calls this for are
    /// globals.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Executes the statements in order. A runtime error is reported and
    /// stops execution; the remaining statements do not run.
    pub fn interpret(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {},
                Err(Unwind::Error(error)) => {
                    error.throw(diagnostics);
                    return;
                },
                // The resolver rejects top-level returns before we get here.
                Err(Unwind::Return(_)) => unreachable!("return outside of a function"),
            }
        }
    }

    /// Executes the statements inside the given environment, restoring the
    /// previous one on every exit path, including returns and errors.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        match stmt {
            Stmt::Block(data) => {
                let environment = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
            },

            Stmt::Class(data) => self.class_declaration(data),

            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(())
            },

            Stmt::Function(data) => {
                let function = Function::new(data, Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
                Ok(())
            },

            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.as_bool() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },

            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                writeln!(self.output, "{value}").expect("program output to be writable");
                Ok(())
            },

            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::from(Literal::Nil),
                };

                Err(Unwind::Return(value))
            },

            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::from(Literal::Nil),
                };

                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(())
            },

            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.as_bool() {
                    self.execute(&data.body)?;
                }

                Ok(())
            },
        }
    }

    /// Executes a class declaration. The name is defined up front so the
    /// methods can refer to the class itself; when there is a superclass,
    /// the methods additionally close over a scope holding `super`.
    fn class_declaration(&mut self, data: &ClassData) -> Result<(), Unwind> {
        let superclass = match &data.superclass {
            Some(variable) => match self.look_up_variable(&variable.name, variable.id)? {
                Object::Class(class) => Some(class),
                _ => {
                    return Err(Unwind::Error(RuntimeError {
                        token: variable.name.clone(),
                        message: String::from("Superclass must be a class."),
                    }));
                },
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        let enclosing = if let Some(superclass) = &superclass {
            let enclosing = Rc::clone(&self.environment);
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Object::from(Rc::clone(superclass)));
            self.environment = Rc::new(RefCell::new(environment));
            Some(enclosing)
        } else {
            None
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(method, Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);

        if let Some(enclosing) = enclosing {
            self.environment = enclosing;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;

                match self.locals.get(&data.id) {
                    Some(distance) => {
                        self.environment.borrow_mut().assign_at(*distance, &data.name, value.clone());
                    },
                    None => {
                        self.globals.borrow_mut().assign(&data.name, value.clone())?;
                    },
                }

                // Assignment is an expression; it produces the assigned value.
                Ok(value)
            },

            Expr::Binary(data) => {
                let left = self.evaluate(&data.left)?;
                let right = self.evaluate(&data.right)?;

                match data.operator.r#type {
                    Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                        token: data.operator.clone(),
                        message: String::from("Operands must be two numbers or two strings."),
                    }),
                    Type::Minus => (left - right).ok_or_else(|| numbers_error(&data.operator)),
                    Type::Slash => (left / right).ok_or_else(|| numbers_error(&data.operator)),
                    Type::Star => (left * right).ok_or_else(|| numbers_error(&data.operator)),
                    Type::Greater
                    | Type::GreaterEqual
                    | Type::Less
                    | Type::LessEqual => comparison(&data.operator, left, right),
                    Type::EqualEqual => Ok(Object::from(left == right)),
                    Type::BangEqual => Ok(Object::from(left != right)),
                    _ => unreachable!("not a binary operator: {}", data.operator),
                }
            },

            Expr::Call(data) => {
                let callee = self.evaluate(&data.callee)?;

                let mut arguments = Vec::with_capacity(data.arguments.len());
                for argument in &data.arguments {
                    arguments.push(self.evaluate(argument)?);
                }

                let callable: &dyn Callable = match &callee {
                    Object::Function(function) => function,
                    Object::NativeFunction(function) => function,
                    Object::Class(class) => class,
                    _ => {
                        return Err(RuntimeError {
                            token: data.paren.clone(),
                            message: String::from("Can only call functions and classes."),
                        });
                    },
                };

                if arguments.len() != callable.arity() {
                    return Err(RuntimeError {
                        token: data.paren.clone(),
                        message: format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            arguments.len(),
                        ),
                    });
                }

                callable.call(self, arguments)
            },

            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;

                match &object {
                    Object::Instance(instance) => instance.borrow().get(&data.name, &object),
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: String::from("Only instances have properties."),
                    }),
                }
            },

            Expr::Grouping(data) => self.evaluate(&data.expr),

            Expr::Literal(literal) => Ok(Object::from(literal.clone())),

            Expr::Logical(data) => {
                let left = self.evaluate(&data.left)?;

                // Short-circuit: the left operand itself is the result when
                // it decides the outcome.
                match data.operator.r#type {
                    Type::Or if left.as_bool() => Ok(left),
                    Type::And if !left.as_bool() => Ok(left),
                    _ => self.evaluate(&data.right),
                }
            },

            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;

                let Object::Instance(instance) = object else {
                    return Err(RuntimeError {
                        token: data.name.clone(),
                        message: String::from("Only instances have fields."),
                    });
                };

                let value = self.evaluate(&data.value)?;
                instance.borrow_mut().set(&data.name, value.clone());
                Ok(value)
            },

            Expr::Super(data) => {
                let Some(distance) = self.locals.get(&data.id).copied() else {
                    return Err(RuntimeError {
                        token: data.keyword.clone(),
                        message: String::from("Can't use 'super' outside of a class."),
                    });
                };

                let superclass = self.environment.borrow().get_at(distance, &Token::from("super"))?;
                let Object::Class(superclass) = superclass else {
                    unreachable!("'super' is always bound to a class");
                };

                // `this` lives one scope inside the one holding `super`.
                let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

                let method = superclass.borrow().find_method(&data.method.lexeme)
                    .ok_or_else(|| RuntimeError {
                        token: data.method.clone(),
                        message: format!("Undefined property '{}'.", data.method.lexeme),
                    })?;

                Ok(Object::from(method.bind(object)))
            },

            Expr::This(data) => self.look_up_variable(&data.keyword, data.id),

            Expr::Unary(data) => {
                let right = self.evaluate(&data.expr)?;

                match data.operator.r#type {
                    Type::Bang => Ok(Object::from(!right.as_bool())),
                    Type::Minus => (-right).ok_or_else(|| RuntimeError {
                        token: data.operator.clone(),
                        message: String::from("Operand must be a number."),
                    }),
                    _ => unreachable!("not a unary operator: {}", data.operator),
                }
            },

            Expr::Variable(data) => self.look_up_variable(&data.name, data.id),
        }
    }

    /// Reads a variable through the resolver's table: a recorded depth pins
    /// the exact scope, anything unrecorded is a global access.
    fn look_up_variable(&self, name: &Token, id: ExprId) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

fn numbers_error(operator: &Token) -> RuntimeError {
    RuntimeError {
        token: operator.clone(),
        message: String::from("Operands must be numbers."),
    }
}

fn comparison(operator: &Token, left: Object, right: Object) -> Result<Object, RuntimeError> {
    let (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) =
        (&left, &right)
    else {
        return Err(numbers_error(operator));
    };

    let result = match operator.r#type {
        Type::Greater => left > right,
        Type::GreaterEqual => left >= right,
        Type::Less => left < right,
        Type::LessEqual => left <= right,
        _ => unreachable!("not a comparison operator: {}", operator),
    };

    Ok(Object::from(result))
}
