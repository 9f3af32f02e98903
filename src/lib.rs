//! Lox is a small dynamically typed scripting language with first-class
//! functions, lexical closures and single-inheritance classes, executed by a
//! tree-walk interpreter with a hand-written recursive descent parser.
//!
//! Execution is a four stage pipeline. Each stage consumes the previous
//! stage's output and reports its problems through a shared
//! [`Diagnostics`](error::Diagnostics) sink, so one run surfaces as many
//! errors as possible and a failed front end never reaches the back end.
//!
//! ## Scanning
//! The [`scanner`](scanner) turns the source text into a flat list of
//! [`Token`](token::Token)s, ending with an end-of-file marker. It is a
//! small state machine over the character stream with one token of
//! lookahead; lexical problems like an unterminated string or a stray `@`
//! are reported as [`ScanError`](error::ScanError)s and scanning carries on
//! with the next character.
//!
//! ## Parsing
//! The [`parser`](parser) turns the tokens into an abstract syntax tree of
//! [`Expr`](expr::Expr)essions (code that produces a value) and
//! [`Stmt`](stmt::Stmt)s (code that has an effect). It is a recursive
//! descent over the operator-precedence grammar; on a
//! [`ParseError`](error::ParseError) it discards tokens to the next
//! statement boundary and keeps parsing, so several syntax errors surface in
//! one run.
//!
//! ## Resolving
//! The [`resolver`](resolver) is a static pass over the finished tree. For
//! every variable use it records how many scopes separate the use from the
//! binding; the interpreter later walks exactly that many environments
//! instead of searching. The same pass catches the errors that are
//! syntactically fine but semantically wrong, like `return` at the top
//! level or a class inheriting from itself, reported as
//! [`ResolveError`](error::ResolveError)s.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) walks the tree and evaluates it against
//! a chain of [`Environment`](environment::Environment)s, one per lexical
//! scope. Functions capture the environment where they were defined, which
//! is all it takes for closures to work. Type mismatches and other problems
//! only visible with real values in hand are
//! [`RuntimeError`](error::RuntimeError)s: they abort the run but leave the
//! interpreter in a sane state.

use std::fs;
use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::Diagnostics;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The toplevel: owns the interpreter and the diagnostics sink, and runs
/// source through the whole pipeline. Program output goes to the writer
/// handed to [`new`](lox::new), which is standard output in the driver and a
/// buffer in tests.
#[allow(non_camel_case_types)]
pub struct lox<'a> {
    interpreter: Interpreter<'a>,
    diagnostics: Diagnostics,
}

impl<'a> lox<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        lox {
            interpreter: Interpreter::new(output),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Runs a source file end to end and returns the process exit code:
    /// 0 on success, 65 on a compile error, 70 on a runtime error.
    pub fn run_file(&mut self, path: &str) -> i32 {
        let source = fs::read_to_string(path)
            .expect("should have been able to read the file");

        self.run(&source);

        if self.diagnostics.had_error() {
            return 65;
        }
        if self.diagnostics.had_runtime_error() {
            return 70;
        }
        0
    }

    /// Runs an interactive prompt, one line at a time. Every line is a
    /// fresh compile-and-run: interpreter state and error flags are reset
    /// between lines, so a mistake on one line does not leak into the next.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("line editor to initialize");

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(&line);
                    self.interpreter.reset();
                    self.diagnostics.reset();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("error reading line: {error}");
                    break;
                },
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    /// Runs a source string through scan, parse, resolve and interpret,
    /// stopping at the first stage that reports an error.
    fn run(&mut self, source: &str) {
        let tokens = Scanner::new(source, &mut self.diagnostics).scan_tokens();

        if self.diagnostics.had_error() {
            return;
        }

        let statements = Parser::new(tokens, &mut self.diagnostics).parse();

        if self.diagnostics.had_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter, &mut self.diagnostics);
        resolver.resolve(&statements);

        if self.diagnostics.had_error() {
            return;
        }

        self.interpreter.interpret(&statements, &mut self.diagnostics);
    }
}
