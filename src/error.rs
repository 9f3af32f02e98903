use crate::object::Object;
use crate::token::{Token, Type};

/// Tracks whether any error has been reported during a run.
///
/// One value is threaded through the whole pipeline so the driver can decide
/// the exit code (65 for compile errors, 70 for runtime errors) and so the
/// interpreter is never started after the front end has failed.
#[derive(Debug, Default)]
pub struct Diagnostics {
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Returns if a scan, parse or resolve error has been reported.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Returns if a runtime error has been reported.
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears both flags. The prompt calls this between lines so one bad
    /// line does not poison the next.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message to standard error and flips the matching
    /// flag on the diagnostics sink.
    fn throw(&self, diagnostics: &mut Diagnostics);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self, diagnostics: &mut Diagnostics) {
        eprintln!("[line {}] Error: {}", self.line, self.message);
        diagnostics.had_error = true;
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self, diagnostics: &mut Diagnostics) {
        report_at_token(&self.token, &self.message);
        diagnostics.had_error = true;
    }
}

/// Represents an error that occurs during resolution. These are
/// syntactically valid programs that are semantically invalid, like reading
/// a local variable in its own initializer.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self, diagnostics: &mut Diagnostics) {
        report_at_token(&self.token, &self.message);
        diagnostics.had_error = true;
    }
}

/// Represents an error that occurs during runtime. Carries the token whose
/// evaluation failed so the report can name the line.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self, diagnostics: &mut Diagnostics) {
        eprintln!("{}\n[line {}]", self.message, self.token.line);
        diagnostics.had_runtime_error = true;
    }
}

fn report_at_token(token: &Token, message: &str) {
    if token.r#type == Type::EOF {
        eprintln!("[line {}] Error at end: {}", token.line, message);
    } else {
        eprintln!("[line {}] Error at '{}': {}", token.line, token.lexeme, message);
    }
}

/// Non-local control transfer out of a statement.
///
/// Both a `return` statement and a runtime error have to unwind through any
/// number of nested blocks back to the nearest call boundary. Statement
/// execution propagates this with `?`; a function call catches `Return` and
/// turns it into the call's value, while `Error` keeps travelling until the
/// interpreter's top level reports it.
#[derive(Debug)]
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
