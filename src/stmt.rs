use crate::expr::{Expr, VariableData};
use crate::token::Token;

/// Represents a block statement's data (`{ ... }`).
#[derive(Debug, PartialEq, Clone)]
pub struct BlockData {
    pub statements: Vec<Stmt>,
}

/// Represents a class declaration's data. The superclass, when present, is
/// the variable reference after `<`; methods are plain function
/// declarations.
#[derive(Debug, PartialEq, Clone)]
pub struct ClassData {
    pub name: Token,
    pub superclass: Option<VariableData>,
    pub methods: Vec<FunctionData>,
}

/// Represents an expression statement's data.
#[derive(Debug, PartialEq, Clone)]
pub struct ExpressionData {
    pub expr: Expr,
}

/// Represents a function declaration's data. Shared between `fun`
/// declarations and class methods.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionData {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// Represents an if statement's data.
#[derive(Debug, PartialEq, Clone)]
pub struct IfData {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// Represents a print statement's data.
#[derive(Debug, PartialEq, Clone)]
pub struct PrintData {
    pub expr: Expr,
}

/// Represents a return statement's data. The keyword token is kept so both
/// the resolver and the runtime can name the line.
#[derive(Debug, PartialEq, Clone)]
pub struct ReturnData {
    pub keyword: Token,
    pub value: Option<Expr>,
}

/// Represents a variable declaration's data.
#[derive(Debug, PartialEq, Clone)]
pub struct VarData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

/// Represents a while statement's data. `for` loops desugar to this at
/// parse time and never reach the back end.
#[derive(Debug, PartialEq, Clone)]
pub struct WhileData {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// Represents a statement in the language.
#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Block(BlockData),
    Class(ClassData),
    Expression(ExpressionData),
    Function(FunctionData),
    If(IfData),
    Print(PrintData),
    Return(ReturnData),
    Var(VarData),
    While(WhileData),
}
