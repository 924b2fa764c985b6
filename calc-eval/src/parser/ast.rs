//! The abstract syntax tree produced by the [`Parser`](super::Parser).

use std::{fmt, ops::Range};

/// Precedence levels of the operators, from loosest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Loosest precedence, used to start parsing a full expression.
    Any,

    /// `==`, `!=`, `<`, `<=`, `>`, `>=`.
    Compare,

    /// `+`, `-`.
    Term,

    /// `*`, `/`, `%` and implicit multiplication.
    Factor,

    /// Prefix `-` and `+`.
    Neg,

    /// `^`.
    Exp,
}

/// Associativity of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Neg,
    Pos,
    Factorial,
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Eq,
    NotEq,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div | Self::Mod => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
            Self::Greater | Self::GreaterEq | Self::Less | Self::LessEq
                | Self::Eq | Self::NotEq => Precedence::Compare,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Eq => "==",
            Self::NotEq => "!=",
        };
        write!(f, "{}", symbol)
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// Whether the operator was implicitly inserted by the parser, as in `2x`.
    pub implicit: bool,

    /// The region of the source code that this operator was parsed from. For implicit
    /// multiplication, this is the empty region between the two operands.
    pub span: Range<usize>,
}

/// A number literal, such as `2`, `.5` or `1.5e+21`.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: f64,
    pub span: Range<usize>,
}

/// A reference to a named value, such as `pi` or `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub span: Range<usize>,
}

/// A function call, such as `log(8, 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the called function.
    pub name: Symbol,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code covering the whole call, including the parentheses.
    pub span: Range<usize>,
}

/// An expression surrounded by parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    pub expr: Box<Expr>,
    pub span: Range<usize>,
}

/// A unary expression, such as `-x` or `5!`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operand: Box<Expr>,
    pub op: UnaryOp,
    pub span: Range<usize>,
}

/// A binary expression, such as `1 + 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,
    pub span: Range<usize>,
}

/// Any expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Symbol(Symbol),
    Call(Call),
    Paren(Paren),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Literal(lit) => lit.span.clone(),
            Self::Symbol(sym) => sym.span.clone(),
            Self::Call(call) => call.span.clone(),
            Self::Paren(paren) => paren.span.clone(),
            Self::Unary(unary) => unary.span.clone(),
            Self::Binary(binary) => binary.span.clone(),
        }
    }

    /// Returns true if the expression refers to a symbol with the given name anywhere in its
    /// tree. Function names are not symbols.
    pub fn references(&self, name: &str) -> bool {
        match self {
            Self::Literal(_) => false,
            Self::Symbol(sym) => sym.name == name,
            Self::Call(call) => call.args.iter().any(|arg| arg.references(name)),
            Self::Paren(paren) => paren.expr.references(name),
            Self::Unary(unary) => unary.operand.references(name),
            Self::Binary(binary) => binary.lhs.references(name) || binary.rhs.references(name),
        }
    }
}
