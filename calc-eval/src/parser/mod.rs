pub mod ast;
pub mod error;

use ast::{
    Associativity,
    BinOp,
    BinOpKind,
    Binary,
    Call,
    Expr,
    Literal,
    Paren,
    Precedence,
    Symbol,
    Unary,
    UnaryOp,
    UnaryOpKind,
};
use calc_error::{Error, ErrorKind};
use error::{
    ExpectedEof,
    ExpressionTooDeep,
    ExpressionTooLong,
    InvalidAssignment,
    InvalidNumber,
    UnclosedParenthesis,
    UnexpectedEoExpr,
    UnexpectedToken,
};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

impl Precedence {
    /// Returns the next tighter precedence level. Used to parse the right-hand side of
    /// left-associative operators.
    fn tighter(self) -> Precedence {
        match self {
            Self::Any => Self::Compare,
            Self::Compare => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg | Self::Exp => Self::Exp,
        }
    }
}

/// Returns the binary operator a token represents, if any.
fn binary_op(kind: TokenKind) -> Option<BinOpKind> {
    Some(match kind {
        TokenKind::Exp => BinOpKind::Exp,
        TokenKind::Mul => BinOpKind::Mul,
        TokenKind::Div => BinOpKind::Div,
        TokenKind::Mod => BinOpKind::Mod,
        TokenKind::Add => BinOpKind::Add,
        TokenKind::Sub => BinOpKind::Sub,
        TokenKind::Greater => BinOpKind::Greater,
        TokenKind::GreaterEq => BinOpKind::GreaterEq,
        TokenKind::Less => BinOpKind::Less,
        TokenKind::LessEq => BinOpKind::LessEq,
        TokenKind::Eq => BinOpKind::Eq,
        TokenKind::NotEq => BinOpKind::NotEq,
        _ => return None,
    })
}

/// The deepest nesting of parentheses, calls and prefix operators the parser accepts.
pub const MAX_DEPTH: usize = 128;

/// The most binary and postfix operators, implicit multiplication included, in one expression.
pub const MAX_OPERATORS: usize = 256;

/// A precedence-climbing parser for numeric expressions.
///
/// Operators, from loosest to tightest: comparisons, `+ -`, `* / %` and implicit multiplication,
/// prefix `- +`, `^` (right-associative), postfix `!`.
///
/// Nesting and the number of operators are limited by [`MAX_DEPTH`] and [`MAX_OPERATORS`], which
/// bounds the depth of the resulting tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source being parsed.
    source: &'source str,

    /// The non-whitespace tokens of the source.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The current nesting depth.
    depth: usize,

    /// The number of operators parsed so far.
    operators: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: tokenize_complete(source),
            cursor: 0,
            depth: 0,
            operators: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the current token. The cursor is not moved.
    fn peek_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Returns the current token if it has the given kind and starts exactly at `offset`.
    fn adjacent(&self, offset: usize, kind: TokenKind) -> Option<&Token<'source>> {
        self.current_token()
            .filter(|token| token.kind == kind && token.span.start == offset)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an end-of-expression error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEoExpr)),
        }
    }

    /// Parses the entire source as a single expression.
    ///
    /// All tokens must be consumed for parsing to succeed.
    pub fn try_parse_full(&mut self) -> Result<Expr, Vec<Error>> {
        let expr = self.parse_expr(Precedence::Any).map_err(|err| vec![err])?;

        if let Some(token) = self.current_token() {
            let err = match token.kind {
                TokenKind::Assign => Error::new(vec![token.span.clone()], InvalidAssignment),
                _ => Error::new(vec![token.span.start..self.source.len()], ExpectedEof),
            };
            return Err(vec![err]);
        }

        Ok(expr)
    }

    /// Counts an operator at `span`, failing if the expression has too many.
    fn count_operator(&mut self, span: &Range<usize>) -> Result<(), Error> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(Error::new(vec![span.clone()], ExpressionTooLong { max: MAX_OPERATORS }));
        }
        Ok(())
    }

    /// Parses a binary expression whose operators bind at least as tightly as `min`, one nesting
    /// level deeper than the caller.
    fn parse_expr(&mut self, min: Precedence) -> Result<Expr, Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::new(vec![self.span()], ExpressionTooDeep { max: MAX_DEPTH }));
        }

        self.depth += 1;
        let result = self.parse_binary(min);
        self.depth -= 1;
        result
    }

    fn parse_binary(&mut self, min: Precedence) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary()?;

        loop {
            let Some(token) = self.current_token() else {
                break;
            };

            let (op, explicit) = if let Some(kind) = binary_op(token.kind) {
                (BinOp { kind, implicit: false, span: token.span.clone() }, true)
            } else if token.kind.starts_operand() {
                let span = lhs.span().end..token.span.start;
                (BinOp { kind: BinOpKind::Mul, implicit: true, span }, false)
            } else {
                break;
            };

            let precedence = op.kind.precedence();
            if precedence < min {
                break;
            }
            self.count_operator(&op.span)?;
            if explicit {
                self.cursor += 1;
            }

            let rhs_min = match op.kind.associativity() {
                Associativity::Left => precedence.tighter(),
                Associativity::Right => precedence,
            };
            let rhs = self.parse_expr(rhs_min)?;
            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }

    /// Parses a prefix `-` / `+`, or falls through to a postfix expression.
    fn parse_unary(&mut self) -> Result<Expr, Error> {
        let kind = match self.peek_kind() {
            Some(TokenKind::Sub) => UnaryOpKind::Neg,
            Some(TokenKind::Add) => UnaryOpKind::Pos,
            _ => return self.parse_postfix(),
        };

        let token = self.next_token()?;
        let operand = self.parse_expr(Precedence::Neg)?;
        let span = token.span.start..operand.span().end;
        Ok(Expr::Unary(Unary {
            operand: Box::new(operand),
            op: UnaryOp { kind, span: token.span },
            span,
        }))
    }

    /// Parses a primary expression followed by any number of factorial operators.
    fn parse_postfix(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_primary()?;

        while self.peek_kind() == Some(TokenKind::Factorial) {
            let op_span = self.span();
            self.count_operator(&op_span)?;
            self.cursor += 1;
            let span = expr.span().start..op_span.end;
            expr = Expr::Unary(Unary {
                operand: Box::new(expr),
                op: UnaryOp { kind: UnaryOpKind::Factorial, span: op_span },
                span,
            });
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, Error> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Dot => self.parse_number(token),
            TokenKind::Name => {
                let name = Symbol {
                    name: token.lexeme.to_string(),
                    span: token.span,
                };
                if self.peek_kind() == Some(TokenKind::OpenParen) {
                    self.parse_call(name)
                } else {
                    Ok(Expr::Symbol(name))
                }
            },
            TokenKind::OpenParen => {
                let expr = self.parse_expr(Precedence::Any)?;
                let end = self.expect_close(&token.span)?;
                Ok(Expr::Paren(Paren {
                    expr: Box::new(expr),
                    span: token.span.start..end,
                }))
            },
            TokenKind::Assign => Err(Error::new(vec![token.span], InvalidAssignment)),
            _ => Err(Error::new(vec![token.span], UnexpectedToken {
                found: token.lexeme.to_string(),
            })),
        }
    }

    /// Consumes the closing parenthesis matching the opening parenthesis at `open`, returning the
    /// end of its span.
    fn expect_close(&mut self, open: &Range<usize>) -> Result<usize, Error> {
        match self.current_token() {
            Some(token) if token.kind == TokenKind::CloseParen => {
                let end = token.span.end;
                self.cursor += 1;
                Ok(end)
            },
            Some(token) => Err(Error::new(vec![token.span.clone()], UnexpectedToken {
                found: token.lexeme.to_string(),
            })),
            None => Err(Error::new(vec![open.clone()], UnclosedParenthesis)),
        }
    }

    /// Parses the argument list of a call to the function `name`. The cursor is on the opening
    /// parenthesis.
    fn parse_call(&mut self, name: Symbol) -> Result<Expr, Error> {
        let open = self.next_token()?;
        let mut args = Vec::new();

        if self.peek_kind() != Some(TokenKind::CloseParen) {
            loop {
                args.push(self.parse_expr(Precedence::Any)?);
                if self.peek_kind() == Some(TokenKind::Comma) {
                    self.cursor += 1;
                } else {
                    break;
                }
            }
        }

        let end = self.expect_close(&open.span)?;
        let span = name.span.start..end;
        Ok(Expr::Call(Call { name, args, span }))
    }

    /// Parses a number literal starting at `first`, which is either an integer or a dot.
    ///
    /// The fractional part and an exponent such as `e+21` are only part of the literal if they
    /// directly touch the previous part, so `2 e` is still `2` times `e`.
    fn parse_number(&mut self, first: Token<'source>) -> Result<Expr, Error> {
        let start = first.span.start;
        let mut end = first.span.end;
        let mut text = String::new();

        if first.kind == TokenKind::Int {
            text.push_str(first.lexeme);
            if self.adjacent(end, TokenKind::Dot).is_some() {
                self.cursor += 1;
                end += 1;
                if let Some(frac) = self.adjacent(end, TokenKind::Int) {
                    text.push('.');
                    text.push_str(frac.lexeme);
                    end = frac.span.end;
                    self.cursor += 1;
                }
            }
        } else {
            let Some(frac) = self.adjacent(end, TokenKind::Int) else {
                return Err(Error::new(vec![first.span], UnexpectedToken {
                    found: first.lexeme.to_string(),
                }));
            };
            text.push_str("0.");
            text.push_str(frac.lexeme);
            end = frac.span.end;
            self.cursor += 1;
        }

        if let Some((exponent, exp_end)) = self.parse_exponent(end) {
            text.push_str(&exponent);
            end = exp_end;
        }

        let value = text.parse::<f64>()
            .map_err(|_| Error::new(vec![start..end], InvalidNumber { lexeme: text.clone() }))?;
        Ok(Expr::Literal(Literal { value, span: start..end }))
    }

    /// Tries to parse an exponent suffix touching `offset`, either a name like `e5` or the token
    /// sequence `e`, sign, digits. Returns the exponent text and where it ends, advancing the
    /// cursor only on success.
    fn parse_exponent(&mut self, offset: usize) -> Option<(String, usize)> {
        let marker = self.adjacent(offset, TokenKind::Name)?;
        let (e, digits) = marker.lexeme.split_at(1);
        if !e.eq_ignore_ascii_case("e") {
            return None;
        }

        if !digits.is_empty() {
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let result = (format!("e{}", digits), marker.span.end);
            self.cursor += 1;
            return Some(result);
        }

        let sign = self.tokens.get(self.cursor + 1)
            .filter(|token| marker.touches(token))
            .filter(|token| matches!(token.kind, TokenKind::Add | TokenKind::Sub))?;
        let digits = self.tokens.get(self.cursor + 2)
            .filter(|token| sign.touches(token) && token.kind == TokenKind::Int)?;

        let result = (format!("e{}{}", sign.lexeme, digits.lexeme), digits.span.end);
        self.cursor += 3;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full().unwrap()
    }

    fn literal(value: f64, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal { value, span }))
    }

    fn symbol(name: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Symbol(Symbol { name: name.to_string(), span }))
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(
            parse("1-2-3"),
            Expr::Binary(Binary {
                lhs: Box::new(Expr::Binary(Binary {
                    lhs: literal(1.0, 0..1),
                    op: BinOp { kind: BinOpKind::Sub, implicit: false, span: 1..2 },
                    rhs: literal(2.0, 2..3),
                    span: 0..3,
                })),
                op: BinOp { kind: BinOpKind::Sub, implicit: false, span: 3..4 },
                rhs: literal(3.0, 4..5),
                span: 0..5,
            }),
        );

        assert_eq!(
            parse("2^3^2"),
            Expr::Binary(Binary {
                lhs: literal(2.0, 0..1),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 1..2 },
                rhs: Box::new(Expr::Binary(Binary {
                    lhs: literal(3.0, 2..3),
                    op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 3..4 },
                    rhs: literal(2.0, 4..5),
                    span: 2..5,
                })),
                span: 0..5,
            }),
        );
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(
            parse("2x"),
            Expr::Binary(Binary {
                lhs: literal(2.0, 0..1),
                op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
                rhs: symbol("x", 1..2),
                span: 0..2,
            }),
        );
    }

    #[test]
    fn negation_binds_looser_than_power() {
        assert_eq!(
            parse("-x^2"),
            Expr::Unary(Unary {
                operand: Box::new(Expr::Binary(Binary {
                    lhs: symbol("x", 1..2),
                    op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                    rhs: literal(2.0, 3..4),
                    span: 1..4,
                })),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
                span: 0..4,
            }),
        );
    }

    #[test]
    fn number_literals() {
        let value = |source: &str| match parse(source) {
            Expr::Literal(lit) => lit.value,
            other => panic!("expected literal, got {:?}", other),
        };

        assert_eq!(value("12"), 12.0);
        assert_eq!(value("1.25"), 1.25);
        assert_eq!(value(".5"), 0.5);
        assert_eq!(value("2."), 2.0);
        assert_eq!(value("1e3"), 1000.0);
        assert_eq!(value("1.5e+21"), 1.5e21);
        assert_eq!(value("2E-3"), 0.002);
    }

    #[test]
    fn detached_e_is_a_symbol() {
        assert!(matches!(parse("2 e"), Expr::Binary(Binary { op: BinOp { implicit: true, .. }, .. })));
        assert!(matches!(parse("2e"), Expr::Binary(Binary { op: BinOp { implicit: true, .. }, .. })));
    }

    #[test]
    fn calls() {
        match parse("log(8, 2)") {
            Expr::Call(call) => {
                assert_eq!(call.name.name, "log");
                assert_eq!(call.args.len(), 2);
                assert_eq!(call.span, 0..9);
            },
            other => panic!("expected call, got {:?}", other),
        }

        match parse("rand()") {
            Expr::Call(call) => assert!(call.args.is_empty()),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn errors() {
        let message = |source: &str| {
            let errs = Parser::new(source).try_parse_full().unwrap_err();
            errs[0].to_string()
        };

        assert_eq!(message("(1+2"), "missing closing parenthesis");
        assert_eq!(message("1+"), "unexpected end of expression");
        assert_eq!(message("2)"), "expected end of expression");
        assert_eq!(message("ab=3"), "unexpected assignment");
        assert_eq!(message("2 $ 3"), "expected end of expression");
        assert_eq!(message("*3"), "unexpected `*`");
    }

    #[test]
    fn nesting_limit() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let message = |source: &str| Parser::new(source).try_parse_full().unwrap_err()[0].to_string();

        assert!(Parser::new(&nested(MAX_DEPTH - 1)).try_parse_full().is_ok());
        assert_eq!(message(&nested(MAX_DEPTH)), "expression is nested too deeply");
        assert_eq!(message(&nested(20_000)), "expression is nested too deeply");
        assert_eq!(message(&format!("{}1", "-".repeat(20_000))), "expression is nested too deeply");
        assert_eq!(message(&format!("{}x)", "sin(".repeat(5_000))), "expression is nested too deeply");
        assert_eq!(message(&"2^".repeat(5_000)), "expression is nested too deeply");
    }

    #[test]
    fn operator_limit() {
        let sum = |terms: usize| vec!["1"; terms].join("+");
        let message = |source: &str| Parser::new(source).try_parse_full().unwrap_err()[0].to_string();

        assert!(Parser::new(&sum(MAX_OPERATORS + 1)).try_parse_full().is_ok());
        assert_eq!(message(&sum(MAX_OPERATORS + 2)), "expression is too long");
        assert_eq!(message(&format!("3{}", "!".repeat(20_000))), "expression is too long");
        assert_eq!(message(&"2 ".repeat(20_000)), "expression is too long");
    }
}
