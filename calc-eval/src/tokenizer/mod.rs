pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer, excluding
/// whitespace. This allows the parser to look ahead and backtrack freely.
///
/// Characters the tokenizer does not recognize are kept as [`TokenKind::Symbol`] tokens so the
/// parser can point at them.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let kind = kind.unwrap_or(TokenKind::Symbol);
        if kind == TokenKind::Whitespace {
            continue;
        }

        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn scientific_literal_splits() {
        compare_tokens(
            "1.5e+21",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Dot, "."),
                (TokenKind::Int, "5"),
                (TokenKind::Name, "e"),
                (TokenKind::Add, "+"),
                (TokenKind::Int, "21"),
            ],
        );
    }

    #[test]
    fn names_and_comparisons() {
        compare_tokens(
            "ans12 != 3!",
            [
                (TokenKind::Name, "ans12"),
                (TokenKind::Whitespace, " "),
                (TokenKind::NotEq, "!="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "3"),
                (TokenKind::Factorial, "!"),
            ],
        );
    }

    #[test]
    fn complete_skips_whitespace() {
        let tokens = tokenize_complete("2 x $");
        let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenKind::Int, TokenKind::Name, TokenKind::Symbol]);
        assert_eq!(tokens[2].span, 4..5);
    }
}
