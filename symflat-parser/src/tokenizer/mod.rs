pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the tokenizer cannot classify is kept as [`TokenKind::Symbol`] tokens, so that the parser
/// can report it with a proper span.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
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
    fn implicit_and_power() {
        compare_tokens(
            "3x^2.5",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Float, "2.5"),
            ],
        );
    }

    #[test]
    fn definition() {
        compare_tokens(
            "f[x, y] := {x; \"s\"}",
            [
                (TokenKind::Name, "f"),
                (TokenKind::OpenSquare, "["),
                (TokenKind::Name, "x"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
                (TokenKind::CloseSquare, "]"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Define, ":="),
                (TokenKind::Whitespace, " "),
                (TokenKind::OpenCurly, "{"),
                (TokenKind::Name, "x"),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Str, "\"s\""),
                (TokenKind::CloseCurly, "}"),
            ],
        );
    }

    #[test]
    fn unknown_symbols() {
        let tokens = tokenize_complete("x $ .5\n");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TokenKind::Name,
            TokenKind::Whitespace,
            TokenKind::Symbol,
            TokenKind::Whitespace,
            TokenKind::Float,
            TokenKind::NewLine,
        ]);
        assert_eq!(tokens[4].span, 4..6);
    }
}
