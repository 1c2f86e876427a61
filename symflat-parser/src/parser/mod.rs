pub mod ast;
pub mod error;
pub mod token;

use ast::Stmt;
use error::{ExpectedEof, UnexpectedEof};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use symflat_error::{Error, ErrorKind};

/// A high-level parser for statements. This is the type to use to parse an arbitrary piece of
/// source code into abstract syntax trees.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// is none.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses one or more values of type `T`, each separated by a token of type `D`. The first
    /// error encountered is returned.
    pub fn parse_delimited<T: Parse, D: Parse>(&mut self) -> Result<Vec<T>, Error> {
        let mut values = vec![self.try_parse::<T>()?];
        while self.try_parse::<D>().is_ok() {
            values.push(self.try_parse::<T>()?);
        }
        Ok(values)
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek_kind().is_none() {
            Ok(value)
        } else {
            Err(self.error(ExpectedEof))
        }
    }

    /// Parses every statement in the source code. Statements are separated by new lines or `;`,
    /// and each one is parsed independently: a statement that fails to parse produces an error
    /// in its slot, and parsing resumes at the next statement.
    pub fn try_parse_each(&mut self) -> Vec<Result<Stmt, Error>> {
        let mut results = Vec::new();

        loop {
            while self.peek_kind().is_some_and(TokenKind::is_separator) {
                self.skip_whitespace();
                self.cursor += 1;
            }
            if self.peek_kind().is_none() {
                break;
            }

            let result = match self.try_parse::<Stmt>() {
                Ok(stmt) => match self.peek_kind() {
                    Some(kind) if !kind.is_separator() => Err(self.error(ExpectedEof)),
                    _ => Ok(stmt),
                },
                err => err,
            };

            if result.is_err() {
                self.skip_statement();
            }
            results.push(result);
        }

        results
    }

    /// Moves the cursor past any whitespace tokens.
    fn skip_whitespace(&mut self) {
        while self.current_token().is_some_and(|token| token.is_whitespace()) {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the next statement separator, or the end of the stream.
    fn skip_statement(&mut self) {
        while let Some(token) = self.current_token() {
            if token.kind.is_separator() {
                break;
            }
            self.cursor += 1;
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{AddOp, Atom, Chain, Equation, LitNum, LitSym, MulOp, Product, Sum};

    /// Parses a single equation, panicking on failure.
    fn equation(source: &str) -> Equation {
        Parser::new(source).try_parse_full::<Equation>().unwrap()
    }

    #[test]
    fn literal_int() {
        let chain = Chain {
            atoms: vec![Atom::Number(LitNum { value: "16".to_string(), span: 0..2 })],
            span: 0..2,
        };
        let product = Product { first: chain, rest: vec![], span: 0..2 };
        let sum = Sum { negated: false, first: product, rest: vec![], span: 0..2 };

        assert_eq!(equation("16"), Equation { lhs: sum, rhs: None, span: 0..2 });
    }

    #[test]
    fn leading_sign() {
        let eq = equation("-x + 3");
        assert!(eq.lhs.negated);
        assert_eq!(eq.lhs.rest.len(), 1);
        assert_eq!(eq.lhs.rest[0].0, AddOp::Add);
        assert_eq!(eq.lhs.span, 0..6);
    }

    #[test]
    fn implicit_multiplication() {
        let eq = equation("3x(y + 1)");
        let product = &eq.lhs.first;
        assert_eq!(product.rest.len(), 2);
        assert!(product.rest.iter().all(|(op, _)| *op == MulOp::Mul));
        assert!(matches!(product.rest[1].1.atoms[0], Atom::Paren(..)));
    }

    #[test]
    fn division_and_power_tower() {
        let eq = equation("x^2^y / z");
        let product = &eq.lhs.first;
        assert_eq!(product.first.atoms.len(), 3);
        assert_eq!(product.rest[0].0, MulOp::Div);
        assert_eq!(
            product.rest[0].1.atoms,
            vec![Atom::Symbol(LitSym { name: "z".to_string(), span: 8..9 })],
        );
    }

    #[test]
    fn negated_atom() {
        let eq = equation("2 * -x");
        let (_, chain) = &eq.lhs.first.rest[0];
        match &chain.atoms[0] {
            Atom::Neg(inner, span) => {
                assert_eq!(span, &(4..6));
                assert!(matches!(**inner, Atom::Symbol(_)));
            },
            other => panic!("expected negation, got {:?}", other),
        }
    }

    #[test]
    fn call_and_list() {
        let eq = equation("Sin[x, y = 2] + {1, \"a\"} + Rand[]");
        match &eq.lhs.first.first.atoms[0] {
            Atom::Call(call) => {
                assert_eq!(call.name.name, "Sin");
                assert_eq!(call.args.len(), 2);
                assert!(call.args[1].rhs.is_some());
            },
            other => panic!("expected call, got {:?}", other),
        }
        match &eq.lhs.rest[0].1.first.atoms[0] {
            Atom::List(items, _) => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
        match &eq.lhs.rest[1].1.first.atoms[0] {
            Atom::Call(call) => assert!(call.args.is_empty()),
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn equation_with_rhs() {
        let eq = equation("x = y + 1");
        assert!(eq.rhs.is_some());
        assert_eq!(eq.span, 0..9);
    }

    #[test]
    fn definition() {
        let mut parser = Parser::new("f[x, y] := x*y");
        match parser.try_parse_full::<Stmt>().unwrap() {
            Stmt::Define(header, body) => {
                assert_eq!(header.name.name, "f");
                assert_eq!(
                    header.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
                    vec!["x", "y"],
                );
                assert_eq!(body.span, 11..14);
            },
            other => panic!("expected definition, got {:?}", other),
        }
    }

    #[test]
    fn call_statement_is_not_definition() {
        let mut parser = Parser::new("f[2]");
        assert!(matches!(parser.try_parse_full::<Stmt>().unwrap(), Stmt::Equation(_)));
    }

    #[test]
    fn statements_parse_independently() {
        let results = Parser::new("x = 2; 3 +\n\ny * $\nx^2").try_parse_each();
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
        assert_eq!(results[3].as_ref().unwrap().span(), 18..21);
    }

    #[test]
    fn error_messages() {
        let err = Parser::new("(x + 1").try_parse_full::<Equation>().unwrap_err();
        assert_eq!(err.message(), "unexpected end of file");
        assert_eq!(err.spans, vec![6..6]);

        let err = Parser::new("x )").try_parse_full::<Equation>().unwrap_err();
        assert_eq!(err.message(), "expected end of statement");
        assert_eq!(err.spans, vec![2..3]);

        let err = Parser::new("* 2").try_parse_full::<Equation>().unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
    }
}
