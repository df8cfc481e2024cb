use logos::Logos;
use tracing::trace;

use crate::interpreter::token::{Token, TokenKind};

/// A lazy tokenizer over one source string.
///
/// Each call to [`Lexer::next_token`] skips spaces and tabs and produces the
/// next [`Token`]. Input that matches no rule becomes a single
/// [`TokenKind::Unknown`] token; lexing never fails. Once the source is
/// exhausted the lexer keeps returning [`TokenKind::EndOfInput`] without
/// advancing.
///
/// Cloning a lexer is cheap and gives an independent cursor, which the parser
/// uses to look one token past its lookahead.
#[derive(Clone)]
pub struct Lexer<'src> {
    inner:    logos::Lexer<'src, TokenKind>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner:    TokenKind::lexer(source),
               finished: false, }
    }

    /// Lexes all of `source`, including the trailing `EndOfInput` token.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::{lexer::Lexer, token::TokenKind};
    ///
    /// let kinds: Vec<_> = Lexer::tokenize("x >> 2").into_iter().map(|t| t.kind).collect();
    /// assert_eq!(kinds,
    ///            [TokenKind::Id, TokenKind::Shr, TokenKind::Num, TokenKind::EndOfInput]);
    /// ```
    #[must_use]
    pub fn tokenize(source: &'src str) -> Vec<Token> {
        Self::new(source).collect()
    }

    /// The full source this lexer reads from.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.inner.source()
    }

    /// Produces the next token.
    pub fn next_token(&mut self) -> Token {
        let token = match self.inner.next() {
            None => Token::end_of_input(self.source().len()),
            Some(Err(())) => Token::bare(TokenKind::Unknown, self.inner.span()),
            Some(Ok(TokenKind::Num)) => self.number(),
            Some(Ok(TokenKind::Id)) => {
                Token::identifier(self.inner.slice(), self.inner.span())
            },
            Some(Ok(kind)) => Token::bare(kind, self.inner.span()),
        };
        trace!(kind = ?token.kind, span = ?token.span, "lexed token");
        token
    }

    /// Builds a `Num` token from the current slice.
    ///
    /// `.nan` and `.inf` are spelled out here; everything else the numeric
    /// rules accept is a plain decimal that `f64::from_str` reads exactly.
    fn number(&self) -> Token {
        let span = self.inner.span();
        match self.inner.slice() {
            ".nan" => Token::number(f64::NAN, span),
            ".inf" => Token::number(f64::INFINITY, span),
            digits => match digits.parse() {
                Ok(value) => Token::number(value, span),
                Err(_) => Token::bare(TokenKind::Unknown, span),
            },
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to and including the first `EndOfInput`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == TokenKind::EndOfInput;
        Some(token)
    }
}
