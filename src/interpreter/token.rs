use std::fmt;

use logos::{Logos, Span};

/// The closed set of token kinds shared by the lexer and the parser.
///
/// The `logos` attributes drive the lexer. Logos always prefers the longest
/// match, so `>>` becomes a single [`TokenKind::Shr`] rather than two
/// [`TokenKind::Gt`] tokens.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t]+")]
pub enum TokenKind {
    /// Numeric literal tokens, such as `5`, `.5`, `5.5`, `.nan` or `.inf`.
    #[regex(r"[0-9]+")]
    #[regex(r"[0-9]+\.[0-9]+")]
    #[regex(r"\.[0-9]+")]
    #[token(".nan")]
    #[token(".inf")]
    Num,
    /// Identifier tokens; variable names such as `x` or `rate_2`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Id,
    /// `>>`
    #[token(">>")]
    Shr,
    /// `<<`
    #[token("<<")]
    Shl,
    /// `=`
    #[token("=")]
    Assign,
    /// `>`
    #[token(">")]
    Gt,
    /// `<`
    #[token("<")]
    Lt,
    /// `^`
    #[token("^")]
    Exp,
    /// `*`
    #[token("*")]
    Mul,
    /// `/`
    #[token("/")]
    Div,
    /// `+`
    #[token("+")]
    Add,
    /// `-`
    #[token("-")]
    Sub,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Input the lexer could not match.
    Unknown,
    /// End of the source string.
    EndOfInput,
}

/// The fixed operator and punctuation table, longest lexemes first.
///
/// `Shr`, `Shl`, `Gt` and `Lt` are reserved here so the lexer keeps `>>` and
/// `<<` intact, even though no grammar rule consumes them.
pub const LEXEMES: [(&str, TokenKind); 13] = [(">>", TokenKind::Shr),
                                              ("<<", TokenKind::Shl),
                                              ("=", TokenKind::Assign),
                                              (">", TokenKind::Gt),
                                              ("<", TokenKind::Lt),
                                              ("^", TokenKind::Exp),
                                              ("*", TokenKind::Mul),
                                              ("/", TokenKind::Div),
                                              ("+", TokenKind::Add),
                                              ("-", TokenKind::Sub),
                                              (";", TokenKind::Semicolon),
                                              ("(", TokenKind::LParen),
                                              (")", TokenKind::RParen)];

/// Token kinds that may begin an atom: `Id`, `Num` or `(`.
pub const ATOM_START: [TokenKind; 3] = [TokenKind::Id, TokenKind::Num, TokenKind::LParen];

impl TokenKind {
    /// Returns the fixed source text of an operator or punctuation kind.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::token::TokenKind;
    ///
    /// assert_eq!(TokenKind::Shr.lexeme(), Some(">>"));
    /// assert_eq!(TokenKind::Num.lexeme(), None);
    /// ```
    #[must_use]
    pub fn lexeme(self) -> Option<&'static str> {
        LEXEMES.iter()
               .find(|(_, kind)| *kind == self)
               .map(|(lexeme, _)| *lexeme)
    }

    /// Whether a token of this kind can begin an atom.
    #[must_use]
    pub fn starts_atom(self) -> bool {
        ATOM_START.contains(&self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num => write!(f, "number"),
            Self::Id => write!(f, "identifier"),
            Self::Unknown => write!(f, "unknown character"),
            Self::EndOfInput => write!(f, "end of input"),
            kind => write!(f, "'{}'", kind.lexeme().unwrap_or_default()),
        }
    }
}

/// The payload carried by `Num` and `Id` tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// The decimal value of a numeric literal.
    Num(f64),
    /// The exact source text of an identifier.
    Id(String),
}

/// A token produced by the lexer.
///
/// Every token except `EndOfInput` covers a non-empty span of the source.
/// `Num` and `Id` tokens always carry a [`TokenValue`]; all other kinds never
/// do. The constructors below are the only way the lexer builds tokens, which
/// keeps those two rules in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What the token is.
    pub kind:  TokenKind,
    /// Byte range of the token in the source.
    pub span:  Span,
    /// Payload for `Num` and `Id` tokens.
    pub value: Option<TokenValue>,
}

impl Token {
    /// A numeric literal token.
    #[must_use]
    pub const fn number(value: f64, span: Span) -> Self {
        Self { kind: TokenKind::Num,
               span,
               value: Some(TokenValue::Num(value)) }
    }

    /// An identifier token holding its source text.
    #[must_use]
    pub fn identifier(name: impl Into<String>, span: Span) -> Self {
        Self { kind: TokenKind::Id,
               span,
               value: Some(TokenValue::Id(name.into())) }
    }

    /// An operator, punctuation or `Unknown` token.
    #[must_use]
    pub const fn bare(kind: TokenKind, span: Span) -> Self {
        Self { kind,
               span,
               value: None }
    }

    /// The empty end-of-input token positioned at `len`.
    #[must_use]
    pub const fn end_of_input(len: usize) -> Self {
        Self::bare(TokenKind::EndOfInput, len..len)
    }

    /// Start offset of the token, used for diagnostics.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start
    }

    /// The numeric payload, if this is a `Num` token.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            Some(TokenValue::Num(value)) => Some(value),
            _ => None,
        }
    }

    /// The identifier payload, if this is an `Id` token.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Id(name)) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexeme_table_round_trips_through_kinds() {
        for (lexeme, kind) in LEXEMES {
            assert_eq!(kind.lexeme(), Some(lexeme));
        }
    }

    #[test]
    fn longer_lexemes_come_before_their_prefixes() {
        for (i, (long, _)) in LEXEMES.iter().enumerate() {
            for (short, _) in &LEXEMES[..i] {
                assert!(!long.starts_with(*short),
                        "{short:?} shadows {long:?}");
            }
        }
    }

    #[test]
    fn display_names_token_classes() {
        assert_eq!(TokenKind::Num.to_string(), "number");
        assert_eq!(TokenKind::Id.to_string(), "identifier");
        assert_eq!(TokenKind::LParen.to_string(), "'('");
        assert_eq!(TokenKind::EndOfInput.to_string(), "end of input");
    }

    #[test]
    fn only_atom_starters_start_atoms() {
        assert!(TokenKind::Id.starts_atom());
        assert!(TokenKind::Num.starts_atom());
        assert!(TokenKind::LParen.starts_atom());
        assert!(!TokenKind::Sub.starts_atom());
        assert!(!TokenKind::Unknown.starts_atom());
    }
}
