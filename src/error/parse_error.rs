use crate::interpreter::token::TokenKind;

/// Represents all errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An atom was required but the lookahead cannot start one, or a closing
    /// parenthesis was missing.
    #[error("Error at offset {offset}: Unexpected {found}, expected {}.", one_of(.expected))]
    UnexpectedToken {
        /// Token kinds that would have been accepted.
        expected: &'static [TokenKind],
        /// The token actually found.
        found:    TokenKind,
        /// Byte offset of the offending token.
        offset:   usize,
    },
    /// The lexer could not match the input at this position.
    #[error("Error at offset {offset}: Unexpected character '{lexeme}'.")]
    UnexpectedCharacter {
        /// The unmatched source text.
        lexeme: String,
        /// Byte offset of the unmatched text.
        offset: usize,
    },
    /// Input remains after a complete expression sequence.
    #[error("Error at offset {offset}: Extra input after expression, starting with {found}.")]
    TrailingInput {
        /// The first leftover token.
        found:  TokenKind,
        /// Byte offset of that token.
        offset: usize,
    },
}

impl ParseError {
    /// Byte offset in the source where the error was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedCharacter { offset, .. }
            | Self::TrailingInput { offset, .. } => *offset,
        }
    }
}

fn one_of(expected: &[TokenKind]) -> String {
    match expected {
        [single] => single.to_string(),
        kinds => {
            let names: Vec<_> = kinds.iter().map(ToString::to_string).collect();
            format!("one of {}", names.join(", "))
        },
    }
}
