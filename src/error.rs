/// Parsing errors.
///
/// Syntax errors detected while the parser walks the token stream: an atom
/// that cannot start, an unexpected character, or input left over after the
/// expression sequence.
pub mod parse_error;
/// Runtime errors.
///
/// Errors raised while computing a value, such as reading a variable that was
/// never assigned.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure returned by a calculation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input is not a well-formed expression sequence.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The input parsed but could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
