/// Numeric display helpers.
///
/// Results are plain `f64` values. This module turns them back into text in
/// the same spelling the lexer accepts, so printed results can be pasted back
/// into an expression.
pub mod num;
/// Stack growth for deeply nested input.
pub mod stack;
