//! # reckon
//!
//! reckon is a small arithmetic expression interpreter written in Rust.
//! A lexer turns the input into tokens and a recursive-descent parser
//! computes the value while it parses, without building a syntax tree.
//!
//! ```
//! use reckon::interpreter::calculator::Calculator;
//!
//! let mut calc = Calculator::new();
//! assert_eq!(calc.calculate("r = 2; 3(r + 1)^2").unwrap(), 27.0);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::Error, interpreter::calculator::Calculator};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines every error a calculation can return. Errors carry the
/// byte offset in the source where they were detected.
///
/// # Responsibilities
/// - Defines syntax errors (`ParseError`) and evaluation errors
///   (`RuntimeError`).
/// - Wraps both in a single `Error` returned by `calculate`.
pub mod error;
/// Lexing, parsing and evaluation.
///
/// This module ties together the token model, the lexer, the evaluating
/// parser, the variable environment and the calculator session that owns it.
///
/// # Responsibilities
/// - Converts source text into tokens.
/// - Computes the value of an expression sequence while parsing it.
/// - Keeps variable bindings between calls on the same calculator.
pub mod interpreter;
/// General helpers used by the interpreter and the command line tool.
pub mod util;

/// Evaluates `source` in a fresh calculator with default options.
///
/// # Errors
/// Returns an error if `source` is malformed or reads an undefined variable.
///
/// # Examples
/// ```
/// use reckon::calculate;
///
/// assert_eq!(calculate("8 - 3 - 2").unwrap(), 3.0);
/// assert_eq!(calculate("2^3^2").unwrap(), 64.0);
///
/// // 'x' is not defined in a fresh calculator.
/// assert!(calculate("x + 1").is_err());
/// ```
pub fn calculate(source: &str) -> Result<f64, Error> {
    Calculator::new().calculate(source)
}
