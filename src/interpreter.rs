/// The calculator session.
///
/// Owns the variable environment and the options, and runs one parse per
/// call to `calculate`.
pub mod calculator;
/// Variable bindings.
///
/// A name-to-value map that assignments write and identifiers read.
pub mod environment;
/// The lexer module tokenizes source text for the parser.
///
/// It turns the input into numbers, identifiers, operators and punctuation,
/// skipping spaces and tabs. Characters that match nothing become `Unknown`
/// tokens rather than errors, so the parser decides how to report them.
pub mod lexer;
/// Calculator configuration.
pub mod options;
/// The parser module evaluates expressions while parsing them.
///
/// A recursive-descent parser with one token of lookahead. Each grammar rule
/// returns the value of the text it matched, so no syntax tree is built.
///
/// # Responsibilities
/// - Applies precedence and associativity for `;`, `=`, `+ -`, `* /`, prefix
///   `-`, implicit multiplication and `^`.
/// - Reads and writes variables in the session environment.
/// - Reports syntax errors with the expected and actual tokens.
pub mod parser;
/// Tokens shared by the lexer and the parser.
pub mod token;
