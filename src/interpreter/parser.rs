use tracing::debug;

use crate::{
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        environment::Environment,
        lexer::Lexer,
        options::ErrorPolicy,
        token::{ATOM_START, Token, TokenKind, TokenValue},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used while parsing and evaluating.
pub type EvalResult<T> = Result<T, Error>;

/// A binary operation applied between two already computed operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`, also used for implicit multiplication
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
    /// `;` keeps the right operand
    Sequence,
}

impl BinaryOperator {
    /// Applies the operator with IEEE-754 double semantics.
    ///
    /// Division by zero gives an infinity or NaN, and `Pow` follows
    /// `f64::powf`, so a negative base with a fractional exponent is NaN.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::parser::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Pow.apply(2.0, 3.0), 8.0);
    /// assert_eq!(BinaryOperator::Sequence.apply(1.0, 2.0), 2.0);
    /// assert_eq!(BinaryOperator::Div.apply(1.0, 0.0), f64::INFINITY);
    /// ```
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.powf(right),
            Self::Sequence => right,
        }
    }
}

/// Maps a token kind to the binary operator it spells, if any.
///
/// `>>`, `<<`, `>` and `<` are lexed but have no operator; `=` is handled by
/// the assignment rule rather than here.
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Add => Some(BinaryOperator::Add),
        TokenKind::Sub => Some(BinaryOperator::Sub),
        TokenKind::Mul => Some(BinaryOperator::Mul),
        TokenKind::Div => Some(BinaryOperator::Div),
        TokenKind::Exp => Some(BinaryOperator::Pow),
        TokenKind::Semicolon => Some(BinaryOperator::Sequence),
        _ => None,
    }
}

/// The outcome of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Value of the last expression in the sequence.
    pub value:      f64,
    /// The syntax error that was recovered from, if the parser ran with
    /// [`ErrorPolicy::SubstituteNan`] and hit one.
    pub diagnostic: Option<ParseError>,
}

/// A recursive-descent parser that computes values as it recognizes them.
///
/// No syntax tree is built: every rule returns the `f64` its input denotes,
/// and assignments write straight into the borrowed [`Environment`]. The
/// parser reads tokens lazily through a one-token lookahead.
///
/// Grammar:
/// ```text
/// sequence := assign (";" assign)*
/// assign   := Id "=" assign | additive
/// additive := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := prefix (("*" | "/") prefix)*
/// prefix   := "-" term | term
/// term     := atom atom*
/// atom     := primary ("^" primary)*
/// primary  := Id | Num | "(" sequence ")"
/// ```
pub struct Parser<'src, 'env> {
    lexer:       Lexer<'src>,
    lookahead:   Token,
    environment: &'env mut Environment,
    policy:      ErrorPolicy,
    diagnostic:  Option<ParseError>,
}

impl<'src, 'env> Parser<'src, 'env> {
    /// Creates a parser over `source` and primes its lookahead.
    pub fn new(source: &'src str,
               environment: &'env mut Environment,
               policy: ErrorPolicy)
               -> Self {
        let mut lexer = Lexer::new(source);
        let lookahead = lexer.next_token();
        Self { lexer,
               lookahead,
               environment,
               policy,
               diagnostic: None }
    }

    /// Evaluates the whole source as one expression sequence.
    ///
    /// Assignments made before an error stay in the environment.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::{environment::Environment,
    ///                           options::ErrorPolicy,
    ///                           parser::Parser};
    ///
    /// let mut env = Environment::new();
    /// let result = Parser::new("x = 4; 3x", &mut env, ErrorPolicy::Abort).evaluate()
    ///                                                                  .unwrap();
    /// assert_eq!(result.value, 12.0);
    /// assert_eq!(env.get("x"), Some(4.0));
    /// ```
    pub fn evaluate(mut self) -> EvalResult<Evaluation> {
        let value = self.parse_sequence()?;
        match self.lookahead.kind {
            TokenKind::EndOfInput => {},
            TokenKind::Unknown => return Err(self.unexpected_character().into()),
            found => {
                return Err(ParseError::TrailingInput { found,
                                                       offset: self.lookahead.offset() }.into());
            },
        }
        Ok(Evaluation { value,
                        diagnostic: self.diagnostic })
    }

    /// `sequence := assign (";" assign)*`
    ///
    /// Every statement runs for its side effects; the value is the last one.
    ///
    /// Parenthesized input re-enters here, so the body runs under
    /// [`ensure_sufficient_stack`].
    fn parse_sequence(&mut self) -> EvalResult<f64> {
        ensure_sufficient_stack(|| {
            let mut value = self.parse_assign()?;
            while let Some(op) = token_to_binary_operator(self.lookahead.kind)
                  && op == BinaryOperator::Sequence
            {
                self.advance();
                let right = self.parse_assign()?;
                value = op.apply(value, right);
            }
            Ok(value)
        })
    }

    /// `assign := Id "=" assign | additive`
    ///
    /// Telling the two apart takes a second token of lookahead, read from a
    /// clone of the lexer so nothing is consumed.
    fn parse_assign(&mut self) -> EvalResult<f64> {
        ensure_sufficient_stack(|| {
            if self.lookahead.kind == TokenKind::Id
               && self.peek_kind() == TokenKind::Assign
               && let Some(TokenValue::Id(name)) = self.lookahead.value.take()
            {
                self.advance();
                self.advance();
                let value = self.parse_assign()?;
                debug!(%name, value, "assign");
                self.environment.set(name, value);
                return Ok(value);
            }
            self.parse_additive()
        })
    }

    /// `additive := multiplicative (("+" | "-") multiplicative)*`, left
    /// associative.
    fn parse_additive(&mut self) -> EvalResult<f64> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = token_to_binary_operator(self.lookahead.kind)
              && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = op.apply(left, right);
        }
        Ok(left)
    }

    /// `multiplicative := prefix (("*" | "/") prefix)*`, left associative.
    fn parse_multiplicative(&mut self) -> EvalResult<f64> {
        let mut left = self.parse_prefix()?;
        while let Some(op) = token_to_binary_operator(self.lookahead.kind)
              && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            self.advance();
            let right = self.parse_prefix()?;
            left = op.apply(left, right);
        }
        Ok(left)
    }

    /// `prefix := "-" term | term`
    ///
    /// The minus applies to the whole term, so `-2^2` is `-4` and `-2 3` is
    /// `-6`.
    fn parse_prefix(&mut self) -> EvalResult<f64> {
        if self.eat(TokenKind::Sub) {
            return Ok(-self.parse_term()?);
        }
        self.parse_term()
    }

    /// `term := atom atom*`
    ///
    /// Adjacent atoms multiply: `3(x + 1)` is `3 * (x + 1)` and `3 3` is `9`.
    /// The loop runs for as long as the lookahead can start an atom.
    fn parse_term(&mut self) -> EvalResult<f64> {
        let mut value = self.parse_atom()?;
        while self.lookahead.kind.starts_atom() {
            let right = self.parse_atom()?;
            value = BinaryOperator::Mul.apply(value, right);
        }
        Ok(value)
    }

    /// `atom := primary ("^" primary)*`
    ///
    /// The loop is greedy and folds to the left: `2^3^2` is `(2^3)^2 = 64`.
    fn parse_atom(&mut self) -> EvalResult<f64> {
        let mut value = self.parse_primary()?;
        while self.eat(TokenKind::Exp) {
            let exponent = self.parse_primary()?;
            value = BinaryOperator::Pow.apply(value, exponent);
        }
        Ok(value)
    }

    /// `primary := Id | Num | "(" sequence ")"`
    fn parse_primary(&mut self) -> EvalResult<f64> {
        if self.eat(TokenKind::LParen) {
            let value = self.parse_sequence()?;
            if !self.eat(TokenKind::RParen) {
                self.syntax_error(&[TokenKind::RParen])?;
            }
            return Ok(value);
        }

        let offset = self.lookahead.offset();
        match &self.lookahead.value {
            Some(TokenValue::Num(value)) => {
                let value = *value;
                self.advance();
                Ok(value)
            },
            Some(TokenValue::Id(name)) => {
                let Some(value) = self.environment.get(name) else {
                    return Err(RuntimeError::UndefinedVariable { name: name.clone(),
                                                                 offset }.into());
                };
                self.advance();
                Ok(value)
            },
            None => self.syntax_error(&ATOM_START),
        }
    }

    /// Reports a syntax error at the lookahead.
    ///
    /// Under [`ErrorPolicy::Abort`] this returns the error. Under
    /// [`ErrorPolicy::SubstituteNan`] the first error of the parse is kept as
    /// the diagnostic, later ones are dropped, and NaN stands in for the
    /// missing value.
    fn syntax_error(&mut self, expected: &'static [TokenKind]) -> EvalResult<f64> {
        let error = match self.lookahead.kind {
            TokenKind::Unknown => self.unexpected_character(),
            found => ParseError::UnexpectedToken { expected,
                                                   found,
                                                   offset: self.lookahead.offset() },
        };

        match self.policy {
            ErrorPolicy::Abort => Err(error.into()),
            ErrorPolicy::SubstituteNan => {
                debug!(%error, "substituting NaN");
                if self.lookahead.kind == TokenKind::Unknown {
                    self.advance();
                }
                self.diagnostic.get_or_insert(error);
                Ok(f64::NAN)
            },
        }
    }

    /// Describes an `Unknown` lookahead by the text it covers.
    fn unexpected_character(&self) -> ParseError {
        let lexeme = self.lexer
                         .source()
                         .get(self.lookahead.span.clone())
                         .unwrap_or_default();
        ParseError::UnexpectedCharacter { lexeme: lexeme.to_owned(),
                                          offset: self.lookahead.offset(), }
    }

    /// Kind of the token after the lookahead.
    fn peek_kind(&self) -> TokenKind {
        self.lexer.clone().next_token().kind
    }

    /// Consumes the lookahead and returns it.
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.lookahead, next)
    }

    /// Consumes the lookahead if it is of `kind`.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.lookahead.kind == kind {
            self.advance();
            return true;
        }
        false
    }
}
