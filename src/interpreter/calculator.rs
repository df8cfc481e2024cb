use tracing::debug;

use crate::{
    error::ParseError,
    interpreter::{
        environment::Environment,
        options::Options,
        parser::{EvalResult, Parser},
    },
};

/// An evaluation session.
///
/// The calculator owns the variable [`Environment`]. It is created empty with
/// the calculator, updated by every assignment in every call to
/// [`Calculator::calculate`], and dropped with the calculator. With
/// [`Options::persist_variables`] turned off, each call starts from an empty
/// environment instead.
///
/// `calculate` takes `&mut self`, so one calculator runs one parse at a time.
/// Sharing a calculator between threads needs a lock around it.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    environment:     Environment,
    options:         Options,
    last_diagnostic: Option<ParseError>,
}

impl Calculator {
    /// Creates a calculator with default [`Options`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with the given options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self { options,
               ..Self::default() }
    }

    /// Evaluates `input` and returns the value of its last expression.
    ///
    /// # Errors
    /// Returns a [`ParseError`] for malformed input and a
    /// [`RuntimeError`](crate::error::RuntimeError) when a variable is read
    /// before it is assigned. Assignments made before the error are kept.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::calculator::Calculator;
    ///
    /// let mut calc = Calculator::new();
    /// assert_eq!(calc.calculate("x = 4; x * 2").unwrap(), 8.0);
    /// assert_eq!(calc.calculate("x").unwrap(), 4.0);
    /// assert!(calc.calculate("y").is_err());
    /// ```
    pub fn calculate(&mut self, input: &str) -> EvalResult<f64> {
        if !self.options.persist_variables && !self.environment.is_empty() {
            debug!(count = self.environment.len(), "resetting variables");
            self.environment = Environment::new();
        }
        self.last_diagnostic = None;

        let evaluation =
            Parser::new(input, &mut self.environment, self.options.error_policy).evaluate()?;
        self.last_diagnostic = evaluation.diagnostic;
        Ok(evaluation.value)
    }

    /// The syntax error recovered from during the last successful call, if
    /// any. Only set under
    /// [`ErrorPolicy::SubstituteNan`](crate::interpreter::options::ErrorPolicy::SubstituteNan).
    #[must_use]
    pub const fn last_diagnostic(&self) -> Option<&ParseError> {
        self.last_diagnostic.as_ref()
    }

    /// Current variable bindings.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The options every `calculate` call on this calculator runs with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::options::ErrorPolicy;

    #[test]
    fn variables_persist_across_calls_by_default() {
        let mut calc = Calculator::new();
        assert_eq!(calc.calculate("x=4;x*2").unwrap(), 8.0);
        assert_eq!(calc.calculate("x").unwrap(), 4.0);
        assert_eq!(calc.calculate("x = 5").unwrap(), 5.0);
        assert_eq!(calc.environment().get("x"), Some(5.0));
    }

    #[test]
    fn fresh_sessions_forget_variables() {
        let mut calc = Calculator::with_options(Options::default().with_persist_variables(false));
        assert_eq!(calc.calculate("x = 4; x").unwrap(), 4.0);
        assert!(calc.calculate("x").is_err());
        assert!(calc.environment().is_empty());
    }

    #[test]
    fn separate_calculators_do_not_share_variables() {
        let mut first = Calculator::new();
        let mut second = Calculator::new();
        first.calculate("x = 1").unwrap();
        assert!(second.calculate("x").is_err());
    }

    #[test]
    fn diagnostic_is_cleared_by_the_next_call() {
        let options = Options::default().with_error_policy(ErrorPolicy::SubstituteNan);
        let mut calc = Calculator::with_options(options);
        assert!(calc.calculate("1 + *").unwrap().is_nan());
        assert!(calc.last_diagnostic().is_some());
        assert_eq!(calc.calculate("1 + 1").unwrap(), 2.0);
        assert!(calc.last_diagnostic().is_none());
    }

    #[test]
    fn abort_policy_never_records_diagnostics() {
        let mut calc = Calculator::new();
        assert!(calc.calculate("*5").is_err());
        assert!(calc.last_diagnostic().is_none());
        assert_eq!(calc.options().error_policy, ErrorPolicy::Abort);
    }
}
