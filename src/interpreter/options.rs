/// What the parser does when an atom cannot start at the lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first syntax error and return it.
    #[default]
    Abort,
    /// Record the first syntax error, use NaN in place of the missing atom and
    /// keep going. Stray `Unknown` tokens are skipped so they do not turn into
    /// trailing input. Trailing input and undefined variables still abort.
    SubstituteNan,
}

/// Default for [`Options::persist_variables`].
pub const PERSIST_VARIABLES: bool = true;

/// Settings for a [`Calculator`](crate::interpreter::calculator::Calculator).
///
/// ```
/// use reckon::interpreter::options::{ErrorPolicy, Options};
///
/// let options = Options::default().with_error_policy(ErrorPolicy::SubstituteNan)
///                                 .with_persist_variables(false);
/// assert_eq!(options.error_policy, ErrorPolicy::SubstituteNan);
/// assert!(!options.persist_variables);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// How syntax errors inside an expression are handled.
    pub error_policy:      ErrorPolicy,
    /// Keep variable bindings from one `calculate` call to the next. When
    /// `false` every call starts from an empty environment.
    pub persist_variables: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { error_policy:      ErrorPolicy::default(),
               persist_variables: PERSIST_VARIABLES, }
    }
}

impl Options {
    /// Returns these options with syntax errors handled by `error_policy`.
    #[must_use]
    pub const fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Returns these options with variables kept across calls when
    /// `persist_variables` is `true`, or reset before each call when it is
    /// `false`.
    #[must_use]
    pub const fn with_persist_variables(mut self, persist_variables: bool) -> Self {
        self.persist_variables = persist_variables;
        self
    }
}
