/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Tried to read a variable that has never been assigned.
    #[error("Error at offset {offset}: Unknown variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name:   String,
        /// Byte offset of the identifier in the source.
        offset: usize,
    },
}
