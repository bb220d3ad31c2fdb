use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A name is bound nowhere in the scope chain.
    NameResolution(String),
    /// An expression matches none of the evaluator's forms.
    UnrecognizedForm(String),
    /// A special or sugar form has the wrong shape, e.g. a `switch` without `else`.
    MalformedForm(String),
    /// The operator position of an application is not a procedure.
    NotCallable(String),
    /// A native operation got the wrong number or kind of operands.
    InvalidArguments(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::NameResolution(m) => write!(f, "NameResolutionError: {}", m),
            RuntimeError::UnrecognizedForm(m) => write!(f, "UnrecognizedFormError: {}", m),
            RuntimeError::MalformedForm(m) => write!(f, "MalformedFormError: {}", m),
            RuntimeError::NotCallable(m) => write!(f, "NotCallableError: {}", m),
            RuntimeError::InvalidArguments(m) => write!(f, "InvalidArgumentsError: {}", m),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// `runtime_error!(Kind, "fmt", args..)` returns early with `Err(RuntimeError::Kind(..))`.
#[macro_export]
macro_rules! runtime_error {
    ($kind:ident, $($arg:tt)*) => (
        return Err($crate::interpreter::RuntimeError::$kind(format!($($arg)*)))
    )
}
