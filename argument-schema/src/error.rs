use thiserror::Error as ThisError;

/// The error type of this crate.
///
/// Errors come in three flavors which are reported by [`Error::kind`]:
/// declaration errors raised while registering, type mismatches when the
/// input handed to the parser has the wrong shape, and argument errors
/// raised while scanning a command line.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// A positional, option or arity could not be registered.
    ///
    /// `decl` is the offending positional name or option match.  It is
    /// `None` when the arity itself is malformed.
    #[error("invalid declaration{}: {reason}", quoted(.decl))]
    InvalidDeclaration {
        decl: Option<String>,
        reason: DeclarationError,
    },
    /// The input was neither a string nor a sequence of strings.
    #[error("expected a string or a sequence of strings, got {found}")]
    TypeMismatch { found: String },
    /// The command line did not match the declarations.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl Error {
    pub(crate) fn declaration(decl: impl Into<String>, reason: DeclarationError) -> Error {
        Error::InvalidDeclaration {
            decl: Some(decl.into()),
            reason,
        }
    }

    pub(crate) fn arity(reason: DeclarationError) -> Error {
        Error::InvalidDeclaration { decl: None, reason }
    }

    pub(crate) fn type_mismatch(found: impl Into<String>) -> Error {
        Error::TypeMismatch {
            found: found.into(),
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDeclaration { .. } => ErrorKind::InvalidDeclaration,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Argument(_) => ErrorKind::Argument,
        }
    }

    /// Returns the argument error if this is one.
    pub fn argument_error(&self) -> Option<&ArgumentError> {
        match self {
            Error::Argument(err) => Some(err),
            _ => None,
        }
    }

    /// Can the person typing the command line fix this?
    ///
    /// Everything except a [`ErrorKind::TypeMismatch`] is.  A type mismatch
    /// means the parser was driven with the wrong kind of input.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Error::TypeMismatch { .. })
    }
}

fn quoted(decl: &Option<String>) -> String {
    match decl {
        Some(decl) => format!(" '{}'", decl),
        None => String::new(),
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Raised at registration time.
    InvalidDeclaration,
    /// The parser was invoked with an input of the wrong shape.
    TypeMismatch,
    /// Raised while scanning tokens.
    Argument,
}

/// Why a declaration was refused.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum DeclarationError {
    #[error("name is empty")]
    EmptyName,
    #[error("options must start with '-'")]
    MissingDash,
    #[error("option names cannot begin with a number")]
    NumericName,
    #[error("arity cannot be negative ({0})")]
    NegativeArity(i64),
    #[error("arity must be a count or '*', got {0:?}")]
    InvalidArity(String),
    #[error("already declared")]
    Duplicate,
}

/// A command line that does not fit the declarations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum ArgumentError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("not enough arguments for '{option}': expected {expected}, got {found}")]
    MissingValues {
        option: String,
        expected: usize,
        found: usize,
    },
    #[error("unexpected positional argument '{0}'")]
    UnexpectedPositional(String),
    #[error("missing required positional arguments: {}", .0.join(", "))]
    MissingPositionals(Vec<String>),
}
