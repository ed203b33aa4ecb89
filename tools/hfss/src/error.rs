//! HFSS script generation errors.

use thiserror::Error as ThisError;

/// The result type returned by HFSS library functions.
pub type Result<T> = std::result::Result<T, Error>;

/// Possible HFSS script generation errors.
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O error.
    #[error("io error")]
    Io(#[from] std::io::Error),
    /// Error parsing a TOML sweep description.
    #[error("error parsing sweep description: {0}")]
    Toml(#[from] toml::de::Error),
    /// A required argument was not provided.
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),
    /// A per-variable argument has a different length than the variable list.
    #[error("argument `{argument}` has {found} entries, expected one per variable ({expected})")]
    LengthMismatch {
        /// The offending argument.
        argument: &'static str,
        /// The number of variables.
        expected: usize,
        /// The number of entries supplied.
        found: usize,
    },
    /// A sweep was given the wrong number of values for its kind.
    #[error("{kind} sweep of `{variable}` takes {expected} values, got {found}")]
    Arity {
        /// The swept variable.
        variable: arcstr::ArcStr,
        /// The sweep kind tag.
        kind: &'static str,
        /// A description of the accepted number of values.
        expected: &'static str,
        /// The number of values supplied.
        found: usize,
    },
    /// A point-count sweep was given a count that is not a non-negative integer.
    #[error("point count of `{variable}` must be a non-negative integer, got {count}")]
    InvalidCount {
        /// The swept variable.
        variable: arcstr::ArcStr,
        /// The count supplied.
        count: f64,
    },
    /// A sweep kind tag was not recognized.
    #[error("unsupported sweep kind `{0}`")]
    UnsupportedKind(String),
}

impl Error {
    /// Returns `true` if this error was caused by malformed call arguments.
    ///
    /// Argument errors are always reported before any output is written.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument(_)
                | Self::LengthMismatch { .. }
                | Self::Arity { .. }
                | Self::InvalidCount { .. }
        )
    }
}
