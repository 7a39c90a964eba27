//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = LingohashError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum LingohashError {
    InvalidModel(InvalidModelError),
    ShapeMismatch(ShapeMismatchError),
    InvalidArgument(InvalidArgumentError),
    DecodeError(bincode::error::DecodeError),
    EncodeError(bincode::error::EncodeError),
    IOError(std::io::Error),
}

impl LingohashError {
    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) const fn shape_mismatch(array: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch(ShapeMismatchError {
            array,
            expected,
            actual,
        })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for LingohashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidModel(e) => e.fmt(f),
            Self::ShapeMismatch(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::DecodeError(e) => write!(f, "failed to decode the model: {}", e),
            Self::EncodeError(e) => write!(f, "failed to encode the model: {}", e),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for LingohashError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DecodeError(e) => Some(e),
            Self::EncodeError(e) => Some(e),
            Self::IOError(e) => Some(e),
            _ => None,
        }
    }
}

/// Error used when the model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when an array of the model does not agree with the number of buckets and
/// languages.
#[derive(Debug)]
pub struct ShapeMismatchError {
    /// Name of the array.
    pub(crate) array: &'static str,

    /// Length implied by the model header.
    pub(crate) expected: usize,

    /// Actual length.
    pub(crate) actual: usize,
}

impl fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ShapeMismatchError: `{}` must have {} elements, but has {}",
            self.array, self.expected, self.actual,
        )
    }
}

impl Error for ShapeMismatchError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<bincode::error::DecodeError> for LingohashError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::DecodeError(error)
    }
}

impl From<bincode::error::EncodeError> for LingohashError {
    fn from(error: bincode::error::EncodeError) -> Self {
        Self::EncodeError(error)
    }
}

impl From<std::io::Error> for LingohashError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}
