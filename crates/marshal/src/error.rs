use std::io;
use std::str::Utf8Error;

use thiserror::Error;

use crate::value::BoxError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rendering of one field failed; `field` is its dotted path.
    #[error("failed to encode field `{field}`: {cause}")]
    Encode {
        field: String,
        #[source]
        cause: FieldError,
    },
}

/// Why a single field could not be rendered.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("formatter failed: {0}")]
    Formatter(#[source] BoxError),

    #[error("formatter output is not valid JSON: {0}")]
    InvalidOutput(#[source] serde_json::Error),

    #[error("formatter output is not valid UTF-8: {0}")]
    InvalidUtf8(#[source] Utf8Error),

    #[error("{0} is not representable in JSON")]
    NonFiniteFloat(f64),

    #[error("text conversion failed: {0}")]
    Text(#[source] BoxError),
}

/// The encoder's error type under its contract name.
pub type EncodeError = Error;

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn encode(field: impl Into<String>, cause: FieldError) -> Self {
        Error::Encode {
            field: field.into(),
            cause,
        }
    }

    /// Path of the field that failed, if this is an encode failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Encode { field, .. } => Some(field),
            Error::Io(_) => None,
        }
    }

    pub fn cause(&self) -> Option<&FieldError> {
        match self {
            Error::Encode { cause, .. } => Some(cause),
            Error::Io(_) => None,
        }
    }
}
