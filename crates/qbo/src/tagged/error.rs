//! Error type for the tag serializer.

use std::fmt;

use serde::ser;

/// Error produced while serializing a value into tag lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Custom message from Serde framework.
    Message(String),

    /// The value has no tag-line representation (e.g. a map or a bare float).
    UnsupportedType(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => write!(f, "{msg}"),
            Self::UnsupportedType(ty) => write!(f, "Unsupported type: {ty}"),
        }
    }
}

impl std::error::Error for Error {}

// Required for serde::ser::Serializer
impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

/// Shorthand Result type for tag serialization.
pub type Result<T> = std::result::Result<T, Error>;
