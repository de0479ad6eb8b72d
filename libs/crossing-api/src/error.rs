use std::fmt;

/// What went wrong while converting between an atom and a service command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No command with that name is known to the codec.
    UnknownCommand,
    /// The atom is of a type the codec cannot read.
    UnsupportedAtom,
    /// The command names an API other than the one its schema belongs to.
    Api,
    /// Missing, duplicated or unexpected parameter.
    Parameter,
    /// A result was supplied for a command that has none.
    Result,
    Other,
}

/// Conversion failure raised by an [`AtomCodec`](crate::command::AtomCodec).
///
/// This is the only error that crosses the translator. It is returned to the
/// caller exactly as the codec produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ConversionError {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
        }
    }

    pub fn unknown_command(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand, msg)
    }

    pub fn unsupported_atom(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedAtom, msg)
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, msg)
    }

    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parameter, msg)
    }

    pub fn result(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Result, msg)
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Other, msg)
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConversionError {}
