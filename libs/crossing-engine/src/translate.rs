use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crossing_api::{AtomCodec, ConversionError, ServiceContext, Value};

/// Which side of the boundary a value is travelling to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToService,
    ToInternal,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ToService => "to-service",
            Direction::ToInternal => "to-internal",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to-service" | "service" => Ok(Direction::ToService),
            "to-internal" | "internal" => Ok(Direction::ToInternal),
            other => Err(format!(
                "unknown direction '{other}' (expected 'to-service' or 'to-internal')"
            )),
        }
    }
}

/// Converts values crossing the service boundary.
///
/// Dispatch is by category:
///
/// | direction   | category          | result                          |
/// |-------------|-------------------|---------------------------------|
/// | to service  | `Atom`            | `Command` via the codec         |
/// | to service  | `InternalContext` | `Context` (name and api only)   |
/// | to internal | `Command`         | `Atom` via the codec            |
/// | to internal | `Boxed`           | the payload, one level unwrapped|
/// | either      | anything else     | the same value                  |
///
/// Holds nothing but the codec handle, so clones are cheap and calls from
/// many threads need no coordination.
#[derive(Clone)]
pub struct Translator {
    codec: Arc<dyn AtomCodec>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator").finish_non_exhaustive()
    }
}

impl Translator {
    pub fn new(codec: Arc<dyn AtomCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &Arc<dyn AtomCodec> {
        &self.codec
    }

    /// Internal value → service value.
    ///
    /// Fails only when the codec rejects an atom; the codec's error is
    /// returned as-is.
    pub fn internal_to_service(&self, value: Value) -> Result<Value, ConversionError> {
        let direction = Direction::ToService.as_str();
        match value {
            Value::Atom(atom) => {
                tracing::trace!(direction, command = atom.name(), "converting atom");
                self.codec
                    .to_service(atom.as_ref())
                    .map(Value::Command)
                    .inspect_err(|e| {
                        tracing::debug!(
                            command = atom.name(),
                            error = %e,
                            "atom conversion failed"
                        );
                    })
            }
            Value::InternalContext(ctx) => {
                tracing::trace!(direction, context = %ctx.name, "projecting context");
                Ok(Value::Context(ServiceContext::from(&ctx)))
            }
            other => {
                tracing::trace!(direction, category = %other.category(), "passthrough");
                Ok(other)
            }
        }
    }

    /// Service value → internal value.
    ///
    /// Boxed values are unwrapped exactly one level and their payload is not
    /// looked at again. Fails only when the codec rejects a command.
    pub fn service_to_internal(&self, value: Value) -> Result<Value, ConversionError> {
        let direction = Direction::ToInternal.as_str();
        match value {
            Value::Command(cmd) => {
                tracing::trace!(direction, command = %cmd.name, "converting command");
                self.codec
                    .to_atom(&cmd)
                    .map(Value::Atom)
                    .inspect_err(|e| {
                        tracing::debug!(
                            command = %cmd.name,
                            error = %e,
                            "command conversion failed"
                        );
                    })
            }
            Value::Boxed(boxed) => {
                tracing::trace!(direction, "unboxing");
                Ok(boxed.into_inner())
            }
            other => {
                tracing::trace!(direction, category = %other.category(), "passthrough");
                Ok(other)
            }
        }
    }

    pub fn translate(&self, direction: Direction, value: Value) -> Result<Value, ConversionError> {
        match direction {
            Direction::ToService => self.internal_to_service(value),
            Direction::ToInternal => self.service_to_internal(value),
        }
    }

    /// Translate a sequence, stopping at the first failure.
    pub fn translate_all(
        &self,
        direction: Direction,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Vec<Value>, ConversionError> {
        values
            .into_iter()
            .map(|v| self.translate(direction, v))
            .collect()
    }
}
