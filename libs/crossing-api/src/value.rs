use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::boxed::BoxedValue;
use crate::command::{Atom, ServiceCommand};
use crate::context::{InternalContext, ServiceContext};

/// A value that may cross the service boundary.
///
/// Plain data variants carry no boundary semantics and are never converted.
/// The remaining variants are the categories the translator knows about:
///
/// - `Atom`, `InternalContext`: internal side, converted on the way out.
/// - `Command`, `Boxed`: service side, converted on the way in.
/// - `Context`: service side, produced from `InternalContext`, never converted back.
/// - `Opaque`: anything else, carried untouched in both directions.
///
/// `Atom` and `Opaque` live only in-process and are skipped by serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int64(i64),
    #[serde(rename = "uint64")]
    UInt64(u64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),

    Command(ServiceCommand),
    InternalContext(InternalContext),
    Context(ServiceContext),
    Boxed(BoxedValue),

    #[serde(skip)]
    Atom(Arc<dyn Atom>),
    #[serde(skip)]
    Opaque(Opaque),
}

/// Coarse classification of a [`Value`], used for dispatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Category {
    Data,
    Atom,
    Command,
    InternalContext,
    Context,
    Boxed,
    Opaque,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Data => "data",
            Category::Atom => "atom",
            Category::Command => "command",
            Category::InternalContext => "internal_context",
            Category::Context => "context",
            Category::Boxed => "boxed",
            Category::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn category(&self) -> Category {
        match self {
            Value::Null
            | Value::Bool(_)
            | Value::Int64(_)
            | Value::UInt64(_)
            | Value::Float64(_)
            | Value::String(_)
            | Value::Bytes(_)
            | Value::Array(_)
            | Value::Map(_) => Category::Data,
            Value::Command(_) => Category::Command,
            Value::InternalContext(_) => Category::InternalContext,
            Value::Context(_) => Category::Context,
            Value::Boxed(_) => Category::Boxed,
            Value::Atom(_) => Category::Atom,
            Value::Opaque(_) => Category::Opaque,
        }
    }

    /// Wrap any in-process value that has no category of its own.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(Opaque::new(value))
    }

    pub fn atom(atom: impl Atom) -> Self {
        Value::Atom(Arc::new(atom))
    }
}

/// Structural equality, except for `Atom` and `Opaque` which compare by identity.
/// Floats compare bitwise: a NaN equals itself and `0.0` differs from `-0.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::UInt64(a), Value::UInt64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Command(a), Value::Command(b)) => a == b,
            (Value::InternalContext(a), Value::InternalContext(b)) => a == b,
            (Value::Context(a), Value::Context(b)) => a == b,
            (Value::Boxed(a), Value::Boxed(b)) => a == b,
            (Value::Atom(a), Value::Atom(b)) => Arc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Bytes(v) => write!(f, "bytes[{}]", v.len()),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Command(c) => write!(f, "command {c}"),
            Value::InternalContext(c) => write!(f, "{c}"),
            Value::Context(c) => write!(f, "{c}"),
            Value::Boxed(b) => write!(f, "box({})", b.get()),
            Value::Atom(a) => write!(f, "atom {} (thread {})", a.name(), a.thread()),
            Value::Opaque(o) => write!(f, "<opaque {}>", o.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<ServiceCommand> for Value {
    fn from(v: ServiceCommand) -> Self {
        Value::Command(v)
    }
}

impl From<InternalContext> for Value {
    fn from(v: InternalContext) -> Self {
        Value::InternalContext(v)
    }
}

impl From<ServiceContext> for Value {
    fn from(v: ServiceContext) -> Self {
        Value::Context(v)
    }
}

impl From<BoxedValue> for Value {
    fn from(v: BoxedValue) -> Self {
        Value::Boxed(v)
    }
}

impl From<Arc<dyn Atom>> for Value {
    fn from(v: Arc<dyn Atom>) -> Self {
        Value::Atom(v)
    }
}

/// An in-process value of a type the boundary has no rule for.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("type_name", &self.type_name)
            .finish()
    }
}
