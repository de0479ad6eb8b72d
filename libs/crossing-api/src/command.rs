use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::id::ApiId;
use crate::value::Value;

/// Internal representation of a single recorded command.
///
/// Implementations are owned by the command subsystem. The boundary only
/// needs enough to identify an atom and hand it to an [`AtomCodec`].
pub trait Atom: fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &str;

    /// API the command belongs to, `None` for API-independent commands.
    fn api(&self) -> Option<ApiId>;

    fn thread(&self) -> u64;

    fn as_any(&self) -> &dyn Any;
}

/// Named argument or result of a [`ServiceCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Transport-facing representation of a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCommand {
    pub name: String,
    #[serde(default)]
    pub api: Option<ApiId>,
    #[serde(default)]
    pub thread: u64,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub result: Option<Box<Parameter>>,
}

impl ServiceCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api: None,
            thread: 0,
            parameters: Vec::new(),
            result: None,
        }
    }

    pub fn with_api(mut self, api: ApiId) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_thread(mut self, thread: u64) -> Self {
        self.thread = thread;
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    pub fn with_result(mut self, value: impl Into<Value>) -> Self {
        self.result = Some(Box::new(Parameter::new("result", value)));
        self
    }

    /// First parameter with the given name.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

impl fmt::Display for ServiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", p.name, p.value)?;
        }
        f.write_str(")")?;
        if let Some(result) = &self.result {
            write!(f, " -> {}", result.value)?;
        }
        Ok(())
    }
}

/// Two-way conversion between atoms and service commands.
///
/// Supplied by the command subsystem; the translator delegates to it and
/// returns its errors untouched. Must be safe to call from many threads.
pub trait AtomCodec: Send + Sync {
    fn to_service(&self, atom: &dyn Atom) -> Result<ServiceCommand, ConversionError>;

    fn to_atom(&self, command: &ServiceCommand) -> Result<Arc<dyn Atom>, ConversionError>;
}
