use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crossing_api::{ApiId, Atom, AtomCodec, ConversionError, Parameter, ServiceCommand, Value};

use crate::error::EngineError;

/// Shape of one command: its API, ordered parameter names and whether it
/// returns a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSchema {
    pub name: String,
    pub api: ApiId,
    pub parameters: Vec<String>,
    pub has_result: bool,
}

impl CommandSchema {
    pub fn new(
        name: impl Into<String>,
        api: ApiId,
        parameters: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            api,
            parameters: parameters.into_iter().map(Into::into).collect(),
            has_result: false,
        }
    }

    pub fn returning(mut self) -> Self {
        self.has_result = true;
        self
    }
}

/// Atom whose layout is described by a [`CommandSchema`].
///
/// Arguments are stored in schema order.
#[derive(Debug, Clone)]
pub struct DynamicAtom {
    schema: Arc<CommandSchema>,
    thread: u64,
    arguments: Vec<Value>,
    result: Option<Value>,
}

impl DynamicAtom {
    pub fn schema(&self) -> &CommandSchema {
        &self.schema
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.schema
            .parameters
            .iter()
            .position(|p| p == name)
            .and_then(|i| self.arguments.get(i))
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Attach the value the command returned. Ignored by commands without a result.
    pub fn with_result(mut self, value: impl Into<Value>) -> Self {
        if self.schema.has_result {
            self.result = Some(value.into());
        }
        self
    }
}

impl Atom for DynamicAtom {
    fn name(&self) -> &str {
        &self.schema.name
    }

    fn api(&self) -> Option<ApiId> {
        Some(self.schema.api)
    }

    fn thread(&self) -> u64 {
        self.thread
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// [`AtomCodec`] driven by a fixed table of command schemas.
#[derive(Debug, Default)]
pub struct SchemaCodec {
    schemas: HashMap<String, Arc<CommandSchema>>,
}

impl SchemaCodec {
    /// Build a codec from schemas. Names must be unique.
    pub fn new(schemas: impl IntoIterator<Item = CommandSchema>) -> Result<Self, EngineError> {
        let mut map = HashMap::new();
        for schema in schemas {
            let name = schema.name.clone();
            if map.insert(name.clone(), Arc::new(schema)).is_some() {
                return Err(EngineError::Config(format!(
                    "command '{name}' is declared more than once"
                )));
            }
        }
        tracing::debug!(commands = map.len(), "built schema codec");
        Ok(Self { schemas: map })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn schema(&self, name: &str) -> Option<&CommandSchema> {
        self.schemas.get(name).map(|s| s.as_ref())
    }

    fn lookup(&self, name: &str) -> Result<&Arc<CommandSchema>, ConversionError> {
        self.schemas
            .get(name)
            .ok_or_else(|| ConversionError::unknown_command(format!("unknown command '{name}'")))
    }

    /// Create an atom for a known command from positional arguments.
    pub fn atom(
        &self,
        name: &str,
        thread: u64,
        arguments: Vec<Value>,
    ) -> Result<DynamicAtom, ConversionError> {
        let schema = self.lookup(name)?;
        if arguments.len() != schema.parameters.len() {
            return Err(ConversionError::parameter(format!(
                "command '{name}' takes {} argument(s), got {}",
                schema.parameters.len(),
                arguments.len()
            )));
        }
        Ok(DynamicAtom {
            schema: Arc::clone(schema),
            thread,
            arguments,
            result: None,
        })
    }
}

impl AtomCodec for SchemaCodec {
    fn to_service(&self, atom: &dyn Atom) -> Result<ServiceCommand, ConversionError> {
        let dynamic = atom.as_any().downcast_ref::<DynamicAtom>().ok_or_else(|| {
            ConversionError::unsupported_atom(format!(
                "atom '{}' was not built from a command schema",
                atom.name()
            ))
        })?;

        let schema = self.lookup(dynamic.name())?;
        if **schema != *dynamic.schema {
            return Err(ConversionError::unsupported_atom(format!(
                "atom '{}' was built from a different schema",
                dynamic.name()
            )));
        }

        let parameters = schema
            .parameters
            .iter()
            .zip(&dynamic.arguments)
            .map(|(name, value)| Parameter::new(name.clone(), value.clone()))
            .collect();

        Ok(ServiceCommand {
            name: schema.name.clone(),
            api: Some(schema.api),
            thread: dynamic.thread,
            parameters,
            result: dynamic
                .result
                .clone()
                .map(|value| Box::new(Parameter::new("result", value))),
        })
    }

    fn to_atom(&self, command: &ServiceCommand) -> Result<Arc<dyn Atom>, ConversionError> {
        let schema = self.lookup(&command.name)?;

        if let Some(api) = command.api {
            if api != schema.api {
                return Err(ConversionError::api(format!(
                    "command '{}' belongs to {}, not {api}",
                    schema.name, schema.api
                )));
            }
        }

        let mut slots: Vec<Option<Value>> = vec![None; schema.parameters.len()];
        for param in &command.parameters {
            let index = schema
                .parameters
                .iter()
                .position(|name| *name == param.name)
                .ok_or_else(|| {
                    ConversionError::parameter(format!(
                        "command '{}' has no parameter '{}'",
                        schema.name, param.name
                    ))
                })?;
            if slots[index].replace(param.value.clone()).is_some() {
                return Err(ConversionError::parameter(format!(
                    "parameter '{}' of command '{}' given more than once",
                    param.name, schema.name
                )));
            }
        }

        let arguments = slots
            .into_iter()
            .zip(&schema.parameters)
            .map(|(slot, name)| {
                slot.ok_or_else(|| {
                    ConversionError::parameter(format!(
                        "command '{}' is missing parameter '{name}'",
                        schema.name
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let result = match &command.result {
            Some(result) if schema.has_result => Some(result.value.clone()),
            Some(_) => {
                return Err(ConversionError::result(format!(
                    "command '{}' does not return a value",
                    schema.name
                )));
            }
            None => None,
        };

        Ok(Arc::new(DynamicAtom {
            schema: Arc::clone(schema),
            thread: command.thread,
            arguments,
            result,
        }))
    }
}
