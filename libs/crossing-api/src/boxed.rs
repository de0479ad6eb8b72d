use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Uniform carrier for an arbitrary payload on the service side.
///
/// The payload is never inspected here; unwrapping hands it back as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxedValue {
    payload: Box<Value>,
}

impl BoxedValue {
    pub fn new(payload: impl Into<Value>) -> Self {
        Self {
            payload: Box::new(payload.into()),
        }
    }

    pub fn get(&self) -> &Value {
        &self.payload
    }

    pub fn into_inner(self) -> Value {
        *self.payload
    }
}
