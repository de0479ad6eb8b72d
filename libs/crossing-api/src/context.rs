use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{ApiId, ContextId};

/// Execution context as tracked by the internal model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalContext {
    pub id: ContextId,
    pub name: String,
    pub api: ApiId,
    /// Thread the context was first bound on.
    #[serde(default)]
    pub thread: u64,
    #[serde(default)]
    pub priority: u32,
}

/// Client-facing view of a context: name and API, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContext {
    pub name: String,
    pub api: ApiId,
}

impl ServiceContext {
    pub fn new(name: impl Into<String>, api: ApiId) -> Self {
        Self {
            name: name.into(),
            api,
        }
    }
}

impl From<&InternalContext> for ServiceContext {
    fn from(ctx: &InternalContext) -> Self {
        Self {
            name: ctx.name.clone(),
            api: ctx.api,
        }
    }
}

impl fmt::Display for InternalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "internal context {} '{}' ({}, thread {})",
            self.id, self.name, self.api, self.thread
        )
    }
}

impl fmt::Display for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "context '{}' ({})", self.name, self.api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_keeps_name_and_api_only() {
        let internal = InternalContext {
            id: ContextId(0xdead),
            name: "main".into(),
            api: ApiId(7),
            thread: 3,
            priority: 9,
        };
        let service = ServiceContext::from(&internal);
        assert_eq!(service, ServiceContext::new("main", ApiId(7)));
        assert_eq!(service.to_string(), "context 'main' (api#7)");
    }
}
