pub mod boxed;
pub mod command;
pub mod context;
pub mod error;
pub mod id;
pub mod value;

pub use boxed::BoxedValue;
pub use command::{Atom, AtomCodec, Parameter, ServiceCommand};
pub use context::{InternalContext, ServiceContext};
pub use error::{ConversionError, ErrorKind};
pub use id::{ApiId, ContextId};
pub use value::{Category, Opaque, Value};
