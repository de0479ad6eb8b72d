pub mod codec;
pub mod config;
pub mod error;
pub mod translate;

pub use codec::{CommandSchema, DynamicAtom, SchemaCodec};
pub use config::{ConfigParser, CrossingConfig, TomlParser};
pub use error::EngineError;
pub use translate::{Direction, Translator};
