use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crossing_api::ApiId;

use crate::codec::{CommandSchema, SchemaCodec};
use crate::error::EngineError;

/// Root configuration: the APIs and command schemas known to the codec.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossingConfig {
    /// API name → identifier table.
    #[serde(default)]
    pub apis: Vec<ApiConfig>,

    /// Command schema definitions.
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub name: String,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandConfig {
    pub name: String,
    /// Name of an entry in `apis`.
    pub api: String,
    /// Parameter names in call order.
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Whether the command returns a value.
    #[serde(default)]
    pub result: bool,
}

/// A configuration file format.
pub trait ConfigParser {
    /// File extensions (without the dot) this parser accepts.
    fn extensions(&self) -> &[&str];

    fn parse(&self, content: &str) -> Result<CrossingConfig, EngineError>;
}

/// Built-in TOML parser.
pub struct TomlParser;

impl ConfigParser for TomlParser {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, content: &str) -> Result<CrossingConfig, EngineError> {
        CrossingConfig::parse(content)
    }
}

impl CrossingConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Self::load_with(path, &[&TomlParser])
    }

    /// Load configuration, choosing the parser by file extension.
    pub fn load_with(
        path: impl AsRef<Path>,
        parsers: &[&dyn ConfigParser],
    ) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parser = parsers
            .iter()
            .find(|p| p.extensions().contains(&ext))
            .ok_or_else(|| {
                let known: Vec<&str> = parsers
                    .iter()
                    .flat_map(|p| p.extensions())
                    .copied()
                    .collect();
                EngineError::Config(format!(
                    "{}: unsupported config format '{ext}' (supported: {})",
                    path.display(),
                    known.join(", ")
                ))
            })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        parser
            .parse(&content)
            .map_err(|e| e.with_context(path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Resolve API names and produce the command schemas.
    pub fn schemas(&self) -> Result<Vec<CommandSchema>, EngineError> {
        let mut apis = HashMap::new();
        for api in &self.apis {
            if apis.insert(api.name.as_str(), ApiId(api.id)).is_some() {
                return Err(EngineError::Config(format!(
                    "api '{}' is declared more than once",
                    api.name
                )));
            }
        }

        self.commands
            .iter()
            .map(|cmd| {
                let api = apis.get(cmd.api.as_str()).copied().ok_or_else(|| {
                    EngineError::Config(format!(
                        "command '{}' refers to unknown api '{}'",
                        cmd.name, cmd.api
                    ))
                })?;
                let schema =
                    CommandSchema::new(cmd.name.clone(), api, cmd.parameters.iter().cloned());
                Ok(if cmd.result { schema.returning() } else { schema })
            })
            .collect()
    }

    pub fn build_codec(&self) -> Result<SchemaCodec, EngineError> {
        SchemaCodec::new(self.schemas()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[apis]]
name = "gles"
id = 1

[[apis]]
name = "vulkan"
id = 2

[[commands]]
name = "glDrawArrays"
api = "gles"
parameters = ["mode", "first", "count"]

[[commands]]
name = "glGetError"
api = "gles"
result = true

[[commands]]
name = "vkQueueWaitIdle"
api = "vulkan"
parameters = ["queue"]
result = true
"#;

    #[test]
    fn parses_and_builds_codec() {
        let config = CrossingConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.apis.len(), 2);
        assert_eq!(config.commands.len(), 3);
        assert!(!config.commands[0].result);

        let codec = config.build_codec().unwrap();
        assert_eq!(codec.len(), 3);
        let schema = codec.schema("vkQueueWaitIdle").unwrap();
        assert_eq!(schema.api, ApiId(2));
        assert_eq!(schema.parameters, ["queue"]);
        assert!(schema.has_result);
    }

    #[test]
    fn empty_config_is_valid() {
        let config = CrossingConfig::parse("").unwrap();
        assert!(config.build_codec().unwrap().is_empty());
    }

    #[test]
    fn unknown_api_reference() {
        let config = CrossingConfig::parse(
            r#"
[[commands]]
name = "glFlush"
api = "gles"
"#,
        )
        .unwrap();
        let err = config.build_codec().unwrap_err();
        assert!(matches!(err, EngineError::Config(ref m) if m.contains("unknown api 'gles'")));
    }

    #[test]
    fn duplicate_api_name() {
        let config = CrossingConfig::parse(
            r#"
[[apis]]
name = "gles"
id = 1

[[apis]]
name = "gles"
id = 3
"#,
        )
        .unwrap();
        assert!(matches!(config.schemas(), Err(EngineError::Config(_))));
    }

    #[test]
    fn malformed_toml() {
        assert!(matches!(
            CrossingConfig::parse("[[apis]]\nname = 1"),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn unsupported_extension() {
        let err = CrossingConfig::load("commands.yaml").unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ref m) if m.contains("unsupported config format 'yaml'")
        ));
    }

    #[test]
    fn load_from_file() {
        let path =
            std::env::temp_dir().join(format!("crossing-config-{}.toml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let config = CrossingConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().commands.len(), 3);
    }
}
