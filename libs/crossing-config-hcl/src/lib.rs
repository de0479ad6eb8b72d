use crossing_engine::config::{ConfigParser, CrossingConfig};
use crossing_engine::error::EngineError;

/// Reads [`CrossingConfig`] from HCL.
///
/// Lists of objects map onto the TOML array-of-tables layout:
///
/// ```hcl
/// apis = [
///   {
///     name = "gles"
///     id   = 1
///   }
/// ]
/// ```
pub struct HclParser;

impl ConfigParser for HclParser {
    fn extensions(&self) -> &[&str] {
        &["hcl"]
    }

    fn parse(&self, content: &str) -> Result<CrossingConfig, EngineError> {
        hcl::from_str(content).map_err(|e| EngineError::Config(e.to_string()))
    }
}
