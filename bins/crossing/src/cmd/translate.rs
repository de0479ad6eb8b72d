use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crossing_api::{AtomCodec, Value};
use crossing_config_hcl::HclParser;
use crossing_engine::{CrossingConfig, Direction, EngineError, TomlParser, Translator};

pub fn translator_from_config(path: &Path) -> Result<Translator, EngineError> {
    let config = CrossingConfig::load_with(path, &[&TomlParser, &HclParser])?;
    let codec = config.build_codec()?;
    tracing::info!(apis = config.apis.len(), commands = codec.len(), "schema codec ready");
    Ok(Translator::new(Arc::new(codec)))
}

pub fn read_input(input: &str) -> Result<String, EngineError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// Translate a JSON array of values and render each result on its own line.
///
/// `to-internal` renders with `Display`, atoms have no JSON form.
/// `to-service` first decodes top-level commands into atoms so the atom rule
/// is exercised too, then renders the service values as JSON.
pub fn run(
    translator: &Translator,
    direction: Direction,
    input: &str,
) -> Result<Vec<String>, EngineError> {
    let values: Vec<Value> = serde_json::from_str(input)?;
    tracing::debug!(values = values.len(), %direction, "translating");

    match direction {
        Direction::ToInternal => {
            let out = translator.translate_all(direction, values)?;
            Ok(out.iter().map(ToString::to_string).collect())
        }
        Direction::ToService => {
            let internal = values
                .into_iter()
                .map(|v| match v {
                    Value::Command(cmd) => translator.codec().to_atom(&cmd).map(Value::Atom),
                    other => Ok(other),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let out = translator.translate_all(direction, internal)?;
            out.iter()
                .map(|v| serde_json::to_string(v).map_err(EngineError::from))
                .collect()
        }
    }
}
