use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::file_format::SerdeFormat;

pub type Result<T> = anyhow::Result<T>;

pub fn serialize<T: Serialize>(value: &T, format: SerdeFormat) -> Result<String> {
    let text = match format {
        SerdeFormat::Yaml => serde_yml::to_string(value)?,
        SerdeFormat::Json => serde_json::to_string_pretty(value)?,
    };

    Ok(text)
}

pub fn deserialize<T: DeserializeOwned>(text: &str, format: SerdeFormat) -> Result<T> {
    match format {
        SerdeFormat::Yaml => Ok(serde_yml::from_str(text)?),
        SerdeFormat::Json => Ok(serde_json::from_str(text)?),
    }
}

/// Reads and deserializes `path`, picking the format from its extension.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = SerdeFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    deserialize(&text, format)
}
