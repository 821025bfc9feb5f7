use crate::codec::{LeafDescriptor, PathValueMap};
use crate::error::{CodecError, DataError, SchemaError};
use crate::schema::{SchemaConverter, SchemaTree};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Raw form input as submitted by a UI: dotted path to the text the user typed.
///
/// The JSON form is a flat object. Numbers and booleans are accepted and turned into
/// their textual form; `null` counts as a blank field.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct RawValues {
    pub values: IndexMap<String, String>,
}

impl RawValues {
    /// Load raw values from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let object: IndexMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| DataError::JsonParseError(e.to_string()))?;

        let values = object
            .into_iter()
            .map(|(path, value)| {
                let raw = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Null => String::new(),
                    _ => return Err(DataError::UnsupportedValue { path }),
                };
                Ok((path, raw))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { values })
    }

    pub fn insert(&mut self, path: impl Into<String>, raw: impl Into<String>) {
        self.values.insert(path.into(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pairs these values with the kinds of the given leaves.
    pub fn typed(&self, descriptors: &[LeafDescriptor]) -> Result<PathValueMap, CodecError> {
        PathValueMap::from_descriptors(
            descriptors,
            self.values
                .iter()
                .map(|(path, raw)| (path.clone(), raw.clone())),
        )
    }
}

/// Reads a schema descriptor file and converts it with `converter`.
pub fn load_schema_file(
    path: impl AsRef<Path>,
    converter: &SchemaConverter,
) -> Result<SchemaTree, SchemaError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SchemaError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    converter.convert_json(&content)
}
