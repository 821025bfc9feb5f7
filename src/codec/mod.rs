use crate::error::CodecError;
use crate::schema::{LeafType, Occurs, SchemaNode, SchemaTree};
use crate::value::CollectedParams;
use ahash::AHashMap;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

mod coerce;
mod collect;
mod flatten;

pub use coerce::{TRUE_LITERAL, coerce};

use collect::{FailureMode, collect_values};
use flatten::flatten_nodes;

/// Separator between the names of a dotted leaf path.
pub const PATH_SEPARATOR: char = '.';

/// One addressable leaf of a flattened schema, as rendered by a UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafDescriptor {
    /// Names from the schema root to this leaf, joined with `.`.
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub leaf_type: LeafType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    pub min_occurs: u32,
    pub max_occurs: Occurs,
    /// Number of complex ancestors.
    pub depth: usize,
}

impl LeafDescriptor {
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(PATH_SEPARATOR)
    }
}

/// A raw, uncoerced user input together with the kind it must be coerced to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldInput {
    pub raw: String,
    pub leaf_type: LeafType,
}

/// Raw user input keyed by dotted path, in submission order.
///
/// Blank values (after trimming) are kept here but mean "not provided" to `collect`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathValueMap {
    entries: IndexMap<String, FieldInput>,
}

impl PathValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs raw inputs with the kinds carried by `descriptors`.
    ///
    /// Entries follow descriptor order. A raw input whose path is not one of the
    /// descriptors' paths is rejected.
    pub fn from_descriptors<I, K, V>(descriptors: &[LeafDescriptor], raw: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut supplied: AHashMap<String, String> = raw
            .into_iter()
            .map(|(path, value)| (path.into(), value.into()))
            .collect();

        let mut map = Self::new();
        for descriptor in descriptors {
            if let Some(raw) = supplied.remove(&descriptor.path) {
                map.insert(descriptor.path.clone(), descriptor.leaf_type.clone(), raw);
            }
        }

        if let Some(unknown) = supplied.into_iter().map(|(path, _)| path).min() {
            return Err(CodecError::UnknownPath(unknown));
        }
        Ok(map)
    }

    /// Records the raw input for `path`, replacing any earlier input for the same path.
    pub fn insert(&mut self, path: impl Into<String>, leaf_type: LeafType, raw: impl Into<String>) {
        self.entries.insert(
            path.into(),
            FieldInput {
                raw: raw.into(),
                leaf_type,
            },
        );
    }

    pub fn with(mut self, path: impl Into<String>, leaf_type: LeafType, raw: impl Into<String>) -> Self {
        self.insert(path, leaf_type, raw);
        self
    }

    pub fn get(&self, path: &str) -> Option<&FieldInput> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldInput> {
        self.entries.iter()
    }
}

/// The schema-driven parameter encoder/decoder.
///
/// Both directions are pure functions of their inputs; nothing is retained between calls.
pub struct ParamCodec;

impl ParamCodec {
    /// Flattens a schema into its addressable leaves, in pre-order declaration order.
    ///
    /// Complex nodes produce no descriptor of their own. An empty schema yields an
    /// empty list.
    pub fn flatten(tree: &SchemaTree) -> Vec<LeafDescriptor> {
        Self::flatten_under(&tree.nodes, &[])
    }

    /// Flattens `nodes` as if they were nested below the names in `prefix`.
    pub fn flatten_under(nodes: &[SchemaNode], prefix: &[&str]) -> Vec<LeafDescriptor> {
        let mut path = prefix.to_vec();
        let mut descriptors = Vec::new();
        flatten_nodes(nodes, &mut path, &mut descriptors);
        debug!(
            leaves = descriptors.len(),
            prefix = %prefix.join("."),
            "flattened parameter schema"
        );
        descriptors
    }

    /// Rebuilds the nested parameter object from raw leaf inputs.
    ///
    /// Blank inputs are omitted and never create their parent groups. Fails with the
    /// first value that cannot be coerced to its declared kind.
    pub fn collect(values: &PathValueMap) -> Result<CollectedParams, CodecError> {
        collect_values(values, FailureMode::FailFast)
    }

    /// Like `collect`, but reports every failing input at once as `CodecError::Multiple`.
    pub fn collect_all(values: &PathValueMap) -> Result<CollectedParams, CodecError> {
        collect_values(values, FailureMode::Gather)
    }
}
