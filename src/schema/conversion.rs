use super::node::{LeafType, Occurs, SchemaNode, SchemaTree};
use crate::error::SchemaError;
use ahash::AHashMap;
use serde::Deserialize;
use tracing::debug;

/// Complex types nested deeper than this are flattened into a single leaf by default.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// One parameter as emitted by the schema source's JSON endpoint.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ParameterDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default, alias = "isComplex")]
    pub is_complex: bool,
    #[serde(default, alias = "minOccurs")]
    pub min_occurs: Option<u32>,
    #[serde(default, alias = "maxOccurs")]
    pub max_occurs: Option<serde_json::Value>,
    #[serde(default, alias = "enumValues")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default)]
    pub children: Option<Vec<ParameterDescriptor>>,
}

/// The two shapes a schema document arrives in: a bare array of descriptors or the
/// `{"params": [...]}` envelope returned by the operation-params endpoint.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SchemaDocument {
    Bare(Vec<ParameterDescriptor>),
    Wrapped { params: Vec<ParameterDescriptor> },
}

impl SchemaDocument {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::JsonParseError(e.to_string()))
    }

    pub fn into_descriptors(self) -> Vec<ParameterDescriptor> {
        match self {
            SchemaDocument::Bare(params) | SchemaDocument::Wrapped { params } => params,
        }
    }
}

/// A trait for schema formats that can be converted into a `SchemaTree`.
///
/// Implement this on the types your schema source produces to hand them to the codec.
///
/// ```rust
/// use paramtree::error::SchemaError;
/// use paramtree::schema::{IntoSchema, LeafType, SchemaNode, SchemaTree};
///
/// struct Field { name: String, numeric: bool }
/// struct Operation { fields: Vec<Field> }
///
/// impl IntoSchema for Operation {
///     fn into_schema(self) -> Result<SchemaTree, SchemaError> {
///         Ok(SchemaTree::new(
///             self.fields
///                 .into_iter()
///                 .map(|f| {
///                     let kind = if f.numeric { LeafType::Integer } else { LeafType::String };
///                     SchemaNode::leaf(f.name, kind)
///                 })
///                 .collect(),
///         ))
///     }
/// }
/// ```
pub trait IntoSchema {
    /// Consumes the object and converts it into a codec-ready schema tree.
    fn into_schema(self) -> Result<SchemaTree, SchemaError>;
}

impl IntoSchema for Vec<ParameterDescriptor> {
    fn into_schema(self) -> Result<SchemaTree, SchemaError> {
        SchemaConverter::builder().build().convert(self)
    }
}

impl IntoSchema for SchemaDocument {
    fn into_schema(self) -> Result<SchemaTree, SchemaError> {
        self.into_descriptors().into_schema()
    }
}

impl IntoSchema for SchemaTree {
    fn into_schema(self) -> Result<SchemaTree, SchemaError> {
        Ok(self)
    }
}

/// Converts schema-source descriptors into a `SchemaTree`, resolving XSD type names to
/// coercion kinds and bounding the nesting depth.
pub struct SchemaConverter {
    type_map: AHashMap<String, LeafType>,
    max_depth: usize,
}

pub struct SchemaConverterBuilder {
    type_map: AHashMap<String, LeafType>,
    max_depth: usize,
}

impl Default for SchemaConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaConverterBuilder {
    pub fn new() -> Self {
        let mut type_map = AHashMap::new();
        register_default_type_names(&mut type_map);
        Self {
            type_map,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Maps a source type name onto a coercion kind, overriding any default mapping.
    pub fn with_type_mapping(mut self, source_type_name: &str, leaf_type: LeafType) -> Self {
        self.type_map
            .insert(source_type_name.to_string(), leaf_type);
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> SchemaConverter {
        SchemaConverter {
            type_map: self.type_map,
            max_depth: self.max_depth,
        }
    }
}

fn register_default_type_names(map: &mut AHashMap<String, LeafType>) {
    let integers = [
        "int",
        "integer",
        "long",
        "unsignedInt",
        "unsignedLong",
        "short",
    ];
    let floats = ["float", "double", "decimal"];
    let strings = [
        "string",
        "anyURI",
        "duration",
        "token",
        "QName",
        "NCName",
        "ReferenceToken",
        "base64Binary",
    ];

    for name in integers {
        map.insert(name.to_string(), LeafType::Integer);
    }
    for name in floats {
        map.insert(name.to_string(), LeafType::Float);
    }
    for name in strings {
        map.insert(name.to_string(), LeafType::String);
    }
    map.insert("boolean".to_string(), LeafType::Boolean);
    map.insert(
        "dateTime".to_string(),
        LeafType::Other("datetime".to_string()),
    );
}

impl SchemaConverter {
    pub fn builder() -> SchemaConverterBuilder {
        SchemaConverterBuilder::new()
    }

    /// Resolves a source type name to the kind the codec coerces with.
    pub fn resolve_type(&self, type_name: &str) -> LeafType {
        self.type_map
            .get(type_name)
            .cloned()
            .unwrap_or_else(|| LeafType::from_name(type_name))
    }

    pub fn convert(&self, descriptors: Vec<ParameterDescriptor>) -> Result<SchemaTree, SchemaError> {
        let nodes = self.convert_level(descriptors, 0, "")?;
        let tree = SchemaTree::new(nodes);
        debug!(
            top_level = tree.len(),
            leaves = tree.leaf_count(),
            "converted parameter schema"
        );
        Ok(tree)
    }

    pub fn convert_json(&self, json: &str) -> Result<SchemaTree, SchemaError> {
        self.convert(SchemaDocument::from_json(json)?.into_descriptors())
    }

    fn convert_level(
        &self,
        descriptors: Vec<ParameterDescriptor>,
        depth: usize,
        parent_path: &str,
    ) -> Result<Vec<SchemaNode>, SchemaError> {
        descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| self.convert_node(descriptor, depth, parent_path, index))
            .collect()
    }

    fn convert_node(
        &self,
        descriptor: ParameterDescriptor,
        depth: usize,
        parent_path: &str,
        index: usize,
    ) -> Result<SchemaNode, SchemaError> {
        let name = match descriptor.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                let location = if parent_path.is_empty() {
                    format!("[{}]", index)
                } else {
                    format!("{}[{}]", parent_path, index)
                };
                return Err(SchemaError::MissingName(location));
            }
        };

        let max_occurs = parse_max_occurs(&name, descriptor.max_occurs.as_ref())?;
        let min_occurs = descriptor
            .min_occurs
            .unwrap_or(u32::from(descriptor.required.unwrap_or(false)));
        let required = descriptor.required.unwrap_or(min_occurs >= 1);
        let type_name = descriptor.type_name.unwrap_or_default();

        let children = descriptor.children.unwrap_or_default();
        let truncated = !children.is_empty() && depth >= self.max_depth;
        if truncated {
            debug!(parameter = %name, depth, "complex parameter exceeds depth limit, kept as leaf");
        }

        let children = if truncated {
            Vec::new()
        } else {
            let path = if parent_path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", parent_path, name)
            };
            self.convert_level(children, depth + 1, &path)?
        };

        let leaf_type = if children.is_empty() {
            if type_name.is_empty() {
                LeafType::String
            } else {
                self.resolve_type(&type_name)
            }
        } else {
            LeafType::Other(type_name)
        };

        Ok(SchemaNode {
            name,
            leaf_type,
            required,
            enum_values: descriptor.enum_values.filter(|values| !values.is_empty()),
            min_occurs,
            max_occurs,
            children,
        })
    }
}

fn parse_max_occurs(name: &str, value: Option<&serde_json::Value>) -> Result<Occurs, SchemaError> {
    let invalid = |value: &serde_json::Value| SchemaError::InvalidOccurs {
        name: name.to_string(),
        value: value.to_string(),
    };

    match value {
        None | Some(serde_json::Value::Null) => Ok(Occurs::default()),
        Some(number @ serde_json::Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Occurs::Bounded)
            .ok_or_else(|| invalid(number)),
        Some(serde_json::Value::String(s)) if s == "unbounded" => Ok(Occurs::Unbounded),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Occurs::Bounded)
            .map_err(|_| SchemaError::InvalidOccurs {
                name: name.to_string(),
                value: s.clone(),
            }),
        Some(other) => Err(invalid(other)),
    }
}
