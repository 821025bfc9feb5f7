use serde::{Deserialize, Serialize};
use std::fmt;

/// The coercion kind of a leaf parameter.
///
/// Any declared type name outside the four primitive kinds is kept verbatim in
/// `Other` so that the UI can still show it; it coerces like `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LeafType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
    Other(String),
}

impl LeafType {
    /// Resolves a kind name (`"string"`, `"integer"`, `"float"`, `"boolean"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => LeafType::String,
            "integer" => LeafType::Integer,
            "float" => LeafType::Float,
            "boolean" => LeafType::Boolean,
            other => LeafType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LeafType::String => "string",
            LeafType::Integer => "integer",
            LeafType::Float => "float",
            LeafType::Boolean => "boolean",
            LeafType::Other(name) => name,
        }
    }
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LeafType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LeafType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(LeafType::from_name(&name))
    }
}

/// How many times an element may occur, as declared by the schema source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurs {
    Bounded(u32),
    Unbounded,
}

impl Occurs {
    pub fn is_repeated(&self) -> bool {
        match self {
            Occurs::Bounded(n) => *n > 1,
            Occurs::Unbounded => true,
        }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Occurs::Bounded(1)
    }
}

impl fmt::Display for Occurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occurs::Bounded(n) => write!(f, "{}", n),
            Occurs::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl Serialize for Occurs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Occurs::Bounded(n) => serializer.serialize_u32(*n),
            Occurs::Unbounded => serializer.serialize_str("unbounded"),
        }
    }
}

/// A single parameter in an operation's schema.
///
/// A node with a non-empty `children` list is *complex*: it is a container and its own
/// `leaf_type` and `enum_values` are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaNode {
    pub name: String,
    pub leaf_type: LeafType,
    pub required: bool,
    pub enum_values: Option<Vec<String>>,
    pub min_occurs: u32,
    pub max_occurs: Occurs,
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Creates an optional leaf of the given type.
    pub fn leaf(name: impl Into<String>, leaf_type: LeafType) -> Self {
        Self {
            name: name.into(),
            leaf_type,
            ..Self::default()
        }
    }

    /// Creates an optional complex node holding `children`.
    pub fn complex(name: impl Into<String>, children: Vec<SchemaNode>) -> Self {
        Self {
            name: name.into(),
            children,
            ..Self::default()
        }
    }

    /// Marks the node as required (`min_occurs` of at least one).
    pub fn required(mut self) -> Self {
        self.required = true;
        self.min_occurs = self.min_occurs.max(1);
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_occurs(mut self, max_occurs: Occurs) -> Self {
        self.max_occurs = max_occurs;
        self
    }

    pub fn is_complex(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaves in the subtree rooted at this node.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(SchemaNode::leaf_count).sum()
        }
    }
}

/// The parameter schema of one operation: its ordered top-level parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaTree {
    pub nodes: Vec<SchemaNode>,
}

impl SchemaTree {
    pub fn new(nodes: Vec<SchemaNode>) -> Self {
        Self { nodes }
    }

    /// `true` when the operation takes no parameters.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaNode> {
        self.nodes.iter()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().map(SchemaNode::leaf_count).sum()
    }
}

impl From<Vec<SchemaNode>> for SchemaTree {
    fn from(nodes: Vec<SchemaNode>) -> Self {
        Self { nodes }
    }
}

impl<'a> IntoIterator for &'a SchemaTree {
    type Item = &'a SchemaNode;
    type IntoIter = std::slice::Iter<'a, SchemaNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
