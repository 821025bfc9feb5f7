use super::node::{SchemaNode, SchemaTree};
use crate::codec::PATH_SEPARATOR;
use ahash::AHashSet;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueSeverity {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// Two siblings share a name; their dotted paths would collide.
    DuplicateName,
    /// The name is empty, producing an empty path segment.
    EmptyName,
    /// The name contains the path separator and would split into extra segments.
    SeparatorInName,
    /// A complex node carries enumeration values the codec will ignore.
    IgnoredEnum,
}

/// A structural problem found in a schema tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            IssueSeverity::Warning => "warning",
            IssueSeverity::Error => "error",
        };
        write!(f, "{} at '{}': {}", level, self.path, self.message)
    }
}

impl SchemaTree {
    /// Checks the tree for problems that would corrupt dotted paths.
    ///
    /// The codec never calls this itself; schema sources are expected to guarantee
    /// well-formed trees. An empty result means the tree is safe to flatten.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        validate_siblings(&self.nodes, "", &mut issues);
        issues
    }

    /// `true` when `validate` reports no errors (warnings are allowed).
    pub fn is_well_formed(&self) -> bool {
        self.validate()
            .iter()
            .all(|issue| issue.severity != IssueSeverity::Error)
    }
}

fn validate_siblings(nodes: &[SchemaNode], parent_path: &str, issues: &mut Vec<ValidationIssue>) {
    let mut seen = AHashSet::new();

    for node in nodes {
        let path = if parent_path.is_empty() {
            node.name.clone()
        } else {
            format!("{}{}{}", parent_path, PATH_SEPARATOR, node.name)
        };

        if node.name.is_empty() {
            issues.push(ValidationIssue {
                path: path.clone(),
                kind: IssueKind::EmptyName,
                severity: IssueSeverity::Error,
                message: "parameter name is empty".to_string(),
            });
        } else if node.name.contains(PATH_SEPARATOR) {
            issues.push(ValidationIssue {
                path: path.clone(),
                kind: IssueKind::SeparatorInName,
                severity: IssueSeverity::Error,
                message: format!(
                    "name '{}' contains the path separator '{}'",
                    node.name, PATH_SEPARATOR
                ),
            });
        }

        if !seen.insert(node.name.as_str()) {
            issues.push(ValidationIssue {
                path: path.clone(),
                kind: IssueKind::DuplicateName,
                severity: IssueSeverity::Error,
                message: format!("sibling name '{}' is declared more than once", node.name),
            });
        }

        if node.is_complex() && node.enum_values.is_some() {
            issues.push(ValidationIssue {
                path: path.clone(),
                kind: IssueKind::IgnoredEnum,
                severity: IssueSeverity::Warning,
                message: "enumeration on a complex parameter is ignored".to_string(),
            });
        }

        validate_siblings(&node.children, &path, issues);
    }
}
