use super::{LeafDescriptor, PATH_SEPARATOR};
use crate::schema::SchemaNode;
use itertools::Itertools;
use tracing::trace;

/// Walks `nodes` depth-first in declaration order, appending one descriptor per leaf.
///
/// `prefix` holds the names of the ancestors of `nodes`; it is restored before returning.
pub(super) fn flatten_nodes<'a>(
    nodes: &'a [SchemaNode],
    prefix: &mut Vec<&'a str>,
    out: &mut Vec<LeafDescriptor>,
) {
    for node in nodes {
        prefix.push(&node.name);
        if node.is_complex() {
            flatten_nodes(&node.children, prefix, out);
        } else {
            let descriptor = describe_leaf(node, prefix);
            trace!(path = %descriptor.path, kind = %descriptor.leaf_type, "flattened leaf");
            out.push(descriptor);
        }
        prefix.pop();
    }
}

fn describe_leaf(node: &SchemaNode, path: &[&str]) -> LeafDescriptor {
    LeafDescriptor {
        path: path.iter().join(&PATH_SEPARATOR.to_string()),
        name: node.name.clone(),
        leaf_type: node.leaf_type.clone(),
        required: node.required,
        enum_values: node.enum_values.clone(),
        min_occurs: node.min_occurs,
        max_occurs: node.max_occurs,
        depth: path.len() - 1,
    }
}
