//! Tree utilities over parent/child shaped JSON data.
//!
//! Nodes are `serde_json::Value` objects with caller-chosen identity,
//! parent-identity and children keys, selected through [`TreeFields`]. A
//! tree is an ordered slice of root nodes; identity values are expected to
//! be unique across the tree (with duplicates the first pre-order occurrence
//! wins).
//!
//! Every operation here is copy-returning and never mutates its input.
//! Traversal recursion is bounded by the input depth; pathologically deep
//! trees can exhaust the stack.

use std::collections::HashMap;

use serde_json::Value;
use tracing::instrument;

use crate::errors::{Error, Result};

/// Field-name selectors for tree-shaped records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeFields<'a> {
    /// Identity key, unique across the tree.
    pub id: &'a str,
    /// Parent-identity key used by flat lists.
    pub parent: &'a str,
    /// Key holding the ordered child sequence.
    pub children: &'a str,
}

impl Default for TreeFields<'_> {
    fn default() -> Self {
        Self {
            id: "id",
            parent: "pid",
            children: "children",
        }
    }
}

impl TreeFields<'_> {
    fn id_of<'v>(&self, node: &'v Value) -> Option<&'v Value> {
        node.get(self.id)
    }

    fn children_of<'v>(&self, node: &'v Value) -> Option<&'v Vec<Value>> {
        node.get(self.children).and_then(Value::as_array)
    }
}

/// Pre-order depth-first lookup of the first node whose identity equals
/// `id`. Stops visiting as soon as a match is found.
#[instrument(level = "trace", skip(tree, fields))]
pub fn find_node<'a>(tree: &'a [Value], id: &Value, fields: &TreeFields) -> Option<&'a Value> {
    for node in tree {
        if fields.id_of(node) == Some(id) {
            return Some(node);
        }
        if let Some(children) = fields.children_of(node) {
            if let Some(found) = find_node(children, id, fields) {
                return Some(found);
            }
        }
    }
    None
}

/// Direct parent of the first node whose identity equals `id`, in pre-order.
#[instrument(level = "trace", skip(tree, fields))]
pub fn parent_of<'a>(tree: &'a [Value], id: &Value, fields: &TreeFields) -> Option<&'a Value> {
    for node in tree {
        if let Some(children) = fields.children_of(node) {
            if children.iter().any(|child| fields.id_of(child) == Some(id)) {
                return Some(node);
            }
            if let Some(found) = parent_of(children, id, fields) {
                return Some(found);
            }
        }
    }
    None
}

/// Ordered path of nodes from the topmost ancestor down to the node whose
/// identity equals `id`. Empty when there is no match.
///
/// A single pre-order pass builds identity and parent indexes, then the
/// chain is accumulated by walking parent pointers upward, so deep chains do
/// not rescan the whole tree.
#[instrument(level = "trace", skip(tree, fields))]
pub fn ancestor_chain<'a>(tree: &'a [Value], id: &Value, fields: &TreeFields) -> Vec<&'a Value> {
    let mut by_id: HashMap<&Value, &Value> = HashMap::new();
    let mut parent_by_id: HashMap<&Value, &Value> = HashMap::new();
    index_nodes(tree, None, fields, &mut by_id, &mut parent_by_id);

    let Some(&target) = by_id.get(id) else {
        return Vec::new();
    };

    let mut chain = vec![target];
    let mut cursor = id;
    while let Some(&parent) = parent_by_id.get(cursor) {
        // A well-formed tree cannot produce a chain longer than its node
        // count; duplicated identities could, so cap the walk.
        if chain.len() > by_id.len() {
            break;
        }
        chain.push(parent);
        match fields.id_of(parent) {
            Some(parent_id) => cursor = parent_id,
            None => break,
        }
    }
    chain.reverse();
    chain
}

fn index_nodes<'a>(
    nodes: &'a [Value],
    parent: Option<&'a Value>,
    fields: &TreeFields,
    by_id: &mut HashMap<&'a Value, &'a Value>,
    parent_by_id: &mut HashMap<&'a Value, &'a Value>,
) {
    for node in nodes {
        if let Some(node_id) = fields.id_of(node) {
            by_id.entry(node_id).or_insert(node);
            if let Some(parent) = parent {
                parent_by_id.entry(node_id).or_insert(parent);
            }
        }
        if let Some(children) = fields.children_of(node) {
            index_nodes(children, Some(node), fields, by_id, parent_by_id);
        }
    }
}

/// Exact-equality subtree filter.
///
/// A node survives when its `field` equals `value` or when any filtered
/// descendant survives; surviving nodes carry the filtered child set, and
/// the children key is dropped when nothing below survives. The result is
/// deep-copied and shares nothing with the input.
#[instrument(level = "trace", skip(tree, fields))]
pub fn filter_by_field(
    tree: &[Value],
    value: &Value,
    field: &str,
    fields: &TreeFields,
) -> Vec<Value> {
    let mut result = Vec::new();
    for node in tree {
        let kept_children = match fields.children_of(node) {
            Some(children) => filter_by_field(children, value, field, fields),
            None => Vec::new(),
        };
        let direct_match = node.get(field) == Some(value);
        if !direct_match && kept_children.is_empty() {
            continue;
        }

        let mut copy = node.clone();
        if let Some(object) = copy.as_object_mut() {
            if kept_children.is_empty() {
                object.remove(fields.children);
            } else {
                object.insert(fields.children.to_string(), Value::Array(kept_children));
            }
        }
        result.push(copy);
    }
    result
}

/// Fuzzy subtree search.
///
/// Matching is deliberately asymmetric, kept as-is for backward
/// compatibility with the callers this grew up with: at the visited level a
/// node survives verbatim, whole subtree included, when its `field` value
/// (a string, or a number coerced to its decimal form) contains `keyword`
/// as a substring; a node that does not match survives with its children
/// narrowed by the exact-equality [`filter_by_field`].
#[instrument(level = "trace", skip(tree, fields))]
pub fn search_by_field(
    tree: &[Value],
    keyword: &str,
    field: &str,
    fields: &TreeFields,
) -> Vec<Value> {
    let mut result = Vec::new();
    for node in tree {
        if fuzzy_match(node.get(field), keyword) {
            result.push(node.clone());
            continue;
        }
        let Some(children) = fields.children_of(node) else {
            continue;
        };
        let kept = filter_by_field(children, &Value::String(keyword.to_string()), field, fields);
        if kept.is_empty() {
            continue;
        }
        let mut copy = node.clone();
        if let Some(object) = copy.as_object_mut() {
            object.insert(fields.children.to_string(), Value::Array(kept));
        }
        result.push(copy);
    }
    result
}

fn fuzzy_match(value: Option<&Value>, keyword: &str) -> bool {
    match value {
        Some(Value::String(text)) => text.contains(keyword),
        Some(Value::Number(number)) => number.to_string().contains(keyword),
        _ => false,
    }
}

/// Pre-order flattening into a parent-pointer list.
///
/// Emitted records are copies without the children key; every non-root
/// record gets the parent key stamped with its parent's identity. Root
/// records keep whatever parent value they already carried.
#[instrument(level = "trace", skip(tree, fields))]
pub fn flatten(tree: &[Value], fields: &TreeFields) -> Vec<Value> {
    let mut list = Vec::new();
    flatten_into(tree, None, fields, &mut list);
    list
}

fn flatten_into(
    nodes: &[Value],
    parent_id: Option<&Value>,
    fields: &TreeFields,
    list: &mut Vec<Value>,
) {
    for node in nodes {
        let mut record = node.clone();
        if let Some(object) = record.as_object_mut() {
            object.remove(fields.children);
            if let Some(parent_id) = parent_id {
                object.insert(fields.parent.to_string(), parent_id.clone());
            }
        }
        list.push(record);
        if let Some(children) = fields.children_of(node) {
            flatten_into(children, fields.id_of(node), fields, list);
        }
    }
}

/// Rebuilds a nested tree from a parent-pointer list.
///
/// A record becomes a root when its parent key is absent or null, equal to
/// its own identity, or not found among the record identities. Sibling
/// order follows input order and the children key is created only for
/// records that actually receive children.
///
/// # Errors
///
/// [`Error::ChildrenFieldOccupied`] when any record already carries a
/// non-empty value at the children key; overwriting existing structure
/// would lose data the caller still owns.
#[instrument(level = "trace", skip(list, fields))]
pub fn build_tree(list: &[Value], fields: &TreeFields) -> Result<Vec<Value>> {
    for record in list {
        if let Some(existing) = record.get(fields.children) {
            let vacant =
                existing.is_null() || existing.as_array().map_or(false, Vec::is_empty);
            if !vacant {
                return Err(Error::ChildrenFieldOccupied {
                    id: fields.id_of(record).map(Value::to_string).unwrap_or_default(),
                    field: fields.children.to_string(),
                });
            }
        }
    }

    // First occurrence wins on duplicated identities.
    let mut position: HashMap<&Value, usize> = HashMap::new();
    for (index, record) in list.iter().enumerate() {
        if let Some(id) = fields.id_of(record) {
            position.entry(id).or_insert(index);
        }
    }

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); list.len()];
    let mut roots = Vec::new();
    for (index, record) in list.iter().enumerate() {
        let id = fields.id_of(record);
        let parent = record.get(fields.parent).filter(|value| !value.is_null());
        match parent {
            Some(parent_id) if Some(parent_id) != id => match position.get(parent_id) {
                Some(&parent_index) => children_of[parent_index].push(index),
                None => roots.push(index),
            },
            _ => roots.push(index),
        }
    }

    Ok(roots
        .iter()
        .map(|&root| assemble(root, list, &children_of, fields))
        .collect())
}

fn assemble(
    index: usize,
    list: &[Value],
    children_of: &[Vec<usize>],
    fields: &TreeFields,
) -> Value {
    let mut node = list[index].clone();
    // Drop a leftover empty children slot so leaves stay leaves.
    if let Some(object) = node.as_object_mut() {
        object.remove(fields.children);
    }
    if !children_of[index].is_empty() {
        let children: Vec<Value> = children_of[index]
            .iter()
            .map(|&child| assemble(child, list, children_of, fields))
            .collect();
        if let Some(object) = node.as_object_mut() {
            object.insert(fields.children.to_string(), Value::Array(children));
        }
    }
    node
}
