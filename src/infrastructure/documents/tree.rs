//! In-memory key tree for commented documents
//!
//! Nodes keep their comments next to their values so that replacing a value
//! never drops the text an operator wrote above it.

use serde_json::{Map, Value};

use crate::domain::entities::Comment;
use crate::domain::value_objects::KeyPath;
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node {
    pub key: String,
    /// Comment blocks above the key that are separated from it by blank lines
    pub detached: Vec<Comment>,
    /// Comment block directly above the key
    pub comment: Option<Comment>,
    pub value: NodeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeValue {
    Scalar(Value),
    List(Vec<Value>),
    Section(Vec<Node>),
}

impl Node {
    pub fn new(key: impl Into<String>, value: NodeValue) -> Self {
        Self {
            key: key.into(),
            detached: Vec::new(),
            comment: None,
            value,
        }
    }
}

impl NodeValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => NodeValue::Section(
                map.into_iter()
                    .map(|(key, value)| Node::new(key, NodeValue::from_json(value)))
                    .collect(),
            ),
            Value::Array(items) => NodeValue::List(items),
            scalar => NodeValue::Scalar(scalar),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            NodeValue::Scalar(value) => value.clone(),
            NodeValue::List(items) => Value::Array(items.clone()),
            NodeValue::Section(children) => Value::Object(section_to_map(children)),
        }
    }
}

pub(crate) fn section_to_map(nodes: &[Node]) -> Map<String, Value> {
    nodes
        .iter()
        .map(|node| (node.key.clone(), node.value.to_json()))
        .collect()
}

pub(crate) fn find<'a>(nodes: &'a [Node], key: &KeyPath) -> Option<&'a Node> {
    let (first, rest) = key.segments().split_first()?;
    let node = nodes.iter().find(|n| &n.key == first)?;
    if rest.is_empty() {
        return Some(node);
    }
    match &node.value {
        NodeValue::Section(children) => {
            let sub = KeyPath::from_segments(rest.iter().cloned()).ok()?;
            find(children, &sub)
        }
        _ => None,
    }
}

pub(crate) fn find_mut<'a>(nodes: &'a mut [Node], key: &KeyPath) -> Option<&'a mut Node> {
    let mut current = nodes;
    let segments = key.segments();
    for (i, segment) in segments.iter().enumerate() {
        let node = current.iter_mut().find(|n| &n.key == segment)?;
        if i + 1 == segments.len() {
            return Some(node);
        }
        match &mut node.value {
            NodeValue::Section(children) => current = children.as_mut_slice(),
            _ => return None,
        }
    }
    None
}

/// Set `key` to `value`, creating sections on the way.
///
/// A value already stored where a section is needed is never replaced, the
/// conflicting parent is reported instead. A null parent counts as absent.
pub(crate) fn insert(nodes: &mut Vec<Node>, key: &KeyPath, value: Value) -> ConfigResult<()> {
    let mut current = nodes;
    let segments = key.segments();
    let parents = &segments[..segments.len() - 1];

    for (depth, segment) in parents.iter().enumerate() {
        let index = match current.iter().position(|n| &n.key == segment) {
            Some(index) => index,
            None => {
                current.push(Node::new(segment.clone(), NodeValue::Section(Vec::new())));
                current.len() - 1
            }
        };
        let node = &mut current[index];
        if node.value == NodeValue::Scalar(Value::Null) {
            node.value = NodeValue::Section(Vec::new());
        }
        current = match &mut node.value {
            NodeValue::Section(children) => children,
            _ => {
                return Err(ConfigError::Coercion {
                    key: segments[..=depth].join("."),
                    message: format!("expected a section to hold '{}'", key),
                })
            }
        };
    }

    let leaf = key.leaf();
    let new_value = NodeValue::from_json(value);
    match current.iter_mut().find(|n| n.key == leaf) {
        Some(existing) => merge_value(&mut existing.value, new_value),
        None => current.push(Node::new(leaf, new_value)),
    }
    Ok(())
}

/// Replace `old` with `new`, carrying over comments of children that survive.
fn merge_value(old: &mut NodeValue, new: NodeValue) {
    match (old, new) {
        (NodeValue::Section(old_children), NodeValue::Section(new_children)) => {
            let mut merged = Vec::with_capacity(new_children.len());
            for mut child in new_children {
                if let Some(position) = old_children.iter().position(|n| n.key == child.key) {
                    let mut previous = old_children.remove(position);
                    merge_value(&mut previous.value, child.value);
                    child = previous;
                }
                merged.push(child);
            }
            *old_children = merged;
        }
        (old, new) => *old = new,
    }
}

pub(crate) fn remove(nodes: &mut Vec<Node>, key: &KeyPath) -> Option<Node> {
    let siblings = match key.parent() {
        Some(parent) => match &mut find_mut(nodes, &parent)?.value {
            NodeValue::Section(children) => children,
            _ => return None,
        },
        None => nodes,
    };
    let position = siblings.iter().position(|n| n.key == key.leaf())?;
    Some(siblings.remove(position))
}

/// Dot-joined paths of every non-section value, in document order.
pub(crate) fn leaf_paths(nodes: &[Node], prefix: &str, out: &mut Vec<String>) {
    for node in nodes {
        let path = if prefix.is_empty() {
            node.key.clone()
        } else {
            format!("{}.{}", prefix, node.key)
        };
        match &node.value {
            NodeValue::Section(children) if !children.is_empty() => {
                leaf_paths(children, &path, out)
            }
            _ => out.push(path),
        }
    }
}
