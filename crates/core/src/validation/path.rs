//! Dotted field paths with `*` wildcards.
//!
//! `address.*.city` expands against the input into one concrete path per
//! element of `address` (`address.0.city`, `address.1.city`, ...). Numeric
//! segments index into sequences; every other segment is a mapping key.

use serde_json::{Map, Value};

/// Segment that matches every element of a sequence or mapping.
pub const WILDCARD: &str = "*";

/// A concrete path produced by expanding a field pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField<'a> {
    pub path: String,
    /// `None` when nothing exists at `path`.
    pub value: Option<&'a Value>,
}

#[derive(Clone, Copy)]
enum Node<'a> {
    Root(&'a Map<String, Value>),
    Value(&'a Value),
    Missing,
}

impl<'a> Node<'a> {
    fn child(self, segment: &str) -> Node<'a> {
        let found = match self {
            Node::Root(map) | Node::Value(Value::Object(map)) => map.get(segment),
            Node::Value(Value::Array(items)) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        };
        found.map_or(Node::Missing, Node::Value)
    }

    fn children(self) -> Vec<(String, Node<'a>)> {
        match self {
            Node::Root(map) | Node::Value(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (key.clone(), Node::Value(value)))
                .collect(),
            Node::Value(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), Node::Value(value)))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn value(self) -> Option<&'a Value> {
        match self {
            Node::Value(value) => Some(value),
            Node::Root(_) | Node::Missing => None,
        }
    }

    fn is_sequence(self) -> bool {
        matches!(self, Node::Value(Value::Array(_)))
    }
}

/// Expand `pattern` against `data`.
///
/// A pattern without wildcards always yields exactly one entry, whose value
/// may be `None`. A wildcard over a missing or scalar value yields nothing.
pub fn expand<'a>(pattern: &str, data: &'a Map<String, Value>) -> Vec<ResolvedField<'a>> {
    let segments: Vec<&str> = pattern.split('.').collect();
    let mut out = Vec::new();
    walk(Node::Root(data), &segments, String::new(), &mut out);
    out
}

fn walk<'a>(node: Node<'a>, segments: &[&str], prefix: String, out: &mut Vec<ResolvedField<'a>>) {
    let Some((segment, rest)) = segments.split_first() else {
        out.push(ResolvedField {
            path: prefix,
            value: node.value(),
        });
        return;
    };

    if *segment == WILDCARD {
        for (key, child) in node.children() {
            walk(child, rest, join(&prefix, &key), out);
        }
    } else {
        walk(node.child(segment), rest, join(&prefix, segment), out);
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Look up a concrete (wildcard-free) path.
pub fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    path.split('.')
        .fold(Node::Root(data), |node, segment| node.child(segment))
        .value()
}

/// Whether `path` contains a wildcard segment.
pub fn is_pattern(path: &str) -> bool {
    path.split('.').any(|segment| segment == WILDCARD)
}

/// Replace each `*` in `other` with the segment `concrete` holds at the
/// matching wildcard of `pattern`, in order. `address.*.city` bound for
/// `address.2.confirm` (pattern `address.*.confirm`) gives `address.2.city`.
/// Wildcards beyond those in `pattern` are left in place.
pub fn bind_wildcards(other: &str, pattern: &str, concrete: &str) -> String {
    if !is_pattern(other) {
        return other.to_string();
    }
    let mut bound = pattern
        .split('.')
        .zip(concrete.split('.'))
        .filter(|(p, _)| *p == WILDCARD)
        .map(|(_, c)| c);
    other
        .split('.')
        .map(|segment| match segment {
            WILDCARD => bound.next().unwrap_or(WILDCARD),
            literal => literal,
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Copy `value` into `target` at the concrete `path`, creating intermediate
/// containers that mirror the shape found in `source` (sequences stay
/// sequences, padded with `null` where earlier elements were not copied).
pub fn assign(target: &mut Map<String, Value>, source: &Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let slot = target.entry(head.to_string()).or_insert(Value::Null);
    assign_into(slot, Node::Root(source).child(head), rest, value);
}

fn assign_into(slot: &mut Value, source: Node<'_>, segments: &[&str], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    let child_source = source.child(segment);

    match segment.parse::<usize>() {
        Ok(index) if source.is_sequence() => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                if items.len() <= index {
                    items.resize(index + 1, Value::Null);
                }
                assign_into(&mut items[index], child_source, rest, value);
            }
        }
        _ => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                let entry = map.entry(segment.to_string()).or_insert(Value::Null);
                assign_into(entry, child_source, rest, value);
            }
        }
    }
}
