//! Schema → example value synthesis.
//!
//! The recursive core of the crate: turns a schema node into a
//! type-appropriate placeholder value. Recursion is bounded twice over, by a
//! hard nesting ceiling and by a per-reference expansion budget, so
//! self-referential schemas (trees, linked lists) terminate with a marker
//! instead of overflowing the stack.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::refs::{schema_ref, LookupTable};

/// Absolute nesting ceiling, independent of cycle tracking.
const MAX_DEPTH: u32 = 10;

/// How many times a single referenced schema may enter expansion before the
/// cycle is cut off.
const MAX_REF_VISITS: u32 = 2;

/// Placeholder for string-family schemas.
const STRING_PLACEHOLDER: &str = "Example string";

/// Value emitted in place of an expansion the cycle budget refused.
fn cycle_terminator() -> Value {
    Value::Array(vec![Value::Null])
}

/// Per-call record of how often each referenced schema has entered
/// expansion. Allocated fresh for every top-level synthesis call and
/// discarded afterwards.
#[derive(Debug, Default)]
pub struct RecursionState {
    visits: HashMap<String, u32>,
}

impl RecursionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record another expansion of `uri`. Returns true once the budget for
    /// that reference is spent.
    fn enter(&mut self, uri: &str) -> bool {
        let count = self.visits.entry(uri.to_string()).or_insert(0);
        *count += 1;
        *count > MAX_REF_VISITS
    }
}

/// Synthesize an example value for the schema of property `name`.
///
/// A literal `example` on the node wins outright. Primitive types map to
/// fixed placeholders; arrays and objects recurse through
/// [`example_object`]. Returns `None` when nothing can be synthesized: the
/// node carries neither an example nor a usable `type`, its `$ref` is
/// dangling, or the nesting ceiling was exceeded.
pub fn example_value(
    name: &str,
    schema: &Value,
    only_required: bool,
    depth: u32,
    state: &mut RecursionState,
    refs: &LookupTable,
) -> Option<Value> {
    let uri = schema_ref(schema);
    let node = match uri {
        Some(uri) => match refs.get(uri) {
            Some(node) => node,
            None => {
                log::trace!("dangling $ref {uri} for property {name}");
                return None;
            }
        },
        None => schema,
    };

    if let Some(example) = node.get("example") {
        return Some(example.clone());
    }

    let ty = node.get("type").and_then(|v| v.as_str())?;

    if ty.starts_with("string") {
        return Some(Value::from(STRING_PLACEHOLDER));
    }
    if ty == "integer" {
        return Some(match node.get("format").and_then(|v| v.as_str()) {
            Some("int32") => Value::from(i32::MAX),
            _ => Value::from(i64::MAX),
        });
    }
    if ty == "number" {
        return Some(Value::from(f64::MAX));
    }
    if ty == "boolean" {
        return Some(Value::Bool(false));
    }

    if depth > MAX_DEPTH {
        log::trace!("nesting ceiling reached at property {name}");
        return None;
    }

    // Only expansion into nested structure can participate in a cycle, so
    // the budget is charged here, keyed by the reference that led in.
    if let Some(uri) = uri {
        if state.enter(uri) {
            log::trace!("expansion budget for {uri} spent at property {name}");
            return Some(cycle_terminator());
        }
    }

    if ty == "array" {
        let items = node.get("items")?;
        return Some(array_example(items, only_required, depth, state, refs));
    }

    example_object(node, only_required, depth + 1, state, refs).map(Value::Object)
}

/// One-element example array for an `array` schema's `items` node.
fn array_example(
    items: &Value,
    only_required: bool,
    depth: u32,
    state: &mut RecursionState,
    refs: &LookupTable,
) -> Value {
    let element = match schema_ref(items) {
        Some(uri) => {
            let Some(node) = refs.get(uri) else {
                log::trace!("dangling $ref {uri} in array items");
                return Value::Array(vec![Value::Null]);
            };
            if state.enter(uri) {
                log::trace!("expansion budget for {uri} spent in array items");
                return cycle_terminator();
            }
            example_object(node, only_required, depth + 1, state, refs)
        }
        None => example_object(items, only_required, depth + 1, state, refs),
    };

    Value::Array(vec![element.map(Value::Object).unwrap_or(Value::Null)])
}

/// Assemble an example object from an object-typed schema node, optionally
/// restricted to its required properties.
///
/// Returns `None` when the node offers no qualifying properties: no
/// `properties` map at all, a required-only build against a node that
/// declares no `required` list, or an empty candidate set. A property whose
/// own synthesis fails is left out of the result.
pub fn example_object(
    node: &Value,
    only_required: bool,
    depth: u32,
    state: &mut RecursionState,
    refs: &LookupTable,
) -> Option<Map<String, Value>> {
    let properties = node.get("properties").and_then(|p| p.as_object())?;

    let required: Option<Vec<&str>> = node
        .get("required")
        .and_then(|r| r.as_array())
        .map(|names| names.iter().filter_map(|n| n.as_str()).collect());

    if only_required && required.is_none() {
        return None;
    }

    let candidates: Vec<(&String, &Value)> = properties
        .iter()
        .filter(|(name, _)| {
            !only_required
                || required
                    .as_ref()
                    .is_some_and(|names| names.contains(&name.as_str()))
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let mut example = Map::new();
    for (name, prop) in candidates {
        if let Some(value) = example_value(name, prop, only_required, depth, state, refs) {
            example.insert(name.clone(), value);
        }
    }

    Some(example)
}
