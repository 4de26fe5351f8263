//! Example attachment across a specification's operations.
//!
//! Walks every path × verb, synthesizes request and response examples from
//! the resolved schemas, and writes them onto a copy of the document.

use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::example::{example_object, example_value, RecursionState};
use crate::refs::{build_lookup_table, deref_schema, LookupTable, ResolveRefs};

/// HTTP verbs examined on every path, in attachment order.
const VERBS: [&str; 6] = ["get", "post", "delete", "put", "patch", "head"];

/// Resolve references, then attach examples to every operation.
///
/// The returned document is a copy; `spec` itself is never modified. The
/// resolver is awaited exactly once, and its failure is the only error this
/// function surfaces.
pub async fn augment<R>(spec: &Value, resolver: &R) -> Result<Value, ResolveError>
where
    R: ResolveRefs + ?Sized,
{
    let refs = build_lookup_table(spec, resolver).await?;
    Ok(attach_examples(spec, &refs))
}

/// Attach `exampleRequest`, `simpleExampleRequest` and `exampleResponse` to
/// each operation in `spec`, consulting `refs` for `$ref` resolution.
///
/// An operation without a body parameter, without a `default` response
/// schema, or whose schema cannot be synthesized is left as-is.
pub fn attach_examples(spec: &Value, refs: &LookupTable) -> Value {
    let mut augmented = spec.clone();

    let Some(paths) = augmented.get_mut("paths").and_then(|p| p.as_object_mut()) else {
        return augmented;
    };

    for (path, item) in paths.iter_mut() {
        for verb in VERBS {
            if let Some(op) = item.get_mut(verb).and_then(|o| o.as_object_mut()) {
                attach_operation(path, verb, op, refs);
            }
        }
    }

    augmented
}

fn attach_operation(path: &str, verb: &str, op: &mut Map<String, Value>, refs: &LookupTable) {
    if let Some(schema) = body_schema(op) {
        if let Some(full) = request_example(&schema, false, refs) {
            // The required-only variant is only worth attaching when it
            // differs from the full example.
            let simple = request_example(&schema, true, refs).filter(|s| *s != full);

            log::debug!("attaching request example to {verb} {path}");
            op.insert("exampleRequest".to_string(), Value::Object(full));
            if let Some(simple) = simple {
                op.insert("simpleExampleRequest".to_string(), Value::Object(simple));
            }
        }
    }

    if let Some(schema) = default_response_schema(op) {
        if let Some(response) = response_example(&schema, refs) {
            log::debug!("attaching response example to {verb} {path}");
            op.insert("exampleResponse".to_string(), response);
        }
    }
}

/// Schema of the first body parameter, if the operation declares one.
fn body_schema(op: &Map<String, Value>) -> Option<Value> {
    op.get("parameters")?
        .as_array()?
        .iter()
        .find(|param| param.get("in").and_then(|v| v.as_str()) == Some("body"))?
        .get("schema")
        .cloned()
}

/// Schema of the `default` response entry, if declared.
fn default_response_schema(op: &Map<String, Value>) -> Option<Value> {
    op.get("responses")?.get("default")?.get("schema").cloned()
}

fn request_example(
    schema: &Value,
    only_required: bool,
    refs: &LookupTable,
) -> Option<Map<String, Value>> {
    let node = deref_schema(schema, refs)?;
    let mut state = RecursionState::new();
    example_object(node, only_required, 0, &mut state, refs)
}

fn response_example(schema: &Value, refs: &LookupTable) -> Option<Value> {
    let node = deref_schema(schema, refs)?;
    let mut state = RecursionState::new();
    example_value("default", node, false, 0, &mut state, refs)
}
