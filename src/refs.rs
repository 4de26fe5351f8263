//! `$ref` resolution boundary and reference lookup table.
//!
//! Dereferencing itself is somebody else's job: a [`ResolveRefs`]
//! implementation is handed the whole document and reports back every
//! resolvable reference. This module indexes that output by canonical URI so
//! the synthesis pass can follow references without touching the resolver
//! again.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::ResolveError;

/// A single dereferenced `$ref`: its canonical URI and the value it points to.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ResolvedRef {
    pub uri: String,
    pub value: Value,
}

impl ResolvedRef {
    pub fn new(uri: impl Into<String>, value: Value) -> Self {
        Self {
            uri: uri.into(),
            value,
        }
    }
}

/// Flat index from reference URI to resolved schema node.
pub type LookupTable = HashMap<String, Value>;

/// External `$ref` resolution capability.
///
/// Implementations must resolve self-referential (circular) references
/// without error. A circular schema's resolved value keeps its internal
/// `$ref` strings (a JSON tree cannot be a cyclic graph); synthesis follows
/// them through the lookup table.
///
/// The method returns a [`Pin<Box<dyn Future>>`] so the trait stays
/// object-safe without an `async_trait` dependency.
pub trait ResolveRefs {
    /// Resolve every reference reachable from `spec`.
    fn resolve_refs<'a>(
        &'a self,
        spec: &'a Value,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ResolvedRef>, ResolveError>> + Send + 'a>>;
}

/// Build the URI → schema lookup table for `spec`.
///
/// Awaits the resolver exactly once; a resolver failure propagates to the
/// caller unrecovered.
pub async fn build_lookup_table<R>(spec: &Value, resolver: &R) -> Result<LookupTable, ResolveError>
where
    R: ResolveRefs + ?Sized,
{
    let resolved = resolver.resolve_refs(spec).await?;

    let mut table = LookupTable::with_capacity(resolved.len());
    for entry in resolved {
        table.insert(entry.uri, entry.value);
    }
    log::debug!("lookup table built with {} reference(s)", table.len());

    Ok(table)
}

/// Pull the `$ref` URI out of a schema node, if it has one.
pub(crate) fn schema_ref(schema: &Value) -> Option<&str> {
    schema.get("$ref").and_then(|v| v.as_str())
}

/// Resolve one level of `$ref` indirection through the lookup table.
///
/// A node without `$ref` is already resolved; a dangling URI yields `None`.
pub(crate) fn deref_schema<'a>(schema: &'a Value, refs: &'a LookupTable) -> Option<&'a Value> {
    match schema_ref(schema) {
        Some(uri) => refs.get(uri),
        None => Some(schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticResolver(Vec<ResolvedRef>);

    impl ResolveRefs for StaticResolver {
        fn resolve_refs<'a>(
            &'a self,
            _spec: &'a Value,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ResolvedRef>, ResolveError>> + Send + 'a>>
        {
            let resolved = self.0.clone();
            Box::pin(async move { Ok(resolved) })
        }
    }

    struct FailingResolver;

    impl ResolveRefs for FailingResolver {
        fn resolve_refs<'a>(
            &'a self,
            _spec: &'a Value,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ResolvedRef>, ResolveError>> + Send + 'a>>
        {
            Box::pin(async move {
                Err(ResolveError::resolver(
                    "dangling pointer: #/definitions/Missing",
                ))
            })
        }
    }

    #[tokio::test]
    async fn build_lookup_table_indexes_by_uri() {
        let resolver = StaticResolver(vec![
            ResolvedRef::new("#/definitions/Widget", json!({"type": "object"})),
            ResolvedRef::new("#/definitions/Tag", json!({"type": "string"})),
        ]);

        let table = build_lookup_table(&json!({}), &resolver).await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("#/definitions/Widget"),
            Some(&json!({"type": "object"}))
        );
        assert_eq!(
            table.get("#/definitions/Tag"),
            Some(&json!({"type": "string"}))
        );
    }

    #[tokio::test]
    async fn build_lookup_table_empty_when_no_refs_resolved() {
        let resolver = StaticResolver(Vec::new());

        let table = build_lookup_table(&json!({}), &resolver).await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn build_lookup_table_propagates_resolver_failure() {
        let result = build_lookup_table(&json!({}), &FailingResolver).await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "reference resolution failed");
        let source = std::error::Error::source(&err).expect("source should be chained");
        assert!(source.to_string().contains("#/definitions/Missing"));
    }

    #[test]
    fn deref_schema_returns_inline_node_as_is() {
        let refs = LookupTable::new();
        let schema = json!({"type": "string"});

        assert_eq!(deref_schema(&schema, &refs), Some(&schema));
    }

    #[test]
    fn deref_schema_follows_known_ref() {
        let mut refs = LookupTable::new();
        refs.insert("#/definitions/Widget".to_string(), json!({"type": "object"}));
        let schema = json!({"$ref": "#/definitions/Widget"});

        assert_eq!(deref_schema(&schema, &refs), Some(&json!({"type": "object"})));
    }

    #[test]
    fn deref_schema_none_for_dangling_ref() {
        let refs = LookupTable::new();
        let schema = json!({"$ref": "#/definitions/Missing"});

        assert_eq!(deref_schema(&schema, &refs), None);
    }
}
