//! Synthesize example payloads for OpenAPI operations.
//!
//! Takes a Swagger 2.0 specification, resolves its `$ref`s through an
//! external [`ResolveRefs`] implementation, and attaches `exampleRequest`,
//! `simpleExampleRequest` and `exampleResponse` values to each operation
//! based on the declared schemas.
//!
//! # Usage
//!
//! ```no_run
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! use openapi_examples::{augment, ResolveError, ResolveRefs, ResolvedRef};
//! use serde_json::{json, Value};
//!
//! struct MyResolver;
//!
//! impl ResolveRefs for MyResolver {
//!     fn resolve_refs<'a>(
//!         &'a self,
//!         _spec: &'a Value,
//!     ) -> Pin<Box<dyn Future<Output = Result<Vec<ResolvedRef>, ResolveError>> + Send + 'a>> {
//!         // Hand the document to your reference resolution service and
//!         // report back one ResolvedRef per reference.
//!         Box::pin(async move { Ok(Vec::new()) })
//!     }
//! }
//!
//! # async fn run() {
//! let spec = json!({"swagger": "2.0", "paths": {}});
//! let augmented = augment(&spec, &MyResolver).await.unwrap();
//! # }
//! ```

pub mod attach;
pub mod error;
pub mod example;
pub mod refs;

pub use attach::{attach_examples, augment};
pub use error::ResolveError;
pub use example::{example_object, example_value, RecursionState};
pub use refs::{build_lookup_table, LookupTable, ResolveRefs, ResolvedRef};

// Re-export dependencies for downstream crates
pub use serde_json;
