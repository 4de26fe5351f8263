//! Error types for the openapi-examples crate.

use thiserror::Error;

/// Errors that can occur while augmenting a specification.
///
/// Missing pieces of a specification (no body parameter, no default
/// response, a dangling `$ref`) are not errors; the corresponding example
/// field is simply not attached. The only terminal failure is the external
/// reference resolver rejecting the document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("reference resolution failed")]
    Resolver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ResolveError {
    /// Wrap an arbitrary resolver failure.
    pub fn resolver(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Resolver(source.into())
    }
}
