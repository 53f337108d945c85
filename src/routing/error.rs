//! Routing error definitions.

use thiserror::Error;

/// Configuration defects detected while building a route tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route declaration is malformed (missing path, empty id, relative path).
    #[error("invalid route `{id}`: {reason}")]
    InvalidInput { id: String, reason: String },

    /// Two routes share an id.
    #[error("duplicate route id `{0}`")]
    DuplicateId(String),

    /// Two routes normalize to the same path.
    #[error("routes `{first}` and `{second}` both register path `{path}`")]
    AmbiguousConfiguration {
        path: String,
        first: String,
        second: String,
    },

    /// A route names a parent that is not registered.
    #[error("route `{id}` names unknown parent `{parent}`")]
    UnknownParent { id: String, parent: String },

    /// Following parents from a route leads back to it.
    #[error("route `{0}` is part of a parent cycle")]
    Cycle(String),
}

/// Rejected location at resolve time (strict entry point only).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid location: {0}")]
    InvalidInput(String),
}
