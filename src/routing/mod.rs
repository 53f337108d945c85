//! Route activation subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup / reload):
//!     RouteSpec[]
//!     → tree.rs (validate ids, paths, parents; normalize)
//!     → Freeze as immutable RouteTree
//!
//! Navigation event (location string)
//!     → matcher.rs (normalize, exact / descendant predicates)
//!     → resolver.rs (candidates, ancestor suppression, unmatched policy)
//!     → Return: ActivationResult (route id → active)
//! ```
//!
//! # Design Decisions
//! - Trees are built once, immutable afterwards
//! - Configuration defects fail at build time, not at match time
//! - Deterministic: same location and tree always give the same result
//! - The deepest matching route on a chain wins; its ancestors stay off

pub mod activation;
pub mod error;
pub mod matcher;
pub mod resolver;
pub mod tree;

pub use activation::ActivationResult;
pub use error::{ResolveError, RouteError};
pub use matcher::{canonical_path, is_descendant, is_exact_match, location_from_href, normalize};
pub use resolver::{resolve_active, validate_location, MatchMode, UnmatchedPolicy};
pub use tree::{check_routes, Route, RouteId, RouteSpec, RouteTree};
