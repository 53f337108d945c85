//! Route declarations and the validated route tree.
//!
//! # Responsibilities
//! - Deserializable route declarations (`RouteSpec`)
//! - Fail-fast validation at configuration-load time
//! - Immutable, declaration-ordered tree with parent links
//!
//! # Design Decisions
//! - Paths are stored in canonical form so resolution compares plain strings
//! - Duplicate normalized paths are rejected, never resolved by precedence
//! - Parent walks are bounded by the route count, so a malformed declaration
//!   list can be checked without looping forever

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::error::RouteError;
use crate::routing::matcher::{canonical_path, is_descendant};

/// Identifier of a navigable route ("dash", "profile", "meals").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RouteId(pub String);

impl RouteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw route declaration, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteSpec {
    /// Unique route id.
    pub id: String,

    /// Absolute pathname, no query string or hash.
    #[serde(default)]
    pub path: Option<String>,

    /// Id of the overview route this one sits under.
    #[serde(default)]
    pub parent: Option<String>,

    /// Menu label shown by the hosting application.
    #[serde(default)]
    pub label: Option<String>,
}

impl RouteSpec {
    /// Top-level route.
    pub fn root(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: Some(path.into()),
            parent: None,
            label: None,
        }
    }

    /// Route nested under `parent`.
    pub fn child(id: impl Into<String>, path: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: Some(path.into()),
            parent: Some(parent.into()),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A validated route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub id: RouteId,
    /// Canonical path (percent-encoded, normalized).
    pub path: String,
    pub parent: Option<RouteId>,
    pub label: Option<String>,
}

/// Immutable tree of validated routes, in declaration order.
#[derive(Debug, Clone)]
pub struct RouteTree {
    routes: Vec<Route>,
    /// Index of each route's parent in `routes`.
    parents: Vec<Option<usize>>,
    index: HashMap<RouteId, usize>,
}

impl RouteTree {
    /// Validate the declarations and freeze them into a tree.
    ///
    /// Returns the first defect found; use [`check_routes`] for all of them.
    pub fn new(specs: Vec<RouteSpec>) -> Result<Self, RouteError> {
        if let Some(err) = check_routes(&specs).into_iter().next() {
            return Err(err);
        }

        let index: HashMap<RouteId, usize> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| (RouteId::from(spec.id.as_str()), i))
            .collect();

        let parents: Vec<Option<usize>> = specs
            .iter()
            .map(|spec| spec.parent.as_deref().and_then(|p| index.get(p).copied()))
            .collect();

        let routes: Vec<Route> = specs
            .into_iter()
            .map(|spec| Route {
                id: RouteId(spec.id),
                path: spec.path.as_deref().map(canonical_path).unwrap_or_default(),
                parent: spec.parent.map(RouteId),
                label: spec.label,
            })
            .collect();

        for (route, parent) in routes.iter().zip(&parents) {
            if let Some(p) = parent {
                let parent_route = &routes[*p];
                if !is_descendant(Some(route.path.as_str()), Some(parent_route.path.as_str())) {
                    tracing::warn!(
                        route = %route.id,
                        path = %route.path,
                        parent = %parent_route.id,
                        parent_path = %parent_route.path,
                        "Child route path does not sit under its parent path"
                    );
                }
            }
        }

        Ok(Self {
            routes,
            parents,
            index,
        })
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, id: &str) -> Option<&Route> {
        self.index.get(id).map(|&i| &self.routes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Ids of the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: &str) -> Vec<&RouteId> {
        let mut out = Vec::new();
        let mut cur = self.index.get(id).and_then(|&i| self.parents[i]);
        while let Some(i) = cur {
            out.push(&self.routes[i].id);
            cur = self.parents[i];
        }
        out
    }

    pub(crate) fn parent_indices(&self) -> &[Option<usize>] {
        &self.parents
    }
}

/// Check a declaration list and report every defect.
pub fn check_routes(specs: &[RouteSpec]) -> Vec<RouteError> {
    let mut errors = Vec::new();
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut paths: HashMap<String, &str> = HashMap::new();

    for (i, spec) in specs.iter().enumerate() {
        if spec.id.trim().is_empty() {
            errors.push(RouteError::InvalidInput {
                id: spec.id.clone(),
                reason: "id is empty".to_string(),
            });
        }

        if ids.insert(spec.id.as_str(), i).is_some() {
            errors.push(RouteError::DuplicateId(spec.id.clone()));
        }

        match spec.path.as_deref() {
            None => errors.push(RouteError::InvalidInput {
                id: spec.id.clone(),
                reason: "path is missing".to_string(),
            }),
            Some(path) if !path.starts_with('/') => errors.push(RouteError::InvalidInput {
                id: spec.id.clone(),
                reason: format!("path `{}` is not absolute", path),
            }),
            Some(path) if path.contains(['?', '#']) => errors.push(RouteError::InvalidInput {
                id: spec.id.clone(),
                reason: format!("path `{}` carries a query or fragment", path),
            }),
            Some(path) => {
                let normalized = canonical_path(path);
                if let Some(first) = paths.get(&normalized) {
                    errors.push(RouteError::AmbiguousConfiguration {
                        path: normalized,
                        first: first.to_string(),
                        second: spec.id.clone(),
                    });
                } else {
                    paths.insert(normalized, spec.id.as_str());
                }
            }
        }
    }

    for spec in specs {
        if let Some(parent) = spec.parent.as_deref() {
            if !ids.contains_key(parent) {
                errors.push(RouteError::UnknownParent {
                    id: spec.id.clone(),
                    parent: parent.to_string(),
                });
            }
        }
    }

    // Only routes that sit on a loop are reported; routes hanging off a loop
    // exhaust the step budget without returning to themselves.
    for spec in specs {
        let mut cur = spec.parent.as_deref();
        let mut steps = 0;
        while let Some(p) = cur {
            if p == spec.id {
                errors.push(RouteError::Cycle(spec.id.clone()));
                break;
            }
            steps += 1;
            if steps > specs.len() {
                break;
            }
            cur = ids.get(p).and_then(|&i| specs[i].parent.as_deref());
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Vec<RouteSpec> {
        vec![
            RouteSpec::root("dash", "/dashboard"),
            RouteSpec::child("profile", "/dashboard/profile", "dash"),
            RouteSpec::child("orders", "/dashboard/my-orders/", "dash"),
        ]
    }

    #[test]
    fn test_build_normalizes_paths() {
        let tree = RouteTree::new(dashboard()).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get("orders").unwrap().path, "/dashboard/my-orders");
        assert_eq!(tree.ancestors("profile"), vec![&RouteId::from("dash")]);
        assert!(tree.ancestors("dash").is_empty());
    }

    #[test]
    fn test_duplicate_path_is_ambiguous() {
        let specs = vec![
            RouteSpec::root("meals", "/meals"),
            RouteSpec::root("all-meals", "/meals/"),
        ];
        let err = RouteTree::new(specs).unwrap_err();
        assert_eq!(
            err,
            RouteError::AmbiguousConfiguration {
                path: "/meals".into(),
                first: "meals".into(),
                second: "all-meals".into(),
            }
        );
    }

    #[test]
    fn test_missing_and_relative_paths_rejected() {
        let specs = vec![
            RouteSpec {
                id: "nowhere".into(),
                path: None,
                parent: None,
                label: None,
            },
            RouteSpec::root("relative", "meals"),
        ];
        let errors = check_routes(&specs);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, RouteError::InvalidInput { .. })));
    }

    #[test]
    fn test_unknown_parent_and_duplicate_id() {
        let specs = vec![
            RouteSpec::root("home", "/"),
            RouteSpec::root("home", "/home"),
            RouteSpec::child("orphan", "/x/y", "x"),
        ];
        let errors = check_routes(&specs);
        assert!(errors.contains(&RouteError::DuplicateId("home".into())));
        assert!(errors.contains(&RouteError::UnknownParent {
            id: "orphan".into(),
            parent: "x".into(),
        }));
    }

    #[test]
    fn test_cycle_detected() {
        let specs = vec![
            RouteSpec::child("a", "/a", "b"),
            RouteSpec::child("b", "/b", "a"),
            RouteSpec::child("c", "/c", "a"),
            RouteSpec::child("self", "/self", "self"),
        ];
        let errors = check_routes(&specs);
        assert!(errors.contains(&RouteError::Cycle("a".into())));
        assert!(errors.contains(&RouteError::Cycle("b".into())));
        assert!(errors.contains(&RouteError::Cycle("self".into())));
        assert!(!errors.contains(&RouteError::Cycle("c".into())));
    }

    #[test]
    fn test_query_and_fragment_paths_rejected() {
        let specs = vec![
            RouteSpec::root("meals", "/meals?sort=price"),
            RouteSpec::root("orders", "/dashboard#orders"),
        ];
        let errors = check_routes(&specs);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, RouteError::InvalidInput { .. })));
        assert!(RouteTree::new(specs).is_err());
    }

    #[test]
    fn test_paths_stored_in_canonical_form() {
        let tree = RouteTree::new(vec![
            RouteSpec::root("cafe", "/meals/café/"),
            RouteSpec::root("dash", "/dashboard/./overview"),
        ])
        .unwrap();
        assert_eq!(tree.get("cafe").unwrap().path, "/meals/caf%C3%A9");
        assert_eq!(tree.get("dash").unwrap().path, "/dashboard/overview");

        // Encoded and raw spellings of the same path collide.
        let err = RouteTree::new(vec![
            RouteSpec::root("cafe", "/meals/café"),
            RouteSpec::root("cafe-encoded", "/meals/caf%C3%A9"),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteError::AmbiguousConfiguration { .. }));
    }

    #[test]
    fn test_child_outside_parent_path_is_accepted() {
        let tree = RouteTree::new(vec![
            RouteSpec::root("dash", "/dashboard"),
            RouteSpec::child("payments", "/payment-history", "dash"),
        ])
        .unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.ancestors("payments"), vec![&RouteId::from("dash")]);
        let result = tree.resolve("/payment-history");
        assert_eq!(result.active_ids(), vec![&RouteId::from("payments")]);
    }

    #[test]
    fn test_spec_deserializes_from_toml() {
        let spec: RouteSpec = toml::from_str(
            r#"
            id = "profile"
            path = "/dashboard/profile"
            parent = "dash"
            label = "My Profile"
            "#,
        )
        .unwrap();
        assert_eq!(
            spec,
            RouteSpec::child("profile", "/dashboard/profile", "dash").with_label("My Profile")
        );
    }
}
