//! Active-route resolution.
//!
//! # Responsibilities
//! - Compute, for every registered route, whether it is the highlighted item
//! - Force overview (ancestor) routes inactive when a descendant is active
//! - Apply the unmatched-location policy
//!
//! # Design Decisions
//! - Pure: no I/O, no shared state, inputs are never mutated
//! - `hasActiveDescendant` is computed by walking up from each candidate,
//!   which equals the recursive child-wise definition and is bounded by the
//!   route count
//! - Default policy leaves everything inactive when nothing matches

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::routing::activation::ActivationResult;
use crate::routing::error::ResolveError;
use crate::routing::matcher::{canonical_path, is_descendant, is_exact_match};
use crate::routing::tree::{RouteId, RouteSpec, RouteTree};

/// What makes a route a candidate for highlighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The location equals the route path.
    #[default]
    Exact,
    /// The location equals the route path or lies below it.
    Prefix,
}

impl MatchMode {
    fn is_candidate(self, location: Option<&str>, path: Option<&str>) -> bool {
        match self {
            MatchMode::Exact => is_exact_match(location, path),
            MatchMode::Prefix => {
                is_exact_match(location, path) || is_descendant(location, path)
            }
        }
    }
}

/// What to highlight when no route is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Leave every route inactive.
    #[default]
    NoneActive,
    /// Highlight a designated route (usually "home").
    Fallback(RouteId),
}

/// Resolve raw declarations against a location.
///
/// Permissive: a `None` location or a route without a path never matches.
/// Terminates on cyclic parent data; such routes simply lose their
/// highlight.
pub fn resolve_active(location: Option<&str>, routes: &[RouteSpec]) -> ActivationResult {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, spec) in routes.iter().enumerate() {
        index.entry(spec.id.as_str()).or_insert(i);
    }
    let parents: Vec<Option<usize>> = routes
        .iter()
        .map(|spec| spec.parent.as_deref().and_then(|p| index.get(p).copied()))
        .collect();
    let candidates: Vec<bool> = routes
        .iter()
        .map(|spec| is_exact_match(location, spec.path.as_deref()))
        .collect();

    let active = activate(&candidates, &parents);
    ActivationResult::from_entries(
        routes
            .iter()
            .zip(active)
            .map(|(spec, on)| (RouteId::from(spec.id.as_str()), on)),
    )
}

/// Strict location check: `None` and relative paths are rejected, `""` is
/// the root.
pub fn validate_location(location: Option<&str>) -> Result<&str, ResolveError> {
    match location {
        None => Err(ResolveError::InvalidInput("location is missing".to_string())),
        Some(loc) if loc.is_empty() || loc.starts_with('/') => Ok(loc),
        Some(loc) => Err(ResolveError::InvalidInput(format!(
            "`{}` is not an absolute path",
            loc
        ))),
    }
}

impl RouteTree {
    /// Exact-match resolution with no fallback.
    pub fn resolve(&self, location: &str) -> ActivationResult {
        self.resolve_with(location, MatchMode::Exact, &UnmatchedPolicy::NoneActive)
    }

    /// Like [`RouteTree::resolve`], but rejects malformed locations.
    pub fn try_resolve(&self, location: Option<&str>) -> Result<ActivationResult, ResolveError> {
        validate_location(location).map(|loc| self.resolve(loc))
    }

    pub fn resolve_with(
        &self,
        location: &str,
        mode: MatchMode,
        unmatched: &UnmatchedPolicy,
    ) -> ActivationResult {
        let location = canonical_path(location);
        let candidates: Vec<bool> = self
            .routes()
            .iter()
            .map(|route| mode.is_candidate(Some(location.as_str()), Some(route.path.as_str())))
            .collect();

        let active = activate(&candidates, self.parent_indices());
        let mut result = ActivationResult::from_entries(
            self.routes()
                .iter()
                .zip(active)
                .map(|(route, on)| (route.id.clone(), on)),
        );

        if let UnmatchedPolicy::Fallback(id) = unmatched {
            if !result.any_active() {
                result.set(id.as_str(), true);
            }
        }
        result
    }
}

/// A candidate is active iff none of its descendants is a candidate.
fn activate(candidates: &[bool], parents: &[Option<usize>]) -> Vec<bool> {
    let n = candidates.len();
    let mut has_active_descendant = vec![false; n];

    for (i, _) in candidates.iter().enumerate().filter(|&(_, &c)| c) {
        let mut cur = parents[i];
        let mut steps = 0;
        while let Some(p) = cur {
            if steps >= n || has_active_descendant[p] {
                break;
            }
            has_active_descendant[p] = true;
            cur = parents[p];
            steps += 1;
        }
    }

    candidates
        .iter()
        .zip(has_active_descendant)
        .map(|(&c, blocked)| c && !blocked)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Vec<RouteSpec> {
        vec![
            RouteSpec::root("dash", "/dashboard"),
            RouteSpec::child("profile", "/dashboard/profile", "dash"),
        ]
    }

    fn three_levels() -> Vec<RouteSpec> {
        vec![
            RouteSpec::root("a", "/a"),
            RouteSpec::child("b", "/a/b", "a"),
            RouteSpec::child("c", "/a/b/c", "b"),
        ]
    }

    fn pairs(result: &ActivationResult) -> Vec<(&str, bool)> {
        result.iter().map(|(id, on)| (id.as_str(), on)).collect()
    }

    #[test]
    fn test_overview_active_on_own_path() {
        let result = resolve_active(Some("/dashboard"), &dashboard());
        assert_eq!(pairs(&result), vec![("dash", true), ("profile", false)]);
    }

    #[test]
    fn test_child_active_forces_overview_off() {
        let result = resolve_active(Some("/dashboard/profile"), &dashboard());
        assert_eq!(pairs(&result), vec![("dash", false), ("profile", true)]);
    }

    #[test]
    fn test_trailing_slash_location() {
        let with_slash = resolve_active(Some("/dashboard/profile/"), &dashboard());
        let without = resolve_active(Some("/dashboard/profile"), &dashboard());
        assert_eq!(with_slash, without);
    }

    #[test]
    fn test_sibling_prefix_not_conflated() {
        let routes = vec![RouteSpec::root("meal", "/meal"), RouteSpec::root("meals", "/meals")];
        let result = resolve_active(Some("/meals"), &routes);
        assert_eq!(pairs(&result), vec![("meal", false), ("meals", true)]);
    }

    #[test]
    fn test_unknown_location_all_inactive() {
        let result = resolve_active(Some("/unknown/path"), &dashboard());
        assert_eq!(result.len(), 2);
        assert!(!result.any_active());
    }

    #[test]
    fn test_three_level_nesting() {
        let result = resolve_active(Some("/a/b/c"), &three_levels());
        assert_eq!(pairs(&result), vec![("a", false), ("b", false), ("c", true)]);
    }

    #[test]
    fn test_missing_inputs_are_inactive() {
        let mut routes = dashboard();
        routes.push(RouteSpec {
            id: "broken".into(),
            path: None,
            parent: None,
            label: None,
        });
        assert!(!resolve_active(None, &routes).any_active());
        assert!(!resolve_active(Some("/"), &routes).is_active("broken"));
    }

    #[test]
    fn test_cyclic_declarations_terminate() {
        let routes = vec![
            RouteSpec::child("a", "/a", "b"),
            RouteSpec::child("b", "/b", "a"),
        ];
        let result = resolve_active(Some("/a"), &routes);
        assert_eq!(result.len(), 2);
        assert!(!result.is_active("b"));
    }

    #[test]
    fn test_at_most_one_active_per_chain() {
        let tree = RouteTree::new(vec![
            RouteSpec::root("home", "/"),
            RouteSpec::root("a", "/a"),
            RouteSpec::child("b", "/a/b", "a"),
            RouteSpec::child("c", "/a/b/c", "b"),
            RouteSpec::child("d", "/a/d", "a"),
        ])
        .unwrap();
        let locations = ["/", "/a", "/a/", "/a/b", "/a/b/c", "/a/b/c/", "/a/d", "/a/b/x", "/zzz", ""];
        for mode in [MatchMode::Exact, MatchMode::Prefix] {
            for loc in locations {
                let result = tree.resolve_with(loc, mode, &UnmatchedPolicy::NoneActive);
                for route in tree.routes() {
                    if !result.is_active(route.id.as_str()) {
                        continue;
                    }
                    for ancestor in tree.ancestors(route.id.as_str()) {
                        assert!(
                            !result.is_active(ancestor.as_str()),
                            "{} and ancestor {} both active at {:?} ({:?})",
                            route.id,
                            ancestor,
                            loc,
                            mode
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_trailing_slash_variants_resolve_identically() {
        let tree = RouteTree::new(three_levels()).unwrap();
        for loc in ["/a", "/a/b", "/a/b/c", "/nope"] {
            let slashed = format!("{}/", loc);
            assert_eq!(tree.resolve(loc), tree.resolve(&slashed));
            assert_eq!(
                tree.resolve(loc),
                tree.resolve(&crate::routing::matcher::normalize(Some(slashed.as_str())))
            );
        }
    }

    #[test]
    fn test_prefix_mode_keeps_section_lit() {
        let tree = RouteTree::new(vec![
            RouteSpec::root("meals", "/meals"),
            RouteSpec::root("dash", "/dashboard"),
            RouteSpec::child("orders", "/dashboard/my-orders", "dash"),
        ])
        .unwrap();

        let result = tree.resolve_with("/meals/42", MatchMode::Prefix, &UnmatchedPolicy::NoneActive);
        assert_eq!(result.active_ids(), vec![&RouteId::from("meals")]);

        let result = tree.resolve_with(
            "/dashboard/my-orders/7",
            MatchMode::Prefix,
            &UnmatchedPolicy::NoneActive,
        );
        assert_eq!(result.active_ids(), vec![&RouteId::from("orders")]);

        // Exact mode does not light up sub-pages.
        assert!(!tree.resolve("/meals/42").any_active());
    }

    #[test]
    fn test_fallback_only_when_nothing_matches() {
        let tree = RouteTree::new(vec![
            RouteSpec::root("home", "/"),
            RouteSpec::root("meals", "/meals"),
        ])
        .unwrap();
        let fallback = UnmatchedPolicy::Fallback(RouteId::from("home"));

        let result = tree.resolve_with("/payment-success", MatchMode::Exact, &fallback);
        assert_eq!(result.first_active(), Some(&RouteId::from("home")));

        let result = tree.resolve_with("/meals", MatchMode::Exact, &fallback);
        assert_eq!(result.active_ids(), vec![&RouteId::from("meals")]);
    }

    #[test]
    fn test_try_resolve_rejects_bad_locations() {
        let tree = RouteTree::new(dashboard()).unwrap();
        assert!(matches!(tree.try_resolve(None), Err(ResolveError::InvalidInput(_))));
        assert!(matches!(
            tree.try_resolve(Some("dashboard")),
            Err(ResolveError::InvalidInput(_))
        ));
        let result = tree.try_resolve(Some("/dashboard/")).unwrap();
        assert!(result.is_active("dash"));
        assert!(tree.try_resolve(Some("")).is_ok());
    }

    #[test]
    fn test_encoded_and_raw_locations_agree() {
        let tree = RouteTree::new(vec![
            RouteSpec::root("meals", "/meals"),
            RouteSpec::child("cafe", "/meals/café", "meals"),
        ])
        .unwrap();
        for loc in ["/meals/café", "/meals/caf%C3%A9/", "/meals/../meals/café"] {
            assert_eq!(tree.resolve(loc).active_ids(), vec![&RouteId::from("cafe")], "{}", loc);
        }
    }

    #[test]
    fn test_inputs_not_mutated() {
        let routes = dashboard();
        let before = routes.clone();
        let _ = resolve_active(Some("/dashboard/profile"), &routes);
        assert_eq!(routes, before);
    }
}
