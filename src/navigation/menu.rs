//! Menus and the menu registry.
//!
//! # Responsibilities
//! - Bind a route tree to its match mode and unmatched policy
//! - Build every configured menu, failing with all validation errors
//! - Look menus up by name and resolve locations against them

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::schema::MenuConfig;
use crate::config::validation::{validate_menus, ValidationError};
use crate::navigation::NavError;
use crate::routing::{
    validate_location, ActivationResult, MatchMode, ResolveError, Route, RouteId, RouteTree,
    UnmatchedPolicy,
};

/// A navigable menu: the navbar or one of the dashboard sidebars.
#[derive(Debug, Clone)]
pub struct Menu {
    name: String,
    tree: RouteTree,
    mode: MatchMode,
    unmatched: UnmatchedPolicy,
}

impl Menu {
    pub fn from_config(config: &MenuConfig) -> Result<Self, ValidationError> {
        let tree = RouteTree::new(config.routes.clone()).map_err(|source| ValidationError::Route {
            menu: config.name.clone(),
            source,
        })?;

        let unmatched = match &config.fallback {
            None => UnmatchedPolicy::NoneActive,
            Some(id) if tree.contains(id) => UnmatchedPolicy::Fallback(RouteId::from(id.as_str())),
            Some(id) => {
                return Err(ValidationError::UnknownFallback {
                    menu: config.name.clone(),
                    route: id.clone(),
                })
            }
        };

        Ok(Self {
            name: config.name.clone(),
            tree,
            mode: config.match_mode,
            unmatched,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn unmatched(&self) -> &UnmatchedPolicy {
        &self.unmatched
    }

    /// Resolve with this menu's mode and policy.
    pub fn resolve(&self, location: &str) -> ActivationResult {
        self.tree.resolve_with(location, self.mode, &self.unmatched)
    }

    /// Strict variant: rejects missing and relative locations.
    pub fn try_resolve(&self, location: Option<&str>) -> Result<ActivationResult, ResolveError> {
        validate_location(location).map(|loc| self.resolve(loc))
    }

    pub fn summary(&self) -> MenuSummary<'_> {
        MenuSummary {
            name: &self.name,
            match_mode: self.mode,
            fallback: match &self.unmatched {
                UnmatchedPolicy::NoneActive => None,
                UnmatchedPolicy::Fallback(id) => Some(id),
            },
            routes: self.tree.routes(),
        }
    }
}

/// Serializable view of a menu.
#[derive(Debug, Serialize)]
pub struct MenuSummary<'a> {
    pub name: &'a str,
    pub match_mode: MatchMode,
    pub fallback: Option<&'a RouteId>,
    pub routes: &'a [Route],
}

/// Every configured menu, by name, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct MenuRegistry {
    menus: IndexMap<String, Menu>,
}

impl MenuRegistry {
    /// Build all menus. Reports every defect across every menu.
    pub fn from_config(menus: &[MenuConfig]) -> Result<Self, Vec<ValidationError>> {
        validate_menus(menus)?;

        let mut built = IndexMap::with_capacity(menus.len());
        for config in menus {
            let menu = Menu::from_config(config).map_err(|e| vec![e])?;
            tracing::debug!(menu = %menu.name(), routes = menu.tree().len(), "Menu built");
            built.insert(config.name.clone(), menu);
        }

        Ok(Self { menus: built })
    }

    pub fn get(&self, name: &str) -> Option<&Menu> {
        self.menus.get(name)
    }

    pub fn menus(&self) -> impl Iterator<Item = &Menu> {
        self.menus.values()
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Resolve `location` against the named menu.
    pub fn resolve(&self, menu: &str, location: Option<&str>) -> Result<ActivationResult, NavError> {
        let menu = self
            .get(menu)
            .ok_or_else(|| NavError::UnknownMenu(menu.to_string()))?;
        Ok(menu.try_resolve(location)?)
    }
}
