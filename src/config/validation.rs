//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route trees (ids, paths, parents, cycles)
//! - Check referential integrity (fallbacks name existing routes)
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NavConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{MenuConfig, NavConfig};
use crate::routing::{check_routes, RouteError};

/// A single semantic defect in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("menu name is empty")]
    EmptyMenuName,

    #[error("menu `{0}` is declared more than once")]
    DuplicateMenu(String),

    #[error("menu `{menu}`: {source}")]
    Route {
        menu: String,
        #[source]
        source: RouteError,
    },

    #[error("menu `{menu}`: fallback `{route}` is not a registered route")]
    UnknownFallback { menu: String, route: String },

    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a whole configuration.
pub fn validate_config(config: &NavConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if let Err(menu_errors) = validate_menus(&config.menus) {
        errors.extend(menu_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate menu declarations only.
pub fn validate_menus(menus: &[MenuConfig]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for menu in menus {
        if menu.name.trim().is_empty() {
            errors.push(ValidationError::EmptyMenuName);
        } else if !seen.insert(menu.name.as_str()) {
            errors.push(ValidationError::DuplicateMenu(menu.name.clone()));
        }

        errors.extend(check_routes(&menu.routes).into_iter().map(|source| {
            ValidationError::Route {
                menu: menu.name.clone(),
                source,
            }
        }));

        if let Some(fallback) = &menu.fallback {
            if !menu.routes.iter().any(|r| &r.id == fallback) {
                errors.push(ValidationError::UnknownFallback {
                    menu: menu.name.clone(),
                    route: fallback.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
