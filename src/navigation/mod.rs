//! Navigation subsystem: configured menus and navigation observers.
//!
//! # Data Flow
//! ```text
//! NavConfig.menus
//!     → menu.rs (validate, build RouteTree per menu)
//!     → MenuRegistry (immutable, swapped whole on reload)
//!
//! Hosting application navigation events
//!     → observer.rs (re-resolve on every location change)
//!     → watch channel → subscribers re-render highlighted items
//! ```

pub mod menu;
pub mod observer;

use thiserror::Error;

use crate::routing::ResolveError;

pub use menu::{Menu, MenuRegistry, MenuSummary};
pub use observer::NavigationObserver;

/// Errors raised when resolving against the registry.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("unknown menu `{0}`")]
    UnknownMenu(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
