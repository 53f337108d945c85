//! Navigation highlighting for the LocalChefBazaar marketplace.
//!
//! Resolves which navbar or dashboard item is active for the current
//! location, and serves that answer over HTTP to the hosting application.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::schema::NavConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use navigation::{Menu, MenuRegistry, NavigationObserver};
pub use routing::{resolve_active, ActivationResult, RouteSpec, RouteTree};
