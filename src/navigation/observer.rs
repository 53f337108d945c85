//! Navigation observer.
//!
//! # Responsibilities
//! - Re-run the resolver on every navigation event
//! - Publish the highlight state to subscribers
//! - Re-resolve the current location when the caller swaps in a new menu
//!
//! # Design Decisions
//! - The resolver stays pure; state lives here
//! - Subscribers are woken only when the highlight actually changes
//! - Rejected locations are logged and leave the state untouched

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use crate::navigation::menu::Menu;
use crate::routing::{location_from_href, normalize, validate_location, ActivationResult, ResolveError};

/// Tracks the current location for one menu and publishes its highlights.
pub struct NavigationObserver {
    menu: Arc<Menu>,
    location: String,
    tx: watch::Sender<ActivationResult>,
}

impl NavigationObserver {
    pub fn new(menu: Arc<Menu>, location: &str) -> Self {
        let (tx, _) = watch::channel(menu.resolve(location));
        Self {
            menu,
            location: normalize(Some(location)),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ActivationResult> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> ActivationResult {
        self.tx.borrow().clone()
    }

    /// Last accepted location, normalized.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Handle a navigation event. Returns whether the highlight changed.
    pub fn navigate(&mut self, location: &str) -> Result<bool, ResolveError> {
        let location = validate_location(Some(location))?;
        self.location = normalize(Some(location));
        let next = self.menu.resolve(location);
        Ok(self.publish(next))
    }

    /// Swap in a rebuilt menu and re-resolve the current location.
    pub fn replace_menu(&mut self, menu: Arc<Menu>) -> bool {
        self.menu = menu;
        let next = self.menu.resolve(&self.location);
        self.publish(next)
    }

    fn publish(&self, next: ActivationResult) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    /// Consume navigation events (hrefs) until the channel closes or
    /// shutdown is signalled.
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<String>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::debug!(menu = %self.menu.name(), location = %self.location, "Navigation observer starting");
        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(href) = event else { break };
                    let location = location_from_href(&href);
                    match self.navigate(&location) {
                        Ok(changed) => tracing::debug!(
                            menu = %self.menu.name(),
                            location = %self.location,
                            changed,
                            "Navigation event handled"
                        ),
                        Err(e) => tracing::warn!(
                            menu = %self.menu.name(),
                            href = %href,
                            error = %e,
                            "Navigation event rejected"
                        ),
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!(menu = %self.menu.name(), "Navigation observer received shutdown signal");
                    break;
                }
            }
        }
    }
}
