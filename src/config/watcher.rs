//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::NavConfig;

/// Watches the configuration file and forwards every valid reload.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<NavConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<NavConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, update_tx } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    reload(&watched, &update_tx);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, tx: &mpsc::UnboundedSender<NavConfig>) {
    match load_config(path) {
        Ok(config) => {
            tracing::info!(
                path = ?path,
                menus = config.menus.len(),
                "Config file changed, reloaded"
            );
            if tx.send(config).is_err() {
                tracing::debug!("Config update receiver dropped");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_forwards_only_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav.toml");
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        std::fs::write(&path, "[[menus]]\nname = \"navbar\"\n").unwrap();
        reload(&path, &watcher.update_tx);
        let config = rx.try_recv().unwrap();
        assert_eq!(config.menus[0].name, "navbar");

        std::fs::write(&path, "[timeouts]\nrequest_secs = 0\n").unwrap();
        reload(&path, &watcher.update_tx);
        assert!(rx.try_recv().is_err());
    }
}
