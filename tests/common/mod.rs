//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use bazaar_nav::config::{load_config, NavConfig};
use bazaar_nav::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The sample configuration shipped at the repository root.
pub fn sample_config() -> NavConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("nav.toml");
    load_config(&path).expect("sample nav.toml must be valid")
}

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<NavConfig>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start_server(config: NavConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).expect("config must be valid");

    let shutdown = Shutdown::new();
    let (updates, rx) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, rx, server_shutdown));

    tokio::time::sleep(Duration::from_millis(50)).await;
    TestServer {
        addr,
        updates,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
