//! bazaar-nav: active-route resolution service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Hosting app (navbar, dashboards)
//!         │  GET /menus/{name}/active?path=…
//!         ▼
//!     ┌─────────┐    ┌──────────────┐    ┌──────────────┐
//!     │  http   │───▶│  navigation  │───▶│   routing    │
//!     │ server  │    │ MenuRegistry │    │  resolver    │
//!     └─────────┘    └──────┬───────┘    └──────────────┘
//!                           ▲
//!     ┌─────────┐    ┌──────┴───────┐
//!     │ watcher │───▶│    config    │   (hot reload, arc-swap)
//!     └─────────┘    └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use bazaar_nav::lifecycle::startup::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "bazaar-nav")]
#[command(about = "Active-route resolution service for LocalChefBazaar menus", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Do not reload menus when the configuration file changes.
    #[arg(long)]
    no_watch: bool,
}

impl From<Args> for StartupOptions {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            bind_address: args.bind,
            watch: !args.no_watch,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    startup::run(Args::parse().into()).await
}
