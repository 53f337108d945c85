use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use bazaar_nav::config::{load_config, ConfigError};
use bazaar_nav::navigation::MenuRegistry;

#[derive(Parser)]
#[command(name = "nav-cli")]
#[command(about = "Management CLI for the bazaar-nav service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// List menus and their routes
    Menus,
    /// Show which route of a menu is active for a location
    Resolve {
        menu: String,
        location: String,
    },
    /// Validate a configuration file locally
    Check {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Menus => {
            let res = client.get(format!("{}/menus", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Resolve { menu, location } => {
            let res = client
                .get(format!("{}/menus/{}/active", cli.url, menu))
                .query(&[("path", location.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Check { file } => check(&file),
    }

    Ok(())
}

fn check(file: &Path) {
    match load_config(file).and_then(|config| {
        MenuRegistry::from_config(&config.menus).map_err(ConfigError::Validation)
    }) {
        Ok(registry) => {
            println!("{}: OK", file.display());
            for menu in registry.menus() {
                println!("  {} ({} routes)", menu.name(), menu.tree().len());
            }
        }
        Err(ConfigError::Validation(errors)) => {
            eprintln!("{}: {} error(s)", file.display(), errors.len());
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
