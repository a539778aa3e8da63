use crate::config::Config;
use crate::responses::error_response;
use crate::router::{handle, AppState};
use astra::Server;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod errors;
mod inventory;
mod responses;
mod router;
mod scraper;
mod spreadsheets;
mod table;
mod templates;

#[cfg(test)]
mod tests;

/// Vehicle inventory browser
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (overrides INVENTORY_CONFIG environment variable)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the inventory table and JSON API (default)
    Serve,
    /// Fetch every inventory page and write today's snapshot
    Scrape,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {e}");
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config),
        Command::Scrape => scrape(&config),
    }
}

fn serve(config: Config) {
    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("❌ {e}");
            std::process::exit(1);
        }
    };
    let max_workers = config.max_workers;
    let app = Arc::new(AppState::new(config));

    info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let path = req.uri().path().to_string();
        match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => error_response(err, &path),
        }
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}

fn scrape(config: &Config) {
    match scraper::run_inventory_scrape(config) {
        Ok(paths) => {
            for path in paths {
                info!("Saved {}", path.display());
            }
        }
        Err(e) => {
            error!("❌ Scrape failed: {e}");
            std::process::exit(1);
        }
    }
}
