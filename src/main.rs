mod cli;
mod config;
mod detect;
mod download;
mod error;
mod fs;
mod install;
mod models;
mod transport;
mod utils;
mod version_manager;

use cli::Cli;
use config::Config;
use download::Downloader;
use fs::OsFileSystem;
use install::Installer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transport::HttpTransport;
use utils::print_error;
use version_manager::VersionManager;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::new();

    let fs = OsFileSystem;
    let config = match Config::load(&fs) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let downloader = Downloader::new(Box::new(HttpTransport::new()));
    let installer = Installer::new(downloader);
    let manager = VersionManager::new(Box::new(OsFileSystem), installer, config);

    if let Err(e) = cli.run(&manager) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
