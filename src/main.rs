use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod consolidate;
mod extract;
mod fetch;
mod label;
mod pipeline;

use cli::Cli;
use config::{AppConfig, ConfigError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle --init flag first (before any other processing)
    if cli.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("✅ Created default configuration file at: {}", path.display());
                println!("   Edit this file to customize sources, then run sellerscrawler again.");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(msg) = cli.validate() {
        eprintln!("Error: {}", msg);
        std::process::exit(1);
    }

    init_tracing(cli.verbose);

    let mut app_config = load_config(&cli);

    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)?;
        app_config.output = app_config.output.with_base_dir(Path::new(dir));
    }

    let report = pipeline::run(&app_config).await?;
    consolidate::print_crawl_summary(&report, cli.top);

    Ok(())
}

/// Load configuration, exiting the process with a message when it is
/// missing or invalid. A missing default config offers interactive creation.
fn load_config(cli: &Cli) -> AppConfig {
    if let Some(path) = &cli.config {
        return match AppConfig::load_from_path(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        };
    }

    match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(ConfigError::FileNotFound(path)) => {
            // Config not found - prompt to create if interactive
            match AppConfig::prompt_create_config() {
                Ok(Some(created_path)) => {
                    println!("✅ Created default configuration file at: {}", created_path.display());
                    println!("   Edit this file to customize sources, then run sellerscrawler again.");
                    std::process::exit(0);
                }
                Ok(None) => {
                    eprintln!("❌ Configuration file not found at: {}", path.display());
                    eprintln!("   Run with --init to create a default configuration file.");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("❌ Failed to create configuration file: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "info",
        1 => "sellerscrawler=debug,info",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
