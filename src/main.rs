use clap::Parser;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::path::Path;
use std::io;

mod cli;
mod api;
mod core;
mod catalog;
mod history;
mod utils;
mod models;
mod tools;
mod logging;

use crate::cli::Args;
use crate::core::config::Config;
use crate::core::workbench::Workbench;

fn to_io_error<E: std::fmt::Display>(context: &str, e: E) -> io::Error {
    let message = format!("{}: {}", context, e);
    log::error!("{}", message);
    io::Error::new(io::ErrorKind::Other, message)
}

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load();
    if let Some(engine) = args.engine {
        config.default_engine = engine;
    }
    if let Some(dataset) = &args.dataset {
        config.dataset_source = Some(dataset.clone());
    }
    if let Some(port) = args.api_port {
        config.web_port = port;
    }

    logging::init_logging(&config)?;
    log::debug!("Command line args: {:?}", args);
    log::debug!("Loaded config: {:?}", config);

    let workbench = Arc::new(Workbench::from_config(&config).await);

    // One-shot subcommand
    if let Some(command) = args.command {
        return cli::handlers::run_command(&workbench, command, args.engine, args.json)
            .map_err(|e| to_io_error("Command failed", e));
    }

    // API-only mode (blocks until shutdown)
    if args.api_only {
        log::info!("API-only mode active. CLI interface disabled.");
        println!("🚀 API server listening on http://{}:{}", config.web_address, config.web_port);
        println!("📖 Docs at /swagger-ui/ and /redoc");
        return api::start_server(workbench, config.web_address.clone(), config.web_port).await
            .map_err(|e| to_io_error("API server failed", e));
    }

    let should_exit = Arc::new(AtomicBool::new(false));
    {
        let should_exit = Arc::clone(&should_exit);
        if let Err(e) = ctrlc::set_handler(move || {
            log::info!("Ctrl+C received. Shutting down...");
            should_exit.store(true, Ordering::SeqCst);
            println!("\n👋 Goodbye!");
            std::process::exit(0);
        }) {
            log::warn!("Failed to set Ctrl+C handler: {}", e);
        }
    }

    // CLI interactive menu
    cli::menu::run_cli_menu(workbench, should_exit).await
        .map_err(|e| to_io_error("CLI menu error", e))?;

    log::info!("DorkForge shutdown complete.");
    Ok(())
}
