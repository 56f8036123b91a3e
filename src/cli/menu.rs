// src/cli/menu.rs
use inquire::{Confirm, Select, Text};
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use console::style;

use crate::catalog::CatalogFilter;
use crate::cli::handlers;
use crate::core::workbench::Workbench;
use crate::models::{QueryOptions, ANY_EXTENSION};
use crate::tools::content::ContentType;
use crate::tools::dialect::EngineId;
use crate::tools::domain::is_well_formed_domain;
use crate::tools::search_url::ExportFormat;
use crate::utils::truncate_string;

const BUILD: &str = "🔎  Build a query";
const CATALOG: &str = "📚  Browse curated dorks";
const RANDOM: &str = "🎲  Random popular dork";
const VALIDATE: &str = "✅  Validate a query";
const EXPORT: &str = "📤  Export a query";
const HISTORY: &str = "🕘  Show history";
const CLEAR_HISTORY: &str = "🗑️  Clear history";
const ENGINE: &str = "🌐  Switch search engine";
const EXIT: &str = "❌  Exit";

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_domain(message: &str) -> Result<String, Box<dyn Error>> {
    let domain = Text::new(message)
        .with_help_message("Leave empty for an untargeted query")
        .prompt()?;

    if !is_well_formed_domain(domain.trim()) {
        println!("{} '{}' does not look like a domain, using it anyway", style("⚠️").yellow(), domain.trim());
    }
    Ok(domain.trim().to_string())
}

fn build_query(workbench: &Workbench, engine: EngineId) -> Result<(), Box<dyn Error>> {
    let mut choices = vec!["(none)".to_string()];
    choices.extend(ContentType::ALL.iter().map(|ct| ct.to_string()));

    let content_type = Select::new("Content type:", choices).prompt()?;
    let content_type = content_type.parse::<ContentType>().ok();

    let site = prompt_domain("Site (optional):")?;
    let ext = Text::new("File extension:").with_default(ANY_EXTENSION).prompt()?;
    let keywords = Text::new("Keywords (optional):").prompt()?;
    let download_focus = Confirm::new("Focus on download pages?")
        .with_default(false)
        .prompt()?;

    let options = QueryOptions {
        content_type,
        site: optional(site),
        ext: optional(ext),
        keywords: optional(keywords),
        download_focus,
        ..QueryOptions::default()
    };

    let output = handlers::handle_build(workbench, &options, engine, true);
    println!("{}", output.text);
    Ok(())
}

fn browse_catalog(workbench: &Workbench, engine: EngineId) -> Result<(), Box<dyn Error>> {
    let mut categories = vec!["All categories".to_string()];
    categories.extend(workbench.catalog().categories().into_iter().map(String::from));

    let category = Select::new("Category:", categories).prompt()?;
    let search = Text::new("Search (optional):").prompt()?;

    let filter = CatalogFilter {
        category: (category != "All categories").then_some(category),
        search: optional(search),
        ..CatalogFilter::default()
    };

    let records = workbench.catalog().filter(&filter);
    if records.is_empty() {
        println!("No dorks match that filter.");
        return Ok(());
    }

    let labels: Vec<String> = records
        .iter()
        .map(|record| format!("{} [{}] {}", record.id, record.risk, truncate_string(&record.title, 60)))
        .collect();
    let picked = Select::new("Dork:", labels.clone()).with_page_size(15).prompt()?;
    let index = labels.iter().position(|label| *label == picked).unwrap_or(0);
    let id = records[index].id.clone();

    let domain = prompt_domain("Target domain (optional):")?;
    let output = handlers::handle_template(workbench, &id, &domain, true, engine);
    println!("{}", output.text);
    println!("{} {}", style("URL:").dim(), output.json["url"].as_str().unwrap_or(""));
    Ok(())
}

fn export_query(workbench: &Workbench, engine: EngineId) -> Result<(), Box<dyn Error>> {
    let query = Text::new("Query:").prompt()?;
    let format = Select::new(
        "Format:",
        vec![ExportFormat::Text, ExportFormat::Url, ExportFormat::Markdown, ExportFormat::Json],
    )
    .prompt()?;

    println!("{}", handlers::handle_export(workbench, &query, format, engine).text);
    Ok(())
}

pub async fn run_cli_menu(workbench: Arc<Workbench>, should_exit: Arc<AtomicBool>) -> Result<(), Box<dyn Error>> {
    println!("╔══════════════════════════════════════╗");
    println!("║            🔎 DORKFORGE              ║");
    println!("╚══════════════════════════════════════╝");
    println!("Use responsibly: only search for what you are authorised to assess.");

    let mut engine = workbench.default_engine();

    let mut exit_requested = false;
    while !exit_requested && !should_exit.load(Ordering::SeqCst) {
        let options = vec![BUILD, CATALOG, RANDOM, VALIDATE, EXPORT, HISTORY, CLEAR_HISTORY, ENGINE, EXIT];
        let prompt = format!("Choose an option [{}]:", engine.profile().name);

        let selection_result = tokio::task::spawn_blocking(move || {
            Select::new(&prompt, options)
                .with_help_message("Use arrow keys to navigate, Enter to select. Ctrl+C to exit.")
                .with_page_size(20)
                .prompt_skippable()
        }).await?;

        if should_exit.load(Ordering::SeqCst) {
            break;
        }

        match selection_result {
            Ok(Some(BUILD)) => build_query(&workbench, engine)?,
            Ok(Some(CATALOG)) => browse_catalog(&workbench, engine)?,
            Ok(Some(RANDOM)) => {
                let domain = prompt_domain("Target domain (optional):")?;
                println!("{}", handlers::handle_random(&workbench, &domain, engine).text);
            }
            Ok(Some(VALIDATE)) => {
                let query = Text::new("Query:").prompt()?;
                println!("{}", handlers::handle_validate(&workbench, &query).text);
            }
            Ok(Some(EXPORT)) => export_query(&workbench, engine)?,
            Ok(Some(HISTORY)) => println!("{}", handlers::handle_history(&workbench, false).text),
            Ok(Some(CLEAR_HISTORY)) => {
                let confirmed = Confirm::new("Clear all recorded queries?")
                    .with_default(false)
                    .prompt()?;
                if confirmed {
                    println!("{}", handlers::handle_history(&workbench, true).text);
                }
            }
            Ok(Some(ENGINE)) => {
                engine = Select::new("Search engine:", EngineId::ALL.to_vec()).prompt()?;
                println!("✅ Now targeting {}", engine.profile().name);
            }
            Ok(Some(_)) | Ok(None) => exit_requested = true,
            Err(e) => {
                log::warn!("Menu prompt failed: {}", e);
                exit_requested = true;
            }
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}
