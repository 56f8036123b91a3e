// src/cli/handlers.rs
use console::style;
use serde_json::json;
use std::error::Error;
use crate::catalog::{self, CatalogFilter};
use crate::cli::CliCommand;
use crate::core::workbench::Workbench;
use crate::models::{QueryOptions, ValidationResult};
use crate::tools::dialect::EngineId;
use crate::utils::numbered_lines;

/// What a command prints, in both output modes.
pub struct CommandOutput {
    pub text: String,
    pub json: serde_json::Value,
}

impl CommandOutput {
    fn new(text: String, json: serde_json::Value) -> Self {
        Self { text, json }
    }

    fn failure(message: String) -> Self {
        Self {
            text: format!("{} {}", style("✗").red(), message),
            json: json!({ "success": false, "error": message }),
        }
    }
}

fn validation_lines(result: &ValidationResult) -> String {
    let mut lines = Vec::new();
    for error in &result.errors {
        lines.push(format!("{} {}", style("error:").red().bold(), error));
    }
    for warning in &result.warnings {
        lines.push(format!("{} {}", style("warning:").yellow().bold(), warning));
    }
    lines.join("\n")
}

fn query_block(query: &str, url: &str, result: &ValidationResult) -> String {
    let mut text = format!("{}\n", style(query).green().bold());
    let findings = validation_lines(result);
    if !findings.is_empty() {
        text.push_str(&findings);
        text.push('\n');
    }
    if !url.is_empty() {
        text.push_str(&format!("{} {}", style("URL:").dim(), url));
    }
    text
}

pub fn handle_build(workbench: &Workbench, options: &QueryOptions, engine: EngineId, explain: bool) -> CommandOutput {
    let query = workbench.build(options, engine);
    if query.is_empty() {
        return CommandOutput::failure("No search criteria given".to_string());
    }

    let validation = workbench.validate(&query);
    let url = workbench.encode(&query, engine);
    let explanation = explain.then(|| workbench.explain(options, engine));

    let mut text = query_block(&query, &url, &validation);
    if let Some(explanation) = &explanation {
        text.push_str("\n\n");
        text.push_str(explanation);
    }

    CommandOutput::new(
        text,
        json!({
            "success": true,
            "query": query,
            "engine": engine,
            "url": url,
            "validation": validation,
            "explanation": explanation,
        }),
    )
}

pub fn handle_template(workbench: &Workbench, id: &str, domain: &str, metadata: bool, engine: EngineId) -> CommandOutput {
    let record = match workbench.catalog().get(id) {
        Some(record) => record,
        None => return CommandOutput::failure(format!("No dork with id '{}'", id)),
    };

    let query = workbench.instantiate_record(id, domain).unwrap_or_default();
    let url = workbench.encode(&query, engine);
    let validation = workbench.validate(&query);

    let mut text = if metadata {
        catalog::format_with_metadata(record, &query)
    } else {
        query_block(&query, &url, &validation)
    };
    if record.needs_domain() && domain.trim().is_empty() {
        text.push_str(&format!("\n{}", style("hint: pass --domain for a targeted query").dim()));
    }

    CommandOutput::new(
        text,
        json!({
            "success": true,
            "dork": record,
            "query": query,
            "url": url,
            "validation": validation,
        }),
    )
}

pub fn handle_validate(workbench: &Workbench, query: &str) -> CommandOutput {
    let result = workbench.validate(query);
    let mut text = if result.valid {
        format!("{} Query is valid", style("✓").green())
    } else {
        format!("{} Query is invalid", style("✗").red())
    };
    let findings = validation_lines(&result);
    if !findings.is_empty() {
        text.push('\n');
        text.push_str(&findings);
    }

    CommandOutput::new(text, json!({ "success": true, "validation": result }))
}

pub fn handle_encode(workbench: &Workbench, query: &str, engine: EngineId) -> CommandOutput {
    let url = workbench.encode(query, engine);
    CommandOutput::new(url.clone(), json!({ "success": true, "engine": engine, "url": url }))
}

pub fn handle_export(workbench: &Workbench, query: &str, format: crate::tools::search_url::ExportFormat, engine: EngineId) -> CommandOutput {
    let exported = workbench.export(query, format, engine);
    CommandOutput::new(exported.clone(), json!({ "success": true, "format": format, "content": exported }))
}

pub fn handle_history(workbench: &Workbench, clear: bool) -> CommandOutput {
    if clear {
        workbench.clear_history();
        return CommandOutput::new("History cleared".to_string(), json!({ "success": true, "history": [] }));
    }

    let history = workbench.history();
    let text = if history.is_empty() {
        "No queries recorded yet".to_string()
    } else {
        numbered_lines(&history)
    };

    CommandOutput::new(text, json!({ "success": true, "history": history }))
}

pub fn handle_dorks(workbench: &Workbench, filter: &CatalogFilter, domain: &str, export: bool) -> CommandOutput {
    let records = workbench.catalog().filter(filter);
    let stats = catalog::RiskStats::from_records(records.iter().copied());

    if export {
        let exported = catalog::export_records(&records, domain)
            .and_then(|text| Ok((serde_json::from_str::<serde_json::Value>(&text)?, text)));
        return match exported {
            Ok((value, text)) => CommandOutput::new(text, json!({ "success": true, "count": records.len(), "export": value })),
            Err(e) => CommandOutput::failure(format!("Failed to export dorks: {}", e)),
        };
    }

    let mut lines = Vec::new();
    for record in &records {
        lines.push(format!(
            "{} [{}] {} ({}, phase {})\n    {}",
            style(&record.id).cyan(),
            record.risk,
            style(&record.title).bold(),
            record.category,
            record.phase,
            record.instantiate(domain)
        ));
    }
    lines.push(format!(
        "{} dorks: {} critical, {} high, {} medium, {} low",
        stats.total, stats.critical, stats.high, stats.medium, stats.low
    ));

    let listed: Vec<serde_json::Value> = records
        .iter()
        .map(|record| json!({ "dork": record, "query": record.instantiate(domain) }))
        .collect();

    CommandOutput::new(lines.join("\n"), json!({ "success": true, "dorks": listed, "stats": stats }))
}

pub fn handle_engines(default_engine: EngineId) -> CommandOutput {
    let mut lines = Vec::new();
    let mut engines = Vec::new();

    for engine in EngineId::ALL {
        let profile = engine.profile();
        let supported: Vec<_> = engine
            .dialect()
            .entries()
            .into_iter()
            .filter(|(_, token)| !token.is_empty())
            .collect();

        let mut tokens: Vec<&str> = Vec::new();
        for (_, token) in &supported {
            if !tokens.contains(token) {
                tokens.push(token);
            }
        }

        let operators: Vec<serde_json::Value> = supported
            .iter()
            .map(|(op, token)| json!({ "operator": op.name(), "token": token }))
            .collect();

        let marker = if engine == default_engine { "*" } else { " " };
        lines.push(format!("{} {:<11} {}\n    {}", marker, engine.as_str(), profile.base_url, tokens.join(" ")));
        engines.push(json!({ "profile": profile, "operators": operators, "default": engine == default_engine }));
    }

    CommandOutput::new(lines.join("\n"), json!({ "success": true, "engines": engines }))
}

pub fn handle_random(workbench: &Workbench, domain: &str, engine: EngineId) -> CommandOutput {
    match workbench.random_dork(domain) {
        Some(dork) => {
            let url = workbench.encode(&dork.query, engine);
            let text = format!("{} ({})\n{}\n{} {}", style(&dork.name).bold(), dork.description, style(&dork.query).green(), style("URL:").dim(), url);
            CommandOutput::new(text, json!({ "success": true, "dork": dork, "url": url }))
        }
        None => CommandOutput::failure("No popular dork available".to_string()),
    }
}

/// Dispatch a parsed subcommand and print its output.
pub fn run_command(workbench: &Workbench, command: CliCommand, engine: Option<EngineId>, json_output: bool) -> Result<(), Box<dyn Error>> {
    let engine = workbench.engine_or_default(engine);

    let output = match command {
        CliCommand::Build {
            content_type,
            site,
            ext,
            keywords,
            download_focus,
            inurl,
            intitle,
            intext,
            after,
            before,
            raw,
            explain,
        } => {
            let options = QueryOptions {
                content_type,
                site,
                ext,
                keywords,
                download_focus,
                inurl,
                intitle,
                intext,
                before,
                after,
                raw,
            };
            handle_build(workbench, &options, engine, explain)
        }
        CliCommand::Template { id, domain, metadata } => {
            handle_template(workbench, &id, domain.as_deref().unwrap_or(""), metadata, engine)
        }
        CliCommand::Validate { query } => handle_validate(workbench, &query.join(" ")),
        CliCommand::Encode { query } => handle_encode(workbench, &query.join(" "), engine),
        CliCommand::Export { query, format } => handle_export(workbench, &query.join(" "), format, engine),
        CliCommand::History { clear } => handle_history(workbench, clear),
        CliCommand::Dorks { phase, risk, category, search, domain, export } => {
            let filter = CatalogFilter { phase, risk, category, search };
            handle_dorks(workbench, &filter, domain.as_deref().unwrap_or(""), export)
        }
        CliCommand::Engines => handle_engines(engine),
        CliCommand::Random { domain } => handle_random(workbench, domain.as_deref().unwrap_or(""), engine),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output.json)?);
    } else {
        println!("{}", output.text);
    }

    Ok(())
}
