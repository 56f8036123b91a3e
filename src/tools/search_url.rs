// src/tools/search_url.rs
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;
use crate::tools::dialect::EngineId;

/// `{base}?{param}={percent-encoded query}` for the given engine.
pub fn encode_search_url(query: &str, engine: EngineId) -> String {
    let profile = engine.profile();
    format!(
        "{}?{}={}",
        profile.base_url,
        profile.query_param,
        urlencoding::encode(query)
    )
}

/// Like [`encode_search_url`] but for an engine id coming from outside.
/// An unknown id yields an empty string; callers must not navigate then.
pub fn encode_search_url_for(query: &str, engine_id: &str) -> String {
    match engine_id.parse::<EngineId>() {
        Ok(engine) => encode_search_url(query, engine),
        Err(e) => {
            log::error!("{}", e);
            String::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Url,
    Markdown,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ExportFormat::Text),
            "url" => Ok(ExportFormat::Url),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Url => "url",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

#[derive(Serialize)]
struct QueryExport<'a> {
    query: &'a str,
    engine: EngineId,
    url: String,
    timestamp: String,
}

pub fn export_query(query: &str, format: ExportFormat, engine: EngineId) -> String {
    export_query_at(query, format, engine, Utc::now())
}

pub fn export_query_at(
    query: &str,
    format: ExportFormat,
    engine: EngineId,
    generated_at: DateTime<Utc>,
) -> String {
    let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    match format {
        ExportFormat::Text => query.to_string(),
        ExportFormat::Url => encode_search_url(query, engine),
        ExportFormat::Markdown => format!(
            "## Search Dork Query\n\n```\n{}\n```\n\n[Open in {}]({})\n\n*Generated: {}*",
            query,
            engine.profile().name,
            encode_search_url(query, engine),
            timestamp
        ),
        ExportFormat::Json => {
            let export = QueryExport {
                query,
                engine,
                url: encode_search_url(query, engine),
                timestamp,
            };
            serde_json::to_string_pretty(&export).unwrap_or_else(|e| {
                log::error!("Failed to serialize query export: {}", e);
                String::new()
            })
        }
    }
}
