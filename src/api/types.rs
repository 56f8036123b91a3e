// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;
use utoipa::IntoParams;
use crate::catalog::popular::RenderedTemplate;
use crate::catalog::{DorkTemplateRecord, RiskStats};
use crate::models::{QueryOptions, ValidationResult};
use crate::tools::dialect::{EngineId, EngineProfile};

// Query building
#[derive(Serialize, Deserialize, ToSchema, Debug, Default)]
pub struct BuildRequest {
    /// Structured query options
    #[serde(default)]
    pub options: QueryOptions,
    /// Target engine id (defaults to the server's configured engine)
    pub engine: Option<String>,
    /// Include a clause-by-clause explanation
    #[serde(default)]
    pub explain: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Default)]
pub struct QueryResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The finished query (empty when no option produced a clause)
    pub query: Option<String>,
    /// Engine whose dialect was used
    pub engine: Option<EngineId>,
    /// Search URL; empty when the requested engine id is unknown
    pub url: Option<String>,
    pub validation: Option<ValidationResult>,
    pub explanation: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Default)]
pub struct TemplateRequest {
    /// Catalog record id; takes precedence over `template`
    pub id: Option<String>,
    /// Free-form template containing `[domain]` style placeholders
    pub template: Option<String>,
    /// Target domain, may be empty
    pub domain: Option<String>,
    pub engine: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ValidateRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ValidationResponse {
    pub success: bool,
    pub validation: ValidationResult,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct EncodeRequest {
    pub query: String,
    pub engine: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct EncodeResponse {
    pub success: bool,
    /// Search URL; empty when the engine id is unknown
    pub url: String,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ExportRequest {
    pub query: String,
    /// text, url, markdown or json (default text)
    pub format: Option<String>,
    pub engine: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ExportResponse {
    pub success: bool,
    pub format: Option<String>,
    pub content: Option<String>,
    pub error: Option<String>,
}

// History
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct HistoryResponse {
    pub success: bool,
    /// Newest first
    pub history: Vec<String>,
}

// Engines
#[derive(Serialize, ToSchema, Debug)]
pub struct OperatorInfo {
    pub operator: &'static str,
    pub token: &'static str,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct EngineInfo {
    pub profile: EngineProfile,
    /// Operators the engine understands, with its spelling of each
    pub operators: Vec<OperatorInfo>,
    pub default: bool,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct EnginesResponse {
    pub success: bool,
    pub engines: Vec<EngineInfo>,
}

// Curated dorks
#[derive(Serialize, Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct DorkListQuery {
    /// Exact phase number
    pub phase: Option<u32>,
    /// Risk level, case-insensitive
    pub risk: Option<String>,
    /// Exact category name
    pub category: Option<String>,
    /// Case-insensitive text search
    pub search: Option<String>,
    /// Domain used to instantiate the listed queries
    pub domain: Option<String>,
}

#[derive(Serialize, Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct DorkTargetQuery {
    /// Target domain
    pub domain: Option<String>,
    /// Engine id for the search URL
    pub engine: Option<String>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct DorkListing {
    pub dork: DorkTemplateRecord,
    /// The template instantiated for the requested domain
    pub query: String,
    pub needs_domain: bool,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct DorkListResponse {
    pub success: bool,
    pub dorks: Vec<DorkListing>,
    pub stats: Option<RiskStats>,
    pub categories: Vec<String>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct DorkResponse {
    pub success: bool,
    pub dork: Option<DorkTemplateRecord>,
    pub query: Option<String>,
    pub url: Option<String>,
    /// Copy-ready text block with the record's metadata
    pub metadata: Option<String>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: RiskStats,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct RandomDorkResponse {
    pub success: bool,
    pub dork: Option<RenderedTemplate>,
    pub url: Option<String>,
    pub error: Option<String>,
}
