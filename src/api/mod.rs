// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use std::sync::Arc;
use crate::core::workbench::Workbench;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use utoipa_redoc::{Redoc, Servable};

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Query endpoints
        crate::api::handlers::query::build_query,
        crate::api::handlers::query::instantiate_template,
        crate::api::handlers::query::validate_query,
        crate::api::handlers::query::encode_query,
        crate::api::handlers::query::export_query,

        // History endpoints
        crate::api::handlers::history::list_history,
        crate::api::handlers::history::clear_history,

        // Engine endpoints
        crate::api::handlers::engines::list_engines,

        // Curated dork endpoints
        crate::api::handlers::dorks::list_dorks,
        crate::api::handlers::dorks::dork_stats,
        crate::api::handlers::dorks::random_dork,
        crate::api::handlers::dorks::get_dork
    ),
    components(
        schemas(
            // Request/response schemas
            crate::api::types::BuildRequest,
            crate::api::types::QueryResponse,
            crate::api::types::TemplateRequest,
            crate::api::types::ValidateRequest,
            crate::api::types::ValidationResponse,
            crate::api::types::EncodeRequest,
            crate::api::types::EncodeResponse,
            crate::api::types::ExportRequest,
            crate::api::types::ExportResponse,
            crate::api::types::HistoryResponse,
            crate::api::types::OperatorInfo,
            crate::api::types::EngineInfo,
            crate::api::types::EnginesResponse,
            crate::api::types::DorkListing,
            crate::api::types::DorkListResponse,
            crate::api::types::DorkResponse,
            crate::api::types::StatsResponse,
            crate::api::types::RandomDorkResponse,

            // Domain models
            crate::models::QueryOptions,
            crate::models::ValidationResult,
            crate::tools::dialect::EngineId,
            crate::tools::dialect::EngineProfile,
            crate::tools::search_url::ExportFormat,
            crate::catalog::DorkTemplateRecord,
            crate::catalog::RiskLevel,
            crate::catalog::RiskStats,
            crate::catalog::popular::RenderedTemplate,
            crate::catalog::popular::TemplateGroup
        )
    ),
    tags(
        (name = "Query", description = "Build, instantiate, validate, encode and export queries"),
        (name = "History", description = "Recently built queries"),
        (name = "Engines", description = "Supported search engines and operator dialects"),
        (name = "Dorks", description = "Curated dork catalog")
    ),
    info(
        title = "DorkForge API",
        version = "0.1.0",
        description = "Search engine dork builder API",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub async fn start_server(workbench: Arc<Workbench>, address: String, port: u16) -> std::io::Result<()> {
    log::info!("Starting DorkForge API server on {}:{}", address, port);

    let workbench_data = web::Data::new(workbench);

    HttpServer::new(move || {
        // Configure CORS
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec!["Content-Type", "Accept", "X-Requested-With"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(workbench_data.clone())
            // Add Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            // Add Redoc
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(routes::configure_routes)
    })
    .bind((address.as_str(), port))?
    .run()
    .await
}

pub mod types;
pub mod routes;
pub mod handlers;
