// src/api/handlers/query.rs
use actix_web::{error::BlockingError, web, HttpResponse, Responder};
use std::sync::Arc;
use crate::api::handlers::{request_engine, request_url, with_history};
use crate::api::types::{
    BuildRequest, EncodeRequest, EncodeResponse, ExportRequest, ExportResponse, QueryResponse,
    TemplateRequest, ValidateRequest, ValidationResponse,
};
use crate::core::workbench::Workbench;
use crate::tools::search_url::ExportFormat;

fn history_unavailable(e: BlockingError) -> HttpResponse {
    log::error!("Query history worker failed: {}", e);
    HttpResponse::InternalServerError().json(QueryResponse {
        success: false,
        error: Some("Query history is unavailable".to_string()),
        ..QueryResponse::default()
    })
}

#[utoipa::path(
    post,
    path = "/query/build",
    tag = "Query",
    request_body(content = BuildRequest, description = "Structured query options and target engine"),
    responses(
        (status = 200, description = "Query built", body = QueryResponse),
        (status = 500, description = "History worker failed", body = QueryResponse)
    )
)]
pub async fn build_query(
    workbench: web::Data<Arc<Workbench>>,
    req: web::Json<BuildRequest>,
) -> impl Responder {
    let engine = request_engine(&workbench, req.engine.as_deref());
    let options = req.options.clone();
    let query = match with_history(&workbench, move |bench| bench.build(&options, engine)).await {
        Ok(query) => query,
        Err(e) => return history_unavailable(e),
    };
    let url = if query.is_empty() {
        String::new()
    } else {
        request_url(&workbench, &query, req.engine.as_deref())
    };

    HttpResponse::Ok().json(QueryResponse {
        success: true,
        validation: Some(workbench.validate(&query)),
        explanation: req.explain.then(|| workbench.explain(&req.options, engine)),
        query: Some(query),
        engine: Some(engine),
        url: Some(url),
        error: None,
    })
}

#[utoipa::path(
    post,
    path = "/query/template",
    tag = "Query",
    request_body(content = TemplateRequest, description = "Catalog id or free-form template plus an optional domain"),
    responses(
        (status = 200, description = "Template instantiated", body = QueryResponse),
        (status = 400, description = "Neither id nor template given", body = QueryResponse),
        (status = 404, description = "Unknown catalog id", body = QueryResponse),
        (status = 500, description = "History worker failed", body = QueryResponse)
    )
)]
pub async fn instantiate_template(
    workbench: web::Data<Arc<Workbench>>,
    req: web::Json<TemplateRequest>,
) -> impl Responder {
    let domain = req.domain.clone().unwrap_or_default();

    let query = match (req.id.clone(), req.template.clone()) {
        (Some(id), _) => {
            let lookup = id.clone();
            match with_history(&workbench, move |bench| bench.instantiate_record(&lookup, &domain)).await {
                Ok(Some(query)) => query,
                Ok(None) => {
                    return HttpResponse::NotFound().json(QueryResponse {
                        success: false,
                        error: Some(format!("Dork not found: {}", id)),
                        ..QueryResponse::default()
                    });
                }
                Err(e) => return history_unavailable(e),
            }
        }
        (None, Some(template)) => {
            match with_history(&workbench, move |bench| bench.instantiate(&template, &domain)).await {
                Ok(query) => query,
                Err(e) => return history_unavailable(e),
            }
        }
        (None, None) => {
            return HttpResponse::BadRequest().json(QueryResponse {
                success: false,
                error: Some("Either id or template is required".to_string()),
                ..QueryResponse::default()
            });
        }
    };

    let engine = request_engine(&workbench, req.engine.as_deref());
    HttpResponse::Ok().json(QueryResponse {
        success: true,
        url: Some(request_url(&workbench, &query, req.engine.as_deref())),
        validation: Some(workbench.validate(&query)),
        query: Some(query),
        engine: Some(engine),
        explanation: None,
        error: None,
    })
}

#[utoipa::path(
    post,
    path = "/query/validate",
    tag = "Query",
    request_body(content = ValidateRequest, description = "Query to check"),
    responses(
        (status = 200, description = "Validation findings", body = ValidationResponse)
    )
)]
pub async fn validate_query(
    workbench: web::Data<Arc<Workbench>>,
    req: web::Json<ValidateRequest>,
) -> impl Responder {
    HttpResponse::Ok().json(ValidationResponse {
        success: true,
        validation: workbench.validate(&req.query),
    })
}

#[utoipa::path(
    post,
    path = "/query/encode",
    tag = "Query",
    request_body(content = EncodeRequest, description = "Query and engine id"),
    responses(
        (status = 200, description = "Search URL, empty for an unknown engine", body = EncodeResponse)
    )
)]
pub async fn encode_query(
    workbench: web::Data<Arc<Workbench>>,
    req: web::Json<EncodeRequest>,
) -> impl Responder {
    let url = request_url(&workbench, &req.query, req.engine.as_deref());
    let error = url
        .is_empty()
        .then(|| format!("Unknown search engine: {}", req.engine.as_deref().unwrap_or("")));

    HttpResponse::Ok().json(EncodeResponse {
        success: !url.is_empty(),
        url,
        error,
    })
}

#[utoipa::path(
    post,
    path = "/query/export",
    tag = "Query",
    request_body(content = ExportRequest, description = "Query, format and engine id"),
    responses(
        (status = 200, description = "Exported query", body = ExportResponse),
        (status = 400, description = "Unknown export format", body = ExportResponse)
    )
)]
pub async fn export_query(
    workbench: web::Data<Arc<Workbench>>,
    req: web::Json<ExportRequest>,
) -> impl Responder {
    let format = match req.format.as_deref().map(str::parse::<ExportFormat>).transpose() {
        Ok(format) => format.unwrap_or_default(),
        Err(e) => {
            return HttpResponse::BadRequest().json(ExportResponse {
                success: false,
                format: None,
                content: None,
                error: Some(e),
            });
        }
    };

    let engine = request_engine(&workbench, req.engine.as_deref());
    HttpResponse::Ok().json(ExportResponse {
        success: true,
        format: Some(format.to_string()),
        content: Some(workbench.export(&req.query, format, engine)),
        error: None,
    })
}
