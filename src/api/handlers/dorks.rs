// src/api/handlers/dorks.rs
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::api::handlers::{request_url, with_history};
use crate::api::types::{
    DorkListQuery, DorkListResponse, DorkListing, DorkResponse, DorkTargetQuery, RandomDorkResponse,
    StatsResponse,
};
use crate::catalog::{self, CatalogFilter, RiskLevel};
use crate::core::workbench::Workbench;

#[utoipa::path(
    get,
    path = "/dorks",
    tag = "Dorks",
    params(DorkListQuery),
    responses(
        (status = 200, description = "Matching curated dorks", body = DorkListResponse),
        (status = 400, description = "Unknown risk level", body = DorkListResponse)
    )
)]
pub async fn list_dorks(
    workbench: web::Data<Arc<Workbench>>,
    query: web::Query<DorkListQuery>,
) -> impl Responder {
    let risk = match query.risk.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(raw) => match raw.parse::<RiskLevel>() {
            Ok(risk) => Some(risk),
            Err(e) => {
                return HttpResponse::BadRequest().json(DorkListResponse {
                    success: false,
                    dorks: Vec::new(),
                    stats: None,
                    categories: Vec::new(),
                    error: Some(e),
                });
            }
        },
        None => None,
    };

    let filter = CatalogFilter {
        phase: query.phase,
        risk,
        category: query.category.clone(),
        search: query.search.clone(),
    };
    let domain = query.domain.as_deref().unwrap_or("");

    let catalog = workbench.catalog();
    let records = catalog.filter(&filter);
    let stats = catalog::RiskStats::from_records(records.iter().copied());
    let dorks = records
        .into_iter()
        .map(|record| DorkListing {
            query: record.instantiate(domain),
            needs_domain: record.needs_domain(),
            dork: record.clone(),
        })
        .collect();

    HttpResponse::Ok().json(DorkListResponse {
        success: true,
        dorks,
        stats: Some(stats),
        categories: catalog.categories().into_iter().map(String::from).collect(),
        error: None,
    })
}

#[utoipa::path(
    get,
    path = "/dorks/stats",
    tag = "Dorks",
    responses(
        (status = 200, description = "Risk level counts over the whole catalog", body = StatsResponse)
    )
)]
pub async fn dork_stats(workbench: web::Data<Arc<Workbench>>) -> impl Responder {
    HttpResponse::Ok().json(StatsResponse {
        success: true,
        stats: workbench.catalog().stats(),
    })
}

#[utoipa::path(
    get,
    path = "/dorks/random",
    tag = "Dorks",
    params(DorkTargetQuery),
    responses(
        (status = 200, description = "A random popular dork", body = RandomDorkResponse)
    )
)]
pub async fn random_dork(
    workbench: web::Data<Arc<Workbench>>,
    query: web::Query<DorkTargetQuery>,
) -> impl Responder {
    let domain = query.domain.as_deref().unwrap_or("");

    match workbench.random_dork(domain) {
        Some(dork) => {
            let url = request_url(&workbench, &dork.query, query.engine.as_deref());
            HttpResponse::Ok().json(RandomDorkResponse {
                success: true,
                dork: Some(dork),
                url: Some(url),
                error: None,
            })
        }
        None => HttpResponse::Ok().json(RandomDorkResponse {
            success: false,
            dork: None,
            url: None,
            error: Some("No popular dork available".to_string()),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/dorks/{id}",
    tag = "Dorks",
    params(
        ("id" = String, Path, description = "Dork id"),
        DorkTargetQuery
    ),
    responses(
        (status = 200, description = "Dork instantiated for the domain", body = DorkResponse),
        (status = 404, description = "Dork not found", body = DorkResponse),
        (status = 500, description = "History worker failed", body = DorkResponse)
    )
)]
pub async fn get_dork(
    workbench: web::Data<Arc<Workbench>>,
    path: web::Path<String>,
    query: web::Query<DorkTargetQuery>,
) -> impl Responder {
    let id = path.into_inner();
    let domain = query.domain.as_deref().unwrap_or("");

    let record = match workbench.catalog().get(&id) {
        Some(record) => record.clone(),
        None => {
            return HttpResponse::NotFound().json(DorkResponse {
                success: false,
                dork: None,
                query: None,
                url: None,
                metadata: None,
                error: Some(format!("Dork not found: {}", id)),
            });
        }
    };

    let target = domain.to_string();
    let instantiated = match with_history(&workbench, move |bench| bench.instantiate_record(&id, &target)).await {
        Ok(query) => query.unwrap_or_default(),
        Err(e) => {
            log::error!("Query history worker failed: {}", e);
            return HttpResponse::InternalServerError().json(DorkResponse {
                success: false,
                dork: None,
                query: None,
                url: None,
                metadata: None,
                error: Some("Query history is unavailable".to_string()),
            });
        }
    };
    HttpResponse::Ok().json(DorkResponse {
        success: true,
        url: Some(request_url(&workbench, &instantiated, query.engine.as_deref())),
        metadata: Some(catalog::format_with_metadata(&record, &instantiated)),
        query: Some(instantiated),
        dork: Some(record),
        error: None,
    })
}
