// src/api/handlers/history.rs
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::api::handlers::with_history;
use crate::api::types::HistoryResponse;
use crate::core::workbench::Workbench;

#[utoipa::path(
    get,
    path = "/history",
    tag = "History",
    responses(
        (status = 200, description = "Recently built queries, newest first", body = HistoryResponse)
    )
)]
pub async fn list_history(workbench: web::Data<Arc<Workbench>>) -> impl Responder {
    HttpResponse::Ok().json(HistoryResponse {
        success: true,
        history: workbench.history(),
    })
}

#[utoipa::path(
    delete,
    path = "/history",
    tag = "History",
    responses(
        (status = 200, description = "History cleared", body = HistoryResponse),
        (status = 500, description = "History worker failed", body = HistoryResponse)
    )
)]
pub async fn clear_history(workbench: web::Data<Arc<Workbench>>) -> impl Responder {
    match with_history(&workbench, |bench| bench.clear_history()).await {
        Ok(()) => HttpResponse::Ok().json(HistoryResponse {
            success: true,
            history: Vec::new(),
        }),
        Err(e) => {
            log::error!("Failed to clear history: {}", e);
            HttpResponse::InternalServerError().json(HistoryResponse {
                success: false,
                history: workbench.history(),
            })
        }
    }
}
