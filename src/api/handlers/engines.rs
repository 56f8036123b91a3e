// src/api/handlers/engines.rs
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::api::types::{EngineInfo, EnginesResponse, OperatorInfo};
use crate::core::workbench::Workbench;
use crate::tools::dialect::EngineId;

#[utoipa::path(
    get,
    path = "/engines",
    tag = "Engines",
    responses(
        (status = 200, description = "Supported engines with their operator dialects", body = EnginesResponse)
    )
)]
pub async fn list_engines(workbench: web::Data<Arc<Workbench>>) -> impl Responder {
    let default_engine = workbench.default_engine();

    let engines = EngineId::ALL
        .iter()
        .map(|engine| EngineInfo {
            profile: engine.profile(),
            operators: engine
                .dialect()
                .entries()
                .into_iter()
                .filter(|(_, token)| !token.is_empty())
                .map(|(op, token)| OperatorInfo { operator: op.name(), token })
                .collect(),
            default: *engine == default_engine,
        })
        .collect();

    HttpResponse::Ok().json(EnginesResponse {
        success: true,
        engines,
    })
}
