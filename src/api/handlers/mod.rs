// src/api/handlers/mod.rs
pub mod query;
pub mod history;
pub mod dorks;
pub mod engines;

use actix_web::{error::BlockingError, web};
use std::sync::Arc;
use crate::core::workbench::Workbench;
use crate::tools::dialect::EngineId;
use crate::tools::search_url::encode_search_url_for;

fn named_engine(engine: Option<&str>) -> Option<&str> {
    engine.map(str::trim).filter(|id| !id.is_empty())
}

/// Engine a request asked for. Unknown ids fall back to the default so the
/// query can still be built; the URL then comes out empty.
pub(crate) fn request_engine(workbench: &Workbench, engine: Option<&str>) -> EngineId {
    named_engine(engine)
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| workbench.default_engine())
}

/// Search URL for a request's engine id; empty for an unknown id.
pub(crate) fn request_url(workbench: &Workbench, query: &str, engine: Option<&str>) -> String {
    match named_engine(engine) {
        Some(id) => encode_search_url_for(query, id),
        None => workbench.encode(query, workbench.default_engine()),
    }
}

/// Run a workbench call that records or clears history on the blocking pool.
/// The history store writes to disk while the builder lock is held.
pub(crate) async fn with_history<F, T>(workbench: &web::Data<Arc<Workbench>>, f: F) -> Result<T, BlockingError>
where
    F: FnOnce(&Workbench) -> T + Send + 'static,
    T: Send + 'static,
{
    let workbench = Arc::clone(workbench.get_ref());
    web::block(move || f(&workbench)).await
}
