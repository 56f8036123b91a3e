// src/api/routes.rs
use super::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Query building and post-processing
    cfg.service(
        web::scope("/query")
            .route("/build", web::post().to(handlers::query::build_query))
            .route("/template", web::post().to(handlers::query::instantiate_template))
            .route("/validate", web::post().to(handlers::query::validate_query))
            .route("/encode", web::post().to(handlers::query::encode_query))
            .route("/export", web::post().to(handlers::query::export_query))
    );

    // History routes
    cfg.service(
        web::resource("/history")
            .route(web::get().to(handlers::history::list_history))
            .route(web::delete().to(handlers::history::clear_history))
    );

    cfg.route("/engines", web::get().to(handlers::engines::list_engines));

    // Curated dorks; fixed paths before the id matcher
    cfg.service(
        web::scope("/dorks")
            .route("", web::get().to(handlers::dorks::list_dorks))
            .route("/stats", web::get().to(handlers::dorks::dork_stats))
            .route("/random", web::get().to(handlers::dorks::random_dork))
            .route("/{id}", web::get().to(handlers::dorks::get_dork))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use crate::catalog::loader;
    use crate::core::workbench::Workbench;
    use crate::history::QueryHistory;
    use crate::tools::dialect::EngineId;

    fn workbench() -> web::Data<Arc<Workbench>> {
        web::Data::new(Arc::new(Workbench::new(
            QueryHistory::in_memory(),
            loader::embedded(),
            EngineId::Google,
        )))
    }

    macro_rules! app {
        ($data:expr) => {
            test::init_service(App::new().app_data($data.clone()).configure(configure_routes)).await
        };
    }

    #[actix_web::test]
    async fn build_returns_query_and_records_history() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/query/build")
            .set_json(json!({
                "options": { "content_type": "documents", "site": "https://www.example.com/x" },
                "engine": "google",
                "explain": true
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(
            body["query"],
            "(ext:pdf OR ext:doc OR ext:docx OR ext:txt OR ext:rtf OR ext:odt OR ext:xls OR ext:xlsx OR ext:ppt OR ext:pptx) site:example.com"
        );
        assert!(body["url"].as_str().unwrap().starts_with("https://www.google.com/search?q="));
        assert!(body["explanation"].as_str().unwrap().contains("IMPORTANT"));

        let req = test::TestRequest::get().uri("/history").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn unknown_engine_gives_empty_url() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/query/build")
            .set_json(json!({ "options": { "ext": "pdf" }, "engine": "altavista" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["query"], "ext:pdf");
        assert_eq!(body["url"], "");

        let req = test::TestRequest::post()
            .uri("/query/encode")
            .set_json(json!({ "query": "ext:pdf", "engine": "altavista" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["url"], "");
    }

    #[actix_web::test]
    async fn template_by_id_and_free_form() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/query/template")
            .set_json(json!({ "id": "intel-001", "domain": "www.acme.org" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["query"], "site:acme.org intext:@acme.org");

        let req = test::TestRequest::post()
            .uri("/query/template")
            .set_json(json!({ "template": "site:[domain] intext:@[domain]", "domain": "" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["query"], "");

        let req = test::TestRequest::post()
            .uri("/query/template")
            .set_json(json!({ "id": "nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let req = test::TestRequest::post()
            .uri("/query/template")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn validate_and_export() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/query/validate")
            .set_json(json!({ "query": "" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["validation"]["valid"], false);
        assert_eq!(body["validation"]["errors"][0], "Query cannot be empty");

        let req = test::TestRequest::post()
            .uri("/query/export")
            .set_json(json!({ "query": "ext:pdf", "format": "url", "engine": "yahoo" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["content"], "https://search.yahoo.com/search?p=ext%3Apdf");

        let req = test::TestRequest::post()
            .uri("/query/export")
            .set_json(json!({ "query": "ext:pdf", "format": "pdf" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn recording_routes_write_history_in_order() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::post()
            .uri("/query/build")
            .set_json(json!({ "options": { "ext": "pdf" } }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/query/template")
            .set_json(json!({ "id": "intel-001", "domain": "acme.org" }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri("/dorks/infra-003?domain=acme.org").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        assert_eq!(
            data.history(),
            ["site:acme.org inurl:.git", "site:acme.org intext:@acme.org", "ext:pdf"]
        );
    }

    #[actix_web::test]
    async fn clear_history() {
        let data = workbench();
        data.build(&crate::models::QueryOptions::new().with_ext("pdf"), EngineId::Google);
        let app = app!(data);

        let req = test::TestRequest::delete().uri("/history").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert!(data.history().is_empty());
    }

    #[actix_web::test]
    async fn dorks_listing_and_filters() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::get().uri("/dorks").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["dorks"].as_array().unwrap().len(), 38);
        assert_eq!(body["categories"][0], "Reconnaissance");

        let req = test::TestRequest::get().uri("/dorks?risk=critical&domain=acme.org").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["stats"]["critical"], 8);
        assert_eq!(body["dorks"].as_array().unwrap().len(), 8);

        let req = test::TestRequest::get().uri("/dorks?risk=extreme").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn single_dork_stats_and_random() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::get().uri("/dorks/infra-003?domain=acme.org&engine=bing").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["query"], "site:acme.org inurl:.git");
        assert_eq!(body["url"], "https://www.bing.com/search?q=site%3Aacme.org%20inurl%3A.git");
        assert!(body["metadata"].as_str().unwrap().contains("# Risk Level: Critical"));

        let req = test::TestRequest::get().uri("/dorks/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let req = test::TestRequest::get().uri("/dorks/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["stats"]["total"], 38);
        assert_eq!(body["stats"]["medium"], 13);

        let req = test::TestRequest::get().uri("/dorks/random").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert!(!body["dork"]["query"].as_str().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn engines_listing() {
        let data = workbench();
        let app = app!(data);

        let req = test::TestRequest::get().uri("/engines").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let engines = body["engines"].as_array().unwrap();
        assert_eq!(engines.len(), 6);
        assert_eq!(engines[0]["default"], true);
        assert_eq!(engines[2]["profile"]["query_param"], "p");
    }
}
