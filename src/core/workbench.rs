// src/core/workbench.rs
use std::sync::{Mutex, MutexGuard, PoisonError};
use crate::catalog::popular::{self, RenderedTemplate};
use crate::catalog::DorkCatalog;
use crate::core::config::Config;
use crate::history::{JsonFileStore, KeyValueStore, MemoryStore, QueryHistory};
use crate::models::{QueryOptions, ValidationResult};
use crate::tools::dialect::EngineId;
use crate::tools::dork::{explain_query, DorkBuilder};
use crate::tools::sanitize::sanitize_input;
use crate::tools::search_url::{encode_search_url, export_query, ExportFormat};
use crate::tools::template;
use crate::tools::validate::validate_query;

/// Shared entry point for the CLI and the HTTP API. Owns the history log
/// behind a mutex and the read-only catalog; every operation takes the
/// target engine explicitly.
pub struct Workbench {
    builder: Mutex<DorkBuilder>,
    catalog: DorkCatalog,
    default_engine: EngineId,
}

fn history_store(config: &Config) -> Box<dyn KeyValueStore> {
    match (&config.history_dir, config.history_enabled) {
        (Some(dir), true) => Box::new(JsonFileStore::new(dir.clone())),
        (None, true) => {
            log::warn!("No history directory available, keeping history in memory");
            Box::new(MemoryStore::new())
        }
        (_, false) => Box::new(MemoryStore::new()),
    }
}

// Free-text fields arrive from users; clear markup before it reaches a query.
fn sanitize_options(options: &QueryOptions) -> QueryOptions {
    let clean = |field: &Option<String>| field.as_deref().map(sanitize_input);

    QueryOptions {
        site: clean(&options.site),
        keywords: clean(&options.keywords),
        inurl: clean(&options.inurl),
        intitle: clean(&options.intitle),
        intext: clean(&options.intext),
        ..options.clone()
    }
}

impl Workbench {
    pub fn new(history: QueryHistory, catalog: DorkCatalog, default_engine: EngineId) -> Self {
        Self {
            builder: Mutex::new(DorkBuilder::new(history)),
            catalog,
            default_engine,
        }
    }

    pub async fn from_config(config: &Config) -> Self {
        config.ensure_directories_exist();

        let history = QueryHistory::load(history_store(config));
        let catalog = DorkCatalog::load(config.dataset_source.as_deref(), config.dataset_timeout).await;
        log::info!(
            "Workbench ready: {} dorks, {} history entries, default engine {}",
            catalog.len(),
            history.len(),
            config.default_engine
        );

        Self::new(history, catalog, config.default_engine)
    }

    fn builder(&self) -> MutexGuard<'_, DorkBuilder> {
        self.builder.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn default_engine(&self) -> EngineId {
        self.default_engine
    }

    pub fn engine_or_default(&self, engine: Option<EngineId>) -> EngineId {
        engine.unwrap_or(self.default_engine)
    }

    pub fn catalog(&self) -> &DorkCatalog {
        &self.catalog
    }

    /// Build a query and record it in history when non-empty.
    pub fn build(&self, options: &QueryOptions, engine: EngineId) -> String {
        let options = sanitize_options(options);
        self.builder().build(&options, engine)
    }

    pub fn explain(&self, options: &QueryOptions, engine: EngineId) -> String {
        explain_query(&sanitize_options(options), engine)
    }

    /// Instantiate a free-form template; the result is recorded like a build.
    pub fn instantiate(&self, template_text: &str, domain: &str) -> String {
        let query = template::instantiate(&sanitize_input(template_text), &sanitize_input(domain));
        self.builder().history_mut().record(&query);
        query
    }

    /// Instantiate a catalog record by id.
    pub fn instantiate_record(&self, id: &str, domain: &str) -> Option<String> {
        let record = self.catalog.get(id)?;
        let query = record.instantiate(&sanitize_input(domain));
        self.builder().history_mut().record(&query);
        Some(query)
    }

    pub fn validate(&self, query: &str) -> ValidationResult {
        validate_query(query)
    }

    pub fn encode(&self, query: &str, engine: EngineId) -> String {
        encode_search_url(query, engine)
    }

    pub fn export(&self, query: &str, format: ExportFormat, engine: EngineId) -> String {
        export_query(query, format, engine)
    }

    pub fn history(&self) -> Vec<String> {
        self.builder().history().list().to_vec()
    }

    pub fn clear_history(&self) {
        self.builder().history_mut().clear();
        log::info!("Query history cleared");
    }

    pub fn random_dork(&self, domain: &str) -> Option<RenderedTemplate> {
        popular::random_dork(&sanitize_input(domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::catalog::loader;
    use crate::tools::content::ContentType;

    fn workbench() -> Workbench {
        Workbench::new(QueryHistory::in_memory(), loader::embedded(), EngineId::Google)
    }

    #[test]
    fn build_records_history_and_sanitizes() {
        let bench = workbench();
        let options = QueryOptions::new()
            .with_content_type(ContentType::Documents)
            .with_site("<b>example.com</b>")
            .with_keywords("<script>alert(1)</script>annual report");

        let query = bench.build(&options, EngineId::Google);
        assert!(query.contains("site:example.com"));
        assert!(query.contains("annual report"));
        assert!(!query.contains("script"));
        assert_eq!(bench.history(), vec![query]);
    }

    #[test]
    fn empty_build_is_not_recorded() {
        let bench = workbench();
        assert_eq!(bench.build(&QueryOptions::new(), EngineId::Bing), "");
        assert!(bench.history().is_empty());
    }

    #[test]
    fn record_instantiation() {
        let bench = workbench();
        assert_eq!(
            bench.instantiate_record("infra-003", "https://www.acme.org").as_deref(),
            Some("site:acme.org inurl:.git")
        );
        assert_eq!(bench.instantiate_record("missing", "acme.org"), None);
        assert_eq!(bench.history(), vec!["site:acme.org inurl:.git".to_string()]);
    }

    #[test]
    fn empty_instantiation_is_not_recorded() {
        let bench = workbench();
        assert_eq!(bench.instantiate("site:[domain]", ""), "");
        assert!(bench.history().is_empty());
    }

    #[test]
    fn clear_history() {
        let bench = workbench();
        bench.build(&QueryOptions::new().with_ext("pdf"), EngineId::Google);
        bench.clear_history();
        assert!(bench.history().is_empty());
    }

    #[test]
    fn engine_defaults() {
        let bench = Workbench::new(QueryHistory::in_memory(), DorkCatalog::default(), EngineId::Brave);
        assert_eq!(bench.engine_or_default(None), EngineId::Brave);
        assert_eq!(bench.engine_or_default(Some(EngineId::Yahoo)), EngineId::Yahoo);
    }

    #[test]
    fn survives_a_poisoned_lock() {
        let bench = Arc::new(workbench());
        let poisoner = Arc::clone(&bench);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.builder();
            panic!("poison the history lock");
        })
        .join();

        bench.build(&QueryOptions::new().with_ext("pdf"), EngineId::Google);
        assert_eq!(bench.history().len(), 1);
    }
}
