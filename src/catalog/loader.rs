// src/catalog/loader.rs
use std::time::Duration;
use thiserror::Error;
use super::{DorkCatalog, DorkTemplateRecord};

/// Dataset compiled into the binary, used whenever the configured source is
/// missing or unusable.
const EMBEDDED_DATASET: &str = include_str!("../../data/dorks.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Dataset has no dork records")]
    MissingRecords,
}

/// Accepts either a bare array of records or an object with a `dorks` array.
pub fn parse_dataset(raw: &str) -> Result<Vec<DorkTemplateRecord>, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(mut object) => match object.remove("dorks") {
            Some(dorks) => Ok(serde_json::from_value(dorks)?),
            None => Err(CatalogError::MissingRecords),
        },
        _ => Err(CatalogError::MissingRecords),
    }
}

fn is_remote(source: &str) -> bool {
    let lower = source.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

async fn fetch(source: &str, timeout: Duration) -> Result<Vec<DorkTemplateRecord>, CatalogError> {
    let raw = if is_remote(source) {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        client
            .get(source)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?
    } else {
        tokio::fs::read_to_string(source).await?
    };

    parse_dataset(&raw)
}

pub fn embedded() -> DorkCatalog {
    match parse_dataset(EMBEDDED_DATASET) {
        Ok(records) => DorkCatalog::new(records),
        Err(e) => {
            log::error!("Embedded dork dataset is unreadable: {}", e);
            DorkCatalog::default()
        }
    }
}

impl DorkCatalog {
    /// Load from a URL or file path, falling back to the embedded dataset on
    /// any failure. Never fails.
    pub async fn load(source: Option<&str>, timeout: Duration) -> DorkCatalog {
        let source = match source.map(str::trim).filter(|s| !s.is_empty()) {
            Some(source) => source,
            None => return embedded(),
        };

        match fetch(source, timeout).await {
            Ok(records) => {
                log::info!("Loaded {} dorks from {}", records.len(), source);
                DorkCatalog::new(records)
            }
            Err(e) => {
                log::warn!("Failed to load dorks from {} ({}), using embedded dataset", source, e);
                embedded()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use crate::catalog::RiskLevel;

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[test]
    fn embedded_dataset_is_complete() {
        let catalog = embedded();
        assert_eq!(catalog.len(), 38);

        let stats = catalog.stats();
        assert_eq!((stats.low, stats.medium, stats.high, stats.critical), (7, 13, 10, 8));

        assert_eq!(catalog.categories().first().copied(), Some("Reconnaissance"));
        assert_eq!(catalog.get("infra-003").map(|r| r.risk), Some(RiskLevel::Critical));
    }

    #[test]
    fn object_without_dorks_is_rejected() {
        assert!(matches!(parse_dataset(r#"{"items": []}"#), Err(CatalogError::MissingRecords)));
        assert!(matches!(parse_dataset("42"), Err(CatalogError::MissingRecords)));
        assert!(matches!(parse_dataset("{"), Err(CatalogError::JsonError(_))));
    }

    #[tokio::test]
    async fn no_source_uses_embedded() {
        assert_eq!(DorkCatalog::load(None, TIMEOUT).await.len(), 38);
        assert_eq!(DorkCatalog::load(Some("  "), TIMEOUT).await.len(), 38);
    }

    #[tokio::test]
    async fn loads_array_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dorks.json");
        fs::write(
            &path,
            r#"[{"id":"x-1","title":"Logs","description":"Log files","query":"site:[domain] ext:log","category":"Files","phase":2,"risk":"HIGH"}]"#,
        )
        .unwrap();

        let catalog = DorkCatalog::load(path.to_str(), TIMEOUT).await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].risk, RiskLevel::High);
    }

    #[tokio::test]
    async fn loads_wrapped_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dorks.json");
        fs::write(
            &path,
            r#"{"dorks":[{"id":"x-1","title":"t","description":"d","query":"q","category":"c","phase":1,"risk":"low","defensive_note":"n"}]}"#,
        )
        .unwrap();

        let catalog = DorkCatalog::load(path.to_str(), TIMEOUT).await;
        assert_eq!(catalog.get("x-1").map(|r| r.defensive_note.as_str()), Some("n"));
    }

    #[tokio::test]
    async fn broken_sources_fall_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        assert_eq!(DorkCatalog::load(path.to_str(), TIMEOUT).await.len(), 38);
        assert_eq!(DorkCatalog::load(Some("/no/such/dorks.json"), TIMEOUT).await.len(), 38);
        assert_eq!(DorkCatalog::load(Some("http://127.0.0.1:9/dorks.json"), TIMEOUT).await.len(), 38);
    }
}
