// src/catalog/mod.rs
pub mod loader;
pub mod popular;

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Deserializer};
use utoipa::ToSchema;
use crate::tools::template;

pub use loader::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(format!("Unknown risk level: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of the curated dork dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DorkTemplateRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Template text, may contain `[domain]` style placeholders
    pub query: String,
    pub category: String,
    pub phase: u32,
    pub risk: RiskLevel,
    #[serde(default)]
    pub defensive_note: String,
}

impl DorkTemplateRecord {
    pub fn needs_domain(&self) -> bool {
        template::needs_domain(&self.query)
    }

    pub fn instantiate(&self, domain: &str) -> String {
        template::instantiate(&self.query, domain)
    }

    fn matches_search(&self, needle: &str) -> bool {
        [&self.title, &self.description, &self.query, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Criteria for narrowing the catalog. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub phase: Option<u32>,
    pub risk: Option<RiskLevel>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, record: &DorkTemplateRecord) -> bool {
        if self.phase.is_some_and(|phase| phase != record.phase) {
            return false;
        }
        if self.risk.is_some_and(|risk| risk != record.risk) {
            return false;
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if category != record.category {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !record.matches_search(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RiskStats {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a DorkTemplateRecord>,
    {
        let mut stats = RiskStats::default();
        for record in records {
            stats.total += 1;
            match record.risk {
                RiskLevel::Critical => stats.critical += 1,
                RiskLevel::High => stats.high += 1,
                RiskLevel::Medium => stats.medium += 1,
                RiskLevel::Low => stats.low += 1,
            }
        }
        stats
    }
}

/// Read-only set of dork templates loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct DorkCatalog {
    records: Vec<DorkTemplateRecord>,
}

impl DorkCatalog {
    pub fn new(records: Vec<DorkTemplateRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DorkTemplateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DorkTemplateRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&DorkTemplateRecord> {
        self.records.iter().filter(|record| filter.matches(record)).collect()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for record in &self.records {
            if !categories.contains(&record.category.as_str()) {
                categories.push(&record.category);
            }
        }
        categories
    }

    pub fn stats(&self) -> RiskStats {
        RiskStats::from_records(&self.records)
    }
}

/// Pretty JSON array of `records` with each query instantiated for `domain`.
pub fn export_records(records: &[&DorkTemplateRecord], domain: &str) -> Result<String, CatalogError> {
    let exported: Vec<DorkTemplateRecord> = records
        .iter()
        .map(|record| DorkTemplateRecord {
            query: record.instantiate(domain),
            ..(*record).clone()
        })
        .collect();

    Ok(serde_json::to_string_pretty(&exported)?)
}

/// Plain-text block describing a record alongside a concrete query.
pub fn format_with_metadata(record: &DorkTemplateRecord, query: &str) -> String {
    let note = if record.defensive_note.trim().is_empty() {
        "N/A"
    } else {
        record.defensive_note.as_str()
    };

    format!(
        "# Search Dork Query\n\
         # ==================\n\
         # Title: {}\n\
         # Risk Level: {}\n\
         # Category: {}\n\
         # Phase: {}\n\
         # Description: {}\n\
         # ==================\n\
         \n\
         {}\n\
         \n\
         # Defensive Note:\n\
         # {}",
        record.title, record.risk, record.category, record.phase, record.description, query, note
    )
}
