// src/models.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;
use crate::tools::content::{self, ContentType};
use crate::tools::domain::normalize_domain;

/// Sentinel `ext` value meaning "no extension constraint".
pub const ANY_EXTENSION: &str = "any";

/// Structured builder input. Every field is optional; an absent or empty
/// field contributes no clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct QueryOptions {
    #[serde(deserialize_with = "content::deserialize_lenient")]
    #[schema(value_type = Option<String>, example = "documents")]
    pub content_type: Option<ContentType>,
    /// Raw site scope, normalised during the build
    pub site: Option<String>,
    /// File extension; `any` means unconstrained
    pub ext: Option<String>,
    pub keywords: Option<String>,
    pub download_focus: bool,
    pub inurl: Option<String>,
    pub intitle: Option<String>,
    pub intext: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    /// Appended verbatim as the last clause
    pub raw: Option<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_site(mut self, site: &str) -> Self {
        self.site = Some(site.to_string());
        self
    }

    pub fn with_ext(mut self, ext: &str) -> Self {
        self.ext = Some(ext.to_string());
        self
    }

    pub fn with_keywords(mut self, keywords: &str) -> Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn with_download_focus(mut self, download_focus: bool) -> Self {
        self.download_focus = download_focus;
        self
    }

    pub fn with_inurl(mut self, inurl: &str) -> Self {
        self.inurl = Some(inurl.to_string());
        self
    }

    pub fn with_intitle(mut self, intitle: &str) -> Self {
        self.intitle = Some(intitle.to_string());
        self
    }

    pub fn with_intext(mut self, intext: &str) -> Self {
        self.intext = Some(intext.to_string());
        self
    }

    pub fn with_date_range(mut self, after: Option<&str>, before: Option<&str>) -> Self {
        self.after = after.map(String::from);
        self.before = before.map(String::from);
        self
    }

    pub fn with_raw(mut self, raw: &str) -> Self {
        self.raw = Some(raw.to_string());
        self
    }

    /// Site scope present once surrounding whitespace is ignored.
    /// The normalized site scope, if it leaves anything to scope to.
    pub fn site_domain(&self) -> Option<String> {
        self.site
            .as_deref()
            .map(|site| normalize_domain(site.trim()))
            .filter(|domain| !domain.is_empty())
    }
}

/// Outcome of the query sanity check. Only errors make a query invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}
