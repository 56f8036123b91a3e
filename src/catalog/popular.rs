// src/catalog/popular.rs
use rand::seq::SliceRandom;
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;
use crate::tools::template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemplateGroup {
    Discovery,
    Files,
    Security,
}

/// Well-known quick dork. `scoped` carries a `[domain]` placeholder;
/// `unscoped` is the rendering used without a domain, if one makes sense.
#[derive(Debug, Clone, Copy)]
pub struct PopularTemplate {
    pub group: TemplateGroup,
    pub name: &'static str,
    pub description: &'static str,
    pub scoped: &'static str,
    pub unscoped: Option<&'static str>,
}

impl PopularTemplate {
    pub fn render(&self, domain: &str) -> Option<String> {
        if domain.trim().is_empty() {
            return self.unscoped.map(str::to_string);
        }
        Some(template::instantiate(self.scoped, domain))
    }
}

pub const POPULAR_TEMPLATES: &[PopularTemplate] = &[
    PopularTemplate {
        group: TemplateGroup::Discovery,
        name: "Subdomain Enumeration",
        description: "Find all indexed subdomains",
        scoped: "site:*.[domain]",
        unscoped: None,
    },
    PopularTemplate {
        group: TemplateGroup::Discovery,
        name: "Open Directories",
        description: "Find open directory listings",
        scoped: "site:[domain] intitle:\"Index of /\" \"Parent Directory\"",
        unscoped: Some("intitle:\"Index of /\" \"Parent Directory\""),
    },
    PopularTemplate {
        group: TemplateGroup::Discovery,
        name: "Related Domains",
        description: "Find similar websites",
        scoped: "related:[domain]",
        unscoped: None,
    },
    PopularTemplate {
        group: TemplateGroup::Files,
        name: "PDF Documents",
        description: "Find PDF files",
        scoped: "site:[domain] ext:pdf",
        unscoped: Some("ext:pdf"),
    },
    PopularTemplate {
        group: TemplateGroup::Files,
        name: "Excel Spreadsheets",
        description: "Find Excel files",
        scoped: "site:[domain] (ext:xlsx OR ext:xls)",
        unscoped: Some("(ext:xlsx OR ext:xls)"),
    },
    PopularTemplate {
        group: TemplateGroup::Files,
        name: "SQL Dumps",
        description: "Find database dumps",
        scoped: "site:[domain] ext:sql",
        unscoped: Some("ext:sql"),
    },
    PopularTemplate {
        group: TemplateGroup::Security,
        name: "Config Files",
        description: "Find configuration files",
        scoped: "site:[domain] (ext:env OR ext:config OR ext:ini)",
        unscoped: Some("(ext:env OR ext:config OR ext:ini)"),
    },
    PopularTemplate {
        group: TemplateGroup::Security,
        name: "Login Pages",
        description: "Find authentication pages",
        scoped: "site:[domain] (inurl:login OR inurl:admin)",
        unscoped: Some("(inurl:login OR inurl:admin)"),
    },
    PopularTemplate {
        group: TemplateGroup::Security,
        name: "Exposed Git",
        description: "Find exposed Git repositories",
        scoped: "site:[domain] inurl:.git",
        unscoped: Some("inurl:.git"),
    },
];

/// A popular template rendered for a domain, ready to hand to a surface.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RenderedTemplate {
    pub group: TemplateGroup,
    pub name: String,
    pub description: String,
    pub query: String,
}

/// Every popular template that can be rendered for `domain`.
pub fn popular_for(domain: &str) -> Vec<RenderedTemplate> {
    POPULAR_TEMPLATES
        .iter()
        .filter_map(|t| {
            t.render(domain).map(|query| RenderedTemplate {
                group: t.group,
                name: t.name.to_string(),
                description: t.description.to_string(),
                query,
            })
        })
        .collect()
}

/// Uniformly random popular dork for `domain`.
pub fn random_dork(domain: &str) -> Option<RenderedTemplate> {
    let candidates = popular_for(domain);
    candidates.choose(&mut rand::thread_rng()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_free_rendering_skips_domain_only_templates() {
        let rendered = popular_for("");
        assert_eq!(rendered.len(), POPULAR_TEMPLATES.len() - 2);
        assert!(rendered.iter().all(|t| !t.query.contains("site:")));
        assert!(rendered.iter().any(|t| t.query == "ext:sql"));
    }

    #[test]
    fn scoped_rendering_normalizes_domain() {
        let rendered = popular_for("https://www.acme.org/");
        assert_eq!(rendered.len(), POPULAR_TEMPLATES.len());
        assert_eq!(rendered[0].query, "site:*.acme.org");
        assert_eq!(rendered[2].query, "related:acme.org");
    }

    #[test]
    fn random_dork_is_one_of_the_candidates() {
        let candidates = popular_for("acme.org");
        for _ in 0..20 {
            let dork = random_dork("acme.org").unwrap();
            assert!(candidates.contains(&dork));
        }
        assert!(random_dork("").is_some());
    }
}
