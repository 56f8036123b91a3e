// src/tools/dork.rs
use crate::history::QueryHistory;
use crate::models::{QueryOptions, ANY_EXTENSION};
use crate::tools::content::{download_focus_fragment, open_directory_fragment};
use crate::tools::dialect::{AbstractOperator, EngineId};

/// One emitted piece of a query plus a human-readable note about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub text: String,
    pub note: String,
}

impl Clause {
    fn new(text: String, note: String) -> Self {
        Self { text, note }
    }
}

/// Leave advanced syntax alone; otherwise collapse whitespace runs. Multi-word
/// input is never quoted so the engine's implicit AND applies.
pub fn process_keywords(raw: &str) -> String {
    let has_operators = raw
        .chars()
        .any(|c| matches!(c, '+' | '-' | '"' | '|' | '(' | ')'));

    if has_operators {
        return raw.to_string();
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// Content-type / directory-listing clause. A site scope wins over download
// focus because "index of" dorks stop matching once a site is added.
fn strategy_clause(options: &QueryOptions, site: Option<&str>, engine: EngineId) -> Option<Clause> {
    let dialect = engine.dialect();
    let full_syntax = engine.prefers_full_fragments();

    match options.content_type {
        Some(content_type) => {
            let entry = content_type.entry();

            if site.is_some() {
                let extensions = entry.extensions.concrete()?;
                let ext_op = dialect.token(AbstractOperator::Ext);
                if ext_op.is_empty() {
                    return None;
                }

                let disjunction = extensions
                    .iter()
                    .map(|ext| format!("{}{}", ext_op, ext))
                    .collect::<Vec<_>>()
                    .join(" OR ");

                Some(Clause::new(
                    format!("({})", disjunction),
                    format!("Match {} files by extension: {}", content_type, extensions.join(", ")),
                ))
            } else if options.download_focus {
                let mut text = download_focus_fragment(full_syntax).to_string();
                if let Some(extensions) = entry.extensions.concrete() {
                    text.push_str(&format!(" ({})", extensions.join("|")));
                }

                Some(Clause::new(
                    text,
                    format!("Look for download landing pages offering {}", content_type),
                ))
            } else {
                let keywords = entry.keywords;
                let note = if keywords.is_empty() {
                    format!("Look for open directory listings ({})", content_type)
                } else {
                    format!(
                        "Look for open directory listings of {} ({})",
                        content_type,
                        keywords.join(", ")
                    )
                };

                Some(Clause::new(
                    open_directory_fragment(content_type, full_syntax).to_string(),
                    note,
                ))
            }
        }
        None if options.download_focus => Some(Clause::new(
            download_focus_fragment(full_syntax).to_string(),
            "Look for download landing pages".to_string(),
        )),
        None => None,
    }
}

/// Run every builder step in order and return the emitted clauses.
pub fn collect_clauses(options: &QueryOptions, engine: EngineId) -> Vec<Clause> {
    let dialect = engine.dialect();
    let mut clauses = Vec::new();
    let site = options.site_domain();

    // 1. Strategy selection
    if let Some(clause) = strategy_clause(options, site.as_deref(), engine) {
        clauses.push(clause);
    }

    // 2. Site scope
    if let Some(domain) = &site {
        if let Some(text) = dialect.clause(AbstractOperator::Site, domain) {
            clauses.push(Clause::new(text, format!("Restrict search to website: {}", domain)));
        }
    }

    // 3. Extension
    if let Some(ext) = non_empty(&options.ext).filter(|ext| *ext != ANY_EXTENSION) {
        if let Some(text) = dialect.clause(AbstractOperator::Ext, ext) {
            clauses.push(Clause::new(text, format!("Search for file type: {}", ext)));
        }
    }

    // 4. Keywords
    if let Some(keywords) = non_empty(&options.keywords) {
        let processed = process_keywords(keywords);
        if !processed.is_empty() {
            clauses.push(Clause::new(processed.clone(), format!("Search for: {}", processed)));
        }
    }

    // 5. URL, title and body operators
    let scoped = [
        (AbstractOperator::Inurl, &options.inurl, "Find pages with '{}' in the URL"),
        (AbstractOperator::Intitle, &options.intitle, "Find pages with '{}' in the title"),
        (AbstractOperator::Intext, &options.intext, "Find pages containing '{}' in the text"),
    ];
    for (op, value, note) in scoped {
        if let Some(value) = non_empty(value) {
            if let Some(text) = dialect.clause(op, value) {
                clauses.push(Clause::new(text, note.replace("{}", value)));
            }
        }
    }

    // 6. Date range
    if let Some(after) = non_empty(&options.after) {
        if let Some(text) = dialect.clause(AbstractOperator::After, after) {
            clauses.push(Clause::new(text, format!("Find pages published after: {}", after)));
        }
    }
    if let Some(before) = non_empty(&options.before) {
        if let Some(text) = dialect.clause(AbstractOperator::Before, before) {
            clauses.push(Clause::new(text, format!("Find pages published before: {}", before)));
        }
    }

    // 7. Raw passthrough
    if let Some(raw) = non_empty(&options.raw) {
        clauses.push(Clause::new(raw.to_string(), "Advanced: raw query appended as provided".to_string()));
    }

    clauses
}

/// Build the query string without touching history.
pub fn compose_query(options: &QueryOptions, engine: EngineId) -> String {
    collect_clauses(options, engine)
        .iter()
        .map(|clause| clause.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Line-per-clause explanation of what a built query does.
pub fn explain_query(options: &QueryOptions, engine: EngineId) -> String {
    let clauses = collect_clauses(options, engine);
    let mut explanation = String::new();

    if clauses.is_empty() {
        explanation.push_str("No search criteria selected\n");
    }
    for clause in &clauses {
        explanation.push_str(&clause.note);
        explanation.push('\n');
    }

    explanation.push_str(&format!("Target engine: {}\n", engine.profile().name));
    explanation.push_str("\nIMPORTANT: Remember to use this responsibly and ethically. Never use for unauthorized access or illegal activities.");
    explanation
}

/// Query builder that records every non-empty query it produces.
pub struct DorkBuilder {
    history: QueryHistory,
}

impl DorkBuilder {
    pub fn new(history: QueryHistory) -> Self {
        Self { history }
    }

    pub fn build(&mut self, options: &QueryOptions, engine: EngineId) -> String {
        let query = compose_query(options, engine);

        if !query.is_empty() {
            log::debug!("Built {} query: {}", engine, query);
            self.history.record(&query);
        }

        query
    }

    pub fn history(&self) -> &QueryHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut QueryHistory {
        &mut self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::content::ContentType;

    fn builder() -> DorkBuilder {
        DorkBuilder::new(QueryHistory::in_memory())
    }

    #[test]
    fn empty_options_build_nothing_and_skip_history() {
        let mut builder = builder();
        for engine in EngineId::ALL {
            assert_eq!(builder.build(&QueryOptions::new(), engine), "");
        }
        assert!(builder.history().is_empty());
    }

    #[test]
    fn site_is_normalized() {
        let query = compose_query(&QueryOptions::new().with_site("WWW.Example.COM"), EngineId::Google);
        assert_eq!(query, "site:example.com");
    }

    #[test]
    fn site_scoped_content_type_switches_to_extension_search() {
        let options = QueryOptions::new()
            .with_content_type(ContentType::Documents)
            .with_site("example.com");
        assert_eq!(
            compose_query(&options, EngineId::Google),
            "(ext:pdf OR ext:doc OR ext:docx OR ext:txt OR ext:rtf OR ext:odt OR ext:xls OR ext:xlsx OR ext:ppt OR ext:pptx) site:example.com"
        );
    }

    #[test]
    fn site_scoped_extension_search_uses_dialect() {
        let options = QueryOptions::new()
            .with_content_type(ContentType::Archives)
            .with_site("example.com");
        assert_eq!(
            compose_query(&options, EngineId::Bing),
            "(filetype:zip OR filetype:rar OR filetype:7z OR filetype:tar OR filetype:gz OR filetype:bz2 OR filetype:xz) site:example.com"
        );
    }

    #[test]
    fn site_scope_with_wildcard_content_type_adds_no_strategy_clause() {
        let options = QueryOptions::new()
            .with_content_type(ContentType::Downloads)
            .with_site("example.com")
            .with_download_focus(true);
        assert_eq!(compose_query(&options, EngineId::Google), "site:example.com");
    }

    #[test]
    fn open_directory_fragment_depends_on_engine() {
        let options = QueryOptions::new().with_content_type(ContentType::Videos);
        assert_eq!(compose_query(&options, EngineId::Bing), "intitle:\"index of\"");
        assert_eq!(
            compose_query(&options, EngineId::Google),
            "intitle:\"index of\" (mp4|mkv|avi|flv) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)"
        );
        // Startpage shares Google's dialect but not the long fragments.
        assert_eq!(compose_query(&options, EngineId::Startpage), "intitle:\"index of\"");
    }

    #[test]
    fn all_content_type_uses_generic_listing_or_nothing() {
        let options = QueryOptions::new().with_content_type(ContentType::All);
        assert_eq!(compose_query(&options, EngineId::Google), "intitle:\"index of\"");
        assert_eq!(compose_query(&options, EngineId::Bing), "intitle:\"index of\"");

        let scoped = options.with_site("example.com");
        assert_eq!(compose_query(&scoped, EngineId::Google), "site:example.com");
    }

    #[test]
    fn downloads_content_type_without_focus_uses_its_base_fragment() {
        let options = QueryOptions::new().with_content_type(ContentType::Downloads);
        assert_eq!(
            compose_query(&options, EngineId::Google),
            "(intitle:download OR inurl:download OR inurl:dl) -inurl:(signup|login|register)"
        );
        assert_eq!(compose_query(&options, EngineId::Yahoo), "intitle:\"index of\"");
    }

    #[test]
    fn site_that_normalizes_to_nothing_scopes_nothing() {
        let options = QueryOptions::new()
            .with_content_type(ContentType::Documents)
            .with_site("http://");
        assert_eq!(
            compose_query(&options, EngineId::Google),
            "intitle:\"index of\" (pdf|doc|docx|txt) -inurl:(jsp|pl|php|html|aspx|htm|cf|shtml)"
        );
    }

    #[test]
    fn download_focus_with_content_type() {
        let options = QueryOptions::new()
            .with_content_type(ContentType::Audio)
            .with_download_focus(true);
        assert_eq!(
            compose_query(&options, EngineId::Google),
            "(intitle:download OR inurl:download OR inurl:dl) -inurl:(signup|login|register) (mp3|wav|flac|aac|m4a|ogg|wma)"
        );
        assert_eq!(
            compose_query(&options, EngineId::Yahoo),
            "intitle:\"index of\" download (mp3|wav|flac|aac|m4a|ogg|wma)"
        );
    }

    #[test]
    fn download_focus_alone() {
        let options = QueryOptions::new().with_download_focus(true);
        assert_eq!(
            compose_query(&options, EngineId::Google),
            "(intitle:download OR inurl:download OR inurl:dl) -inurl:(signup|login|register)"
        );
        assert_eq!(compose_query(&options, EngineId::DuckDuckGo), "intitle:\"index of\" download");
    }

    #[test]
    fn clause_order_is_fixed() {
        let options = QueryOptions::new()
            .with_raw("-inurl:htm")
            .with_date_range(Some("2020-01-01"), Some("2021-01-01"))
            .with_intext("password")
            .with_intitle("login")
            .with_inurl("admin")
            .with_keywords("  annual   report ")
            .with_ext("pdf")
            .with_site("https://www.example.com/docs");
        assert_eq!(
            compose_query(&options, EngineId::Google),
            "site:example.com ext:pdf annual report inurl:admin intitle:login intext:password after:2020-01-01 before:2021-01-01 -inurl:htm"
        );
    }

    #[test]
    fn unsupported_operators_are_dropped_entirely() {
        let options = QueryOptions::new()
            .with_site("example.com")
            .with_ext("pdf")
            .with_inurl("admin")
            .with_date_range(Some("2020-01-01"), Some("2021-01-01"));
        assert_eq!(
            compose_query(&options, EngineId::Bing),
            "site:example.com filetype:pdf inbody:admin"
        );
    }

    #[test]
    fn any_extension_is_no_constraint() {
        let options = QueryOptions::new().with_ext("any").with_keywords("budget");
        assert_eq!(compose_query(&options, EngineId::Google), "budget");
    }

    #[test]
    fn keywords_with_operators_pass_through() {
        assert_eq!(process_keywords("\"exact  phrase\""), "\"exact  phrase\"");
        assert_eq!(process_keywords("cats -dogs"), "cats -dogs");
        assert_eq!(process_keywords("a|b"), "a|b");
        assert_eq!(process_keywords("  two   words "), "two words");
        assert_eq!(process_keywords("single"), "single");
    }

    #[test]
    fn blank_site_and_keywords_emit_nothing() {
        let options = QueryOptions::new().with_site("   ").with_keywords("   ");
        assert_eq!(compose_query(&options, EngineId::Google), "");
    }

    #[test]
    fn build_records_history() {
        let mut builder = builder();
        let query = builder.build(&QueryOptions::new().with_keywords("one"), EngineId::Google);
        builder.build(&QueryOptions::new().with_keywords("two"), EngineId::Google);
        builder.build(&QueryOptions::new().with_keywords("one"), EngineId::Bing);
        assert_eq!(query, "one");
        assert_eq!(builder.history().list(), ["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn explanation_lists_each_clause() {
        let options = QueryOptions::new().with_site("example.com").with_ext("pdf");
        let explanation = explain_query(&options, EngineId::Google);
        assert!(explanation.contains("Restrict search to website: example.com"));
        assert!(explanation.contains("Search for file type: pdf"));
        assert!(explanation.contains("Target engine: Google"));
    }
}
