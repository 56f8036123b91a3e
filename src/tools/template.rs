// src/tools/template.rs
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use crate::tools::domain::normalize_domain;

lazy_static! {
    // Domain-dependent clauses removed wholesale when no domain is given,
    // followed by any bare placeholders still left over.
    static ref DOMAIN_CLAUSES: Vec<Regex> = [
        r"(?i)site:\*\.\[domain\]",
        r"(?i)site:\*\.\{domain\}",
        r"(?i)site:\[domain\]",
        r"(?i)site:\{domain\}",
        r"(?i)intext:@\[domain\]",
        r"(?i)intext:@\{domain\}",
        r"(?i)\[domain\]",
        r"(?i)\{domain\}",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("placeholder pattern compiles"))
    .collect();

    // Every token that stands for the target domain. Matched in one pass so a
    // substituted domain is never rewritten again.
    static ref DOMAIN_TOKEN: Regex =
        Regex::new(r"target\.com|(?i:\[domain\])|(?i:\{domain\})|DOMAIN|example\.com").expect("token pattern compiles");

    static ref BRACKET_PLACEHOLDER: Regex = Regex::new(r"(?i)\[domain\]").expect("placeholder pattern compiles");
    static ref BRACE_PLACEHOLDER: Regex = Regex::new(r"(?i)\{domain\}").expect("placeholder pattern compiles");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("whitespace pattern compiles");
}

fn strip_domain_clauses(template: &str) -> String {
    let mut query = template.to_string();
    for pattern in DOMAIN_CLAUSES.iter() {
        query = pattern.replace_all(&query, "").into_owned();
    }

    WHITESPACE_RUN.replace_all(&query, " ").trim().to_string()
}

/// Turn a stored dork template into a concrete query for `domain`.
///
/// With no usable domain, clauses that only make sense with one
/// (`site:[domain]`, `intext:@[domain]`, ...) are deleted rather than left
/// dangling.
pub fn instantiate(template: &str, domain: &str) -> String {
    if domain.trim().is_empty() {
        return strip_domain_clauses(template);
    }

    let domain = normalize_domain(domain);
    if domain.is_empty() {
        return strip_domain_clauses(template);
    }

    DOMAIN_TOKEN.replace_all(template, NoExpand(&domain)).into_owned()
}

/// Whether a template contains a domain placeholder at all.
pub fn needs_domain(template: &str) -> bool {
    BRACKET_PLACEHOLDER.is_match(template) || BRACE_PLACEHOLDER.is_match(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_domain_removes_placeholder_clauses() {
        assert_eq!(instantiate("site:[domain] intext:@[domain]", ""), "");
        assert_eq!(instantiate("site:*.[domain] inurl:staging OR inurl:dev", ""), "inurl:staging OR inurl:dev");
        assert_eq!(instantiate("SITE:{Domain}   filetype:pdf", ""), "filetype:pdf");
        assert_eq!(instantiate("site:*.{domain}", ""), "");
    }

    #[test]
    fn empty_domain_drops_bare_placeholders() {
        assert_eq!(instantiate("related:[domain]  \"login\"", ""), "related: \"login\"");
    }

    #[test]
    fn domain_is_substituted_everywhere() {
        assert_eq!(instantiate("site:[domain]", "sub.example.com"), "site:sub.example.com");
        assert_eq!(
            instantiate("site:[DOMAIN] intext:@{domain}", "https://www.acme.org/about"),
            "site:acme.org intext:@acme.org"
        );
        assert_eq!(instantiate("site:target.com -site:www.DOMAIN", "acme.org"), "site:acme.org -site:www.acme.org");
        assert_eq!(instantiate("link:example.com", "acme.org"), "link:acme.org");
        assert_eq!(instantiate("site:[domain] -site:www.[domain]", "www.example.com"), "site:example.com -site:www.example.com");
    }

    #[test]
    fn substitution_keeps_whitespace() {
        assert_eq!(instantiate("site:[domain]  ext:pdf", "acme.org"), "site:acme.org  ext:pdf");
    }

    #[test]
    fn blank_domain_is_treated_as_missing() {
        assert_eq!(instantiate("site:[domain] inurl:admin", "   "), "inurl:admin");
    }

    #[test]
    fn detects_placeholders() {
        assert!(needs_domain("site:[domain]"));
        assert!(needs_domain("site:{DOMAIN}"));
        assert!(!needs_domain("intitle:\"index of\""));
    }
}
