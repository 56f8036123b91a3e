// src/tools/domain.rs
use std::borrow::Cow;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    // Dot-separated labels of 1-63 chars (no leading/trailing hyphen), alphabetic TLD.
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}$")
            .expect("domain pattern compiles");
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}

fn has_http_scheme(value: &str) -> bool {
    strip_prefix_ignore_case(value, "http://").is_some()
        || strip_prefix_ignore_case(value, "https://").is_some()
}

fn parse_hostname(input: &str) -> Option<String> {
    let candidate: Cow<str> = if has_http_scheme(input) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("https://{}", input))
    };

    let parsed = Url::parse(&candidate).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

fn strip_manually(input: &str) -> String {
    let without_scheme = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);

    let host = match without_scheme.find('/') {
        Some(idx) => &without_scheme[..idx],
        None => without_scheme,
    };

    host.trim().to_string()
}

/// Reduce a user-entered URL or domain to a bare hostname without `www.`.
///
/// Never fails: input the URL parser rejects goes through a manual
/// scheme/path strip instead.
pub fn normalize_domain(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let hostname = match parse_hostname(input) {
        Some(host) => host,
        None => {
            log::debug!("URL parsing rejected '{}', stripping manually", input);
            strip_manually(input)
        }
    };

    match strip_prefix_ignore_case(&hostname, "www.") {
        Some(rest) => rest.to_string(),
        None => hostname,
    }
}

/// Advisory format check used for UI feedback. An empty value is accepted
/// because the domain is optional everywhere it is used.
pub fn is_well_formed_domain(input: &str) -> bool {
    input.is_empty() || DOMAIN_PATTERN.is_match(input)
}
