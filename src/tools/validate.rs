// src/tools/validate.rs
use crate::models::ValidationResult;

/// Queries longer than this draw a warning.
pub const MAX_QUERY_LENGTH: usize = 500;

/// Scan a finished query for structural mistakes. Only an empty query is an
/// error; everything else is a warning.
pub fn validate_query(query: &str) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    if query.trim().is_empty() {
        errors.push("Query cannot be empty".to_string());
        return ValidationResult { valid: false, warnings, errors };
    }

    if query.contains("site:http://") || query.contains("site:https://") {
        warnings.push("site: operator should use domain only, not full URL".to_string());
    }

    if query.chars().count() > MAX_QUERY_LENGTH {
        warnings.push("Very long query may not work as expected".to_string());
    }

    let quotes = query.matches('"').count();
    if quotes % 2 != 0 {
        warnings.push("Unmatched quotation marks detected".to_string());
    }

    let opening = query.matches('(').count();
    let closing = query.matches(')').count();
    if opening != closing {
        warnings.push("Unmatched parentheses detected".to_string());
    }

    ValidationResult {
        valid: errors.is_empty(),
        warnings,
        errors,
    }
}
