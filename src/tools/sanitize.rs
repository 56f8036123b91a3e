// src/tools/sanitize.rs
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("script pattern compiles");
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").expect("tag pattern compiles");
    static ref JS_SCHEME: Regex = Regex::new(r"(?i)javascript:").expect("scheme pattern compiles");
}

/// Strip markup and `javascript:` from free-text input while keeping dork
/// punctuation (`" : | ( ) - * .`) intact.
pub fn sanitize_input(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let cleaned = SCRIPT_BLOCK.replace_all(raw, "");
    let cleaned = HTML_TAG.replace_all(&cleaned, "");
    let cleaned = JS_SCHEME.replace_all(&cleaned, "");

    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_markup() {
        assert_eq!(sanitize_input("<script>alert(1)</script>report"), "report");
        assert_eq!(sanitize_input("<SCRIPT type=\"x\">\nbad()\n</SCRIPT> ok"), "ok");
        assert_eq!(sanitize_input("<b>bold</b> text"), "bold text");
        assert_eq!(sanitize_input("JavaScript:alert(1)"), "alert(1)");
    }

    #[test]
    fn keeps_dork_syntax() {
        let query = "intitle:\"index of\" (mp4|mkv) -inurl:php *.example.com";
        assert_eq!(sanitize_input(query), query);
        assert_eq!(sanitize_input("  padded  "), "padded");
    }
}
