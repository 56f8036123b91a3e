// src/utils/format.rs

// Truncate a string to at most max_len characters, marking the cut with "..."
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// Number the lines of a list for terminal display
pub fn numbered_lines<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{:>3}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_character_boundaries() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("site:example.com ext:pdf", 10), "site:ex...");
        assert_eq!(truncate_string("ééééééé", 5), "éé...");
    }

    #[test]
    fn numbers_lines() {
        assert_eq!(numbered_lines(&["a", "b"]), "  1. a\n  2. b");
        assert_eq!(numbered_lines::<String>(&[]), "");
    }
}
