use regex::Regex;

fn external_reference_patterns() -> &'static [Regex] {
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(?i)^https?://").expect("invalid http(s) regex"),
                Regex::new(r"^//").expect("invalid protocol-relative regex"),
            ]
        })
        .as_slice()
}

/// Determine whether a resource URI points outside the application.
///
/// External references are never looked up on disk and never prefixed with the context path.
pub fn is_external_reference(value: &str) -> bool {
    external_reference_patterns()
        .iter()
        .any(|pattern| pattern.is_match(value))
}

/// Determine whether a web path is an ant-style pattern rather than a literal path.
pub fn is_ant_pattern(value: &str) -> bool {
    value.contains(['*', '?', '[', '{'])
}

#[cfg(test)]
mod tests {
    use super::{is_ant_pattern, is_external_reference};

    #[test]
    fn detects_http_urls() {
        assert!(is_external_reference("https://cdn.example.com/jquery.js"));
        assert!(is_external_reference("HTTP://example.com/a.css"));
    }

    #[test]
    fn detects_protocol_relative_urls() {
        assert!(is_external_reference("//cdn.example.com/a.js"));
    }

    #[test]
    fn keeps_local_paths() {
        assert!(!is_external_reference("/js/app.js"));
        assert!(!is_external_reference("js/**/*.js"));
    }

    #[test]
    fn recognises_glob_metacharacters() {
        assert!(is_ant_pattern("js/**/*.js"));
        assert!(is_ant_pattern("js/{a,b}.js"));
        assert!(!is_ant_pattern("js/app.js"));
        assert!(!is_ant_pattern("js"));
    }
}
