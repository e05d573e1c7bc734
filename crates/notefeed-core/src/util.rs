//! Small text and clock helpers shared by the remote client, config, and engine.

/// Longest backend snippet carried in an error message
const ERROR_SNIPPET_CHARS: usize = 180;

/// Trim optional text, treating blank input as absent.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Validate a backend base URL and strip trailing slashes so paths can be
/// appended directly. The error is a human-readable reason.
pub fn normalize_base_url(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("base URL must not be empty");
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err("base URL must include http:// or https://");
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Squash a response body into a single short line for error messages.
pub fn compact_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(ERROR_SNIPPET_CHARS)
        .collect()
}

/// Wall-clock time as Unix milliseconds, the unit posts and comments use.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some(" \t ".to_string())), None);
        assert_eq!(
            normalize_text_option(Some(" jwt-token ".to_string())),
            Some("jwt-token".to_string())
        );
    }

    #[test]
    fn base_url_needs_scheme_and_loses_trailing_slash() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("10.0.2.2:3000").is_err());
        assert!(normalize_base_url("ftp://feed.example.com").is_err());
        assert_eq!(
            normalize_base_url(" http://10.0.2.2:3000// ").unwrap(),
            "http://10.0.2.2:3000"
        );
        assert_eq!(
            normalize_base_url("https://feed.example.com/api/").unwrap(),
            "https://feed.example.com/api"
        );
    }

    #[test]
    fn compact_text_flattens_and_truncates() {
        assert_eq!(
            compact_text("<html>\n  <body>Bad   Gateway</body>\n</html>"),
            "<html> <body>Bad Gateway</body> </html>"
        );
        assert_eq!(compact_text(&"x".repeat(500)).len(), ERROR_SNIPPET_CHARS);
        assert_eq!(compact_text("   "), "");
    }
}
