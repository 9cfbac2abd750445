//! URL normalization and validation.
//!
//! Submitted URLs are reduced to a canonical `https://host` form before
//! storage so that spelling variants of the same site collapse into one
//! tracked entry. Validation reports every violated rule rather than
//! stopping at the first.

use std::fmt;

use url::Url;

/// Longest accepted URL, matching the column width of `urls.name`.
pub const MAX_URL_LENGTH: usize = 255;

/// A single validation failure for a submitted URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The URL was empty.
    Required,
    /// The URL exceeds [`MAX_URL_LENGTH`] characters.
    TooLong,
    /// The URL is not a well-formed http(s) URL with a host.
    Invalid,
}

impl ValidationIssue {
    /// User-facing message for this issue.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationIssue::Required => "URL is required",
            ValidationIssue::TooLong => "URL exceeds 255 characters",
            ValidationIssue::Invalid => "Invalid URL",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Reduce a raw submission to canonical `https://host` form.
///
/// The scheme is forced to `https`, the host is lowercased, and path,
/// query, fragment, and credentials are discarded. An explicit
/// non-default port is kept. Input that cannot be parsed as a URL is
/// returned trimmed with the scheme prepended, so that validation can
/// report it rather than this function failing.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match Url::parse(&with_scheme) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => match parsed.port() {
                Some(port) => format!("https://{}:{}", host, port),
                None => format!("https://{}", host),
            },
            None => with_scheme,
        },
        Err(_) => with_scheme,
    }
}

/// Check a URL against every rule and return all violations.
///
/// An empty vector means the URL is acceptable for storage.
pub fn validate(url: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if url.is_empty() {
        issues.push(ValidationIssue::Required);
    }
    if url.len() > MAX_URL_LENGTH {
        issues.push(ValidationIssue::TooLong);
    }
    if !is_well_formed(url) {
        issues.push(ValidationIssue::Invalid);
    }

    issues
}

fn is_well_formed(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().map(|h| !h.is_empty()).unwrap_or(false)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_path_and_query() {
        assert_eq!(
            normalize("https://example.com/path/to/page?q=1#frag"),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_adds_scheme_to_bare_domain() {
        assert_eq!(normalize("example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_forces_https() {
        assert_eq!(normalize("http://example.com/page"), "https://example.com");
    }

    #[test]
    fn test_normalize_lowercases_host() {
        assert_eq!(normalize("HTTPS://EXAMPLE.COM/Path"), "https://example.com");
    }

    #[test]
    fn test_normalize_keeps_explicit_port() {
        assert_eq!(
            normalize("http://example.com:8080/admin"),
            "https://example.com:8080"
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize("  example.com  "), "https://example.com");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Example.COM/some/path");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalize_keeps_subdomains() {
        assert_eq!(
            normalize("https://www.sub.example.com/x"),
            "https://www.sub.example.com"
        );
    }

    #[test]
    fn test_validate_accepts_normalized_url() {
        assert!(validate("https://example.com").is_empty());
    }

    #[test]
    fn test_validate_empty_is_required() {
        let issues = validate("");
        assert!(issues.contains(&ValidationIssue::Required));
    }

    #[test]
    fn test_validate_overlong_url() {
        let url = format!("https://{}.com", "a".repeat(MAX_URL_LENGTH));
        let issues = validate(&url);
        assert!(issues.contains(&ValidationIssue::TooLong));
        assert!(!issues.contains(&ValidationIssue::Invalid));
    }

    #[test]
    fn test_validate_at_length_boundary() {
        // 255 characters exactly is still accepted.
        let host = "a".repeat(MAX_URL_LENGTH - "https://.com".len());
        let url = format!("https://{}.com", host);
        assert_eq!(url.len(), MAX_URL_LENGTH);
        assert!(validate(&url).is_empty());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let issues = validate("https://");
        assert!(issues.contains(&ValidationIssue::Invalid));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let issues = validate("ftp://example.com");
        assert!(issues.contains(&ValidationIssue::Invalid));
    }

    #[test]
    fn test_validate_reports_all_violations() {
        let issues = validate(&"x".repeat(300));
        assert!(issues.contains(&ValidationIssue::TooLong));
        assert!(issues.contains(&ValidationIssue::Invalid));
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(ValidationIssue::Required.message(), "URL is required");
        assert_eq!(ValidationIssue::Invalid.message(), "Invalid URL");
    }
}
