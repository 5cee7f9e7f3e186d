/// Domain extraction and grouping logic for Tab Keeper
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// Placeholder group name for tabs whose URL has no host
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// URL prefixes of browser-internal pages, never checked for duplicates
const INTERNAL_SCHEMES: &[&str] = &["chrome://", "edge://", "chrome-extension://", "about:"];

/// Host the browser reports for its own new-tab page
const NEW_TAB_HOST: &str = "newtab";

/// Extract the host of a URL
///
/// Returns `None` when the URL cannot be parsed or carries no host.
///
/// Examples:
/// - https://www.google.com/search → www.google.com
/// - http://LOCALHOST:3000/ → localhost
/// - not a url → None
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

/// Host used as the duplicate-detection key, or `None` if the URL is not trackable
pub fn tracked_domain(url: &str) -> Option<String> {
    if INTERNAL_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        return None;
    }

    extract_domain(url).filter(|domain| domain != NEW_TAB_HOST)
}

/// Host for display and grouping, falling back to [`UNKNOWN_DOMAIN`]
pub fn domain_or_unknown(url: &str) -> String {
    extract_domain(url).unwrap_or_else(|| UNKNOWN_DOMAIN.to_string())
}

/// Normalize user input the same way whitelist entries are stored
pub fn normalize_domain_input(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Check that a (normalized) string looks like a registrable domain name
pub fn is_valid_domain(domain: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

    PATTERN
        .get_or_init(|| Regex::new(r"(?i)^[a-z0-9]+([\-.][a-z0-9]+)*\.[a-z]{2,}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain_basic() {
        assert_eq!(extract_domain("https://www.google.com"), Some("www.google.com".to_string()));
        assert_eq!(extract_domain("https://google.com/search?q=rust"), Some("google.com".to_string()));
        assert_eq!(extract_domain("http://a.com/x"), Some("a.com".to_string()));
    }

    #[test]
    fn test_extract_domain_keeps_subdomains() {
        assert_eq!(extract_domain("https://docs.microsoft.com"), Some("docs.microsoft.com".to_string()));
        assert_eq!(extract_domain("https://news.bbc.co.uk/article"), Some("news.bbc.co.uk".to_string()));
    }

    #[test]
    fn test_extract_domain_lowercases_and_drops_port() {
        assert_eq!(extract_domain("https://GitHub.COM/rust-lang"), Some("github.com".to_string()));
        assert_eq!(extract_domain("http://localhost:3000/app"), Some("localhost".to_string()));
        assert_eq!(extract_domain("http://127.0.0.1:8080"), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_domain_malformed() {
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("not-a-url"), None);
        assert_eq!(extract_domain("https://"), None);
        assert_eq!(extract_domain("data:text/plain,hello"), None);
    }

    #[test]
    fn test_tracked_domain_excludes_internal_pages() {
        assert_eq!(tracked_domain("chrome://newtab/"), None);
        assert_eq!(tracked_domain("chrome://settings"), None);
        assert_eq!(tracked_domain("edge://favorites"), None);
        assert_eq!(tracked_domain("chrome-extension://abcdef/popup.html"), None);
        assert_eq!(tracked_domain("about:blank"), None);
    }

    #[test]
    fn test_tracked_domain_excludes_newtab_host() {
        assert_eq!(tracked_domain("https://newtab/"), None);
    }

    #[test]
    fn test_tracked_domain_regular_site() {
        assert_eq!(tracked_domain("https://a.com/z"), Some("a.com".to_string()));
    }

    #[test]
    fn test_domain_or_unknown() {
        assert_eq!(domain_or_unknown("https://github.com/yewstack"), "github.com");
        assert_eq!(domain_or_unknown("garbage"), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_is_valid_domain() {
        assert!(is_valid_domain("google.com"));
        assert!(is_valid_domain("mail.google.com"));
        assert!(is_valid_domain("my-site.co.uk"));
        assert!(is_valid_domain("Example.ORG"));

        assert!(!is_valid_domain("localhost"));
        assert!(!is_valid_domain("google"));
        assert!(!is_valid_domain("-google.com"));
        assert!(!is_valid_domain("google.c"));
        assert!(!is_valid_domain("https://google.com"));
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn test_normalize_domain_input() {
        assert_eq!(normalize_domain_input("  GitHub.com \n"), "github.com");
    }
}
