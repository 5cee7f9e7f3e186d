/// Whitelisted domains never raise duplicate alerts
use crate::domain::{is_valid_domain, normalize_domain_input};
use crate::error::WhitelistError;

/// Add `input` to `whitelist`
///
/// Returns `Ok(None)` when the input is blank, `Ok(Some(domain))` with the
/// normalized entry that was appended, or the reason it was refused.
pub fn add_domain(whitelist: &mut Vec<String>, input: &str) -> Result<Option<String>, WhitelistError> {
    let domain = normalize_domain_input(input);
    if domain.is_empty() {
        return Ok(None);
    }

    if !is_valid_domain(&domain) {
        return Err(WhitelistError::InvalidDomain(domain));
    }

    if whitelist.contains(&domain) {
        return Err(WhitelistError::AlreadyListed(domain));
    }

    whitelist.push(domain.clone());
    Ok(Some(domain))
}

/// Remove `domain`, returning whether anything changed
pub fn remove_domain(whitelist: &mut Vec<String>, domain: &str) -> bool {
    let original_len = whitelist.len();
    whitelist.retain(|d| d != domain);
    whitelist.len() < original_len
}

pub fn is_whitelisted(whitelist: &[String], domain: &str) -> bool {
    whitelist.iter().any(|d| d == domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_normalizes_input() {
        let mut whitelist = Vec::new();

        let added = add_domain(&mut whitelist, "  GitHub.com ").unwrap();

        assert_eq!(added, Some("github.com".to_string()));
        assert_eq!(whitelist, vec!["github.com".to_string()]);
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut whitelist = Vec::new();
        assert_eq!(add_domain(&mut whitelist, "   "), Ok(None));
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut whitelist = Vec::new();

        assert_eq!(
            add_domain(&mut whitelist, "https://google.com"),
            Err(WhitelistError::InvalidDomain("https://google.com".to_string()))
        );
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut whitelist = vec!["a.com".to_string()];

        assert_eq!(
            add_domain(&mut whitelist, "A.com"),
            Err(WhitelistError::AlreadyListed("a.com".to_string()))
        );
        assert_eq!(whitelist.len(), 1);
    }

    #[test]
    fn test_remove_domain() {
        let mut whitelist = vec!["a.com".to_string(), "b.com".to_string()];

        assert!(remove_domain(&mut whitelist, "a.com"));
        assert!(!remove_domain(&mut whitelist, "a.com"));
        assert_eq!(whitelist, vec!["b.com".to_string()]);
    }

    #[test]
    fn test_is_whitelisted_exact_host() {
        let whitelist = vec!["google.com".to_string()];

        assert!(is_whitelisted(&whitelist, "google.com"));
        assert!(!is_whitelisted(&whitelist, "www.google.com"));
    }
}
