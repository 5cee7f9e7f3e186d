/// Error types for Tab Keeper
use thiserror::Error;

/// Failures reported by the platform seams.
#[derive(Debug, Error)]
pub enum TabError {
    #[error("storage operation failed: {0}")]
    Storage(String),
    #[error("tab operation failed: {0}")]
    Tabs(String),
    #[error("window operation failed: {0}")]
    Windows(String),
    #[error("notification operation failed: {0}")]
    Notification(String),
    #[error("context menu operation failed: {0}")]
    Menu(String),
    #[error("stored value under `{key}` is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons an imported data file is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("file does not declare a version")]
    MissingVersion,
    #[error("file does not contain statistics")]
    MissingStatistics,
    #[error("file contents are malformed: {0}")]
    Malformed(String),
    #[error("statistics key `{0}` is not a YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("whitelist entry `{0}` is not a valid domain")]
    InvalidDomain(String),
}

/// Reasons a whitelist entry is refused.
#[derive(Debug, Error, PartialEq)]
pub enum WhitelistError {
    #[error("`{0}` is not a valid domain, e.g. google.com")]
    InvalidDomain(String),
    #[error("`{0}` is already whitelisted")]
    AlreadyListed(String),
}
