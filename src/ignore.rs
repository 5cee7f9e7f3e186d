/// Temporary per-domain suppression of duplicate alerts
///
/// Entries live only in memory; a restart forgets every window.
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    entries: HashMap<String, DateTime<Utc>>,
}

impl IgnoreList {
    pub fn new() -> Self {
        IgnoreList {
            entries: HashMap::new(),
        }
    }

    /// Suppress alerts for `domain` until `now + duration`, replacing any earlier window
    pub fn suppress(&mut self, domain: &str, duration: Duration, now: DateTime<Utc>) {
        self.entries.insert(domain.to_string(), now + duration);
    }

    /// Whether `domain` is still suppressed; an expired entry is dropped on the way out
    pub fn is_suppressed(&mut self, domain: &str, now: DateTime<Utc>) -> bool {
        match self.entries.get(domain) {
            Some(expires_at) if now < *expires_at => true,
            Some(_) => {
                self.entries.remove(domain);
                false
            }
            None => false,
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| now < *expires_at);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
