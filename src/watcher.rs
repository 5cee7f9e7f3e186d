/// Duplicate-domain detection on tab navigation
use log::{debug, warn};
use uuid::Uuid;

use crate::domain::{extract_domain, tracked_domain};
use crate::error::TabError;
use crate::platform::{Clock, KeyValueStore, NotificationOptions, Notifier, TabHost};
use crate::service::TabWatch;
use crate::tab_data::{PendingNotification, TabInfo};
use crate::whitelist::is_whitelisted;

pub const VIEW_TABS_BUTTON: &str = "View existing tabs";

/// Ids of open tabs other than `exclude_tab_id` whose host is `domain`
pub fn find_same_domain_tabs(tabs: &[TabInfo], domain: &str, exclude_tab_id: i32) -> Vec<i32> {
    tabs.iter()
        .filter(|tab| tab.id != exclude_tab_id)
        .filter(|tab| extract_domain(&tab.url).as_deref() == Some(domain))
        .map(|tab| tab.id)
        .collect()
}

/// Fresh id for a duplicate alert; unique even for repeated alerts on one domain
pub fn new_notification_id(domain: &str) -> String {
    format!("duplicate-{}-{}", domain, Uuid::new_v4())
}

pub fn duplicate_alert(domain: &str, open_count: usize, ignore_minutes: i64) -> NotificationOptions {
    let ignore_button = format!("Ignore for {} minutes", ignore_minutes);
    NotificationOptions::basic(
        "Duplicate domain",
        format!("{} tabs for {} are already open", open_count, domain),
    )
    .with_buttons(&[VIEW_TABS_BUTTON, ignore_button.as_str()])
    .with_priority(1)
}

impl<S, T, N, C> TabWatch<S, T, N, C>
where
    S: KeyValueStore,
    T: TabHost,
    N: Notifier,
    C: Clock,
{
    /// Handle `chrome.tabs.onUpdated`; only URL changes are checked
    pub async fn on_tab_updated(
        &self,
        tab_id: i32,
        changed_url: Option<&str>,
    ) -> Result<Option<PendingNotification>, TabError> {
        match changed_url {
            Some(url) => self.check_navigation(tab_id, url).await,
            None => Ok(None),
        }
    }

    /// Raise an alert when `tab_id` navigates to a domain that is already open
    /// in enough other tabs. Returns the stored correlation record if one was
    /// raised.
    pub async fn check_navigation(
        &self,
        tab_id: i32,
        url: &str,
    ) -> Result<Option<PendingNotification>, TabError> {
        let Some(domain) = tracked_domain(url) else {
            return Ok(None);
        };

        let whitelist = self.repo.load_whitelist().await?;
        if is_whitelisted(&whitelist, &domain) {
            debug!("{} is whitelisted", domain);
            return Ok(None);
        }

        if self.is_suppressed(&domain) {
            debug!("{} is temporarily ignored", domain);
            return Ok(None);
        }

        let config = self.config();
        let tabs = self.tabs.query_tabs().await?;
        let same_domain = find_same_domain_tabs(&tabs, &domain, tab_id);
        if same_domain.len() < config.duplicate_threshold {
            return Ok(None);
        }

        let options = duplicate_alert(&domain, same_domain.len(), config.ignore_minutes);
        let notification_id = match self
            .notifier
            .create(Some(&new_notification_id(&domain)), &options)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!("Dropping duplicate alert for {}: {}", domain, e);
                return Ok(None);
            }
        };

        let pending = PendingNotification {
            notification_id,
            domain,
            tab_ids: same_domain,
            current_tab_id: tab_id,
        };
        self.repo.save_pending(&pending).await?;

        Ok(Some(pending))
    }
}
