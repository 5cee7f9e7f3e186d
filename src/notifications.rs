/// Resolving user responses to duplicate alerts
use log::{debug, info, warn};

use crate::error::TabError;
use crate::platform::{Clock, KeyValueStore, NotificationOptions, Notifier, TabHost};
use crate::service::TabWatch;
use crate::tab_data::PendingNotification;

/// What the user asked for on an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Jump to the first of the existing tabs
    View,
    /// Stop alerting for this domain for a while
    Suppress,
    /// A button this version does not know; only clean up
    Dismiss,
}

impl NotificationAction {
    pub fn from_button(button_index: i32) -> Self {
        match button_index {
            0 => NotificationAction::View,
            1 => NotificationAction::Suppress,
            _ => NotificationAction::Dismiss,
        }
    }
}

impl<S, T, N, C> TabWatch<S, T, N, C>
where
    S: KeyValueStore,
    T: TabHost,
    N: Notifier,
    C: Clock,
{
    /// Clicking the body of an alert behaves like "view"
    pub async fn on_notification_clicked(
        &self,
        notification_id: &str,
    ) -> Result<Option<PendingNotification>, TabError> {
        self.resolve_notification(notification_id, NotificationAction::View)
            .await
    }

    pub async fn on_notification_button(
        &self,
        notification_id: &str,
        button_index: i32,
    ) -> Result<Option<PendingNotification>, TabError> {
        self.resolve_notification(notification_id, NotificationAction::from_button(button_index))
            .await
    }

    /// Apply `action` to the alert's correlation record, then consume it.
    ///
    /// An unknown id (already handled, or lost across a restart) is not an
    /// error: nothing happens and `None` is returned.
    pub async fn resolve_notification(
        &self,
        notification_id: &str,
        action: NotificationAction,
    ) -> Result<Option<PendingNotification>, TabError> {
        let Some(pending) = self.repo.load_pending(notification_id).await? else {
            debug!("No pending record for notification {}", notification_id);
            return Ok(None);
        };

        match action {
            NotificationAction::View => self.focus_first_tab(&pending.tab_ids).await,
            NotificationAction::Suppress => self.suppress_domain(&pending.domain).await,
            NotificationAction::Dismiss => {}
        }

        if let Err(e) = self.notifier.clear(notification_id).await {
            warn!("Failed to clear notification {}: {}", notification_id, e);
        }
        self.repo.remove_pending(notification_id).await?;

        Ok(Some(pending))
    }

    async fn focus_first_tab(&self, tab_ids: &[i32]) {
        let Some(&tab_id) = tab_ids.first() else {
            return;
        };

        if let Err(e) = self.tabs.activate_tab(tab_id).await {
            warn!("Failed to activate tab {}: {}", tab_id, e);
            return;
        }

        match self.tabs.get_tab(tab_id).await {
            Ok(tab) => {
                if let Err(e) = self.tabs.focus_window(tab.window_id).await {
                    warn!("Failed to focus window {}: {}", tab.window_id, e);
                }
            }
            Err(e) => warn!("Failed to look up tab {}: {}", tab_id, e),
        }
    }

    async fn suppress_domain(&self, domain: &str) {
        let config = self.config();
        self.ignore
            .borrow_mut()
            .suppress(domain, config.ignore_duration(), self.now());
        info!("Ignoring {} for {} minutes", domain, config.ignore_minutes);

        let confirmation = NotificationOptions::basic(
            "Domain ignored",
            format!(
                "No reminders for {} in the next {} minutes",
                domain, config.ignore_minutes
            ),
        );
        if let Err(e) = self.notifier.create(None, &confirmation).await {
            warn!("Failed to show ignore confirmation: {}", e);
        }
    }
}
