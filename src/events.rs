//! Browser events as queued by the service worker script.
//!
//! `background.js` registers every listener during its first evaluation and
//! forwards each call as a tagged object; events that arrive before the wasm
//! module is ready wait in its queue. This module decodes those objects and
//! routes them to `TabWatch`.

use log::debug;
use serde::Deserialize;

use crate::error::TabError;
use crate::menu::{handle_menu_click, register_menus};
use crate::platform::{Clock, ContextMenus, KeyValueStore, Notifier, TabHost};
use crate::service::TabWatch;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BrowserEvent {
    TabCreated,
    TabRemoved,
    TabUpdated {
        tab_id: i32,
        #[serde(default)]
        url: Option<String>,
    },
    NotificationClicked {
        notification_id: String,
    },
    NotificationButtonClicked {
        notification_id: String,
        button_index: i32,
    },
    Installed,
    MenuClicked {
        menu_item_id: String,
        #[serde(default)]
        tab_id: Option<i32>,
    },
}

impl<S, T, N, C> TabWatch<S, T, N, C>
where
    S: KeyValueStore,
    T: TabHost,
    N: Notifier,
    C: Clock,
{
    /// Route one browser event to its handler
    pub async fn handle_event<M: ContextMenus>(
        &self,
        menus: &M,
        event: BrowserEvent,
    ) -> Result<(), TabError> {
        match event {
            BrowserEvent::TabCreated => self.on_tab_created().await,
            BrowserEvent::TabRemoved => self.on_tab_removed().await,
            BrowserEvent::TabUpdated { tab_id, url } => {
                if let Some(pending) = self.on_tab_updated(tab_id, url.as_deref()).await? {
                    debug!("Raised {} for {}", pending.notification_id, pending.domain);
                }
                Ok(())
            }
            BrowserEvent::NotificationClicked { notification_id } => self
                .on_notification_clicked(&notification_id)
                .await
                .map(|_| ()),
            BrowserEvent::NotificationButtonClicked {
                notification_id,
                button_index,
            } => self
                .on_notification_button(&notification_id, button_index)
                .await
                .map(|_| ()),
            BrowserEvent::Installed => {
                register_menus(menus).await;
                Ok(())
            }
            BrowserEvent::MenuClicked {
                menu_item_id,
                tab_id,
            } => {
                handle_menu_click(&self.tabs, &menu_item_id, tab_id).await;
                Ok(())
            }
        }
    }
}
