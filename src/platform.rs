//! Seams between Tab Keeper and the browser
//!
//! The background service only talks to these traits; `chrome` implements
//! them over the extension APIs and the tests implement them in memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TabError;
use crate::tab_data::TabInfo;

#[async_trait(?Send)]
pub trait TabHost {
    /// Every open tab across all windows
    async fn query_tabs(&self) -> Result<Vec<TabInfo>, TabError>;
    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, TabError>;
    async fn activate_tab(&self, tab_id: i32) -> Result<(), TabError>;
    async fn focus_window(&self, window_id: i32) -> Result<(), TabError>;
    async fn pin_tab(&self, tab_id: i32) -> Result<(), TabError>;
    async fn remove_tab(&self, tab_id: i32) -> Result<(), TabError>;
}

/// Durable key-value store holding structured values
#[async_trait(?Send)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, TabError>;
    /// Writes every entry of `items` in one call
    async fn set(&self, items: Map<String, Value>) -> Result<(), TabError>;
    async fn remove(&self, key: &str) -> Result<(), TabError>;
}

#[async_trait(?Send)]
pub trait Notifier {
    /// Show a notification, returning the id the browser assigned
    async fn create(
        &self,
        notification_id: Option<&str>,
        options: &NotificationOptions,
    ) -> Result<String, TabError>;
    async fn clear(&self, notification_id: &str) -> Result<(), TabError>;
}

#[async_trait(?Send)]
pub trait ContextMenus {
    async fn create(&self, item: &MenuItem) -> Result<(), TabError>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock; in the browser chrono reads `Date.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Notification image, relative to the extension root
pub const NOTIFICATION_ICON: &str = "icon128.png";

/// Options for `chrome.notifications.create`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub icon_url: String,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<NotificationButton>,
    pub priority: i32,
    pub require_interaction: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NotificationButton {
    pub title: String,
}

impl NotificationOptions {
    pub fn basic(title: impl Into<String>, message: impl Into<String>) -> Self {
        NotificationOptions {
            kind: "basic".to_string(),
            icon_url: NOTIFICATION_ICON.to_string(),
            title: title.into(),
            message: message.into(),
            buttons: Vec::new(),
            priority: 0,
            require_interaction: false,
        }
    }

    pub fn with_buttons(mut self, titles: &[&str]) -> Self {
        self.buttons = titles
            .iter()
            .map(|title| NotificationButton {
                title: title.to_string(),
            })
            .collect();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Properties for `chrome.contextMenus.create`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
}

#[cfg(test)]
pub mod testing {
    //! In-memory platform used by the service tests
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    use chrono::Duration;

    use super::*;

    #[derive(Default)]
    pub struct MemoryStore {
        pub data: RefCell<BTreeMap<String, Value>>,
        pub fail_writes: Cell<bool>,
        pub writes: Cell<usize>,
    }

    impl MemoryStore {
        pub fn value(&self, key: &str) -> Option<Value> {
            self.data.borrow().get(key).cloned()
        }

        pub fn insert(&self, key: &str, value: Value) {
            self.data.borrow_mut().insert(key.to_string(), value);
        }
    }

    #[async_trait(?Send)]
    impl KeyValueStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, TabError> {
            Ok(self.value(key))
        }

        async fn set(&self, items: Map<String, Value>) -> Result<(), TabError> {
            if self.fail_writes.get() {
                return Err(TabError::Storage("quota exceeded".to_string()));
            }
            self.writes.set(self.writes.get() + 1);
            self.data.borrow_mut().extend(items);
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), TabError> {
            self.data.borrow_mut().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct FakeTabs {
        pub tabs: RefCell<Vec<TabInfo>>,
        pub activated: RefCell<Vec<i32>>,
        pub focused_windows: RefCell<Vec<i32>>,
        pub pinned: RefCell<Vec<i32>>,
        pub removed: RefCell<Vec<i32>>,
    }

    impl FakeTabs {
        pub fn with_urls(urls: &[(i32, &str)]) -> Self {
            let fake = FakeTabs::default();
            for (id, url) in urls {
                fake.open(*id, url);
            }
            fake
        }

        pub fn open(&self, id: i32, url: &str) {
            self.tabs
                .borrow_mut()
                .push(TabInfo::new(id, 100 + id, url.to_string(), format!("Tab {}", id)));
        }

        pub fn close(&self, id: i32) {
            self.tabs.borrow_mut().retain(|tab| tab.id != id);
        }

        fn find(&self, tab_id: i32) -> Result<TabInfo, TabError> {
            self.tabs
                .borrow()
                .iter()
                .find(|tab| tab.id == tab_id)
                .cloned()
                .ok_or_else(|| TabError::Tabs(format!("No tab with id: {}.", tab_id)))
        }
    }

    #[async_trait(?Send)]
    impl TabHost for FakeTabs {
        async fn query_tabs(&self) -> Result<Vec<TabInfo>, TabError> {
            Ok(self.tabs.borrow().clone())
        }

        async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, TabError> {
            self.find(tab_id)
        }

        async fn activate_tab(&self, tab_id: i32) -> Result<(), TabError> {
            self.find(tab_id)?;
            self.activated.borrow_mut().push(tab_id);
            Ok(())
        }

        async fn focus_window(&self, window_id: i32) -> Result<(), TabError> {
            self.focused_windows.borrow_mut().push(window_id);
            Ok(())
        }

        async fn pin_tab(&self, tab_id: i32) -> Result<(), TabError> {
            self.find(tab_id)?;
            self.pinned.borrow_mut().push(tab_id);
            Ok(())
        }

        async fn remove_tab(&self, tab_id: i32) -> Result<(), TabError> {
            self.find(tab_id)?;
            self.close(tab_id);
            self.removed.borrow_mut().push(tab_id);
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct FakeNotifier {
        pub shown: RefCell<Vec<(String, NotificationOptions)>>,
        pub cleared: RefCell<Vec<String>>,
        pub fail: Cell<bool>,
        next_id: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl Notifier for FakeNotifier {
        async fn create(
            &self,
            notification_id: Option<&str>,
            options: &NotificationOptions,
        ) -> Result<String, TabError> {
            if self.fail.get() {
                return Err(TabError::Notification("permission denied".to_string()));
            }
            let id = match notification_id {
                Some(id) => id.to_string(),
                None => {
                    self.next_id.set(self.next_id.get() + 1);
                    format!("auto-{}", self.next_id.get())
                }
            };
            self.shown.borrow_mut().push((id.clone(), options.clone()));
            Ok(id)
        }

        async fn clear(&self, notification_id: &str) -> Result<(), TabError> {
            self.cleared.borrow_mut().push(notification_id.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct FakeMenus {
        pub items: RefCell<Vec<MenuItem>>,
    }

    #[async_trait(?Send)]
    impl ContextMenus for FakeMenus {
        async fn create(&self, item: &MenuItem) -> Result<(), TabError> {
            self.items.borrow_mut().push(item.clone());
            Ok(())
        }
    }

    /// Clock the tests move by hand
    pub struct ManualClock {
        now: Cell<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn at(now: DateTime<Utc>) -> Self {
            ManualClock {
                now: Cell::new(now),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_options_serialization() {
        let options = NotificationOptions::basic("Duplicate domain", "2 tabs")
            .with_buttons(&["View", "Ignore"])
            .with_priority(1);

        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["type"], "basic");
        assert_eq!(json["iconUrl"], "icon128.png");
        assert_eq!(json["buttons"][1]["title"], "Ignore");
        assert_eq!(json["priority"], 1);
        assert_eq!(json["requireInteraction"], false);
    }

    #[test]
    fn test_notification_without_buttons_omits_field() {
        let json = serde_json::to_value(NotificationOptions::basic("t", "m")).unwrap();
        assert!(json.get("buttons").is_none());
    }

    #[test]
    fn test_packaged_icons_exist() {
        let extension_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("extension");
        assert!(extension_dir.join(NOTIFICATION_ICON).is_file());

        let manifest: Value =
            serde_json::from_str(&std::fs::read_to_string(extension_dir.join("manifest.json")).unwrap())
                .unwrap();
        for icon in manifest["icons"].as_object().unwrap().values() {
            assert!(extension_dir.join(icon.as_str().unwrap()).is_file(), "missing {}", icon);
        }
    }
}
