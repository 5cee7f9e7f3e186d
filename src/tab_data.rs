/// Data structures for Tab Keeper
use serde::{Deserialize, Serialize};

/// Information about a browser tab, as reported by `chrome.tabs`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub window_id: i32,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub audible: bool,
    #[serde(default)]
    pub discarded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
}

impl TabInfo {
    pub fn new(id: i32, window_id: i32, url: String, title: String) -> TabInfo {
        TabInfo {
            id,
            url,
            title,
            window_id,
            ..TabInfo::default()
        }
    }
}

/// Counters for one calendar day
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayStat {
    #[serde(default)]
    pub opened: u32,
    #[serde(default)]
    pub closed: u32,
    #[serde(default)]
    pub max_tabs: u32,
}

impl DayStat {
    pub fn is_active(&self) -> bool {
        self.opened > 0 || self.closed > 0
    }
}

/// Which tab lifecycle event is being counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    Opened,
    Closed,
}

/// Correlation between an outstanding duplicate alert and the tabs it concerns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingNotification {
    pub notification_id: String,
    pub domain: String,
    pub tab_ids: Vec<i32>,
    pub current_tab_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_info_creation() {
        let tab = TabInfo::new(1, 7, "https://google.com".to_string(), "Google".to_string());

        assert_eq!(tab.id, 1);
        assert_eq!(tab.window_id, 7);
        assert_eq!(tab.url, "https://google.com");
        assert_eq!(tab.title, "Google");
        assert!(!tab.pinned);
        assert_eq!(tab.fav_icon_url, None);
    }

    #[test]
    fn test_tab_info_from_browser_payload() {
        // Browser payloads carry extra fields and omit some optional ones.
        let json = r#"{
            "id": 42,
            "windowId": 3,
            "index": 5,
            "url": "https://github.com/rust-lang",
            "title": "Rust",
            "active": true,
            "pinned": false,
            "audible": true,
            "discarded": false,
            "favIconUrl": "https://github.com/favicon.ico",
            "incognito": false,
            "groupId": -1
        }"#;

        let tab: TabInfo = serde_json::from_str(json).unwrap();

        assert_eq!(tab.id, 42);
        assert_eq!(tab.window_id, 3);
        assert!(tab.active);
        assert!(tab.audible);
        assert_eq!(tab.fav_icon_url.as_deref(), Some("https://github.com/favicon.ico"));
    }

    #[test]
    fn test_tab_info_without_url() {
        let tab: TabInfo = serde_json::from_str(r#"{"id": 1, "windowId": 1}"#).unwrap();
        assert_eq!(tab.url, "");
        assert_eq!(tab.title, "");
    }

    #[test]
    fn test_day_stat_uses_stored_field_names() {
        let stat = DayStat { opened: 3, closed: 1, max_tabs: 5 };
        let json = serde_json::to_value(stat).unwrap();

        assert_eq!(json, serde_json::json!({"opened": 3, "closed": 1, "maxTabs": 5}));
    }

    #[test]
    fn test_day_stat_is_active() {
        assert!(!DayStat::default().is_active());
        assert!(DayStat { opened: 0, closed: 2, max_tabs: 0 }.is_active());
        assert!(!DayStat { opened: 0, closed: 0, max_tabs: 9 }.is_active());
    }

    #[test]
    fn test_pending_notification_serialization() {
        let pending = PendingNotification {
            notification_id: "duplicate-a.com-1".to_string(),
            domain: "a.com".to_string(),
            tab_ids: vec![1, 2],
            current_tab_id: 3,
        };

        let json = serde_json::to_value(&pending).unwrap();
        assert_eq!(json["tabIds"], serde_json::json!([1, 2]));
        assert_eq!(json["currentTabId"], 3);

        let deserialized: PendingNotification = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, pending);
    }
}
