//! Extension API bindings: the browser side of the platform traits.
//!
//! Every call goes through the promise-returning MV3 APIs; values cross the
//! boundary as plain JSON objects.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use wasm_bindgen::prelude::*;

use crate::error::TabError;
use crate::platform::{ContextMenus, KeyValueStore, MenuItem, NotificationOptions, Notifier, TabHost};
use crate::tab_data::TabInfo;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = query, catch)]
    async fn tabs_query(query_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = get, catch)]
    async fn tabs_get(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = update, catch)]
    async fn tabs_update(tab_id: i32, update_properties: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = remove, catch)]
    async fn tabs_remove(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "windows"], js_name = update, catch)]
    async fn windows_update(window_id: i32, update_info: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = get, catch)]
    async fn storage_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = set, catch)]
    async fn storage_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = remove, catch)]
    async fn storage_remove(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "notifications"], js_name = create, catch)]
    async fn notifications_create(notification_id: &str, options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "notifications"], js_name = create, catch)]
    async fn notifications_create_unnamed(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "notifications"], js_name = clear, catch)]
    async fn notifications_clear(notification_id: &str) -> Result<JsValue, JsValue>;

    // Not promise based; returns the new item's id
    #[wasm_bindgen(js_namespace = ["chrome", "contextMenus"], js_name = create, catch)]
    fn context_menus_create(create_properties: JsValue) -> Result<JsValue, JsValue>;
}

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize: {:?}", e))
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, String> {
    serde_wasm_bindgen::from_value(value).map_err(|e| format!("Failed to parse: {:?}", e))
}

fn js_message(error: JsValue) -> String {
    match error.as_string() {
        Some(message) => message,
        None => format!("{:?}", error),
    }
}

/// `chrome.tabs` and `chrome.windows`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

#[async_trait(?Send)]
impl TabHost for ChromeTabs {
    async fn query_tabs(&self) -> Result<Vec<TabInfo>, TabError> {
        let query = to_js(&json!({})).map_err(TabError::Tabs)?;
        let tabs_js = tabs_query(query)
            .await
            .map_err(|e| TabError::Tabs(js_message(e)))?;
        from_js(tabs_js).map_err(TabError::Tabs)
    }

    async fn get_tab(&self, tab_id: i32) -> Result<TabInfo, TabError> {
        let tab_js = tabs_get(tab_id)
            .await
            .map_err(|e| TabError::Tabs(js_message(e)))?;
        from_js(tab_js).map_err(TabError::Tabs)
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<(), TabError> {
        let props = to_js(&json!({ "active": true })).map_err(TabError::Tabs)?;
        tabs_update(tab_id, props)
            .await
            .map_err(|e| TabError::Tabs(js_message(e)))?;
        Ok(())
    }

    async fn focus_window(&self, window_id: i32) -> Result<(), TabError> {
        let props = to_js(&json!({ "focused": true })).map_err(TabError::Windows)?;
        windows_update(window_id, props)
            .await
            .map_err(|e| TabError::Windows(js_message(e)))?;
        Ok(())
    }

    async fn pin_tab(&self, tab_id: i32) -> Result<(), TabError> {
        let props = to_js(&json!({ "pinned": true })).map_err(TabError::Tabs)?;
        tabs_update(tab_id, props)
            .await
            .map_err(|e| TabError::Tabs(js_message(e)))?;
        Ok(())
    }

    async fn remove_tab(&self, tab_id: i32) -> Result<(), TabError> {
        tabs_remove(tab_id)
            .await
            .map_err(|e| TabError::Tabs(js_message(e)))?;
        Ok(())
    }
}

/// `chrome.storage.local`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStorage;

#[async_trait(?Send)]
impl KeyValueStore for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, TabError> {
        let result = storage_get(JsValue::from_str(key))
            .await
            .map_err(|e| TabError::Storage(js_message(e)))?;
        let mut items: Map<String, Value> = from_js(result).map_err(TabError::Storage)?;
        Ok(items.remove(key))
    }

    async fn set(&self, items: Map<String, Value>) -> Result<(), TabError> {
        let items_js = to_js(&items).map_err(TabError::Storage)?;
        storage_set(items_js)
            .await
            .map_err(|e| TabError::Storage(js_message(e)))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), TabError> {
        storage_remove(JsValue::from_str(key))
            .await
            .map_err(|e| TabError::Storage(js_message(e)))?;
        Ok(())
    }
}

/// `chrome.notifications`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeNotifications;

#[async_trait(?Send)]
impl Notifier for ChromeNotifications {
    async fn create(
        &self,
        notification_id: Option<&str>,
        options: &NotificationOptions,
    ) -> Result<String, TabError> {
        let options_js = to_js(options).map_err(TabError::Notification)?;
        let created = match notification_id {
            Some(id) => notifications_create(id, options_js).await,
            None => notifications_create_unnamed(options_js).await,
        }
        .map_err(|e| TabError::Notification(js_message(e)))?;

        created
            .as_string()
            .or_else(|| notification_id.map(str::to_string))
            .ok_or_else(|| TabError::Notification("browser returned no notification id".to_string()))
    }

    async fn clear(&self, notification_id: &str) -> Result<(), TabError> {
        notifications_clear(notification_id)
            .await
            .map_err(|e| TabError::Notification(js_message(e)))?;
        Ok(())
    }
}

/// `chrome.contextMenus`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeMenus;

#[async_trait(?Send)]
impl ContextMenus for ChromeMenus {
    async fn create(&self, item: &MenuItem) -> Result<(), TabError> {
        let props = to_js(item).map_err(TabError::Menu)?;
        context_menus_create(props).map_err(|e| TabError::Menu(js_message(e)))?;
        Ok(())
    }
}
