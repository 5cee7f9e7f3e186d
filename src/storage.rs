/// Typed access to the extension's key-value storage
///
/// Layout: `statistics` holds a map of day keys to counters, `whitelist` a
/// list of domains, and each outstanding alert gets its own
/// `notification-<id>` key.
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{SETTINGS_KEY, WatchConfig};
use crate::error::TabError;
use crate::platform::KeyValueStore;
use crate::statistics::StatisticsBook;
use crate::tab_data::PendingNotification;

pub const STATISTICS_KEY: &str = "statistics";
pub const WHITELIST_KEY: &str = "whitelist";

pub fn notification_key(notification_id: &str) -> String {
    format!("notification-{}", notification_id)
}

/// Statistics and whitelist as written together by an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageData {
    pub statistics: StatisticsBook,
    pub whitelist: Vec<String>,
}

pub struct Repository<S> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Repository { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, TabError> {
        match self.store.get(key).await? {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => serde_json::from_value(value).map_err(|source| TabError::Malformed {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), TabError> {
        let mut items = Map::new();
        items.insert(key.to_string(), to_json(key, value)?);
        self.store.set(items).await
    }

    pub async fn load_statistics(&self) -> Result<StatisticsBook, TabError> {
        self.load(STATISTICS_KEY).await
    }

    pub async fn save_statistics(&self, book: &StatisticsBook) -> Result<(), TabError> {
        self.save(STATISTICS_KEY, book).await
    }

    pub async fn load_whitelist(&self) -> Result<Vec<String>, TabError> {
        self.load(WHITELIST_KEY).await
    }

    pub async fn save_whitelist(&self, whitelist: &[String]) -> Result<(), TabError> {
        self.save(WHITELIST_KEY, &whitelist).await
    }

    pub async fn load_data(&self) -> Result<StorageData, TabError> {
        Ok(StorageData {
            statistics: self.load_statistics().await?,
            whitelist: self.load_whitelist().await?,
        })
    }

    /// Overwrite statistics and whitelist in a single write
    pub async fn replace_data(&self, data: &StorageData) -> Result<(), TabError> {
        let mut items = Map::new();
        items.insert(STATISTICS_KEY.to_string(), to_json(STATISTICS_KEY, &data.statistics)?);
        items.insert(WHITELIST_KEY.to_string(), to_json(WHITELIST_KEY, &data.whitelist)?);
        self.store.set(items).await
    }

    pub async fn load_pending(
        &self,
        notification_id: &str,
    ) -> Result<Option<PendingNotification>, TabError> {
        let key = notification_key(notification_id);
        match self.store.get(&key).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| TabError::Malformed { key, source }),
        }
    }

    pub async fn save_pending(&self, pending: &PendingNotification) -> Result<(), TabError> {
        self.save(&notification_key(&pending.notification_id), pending)
            .await
    }

    pub async fn remove_pending(&self, notification_id: &str) -> Result<(), TabError> {
        self.store.remove(&notification_key(notification_id)).await
    }

    /// Stored overrides on top of the defaults
    pub async fn load_config(&self) -> Result<WatchConfig, TabError> {
        self.load(SETTINGS_KEY).await
    }
}

fn to_json<T: Serialize>(key: &str, value: &T) -> Result<Value, TabError> {
    serde_json::to_value(value).map_err(|source| TabError::Malformed {
        key: key.to_string(),
        source,
    })
}
