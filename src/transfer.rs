/// Export and import of statistics and whitelist as a versioned JSON file
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{is_valid_domain, normalize_domain_input};
use crate::error::ImportError;
use crate::operations::file_timestamp;
use crate::statistics::{StatisticsBook, day_key};
use crate::storage::StorageData;

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: String,
    #[serde(default)]
    pub export_date: Option<String>,
    pub statistics: StatisticsBook,
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl ExportBundle {
    pub fn from_data(data: &StorageData, now: DateTime<Utc>) -> Self {
        ExportBundle {
            version: EXPORT_VERSION.to_string(),
            export_date: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            statistics: data.statistics.clone(),
            whitelist: data.whitelist.clone(),
        }
    }

    pub fn into_data(self) -> StorageData {
        StorageData {
            statistics: self.statistics,
            whitelist: self.whitelist,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("tab-extension-data_{}.json", file_timestamp(now))
}

// Mirrors a JS truthiness check: absent, null, false, 0 and "" all count as missing.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Parse and validate an imported file; nothing is written here
pub fn parse_import(text: &str) -> Result<ExportBundle, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    if is_missing(value.get("version")) {
        return Err(ImportError::MissingVersion);
    }
    if is_missing(value.get("statistics")) {
        return Err(ImportError::MissingStatistics);
    }

    let mut value = value;
    // Hand-edited files sometimes carry a numeric version
    if let Some(Value::Number(n)) = value.get("version") {
        let version = n.to_string();
        value["version"] = Value::String(version);
    }
    if value.get("whitelist").is_some_and(Value::is_null) {
        value["whitelist"] = Value::Array(Vec::new());
    }

    let mut bundle: ExportBundle =
        serde_json::from_value(value).map_err(|e| ImportError::Malformed(e.to_string()))?;

    check_day_keys(&bundle.statistics)?;
    bundle.whitelist = clean_whitelist(&bundle.whitelist)?;
    Ok(bundle)
}

// Only canonical keys sort in calendar order, which pruning relies on
fn check_day_keys(statistics: &StatisticsBook) -> Result<(), ImportError> {
    for key in statistics.days.keys() {
        let canonical = NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map(day_key)
            .is_ok_and(|parsed| parsed == *key);
        if !canonical {
            return Err(ImportError::InvalidDate(key.clone()));
        }
    }
    Ok(())
}

/// Normalize entries the way the whitelist editor does, dropping blanks and repeats
fn clean_whitelist(entries: &[String]) -> Result<Vec<String>, ImportError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let domain = normalize_domain_input(entry);
        if domain.is_empty() || cleaned.contains(&domain) {
            continue;
        }
        if !is_valid_domain(&domain) {
            return Err(ImportError::InvalidDomain(domain));
        }
        cleaned.push(domain);
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::MemoryStore;
    use crate::storage::Repository;
    use crate::tab_data::DayStat;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    fn sample_data() -> StorageData {
        let mut statistics = StatisticsBook::new();
        statistics.days.insert(
            "2024-01-01".to_string(),
            DayStat { opened: 3, closed: 1, max_tabs: 5 },
        );
        StorageData {
            statistics,
            whitelist: vec!["a.com".to_string()],
        }
    }

    #[test]
    fn test_export_shape() {
        let bundle = ExportBundle::from_data(&sample_data(), now());
        let json: Value = serde_json::from_str(&bundle.to_json().unwrap()).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["exportDate"], "2024-06-15T09:30:00.000Z");
        assert_eq!(json["statistics"]["2024-01-01"], json!({"opened": 3, "closed": 1, "maxTabs": 5}));
        assert_eq!(json["whitelist"], json!(["a.com"]));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(now()), "tab-extension-data_2024-06-15_09-30-00.json");
    }

    #[async_std::test]
    async fn test_export_then_import_reproduces_storage() {
        let source = Repository::new(MemoryStore::default());
        source.replace_data(&sample_data()).await.unwrap();
        let exported = ExportBundle::from_data(&source.load_data().await.unwrap(), now())
            .to_json()
            .unwrap();

        let target = Repository::new(MemoryStore::default());
        target.save_whitelist(&["old.com".to_string()]).await.unwrap();
        let bundle = parse_import(&exported).unwrap();
        target.replace_data(&bundle.into_data()).await.unwrap();

        assert_eq!(target.load_data().await.unwrap(), sample_data());
        assert_eq!(
            target.store().value("statistics"),
            source.store().value("statistics")
        );
    }

    #[test]
    fn test_import_without_version_is_rejected() {
        let text = r#"{"statistics": {"2024-01-01": {"opened": 1, "closed": 0, "maxTabs": 1}}, "whitelist": []}"#;
        assert_eq!(parse_import(text), Err(ImportError::MissingVersion));

        let text = r#"{"version": "", "statistics": {}}"#;
        assert_eq!(parse_import(text), Err(ImportError::MissingVersion));
    }

    #[async_std::test]
    async fn test_rejected_import_leaves_storage_untouched() {
        let repo = Repository::new(MemoryStore::default());
        repo.replace_data(&sample_data()).await.unwrap();
        let writes = repo.store().writes.get();

        let result = parse_import(r#"{"statistics": {}, "whitelist": ["evil.com"]}"#);

        assert!(result.is_err());
        assert_eq!(repo.store().writes.get(), writes);
        assert_eq!(repo.load_data().await.unwrap(), sample_data());
    }

    #[test]
    fn test_import_without_statistics_is_rejected() {
        assert_eq!(
            parse_import(r#"{"version": "1.0", "whitelist": []}"#),
            Err(ImportError::MissingStatistics)
        );
    }

    #[test]
    fn test_import_invalid_json() {
        assert!(matches!(parse_import("{not json"), Err(ImportError::InvalidJson(_))));
    }

    #[test]
    fn test_import_wrong_shape() {
        assert!(matches!(
            parse_import(r#"{"version": "1.0", "statistics": [1, 2]}"#),
            Err(ImportError::Malformed(_))
        ));
        assert!(matches!(
            parse_import(r#"{"version": "1.0", "statistics": {}, "whitelist": "a.com"}"#),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_import_defaults_missing_whitelist() {
        let bundle = parse_import(r#"{"version": 1, "statistics": {"2024-02-02": {"opened": 2}}}"#).unwrap();

        assert_eq!(bundle.version, "1");
        assert!(bundle.whitelist.is_empty());
        assert_eq!(bundle.statistics.days["2024-02-02"], DayStat { opened: 2, closed: 0, max_tabs: 0 });
    }

    #[test]
    fn test_import_normalizes_and_dedupes_whitelist() {
        let bundle = parse_import(
            r#"{"version": "1.0", "statistics": {}, "whitelist": ["a.com", " A.com ", "", "b.org", "a.com"]}"#,
        )
        .unwrap();

        assert_eq!(bundle.whitelist, vec!["a.com".to_string(), "b.org".to_string()]);
    }

    #[test]
    fn test_import_rejects_invalid_whitelist_entry() {
        let text = r#"{"version": "1.0", "statistics": {}, "whitelist": ["a.com", "a.com", "HTTP://X"]}"#;
        assert_eq!(parse_import(text), Err(ImportError::InvalidDomain("http://x".to_string())));
    }

    #[test]
    fn test_import_rejects_non_date_statistics_keys() {
        let text = r#"{"version": "1.0", "statistics": {"not-a-date": {"opened": 1}}, "whitelist": []}"#;
        assert_eq!(parse_import(text), Err(ImportError::InvalidDate("not-a-date".to_string())));

        let text = r#"{"version": "1.0", "statistics": {"2024-1-5": {"opened": 1}}}"#;
        assert_eq!(parse_import(text), Err(ImportError::InvalidDate("2024-1-5".to_string())));

        let text = r#"{"version": "1.0", "statistics": {"2024-02-30": {"opened": 1}}}"#;
        assert_eq!(parse_import(text), Err(ImportError::InvalidDate("2024-02-30".to_string())));
    }
}
