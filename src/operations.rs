/// Tab list operations for the popup: search, sorting, grouping, text report
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::domain_or_unknown;
use crate::tab_data::TabInfo;

const RULE_WIDTH: usize = 80;
const UNTITLED: &str = "(untitled)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Browser order
    #[default]
    Default,
    Title,
    Url,
    /// Grouped by host, largest group first
    Group,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [SortMode::Default, SortMode::Title, SortMode::Url, SortMode::Group];

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Default => "Default",
            SortMode::Title => "Title",
            SortMode::Url => "URL",
            SortMode::Group => "Group",
        }
    }
}

/// Tabs sharing one host
#[derive(Debug, Clone, PartialEq)]
pub struct DomainGroup {
    pub domain: String,
    pub tabs: Vec<TabInfo>,
}

impl DomainGroup {
    /// First favicon any tab in the group reports
    pub fn fav_icon_url(&self) -> Option<&str> {
        self.tabs.iter().find_map(|tab| tab.fav_icon_url.as_deref())
    }
}

/// What the popup renders: a flat list or domain groups
#[derive(Debug, Clone, PartialEq)]
pub enum TabListing {
    Flat(Vec<TabInfo>),
    Grouped(Vec<DomainGroup>),
}

impl TabListing {
    pub fn is_empty(&self) -> bool {
        match self {
            TabListing::Flat(tabs) => tabs.is_empty(),
            TabListing::Grouped(groups) => groups.is_empty(),
        }
    }
}

/// Tabs whose title contains `keyword`, ignoring case; a blank keyword keeps everything
pub fn filter_by_title(tabs: &[TabInfo], keyword: &str) -> Vec<TabInfo> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return tabs.to_vec();
    }

    tabs.iter()
        .filter(|tab| tab.title.to_lowercase().contains(&keyword))
        .cloned()
        .collect()
}

/// Group by host; groups are ordered by size, ties keep first-appearance order
pub fn group_by_domain(tabs: &[TabInfo]) -> Vec<DomainGroup> {
    let mut groups: Vec<DomainGroup> = Vec::new();

    for tab in tabs {
        let domain = domain_or_unknown(&tab.url);
        match groups.iter_mut().find(|group| group.domain == domain) {
            Some(group) => group.tabs.push(tab.clone()),
            None => groups.push(DomainGroup {
                domain,
                tabs: vec![tab.clone()],
            }),
        }
    }

    // sort_by is stable
    groups.sort_by(|a, b| b.tabs.len().cmp(&a.tabs.len()));
    groups
}

pub fn arrange_tabs(tabs: &[TabInfo], mode: SortMode) -> TabListing {
    match mode {
        SortMode::Default => TabListing::Flat(tabs.to_vec()),
        SortMode::Title => {
            let mut sorted = tabs.to_vec();
            sorted.sort_by_cached_key(|tab| tab.title.to_lowercase());
            TabListing::Flat(sorted)
        }
        SortMode::Url => {
            let mut sorted = tabs.to_vec();
            sorted.sort_by_cached_key(|tab| tab.url.to_lowercase());
            TabListing::Flat(sorted)
        }
        SortMode::Group => TabListing::Grouped(group_by_domain(tabs)),
    }
}

/// Collapse `domain` if it is expanded, expand it otherwise
pub fn toggle_group(collapsed: &BTreeSet<String>, domain: &str) -> BTreeSet<String> {
    let mut toggled = collapsed.clone();
    if !toggled.remove(domain) {
        toggled.insert(domain.to_string());
    }
    toggled
}

pub fn display_title(tab: &TabInfo) -> &str {
    if tab.title.is_empty() { UNTITLED } else { tab.title.as_str() }
}

/// List line for the `number`th tab, counting from 1
pub fn numbered_title(number: usize, tab: &TabInfo) -> String {
    format!("{}. {}", number, display_title(tab))
}

/// Header line above the list
pub fn count_summary(total: usize, matching: usize, keyword: &str) -> String {
    if keyword.trim().is_empty() {
        format!("{} tabs", total)
    } else {
        format!("{} tabs, showing {} matches", total, matching)
    }
}

/// Filename-safe timestamp, e.g. `2024-06-15_09-30-00`
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S").to_string()
}

pub fn tab_list_filename(now: DateTime<Utc>) -> String {
    format!("tabs_{}.txt", file_timestamp(now))
}

fn push_entry(report: &mut String, number: usize, tab: &TabInfo) {
    report.push_str(&format!("#{}\n", number));
    report.push_str(&format!("Title: {}\n", display_title(tab)));
    report.push_str(&format!("URL: {}\n\n", tab.url));
}

/// Plain-text report of the listing as currently filtered and sorted
pub fn render_tab_report(
    listing: &TabListing,
    total: usize,
    matching: usize,
    keyword: &str,
    now: DateTime<Utc>,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut report = String::new();

    report.push_str("Tab list\n");
    report.push_str(&format!("{}\n", rule));
    report.push_str(&format!("Total: {} tabs\n", total));
    let keyword = keyword.trim();
    if !keyword.is_empty() {
        report.push_str(&format!(
            "Search results: {} matching tabs (keyword: {})\n",
            matching, keyword
        ));
    }
    report.push_str(&format!("Exported at: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    report.push_str(&format!("{}\n\n", rule));

    match listing {
        TabListing::Flat(tabs) => {
            for (index, tab) in tabs.iter().enumerate() {
                push_entry(&mut report, index + 1, tab);
            }
        }
        TabListing::Grouped(groups) => {
            for (group_index, group) in groups.iter().enumerate() {
                report.push_str(&format!(
                    "\n[Group {}] {} ({} tabs)\n",
                    group_index + 1,
                    group.domain,
                    group.tabs.len()
                ));
                report.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
                for (index, tab) in group.tabs.iter().enumerate() {
                    push_entry(&mut report, index + 1, tab);
                }
            }
        }
    }

    report.push_str(&format!("{}\n", rule));
    report.push_str("End of file\n");
    report
}
