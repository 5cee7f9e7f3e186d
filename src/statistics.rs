/// Day-bucketed tab statistics
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::tab_data::{DayStat, TabEvent};

/// Popup period choices, in days
pub const PERIODS: [u32; 3] = [7, 30, 90];

/// Storage key for a calendar day (`YYYY-MM-DD`)
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// All recorded days, keyed by `YYYY-MM-DD`
///
/// Keys sort lexicographically in calendar order, which pruning relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct StatisticsBook {
    pub days: BTreeMap<String, DayStat>,
}

/// One day of a range query
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub stat: DayStat,
}

impl DailyEntry {
    /// Short chart label, e.g. `3/14`
    pub fn label(&self) -> String {
        self.date.format("%-m/%-d").to_string()
    }
}

/// Summary figures shown above the chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    pub total_opened: u64,
    pub total_closed: u64,
    pub average_opened: u64,
    pub current_tabs: usize,
}

impl StatisticsBook {
    pub fn new() -> Self {
        StatisticsBook {
            days: BTreeMap::new(),
        }
    }

    /// Today's bucket, created empty on first access
    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayStat {
        self.days.entry(day_key(date)).or_default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayStat> {
        self.days.get(&day_key(date))
    }

    /// Count one tab event and raise the day's peak to `live_tabs` if higher
    pub fn record(&mut self, event: TabEvent, date: NaiveDate, live_tabs: usize) -> DayStat {
        let stat = self.day_mut(date);
        match event {
            TabEvent::Opened => stat.opened = stat.opened.saturating_add(1),
            TabEvent::Closed => stat.closed = stat.closed.saturating_add(1),
        }
        let live_tabs = u32::try_from(live_tabs).unwrap_or(u32::MAX);
        stat.max_tabs = stat.max_tabs.max(live_tabs);
        *stat
    }

    /// Drop every day older than `today - retention_days`, returning how many went
    pub fn prune(&mut self, today: NaiveDate, retention_days: i64) -> usize {
        let cutoff = day_key(today - Duration::days(retention_days));
        let before = self.days.len();
        self.days.retain(|date, _| date.as_str() >= cutoff.as_str());
        before - self.days.len()
    }

    /// One entry per day from `start` to `end` inclusive, zero-filled where nothing was recorded
    pub fn query(&self, start: NaiveDate, end: NaiveDate) -> Vec<DailyEntry> {
        start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| DailyEntry {
                date,
                stat: self.get(date).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// The last `period_days` days ending at `today`
    pub fn query_period(&self, today: NaiveDate, period_days: u32) -> Vec<DailyEntry> {
        let span = i64::from(period_days.max(1)) - 1;
        self.query(today - Duration::days(span), today)
    }
}

/// Totals over a queried range; the average only counts days with any activity
pub fn summarize(entries: &[DailyEntry], current_tabs: usize) -> PeriodSummary {
    let total_opened: u64 = entries.iter().map(|e| u64::from(e.stat.opened)).sum();
    let total_closed: u64 = entries.iter().map(|e| u64::from(e.stat.closed)).sum();
    let active_days = entries.iter().filter(|e| e.stat.is_active()).count() as u64;

    let average_opened = if active_days > 0 {
        (total_opened + active_days / 2) / active_days
    } else {
        0
    };

    PeriodSummary {
        total_opened,
        total_closed,
        average_opened,
        current_tabs,
    }
}
