//! The background service: statistics bookkeeping plus the state shared by
//! the duplicate watcher and the notification handlers.
//!
//! Event handlers run one at a time on the extension's single thread. The
//! ignore list sits in a `RefCell`; no borrow of it is held across an await.

use std::cell::RefCell;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};

use crate::config::WatchConfig;
use crate::error::TabError;
use crate::ignore::IgnoreList;
use crate::platform::{Clock, KeyValueStore, Notifier, TabHost};
use crate::statistics::day_key;
use crate::storage::Repository;
use crate::tab_data::{DayStat, TabEvent};

pub struct TabWatch<S, T, N, C> {
    pub(crate) repo: Repository<S>,
    pub(crate) tabs: T,
    pub(crate) notifier: N,
    pub(crate) clock: C,
    pub(crate) config: RefCell<WatchConfig>,
    pub(crate) ignore: RefCell<IgnoreList>,
}

impl<S, T, N, C> TabWatch<S, T, N, C>
where
    S: KeyValueStore,
    T: TabHost,
    N: Notifier,
    C: Clock,
{
    pub fn new(store: S, tabs: T, notifier: N, clock: C, config: WatchConfig) -> Self {
        TabWatch {
            repo: Repository::new(store),
            tabs,
            notifier,
            clock,
            config: RefCell::new(config),
            ignore: RefCell::new(IgnoreList::new()),
        }
    }

    pub fn config(&self) -> WatchConfig {
        self.config.borrow().clone()
    }

    /// Swap in stored overrides once they have been read
    pub fn set_config(&self, config: WatchConfig) {
        *self.config.borrow_mut() = config;
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Day buckets follow UTC calendar days
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Make sure today's bucket exists, then drop expired history
    pub async fn startup(&self) -> Result<(), TabError> {
        self.ensure_today().await?;
        self.prune_statistics().await?;
        Ok(())
    }

    pub async fn ensure_today(&self) -> Result<(), TabError> {
        let today = self.today();
        let mut book = self.repo.load_statistics().await?;
        if book.get(today).is_none() {
            book.day_mut(today);
            self.repo.save_statistics(&book).await?;
            debug!("Created statistics bucket for {}", day_key(today));
        }
        Ok(())
    }

    /// Count one open or close and refresh today's peak from the live tab count
    pub async fn record_event(&self, event: TabEvent) -> Result<DayStat, TabError> {
        let today = self.today();
        let mut book = self.repo.load_statistics().await?;
        let live_tabs = self.tabs.query_tabs().await?.len();

        let stat = book.record(event, today, live_tabs);
        self.repo.save_statistics(&book).await?;

        Ok(stat)
    }

    pub async fn on_tab_created(&self) -> Result<(), TabError> {
        self.record_event(TabEvent::Opened).await.map(|_| ())
    }

    pub async fn on_tab_removed(&self) -> Result<(), TabError> {
        self.record_event(TabEvent::Closed).await.map(|_| ())
    }

    /// Drop statistics older than the retention window; only writes when something went
    pub async fn prune_statistics(&self) -> Result<usize, TabError> {
        let mut book = self.repo.load_statistics().await?;
        let removed = book.prune(self.today(), self.config().retention_days);

        if removed > 0 {
            self.repo.save_statistics(&book).await?;
            info!("Pruned {} day(s) of old statistics", removed);
        }

        Ok(removed)
    }

    pub fn sweep_ignored(&self) -> usize {
        let removed = self.ignore.borrow_mut().sweep(self.now());
        if removed > 0 {
            debug!("Swept {} expired ignore window(s)", removed);
        }
        removed
    }

    pub fn is_suppressed(&self, domain: &str) -> bool {
        self.ignore.borrow_mut().is_suppressed(domain, self.now())
    }
}
