//! List/selection view model: the metadata list with a debounced title
//! filter, independent of full document bodies.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::debounce::Debouncer;
use crate::models::resume::ResumeMeta;

#[derive(Default)]
struct ListInner {
    entries: Vec<ResumeMeta>,
    /// Raw query as typed.
    query: String,
    /// Query actually applied to filtering, updated once typing settles.
    applied: String,
    selected: Option<String>,
}

pub struct ResumeListModel {
    inner: Mutex<ListInner>,
    debouncer: Debouncer,
}

impl ResumeListModel {
    pub fn new(filter_delay: Duration) -> Self {
        ResumeListModel {
            inner: Mutex::new(ListInner::default()),
            debouncer: Debouncer::new(filter_delay),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the backing entries (after a gateway list refresh). A
    /// selection pointing at a vanished entry is cleared.
    pub fn set_entries(&self, entries: Vec<ResumeMeta>) {
        let mut inner = self.lock();
        if let Some(selected) = &inner.selected {
            if !entries.iter().any(|m| &m.id == selected) {
                inner.selected = None;
            }
        }
        inner.entries = entries;
    }

    pub fn select(&self, id: Option<String>) {
        self.lock().selected = id;
    }

    pub fn selected(&self) -> Option<String> {
        self.lock().selected.clone()
    }

    /// Records a keystroke and applies it to the filter once no newer
    /// keystroke arrives within the debounce delay.
    pub async fn set_query(&self, query: &str) {
        self.lock().query = query.to_string();
        if self.debouncer.settle().await {
            let mut inner = self.lock();
            inner.applied = inner.query.clone();
        }
    }

    /// Entries whose title matches the applied filter, case-insensitive.
    /// An empty filter passes everything through.
    pub fn filtered(&self) -> Vec<ResumeMeta> {
        let inner = self.lock();
        if inner.applied.is_empty() {
            return inner.entries.clone();
        }
        let needle = inner.applied.to_lowercase();
        inner
            .entries
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
