//! Resume session controller.
//!
//! Owns the currently-open document, tracks dirty state against the last
//! persisted snapshot, and orchestrates the save-before-switch flow. All
//! store I/O happens with the state lock released, so the in-flight-save
//! guard and the fetch generation counter actually have races to guard
//! against when the session is shared across tasks.

pub mod list;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::Arc;

use tracing::debug;

use crate::models::resume::{Resume, ResumeMeta};
use crate::notify::{ConfirmPrompt, Notifier};
use crate::store::ResumeStore;

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loading,
    Ready { dirty: bool },
    Saving,
}

#[derive(Default)]
struct Inner {
    data: Option<Resume>,
    current_id: Option<String>,
    /// Serialized form of the last successfully persisted document.
    last_saved: String,
    saving: bool,
    loading: bool,
    /// Bumped per fetch; a response whose generation is stale is discarded
    /// instead of clobbering a newer selection.
    fetch_generation: u64,
    resumes: Vec<ResumeMeta>,
}

pub struct ResumeSession {
    store: Arc<dyn ResumeStore>,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn ConfirmPrompt>,
    inner: Mutex<Inner>,
}

impl ResumeSession {
    pub fn new(
        store: Arc<dyn ResumeStore>,
        notifier: Arc<dyn Notifier>,
        prompt: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        ResumeSession {
            store,
            notifier,
            prompt,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The lock is only held for field access, never across I/O, so a
        // poisoned lock still holds consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn serialize(doc: &Resume) -> String {
        serde_json::to_string(doc).unwrap_or_default()
    }

    fn dirty_of(inner: &Inner) -> bool {
        inner
            .data
            .as_ref()
            .map(|doc| Self::serialize(doc) != inner.last_saved)
            .unwrap_or(false)
    }

    pub fn state(&self) -> SessionState {
        let inner = self.lock();
        if inner.saving {
            SessionState::Saving
        } else if inner.loading {
            SessionState::Loading
        } else if inner.data.is_some() {
            SessionState::Ready {
                dirty: Self::dirty_of(&inner),
            }
        } else {
            SessionState::Empty
        }
    }

    pub fn data(&self) -> Option<Resume> {
        self.lock().data.clone()
    }

    pub fn current_id(&self) -> Option<String> {
        self.lock().current_id.clone()
    }

    pub fn resumes(&self) -> Vec<ResumeMeta> {
        self.lock().resumes.clone()
    }

    pub fn is_dirty(&self) -> bool {
        Self::dirty_of(&self.lock())
    }

    /// Replaces the in-memory document. Dirty state follows from comparison
    /// with the last-saved snapshot; nothing is persisted here.
    pub fn update_data(&self, doc: Resume) {
        self.lock().data = Some(doc);
    }

    /// Switches to another resume. When the current document is dirty the
    /// user is offered a save first; declining abandons the switch, and
    /// accepting proceeds with the switch whatever the save outcome.
    pub async fn select_resume(&self, id: &str) {
        let (already_current, dirty) = {
            let inner = self.lock();
            (inner.current_id.as_deref() == Some(id), Self::dirty_of(&inner))
        };
        if already_current {
            return;
        }

        if dirty {
            let accepted = self
                .prompt
                .confirm("You have unsaved changes. Save before switching?")
                .await;
            if !accepted {
                return;
            }
            self.perform_save().await;
        }

        self.lock().current_id = Some(id.to_string());
        self.fetch_document(id).await;
    }

    /// Persists the current document. No-op without a document or id, and
    /// while another save is in flight. On success the snapshot and the
    /// metadata list refresh; on failure the attempted edits stay in memory
    /// for retry.
    pub async fn save_resume(&self) {
        if self.perform_save().await {
            self.fetch_list().await;
        }
    }

    /// Creates a resume from the default skeleton, selects it, and
    /// refreshes the metadata list. Failure notifies and propagates.
    pub async fn create_resume(&self, title: &str) -> Result<String, crate::errors::AppError> {
        match self.store.create(Resume::skeleton(title)).await {
            Ok(created) => {
                let id = created.id.clone();
                {
                    let mut inner = self.lock();
                    inner.current_id = Some(id.clone());
                    inner.last_saved = Self::serialize(&created);
                    inner.data = Some(created);
                }
                self.fetch_list().await;
                self.notifier.success(&format!("Created \"{title}\""));
                Ok(id)
            }
            Err(e) => {
                self.notifier.error("Failed to create resume. Please try again.");
                Err(e)
            }
        }
    }

    /// Deletes a resume. When it is the current one the session resets,
    /// regardless of unsaved changes — deletion wins over dirty protection.
    pub async fn delete_resume(&self, id: &str) {
        if let Err(e) = self.store.delete(id).await {
            debug!("Delete failed for {id}: {e}");
            self.notifier.error("Failed to delete resume. Please try again.");
            return;
        }

        {
            let mut inner = self.lock();
            if inner.current_id.as_deref() == Some(id) {
                inner.current_id = None;
                inner.data = None;
                inner.last_saved.clear();
                inner.loading = false;
                // Invalidate any fetch still in flight for the deleted id.
                inner.fetch_generation += 1;
            }
        }
        self.refresh_list().await;
        self.notifier.success("Resume deleted");
    }

    /// Reloads the metadata list; with nothing selected, auto-selects the
    /// first entry (the most recently updated resume).
    pub async fn refresh_list(&self) {
        if !self.fetch_list().await {
            return;
        }
        let auto_select = {
            let inner = self.lock();
            if inner.current_id.is_none() {
                inner.resumes.first().map(|m| m.id.clone())
            } else {
                None
            }
        };
        if let Some(id) = auto_select {
            self.lock().current_id = Some(id.clone());
            self.fetch_document(&id).await;
        }
    }

    /// Fetches the metadata list only. Returns false on failure (which is
    /// notified, never swallowed).
    async fn fetch_list(&self) -> bool {
        match self.store.list().await {
            Ok(metas) => {
                self.lock().resumes = metas;
                true
            }
            Err(e) => {
                debug!("List fetch failed: {e}");
                self.notifier.error("Failed to load the resume list.");
                false
            }
        }
    }

    async fn fetch_document(&self, id: &str) {
        let generation = {
            let mut inner = self.lock();
            inner.loading = true;
            inner.fetch_generation += 1;
            inner.fetch_generation
        };

        let result = self.store.get(id).await;

        let mut inner = self.lock();
        if inner.fetch_generation != generation {
            // A newer selection superseded this fetch; drop the response.
            debug!("Discarding stale fetch response for {id}");
            return;
        }
        inner.loading = false;
        match result {
            Ok(doc) => {
                inner.last_saved = Self::serialize(&doc);
                inner.data = Some(doc);
            }
            Err(e) => {
                inner.data = None;
                drop(inner);
                debug!("Document fetch failed for {id}: {e}");
                self.notifier.error("Failed to load the resume.");
            }
        }
    }

    /// The save primitive shared by `save_resume` and the switch flow.
    /// Returns whether the document was persisted.
    async fn perform_save(&self) -> bool {
        let (id, doc) = {
            let mut inner = self.lock();
            if inner.saving {
                return false;
            }
            let (Some(id), Some(doc)) = (inner.current_id.clone(), inner.data.clone()) else {
                return false;
            };
            inner.saving = true;
            (id, doc)
        };

        let result = self.store.update(&id, doc.clone()).await;

        let mut inner = self.lock();
        inner.saving = false;
        match result {
            Ok(_) => {
                // Snapshot the document as it was sent; edits made while the
                // save was in flight keep the session dirty.
                inner.last_saved = Self::serialize(&doc);
                drop(inner);
                self.notifier.success("Saved!");
                true
            }
            Err(e) => {
                drop(inner);
                debug!("Save failed for {id}: {e}");
                self.notifier.error("Failed to save. Your changes are still here — try again.");
                false
            }
        }
    }
}
