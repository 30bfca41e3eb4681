//! Persistence gateway: one JSON document per resume under a data root.
//!
//! All writes are whole-document replace. A temp-file-then-rename keeps a
//! crashed write from leaving a truncated document behind; that is the only
//! durability guarantee. There is no locking — two writers to the same id
//! are last-write-wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeMeta};

/// Durable storage of one resume per opaque id, plus metadata-only listings.
///
/// The session controller depends on this trait rather than on `FileStore`
/// so tests (and alternative transports) can substitute their own backend.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// All stored resumes' metadata, most recently updated first.
    async fn list(&self) -> Result<Vec<ResumeMeta>, AppError>;

    async fn get(&self, id: &str) -> Result<Resume, AppError>;

    /// Generates an id, stamps both timestamps and persists. Any
    /// id/timestamps in the supplied body are overwritten.
    async fn create(&self, body: Resume) -> Result<Resume, AppError>;

    /// Whole-document replace. Fails with `NotFound` when the id has never
    /// been created: update conceptually requires prior existence.
    async fn update(&self, id: &str, body: Resume) -> Result<Resume, AppError>;

    /// Removes the record if present; absence is not an error.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Flat-file implementation: `{root}/{id}.json` per resume.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    async fn ensure_root(&self) -> Result<(), AppError> {
        if !tokio::fs::try_exists(&self.root).await? {
            tokio::fs::create_dir_all(&self.root).await?;
            info!("Created resume data directory at {}", self.root.display());
        }
        Ok(())
    }

    /// Millisecond-epoch ids, bumped on the (unlikely) collision with an
    /// existing file so ids stay unique within the store.
    async fn next_id(&self) -> Result<String, AppError> {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = millis.to_string();
            if !tokio::fs::try_exists(self.path_for(&id)).await? {
                return Ok(id);
            }
            millis += 1;
        }
    }

    async fn write_document(&self, resume: &Resume) -> Result<(), AppError> {
        self.ensure_root().await?;
        let body = serde_json::to_vec_pretty(resume)?;
        let tmp = self.root.join(format!("{}.json.tmp", resume.id));
        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, self.path_for(&resume.id)).await?;
        Ok(())
    }

    async fn read_document(&self, path: &Path) -> Result<Resume, AppError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ResumeStore for FileStore {
    async fn list(&self) -> Result<Vec<ResumeMeta>, AppError> {
        self.ensure_root().await?;

        let mut metas = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_document(&path).await {
                Ok(resume) => metas.push(resume.meta()),
                // A malformed file must not break the whole listing.
                Err(e) => warn!("Skipping unreadable resume file {}: {e}", path.display()),
            }
        }

        // Most recently updated first; documents without a timestamp sort oldest.
        metas.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(metas)
    }

    async fn get(&self, id: &str) -> Result<Resume, AppError> {
        let path = self.path_for(id);
        if !tokio::fs::try_exists(&path).await? {
            return Err(AppError::NotFound(format!("Resume {id} not found")));
        }
        self.read_document(&path).await
    }

    async fn create(&self, mut body: Resume) -> Result<Resume, AppError> {
        self.ensure_root().await?;
        let now = Utc::now();
        body.id = self.next_id().await?;
        body.created_at = Some(now);
        body.updated_at = Some(now);
        self.write_document(&body).await?;
        info!("Created resume {} ({})", body.id, body.title);
        Ok(body)
    }

    async fn update(&self, id: &str, mut body: Resume) -> Result<Resume, AppError> {
        let existing = self.get(id).await?;
        body.id = id.to_string();
        body.updated_at = Some(Utc::now());
        // A body stripped of its createdAt keeps the stored one.
        if body.created_at.is_none() {
            body.created_at = existing.created_at;
        }
        self.write_document(&body).await?;
        Ok(body)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => {
                info!("Deleted resume {id}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("resumes"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_list_creates_missing_root_and_returns_empty() {
        let (_dir, store) = store();
        let metas = store.list().await.unwrap();
        assert!(metas.is_empty());
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn test_create_get_round_trip() {
        let (_dir, store) = store();
        let created = store.create(Resume::skeleton("Round trip")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "Round trip");
        assert_eq!(fetched.sections.len(), 4);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.get("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_ignores_supplied_id_and_timestamps() {
        let (_dir, store) = store();
        let mut body = Resume::skeleton("Sneaky");
        body.id = "forged".to_string();
        body.created_at = Some(Utc::now() - chrono::Duration::days(30));
        let created = store.create(body).await.unwrap();
        assert_ne!(created.id, "forged");
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store
            .update("ghost", Resume::skeleton("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_forces_path_id_and_bumps_updated_at() {
        let (_dir, store) = store();
        let created = store.create(Resume::skeleton("Original")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let mut body = created.clone();
        body.id = "different".to_string();
        body.title = "Renamed".to_string();
        let updated = store.update(&created.id, body).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed");
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at_when_body_lacks_it() {
        let (_dir, store) = store();
        let created = store.create(Resume::skeleton("Keep stamp")).await.unwrap();
        let mut body = created.clone();
        body.created_at = None;
        let updated = store.update(&created.id, body).await.unwrap();
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_list_orders_by_updated_at_desc() {
        let (_dir, store) = store();
        let r1 = store.create(Resume::skeleton("first")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let r2 = store.create(Resume::skeleton("second")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let r3 = store.create(Resume::skeleton("third")).await.unwrap();

        let metas = store.list().await.unwrap();
        let ids: Vec<&str> = metas.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![r3.id.as_str(), r2.id.as_str(), r1.id.as_str()]);

        // Touching the oldest moves it to the front.
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.update(&r1.id, r1.clone()).await.unwrap();
        let metas = store.list().await.unwrap();
        assert_eq!(metas[0].id, r1.id);
    }

    #[tokio::test]
    async fn test_list_skips_unreadable_files() {
        let (_dir, store) = store();
        store.create(Resume::skeleton("Good")).await.unwrap();
        tokio::fs::write(store.root().join("broken.json"), b"{not json")
            .await
            .unwrap();

        let metas = store.list().await.unwrap();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].title, "Good");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store) = store();
        let created = store.create(Resume::skeleton("Doomed")).await.unwrap();
        store.delete(&created.id).await.unwrap();
        store.delete(&created.id).await.unwrap();
        assert!(matches!(
            store.get(&created.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_ids_are_unique_under_rapid_creation() {
        let (_dir, store) = store();
        let mut ids = Vec::new();
        for i in 0..5 {
            let r = store
                .create(Resume::skeleton(&format!("rapid {i}")))
                .await
                .unwrap();
            ids.push(r.id);
        }
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }
}
