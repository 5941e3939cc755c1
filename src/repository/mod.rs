//! JSON-backed persistence for analyzed documents.
//!
//! The whole collection lives in one file holding a JSON array. It is read
//! once when the store is opened; every mutation rewrites the file wholesale
//! and atomically (temp file + rename) while holding a single-writer lock.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::AnalyzedDocument;

/// Errors that can occur reading or writing the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The persisted collection of analyzed documents.
pub struct DocumentStore {
    path: PathBuf,
    documents: Mutex<Vec<AnalyzedDocument>>,
}

impl DocumentStore {
    /// Open a store, reading the backing file if it exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let documents = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };
        Ok(Self {
            path,
            documents: Mutex::new(documents),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored documents, newest first.
    pub async fn list(&self) -> Vec<AnalyzedDocument> {
        let mut documents = self.documents.lock().await.clone();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        documents
    }

    /// Look up a document by id.
    pub async fn get(&self, id: &str) -> Option<AnalyzedDocument> {
        self.documents
            .lock()
            .await
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
    }

    /// Look up a document by content hash.
    pub async fn find_by_hash(&self, content_hash: &str) -> Option<AnalyzedDocument> {
        if content_hash.is_empty() {
            return None;
        }
        self.documents
            .lock()
            .await
            .iter()
            .find(|doc| doc.content_hash == content_hash)
            .cloned()
    }

    /// Insert a document, or replace the stored record with the same id.
    pub async fn upsert(&self, document: AnalyzedDocument) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().await;
        match documents.iter_mut().find(|doc| doc.id == document.id) {
            Some(slot) => *slot = document,
            None => documents.push(document),
        }
        self.persist(&documents)
    }

    /// Delete a document by id. Returns false when no record matched.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut documents = self.documents.lock().await;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        if documents.len() == before {
            return Ok(false);
        }
        self.persist(&documents)?;
        Ok(true)
    }

    /// Create the backing file if it does not exist yet.
    pub async fn ensure_created(&self) -> Result<(), StoreError> {
        let documents = self.documents.lock().await;
        if !self.path.exists() {
            self.persist(&documents)?;
        }
        Ok(())
    }

    /// Rewrite the whole store atomically.
    fn persist(&self, documents: &[AnalyzedDocument]) -> Result<(), StoreError> {
        use std::io::Write;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };

        let json = serde_json::to_string_pretty(documents)?;
        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(json.as_bytes())?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(
            "Persisted {} documents to {}",
            documents.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentAnalysis;

    fn sample_document(name: &str, text: &str) -> AnalyzedDocument {
        AnalyzedDocument::new(
            name.to_string(),
            AnalyzedDocument::compute_hash(text.as_bytes()),
            text.to_string(),
            None,
            DocumentAnalysis::fallback(),
        )
    }

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path().join("documents.json")).unwrap();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let store = DocumentStore::open(&path).unwrap();
        let doc = sample_document("a.txt", "alpha");
        store.upsert(doc.clone()).await.unwrap();

        let reopened = DocumentStore::open(&path).unwrap();
        let listed = reopened.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], doc);
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path().join("documents.json")).unwrap();

        let mut doc = sample_document("a.txt", "alpha");
        store.upsert(doc.clone()).await.unwrap();

        doc.summary = "replaced".to_string();
        store.upsert(doc.clone()).await.unwrap();

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].summary, "replaced");
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path().join("documents.json")).unwrap();

        let doc = sample_document("a.txt", "alpha");
        store.upsert(doc.clone()).await.unwrap();

        assert!(store.delete(&doc.id).await.unwrap());
        assert!(!store.delete(&doc.id).await.unwrap());
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_hash() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path().join("documents.json")).unwrap();

        let doc = sample_document("a.txt", "alpha");
        store.upsert(doc.clone()).await.unwrap();

        let found = store.find_by_hash(&doc.content_hash).await.unwrap();
        assert_eq!(found.id, doc.id);
        assert!(store.find_by_hash("").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            DocumentStore::open(&path),
            Err(StoreError::Corrupt(_))
        ));
    }
}
