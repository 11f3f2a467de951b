//! Local persistent storage for slide documents.
//!
//! [`DocumentStore`] keeps every saved document in a single JSON file:
//!
//! ```text
//! {dir}/
//! +-- documents.json     # array of documents
//! ```
//!
//! Documents are keyed by a UUID and unique by title: saving under an
//! existing title updates that document in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File name of the document index inside the store directory.
const DOCUMENTS_FILE: &str = "documents.json";

/// A saved markdown document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Markdown source.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Document store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Documents could not be encoded.
    #[error("Failed to serialize documents: {0}")]
    Serialize(#[from] serde_json::Error),
    /// No document has the given id.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// Another document already uses the title.
    #[error("A document titled {0:?} already exists")]
    TitleTaken(String),
    /// Titles must contain non-whitespace characters.
    #[error("Document title cannot be empty")]
    EmptyTitle,
}

/// JSON-file backed document store.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    /// Open a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(DOCUMENTS_FILE),
        }
    }

    /// Path of the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All documents, most recently updated first.
    ///
    /// A missing file is an empty store. An unreadable file is logged and
    /// treated as empty; a corrupt one is also renamed to
    /// `documents.json.corrupt`.
    #[must_use]
    pub fn list(&self) -> Vec<Document> {
        let mut documents = self.load();
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        documents
    }

    /// Look up a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Document> {
        self.load().into_iter().find(|doc| doc.id == id)
    }

    /// Save `content` under `title`.
    ///
    /// Updates the document with the same title if there is one, otherwise
    /// creates a new document.
    pub fn save(&self, title: &str, content: &str) -> Result<Document, StoreError> {
        let title = normalize_title(title)?;
        let mut documents = self.load();
        let now = Utc::now();

        let document = if let Some(existing) = documents.iter_mut().find(|doc| doc.title == title)
        {
            content.clone_into(&mut existing.content);
            existing.updated_at = now;
            existing.clone()
        } else {
            let document = Document {
                id: Uuid::new_v4().to_string(),
                title: title.to_owned(),
                content: content.to_owned(),
                created_at: now,
                updated_at: now,
            };
            documents.push(document.clone());
            document
        };

        self.write(&documents)?;
        tracing::debug!(id = %document.id, title = %document.title, "Saved document");
        Ok(document)
    }

    /// Delete a document. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut documents = self.load();
        let before = documents.len();
        documents.retain(|doc| doc.id != id);

        if documents.len() == before {
            return Ok(false);
        }
        self.write(&documents)?;
        Ok(true)
    }

    /// Change the title of a document.
    pub fn rename(&self, id: &str, title: &str) -> Result<Document, StoreError> {
        let title = normalize_title(title)?;
        let mut documents = self.load();

        if documents.iter().any(|doc| doc.id != id && doc.title == title) {
            return Err(StoreError::TitleTaken(title.to_owned()));
        }
        let document = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;

        title.clone_into(&mut document.title);
        document.updated_at = Utc::now();
        let renamed = document.clone();

        self.write(&documents)?;
        Ok(renamed)
    }

    fn load(&self) -> Vec<Document> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read document store");
                return Vec::new();
            }
        };

        serde_json::from_slice(&data).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Corrupt document store, ignoring");
            self.set_aside_corrupt();
            Vec::new()
        })
    }

    /// Move an unparseable store file out of the way so the next write
    /// cannot destroy it.
    fn set_aside_corrupt(&self) {
        let backup = self.path.with_extension("json.corrupt");
        match fs::rename(&self.path, &backup) {
            Ok(()) => {
                tracing::warn!(backup = %backup.display(), "Moved corrupt document store aside");
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to move corrupt document store");
            }
        }
    }

    /// Write all documents atomically (temp file, then rename).
    fn write(&self, documents: &[Document]) -> Result<(), StoreError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_err(dir))?;
        }

        let json = serde_json::to_vec_pretty(documents)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))?;
        Ok(())
    }
}

fn normalize_title(title: &str) -> Result<&str, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store() -> (TempDir, DocumentStore) {
        let tmp = TempDir::new().unwrap();
        let store = DocumentStore::open(tmp.path().join("store"));
        (tmp, store)
    }

    #[test]
    fn test_empty_store() {
        let (_tmp, store) = store();
        assert!(store.list().is_empty());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_save_creates_document() {
        let (_tmp, store) = store();
        let doc = store.save("Talk", "# Hello").unwrap();

        assert_eq!(doc.title, "Talk");
        assert_eq!(doc.content, "# Hello");
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(Uuid::parse_str(&doc.id).is_ok());
        assert_eq!(store.get(&doc.id), Some(doc));
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_same_title_updates() {
        let (_tmp, store) = store();
        let first = store.save("Talk", "v1").unwrap();
        let second = store.save("  Talk ", "v2").unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.content, "v2");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_save_empty_title_rejected() {
        let (_tmp, store) = store();
        assert!(matches!(store.save("  ", "x"), Err(StoreError::EmptyTitle)));
    }

    #[test]
    fn test_list_newest_first() {
        let (_tmp, store) = store();
        let json = r##"[
            {"id":"a","title":"Old","content":"","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"},
            {"id":"b","title":"New","content":"","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-03-01T00:00:00Z"},
            {"id":"c","title":"Mid","content":"","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-02-01T00:00:00Z"}
        ]"##;
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), json).unwrap();

        let titles: Vec<_> = store.list().into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let (_tmp, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert!(store.list().is_empty());
        // The store recovers on the next save
        store.save("Fresh", "x").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_corrupt_file_preserved_across_save() {
        let (_tmp, store) = store();
        let dir = store.path().parent().unwrap().to_path_buf();
        fs::create_dir_all(&dir).unwrap();
        fs::write(store.path(), "[{\"id\": truncated").unwrap();

        store.save("Fresh", "x").unwrap();

        let backup = dir.join("documents.json.corrupt");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "[{\"id\": truncated");
        let titles: Vec<_> = store.list().into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["Fresh"]);
    }

    #[test]
    fn test_delete() {
        let (_tmp, store) = store();
        let doc = store.save("Talk", "x").unwrap();

        assert!(store.delete(&doc.id).unwrap());
        assert!(!store.delete(&doc.id).unwrap());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_rename() {
        let (_tmp, store) = store();
        let doc = store.save("Draft", "x").unwrap();

        let renamed = store.rename(&doc.id, "Final").unwrap();
        assert_eq!(renamed.id, doc.id);
        assert_eq!(renamed.title, "Final");
        assert_eq!(store.get(&doc.id).unwrap().title, "Final");
    }

    #[test]
    fn test_rename_to_own_title() {
        let (_tmp, store) = store();
        let doc = store.save("Same", "x").unwrap();
        assert!(store.rename(&doc.id, "Same").is_ok());
    }

    #[test]
    fn test_rename_unknown_id() {
        let (_tmp, store) = store();
        let err = store.rename("nope", "Title").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == "nope"));
    }

    #[test]
    fn test_rename_title_taken() {
        let (_tmp, store) = store();
        store.save("One", "1").unwrap();
        let two = store.save("Two", "2").unwrap();

        let err = store.rename(&two.id, "One").unwrap_err();
        assert!(matches!(err, StoreError::TitleTaken(_)));
        assert_eq!(store.get(&two.id).unwrap().title, "Two");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (_tmp, store) = store();
        store.save("Talk", "x").unwrap();
        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(DOCUMENTS_FILE)]);
    }
}
