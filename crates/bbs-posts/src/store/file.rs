use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use bbs_core::replace_file;
use chrono::{DateTime, Utc};

use super::{PostStore, table::PostTable};
use crate::{Post, PostDraft, PostPatch, StoreError};

/// Post store backed by a JSON array on disk.
///
/// Every operation reads the file, so edits made by another process show up
/// on the next call. Mutations are read-modify-write under an in-process
/// lock; concurrent writers in other processes are not coordinated.
#[derive(Debug)]
pub struct FilePostStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePostStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An existing file must parse.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self { path: path.as_ref().to_path_buf(), lock: Mutex::new(()) };
        let rows = store.load()?.rows().len();
        tracing::debug!(path = %store.path.display(), rows, "post file opened");
        Ok(store)
    }

    /// Open the store at `path`, writing `posts` to it if the file is missing.
    pub fn open_or_seed(path: impl AsRef<Path>, posts: Vec<Post>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), count = posts.len(), "seeding post file");
            save(path, &PostTable::from_rows(posts))?;
        }
        Self::open(path)
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PostTable, StoreError> {
        if !self.path.exists() {
            return Ok(PostTable::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        let rows: Vec<Post> = serde_json::from_str(&raw)?;
        Ok(PostTable::from_rows(rows))
    }

    fn read<T>(&self, f: impl FnOnce(&PostTable) -> T) -> Result<T, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&self.load()?))
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut PostTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut table = self.load()?;
        let out = f(&mut table)?;
        save(&self.path, &table)?;
        Ok(out)
    }
}

/// Write the table as a JSON array, replacing the file atomically.
fn save(path: &Path, table: &PostTable) -> Result<(), StoreError> {
    replace_file(path, |file| {
        serde_json::to_writer_pretty(file, table.rows()).map_err(StoreError::from)
    })
}

impl PostStore for FilePostStore {
    fn list_published(&self) -> Result<Vec<Post>, StoreError> {
        self.read(PostTable::published)
    }

    fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        self.read(PostTable::all)
    }

    fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.read(|table| table.get(id))
    }

    fn create(&self, draft: PostDraft, now: DateTime<Utc>) -> Result<Post, StoreError> {
        let post = self.modify(|table| table.create(draft, now))?;
        tracing::debug!(id = %post.id, "post created");
        Ok(post)
    }

    fn update(&self, id: &str, patch: PostPatch, now: DateTime<Utc>) -> Result<Post, StoreError> {
        self.modify(|table| table.update(id, patch, now))
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let removed = self.modify(|table| Ok(table.delete(id)))?;
        if removed {
            tracing::debug!(id, "post deleted");
        }
        Ok(())
    }
}
