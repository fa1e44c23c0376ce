//! Remembers the last read page per book.
//!
//! Each book gets a directory under the cache root named by a hash of its
//! identifier, which keeps arbitrary ids filesystem safe. The bookmark itself
//! is a tiny TOML file holding the page index and the page count it was taken
//! against.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const BOOKMARK_FILE: &str = "bookmark.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub page: usize,
    /// Number of pages the book had when the bookmark was written.
    #[serde(default)]
    pub page_count: usize,
}

impl Bookmark {
    /// Page index clamped into `[0, page_count - 1]`; `0` when there are no pages.
    pub fn clamped_page(&self, page_count: usize) -> usize {
        self.page.min(page_count.saturating_sub(1))
    }
}

#[derive(Debug, Clone)]
pub struct BookmarkStore {
    root: PathBuf,
}

impl BookmarkStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the bookmark for `book_id`, if one was saved and is readable.
    pub fn load(&self, book_id: &str) -> Option<Bookmark> {
        let path = self.bookmark_path(book_id);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) => {
                debug!(path = %path.display(), "No bookmark loaded: {err}");
                return None;
            }
        };
        match toml::from_str(&data) {
            Ok(bookmark) => Some(bookmark),
            Err(err) => {
                debug!(path = %path.display(), "Ignoring unreadable bookmark: {err}");
                None
            }
        }
    }

    /// Persist the current page for `book_id`.
    pub fn save(&self, book_id: &str, bookmark: Bookmark) -> Result<()> {
        let path = self.bookmark_path(book_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating bookmark dir {}", parent.display()))?;
        }
        let contents = toml::to_string(&bookmark).context("serializing bookmark")?;
        fs::write(&path, contents)
            .with_context(|| format!("writing bookmark {}", path.display()))?;
        debug!(book = book_id, page = bookmark.page, "Saved bookmark");
        Ok(())
    }

    pub fn book_dir(&self, book_id: &str) -> PathBuf {
        self.root.join(hash_id(book_id))
    }

    fn bookmark_path(&self, book_id: &str) -> PathBuf {
        self.book_dir(book_id).join(BOOKMARK_FILE)
    }
}

fn hash_id(book_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(book_id.as_bytes());
    format!("{:x}", hasher.finalize())
}
