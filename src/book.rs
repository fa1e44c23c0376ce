//! Plaintext book loading.
//!
//! Reading the file is the only fallible step before pagination, so every
//! failure here carries the path and is reported before the engine runs.

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Read a downloaded book into memory.
///
/// Gutenberg mirrors still serve some Latin-1 files; bytes that are not valid
/// UTF-8 are replaced rather than rejected.
pub fn load_book_text(path: &Path) -> Result<String> {
    info!(path = %path.display(), "Loading plain text content");
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                path = %path.display(),
                valid_up_to = err.utf8_error().valid_up_to(),
                "Book is not valid UTF-8; decoding lossily"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    info!(total_chars = text.len(), "Finished loading plain text content");
    Ok(text)
}

/// Identifier used to key per-book state: the file stem, e.g. `1342` for
/// `books/b-1342/1342.txt`.
pub fn book_id_for(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| anyhow!("Cannot derive a book id from {}", path.display()))
}
