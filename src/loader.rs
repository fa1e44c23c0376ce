//! Off-thread book loading.
//!
//! Multi-megabyte books take a noticeable moment to paginate, so the reader
//! does it on a worker thread. The engine has no notion of cancellation; the
//! worker checks the token between stages and between pages and drops what it
//! has built once the token is set.

use crate::book::load_book_text;
use crate::cancellation::CancellationToken;
use crate::normalizer::normalize;
use crate::pagination::Pages;
use anyhow::{Result, anyhow};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub book_id: String,
    pub path: PathBuf,
    pub page_budget: usize,
    pub normalize: bool,
}

#[derive(Debug, Clone)]
pub struct LoadedBook {
    pub book_id: String,
    pub path: PathBuf,
    /// Text the pages were cut from: normalized when the request asked for it.
    pub text: String,
    pub pages: Vec<String>,
}

/// Read, optionally normalize and paginate a book on the calling thread.
///
/// Returns `Ok(None)` when `token` is cancelled before the work completes.
pub fn load(request: LoadRequest, token: &CancellationToken) -> Result<Option<LoadedBook>> {
    let started = Instant::now();
    let raw = load_book_text(&request.path)?;
    if token.is_cancelled() {
        debug!(book = %request.book_id, stage = "read", "Load cancelled");
        return Ok(None);
    }

    let text = if request.normalize {
        normalize(&raw)
    } else {
        raw
    };
    if token.is_cancelled() {
        debug!(book = %request.book_id, stage = "normalize", "Load cancelled");
        return Ok(None);
    }

    let mut pages = Vec::new();
    for page in Pages::new(&text, request.page_budget) {
        if token.is_cancelled() {
            debug!(
                book = %request.book_id,
                stage = "paginate",
                pages_done = pages.len(),
                "Load cancelled"
            );
            return Ok(None);
        }
        pages.push(page);
    }

    info!(
        book = %request.book_id,
        pages = pages.len(),
        budget = request.page_budget,
        normalized = request.normalize,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Book paginated"
    );
    Ok(Some(LoadedBook {
        book_id: request.book_id,
        path: request.path,
        text,
        pages,
    }))
}

/// Run [`load`] on a dedicated worker thread.
pub fn spawn_load(
    request: LoadRequest,
    token: CancellationToken,
) -> Result<JoinHandle<Result<Option<LoadedBook>>>> {
    thread::Builder::new()
        .name(format!("load-{}", request.book_id))
        .spawn(move || load(request, &token))
        .map_err(|err| anyhow!("failed to spawn book loader thread: {err}"))
}
