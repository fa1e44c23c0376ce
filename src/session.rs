//! Reader session state.
//!
//! Holds the text of one open book, its pages for the current budget and the
//! page being read. Nothing here touches the disk; callers persist the
//! position through [`crate::cache::BookmarkStore`] using [`ReaderSession::bookmark`].

use crate::cache::Bookmark;
use crate::pagination::paginate;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReaderSession {
    book_id: String,
    text: String,
    budget: usize,
    pages: Vec<String>,
    current_page: usize,
}

impl ReaderSession {
    /// Paginate `text` and open it at page 0.
    pub fn new(book_id: impl Into<String>, text: String, budget: usize) -> Self {
        let pages = paginate(&text, budget);
        Self::from_pages(book_id, text, budget, pages)
    }

    /// Build a session from pages already computed for `text` at `budget`.
    pub fn from_pages(
        book_id: impl Into<String>,
        text: String,
        budget: usize,
        pages: Vec<String>,
    ) -> Self {
        let book_id = book_id.into();
        debug!(book = %book_id, budget, pages = pages.len(), "Opened reader session");
        Self {
            book_id,
            text,
            budget,
            pages,
            current_page: 0,
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Text of the page being read; `None` only for an empty book.
    pub fn current_text(&self) -> Option<&str> {
        self.pages.get(self.current_page).map(String::as_str)
    }

    /// Index of the last page, shown as the denominator in the page label.
    pub fn last_page(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    /// `current/last`, both zero based.
    pub fn page_label(&self) -> String {
        format!("{}/{}", self.current_page, self.last_page())
    }

    pub fn set_page_clamped(&mut self, page: usize) {
        if self.pages.is_empty() {
            self.current_page = 0;
        } else {
            self.current_page = page.min(self.last_page());
        }
    }

    /// Apply a saved bookmark, clamping it to the pages we have now.
    pub fn restore(&mut self, bookmark: Bookmark) {
        let page = bookmark.clamped_page(self.pages.len());
        if page != bookmark.page {
            debug!(
                saved = bookmark.page,
                saved_count = bookmark.page_count,
                clamped = page,
                "Saved page out of range for current pagination"
            );
        }
        self.current_page = page;
    }

    pub fn bookmark(&self) -> Bookmark {
        Bookmark {
            page: self.current_page,
            page_count: self.pages.len(),
        }
    }

    /// Move by `delta` pages. Moves that would leave the book are ignored;
    /// returns whether the page changed.
    pub fn step(&mut self, delta: isize) -> bool {
        let Some(next) = self.current_page.checked_add_signed(delta) else {
            return false;
        };
        if next == self.current_page || next >= self.pages.len() {
            return false;
        }
        self.current_page = next;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.step(1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.step(-1)
    }

    /// Recompute pages for a new budget and clamp the current page.
    ///
    /// The page index is kept as is; with the new budget it may point at
    /// different text.
    pub fn rebudget(&mut self, budget: usize) {
        if budget == self.budget {
            return;
        }
        self.pages = paginate(&self.text, budget);
        self.budget = budget;
        self.set_page_clamped(self.current_page);
        debug!(
            book = %self.book_id,
            budget,
            pages = self.pages.len(),
            page = self.current_page,
            "Repaginated reader session"
        );
    }
}
