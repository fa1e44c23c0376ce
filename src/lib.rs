//! Pagination engine for hard-wrapped plaintext books, plus the small amount
//! of reader plumbing around it.
//!
//! The engine is two pure functions: [`normalize`] reflows 76-column source
//! text into paragraphs and [`paginate`] cuts text into line-aligned pages
//! that overlap by a few lines.

pub mod book;
pub mod cache;
pub mod cancellation;
pub mod command;
pub mod config;
pub mod loader;
pub mod normalizer;
pub mod pagination;
pub mod session;

pub use normalizer::normalize;
pub use pagination::{Pages, paginate};
