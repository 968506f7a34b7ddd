//! `web-sys` implementations of the workflow's browser seams.

mod document;

pub use document::BrowserDocument;
