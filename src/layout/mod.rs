//! Page layout hierarchy
//!
//! The typed model of an upstream structured-text snapshot, plus the parsing
//! that builds it:
//!
//! ```text
//! Page  (height, width, page_number)
//! └── Block  (bbox, index)
//!     └── Line  (bbox)
//!         └── Span  (bbox, text)
//! ```
//!
//! Everything is owned top-down and immutable once built. Reading order is
//! whatever the engine reported; nothing here re-sorts or de-duplicates.

mod parse;
mod types;

pub use parse::{pages_from_json, parse_page, parse_pages};
pub use types::{Block, Line, Page, Span};
