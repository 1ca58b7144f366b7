//! # scripture-index - Scripture and subject index compiler
//!
//! Builds the scripture index (or subject index) of a typeset book from the
//! page extractions a desktop publishing tool produces: tables that say which
//! references or subjects appear on which page.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`bible`] - Book table and the free-text reference parser
//! - [`index`] - Pages, entries, ingestion and compilation into headings
//! - [`render`] - Output templates (plain text, LaTeX, JSON)
//! - [`output`] - UTF-16 output and the run summary
//! - [`utils`] - Collation, languages and encodings
//!
//! ## Quick Start
//!
//! ```
//! use scripture_index::bible::parse_references;
//! use scripture_index::index::{IndexEntry, Mode, PageValue, compile};
//! use scripture_index::render::{RenderContext, Template, render};
//!
//! let mut entries = Vec::new();
//! for (text, page) in [("John 3:16", 12), ("Jn 3:16; Gen 1:1", 45)] {
//!     for reference in parse_references(text).expanded() {
//!         entries.push(IndexEntry::scripture(reference, &PageValue::from(page), None).unwrap());
//!     }
//! }
//!
//! let document = compile(entries, Mode::Scripture);
//! let text = render(&document, Template::Scripture, &RenderContext::default()).unwrap();
//! assert_eq!(text, "Genesis\n1:1\t45\n\nJohn\n3:16\t12,45\n");
//! ```
//!
//! ## Ordering
//!
//! Scripture entries sort in canonical book, chapter and verse order; subject
//! entries sort by a collation key that ignores case, diacritics, Arabic
//! harakat and punctuation. References whose book cannot be resolved are kept
//! and sorted after everything else.

pub mod bible;
pub mod error;
pub mod index;
pub mod output;
pub mod render;
pub mod utils;
