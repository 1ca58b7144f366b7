//! Utility functions shared by the index pipeline.
//!
//! ## Modules
//!
//! - [`collation`] - Script detection and collation keys
//! - [`language`] - Output languages, text direction and digit conversion
//! - [`encoding`] - UTF-16 output and BOM-aware input decoding
//! - [`progress`] - Progress bars (no-op without the `progress` feature)
//!
//! ## Key Functions
//!
//! ```
//! use scripture_index::utils::{strip_for_collation, to_arabic_indic};
//!
//! // Collation keys ignore case, accents and punctuation
//! assert_eq!(strip_for_collation("Élie, the prophet"), "elie the prophet");
//!
//! // Digits follow the output language
//! assert_eq!(to_arabic_indic("3:16"), "٣:١٦");
//! ```

pub mod collation;
pub mod encoding;
pub mod language;
pub mod progress;

pub use collation::*;
pub use encoding::*;
pub use language::*;
