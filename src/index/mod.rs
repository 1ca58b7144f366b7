pub mod compile;
pub mod entry;
pub mod ingest;
pub mod pages;
pub mod types;

pub use compile::*;
pub use entry::*;
pub use ingest::{Ingested, SkippedFile, ingest_files, ingest_files_with_progress, read_file};
pub use pages::*;
pub use types::*;
