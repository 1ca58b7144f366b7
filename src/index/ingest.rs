//! Reading page extraction files into a flat list of index entries.
//!
//! Each input file is a delimited table with a `page` column, an optional
//! `note_num` column and exactly one of:
//!
//! - `text`: free text holding scripture references (scripture mode only)
//! - `entry`: `item[|subitem]` subject entries
//!
//! A file that cannot be read, lacks the required columns or holds a page
//! value that is not a number is skipped as a whole; the remaining files are
//! still ingested.

use crate::bible::parse_references;
use crate::error::{IndexError, Result};
use crate::index::entry::{IndexEntry, SubjectEntry};
use crate::index::pages::PageValue;
use crate::index::types::{IndexConfig, Mode};
use crate::utils::decode_input;
use crate::utils::progress::{ProgressBar, ProgressStyle};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PAGE_COLUMN: &str = "page";
const NOTE_COLUMN: &str = "note_num";
const TEXT_COLUMN: &str = "text";
const ENTRY_COLUMN: &str = "entry";

/// Extensions of files read as tab-separated
const TAB_EXTENSIONS: [&str; 3] = ["tsv", "tab", "txt"];

/// Entries read from all input files, and the files that were skipped
#[derive(Debug, Default)]
pub struct Ingested {
    pub entries: Vec<IndexEntry>,
    pub skipped: Vec<SkippedFile>,
    pub files_read: usize,
}

/// An input file that contributed nothing, with the reason
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: IndexError,
}

/// Which content column a file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    Text(usize),
    Entry(usize),
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct Columns {
    page: usize,
    note: Option<usize>,
    content: Content,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{FEFF}').trim().eq_ignore_ascii_case(name))
        };

        let page = find(PAGE_COLUMN).ok_or_else(|| IndexError::missing_column(PAGE_COLUMN))?;
        let content = match (find(TEXT_COLUMN), find(ENTRY_COLUMN)) {
            (Some(text), None) => Content::Text(text),
            (None, Some(entry)) => Content::Entry(entry),
            (Some(_), Some(_)) => {
                return Err(IndexError::input(format!(
                    "expected one of the '{}' and '{}' columns, found both",
                    TEXT_COLUMN, ENTRY_COLUMN
                )));
            }
            (None, None) => {
                return Err(IndexError::missing_column(&format!(
                    "{}' or '{}",
                    TEXT_COLUMN, ENTRY_COLUMN
                )));
            }
        };

        Ok(Self {
            page,
            note: find(NOTE_COLUMN),
            content,
        })
    }
}

/// Field delimiter chosen from the file extension
pub fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if TAB_EXTENSIONS.contains(&ext.as_str()) {
        b'\t'
    } else {
        b','
    }
}

/// Ingest every file, skipping (and recording) those that fail
pub fn ingest_files(paths: &[PathBuf], mode: Mode, config: &IndexConfig) -> Ingested {
    ingest_files_with_progress(paths, mode, config, true)
}

/// Ingest every file, showing a progress bar on stderr unless `silent`
pub fn ingest_files_with_progress(
    paths: &[PathBuf],
    mode: Mode,
    config: &IndexConfig,
    silent: bool,
) -> Ingested {
    let progress_bar = if !silent {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░  "),
        );
        pb.set_message("Reading input files...");
        Some(pb)
    } else {
        None
    };

    let mut ingested = Ingested::default();

    for path in paths {
        match read_file(path, mode, config) {
            Ok(entries) => {
                info!(path = %path.display(), entries = entries.len(), "read input file");
                ingested.files_read += 1;
                ingested.entries.extend(entries);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping input file");
                ingested.skipped.push(SkippedFile {
                    path: path.clone(),
                    error,
                });
            }
        }

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    ingested
}

/// Read one input file into entries
pub fn read_file(path: &Path, mode: Mode, config: &IndexConfig) -> Result<Vec<IndexEntry>> {
    let bytes = fs::read(path).map_err(|e| {
        IndexError::input(format!("cannot read {}", path.display())).with_source(e)
    })?;
    let content = decode_input(&bytes)?;
    read_records(&content, delimiter_for(path), mode, config)
}

/// Parse delimited `content` into entries
pub fn read_records(
    content: &str,
    delimiter: u8,
    mode: Mode,
    config: &IndexConfig,
) -> Result<Vec<IndexEntry>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let columns = Columns::from_headers(reader.headers()?)?;

    if mode == Mode::Subject && matches!(columns.content, Content::Text(_)) {
        return Err(IndexError::input(
            "a scripture text file cannot feed a subject index",
        ));
    }

    let mut entries = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = i + 2;
        let row = read_row(&record, &columns, mode, config).map_err(|e| {
            IndexError::new(e.kind, format!("line {}: {}", line, e.message)).with_source(e)
        })?;
        entries.extend(row);
    }

    Ok(entries)
}

fn read_row(
    record: &StringRecord,
    columns: &Columns,
    mode: Mode,
    config: &IndexConfig,
) -> Result<Vec<IndexEntry>> {
    let field = |index: usize| record.get(index).unwrap_or("");

    let note = columns.note.map(field).filter(|n| !n.is_empty());
    let page = PageValue::from(field(columns.page)).to_page(note)?;
    let location = PageValue::Page(page);

    match columns.content {
        Content::Text(index) => scripture_entries(field(index), &location),
        Content::Entry(index) => {
            let text = field(index);
            if text.is_empty() {
                return Ok(Vec::new());
            }

            let subject = SubjectEntry::parse(text);
            let is_scripture = config.is_scripture_keyword(&subject.item);

            match (mode, is_scripture) {
                (Mode::Scripture, true) => {
                    scripture_entries(subject.subitem.as_deref().unwrap_or(""), &location)
                }
                (Mode::Subject, false) => Ok(vec![IndexEntry::subject(text, &location, None)?]),
                (Mode::Subject, true) => {
                    debug!(entry = text, "dropping scripture entry from subject index");
                    Ok(Vec::new())
                }
                (Mode::Scripture, false) => {
                    debug!(entry = text, "skipping subject entry in scripture index");
                    Ok(Vec::new())
                }
            }
        }
    }
}

/// One entry per reference (and per verse of a verse list) in `text`
fn scripture_entries(text: &str, location: &PageValue) -> Result<Vec<IndexEntry>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let list = parse_references(text);
    if !list.in_index {
        debug!(text, "reference marked as not indexed");
        return Ok(Vec::new());
    }

    list.expanded()
        .into_iter()
        .map(|reference| IndexEntry::scripture(reference, location, None))
        .collect()
}
