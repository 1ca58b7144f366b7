//! Page locations and their compaction into ranges.
//!
//! A [`Page`] is a page number plus an optional footnote number on that page.
//! [`Pages`] is the duplicate-free set of locations attached to one index
//! entry; [`Pages::compact`] collapses runs of consecutive plain pages into
//! [`PageRange`]s. Footnote locations are never folded into a range.

use crate::error::{IndexError, Result};
use crate::utils::{Language, to_western_digits};
use std::fmt;
use std::str::FromStr;

/// Zero-padded width of the page number in a sort key
const PAGE_KEY_WIDTH: usize = 6;

/// Zero-padded width of the footnote number in a sort key
const NOTE_KEY_WIDTH: usize = 3;

/// Marker between page and footnote number, both in keys and in display
pub const NOTE_MARKER: char = 'n';

/// Upper bound on pages a parsed range may expand to
const MAX_RANGE_SPAN: u32 = 100_000;

/// A single location: page number and optional footnote number.
///
/// Ordering and equality agree with [`Page::sort_key`]: page number first,
/// a plain page before any of its footnotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Page {
    number: u32,
    note: Option<u32>,
}

impl Page {
    /// Create a location; a footnote number of 0 means "no footnote"
    pub fn new(number: u32, note: Option<u32>) -> Self {
        Self {
            number,
            note: note.filter(|&n| n != 0),
        }
    }

    pub fn plain(number: u32) -> Self {
        Self::new(number, None)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn note(&self) -> Option<u32> {
        self.note
    }

    /// Whether this location is a page without a footnote
    pub fn is_plain(&self) -> bool {
        self.note.is_none()
    }

    /// Parse a page field and optional footnote field from an input row.
    ///
    /// The literal `null` stands for page 0; an empty footnote field means no
    /// footnote. Anything else must be a non-negative integer.
    pub fn parse(page: &str, note: Option<&str>) -> Result<Self> {
        if page.trim().is_empty() {
            return Err(IndexError::page("missing page number"));
        }
        let number = parse_number(page, "page")?.unwrap_or(0);
        let note = match note {
            Some(text) => parse_number(text, "footnote")?,
            None => None,
        };
        Ok(Self::new(number, note))
    }

    /// Fixed-width key that sorts locations in page order
    pub fn sort_key(&self) -> String {
        match self.note {
            Some(note) => format!(
                "{:0pw$}{}{:0nw$}",
                self.number,
                NOTE_MARKER,
                note,
                pw = PAGE_KEY_WIDTH,
                nw = NOTE_KEY_WIDTH
            ),
            None => format!("{:0pw$}", self.number, pw = PAGE_KEY_WIDTH),
        }
    }
}

/// Parse a numeric field; `Ok(None)` for an empty or `null` field
fn parse_number(text: &str, what: &str) -> Result<Option<u32>> {
    let text = to_western_digits(text.trim());
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    text.parse::<u32>()
        .map(Some)
        .map_err(|e| IndexError::page(format!("invalid {} number {:?}", what, text)).with_source(e))
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.note {
            Some(note) => write!(f, "{}{}{}", self.number, NOTE_MARKER, note),
            None => write!(f, "{}", self.number),
        }
    }
}

impl FromStr for Page {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("null") {
            return Page::parse(s, None);
        }
        match s.split_once(NOTE_MARKER) {
            Some((page, note)) => Page::parse(page, Some(note)),
            None => Page::parse(s, None),
        }
    }
}

/// Raw page value as it arrives from ingestion or a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageValue {
    Number(u32),
    Text(String),
    Page(Page),
}

impl PageValue {
    /// Resolve to a location, applying an optional footnote field
    pub fn to_page(&self, note: Option<&str>) -> Result<Page> {
        match self {
            PageValue::Number(n) => Ok(Page::new(*n, parse_note(note)?)),
            PageValue::Text(text) => Page::parse(text, note),
            PageValue::Page(page) => match parse_note(note)? {
                Some(n) => Ok(Page::new(page.number, Some(n))),
                None => Ok(*page),
            },
        }
    }
}

fn parse_note(note: Option<&str>) -> Result<Option<u32>> {
    match note {
        Some(text) => parse_number(text, "footnote"),
        None => Ok(None),
    }
}

impl From<u32> for PageValue {
    fn from(n: u32) -> Self {
        PageValue::Number(n)
    }
}

impl From<&str> for PageValue {
    fn from(s: &str) -> Self {
        PageValue::Text(s.to_string())
    }
}

impl From<String> for PageValue {
    fn from(s: String) -> Self {
        PageValue::Text(s)
    }
}

impl From<Page> for PageValue {
    fn from(page: Page) -> Self {
        PageValue::Page(page)
    }
}

/// Inclusive run of consecutive plain pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: Page,
    end: Page,
}

impl PageRange {
    /// Single-page range
    pub fn new(start: Page) -> Self {
        Self { start, end: start }
    }

    pub fn start(&self) -> Page {
        self.start
    }

    pub fn end(&self) -> Page {
        self.end
    }

    /// Whether `page` directly follows the end of this range
    pub fn is_next(&self, page: &Page) -> bool {
        page.is_plain() && self.end.number.checked_add(1) == Some(page.number)
    }

    pub fn extend(&mut self, page: Page) {
        self.end = page;
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Every page covered by the range
    pub fn pages(&self) -> impl Iterator<Item = Page> {
        (self.start.number..=self.end.number).map(Page::plain)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// One token of a compacted location list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSpan {
    Single(Page),
    Range(PageRange),
}

impl From<PageRange> for PageSpan {
    fn from(range: PageRange) -> Self {
        if range.is_single() {
            PageSpan::Single(range.start)
        } else {
            PageSpan::Range(range)
        }
    }
}

impl fmt::Display for PageSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSpan::Single(page) => write!(f, "{}", page),
            PageSpan::Range(range) => write!(f, "{}", range),
        }
    }
}

/// Duplicate-free set of locations, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pages {
    items: Vec<Page>,
}

impl Pages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a location; returns false if an equal one is already present
    pub fn append(&mut self, page: Page) -> bool {
        if self.items.contains(&page) {
            return false;
        }
        self.items.push(page);
        true
    }

    /// Absorb every location of `other`
    pub fn append_all(&mut self, other: &Pages) {
        for page in &other.items {
            self.append(*page);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.items.iter()
    }

    pub fn contains(&self, page: &Page) -> bool {
        self.items.contains(page)
    }

    /// Locations in page order
    pub fn sorted(&self) -> Vec<Page> {
        let mut pages = self.items.clone();
        pages.sort();
        pages
    }

    /// Sort, then collapse runs of consecutive plain pages into ranges.
    ///
    /// A footnote location is emitted on its own and ends any open range, so
    /// it stays distinguishable from the plain page it sits on.
    pub fn compact(&self) -> Vec<PageSpan> {
        let mut spans = Vec::with_capacity(self.items.len());
        let mut open: Option<PageRange> = None;

        for page in self.sorted() {
            if !page.is_plain() {
                if let Some(range) = open.take() {
                    spans.push(range.into());
                }
                spans.push(PageSpan::Single(page));
                continue;
            }

            match open.as_mut() {
                Some(range) if range.is_next(&page) => range.extend(page),
                _ => {
                    if let Some(range) = open.replace(PageRange::new(page)) {
                        spans.push(range.into());
                    }
                }
            }
        }

        if let Some(range) = open {
            spans.push(range.into());
        }

        spans
    }

    /// Compacted list joined with the language's separator and digits
    pub fn render(&self, language: Language) -> String {
        let joined = self
            .compact()
            .iter()
            .map(|span| span.to_string())
            .collect::<Vec<_>>()
            .join(language.list_separator());
        language.localize_digits(&joined)
    }
}

impl From<Page> for Pages {
    fn from(page: Page) -> Self {
        Self { items: vec![page] }
    }
}

impl FromIterator<Page> for Pages {
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        let mut pages = Pages::new();
        for page in iter {
            pages.append(page);
        }
        pages
    }
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Language::English))
    }
}

impl FromStr for Pages {
    type Err = IndexError;

    /// Parse a rendered location list such as `3,7-9,12n2` (or `،`-separated)
    fn from_str(s: &str) -> Result<Self> {
        let text = to_western_digits(s);
        let mut pages = Pages::new();

        for token in text.split([',', '،']).map(str::trim).filter(|t| !t.is_empty()) {
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = Page::parse(start, None)?;
                    let end = Page::parse(end, None)?;
                    if end.number < start.number || end.number - start.number > MAX_RANGE_SPAN {
                        return Err(IndexError::page(format!("invalid page range {:?}", token)));
                    }
                    let mut range = PageRange::new(start);
                    range.extend(end);
                    for page in range.pages() {
                        pages.append(page);
                    }
                }
                None => {
                    pages.append(token.parse()?);
                }
            }
        }

        Ok(pages)
    }
}
