//! Structured scripture citations and their rendering

use crate::bible::books::Book;
use crate::utils::{Language, strip_for_collation};
use std::fmt;

/// Right-to-left mark placed after the chapter/verse colon in RTL output
pub const RTL_MARK: char = '\u{200F}';

/// Width that chapter and verse numbers are zero-padded to in sort keys
const KEY_NUMBER_WIDTH: usize = 3;

/// How the book name is written when a reference is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerseStyle {
    /// Abbreviated book name ("Jn")
    Brief,
    /// Full book name ("John")
    #[default]
    Standard,
    /// Book name exactly as it was written in the source text
    Text,
}

/// Target markup for rendered references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    Plain,
    /// Thin spaces between book, chapter and verse
    Latex,
}

impl Markup {
    fn space(&self) -> &'static str {
        match self {
            Markup::Plain => " ",
            Markup::Latex => "\\,",
        }
    }
}

/// A single scripture citation.
///
/// Chapter and verse are kept as written (with Western digits) so that verse
/// suffixes like `16a` and ranges like `16-18` survive. When the book or
/// chapter was carried forward from an earlier citation in the same text the
/// corresponding `*_hidden` flag is set and rendering leaves it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
    /// Resolved book, None when the name is unknown
    pub book: Option<&'static Book>,
    /// Book name as written, without any fused prefix
    pub book_text: String,
    /// Arabic proclitic that was fused to the book name (e.g. "و")
    pub book_prefix: Option<String>,
    pub chapter: Option<String>,
    /// Verse or verse list ("16", "16-18", "16, 18")
    pub verse: Option<String>,
    pub book_hidden: bool,
    pub chapter_hidden: bool,
    /// Source text this reference was parsed from
    pub raw: String,
}

impl VerseReference {
    /// Reference for text in which no citation could be recognised
    pub fn unresolved(raw: &str) -> Self {
        Self {
            book: None,
            book_text: String::new(),
            book_prefix: None,
            chapter: None,
            verse: None,
            book_hidden: false,
            chapter_hidden: false,
            raw: raw.trim().to_string(),
        }
    }

    /// Reference to a whole book
    pub fn book_only(book: &'static Book, book_text: &str) -> Self {
        Self {
            book: Some(book),
            book_text: book_text.to_string(),
            raw: book_text.to_string(),
            ..Self::unresolved("")
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.book.is_some()
    }

    pub fn book_number(&self) -> Option<u8> {
        self.book.map(|book| book.number)
    }

    /// Individual items of the verse designator, e.g. ["16", "18-20"]
    pub fn verse_list(&self) -> Vec<&str> {
        match &self.verse {
            Some(verse) => verse
                .split([',', '،'])
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Copy of this reference with the verse designator replaced
    pub fn with_verse(&self, verse: &str) -> Self {
        Self {
            verse: Some(verse.to_string()),
            ..self.clone()
        }
    }

    /// Split a verse list into one reference per item.
    ///
    /// Items after the first inherit book and chapter from the first.
    pub fn expand_verses(&self) -> Vec<VerseReference> {
        let verses = self.verse_list();
        if verses.len() <= 1 {
            return vec![self.clone()];
        }

        verses
            .iter()
            .enumerate()
            .map(|(i, verse)| {
                let mut reference = self.with_verse(verse);
                if i > 0 {
                    reference.book_hidden = true;
                    reference.chapter_hidden = true;
                }
                reference
            })
            .collect()
    }

    /// Copy with the carried-forward book and chapter made visible again
    pub fn revealed(&self) -> Self {
        Self {
            book_hidden: false,
            chapter_hidden: false,
            ..self.clone()
        }
    }

    /// Canonical sort key, None when the book is unresolved
    pub fn sort_key(&self) -> Option<String> {
        let book = self.book?;
        let mut key = format!("{:03}", book.number);
        self.push_key_suffix(&mut key);
        Some(key)
    }

    /// Sort key for a reference whose book could not be resolved.
    ///
    /// Starts with `char::MAX` so it orders after every resolved key, which
    /// always start with an ASCII digit.
    pub fn unresolved_key(&self) -> String {
        let mut key = String::from(char::MAX);
        let text = if self.book_text.trim().is_empty() && self.chapter.is_none() && self.verse.is_none() {
            &self.raw
        } else {
            &self.book_text
        };
        key.push_str(&strip_for_collation(text));
        self.push_key_suffix(&mut key);
        key
    }

    fn push_key_suffix(&self, key: &mut String) {
        if let Some(chapter) = &self.chapter {
            key.push('.');
            key.push_str(&pad_leading_number(chapter));
        }
        if let Some(verse) = &self.verse {
            key.push(':');
            key.push_str(&pad_leading_number(verse));
        }
    }

    /// Text of the reference inside its book heading: `3:16`, `16` for a
    /// single-chapter book, `23` for a chapter, the raw text if unresolved
    pub fn entry_text(&self, language: Language) -> String {
        let Some(book) = self.book else {
            return self.raw.clone();
        };

        let text = match (&self.chapter, &self.verse) {
            (Some(chapter), Some(_)) => {
                let mut text = chapter.clone();
                text.push(':');
                if language.is_rtl() {
                    text.push(RTL_MARK);
                }
                text.push_str(&self.joined_verses(language));
                text
            }
            (None, Some(_)) => self.joined_verses(language),
            (Some(chapter), None) => chapter.clone(),
            (None, None) => book.name_in(language).to_string(),
        };

        language.localize_digits(&text)
    }

    /// Render the citation as it would appear in running text
    pub fn render(&self, language: Language, style: VerseStyle, markup: Markup) -> String {
        let mut out = String::new();

        if !self.book_hidden && !self.chapter_hidden {
            if let Some(name) = self.book_name(language, style) {
                if let Some(prefix) = &self.book_prefix {
                    out.push_str(prefix);
                }
                match markup {
                    Markup::Plain => out.push_str(&name),
                    Markup::Latex => out.push_str(&name.replace(' ', "\\,")),
                }
            }
        }

        let chapter = self.chapter.as_ref().filter(|_| !self.chapter_hidden);
        if let Some(chapter) = chapter {
            if !out.is_empty() {
                out.push_str(markup.space());
            }
            out.push_str(chapter);
        }

        if self.verse.is_some() {
            if chapter.is_some() {
                out.push(':');
                if language.is_rtl() {
                    out.push(RTL_MARK);
                }
            } else if !out.is_empty() {
                out.push_str(markup.space());
            }
            out.push_str(&self.joined_verses(language));
        }

        if out.is_empty() {
            return self.raw.clone();
        }

        language.localize_digits(&out)
    }

    fn book_name(&self, language: Language, style: VerseStyle) -> Option<String> {
        let written = Some(self.book_text.clone()).filter(|t| !t.is_empty());
        match (style, self.book) {
            (VerseStyle::Text, _) | (_, None) => written,
            (VerseStyle::Brief, Some(book)) => Some(book.abbrev_in(language).to_string()),
            (VerseStyle::Standard, Some(book)) => Some(book.name_in(language).to_string()),
        }
    }

    fn joined_verses(&self, language: Language) -> String {
        let separator = format!("{} ", language.list_separator());
        self.verse_list().join(&separator)
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .revealed()
            .render(Language::English, VerseStyle::Standard, Markup::Plain);
        f.write_str(&text)
    }
}

/// Zero-pad the leading run of digits, keeping any remainder (`16a` → `016a`)
pub fn pad_leading_number(text: &str) -> String {
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    let (number, rest) = text.split_at(end);
    if number.is_empty() {
        return text.to_string();
    }
    format!("{:0>width$}{}", number, rest, width = KEY_NUMBER_WIDTH)
}
