//! Index entries: a scripture citation or a subject, plus its locations

use crate::bible::{Markup, VerseReference, VerseStyle};
use crate::error::Result;
use crate::index::pages::{PageValue, Pages};
use crate::index::types::SUBJECT_KEY_WIDTH;
use crate::utils::{Language, justify, strip_for_collation};
use tracing::warn;

/// Separator between item and subitem in an `entry` field
pub const SUBITEM_SEPARATOR: char = '|';

/// A subject heading with an optional subheading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectEntry {
    pub item: String,
    pub subitem: Option<String>,
}

impl SubjectEntry {
    /// Split `item|subitem` on the first separator
    pub fn parse(text: &str) -> Self {
        let (item, subitem) = match text.split_once(SUBITEM_SEPARATOR) {
            Some((item, subitem)) => (item, Some(subitem.trim())),
            None => (text, None),
        };

        Self {
            item: item.trim().to_string(),
            subitem: subitem.filter(|s| !s.is_empty()).map(String::from),
        }
    }

    /// Collation key: item and subitem each padded to a fixed width so that
    /// an item sorts before its own subitems and before longer items
    pub fn sort_key(&self) -> String {
        let mut key = justify(&strip_for_collation(&self.item), SUBJECT_KEY_WIDTH);
        if let Some(subitem) = &self.subitem {
            key.push(SUBITEM_SEPARATOR);
            key.push_str(&justify(&strip_for_collation(subitem), SUBJECT_KEY_WIDTH));
        }
        key
    }
}

/// What an index entry cites
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Scripture(VerseReference),
    Subject(SubjectEntry),
}

/// One line of the index before grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    kind: EntryKind,
    pages: Pages,
    key: String,
}

impl IndexEntry {
    /// Scripture entry at `page` (with optional footnote field `note`)
    pub fn scripture(reference: VerseReference, page: &PageValue, note: Option<&str>) -> Result<Self> {
        let page = page.to_page(note)?;
        Ok(Self::new(EntryKind::Scripture(reference), Pages::from(page)))
    }

    /// Subject entry from an `item[|subitem]` field
    pub fn subject(text: &str, page: &PageValue, note: Option<&str>) -> Result<Self> {
        let page = page.to_page(note)?;
        Ok(Self::new(
            EntryKind::Subject(SubjectEntry::parse(text)),
            Pages::from(page),
        ))
    }

    pub fn new(kind: EntryKind, pages: Pages) -> Self {
        let key = match &kind {
            EntryKind::Scripture(reference) => reference.sort_key().unwrap_or_else(|| {
                warn!(reference = %reference.raw, "unresolved scripture reference, sorting it last");
                reference.unresolved_key()
            }),
            EntryKind::Subject(subject) => subject.sort_key(),
        };

        Self { kind, pages, key }
    }

    /// Sort key; equal keys are merged into one entry
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn reference(&self) -> Option<&VerseReference> {
        match &self.kind {
            EntryKind::Scripture(reference) => Some(reference),
            EntryKind::Subject(_) => None,
        }
    }

    pub fn subject_entry(&self) -> Option<&SubjectEntry> {
        match &self.kind {
            EntryKind::Subject(subject) => Some(subject),
            EntryKind::Scripture(_) => None,
        }
    }

    /// Canonical book number, None for subjects and unresolved references
    pub fn book_number(&self) -> Option<u8> {
        self.reference().and_then(VerseReference::book_number)
    }

    pub fn item(&self) -> Option<&str> {
        self.subject_entry().map(|s| s.item.as_str())
    }

    pub fn subitem(&self) -> Option<&str> {
        self.subject_entry().and_then(|s| s.subitem.as_deref())
    }

    pub fn has_subitem(&self) -> bool {
        self.subitem().is_some()
    }

    /// Text shown on the entry's line under its heading
    pub fn entry_text(&self, language: Language) -> String {
        match &self.kind {
            EntryKind::Scripture(reference) => reference.entry_text(language),
            EntryKind::Subject(subject) => subject
                .subitem
                .clone()
                .unwrap_or_else(|| subject.item.clone()),
        }
    }

    /// Self-contained text of the entry: the full citation, or item and
    /// subitem joined by the language's separator
    pub fn full_text(&self, language: Language) -> String {
        match &self.kind {
            EntryKind::Scripture(reference) => {
                reference
                    .revealed()
                    .render(language, VerseStyle::Standard, Markup::Plain)
            }
            EntryKind::Subject(subject) => match &subject.subitem {
                Some(subitem) => {
                    format!("{}{} {}", subject.item, language.list_separator(), subitem)
                }
                None => subject.item.clone(),
            },
        }
    }

    /// Take over the locations of a duplicate entry
    pub fn absorb(&mut self, other: &IndexEntry) {
        self.pages.append_all(&other.pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::parse_references;
    use crate::index::pages::Page;

    fn scripture(text: &str, page: u32) -> IndexEntry {
        let reference = parse_references(text).refs.remove(0);
        IndexEntry::scripture(reference, &PageValue::from(page), None).unwrap()
    }

    #[test]
    fn test_subject_parse() {
        let subject = SubjectEntry::parse("Grace | means of");
        assert_eq!(subject.item, "Grace");
        assert_eq!(subject.subitem.as_deref(), Some("means of"));

        let subject = SubjectEntry::parse("Faith|");
        assert_eq!(subject.subitem, None);

        let subject = SubjectEntry::parse("a|b|c");
        assert_eq!(subject.subitem.as_deref(), Some("b|c"));
    }

    #[test]
    fn test_subject_key_layout() {
        let key = SubjectEntry::parse("Grace|Means").sort_key();
        assert_eq!(key.chars().count(), SUBJECT_KEY_WIDTH * 2 + 1);
        assert!(key.starts_with("grace "));
        assert_eq!(key.chars().nth(SUBJECT_KEY_WIDTH), Some('|'));
    }

    #[test]
    fn test_item_sorts_before_subitems_and_longer_items() {
        let item = SubjectEntry::parse("Grace").sort_key();
        let sub = SubjectEntry::parse("Grace|means").sort_key();
        let longer = SubjectEntry::parse("Gracious").sort_key();
        assert!(item < sub);
        assert!(sub < longer);
    }

    #[test]
    fn test_scripture_key() {
        assert_eq!(scripture("John 3:16", 12).key(), "043.003:016");
        assert_eq!(scripture("Genesis 1:1", 1).key(), "001.001:001");
    }

    #[test]
    fn test_unresolved_reference_is_kept_and_sorts_last() {
        let entry = scripture("Hezekiah 3:4", 9);
        assert!(entry.key().starts_with(char::MAX));
        assert!(entry.key() > scripture("Rev 22:21", 1).key());
        assert_eq!(entry.entry_text(Language::English), "Hezekiah 3:4");
    }

    #[test]
    fn test_null_page_and_footnote() {
        let reference = parse_references("John 3:16").refs.remove(0);
        let entry = IndexEntry::scripture(reference, &PageValue::from("null"), Some("2")).unwrap();
        let page = entry.pages().iter().next().copied().unwrap();
        assert_eq!(page, Page::new(0, Some(2)));
    }

    #[test]
    fn test_invalid_page_is_error() {
        assert!(IndexEntry::subject("Grace", &PageValue::from("abc"), None).is_err());
        assert!(IndexEntry::subject("Grace", &PageValue::from("12"), Some("x")).is_err());
    }

    #[test]
    fn test_page_value_is_not_mutated() {
        let value = PageValue::from(Page::plain(12));
        let entry = IndexEntry::subject("Grace", &value, Some("3")).unwrap();
        assert_eq!(value, PageValue::Page(Page::plain(12)));
        assert!(entry.pages().contains(&Page::new(12, Some(3))));
    }

    #[test]
    fn test_absorb_merges_pages() {
        let mut first = scripture("John 3:16", 12);
        let second = scripture("Jn 3:16", 45);
        assert_eq!(first.key(), second.key());

        first.absorb(&second);
        first.absorb(&second);
        assert_eq!(first.pages().len(), 2);
        assert_eq!(first.pages().render(Language::English), "12,45");
    }

    #[test]
    fn test_entry_and_full_text() {
        let entry = IndexEntry::subject("Grace|means of", &PageValue::from(3), None).unwrap();
        assert_eq!(entry.entry_text(Language::English), "means of");
        assert_eq!(entry.full_text(Language::English), "Grace, means of");
        assert_eq!(entry.full_text(Language::Arabic), "Grace، means of");

        let entry = scripture("John 3:16; 4:1", 3);
        assert_eq!(entry.full_text(Language::English), "John 3:16");
        assert_eq!(entry.book_number(), Some(43));
    }
}
