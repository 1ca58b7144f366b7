//! Sorting, merging and grouping entries into an index document.
//!
//! Compilation runs in three passes over a single `Vec`:
//!
//! 1. a stable sort on [`IndexEntry::key`],
//! 2. one adjacent pass that folds each entry into its predecessor when the
//!    keys are equal,
//! 3. grouping under headings: one per book in scripture mode (plus a single
//!    trailing heading for unresolved references), one per initial letter in
//!    subject mode, with subitems of the same item gathered in a
//!    [`SubHeading`].

use crate::bible::book_by_number;
use crate::index::entry::IndexEntry;
use crate::index::types::Mode;
use crate::utils::{Language, first_collation_char};
use tracing::debug;

/// Heading for subject items that hold no letter or digit
const SYMBOL_HEADING: &str = "#";

/// What a heading groups by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeadingKey {
    /// Canonical book number
    Book(u8),
    /// References whose book could not be resolved
    Unresolved,
    /// Uppercase initial of subject items
    Letter(String),
}

/// Consecutive subitem entries that share one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubHeading {
    /// Item text exactly as written in the first entry
    pub title: String,
    pub entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingItem {
    Entry(IndexEntry),
    Group(SubHeading),
}

impl HeadingItem {
    /// Entries of this item in order
    pub fn entries(&self) -> &[IndexEntry] {
        match self {
            HeadingItem::Entry(entry) => std::slice::from_ref(entry),
            HeadingItem::Group(group) => &group.entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeading {
    pub key: HeadingKey,
    pub items: Vec<HeadingItem>,
}

impl IndexHeading {
    fn new(key: HeadingKey) -> Self {
        Self {
            key,
            items: Vec::new(),
        }
    }

    /// Heading title in `language`: the book name, or the initial letter
    pub fn title(&self, language: Language) -> String {
        match &self.key {
            HeadingKey::Book(number) => book_by_number(*number)
                .map(|book| book.name_in(language).to_string())
                .unwrap_or_else(|| number.to_string()),
            HeadingKey::Unresolved => match language {
                Language::Arabic => "مراجع غير معروفة".to_string(),
                _ => "Unresolved references".to_string(),
            },
            HeadingKey::Letter(letter) => letter.clone(),
        }
    }

    /// All entries under this heading, subheadings flattened
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.items.iter().flat_map(|item| item.entries())
    }
}

/// The compiled index, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    pub mode: Mode,
    pub headings: Vec<IndexHeading>,
}

/// Counts reported after compilation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub headings: usize,
    pub entries: usize,
    pub unresolved: usize,
    pub locations: usize,
}

impl IndexDocument {
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.headings.iter().flat_map(|heading| heading.entries())
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    pub fn stats(&self) -> CompileStats {
        let mut stats = CompileStats {
            headings: self.headings.len(),
            ..CompileStats::default()
        };
        for entry in self.entries() {
            stats.entries += 1;
            stats.locations += entry.pages().len();
            if entry.reference().is_some_and(|r| !r.is_resolved()) {
                stats.unresolved += 1;
            }
        }
        stats
    }
}

/// Stable sort on entry keys
pub fn sort_entries(entries: &mut [IndexEntry]) {
    entries.sort_by(|a, b| a.key().cmp(b.key()));
}

/// Fold entries with equal keys into the first of them.
///
/// Expects sorted input; running it twice changes nothing.
pub fn merge_entries(entries: Vec<IndexEntry>) -> Vec<IndexEntry> {
    let total = entries.len();
    let mut merged: Vec<IndexEntry> = Vec::with_capacity(total);

    for entry in entries {
        match merged.last_mut() {
            Some(last) if last.key() == entry.key() => last.absorb(&entry),
            _ => merged.push(entry),
        }
    }

    debug!(entries = total, merged = merged.len(), "merged duplicate entries");
    merged
}

/// One heading per book, in the order the entries arrive
pub fn group_scripture(entries: Vec<IndexEntry>) -> Vec<IndexHeading> {
    let mut headings: Vec<IndexHeading> = Vec::new();

    for entry in entries {
        let key = match entry.book_number() {
            Some(number) => HeadingKey::Book(number),
            None => HeadingKey::Unresolved,
        };

        match headings.last_mut() {
            Some(heading) if heading.key == key => heading.items.push(HeadingItem::Entry(entry)),
            _ => {
                let mut heading = IndexHeading::new(key);
                heading.items.push(HeadingItem::Entry(entry));
                headings.push(heading);
            }
        }
    }

    headings
}

/// One heading per initial letter; subitems of one item share a subheading
pub fn group_subject(entries: Vec<IndexEntry>) -> Vec<IndexHeading> {
    let mut headings: Vec<IndexHeading> = Vec::new();

    for entry in entries {
        let item = entry.item().unwrap_or_default().to_string();
        let key = letter_key(&item);

        if headings.last().is_none_or(|heading| heading.key != key) {
            headings.push(IndexHeading::new(key));
        }
        let Some(heading) = headings.last_mut() else {
            continue;
        };

        if !entry.has_subitem() {
            heading.items.push(HeadingItem::Entry(entry));
            continue;
        }

        match heading.items.last_mut() {
            Some(HeadingItem::Group(group)) if group.title == item => group.entries.push(entry),
            _ => heading.items.push(HeadingItem::Group(SubHeading {
                title: item,
                entries: vec![entry],
            })),
        }
    }

    headings
}

fn letter_key(item: &str) -> HeadingKey {
    match first_collation_char(item).filter(|c| c.is_alphanumeric()) {
        Some(c) => HeadingKey::Letter(c.to_uppercase().collect()),
        None => HeadingKey::Letter(SYMBOL_HEADING.to_string()),
    }
}

/// Sort, merge and group `entries` into a document
pub fn compile(mut entries: Vec<IndexEntry>, mode: Mode) -> IndexDocument {
    sort_entries(&mut entries);
    let entries = merge_entries(entries);

    let headings = match mode {
        Mode::Scripture => group_scripture(entries),
        Mode::Subject => group_subject(entries),
    };

    IndexDocument { mode, headings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::parse_references;
    use crate::index::pages::{Page, PageValue};

    fn scripture(text: &str, page: u32) -> Vec<IndexEntry> {
        parse_references(text)
            .expanded()
            .into_iter()
            .map(|r| IndexEntry::scripture(r, &PageValue::from(page), None).unwrap())
            .collect()
    }

    fn subject(text: &str, page: u32) -> IndexEntry {
        IndexEntry::subject(text, &PageValue::from(page), None).unwrap()
    }

    #[test]
    fn test_duplicate_references_merge() {
        let mut entries = scripture("John 3:16", 12);
        entries.extend(scripture("Jn 3:16", 45));

        let doc = compile(entries, Mode::Scripture);
        assert_eq!(doc.headings.len(), 1);
        assert_eq!(doc.headings[0].title(Language::English), "John");

        let entries: Vec<_> = doc.entries().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_text(Language::English), "3:16");
        assert_eq!(entries[0].pages().render(Language::English), "12,45");
    }

    #[test]
    fn test_canonical_book_order() {
        let mut entries = Vec::new();
        for (text, page) in [("Rev 1:1", 1), ("John 1:1", 2), ("Gen 1:1", 3), ("Mal 4:6", 4)] {
            entries.extend(scripture(text, page));
        }

        let doc = compile(entries, Mode::Scripture);
        let keys: Vec<_> = doc.headings.iter().map(|h| h.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                HeadingKey::Book(1),
                HeadingKey::Book(39),
                HeadingKey::Book(43),
                HeadingKey::Book(66)
            ]
        );
    }

    #[test]
    fn test_verse_order_within_book() {
        let mut entries = scripture("John 10:1", 1);
        entries.extend(scripture("John 3:16", 2));
        entries.extend(scripture("John 3:2", 3));
        entries.extend(scripture("John 3", 4));

        let doc = compile(entries, Mode::Scripture);
        let texts: Vec<_> = doc.entries().map(|e| e.entry_text(Language::English)).collect();
        assert_eq!(texts, vec!["3", "3:2", "3:16", "10:1"]);
    }

    #[test]
    fn test_semicolon_list_expands_under_one_heading() {
        let doc = compile(scripture("John 3:16; 4:1", 7), Mode::Scripture);
        assert_eq!(doc.headings.len(), 1);
        let texts: Vec<_> = doc.entries().map(|e| e.entry_text(Language::English)).collect();
        assert_eq!(texts, vec!["3:16", "4:1"]);
        for entry in doc.entries() {
            assert!(entry.pages().contains(&Page::plain(7)));
        }
    }

    #[test]
    fn test_unresolved_references_trail() {
        let mut entries = scripture("Hezekiah 3:4", 1);
        entries.extend(scripture("Rev 22:21", 2));
        entries.extend(scripture("Gen 1:1", 3));

        let doc = compile(entries, Mode::Scripture);
        let last = doc.headings.last().unwrap();
        assert_eq!(last.key, HeadingKey::Unresolved);
        assert_eq!(last.title(Language::English), "Unresolved references");
        assert_eq!(doc.stats().unresolved, 1);
    }

    #[test]
    fn test_footnote_kept_distinct() {
        let mut entries = scripture("John 3:16", 12);
        let reference = parse_references("John 3:16").refs.remove(0);
        entries.push(IndexEntry::scripture(reference, &PageValue::from(12), Some("2")).unwrap());

        let doc = compile(entries, Mode::Scripture);
        let entry = doc.entries().next().unwrap();
        assert_eq!(entry.pages().render(Language::English), "12,12n2");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut entries = scripture("John 3:16", 12);
        entries.extend(scripture("John 3:16; 4:1", 13));
        entries.extend(scripture("John 3:16", 12));
        sort_entries(&mut entries);

        let once = merge_entries(entries);
        let twice = merge_entries(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_subject_subheading() {
        let entries = vec![
            subject("Grace|means of", 3),
            subject("Grace", 1),
            subject("Faith", 2),
            subject("Grace|saving", 5),
        ];

        let doc = compile(entries, Mode::Subject);
        let titles: Vec<_> = doc.headings.iter().map(|h| h.title(Language::English)).collect();
        assert_eq!(titles, vec!["F", "G"]);

        let grace = &doc.headings[1];
        assert_eq!(grace.items.len(), 2);
        assert!(matches!(&grace.items[0], HeadingItem::Entry(e) if e.item() == Some("Grace")));
        match &grace.items[1] {
            HeadingItem::Group(group) => {
                assert_eq!(group.title, "Grace");
                let subitems: Vec<_> = group.entries.iter().filter_map(|e| e.subitem()).collect();
                assert_eq!(subitems, vec!["means of", "saving"]);
            }
            other => panic!("expected a subheading, got {:?}", other),
        }
    }

    #[test]
    fn test_subject_collation_ignores_case_and_accents() {
        let entries = vec![subject("élan", 1), subject("Eden", 2), subject("apple", 3)];
        let doc = compile(entries, Mode::Subject);

        let titles: Vec<_> = doc.headings.iter().map(|h| h.title(Language::English)).collect();
        assert_eq!(titles, vec!["A", "E"]);
        let items: Vec<_> = doc.entries().filter_map(|e| e.item()).collect();
        assert_eq!(items, vec!["apple", "Eden", "élan"]);
    }

    #[test]
    fn test_subject_symbol_heading() {
        let doc = compile(vec![subject("“…”", 1)], Mode::Subject);
        assert_eq!(doc.headings[0].key, HeadingKey::Letter("#".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let doc = compile(Vec::new(), Mode::Scripture);
        assert!(doc.is_empty());
        assert_eq!(doc.stats(), CompileStats::default());
    }
}
