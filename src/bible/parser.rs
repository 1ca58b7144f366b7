//! Free-text scripture reference parser.
//!
//! Recognises citations such as `John 3:16`, `Jn 3:16-18; 4:1, 2`,
//! `1 John 2:1`, `Psalm 23`, `Jude 3` and their Arabic forms
//! (`يوحنا ٣: ١٦؛ ٤: ١`). Book and chapter carry forward to later citations
//! in the same text. Parsing never fails: text that holds no recognisable
//! citation yields a single unresolved reference.

use crate::bible::books::{Book, BookMatch, match_book_name};
use crate::bible::reference::VerseReference;
use crate::utils::to_western_digits;
use unicode_normalization::char::is_combining_mark;

/// Words that introduce or join citations and are never part of a book name
const LEAD_IN_WORDS: &[&str] = &[
    "cf", "see", "also", "and", "&", "قارن", "انظر", "ايضا", "أيضا", "أيضًا", "كذلك", "راجع", "و",
];

/// Words that may stand between a chapter and its verse (`John 3 v 16`)
const VERSE_WORDS: &[&str] = &["v", "vv", "ver", "verse", "verses", "ع", "عدد"];

/// Words that join two citations like a comma
const JOIN_WORDS: &[&str] = &["and", "&", "و"];

/// Longest book name, in words, including a leading ordinal
const MAX_BOOK_WORDS: usize = 5;

/// Result of parsing one text cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceList {
    pub refs: Vec<VerseReference>,
    /// False when the text was marked with a leading `!` or `*`
    pub in_index: bool,
}

impl ReferenceList {
    /// References with verse lists split into one reference per verse item
    pub fn expanded(&self) -> Vec<VerseReference> {
        self.refs.iter().flat_map(VerseReference::expand_verses).collect()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// Parse all scripture references in `text`
pub fn parse_references(text: &str) -> ReferenceList {
    let trimmed = text.trim();
    let body = trimmed.trim_start_matches(['!', '*']);
    let in_index = body.len() == trimmed.len();
    let body = body.trim_start();

    let tokens = Lexer::new(body).tokenize();
    let mut parser = ReferenceParser::new(body, tokens);
    let mut refs = parser.parse();

    if refs.is_empty() && !body.is_empty() {
        refs.push(VerseReference::unresolved(body));
    }

    ReferenceList { refs, in_index }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Word(String),
    /// Western digits with an optional one-letter suffix (`16a`)
    Number(String),
    Colon,
    Dash,
    Comma,
    Semicolon,
    Period,
    /// `!` or `*` after a book or chapter hides it when rendered
    Marker,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

/// Splits reference text into tokens, tracking byte offsets into the input
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek_char() {
            let start = self.pos;

            let kind = if is_digit(ch) {
                self.read_number()
            } else if ch.is_alphabetic() {
                self.read_word()
            } else {
                self.advance();
                match ch {
                    ':' => TokenKind::Colon,
                    '-' | '–' | '—' | '‐' | '‑' => TokenKind::Dash,
                    ',' | '،' => TokenKind::Comma,
                    ';' | '؛' => TokenKind::Semicolon,
                    '.' => TokenKind::Period,
                    '!' | '*' => TokenKind::Marker,
                    '&' => TokenKind::Word("&".to_string()),
                    _ => continue,
                }
            };

            tokens.push(Token {
                kind,
                start,
                end: self.pos,
            });
        }

        tokens
    }

    fn read_number(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek_char().is_some_and(is_digit) {
            self.advance();
        }
        let mut number = to_western_digits(&self.input[start..self.pos]);

        // A single lowercase letter directly after the digits is a verse part
        let rest = &self.input[self.pos..];
        let mut chars = rest.chars();
        if let Some(suffix) = chars.next().filter(|c| c.is_ascii_lowercase()) {
            if !chars.next().is_some_and(|c| c.is_alphabetic()) {
                number.push(suffix);
                self.advance();
            }
        }

        TokenKind::Number(number)
    }

    fn read_word(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_alphabetic() || is_combining_mark(c))
        {
            self.advance();
        }
        TokenKind::Word(self.input[start..self.pos].to_string())
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{0660}'..='\u{0669}').contains(&c) || ('\u{06F0}'..='\u{06F9}').contains(&c)
}

fn is_one_of(word: &str, list: &[&str]) -> bool {
    let lower = word.to_lowercase();
    list.contains(&lower.as_str())
}

/// What stood between the previous citation and a bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    None,
    Comma,
    Semicolon,
}

/// Outcome of looking for a book name at the current token
enum BookScan {
    /// Book name (resolved or not) followed by a chapter or verse
    Citation(BookName),
    /// Book name standing alone (`Ruth; John 3:16`), citing the whole book
    WholeBook(BookName),
    /// Words that name nothing and cite nothing; already consumed
    Skipped,
    /// The current token does not start a book name
    NotABook,
}

struct BookName {
    matched: Option<BookMatch>,
    text: String,
    start: usize,
}

impl BookName {
    fn book(&self) -> Option<&'static Book> {
        self.matched.as_ref().map(|m| m.book)
    }
}

/// Book context carried from one citation to the next
#[derive(Debug, Clone)]
struct Context {
    book: Option<&'static Book>,
    book_text: String,
    book_prefix: Option<String>,
    chapter: Option<String>,
    has_verse: bool,
}

struct ReferenceParser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    refs: Vec<VerseReference>,
    /// Byte offset where the raw text of the last reference begins
    last_start: usize,
}

impl<'a> ReferenceParser<'a> {
    fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            input,
            tokens,
            pos: 0,
            refs: Vec::new(),
            last_start: 0,
        }
    }

    fn push(&mut self, reference: VerseReference, start: usize) {
        self.refs.push(reference);
        self.last_start = start;
    }

    fn parse(&mut self) -> Vec<VerseReference> {
        if let Some(whole) = self.whole_book() {
            return vec![whole];
        }

        let mut separator = Separator::None;

        while !self.is_eof() {
            match self.scan_book() {
                BookScan::Citation(name) => {
                    self.parse_citation(name);
                    separator = Separator::None;
                    continue;
                }
                BookScan::WholeBook(name) => {
                    self.push_whole_book(name);
                    separator = Separator::None;
                    continue;
                }
                BookScan::Skipped => continue,
                BookScan::NotABook => {}
            }

            match self.peek_kind() {
                Some(TokenKind::Number(_)) => {
                    self.parse_continuation(separator);
                    separator = Separator::None;
                }
                Some(TokenKind::Comma) => {
                    if separator == Separator::None {
                        separator = Separator::Comma;
                    }
                    self.advance();
                }
                Some(TokenKind::Semicolon) => {
                    separator = Separator::Semicolon;
                    self.advance();
                }
                Some(TokenKind::Word(word)) if is_one_of(word, JOIN_WORDS) => {
                    if separator == Separator::None {
                        separator = Separator::Comma;
                    }
                    self.advance();
                }
                _ => self.advance(),
            }
        }

        std::mem::take(&mut self.refs)
    }

    /// Text that is nothing but a book name cites the whole book
    fn whole_book(&self) -> Option<VerseReference> {
        let first = self.tokens.first()?;
        let last = self.tokens.last()?;
        let all_words = self
            .tokens
            .iter()
            .all(|t| matches!(t.kind, TokenKind::Word(_) | TokenKind::Period));
        let leading_ordinal = matches!(first.kind, TokenKind::Number(_))
            && self.tokens[1..]
                .iter()
                .all(|t| matches!(t.kind, TokenKind::Word(_) | TokenKind::Period));
        if !all_words && !leading_ordinal {
            return None;
        }

        let text = self.input[first.start..last.end].trim_end_matches('.');
        let matched = match_book_name(text)?;
        let mut reference = VerseReference::book_only(matched.book, text);
        if let Some(prefix) = matched.prefix {
            reference.book_text = text[prefix.len()..].to_string();
            reference.book_prefix = Some(prefix);
        }
        Some(reference)
    }

    /// Look for a book name starting at the current token.
    ///
    /// The longest run of words (with an optional leading ordinal number) is
    /// collected, and the longest trailing part of it that names a book wins,
    /// so lead-ins like "see also" fall away. A run that names no book is an
    /// unresolved book when a number follows it.
    fn scan_book(&mut self) -> BookScan {
        let run_start = self.pos;
        let mut run_end = run_start;

        if self.is_ordinal_at(run_end) {
            run_end += 1;
        }
        while matches!(self.kind_at(run_end), Some(TokenKind::Word(w)) if !is_one_of(w, JOIN_WORDS)) {
            run_end += 1;
        }
        if run_end == run_start || !matches!(self.kind_at(run_end - 1), Some(TokenKind::Word(_))) {
            return BookScan::NotABook;
        }

        let cites = self.number_follows(run_end);
        let earliest = run_end.saturating_sub(MAX_BOOK_WORDS).max(run_start);

        for start in earliest..run_end {
            if matches!(self.kind_at(start), Some(TokenKind::Number(_))) && !self.is_ordinal_at(start) {
                continue;
            }
            let text = self.span_text(start, run_end);
            if let Some(matched) = match_book_name(text) {
                let whole_book = !cites && self.book_ends_at(run_end) && self.only_lead_ins(run_start, start);
                if !cites && !whole_book {
                    break;
                }
                let name = BookName {
                    text: match &matched.prefix {
                        Some(prefix) => text[prefix.len()..].to_string(),
                        None => text.to_string(),
                    },
                    matched: Some(matched),
                    start: self.tokens[start].start,
                };
                self.pos = run_end;
                return if whole_book {
                    BookScan::WholeBook(name)
                } else {
                    BookScan::Citation(name)
                };
            }
        }

        // Drop lead-in words; what remains is an unknown book name
        let mut name_start = run_start;
        while name_start < run_end
            && matches!(self.kind_at(name_start), Some(TokenKind::Word(w)) if is_one_of(w, LEAD_IN_WORDS))
        {
            name_start += 1;
        }

        if name_start == run_end {
            return BookScan::NotABook;
        }

        if name_start > run_start {
            self.pos = name_start;
            return self.scan_book();
        }

        self.pos = run_end;
        if !cites {
            return BookScan::Skipped;
        }

        let start_offset = self.tokens[name_start].start;
        BookScan::Citation(BookName {
            matched: None,
            text: self.span_text(name_start, run_end).to_string(),
            start: start_offset,
        })
    }

    /// `<book> [marker] [.] <chapter>[marker] [: <verses>]` or, for a
    /// single-chapter book, `<book> <verses>`
    fn parse_citation(&mut self, name: BookName) {
        let book_hidden = self.consume_marker();
        while self.consume(&TokenKind::Period) {}

        let context = Context {
            book: name.book(),
            book_text: name.text.clone(),
            book_prefix: name.matched.as_ref().and_then(|m| m.prefix.clone()),
            chapter: None,
            has_verse: false,
        };

        let mut reference = self.parse_chapter_verse(&context, name.start);
        reference.book_hidden = book_hidden;
        self.push(reference, name.start);
    }

    fn push_whole_book(&mut self, name: BookName) {
        let Some(matched) = name.matched else {
            return;
        };
        let mut reference = VerseReference::book_only(matched.book, &name.text);
        reference.book_prefix = matched.prefix;
        reference.raw = self.input[name.start..self.last_end()].trim().to_string();
        reference.book_hidden = self.consume_marker();
        while self.consume(&TokenKind::Period) {}
        self.push(reference, name.start);
    }

    /// A number with no book in front of it: a new chapter, a new verse or
    /// another item of the previous verse list
    fn parse_continuation(&mut self, separator: Separator) {
        let Some(context) = self.context() else {
            let start = self.tokens[self.pos].start;
            let unknown = Context {
                book: None,
                book_text: String::new(),
                book_prefix: None,
                chapter: None,
                has_verse: false,
            };
            let reference = self.parse_chapter_verse(&unknown, start);
            self.push(reference, start);
            return;
        };

        let start = self.tokens[self.pos].start;

        if self.chapter_verse_follows(self.pos) || !context.has_verse {
            let mut reference = self.parse_chapter_verse(&context, start);
            reference.book_hidden = true;
            self.push(reference, start);
            return;
        }

        let verses = self.parse_verse_list();
        let raw_end = self.last_end();
        if separator == Separator::Semicolon {
            let mut reference = self.new_reference(&context, start, raw_end);
            reference.chapter = context.chapter.clone();
            reference.verse = Some(verses);
            reference.book_hidden = true;
            reference.chapter_hidden = true;
            self.push(reference, start);
        } else if let Some(last) = self.refs.last_mut() {
            let verse = match last.verse.take() {
                Some(existing) => format!("{}, {}", existing, verses),
                None => verses,
            };
            last.verse = Some(verse);
            last.raw = self.input[self.last_start..raw_end].trim().to_string();
        }
    }

    fn parse_chapter_verse(&mut self, context: &Context, start: usize) -> VerseReference {
        let single_chapter = context.book.is_some_and(Book::is_single_chapter);

        if !matches!(self.peek_kind(), Some(TokenKind::Number(_))) {
            let end = self.last_end().max(start);
            return self.new_reference(context, start, end);
        }

        let first = self.parse_number_span(false);
        let chapter_hidden = self.consume_marker();

        let mut chapter = None;
        let mut verse = None;

        if self.consume_verse_separator() {
            chapter = Some(first);
            verse = Some(self.parse_verse_list());
        } else if single_chapter {
            let mut verses = first;
            let rest = self.parse_verse_list_tail();
            if !rest.is_empty() {
                verses = format!("{}, {}", verses, rest);
            }
            verse = Some(verses);
        } else {
            chapter = Some(first);
        }

        // `Jude 1:3` is `Jude 3`
        if single_chapter && verse.is_some() && chapter.as_deref() == Some("1") {
            chapter = None;
        }

        let end = self.last_end();
        let mut reference = self.new_reference(context, start, end);
        reference.chapter = chapter;
        reference.verse = verse;
        reference.chapter_hidden = chapter_hidden;
        reference
    }

    fn new_reference(&self, context: &Context, start: usize, end: usize) -> VerseReference {
        VerseReference {
            book: context.book,
            book_text: context.book_text.clone(),
            book_prefix: context.book_prefix.clone(),
            chapter: None,
            verse: None,
            book_hidden: false,
            chapter_hidden: false,
            raw: self.input[start..end].trim().to_string(),
        }
    }

    /// `16`, `16-18`, `16a`, and with `cross_chapter` also `16-4:2`
    fn parse_number_span(&mut self, cross_chapter: bool) -> String {
        let mut span = match self.peek_kind() {
            Some(TokenKind::Number(n)) => n.clone(),
            _ => return String::new(),
        };
        self.advance();

        if matches!(self.peek_kind(), Some(TokenKind::Dash))
            && matches!(self.kind_at(self.pos + 1), Some(TokenKind::Number(_)))
        {
            self.advance();
            if let Some(TokenKind::Number(end)) = self.peek_kind() {
                span.push('-');
                span.push_str(end);
            }
            self.advance();

            // A verse range running on into the next chapter stays one span
            if cross_chapter
                && matches!(self.peek_kind(), Some(TokenKind::Colon))
                && matches!(self.kind_at(self.pos + 1), Some(TokenKind::Number(_)))
            {
                self.advance();
                if let Some(TokenKind::Number(verse)) = self.peek_kind() {
                    span.push(':');
                    span.push_str(verse);
                }
                self.advance();
            }
        }

        span
    }

    /// A verse span followed by any further comma-separated verse spans
    fn parse_verse_list(&mut self) -> String {
        let first = self.parse_number_span(true);
        let rest = self.parse_verse_list_tail();
        if rest.is_empty() {
            first
        } else {
            format!("{}, {}", first, rest)
        }
    }

    fn parse_verse_list_tail(&mut self) -> String {
        let mut items = Vec::new();

        loop {
            let is_joiner = match self.peek_kind() {
                Some(TokenKind::Comma) => true,
                Some(TokenKind::Word(w)) => is_one_of(w, JOIN_WORDS),
                _ => false,
            };
            let next = self.pos + 1;
            if !is_joiner
                || !matches!(self.kind_at(next), Some(TokenKind::Number(_)))
                || self.chapter_verse_follows(next)
                || self.is_book_ordinal(next)
            {
                break;
            }

            self.advance();
            items.push(self.parse_number_span(true));
        }

        items.join(", ")
    }

    /// `:`, `.` or a verse word such as `v`, when a number follows
    fn consume_verse_separator(&mut self) -> bool {
        let width = match self.peek_kind() {
            Some(TokenKind::Colon | TokenKind::Period) => 1,
            Some(TokenKind::Word(w)) if is_one_of(w, VERSE_WORDS) => {
                if matches!(self.kind_at(self.pos + 1), Some(TokenKind::Period)) {
                    2
                } else {
                    1
                }
            }
            _ => return false,
        };
        if !matches!(self.kind_at(self.pos + width), Some(TokenKind::Number(_))) {
            return false;
        }
        self.pos += width;
        true
    }

    fn consume_marker(&mut self) -> bool {
        let mut found = false;
        while self.consume(&TokenKind::Marker) {
            found = true;
        }
        found
    }

    /// Book, chapter and verse state left by the previous citation
    fn context(&self) -> Option<Context> {
        self.refs.last().map(|last| Context {
            book: last.book,
            book_text: last.book_text.clone(),
            book_prefix: last.book_prefix.clone(),
            chapter: last.chapter.clone(),
            has_verse: last.verse.is_some(),
        })
    }

    /// Whether the number at `index` starts a `chapter:verse` pair
    fn chapter_verse_follows(&self, index: usize) -> bool {
        if !matches!(self.kind_at(index), Some(TokenKind::Number(_))) {
            return false;
        }
        let mut next = index + 1;
        if matches!(self.kind_at(next), Some(TokenKind::Dash))
            && matches!(self.kind_at(next + 1), Some(TokenKind::Number(_)))
        {
            next += 2;
        }
        while matches!(self.kind_at(next), Some(TokenKind::Marker)) {
            next += 1;
        }
        match self.kind_at(next) {
            Some(TokenKind::Colon) => true,
            Some(TokenKind::Period) => matches!(self.kind_at(next + 1), Some(TokenKind::Number(_))),
            _ => false,
        }
    }

    /// Whether a number token at `index` could be the `1` of `1 John`
    fn is_ordinal_at(&self, index: usize) -> bool {
        matches!(self.kind_at(index), Some(TokenKind::Number(n)) if matches!(n.as_str(), "1" | "2" | "3"))
            && matches!(self.kind_at(index + 1), Some(TokenKind::Word(_)))
    }

    /// Whether the number at `index` is the ordinal of a known book name
    fn is_book_ordinal(&self, index: usize) -> bool {
        if !self.is_ordinal_at(index) {
            return false;
        }
        let mut end = index + 1;
        while matches!(self.kind_at(end), Some(TokenKind::Word(_))) && end - index < MAX_BOOK_WORDS {
            end += 1;
            if match_book_name(self.span_text(index, end)).is_some() {
                return true;
            }
        }
        false
    }

    /// Whether the word run ending at `index` is followed by the end of a
    /// citation rather than a chapter number
    fn book_ends_at(&self, index: usize) -> bool {
        let mut next = index;
        while matches!(self.kind_at(next), Some(TokenKind::Marker | TokenKind::Period)) {
            next += 1;
        }
        match self.kind_at(next) {
            None | Some(TokenKind::Semicolon | TokenKind::Comma) => true,
            Some(TokenKind::Word(w)) => is_one_of(w, JOIN_WORDS),
            _ => false,
        }
    }

    /// Whether every token in `start..end` is a lead-in word
    fn only_lead_ins(&self, start: usize, end: usize) -> bool {
        (start..end).all(|i| matches!(self.kind_at(i), Some(TokenKind::Word(w)) if is_one_of(w, LEAD_IN_WORDS)))
    }

    /// Whether a chapter or verse number follows the word run ending at `index`
    fn number_follows(&self, index: usize) -> bool {
        let mut next = index;
        while matches!(self.kind_at(next), Some(TokenKind::Marker | TokenKind::Period)) {
            next += 1;
        }
        matches!(self.kind_at(next), Some(TokenKind::Number(_)))
    }

    fn span_text(&self, start: usize, end: usize) -> &'a str {
        let input: &'a str = self.input;
        &input[self.tokens[start].start..self.tokens[end - 1].end]
    }

    fn last_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.end)
            .unwrap_or(0)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn kind_at(&self, index: usize) -> Option<&TokenKind> {
        self.tokens.get(index).map(|t| &t.kind)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.kind_at(self.pos)
    }

    fn consume(&mut self, expected: &TokenKind) -> bool {
        if self.peek_kind() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(list: &ReferenceList) -> Vec<(Option<u8>, Option<&str>, Option<&str>)> {
        list.refs
            .iter()
            .map(|r| (r.book_number(), r.chapter.as_deref(), r.verse.as_deref()))
            .collect()
    }

    #[test]
    fn test_simple_reference() {
        let list = parse_references("John 3:16");
        assert!(list.in_index);
        assert_eq!(numbers(&list), vec![(Some(43), Some("3"), Some("16"))]);
        assert_eq!(list.refs[0].raw, "John 3:16");
        assert_eq!(list.refs[0].book_text, "John");
    }

    #[test]
    fn test_abbreviation_and_range() {
        let list = parse_references("Jn. 3:16-18");
        assert_eq!(numbers(&list), vec![(Some(43), Some("3"), Some("16-18"))]);
        assert_eq!(list.refs[0].book_text, "Jn");
    }

    #[test]
    fn test_numbered_book() {
        let list = parse_references("1 John 2:1");
        assert_eq!(numbers(&list), vec![(Some(62), Some("2"), Some("1"))]);

        let list = parse_references("II Cor 5:17");
        assert_eq!(numbers(&list), vec![(Some(47), Some("5"), Some("17"))]);
    }

    #[test]
    fn test_semicolon_chapter_and_verse_list() {
        let list = parse_references("John 3:16; 4:1, 2");
        assert_eq!(
            numbers(&list),
            vec![(Some(43), Some("3"), Some("16")), (Some(43), Some("4"), Some("1, 2"))]
        );
        assert!(list.refs[1].book_hidden);
        assert_eq!(list.expanded().len(), 3);
    }

    #[test]
    fn test_comma_before_chapter_verse_starts_new_reference() {
        let list = parse_references("John 3:16, 4:1");
        assert_eq!(
            numbers(&list),
            vec![(Some(43), Some("3"), Some("16")), (Some(43), Some("4"), Some("1"))]
        );
    }

    #[test]
    fn test_chapter_only_and_single_chapter_book() {
        assert_eq!(numbers(&parse_references("Psalm 23")), vec![(Some(19), Some("23"), None)]);
        assert_eq!(numbers(&parse_references("Jude 3")), vec![(Some(65), None, Some("3"))]);
        assert_eq!(numbers(&parse_references("Jude 1:3")), vec![(Some(65), None, Some("3"))]);
        assert_eq!(
            numbers(&parse_references("Philemon 4, 6")),
            vec![(Some(57), None, Some("4, 6"))]
        );
    }

    #[test]
    fn test_lead_in_words_are_ignored() {
        assert_eq!(
            numbers(&parse_references("cf. Rom 8:28")),
            vec![(Some(45), Some("8"), Some("28"))]
        );
        assert_eq!(
            numbers(&parse_references("see also Song of Solomon 2:1")),
            vec![(Some(22), Some("2"), Some("1"))]
        );
        assert_eq!(
            numbers(&parse_references("Rom 8:28 and 1 Cor 13:4")),
            vec![(Some(45), Some("8"), Some("28")), (Some(46), Some("13"), Some("4"))]
        );
    }

    #[test]
    fn test_verse_list_does_not_swallow_numbered_book() {
        let list = parse_references("John 3:16, 1 John 2:1");
        assert_eq!(
            numbers(&list),
            vec![(Some(43), Some("3"), Some("16")), (Some(62), Some("2"), Some("1"))]
        );
    }

    #[test]
    fn test_arabic_reference() {
        let list = parse_references("يوحنا ٣: ١٦؛ ٤: ١، ٢");
        assert_eq!(
            numbers(&list),
            vec![(Some(43), Some("3"), Some("16")), (Some(43), Some("4"), Some("1, 2"))]
        );
    }

    #[test]
    fn test_arabic_prefixed_book() {
        let list = parse_references("ويوحنا ٣: ١٦");
        assert_eq!(numbers(&list), vec![(Some(43), Some("3"), Some("16"))]);
        assert_eq!(list.refs[0].book_prefix.as_deref(), Some("و"));
        assert_eq!(list.refs[0].book_text, "يوحنا");
    }

    #[test]
    fn test_verse_suffix() {
        let list = parse_references("Mark 9:16a");
        assert_eq!(numbers(&list), vec![(Some(41), Some("9"), Some("16a"))]);
    }

    #[test]
    fn test_unknown_book_keeps_text() {
        let list = parse_references("Hezekiah 3:4");
        assert_eq!(numbers(&list), vec![(None, Some("3"), Some("4"))]);
        assert_eq!(list.refs[0].book_text, "Hezekiah");
        assert_eq!(list.refs[0].raw, "Hezekiah 3:4");
    }

    #[test]
    fn test_text_without_reference_is_unresolved() {
        let list = parse_references("see the introduction");
        assert_eq!(list.len(), 1);
        assert!(!list.refs[0].is_resolved());
        assert_eq!(list.refs[0].raw, "see the introduction");
    }

    #[test]
    fn test_bare_book_name() {
        let list = parse_references("Ruth");
        assert_eq!(numbers(&list), vec![(Some(8), None, None)]);
    }

    #[test]
    fn test_book_name_between_citations_cites_whole_book() {
        let list = parse_references("Genesis 1:1; Ruth");
        assert_eq!(numbers(&list), vec![(Some(1), Some("1"), Some("1")), (Some(8), None, None)]);
        assert_eq!(list.refs[1].raw, "Ruth");

        let list = parse_references("Ruth; John 3:16");
        assert_eq!(numbers(&list), vec![(Some(8), None, None), (Some(43), Some("3"), Some("16"))]);

        let list = parse_references("Gen 1:1; Exod");
        assert_eq!(numbers(&list), vec![(Some(1), Some("1"), Some("1")), (Some(2), None, None)]);
    }

    #[test]
    fn test_list_of_whole_books() {
        let list = parse_references("Ruth, Esther");
        assert_eq!(numbers(&list), vec![(Some(8), None, None), (Some(17), None, None)]);

        let list = parse_references("Ruth and Esther");
        assert_eq!(numbers(&list), vec![(Some(8), None, None), (Some(17), None, None)]);
    }

    #[test]
    fn test_lead_in_before_whole_book() {
        let list = parse_references("see Ruth");
        assert_eq!(numbers(&list), vec![(Some(8), None, None)]);
        assert_eq!(list.refs[0].raw, "Ruth");
    }

    #[test]
    fn test_book_word_ending_prose_is_unresolved() {
        let list = parse_references("which it is.");
        assert_eq!(list.len(), 1);
        assert!(!list.refs[0].is_resolved());
    }

    #[test]
    fn test_range_into_next_chapter() {
        let list = parse_references("John 3:16-4:2");
        assert_eq!(numbers(&list), vec![(Some(43), Some("3"), Some("16-4:2"))]);
        assert_eq!(list.expanded().len(), 1);

        let list = parse_references("John 3:16-4:2; 5:1");
        assert_eq!(
            numbers(&list),
            vec![(Some(43), Some("3"), Some("16-4:2")), (Some(43), Some("5"), Some("1"))]
        );
    }

    #[test]
    fn test_not_in_index_marker() {
        let list = parse_references("! John 3:16");
        assert!(!list.in_index);
        assert_eq!(numbers(&list), vec![(Some(43), Some("3"), Some("16"))]);
    }

    #[test]
    fn test_book_carries_forward_after_chapter_only() {
        let list = parse_references("Ps 23; 24");
        assert_eq!(
            numbers(&list),
            vec![(Some(19), Some("23"), None), (Some(19), Some("24"), None)]
        );
    }

    #[test]
    fn test_semicolon_bare_verse_stays_in_chapter() {
        let list = parse_references("John 3:16; 18");
        assert_eq!(
            numbers(&list),
            vec![(Some(43), Some("3"), Some("16")), (Some(43), Some("3"), Some("18"))]
        );
        assert!(list.refs[1].chapter_hidden);
    }

    #[test]
    fn test_multiple_books() {
        let list = parse_references("Gen 1:1; Exod 20:3-17; Rev 22:21");
        let books: Vec<_> = list.refs.iter().filter_map(|r| r.book_number()).collect();
        assert_eq!(books, vec![1, 2, 66]);
    }

    #[test]
    fn test_verse_word_between_chapter_and_verse() {
        let list = parse_references("John 3 v. 16");
        assert_eq!(numbers(&list), vec![(Some(43), Some("3"), Some("16"))]);

        let list = parse_references("John 3 v 16");
        assert_eq!(numbers(&list), vec![(Some(43), Some("3"), Some("16"))]);
    }

    #[test]
    fn test_comma_appends_to_verse_list_raw_text() {
        let list = parse_references("Rom 8:28 and 30");
        assert_eq!(numbers(&list), vec![(Some(45), Some("8"), Some("28, 30"))]);
        assert_eq!(list.refs[0].raw, "Rom 8:28 and 30");
    }

    #[test]
    fn test_garbage_never_panics() {
        for text in ["", "   ", ":::", "3:", "- ,;", "John :", "١٢٣٤٥٦٧٨٩", "!*", "John 3:16-"] {
            let _ = parse_references(text);
        }
        assert!(parse_references("").is_empty());
    }
}
