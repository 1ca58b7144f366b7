//! Script-aware collation helpers.
//!
//! Sort keys are built from text that has been folded with
//! [`strip_for_collation`]: diacritics, Arabic harakat, Hebrew points and
//! bidi direction marks are removed, letter variants are folded to their base
//! letter, punctuation becomes a single space and the result is lowercased.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Writing systems the collation tables know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Arabic,
    Greek,
    Hebrew,
    Latin,
}

impl Script {
    /// Detect the script of the first letter in `text`, defaulting to Latin
    pub fn detect(text: &str) -> Self {
        text.chars()
            .find(|c| c.is_alphabetic())
            .map(Self::of_char)
            .unwrap_or(Script::Latin)
    }

    fn of_char(c: char) -> Self {
        match c {
            '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}' => Script::Arabic,
            '\u{0590}'..='\u{05FF}' | '\u{FB1D}'..='\u{FB4F}' => Script::Hebrew,
            '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}' => Script::Greek,
            _ => Script::Latin,
        }
    }

    /// Whether `text` contains at least one letter of this script
    pub fn has_script(&self, text: &str) -> bool {
        text.chars()
            .filter(|c| c.is_alphabetic())
            .any(|c| Self::of_char(c) == *self)
    }
}

/// What a single character becomes in a collation key
enum Fold {
    Keep(char),
    Space,
    Drop,
}

fn fold_char(c: char) -> Fold {
    match c {
        // Bidi controls, zero-width joiners, BOM
        '\u{200C}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{FEFF}' => Fold::Drop,

        // Arabic: tatweel, comma and question mark are not significant
        '\u{0640}' | '\u{060C}' | '\u{061F}' => Fold::Drop,
        // Alef variants
        '\u{0671}'..='\u{0673}' | '\u{0675}' => Fold::Keep('\u{0627}'),
        // Waw variants
        '\u{066F}' | '\u{0676}' | '\u{0677}' | '\u{06C4}'..='\u{06CB}' | '\u{06CF}' => {
            Fold::Keep('\u{0648}')
        }
        // Ya' variants, including alef maksura
        '\u{0649}' | '\u{06CC}'..='\u{06CE}' | '\u{06D0}'..='\u{06D3}' => Fold::Keep('\u{064A}'),
        '\u{061B}' | '\u{066B}' | '\u{066C}' | '\u{2010}'..='\u{2015}' => Fold::Space,

        // Hebrew wide and ligature presentation forms
        '\u{FB20}' | '\u{FB21}' | '\u{FB2E}' | '\u{FB2F}' | '\u{FB30}' | '\u{FB4F}' => {
            Fold::Keep('\u{05D0}')
        }
        '\u{FB22}' => Fold::Keep('\u{05D3}'),
        '\u{FB23}' => Fold::Keep('\u{05D4}'),
        '\u{FB24}' => Fold::Keep('\u{05DB}'),
        '\u{FB25}' => Fold::Keep('\u{05DC}'),
        '\u{FB26}' => Fold::Keep('\u{05DD}'),
        '\u{FB27}' => Fold::Keep('\u{05E8}'),
        '\u{FB28}' => Fold::Keep('\u{05EA}'),
        '\u{FB29}' => Fold::Space,
        '\u{05BE}' | '\u{05C0}' | '\u{05C3}' => Fold::Space,

        // Greek final sigma collates as sigma
        'ς' => Fold::Keep('σ'),

        c if is_collation_punctuation(c) => Fold::Space,
        c if c.is_whitespace() => Fold::Space,
        c => Fold::Keep(c),
    }
}

fn is_collation_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '؟' | '،' | '٪' | '«' | '»' | '‘' | '’' | '“' | '”' | '–' | '—' | '…' | '·'
        )
}

/// Fold text into its collation form.
///
/// The function is pure: the same input always yields the same key, and the
/// output never starts or ends with whitespace nor contains runs of it.
pub fn strip_for_collation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfd() {
        if is_combining_mark(c) {
            continue;
        }

        match fold_char(c) {
            Fold::Drop => {}
            Fold::Space => pending_space = !out.is_empty(),
            Fold::Keep(c) => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.extend(c.to_lowercase());
            }
        }
    }

    out
}

/// First collation-significant character of `text`, used for letter headings
pub fn first_collation_char(text: &str) -> Option<char> {
    strip_for_collation(text).chars().next()
}

/// Left-justify `text` to `width` characters, padding with spaces
pub fn justify(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut out = String::with_capacity(text.len() + width.saturating_sub(len));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}
