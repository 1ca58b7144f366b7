//! Target languages of the rendered index

use crate::utils::collation::Script;
use serde::{Deserialize, Serialize};

/// Text direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

/// Output language for book names, separators and digits
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en", alias = "english")]
    #[value(name = "en", alias = "english")]
    English,
    #[serde(rename = "ar", alias = "arabic")]
    #[value(name = "ar", alias = "arabic")]
    Arabic,
    #[serde(rename = "el", alias = "greek")]
    #[value(name = "el", alias = "greek")]
    Greek,
    #[serde(rename = "he", alias = "hebrew")]
    #[value(name = "he", alias = "hebrew")]
    Hebrew,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
            Language::Greek => "el",
            Language::Hebrew => "he",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Language::Arabic | Language::Hebrew => Direction::Rtl,
            Language::English | Language::Greek => Direction::Ltr,
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction() == Direction::Rtl
    }

    pub fn script(&self) -> Script {
        match self {
            Language::English => Script::Latin,
            Language::Arabic => Script::Arabic,
            Language::Greek => Script::Greek,
            Language::Hebrew => Script::Hebrew,
        }
    }

    /// Separator between items of a list (verses, pages)
    pub fn list_separator(&self) -> &'static str {
        match self {
            Language::Arabic => "،",
            _ => ",",
        }
    }

    /// Polyglossia environment name used by the LaTeX template
    pub fn polyglossia_environment(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Arabic => "Arabic",
            Language::Greek => "greek",
            Language::Hebrew => "hebrew",
        }
    }

    /// Convert Western digits to the digits used by this language
    pub fn localize_digits(&self, text: &str) -> String {
        match self.script() {
            Script::Arabic => to_arabic_indic(text),
            _ => text.to_string(),
        }
    }
}

const ARABIC_INDIC_ZERO: u32 = 0x0660;

/// Replace ASCII digits with Arabic-Indic digits
pub fn to_arabic_indic(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => {
                char::from_u32(ARABIC_INDIC_ZERO + d).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Replace Arabic-Indic and Extended Arabic-Indic digits with ASCII digits
pub fn to_western_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_conversion() {
        assert_eq!(to_arabic_indic("3:16"), "٣:١٦");
        assert_eq!(to_western_digits("٣:١٦"), "3:16");
        assert_eq!(to_western_digits("۱۲"), "12");
    }

    #[test]
    fn test_localize_digits_only_for_arabic() {
        assert_eq!(Language::Arabic.localize_digits("12,45"), "١٢,٤٥");
        assert_eq!(Language::Hebrew.localize_digits("12"), "12");
    }

    #[test]
    fn test_direction_and_separator() {
        assert!(Language::Arabic.is_rtl());
        assert!(Language::Hebrew.is_rtl());
        assert!(!Language::English.is_rtl());
        assert_eq!(Language::Arabic.list_separator(), "،");
        assert_eq!(Language::English.list_separator(), ",");
    }

    #[test]
    fn test_language_from_config_code() {
        let lang: Language = serde_json::from_str("\"ar\"").unwrap();
        assert_eq!(lang, Language::Arabic);
        let lang: Language = serde_json::from_str("\"english\"").unwrap();
        assert_eq!(lang, Language::English);
    }
}
