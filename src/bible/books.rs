//! The 66 books in canonical order, with English and Arabic names.

use crate::utils::{Language, strip_for_collation, to_western_digits};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// A book of the Bible
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Book {
    /// Canonical position, 1 (Genesis) to 66 (Revelation)
    pub number: u8,
    pub name: &'static str,
    pub abbrev: &'static str,
    pub arabic: &'static str,
    pub arabic_abbrev: &'static str,
    aliases: &'static [&'static str],
}

impl Book {
    /// Display name in `language`; languages without a name table use English
    pub fn name_in(&self, language: Language) -> &'static str {
        match language {
            Language::Arabic => self.arabic,
            _ => self.name,
        }
    }

    /// Abbreviated name in `language`
    pub fn abbrev_in(&self, language: Language) -> &'static str {
        match language {
            Language::Arabic => self.arabic_abbrev,
            _ => self.abbrev,
        }
    }

    /// Books with a single chapter, cited by verse alone
    pub fn is_single_chapter(&self) -> bool {
        SINGLE_CHAPTER_BOOKS.contains(&self.number)
    }
}

/// Obadiah, Philemon, 2 John, 3 John, Jude
const SINGLE_CHAPTER_BOOKS: [u8; 5] = [31, 57, 63, 64, 65];

macro_rules! book {
    ($num:expr, $name:expr, $abbrev:expr, $arabic:expr, $arabic_abbrev:expr, [$($alias:expr),* $(,)?]) => {
        Book {
            number: $num,
            name: $name,
            abbrev: $abbrev,
            arabic: $arabic,
            arabic_abbrev: $arabic_abbrev,
            aliases: &[$($alias),*],
        }
    };
}

pub static BOOKS: [Book; 66] = [
    book!(1, "Genesis", "Gen", "التكوين", "تك", ["Ge", "Gn", "تكوين"]),
    book!(2, "Exodus", "Exod", "الخروج", "خر", ["Ex", "Exo", "خروج"]),
    book!(3, "Leviticus", "Lev", "اللاويين", "لا", ["Le", "Lv", "لاويين"]),
    book!(4, "Numbers", "Num", "العدد", "عد", ["Nu", "Nm", "Nb", "عدد"]),
    book!(5, "Deuteronomy", "Deut", "التثنية", "تث", ["Dt", "De", "Deu", "تثنية"]),
    book!(6, "Joshua", "Josh", "يشوع", "يش", ["Jos", "Jsh"]),
    book!(7, "Judges", "Judg", "القضاة", "قض", ["Jdg", "Jg", "Jdgs", "قضاة"]),
    book!(8, "Ruth", "Ruth", "راعوث", "را", ["Rth", "Ru"]),
    book!(9, "1 Samuel", "1 Sam", "صموئيل الأول", "1صم", ["1Sa", "1Sm", "1 صموئيل"]),
    book!(10, "2 Samuel", "2 Sam", "صموئيل الثاني", "2صم", ["2Sa", "2Sm", "2 صموئيل"]),
    book!(11, "1 Kings", "1 Kgs", "الملوك الأول", "1مل", ["1Ki", "1Kin", "1 ملوك"]),
    book!(12, "2 Kings", "2 Kgs", "الملوك الثاني", "2مل", ["2Ki", "2Kin", "2 ملوك"]),
    book!(13, "1 Chronicles", "1 Chr", "أخبار الأيام الأول", "1أخ", ["1Ch", "1Chron", "1 أخبار"]),
    book!(14, "2 Chronicles", "2 Chr", "أخبار الأيام الثاني", "2أخ", ["2Ch", "2Chron", "2 أخبار"]),
    book!(15, "Ezra", "Ezra", "عزرا", "عز", ["Ezr"]),
    book!(16, "Nehemiah", "Neh", "نحميا", "نح", ["Ne"]),
    book!(17, "Esther", "Esth", "أستير", "أس", ["Est", "Es"]),
    book!(18, "Job", "Job", "أيوب", "أي", ["Jb"]),
    book!(19, "Psalms", "Ps", "المزامير", "مز", ["Psalm", "Psa", "Pss", "Psm", "مزمور", "مزامير"]),
    book!(20, "Proverbs", "Prov", "الأمثال", "أم", ["Pr", "Prv", "Pro", "أمثال"]),
    book!(21, "Ecclesiastes", "Eccl", "الجامعة", "جا", ["Ec", "Ecc", "Qoh", "جامعة"]),
    book!(22, "Song of Songs", "Song", "نشيد الأنشاد", "نش", ["Song of Solomon", "SoS", "Sng", "Canticles"]),
    book!(23, "Isaiah", "Isa", "إشعياء", "إش", ["Is"]),
    book!(24, "Jeremiah", "Jer", "إرميا", "إر", ["Je", "Jr"]),
    book!(25, "Lamentations", "Lam", "مراثي إرميا", "مرا", ["La", "مراثي"]),
    book!(26, "Ezekiel", "Ezek", "حزقيال", "حز", ["Eze", "Ezk"]),
    book!(27, "Daniel", "Dan", "دانيال", "دا", ["Da", "Dn"]),
    book!(28, "Hosea", "Hos", "هوشع", "هو", ["Ho"]),
    book!(29, "Joel", "Joel", "يوئيل", "يوئ", ["Jl"]),
    book!(30, "Amos", "Amos", "عاموس", "عا", ["Am"]),
    book!(31, "Obadiah", "Obad", "عوبديا", "عو", ["Ob", "Oba"]),
    book!(32, "Jonah", "Jonah", "يونان", "يون", ["Jon", "Jnh"]),
    book!(33, "Micah", "Mic", "ميخا", "مي", ["Mi"]),
    book!(34, "Nahum", "Nah", "ناحوم", "نا", ["Na"]),
    book!(35, "Habakkuk", "Hab", "حبقوق", "حب", ["Hb"]),
    book!(36, "Zephaniah", "Zeph", "صفنيا", "صف", ["Zep", "Zp"]),
    book!(37, "Haggai", "Hag", "حجي", "حج", ["Hg"]),
    book!(38, "Zechariah", "Zech", "زكريا", "زك", ["Zec", "Zc"]),
    book!(39, "Malachi", "Mal", "ملاخي", "ملا", ["Ml"]),
    book!(40, "Matthew", "Matt", "متى", "مت", ["Mt", "Mat"]),
    book!(41, "Mark", "Mark", "مرقس", "مر", ["Mk", "Mr", "Mrk"]),
    book!(42, "Luke", "Luke", "لوقا", "لو", ["Lk", "Luk"]),
    book!(43, "John", "John", "يوحنا", "يو", ["Jn", "Jhn", "Joh"]),
    book!(44, "Acts", "Acts", "أعمال الرسل", "أع", ["Ac", "Act", "أعمال"]),
    book!(45, "Romans", "Rom", "رومية", "رو", ["Ro", "Rm"]),
    book!(46, "1 Corinthians", "1 Cor", "كورنثوس الأولى", "1كو", ["1Co", "1 كورنثوس"]),
    book!(47, "2 Corinthians", "2 Cor", "كورنثوس الثانية", "2كو", ["2Co", "2 كورنثوس"]),
    book!(48, "Galatians", "Gal", "غلاطية", "غل", ["Ga"]),
    book!(49, "Ephesians", "Eph", "أفسس", "أف", ["Ephes"]),
    book!(50, "Philippians", "Phil", "فيلبي", "في", ["Php", "Pp"]),
    book!(51, "Colossians", "Col", "كولوسي", "كو", ["Co"]),
    book!(52, "1 Thessalonians", "1 Thess", "تسالونيكي الأولى", "1تس", ["1Th", "1Thes", "1 تسالونيكي"]),
    book!(53, "2 Thessalonians", "2 Thess", "تسالونيكي الثانية", "2تس", ["2Th", "2Thes", "2 تسالونيكي"]),
    book!(54, "1 Timothy", "1 Tim", "تيموثاوس الأولى", "1تي", ["1Ti", "1Tm", "1 تيموثاوس"]),
    book!(55, "2 Timothy", "2 Tim", "تيموثاوس الثانية", "2تي", ["2Ti", "2Tm", "2 تيموثاوس"]),
    book!(56, "Titus", "Titus", "تيطس", "تي", ["Tit"]),
    book!(57, "Philemon", "Phlm", "فليمون", "فل", ["Phm", "Philem"]),
    book!(58, "Hebrews", "Heb", "العبرانيين", "عب", ["He", "عبرانيين"]),
    book!(59, "James", "Jas", "يعقوب", "يع", ["Jm", "Jam"]),
    book!(60, "1 Peter", "1 Pet", "بطرس الأولى", "1بط", ["1Pe", "1Pt", "1 بطرس"]),
    book!(61, "2 Peter", "2 Pet", "بطرس الثانية", "2بط", ["2Pe", "2Pt", "2 بطرس"]),
    book!(62, "1 John", "1 John", "يوحنا الأولى", "1يو", ["1Jn", "1Jo", "1 يوحنا"]),
    book!(63, "2 John", "2 John", "يوحنا الثانية", "2يو", ["2Jn", "2Jo", "2 يوحنا"]),
    book!(64, "3 John", "3 John", "يوحنا الثالثة", "3يو", ["3Jn", "3Jo", "3 يوحنا"]),
    book!(65, "Jude", "Jude", "يهوذا", "يه", ["Jud", "Jd"]),
    book!(66, "Revelation", "Rev", "رؤيا", "رؤي", ["Re", "Rv", "Revelations", "Apocalypse", "رؤيا يوحنا"]),
];

/// Normalised name → book, covering names, abbreviations and aliases
static BOOK_LOOKUP: LazyLock<FxHashMap<String, &'static Book>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    for book in BOOKS.iter() {
        let names = [book.name, book.abbrev, book.arabic, book.arabic_abbrev];
        for name in names.iter().chain(book.aliases.iter()) {
            map.insert(normalize_book_name(name), book);
        }
    }
    map
});

/// Leading ordinal words accepted in place of 1/2/3
const ORDINAL_WORDS: [(&str, &str); 6] = [
    ("iii", "3"),
    ("ii", "2"),
    ("i", "1"),
    ("first", "1"),
    ("second", "2"),
    ("third", "3"),
];

/// Normalise a book name for lookup: collation-stripped, Western digits,
/// leading ordinal words turned into digits, and no spaces.
pub fn normalize_book_name(name: &str) -> String {
    let stripped = strip_for_collation(&to_western_digits(name));

    let mut words: Vec<&str> = stripped.split(' ').filter(|w| !w.is_empty()).collect();
    if words.len() > 1 {
        if let Some((_, digit)) = ORDINAL_WORDS.iter().find(|(word, _)| *word == words[0]) {
            words[0] = digit;
        }
    }

    words.concat()
}

/// Look up a book by any of its names
pub fn lookup_book(name: &str) -> Option<&'static Book> {
    let key = normalize_book_name(name);
    if key.is_empty() {
        return None;
    }
    BOOK_LOOKUP.get(&key).copied()
}

/// Arabic proclitics (and, in, to) that may be fused to a book name
const ARABIC_PREFIXES: [char; 3] = ['و', 'ب', 'ل'];

/// Book matched from free text, with any fused prefix split off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMatch {
    pub book: &'static Book,
    pub prefix: Option<String>,
}

/// Look up a book, also trying the name with a fused Arabic prefix removed
pub fn match_book_name(name: &str) -> Option<BookMatch> {
    if let Some(book) = lookup_book(name) {
        return Some(BookMatch { book, prefix: None });
    }

    let trimmed = name.trim_start();
    let first = trimmed.chars().next()?;
    if !ARABIC_PREFIXES.contains(&first) {
        return None;
    }

    let rest = &trimmed[first.len_utf8()..];
    // Kasra may follow the prefix letter
    let rest = rest.trim_start_matches('\u{0650}');
    let book = lookup_book(rest)?;
    let prefix_len = trimmed.len() - rest.len();
    Some(BookMatch {
        book,
        prefix: Some(trimmed[..prefix_len].to_string()),
    })
}

/// Book at canonical position `number`
pub fn book_by_number(number: u8) -> Option<&'static Book> {
    BOOKS.get(usize::from(number).checked_sub(1)?)
}
