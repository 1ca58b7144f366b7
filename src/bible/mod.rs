pub mod books;
pub mod parser;
pub mod reference;

pub use books::{BOOKS, Book, book_by_number, lookup_book};
pub use parser::{ReferenceList, parse_references};
pub use reference::{Markup, VerseReference, VerseStyle};
