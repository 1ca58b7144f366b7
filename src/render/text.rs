//! Plain text templates

use crate::error::Result;
use crate::index::{HeadingItem, IndexDocument, IndexEntry};
use crate::render::{RenderContext, Renderer};
use crate::utils::Language;
use std::fmt::Write;

/// Plain text index: a title line per heading, then one line per entry with
/// its pages after a tab. Headings are separated by a blank line.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    /// Indent subentries under their item instead of writing them in full
    nested: bool,
}

impl TextRenderer {
    /// Every entry on its own line (the scripture template)
    pub fn flat() -> Self {
        Self { nested: false }
    }

    /// Subentries indented below their item (the subject template)
    pub fn nested() -> Self {
        Self { nested: true }
    }

    fn write_entry(out: &mut String, text: &str, entry: &IndexEntry, language: Language) -> Result<()> {
        writeln!(out, "{}\t{}", text, entry.pages().render(language))?;
        Ok(())
    }
}

impl Renderer for TextRenderer {
    fn render(&self, document: &IndexDocument, context: &RenderContext) -> Result<String> {
        let language = context.language;
        let mut out = String::new();

        for (i, heading) in document.headings.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", heading.title(language))?;

            // Item text of the last direct entry, for folding its subentries
            let mut previous: Option<&str> = None;

            for item in &heading.items {
                match item {
                    HeadingItem::Entry(entry) => {
                        Self::write_entry(&mut out, &entry.entry_text(language), entry, language)?;
                        previous = entry.item();
                    }
                    HeadingItem::Group(group) if self.nested => {
                        if previous != Some(group.title.as_str()) {
                            writeln!(out, "{}", group.title)?;
                        }
                        for entry in &group.entries {
                            let text = format!("\t{}", entry.entry_text(language));
                            Self::write_entry(&mut out, &text, entry, language)?;
                        }
                        previous = None;
                    }
                    HeadingItem::Group(group) => {
                        for entry in &group.entries {
                            Self::write_entry(&mut out, &entry.full_text(language), entry, language)?;
                        }
                        previous = None;
                    }
                }
            }
        }

        Ok(out)
    }
}
