//! Flat OpenDocument text (`.fodt`) template.
//!
//! The index is a `text:section` of paragraphs: one `INDEX_HEADING`
//! paragraph per heading and one `INDEX_ENTRY` paragraph per entry, with
//! the pages after a tab. Subentries start with an extra tab. For
//! right-to-left languages both paragraph styles are written right to left.

use crate::error::Result;
use crate::index::{HeadingItem, IndexDocument, IndexEntry};
use crate::render::{RenderContext, Renderer};
use crate::utils::Language;
use std::fmt::Write;

const INDEX_SECTION: &str = "INDEX";
const INDEX_DIVISION_STYLE: &str = "DIVISION_INDEX";
const INDEX_HEADING_STYLE: &str = "INDEX_HEADING";
const INDEX_ENTRY_STYLE: &str = "INDEX_ENTRY";

/// Renders the index as a flat OpenDocument text document
#[derive(Debug, Clone, Copy, Default)]
pub struct FodtRenderer;

impl Renderer for FodtRenderer {
    fn render(&self, document: &IndexDocument, context: &RenderContext) -> Result<String> {
        let language = context.language;
        let mut out = String::new();

        // The document is written out as UTF-16LE
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-16"?>"#)?;
        writeln!(
            out,
            concat!(
                r#"<office:document xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0""#,
                r#" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0""#,
                r#" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0""#,
                r#" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0""#,
                r#" office:version="1.3" office:mimetype="application/vnd.oasis.opendocument.text">"#
            )
        )?;
        write_styles(&mut out, language)?;

        writeln!(out, "<office:body>")?;
        writeln!(out, "<office:text>")?;
        writeln!(
            out,
            r#"<text:section text:style-name="{}" text:name="{}">"#,
            INDEX_DIVISION_STYLE, INDEX_SECTION
        )?;

        for heading in &document.headings {
            paragraph(&mut out, INDEX_HEADING_STYLE, &xml_escape(&heading.title(language)))?;

            let mut previous: Option<&str> = None;
            for item in &heading.items {
                match item {
                    HeadingItem::Entry(entry) => {
                        entry_paragraph(&mut out, "", &entry.entry_text(language), entry, language)?;
                        previous = entry.item();
                    }
                    HeadingItem::Group(group) => {
                        if previous != Some(group.title.as_str()) {
                            paragraph(&mut out, INDEX_ENTRY_STYLE, &xml_escape(&group.title))?;
                        }
                        for entry in &group.entries {
                            entry_paragraph(&mut out, "<text:tab/>", &entry.entry_text(language), entry, language)?;
                        }
                        previous = None;
                    }
                }
            }
        }

        writeln!(out, "</text:section>")?;
        writeln!(out, "</office:text>")?;
        writeln!(out, "</office:body>")?;
        writeln!(out, "</office:document>")?;

        Ok(out)
    }
}

fn write_styles(out: &mut String, language: Language) -> Result<()> {
    let properties = if language.is_rtl() {
        r#"<style:paragraph-properties style:writing-mode="rl-tb"/>"#
    } else {
        ""
    };

    writeln!(out, "<office:styles>")?;
    writeln!(
        out,
        r#"<style:style style:name="{}" style:family="paragraph">{}<style:text-properties fo:font-weight="bold"/></style:style>"#,
        INDEX_HEADING_STYLE, properties
    )?;
    writeln!(
        out,
        r#"<style:style style:name="{}" style:family="paragraph">{}</style:style>"#,
        INDEX_ENTRY_STYLE, properties
    )?;
    writeln!(out, "</office:styles>")?;
    Ok(())
}

fn entry_paragraph(
    out: &mut String,
    indent: &str,
    entry_text: &str,
    entry: &IndexEntry,
    language: Language,
) -> Result<()> {
    let content = format!(
        "{}{}<text:tab/>{}",
        indent,
        xml_escape(entry_text),
        xml_escape(&entry.pages().render(language))
    );
    paragraph(out, INDEX_ENTRY_STYLE, &content)
}

fn paragraph(out: &mut String, style: &str, content: &str) -> Result<()> {
    writeln!(out, r#"<text:p text:style-name="{}">{}</text:p>"#, style, content)?;
    Ok(())
}

/// Escape XML markup characters
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
