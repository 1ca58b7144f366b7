//! JSON template: the compiled document tree

use crate::error::{IndexError, Result};
use crate::index::{HeadingItem, HeadingKey, IndexDocument, IndexEntry};
use crate::render::{RenderContext, Renderer};
use crate::utils::Language;
use serde::Serialize;

/// Serialises the document tree with `serde_json`
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Serialize)]
struct DocumentView {
    mode: &'static str,
    language: &'static str,
    headings: Vec<HeadingView>,
}

#[derive(Serialize)]
struct HeadingView {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    book: Option<u8>,
    items: Vec<ItemView>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ItemView {
    Entry(EntryView),
    Group { title: String, entries: Vec<EntryView> },
}

#[derive(Serialize)]
struct EntryView {
    text: String,
    full_text: String,
    pages: String,
    locations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<bool>,
}

impl EntryView {
    fn new(entry: &IndexEntry, language: Language) -> Self {
        Self {
            text: entry.entry_text(language),
            full_text: entry.full_text(language),
            pages: entry.pages().render(language),
            locations: entry.pages().sorted().iter().map(|p| p.to_string()).collect(),
            resolved: entry.reference().map(|r| r.is_resolved()),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, document: &IndexDocument, context: &RenderContext) -> Result<String> {
        let language = context.language;

        let headings = document
            .headings
            .iter()
            .map(|heading| HeadingView {
                title: heading.title(language),
                book: match heading.key {
                    HeadingKey::Book(number) => Some(number),
                    _ => None,
                },
                items: heading
                    .items
                    .iter()
                    .map(|item| match item {
                        HeadingItem::Entry(entry) => ItemView::Entry(EntryView::new(entry, language)),
                        HeadingItem::Group(group) => ItemView::Group {
                            title: group.title.clone(),
                            entries: group
                                .entries
                                .iter()
                                .map(|entry| EntryView::new(entry, language))
                                .collect(),
                        },
                    })
                    .collect(),
            })
            .collect();

        let view = DocumentView {
            mode: document.mode.as_str(),
            language: language.code(),
            headings,
        };

        let mut json = if self.pretty {
            serde_json::to_string_pretty(&view)
        } else {
            serde_json::to_string(&view)
        }
        .map_err(|e| IndexError::render("failed to serialise index as JSON").with_source(e))?;
        json.push('\n');

        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::parse_references;
    use crate::index::{Mode, PageValue, compile};
    use serde_json::Value;

    #[test]
    fn test_json_tree() {
        let mut entries = Vec::new();
        for (text, page) in [("John 3:16", 12), ("Jn 3:16", 45), ("Hezekiah 1:1", 3)] {
            let reference = parse_references(text).refs.remove(0);
            entries.push(IndexEntry::scripture(reference, &PageValue::from(page), None).unwrap());
        }
        let doc = compile(entries, Mode::Scripture);

        let out = JsonRenderer::default()
            .render(&doc, &RenderContext::default())
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["mode"], "scripture");
        assert_eq!(value["language"], "en");
        assert_eq!(value["headings"][0]["title"], "John");
        assert_eq!(value["headings"][0]["book"], 43);

        let entry = &value["headings"][0]["items"][0];
        assert_eq!(entry["type"], "entry");
        assert_eq!(entry["text"], "3:16");
        assert_eq!(entry["full_text"], "John 3:16");
        assert_eq!(entry["pages"], "12,45");
        assert_eq!(entry["locations"], serde_json::json!(["12", "45"]));
        assert_eq!(entry["resolved"], true);

        let unresolved = &value["headings"][1];
        assert!(unresolved.get("book").is_none());
        assert_eq!(unresolved["items"][0]["resolved"], false);
    }

    #[test]
    fn test_json_subject_group() {
        let entries = vec![
            IndexEntry::subject("Grace|means of", &PageValue::from(3), Some("1")).unwrap(),
        ];
        let doc = compile(entries, Mode::Subject);

        let out = JsonRenderer { pretty: false }
            .render(&doc, &RenderContext::default())
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        let group = &value["headings"][0]["items"][0];
        assert_eq!(group["type"], "group");
        assert_eq!(group["title"], "Grace");
        assert_eq!(group["entries"][0]["text"], "means of");
        assert_eq!(group["entries"][0]["pages"], "3n1");
        assert!(group["entries"][0].get("resolved").is_none());
    }
}
