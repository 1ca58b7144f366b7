//! LaTeX `theindex` template.
//!
//! Headings become `\item` lines (book names) or letter groups separated by
//! `\indexspace`; entries and subentries become `\subitem`s or `\item`s. For
//! languages other than English the whole index is wrapped in the polyglossia
//! environment of the language, and runs of text in another script are
//! wrapped in the matching `\text<language>{}` command.

use crate::error::Result;
use crate::index::{HeadingItem, HeadingKey, IndexDocument, IndexEntry, Mode};
use crate::render::{RenderContext, Renderer};
use crate::utils::{Language, Script};
use std::fmt::Write;

/// Renders the index as a LaTeX `theindex` environment
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexRenderer;

impl Renderer for LatexRenderer {
    fn render(&self, document: &IndexDocument, context: &RenderContext) -> Result<String> {
        let language = context.language;
        let mut out = String::new();

        let environment = (language != Language::English).then(|| language.polyglossia_environment());
        if let Some(env) = environment {
            writeln!(out, "\\begin{{{}}}", env)?;
        }
        writeln!(out, "\\begin{{theindex}}")?;

        for (i, heading) in document.headings.iter().enumerate() {
            if i > 0 {
                writeln!(out, "\\indexspace")?;
            }
            let title = text(&heading.title(language), language);

            match (&heading.key, document.mode) {
                (HeadingKey::Letter(_), _) | (_, Mode::Subject) => {
                    writeln!(out, "{{\\bfseries {}}}\\par\\nopagebreak", title)?;
                    write_subject_items(&mut out, &heading.items, language)?;
                }
                (_, Mode::Scripture) => {
                    writeln!(out, "\\item {}", title)?;
                    for entry in heading.entries() {
                        writeln!(out, "  \\subitem {}", line(&entry.entry_text(language), entry, language))?;
                    }
                }
            }
        }

        writeln!(out, "\\end{{theindex}}")?;
        if let Some(env) = environment {
            writeln!(out, "\\end{{{}}}", env)?;
        }

        Ok(out)
    }
}

fn write_subject_items(out: &mut String, items: &[HeadingItem], language: Language) -> Result<()> {
    let mut previous: Option<&str> = None;

    for item in items {
        match item {
            HeadingItem::Entry(entry) => {
                writeln!(out, "\\item {}", line(&entry.entry_text(language), entry, language))?;
                previous = entry.item();
            }
            HeadingItem::Group(group) => {
                if previous != Some(group.title.as_str()) {
                    writeln!(out, "\\item {}", text(&group.title, language))?;
                }
                for entry in &group.entries {
                    writeln!(out, "  \\subitem {}", line(&entry.entry_text(language), entry, language))?;
                }
                previous = None;
            }
        }
    }

    Ok(())
}

/// `text, pages` with the language's separator
fn line(entry_text: &str, entry: &IndexEntry, language: Language) -> String {
    format!(
        "{}{} {}",
        text(entry_text, language),
        language.list_separator(),
        entry.pages().render(language)
    )
}

/// Escape `value` and mark it up if its script differs from the language's
fn text(value: &str, language: Language) -> String {
    let escaped = latex_escape(value);
    if !value.chars().any(char::is_alphabetic) {
        return escaped;
    }

    let script = Script::detect(value);
    if script == language.script() {
        return escaped;
    }

    format!("\\text{}{{{}}}", script_language(script).polyglossia_environment().to_lowercase(), escaped)
}

fn script_language(script: Script) -> Language {
    match script {
        Script::Arabic => Language::Arabic,
        Script::Greek => Language::Greek,
        Script::Hebrew => Language::Hebrew,
        Script::Latin => Language::English,
    }
}

/// Escape LaTeX special characters
pub fn latex_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
