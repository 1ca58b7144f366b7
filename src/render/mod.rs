//! Rendering compiled indexes.
//!
//! A [`Renderer`] turns an [`IndexDocument`] into the text of the output
//! document. The built-in renderers are selected with [`Template`]:
//!
//! - [`Template::Scripture`] - plain text, one line per reference
//! - [`Template::Subject`] - plain text with indented subentries
//! - [`Template::Latex`] - a `theindex` environment for LaTeX
//! - [`Template::Fodt`] - a flat OpenDocument text document
//! - [`Template::Json`] - the document tree as JSON

pub mod fodt;
pub mod json;
pub mod latex;
pub mod text;

use crate::error::Result;
use crate::index::{IndexDocument, Mode};
use crate::utils::Language;
use serde::{Deserialize, Serialize};

pub use fodt::{FodtRenderer, xml_escape};
pub use json::JsonRenderer;
pub use latex::{LatexRenderer, latex_escape};
pub use text::TextRenderer;

/// Settings shared by all renderers
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext {
    pub language: Language,
}

impl RenderContext {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

/// Turns a compiled index into output text
pub trait Renderer {
    fn render(&self, document: &IndexDocument, context: &RenderContext) -> Result<String>;
}

/// Built-in output templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Book headings with `chapter:verse<TAB>pages` lines
    Scripture,
    /// Letter headings with entries, subentries indented below
    Subject,
    /// LaTeX `theindex` environment
    Latex,
    /// Flat OpenDocument text (`.fodt`)
    Fodt,
    /// JSON document tree
    Json,
}

impl Template {
    /// Template used when none is configured
    pub fn default_for(mode: Mode) -> Self {
        match mode {
            Mode::Scripture => Template::Scripture,
            Mode::Subject => Template::Subject,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Scripture => "scripture",
            Template::Subject => "subject",
            Template::Latex => "latex",
            Template::Fodt => "fodt",
            Template::Json => "json",
        }
    }

    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            Template::Scripture => Box::new(TextRenderer::flat()),
            Template::Subject => Box::new(TextRenderer::nested()),
            Template::Latex => Box::new(LatexRenderer),
            Template::Fodt => Box::new(FodtRenderer),
            Template::Json => Box::new(JsonRenderer::default()),
        }
    }
}

/// Render `document` with `template`
pub fn render(document: &IndexDocument, template: Template, context: &RenderContext) -> Result<String> {
    template.renderer().render(document, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_follows_mode() {
        assert_eq!(Template::default_for(Mode::Scripture), Template::Scripture);
        assert_eq!(Template::default_for(Mode::Subject), Template::Subject);
    }

    #[test]
    fn test_template_names() {
        let template: Template = serde_json::from_str("\"latex\"").unwrap();
        assert_eq!(template, Template::Latex);
        assert_eq!(Template::Json.as_str(), "json");

        let template: Template = serde_json::from_str("\"fodt\"").unwrap();
        assert_eq!(template, Template::Fodt);
    }
}
