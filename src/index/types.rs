use crate::error::{IndexError, Result};
use crate::render::Template;
use crate::utils::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Width that subject items and subitems are justified to in sort keys
pub const SUBJECT_KEY_WIDTH: usize = 50;

/// Default `entry` item that marks an embedded scripture reference
pub const DEFAULT_SCRIPTURE_KEYWORD: &str = "scripture";

/// Kind of index being compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Canonical book/chapter/verse order, one heading per book
    Scripture,
    /// Alphabetic order, one heading per initial letter
    Subject,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Scripture => "scripture",
            Mode::Subject => "subject",
        }
    }
}

/// Configuration for index compilation, optionally loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Language of book names, digits and list separators in the output
    #[serde(default)]
    pub language: Language,

    /// `entry` item whose subitem holds scripture references
    #[serde(default = "default_scripture_keyword")]
    pub scripture_keyword: String,

    /// Output template; None selects the default for the mode
    #[serde(default)]
    pub template: Option<Template>,
}

fn default_scripture_keyword() -> String {
    DEFAULT_SCRIPTURE_KEYWORD.to_string()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            scripture_keyword: default_scripture_keyword(),
            template: None,
        }
    }
}

impl IndexConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            IndexError::config(format!("failed to read config file {}", path.display()))
                .with_source(e)
        })?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Whether `item` is the scripture keyword (case-insensitive)
    pub fn is_scripture_keyword(&self, item: &str) -> bool {
        item.trim().to_lowercase() == self.scripture_keyword.trim().to_lowercase()
    }

    /// Template to render with in `mode`
    pub fn template_for(&self, mode: Mode) -> Template {
        self.template.unwrap_or_else(|| Template::default_for(mode))
    }
}
