//! Error types for index compilation

use std::fmt;
use thiserror::Error;

/// Error kinds raised while compiling an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, unreadable or structurally invalid input file
    Input,
    /// Page or footnote value that is not a number
    Page,
    /// Invalid configuration (config file, language, template)
    Config,
    /// Renderer failure
    Render,
    /// I/O errors
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Input => "input",
            ErrorKind::Page => "page",
            ErrorKind::Config => "config",
            ErrorKind::Render => "render",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Index compilation error
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct IndexError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl IndexError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Input, message)
    }

    pub fn page(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Page, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn missing_column(column: &str) -> Self {
        Self::input(format!("missing required column '{}'", column))
    }
}

impl From<std::io::Error> for IndexError {
    fn from(err: std::io::Error) -> Self {
        IndexError::new(ErrorKind::Io, format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<csv::Error> for IndexError {
    fn from(err: csv::Error) -> Self {
        IndexError::input(format!("invalid delimited text: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::config(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<fmt::Error> for IndexError {
    fn from(err: fmt::Error) -> Self {
        IndexError::render("failed to format output").with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = IndexError::missing_column("page");
        assert_eq!(err.to_string(), "[input] missing required column 'page'");
    }

    #[test]
    fn test_page_error_kind() {
        let err = IndexError::page("invalid page number \"abc\"");
        assert_eq!(err.kind, ErrorKind::Page);
        assert!(err.source.is_none());
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: IndexError = io_err.into();

        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.source().unwrap().to_string().contains("no such file"));
    }

    #[test]
    fn test_json_conversion_is_config_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: IndexError = json_err.into();
        assert_eq!(err.kind, ErrorKind::Config);
    }
}
