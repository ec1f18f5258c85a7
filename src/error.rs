//! Error types for mdsite.
//!
//! [`MarkdownError`] covers the pure core: tokenizing, rendering and title
//! extraction. It never wraps I/O and is deterministic, so retrying the same
//! input always fails the same way.
//!
//! [`SiteError`] covers the file-tree layer in [`crate::site`], and wraps a
//! [`MarkdownError`] together with the path of the page that produced it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarkdownError {
    /// An inline delimiter (`**`, `*` or `` ` ``) occurs an odd number of times.
    #[error("invalid markdown: unclosed delimiter '{delimiter}' in text '{text}'")]
    MalformedInlineMarkup { delimiter: String, text: String },

    /// A leaf node was rendered without a value.
    #[error("leaf node <{}> has no value", .tag.as_deref().unwrap_or("text"))]
    MissingNodeValue { tag: Option<String> },

    /// A parent node was rendered without a tag or without children.
    #[error("invalid parent node <{}>: {reason}", .tag.as_deref().unwrap_or("?"))]
    InvalidNodeStructure {
        tag: Option<String>,
        reason: &'static str,
    },

    /// Title extraction found no `# ` heading line.
    #[error("no h1 heading found in markdown")]
    NoHeadingFound,
}

pub type Result<T> = std::result::Result<T, MarkdownError>;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot convert '{}': {source}", .path.display())]
    Markdown {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> SiteError {
        let path = path.into();
        move |source| SiteError::Io { path, source }
    }

    pub(crate) fn markdown(path: impl Into<PathBuf>) -> impl FnOnce(MarkdownError) -> SiteError {
        let path = path.into();
        move |source| SiteError::Markdown { path, source }
    }
}
