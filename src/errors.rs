// ABOUTME: Error types for the reveal-deck library
// ABOUTME: Identifies the offending slide and content item for every failure

use crate::content::ContentType;
use crate::layout::LayoutType;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Identifies a slide by its position in the presentation and its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRef {
    pub index: usize,
    pub title: String,
}

impl SlideRef {
    pub fn new(index: usize, title: &str) -> Self {
        Self {
            index,
            title: title.to_string(),
        }
    }
}

impl fmt::Display for SlideRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide {} \"{}\"", self.index + 1, self.title)
    }
}

/// Identifies a content item within a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    /// `None` for the slide's main content, `Some(0 | 1)` for a column.
    pub column: Option<usize>,
    pub position: usize,
    pub kind: ContentType,
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(
                f,
                "column {} item {} ({})",
                column, self.position, self.kind
            ),
            None => write!(f, "item {} ({})", self.position, self.kind),
        }
    }
}

fn slide_prefix(slide: &Option<SlideRef>) -> String {
    match slide {
        Some(slide) => format!("{}: ", slide),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("{}invalid `{field}`: {message}", slide_prefix(.slide))]
    ValidationError {
        slide: Option<SlideRef>,
        field: &'static str,
        message: String,
    },

    #[error("{}column index {index} is out of range, expected 0 or 1", slide_prefix(.slide))]
    InvalidColumnError {
        slide: Option<SlideRef>,
        index: usize,
    },

    #[error("{slide}: layout `{layout}` {message}")]
    LayoutError {
        slide: SlideRef,
        layout: LayoutType,
        message: String,
    },

    #[error("{slide}, {item}: failed to load asset {location}: {reason}")]
    AssetError {
        slide: SlideRef,
        item: ContentRef,
        location: String,
        reason: String,
    },

    #[error("{slide}, {item}: cannot be represented in {format}: {reason}")]
    UnsupportedContentError {
        slide: SlideRef,
        item: ContentRef,
        format: &'static str,
        reason: String,
    },

    #[error("Failed to write {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("PPTX generation error: {0}")]
    PptxError(String),
}

impl DeckError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DeckError::ValidationError {
            slide: None,
            field,
            message: message.into(),
        }
    }

    /// Attach the slide to a validation or column error raised while building it.
    pub(crate) fn in_slide(self, slide_ref: SlideRef) -> Self {
        match self {
            DeckError::ValidationError { field, message, .. } => DeckError::ValidationError {
                slide: Some(slide_ref),
                field,
                message,
            },
            DeckError::InvalidColumnError { index, .. } => DeckError::InvalidColumnError {
                slide: Some(slide_ref),
                index,
            },
            other => other,
        }
    }
}

// Implement conversion from zip errors
impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
