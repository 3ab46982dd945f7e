// ABOUTME: Slide layout types and per-slide layout configuration
// ABOUTME: Controls title size, alignment, background and extra style classes

use crate::errors::{DeckError, Result};
use std::fmt;
use std::str::FromStr;

/// Structural arrangement of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutType {
    /// Title with an optional subtitle.
    Title,
    /// Title and a single content area.
    #[default]
    TitleContent,
    /// Title and two side-by-side columns.
    TwoColumns,
    /// Title and two content areas.
    TitleTwoContent,
    /// Title, two column headers and two columns.
    Comparison,
    /// Large title used as a section break.
    Section,
    /// No title, content only.
    Blank,
    /// Centered image with caption.
    ImageWithCaption,
    /// Quote with optional attribution.
    Quote,
}

impl LayoutType {
    pub const ALL: [LayoutType; 9] = [
        LayoutType::Title,
        LayoutType::TitleContent,
        LayoutType::TwoColumns,
        LayoutType::TitleTwoContent,
        LayoutType::Comparison,
        LayoutType::Section,
        LayoutType::Blank,
        LayoutType::ImageWithCaption,
        LayoutType::Quote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Title => "title",
            LayoutType::TitleContent => "title_content",
            LayoutType::TwoColumns => "two_columns",
            LayoutType::TitleTwoContent => "title_two_content",
            LayoutType::Comparison => "comparison",
            LayoutType::Section => "section",
            LayoutType::Blank => "blank",
            LayoutType::ImageWithCaption => "image_with_caption",
            LayoutType::Quote => "quote",
        }
    }

    /// Whether content for this layout is placed in the two columns.
    pub fn is_multi_column(&self) -> bool {
        matches!(
            self,
            LayoutType::TwoColumns | LayoutType::Comparison | LayoutType::TitleTwoContent
        )
    }

    /// Class name used on the HTML section, e.g. `layout-two-columns`.
    pub fn css_class(&self) -> String {
        format!("layout-{}", self.as_str().replace('_', "-"))
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading level used for the slide title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleSize {
    H1,
    #[default]
    H2,
    H3,
}

impl TitleSize {
    pub fn tag(&self) -> &'static str {
        match self {
            TitleSize::H1 => "h1",
            TitleSize::H2 => "h2",
            TitleSize::H3 => "h3",
        }
    }

    /// Title font size in points for the PPTX renderer.
    pub fn points(&self) -> u32 {
        match self {
            TitleSize::H1 => 44,
            TitleSize::H2 => 36,
            TitleSize::H3 => 28,
        }
    }
}

impl FromStr for TitleSize {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h1" => Ok(TitleSize::H1),
            "h2" => Ok(TitleSize::H2),
            "h3" => Ok(TitleSize::H3),
            other => Err(DeckError::validation(
                "title_size",
                format!("unknown title size {:?}, expected h1, h2 or h3", other),
            )),
        }
    }
}

/// Horizontal alignment of slide content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl ContentAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentAlign::Left => "left",
            ContentAlign::Center => "center",
            ContentAlign::Right => "right",
        }
    }

    /// DrawingML paragraph alignment value.
    pub fn drawingml(&self) -> &'static str {
        match self {
            ContentAlign::Left => "l",
            ContentAlign::Center => "ctr",
            ContentAlign::Right => "r",
        }
    }
}

impl FromStr for ContentAlign {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(ContentAlign::Left),
            "center" | "centre" => Ok(ContentAlign::Center),
            "right" => Ok(ContentAlign::Right),
            other => Err(DeckError::validation(
                "content_align",
                format!("unknown alignment {:?}, expected left, center or right", other),
            )),
        }
    }
}

/// Per-slide layout options. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutConfig {
    pub title_size: TitleSize,
    pub content_align: ContentAlign,
    /// Background color or image URL.
    pub background: Option<String>,
    extra_classes: Vec<String>,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_size(mut self, size: TitleSize) -> Self {
        self.title_size = size;
        self
    }

    pub fn content_align(mut self, align: ContentAlign) -> Self {
        self.content_align = align;
        self
    }

    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Add a style class. Duplicates are ignored; insertion order is kept.
    pub fn extra_class(mut self, class: impl Into<String>) -> Result<Self> {
        let class = class.into();
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(DeckError::validation(
                "extra_classes",
                format!("{:?} is not a single class name", class),
            ));
        }
        if !self.extra_classes.contains(&class) {
            self.extra_classes.push(class);
        }
        Ok(self)
    }

    pub fn extra_classes_from<I, S>(self, classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        classes
            .into_iter()
            .try_fold(self, |config, class| config.extra_class(class))
    }

    pub fn extra_classes(&self) -> &[String] {
        &self.extra_classes
    }
}
