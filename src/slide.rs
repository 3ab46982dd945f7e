// ABOUTME: Slide builder: a titled slide with a layout, content and columns
// ABOUTME: Validation errors surface at the call site that added the content

use crate::content::{Content, MediaKind};
use crate::errors::{DeckError, Result, SlideRef};
use crate::layout::{LayoutConfig, LayoutType};

/// Number of columns available to multi-column layouts.
pub const COLUMN_COUNT: usize = 2;

/// One slide of a presentation.
///
/// Content added with the `add_*` methods goes to the main content area.
/// Multi-column layouts (two columns, comparison, title with two contents)
/// place content with [`Slide::add_to_column`]; main content on such a slide
/// renders full-width above the columns.
#[derive(Debug, Clone)]
pub struct Slide {
    index: usize,
    title: String,
    layout: LayoutType,
    layout_config: LayoutConfig,
    content: Vec<Content>,
    columns: [Vec<Content>; COLUMN_COUNT],
    comparison_headers: Option<(String, String)>,
}

impl Slide {
    pub(crate) fn new(index: usize, title: String) -> Self {
        Self {
            index,
            title,
            layout: LayoutType::default(),
            layout_config: LayoutConfig::default(),
            content: Vec::new(),
            columns: [Vec::new(), Vec::new()],
            comparison_headers: None,
        }
    }

    /// Zero-based position of this slide in its presentation.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn layout(&self) -> LayoutType {
        self.layout
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    pub fn column(&self, index: usize) -> &[Content] {
        self.columns.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn columns(&self) -> &[Vec<Content>; COLUMN_COUNT] {
        &self.columns
    }

    pub fn comparison_headers(&self) -> Option<(&str, &str)> {
        self.comparison_headers
            .as_ref()
            .map(|(left, right)| (left.as_str(), right.as_str()))
    }

    pub fn slide_ref(&self) -> SlideRef {
        SlideRef::new(self.index, &self.title)
    }

    fn has_column_content(&self) -> bool {
        self.columns.iter().any(|column| !column.is_empty())
    }

    fn layout_error(&self, layout: LayoutType, message: &str) -> DeckError {
        DeckError::LayoutError {
            slide: self.slide_ref(),
            layout,
            message: message.to_string(),
        }
    }

    fn push_checked(&mut self, content: Result<Content>) -> Result<&mut Self> {
        let content = content.map_err(|e| e.in_slide(self.slide_ref()))?;
        self.content.push(content);
        Ok(self)
    }

    /// Change the layout. Fails if the slide holds state the new layout
    /// cannot show: column content on a single-column layout, or comparison
    /// headers on anything but a comparison layout.
    pub fn set_layout(&mut self, layout: LayoutType) -> Result<&mut Self> {
        if !layout.is_multi_column() && self.has_column_content() {
            return Err(self.layout_error(
                layout,
                "has no columns but the slide already holds column content",
            ));
        }
        if layout != LayoutType::Comparison && self.comparison_headers.is_some() {
            return Err(self.layout_error(
                layout,
                "cannot show the comparison headers already set on the slide",
            ));
        }
        self.layout = layout;
        Ok(self)
    }

    /// Replace the layout configuration as a whole.
    pub fn configure_layout(&mut self, config: LayoutConfig) -> &mut Self {
        self.layout_config = config;
        self
    }

    pub fn add_content(&mut self, content: Content) -> &mut Self {
        self.content.push(content);
        self
    }

    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_content(Content::text(text))
    }

    pub fn add_bullet_points<I, S>(&mut self, points: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_content(Content::bullet_list(points))
    }

    pub fn add_numbered_list<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_content(Content::numbered_list(items))
    }

    pub fn add_code(&mut self, code: impl Into<String>, language: impl Into<String>) -> Result<&mut Self> {
        self.push_checked(Content::code(code, language))
    }

    pub fn add_image(&mut self, url: impl Into<String>, caption: Option<&str>) -> Result<&mut Self> {
        self.push_checked(Content::image(url, caption))
    }

    pub fn add_equation(&mut self, equation: impl Into<String>) -> Result<&mut Self> {
        self.push_checked(Content::equation(equation))
    }

    pub fn add_equation_with_legend<I, K, V>(
        &mut self,
        equation: impl Into<String>,
        description: I,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push_checked(Content::equation_with_legend(equation, description))
    }

    pub fn add_table<H, HS, R, RI, RS>(&mut self, headers: H, rows: R) -> Result<&mut Self>
    where
        H: IntoIterator<Item = HS>,
        HS: Into<String>,
        R: IntoIterator<Item = RI>,
        RI: IntoIterator<Item = RS>,
        RS: Into<String>,
    {
        self.push_checked(Content::table(headers, rows))
    }

    pub fn add_diagram(&mut self, source: impl Into<String>) -> &mut Self {
        self.add_content(Content::diagram(source))
    }

    pub fn add_media(&mut self, url: impl Into<String>, kind: MediaKind) -> Result<&mut Self> {
        self.push_checked(Content::media(url, kind))
    }

    pub fn add_markdown(&mut self, source: impl Into<String>) -> &mut Self {
        self.add_content(Content::markdown(source))
    }

    /// Append content to column 0 (left) or 1 (right).
    ///
    /// The index is checked before the layout, so an out-of-range index is
    /// always reported as [`DeckError::InvalidColumnError`]. The slide is left
    /// unchanged on error.
    pub fn add_to_column(&mut self, index: usize, content: Content) -> Result<&mut Self> {
        if index >= COLUMN_COUNT {
            return Err(DeckError::InvalidColumnError {
                slide: Some(self.slide_ref()),
                index,
            });
        }
        if !self.layout.is_multi_column() {
            return Err(self.layout_error(self.layout, "does not have columns"));
        }
        self.columns[index].push(content);
        Ok(self)
    }

    /// Set the two header labels of a comparison slide.
    pub fn add_comparison(
        &mut self,
        left_header: impl Into<String>,
        right_header: impl Into<String>,
    ) -> Result<&mut Self> {
        if self.layout != LayoutType::Comparison {
            return Err(self.layout_error(
                self.layout,
                "does not support comparison headers, use the comparison layout",
            ));
        }
        self.comparison_headers = Some((left_header.into(), right_header.into()));
        Ok(self)
    }
}
