// ABOUTME: Presentation: ordered slides plus theme and transition
// ABOUTME: Entry point for building a deck and exporting it to HTML or PPTX

use crate::errors::Result;
use crate::html::{self, HtmlOptions};
use crate::pptx::{self, PptxConfig};
use crate::slide::Slide;
use crate::theme::{Theme, Transition};
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Presentation";

/// A slide deck.
///
/// The presentation owns its slides exclusively. Exporters only read it, so
/// rendering the same presentation twice yields the same HTML. A
/// `Presentation` has no internal locking: callers sharing one across threads
/// must synchronize mutation themselves.
#[derive(Debug, Clone)]
pub struct Presentation {
    title: String,
    theme: Theme,
    transition: Transition,
    slides: Vec<Slide>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(Theme::default(), Transition::default())
    }
}

impl Presentation {
    pub fn new(theme: Theme, transition: Transition) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            theme,
            transition,
            slides: Vec::new(),
        }
    }

    /// Create a presentation from theme and transition names, failing on
    /// names that are not recognized.
    pub fn from_names(theme: &str, transition: &str) -> Result<Self> {
        Ok(Self::new(theme.parse()?, transition.parse()?))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Append a new slide with the default title-and-content layout and
    /// return it for building.
    pub fn create_slide(&mut self, title: impl Into<String>) -> &mut Slide {
        let index = self.slides.len();
        self.slides.push(Slide::new(index, title.into()));
        &mut self.slides[index]
    }

    /// Render the presentation as an HTML document with default options.
    pub fn render(&self) -> String {
        self.render_with(&HtmlOptions::default())
    }

    pub fn render_with(&self, options: &HtmlOptions) -> String {
        html::render_presentation(self, options)
    }

    /// Write the HTML document to `path`. The parent directory must exist.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        self.export_with(path, &HtmlOptions::default())
    }

    pub fn export_with(&self, path: impl AsRef<Path>, options: &HtmlOptions) -> Result<()> {
        html::write_html_to_file(self, path.as_ref(), options)
    }

    /// Build the PowerPoint document and write it to `path`. Nothing is
    /// written unless every slide was converted.
    pub fn export_pptx(&self, path: impl AsRef<Path>) -> Result<()> {
        self.export_pptx_with(path, &PptxConfig::default())
    }

    pub fn export_pptx_with(&self, path: impl AsRef<Path>, config: &PptxConfig) -> Result<()> {
        pptx::generate_pptx(self, path.as_ref(), config)
    }
}
