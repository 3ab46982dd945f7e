// ABOUTME: Library module for the reveal-deck program.
// ABOUTME: Builds slide decks in code and exports them to reveal.js HTML or PPTX.

pub mod config;
pub mod content;
pub mod demo;
pub mod errors;
pub mod html;
pub mod layout;
pub mod markdown;
pub mod package;
pub mod pptx;
pub mod presentation;
pub mod resources;
pub mod shapes;
pub mod slide;
pub mod theme;
pub mod utils;

// Reexport common types and functions
pub use config::Config;
pub use content::{Content, ContentType, MediaKind};
pub use errors::{ContentRef, DeckError, Result, SlideRef};
pub use html::{render_presentation, write_html_to_file, HtmlOptions};
pub use layout::{ContentAlign, LayoutConfig, LayoutType, TitleSize};
pub use pptx::{build_pptx, generate_pptx, AspectRatio, PptxConfig};
pub use presentation::Presentation;
pub use slide::Slide;
pub use theme::{Theme, Transition};

#[cfg(test)]
mod tests;
