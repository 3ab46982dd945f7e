// ABOUTME: Showcase deck demonstrating every layout and content kind
// ABOUTME: Used by the `demo` CLI command and as an end-to-end fixture

use crate::content::{Content, MediaKind};
use crate::errors::Result;
use crate::layout::{ContentAlign, LayoutConfig, LayoutType, TitleSize};
use crate::presentation::Presentation;
use crate::theme::{Theme, Transition};

/// Images and media referenced by the showcase deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseAssets {
    pub logo: String,
    pub manual_work: String,
    pub automated_work: String,
    pub video: String,
}

impl Default for ShowcaseAssets {
    fn default() -> Self {
        Self {
            logo: "https://revealjs.com/images/logo/reveal-black-text.svg".to_string(),
            manual_work: "https://img.buzzfeed.com/buzzfeed-static/static/2017-07/21/13/asset/buzzfeed-prod-fastlane-02/anigif_sub-buzz-22253-1500656718-1.gif".to_string(),
            automated_work: "https://gifdb.com/images/high/dexters-laboratory-day-for-science-oo5ar2xf119ufgfb.gif".to_string(),
            video: "https://www.youtube.com/watch?v=VuUcNIxLmiQ".to_string(),
        }
    }
}

const SAMPLE_CODE: &str = r#"
use reveal_deck::{Presentation, Theme, Transition};

// A black deck with fade transitions
let mut presentation = Presentation::new(Theme::Black, Transition::Fade);

// The opening slide
presentation
    .create_slide("Building Presentations with reveal-deck")
    .add_text("Quick and easy!");

presentation.export("my_presentation.html")?;
"#;

const CLOSING_MARKDOWN: &str = r#"
## Start Using reveal-deck Now!
#### Useful links:
- [reveal.js](https://revealjs.com/)
- [Mermaid](https://mermaid.js.org/)
- [Office Open XML](https://officeopenxml.com/)
"#;

/// Build the showcase deck with its default web assets.
pub fn showcase(theme: Theme, transition: Transition) -> Result<Presentation> {
    showcase_with_assets(theme, transition, &ShowcaseAssets::default())
}

/// Build the showcase deck referencing the given images and video.
pub fn showcase_with_assets(
    theme: Theme,
    transition: Transition,
    assets: &ShowcaseAssets,
) -> Result<Presentation> {
    let mut pres = Presentation::new(theme, transition).with_title("reveal-deck showcase");

    pres.create_slide("Presentations with reveal-deck")
        .set_layout(LayoutType::Title)?
        .configure_layout(
            LayoutConfig::new()
                .title_size(TitleSize::H1)
                .content_align(ContentAlign::Center)
                .background("#212121"),
        )
        .add_text("Building presentations programmatically");

    pres.create_slide("What is reveal-deck?")
        .add_text("reveal-deck is a Rust library that makes building interactive presentations easy.")
        .add_bullet_points([
            "Slides are built in code.",
            "Many kinds of content are supported.",
            "Decks export to HTML and PowerPoint.",
        ]);

    pres.create_slide("A slide with an image")
        .set_layout(LayoutType::ImageWithCaption)?
        .add_image(
            assets.logo.as_str(),
            Some("reveal.js: the visual foundation of generated decks."),
        )?;

    pres.create_slide("A slide with code")
        .add_code(SAMPLE_CODE, "rust")?;

    pres.create_slide("Main features").add_table(
        ["Feature", "Description"],
        [
            ["Layouts", "Ready-made layouts such as title, two columns and image with caption."],
            ["Content", "Text, lists, code, equations, tables, diagrams and media."],
            ["Export", "Exports to HTML and PowerPoint with ease."],
        ],
    )?;

    pres.create_slide("A slide with equations")
        .add_equation_with_legend(
            "E = mc^2",
            [("E", "Energy"), ("m", "Mass"), ("c", "Speed of light")],
        )?;

    pres.create_slide("How decks are built")
        .add_diagram("graph LR\n    A[Rust code] --> B[Presentation]\n    B --> C[HTML]\n    B --> D[PPTX]");

    pres.create_slide("reveal-deck vs manual work")
        .set_layout(LayoutType::Comparison)?
        .add_comparison("Manual work", "With reveal-deck")?
        .add_to_column(
            0,
            Content::image(
                assets.manual_work.as_str(),
                Some("Slow and laborious."),
            )?,
        )?
        .add_to_column(
            1,
            Content::image(
                assets.automated_work.as_str(),
                Some("Automated and organized."),
            )?,
        )?;

    pres.create_slide("A slide with video")
        .add_media(assets.video.as_str(), MediaKind::Video)?;

    pres.create_slide("Thank you").add_markdown(CLOSING_MARKDOWN);

    Ok(pres)
}
