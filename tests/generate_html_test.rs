use reveal_deck::{
    Config, Content, DeckError, HtmlOptions, LayoutType, MediaKind, Presentation, Theme,
    Transition,
};
use std::fs;
use tempfile::TempDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_presentation() -> Presentation {
    let mut pres = Presentation::new(Theme::Dracula, Transition::Convex).with_title("Sample");
    pres.create_slide("Welcome")
        .set_layout(LayoutType::Title)
        .unwrap()
        .add_text("A subtitle");
    pres.create_slide("Section break")
        .set_layout(LayoutType::Section)
        .unwrap();
    pres.create_slide("Media")
        .add_media("https://example.com/talk.mp3", MediaKind::Audio)
        .unwrap()
        .add_markdown("**bold** and <span>raw</span>");
    pres.create_slide("Columns")
        .set_layout(LayoutType::TitleTwoContent)
        .unwrap()
        .add_text("Above the columns")
        .add_to_column(0, Content::numbered_list(["first", "second"]))
        .unwrap();
    pres
}

#[test]
fn test_export_writes_rendered_document() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.html");

    let pres = sample_presentation();
    pres.export(&output_path).expect("Export should succeed");

    let written = fs::read_to_string(&output_path).expect("Failed to read output");
    assert_eq!(written, pres.render());
    assert_eq!(written.matches("<section").count(), 4);
    assert!(written.contains("<title>Sample</title>"));
    assert!(written.contains("/theme/dracula.min.css"));
    assert!(written.contains("transition: 'convex'"));
}

#[test]
fn test_layout_markup() {
    let html = sample_presentation().render();

    assert!(html.contains("<section class=\"layout-title\" data-auto-animate>"));
    assert!(html.contains("<section class=\"layout-section\" data-auto-animate>\n<h1>Section break</h1>"));
    assert!(html.contains("<audio src=\"https://example.com/talk.mp3\" controls"));
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("<span>raw</span>"));

    let above = html.find("Above the columns").unwrap();
    let columns = html.find("<div class=\"two-columns\">").unwrap();
    assert!(above < columns);
    assert!(html.contains("<ol>\n<li>first</li>\n<li>second</li>\n</ol>"));
}

#[test]
fn test_config_html_options() {
    let config = Config::new();
    let options = config.html_options(Some(3000), false);
    let html = sample_presentation().render_with(&options);
    assert!(html.contains("autoSlide: 3000"));
    assert!(html.contains("https://cdnjs.cloudflare.com/ajax/libs/reveal.js/4.5.0/reveal.min.js"));

    let custom = HtmlOptions {
        reveal_cdn: "https://cdn.example.com/reveal/".to_string(),
        ..HtmlOptions::default()
    };
    let html = sample_presentation().render_with(&custom);
    assert!(html.contains("https://cdn.example.com/reveal/reveal.min.css"));
}

#[test]
fn test_export_to_missing_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("missing").join("deck.html");

    let err = sample_presentation().export(&output_path).unwrap_err();
    match err {
        DeckError::IoError { path, .. } => assert_eq!(path, output_path),
        other => panic!("expected an IO error, got {:?}", other),
    }
    assert!(!output_path.exists());
}

#[test]
fn test_export_overwrites_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("deck.html");
    fs::write(&output_path, "old").unwrap();

    sample_presentation().export(&output_path).unwrap();
    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.starts_with("<!DOCTYPE html>"));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}
