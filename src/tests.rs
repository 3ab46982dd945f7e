use super::*;
use crate::markdown::{BlockKind, TextBlock};
use crate::utils::{escape_xml, parse_hex_color};

fn intro_presentation() -> Presentation {
    let mut pres = Presentation::from_names("black", "fade").expect("valid names");
    pres.create_slide("Intro")
        .add_text("Hello")
        .add_bullet_points(["A", "B"]);
    pres
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_render_intro_slide() {
    let html = intro_presentation().render();

    assert_eq!(count(&html, "<section"), 1);
    assert!(html.contains("<h2>Intro</h2>"));
    assert!(html.contains("<p>Hello</p>"));
    assert!(html.contains("<ul>\n<li>A</li>\n<li>B</li>\n</ul>"));
    assert!(html.contains("/theme/black.min.css"));
    assert!(html.contains("transition: 'fade'"));
}

#[test]
fn test_render_is_deterministic() {
    let pres = intro_presentation();
    assert_eq!(pres.render(), pres.render());
}

#[test]
fn test_render_one_section_per_slide_in_order() {
    let mut pres = Presentation::default();
    for title in ["First", "Second", "Third"] {
        pres.create_slide(title);
    }
    let html = pres.render();

    assert_eq!(count(&html, "<section"), 3);
    let first = html.find("First").unwrap();
    let second = html.find("Second").unwrap();
    let third = html.find("Third").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_table_row_length_mismatch() {
    let result = Content::table(["a", "b"], [vec!["1", "2"], vec!["3"]]);
    match result {
        Err(DeckError::ValidationError { field, message, .. }) => {
            assert_eq!(field, "rows");
            assert_eq!(message, "row 1 has 1 cells but there are 2 headers");
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_table_error_names_the_slide() {
    let mut pres = Presentation::default();
    let err = pres
        .create_slide("Data")
        .add_table(["a"], [vec!["1", "2"]])
        .unwrap_err();
    match &err {
        DeckError::ValidationError { slide: Some(slide), .. } => {
            assert_eq!(slide.index, 0);
            assert_eq!(slide.title, "Data");
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert!(err.to_string().contains("slide 1 \"Data\""));
    assert!(pres.slides()[0].content().is_empty());
}

#[test]
fn test_table_cells_match_headers() {
    let mut pres = Presentation::default();
    pres.create_slide("Data")
        .add_table(["h1", "h2"], [["a", "b"], ["c", "d"]])
        .unwrap();
    let html = pres.render();
    assert_eq!(count(&html, "<th>"), 2);
    assert_eq!(count(&html, "<tr>"), 3);
    assert_eq!(count(&html, "<td>"), 4);
}

#[test]
fn test_invalid_column_leaves_slide_unchanged() {
    let mut pres = Presentation::default();
    let slide = pres.create_slide("Columns");
    slide.set_layout(LayoutType::TwoColumns).unwrap();
    slide.add_to_column(0, Content::text("left")).unwrap();

    let err = slide.add_to_column(2, Content::text("nope")).unwrap_err();
    assert!(matches!(err, DeckError::InvalidColumnError { index: 2, .. }));
    assert_eq!(slide.column(0), &[Content::text("left")]);
    assert!(slide.column(1).is_empty());
}

#[test]
fn test_invalid_column_checked_before_layout() {
    let mut pres = Presentation::default();
    let err = pres
        .create_slide("Plain")
        .add_to_column(5, Content::text("x"))
        .unwrap_err();
    assert!(matches!(err, DeckError::InvalidColumnError { index: 5, .. }));
}

#[test]
fn test_column_on_single_column_layout() {
    let mut pres = Presentation::default();
    let err = pres
        .create_slide("Plain")
        .add_to_column(0, Content::text("x"))
        .unwrap_err();
    assert!(matches!(
        err,
        DeckError::LayoutError {
            layout: LayoutType::TitleContent,
            ..
        }
    ));
}

#[test]
fn test_comparison_columns_render_in_order() {
    let mut pres = Presentation::default();
    pres.create_slide("Versus")
        .set_layout(LayoutType::Comparison)
        .unwrap()
        .add_comparison("Before", "After")
        .unwrap()
        .add_to_column(1, Content::text("right one"))
        .unwrap()
        .add_to_column(0, Content::text("left one"))
        .unwrap()
        .add_to_column(0, Content::text("left two"))
        .unwrap();
    let html = pres.render();

    let left_one = html.find("left one").unwrap();
    let left_two = html.find("left two").unwrap();
    let right_one = html.find("right one").unwrap();
    assert!(left_one < left_two && left_two < right_one);
    assert!(html.find("Before").unwrap() < html.find("After").unwrap());
    assert!(html.contains("<div class=\"two-columns\">"));
    assert_eq!(count(&html, "<div class=\"column\">"), 2);
}

#[test]
fn test_comparison_headers_require_comparison_layout() {
    let mut pres = Presentation::default();
    let slide = pres.create_slide("Two");
    slide.set_layout(LayoutType::TwoColumns).unwrap();
    let err = slide.add_comparison("L", "R").unwrap_err();
    assert!(matches!(err, DeckError::LayoutError { .. }));
    assert_eq!(slide.comparison_headers(), None);
}

#[test]
fn test_set_layout_keeps_column_content_visible() {
    let mut pres = Presentation::default();
    let slide = pres.create_slide("Cols");
    slide.set_layout(LayoutType::TwoColumns).unwrap();
    slide.add_to_column(1, Content::text("right")).unwrap();

    let err = slide.set_layout(LayoutType::TitleContent).unwrap_err();
    assert!(matches!(err, DeckError::LayoutError { .. }));
    assert_eq!(slide.layout(), LayoutType::TwoColumns);
    assert!(slide.set_layout(LayoutType::TitleTwoContent).is_ok());
}

#[test]
fn test_missing_second_column_renders_empty() {
    let mut pres = Presentation::default();
    pres.create_slide("Half")
        .set_layout(LayoutType::TwoColumns)
        .unwrap()
        .add_to_column(0, Content::text("only"))
        .unwrap();
    let html = pres.render();
    assert!(html.contains("<div class=\"column\">\n</div>"));
}

#[test]
fn test_unknown_theme_and_transition_fail() {
    let err = Presentation::from_names("neon", "fade").unwrap_err();
    match err {
        DeckError::ConfigError(message) => assert!(message.contains("black")),
        other => panic!("expected a config error, got {:?}", other),
    }
    assert!(matches!(
        "spin".parse::<Transition>(),
        Err(DeckError::ConfigError(_))
    ));
    assert_eq!("Moon".parse::<Theme>().unwrap(), Theme::Moon);
}

#[test]
fn test_empty_fields_are_rejected() {
    assert!(matches!(
        Content::code("  ", "rust"),
        Err(DeckError::ValidationError { field: "code", .. })
    ));
    assert!(matches!(
        Content::image("", None),
        Err(DeckError::ValidationError { field: "url", .. })
    ));
    assert!(matches!(
        Content::equation(""),
        Err(DeckError::ValidationError { field: "equation", .. })
    ));
    assert!(matches!(
        "podcast".parse::<MediaKind>(),
        Err(DeckError::ValidationError { field: "media_type", .. })
    ));
}

#[test]
fn test_layout_config_classes_and_background() {
    let config = LayoutConfig::new()
        .background("#112233")
        .extra_classes_from(["dark", "wide", "dark"])
        .unwrap();
    assert_eq!(config.extra_classes(), &["dark".to_string(), "wide".to_string()]);
    assert!(LayoutConfig::new().extra_class("two words").is_err());

    let mut pres = Presentation::default();
    pres.create_slide("Styled").configure_layout(config);
    let html = pres.render();
    assert!(html.contains(
        "<section class=\"layout-title-content dark wide\" data-background=\"#112233\" data-auto-animate>"
    ));
}

#[test]
fn test_text_is_escaped() {
    let mut pres = Presentation::default();
    pres.create_slide("<b>Title</b>")
        .add_text("a < b & c")
        .add_code("if a < b {}", "rust")
        .unwrap();
    let html = pres.render();
    assert!(html.contains("&lt;b&gt;Title&lt;/b&gt;"));
    assert!(html.contains("<p>a &lt; b &amp; c</p>"));
    assert!(html.contains("<code class=\"language-rust\" data-trim>if a &lt; b {}</code>"));
}

#[test]
fn test_diagram_and_equation_markup() {
    let mut pres = Presentation::default();
    pres.create_slide("Math")
        .add_equation_with_legend("E = mc^2", [("E", "Energy")])
        .unwrap()
        .add_diagram("graph TD\n  A --> B");
    let html = pres.render();
    assert!(html.contains("<div class=\"equation\">$$\nE = mc^2\n$$</div>"));
    assert!(html.contains("<li><strong>E</strong>: Energy</li>"));
    assert!(html.contains("<div class=\"mermaid\">\ngraph TD\n  A --> B\n</div>"));
}

#[test]
fn test_duplicate_legend_symbols_are_rejected() {
    let result = Content::equation_with_legend(
        "a + a",
        [("a", "first"), ("b", "other"), ("a", "again")],
    );
    match result {
        Err(DeckError::ValidationError { field, message, .. }) => {
            assert_eq!(field, "description");
            assert!(message.contains("\"a\""), "message: {}", message);
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_quote_layout() {
    let mut pres = Presentation::default();
    pres.create_slide("Wisdom")
        .set_layout(LayoutType::Quote)
        .unwrap()
        .add_text("Simplicity is prerequisite for reliability.")
        .add_text("Edsger Dijkstra");
    let html = pres.render();
    assert!(html.contains("<blockquote>\nSimplicity is prerequisite for reliability.\n"));
    assert!(html.contains("<cite>Edsger Dijkstra\n</cite>"));
    assert!(!html.contains("<h2>Wisdom</h2>"));
}

#[test]
fn test_youtube_embed_url() {
    assert_eq!(
        html::youtube_embed_url("https://www.youtube.com/watch?v=VuUcNIxLmiQ").as_deref(),
        Some("https://www.youtube.com/embed/VuUcNIxLmiQ")
    );
    assert_eq!(
        html::youtube_embed_url("https://youtu.be/abc123").as_deref(),
        Some("https://www.youtube.com/embed/abc123")
    );
    assert_eq!(html::youtube_embed_url("https://example.com/clip.mp4"), None);
}

#[test]
fn test_html_options() {
    let options = HtmlOptions {
        auto_slide_ms: Some(5000),
        pdf_export: true,
        scroll_view: false,
        ..HtmlOptions::default()
    };
    let html = intro_presentation().render_with(&options);
    assert!(html.contains("autoSlide: 5000"));
    assert!(html.contains("loop: true"));
    assert!(html.contains("exportPDF()"));
    assert!(!html.contains("view: 'scroll'"));
}

#[test]
fn test_markdown_text_blocks() {
    let blocks = markdown::to_text_blocks("## Links\n\n- [GitHub](https://github.com/)\n  1. nested\n\n```\nlet x = 1;\n```\n");
    assert_eq!(
        blocks,
        vec![
            TextBlock {
                kind: BlockKind::Heading(2),
                text: "Links".to_string()
            },
            TextBlock {
                kind: BlockKind::Bullet(0),
                text: "GitHub".to_string()
            },
            TextBlock {
                kind: BlockKind::Numbered(1),
                text: "nested".to_string()
            },
            TextBlock {
                kind: BlockKind::Code,
                text: "let x = 1;".to_string()
            },
        ]
    );
}

#[test]
fn test_parse_hex_color() {
    assert_eq!(parse_hex_color("#abc").as_deref(), Some("AABBCC"));
    assert_eq!(parse_hex_color("#212121").as_deref(), Some("212121"));
    assert_eq!(parse_hex_color("url(bg.png)"), None);
    assert_eq!(parse_hex_color("#12345"), None);
}

#[test]
fn test_escape_xml_replaces_control_characters() {
    assert_eq!(escape_xml("page\u{000C}break"), "page break");
    assert_eq!(escape_xml("a\u{0000}b\u{FFFE}c"), "a b c");
    assert_eq!(escape_xml("tab\tline\nend & <done>"), "tab\tline\nend &amp; &lt;done&gt;");
}

#[test]
fn test_aspect_ratio_parse() {
    assert_eq!("4:3".parse::<AspectRatio>().unwrap(), AspectRatio::Standard);
    assert_eq!(AspectRatio::default().dimensions(), (9_144_000, 5_143_500));
    assert!(matches!(
        "21:9".parse::<AspectRatio>(),
        Err(DeckError::ConfigError(_))
    ));
}

#[test]
fn test_showcase_covers_every_kind() {
    let pres = demo::showcase(Theme::Moon, Transition::Zoom).unwrap();
    let kinds: Vec<ContentType> = pres
        .slides()
        .iter()
        .flat_map(|slide| {
            slide
                .content()
                .iter()
                .chain(slide.columns().iter().flatten())
                .map(Content::content_type)
                .collect::<Vec<_>>()
        })
        .collect();
    for kind in [
        ContentType::Text,
        ContentType::BulletList,
        ContentType::Code,
        ContentType::Image,
        ContentType::Equation,
        ContentType::Table,
        ContentType::Diagram,
        ContentType::Media,
        ContentType::Markdown,
    ] {
        assert!(kinds.contains(&kind), "missing {}", kind);
    }
    let html = pres.render();
    assert!(html.contains("https://www.youtube.com/embed/VuUcNIxLmiQ"));
}

#[test]
fn test_asset_locations() {
    use crate::resources::{Asset, AssetLocation};

    let remote = Asset::new("https://example.com/images/Logo.PNG?size=2");
    assert!(remote.is_remote());
    assert_eq!(remote.extension().as_deref(), Some("png"));

    let file_url = Asset::new("file:///tmp/clip.mp4");
    assert_eq!(
        file_url.resolved,
        AssetLocation::Local(std::path::PathBuf::from("/tmp/clip.mp4"))
    );

    let relative = Asset::new("media/song.mp3");
    assert!(!relative.is_remote());
    assert_eq!(relative.extension().as_deref(), Some("mp3"));
}

#[test]
fn test_config_pptx_defaults() {
    let config = Config::new();
    let pptx = config.pptx_config(None).unwrap();
    assert_eq!(pptx.aspect_ratio, AspectRatio::Widescreen);
    assert_eq!(pptx.fetch_timeout, None);
    assert_eq!(
        config.pptx_config(Some("4:3")).unwrap().aspect_ratio,
        AspectRatio::Standard
    );

    let zero = Config {
        fetch_timeout_ms: Some(0),
        ..Config::default()
    };
    assert!(matches!(zero.pptx_config(None), Err(DeckError::ConfigError(_))));
}

#[test]
fn test_pptx_config_rejects_zero_timeout() {
    let config = PptxConfig {
        fetch_timeout: Some(std::time::Duration::ZERO),
        ..PptxConfig::default()
    };
    assert!(matches!(config.validate(), Err(DeckError::ConfigError(_))));

    let mut pres = Presentation::default();
    pres.create_slide("Timeout");
    assert!(matches!(
        build_pptx(&pres, &config),
        Err(DeckError::ConfigError(_))
    ));
}
