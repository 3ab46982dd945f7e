use image::{ImageBuffer, Rgb};
use quick_xml::events::Event;
use quick_xml::Reader;
use reveal_deck::demo::{self, ShowcaseAssets};
use reveal_deck::{
    build_pptx, AspectRatio, Content, DeckError, LayoutConfig, LayoutType, MediaKind,
    PptxConfig, Presentation, Theme, Transition,
};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use tempfile::TempDir;
use zip::ZipArchive;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn open_archive(path: &Path) -> ZipArchive<fs::File> {
    let file = fs::File::open(path).expect("Failed to open PPTX file");
    ZipArchive::new(file).expect("Failed to read PPTX as ZIP")
}

fn entry_names<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> Vec<String> {
    (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .collect()
}

fn slide_names<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> Vec<String> {
    entry_names(archive)
        .into_iter()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .collect()
}

fn read_entry<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> String {
    let mut entry = archive.by_name(name).expect("Missing package entry");
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .expect("Failed to read package entry");
    content
}

#[derive(Debug, Default)]
struct ParsedShape {
    is_title: bool,
    texts: Vec<String>,
}

/// Collect the `p:sp` shapes of a slide with the text of their runs.
fn parse_shapes(xml: &str) -> Vec<ParsedShape> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut shapes = Vec::new();
    let mut current: Option<ParsedShape> = None;
    let mut in_text = false;
    loop {
        match reader.read_event().expect("Slide XML should be well formed") {
            Event::Start(e) if e.name().as_ref() == b"p:sp" => {
                current = Some(ParsedShape::default());
            }
            Event::End(e) if e.name().as_ref() == b"p:sp" => {
                if let Some(shape) = current.take() {
                    shapes.push(shape);
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"p:ph" => {
                let is_title = e
                    .try_get_attribute("type")
                    .ok()
                    .flatten()
                    .map(|attr| attr.value.as_ref() == b"title")
                    .unwrap_or(false);
                if let Some(shape) = current.as_mut() {
                    shape.is_title |= is_title;
                }
            }
            Event::Start(e) if e.name().as_ref() == b"a:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"a:t" => in_text = false,
            Event::Text(t) if in_text => {
                if let Some(shape) = current.as_mut() {
                    shape.texts.push(t.unescape().expect("Invalid text").into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    shapes
}

fn write_image(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([255u8, 0u8, 0u8]));
    img.save(path).expect("Failed to save test image");
}

#[test]
fn test_intro_slide_shapes() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("intro.pptx");

    let mut pres = Presentation::new(Theme::Black, Transition::Fade);
    pres.create_slide("Intro")
        .add_text("Hello")
        .add_bullet_points(["A", "B"]);
    pres.export_pptx(&output_path).expect("Export should succeed");

    let mut archive = open_archive(&output_path);
    assert_eq!(slide_names(&mut archive), vec!["ppt/slides/slide1.xml"]);

    let shapes = parse_shapes(&read_entry(&mut archive, "ppt/slides/slide1.xml"));
    assert_eq!(shapes.len(), 3);
    let titles: Vec<&ParsedShape> = shapes.iter().filter(|s| s.is_title).collect();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].texts, vec!["Intro"]);

    let frames: Vec<&ParsedShape> = shapes.iter().filter(|s| !s.is_title).collect();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].texts, vec!["Hello"]);
    assert_eq!(frames[1].texts, vec!["A", "B"]);
}

#[test]
fn test_package_structure() {
    init_logger();
    let mut pres = Presentation::default().with_title("Structure & Parts");
    pres.create_slide("One");
    pres.create_slide("Two");
    let bytes = build_pptx(&pres, &PptxConfig::default()).expect("Build should succeed");

    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");
    let names = entry_names(&mut archive);
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/app.xml",
        "docProps/core.xml",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/slide1.xml",
        "ppt/slides/slide2.xml",
        "ppt/slides/_rels/slide2.xml.rels",
    ] {
        assert!(names.contains(&part.to_string()), "missing {}", part);
    }

    let presentation = read_entry(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldId id="256" r:id="rId3"/>"#));
    assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId4"/>"#));
    assert!(presentation.contains(r#"cx="9144000" cy="5143500""#));

    let core = read_entry(&mut archive, "docProps/core.xml");
    assert!(core.contains("<dc:title>Structure &amp; Parts</dc:title>"));
}

#[test]
fn test_standard_aspect_ratio() {
    let mut pres = Presentation::default();
    pres.create_slide("Square-ish");
    let config = PptxConfig {
        aspect_ratio: AspectRatio::Standard,
        ..PptxConfig::default()
    };
    let bytes = build_pptx(&pres, &config).expect("Build should succeed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");
    let presentation = read_entry(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains(r#"cx="9144000" cy="6858000""#));
}

#[test]
fn test_local_image_is_embedded() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let image_path = temp_dir.path().join("red.png");
    write_image(&image_path, 64, 32);
    let output_path = temp_dir.path().join("image.pptx");

    let mut pres = Presentation::default();
    pres.create_slide("Picture")
        .set_layout(LayoutType::ImageWithCaption)
        .unwrap()
        .add_image(image_path.to_str().unwrap(), Some("A red box"))
        .unwrap();
    pres.export_pptx(&output_path).expect("Export should succeed");

    let mut archive = open_archive(&output_path);
    assert!(entry_names(&mut archive).contains(&"ppt/media/image1.png".to_string()));

    let slide = read_entry(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains("<p:pic>"));
    assert!(slide.contains(r#"<a:blip r:embed="rId2"/>"#));
    assert!(slide.contains("A red box"));

    let rels = read_entry(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
    assert!(rels.contains(r#"Target="../media/image1.png""#));

    let content_types = read_entry(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
}

#[test]
fn test_other_image_formats_become_png() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let image_path = temp_dir.path().join("red.ppm");
    write_image(&image_path, 10, 10);

    let mut pres = Presentation::default();
    pres.create_slide("Converted")
        .add_image(image_path.to_str().unwrap(), None)
        .unwrap();
    let bytes = build_pptx(&pres, &PptxConfig::default()).expect("Build should succeed");

    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");
    let mut media = archive
        .by_name("ppt/media/image1.png")
        .expect("Converted image should be stored as PNG");
    let mut data = Vec::new();
    media.read_to_end(&mut data).unwrap();
    assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_missing_remote_image_leaves_no_file() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("broken.pptx");

    let mut pres = Presentation::default();
    pres.create_slide("Good").add_text("fine");
    pres.create_slide("Broken")
        .add_image("http://invalid.example/missing.png", None)
        .unwrap();

    let err = pres.export_pptx(&output_path).unwrap_err();
    match &err {
        DeckError::AssetError {
            slide,
            item,
            location,
            ..
        } => {
            assert_eq!(slide.index, 1);
            assert_eq!(slide.title, "Broken");
            assert_eq!(item.position, 0);
            assert_eq!(location, "http://invalid.example/missing.png");
        }
        other => panic!("expected an asset error, got {:?}", other),
    }
    assert!(!output_path.exists());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_undecodable_image_is_asset_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let svg_path = temp_dir.path().join("logo.svg");
    fs::write(&svg_path, r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();

    let mut pres = Presentation::default();
    pres.create_slide("Vector")
        .add_image(svg_path.to_str().unwrap(), None)
        .unwrap();
    let err = build_pptx(&pres, &PptxConfig::default()).unwrap_err();
    assert!(matches!(err, DeckError::AssetError { .. }));
}

#[test]
fn test_table_shape() {
    let mut pres = Presentation::default();
    pres.create_slide("Data")
        .add_table(
            ["Name", "Value"],
            [["alpha", "1"], ["beta", "2"], ["gamma", "3"]],
        )
        .unwrap();
    let bytes = build_pptx(&pres, &PptxConfig::default()).expect("Build should succeed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");
    let slide = read_entry(&mut archive, "ppt/slides/slide1.xml");

    assert!(slide.contains("<p:graphicFrame>"));
    assert!(slide.contains("<a:tbl>"));
    assert_eq!(slide.matches("<a:gridCol ").count(), 2);
    assert_eq!(slide.matches("<a:tr ").count(), 4);
    assert_eq!(slide.matches("<a:tc>").count(), 8);
    assert!(slide.contains("<a:t>gamma</a:t>"));
}

#[test]
fn test_youtube_media_is_unsupported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("video.pptx");

    let mut pres = Presentation::default();
    pres.create_slide("Video")
        .add_media("https://www.youtube.com/watch?v=VuUcNIxLmiQ", MediaKind::Video)
        .unwrap();
    let err = pres.export_pptx(&output_path).unwrap_err();
    match err {
        DeckError::UnsupportedContentError { format, item, .. } => {
            assert_eq!(format, "PPTX");
            assert_eq!(item.kind, reveal_deck::ContentType::Media);
        }
        other => panic!("expected unsupported content, got {:?}", other),
    }
    assert!(!output_path.exists());
}

#[test]
fn test_local_video_is_embedded() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let video_path = temp_dir.path().join("clip.mp4");
    fs::write(&video_path, b"not really a video").unwrap();

    let mut pres = Presentation::default();
    pres.create_slide("Clip")
        .add_media(video_path.to_str().unwrap(), MediaKind::Video)
        .unwrap();
    let bytes = build_pptx(&pres, &PptxConfig::default()).expect("Build should succeed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");

    let names = entry_names(&mut archive);
    assert!(names.contains(&"ppt/media/media1.mp4".to_string()));
    assert!(names.contains(&"ppt/media/image1.png".to_string()));

    let slide = read_entry(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains(r#"<a:videoFile r:link="rId2"/>"#));
    assert!(slide.contains(r#"r:embed="rId3""#));

    let rels = read_entry(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
    assert!(rels.contains("relationships/video"));
    assert!(rels.contains("http://schemas.microsoft.com/office/2007/relationships/media"));

    let content_types = read_entry(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="mp4" ContentType="video/mp4"/>"#));
}

#[test]
fn test_media_kind_must_match_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let audio_path = temp_dir.path().join("song.mp3");
    fs::write(&audio_path, b"id3").unwrap();

    let mut pres = Presentation::default();
    pres.create_slide("Mismatch")
        .add_media(audio_path.to_str().unwrap(), MediaKind::Video)
        .unwrap();
    let err = build_pptx(&pres, &PptxConfig::default()).unwrap_err();
    assert!(matches!(err, DeckError::UnsupportedContentError { .. }));
}

#[test]
fn test_background_and_transition() {
    let mut pres = Presentation::new(Theme::White, Transition::Zoom);
    pres.create_slide("Custom")
        .configure_layout(LayoutConfig::new().background("#abc"));
    pres.create_slide("Themed");
    pres.create_slide("Image background")
        .configure_layout(LayoutConfig::new().background("https://example.com/bg.png"));
    let bytes = build_pptx(&pres, &PptxConfig::default()).expect("Build should succeed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");

    let custom = read_entry(&mut archive, "ppt/slides/slide1.xml");
    assert!(custom.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="AABBCC"/>"#));
    assert!(custom.contains("<p:transition><p:zoom/></p:transition>"));

    for name in ["ppt/slides/slide2.xml", "ppt/slides/slide3.xml"] {
        let themed = read_entry(&mut archive, name);
        assert!(themed.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="FFFFFF"/>"#));
    }
}

#[test]
fn test_no_transition_element_for_none() {
    let mut pres = Presentation::new(Theme::Black, Transition::None);
    pres.create_slide("Still");
    let bytes = build_pptx(&pres, &PptxConfig::default()).expect("Build should succeed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");
    let slide = read_entry(&mut archive, "ppt/slides/slide1.xml");
    assert!(!slide.contains("<p:transition>"));
}

#[test]
fn test_columns_markdown_and_equation_as_text() {
    let mut pres = Presentation::default();
    pres.create_slide("Side by side")
        .set_layout(LayoutType::Comparison)
        .unwrap()
        .add_comparison("Left", "Right")
        .unwrap()
        .add_to_column(0, Content::markdown("# Heading\n\n- one\n- two"))
        .unwrap()
        .add_to_column(
            1,
            Content::equation_with_legend("a^2 + b^2 = c^2", [("c", "hypotenuse")]).unwrap(),
        )
        .unwrap();
    let bytes = build_pptx(&pres, &PptxConfig::default()).expect("Build should succeed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Valid ZIP");
    let shapes = parse_shapes(&read_entry(&mut archive, "ppt/slides/slide1.xml"));

    let texts: Vec<Vec<String>> = shapes
        .iter()
        .filter(|s| !s.is_title)
        .map(|s| s.texts.clone())
        .collect();
    assert_eq!(
        texts,
        vec![
            vec!["Left".to_string()],
            vec!["Right".to_string()],
            vec!["Heading".to_string(), "one".to_string(), "two".to_string()],
            vec![
                "a^2 + b^2 = c^2".to_string(),
                "Where:".to_string(),
                "c: hypotenuse".to_string()
            ],
        ]
    );
}

#[test]
fn test_missing_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("no-such-dir").join("deck.pptx");

    let mut pres = Presentation::default();
    pres.create_slide("Nowhere");
    let err = pres.export_pptx(&output_path).unwrap_err();
    assert!(matches!(err, DeckError::IoError { .. }));
    assert!(!output_path.exists());
}

#[test]
fn test_showcase_with_local_assets() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logo = temp_dir.path().join("logo.png");
    let manual = temp_dir.path().join("manual.png");
    let automated = temp_dir.path().join("automated.png");
    let video = temp_dir.path().join("demo.mp4");
    write_image(&logo, 120, 40);
    write_image(&manual, 40, 40);
    write_image(&automated, 40, 40);
    fs::write(&video, b"mp4 bytes").unwrap();

    let assets = ShowcaseAssets {
        logo: logo.to_string_lossy().to_string(),
        manual_work: manual.to_string_lossy().to_string(),
        automated_work: automated.to_string_lossy().to_string(),
        video: video.to_string_lossy().to_string(),
    };
    let pres = demo::showcase_with_assets(Theme::Moon, Transition::Zoom, &assets).unwrap();
    let output_path = temp_dir.path().join("showcase.pptx");
    pres.export_pptx(&output_path).expect("Export should succeed");

    let mut archive = open_archive(&output_path);
    assert_eq!(slide_names(&mut archive).len(), pres.slides().len());
}

fn has_illegal_xml_chars(xml: &str) -> bool {
    xml.chars()
        .any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
}

#[test]
fn test_control_characters_do_not_corrupt_xml() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("controls.pptx");

    let mut pres = Presentation::default().with_title("Deck\u{0007}Title");
    pres.create_slide("Form\u{000B}Feed")
        .add_text("page\u{000C}break")
        .add_bullet_points(["one\u{0001}", "two"]);
    pres.export_pptx(&output_path).expect("Export should succeed");

    let mut archive = open_archive(&output_path);
    let slide = read_entry(&mut archive, "ppt/slides/slide1.xml");
    assert!(!has_illegal_xml_chars(&slide));
    let core = read_entry(&mut archive, "docProps/core.xml");
    assert!(!has_illegal_xml_chars(&core));
    assert!(core.contains("<dc:title>Deck Title</dc:title>"));

    let shapes = parse_shapes(&slide);
    let title = shapes.iter().find(|s| s.is_title).expect("title shape");
    assert_eq!(title.texts, vec!["Form Feed"]);
    let frames: Vec<&ParsedShape> = shapes.iter().filter(|s| !s.is_title).collect();
    assert_eq!(frames[0].texts, vec!["page break"]);
    assert_eq!(frames[1].texts, vec!["one", "two"]);
}
