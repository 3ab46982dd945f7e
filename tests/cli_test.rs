use image::{ImageBuffer, Rgb};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::ZipArchive;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reveal-deck"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_demo_command_writes_html() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("demo.html");

    let output = run_command(&[
        "demo",
        "--html",
        output_path.to_str().unwrap(),
        "--theme",
        "night",
        "--transition",
        "slide",
        "--pdf-export",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let html = fs::read_to_string(&output_path).expect("Failed to read output");
    assert_eq!(html.matches("<section").count(), 10);
    assert!(html.contains("/theme/night.min.css"));
    assert!(html.contains("transition: 'slide'"));
    assert!(html.contains("exportPDF()"));
}

#[test]
fn test_demo_rejects_unknown_theme() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("demo.html");

    let output = run_command(&[
        "demo",
        "--html",
        output_path.to_str().unwrap(),
        "--theme",
        "neon",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized theme"), "stderr: {}", stderr);
    assert!(!output_path.exists());
}

#[test]
fn test_themes_command() {
    let output = run_command(&["themes"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["black", "dracula", "blood", "fade", "zoom"] {
        assert!(stdout.contains(name), "missing {} in {}", name, stdout);
    }
}

fn write_image(path: &Path) {
    let img = ImageBuffer::from_fn(32, 32, |x, _| Rgb([(x * 8) as u8, 64u8, 128u8]));
    img.save(path).expect("Failed to save test image");
}

#[test]
fn test_demo_command_writes_pptx_with_local_assets() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let html_path = temp_dir.path().join("demo.html");
    let pptx_path = temp_dir.path().join("demo.pptx");
    let logo = temp_dir.path().join("logo.png");
    let manual = temp_dir.path().join("manual.png");
    let automated = temp_dir.path().join("automated.png");
    let video = temp_dir.path().join("clip.mp4");
    write_image(&logo);
    write_image(&manual);
    write_image(&automated);
    fs::write(&video, b"mp4 bytes").expect("Failed to write video fixture");

    let output = run_command(&[
        "demo",
        "--html",
        html_path.to_str().unwrap(),
        "--pptx",
        pptx_path.to_str().unwrap(),
        "--aspect-ratio",
        "4:3",
        "--logo",
        logo.to_str().unwrap(),
        "--manual-image",
        manual.to_str().unwrap(),
        "--automated-image",
        automated.to_str().unwrap(),
        "--video",
        video.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let html = fs::read_to_string(&html_path).expect("Failed to read HTML output");
    assert!(html.contains("logo.png"));

    let file = fs::File::open(&pptx_path).expect("Failed to open PPTX output");
    let mut archive = ZipArchive::new(file).expect("PPTX should be a ZIP");
    let slides = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count();
    assert_eq!(slides, 10);
    assert!(archive.by_name("ppt/media/media1.mp4").is_ok());
}
