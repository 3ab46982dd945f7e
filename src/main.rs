// ABOUTME: Main entry point for the reveal-deck program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use reveal_deck::demo::{self, ShowcaseAssets};
use reveal_deck::{Config, Theme, Transition};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the showcase deck
    Demo(DemoArgs),

    /// List the recognized themes and transitions
    Themes,
}

#[derive(Args)]
struct DemoArgs {
    /// Path to the output HTML file
    #[arg(long)]
    html: PathBuf,

    /// Also export a PowerPoint file to this path
    #[arg(long)]
    pptx: Option<PathBuf>,

    /// Theme name
    #[arg(long, default_value = "moon")]
    theme: String,

    /// Transition name
    #[arg(long, default_value = "zoom")]
    transition: String,

    /// Advance slides automatically every N milliseconds
    #[arg(long)]
    auto_slide_ms: Option<u64>,

    /// Add a print-to-PDF button to the HTML output
    #[arg(long)]
    pdf_export: bool,

    /// PPTX aspect ratio: 16:9 or 4:3
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Image (path or URL) shown on the image slide
    #[arg(long)]
    logo: Option<String>,

    /// Image for the left comparison column
    #[arg(long)]
    manual_image: Option<String>,

    /// Image for the right comparison column
    #[arg(long)]
    automated_image: Option<String>,

    /// Video (path or URL) for the media slide
    #[arg(long)]
    video: Option<String>,
}

impl DemoArgs {
    /// The default web assets with any overrides given on the command line.
    /// PPTX export needs embeddable files: raster images and direct video files.
    fn assets(&self) -> ShowcaseAssets {
        let mut assets = ShowcaseAssets::default();
        if let Some(logo) = &self.logo {
            assets.logo = logo.clone();
        }
        if let Some(image) = &self.manual_image {
            assets.manual_work = image.clone();
        }
        if let Some(image) = &self.automated_image {
            assets.automated_work = image.clone();
        }
        if let Some(video) = &self.video {
            assets.video = video.clone();
        }
        assets
    }
}

fn run_demo(args: &DemoArgs) -> anyhow::Result<()> {
    let config = Config::from_env();
    let theme: Theme = args.theme.parse()?;
    let transition: Transition = args.transition.parse()?;
    let presentation = demo::showcase_with_assets(theme, transition, &args.assets())?;

    let options = config.html_options(args.auto_slide_ms, args.pdf_export);
    presentation.export_with(&args.html, &options)?;
    println!("HTML generated successfully: {:?}", args.html);

    if let Some(pptx) = &args.pptx {
        let pptx_config = config.pptx_config(args.aspect_ratio.as_deref())?;
        presentation.export_pptx_with(pptx, &pptx_config)?;
        println!("PPTX generated successfully: {:?}", pptx);
    }
    Ok(())
}

fn list_themes() {
    println!("Themes:");
    for theme in Theme::ALL {
        println!("  {}", theme);
    }
    println!("Transitions:");
    for transition in Transition::ALL {
        println!("  {}", transition);
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Demo(args)) => {
            println!("Executing demo command...");
            run_demo(args)
        }
        Some(Commands::Themes) => {
            list_themes();
            Ok(())
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
