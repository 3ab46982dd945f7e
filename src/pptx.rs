// ABOUTME: PPTX generation module for the reveal-deck library
// ABOUTME: Places slide content as native shapes and packages the deck in memory

use crate::content::{Content, Image, Media, MediaKind, Table};
use crate::errors::{ContentRef, DeckError, Result, SlideRef};
use crate::html::youtube_embed_url;
use crate::layout::LayoutType;
use crate::markdown::{self, BlockKind};
use crate::package::{
    self, MediaPart, Package, Relationship, SlidePart, REL_AUDIO, REL_IMAGE, REL_MEDIA,
    REL_SLIDE_LAYOUT, REL_VIDEO,
};
use crate::presentation::Presentation;
use crate::resources::{Asset, AssetFetcher};
use crate::shapes::{
    inches, Bullet, Frame, Paragraph, RunStyle, Shape, TableStyle, EMU_PER_INCH, EMU_PER_POINT,
};
use crate::slide::Slide;
use crate::theme::Palette;
use crate::utils::{parse_hex_color, write_atomically};
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageFormat, ImageOutputFormat, Rgb, RgbImage};
use log::{debug, info, warn};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const FORMAT: &str = "PPTX";

const MARGIN: i64 = 457_200;
const TITLE_HEIGHT: i64 = 822_960;
const GAP: i64 = 137_160;
const COLUMN_GAP: i64 = 274_320;
const HEADER_BAND: i64 = 457_200;
const MIN_REGION: i64 = 457_200;
const TABLE_ROW_HEIGHT: i64 = 365_760;
/// Default text frame insets: 0.1in left/right, 0.05in top/bottom.
const INSET_X: i64 = 182_880;
const INSET_Y: i64 = 91_440;
const BULLET_INDENT: i64 = 342_900;

const BODY_PT: u32 = 20;
const CODE_PT: u32 = 14;
const CAPTION_PT: u32 = 14;
const TABLE_PT: u32 = 14;
const QUOTE_PT: u32 = 28;
const ATTRIBUTION_PT: u32 = 18;
const LINE_SPACING: f64 = 1.2;

/// Slide dimensions of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// 16:9
    #[default]
    Widescreen,
    /// 4:3
    Standard,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Standard => "4:3",
        }
    }

    /// Slide width and height in EMU.
    pub fn dimensions(&self) -> (i64, i64) {
        match self {
            AspectRatio::Widescreen => (9_144_000, 5_143_500),
            AspectRatio::Standard => (9_144_000, 6_858_000),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Widescreen),
            "4:3" => Ok(AspectRatio::Standard),
            other => Err(DeckError::ConfigError(format!(
                "unsupported aspect ratio {:?}, expected 16:9 or 4:3",
                other
            ))),
        }
    }
}

/// Configuration for PPTX generation
#[derive(Debug, Clone, Default)]
pub struct PptxConfig {
    pub aspect_ratio: AspectRatio,
    /// Timeout for fetching remote assets; `None` keeps the HTTP client default.
    pub fetch_timeout: Option<Duration>,
}

impl PptxConfig {
    /// Reject settings no export could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout == Some(Duration::ZERO) {
            return Err(DeckError::ConfigError(
                "fetch timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a PPTX document for `presentation` and write it to `output_file`.
///
/// The whole package is assembled in memory first. Nothing is written when
/// any slide fails to convert, and a failed write leaves no file behind.
pub fn generate_pptx(
    presentation: &Presentation,
    output_file: &Path,
    config: &PptxConfig,
) -> Result<()> {
    info!(
        "Generating PPTX with {} slides to {:?}",
        presentation.slides().len(),
        output_file
    );
    let bytes = build_pptx(presentation, config)?;
    write_atomically(output_file, &bytes)?;
    info!("PPTX file created at {:?}", output_file);
    Ok(())
}

/// Build the bytes of a PPTX document for `presentation`.
pub fn build_pptx(presentation: &Presentation, config: &PptxConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let palette = presentation.theme().palette();
    let size = config.aspect_ratio.dimensions();
    let mut deck = DeckBuilder {
        size,
        palette,
        transition: presentation.transition().pptx_element(),
        fetcher: AssetFetcher::new(config.fetch_timeout),
        media: Vec::new(),
        image_count: 0,
        media_count: 0,
    };

    let mut slides = Vec::with_capacity(presentation.slides().len());
    for slide in presentation.slides() {
        info!("Processing slide {}: {:?}", slide.index() + 1, slide.title());
        slides.push(SlideComposer::new(&mut deck, slide).compose()?);
    }

    Package {
        title: presentation.title(),
        size,
        palette,
        slides,
        media: deck.media,
    }
    .to_bytes()
}

/// State shared by all slides of one document.
struct DeckBuilder {
    size: (i64, i64),
    palette: Palette,
    transition: Option<&'static str>,
    fetcher: AssetFetcher,
    media: Vec<MediaPart>,
    image_count: usize,
    media_count: usize,
}

impl DeckBuilder {
    /// Store a file under `ppt/media/` and return its part name.
    fn add_image_part(&mut self, extension: &str, content_type: &'static str, data: Vec<u8>) -> String {
        self.image_count += 1;
        self.push_part(format!("image{}.{}", self.image_count, extension), content_type, data)
    }

    fn add_media_part(&mut self, extension: &str, content_type: &'static str, data: Vec<u8>) -> String {
        self.media_count += 1;
        self.push_part(format!("media{}.{}", self.media_count, extension), content_type, data)
    }

    fn push_part(&mut self, file_name: String, content_type: &'static str, data: Vec<u8>) -> String {
        debug!("Embedding {} ({} bytes)", file_name, data.len());
        self.media.push(MediaPart {
            file_name: file_name.clone(),
            content_type,
            data,
        });
        file_name
    }
}

/// Places the content of one slide and collects its shapes and relationships.
struct SlideComposer<'a> {
    deck: &'a mut DeckBuilder,
    slide: &'a Slide,
    text_color: String,
    shapes: Vec<Shape>,
    rels: Vec<Relationship>,
}

impl<'a> SlideComposer<'a> {
    fn new(deck: &'a mut DeckBuilder, slide: &'a Slide) -> Self {
        let text_color = deck.palette.text.to_string();
        Self {
            deck,
            slide,
            text_color,
            shapes: Vec::new(),
            rels: vec![Relationship::new(
                "rId1",
                REL_SLIDE_LAYOUT,
                "../slideLayouts/slideLayout1.xml",
            )],
        }
    }

    fn compose(mut self) -> Result<SlidePart> {
        let (width, height) = self.deck.size;
        let page = Frame::new(MARGIN, MARGIN, width - 2 * MARGIN, height - 2 * MARGIN);
        let slide = self.slide;
        let config = slide.layout_config();
        let align = config.content_align.drawingml();
        let title_pt = config.title_size.points();

        match slide.layout() {
            LayoutType::Blank => self.stack(slide.content(), None, page, align)?,
            LayoutType::Title => {
                let title_height = inches(1.2);
                let title_y = height / 2 - title_height;
                self.add_title(
                    Frame::new(page.x, title_y, page.cx, title_height),
                    title_pt,
                    false,
                    "ctr",
                );
                self.stack(slide.content(), None, below(page, title_y + title_height + GAP), "ctr")?;
            }
            LayoutType::Section => {
                let title_height = inches(1.5);
                let title_y = (height - title_height) / 2;
                self.add_title(
                    Frame::new(page.x, title_y, page.cx, title_height),
                    title_pt * 4 / 3,
                    true,
                    "ctr",
                );
                self.stack(slide.content(), None, below(page, title_y + title_height + GAP), align)?;
            }
            LayoutType::Quote => self.place_quote(page, align)?,
            LayoutType::TitleContent => {
                let body = self.add_title_bar(page, title_pt, align);
                self.stack(slide.content(), None, body, align)?;
            }
            LayoutType::ImageWithCaption => {
                let body = self.add_title_bar(page, title_pt, align);
                self.stack(slide.content(), None, body, "ctr")?;
            }
            LayoutType::TwoColumns | LayoutType::TitleTwoContent | LayoutType::Comparison => {
                let body = self.add_title_bar(page, title_pt, align);
                self.place_columns(body, align)?;
            }
        }

        debug!(
            "Slide {} placed with {} shapes",
            slide.index() + 1,
            self.shapes.len()
        );
        Ok(self.finish())
    }

    fn finish(self) -> SlidePart {
        let mut shapes_xml = String::new();
        for (i, shape) in self.shapes.iter().enumerate() {
            // id 1 is the slide's group shape
            shape.write_xml(i as u32 + 2, &mut shapes_xml);
        }
        SlidePart {
            xml: package::slide_xml(&self.background(), &shapes_xml, self.deck.transition),
            rels: self.rels,
        }
    }

    fn background(&self) -> String {
        match &self.slide.layout_config().background {
            Some(value) => parse_hex_color(value).unwrap_or_else(|| {
                warn!(
                    "{}: background {:?} is not a hex color, using the theme background",
                    self.slide.slide_ref(),
                    value
                );
                self.deck.palette.background.to_string()
            }),
            None => self.deck.palette.background.to_string(),
        }
    }

    fn style(&self, size_pt: u32) -> RunStyle {
        RunStyle::new(size_pt, &self.text_color)
    }

    fn add_rel(&mut self, rel_type: &'static str, target: String) -> String {
        let id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship::new(id.clone(), rel_type, target));
        id
    }

    fn add_title(&mut self, frame: Frame, size_pt: u32, bold: bool, align: &'static str) {
        if self.slide.title().is_empty() {
            return;
        }
        let mut style = self.style(size_pt);
        style.bold = bold;
        self.shapes.push(Shape::Title {
            frame,
            paragraph: Paragraph::new(self.slide.title(), style, align),
        });
    }

    /// Title across the top of the page; returns the body region below it.
    fn add_title_bar(&mut self, page: Frame, size_pt: u32, align: &'static str) -> Frame {
        self.add_title(
            Frame::new(page.x, page.y, page.cx, TITLE_HEIGHT),
            size_pt,
            false,
            align,
        );
        below(page, page.y + TITLE_HEIGHT + GAP)
    }

    fn place_quote(&mut self, page: Frame, align: &'static str) -> Result<()> {
        let slide = self.slide;
        let contents = slide.content();
        let mut top = page.y;
        let mut rest_start = 0;

        if let Some(first) = contents.first() {
            let region = below(page, top);
            let used = match first {
                Content::Text(quote) => {
                    let paragraphs = vec![Paragraph::new(
                        format!("\u{201C}{}\u{201D}", quote),
                        self.style(QUOTE_PT).italic(),
                        "ctr",
                    )];
                    self.add_text_frame(region, paragraphs)
                }
                other => self.place_item(other, self.item_ref(None, 0, other), region, align)?,
            };
            top += used + GAP;
            rest_start = 1;
        }
        if let Some(second) = contents.get(1) {
            let region = below(page, top);
            let used = match second {
                Content::Text(attribution) => {
                    let paragraphs = vec![Paragraph::new(
                        format!("\u{2014} {}", attribution),
                        self.style(ATTRIBUTION_PT),
                        "r",
                    )];
                    self.add_text_frame(region, paragraphs)
                }
                other => self.place_item(other, self.item_ref(None, 1, other), region, align)?,
            };
            top += used + GAP;
            rest_start = 2;
        }

        let region = below(page, top);
        let mut offset = region.y;
        for (position, item) in contents.iter().enumerate().skip(rest_start) {
            let used = self.place_item(
                item,
                self.item_ref(None, position, item),
                below(region, offset),
                align,
            )?;
            offset += used + GAP;
        }
        Ok(())
    }

    fn place_columns(&mut self, body: Frame, align: &'static str) -> Result<()> {
        let slide = self.slide;
        let mut body = body;

        if !slide.content().is_empty() {
            let wanted: i64 = slide
                .content()
                .iter()
                .map(|item| self.estimate_item(item, body.cx, align) + GAP)
                .sum();
            let band = Frame::new(body.x, body.y, body.cx, wanted.min(body.cy / 2));
            self.stack(slide.content(), None, band, align)?;
            body = below(body, band.bottom() + GAP);
        }

        if let (LayoutType::Comparison, Some((left, right))) =
            (slide.layout(), slide.comparison_headers())
        {
            let band = Frame::new(body.x, body.y, body.cx, HEADER_BAND);
            let (left_band, right_band) = split_columns(band);
            for (frame, label) in [(left_band, left), (right_band, right)] {
                let paragraph = Paragraph::new(label, self.style(24).bold(), align);
                self.shapes.push(Shape::TextFrame {
                    frame,
                    paragraphs: vec![paragraph],
                });
            }
            body = below(body, band.bottom() + GAP);
        }

        let (left, right) = split_columns(body);
        for (index, region) in [left, right].into_iter().enumerate() {
            self.stack(slide.column(index), Some(index), region, align)?;
        }
        Ok(())
    }

    /// Place items top to bottom inside `region`.
    fn stack(
        &mut self,
        items: &[Content],
        column: Option<usize>,
        region: Frame,
        align: &'static str,
    ) -> Result<()> {
        let mut top = region.y;
        for (position, item) in items.iter().enumerate() {
            let mut available = below(region, top);
            // Leave room for what follows a picture.
            let is_visual = matches!(item, Content::Image(_) | Content::Media(_));
            if is_visual && position + 1 < items.len() {
                available.cy = (available.cy / 2).max(MIN_REGION);
            }
            let item_ref = self.item_ref(column, position, item);
            let used = self.place_item(item, item_ref, available, align)?;
            top += used + GAP;
        }
        Ok(())
    }

    fn item_ref(&self, column: Option<usize>, position: usize, item: &Content) -> ContentRef {
        ContentRef {
            column,
            position,
            kind: item.content_type(),
        }
    }

    /// Place one item at the top of `region` and return the height it used.
    fn place_item(
        &mut self,
        item: &Content,
        item_ref: ContentRef,
        region: Frame,
        align: &'static str,
    ) -> Result<i64> {
        match item {
            Content::Table(table) => Ok(self.place_table(table, region)),
            Content::Image(image) => self.place_image(image, item_ref, region),
            Content::Media(media) => self.place_media(media, item_ref, region),
            other => {
                let paragraphs = self.text_paragraphs(other, align);
                Ok(self.add_text_frame(region, paragraphs))
            }
        }
    }

    fn add_text_frame(&mut self, region: Frame, paragraphs: Vec<Paragraph>) -> i64 {
        let height = estimate_height(&paragraphs, region.cx);
        self.shapes.push(Shape::TextFrame {
            frame: Frame::new(region.x, region.y, region.cx, height),
            paragraphs,
        });
        height
    }

    fn estimate_item(&self, item: &Content, width: i64, align: &'static str) -> i64 {
        match item {
            Content::Table(table) => table_height(table),
            Content::Image(_) | Content::Media(_) => inches(2.0),
            other => estimate_height(&self.text_paragraphs(other, align), width),
        }
    }

    /// Paragraphs for content that renders as text. Tables, images and media
    /// have their own shapes and yield nothing here.
    fn text_paragraphs(&self, item: &Content, align: &'static str) -> Vec<Paragraph> {
        let body = self.style(BODY_PT);
        let code = self.style(CODE_PT).monospace();
        match item {
            Content::Text(text) => {
                let mut paragraphs: Vec<Paragraph> = text
                    .lines()
                    .map(|line| Paragraph::new(line, body.clone(), align))
                    .collect();
                if paragraphs.is_empty() {
                    paragraphs.push(Paragraph::new("", body, align));
                }
                paragraphs
            }
            Content::BulletList(items) => items
                .iter()
                .map(|text| Paragraph::new(text.as_str(), body.clone(), align).with_bullet(Bullet::Char, 0))
                .collect(),
            Content::NumberedList(items) => items
                .iter()
                .map(|text| {
                    Paragraph::new(text.as_str(), body.clone(), align).with_bullet(Bullet::Number, 0)
                })
                .collect(),
            Content::Code(block) => block
                .code()
                .lines()
                .map(|line| Paragraph::new(line, code.clone(), "l"))
                .collect(),
            Content::Diagram(source) => source
                .lines()
                .map(|line| Paragraph::new(line, code.clone(), "l"))
                .collect(),
            Content::Equation(equation) => {
                let mut paragraphs: Vec<Paragraph> = equation
                    .equation()
                    .lines()
                    .map(|line| Paragraph::new(line.trim(), body.clone().monospace(), "ctr"))
                    .collect();
                if !equation.description().is_empty() {
                    paragraphs.push(Paragraph::new("Where:", body.clone(), align));
                    for (symbol, meaning) in equation.description() {
                        paragraphs.push(
                            Paragraph::new(format!("{}: {}", symbol, meaning), body.clone(), align)
                                .with_bullet(Bullet::Char, 0),
                        );
                    }
                }
                paragraphs
            }
            Content::Markdown(source) => markdown::to_text_blocks(source)
                .into_iter()
                .map(|block| match block.kind {
                    BlockKind::Paragraph => Paragraph::new(block.text, body.clone(), align),
                    BlockKind::Heading(level) => {
                        let size = match level {
                            1 => 28,
                            2 => 24,
                            _ => BODY_PT,
                        };
                        Paragraph::new(block.text, self.style(size).bold(), align)
                    }
                    BlockKind::Bullet(level) => Paragraph::new(block.text, body.clone(), align)
                        .with_bullet(Bullet::Char, level),
                    BlockKind::Numbered(level) => Paragraph::new(block.text, body.clone(), align)
                        .with_bullet(Bullet::Number, level),
                    BlockKind::Code => Paragraph::new(block.text, code.clone(), "l"),
                })
                .collect(),
            Content::Table(_) | Content::Image(_) | Content::Media(_) => Vec::new(),
        }
    }

    fn place_table(&mut self, table: &Table, region: Frame) -> i64 {
        let height = table_height(table);
        self.shapes.push(Shape::Table {
            frame: Frame::new(region.x, region.y, region.cx, height),
            headers: table.headers().to_vec(),
            rows: table.rows().to_vec(),
            style: TableStyle {
                size_pt: TABLE_PT,
                text_color: self.text_color.clone(),
                header_text_color: "FFFFFF".to_string(),
                header_fill: self.deck.palette.accent.to_string(),
            },
        });
        height
    }

    fn place_image(&mut self, image: &Image, item_ref: ContentRef, region: Frame) -> Result<i64> {
        let asset = Asset::new(image.url());
        let data = self
            .deck
            .fetcher
            .load(&asset)
            .map_err(|reason| self.asset_error(item_ref.clone(), image.url(), reason))?;
        let prepared =
            prepare_image(data).map_err(|reason| self.asset_error(item_ref, image.url(), reason))?;

        let caption = image.caption().map(|caption| {
            vec![Paragraph::new(caption, self.style(CAPTION_PT).italic(), "ctr")]
        });
        let caption_height = caption
            .as_ref()
            .map(|paragraphs| estimate_height(paragraphs, region.cx) + GAP)
            .unwrap_or(0);

        let available = (region.cy - caption_height).max(MIN_REGION);
        let (cx, cy) = fit(prepared.width, prepared.height, region.cx, available);
        let frame = Frame::new(region.x + (region.cx - cx) / 2, region.y, cx, cy);

        let part = self
            .deck
            .add_image_part(prepared.extension, prepared.content_type, prepared.data);
        let rel_id = self.add_rel(REL_IMAGE, format!("../media/{}", part));
        self.shapes.push(Shape::Picture {
            frame,
            rel_id,
            description: image.caption().unwrap_or(image.url()).to_string(),
        });

        let mut used = cy;
        if let Some(paragraphs) = caption {
            let caption_region = Frame::new(region.x, frame.bottom() + GAP, region.cx, 0);
            used += GAP + self.add_text_frame(caption_region, paragraphs);
        }
        Ok(used)
    }

    fn place_media(&mut self, media: &Media, item_ref: ContentRef, region: Frame) -> Result<i64> {
        if youtube_embed_url(media.url()).is_some() {
            return Err(self.unsupported(
                item_ref,
                "streaming pages cannot be embedded, link a media file instead",
            ));
        }
        let asset = Asset::new(media.url());
        let extension = asset.extension().unwrap_or_default();
        let (content_type, kind) = media_content_type(&extension).ok_or_else(|| {
            self.unsupported(
                item_ref.clone(),
                format!("no known media type for extension {:?}", extension),
            )
        })?;
        if kind != media.kind() {
            return Err(self.unsupported(
                item_ref,
                format!(
                    "{:?} files are {} but the item is declared as {}",
                    extension,
                    kind.as_str(),
                    media.kind().as_str()
                ),
            ));
        }

        let data = self
            .deck
            .fetcher
            .load(&asset)
            .map_err(|reason| self.asset_error(item_ref, media.url(), reason))?;
        let poster = poster_png(kind, self.deck.palette.accent)?;

        let media_part = self.deck.add_media_part(&extension, content_type, data);
        let poster_part = self.deck.add_image_part("png", "image/png", poster);
        let target = format!("../media/{}", media_part);
        let link_rel_id = match kind {
            MediaKind::Video => self.add_rel(REL_VIDEO, target.clone()),
            MediaKind::Audio => self.add_rel(REL_AUDIO, target.clone()),
        };
        let embed_rel_id = self.add_rel(REL_MEDIA, target);
        let poster_rel_id = self.add_rel(REL_IMAGE, format!("../media/{}", poster_part));

        let (cx, cy) = match kind {
            MediaKind::Video => fit(16, 9, region.cx, region.cy),
            MediaKind::Audio => (inches(1.0), inches(1.0)),
        };
        self.shapes.push(Shape::Media {
            frame: Frame::new(region.x + (region.cx - cx) / 2, region.y, cx, cy),
            kind,
            link_rel_id,
            embed_rel_id,
            poster_rel_id,
        });
        Ok(cy)
    }

    fn slide_ref(&self) -> SlideRef {
        self.slide.slide_ref()
    }

    fn asset_error(&self, item: ContentRef, location: &str, reason: String) -> DeckError {
        DeckError::AssetError {
            slide: self.slide_ref(),
            item,
            location: location.to_string(),
            reason,
        }
    }

    fn unsupported(&self, item: ContentRef, reason: impl Into<String>) -> DeckError {
        DeckError::UnsupportedContentError {
            slide: self.slide_ref(),
            item,
            format: FORMAT,
            reason: reason.into(),
        }
    }
}

/// The part of `region` starting at vertical position `top`.
fn below(region: Frame, top: i64) -> Frame {
    Frame::new(
        region.x,
        top,
        region.cx,
        (region.bottom() - top).max(MIN_REGION),
    )
}

fn split_columns(region: Frame) -> (Frame, Frame) {
    let width = (region.cx - COLUMN_GAP) / 2;
    (
        Frame::new(region.x, region.y, width, region.cy),
        Frame::new(region.x + width + COLUMN_GAP, region.y, width, region.cy),
    )
}

fn table_height(table: &Table) -> i64 {
    (table.rows().len() as i64 + 1) * TABLE_ROW_HEIGHT
}

/// Rough height of a text frame: wrapped line count times line height.
fn estimate_height(paragraphs: &[Paragraph], width: i64) -> i64 {
    let total: f64 = paragraphs
        .iter()
        .map(|paragraph| {
            let size = paragraph.style.size_pt as f64;
            let indent = match paragraph.bullet {
                Bullet::None => 0,
                _ => BULLET_INDENT * (paragraph.level as i64 + 1),
            };
            let usable = (width - indent - INSET_X).max(EMU_PER_INCH) as f64;
            let char_width = if paragraph.style.monospace { 0.6 } else { 0.5 };
            let per_line = (usable / (size * char_width * EMU_PER_POINT as f64))
                .floor()
                .max(1.0);
            let lines = (paragraph.text.chars().count() as f64 / per_line)
                .ceil()
                .max(1.0);
            lines * size * LINE_SPACING * EMU_PER_POINT as f64
        })
        .sum();
    total.round() as i64 + INSET_Y
}

/// Largest size with the aspect ratio of `width` x `height` fitting the box.
fn fit(width: u32, height: u32, max_cx: i64, max_cy: i64) -> (i64, i64) {
    let w = width.max(1) as f64;
    let h = height.max(1) as f64;
    let scale = (max_cx as f64 / w).min(max_cy as f64 / h);
    ((w * scale).round() as i64, (h * scale).round() as i64)
}

/// Image bytes ready to embed, with pixel dimensions.
#[derive(Debug)]
struct PreparedImage {
    data: Vec<u8>,
    extension: &'static str,
    content_type: &'static str,
    width: u32,
    height: u32,
}

/// Sniff the image format. Formats PowerPoint reads natively are embedded as
/// they are; anything else that decodes is converted to PNG.
fn prepare_image(data: Vec<u8>) -> std::result::Result<PreparedImage, String> {
    let native = {
        let reader = ImageReader::new(Cursor::new(data.as_slice()))
            .with_guessed_format()
            .map_err(|e| e.to_string())?;
        let format = reader
            .format()
            .ok_or_else(|| "unrecognized image format".to_string())?;
        let native = match format {
            ImageFormat::Png => Some(("png", "image/png")),
            ImageFormat::Jpeg => Some(("jpeg", "image/jpeg")),
            ImageFormat::Gif => Some(("gif", "image/gif")),
            ImageFormat::Bmp => Some(("bmp", "image/bmp")),
            ImageFormat::Tiff => Some(("tiff", "image/tiff")),
            _ => None,
        };
        match native {
            Some((extension, content_type)) => {
                let (width, height) = reader
                    .into_dimensions()
                    .map_err(|e| format!("failed to read {:?} image: {}", format, e))?;
                Some((extension, content_type, width, height))
            }
            None => None,
        }
    };

    if let Some((extension, content_type, width, height)) = native {
        return Ok(PreparedImage {
            data,
            extension,
            content_type,
            width,
            height,
        });
    }

    debug!("Converting image to PNG for embedding");
    let decoded = ImageReader::new(Cursor::new(data.as_slice()))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| format!("failed to decode image: {}", e))?;
    let mut png = Cursor::new(Vec::new());
    decoded
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| format!("failed to convert image to PNG: {}", e))?;
    Ok(PreparedImage {
        data: png.into_inner(),
        extension: "png",
        content_type: "image/png",
        width: decoded.width(),
        height: decoded.height(),
    })
}

/// Content type and kind of a media file, by lowercase extension.
fn media_content_type(extension: &str) -> Option<(&'static str, MediaKind)> {
    match extension {
        "mp4" | "m4v" => Some(("video/mp4", MediaKind::Video)),
        "mov" => Some(("video/quicktime", MediaKind::Video)),
        "wmv" => Some(("video/x-ms-wmv", MediaKind::Video)),
        "avi" => Some(("video/x-msvideo", MediaKind::Video)),
        "webm" => Some(("video/webm", MediaKind::Video)),
        "mp3" => Some(("audio/mpeg", MediaKind::Audio)),
        "wav" => Some(("audio/wav", MediaKind::Audio)),
        "m4a" => Some(("audio/mp4", MediaKind::Audio)),
        "wma" => Some(("audio/x-ms-wma", MediaKind::Audio)),
        _ => None,
    }
}

/// Poster frame shown before playback: an accent-colored card with a play mark.
fn poster_png(kind: MediaKind, accent: &str) -> Result<Vec<u8>> {
    let (width, height) = match kind {
        MediaKind::Video => (320u32, 180u32),
        MediaKind::Audio => (128u32, 128u32),
    };
    let channel = |i: usize| {
        accent
            .get(i..i + 2)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .unwrap_or(0)
    };
    let background = Rgb([channel(0), channel(2), channel(4)]);
    let mark = Rgb([255u8, 255, 255]);

    let mut poster = RgbImage::from_pixel(width, height, background);
    let (cx, cy) = (width as i64 / 2, height as i64 / 2);
    let half = height as i64 / 5;
    for (x, y, pixel) in poster.enumerate_pixels_mut() {
        let dx = x as i64 - (cx - half / 2);
        let dy = (y as i64 - cy).abs();
        // Right-pointing triangle
        if dx >= 0 && dx <= half && dy <= half - dx {
            *pixel = mark;
        }
    }

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(poster)
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| DeckError::PptxError(format!("failed to render media poster: {}", e)))?;
    Ok(png.into_inner())
}
