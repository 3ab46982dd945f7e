// ABOUTME: HTML generation module for the reveal-deck library
// ABOUTME: Renders a presentation as a reveal.js document, one section per slide

use crate::config::{DEFAULT_MERMAID_SRC, DEFAULT_REVEAL_CDN};
use crate::content::{Content, Equation, Image, Media, MediaKind, Table};
use crate::errors::Result;
use crate::layout::LayoutType;
use crate::markdown;
use crate::presentation::Presentation;
use crate::slide::Slide;
use crate::utils::{escape_markup, write_atomically};
use log::info;
use std::path::Path;
use url::Url;

/// Options for the generated reveal.js document
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub reveal_cdn: String,
    pub mermaid_src: String,
    /// Advance slides automatically every N milliseconds, looping at the end.
    pub auto_slide_ms: Option<u64>,
    /// Add a button that opens the browser's print dialog for PDF export.
    pub pdf_export: bool,
    /// Use reveal.js scroll view.
    pub scroll_view: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            reveal_cdn: DEFAULT_REVEAL_CDN.to_string(),
            mermaid_src: DEFAULT_MERMAID_SRC.to_string(),
            auto_slide_ms: None,
            pdf_export: false,
            scroll_view: true,
        }
    }
}

/// Render the whole presentation to an HTML document.
///
/// Rendering is pure: the same presentation and options always produce the
/// same string.
pub fn render_presentation(presentation: &Presentation, options: &HtmlOptions) -> String {
    let slides: Vec<String> = presentation.slides().iter().map(slide_to_html).collect();

    let cdn = options.reveal_cdn.trim_end_matches('/');
    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"utf-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!(
        "<title>{}</title>\n",
        escape_markup(presentation.title())
    ));
    html_doc.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}/reveal.min.css\">\n",
        cdn
    ));
    html_doc.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}/theme/{}.min.css\">\n",
        cdn,
        presentation.theme()
    ));
    html_doc.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}/plugin/highlight/monokai.min.css\">\n",
        cdn
    ));
    html_doc.push_str(&format!("<script src=\"{}\"></script>\n", options.mermaid_src));
    html_doc.push_str(STYLE);
    html_doc.push_str("</head>\n<body>\n");

    html_doc.push_str("<div class=\"reveal\">\n<div class=\"slides\">\n");
    for slide in slides {
        html_doc.push_str(&slide);
    }
    html_doc.push_str("</div>\n</div>\n");

    if options.pdf_export {
        html_doc.push_str(
            "<button onclick=\"exportPDF()\" class=\"pdf-btn\">Export to PDF</button>\n",
        );
    }

    html_doc.push_str(&format!("<script src=\"{}/reveal.min.js\"></script>\n", cdn));
    for plugin in ["markdown/markdown", "highlight/highlight", "math/math", "zoom/zoom"] {
        html_doc.push_str(&format!(
            "<script src=\"{}/plugin/{}.min.js\"></script>\n",
            cdn, plugin
        ));
    }
    html_doc.push_str(&initialize_script(presentation, options));
    html_doc.push_str("</body>\n</html>\n");

    html_doc
}

const STYLE: &str = r#"<style>
.reveal img { max-width: 100%; height: auto; }
.reveal .content.left { text-align: left; }
.reveal .content.center { text-align: center; }
.reveal .content.right { text-align: right; }
.reveal .two-columns { display: flex; gap: 2em; }
.reveal .two-columns > .column { flex: 1; }
.reveal .comparison-headers { display: flex; gap: 2em; }
.reveal .comparison-headers > div { flex: 1; }
.pdf-btn { position: fixed; top: 30px; right: 30px; z-index: 100; padding: 10px 20px; background: #333; color: white; border: none; border-radius: 5px; cursor: pointer; font-size: 16px; }
.pdf-btn:hover { background: #555; }
@media print { .pdf-btn { display: none; } }
</style>
"#;

fn initialize_script(presentation: &Presentation, options: &HtmlOptions) -> String {
    let mut script = String::from("<script>\n");
    if options.pdf_export {
        script.push_str("function exportPDF() { window.print(); }\n");
    }
    script.push_str("mermaid.initialize({ startOnLoad: true });\n");
    script.push_str("Reveal.initialize({\n");
    if let Some(ms) = options.auto_slide_ms {
        script.push_str(&format!("  autoSlide: {},\n  loop: true,\n", ms));
    }
    if options.scroll_view {
        script.push_str("  view: 'scroll',\n  scrollProgress: true,\n");
    }
    script.push_str("  hash: true,\n");
    script.push_str(&format!("  transition: '{}',\n", presentation.transition()));
    script.push_str("  plugins: [RevealMarkdown, RevealHighlight, RevealMath, RevealZoom]\n");
    script.push_str("});\n</script>\n");
    script
}

/// Render one slide as a `<section>` element.
pub fn slide_to_html(slide: &Slide) -> String {
    let config = slide.layout_config();
    let layout = slide.layout();

    let mut classes = vec![layout.css_class()];
    classes.extend(config.extra_classes().iter().cloned());
    let mut open = format!("<section class=\"{}\"", escape_markup(&classes.join(" ")));
    if let Some(background) = &config.background {
        open.push_str(&format!(
            " data-background=\"{}\"",
            escape_markup(background)
        ));
    }
    if matches!(
        layout,
        LayoutType::Title | LayoutType::TitleContent | LayoutType::Section
    ) {
        open.push_str(" data-auto-animate");
    }
    open.push_str(">\n");

    let title = escape_markup(slide.title());
    let heading = format!(
        "<{tag}>{title}</{tag}>\n",
        tag = config.title_size.tag(),
        title = title
    );
    let align = config.content_align.as_str();

    let body = match layout {
        LayoutType::Blank => content_block(slide.content(), align),
        LayoutType::Section => format!(
            "<h1>{}</h1>\n{}",
            title,
            content_block(slide.content(), align)
        ),
        LayoutType::Quote => quote_html(slide.content(), align),
        LayoutType::TwoColumns | LayoutType::Comparison | LayoutType::TitleTwoContent => {
            let mut body = heading;
            body.push_str(&content_block(slide.content(), align));
            if let (LayoutType::Comparison, Some((left, right))) =
                (layout, slide.comparison_headers())
            {
                body.push_str(&format!(
                    "<div class=\"comparison-headers\">\n<div class=\"left-header\"><h3>{}</h3></div>\n<div class=\"right-header\"><h3>{}</h3></div>\n</div>\n",
                    escape_markup(left),
                    escape_markup(right)
                ));
            }
            body.push_str("<div class=\"two-columns\">\n");
            for column in slide.columns() {
                body.push_str("<div class=\"column\">\n");
                body.push_str(&contents_to_html(column));
                body.push_str("</div>\n");
            }
            body.push_str("</div>\n");
            body
        }
        LayoutType::Title | LayoutType::TitleContent | LayoutType::ImageWithCaption => {
            let mut body = heading;
            body.push_str(&format!(
                "<div class=\"content {}\">\n{}</div>\n",
                align,
                contents_to_html(slide.content())
            ));
            body
        }
    };

    format!("{}{}</section>\n", open, body)
}

fn content_block(contents: &[Content], align: &str) -> String {
    if contents.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"content {}\">\n{}</div>\n",
        align,
        contents_to_html(contents)
    )
}

fn quote_html(contents: &[Content], align: &str) -> String {
    let mut html = String::from("<blockquote>\n");
    let mut rest = contents;
    if let Some((quote, tail)) = rest.split_first() {
        html.push_str(&inline_or_block(quote));
        rest = tail;
        if let Some((attribution, tail)) = rest.split_first() {
            html.push_str(&format!("<cite>{}</cite>\n", inline_or_block(attribution)));
            rest = tail;
        }
    }
    html.push_str("</blockquote>\n");
    html.push_str(&content_block(rest, align));
    html
}

// Plain text inside a quote or citation is written without a wrapping paragraph.
fn inline_or_block(content: &Content) -> String {
    match content {
        Content::Text(text) => format!("{}\n", escape_markup(text)),
        other => content_to_html(other),
    }
}

fn contents_to_html(contents: &[Content]) -> String {
    contents.iter().map(content_to_html).collect()
}

/// Convert one content item to its HTML fragment (newline terminated).
pub fn content_to_html(content: &Content) -> String {
    match content {
        Content::Text(text) => format!("<p>{}</p>\n", escape_markup(text)),
        Content::BulletList(items) => list_html("ul", items),
        Content::NumberedList(items) => list_html("ol", items),
        Content::Code(code) => format!(
            "<pre><code class=\"language-{}\" data-trim>{}</code></pre>\n",
            escape_markup(code.language()),
            escape_markup(code.code())
        ),
        Content::Image(image) => image_html(image),
        Content::Equation(equation) => equation_html(equation),
        Content::Table(table) => table_html(table),
        // Diagram sources go through untouched for the client-side renderer.
        Content::Diagram(source) => format!("<div class=\"mermaid\">\n{}\n</div>\n", source),
        Content::Media(media) => media_html(media),
        Content::Markdown(source) => {
            format!("<div class=\"markdown\">\n{}</div>\n", markdown::to_html(source))
        }
    }
}

fn list_html(tag: &str, items: &[String]) -> String {
    let mut html = format!("<{}>\n", tag);
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", escape_markup(item)));
    }
    html.push_str(&format!("</{}>\n", tag));
    html
}

fn image_html(image: &Image) -> String {
    let caption = image.caption().unwrap_or("");
    let mut html = format!(
        "<img src=\"{}\" alt=\"{}\">\n",
        escape_markup(image.url()),
        escape_markup(caption)
    );
    if !caption.is_empty() {
        html.push_str(&format!("<p class=\"caption\">{}</p>\n", escape_markup(caption)));
    }
    html
}

fn equation_html(equation: &Equation) -> String {
    let mut html = format!(
        "<div class=\"equation\">$$\n{}\n$$</div>\n",
        escape_markup(equation.equation())
    );
    if !equation.description().is_empty() {
        html.push_str("<p>Where:</p>\n<ul class=\"equation-legend\">\n");
        for (symbol, meaning) in equation.description() {
            html.push_str(&format!(
                "<li><strong>{}</strong>: {}</li>\n",
                escape_markup(symbol),
                escape_markup(meaning)
            ));
        }
        html.push_str("</ul>\n");
    }
    html
}

fn table_html(table: &Table) -> String {
    let mut html = String::from("<table>\n<thead>\n<tr>");
    for header in table.headers() {
        html.push_str(&format!("<th>{}</th>", escape_markup(header)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in table.rows() {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_markup(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

fn media_html(media: &Media) -> String {
    if let Some(embed) = youtube_embed_url(media.url()) {
        return format!(
            "<iframe width=\"720\" height=\"480\" src=\"{}\" frameborder=\"0\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen></iframe>\n",
            escape_markup(&embed)
        );
    }
    let tag = match media.kind() {
        MediaKind::Video => "video",
        MediaKind::Audio => "audio",
    };
    format!(
        "<{tag} src=\"{src}\" controls style=\"max-width: 100%;\"></{tag}>\n",
        tag = tag,
        src = escape_markup(media.url())
    )
}

/// Embed URL for YouTube watch, short or embed links.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let video_id = match host {
        "youtube.com" | "youtube-nocookie.com" => {
            if let Some(id) = parsed.path().strip_prefix("/embed/") {
                Some(id.to_string())
            } else {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            }
        }
        "youtu.be" => Some(parsed.path().trim_start_matches('/').to_string()),
        _ => None,
    }?;
    if video_id.is_empty() {
        return None;
    }
    Some(format!("https://www.youtube.com/embed/{}", video_id))
}

/// Render the presentation and write it to `output_path`.
pub fn write_html_to_file(
    presentation: &Presentation,
    output_path: &Path,
    options: &HtmlOptions,
) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);
    let html_content = render_presentation(presentation, options);
    write_atomically(output_path, html_content.as_bytes())
}
