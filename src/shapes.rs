// ABOUTME: Slide shapes for the PPTX exporter and their DrawingML serialization
// ABOUTME: Title, text frame, picture, table and media shapes positioned in EMU

use crate::content::MediaKind;
use crate::utils::escape_xml;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;
/// English Metric Units per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

pub const MONOSPACE_FONT: &str = "Courier New";

pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// Position and size of a shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    pub fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.cy
    }

    fn xfrm(&self, tag: &str) -> String {
        format!(
            r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
            self.x,
            self.y,
            self.cx.max(0),
            self.cy.max(0),
            tag = tag
        )
    }
}

/// Bullet marker of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bullet {
    None,
    Char,
    Number,
}

/// Character formatting applied to a whole paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStyle {
    pub size_pt: u32,
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    /// `RRGGBB`
    pub color: String,
}

impl RunStyle {
    pub fn new(size_pt: u32, color: &str) -> Self {
        Self {
            size_pt,
            bold: false,
            italic: false,
            monospace: false,
            color: color.to_string(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }

    fn write_xml(&self, tag: &str, xml: &mut String) {
        xml.push_str(&format!(
            r#"<{} lang="en-US" sz="{}""#,
            tag,
            self.size_pt * 100
        ));
        if self.bold {
            xml.push_str(r#" b="1""#);
        }
        if self.italic {
            xml.push_str(r#" i="1""#);
        }
        xml.push_str(r#" dirty="0">"#);
        xml.push_str(&format!(
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            self.color
        ));
        if self.monospace {
            xml.push_str(&format!(
                r#"<a:latin typeface="{font}"/><a:cs typeface="{font}"/>"#,
                font = MONOSPACE_FONT
            ));
        }
        xml.push_str(&format!("</{}>", tag));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub bullet: Bullet,
    pub level: u32,
    /// DrawingML alignment: `l`, `ctr` or `r`.
    pub align: &'static str,
    pub style: RunStyle,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: RunStyle, align: &'static str) -> Self {
        Self {
            text: text.into(),
            bullet: Bullet::None,
            level: 0,
            align,
            style,
        }
    }

    pub fn with_bullet(mut self, bullet: Bullet, level: u32) -> Self {
        self.bullet = bullet;
        self.level = level;
        self
    }

    fn write_xml(&self, xml: &mut String) {
        xml.push_str("<a:p>");
        match self.bullet {
            Bullet::None => {
                xml.push_str(&format!(r#"<a:pPr algn="{}"><a:buNone/></a:pPr>"#, self.align));
            }
            Bullet::Char | Bullet::Number => {
                let indent = 285_750;
                let margin = 342_900 * (self.level as i64 + 1);
                xml.push_str(&format!(
                    r#"<a:pPr marL="{}" lvl="{}" indent="-{}" algn="{}">"#,
                    margin, self.level, indent, self.align
                ));
                if self.bullet == Bullet::Char {
                    xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#);
                } else {
                    xml.push_str(r#"<a:buFont typeface="+mj-lt"/><a:buAutoNum type="arabicPeriod"/>"#);
                }
                xml.push_str("</a:pPr>");
            }
        }
        if self.text.is_empty() {
            self.style.write_xml("a:endParaRPr", xml);
        } else {
            xml.push_str("<a:r>");
            self.style.write_xml("a:rPr", xml);
            xml.push_str(&format!("<a:t>{}</a:t>", escape_xml(&self.text)));
            xml.push_str("</a:r>");
        }
        xml.push_str("</a:p>");
    }
}

/// Cell text styling for a table shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    pub size_pt: u32,
    pub text_color: String,
    pub header_text_color: String,
    pub header_fill: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Title {
        frame: Frame,
        paragraph: Paragraph,
    },
    TextFrame {
        frame: Frame,
        paragraphs: Vec<Paragraph>,
    },
    Picture {
        frame: Frame,
        rel_id: String,
        description: String,
    },
    Table {
        frame: Frame,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        style: TableStyle,
    },
    Media {
        frame: Frame,
        kind: MediaKind,
        link_rel_id: String,
        embed_rel_id: String,
        poster_rel_id: String,
    },
}

impl Shape {
    /// Append this shape's XML to `xml`. `id` must be unique within the slide.
    pub fn write_xml(&self, id: u32, xml: &mut String) {
        match self {
            Shape::Title { frame, paragraph } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                xml.push_str(&format!(r#"<p:cNvPr id="{}" name="Title {}"/>"#, id, id));
                xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                xml.push_str(r#"<p:nvPr><p:ph type="title"/></p:nvPr>"#);
                xml.push_str("</p:nvSpPr><p:spPr>");
                xml.push_str(&frame.xfrm("a:xfrm"));
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
                xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" anchor="ctr"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#);
                paragraph.write_xml(xml);
                xml.push_str("</p:txBody></p:sp>");
            }
            Shape::TextFrame { frame, paragraphs } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                xml.push_str(&format!(r#"<p:cNvPr id="{}" name="Text Box {}"/>"#, id, id));
                xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/>"#);
                xml.push_str("</p:nvSpPr><p:spPr>");
                xml.push_str(&frame.xfrm("a:xfrm"));
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);
                xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#);
                if paragraphs.is_empty() {
                    xml.push_str("<a:p/>");
                }
                for paragraph in paragraphs {
                    paragraph.write_xml(xml);
                }
                xml.push_str("</p:txBody></p:sp>");
            }
            Shape::Picture {
                frame,
                rel_id,
                description,
            } => {
                xml.push_str("<p:pic><p:nvPicPr>");
                xml.push_str(&format!(
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    id,
                    id,
                    escape_xml(description)
                ));
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/>"#);
                xml.push_str("</p:nvPicPr><p:blipFill>");
                xml.push_str(&format!(r#"<a:blip r:embed="{}"/>"#, rel_id));
                xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>");
                xml.push_str(&frame.xfrm("a:xfrm"));
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
            }
            Shape::Table {
                frame,
                headers,
                rows,
                style,
            } => write_table(id, *frame, headers, rows, style, xml),
            Shape::Media {
                frame,
                kind,
                link_rel_id,
                embed_rel_id,
                poster_rel_id,
            } => {
                let (name, file_tag) = match kind {
                    MediaKind::Video => ("Video", "a:videoFile"),
                    MediaKind::Audio => ("Audio", "a:audioFile"),
                };
                xml.push_str("<p:pic><p:nvPicPr>");
                xml.push_str(&format!(r#"<p:cNvPr id="{}" name="{} {}">"#, id, name, id));
                xml.push_str(r#"<a:hlinkClick r:id="" action="ppaction://media"/></p:cNvPr>"#);
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr>");
                xml.push_str(&format!(r#"<{} r:link="{}"/>"#, file_tag, link_rel_id));
                xml.push_str(r#"<p:extLst><p:ext uri="{DAA4B4D4-6D71-4841-9C94-3DE7FCFB9230}">"#);
                xml.push_str(&format!(
                    r#"<p14:media xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main" r:embed="{}"/>"#,
                    embed_rel_id
                ));
                xml.push_str("</p:ext></p:extLst></p:nvPr></p:nvPicPr><p:blipFill>");
                xml.push_str(&format!(r#"<a:blip r:embed="{}"/>"#, poster_rel_id));
                xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>");
                xml.push_str(&frame.xfrm("a:xfrm"));
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
            }
        }
    }
}

fn write_table(
    id: u32,
    frame: Frame,
    headers: &[String],
    rows: &[Vec<String>],
    style: &TableStyle,
    xml: &mut String,
) {
    let columns = headers.len().max(1) as i64;
    let row_count = rows.len() as i64 + 1;
    let column_width = frame.cx / columns;
    let row_height = frame.cy / row_count;

    xml.push_str("<p:graphicFrame><p:nvGraphicFramePr>");
    xml.push_str(&format!(r#"<p:cNvPr id="{}" name="Table {}"/>"#, id, id));
    xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/>"#);
    xml.push_str("</p:nvGraphicFramePr>");
    xml.push_str(&frame.xfrm("p:xfrm"));
    xml.push_str(r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">"#);
    xml.push_str(r#"<a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>"#);
    for _ in 0..columns {
        xml.push_str(&format!(r#"<a:gridCol w="{}"/>"#, column_width));
    }
    xml.push_str("</a:tblGrid>");

    let header_style = RunStyle::new(style.size_pt, &style.header_text_color).bold();
    let cell_style = RunStyle::new(style.size_pt, &style.text_color);
    write_table_row(headers, row_height, &header_style, Some(&style.header_fill), xml);
    for row in rows {
        write_table_row(row, row_height, &cell_style, None, xml);
    }

    xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
}

fn write_table_row(
    cells: &[String],
    height: i64,
    style: &RunStyle,
    fill: Option<&str>,
    xml: &mut String,
) {
    xml.push_str(&format!(r#"<a:tr h="{}">"#, height));
    for cell in cells {
        xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>");
        Paragraph::new(cell.as_str(), style.clone(), "l").write_xml(xml);
        xml.push_str("</a:txBody>");
        match fill {
            Some(color) => xml.push_str(&format!(
                r#"<a:tcPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:tcPr>"#,
                color
            )),
            None => xml.push_str("<a:tcPr/>"),
        }
        xml.push_str("</a:tc>");
    }
    xml.push_str("</a:tr>");
}
