// ABOUTME: OPC package assembly for PPTX output
// ABOUTME: Writes presentation, master, layout, theme, slide and media parts into a zip

use crate::errors::Result;
use crate::theme::Palette;
use crate::utils::escape_xml;
use log::{debug, info};
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use zip::{write::FileOptions, ZipWriter};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

pub const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub const REL_VIDEO: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/video";
pub const REL_AUDIO: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/audio";
pub const REL_MEDIA: &str = "http://schemas.microsoft.com/office/2007/relationships/media";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const REL_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

/// A relationship from a part to another part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
}

impl Relationship {
    pub fn new(id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rel_type,
            target: target.into(),
        }
    }
}

/// A binary file stored under `ppt/media/`.
#[derive(Debug, Clone)]
pub struct MediaPart {
    pub file_name: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl MediaPart {
    fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("bin")
    }
}

/// A finished slide: its XML and its relationships.
#[derive(Debug, Clone)]
pub struct SlidePart {
    pub xml: String,
    pub rels: Vec<Relationship>,
}

/// Everything needed to write a presentation package.
pub struct Package<'a> {
    pub title: &'a str,
    pub size: (i64, i64),
    pub palette: Palette,
    pub slides: Vec<SlidePart>,
    pub media: Vec<MediaPart>,
}

impl Package<'_> {
    /// Serialize the package into the bytes of a `.pptx` file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        info!("Creating PPTX structure: [Content_Types].xml");
        write_part(&mut zip, options, "[Content_Types].xml", &self.content_types_xml())?;
        write_part(&mut zip, options, "_rels/.rels", &root_rels_xml())?;
        write_part(&mut zip, options, "docProps/app.xml", &self.app_xml())?;
        write_part(&mut zip, options, "docProps/core.xml", &self.core_xml())?;

        info!("Creating PPTX structure: ppt/presentation.xml");
        write_part(&mut zip, options, "ppt/presentation.xml", &self.presentation_xml())?;
        write_part(
            &mut zip,
            options,
            "ppt/_rels/presentation.xml.rels",
            &rels_xml(&self.presentation_rels()),
        )?;
        write_part(&mut zip, options, "ppt/presProps.xml", &pres_props_xml())?;
        write_part(&mut zip, options, "ppt/viewProps.xml", &view_props_xml())?;
        write_part(&mut zip, options, "ppt/tableStyles.xml", &table_styles_xml())?;

        write_part(
            &mut zip,
            options,
            "ppt/slideMasters/slideMaster1.xml",
            &slide_master_xml(),
        )?;
        write_part(
            &mut zip,
            options,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &rels_xml(&[
                Relationship::new("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                Relationship::new("rId2", REL_THEME, "../theme/theme1.xml"),
            ]),
        )?;
        write_part(
            &mut zip,
            options,
            "ppt/slideLayouts/slideLayout1.xml",
            &slide_layout_xml(),
        )?;
        write_part(
            &mut zip,
            options,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &rels_xml(&[Relationship::new(
                "rId1",
                REL_SLIDE_MASTER,
                "../slideMasters/slideMaster1.xml",
            )]),
        )?;
        write_part(&mut zip, options, "ppt/theme/theme1.xml", &theme_xml(&self.palette))?;

        for (i, slide) in self.slides.iter().enumerate() {
            let number = i + 1;
            info!("Creating slide XML: ppt/slides/slide{}.xml", number);
            write_part(
                &mut zip,
                options,
                &format!("ppt/slides/slide{}.xml", number),
                &slide.xml,
            )?;
            write_part(
                &mut zip,
                options,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &rels_xml(&slide.rels),
            )?;
        }

        for media in &self.media {
            info!("Adding media to PPTX: ppt/media/{}", media.file_name);
            zip.start_file(format!("ppt/media/{}", media.file_name), options)?;
            zip.write_all(&media.data).map_err(zip::result::ZipError::Io)?;
        }

        info!("Finalizing PPTX package");
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> String {
        // Extension -> content type, deduplicated and in a stable order.
        let mut defaults: BTreeMap<String, &'static str> = BTreeMap::new();
        defaults.insert(
            "rels".to_string(),
            "application/vnd.openxmlformats-package.relationships+xml",
        );
        defaults.insert("xml".to_string(), "application/xml");
        for media in &self.media {
            defaults
                .entry(media.extension().to_string())
                .or_insert(media.content_type);
        }

        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        for (extension, content_type) in &defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                extension, content_type
            ));
        }
        let overrides = [
            ("/ppt/presentation.xml", "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"),
            ("/ppt/slideMasters/slideMaster1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"),
            ("/ppt/slideLayouts/slideLayout1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"),
            ("/ppt/theme/theme1.xml", "application/vnd.openxmlformats-officedocument.theme+xml"),
            ("/ppt/presProps.xml", "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"),
            ("/ppt/viewProps.xml", "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"),
            ("/ppt/tableStyles.xml", "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"),
            ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
            ("/docProps/app.xml", "application/vnd.openxmlformats-officedocument.extended-properties+xml"),
        ];
        for (part, content_type) in overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, content_type
            ));
        }
        for i in 0..self.slides.len() {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
                i + 1,
                CT_SLIDE
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn app_xml(&self) -> String {
        format!(
            r#"{}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>reveal-deck</Application>
    <Slides>{}</Slides>
</Properties>"#,
            XML_DECLARATION,
            self.slides.len()
        )
    }

    fn core_xml(&self) -> String {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        format!(
            r#"{}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:title>{}</dc:title>
    <dc:creator>reveal-deck</dc:creator>
    <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
    <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
            XML_DECLARATION,
            escape_xml(self.title),
            now,
            now
        )
    }

    /// rId1 is the master, rId2 the theme, slides follow from rId3.
    fn presentation_rels(&self) -> Vec<Relationship> {
        let mut rels = vec![
            Relationship::new("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
            Relationship::new("rId2", REL_THEME, "theme/theme1.xml"),
        ];
        for i in 0..self.slides.len() {
            rels.push(Relationship::new(
                format!("rId{}", i + 3),
                REL_SLIDE,
                format!("slides/slide{}.xml", i + 1),
            ));
        }
        let next = self.slides.len() + 3;
        rels.push(Relationship::new(format!("rId{}", next), REL_PRES_PROPS, "presProps.xml"));
        rels.push(Relationship::new(format!("rId{}", next + 1), REL_VIEW_PROPS, "viewProps.xml"));
        rels.push(Relationship::new(
            format!("rId{}", next + 2),
            REL_TABLE_STYLES,
            "tableStyles.xml",
        ));
        rels
    }

    fn presentation_xml(&self) -> String {
        let (cx, cy) = self.size;
        let slide_ids = (0..self.slides.len())
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 3))
            .collect::<Vec<String>>()
            .join("");
        let sld_id_lst = if slide_ids.is_empty() {
            String::new()
        } else {
            format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids)
        };
        format!(
            r#"{decl}
<p:presentation xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{ids}<p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/><p:defaultTextStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:defaultTextStyle></p:presentation>"#,
            decl = XML_DECLARATION,
            a = NS_A,
            r = NS_R,
            p = NS_P,
            ids = sld_id_lst,
            cx = cx,
            cy = cy
        )
    }
}

fn write_part<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
    name: &str,
    content: &str,
) -> Result<()> {
    debug!("Writing part {} ({} bytes)", name, content.len());
    zip.start_file(name, options)?;
    zip.write_all(content.as_bytes())
        .map_err(zip::result::ZipError::Io)?;
    Ok(())
}

pub fn rels_xml(rels: &[Relationship]) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for rel in rels {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            rel.id,
            rel.rel_type,
            escape_xml(&rel.target)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn root_rels_xml() -> String {
    format!(
        r#"{}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#,
        XML_DECLARATION
    )
}

fn pres_props_xml() -> String {
    format!(
        r#"{}
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
        XML_DECLARATION, NS_A, NS_R, NS_P
    )
}

fn view_props_xml() -> String {
    format!(
        r#"{}
<p:viewPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#,
        XML_DECLARATION, NS_A, NS_R, NS_P
    )
}

fn table_styles_xml() -> String {
    format!(
        r#"{}
<a:tblStyleLst xmlns:a="{}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
        XML_DECLARATION, NS_A
    )
}

/// Empty group-shape header shared by master, layout and slides.
pub const SP_TREE_HEADER: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

fn slide_master_xml() -> String {
    format!(
        r#"{decl}
<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{header}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles><p:titleStyle><a:lvl1pPr algn="l"><a:defRPr sz="3600" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle><p:bodyStyle><a:lvl1pPr><a:defRPr sz="2000" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:bodyStyle><p:otherStyle><a:lvl1pPr><a:defRPr sz="1800" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill></a:defRPr></a:lvl1pPr></p:otherStyle></p:txStyles></p:sldMaster>"#,
        decl = XML_DECLARATION,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        header = SP_TREE_HEADER
    )
}

fn slide_layout_xml() -> String {
    format!(
        r#"{decl}
<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{header}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        decl = XML_DECLARATION,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        header = SP_TREE_HEADER
    )
}

/// The document theme carries the deck palette: `dk1` is the text color,
/// `lt1` the background and `accent1` the accent.
fn theme_xml(palette: &Palette) -> String {
    let srgb = |value: &str| format!(r#"<a:srgbClr val="{}"/>"#, value);
    format!(
        r#"{decl}
<a:theme xmlns:a="{a}" name="reveal-deck"><a:themeElements><a:clrScheme name="reveal-deck"><a:dk1>{text}</a:dk1><a:lt1>{background}</a:lt1><a:dk2>{text}</a:dk2><a:lt2>{background}</a:lt2><a:accent1>{accent}</a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink>{accent}</a:hlink><a:folHlink>{accent}</a:folHlink></a:clrScheme><a:fontScheme name="reveal-deck"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="reveal-deck"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#,
        decl = XML_DECLARATION,
        a = NS_A,
        text = srgb(palette.text),
        background = srgb(palette.background),
        accent = srgb(palette.accent)
    )
}

/// Wrap a slide's shape tree into a complete slide part.
pub fn slide_xml(background: &str, shapes: &str, transition: Option<&str>) -> String {
    let transition = transition
        .map(|element| format!("<p:transition>{}</p:transition>", element))
        .unwrap_or_default();
    format!(
        r#"{decl}
<p:sld xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}"><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="{background}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg><p:spTree>{header}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>{transition}</p:sld>"#,
        decl = XML_DECLARATION,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        background = background,
        header = SP_TREE_HEADER,
        shapes = shapes,
        transition = transition
    )
}
