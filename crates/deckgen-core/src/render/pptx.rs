//! Minimal OOXML presentation package writer.
//!
//! Emits one master, two layouts (title, title-and-content), one theme and
//! one part per slide. All text is placed in explicit text boxes so the
//! layouts can stay empty.

use std::fmt::Write as _;
use std::io::{Seek, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

use super::RenderError;
use super::theme::{Rgb, Theme};
use crate::image::ImageFormat;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;
/// 13.333" x 7.5" (16:9).
pub const SLIDE_WIDTH: i64 = 12_192_000;
pub const SLIDE_HEIGHT: i64 = 6_858_000;

const FONT: &str = "Calibri";

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

// ---------------------------------------------------------------------------
// Deck model
// ---------------------------------------------------------------------------

/// Position and size in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// Frame from inch measurements.
    pub fn inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        let emu = |v: f64| (v * EMU_PER_INCH as f64).round() as i64;
        Self {
            x: emu(x),
            y: emu(y),
            cx: emu(w),
            cy: emu(h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One paragraph of a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub size_pt: u32,
    pub bold: bool,
    pub color: Rgb,
    pub align: Align,
    pub bullet: bool,
    /// `(before, after)` spacing in points.
    pub spacing: (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub name: &'static str,
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,
    pub centered_vertically: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub frame: Frame,
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Title,
    Content,
}

impl Layout {
    fn part_index(self) -> usize {
        match self {
            Self::Title => 1,
            Self::Content => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeckSlide {
    pub layout: Layout,
    pub boxes: Vec<TextBox>,
    pub picture: Option<Picture>,
}

/// Everything needed to write a package.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub title: String,
    pub theme: Theme,
    pub slides: Vec<DeckSlide>,
}

// ---------------------------------------------------------------------------
// Package writer
// ---------------------------------------------------------------------------

/// Write `deck` as a `.pptx` archive into `writer`.
pub fn write_package<W: Write + Seek>(writer: W, deck: &Deck) -> Result<W, RenderError> {
    let mut zip = ZipWriter::new(writer);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let put = |zip: &mut ZipWriter<W>, name: &str, body: &[u8]| -> Result<(), RenderError> {
        zip.start_file(name, opts)?;
        zip.write_all(body)?;
        Ok(())
    };

    put(&mut zip, "[Content_Types].xml", content_types(deck).as_bytes())?;
    put(&mut zip, "_rels/.rels", root_rels().as_bytes())?;
    put(&mut zip, "docProps/core.xml", core_props(&deck.title).as_bytes())?;
    put(&mut zip, "docProps/app.xml", app_props(deck.slides.len()).as_bytes())?;
    put(&mut zip, "ppt/presentation.xml", presentation(deck.slides.len()).as_bytes())?;
    put(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        presentation_rels(deck.slides.len()).as_bytes(),
    )?;
    put(&mut zip, "ppt/theme/theme1.xml", theme_xml(&deck.theme).as_bytes())?;
    put(&mut zip, "ppt/slideMasters/slideMaster1.xml", master().as_bytes())?;
    put(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        master_rels().as_bytes(),
    )?;
    for layout in [Layout::Title, Layout::Content] {
        let n = layout.part_index();
        put(
            &mut zip,
            &format!("ppt/slideLayouts/slideLayout{n}.xml"),
            layout_xml(layout).as_bytes(),
        )?;
        put(
            &mut zip,
            &format!("ppt/slideLayouts/_rels/slideLayout{n}.xml.rels"),
            layout_rels().as_bytes(),
        )?;
    }

    let mut media_count = 0usize;
    for (i, slide) in deck.slides.iter().enumerate() {
        let n = i + 1;
        let media = match &slide.picture {
            Some(pic) => {
                media_count += 1;
                let name = format!("image{media_count}.{}", pic.format.extension());
                put(&mut zip, &format!("ppt/media/{name}"), &pic.bytes)?;
                Some(name)
            }
            None => None,
        };
        put(
            &mut zip,
            &format!("ppt/slides/slide{n}.xml"),
            slide_xml(slide, &deck.theme).as_bytes(),
        )?;
        put(
            &mut zip,
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            slide_rels(slide.layout, media.as_deref()).as_bytes(),
        )?;
    }

    Ok(zip.finish()?)
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Escape markup characters and drop code points XML 1.0 cannot carry.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(' '),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

fn rel(xml: &mut String, id: &str, kind: &str, target: &str) {
    let _ = write!(
        xml,
        r#"<Relationship Id="{id}" Type="{kind}" Target="{target}"/>"#
    );
}

const GROUP_HEADER: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
);

// ---------------------------------------------------------------------------
// Package-level parts
// ---------------------------------------------------------------------------

fn content_types(deck: &Deck) -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif] {
        let _ = write!(
            xml,
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            format.extension(),
            format.mime()
        );
    }

    let pml = "application/vnd.openxmlformats-officedocument.presentationml";
    let mut over = |part: &str, ct: &str| {
        let _ = write!(xml, r#"<Override PartName="{part}" ContentType="{ct}"/>"#);
    };
    over("/ppt/presentation.xml", &format!("{pml}.presentation.main+xml"));
    over("/ppt/slideMasters/slideMaster1.xml", &format!("{pml}.slideMaster+xml"));
    over("/ppt/slideLayouts/slideLayout1.xml", &format!("{pml}.slideLayout+xml"));
    over("/ppt/slideLayouts/slideLayout2.xml", &format!("{pml}.slideLayout+xml"));
    for n in 1..=deck.slides.len() {
        over(&format!("/ppt/slides/slide{n}.xml"), &format!("{pml}.slide+xml"));
    }
    over(
        "/ppt/theme/theme1.xml",
        "application/vnd.openxmlformats-officedocument.theme+xml",
    );
    over(
        "/docProps/core.xml",
        "application/vnd.openxmlformats-package.core-properties+xml",
    );
    over(
        "/docProps/app.xml",
        "application/vnd.openxmlformats-officedocument.extended-properties+xml",
    );
    xml.push_str("</Types>");
    xml
}

fn root_rels() -> String {
    let mut xml = String::from(XML_DECL);
    let _ = write!(xml, r#"<Relationships xmlns="{NS_PKG_REL}">"#);
    rel(&mut xml, "rId1", &format!("{REL_BASE}/officeDocument"), "ppt/presentation.xml");
    rel(
        &mut xml,
        "rId2",
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
        "docProps/core.xml",
    );
    rel(&mut xml, "rId3", &format!("{REL_BASE}/extended-properties"), "docProps/app.xml");
    xml.push_str("</Relationships>");
    xml
}

fn core_props(title: &str) -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        "{XML_DECL}<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:title>{}</dc:title><dc:creator>deckgen</dc:creator>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{now}</dcterms:created>\
         </cp:coreProperties>",
        escape_xml(title)
    )
}

fn app_props(slides: usize) -> String {
    format!(
        "{XML_DECL}<Properties \
         xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
         <Application>deckgen</Application><Slides>{slides}</Slides></Properties>"
    )
}

fn presentation(slides: usize) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        r#"<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1">"#
    );
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    xml.push_str("<p:sldIdLst>");
    for i in 0..slides {
        let _ = write!(xml, r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 3);
    }
    xml.push_str("</p:sldIdLst>");
    let _ = write!(
        xml,
        r#"<p:sldSz cx="{SLIDE_WIDTH}" cy="{SLIDE_HEIGHT}"/><p:notesSz cx="6858000" cy="9144000"/>"#
    );
    xml.push_str("</p:presentation>");
    xml
}

fn presentation_rels(slides: usize) -> String {
    let mut xml = String::from(XML_DECL);
    let _ = write!(xml, r#"<Relationships xmlns="{NS_PKG_REL}">"#);
    rel(&mut xml, "rId1", &format!("{REL_BASE}/slideMaster"), "slideMasters/slideMaster1.xml");
    rel(&mut xml, "rId2", &format!("{REL_BASE}/theme"), "theme/theme1.xml");
    for i in 0..slides {
        rel(
            &mut xml,
            &format!("rId{}", i + 3),
            &format!("{REL_BASE}/slide"),
            &format!("slides/slide{}.xml", i + 1),
        );
    }
    xml.push_str("</Relationships>");
    xml
}

// ---------------------------------------------------------------------------
// Master, layouts, theme
// ---------------------------------------------------------------------------

fn master() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#);
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_HEADER);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    );
    xml.push_str(r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/><p:sldLayoutId id="2147483650" r:id="rId2"/></p:sldLayoutIdLst>"#);
    xml.push_str("</p:sldMaster>");
    xml
}

fn master_rels() -> String {
    let mut xml = String::from(XML_DECL);
    let _ = write!(xml, r#"<Relationships xmlns="{NS_PKG_REL}">"#);
    rel(&mut xml, "rId1", &format!("{REL_BASE}/slideLayout"), "../slideLayouts/slideLayout1.xml");
    rel(&mut xml, "rId2", &format!("{REL_BASE}/slideLayout"), "../slideLayouts/slideLayout2.xml");
    rel(&mut xml, "rId3", &format!("{REL_BASE}/theme"), "../theme/theme1.xml");
    xml.push_str("</Relationships>");
    xml
}

fn layout_xml(layout: Layout) -> String {
    let (kind, name) = match layout {
        Layout::Title => ("title", "Title Slide"),
        Layout::Content => ("obj", "Title and Content"),
    };
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        r#"<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="{kind}" preserve="1">"#
    );
    let _ = write!(xml, r#"<p:cSld name="{name}"><p:spTree>{GROUP_HEADER}</p:spTree></p:cSld>"#);
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>");
    xml
}

fn layout_rels() -> String {
    let mut xml = String::from(XML_DECL);
    let _ = write!(xml, r#"<Relationships xmlns="{NS_PKG_REL}">"#);
    rel(&mut xml, "rId1", &format!("{REL_BASE}/slideMaster"), "../slideMasters/slideMaster1.xml");
    xml.push_str("</Relationships>");
    xml
}

fn theme_xml(theme: &Theme) -> String {
    let srgb = |c: Rgb| format!(r#"<a:srgbClr val="{c}"/>"#);
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<a:theme xmlns:a="{NS_A}" name="deckgen">"#);
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="deckgen">"#);
    let _ = write!(xml, "<a:dk1>{}</a:dk1>", srgb(theme.bullet));
    let _ = write!(xml, "<a:lt1>{}</a:lt1>", srgb(theme.background));
    let _ = write!(xml, "<a:dk2>{}</a:dk2>", srgb(theme.title));
    let _ = write!(xml, "<a:lt2>{}</a:lt2>", srgb(Rgb(0xE7, 0xE6, 0xE6)));
    let _ = write!(xml, "<a:accent1>{}</a:accent1>", srgb(theme.accent));
    for (i, c) in [
        Rgb(0xED, 0x7D, 0x31),
        Rgb(0xA5, 0xA5, 0xA5),
        Rgb(0xFF, 0xC0, 0x00),
        Rgb(0x5B, 0x9B, 0xD5),
        Rgb(0x70, 0xAD, 0x47),
    ]
    .into_iter()
    .enumerate()
    {
        let n = i + 2;
        let _ = write!(xml, "<a:accent{n}>{}</a:accent{n}>", srgb(c));
    }
    let _ = write!(xml, "<a:hlink>{}</a:hlink>", srgb(Rgb(0x05, 0x63, 0xC1)));
    let _ = write!(xml, "<a:folHlink>{}</a:folHlink>", srgb(Rgb(0x95, 0x4F, 0x72)));
    xml.push_str("</a:clrScheme>");

    let _ = write!(
        xml,
        r#"<a:fontScheme name="deckgen"><a:majorFont><a:latin typeface="{FONT}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="{FONT}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>"#
    );

    xml.push_str(r#"<a:fmtScheme name="deckgen">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for w in [6350, 12700, 19050] {
        let _ = write!(
            xml,
            r#"<a:ln w="{w}"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#
        );
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements></a:theme>");
    xml
}

// ---------------------------------------------------------------------------
// Slides
// ---------------------------------------------------------------------------

fn slide_xml(slide: &DeckSlide, theme: &Theme) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#);
    xml.push_str("<p:cSld>");
    let _ = write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        theme.background
    );
    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_HEADER);

    let mut next_id = 2u32;
    for text_box in &slide.boxes {
        write_text_box(&mut xml, next_id, text_box);
        next_id += 1;
    }
    if let Some(pic) = &slide.picture {
        write_picture(&mut xml, next_id, pic.frame);
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}

fn slide_rels(layout: Layout, media: Option<&str>) -> String {
    let mut xml = String::from(XML_DECL);
    let _ = write!(xml, r#"<Relationships xmlns="{NS_PKG_REL}">"#);
    rel(
        &mut xml,
        "rId1",
        &format!("{REL_BASE}/slideLayout"),
        &format!("../slideLayouts/slideLayout{}.xml", layout.part_index()),
    );
    if let Some(name) = media {
        rel(&mut xml, "rId2", &format!("{REL_BASE}/image"), &format!("../media/{name}"));
    }
    xml.push_str("</Relationships>");
    xml
}

fn write_xfrm(xml: &mut String, f: Frame) {
    let _ = write!(
        xml,
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        f.x, f.y, f.cx, f.cy
    );
}

fn write_text_box(xml: &mut String, id: u32, tb: &TextBox) {
    xml.push_str("<p:sp><p:nvSpPr>");
    let _ = write!(xml, r#"<p:cNvPr id="{id}" name="{} {id}"/>"#, tb.name);
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);
    xml.push_str("<p:spPr>");
    write_xfrm(xml, tb.frame);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);

    let anchor = if tb.centered_vertically { "ctr" } else { "t" };
    let _ = write!(
        xml,
        r#"<p:txBody><a:bodyPr wrap="square" anchor="{anchor}"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#
    );
    for p in &tb.paragraphs {
        write_paragraph(xml, p);
    }
    xml.push_str("</p:txBody></p:sp>");
}

fn write_paragraph(xml: &mut String, p: &Paragraph) {
    let algn = match p.align {
        Align::Left => "l",
        Align::Center => "ctr",
    };
    xml.push_str("<a:p>");
    if p.bullet {
        let _ = write!(xml, r#"<a:pPr marL="342900" indent="-342900" algn="{algn}">"#);
    } else {
        let _ = write!(xml, r#"<a:pPr algn="{algn}">"#);
    }
    let (before, after) = p.spacing;
    let _ = write!(
        xml,
        r#"<a:spcBef><a:spcPts val="{}"/></a:spcBef><a:spcAft><a:spcPts val="{}"/></a:spcAft>"#,
        before * 100,
        after * 100
    );
    if p.bullet {
        xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#);
    } else {
        xml.push_str("<a:buNone/>");
    }
    xml.push_str("</a:pPr>");

    let sz = p.size_pt * 100;
    let bold = if p.bold { r#" b="1""# } else { "" };
    if p.text.is_empty() {
        let _ = write!(xml, r#"<a:endParaRPr lang="en-US" sz="{sz}" dirty="0"/>"#);
    } else {
        let _ = write!(
            xml,
            r#"<a:r><a:rPr lang="en-US" sz="{sz}"{bold} dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:latin typeface="{FONT}"/></a:rPr><a:t>{}</a:t></a:r>"#,
            p.color,
            escape_xml(&p.text)
        );
    }
    xml.push_str("</a:p>");
}

fn write_picture(xml: &mut String, id: u32, frame: Frame) {
    xml.push_str("<p:pic><p:nvPicPr>");
    let _ = write!(xml, r#"<p:cNvPr id="{id}" name="Picture {id}"/>"#);
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);
    xml.push_str(r#"<p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#);
    xml.push_str("<p:spPr>");
    write_xfrm(xml, frame);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);
}
