//! PPTX writer implementation.
//!
//! Produces a 4:3 deck with one "Title Only" slide holding a single
//! full-width text box.

use bizdoc_core::{Error, ExportFormat, Exporter, Result, TemplateDocument};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Slide width in EMU (10 inches).
const SLIDE_WIDTH: u64 = 9_144_000;

/// Slide height in EMU (7.5 inches).
const SLIDE_HEIGHT: u64 = 6_858_000;

/// Height of the text box in EMU.
const TEXT_BOX_HEIGHT: u64 = 2_000_000;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

const PRESENTATION_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/></Relationships>"#;

const SLIDE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#;

const LAYOUT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;

const MASTER_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#;

const EMPTY_SHAPE_TREE: &str = r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree>"#;

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;

/// Exporter producing a single-slide PowerPoint deck.
pub struct PptxExporter;

impl PptxExporter {
    /// Create a new PPTX exporter.
    pub fn new() -> Self {
        Self
    }

    /// Serialize content into PPTX bytes. Empty content yields no bytes.
    pub fn to_bytes(&self, content: &str) -> Result<Vec<u8>> {
        if content.is_empty() {
            log::warn!("Empty template content, skipping PPTX export");
            return Ok(Vec::new());
        }

        let presentation = presentation_xml();
        let master = slide_master_xml();
        let layout = slide_layout_xml();
        let slide = slide_xml(content)?;

        let parts: [(&str, &[u8]); 11] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
            ("ppt/presentation.xml", presentation.as_bytes()),
            ("ppt/_rels/presentation.xml.rels", PRESENTATION_RELS_XML.as_bytes()),
            ("ppt/slideMasters/slideMaster1.xml", master.as_bytes()),
            ("ppt/slideMasters/_rels/slideMaster1.xml.rels", MASTER_RELS_XML.as_bytes()),
            ("ppt/slideLayouts/slideLayout1.xml", layout.as_bytes()),
            ("ppt/slideLayouts/_rels/slideLayout1.xml.rels", LAYOUT_RELS_XML.as_bytes()),
            ("ppt/slides/slide1.xml", &slide),
            ("ppt/slides/_rels/slide1.xml.rels", SLIDE_RELS_XML.as_bytes()),
            ("ppt/theme/theme1.xml", THEME_XML.as_bytes()),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        for (name, data) in parts {
            zip.start_file(name, options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
            zip.write_all(data)?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish PPTX archive: {}", e)))?;

        Ok(cursor.into_inner())
    }
}

impl Default for PptxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for PptxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Slide
    }

    fn export(&self, document: &TemplateDocument) -> Result<Vec<u8>> {
        self.to_bytes(&document.content)
    }
}

fn namespaces() -> String {
    format!(r#"xmlns:a="{}" xmlns:r="{}" xmlns:p="{}""#, NS_A, NS_R, NS_P)
}

fn presentation_xml() -> String {
    format!(
        r#"{decl}
<p:presentation {ns} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst><p:sldSz cx="{w}" cy="{h}" type="screen4x3"/><p:notesSz cx="{h}" cy="{w}"/></p:presentation>"#,
        decl = XML_DECL,
        ns = namespaces(),
        w = SLIDE_WIDTH,
        h = SLIDE_HEIGHT,
    )
}

fn slide_master_xml() -> String {
    format!(
        r#"{decl}
<p:sldMaster {ns}><p:cSld>{tree}</p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
        decl = XML_DECL,
        ns = namespaces(),
        tree = EMPTY_SHAPE_TREE,
    )
}

fn slide_layout_xml() -> String {
    format!(
        r#"{decl}
<p:sldLayout {ns} type="titleOnly" preserve="1"><p:cSld name="Title Only">{tree}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        decl = XML_DECL,
        ns = namespaces(),
        tree = EMPTY_SHAPE_TREE,
    )
}

/// Build the slide part: one text box whose frame holds the content verbatim.
///
/// Each line of the content is one paragraph. The frame does not wrap.
fn slide_xml(content: &str) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer
        .get_mut()
        .write_all(XML_DECL.as_bytes())
        .map_err(|e| Error::XmlError(format!("Failed to write slide: {}", e)))?;

    let width = SLIDE_WIDTH.to_string();
    let height = TEXT_BOX_HEIGHT.to_string();

    write(
        &mut writer,
        Event::Start(BytesStart::new("p:sld").with_attributes([("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])),
    )?;
    write(&mut writer, Event::Start(BytesStart::new("p:cSld")))?;
    write(&mut writer, Event::Start(BytesStart::new("p:spTree")))?;

    // Group shape properties required on every shape tree
    write(&mut writer, Event::Start(BytesStart::new("p:nvGrpSpPr")))?;
    write(&mut writer, Event::Empty(BytesStart::new("p:cNvPr").with_attributes([("id", "1"), ("name", "")])))?;
    write(&mut writer, Event::Empty(BytesStart::new("p:cNvGrpSpPr")))?;
    write(&mut writer, Event::Empty(BytesStart::new("p:nvPr")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:nvGrpSpPr")))?;
    write(&mut writer, Event::Empty(BytesStart::new("p:grpSpPr")))?;

    write(&mut writer, Event::Start(BytesStart::new("p:sp")))?;
    write(&mut writer, Event::Start(BytesStart::new("p:nvSpPr")))?;
    write(
        &mut writer,
        Event::Empty(BytesStart::new("p:cNvPr").with_attributes([("id", "2"), ("name", "TextBox 1")])),
    )?;
    write(&mut writer, Event::Empty(BytesStart::new("p:cNvSpPr").with_attributes([("txBox", "1")])))?;
    write(&mut writer, Event::Empty(BytesStart::new("p:nvPr")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:nvSpPr")))?;

    write(&mut writer, Event::Start(BytesStart::new("p:spPr")))?;
    write(&mut writer, Event::Start(BytesStart::new("a:xfrm")))?;
    write(&mut writer, Event::Empty(BytesStart::new("a:off").with_attributes([("x", "0"), ("y", "0")])))?;
    write(
        &mut writer,
        Event::Empty(BytesStart::new("a:ext").with_attributes([("cx", width.as_str()), ("cy", height.as_str())])),
    )?;
    write(&mut writer, Event::End(BytesEnd::new("a:xfrm")))?;
    write(&mut writer, Event::Start(BytesStart::new("a:prstGeom").with_attributes([("prst", "rect")])))?;
    write(&mut writer, Event::Empty(BytesStart::new("a:avLst")))?;
    write(&mut writer, Event::End(BytesEnd::new("a:prstGeom")))?;
    write(&mut writer, Event::Empty(BytesStart::new("a:noFill")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:spPr")))?;

    write(&mut writer, Event::Start(BytesStart::new("p:txBody")))?;
    write(&mut writer, Event::Start(BytesStart::new("a:bodyPr").with_attributes([("wrap", "none")])))?;
    write(&mut writer, Event::Empty(BytesStart::new("a:spAutoFit")))?;
    write(&mut writer, Event::End(BytesEnd::new("a:bodyPr")))?;
    write(&mut writer, Event::Empty(BytesStart::new("a:lstStyle")))?;

    let normalized = content.replace("\r\n", "\n");
    for line in normalized.split('\n') {
        write(&mut writer, Event::Start(BytesStart::new("a:p")))?;
        if line.is_empty() {
            write(&mut writer, Event::Empty(BytesStart::new("a:endParaRPr").with_attributes([("lang", "en-US")])))?;
        } else {
            write(&mut writer, Event::Start(BytesStart::new("a:r")))?;
            write(&mut writer, Event::Empty(BytesStart::new("a:rPr").with_attributes([("lang", "en-US")])))?;
            write(&mut writer, Event::Start(BytesStart::new("a:t")))?;
            write(&mut writer, Event::Text(BytesText::new(line)))?;
            write(&mut writer, Event::End(BytesEnd::new("a:t")))?;
            write(&mut writer, Event::End(BytesEnd::new("a:r")))?;
        }
        write(&mut writer, Event::End(BytesEnd::new("a:p")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("p:txBody")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:sp")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:spTree")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:cSld")))?;
    write(&mut writer, Event::Start(BytesStart::new("p:clrMapOvr")))?;
    write(&mut writer, Event::Empty(BytesStart::new("a:masterClrMapping")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:clrMapOvr")))?;
    write(&mut writer, Event::End(BytesEnd::new("p:sld")))?;

    Ok(writer.into_inner())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::XmlError(format!("Failed to write slide: {}", e)))
}
