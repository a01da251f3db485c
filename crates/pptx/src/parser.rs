//! PPTX slide text parser.

use bizdoc_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Relationship type of a slide part.
const SLIDE_REL_SUFFIX: &str = "/relationships/slide";

/// Text of one slide, text frames in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideText {
    /// 1-based slide number.
    pub number: usize,

    /// Text of each text frame, paragraphs joined with `\n`.
    pub frames: Vec<String>,
}

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse every slide's text, in presentation order.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideText>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::CorruptedFile(format!("Not a PPTX archive: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("PPTX has {} slides", slide_order.len());

        let mut slides = Vec::with_capacity(slide_order.len());
        for (idx, slide_path) in slide_order.iter().enumerate() {
            let xml = read_file_from_archive(&mut archive, slide_path)?;
            let frames = extract_frames_from_xml(&xml)?;
            slides.push(SlideText {
                number: idx + 1,
                frames,
            });
        }

        Ok(slides)
    }

    /// Extract all slide text: every frame of every slide, joined with newlines.
    pub fn extract_text<R: Read + Seek>(&self, reader: R) -> Result<String> {
        let slides = self.parse(reader)?;
        let frames: Vec<String> = slides.into_iter().flat_map(|s| s.frames).collect();
        Ok(frames.join("\n"))
    }

    /// Get the ordered list of slide part paths.
    ///
    /// Order comes from `<p:sldIdLst>` in presentation.xml. If that list is
    /// missing, slides are ordered by the number in their relationship id.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let targets = parse_slide_relationships(&rels)?;

        let presentation = read_file_from_archive(archive, "ppt/presentation.xml")?;
        let listed = parse_slide_id_list(&presentation)?;

        if !listed.is_empty() {
            return Ok(listed
                .iter()
                .filter_map(|rid| {
                    let target = targets.get(rid);
                    if target.is_none() {
                        log::warn!("Slide relationship '{}' has no target, skipping", rid);
                    }
                    target.cloned()
                })
                .collect());
        }

        let mut slides: Vec<(String, Option<usize>)> = targets
            .into_iter()
            .map(|(id, path)| {
                let order = extract_slide_number(&id).or_else(|| extract_slide_number(&path));
                (path, order)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Map slide relationship ids to archive paths.
fn parse_slide_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"Relationship" => {
                let rel_type = attribute(e, b"Type").unwrap_or_default();
                if !rel_type.ends_with(SLIDE_REL_SUFFIX) {
                    continue;
                }
                let (Some(id), Some(target)) = (attribute(e, b"Id"), attribute(e, b"Target")) else {
                    continue;
                };
                let full_path = match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("ppt/{}", target),
                };
                targets.insert(id, full_path);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }

    Ok(targets)
}

/// Relationship ids of `<p:sldId>` entries, in presentation order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"sldId" => {
                if let Some(rid) = attribute(e, b"r:id") {
                    ids.push(rid);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing presentation.xml: {}", e)));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// A text-bearing shape extracted from slide XML.
#[derive(Debug, Default)]
struct ShapeInfo {
    paragraphs: Vec<String>,
    x: f64,
    y: f64,
}

/// Extract text frames from slide XML, sorted top-to-bottom then left-to-right.
fn extract_frames_from_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut shapes: Vec<ShapeInfo> = Vec::new();
    let mut current_shape: Option<ShapeInfo> = None;
    let mut current_paragraph: Option<String> = None;
    let mut in_text_body = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => current_shape = Some(ShapeInfo::default()),
                b"off" => set_offset(current_shape.as_mut(), e),
                b"txBody" => in_text_body = true,
                b"p" if in_text_body => current_paragraph = Some(String::new()),
                b"t" if current_paragraph.is_some() => in_run_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"off" => set_offset(current_shape.as_mut(), e),
                b"p" if in_text_body => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.paragraphs.push(String::new());
                    }
                }
                b"br" => {
                    if let Some(text) = current_paragraph.as_mut() {
                        text.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_run_text {
                    if let Some(text) = current_paragraph.as_mut() {
                        match e.unescape() {
                            Ok(unescaped) => text.push_str(&unescaped),
                            Err(err) => log::warn!("Skipping undecodable slide text: {}", err),
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_run_text = false,
                b"p" => {
                    if let (Some(text), Some(shape)) = (current_paragraph.take(), current_shape.as_mut()) {
                        shape.paragraphs.push(text);
                    }
                }
                b"txBody" => in_text_body = false,
                b"sp" => {
                    if let Some(shape) = current_shape.take() {
                        if shape.paragraphs.iter().any(|p| !p.trim().is_empty()) {
                            shapes.push(shape);
                        }
                    }
                    in_text_body = false;
                    in_run_text = false;
                    current_paragraph = None;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    // Stable sort keeps document order for shapes at the same position
    shapes.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    Ok(shapes.into_iter().map(|s| s.paragraphs.join("\n")).collect())
}

/// Record an `<a:off x=".." y=".."/>` position on the current shape.
fn set_offset(shape: Option<&mut ShapeInfo>, e: &BytesStart<'_>) {
    let Some(shape) = shape else {
        return;
    };
    if let Some(x) = attribute(e, b"x").and_then(|v| v.parse::<f64>().ok()) {
        shape.x = x;
    }
    if let Some(y) = attribute(e, b"y").and_then(|v| v.parse::<f64>().ok()) {
        shape.y = y;
    }
}

/// Read an attribute value by its full (possibly prefixed) name.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::CorruptedFile(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
