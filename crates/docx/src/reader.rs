//! DOCX paragraph text reader.

use bizdoc_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Path of the main document part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Reader for the paragraph text of DOCX files.
pub struct DocxReader;

impl DocxReader {
    /// Create a new DOCX reader.
    pub fn new() -> Self {
        Self
    }

    /// Extract every paragraph's text, in document order.
    pub fn paragraphs<R: Read + Seek>(&self, reader: R) -> Result<Vec<String>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::CorruptedFile(format!("Not a DOCX archive: {}", e)))?;

        let mut file = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| Error::CorruptedFile(format!("Missing '{}': {}", DOCUMENT_PART, e)))?;

        let mut xml = String::new();
        file.read_to_string(&mut xml)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", DOCUMENT_PART, e)))?;

        parse_paragraphs(&xml)
    }

    /// Extract the document text: paragraphs joined with newlines.
    pub fn extract_text<R: Read + Seek>(&self, reader: R) -> Result<String> {
        Ok(self.paragraphs(reader)?.join("\n"))
    }
}

impl Default for DocxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect paragraph text from WordprocessingML.
///
/// Only `<w:t>` runs contribute text; `<w:br/>` and `<w:cr/>` become
/// newlines and `<w:tab/>` a tab. Paragraphs nested inside another one
/// (text boxes) are listed separately, in the order they open.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs: Vec<String> = Vec::new();
    // Indices into `paragraphs` of the currently open <w:p> elements
    let mut open: Vec<usize> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                let qname = e.name();
                let name = local_name(qname.as_ref());
                if name == b"p" {
                    paragraphs.push(String::new());
                    continue;
                }
                let Some(&idx) = open.last() else {
                    continue;
                };
                match name {
                    b"br" | b"cr" => paragraphs[idx].push('\n'),
                    b"tab" => paragraphs[idx].push('\t'),
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (true, Some(&idx)) = (in_text, open.last()) {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| Error::XmlError(format!("Bad text in document.xml: {}", err)))?;
                    paragraphs[idx].push_str(&unescaped);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => {
                    open.pop();
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing document.xml: {}", e)));
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", FileOptions::default()).unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_in_order() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>Welcome everyone</w:t></w:r></w:p>
            <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t xml:space="preserve">Q3 </w:t></w:r><w:r><w:t>goals</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>Ship</w:t><w:tab/><w:t>v2</w:t></w:r></w:p>
        </w:body></w:document>"#;

        let paragraphs = DocxReader::new().paragraphs(Cursor::new(docx_with(xml))).unwrap();
        assert_eq!(paragraphs, vec!["Welcome everyone", "Q3 goals", "", "Ship\tv2"]);
    }

    #[test]
    fn test_text_box_inside_paragraph() {
        let xml = r#"<w:document xmlns:w="x" xmlns:mc="m" xmlns:wps="s"><w:body>
            <w:p><w:r><w:t xml:space="preserve">Outer start </w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wps:txbx><w:txbxContent>
                <w:p><w:r><w:t>Inner</w:t></w:r></w:p>
            </w:txbxContent></wps:txbx></w:drawing></mc:Choice></mc:AlternateContent></w:r><w:r><w:t>outer end</w:t></w:r></w:p>
            <w:p><w:r><w:t>After</w:t></w:r></w:p>
        </w:body></w:document>"#;

        let paragraphs = DocxReader::new().paragraphs(Cursor::new(docx_with(xml))).unwrap();
        assert_eq!(paragraphs, vec!["Outer start outer end", "Inner", "After"]);
    }

    #[test]
    fn test_extract_text_joins_with_newline() {
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p><w:p><w:r><w:t>World</w:t></w:r></w:p></w:body></w:document>"#;
        let text = DocxReader::new().extract_text(Cursor::new(docx_with(xml))).unwrap();
        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn test_whitespace_between_tags_is_ignored() {
        let xml = "<w:document xmlns:w=\"x\"><w:body><w:p>\n  <w:r>\n    <w:t>Only this</w:t>\n  </w:r>\n</w:p></w:body></w:document>";
        let text = DocxReader::new().extract_text(Cursor::new(docx_with(xml))).unwrap();
        assert_eq!(text, "Only this");
    }

    #[test]
    fn test_not_a_zip() {
        let err = DocxReader::new()
            .paragraphs(Cursor::new(b"plain text, not docx".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::CorruptedFile(_)));
    }

    #[test]
    fn test_missing_document_part() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", FileOptions::default()).unwrap();
        zip.write_all(b"<a/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let err = DocxReader::new().paragraphs(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::CorruptedFile(_)));
    }
}
