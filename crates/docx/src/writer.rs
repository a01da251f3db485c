//! DOCX writer implementation.

use bizdoc_core::{Error, ExportFormat, Exporter, Result, TemplateDocument};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Exporter producing a Word document with a single paragraph.
pub struct DocxExporter;

impl DocxExporter {
    /// Create a new DOCX exporter.
    pub fn new() -> Self {
        Self
    }

    /// Build the `word/document.xml` part.
    ///
    /// The whole content is one paragraph; line breaks inside it become
    /// `<w:br/>` so the text reads back identically.
    fn document_xml(&self, content: &str) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        write(
            &mut writer,
            Event::Start(BytesStart::new("w:document").with_attributes([("xmlns:w", WORDPROCESSING_NS)])),
        )?;
        write(&mut writer, Event::Start(BytesStart::new("w:body")))?;
        write(&mut writer, Event::Start(BytesStart::new("w:p")))?;
        write(&mut writer, Event::Start(BytesStart::new("w:r")))?;

        let normalized = content.replace("\r\n", "\n");
        for (idx, line) in normalized.split('\n').enumerate() {
            if idx > 0 {
                write(&mut writer, Event::Empty(BytesStart::new("w:br")))?;
            }
            if line.is_empty() {
                continue;
            }
            write(
                &mut writer,
                Event::Start(BytesStart::new("w:t").with_attributes([("xml:space", "preserve")])),
            )?;
            write(&mut writer, Event::Text(BytesText::new(line)))?;
            write(&mut writer, Event::End(BytesEnd::new("w:t")))?;
        }

        write(&mut writer, Event::End(BytesEnd::new("w:r")))?;
        write(&mut writer, Event::End(BytesEnd::new("w:p")))?;

        // US Letter with one-inch margins
        write(&mut writer, Event::Start(BytesStart::new("w:sectPr")))?;
        write(
            &mut writer,
            Event::Empty(BytesStart::new("w:pgSz").with_attributes([("w:w", "12240"), ("w:h", "15840")])),
        )?;
        write(
            &mut writer,
            Event::Empty(BytesStart::new("w:pgMar").with_attributes([
                ("w:top", "1440"),
                ("w:right", "1440"),
                ("w:bottom", "1440"),
                ("w:left", "1440"),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ])),
        )?;
        write(&mut writer, Event::End(BytesEnd::new("w:sectPr")))?;

        write(&mut writer, Event::End(BytesEnd::new("w:body")))?;
        write(&mut writer, Event::End(BytesEnd::new("w:document")))?;

        Ok(writer.into_inner())
    }

    /// Serialize content into DOCX bytes. Empty content yields no bytes.
    pub fn to_bytes(&self, content: &str) -> Result<Vec<u8>> {
        if content.is_empty() {
            log::warn!("Empty template content, skipping DOCX export");
            return Ok(Vec::new());
        }

        let document = self.document_xml(content)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        let parts: [(&str, &[u8]); 3] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
            ("word/document.xml", &document),
        ];
        for (name, data) in parts {
            zip.start_file(name, options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
            zip.write_all(data)?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish DOCX archive: {}", e)))?;

        Ok(cursor.into_inner())
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for DocxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Word
    }

    fn export(&self, document: &TemplateDocument) -> Result<Vec<u8>> {
        self.to_bytes(&document.content)
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::XmlError(format!("Failed to write document.xml: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::DocxReader;
    use bizdoc_core::{KeyPointList, TemplateBuilder, TemplateType};
    use std::io::Read;
    use zip::ZipArchive;

    fn business_plan() -> TemplateDocument {
        TemplateBuilder::new().build(
            TemplateType::BusinessPlan,
            &KeyPointList::from_points(["Reduce churn", "Expand to EU"]),
        )
    }

    #[test]
    fn test_export_reads_back_as_one_paragraph() {
        let bytes = DocxExporter::new().export(&business_plan()).unwrap();

        let paragraphs = DocxReader::new().paragraphs(Cursor::new(bytes)).unwrap();
        assert_eq!(paragraphs, vec!["Business Plan:\n\n1. Reduce churn\n2. Expand to EU"]);
    }

    #[test]
    fn test_export_contains_package_parts() {
        let bytes = DocxExporter::new().export(&business_plan()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert!(archive.by_name("[Content_Types].xml").is_ok());
        assert!(archive.by_name("_rels/.rels").is_ok());

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert_eq!(xml.matches("<w:p>").count(), 1);
        assert_eq!(xml.matches("<w:br/>").count(), 3);
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let bytes = DocxExporter::new().to_bytes("R&D <fast> \"now\"").unwrap();
        let text = DocxReader::new().extract_text(Cursor::new(bytes)).unwrap();
        assert_eq!(text, "R&D <fast> \"now\"");
    }

    #[test]
    fn test_empty_content_yields_empty_bytes() {
        let mut doc = business_plan();
        doc.content.clear();
        assert!(DocxExporter::new().export(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_export_is_deterministic() {
        let exporter = DocxExporter::new();
        let doc = business_plan();
        assert_eq!(exporter.export(&doc).unwrap(), exporter.export(&doc).unwrap());
    }
}
