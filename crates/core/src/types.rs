//! Domain types for transcripts, key points, templates, and exported artifacts.

use crate::error::{Error, Result};
use crate::normalize::clean_point;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of an uploaded transcript file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptKind {
    /// UTF-8 plain text.
    Text,
    /// PDF document.
    Pdf,
    /// Word (Office Open XML) document.
    Docx,
    /// PowerPoint (Office Open XML) deck.
    Pptx,
}

impl TranscriptKind {
    /// Detect the kind from a file extension. Anything unrecognized is plain text.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "pptx" => Self::Pptx,
            _ => Self::Text,
        }
    }

    /// Detect the kind from a filename such as `notes.PDF`.
    pub fn from_filename(filename: &str) -> Self {
        match filename.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Self::Text,
        }
    }
}

/// Raw transcript text together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Upload kind the text was extracted from.
    pub origin: TranscriptKind,

    /// The extracted text.
    pub text: String,
}

impl Transcript {
    /// Create a transcript from extracted text.
    pub fn new(origin: TranscriptKind, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }

    /// Whether the transcript carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered list of cleaned key points.
///
/// Every element is non-empty, whitespace-normalized, and free of a leading
/// `N.` numbering marker. Source order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyPointList {
    points: Vec<String>,
}

impl<'de> Deserialize<'de> for KeyPointList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let points = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::from_points(points))
    }
}

impl KeyPointList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from arbitrary strings, cleaning each one and dropping blanks.
    pub fn from_points<I, S>(points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let points = points
            .into_iter()
            .filter_map(|p| clean_point(p.as_ref()))
            .collect();
        Self { points }
    }

    /// Number of key points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the list has no key points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the key points in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(String::as_str)
    }

    /// Borrow the key points as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.points
    }

    /// Consume the list, returning the key points.
    pub fn into_vec(self) -> Vec<String> {
        self.points
    }
}

/// The document structure to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    BusinessPlan,
    PitchDeck,
    MarketingStrategy,
}

impl TemplateType {
    /// All template types, in display order.
    pub fn all() -> [TemplateType; 3] {
        [
            TemplateType::BusinessPlan,
            TemplateType::PitchDeck,
            TemplateType::MarketingStrategy,
        ]
    }

    /// The wire tag, e.g. `business_plan`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::BusinessPlan => "business_plan",
            TemplateType::PitchDeck => "pitch_deck",
            TemplateType::MarketingStrategy => "marketing_strategy",
        }
    }

    /// Human-readable document title.
    pub fn title(&self) -> &'static str {
        match self {
            TemplateType::BusinessPlan => "Business Plan",
            TemplateType::PitchDeck => "Pitch Deck",
            TemplateType::MarketingStrategy => "Marketing Strategy",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "business_plan" => Ok(TemplateType::BusinessPlan),
            "pitch_deck" => Ok(TemplateType::PitchDeck),
            "marketing_strategy" => Ok(TemplateType::MarketingStrategy),
            other => Err(Error::UnknownTemplateType(other.to_string())),
        }
    }
}

/// A generated template: title plus fully formatted body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub template_type: TemplateType,
    pub title: String,
    pub content: String,
}

/// Target format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Word document (.docx).
    Word,
    /// PDF document.
    Pdf,
    /// Slide deck (.pptx).
    Slide,
}

impl ExportFormat {
    /// All export formats.
    pub fn all() -> [ExportFormat; 3] {
        [ExportFormat::Word, ExportFormat::Pdf, ExportFormat::Slide]
    }

    /// MIME type of the exported bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Slide => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Word => "docx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Slide => "pptx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ExportFormat::Word => "word",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Slide => "slide",
        };
        f.write_str(tag)
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "word" | "docx" => Ok(ExportFormat::Word),
            "pdf" => Ok(ExportFormat::Pdf),
            "slide" | "pptx" => Ok(ExportFormat::Slide),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// The bytes produced by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportedArtifact {
    /// Wrap exported bytes.
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// An artifact with no bytes.
    pub fn empty(format: ExportFormat) -> Self {
        Self::new(format, Vec::new())
    }

    /// MIME type for the artifact's format.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Whether the export produced no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File name for the artifact, e.g. `business_plan.docx`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.format.extension())
    }
}
