//! HTML-to-PDF rendering engines.

use bizdoc_core::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Renders an HTML page to PDF bytes.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, html: &str) -> Result<Vec<u8>>;
}

/// Renderer that shells out to the `wkhtmltopdf` binary.
///
/// Input and output go through a per-call temporary directory that is
/// removed when the call returns, whether rendering succeeded or not.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRenderer {
    binary: PathBuf,
    temp_root: Option<PathBuf>,
}

impl WkhtmltopdfRenderer {
    /// Create a renderer using the given binary path or name on `PATH`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            temp_root: None,
        }
    }

    /// Create per-call work directories under `dir` instead of the system temp dir.
    pub fn with_temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    /// The binary this renderer invokes.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for WkhtmltopdfRenderer {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl PdfRenderer for WkhtmltopdfRenderer {
    fn render(&self, html: &str) -> Result<Vec<u8>> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("bizdoc-pdf-");
        let workdir = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| Error::RenderFailure(format!("Failed to create temp dir: {}", e)))?;

        let input = workdir.path().join("template.html");
        let output = workdir.path().join("template.pdf");

        std::fs::write(&input, html)
            .map_err(|e| Error::RenderFailure(format!("Failed to write HTML input: {}", e)))?;

        log::debug!("Running {} on {}", self.binary.display(), input.display());
        let result = Command::new(&self.binary)
            .arg("--quiet")
            .arg("--encoding")
            .arg("utf-8")
            .arg(&input)
            .arg(&output)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::RenderFailure(format!(
                    "PDF renderer '{}' not found",
                    self.binary.display()
                )),
                _ => Error::RenderFailure(format!(
                    "Failed to run '{}': {}",
                    self.binary.display(),
                    e
                )),
            })?;

        if !result.status.success() {
            return Err(Error::RenderFailure(format!(
                "'{}' exited with {}: {}",
                self.binary.display(),
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        let bytes = std::fs::read(&output)
            .map_err(|e| Error::RenderFailure(format!("Renderer produced no output: {}", e)))?;

        if !bytes.starts_with(b"%PDF") {
            return Err(Error::RenderFailure("Renderer output is not a PDF".to_string()));
        }

        Ok(bytes)
    }
}
