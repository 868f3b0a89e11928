//! Errors, input format detection and output file handling
//!
//! This module defines the error taxonomy shared by loading and generation,
//! the RDF syntaxes accepted on input, and the [`Emitter`] trait implemented
//! by every code generator.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::owl_model::GenerationModel;

/// Errors that can occur while loading ontologies or generating code
#[derive(Error, Debug)]
pub enum GenError {
    /// An input file or output directory does not exist
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An input file could not be parsed as RDF
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The input syntax could not be determined or is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A required setting is missing or inconsistent
    #[error("{0}")]
    Configuration(String),

    /// Code could not be generated from the ontology
    #[error("generation failed: {0}")]
    Generation(String),

    /// A template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// An I/O error occurred
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Result type for loading and generation
pub type GenResult<T> = Result<T, GenError>;

/// RDF syntaxes accepted as ontology input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    Turtle,
    NTriples,
    RdfXml,
}

impl RdfFormat {
    /// Map a MIME type (parameters such as `; charset=utf-8` are ignored)
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "text/turtle" | "application/x-turtle" | "application/turtle" => Some(Self::Turtle),
            "application/n-triples" | "text/plain" => Some(Self::NTriples),
            "application/rdf+xml" | "application/xml" | "text/xml" => Some(Self::RdfXml),
            _ => None,
        }
    }

    /// Map a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Some(Self::Turtle),
            "nt" | "ntriples" => Some(Self::NTriples),
            "rdf" | "owl" | "xml" | "rdfs" => Some(Self::RdfXml),
            _ => None,
        }
    }

    /// Pick the syntax for a file: the MIME hint wins when it is recognised,
    /// otherwise the file extension decides.
    pub fn detect(path: &Path, mime_hint: Option<&str>) -> GenResult<Self> {
        if let Some(mime) = mime_hint {
            if let Some(format) = Self::from_mime(mime) {
                tracing::trace!(path = %path.display(), ?format, "format from MIME type");
                return Ok(format);
            }
            tracing::warn!(
                mime,
                path = %path.display(),
                "unrecognised MIME type, falling back to file extension"
            );
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| GenError::UnsupportedFormat(path.display().to_string()))?;
        let format = Self::from_extension(ext)
            .ok_or_else(|| GenError::UnsupportedFormat(format!("extension '.{ext}'")))?;
        tracing::trace!(path = %path.display(), ?format, "format from extension");
        Ok(format)
    }
}

/// A code generator for one target language
pub trait Emitter {
    /// Generate all files for the model into `output_dir`, returning the
    /// paths written
    fn emit(&self, model: &GenerationModel, output_dir: &Path) -> GenResult<Vec<PathBuf>>;

    /// Identifier for this target (e.g. "java", "js")
    fn target_id(&self) -> &str;
}

/// Fail with [`GenError::NotFound`] unless `dir` is an existing directory
pub fn require_dir(dir: &Path) -> GenResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(GenError::NotFound(dir.to_path_buf()))
    }
}

/// Write one generated source file
///
/// The handle is opened, flushed and closed within this call.
pub fn write_source_file(dir: &Path, file_name: &str, contents: &str) -> GenResult<PathBuf> {
    let path = dir.join(file_name);
    {
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }
    tracing::info!(path = %path.display(), "generated");
    Ok(path)
}
