use anyhow::{Context, Result};
use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::pdf::PdfDocument;

/// What a failed write does to the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnWriteError {
    AbortRun,
    SkipArtifact,
}

/// Where split artifacts are persisted. Both implementations lay files out
/// as `<root>/<identifier>/<file name>`.
pub trait ArtifactSink {
    fn root(&self) -> &Path;

    /// Checked once, before any document is read.
    fn prepare(&self) -> Result<()>;

    fn on_write_error(&self) -> OnWriteError;

    /// Whether the caller should offer the files for collection afterwards.
    fn downloadable(&self) -> bool;

    fn persist(&self, identifier: &str, file_name: &str, doc: &mut Document) -> Result<PathBuf> {
        write_artifact(self.root(), identifier, file_name, doc)
    }
}

/// Writes straight into a caller-chosen directory. Any failure ends the run.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySink { root: root.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn root(&self) -> &Path {
        &self.root
    }

    fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).with_context(|| {
            format!("Output directory is not usable: {}", self.root.display())
        })?;
        if !self.root.is_dir() {
            anyhow::bail!("Output path is not a directory: {}", self.root.display());
        }
        Ok(())
    }

    fn on_write_error(&self) -> OnWriteError {
        OnWriteError::AbortRun
    }

    fn downloadable(&self) -> bool {
        false
    }
}

/// Writes under a scratch location and hands the paths back for the user to
/// collect. A failed artifact is skipped; the rest are still produced.
pub struct StagingSink {
    root: PathBuf,
}

impl StagingSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StagingSink { root: root.into() }
    }
}

impl ArtifactSink for StagingSink {
    fn root(&self) -> &Path {
        &self.root
    }

    fn prepare(&self) -> Result<()> {
        // directories are created per artifact so one bad path cannot stop the rest
        Ok(())
    }

    fn on_write_error(&self) -> OnWriteError {
        OnWriteError::SkipArtifact
    }

    fn downloadable(&self) -> bool {
        true
    }
}

/// A supplied destination means direct-to-path, otherwise stage.
pub fn select(destination: Option<PathBuf>, staging_root: PathBuf) -> Box<dyn ArtifactSink> {
    match destination {
        Some(dir) => Box::new(DirectorySink::new(dir)),
        None => Box::new(StagingSink::new(staging_root)),
    }
}

fn write_artifact(
    root: &Path,
    identifier: &str,
    file_name: &str,
    doc: &mut Document,
) -> Result<PathBuf> {
    let folder = root.join(identifier);
    std::fs::create_dir_all(&folder)
        .with_context(|| format!("Failed to create directory: {}", folder.display()))?;
    let path = folder.join(file_name);
    PdfDocument::save(doc, &path)?;
    Ok(path)
}
