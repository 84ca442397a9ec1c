use crate::grouper::leading_dropped;
use crate::pdf::{text::page_texts, PdfDocument};
use crate::report::{Grouping, ReportKind};
use crate::sink::{ArtifactSink, OnWriteError};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// The optional input file for each report role.
#[derive(Debug, Clone, Default)]
pub struct SplitInputs {
    pub registered_courses: Option<PathBuf>,
    pub cgpa: Option<PathBuf>,
    pub history: Option<PathBuf>,
    pub schedule: Option<PathBuf>,
}

impl SplitInputs {
    /// Supplied inputs in processing order.
    pub fn supplied(&self) -> Vec<(ReportKind, &PathBuf)> {
        ReportKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|path| (kind, path)))
            .collect()
    }

    fn get(&self, kind: ReportKind) -> Option<&PathBuf> {
        match kind {
            ReportKind::RegisteredCourses => self.registered_courses.as_ref(),
            ReportKind::CgpaProgress => self.cgpa.as_ref(),
            ReportKind::History => self.history.as_ref(),
            ReportKind::Schedule => self.schedule.as_ref(),
        }
    }
}

/// A report already read into memory.
pub struct SourceDocument {
    pub kind: ReportKind,
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub kind: ReportKind,
    pub identifier: String,
    pub path: PathBuf,
    pub pages: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub kind: ReportKind,
    pub identifier: String,
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub destination: PathBuf,
    pub downloadable: bool,
    pub documents: usize,
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<Failure>,
}

impl SplitSummary {
    fn new(sink: &dyn ArtifactSink) -> Self {
        SplitSummary {
            destination: sink.root().to_path_buf(),
            downloadable: sink.downloadable(),
            documents: 0,
            artifacts: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Validate the destination, then read and split each supplied report in
/// turn. A report is fully written before the next one is read.
pub fn execute(inputs: &SplitInputs, sink: &dyn ArtifactSink) -> Result<SplitSummary> {
    sink.prepare()?;

    let supplied = inputs.supplied();
    if supplied.is_empty() {
        warn!("no reports supplied, nothing to split");
        return Ok(SplitSummary::new(sink));
    }

    let mut summary = SplitSummary::new(sink);
    for (kind, path) in supplied {
        let bytes = std::fs::read(path).with_context(|| {
            format!("Failed to read {} report: {}", kind.label(), path.display())
        })?;
        let source = SourceDocument {
            kind,
            name: path.display().to_string(),
            bytes,
        };
        split_one(&source, sink, &mut summary)?;
        summary.documents += 1;
    }

    log_totals(&summary);
    Ok(summary)
}

/// Split in-memory reports into per-student files. The sink must already be
/// prepared. Reports are handled one at a time in the fixed role order.
pub fn split_documents(sources: &[SourceDocument], sink: &dyn ArtifactSink) -> Result<SplitSummary> {
    let mut summary = SplitSummary::new(sink);

    for kind in ReportKind::ALL {
        for source in sources.iter().filter(|s| s.kind == kind) {
            split_one(source, sink, &mut summary)?;
            summary.documents += 1;
        }
    }

    log_totals(&summary);
    Ok(summary)
}

fn log_totals(summary: &SplitSummary) {
    if summary.documents > 0 && summary.artifacts.is_empty() {
        warn!("no files were produced from {} report(s)", summary.documents);
    }
    info!(
        documents = summary.documents,
        artifacts = summary.artifacts.len(),
        failures = summary.failures.len(),
        destination = %summary.destination.display(),
        "split complete"
    );
}

fn split_one(
    source: &SourceDocument,
    sink: &dyn ArtifactSink,
    summary: &mut SplitSummary,
) -> Result<()> {
    let kind = source.kind;
    let doc = PdfDocument::from_bytes(&source.bytes, &source.name)
        .with_context(|| format!("Failed to load {} report", kind.label()))?;
    let texts = page_texts(&source.bytes, &doc);
    let records = kind.records(&texts);

    debug!(
        report = kind.label(),
        source = %source.name,
        pages = texts.len(),
        records = records.len(),
        "grouped pages"
    );
    if kind.grouping() == Grouping::Runs {
        let dropped = leading_dropped(&records, texts.len());
        if dropped > 0 {
            debug!(report = kind.label(), dropped, "leading pages have no identifier");
        }
    }

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.identifier.as_str()) {
            warn!(
                report = kind.label(),
                identifier = %record.identifier,
                "identifier appears in more than one run, later file overwrites earlier"
            );
        }

        let pages = record.page_numbers();
        let file_name = kind.file_name(&record.identifier);
        let mut out = doc.extract_pages(&pages)?;

        match sink.persist(&record.identifier, &file_name, &mut out) {
            Ok(path) => {
                debug!(path = %path.display(), pages = pages.len(), "wrote artifact");
                summary.artifacts.push(Artifact {
                    kind,
                    identifier: record.identifier.clone(),
                    path,
                    pages,
                });
            }
            Err(e) => match sink.on_write_error() {
                OnWriteError::AbortRun => return Err(e),
                OnWriteError::SkipArtifact => {
                    let message = format!("{:#}", e);
                    error!(file = %file_name, error = %message, "failed to write artifact");
                    summary.failures.push(Failure {
                        kind,
                        identifier: record.identifier.clone(),
                        file_name,
                        error: message,
                    });
                }
            },
        }
    }

    Ok(())
}

pub fn run(inputs: &SplitInputs, sink: &dyn ArtifactSink, json: bool) -> Result<()> {
    let summary = execute(inputs, sink)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.artifacts.is_empty() && summary.failures.is_empty() {
        println!("No files were processed. Please supply valid PDFs.");
        return Ok(());
    }

    println!(
        "Split complete! {} files generated in {}",
        summary.artifacts.len(),
        summary.destination.display()
    );
    if summary.downloadable {
        println!("\nCollect files:");
    }
    for artifact in &summary.artifacts {
        println!("{}: {}", artifact.identifier, artifact.path.display());
    }
    for failure in &summary.failures {
        println!("Failed {}: {}", failure.file_name, failure.error);
    }

    Ok(())
}
