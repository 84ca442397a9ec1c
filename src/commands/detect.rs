use crate::grouper::{leading_dropped, Record};
use crate::pdf::{text::page_texts, PdfDocument};
use crate::report::{Grouping, ReportKind};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub kind: ReportKind,
    pub page_count: usize,
    /// Leading pages that belong to no record.
    pub dropped: usize,
    pub records: Vec<Record>,
}

/// Group a report the way `split` would, without writing anything.
pub fn detect<P: AsRef<Path>>(path: P, kind: ReportKind) -> Result<Detection> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read PDF: {}", path.display()))?;
    let doc = PdfDocument::from_bytes(&bytes, path.display().to_string())?;
    let texts = page_texts(&bytes, &doc);
    let records = kind.records(&texts);

    let dropped = match kind.grouping() {
        Grouping::PerPage => 0,
        Grouping::Runs => leading_dropped(&records, texts.len()),
    };

    Ok(Detection {
        kind,
        page_count: texts.len(),
        dropped,
        records,
    })
}

pub fn run<P: AsRef<Path>>(path: P, kind: ReportKind) -> Result<()> {
    let detection = detect(&path, kind)?;

    if detection.records.is_empty() {
        println!("No student records found.");
        return Ok(());
    }

    for record in &detection.records {
        let pages = record.page_numbers();
        let span = match (pages.first(), pages.last()) {
            (Some(first), Some(last)) if first != last => format!("p{}-{}", first, last),
            (Some(first), _) => format!("p{}", first),
            _ => String::new(),
        };
        println!("{}: {}", span, kind.file_name(&record.identifier));
    }

    if detection.dropped > 0 {
        println!("\n{} leading page(s) without an identifier skipped.", detection.dropped);
    }
    println!(
        "{} record(s) from {} page(s).",
        detection.records.len(),
        detection.page_count
    );

    Ok(())
}
