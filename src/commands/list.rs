use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub identifier: String,
    pub file_name: String,
    pub path: PathBuf,
}

/// PDFs laid out as `<root>/<identifier>/<file>`, sorted by identifier then name.
pub fn list_outputs<P: AsRef<Path>>(root: P) -> Result<Vec<OutputFile>> {
    let root = root.as_ref();
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(2).max_depth(2).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            continue;
        }

        let identifier = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        files.push(OutputFile {
            identifier,
            file_name: entry.file_name().to_string_lossy().into_owned(),
            path: path.to_path_buf(),
        });
    }

    Ok(files)
}

pub fn run<P: AsRef<Path>>(root: P) -> Result<()> {
    let files = list_outputs(&root)?;

    if files.is_empty() {
        println!("No split files found.");
        return Ok(());
    }

    for file in &files {
        println!("{}/{}", file.identifier, file.file_name);
    }

    let students = {
        let mut ids: Vec<_> = files.iter().map(|f| f.identifier.as_str()).collect();
        ids.dedup();
        ids.len()
    };
    println!("\n{} file(s) for {} student(s).", files.len(), students);

    Ok(())
}
