use anyhow::{Context, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;

pub struct PdfDocument {
    pub doc: Document,
    pub source: String,
}

impl PdfDocument {
    #[cfg(test)]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = path.as_ref().display().to_string();
        let doc = Document::load(&path).with_context(|| format!("Failed to open PDF: {}", source))?;
        Ok(PdfDocument { doc, source })
    }

    /// Parse a PDF held in memory. `source` names it in errors and logs.
    pub fn from_bytes(bytes: &[u8], source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let doc =
            Document::load_mem(bytes).with_context(|| format!("Failed to parse PDF: {}", source))?;
        Ok(PdfDocument { doc, source })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        self.doc.get_pages().into_iter().collect()
    }

    /// Copy specific 1-indexed pages into a new document
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Document> {
        let mut new_doc = self.doc.clone();
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        for &page in pages {
            if page == 0 || page > total {
                anyhow::bail!("Page {} is out of range (1-{}) in {}", page, total, self.source);
            }
        }

        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .filter(|(num, _)| !pages.contains(num))
            .map(|(num, _)| *num)
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            new_doc.prune_objects();
        }

        Ok(new_doc)
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}
