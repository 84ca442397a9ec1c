use tracing::{debug, warn};

use super::PdfDocument;

/// Plain text of every page, in page order.
///
/// pdf-extract gives the better text layout, but it can fail on fonts lopdf
/// handles, so lopdf's per-page extraction is used whenever pdf-extract errors
/// or returns a different number of pages than the document has.
pub fn page_texts(pdf_bytes: &[u8], doc: &PdfDocument) -> Vec<String> {
    let total = doc.page_count() as usize;

    match pdf_extract::extract_text_from_mem_by_pages(pdf_bytes) {
        Ok(pages) if pages.len() == total => return pages,
        Ok(pages) => warn!(
            source = %doc.source,
            expected = total,
            got = pages.len(),
            "pdf-extract page count mismatch, falling back to lopdf"
        ),
        Err(e) => warn!(source = %doc.source, error = %e, "pdf-extract failed, falling back to lopdf"),
    }

    lopdf_page_texts(doc)
}

fn lopdf_page_texts(doc: &PdfDocument) -> Vec<String> {
    doc.page_ids()
        .into_iter()
        .map(|(page_num, _)| {
            doc.doc.extract_text(&[page_num]).unwrap_or_else(|e| {
                // still a page, just one without readable text
                debug!(source = %doc.source, page = page_num, error = %e, "no text on page");
                String::new()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::build_pdf;

    #[test]
    fn test_page_texts_one_entry_per_page() {
        let bytes = build_pdf(&["Student ID: 1001", "continued", "Student ID: 1002"]);
        let doc = PdfDocument::from_bytes(&bytes, "fixture").unwrap();
        let texts = page_texts(&bytes, &doc);
        assert_eq!(texts.len(), 3);
        assert!(texts[0].contains("1001"));
        assert!(!texts[1].contains("Student ID"));
        assert!(texts[2].contains("1002"));
    }

    #[test]
    fn test_lopdf_fallback() {
        let bytes = build_pdf(&["[77] Monday", "Tuesday"]);
        let doc = PdfDocument::from_bytes(&bytes, "fixture").unwrap();
        let texts = lopdf_page_texts(&doc);
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("[77]"));
    }
}
