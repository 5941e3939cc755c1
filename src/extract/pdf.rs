//! PDF text extraction using lopdf.

use lopdf::Document;

use super::{ExtractError, ExtractionResult};

/// Extract text from a PDF byte buffer.
///
/// Pages are walked in ascending page-number order and concatenated with a
/// blank-line separator, so output always matches document page order. A page
/// whose text cannot be decoded contributes an empty block rather than
/// failing the document.
pub fn extract_pdf(data: &[u8]) -> Result<ExtractionResult, ExtractError> {
    let doc = Document::load_mem(data).map_err(|e| ExtractError::MalformedPdf(e.to_string()))?;

    let pages = doc.get_pages();
    let page_count = pages.len() as u32;

    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(raw) => page_texts.push(join_page_items(&raw)),
            Err(e) => {
                tracing::warn!("Failed to extract text from page {}: {}", page_number, e);
                page_texts.push(String::new());
            }
        }
    }

    Ok(ExtractionResult {
        text: join_pages(&page_texts).trim().to_string(),
        page_count: Some(page_count),
    })
}

/// Join one page's text items with single spaces.
fn join_page_items(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join page blocks with a blank-line separator, preserving order.
fn join_pages(pages: &[String]) -> String {
    pages.join("\n\n")
}
