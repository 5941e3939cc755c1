//! Word document text extraction using docx-rs.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use super::ExtractError;

/// Extract text from a Word document byte buffer.
///
/// Walks the document body collecting run text per paragraph; paragraphs are
/// joined with newlines. No further normalization is applied.
pub fn extract_word(data: &[u8]) -> Result<String, ExtractError> {
    let docx = read_docx(data).map_err(|e| ExtractError::MalformedDocument(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for paragraph_child in paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let RunChild::Text(text) = run_child {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn synthetic_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_malformed_document() {
        let result = extract_word(b"not a docx package");
        assert!(matches!(result, Err(ExtractError::MalformedDocument(_))));
    }

    #[test]
    fn test_extract_paragraphs_in_order() {
        let data = synthetic_docx(&["First paragraph.", "Second paragraph."]);
        let text = extract_word(&data).unwrap();
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Second paragraph."));
        assert!(text.find("First").unwrap() < text.find("Second").unwrap());
    }
}
