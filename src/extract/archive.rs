//! Archive extraction: processing files within zip archives.
//!
//! Entries are visited strictly in archive enumeration order. A failing entry
//! is recorded inline as a labeled error block and never aborts the archive;
//! only an archive with no usable entries at all is an error.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::{pdf, word, ExtractError, ExtractionResult};

/// Entry extensions recognized inside an archive. Anything else, including
/// nested `.zip` archives, is skipped silently.
const SUPPORTED_EXTENSIONS: [&str; 3] = ["txt", "pdf", "docx"];

/// Extract text from every supported entry of a zip archive.
pub fn extract_archive(data: &[u8]) -> Result<ExtractionResult, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let mut output = String::new();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable archive entry {}: {}", index, e);
                continue;
            }
        };

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();

        // AppleDouble resource forks, not documents.
        if name.starts_with("__MACOSX") {
            continue;
        }

        let Some(extension) = entry_extension(&name) else {
            continue;
        };
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }

        let mut bytes = Vec::new();
        let extracted = entry
            .read_to_end(&mut bytes)
            .map_err(ExtractError::from)
            .and_then(|_| extract_entry(&bytes, &extension));

        match extracted {
            Ok(text) => {
                output.push_str(&format!("\n\n--- {} ---\n{}", name, text));
            }
            Err(e) => {
                tracing::warn!("Failed to extract archive entry {}: {}", name, e);
                output.push_str(&format!("\n\n--- {} ---\n[Error processing file]", name));
            }
        }
    }

    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::NoSupportedEntries);
    }

    Ok(ExtractionResult {
        text: trimmed.to_string(),
        // Archives never report a page count, even when an entry was a PDF.
        page_count: None,
    })
}

/// Extension after the last `.`, lowercased.
fn entry_extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Dispatch one entry's bytes to the matching single-format extractor.
fn extract_entry(bytes: &[u8], extension: &str) -> Result<String, ExtractError> {
    match extension {
        "txt" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        "pdf" => Ok(pdf::extract_pdf(bytes)?.text),
        "docx" => word::extract_word(bytes),
        other => Err(ExtractError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, bytes) in entries {
            if name.ends_with('/') {
                writer.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(bytes).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_malformed_archive() {
        let result = extract_archive(b"not a zip archive");
        assert!(matches!(result, Err(ExtractError::MalformedArchive(_))));
    }

    #[test]
    fn test_entries_in_order_with_labels() {
        let data = build_zip(&[
            ("first.txt", b"alpha content".as_slice()),
            ("second.txt", b"beta content".as_slice()),
        ]);
        let result = extract_archive(&data).unwrap();
        assert!(result.text.starts_with("--- first.txt ---"));
        assert!(result.text.contains("alpha content"));
        assert!(result.text.contains("--- second.txt ---\nbeta content"));
        assert!(
            result.text.find("first.txt").unwrap() < result.text.find("second.txt").unwrap()
        );
        assert_eq!(result.page_count, None);
    }

    #[test]
    fn test_corrupt_entry_is_isolated() {
        let data = build_zip(&[
            ("good.txt", b"still readable".as_slice()),
            ("broken.pdf", b"this is not a pdf".as_slice()),
        ]);
        let result = extract_archive(&data).unwrap();
        assert!(result.text.contains("still readable"));
        assert!(result
            .text
            .contains("--- broken.pdf ---\n[Error processing file]"));
    }

    #[test]
    fn test_unsupported_and_directory_entries_skipped() {
        let data = build_zip(&[
            ("photos/", b"".as_slice()),
            ("photos/cat.jpg", b"\xFF\xD8\xFF".as_slice()),
            ("notes.txt", b"just the notes".as_slice()),
            ("inner.zip", b"PK nested archive".as_slice()),
        ]);
        let result = extract_archive(&data).unwrap();
        assert_eq!(result.text, "--- notes.txt ---\njust the notes");
    }

    #[test]
    fn test_no_supported_entries() {
        let data = build_zip(&[("image.jpg", b"\xFF\xD8\xFF".as_slice())]);
        assert!(matches!(
            extract_archive(&data),
            Err(ExtractError::NoSupportedEntries)
        ));
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let data = build_zip(&[("README.TXT", b"shouting content".as_slice())]);
        let result = extract_archive(&data).unwrap();
        assert!(result.text.contains("shouting content"));
    }

    #[test]
    fn test_macosx_metadata_skipped() {
        let data = build_zip(&[
            ("__MACOSX/._doc.txt", b"\x00\x05\x16\x07".as_slice()),
            ("doc.txt", b"real content".as_slice()),
        ]);
        let result = extract_archive(&data).unwrap();
        assert_eq!(result.text, "--- doc.txt ---\nreal content");
    }
}
