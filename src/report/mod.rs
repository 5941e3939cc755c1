//! Printable report rendering.
//!
//! Reports are plain text, paginated at a fixed line height with a footer on
//! every page, suitable for printing or archiving alongside the source
//! document.

use chrono::Utc;

use crate::models::AnalyzedDocument;

/// Maximum characters of extracted text included in a report.
const TEXT_BUDGET: usize = 15_000;
/// Body lines per rendered page, footer excluded.
const PAGE_BODY_LINES: usize = 54;
/// Column width used for wrapping and rules.
const LINE_WIDTH: usize = 80;

/// Render a document into a paginated plain-text report.
pub fn render(document: &AnalyzedDocument) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(document.name.clone());
    lines.push("=".repeat(LINE_WIDTH));
    lines.push(String::new());

    lines.push(format!("Classification:  {}", document.classification));
    lines.push(format!(
        "Analyzed:        {}",
        document.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(format!("Words:           {}", document.metrics.word_count));
    if let Some(pages) = document.metrics.page_count {
        lines.push(format!("Pages:           {}", pages));
    }
    lines.push(format!(
        "Reading time:    {} min",
        document.metrics.reading_time_minutes
    ));
    lines.push(format!("Sentiment:       {}", document.metrics.sentiment));
    lines.push(format!("Tags:            {}", document.tags.join(", ")));
    lines.push(String::new());

    lines.push("Summary".to_string());
    lines.push("-".repeat(LINE_WIDTH));
    lines.extend(wrap_text(&document.summary, LINE_WIDTH));
    lines.push(String::new());

    if let Some(insights) = &document.insights {
        lines.push("Insights".to_string());
        lines.push("-".repeat(LINE_WIDTH));
        lines.extend(wrap_text(insights, LINE_WIDTH));
        lines.push(String::new());
    }

    lines.push("Extracted text".to_string());
    lines.push("-".repeat(LINE_WIDTH));
    let (text, truncated) = clip_text(&document.full_text, TEXT_BUDGET);
    lines.extend(wrap_text(text, LINE_WIDTH));
    if truncated {
        lines.push(String::new());
        lines.push("[Text truncated for this report]".to_string());
    }

    paginate(&document.name, &lines)
}

/// Default report file name: sanitized document name plus the current date.
pub fn default_filename(document: &AnalyzedDocument) -> String {
    format!(
        "{}-analysis-{}.txt",
        sanitize_name(&document.name),
        Utc::now().format("%Y-%m-%d")
    )
}

/// Clip text to a character budget on a char boundary.
fn clip_text(text: &str, budget: usize) -> (&str, bool) {
    match text.char_indices().nth(budget) {
        Some((index, _)) => (&text[..index], true),
        None => (text, false),
    }
}

/// Greedy word wrap preserving paragraph breaks.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Split body lines into fixed-height pages, each with a footer line.
fn paginate(name: &str, lines: &[String]) -> String {
    let page_count = lines.chunks(PAGE_BODY_LINES).count().max(1);
    let mut pages = Vec::with_capacity(page_count);

    for (index, chunk) in lines.chunks(PAGE_BODY_LINES).enumerate() {
        let mut page = chunk.join("\n");
        page.push('\n');
        // Pad short pages so the footer lands at a constant height.
        for _ in chunk.len()..PAGE_BODY_LINES {
            page.push('\n');
        }
        page.push_str(&footer(name, index + 1, page_count));
        pages.push(page);
    }

    if pages.is_empty() {
        pages.push(footer(name, 1, 1));
    }

    pages.join("\n\u{0c}\n")
}

fn footer(name: &str, page: usize, pages: usize) -> String {
    let label = format!("{} - page {} of {}", name, page, pages);
    format!("{:>width$}", label, width = LINE_WIDTH)
}

/// Lowercase the name and replace anything outside `[a-z0-9_-]`, collapsing
/// runs; falls back to "document" when nothing survives.
fn sanitize_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut last_was_dash = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            sanitized.push(c);
            last_was_dash = false;
        } else if !last_was_dash && !sanitized.is_empty() {
            sanitized.push('-');
            last_was_dash = true;
        }
    }
    let sanitized = sanitized.trim_end_matches('-').to_string();
    if sanitized.is_empty() {
        "document".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyzedDocument, DocumentAnalysis};

    fn sample_document(text: &str) -> AnalyzedDocument {
        AnalyzedDocument::new(
            "quarterly-report.pdf".to_string(),
            String::new(),
            text.to_string(),
            Some(3),
            DocumentAnalysis::fallback(),
        )
    }

    #[test]
    fn test_render_contains_metadata() {
        let report = render(&sample_document("short body text"));
        assert!(report.contains("quarterly-report.pdf"));
        assert!(report.contains("Classification:  Others"));
        assert!(report.contains("Pages:           3"));
        assert!(report.contains("short body text"));
        assert!(report.contains("page 1 of"));
    }

    #[test]
    fn test_render_truncates_long_text() {
        let long_text = "word ".repeat(10_000);
        let report = render(&sample_document(&long_text));
        assert!(report.contains("[Text truncated for this report]"));
    }

    #[test]
    fn test_render_short_text_not_truncated() {
        let report = render(&sample_document("brief"));
        assert!(!report.contains("[Text truncated for this report]"));
    }

    #[test]
    fn test_wrap_text_width() {
        let wrapped = wrap_text(&"word ".repeat(50), 20);
        assert!(wrapped.iter().all(|line| line.len() <= 20));
        assert!(wrapped.len() > 1);
    }

    #[test]
    fn test_clip_text_boundary() {
        let (clipped, truncated) = clip_text("abcdef", 3);
        assert_eq!(clipped, "abc");
        assert!(truncated);
        let (clipped, truncated) = clip_text("abc", 3);
        assert_eq!(clipped, "abc");
        assert!(!truncated);
    }

    #[test]
    fn test_default_filename_shape() {
        let name = default_filename(&sample_document("text"));
        assert!(name.starts_with("quarterly-report-pdf-analysis-"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("My Report (v2).pdf"), "my-report-v2-pdf");
        assert_eq!(sanitize_name("///"), "document");
    }

    #[test]
    fn test_render_contains_page_footer_on_report() {
        let report = render(&sample_document("body"));
        assert!(report.contains("quarterly-report.pdf - page 1 of 1"));
    }
}
