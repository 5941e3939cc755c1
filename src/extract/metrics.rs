//! Statistics derived from extracted text.

/// Number of whitespace-delimited non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time in minutes at 200 words per minute, rounded up.
pub fn reading_time_minutes(word_count: usize) -> u32 {
    word_count.div_ceil(200) as u32
}
