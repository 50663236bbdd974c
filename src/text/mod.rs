// Text processing: normalization, filters, phrase grouping, stopwords and
// frequency counting.
//
// These are the pure stages of the frequency pipeline. Nothing in here
// touches a document format; the loaders in `document` hand over fragments
// and the sinks in `render`, `output` and `topics` consume the results.

pub mod filters;
pub mod frequency;
pub mod groups;
pub mod normalize;
pub mod stopwords;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a UTF-8 file and return its non-blank lines, lower-cased.
///
/// Both the filters file and the groups file use this format: one entry per
/// line, case-insensitive.
pub fn read_lines_lower(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(lines_lower(&contents))
}

/// Split text into trimmed, lower-cased, non-blank lines.
pub fn lines_lower(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.trim_end_matches('\r').trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_lowercase())
        .collect()
}
