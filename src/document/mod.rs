// Document loading: turns files into ordered text fragments.
//
// PDFs go through lopdf page by page. The saved-text cache and plain text
// files (directory mode) are read directly. Everything downstream only sees
// `Fragment`s, through the `TextSource` trait.

pub mod pdf;
pub mod saved;
pub mod traits;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use pdf::PdfSource;
use saved::PlainTextSource;
use traits::TextSource;

/// A contiguous run of text from one layout region of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// 1-based page number; 0 for sources without pages.
    pub page: u32,
    pub text: String,
}

impl Fragment {
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// Pick a loader for a file by extension: `.pdf` is parsed, anything else
/// is read as UTF-8 text.
pub fn source_for(path: &Path, show_progress: bool) -> Box<dyn TextSource> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Box::new(PdfSource::new(path).with_progress(show_progress))
    } else {
        Box::new(PlainTextSource::new(path))
    }
}

/// File extensions read in directory mode (case-insensitive).
pub const INPUT_EXTENSIONS: &[&str] = &["pdf", "txt"];

fn is_input_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        INPUT_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// List the regular, non-hidden `.pdf` and `.txt` files of a directory
/// sorted by file name. Anything else (mask images, spreadsheets) is skipped.
pub fn files_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    let mut skipped = 0usize;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !path.is_file() || hidden {
            continue;
        }
        if is_input_file(&path) {
            files.push(path);
        } else {
            skipped += 1;
            debug!(file = %path.display(), "Not a .pdf or .txt file, skipping");
        }
    }
    files.sort();
    debug!(dir = %dir.display(), files = files.len(), skipped, "Listed input directory");
    Ok(files)
}
