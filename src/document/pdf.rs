// PDF loader backed by lopdf.
//
// Text is pulled one page at a time so a single broken page (bad font
// encoding, unsupported filter) costs that page, not the whole document.
// Each extracted line is treated as one fragment, which lines up with the
// text boxes the fragment filters are written against.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lopdf::Document;
use tracing::{info, warn};

use super::traits::TextSource;
use super::Fragment;

/// A PDF file on disk.
pub struct PdfSource {
    path: PathBuf,
    show_progress: bool,
}

impl PdfSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            show_progress: false,
        }
    }

    /// Show a page progress bar on stderr while extracting.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

impl TextSource for PdfSource {
    fn describe(&self) -> String {
        format!("pdf {}", self.path.display())
    }

    fn fragments(&self) -> Result<Vec<Fragment>> {
        let doc = Document::load(&self.path)
            .with_context(|| format!("Failed to open PDF {}", self.path.display()))?;

        // BTreeMap keyed by page number, so iteration is document order.
        let pages = doc.get_pages();

        let pb = if self.show_progress {
            let pb = ProgressBar::new(pages.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Pages [{bar:30}] {pos}/{len} ({eta})")
                    .expect("valid template"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut fragments = Vec::new();
        let mut skipped = 0usize;
        for &page in pages.keys() {
            match doc.extract_text(&[page]) {
                Ok(text) => fragments.extend(split_fragments(page, &text)),
                Err(e) => {
                    skipped += 1;
                    warn!(page, error = %e, "Skipping page with unreadable text");
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            path = %self.path.display(),
            pages = pages.len(),
            skipped,
            fragments = fragments.len(),
            "Extracted PDF text"
        );
        Ok(fragments)
    }
}

/// Split one page's extracted text into fragments: one per non-blank line,
/// tabs flattened to spaces.
pub fn split_fragments(page: u32, text: &str) -> Vec<Fragment> {
    text.lines()
        .map(|line| line.replace('\t', " "))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .map(|line| Fragment::new(page, line))
        .collect()
}
