// Plain-text sources and the saved-text cache.
//
// Extracting a long PDF is the slow step, so a run can save its normalized,
// filtered words with --save-file and later runs can skip extraction with
// --load-file. Directory mode also reads plain `.txt` files through here.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::traits::TextSource;
use super::Fragment;

/// A previously saved word file. Every space-separated piece becomes one
/// fragment, so it flows through the same pipeline as PDF text.
pub struct SavedText {
    path: PathBuf,
}

impl SavedText {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for SavedText {
    fn describe(&self) -> String {
        format!("saved {}", self.path.display())
    }

    fn fragments(&self) -> Result<Vec<Fragment>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read saved file {}", self.path.display()))?;
        let fragments: Vec<Fragment> = contents
            .lines()
            .flat_map(|line| line.split(' '))
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| Fragment::new(0, piece))
            .collect();
        info!(path = %self.path.display(), fragments = fragments.len(), "Loaded saved text");
        Ok(fragments)
    }
}

/// A UTF-8 text file; one fragment per non-blank line. Invalid UTF-8 is
/// replaced rather than rejected.
pub struct PlainTextSource {
    path: PathBuf,
}

impl PlainTextSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for PlainTextSource {
    fn describe(&self) -> String {
        format!("text {}", self.path.display())
    }

    fn fragments(&self) -> Result<Vec<Fragment>> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let contents = String::from_utf8_lossy(&bytes);
        Ok(contents
            .lines()
            .map(|line| line.replace('\t', " ").trim().to_string())
            .filter(|line| !line.is_empty())
            .map(|line| Fragment::new(0, line))
            .collect())
    }
}

/// Write words to the cache file, joined by single spaces.
pub fn save_words(path: &Path, words: &[String]) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(words.join(" ").as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), words = words.len(), "Saved extracted words");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_yields_same_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.txt");
        let words: Vec<String> = ["paz", "justicia", "paz"].iter().map(|s| s.to_string()).collect();

        save_words(&path, &words).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "paz justicia paz");

        let frags = SavedText::new(&path).fragments().unwrap();
        let loaded: Vec<&str> = frags.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(loaded, vec!["paz", "justicia", "paz"]);
    }

    #[test]
    fn test_plain_text_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "Primera línea\n\n\tSegunda\n").unwrap();

        let frags = PlainTextSource::new(&path).fragments().unwrap();
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[1].text, "Segunda");
    }
}
