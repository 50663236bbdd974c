// Word cloud from a precomputed frequency file.
//
// The file is tab-separated `token<TAB>count`, one pair per line, written by
// external tooling in ISO-8859-1. Lines that don't parse are skipped with a
// warning so a stray header row doesn't sink the run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::RunOutcome;
use crate::output::terminal::display_frequencies;
use crate::render::wordcloud::WordCloud;
use crate::text::filters::FilterSet;
use crate::text::frequency::FrequencyTable;
use crate::text::stopwords::StopList;

#[derive(Debug, Clone)]
pub struct FrequencyFileJob {
    pub frequencies: PathBuf,
    pub base_image: PathBuf,
    pub output: PathBuf,
    pub summary_rows: usize,
}

/// Decode ISO-8859-1: every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse `token<TAB>count` lines. Duplicate tokens are summed.
pub fn parse_frequency_lines(contents: &str) -> FrequencyTable {
    let mut pairs = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let Some((token, count)) = line.split_once('\t') else {
            warn!(line = i + 1, "Frequency line has no tab, skipping");
            continue;
        };
        let token = token.trim();
        match count.trim().parse::<u64>() {
            Ok(count) if !token.is_empty() => pairs.push((token.to_string(), count)),
            _ => warn!(line = i + 1, token, count, "Malformed frequency line, skipping"),
        }
    }
    FrequencyTable::from_pairs(pairs)
}

pub fn load_frequency_file(path: &Path) -> Result<FrequencyTable> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read frequency file {}", path.display()))?;
    let table = parse_frequency_lines(&decode_latin1(&bytes));
    info!(
        path = %path.display(),
        tokens = table.len(),
        total = table.total(),
        "Loaded frequency file"
    );
    Ok(table)
}

impl FrequencyFileJob {
    pub fn run(&self, stoplist: &StopList, cloud: &WordCloud) -> Result<RunOutcome> {
        let table = load_frequency_file(&self.frequencies)?;
        let table = table.without(&stoplist.union(&FilterSet::empty()));
        if table.is_empty() {
            println!(
                "Couldn't get frequencies from {}",
                self.frequencies.display()
            );
            return Ok(RunOutcome::EmptyFrequencies);
        }

        let drawn = cloud.render(&table, &self.base_image, &self.output)?;
        display_frequencies(&table, self.summary_rows);
        println!(
            "Word cloud with {drawn} words written to {}",
            self.output.display()
        );
        Ok(RunOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_latin1() {
        // "niño" in ISO-8859-1
        assert_eq!(decode_latin1(&[0x6E, 0x69, 0xF1, 0x6F]), "niño");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let table = parse_frequency_lines("word\tfreq\npaz\t5\r\nguerra\t2\nsin tab\n\nvida\t-1\npaz\t1\n");
        assert_eq!(
            table.entries(),
            &[("paz".to_string(), 6), ("guerra".to_string(), 2)]
        );
    }

    #[test]
    fn test_counts_near_u64_max_do_not_overflow() {
        let table = parse_frequency_lines("paz\t18446744073709551615\nvida\t1\n");
        assert_eq!(table.total(), u64::MAX);
        assert_eq!(table.entries()[0].0, "paz");
    }

    #[test]
    fn test_load_latin1_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.tsv");
        std::fs::write(&path, b"ni\xF1os\t3\naccion\t1\n").unwrap();

        let table = load_frequency_file(&path).unwrap();
        assert_eq!(table.get("niños"), Some(3));
        assert_eq!(table.get("accion"), Some(1));
    }

    #[test]
    fn test_only_stopwords_is_empty_frequencies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.tsv");
        std::fs::write(&path, "de\t9\nla\t4\n").unwrap();

        let job = FrequencyFileJob {
            frequencies: path,
            base_image: dir.path().join("mask.png"),
            output: dir.path().join("out.png"),
            summary_rows: 5,
        };
        let stop = StopList::from_words(["de", "la"]);
        let outcome = job.run(&stop, &WordCloud::default()).unwrap();
        assert_eq!(outcome, RunOutcome::EmptyFrequencies);
        assert!(!job.output.exists());
    }
}
