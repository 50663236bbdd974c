// Single-document word cloud run.
//
// PDF (or saved text) → token pipeline → frequency table → masked word
// cloud, with optional saved-text cache and CSV export along the way.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use super::{RunOutcome, TokenPipeline};
use crate::document::pdf::PdfSource;
use crate::document::saved::{save_words, SavedText};
use crate::document::traits::TextSource;
use crate::output::csv::write_csv;
use crate::output::terminal::display_frequencies;
use crate::render::wordcloud::WordCloud;
use crate::text::filters::{FilterMode, FilterSet};
use crate::text::frequency::FrequencyTable;
use crate::text::groups::GroupList;
use crate::text::normalize::Normalizer;
use crate::text::stopwords::StopList;

/// Every input, output and optional stage of a cloud run.
#[derive(Debug, Clone)]
pub struct CloudJob {
    /// PDF to extract (ignored when `load_file` is set)
    pub pdf: Option<PathBuf>,
    /// Saved word file to read instead of extracting a PDF
    pub load_file: Option<PathBuf>,
    /// Where to save the extracted words for later runs
    pub save_file: Option<PathBuf>,
    /// Mask image
    pub base_image: PathBuf,
    /// Output PNG
    pub output: PathBuf,
    /// Optional frequency CSV
    pub csv: Option<PathBuf>,
    pub filters: Option<PathBuf>,
    pub filter_mode: FilterMode,
    pub groups: Option<PathBuf>,
    /// Drop non-letter characters during normalization
    pub letters_only: bool,
    /// Show a page progress bar during extraction
    pub show_progress: bool,
    /// Rows in the terminal summary
    pub summary_rows: usize,
}

/// The result of the text half of a run.
#[derive(Debug, Clone)]
pub enum Analysis {
    Table(FrequencyTable),
    Empty(RunOutcome),
}

impl CloudJob {
    /// Resolve the text source: a saved file wins over a PDF.
    pub fn source(&self) -> Result<Box<dyn TextSource>> {
        if let Some(path) = &self.load_file {
            return Ok(Box::new(SavedText::new(path)));
        }
        match &self.pdf {
            Some(path) => Ok(Box::new(
                PdfSource::new(path).with_progress(self.show_progress),
            )),
            None => anyhow::bail!("Either a PDF or a saved text file is required"),
        }
    }

    /// Extract, normalize, filter and count. Writes the saved-text cache if
    /// requested.
    pub fn analyze(&self, stoplist: &StopList) -> Result<Analysis> {
        let filters = FilterSet::load(self.filters.as_deref(), self.filter_mode)?;
        let groups = GroupList::load(self.groups.as_deref())?;
        self.analyze_with(stoplist, &filters, &groups)
    }

    fn analyze_with(
        &self,
        stoplist: &StopList,
        filters: &FilterSet,
        groups: &GroupList,
    ) -> Result<Analysis> {
        let pipeline = TokenPipeline {
            normalizer: Normalizer {
                letters_only: self.letters_only,
            },
            ..TokenPipeline::new(filters, groups, stoplist)
        };

        let source = self.source()?;
        info!(source = %source.describe(), "Reading document");
        let fragments = source.fragments()?;
        if fragments.is_empty() {
            println!("Couldn't read text from {}", source.describe());
            return Ok(Analysis::Empty(RunOutcome::EmptyExtraction));
        }

        let words = if self.load_file.is_some() {
            pipeline.cached_words(&fragments)
        } else {
            pipeline.words(&fragments)
        };
        if words.is_empty() {
            println!(
                "No words left after normalization ({} fragments read)",
                fragments.len()
            );
            return Ok(Analysis::Empty(RunOutcome::EmptyExtraction));
        }

        if let Some(path) = &self.save_file {
            save_words(path, &words)?;
        }

        let tokens = pipeline.tokens_from_words(&words);
        let table = FrequencyTable::from_tokens(&tokens);
        if table.is_empty() {
            println!(
                "Couldn't get frequencies: all {} words were stopwords or filtered",
                words.len()
            );
            return Ok(Analysis::Empty(RunOutcome::EmptyFrequencies));
        }

        info!(
            tokens = tokens.len(),
            distinct = table.len(),
            top = %table.entries()[0].0,
            "Counted token frequencies"
        );
        Ok(Analysis::Table(table))
    }

    /// Full run: analyze, render, export.
    pub fn run(&self, stoplist: &StopList, cloud: &WordCloud) -> Result<RunOutcome> {
        let filters = FilterSet::load(self.filters.as_deref(), self.filter_mode)?;
        let groups = GroupList::load(self.groups.as_deref())?;

        let table = match self.analyze_with(stoplist, &filters, &groups)? {
            Analysis::Table(table) => table,
            Analysis::Empty(outcome) => return Ok(outcome),
        };

        // Stopwords and filters again at render stage. No-op for a table
        // built by `analyze`.
        let render_table = table.without(&stoplist.union(&filters));
        let drawn = cloud.render(&render_table, &self.base_image, &self.output)?;

        if let Some(path) = &self.csv {
            write_csv(path, &table)?;
        }

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

    fn job(dir: &std::path::Path) -> CloudJob {
        CloudJob {
            pdf: None,
            load_file: None,
            save_file: None,
            base_image: dir.join("mask.png"),
            output: dir.join("out.png"),
            csv: None,
            filters: None,
            filter_mode: FilterMode::Exact,
            groups: None,
            letters_only: true,
            show_progress: false,
            summary_rows: 10,
        }
    }

    #[test]
    fn test_source_requires_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(job(dir.path()).source().is_err());
    }

    #[test]
    fn test_load_file_wins_over_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = job(dir.path());
        job.pdf = Some(dir.path().join("doc.pdf"));
        job.load_file = Some(dir.path().join("cache.txt"));
        assert!(job.source().unwrap().describe().starts_with("saved"));
    }

    #[test]
    fn test_analyze_saved_text_with_filters_and_groups() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache.txt");
        std::fs::write(&cache, "Hola Mundo hola mundo").unwrap();
        let groups = dir.path().join("groups.txt");
        std::fs::write(&groups, "hola mundo\n").unwrap();

        let mut job = job(dir.path());
        job.load_file = Some(cache);
        job.groups = Some(groups);

        match job.analyze(&StopList::empty()).unwrap() {
            Analysis::Table(table) => {
                assert_eq!(table.entries(), &[("hola mundo".to_string(), 2)]);
            }
            Analysis::Empty(outcome) => panic!("unexpected {outcome:?}"),
        }
    }

    #[test]
    fn test_everything_filtered_is_empty_frequencies() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache.txt");
        std::fs::write(&cache, "de la de").unwrap();

        let mut job = job(dir.path());
        job.load_file = Some(cache);

        let stop = StopList::from_words(["de", "la"]);
        match job.analyze(&stop).unwrap() {
            Analysis::Empty(outcome) => assert_eq!(outcome, RunOutcome::EmptyFrequencies),
            Analysis::Table(_) => panic!("expected empty"),
        }
    }

    #[test]
    fn test_empty_source_is_empty_extraction_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache.txt");
        std::fs::write(&cache, "   \n").unwrap();

        let mut job = job(dir.path());
        job.load_file = Some(cache);

        let outcome = job.run(&StopList::empty(), &WordCloud::default()).unwrap();
        assert_eq!(outcome, RunOutcome::EmptyExtraction);
        assert!(!job.output.exists());
    }
}
