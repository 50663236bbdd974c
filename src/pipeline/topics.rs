// Directory topic model run.
//
// Every file in the directory goes through the token pipeline, the token
// streams become a document-term matrix, and the topic model summarizes it
// into a report.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use super::{RunOutcome, TokenPipeline};
use crate::document::{files_in_dir, source_for};
use crate::output::terminal::display_topics;
use crate::text::filters::{FilterMode, FilterSet};
use crate::text::groups::GroupList;
use crate::text::normalize::Normalizer;
use crate::text::stopwords::StopList;
use crate::topics::matrix::DocumentTermMatrix;
use crate::topics::report::TopicReport;
use crate::topics::traits::TopicModel;

/// Default path of the plain-text topic report.
pub const DEFAULT_REPORT: &str = "lda_result.txt";

#[derive(Debug, Clone)]
pub struct TopicsJob {
    pub directory: PathBuf,
    pub filters: Option<PathBuf>,
    pub filter_mode: FilterMode,
    pub groups: Option<PathBuf>,
    /// Text report (default lda_result.txt)
    pub output: PathBuf,
    /// Optional JSON copy of the report
    pub json: Option<PathBuf>,
    pub letters_only: bool,
    pub show_progress: bool,
}

impl TopicsJob {
    /// Read and tokenize every file. Files that fail to load are skipped.
    pub fn build_matrix(&self, stoplist: &StopList) -> Result<DocumentTermMatrix> {
        let filters = FilterSet::load(self.filters.as_deref(), self.filter_mode)?;
        let groups = GroupList::load(self.groups.as_deref())?;
        let pipeline = TokenPipeline {
            normalizer: Normalizer {
                letters_only: self.letters_only,
            },
            ..TokenPipeline::new(&filters, &groups, stoplist)
        };

        let files = files_in_dir(&self.directory)?;
        let mut documents: Vec<(String, Vec<String>)> = Vec::with_capacity(files.len());
        for path in &files {
            let source = source_for(path, self.show_progress);
            let fragments = match source.fragments() {
                Ok(fragments) => fragments,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping unreadable file");
                    continue;
                }
            };
            let tokens = pipeline.tokens(&fragments);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            info!(file = %name, tokens = tokens.len(), "Tokenized document");
            documents.push((name, tokens));
        }

        Ok(DocumentTermMatrix::build(&documents))
    }

    /// Fit the model and write the report(s). Returns the report alongside
    /// the outcome so callers can inspect it.
    pub fn run_with_report(
        &self,
        stoplist: &StopList,
        model: &dyn TopicModel,
    ) -> Result<(RunOutcome, Option<TopicReport>)> {
        let matrix = self.build_matrix(stoplist)?;
        if matrix.is_empty() {
            println!(
                "Couldn't get frequencies from any of the {} documents in {}",
                matrix.n_documents(),
                self.directory.display()
            );
            return Ok((RunOutcome::EmptyFrequencies, None));
        }

        info!(
            documents = matrix.n_documents(),
            terms = matrix.n_terms(),
            tokens = matrix.total_tokens(),
            "Fitting topic model"
        );
        let report = model.fit(&matrix)?;

        report.write_text(&self.output)?;
        if let Some(path) = &self.json {
            report.write_json(path)?;
        }
        Ok((RunOutcome::Success, Some(report)))
    }

    pub fn run(&self, stoplist: &StopList, model: &dyn TopicModel) -> Result<RunOutcome> {
        let (outcome, report) = self.run_with_report(stoplist, model)?;
        if let Some(report) = &report {
            display_topics(report);
            println!("Topic report written to {}", self.output.display());
        }
        Ok(outcome)
    }
}
