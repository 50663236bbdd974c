// Topic model trait: swap-ready abstraction.
//
// The directory pipeline only needs "matrix in, report out". The default
// implementation is collapsed-Gibbs LDA, but any model that can name the top
// words per topic and a topic mix per document fits here.

use anyhow::Result;

use super::matrix::DocumentTermMatrix;
use super::report::TopicReport;

/// Trait for fitting a topic model to a document-term matrix.
pub trait TopicModel {
    /// Fit the model and summarize it as a report.
    fn fit(&self, matrix: &DocumentTermMatrix) -> Result<TopicReport>;
}
