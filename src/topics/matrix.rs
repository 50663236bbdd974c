// Document-term matrix.
//
// One row per input document, one column per vocabulary term, in the order
// terms were first seen across the corpus. Built from token streams that
// already went through normalization, filters and stopword removal.

use std::collections::HashMap;

use ndarray::Array2;

/// Counts of each vocabulary term in each document.
#[derive(Debug, Clone)]
pub struct DocumentTermMatrix {
    counts: Array2<u32>,
    vocabulary: Vec<String>,
    documents: Vec<String>,
}

impl DocumentTermMatrix {
    /// Build from `(document name, tokens)` pairs.
    pub fn build(documents: &[(String, Vec<String>)]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut vocabulary: Vec<String> = Vec::new();
        for (_, tokens) in documents {
            for token in tokens {
                if !index.contains_key(token.as_str()) {
                    index.insert(token.as_str(), vocabulary.len());
                    vocabulary.push(token.clone());
                }
            }
        }

        let mut counts = Array2::zeros((documents.len(), vocabulary.len()));
        for (row, (_, tokens)) in documents.iter().enumerate() {
            for token in tokens {
                counts[[row, index[token.as_str()]]] += 1;
            }
        }

        Self {
            counts,
            vocabulary,
            documents: documents.iter().map(|(name, _)| name.clone()).collect(),
        }
    }

    pub fn counts(&self) -> &Array2<u32> {
        &self.counts
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn n_documents(&self) -> usize {
        self.counts.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.counts.ncols()
    }

    /// Count of `term` in document `doc`, 0 if the term is unknown.
    pub fn count(&self, doc: usize, term: &str) -> u32 {
        self.vocabulary
            .iter()
            .position(|t| t == term)
            .map(|col| self.counts[[doc, col]])
            .unwrap_or(0)
    }

    /// Number of tokens in document `doc`.
    pub fn document_length(&self, doc: usize) -> u32 {
        self.counts.row(doc).sum()
    }

    /// Number of tokens in the whole corpus.
    pub fn total_tokens(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_tokens() == 0
    }
}
