// Multi-word expression grouping.
//
// A groups file lists phrases ("derechos humanos", "acuerdo de paz") that
// should be counted as one token instead of as their separate words. The
// merge is a greedy left-to-right scan; when two phrases could match at the
// same position, the one registered first wins.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

/// Separator placed between the constituent words of a compound token.
pub const GROUP_SEPARATOR: &str = " ";

/// Ordered list of phrases, each pre-split into its words.
#[derive(Debug, Clone, Default)]
pub struct GroupList {
    phrases: Vec<Vec<String>>,
}

impl GroupList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from phrase lines. Each line is lower-cased and split on
    /// whitespace; blank lines are skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for line in lines {
            list.add(line.as_ref());
        }
        list
    }

    /// Load a groups file, or return an empty list when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::new());
        };
        let list = Self::from_lines(super::read_lines_lower(path)?);
        debug!(path = %path.display(), groups = list.len(), "Loaded groups");
        Ok(list)
    }

    /// Register one phrase at the end of the list.
    pub fn add(&mut self, phrase: &str) {
        let words: Vec<String> = phrase
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();
        if !words.is_empty() {
            self.phrases.push(words);
        }
    }

    pub fn phrases(&self) -> &[Vec<String>] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Merge registered phrases into compound tokens.
    ///
    /// Unmatched tokens pass through in order; every input token ends up in
    /// exactly one output token.
    pub fn merge(&self, tokens: &[String]) -> Vec<String> {
        if self.phrases.is_empty() {
            return tokens.to_vec();
        }

        let mut merged = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let rest = &tokens[i..];
            match self.phrases.iter().find(|p| rest.starts_with(p.as_slice())) {
                Some(phrase) => {
                    merged.push(phrase.join(GROUP_SEPARATOR));
                    i += phrase.len();
                }
                None => {
                    merged.push(tokens[i].clone());
                    i += 1;
                }
            }
        }
        merged
    }
}
