// User-supplied exclusion rules.
//
// A filters file has one entry per line. In exact mode each entry is a word
// (or a whole fragment) to drop. In regex mode each line is also compiled as
// a pattern matched against whole fragments, which is how headers, footers
// and page numbers get stripped before tokenization.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

/// How the lines of a filters file are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FilterMode {
    /// Lines are exact, case-insensitive words or fragments.
    #[default]
    Exact,
    /// Lines are additionally compiled as regular expressions and matched
    /// against each lowered fragment.
    Regex,
}

/// The loaded filter set. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    terms: HashSet<String>,
    patterns: Vec<Regex>,
}

impl FilterSet {
    /// An empty filter set; filters nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a filter set from raw lines. Blank lines are ignored.
    pub fn from_lines<I, S>(lines: I, mode: FilterMode) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for (i, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim_end_matches('\r').trim();
            if line.is_empty() {
                continue;
            }
            set.terms.insert(line.to_lowercase());
            if mode == FilterMode::Regex {
                // Compiled from the original line: lowering a pattern would
                // turn classes like \S or \W into their opposites. Case
                // folding and \w are Unicode-aware, so "CAPÍTULO" matches
                // the lowered "capítulo".
                let pattern = Regex::new(&format!("(?i){line}")).with_context(|| {
                    format!("Invalid filter pattern on line {}: {line}", i + 1)
                })?;
                set.patterns.push(pattern);
            }
        }
        Ok(set)
    }

    /// Load a filters file, or return an empty set when no path is given.
    pub fn load(path: Option<&Path>, mode: FilterMode) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::empty());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filters file {}", path.display()))?;
        let set = Self::from_lines(contents.lines(), mode)
            .with_context(|| format!("Failed to load filters from {}", path.display()))?;
        debug!(
            path = %path.display(),
            terms = set.terms.len(),
            patterns = set.patterns.len(),
            "Loaded filters"
        );
        Ok(set)
    }

    /// Exact, case-folded membership test for a token.
    pub fn contains(&self, token: &str) -> bool {
        self.terms.contains(token) || self.terms.contains(&token.to_lowercase())
    }

    /// The lower-cased exact entries.
    pub fn terms(&self) -> &HashSet<String> {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether a whole fragment should be discarded before normalization.
    pub fn rejects_fragment(&self, fragment: &str) -> bool {
        let lowered = fragment.trim().to_lowercase();
        if lowered.is_empty() {
            return false;
        }
        self.terms.contains(&lowered) || self.patterns.iter().any(|p| p.is_match(&lowered))
    }

    /// Drop every token present in the set, keeping order.
    pub fn remove_from(&self, tokens: Vec<String>) -> Vec<String> {
        if self.terms.is_empty() {
            return tokens;
        }
        tokens.into_iter().filter(|t| !self.contains(t)).collect()
    }
}

/// Remove tokens found in `filters`. Pure; the input is left untouched.
pub fn remove_filtered(tokens: &[String], filters: &HashSet<String>) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !filters.contains(t.as_str()) && !filters.contains(&t.to_lowercase()))
        .cloned()
        .collect()
}
