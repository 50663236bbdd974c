// Frequency aggregation.
//
// Counts token occurrences and orders them by descending count. Ties keep
// the order in which tokens were first seen, so the same input always
// produces the same table.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Token counts ordered by descending count, first-seen order within ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    /// Count a token stream.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            match index.get(token) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(token, entries.len());
                    entries.push((token.to_string(), 1));
                }
            }
        }

        Self::sorted(entries)
    }

    /// Build from precomputed `(token, count)` pairs, e.g. a frequency file.
    /// Repeated tokens are summed; zero counts are dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();

        for (token, count) in pairs {
            if count == 0 {
                continue;
            }
            match index.get(&token) {
                Some(&i) => entries[i].1 = entries[i].1.saturating_add(count),
                None => {
                    index.insert(token.clone(), entries.len());
                    entries.push((token, count));
                }
            }
        }

        Self::sorted(entries)
    }

    fn sorted(mut entries: Vec<(String, u64)>) -> Self {
        // Stable sort keeps first-seen order among equal counts.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts. Equals the length of the counted token stream;
    /// saturates for loaded tables with huge counts.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, c)| acc.saturating_add(*c))
    }

    /// Highest count in the table (0 when empty).
    pub fn max_count(&self) -> u64 {
        self.entries.first().map(|(_, c)| *c).unwrap_or(0)
    }

    /// Count for a single token.
    pub fn get(&self, token: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, c)| *c)
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> &[(String, u64)] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// A copy without the excluded tokens. Order is preserved.
    pub fn without(&self, excluded: &HashSet<String>) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(t, _)| !excluded.contains(t))
                .cloned()
                .collect(),
        }
    }
}
