// Stopword table: the read-only reference dataset for a language.
//
// Built once at startup from the `stop-words` crate and passed explicitly
// to every stage that needs it.

use std::collections::HashSet;

use anyhow::Result;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::filters::FilterSet;

/// Names accepted for the stopword language setting.
pub const LANGUAGES: &[&str] = &[
    "spanish",
    "english",
    "french",
    "german",
    "italian",
    "portuguese",
    "dutch",
    "russian",
];

fn language_for(name: &str) -> Option<LANGUAGE> {
    match name {
        "spanish" => Some(LANGUAGE::Spanish),
        "english" => Some(LANGUAGE::English),
        "french" => Some(LANGUAGE::French),
        "german" => Some(LANGUAGE::German),
        "italian" => Some(LANGUAGE::Italian),
        "portuguese" => Some(LANGUAGE::Portuguese),
        "dutch" => Some(LANGUAGE::Dutch),
        "russian" => Some(LANGUAGE::Russian),
        _ => None,
    }
}

/// Immutable set of stopwords for one language.
#[derive(Debug, Clone, Default)]
pub struct StopList {
    language: String,
    words: HashSet<String>,
}

impl StopList {
    /// Load the bundled list for `language` ("spanish", "english", ...).
    /// "none" yields an empty list.
    pub fn for_language(language: &str) -> Result<Self> {
        let name = language.trim().to_lowercase();
        if name == "none" {
            return Ok(Self::empty());
        }

        let Some(lang) = language_for(&name) else {
            anyhow::bail!(
                "Unsupported stopword language '{language}'. Known: {}, none",
                LANGUAGES.join(", ")
            );
        };

        let words: HashSet<String> = get(lang)
            .into_iter()
            .map(|w| w.to_string().to_lowercase())
            .collect();
        debug!(language = %name, words = words.len(), "Loaded stopwords");

        Ok(Self {
            language: name,
            words,
        })
    }

    /// A stop list with no words.
    pub fn empty() -> Self {
        Self {
            language: "none".to_string(),
            words: HashSet::new(),
        }
    }

    /// Build from an explicit word list (lower-cased).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            language: "custom".to_string(),
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop stopwords from a token stream, keeping order.
    pub fn remove_from(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().filter(|t| !self.contains(t)).collect()
    }

    /// Stopwords unioned with the user filters: the exclusion set applied a
    /// second time at render stage.
    pub fn union(&self, filters: &FilterSet) -> HashSet<String> {
        self.words.union(filters.terms()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::filters::FilterMode;

    #[test]
    fn test_spanish_list_has_common_words() {
        let stop = StopList::for_language("Spanish").unwrap();
        assert!(!stop.is_empty());
        assert!(stop.contains("de"));
        assert!(stop.contains("la"));
        assert!(!stop.contains("paz"));
    }

    #[test]
    fn test_unknown_language_fails() {
        let err = StopList::for_language("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(StopList::for_language("none").unwrap().is_empty());
    }

    #[test]
    fn test_union_with_filters() {
        let stop = StopList::from_words(["de", "la"]);
        let filters = FilterSet::from_lines(["mundo"], FilterMode::Exact).unwrap();
        let all = stop.union(&filters);
        assert_eq!(all.len(), 3);
        assert!(all.contains("mundo"));
    }
}
