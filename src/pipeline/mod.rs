// Pipelines: the end-to-end runs behind each subcommand.
//
// `TokenPipeline` is the shared core: fragments in, filtered and grouped
// tokens out. The run modules wire a document source to it and hand the
// result to a sink (word cloud, CSV, topic report).

pub mod cloud;
pub mod frequencies;
pub mod topics;

use tracing::debug;

use crate::document::Fragment;
use crate::text::filters::FilterSet;
use crate::text::frequency::FrequencyTable;
use crate::text::groups::GroupList;
use crate::text::normalize::Normalizer;
use crate::text::stopwords::StopList;

/// Fragment filter → normalizer → filter remover → grouping → stopwords.
pub struct TokenPipeline<'a> {
    pub normalizer: Normalizer,
    pub filters: &'a FilterSet,
    pub groups: &'a GroupList,
    pub stoplist: &'a StopList,
}

impl<'a> TokenPipeline<'a> {
    pub fn new(filters: &'a FilterSet, groups: &'a GroupList, stoplist: &'a StopList) -> Self {
        Self {
            normalizer: Normalizer::default(),
            filters,
            groups,
            stoplist,
        }
    }

    /// Normalized words with rejected fragments and filtered words removed.
    /// This is what the saved-text cache stores.
    pub fn words(&self, fragments: &[Fragment]) -> Vec<String> {
        self.collect_words(fragments, true)
    }

    /// Words read back from the saved-text cache. Fragment rejection already
    /// ran before they were saved, and each cached word is its own fragment,
    /// so line-anchored patterns would wrongly match single words. Only the
    /// token-level filters apply.
    pub fn cached_words(&self, fragments: &[Fragment]) -> Vec<String> {
        self.collect_words(fragments, false)
    }

    fn collect_words(&self, fragments: &[Fragment], reject_fragments: bool) -> Vec<String> {
        let mut words = Vec::new();
        let mut rejected = 0usize;
        for fragment in fragments {
            if reject_fragments && self.filters.rejects_fragment(&fragment.text) {
                rejected += 1;
                continue;
            }
            words.extend(self.normalizer.words(&fragment.text));
        }
        let words = self.filters.remove_from(words);
        debug!(
            fragments = fragments.len(),
            rejected,
            words = words.len(),
            "Normalized fragments"
        );
        words
    }

    /// Group phrases, then drop stopwords. Filters are applied again so a
    /// filtered phrase can't come back as a compound token.
    pub fn tokens_from_words(&self, words: &[String]) -> Vec<String> {
        let tokens = self.stoplist.remove_from(self.groups.merge(words));
        self.filters.remove_from(tokens)
    }

    /// The full token stream for a set of fragments.
    pub fn tokens(&self, fragments: &[Fragment]) -> Vec<String> {
        self.tokens_from_words(&self.words(fragments))
    }

    pub fn frequencies(&self, fragments: &[Fragment]) -> FrequencyTable {
        FrequencyTable::from_tokens(&self.tokens(fragments))
    }
}

/// How a run ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// The document yielded no text, or nothing survived normalization
    EmptyExtraction,
    /// Nothing left to count after filters and stopwords
    EmptyFrequencies,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        *self == RunOutcome::Success
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::EmptyExtraction | RunOutcome::EmptyFrequencies => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::filters::FilterMode;

    fn frags(texts: &[&str]) -> Vec<Fragment> {
        texts.iter().map(|t| Fragment::new(1, *t)).collect()
    }

    #[test]
    fn test_fragment_filter_runs_before_normalization() {
        let filters = FilterSet::from_lines([r"^página \d+$"], FilterMode::Regex).unwrap();
        let groups = GroupList::new();
        let stop = StopList::empty();
        let pipeline = TokenPipeline::new(&filters, &groups, &stop);

        let words = pipeline.words(&frags(&["Página 3", "La paz, hoy."]));
        assert_eq!(words, vec!["la", "paz", "hoy"]);
    }

    #[test]
    fn test_grouping_happens_before_stopwords() {
        let filters = FilterSet::empty();
        let groups = GroupList::from_lines(["acuerdo de paz"]);
        let stop = StopList::from_words(["de", "el"]);
        let pipeline = TokenPipeline::new(&filters, &groups, &stop);

        let tokens = pipeline.tokens(&frags(&["El acuerdo de paz", "de la paz"]));
        assert_eq!(tokens, vec!["acuerdo de paz", "la", "paz"]);
    }

    #[test]
    fn test_filtered_phrase_never_counted() {
        let filters = FilterSet::from_lines(["hola mundo"], FilterMode::Exact).unwrap();
        let groups = GroupList::from_lines(["hola mundo"]);
        let stop = StopList::empty();
        let pipeline = TokenPipeline::new(&filters, &groups, &stop);

        let table = pipeline.frequencies(&frags(&["Dijo hola mundo", "hola"]));
        assert_eq!(table.get("hola mundo"), None);
        assert_eq!(table.get("hola"), Some(1));
        assert_eq!(table.get("dijo"), Some(1));
    }

    #[test]
    fn test_cached_words_skip_fragment_rejection() {
        let filters = FilterSet::from_lines([r"^paz$"], FilterMode::Regex).unwrap();
        let groups = GroupList::new();
        let stop = StopList::empty();
        let pipeline = TokenPipeline::new(&filters, &groups, &stop);

        let direct = pipeline.words(&frags(&["la paz llega", "paz"]));
        assert_eq!(direct, vec!["la", "paz", "llega"]);

        // Each cached word comes back as its own fragment.
        let cached: Vec<Fragment> = direct.iter().map(|w| Fragment::new(0, w.as_str())).collect();
        assert_eq!(pipeline.cached_words(&cached), direct);
    }

    #[test]
    fn test_cached_words_still_drop_filtered_tokens() {
        let filters = FilterSet::from_lines(["llega"], FilterMode::Exact).unwrap();
        let groups = GroupList::new();
        let stop = StopList::empty();
        let pipeline = TokenPipeline::new(&filters, &groups, &stop);

        let cached = frags(&["la", "paz", "llega"]);
        assert_eq!(pipeline.cached_words(&cached), vec!["la", "paz"]);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunOutcome::Success.exit_code(), 0);
        assert_eq!(RunOutcome::EmptyExtraction.exit_code(), 1);
        assert_eq!(RunOutcome::EmptyFrequencies.exit_code(), 1);
    }
}
