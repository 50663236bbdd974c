// Latent Dirichlet allocation fitted with collapsed Gibbs sampling.
//
// Every token in the corpus carries a topic assignment. Each sweep removes
// a token's assignment from the counts and redraws it from
//
//   p(k) ∝ (n_dk + alpha) * (n_kw + eta) / (n_k + V * eta)
//
// After the last sweep the counts give the topic-word and document-topic
// distributions. With a fixed seed the result is fully deterministic.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::matrix::DocumentTermMatrix;
use super::report::{DocumentTopics, TopicReport, TopicSummary};
use super::traits::TopicModel;

/// LDA configuration. Defaults match the settings the reports have always
/// been produced with.
#[derive(Debug, Clone)]
pub struct LdaModel {
    /// Number of topics (default 10)
    pub n_topics: usize,
    /// Gibbs sweeps over the corpus (default 1500)
    pub iterations: usize,
    /// Document-topic prior (default 0.8)
    pub alpha: f64,
    /// Topic-word prior (default 0.2)
    pub eta: f64,
    /// Random seed (default 1)
    pub seed: u64,
    /// Words listed per topic in the report (default 8)
    pub top_words: usize,
    /// Show a progress bar over sweeps
    pub show_progress: bool,
}

impl Default for LdaModel {
    fn default() -> Self {
        Self {
            n_topics: 10,
            iterations: 1500,
            alpha: 0.8,
            eta: 0.2,
            seed: 1,
            top_words: 8,
            show_progress: false,
        }
    }
}

/// Fitted distributions.
#[derive(Debug, Clone)]
pub struct LdaFit {
    /// n_topics x n_terms, rows sum to 1
    pub topic_word: Array2<f64>,
    /// n_documents x n_topics, rows sum to 1
    pub doc_topic: Array2<f64>,
}

impl LdaModel {
    fn validate(&self, matrix: &DocumentTermMatrix) -> Result<()> {
        if self.n_topics == 0 {
            anyhow::bail!("Number of topics must be positive");
        }
        if self.alpha <= 0.0 || self.eta <= 0.0 {
            anyhow::bail!(
                "LDA priors must be positive (alpha = {}, eta = {})",
                self.alpha,
                self.eta
            );
        }
        if matrix.is_empty() {
            anyhow::bail!(
                "No tokens to model across {} documents",
                matrix.n_documents()
            );
        }
        Ok(())
    }

    /// Run the sampler and return the fitted distributions.
    pub fn fit_distributions(&self, matrix: &DocumentTermMatrix) -> Result<LdaFit> {
        self.validate(matrix)?;

        let n_docs = matrix.n_documents();
        let n_terms = matrix.n_terms();
        let k = self.n_topics;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut topic_word: Array2<f64> = Array2::zeros((k, n_terms));
        let mut doc_topic: Array2<f64> = Array2::zeros((n_docs, k));
        let mut topic_totals: Array1<f64> = Array1::zeros(k);

        // One entry per token occurrence: (document, term), plus its topic.
        let mut tokens: Vec<(usize, usize)> = Vec::new();
        for ((doc, term), &count) in matrix.counts().indexed_iter() {
            for _ in 0..count {
                tokens.push((doc, term));
            }
        }
        let mut assignments: Vec<usize> = Vec::with_capacity(tokens.len());
        for &(doc, term) in &tokens {
            let topic = rng.random_range(0..k);
            assignments.push(topic);
            topic_word[[topic, term]] += 1.0;
            doc_topic[[doc, topic]] += 1.0;
            topic_totals[topic] += 1.0;
        }

        let pb = if self.show_progress {
            let pb = ProgressBar::new(self.iterations as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Sampling [{bar:30}] {pos}/{len} ({eta})")
                    .expect("valid template"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let eta_sum = self.eta * n_terms as f64;
        let mut weights = vec![0.0f64; k];

        for _ in 0..self.iterations {
            for (i, &(doc, term)) in tokens.iter().enumerate() {
                let old = assignments[i];
                topic_word[[old, term]] -= 1.0;
                doc_topic[[doc, old]] -= 1.0;
                topic_totals[old] -= 1.0;

                let mut total = 0.0;
                for (topic, weight) in weights.iter_mut().enumerate() {
                    *weight = (doc_topic[[doc, topic]] + self.alpha)
                        * (topic_word[[topic, term]] + self.eta)
                        / (topic_totals[topic] + eta_sum);
                    total += *weight;
                }

                let threshold = rng.random::<f64>() * total;
                let mut cumulative = 0.0;
                let mut new = k - 1;
                for (topic, weight) in weights.iter().enumerate() {
                    cumulative += weight;
                    if cumulative >= threshold {
                        new = topic;
                        break;
                    }
                }

                assignments[i] = new;
                topic_word[[new, term]] += 1.0;
                doc_topic[[doc, new]] += 1.0;
                topic_totals[new] += 1.0;
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        for topic in 0..k {
            let denom = topic_totals[topic] + eta_sum;
            for term in 0..n_terms {
                topic_word[[topic, term]] = (topic_word[[topic, term]] + self.eta) / denom;
            }
        }
        for doc in 0..n_docs {
            let denom = f64::from(matrix.document_length(doc)) + k as f64 * self.alpha;
            for topic in 0..k {
                doc_topic[[doc, topic]] = (doc_topic[[doc, topic]] + self.alpha) / denom;
            }
        }

        info!(
            documents = n_docs,
            terms = n_terms,
            tokens = tokens.len(),
            topics = k,
            iterations = self.iterations,
            "LDA fitted"
        );

        Ok(LdaFit {
            topic_word,
            doc_topic,
        })
    }
}

impl TopicModel for LdaModel {
    fn fit(&self, matrix: &DocumentTermMatrix) -> Result<TopicReport> {
        let fit = self.fit_distributions(matrix)?;
        let vocabulary = matrix.vocabulary();

        let topics = fit
            .topic_word
            .rows()
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
                // Stable: equal probabilities keep vocabulary order.
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
                TopicSummary {
                    index,
                    words: ranked
                        .iter()
                        .take(self.top_words)
                        .map(|(term, _)| vocabulary[*term].clone())
                        .collect(),
                }
            })
            .collect();

        let documents = fit
            .doc_topic
            .rows()
            .into_iter()
            .zip(matrix.documents())
            .map(|(row, name)| {
                let distribution: Vec<f64> = row.to_vec();
                DocumentTopics {
                    name: name.clone(),
                    top_topic: argmax(&distribution),
                    distribution,
                }
            })
            .collect();

        Ok(TopicReport { topics, documents })
    }
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> DocumentTermMatrix {
        let doc = |name: &str, words: &str| {
            (
                name.to_string(),
                words.split_whitespace().map(str::to_string).collect::<Vec<_>>(),
            )
        };
        DocumentTermMatrix::build(&[
            doc("a", "paz acuerdo paz acuerdo dialogo paz dialogo acuerdo"),
            doc("b", "acuerdo paz dialogo paz acuerdo dialogo paz"),
            doc("c", "dialogo acuerdo paz acuerdo paz dialogo"),
            doc("d", "cosecha lluvia tierra cosecha tierra lluvia cosecha"),
            doc("e", "tierra lluvia cosecha tierra cosecha lluvia"),
            doc("f", "lluvia tierra cosecha lluvia tierra cosecha tierra"),
        ])
    }

    fn small_model() -> LdaModel {
        LdaModel {
            n_topics: 2,
            iterations: 200,
            alpha: 0.1,
            eta: 0.01,
            seed: 7,
            top_words: 3,
            show_progress: false,
        }
    }

    #[test]
    fn test_distributions_are_normalized() {
        let fit = small_model().fit_distributions(&corpus()).unwrap();
        for row in fit.topic_word.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
        for row in fit.doc_topic.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_separates_disjoint_documents() {
        let report = small_model().fit(&corpus()).unwrap();
        let top: Vec<usize> = report.documents.iter().map(|d| d.top_topic).collect();
        assert_eq!(top[0], top[1]);
        assert_eq!(top[1], top[2]);
        assert_eq!(top[3], top[4]);
        assert_eq!(top[4], top[5]);
        assert_ne!(top[0], top[3]);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = small_model().fit(&corpus()).unwrap();
        let b = small_model().fit(&corpus()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_top_words_cap() {
        let report = small_model().fit(&corpus()).unwrap();
        assert_eq!(report.topics.len(), 2);
        assert!(report.topics.iter().all(|t| t.words.len() == 3));
    }

    #[test]
    fn test_rejects_bad_config_and_empty_corpus() {
        let model = LdaModel {
            n_topics: 0,
            ..small_model()
        };
        assert!(model.fit(&corpus()).is_err());

        let empty = DocumentTermMatrix::build(&[("x".to_string(), vec![])]);
        assert!(small_model().fit(&empty).is_err());
    }

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[1.0]), 0);
    }
}
