// Topic report: what the topic model found, in text and JSON form.
//
// The text layout is the one downstream readers already parse:
//
//   Topic0:word word word
//   informe.txt (topic %: [0.0123 0.9000 ...])
//    (top topic: 1)

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Top words and per-document topic mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicReport {
    pub topics: Vec<TopicSummary>,
    pub documents: Vec<DocumentTopics>,
}

/// One topic's most probable words, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub index: usize,
    pub words: Vec<String>,
}

/// Topic distribution for one input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTopics {
    pub name: String,
    /// Probability of each topic, indexed by topic; sums to 1
    pub distribution: Vec<f64>,
    pub top_topic: usize,
}

impl TopicReport {
    /// Render the plain-text report.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for topic in &self.topics {
            out.push_str(&format!("Topic{}:{}\n", topic.index, topic.words.join(" ")));
        }
        for doc in &self.documents {
            let dist: Vec<String> = doc.distribution.iter().map(|p| format!("{p:.4}")).collect();
            out.push_str(&format!("{} (topic %: [{}])\n", doc.name, dist.join(" ")));
            out.push_str(&format!(" (top topic: {})\n", doc.top_topic));
        }
        out
    }

    pub fn write_text(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text())
            .with_context(|| format!("Failed to write topic report {}", path.display()))?;
        info!(path = %path.display(), topics = self.topics.len(), "Topic report written");
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write JSON report {}", path.display()))?;
        info!(path = %path.display(), "JSON topic report written");
        Ok(())
    }
}
