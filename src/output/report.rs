//! Batch report assembly and ranking

use crate::analysis::analyzer::{DocumentAnalysis, KeywordCount};
use crate::config::KeywordConfig;
use serde::{Deserialize, Serialize};

/// Result of analyzing one document in a batch. A document that fails
/// extraction or analysis surfaces as a labeled failure entry; it never
/// aborts its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Analyzed(DocumentAnalysis),
    Failed { file: String, error: String },
}

/// A batch of document outcomes plus generation metadata. Records are
/// kept in input order; the ranking views below provide the presentation
/// orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub version: String,
    pub keyword_count: usize,
    pub priority_count: usize,
    pub factor: f64,
    pub documents: usize,
}

impl BatchReport {
    pub fn new(outcomes: Vec<DocumentOutcome>, config: &KeywordConfig) -> Self {
        let metadata = ReportMetadata {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            keyword_count: config.keywords.len(),
            priority_count: config.priority.len(),
            factor: config.factor,
            documents: outcomes.len(),
        };

        Self { outcomes, metadata }
    }

    /// Analyzed records sorted by score, best first. The sort is stable,
    /// so equal scores keep their input order.
    pub fn ranked(&self) -> Vec<&DocumentAnalysis> {
        let mut analyses: Vec<&DocumentAnalysis> = self
            .outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                DocumentOutcome::Analyzed(analysis) => Some(analysis),
                DocumentOutcome::Failed { .. } => None,
            })
            .collect();

        analyses.sort_by(|a, b| b.score.total_cmp(&a.score));
        analyses
    }

    /// Documents that could not be analyzed, as (file, error) pairs.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                DocumentOutcome::Failed { file, error } => {
                    Some((file.as_str(), error.as_str()))
                }
                DocumentOutcome::Analyzed(_) => None,
            })
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| matches!(outcome, DocumentOutcome::Failed { .. }))
    }
}

/// Per-keyword breakdown sorted by count, highest first. Stable, so equal
/// counts keep the keyword-list order.
pub fn ranked_counts(analysis: &DocumentAnalysis) -> Vec<&KeywordCount> {
    let mut counts: Vec<&KeywordCount> = analysis.counts.iter().collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(file: &str, score: f64) -> DocumentAnalysis {
        DocumentAnalysis {
            file: file.to_string(),
            counts: Vec::new(),
            total: 0,
            ratio: 0.0,
            weighted: 0.0,
            unique: 0,
            score,
        }
    }

    fn config() -> KeywordConfig {
        KeywordConfig::new(vec!["sql".to_string()], vec![], 2.0).unwrap()
    }

    #[test]
    fn test_ranked_sorts_by_score_descending() {
        let report = BatchReport::new(
            vec![
                DocumentOutcome::Analyzed(analysis("low.pdf", 10.0)),
                DocumentOutcome::Analyzed(analysis("high.pdf", 412.0)),
                DocumentOutcome::Analyzed(analysis("mid.pdf", 60.0)),
            ],
            &config(),
        );

        let files: Vec<&str> = report.ranked().iter().map(|a| a.file.as_str()).collect();
        assert_eq!(files, vec!["high.pdf", "mid.pdf", "low.pdf"]);
    }

    #[test]
    fn test_ranked_is_stable_for_equal_scores() {
        let report = BatchReport::new(
            vec![
                DocumentOutcome::Analyzed(analysis("first.pdf", 50.0)),
                DocumentOutcome::Analyzed(analysis("second.pdf", 50.0)),
            ],
            &config(),
        );

        let files: Vec<&str> = report.ranked().iter().map(|a| a.file.as_str()).collect();
        assert_eq!(files, vec!["first.pdf", "second.pdf"]);
    }

    #[test]
    fn test_failures_do_not_hide_analyzed_documents() {
        let report = BatchReport::new(
            vec![
                DocumentOutcome::Failed {
                    file: "broken.pdf".to_string(),
                    error: "PDF extraction error".to_string(),
                },
                DocumentOutcome::Analyzed(analysis("good.pdf", 12.0)),
            ],
            &config(),
        );

        assert!(report.has_failures());
        assert_eq!(report.ranked().len(), 1);
        assert_eq!(report.failures(), vec![("broken.pdf", "PDF extraction error")]);
        assert_eq!(report.metadata.documents, 2);
    }

    #[test]
    fn test_ranked_counts_descending_stable() {
        let mut record = analysis("doc.pdf", 0.0);
        record.counts = vec![
            KeywordCount { keyword: "python".to_string(), count: 1, frequency: 0.25 },
            KeywordCount { keyword: "sql".to_string(), count: 2, frequency: 0.5 },
            KeywordCount { keyword: "data".to_string(), count: 1, frequency: 0.25 },
            KeywordCount { keyword: "java".to_string(), count: 0, frequency: 0.0 },
        ];

        let ordered: Vec<&str> = ranked_counts(&record)
            .iter()
            .map(|c| c.keyword.as_str())
            .collect();
        assert_eq!(ordered, vec!["sql", "python", "data", "java"]);
    }
}
