//! Keyword counting and scoring

use crate::analysis::document::Document;
use crate::config::KeywordConfig;
use serde::{Deserialize, Serialize};

/// Occurrence count for one keyword, in keyword-list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
    /// Count divided by the document's word count.
    pub frequency: f64,
}

/// The full analysis record for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub file: String,
    pub counts: Vec<KeywordCount>,
    pub total: usize,
    /// Total keyword occurrences divided by word count, a density metric.
    pub ratio: f64,
    /// Occurrence sum with priority-keyword counts multiplied by the factor.
    pub weighted: f64,
    /// Number of keywords that occur at least once.
    pub unique: usize,
    /// Composite ranking metric: 2 * unique + weighted + floor(400 * ratio).
    pub score: f64,
}

/// Stateless keyword analyzer. Holds the keyword configuration and maps
/// each document to its analysis record; identical inputs always produce
/// identical records.
pub struct KeywordAnalyzer {
    config: KeywordConfig,
}

impl KeywordAnalyzer {
    pub fn new(config: KeywordConfig) -> Self {
        Self { config }
    }

    /// Count every keyword in the document and derive the aggregate
    /// fields. Matching is a non-overlapping left-to-right substring scan
    /// of the lowercased keyword against the (already lowercased) content;
    /// the keyword's own case is preserved in the output label.
    ///
    /// A document with zero words gets ratio and frequencies of 0.0
    /// instead of a division fault.
    pub fn analyze(&self, document: &Document) -> DocumentAnalysis {
        let words = document.metadata.word_count;

        let mut counts = Vec::with_capacity(self.config.keywords.len());
        let mut total = 0usize;
        let mut weighted = 0f64;
        let mut unique = 0usize;

        for keyword in &self.config.keywords {
            let needle = keyword.to_lowercase();
            let count = document.content.matches(needle.as_str()).count();

            counts.push(KeywordCount {
                keyword: keyword.clone(),
                count,
                frequency: fraction(count, words),
            });

            total += count;
            weighted += if self.config.priority.contains(keyword) {
                self.config.factor * count as f64
            } else {
                count as f64
            };
            if count > 0 {
                unique += 1;
            }
        }

        let ratio = fraction(total, words);
        let score = 2.0 * unique as f64 + weighted + (400.0 * ratio).floor();

        DocumentAnalysis {
            file: document.file_name.clone(),
            counts,
            total,
            ratio,
            weighted,
            unique,
            score,
        }
    }
}

fn fraction(count: usize, words: usize) -> f64 {
    if words == 0 {
        0.0
    } else {
        count as f64 / words as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(keywords: &[&str], priority: &[&str], factor: f64) -> KeywordAnalyzer {
        let config = KeywordConfig::new(
            keywords.iter().map(|s| s.to_string()).collect(),
            priority.iter().map(|s| s.to_string()).collect(),
            factor,
        )
        .unwrap();
        KeywordAnalyzer::new(config)
    }

    fn doc(text: &str) -> Document {
        Document::new(text.to_string(), "test.txt".to_string())
    }

    #[test]
    fn test_end_to_end_example() {
        let analyzer = analyzer(&["python", "sql", "data", "java"], &["sql"], 2.0);
        let analysis = analyzer.analyze(&doc("python sql sql data"));

        let counts: Vec<usize> = analysis.counts.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 2, 1, 0]);
        assert_eq!(analysis.total, 4);
        assert_eq!(analysis.weighted, 6.0);
        assert_eq!(analysis.ratio, 1.0);
        assert_eq!(analysis.unique, 3);
        // 2 * 3 + 6 + floor(400 * 1.0)
        assert_eq!(analysis.score, 412.0);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let lower = analyzer(&["data"], &[], 1.0);
        let analysis = lower.analyze(&doc("Data Science"));
        assert_eq!(analysis.counts[0].count, 1);
        // The label keeps the keyword's own case
        assert_eq!(analysis.counts[0].keyword, "data");

        let upper = analyzer(&["DATA"], &[], 1.0);
        let analysis = upper.analyze(&doc("data science"));
        assert_eq!(analysis.counts[0].count, 1);
        assert_eq!(analysis.counts[0].keyword, "DATA");
    }

    #[test]
    fn test_non_overlapping_count() {
        let analyzer = analyzer(&["aa"], &[], 1.0);
        let analysis = analyzer.analyze(&doc("aaaa"));
        assert_eq!(analysis.counts[0].count, 2);
    }

    #[test]
    fn test_empty_document_scores_zero() {
        let analyzer = analyzer(&["data"], &[], 1.0);
        let analysis = analyzer.analyze(&doc(""));
        assert_eq!(analysis.counts[0].count, 0);
        assert_eq!(analysis.total, 0);
        assert_eq!(analysis.ratio, 0.0);
        assert_eq!(analysis.counts[0].frequency, 0.0);
        assert_eq!(analysis.score, 0.0);
    }

    #[test]
    fn test_weighted_sum_formula() {
        let analyzer = analyzer(&["spark", "kafka", "etl"], &["kafka", "etl"], 3.0);
        let analysis = analyzer.analyze(&doc("spark kafka kafka etl"));
        // 1 + 3 * 2 + 3 * 1
        assert_eq!(analysis.weighted, 10.0);
    }

    #[test]
    fn test_fractional_factor_applied_literally() {
        let analyzer = analyzer(&["sql"], &["sql"], 0.5);
        let analysis = analyzer.analyze(&doc("sql sql sql"));
        assert_eq!(analysis.weighted, 1.5);
        // word_count 3, total 3, ratio 1.0
        assert_eq!(analysis.score, 2.0 + 1.5 + 400.0);
    }

    #[test]
    fn test_negative_factor_applied_literally() {
        let analyzer = analyzer(&["sql"], &["sql"], -1.0);
        let analysis = analyzer.analyze(&doc("sql"));
        assert_eq!(analysis.weighted, -1.0);
    }

    #[test]
    fn test_priority_entries_outside_keywords_have_no_effect() {
        let with_stray = analyzer(&["sql"], &["sql", "cobol"], 2.0);
        let without = analyzer(&["sql"], &["sql"], 2.0);
        let text = doc("sql and more sql");
        assert_eq!(with_stray.analyze(&text), without.analyze(&text));
    }

    #[test]
    fn test_duplicate_keywords_counted_independently() {
        let analyzer = analyzer(&["sql", "sql"], &[], 1.0);
        let analysis = analyzer.analyze(&doc("sql"));
        assert_eq!(analysis.total, 2);
        assert_eq!(analysis.unique, 2);
    }

    #[test]
    fn test_empty_keyword_is_degenerate_boundary_match() {
        let analyzer = analyzer(&[""], &[], 1.0);
        let analysis = analyzer.analyze(&doc("abc"));
        // Empty pattern matches at every char boundary
        assert_eq!(analysis.counts[0].count, 4);
    }

    #[test]
    fn test_substring_keywords_count_within_words() {
        let analyzer = analyzer(&["analy"], &[], 1.0);
        let analysis = analyzer.analyze(&doc("analyst analysis analytical"));
        assert_eq!(analysis.counts[0].count, 3);
    }

    #[test]
    fn test_idempotent() {
        let analyzer = analyzer(&["python", "sql"], &["sql"], 2.0);
        let text = doc("python sql notebooks");
        assert_eq!(analyzer.analyze(&text), analyzer.analyze(&text));
    }

    #[test]
    fn test_counts_preserve_keyword_order() {
        let analyzer = analyzer(&["c", "b", "a"], &[], 1.0);
        let analysis = analyzer.analyze(&doc("a b c"));
        let labels: Vec<&str> = analysis.counts.iter().map(|c| c.keyword.as_str()).collect();
        assert_eq!(labels, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_ratio_uses_space_tokenization() {
        // "sql\tsql" is one space-delimited token, so ratio is 2 / 1
        let analyzer = analyzer(&["sql"], &[], 1.0);
        let analysis = analyzer.analyze(&doc("sql\tsql"));
        assert_eq!(analysis.total, 2);
        assert_eq!(analysis.ratio, 2.0);
    }
}
