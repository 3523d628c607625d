//! Document structures for keyword analysis

use serde::{Deserialize, Serialize};

/// A document prepared for analysis: lowercased full text plus basic
/// metadata. The content is treated as an opaque string from here on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub file_name: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub word_count: usize,
    pub character_count: usize,
    pub page_count: Option<usize>,
}

impl Document {
    /// Build a document from already-extracted text. The content is
    /// lowercased here so keyword matching is case-insensitive.
    pub fn new(content: String, file_name: String) -> Self {
        let content = content.to_lowercase();
        let metadata = DocumentMetadata {
            word_count: word_count(&content),
            character_count: content.chars().count(),
            page_count: None,
        };

        Self {
            content,
            file_name,
            metadata,
        }
    }

    /// Build a document from a sequence of page strings, joined with a
    /// blank-line separator before lowercasing.
    pub fn from_pages(pages: &[String], file_name: String) -> Self {
        let pages_len = pages.len();
        let mut document = Self::new(pages.join("\n\n"), file_name);
        document.metadata.page_count = Some(pages_len);
        document
    }
}

/// Number of single-space-delimited tokens in the text.
///
/// This deliberately splits on the space character only: tabs and
/// newlines do not delimit words, and runs of spaces produce empty
/// tokens that still count. Keyword density scores computed against this
/// tokenization stay comparable across tool versions. Empty text counts
/// zero words.
pub fn word_count(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.split(' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lowercases_content() {
        let doc = Document::new("Data Science with SQL".to_string(), "cv.pdf".to_string());
        assert_eq!(doc.content, "data science with sql");
        assert_eq!(doc.file_name, "cv.pdf");
    }

    #[test]
    fn test_from_pages_joins_with_blank_line() {
        let pages = vec!["Page One".to_string(), "Page Two".to_string()];
        let doc = Document::from_pages(&pages, "two-pager.pdf".to_string());
        assert_eq!(doc.content, "page one\n\npage two");
        assert_eq!(doc.metadata.page_count, Some(2));
    }

    #[test]
    fn test_word_count_splits_on_single_space_only() {
        assert_eq!(word_count("python sql data"), 3);
        // Double space yields an empty token that still counts
        assert_eq!(word_count("python  sql"), 3);
        // Tabs and newlines do not delimit words
        assert_eq!(word_count("python\tsql\ndata"), 1);
        assert_eq!(word_count("one two\nthree four"), 3);
    }

    #[test]
    fn test_word_count_empty_text_is_zero() {
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_metadata_counts() {
        let doc = Document::new("ab cd".to_string(), "x.txt".to_string());
        assert_eq!(doc.metadata.word_count, 2);
        assert_eq!(doc.metadata.character_count, 5);
        assert_eq!(doc.metadata.page_count, None);
    }
}
