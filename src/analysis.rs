use crate::classifier::{self, KeywordTable};
use crate::error::ExtractionError;
use crate::extractor;
use crate::models::UploadedDocument;
use log::info;
use serde::Serialize;

/// Outcome of classifying one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub label: String,
    /// Per-category keyword hits in table order
    pub scores: Vec<ScoreEntry>,
    /// Blake3 hash of the document content
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub category: String,
    pub score: usize,
}

impl Classification {
    /// Score already-extracted text
    pub fn from_text(text: &str, table: &KeywordTable, hash: String) -> Self {
        let scores = classifier::score(text, table);
        let label = classifier::best(&scores).to_string();
        Self {
            label,
            scores: scores
                .into_iter()
                .map(|s| ScoreEntry {
                    category: s.category.to_string(),
                    score: s.score,
                })
                .collect(),
            hash,
        }
    }
}

/// Extract then classify an accepted upload
pub fn analyze(document: &UploadedDocument, table: &KeywordTable) -> Result<Classification, ExtractionError> {
    let text = extractor::extract(&document.content, document.format)?;
    let classification = Classification::from_text(&text, table, document.hash.clone());
    info!(
        "classified {} ({}, {}) as {}",
        document.filename, document.format, document.hash, classification.label
    );
    Ok(classification)
}
