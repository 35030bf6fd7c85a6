pub mod table;

pub use table::{Category, KeywordTable};

use serde::Serialize;

/// Label returned when no keyword matched at all
pub const UNKNOWN: &str = "Unknown";

/// Total keyword hits for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryScore<'a> {
    pub category: &'a str,
    pub score: usize,
}

/// Count keyword occurrences per category, in table order.
///
/// Matching is plain substring counting on the lowercased text, so
/// "goalie" also counts for "goal".
pub fn score<'a>(text: &str, table: &'a KeywordTable) -> Vec<CategoryScore<'a>> {
    let text_lower = text.to_lowercase();

    table
        .categories()
        .iter()
        .map(|category| CategoryScore {
            category: category.name.as_str(),
            score: category
                .keywords
                .iter()
                .map(|keyword| text_lower.matches(keyword.as_str()).count())
                .sum(),
        })
        .collect()
}

/// Pick the highest score; the first category wins a tie.
/// Returns [`UNKNOWN`] when nothing scored.
pub fn best<'a>(scores: &[CategoryScore<'a>]) -> &'a str {
    let mut winner: Option<&CategoryScore<'a>> = None;
    for candidate in scores {
        if winner.map_or(true, |w| candidate.score > w.score) {
            winner = Some(candidate);
        }
    }

    match winner {
        Some(w) if w.score > 0 => w.category,
        _ => UNKNOWN,
    }
}

/// Classify text against a keyword table
pub fn classify<'a>(text: &str, table: &'a KeywordTable) -> &'a str {
    best(&score(text, table))
}
