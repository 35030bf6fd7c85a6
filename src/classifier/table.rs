use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One sport and the substrings that vote for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered, immutable mapping from category to keywords.
///
/// Order matters: it is the scoring order and the tie-break order.
/// Keywords are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    categories: Vec<Category>,
}

impl KeywordTable {
    /// Build a table, lowercasing keywords.
    ///
    /// Rejects blank category names, duplicate names and empty keywords
    /// (an empty pattern would match between every character).
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(categories.len());

        for category in categories {
            let name = category.name.trim().to_string();
            if name.is_empty() {
                return Err(Error::Config("category name must not be empty".to_string()));
            }
            if !seen.insert(name.clone()) {
                return Err(Error::Config(format!("duplicate category '{}'", name)));
            }

            let mut keywords = Vec::with_capacity(category.keywords.len());
            for keyword in category.keywords {
                if keyword.is_empty() {
                    return Err(Error::Config(format!(
                        "category '{}' has an empty keyword",
                        name
                    )));
                }
                keywords.push(keyword.to_lowercase());
            }

            normalized.push(Category { name, keywords });
        }

        Ok(Self {
            categories: normalized,
        })
    }

    /// The built-in sports table
    pub fn reference() -> Self {
        Self {
            categories: default_categories(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Categories of the built-in table, in definition order
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "Football",
            &["football", "fifa", "goal", "kick", "soccer", "messi", "ronaldo"],
        ),
        Category::new(
            "Cricket",
            &["cricket", "bat", "ball", "wicket", "bowler", "batsman", "dhoni", "kohli"],
        ),
        Category::new(
            "Basketball",
            &["basketball", "nba", "hoop", "dribble", "slam dunk", "lebron", "curry"],
        ),
        Category::new(
            "Tennis",
            &["tennis", "grand slam", "wimbledon", "federer", "nadal", "djokovic", "serve"],
        ),
        Category::new(
            "Hockey",
            &["hockey", "stick", "puck", "ice", "nhl", "goalie", "rink"],
        ),
    ]
}
