//! Keyword-based extraction of per-category search terms from a message.

use std::collections::BTreeMap;

use log::debug;

use crate::types::Category;

/// Search term per matched category, in category precedence order.
pub type QueryMap = BTreeMap<Category, String>;

/// Synonyms per category, tried in order. The first one found wins.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Jobs,
        &["job", "career", "position", "role", "work"],
    ),
    (
        Category::Events,
        &["event", "meetup", "conference", "workshop", "session"],
    ),
    (
        Category::Mentorship,
        &["mentor", "mentorship", "guidance", "coach"],
    ),
];

/// Extract a residual search term for every category mentioned in `message`.
///
/// Keywords are matched as plain substrings of the lower-cased message. The
/// term is whatever follows the first occurrence of the keyword, trimmed, so
/// a trailing keyword yields an empty term.
#[must_use]
pub fn extract_search_queries(message: &str) -> QueryMap {
    let lowered = message.to_lowercase();
    let mut queries = QueryMap::new();

    for (category, keywords) in CATEGORY_KEYWORDS {
        let hit = keywords
            .iter()
            .find_map(|keyword| lowered.find(keyword).map(|at| at + keyword.len()));

        if let Some(end) = hit {
            queries
                .entry(*category)
                .or_insert_with(|| lowered[end..].trim().to_string());
        }
    }

    debug!("Extracted search queries: {queries:?}");
    queries
}
