//! Category grouping for feed items.
//!
//! Feeds label items with free-form categories ("Premier League",
//! "Elections 2024", ...). The mapper folds them into a small fixed set of
//! groups used by the front end.

/// Category groups and the keywords that select them.
const GROUPS: &[(&str, &[&str])] = &[
    (
        "Sports",
        &[
            "sports", "sport", "football", "soccer", "basketball", "rugby", "cricket", "tennis",
            "athletics", "olympics",
        ],
    ),
    (
        "Politics",
        &[
            "politics", "political", "government", "parliament", "election", "minister",
            "president", "democracy",
        ],
    ),
    (
        "Business",
        &[
            "business", "economy", "finance", "financial", "trade", "market", "stock",
            "investment", "banking",
        ],
    ),
    (
        "Technology",
        &[
            "technology",
            "tech",
            "digital",
            "software",
            "hardware",
            "ai",
            "artificial intelligence",
            "computing",
        ],
    ),
    (
        "Entertainment",
        &[
            "entertainment", "celebrity", "movie", "film", "music", "television", "tv", "show",
            "arts", "culture",
        ],
    ),
    (
        "Health",
        &[
            "health", "medical", "medicine", "healthcare", "wellness", "fitness", "hospital",
            "doctor",
        ],
    ),
    (
        "Education",
        &[
            "education", "school", "university", "college", "student", "learning", "academic",
            "teaching",
        ],
    ),
];

/// Map one label to every group it matches, in table order.
///
/// Matching is case-insensitive on the trimmed label, and a keyword matches
/// when either string contains the other.
pub fn map_category(label: &str) -> Vec<&'static str> {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return Vec::new();
    }

    GROUPS
        .iter()
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| label.contains(keyword) || keyword.contains(label.as_str()))
        })
        .map(|(group, _)| *group)
        .collect()
}

/// Map item labels to unique group names, in order of first match.
///
/// Labels that match no group are dropped.
pub fn map_categories<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for group in labels.iter().flat_map(|label| map_category(label.as_ref())) {
        if !groups.iter().any(|g| g == group) {
            groups.push(group.to_string());
        }
    }
    groups
}
