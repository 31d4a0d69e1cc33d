//! Language byte-count aggregation
//!
//! GitHub reports languages per repository as `{name: bytes}`. The card shows
//! the user's overall mix: totals summed across repositories, ranked, and cut
//! to the top few.

use std::collections::HashMap;

use crate::models::LanguageShare;

/// Bytes of code per language for one repository
pub type LanguageBytes = HashMap<String, u64>;

/// Sum language byte counts across repositories
pub fn aggregate<I>(per_repo: I) -> LanguageBytes
where
    I: IntoIterator<Item = LanguageBytes>,
{
    let mut totals = LanguageBytes::new();
    for languages in per_repo {
        for (language, bytes) in languages {
            *totals.entry(language).or_insert(0) += bytes;
        }
    }
    totals
}

/// Rank languages by total bytes and keep the top `limit`
///
/// Ties are broken by name so the result does not depend on input order.
pub fn rank(totals: LanguageBytes, limit: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = totals.into_iter().collect();
    ranked.sort_by(|(name_a, bytes_a), (name_b, bytes_b)| {
        bytes_b.cmp(bytes_a).then_with(|| name_a.cmp(name_b))
    });
    ranked.truncate(limit);
    ranked
}

/// Convert ranked totals into percentages of the ranked total
///
/// Returns an empty list when there is nothing to show.
pub fn shares(ranked: &[(String, u64)]) -> Vec<LanguageShare> {
    let total: u64 = ranked.iter().map(|(_, bytes)| bytes).sum();
    if total == 0 {
        return Vec::new();
    }

    ranked
        .iter()
        .map(|(name, bytes)| LanguageShare {
            name: name.clone(),
            bytes: *bytes,
            percent: *bytes as f64 / total as f64 * 100.0,
        })
        .collect()
}

/// Aggregate, rank and convert in one step
pub fn top_languages<I>(per_repo: I, limit: usize) -> Vec<LanguageShare>
where
    I: IntoIterator<Item = LanguageBytes>,
{
    shares(&rank(aggregate(per_repo), limit))
}

/// Display colour for a language
///
/// Known languages use their GitHub linguist colour. Others get a hue spread
/// by the golden angle from their position in the list.
pub fn language_color(name: &str, index: usize) -> String {
    let known = match name {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "C#" => "#178600",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Kotlin" => "#A97BFF",
        "Swift" => "#F05138",
        "Shell" => "#89e051",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Dart" => "#00B4AB",
        "Haskell" => "#5e5086",
        _ => "",
    };

    if known.is_empty() {
        format!("hsl({:.3}, 70%, 50%)", (index as f64 * 137.508) % 360.0)
    } else {
        known.to_string()
    }
}
