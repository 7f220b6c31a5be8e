//! Part matching implementation.
//!
//! - Exact part-number matching after masking (`brk-0042` finds `BRK0042`)
//! - Fuzzy name matching using substring and Levenshtein similarity
//! - Confidence scoring (0-100 scale, 100 reserved for exact part numbers)

use crate::formatter::part_number::format_part_number;
use crate::models::InventoryPart;
use serde::Serialize;

/// Highest score a name match can reach.
const MAX_NAME_SCORE: u8 = 95;

/// A part and its confidence score.
#[derive(Debug, Clone, Serialize)]
pub struct PartMatch {
    pub part: InventoryPart,

    /// Confidence score (0-100, where 100 is an exact part number)
    pub confidence: u8,

    pub match_type: MatchType,
}

/// How a part was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactPartNumber,
    FuzzyName,
}

/// Scores inventory parts against a free-text query.
#[derive(Debug, Clone, Default)]
pub struct PartMatcher;

impl PartMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Rank `parts` against `query`.
    ///
    /// Returns at most `max_results` matches scoring at least
    /// `min_confidence`, best first, ties broken by part number.
    pub fn find_matches(
        &self,
        query: &str,
        parts: &[InventoryPart],
        max_results: usize,
        min_confidence: u8,
    ) -> Vec<PartMatch> {
        let masked = format_part_number(query).formatted_value;
        let name_query = Self::normalize_name(query);

        let mut results: Vec<PartMatch> = parts
            .iter()
            .filter_map(|part| {
                if !masked.is_empty() && part.part_number == masked {
                    return Some(PartMatch {
                        part: part.clone(),
                        confidence: 100,
                        match_type: MatchType::ExactPartNumber,
                    });
                }

                let confidence =
                    Self::calculate_fuzzy_score(&name_query, &Self::normalize_name(&part.name));
                (confidence > 0 && confidence >= min_confidence).then(|| PartMatch {
                    part: part.clone(),
                    confidence,
                    match_type: MatchType::FuzzyName,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.confidence
                .cmp(&a.confidence)
                .then_with(|| a.part.part_number.cmp(&b.part.part_number))
        });
        results.truncate(max_results);

        results
    }

    /// Similarity of two normalized names, 0 to [`MAX_NAME_SCORE`].
    fn calculate_fuzzy_score(query: &str, target: &str) -> u8 {
        if query.is_empty() || target.is_empty() {
            return 0;
        }

        if query == target {
            return MAX_NAME_SCORE;
        }

        // "pad" in "brake pad set": longer overlap scores higher, 10-90
        if target.contains(query) {
            let ratio = query.chars().count() as f64 / target.chars().count() as f64;
            return (80.0 * ratio + 10.0) as u8;
        }

        if query.contains(target) {
            return 80;
        }

        let distance = Self::levenshtein_distance(query, target);
        let max_len = query.chars().count().max(target.chars().count());
        let difference = distance as f64 / max_len as f64;

        if difference > 0.5 {
            return 0;
        }

        ((1.0 - difference) * 80.0) as u8
    }

    /// Edit distance using a single rolling row.
    fn levenshtein_distance(a: &str, b: &str) -> usize {
        let b: Vec<char> = b.chars().collect();
        let mut row: Vec<usize> = (0..=b.len()).collect();

        for (i, ca) in a.chars().enumerate() {
            let mut diagonal = row[0];
            row[0] = i + 1;

            for (j, cb) in b.iter().enumerate() {
                let substitution = diagonal + usize::from(ca != *cb);
                diagonal = row[j + 1];
                row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
            }
        }

        row[b.len()]
    }

    /// Lowercase with single spaces.
    pub fn normalize_name(name: &str) -> String {
        name.split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
