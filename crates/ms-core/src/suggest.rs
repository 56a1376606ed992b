//! String-similarity collaborator: duplicate detection and autocompletion.
//!
//! Everything here is advisory. The engine calls into this module after
//! building a candidate measurement but before committing it; findings are
//! surfaced to the analyst, never used to block an edit.

use crate::measurement::Measurement;
use crate::types::Therblig;

/// Minimum similarity for an element-name autocompletion hit.
const SUGGESTION_THRESHOLD: f64 = 0.3;

/// Similarity above which two names are considered the same element.
pub const DUPLICATE_SIMILARITY: f64 = 0.9;

/// Durations within this window (seconds) count as matching for duplicates.
pub const DUPLICATE_DURATION_WINDOW: f64 = 0.5;

/// Levenshtein edit distance between two strings, by character.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row formulation; prev tracks the diagonal.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j] + 1).min(row[j + 1] + 1).min(prev + cost);
            prev = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}

/// Similarity ratio in `[0, 1]`, case-insensitive. Two empty strings are
/// identical (1.0).
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "name lengths are tiny")]
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a.to_lowercase(), &b.to_lowercase());
    1.0 - distance as f64 / max_len as f64
}

/// Element-name completions from history, best match first.
///
/// Inputs shorter than two characters return nothing; matches below 30%
/// similarity are dropped.
#[must_use]
pub fn element_name_suggestions(
    input: &str,
    history: &[Measurement],
    limit: usize,
) -> Vec<String> {
    if input.chars().count() < 2 {
        return Vec::new();
    }

    let mut names: Vec<&str> = history.iter().map(|m| m.element_name.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    let mut scored: Vec<(f64, &str)> = names
        .into_iter()
        .map(|name| (similarity(input, name), name))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Suggests a therblig code from keywords in the element name.
#[must_use]
pub fn suggest_therblig(element_name: &str) -> Option<Therblig> {
    let name = element_name.to_lowercase();
    let patterns: [(Therblig, &[&str]); 17] = [
        (Therblig::TransportEmpty, &["reach", "extend"]),
        (Therblig::TransportLoaded, &["grasp", "grab", "pick", "take"]),
        (Therblig::PrePosition, &["pre-position", "prepare"]),
        (Therblig::Grasp, &["assemble", "put together"]),
        (Therblig::Assemble, &["use", "operate", "apply"]),
        (Therblig::Disassemble, &["disassemble", "take apart"]),
        (Therblig::ReleaseLoad, &["release", "let go", "drop"]),
        (Therblig::Transport, &["transport", "move", "carry"]),
        (Therblig::Hold, &["hold", "support"]),
        (Therblig::UnavoidableDelay, &["unavoidable delay", "wait"]),
        (Therblig::AvoidableDelay, &["avoidable delay", "idle"]),
        (Therblig::Position, &["position", "place", "locate"]),
        (Therblig::Inspect, &["inspect", "check", "examine"]),
        (Therblig::Plan, &["plan", "think", "decide"]),
        (Therblig::Search, &["search", "look for"]),
        (Therblig::Select, &["select", "choose"]),
        (Therblig::Find, &["find"]),
    ];

    patterns
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(therblig, _)| *therblig)
}

/// Measurements that look like duplicates of the candidate: near-identical
/// name, duration within half a second, same category.
#[must_use]
pub fn detect_duplicates<'a>(
    candidate: &Measurement,
    existing: &'a [Measurement],
) -> Vec<&'a Measurement> {
    existing
        .iter()
        .filter(|m| m.id != candidate.id)
        .filter(|m| {
            similarity(&candidate.element_name, &m.element_name) > DUPLICATE_SIMILARITY
                && (candidate.duration - m.duration).abs() < DUPLICATE_DURATION_WINDOW
                && candidate.category == m.category
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::MeasurementDraft;
    use crate::types::Category;

    fn named(name: &str, start: f64, end: f64) -> Measurement {
        MeasurementDraft {
            element_name: Some(name.to_string()),
            ..MeasurementDraft::new(start, end)
        }
        .build()
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("pick part", "pick part"), 0);
    }

    #[test]
    fn similarity_is_case_insensitive() {
        assert!((similarity("Pick Part", "pick part") - 1.0).abs() < f64::EPSILON);
        assert!((similarity("", "") - 1.0).abs() < f64::EPSILON);
        assert!(similarity("abc", "xyz").abs() < f64::EPSILON);
    }

    #[test]
    fn suggestions_rank_closest_first() {
        let history = vec![
            named("Pick part", 0.0, 1.0),
            named("Place part", 1.0, 2.0),
            named("Inspect weld", 2.0, 3.0),
        ];
        let suggestions = element_name_suggestions("Pick par", &history, 5);
        assert_eq!(suggestions.first().map(String::as_str), Some("Pick part"));
        assert!(!suggestions.contains(&"Inspect weld".to_string()));
    }

    #[test]
    fn suggestions_require_two_characters() {
        let history = vec![named("Pick part", 0.0, 1.0)];
        assert!(element_name_suggestions("P", &history, 5).is_empty());
    }

    #[test]
    fn suggestions_deduplicate_history() {
        let history = vec![named("Pick part", 0.0, 1.0), named("Pick part", 1.0, 2.0)];
        let suggestions = element_name_suggestions("Pick part", &history, 5);
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn therblig_suggested_from_keywords() {
        assert_eq!(suggest_therblig("Reach for bin"), Some(Therblig::TransportEmpty));
        assert_eq!(suggest_therblig("Pick up screw"), Some(Therblig::TransportLoaded));
        assert_eq!(suggest_therblig("Wait for machine"), Some(Therblig::UnavoidableDelay));
        assert_eq!(suggest_therblig("Inspect surface"), Some(Therblig::Inspect));
        assert_eq!(suggest_therblig("Quux"), None);
    }

    #[test]
    fn duplicates_need_name_duration_and_category_match() {
        let candidate = named("Pick part", 0.0, 2.0);

        let same = named("Pick part", 5.0, 7.1);
        let longer = named("Pick part", 5.0, 9.0);
        let mut other_category = named("Pick part", 5.0, 7.0);
        other_category.category = Category::Waste;
        let different_name = named("Inspect weld", 5.0, 7.0);

        let existing = vec![
            same.clone(),
            longer,
            other_category,
            different_name,
        ];
        let duplicates = detect_duplicates(&candidate, &existing);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].id, same.id);
    }

    #[test]
    fn a_measurement_is_not_its_own_duplicate() {
        let candidate = named("Pick part", 0.0, 2.0);
        let existing = vec![candidate.clone()];
        assert!(detect_duplicates(&candidate, &existing).is_empty());
    }
}
