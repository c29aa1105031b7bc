//! Free-text similarity scoring
//!
//! Combines three independent techniques over normalized text:
//! edit distance, character bigram overlap and word overlap. The weights are
//! fixed so scores stay comparable across deployments.

use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Weight of the edit-distance sub-score
pub const EDIT_WEIGHT: f64 = 0.3;

/// Weight of the bigram sub-score
pub const NGRAM_WEIGHT: f64 = 0.4;

/// Weight of the word-overlap sub-score
pub const WORD_WEIGHT: f64 = 0.3;

/// Words this short are ignored by the word-overlap technique
const MIN_WORD_CHARS: usize = 3;

/// Sub-scores behind a similarity score, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextScores {
    /// Levenshtein-based similarity
    pub edit: u8,
    /// Bigram Jaccard similarity
    pub ngram: u8,
    /// Word Jaccard similarity
    pub word: u8,
    /// Weighted combination
    pub combined: u8,
}

impl TextScores {
    fn identical() -> Self {
        Self {
            edit: 100,
            ngram: 100,
            word: 100,
            combined: 100,
        }
    }
}

/// Normalize text for comparison
///
/// Lower-cases, strips diacritics, collapses every run of non-alphanumeric
/// characters into a single space and trims.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Similarity between two texts in [0, 100]
///
/// # Examples
///
/// ```
/// use docket_gatekeeper::similarity::score;
///
/// assert_eq!(score("Relatório mensal", "relatorio  MENSAL!"), 100);
/// assert!(score("login fails", "dark mode request") < 50);
/// ```
pub fn score(a: &str, b: &str) -> u8 {
    score_detailed(a, b).combined
}

/// Similarity between two texts with its sub-scores
pub fn score_detailed(a: &str, b: &str) -> TextScores {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return TextScores::identical();
    }

    let edit = edit_similarity(&a, &b);
    let ngram = ngram_similarity(&a, &b);
    let word = word_similarity(&a, &b);
    let combined = to_percent(
        edit as f64 * EDIT_WEIGHT + ngram as f64 * NGRAM_WEIGHT + word as f64 * WORD_WEIGHT,
    );

    TextScores {
        edit,
        ngram,
        word,
        combined,
    }
}

/// `1 - distance / longest`, as a percentage
fn edit_similarity(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 100;
    }

    let distance = levenshtein(&a, &b);
    to_percent((1.0 - distance as f64 / longest as f64) * 100.0)
}

/// Classic two-row dynamic-programming Levenshtein distance
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

fn bigrams(text: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

fn ngram_similarity(a: &str, b: &str) -> u8 {
    jaccard(&bigrams(a), &bigrams(b))
}

fn words(text: &str) -> HashSet<&str> {
    text.split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
        .collect()
}

fn word_similarity(a: &str, b: &str) -> u8 {
    jaccard(&words(a), &words(b))
}

/// `|A ∩ B| / |A ∪ B|` as a percentage; 0 when both sets are empty
fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> u8 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0;
    }
    to_percent(100.0 * intersection as f64 / union as f64)
}

/// Round half away from zero and clamp into [0, 100]
pub(crate) fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Exportação -- Relatório!! "), "exportacao relatorio");
        assert_eq!(normalize("Ticket #123: falha"), "ticket 123 falha");
        assert_eq!(normalize("***"), "");
    }

    #[test]
    fn test_to_percent_rounds_half_away_from_zero() {
        assert_eq!(to_percent(0.5), 1);
        assert_eq!(to_percent(12.5), 13);
        assert_eq!(to_percent(42.49), 42);
        assert_eq!(to_percent(99.5), 100);
    }

    #[test]
    fn test_identical_text() {
        assert_eq!(
            score(
                "Error exporting monthly financial report",
                "Error exporting monthly financial report"
            ),
            100
        );
    }

    #[test]
    fn test_identical_after_normalization() {
        assert_eq!(score("Relatório de Exportação", "relatorio de exportacao"), 100);
        assert_eq!(score("", ""), 100);
        assert_eq!(score("!!", "  "), 100);
    }

    #[test]
    fn test_empty_against_text() {
        let scores = score_detailed("", "abc");
        assert_eq!(scores.edit, 0);
        assert_eq!(scores.ngram, 0);
        assert_eq!(scores.word, 0);
        assert_eq!(scores.combined, 0);
    }

    #[test]
    fn test_levenshtein() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(levenshtein(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(levenshtein(&chars(""), &chars("abc")), 3);
        assert_eq!(levenshtein(&chars("flaw"), &chars("lawn")), 2);
    }

    #[test]
    fn test_sub_scores() {
        // distance 1 of 5; bigrams {ab,bc,cd} vs {ab,bc,cd,de}; distinct words
        let scores = score_detailed("abcd", "abcde");
        assert_eq!(scores.edit, 80);
        assert_eq!(scores.ngram, 75);
        assert_eq!(scores.word, 0);
        // 80*0.3 + 75*0.4 + 0 = 54
        assert_eq!(scores.combined, 54);
    }

    #[test]
    fn test_short_words_ignored() {
        let scores = score_detailed("a do export", "to be export");
        assert_eq!(scores.word, 100);
    }

    #[test]
    fn test_reordered_words_score_high() {
        let reordered = score(
            "Error exporting monthly financial report",
            "Monthly financial report export error",
        );
        let unrelated = score("Error exporting monthly financial report", "Add dark mode to settings");
        assert!(reordered > 50, "reordered = {}", reordered);
        assert!(unrelated < 30, "unrelated = {}", unrelated);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: score is symmetric
        #[test]
        fn test_symmetry(a in "\\PC{0,40}", b in "\\PC{0,40}") {
            prop_assert_eq!(score(&a, &b), score(&b, &a));
        }

        /// Property: any text is fully similar to itself
        #[test]
        fn test_identity(a in "\\PC{0,60}") {
            prop_assert_eq!(score(&a, &a), 100);
        }

        /// Property: score stays within [0, 100]
        #[test]
        fn test_bounds(a in "[a-zA-Z0-9 áéíõç#-]{0,50}", b in "[a-zA-Z0-9 áéíõç#-]{0,50}") {
            let scores = score_detailed(&a, &b);
            prop_assert!(scores.combined <= 100);
            prop_assert!(scores.edit <= 100 && scores.ngram <= 100 && scores.word <= 100);
        }
    }
}
