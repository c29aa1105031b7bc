//! Duplicate detection
//!
//! Two independent checks:
//! - [`rank_candidates`] scores a pool of demands against a target using
//!   text similarity plus structured-field matches
//! - [`detect_markers`] looks for textual hints inside a single demand
//!   ("see ticket #42", "duplicate of", "copy of ...")

use crate::config::DuplicateWeights;
use crate::similarity::{self, normalize};
use docket_domain::{Demand, DuplicateMarker, SimilarityBreakdown, SimilaritySignal, TriageError};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Reference to another work item by number. Runs on normalized text, so `#`
/// has usually been folded into a space already.
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(demand|demanda|ticket|chamado|case|caso|issue)\s*#?\s*\d+\b")
        .expect("reference regex is valid")
});

/// Duplication vocabulary (English and Portuguese)
static DUPLICATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(duplicat\w*|duplicad\w*|identic\w*|same|similar|alike|mesm[oa]s?|igua(l|is)|semelhantes?)\b",
    )
    .expect("duplication regex is valid")
});

/// Copied-title phrasing
static COPIED_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(copy of|copia de)\b").expect("copied title regex is valid"));

/// Score every candidate in `pool` against `target`
///
/// Returns one signal per candidate, ordered by descending score. Ties keep
/// the pool order. A candidate sharing the target's id is skipped.
pub fn rank_candidates(
    target: &Demand,
    pool: &[Demand],
    weights: &DuplicateWeights,
) -> Result<Vec<SimilaritySignal>, TriageError> {
    target.validate()?;
    weights.validate()?;
    for candidate in pool {
        if let Err(e) = candidate.validate() {
            warn!(target = %target.id, error = %e, "Rejected malformed candidate pool");
            return Err(e);
        }
    }

    let mut signals: Vec<SimilaritySignal> = pool
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .map(|candidate| {
            let breakdown = composite_breakdown(target, candidate, weights);
            let score = similarity::to_percent(breakdown.total());
            debug!(
                target = %target.id,
                candidate = %candidate.id,
                score,
                "Scored duplicate candidate"
            );
            SimilaritySignal {
                candidate_id: candidate.id.clone(),
                candidate_title: candidate.title.clone(),
                score,
                breakdown: Some(breakdown),
            }
        })
        .collect();

    // Stable sort keeps pool order among equal scores
    signals.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(signals)
}

/// Ranked candidates scoring at least `threshold`
pub fn find_duplicates(
    target: &Demand,
    pool: &[Demand],
    weights: &DuplicateWeights,
    threshold: u8,
) -> Result<Vec<SimilaritySignal>, TriageError> {
    if threshold > 100 {
        return Err(TriageError::malformed(format!(
            "duplicate threshold must be within [0, 100], got {}",
            threshold
        )));
    }

    let mut signals = rank_candidates(target, pool, weights)?;
    signals.retain(|signal| signal.score >= threshold);
    Ok(signals)
}

/// Weighted per-term contributions, unrounded
fn composite_breakdown(
    target: &Demand,
    candidate: &Demand,
    weights: &DuplicateWeights,
) -> SimilarityBreakdown {
    let title = similarity::score(&target.title, &candidate.title) as f64 * weights.title;

    let description = match (target.description_text(), candidate.description_text()) {
        (Some(a), Some(b)) => similarity::score(a, b) as f64 * weights.description,
        _ => 0.0,
    };

    let type_match = if codes_match(&target.type_code, &candidate.type_code) {
        100.0 * weights.type_match
    } else {
        0.0
    };

    let product_match = if codes_match(&target.product_id, &candidate.product_id) {
        100.0 * weights.product_match
    } else {
        0.0
    };

    SimilarityBreakdown {
        title,
        description,
        type_match,
        product_match,
    }
}

/// Blank codes never count as a match
fn codes_match(a: &str, b: &str) -> bool {
    let a = a.trim();
    !a.is_empty() && a == b.trim()
}

/// Textual hints that a demand repeats or points at another one
pub fn detect_markers(demand: &Demand) -> Result<BTreeSet<DuplicateMarker>, TriageError> {
    demand.validate()?;

    let title = normalize(&demand.title);
    let description = demand.description.as_deref().map(normalize).unwrap_or_default();
    let combined = format!("{} {}", title, description);

    let mut markers = BTreeSet::new();

    if REFERENCE_REGEX.is_match(&title) || REFERENCE_REGEX.is_match(&description) {
        markers.insert(DuplicateMarker::ReferenceToOtherDemand);
    }
    if DUPLICATION_REGEX.is_match(&combined) {
        markers.insert(DuplicateMarker::MentionsDuplication);
    }
    if COPIED_TITLE_REGEX.is_match(&title) {
        markers.insert(DuplicateMarker::CopiedTitle);
    }

    if !markers.is_empty() {
        debug!(demand = %demand.id, ?markers, "Duplicate markers found");
    }
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(id: &str, title: &str) -> Demand {
        Demand::new(id, title).with_type("bug").with_product("erp")
    }

    #[test]
    fn test_rank_orders_by_score() {
        let target = demand("t", "Error exporting monthly financial report");
        let pool = vec![
            demand("far", "Add dark mode to settings").with_type("idea").with_product("crm"),
            demand("near", "Monthly financial report export error"),
            demand("exact", "Error exporting monthly financial report"),
        ];

        let signals = rank_candidates(&target, &pool, &DuplicateWeights::default()).unwrap();
        let ids: Vec<&str> = signals.iter().map(|s| s.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "near", "far"]);
        // 100*0.4 + 0 (no descriptions) + 15 + 15
        assert_eq!(signals[0].score, 70);
    }

    #[test]
    fn test_composite_rounded_once_at_the_end() {
        let target = demand("t", "Checkout button missing");
        let pool = vec![demand("c", "Invoice totals wrong")];

        // A single 12.5 term rounds half away from zero
        let type_only = DuplicateWeights {
            title: 0.0,
            description: 0.0,
            type_match: 0.125,
            product_match: 0.0,
        };
        let signals = rank_candidates(&target, &pool, &type_only).unwrap();
        assert_eq!(signals[0].breakdown.unwrap().total(), 12.5);
        assert_eq!(signals[0].score, 13);

        // Two 12.5 terms sum to 25; rounding each term first would give 26
        let both = DuplicateWeights {
            product_match: 0.125,
            ..type_only
        };
        let signals = rank_candidates(&target, &pool, &both).unwrap();
        assert_eq!(signals[0].breakdown.unwrap().total(), 25.0);
        assert_eq!(signals[0].score, 25);
    }

    #[test]
    fn test_rank_ties_keep_pool_order() {
        let target = demand("t", "Checkout button missing");
        let pool = vec![
            demand("first", "Checkout button missing"),
            demand("second", "Checkout button missing"),
            demand("third", "Checkout button missing"),
        ];

        let signals = rank_candidates(&target, &pool, &DuplicateWeights::default()).unwrap();
        let ids: Vec<&str> = signals.iter().map(|s| s.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_rank_skips_target_itself() {
        let target = demand("t", "Checkout button missing");
        let pool = vec![target.clone(), demand("other", "Checkout button gone")];
        let signals = rank_candidates(&target, &pool, &DuplicateWeights::default()).unwrap();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].candidate_id, "other");
    }

    #[test]
    fn test_description_skipped_when_absent() {
        let target = demand("t", "Slow search").with_description("Search takes 30 seconds");
        let pool = vec![demand("c", "Slow search")];
        let signals = rank_candidates(&target, &pool, &DuplicateWeights::default()).unwrap();
        let breakdown = signals[0].breakdown.unwrap();
        assert_eq!(breakdown.description, 0.0);
        assert_eq!(signals[0].score, 70);
    }

    #[test]
    fn test_blank_codes_do_not_match() {
        let target = Demand::new("t", "Slow search");
        let pool = vec![Demand::new("c", "Slow search")];
        let signals = rank_candidates(&target, &pool, &DuplicateWeights::default()).unwrap();
        assert_eq!(signals[0].score, 40);
    }

    #[test]
    fn test_rank_rejects_malformed_pool() {
        let target = demand("t", "Slow search");
        let pool = vec![demand("c", "  ")];
        assert!(matches!(
            rank_candidates(&target, &pool, &DuplicateWeights::default()),
            Err(TriageError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_find_duplicates_threshold() {
        let target = demand("t", "Error exporting monthly financial report");
        let pool = vec![
            demand("exact", "Error exporting monthly financial report"),
            demand("far", "Add dark mode to settings").with_type("idea").with_product("crm"),
        ];
        let found = find_duplicates(&target, &pool, &DuplicateWeights::default(), 60).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].candidate_id, "exact");
        assert!(find_duplicates(&target, &pool, &DuplicateWeights::default(), 101).is_err());
    }

    #[test]
    fn test_marker_reference() {
        let d = Demand::new("d", "Export broken").with_description("Same root cause as ticket #4821");
        let markers = detect_markers(&d).unwrap();
        assert!(markers.contains(&DuplicateMarker::ReferenceToOtherDemand));
        assert!(markers.contains(&DuplicateMarker::MentionsDuplication));
        assert!(!markers.contains(&DuplicateMarker::CopiedTitle));

        let pt = Demand::new("d", "Ver demanda 77");
        assert!(detect_markers(&pt).unwrap().contains(&DuplicateMarker::ReferenceToOtherDemand));
    }

    #[test]
    fn test_marker_duplication_keywords() {
        for text in ["Duplicated request", "Problema idêntico ao anterior", "Mesma falha de ontem"] {
            let d = Demand::new("d", text);
            assert!(
                detect_markers(&d).unwrap().contains(&DuplicateMarker::MentionsDuplication),
                "{}",
                text
            );
        }
        // Substrings inside other words do not count
        for text in ["Samesite cookie warning", "Dissimilar totals in invoices"] {
            let d = Demand::new("d", text);
            assert!(detect_markers(&d).unwrap().is_empty(), "{}", text);
        }
    }

    #[test]
    fn test_marker_copied_title() {
        let d = Demand::new("d", "Cópia de: Exportar relatório");
        assert!(detect_markers(&d).unwrap().contains(&DuplicateMarker::CopiedTitle));

        let d = Demand::new("d", "Copy of Export report");
        assert!(detect_markers(&d).unwrap().contains(&DuplicateMarker::CopiedTitle));

        // Only the title is checked for copy phrasing
        let d = Demand::new("d", "Export report").with_description("copy of the invoice is wrong");
        assert!(!detect_markers(&d).unwrap().contains(&DuplicateMarker::CopiedTitle));
    }

    #[test]
    fn test_no_markers() {
        let d = Demand::new("d", "Add CSV export").with_description("Users want CSV downloads");
        assert!(detect_markers(&d).unwrap().is_empty());
    }
}
