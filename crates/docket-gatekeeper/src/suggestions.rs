//! Suggestion generation
//!
//! Combines duplicate signals, readiness signals and the record's ratings
//! into an ordered list of hints. Emission order is fixed:
//! duplicate warning, related discovery, advance, consider epic, refine.

use crate::readiness::{has_evidence_gap, is_detailed};
use docket_domain::{
    ReadinessSignal, RelatedReference, SimilaritySignal, Suggestion, SuggestionKind,
    SuggestionPriority, TriageRecord,
};
use tracing::debug;

/// Build suggestions for a triage record
///
/// `duplicates` should already be filtered to likely duplicates (see
/// [`crate::duplicates::find_duplicates`]); any entry counts.
pub fn generate(
    record: &TriageRecord,
    duplicates: &[SimilaritySignal],
    readiness: &[ReadinessSignal],
    related_discoveries: &[RelatedReference],
) -> Vec<Suggestion> {
    let detailed = is_detailed(readiness);
    let evidence_gap = has_evidence_gap(readiness);
    let impact_high = record.impact.is_some_and(|r| r.is_high());
    let urgency_high = record.urgency.is_some_and(|r| r.is_high());
    let complexity_high = record.complexity.is_some_and(|r| r.is_high());

    let mut suggestions = Vec::new();

    if !duplicates.is_empty() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::DuplicateWarning,
            priority: SuggestionPriority::Medium,
            title: "Possible duplicate demands".to_string(),
            description: format!(
                "{} similar demand(s) found. Review them before progressing; \
                 mark this one as DUPLICATE if it repeats an existing request.",
                duplicates.len()
            ),
            related: duplicates
                .iter()
                .map(|signal| {
                    RelatedReference::new(
                        signal.candidate_id.clone(),
                        signal.candidate_title.clone(),
                        format!("{}% similar", signal.score),
                    )
                })
                .collect(),
        });
    }

    if !related_discoveries.is_empty() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::RelatedDiscovery,
            priority: SuggestionPriority::Medium,
            title: "Related discoveries in progress".to_string(),
            description: format!(
                "{} discovery item(s) cover related ground. Consider linking this demand to them.",
                related_discoveries.len()
            ),
            related: related_discoveries.to_vec(),
        });
    }

    if impact_high && urgency_high && detailed && duplicates.is_empty() {
        suggestions.push(action(
            SuggestionPriority::High,
            "Advance to discovery",
            "High impact and urgency with a detailed description and no duplicates. \
             Move this demand to READY_FOR_DISCOVERY.",
        ));
    }

    if impact_high && complexity_high {
        suggestions.push(action(
            SuggestionPriority::Medium,
            "Consider evolving to an epic",
            "High impact combined with high complexity suggests this demand is larger \
             than a single discovery. Consider EVOLVED_TO_EPIC.",
        ));
    }

    if !detailed && !evidence_gap {
        suggestions.push(action(
            SuggestionPriority::Low,
            "Refine the description",
            "The description is too short to qualify. Ask the requester for more detail.",
        ));
    }

    debug!(
        triage_id = %record.id,
        count = suggestions.len(),
        "Generated suggestions"
    );
    suggestions
}

fn action(priority: SuggestionPriority, title: &str, description: &str) -> Suggestion {
    Suggestion {
        kind: SuggestionKind::ActionRecommendation,
        priority,
        title: title.to_string(),
        description: description.to_string(),
        related: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::evaluate;
    use docket_domain::{Rating, RatingLevel};

    fn rated(impact: RatingLevel, urgency: RatingLevel, complexity: RatingLevel) -> TriageRecord {
        TriageRecord::new_at("d-1", 0)
            .unwrap()
            .set_ratings_at(
                Some(Rating::new(impact, 1.0).unwrap()),
                Some(Rating::new(urgency, 1.0).unwrap()),
                Some(Rating::new(complexity, 1.0).unwrap()),
                1,
            )
            .unwrap()
    }

    fn duplicate() -> SimilaritySignal {
        SimilaritySignal {
            candidate_id: "d-0".to_string(),
            candidate_title: "Export broken".to_string(),
            score: 88,
            breakdown: None,
        }
    }

    fn detailed() -> Vec<ReadinessSignal> {
        evaluate(Some("one two three four five six seven eight nine ten eleven"), 1, true, 10, 20)
    }

    fn vague() -> Vec<ReadinessSignal> {
        evaluate(Some("too short"), 1, true, 10, 20)
    }

    fn titles(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_advance_when_high_and_clean() {
        let record = rated(RatingLevel::High, RatingLevel::Critical, RatingLevel::Low);
        let suggestions = generate(&record, &[], &detailed(), &[]);
        assert_eq!(titles(&suggestions), vec!["Advance to discovery"]);
        assert_eq!(suggestions[0].priority, SuggestionPriority::High);
        assert_eq!(suggestions[0].kind, SuggestionKind::ActionRecommendation);
    }

    #[test]
    fn test_duplicates_block_advance() {
        let record = rated(RatingLevel::High, RatingLevel::High, RatingLevel::Low);
        let suggestions = generate(&record, &[duplicate()], &detailed(), &[]);
        assert_eq!(titles(&suggestions), vec!["Possible duplicate demands"]);
        assert_eq!(suggestions[0].related[0].annotation, "88% similar");
    }

    #[test]
    fn test_full_precedence_order() {
        let record = rated(RatingLevel::High, RatingLevel::High, RatingLevel::High);
        let related = vec![RelatedReference::new("disc-7", "Export revamp", "in progress")];
        let suggestions = generate(&record, &[duplicate()], &vague(), &related);
        let kinds: Vec<SuggestionKind> = suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::DuplicateWarning,
                SuggestionKind::RelatedDiscovery,
                SuggestionKind::ActionRecommendation,
                SuggestionKind::ActionRecommendation,
            ]
        );
        assert_eq!(
            titles(&suggestions)[2..],
            ["Consider evolving to an epic", "Refine the description"]
        );
        assert_eq!(suggestions[1].related, related);
    }

    #[test]
    fn test_evidence_gap_suppresses_refine() {
        let record = TriageRecord::new_at("d-1", 0).unwrap();
        let readiness = evaluate(Some("Resumo curto"), 0, true, 10, 50);
        assert!(generate(&record, &[], &readiness, &[]).is_empty());
    }

    #[test]
    fn test_unrated_record_gets_refine_only() {
        let record = TriageRecord::new_at("d-1", 0).unwrap();
        let suggestions = generate(&record, &[], &vague(), &[]);
        assert_eq!(titles(&suggestions), vec!["Refine the description"]);
        assert_eq!(suggestions[0].priority, SuggestionPriority::Low);
    }
}
