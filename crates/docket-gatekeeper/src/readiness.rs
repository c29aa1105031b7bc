//! Readiness signals for a demand's description and evidence

use crate::config::ReadinessThresholds;
use docket_domain::{ReadinessKind, ReadinessSignal};
use tracing::debug;

/// Evaluate description detail and evidence against thresholds
///
/// The three checks are independent. Signals come back in the order
/// missing evidence, vague description, sufficient context.
pub fn evaluate(
    description: Option<&str>,
    evidence_count: u32,
    require_evidence: bool,
    min_words: usize,
    min_chars: usize,
) -> Vec<ReadinessSignal> {
    let trimmed = description.map(str::trim).unwrap_or_default();
    let char_count = trimmed.chars().count();
    let word_count = trimmed.split_whitespace().count();
    let meets_threshold = char_count >= min_chars && word_count >= min_words;

    let mut signals = Vec::new();

    if require_evidence && evidence_count == 0 {
        signals.push(ReadinessSignal::new(
            ReadinessKind::MissingEvidence,
            "Missing evidence",
            "Attach evidence (screenshots, logs or data) before this demand can progress.",
        ));
    }

    if !meets_threshold {
        signals.push(ReadinessSignal::new(
            ReadinessKind::VagueDescription,
            "Vague description",
            format!(
                "Description has {} words and {} characters; at least {} words and {} characters are expected.",
                word_count, char_count, min_words, min_chars
            ),
        ));
    }

    if meets_threshold && (evidence_count > 0 || !require_evidence) {
        signals.push(ReadinessSignal::new(
            ReadinessKind::SufficientContext,
            "Sufficient context",
            "Description and evidence are detailed enough to proceed.",
        ));
    }

    debug!(
        word_count,
        char_count,
        evidence_count,
        signals = signals.len(),
        "Evaluated readiness"
    );
    signals
}

impl ReadinessThresholds {
    /// [`evaluate`] using these thresholds
    pub fn evaluate(&self, description: Option<&str>, evidence_count: u32) -> Vec<ReadinessSignal> {
        evaluate(
            description,
            evidence_count,
            self.require_evidence,
            self.min_words,
            self.min_chars,
        )
    }
}

/// Whether the signals describe a detailed description
pub fn is_detailed(signals: &[ReadinessSignal]) -> bool {
    !signals.iter().any(|s| s.kind == ReadinessKind::VagueDescription)
}

/// Whether the signals report missing evidence
pub fn has_evidence_gap(signals: &[ReadinessSignal]) -> bool {
    signals.iter().any(|s| s.kind == ReadinessKind::MissingEvidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_domain::Severity;

    fn kinds(signals: &[ReadinessSignal]) -> Vec<ReadinessKind> {
        signals.iter().map(|s| s.kind).collect()
    }

    const DETAILED: &str = "When exporting the monthly financial report to PDF the job \
                            times out after two minutes and the file is never produced.";

    #[test]
    fn test_short_description_without_evidence() {
        let signals = evaluate(Some("Resumo curto"), 0, true, 10, 50);
        assert_eq!(
            kinds(&signals),
            vec![ReadinessKind::MissingEvidence, ReadinessKind::VagueDescription]
        );
        assert_eq!(signals[0].severity, Severity::Danger);
        assert_eq!(signals[1].severity, Severity::Warning);
    }

    #[test]
    fn test_detailed_with_evidence() {
        let signals = evaluate(Some(DETAILED), 2, true, 10, 50);
        assert_eq!(kinds(&signals), vec![ReadinessKind::SufficientContext]);
        assert_eq!(signals[0].severity, Severity::Success);
    }

    #[test]
    fn test_detailed_without_required_evidence() {
        let signals = evaluate(Some(DETAILED), 0, true, 10, 50);
        assert_eq!(kinds(&signals), vec![ReadinessKind::MissingEvidence]);
    }

    #[test]
    fn test_evidence_optional() {
        let signals = evaluate(Some(DETAILED), 0, false, 10, 50);
        assert_eq!(kinds(&signals), vec![ReadinessKind::SufficientContext]);
    }

    #[test]
    fn test_missing_description() {
        let signals = evaluate(None, 1, true, 1, 1);
        assert_eq!(kinds(&signals), vec![ReadinessKind::VagueDescription]);
    }

    #[test]
    fn test_both_thresholds_apply() {
        // Enough characters, too few words
        let long_words = "Supercalifragilistic internationalization";
        assert_eq!(
            kinds(&evaluate(Some(long_words), 1, true, 5, 20)),
            vec![ReadinessKind::VagueDescription]
        );
        // Whitespace padding does not count towards length
        assert_eq!(
            kinds(&evaluate(Some("   a b   "), 1, true, 2, 4)),
            vec![ReadinessKind::VagueDescription]
        );
        assert_eq!(
            kinds(&evaluate(Some("   a b c   "), 1, true, 2, 4)),
            vec![ReadinessKind::SufficientContext]
        );
    }

    #[test]
    fn test_threshold_helpers() {
        let signals = evaluate(Some("Resumo curto"), 0, true, 10, 50);
        assert!(!is_detailed(&signals));
        assert!(has_evidence_gap(&signals));
        assert!(is_detailed(&[]));
        assert!(!has_evidence_gap(&[]));
    }

    #[test]
    fn test_thresholds_struct() {
        let thresholds = ReadinessThresholds {
            min_words: 3,
            min_chars: 10,
            require_evidence: false,
        };
        let signals = thresholds.evaluate(Some("three short words"), 0);
        assert_eq!(kinds(&signals), vec![ReadinessKind::SufficientContext]);
    }
}
