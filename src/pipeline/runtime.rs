use crate::config::ScoringConfig;
use crate::pipeline::defaults::{EnglishComparator, JapaneseComparator};
use crate::pipeline::traits::Comparator;
use crate::types::{AlternativeScore, RecognitionAlternative, ScoredResult};

/// Picks the recognition alternative with the best confidence-weighted score.
pub struct ConfidenceScorer {
    comparator: Box<dyn Comparator>,
    fallback_confidence: f64,
    confidence_floor: f64,
}

pub(crate) struct ConfidenceScorerParts {
    pub comparator: Box<dyn Comparator>,
    pub fallback_confidence: f64,
    pub confidence_floor: f64,
}

impl ConfidenceScorer {
    pub(crate) fn from_parts(parts: ConfidenceScorerParts) -> Self {
        Self {
            comparator: parts.comparator,
            fallback_confidence: parts.fallback_confidence,
            confidence_floor: parts.confidence_floor,
        }
    }

    pub fn english() -> Self {
        Self::with_comparator(Box::new(EnglishComparator::default()))
    }

    pub fn japanese() -> Self {
        Self::with_comparator(Box::new(JapaneseComparator))
    }

    fn with_comparator(comparator: Box<dyn Comparator>) -> Self {
        Self::from_parts(ConfidenceScorerParts {
            comparator,
            fallback_confidence: ScoringConfig::DEFAULT_FALLBACK_CONFIDENCE,
            confidence_floor: ScoringConfig::DEFAULT_CONFIDENCE_FLOOR,
        })
    }

    /// Score every alternative, in input order.
    pub fn score_all(
        &self,
        alternatives: &[RecognitionAlternative],
        target: &str,
    ) -> Vec<AlternativeScore> {
        alternatives
            .iter()
            .enumerate()
            .map(|(index, alt)| self.score_alternative(index, alt, target))
            .collect()
    }

    /// Best alternative by weighted score; the earliest one wins ties.
    ///
    /// Starts from an all-zero result, so an empty list, or a list where every
    /// alternative weighs in at 0, yields `ScoredResult::default()`.
    pub fn score(&self, alternatives: &[RecognitionAlternative], target: &str) -> ScoredResult {
        select_best(self.score_all(alternatives, target))
    }

    fn score_alternative(
        &self,
        index: usize,
        alt: &RecognitionAlternative,
        target: &str,
    ) -> AlternativeScore {
        evaluate_alternative(
            self.comparator.as_ref(),
            self.fallback_confidence,
            self.confidence_floor,
            index,
            alt,
            target,
        )
    }
}

/// Score `alternatives` against `target` with an arbitrary comparator and the
/// default confidence weighting.
pub fn score(
    alternatives: &[RecognitionAlternative],
    target: &str,
    comparator: &dyn Comparator,
) -> ScoredResult {
    let config = ScoringConfig::default();
    let scores = alternatives
        .iter()
        .enumerate()
        .map(|(index, alt)| {
            evaluate_alternative(
                comparator,
                config.fallback_confidence,
                config.confidence_floor,
                index,
                alt,
                target,
            )
        })
        .collect();
    select_best(scores)
}

fn evaluate_alternative(
    comparator: &dyn Comparator,
    fallback_confidence: f64,
    confidence_floor: f64,
    index: usize,
    alt: &RecognitionAlternative,
    target: &str,
) -> AlternativeScore {
    let confidence_was_reported = is_valid_confidence(alt.confidence);
    let confidence = if confidence_was_reported {
        alt.confidence
    } else {
        tracing::debug!(
            index,
            reported = alt.confidence,
            fallback = fallback_confidence,
            "recognizer confidence unavailable, using fallback"
        );
        fallback_confidence
    };

    let result = comparator.compare(target, &alt.transcript);
    let weighted_pct = weighted_pct(result.pct, confidence, confidence_floor);
    tracing::trace!(
        index,
        raw_pct = result.pct,
        weighted_pct,
        confidence,
        "scored alternative"
    );

    AlternativeScore {
        index,
        transcript: alt.transcript.clone(),
        raw_pct: result.pct,
        weighted_pct,
        confidence,
        confidence_was_reported,
        matched_indices: result.matched_indices,
    }
}

/// A recognizer confidence is usable only when it lies in (0, 1]. NaN fails.
pub fn is_valid_confidence(confidence: f64) -> bool {
    confidence > 0.0 && confidence <= 1.0
}

/// `round(raw_pct * (floor + (1 - floor) * confidence))`.
pub fn weighted_pct(raw_pct: u32, confidence: f64, confidence_floor: f64) -> u32 {
    let multiplier = confidence_floor + (1.0 - confidence_floor) * confidence;
    (raw_pct as f64 * multiplier).round().clamp(0.0, 100.0) as u32
}

/// Position of the winning alternative: the first with the strictly greatest
/// weighted score above 0.
pub(crate) fn best_position(scores: &[AlternativeScore]) -> Option<usize> {
    let mut best = None;
    let mut best_pct = 0;
    for (position, candidate) in scores.iter().enumerate() {
        if candidate.weighted_pct > best_pct {
            tracing::debug!(
                index = candidate.index,
                weighted_pct = candidate.weighted_pct,
                "new best alternative"
            );
            best = Some(position);
            best_pct = candidate.weighted_pct;
        }
    }
    best
}

fn select_best(mut scores: Vec<AlternativeScore>) -> ScoredResult {
    match best_position(&scores) {
        Some(position) => ScoredResult::from(scores.swap_remove(position)),
        None => ScoredResult::default(),
    }
}
