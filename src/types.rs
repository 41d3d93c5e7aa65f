use serde::{Deserialize, Deserializer, Serialize};

/// Practice language of a target sentence. Selects how text is tokenized and
/// which comparator scores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Japanese,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Japanese => "japanese",
        }
    }
}

/// One candidate transcription reported by a speech recognizer.
///
/// `confidence` is expected in (0, 1]. Recognizers that do not report a
/// confidence should pass `f64::NAN`; a missing or `null` value in JSON
/// deserializes to `NAN` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    pub transcript: String,
    #[serde(
        default = "unreported_confidence",
        deserialize_with = "deserialize_confidence"
    )]
    pub confidence: f64,
}

impl RecognitionAlternative {
    pub fn new(transcript: impl Into<String>, confidence: f64) -> Self {
        Self {
            transcript: transcript.into(),
            confidence,
        }
    }

    /// Alternative whose recognizer gave no confidence.
    pub fn unscored(transcript: impl Into<String>) -> Self {
        Self::new(transcript, unreported_confidence())
    }
}

fn unreported_confidence() -> f64 {
    f64::NAN
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(unreported_confidence))
}

/// Outcome of comparing one spoken transcript against a target.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    /// Share of target tokens matched, rounded to an integer in [0, 100].
    pub pct: u32,
    /// Indices into the target token sequence, strictly increasing.
    pub matched_indices: Vec<usize>,
}

impl MatchResult {
    pub(crate) fn from_matches(matched_indices: Vec<usize>, target_len: usize) -> Self {
        Self {
            pct: percentage(matched_indices.len(), target_len),
            matched_indices,
        }
    }
}

/// Best alternative chosen by the confidence scorer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Confidence-weighted percentage.
    pub pct: u32,
    pub transcript: String,
    pub matched_indices: Vec<usize>,
    /// Confidence actually used for weighting, after fallback substitution.
    pub confidence: f64,
    /// Unweighted text match percentage.
    pub raw_pct: u32,
}

/// Score of a single alternative, before best-of selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeScore {
    /// Position of the alternative in the recognizer's list.
    pub index: usize,
    pub transcript: String,
    pub raw_pct: u32,
    pub weighted_pct: u32,
    pub confidence: f64,
    /// False when the recognizer confidence was replaced by the fallback.
    pub confidence_was_reported: bool,
    pub matched_indices: Vec<usize>,
}

impl From<AlternativeScore> for ScoredResult {
    fn from(score: AlternativeScore) -> Self {
        Self {
            pct: score.weighted_pct,
            transcript: score.transcript,
            matched_indices: score.matched_indices,
            confidence: score.confidence,
            raw_pct: score.raw_pct,
        }
    }
}

/// `round(100 * matched / max(total, 1))`, clamped to 100.
pub(crate) fn percentage(matched: usize, total: usize) -> u32 {
    let pct = (100.0 * matched as f64 / total.max(1) as f64).round();
    pct.clamp(0.0, 100.0) as u32
}
