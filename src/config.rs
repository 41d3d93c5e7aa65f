use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Tunable constants of the scoring pipeline. Defaults are the tuned product
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// English target words must be longer than this (in chars) to accept
    /// fuzzy matches. Shorter words only match exactly.
    #[serde(default = "default_fuzzy_min_word_len")]
    pub fuzzy_min_word_len: usize,
    /// Allowed edit distance as a fraction of the target word length.
    #[serde(default = "default_fuzzy_max_error_ratio")]
    pub fuzzy_max_error_ratio: f64,
    /// Lower bound for the allowed edit distance of fuzzy-eligible words.
    #[serde(default = "default_fuzzy_min_distance")]
    pub fuzzy_min_distance: usize,
    /// Confidence assumed when a recognizer reports none (or an invalid one).
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: f64,
    /// Score multiplier at confidence 0. The multiplier rises linearly to 1.0
    /// at confidence 1.
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,
}

impl ScoringConfig {
    pub const DEFAULT_FUZZY_MIN_WORD_LEN: usize = 5;
    pub const DEFAULT_FUZZY_MAX_ERROR_RATIO: f64 = 0.2;
    pub const DEFAULT_FUZZY_MIN_DISTANCE: usize = 1;
    pub const DEFAULT_FALLBACK_CONFIDENCE: f64 = 0.85;
    pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.3;

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scoring config", e))?;
        serde_json::from_str(&data).map_err(|e| ScoringError::json("parse scoring config", e))
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(0.0..=1.0).contains(&self.fuzzy_max_error_ratio) {
            return Err(ScoringError::invalid_config(
                "fuzzy_max_error_ratio",
                format!("expected a value in [0, 1], got {}", self.fuzzy_max_error_ratio),
            ));
        }
        if !(self.fallback_confidence > 0.0 && self.fallback_confidence <= 1.0) {
            return Err(ScoringError::invalid_config(
                "fallback_confidence",
                format!("expected a value in (0, 1], got {}", self.fallback_confidence),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ScoringError::invalid_config(
                "confidence_floor",
                format!("expected a value in [0, 1], got {}", self.confidence_floor),
            ));
        }
        Ok(())
    }

    /// Largest edit distance accepted for a target word of `word_len` chars,
    /// or `None` when the word is too short for fuzzy matching.
    pub fn max_edit_distance(&self, word_len: usize) -> Option<usize> {
        if word_len <= self.fuzzy_min_word_len {
            return None;
        }
        let scaled = (word_len as f64 * self.fuzzy_max_error_ratio).floor() as usize;
        Some(scaled.max(self.fuzzy_min_distance))
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fuzzy_min_word_len: default_fuzzy_min_word_len(),
            fuzzy_max_error_ratio: default_fuzzy_max_error_ratio(),
            fuzzy_min_distance: default_fuzzy_min_distance(),
            fallback_confidence: default_fallback_confidence(),
            confidence_floor: default_confidence_floor(),
        }
    }
}

fn default_fuzzy_min_word_len() -> usize {
    ScoringConfig::DEFAULT_FUZZY_MIN_WORD_LEN
}
fn default_fuzzy_max_error_ratio() -> f64 {
    ScoringConfig::DEFAULT_FUZZY_MAX_ERROR_RATIO
}
fn default_fuzzy_min_distance() -> usize {
    ScoringConfig::DEFAULT_FUZZY_MIN_DISTANCE
}
fn default_fallback_confidence() -> f64 {
    ScoringConfig::DEFAULT_FALLBACK_CONFIDENCE
}
fn default_confidence_floor() -> f64 {
    ScoringConfig::DEFAULT_CONFIDENCE_FLOOR
}
