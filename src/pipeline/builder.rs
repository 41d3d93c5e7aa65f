use std::path::Path;

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::runtime::{ConfidenceScorer, ConfidenceScorerParts};
use crate::pipeline::traits::Comparator;
use crate::types::Language;

pub struct ConfidenceScorerBuilder {
    config: ScoringConfig,
    language: Option<Language>,
    comparator: Option<Box<dyn Comparator>>,
}

impl ConfidenceScorerBuilder {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            language: None,
            comparator: None,
        }
    }

    pub fn from_config_path(path: &Path) -> Result<Self, ScoringError> {
        Ok(Self::new(ScoringConfig::load(path)?))
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_comparator(mut self, comparator: Box<dyn Comparator>) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Validates the config and assembles the scorer. Without a language or
    /// comparator, English comparison is used.
    pub fn build(self) -> Result<ConfidenceScorer, ScoringError> {
        self.config.validate()?;

        let comparator = match (self.comparator, self.language) {
            (Some(comparator), Some(language)) => {
                tracing::warn!(
                    language = language.as_str(),
                    "custom comparator overrides the language comparator"
                );
                comparator
            }
            (Some(comparator), None) => comparator,
            (None, language) => language
                .unwrap_or(Language::English)
                .comparator(&self.config),
        };

        Ok(ConfidenceScorer::from_parts(ConfidenceScorerParts {
            comparator,
            fallback_confidence: self.config.fallback_confidence,
            confidence_floor: self.config.confidence_floor,
        }))
    }
}
