use crate::alignment::english::compare_en_with_config;
use crate::alignment::japanese::compare_ja;
use crate::alignment::normalization::{english_words, japanese_chars};
use crate::config::ScoringConfig;
use crate::pipeline::traits::Comparator;
use crate::types::{Language, MatchResult};

pub struct EnglishComparator {
    config: ScoringConfig,
}

impl EnglishComparator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }
}

impl Default for EnglishComparator {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl Comparator for EnglishComparator {
    fn compare(&self, target: &str, spoken: &str) -> MatchResult {
        compare_en_with_config(target, spoken, &self.config)
    }
}

pub struct JapaneseComparator;

impl Comparator for JapaneseComparator {
    fn compare(&self, target: &str, spoken: &str) -> MatchResult {
        compare_ja(target, spoken)
    }
}

impl Language {
    pub fn comparator(self, config: &ScoringConfig) -> Box<dyn Comparator> {
        match self {
            Self::English => Box::new(EnglishComparator::new(config.clone())),
            Self::Japanese => Box::new(JapaneseComparator),
        }
    }

    /// Normalized target sequence that `matched_indices` point into: words
    /// for English, characters for Japanese.
    pub fn target_tokens(self, target: &str) -> Vec<String> {
        match self {
            Self::English => english_words(target),
            Self::Japanese => japanese_chars(target)
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
