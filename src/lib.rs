pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;

pub use alignment::english::{compare_en, compare_en_with_config};
pub use alignment::japanese::compare_ja;
pub use alignment::levenshtein::levenshtein;
pub use config::ScoringConfig;
pub use error::ScoringError;
pub use pipeline::builder::ConfidenceScorerBuilder;
pub use pipeline::defaults::{EnglishComparator, JapaneseComparator};
pub use pipeline::runtime::{is_valid_confidence, score, weighted_pct, ConfidenceScorer};
pub use pipeline::traits::Comparator;
pub use report::{
    aggregate_reports, compute_case_report, load_cases, AggregateByLanguage, AggregateMetrics,
    AggregateReport, CaseReport, Meta, Report, ScoringCase, REPORT_SCHEMA_VERSION,
};
pub use types::{AlternativeScore, Language, MatchResult, RecognitionAlternative, ScoredResult};
