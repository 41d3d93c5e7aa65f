use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::runtime::{best_position, ConfidenceScorer};
use crate::types::{AlternativeScore, Language, RecognitionAlternative, ScoredResult};

pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// One practice attempt: a target sentence and the recognizer's alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringCase {
    pub id: String,
    pub language: Language,
    pub target: String,
    #[serde(default)]
    pub alternatives: Vec<RecognitionAlternative>,
    /// Weighted percentage the case is expected to score, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_pct: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub cases_file: String,
    pub config: ScoringConfig,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub language: Language,
    pub target: String,
    pub target_tokens: Vec<String>,
    pub token_count: usize,
    pub alternative_count: usize,
    /// Recognizer index of the winning alternative; `None` when nothing scored.
    pub best_index: Option<usize>,
    pub best: ScoredResult,
    pub alternatives: Vec<AlternativeScore>,
    pub unmatched_indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_pct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches_expectation: Option<bool>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub overall: AggregateMetrics,
    pub by_language: AggregateByLanguage,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AggregateByLanguage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<AggregateMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub japanese: Option<AggregateMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AggregateMetrics {
    pub case_count: u32,
    pub mean_weighted_pct: f64,
    pub min_weighted_pct: u32,
    pub max_weighted_pct: u32,
    pub mean_raw_pct: f64,
    /// Alternatives, across all cases, whose confidence was replaced by the
    /// fallback value.
    pub fallback_confidence_count: u32,
    /// Cases where no alternative scored above 0.
    pub zero_score_count: u32,
    pub expectation_mismatch_count: u32,
}

/// Reads a JSON array of cases. Ids must be non-empty and unique.
pub fn load_cases(path: &Path) -> Result<Vec<ScoringCase>, ScoringError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| ScoringError::io("read scoring cases", e))?;
    let cases: Vec<ScoringCase> =
        serde_json::from_str(&data).map_err(|e| ScoringError::json("parse scoring cases", e))?;

    let mut seen = HashSet::with_capacity(cases.len());
    for (position, case) in cases.iter().enumerate() {
        if case.id.trim().is_empty() {
            return Err(ScoringError::invalid_input(format!(
                "case at position {position} has an empty id"
            )));
        }
        if !seen.insert(case.id.as_str()) {
            return Err(ScoringError::invalid_input(format!(
                "duplicate case id '{}'",
                case.id
            )));
        }
    }
    Ok(cases)
}

/// Scores `case` with `scorer` and collects the per-case report. The scorer is
/// expected to compare in `case.language`.
pub fn compute_case_report(case: &ScoringCase, scorer: &ConfidenceScorer) -> CaseReport {
    let target_tokens = case.language.target_tokens(&case.target);
    let token_count = target_tokens.len();
    let alternatives = scorer.score_all(&case.alternatives, &case.target);

    let (best_index, best) = match best_position(&alternatives) {
        Some(position) => {
            let winner = alternatives[position].clone();
            (Some(winner.index), ScoredResult::from(winner))
        }
        None => (None, ScoredResult::default()),
    };

    let matched: HashSet<usize> = best.matched_indices.iter().copied().collect();
    let unmatched_indices = (0..token_count)
        .filter(|idx| !matched.contains(idx))
        .collect();

    let mut notes = Vec::new();
    if token_count == 0 {
        notes.push("target has no scorable tokens".to_string());
    }
    if alternatives.is_empty() {
        notes.push("recognizer returned no alternatives".to_string());
    } else if best_index.is_none() {
        notes.push("no alternative scored above zero".to_string());
    }
    if let Some(position) = best_index {
        if !alternatives[position].confidence_was_reported {
            notes.push("best alternative used fallback confidence".to_string());
        }
    }

    let matches_expectation = case.expected_pct.map(|expected| expected == best.pct);
    if matches_expectation == Some(false) {
        notes.push(format!(
            "expected {}%, scored {}%",
            case.expected_pct.unwrap_or_default(),
            best.pct
        ));
    }

    CaseReport {
        id: case.id.clone(),
        language: case.language,
        target: case.target.clone(),
        target_tokens,
        token_count,
        alternative_count: alternatives.len(),
        best_index,
        best,
        alternatives,
        unmatched_indices,
        expected_pct: case.expected_pct,
        matches_expectation,
        notes,
    }
}

pub fn aggregate_reports(cases: &[CaseReport]) -> AggregateReport {
    let all: Vec<&CaseReport> = cases.iter().collect();
    let english: Vec<&CaseReport> = by_language(cases, Language::English);
    let japanese: Vec<&CaseReport> = by_language(cases, Language::Japanese);

    AggregateReport {
        overall: aggregate_metrics(&all),
        by_language: AggregateByLanguage {
            english: (!english.is_empty()).then(|| aggregate_metrics(&english)),
            japanese: (!japanese.is_empty()).then(|| aggregate_metrics(&japanese)),
        },
    }
}

fn by_language(cases: &[CaseReport], language: Language) -> Vec<&CaseReport> {
    cases.iter().filter(|case| case.language == language).collect()
}

fn aggregate_metrics(cases: &[&CaseReport]) -> AggregateMetrics {
    if cases.is_empty() {
        return AggregateMetrics::default();
    }

    let weighted: Vec<f64> = cases.iter().map(|case| case.best.pct as f64).collect();
    let raw: Vec<f64> = cases.iter().map(|case| case.best.raw_pct as f64).collect();
    let fallback_confidence_count = cases
        .iter()
        .flat_map(|case| case.alternatives.iter())
        .filter(|alt| !alt.confidence_was_reported)
        .count();

    AggregateMetrics {
        case_count: to_u32(cases.len()),
        mean_weighted_pct: mean(&weighted),
        min_weighted_pct: cases.iter().map(|case| case.best.pct).min().unwrap_or(0),
        max_weighted_pct: cases.iter().map(|case| case.best.pct).max().unwrap_or(0),
        mean_raw_pct: mean(&raw),
        fallback_confidence_count: to_u32(fallback_confidence_count),
        zero_score_count: to_u32(cases.iter().filter(|case| case.best_index.is_none()).count()),
        expectation_mismatch_count: to_u32(
            cases
                .iter()
                .filter(|case| case.matches_expectation == Some(false))
                .count(),
        ),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, language: Language, target: &str, alts: &[(&str, f64)]) -> ScoringCase {
        ScoringCase {
            id: id.to_string(),
            language,
            target: target.to_string(),
            alternatives: alts
                .iter()
                .map(|(transcript, confidence)| RecognitionAlternative::new(*transcript, *confidence))
                .collect(),
            expected_pct: None,
        }
    }

    #[test]
    fn case_report_marks_unmatched_tokens() {
        let case = case(
            "en-1",
            Language::English,
            "The cat sat on the mat",
            &[("the cat sat", 1.0)],
        );
        let report = compute_case_report(&case, &ConfidenceScorer::english());
        assert_eq!(report.token_count, 6);
        assert_eq!(report.target_tokens[0], "the");
        assert_eq!(report.best.raw_pct, 50);
        assert_eq!(report.best.pct, 50);
        assert_eq!(report.best_index, Some(0));
        assert_eq!(report.unmatched_indices, vec![3, 4, 5]);
        assert!(report.notes.is_empty());
        assert_eq!(report.matches_expectation, None);
    }

    #[test]
    fn case_report_tracks_winner_index_and_fallback() {
        let case = case(
            "ja-1",
            Language::Japanese,
            "おはよう",
            &[("おは", 0.9), ("おはよう", f64::NAN)],
        );
        let report = compute_case_report(&case, &ConfidenceScorer::japanese());
        assert_eq!(report.alternative_count, 2);
        assert_eq!(report.best_index, Some(1));
        assert_eq!(report.best.pct, 90);
        assert!(report.unmatched_indices.is_empty());
        assert!(report
            .notes
            .iter()
            .any(|note| note.contains("fallback confidence")));
    }

    #[test]
    fn case_report_notes_empty_and_zero_cases() {
        let empty = case("e", Language::English, "hello", &[]);
        let report = compute_case_report(&empty, &ConfidenceScorer::english());
        assert_eq!(report.best_index, None);
        assert_eq!(report.unmatched_indices, vec![0]);
        assert!(report.notes.iter().any(|note| note.contains("no alternatives")));

        let zero = case("z", Language::English, "hello", &[("goodbye", 1.0)]);
        let report = compute_case_report(&zero, &ConfidenceScorer::english());
        assert_eq!(report.best, ScoredResult::default());
        assert!(report.notes.iter().any(|note| note.contains("above zero")));

        let blank = case("b", Language::Japanese, "。、", &[("はい", 1.0)]);
        let report = compute_case_report(&blank, &ConfidenceScorer::japanese());
        assert_eq!(report.token_count, 0);
        assert!(report.notes.iter().any(|note| note.contains("no scorable")));
    }

    #[test]
    fn case_report_checks_expectation() {
        let mut hit = case("hit", Language::English, "good morning", &[("good morning", 0.5)]);
        hit.expected_pct = Some(65);
        let report = compute_case_report(&hit, &ConfidenceScorer::english());
        assert_eq!(report.matches_expectation, Some(true));

        let mut miss = hit.clone();
        miss.expected_pct = Some(100);
        let report = compute_case_report(&miss, &ConfidenceScorer::english());
        assert_eq!(report.matches_expectation, Some(false));
        assert!(report.notes.iter().any(|note| note == "expected 100%, scored 65%"));
    }

    #[test]
    fn aggregate_reports_split_by_language() {
        let english = ConfidenceScorer::english();
        let japanese = ConfidenceScorer::japanese();
        let reports = vec![
            compute_case_report(
                &case("a", Language::English, "one two", &[("one two", 1.0)]),
                &english,
            ),
            compute_case_report(
                &case("b", Language::English, "one two", &[("one", 1.0)]),
                &english,
            ),
            compute_case_report(
                &case("c", Language::English, "one two", &[("three", f64::NAN)]),
                &english,
            ),
        ];
        let aggregates = aggregate_reports(&reports);
        let en = aggregates.by_language.english.expect("english metrics");
        assert_eq!(en.case_count, 3);
        assert_eq!(en.min_weighted_pct, 0);
        assert_eq!(en.max_weighted_pct, 100);
        assert!((en.mean_weighted_pct - 50.0).abs() < 1e-9);
        assert!((en.mean_raw_pct - 50.0).abs() < 1e-9);
        assert_eq!(en.fallback_confidence_count, 1);
        assert_eq!(en.zero_score_count, 1);
        assert!(aggregates.by_language.japanese.is_none());
        assert_eq!(aggregates.overall, en);

        let mut with_ja = reports;
        with_ja.push(compute_case_report(
            &case("d", Language::Japanese, "ねこ", &[("ねこ", 1.0)]),
            &japanese,
        ));
        let aggregates = aggregate_reports(&with_ja);
        assert_eq!(aggregates.overall.case_count, 4);
        assert_eq!(
            aggregates.by_language.japanese.map(|m| m.case_count),
            Some(1)
        );
    }

    #[test]
    fn aggregate_of_nothing_is_zeroed() {
        let aggregates = aggregate_reports(&[]);
        assert_eq!(aggregates.overall, AggregateMetrics::default());
        assert!(aggregates.by_language.english.is_none());
    }

    #[test]
    fn load_cases_rejects_duplicate_ids() {
        let path = std::env::temp_dir().join("speech_scoring_rs_duplicate_cases.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "x", "language": "english", "target": "a", "alternatives": []},
                {"id": "x", "language": "english", "target": "b", "alternatives": []}
            ]"#,
        )
        .expect("write cases");
        let result = load_cases(&path);
        assert!(matches!(result, Err(ScoringError::InvalidInput { .. })));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_cases_reads_optional_fields() {
        let path = std::env::temp_dir().join("speech_scoring_rs_load_cases.json");
        std::fs::write(
            &path,
            r#"[{"id": "j", "language": "japanese", "target": "ねこ",
                 "alternatives": [{"transcript": "ねこ", "confidence": null}],
                 "expected_pct": 90}]"#,
        )
        .expect("write cases");
        let cases = load_cases(&path).expect("cases load");
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].language, Language::Japanese);
        assert!(cases[0].alternatives[0].confidence.is_nan());
        assert_eq!(cases[0].expected_pct, Some(90));
        let _ = std::fs::remove_file(&path);
    }
}
