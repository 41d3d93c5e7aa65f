use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use speech_scoring_rs::{AggregateMetrics, CaseReport, Language, Report};

/// Writes the text rendering to `path`, or to stdout when no path is given.
pub fn write_report(path: Option<&Path>, report: &Report) -> Result<(), String> {
    let rendered = render_report(report);
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| {
                    format!(
                        "Failed to create report output directory '{}': {err}",
                        parent.display()
                    )
                })?;
            }
            fs::write(path, rendered)
                .map_err(|err| format!("Failed to write report file '{}': {err}", path.display()))
        }
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "scoring report generated {} ({} case(s))",
        report.meta.generated_at, report.meta.case_count
    );
    for case in &report.cases {
        out.push('\n');
        render_case(&mut out, case);
    }

    out.push('\n');
    render_metrics(&mut out, "overall", &report.aggregates.overall);
    if let Some(metrics) = report.aggregates.by_language.english.as_ref() {
        render_metrics(&mut out, "english", metrics);
    }
    if let Some(metrics) = report.aggregates.by_language.japanese.as_ref() {
        render_metrics(&mut out, "japanese", metrics);
    }
    out
}

fn render_case(out: &mut String, case: &CaseReport) {
    let _ = writeln!(
        out,
        "[{}] {} best {}% (raw {}%, confidence {:.2})",
        case.id,
        case.language.as_str(),
        case.best.pct,
        case.best.raw_pct,
        case.best.confidence
    );
    let _ = writeln!(
        out,
        "  target: {}",
        highlight_tokens(&case.target_tokens, &case.best.matched_indices, case.language)
    );
    match case.best_index {
        Some(index) => {
            let _ = writeln!(out, "  spoken: {} (alternative {index})", case.best.transcript);
        }
        None => {
            let _ = writeln!(out, "  spoken: -");
        }
    }
    for note in &case.notes {
        let _ = writeln!(out, "  note: {note}");
    }
}

fn highlight_tokens(tokens: &[String], matched: &[usize], language: Language) -> String {
    let matched: HashSet<usize> = matched.iter().copied().collect();
    let rendered: Vec<String> = tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            if matched.contains(&idx) {
                format!("[{token}]")
            } else {
                token.clone()
            }
        })
        .collect();
    match language {
        Language::English => rendered.join(" "),
        Language::Japanese => rendered.concat(),
    }
}

fn render_metrics(out: &mut String, label: &str, metrics: &AggregateMetrics) {
    let _ = writeln!(
        out,
        "{label}: cases={} mean={:.1}% min={}% max={}% mean_raw={:.1}% fallback_conf={} zero={} mismatches={}",
        metrics.case_count,
        metrics.mean_weighted_pct,
        metrics.min_weighted_pct,
        metrics.max_weighted_pct,
        metrics.mean_raw_pct,
        metrics.fallback_confidence_count,
        metrics.zero_score_count,
        metrics.expectation_mismatch_count
    );
}
