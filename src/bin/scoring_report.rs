use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use speech_scoring_rs::{
    aggregate_reports, compute_case_report, load_cases, CaseReport, ConfidenceScorer,
    ConfidenceScorerBuilder, Language, Meta, Report, ScoringConfig, REPORT_SCHEMA_VERSION,
};

#[path = "scoring_report/json_report_formatter.rs"]
mod json_report_formatter;
#[path = "scoring_report/text_report_formatter.rs"]
mod text_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    /// Human-readable listing with matched target tokens in brackets.
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "scoring_report")]
#[command(about = "Score recognizer alternatives against practice sentences")]
struct Args {
    #[arg(
        long,
        env = "SPEECH_SCORING_REPORT_CASES_FILE",
        default_value = "test-data/scoring/demo_cases.json"
    )]
    cases_file: PathBuf,
    #[arg(long, env = "SPEECH_SCORING_REPORT_CONFIG")]
    config: Option<PathBuf>,
    /// Output path. JSON defaults to a timestamped file under target/; text
    /// defaults to stdout.
    #[arg(long, env = "SPEECH_SCORING_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(
        long,
        env = "SPEECH_SCORING_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output_format: OutputFormat,
    #[arg(long, env = "SPEECH_SCORING_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "SPEECH_SCORING_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let config = match args.config.as_ref() {
        Some(path) => {
            let path = resolve_path(&repo_root, path);
            ScoringConfig::load(&path)
                .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?
        }
        None => ScoringConfig::default(),
    };

    let cases_path = resolve_path(&repo_root, &args.cases_file);
    let mut cases = load_cases(&cases_path)
        .map_err(|err| format!("Failed to load cases '{}': {err}", cases_path.display()))?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let english = build_scorer(&config, Language::English)?;
    let japanese = build_scorer(&config, Language::Japanese)?;

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut case_reports: Vec<CaseReport> = Vec::with_capacity(cases.len());
    for case in &cases {
        progress.set_message(case.id.clone());
        let scorer = match case.language {
            Language::English => &english,
            Language::Japanese => &japanese,
        };
        case_reports.push(compute_case_report(case, scorer));
        progress.inc(1);
    }
    progress.finish_with_message("scoring pass complete");

    let aggregates = aggregate_reports(&case_reports);
    let report = Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            cases_file: cases_path.to_string_lossy().into_owned(),
            config,
            case_count: case_reports.len(),
        },
        cases: case_reports,
        aggregates,
    };

    match args.output_format {
        OutputFormat::Json => {
            let out_path = resolve_out_path(&repo_root, args.out.as_ref());
            json_report_formatter::write_report(&out_path, &report)?;
            println!("{}", out_path.display());
        }
        OutputFormat::Text => {
            let out_path = args.out.as_ref().map(|path| resolve_path(&repo_root, path));
            text_report_formatter::write_report(out_path.as_deref(), &report)?;
        }
    }
    Ok(())
}

fn build_scorer(config: &ScoringConfig, language: Language) -> Result<ConfidenceScorer, String> {
    ConfidenceScorerBuilder::new(config.clone())
        .with_language(language)
        .build()
        .map_err(|err| format!("Failed to build {} scorer: {err}", language.as_str()))
}

fn resolve_out_path(repo_root: &Path, out: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = out {
        return resolve_path(repo_root, path);
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    repo_root
        .join("target")
        .join("scoring_reports")
        .join(format!("scoring-report-{run_id}.json"))
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}
