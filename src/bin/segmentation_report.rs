use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use segmentation_metrics_rs::{
    aggregate_reports, Annotation, EvaluationConfig, Meta, PairReport, Report, Segment,
    Segmentation, SegmentationEvaluator, SegmentationEvaluatorBuilder, Timeline,
    REPORT_SCHEMA_VERSION,
};

#[derive(Debug, Parser)]
#[command(name = "segmentation_report")]
#[command(about = "Score hypothesis segmentations against references and write a JSON report")]
struct Args {
    #[arg(
        long,
        env = "SEGMENTATION_REPORT_CASES",
        default_value = "test-data/segmentation/reference_cases.json"
    )]
    cases: PathBuf,
    #[arg(long, env = "SEGMENTATION_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "SEGMENTATION_REPORT_COVERAGE_TOLERANCE")]
    coverage_tolerance: Option<f64>,
    #[arg(long, env = "SEGMENTATION_REPORT_BOUNDARY_TOLERANCE")]
    boundary_tolerance: Option<f64>,
    #[arg(long, env = "SEGMENTATION_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "SEGMENTATION_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "SEGMENTATION_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
}

#[derive(Debug, Deserialize)]
struct Case {
    id: String,
    reference: Vec<CaseSegment>,
    hypothesis: Vec<CaseSegment>,
}

#[derive(Debug, Deserialize)]
struct CaseSegment {
    start: f64,
    end: f64,
    #[serde(default)]
    label: Option<String>,
}

/// Owned reference/hypothesis pair of one case.
struct LoadedCase {
    id: String,
    reference: Annotation,
    hypothesis: Hypothesis,
}

enum Hypothesis {
    Timeline(Timeline),
    Annotation(Annotation),
}

impl Hypothesis {
    fn as_segmentation(&self) -> Segmentation<'_> {
        match self {
            Self::Timeline(timeline) => timeline.into(),
            Self::Annotation(annotation) => annotation.into(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(message) = run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cases_path = resolve_path(&repo_root, &args.cases);
    let out_path = resolve_out_path(&repo_root, args.out.as_ref());

    let mut config = match args.config.as_ref() {
        Some(path) => {
            let config_path = resolve_path(&repo_root, path);
            require_path_exists(&config_path, "Missing --config path.")?;
            EvaluationConfig::load(&config_path).map_err(|err| err.to_string())?
        }
        None => EvaluationConfig::default(),
    };
    if let Some(tolerance) = args.coverage_tolerance {
        config.coverage_tolerance = tolerance;
    }
    if let Some(tolerance) = args.boundary_tolerance {
        config.boundary_tolerance = tolerance;
    }
    let evaluator = SegmentationEvaluatorBuilder::new(config)
        .build()
        .map_err(|err| format!("Invalid evaluation configuration: {err}"))?;

    let mut cases = load_cases(&cases_path)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }

    let started = Instant::now();
    let pairs = evaluate_cases(&evaluator, &cases)?;
    println!(
        "evaluated {} pair(s) in {:.2}s",
        pairs.len(),
        started.elapsed().as_secs_f64()
    );

    let aggregates = aggregate_reports(&pairs);
    let report = Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            cases_path: cases_path.to_string_lossy().into_owned(),
            coverage_tolerance: config.coverage_tolerance,
            boundary_tolerance: config.boundary_tolerance,
            pair_count: pairs.len(),
        },
        pairs,
        aggregates,
    };

    report.write_json(&out_path).map_err(|err| {
        format!("Failed to write report '{}': {err}", out_path.display())
    })?;
    println!("{}", out_path.display());
    Ok(())
}

fn evaluate_cases(
    evaluator: &SegmentationEvaluator,
    cases: &[LoadedCase],
) -> Result<Vec<PairReport>, String> {
    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut pairs = Vec::with_capacity(cases.len());
    for case in cases {
        progress.set_message(case.id.clone());
        let pair = evaluator
            .evaluate(
                &case.id,
                (&case.reference).into(),
                case.hypothesis.as_segmentation(),
            )
            .map_err(|err| format!("{}: evaluation failed: {err}", case.id))?;
        pairs.push(pair);
        progress.inc(1);
    }
    progress.finish_with_message("evaluation pass complete");
    Ok(pairs)
}

fn load_cases(path: &Path) -> Result<Vec<LoadedCase>, String> {
    require_path_exists(path, "Missing --cases path.")?;
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;
    let raw: Vec<Case> = serde_json::from_str(&contents)
        .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()))?;
    raw.into_iter().map(load_case).collect()
}

fn load_case(case: Case) -> Result<LoadedCase, String> {
    let mut reference = Annotation::new();
    for item in &case.reference {
        let label = item
            .label
            .clone()
            .ok_or_else(|| format!("{}: reference segment without a label", case.id))?;
        reference.insert(to_segment(&case.id, item)?, label);
    }

    // A fully labeled hypothesis keeps its labels; otherwise only its segments matter.
    let hypothesis = if !case.hypothesis.is_empty()
        && case.hypothesis.iter().all(|item| item.label.is_some())
    {
        let mut annotation = Annotation::new();
        for item in &case.hypothesis {
            let label = item.label.clone().unwrap_or_default();
            annotation.insert(to_segment(&case.id, item)?, label);
        }
        Hypothesis::Annotation(annotation)
    } else {
        let segments = case
            .hypothesis
            .iter()
            .map(|item| to_segment(&case.id, item))
            .collect::<Result<Vec<_>, _>>()?;
        Hypothesis::Timeline(Timeline::from_segments(segments))
    };

    Ok(LoadedCase {
        id: case.id,
        reference,
        hypothesis,
    })
}

fn to_segment(case_id: &str, item: &CaseSegment) -> Result<Segment, String> {
    Segment::try_new(item.start, item.end).map_err(|err| format!("{case_id}: {err}"))
}

fn resolve_out_path(repo_root: &Path, out: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = out {
        return resolve_path(repo_root, path);
    }

    let run_id = Utc::now().format("%Y%m%dT%H%M%SZ");
    repo_root
        .join("target")
        .join("segmentation_reports")
        .join(format!("segmentation-report-{run_id}.json"))
}

fn resolve_path(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}
