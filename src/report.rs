use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::MetricError;
use crate::metrics::coverage::duration_rate;
use crate::metrics::precision::boundary_rate;
use crate::metrics::{COVERAGE_NAME, PRECISION_NAME, PURITY_NAME, RECALL_NAME};
use crate::types::Details;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub pairs: Vec<PairReport>,
    pub aggregates: AggregateReport,
}

impl Report {
    /// Writes the report as pretty JSON, creating missing parent directories.
    pub fn write_json(&self, path: &Path) -> Result<(), MetricError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| MetricError::io("create report directory", e))?;
        }
        let file = File::create(path).map_err(|e| MetricError::io("create report file", e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| MetricError::json("serialize report", e))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| MetricError::io("write report file", e))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub cases_path: String,
    pub coverage_tolerance: f64,
    pub boundary_tolerance: f64,
    pub pair_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Coverage,
    Purity,
    Precision,
    Recall,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Coverage,
        MetricKind::Purity,
        MetricKind::Precision,
        MetricKind::Recall,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coverage => "coverage",
            Self::Purity => "purity",
            Self::Precision => "precision",
            Self::Recall => "recall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    pub details: Details,
    /// `None` when the rate is undefined for this pair (zero total duration).
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub id: String,
    pub reference_segment_count: u32,
    pub hypothesis_segment_count: u32,
    pub coverage: MetricScore,
    pub purity: MetricScore,
    pub precision: MetricScore,
    pub recall: MetricScore,
    pub notes: Vec<String>,
}

impl PairReport {
    pub fn score(&self, kind: MetricKind) -> &MetricScore {
        match kind {
            MetricKind::Coverage => &self.coverage,
            MetricKind::Purity => &self.purity,
            MetricKind::Precision => &self.precision,
            MetricKind::Recall => &self.recall,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub global: GlobalRates,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub undefined_coverage: u32,
    pub undefined_purity: u32,
}

/// Rates of the details summed over every pair.
#[derive(Debug, Clone, Serialize, Default)]
pub struct GlobalRates {
    pub coverage: Option<f64>,
    pub purity: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
}

pub fn aggregate_reports(pairs: &[PairReport]) -> AggregateReport {
    let undefined = |kind: MetricKind| {
        to_u32(
            pairs
                .iter()
                .filter(|pair| pair.score(kind).rate.is_none())
                .count(),
        )
    };

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(pairs.len()),
            undefined_coverage: undefined(MetricKind::Coverage),
            undefined_purity: undefined(MetricKind::Purity),
        },
        global: GlobalRates {
            coverage: global_rate(pairs, MetricKind::Coverage),
            purity: global_rate(pairs, MetricKind::Purity),
            precision: global_rate(pairs, MetricKind::Precision),
            recall: global_rate(pairs, MetricKind::Recall),
        },
    }
}

fn global_rate(pairs: &[PairReport], kind: MetricKind) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }
    let mut totals = Details::new();
    for pair in pairs {
        totals.accumulate(&pair.score(kind).details);
    }
    let rate = match kind {
        MetricKind::Coverage => duration_rate(COVERAGE_NAME, &totals),
        MetricKind::Purity => duration_rate(PURITY_NAME, &totals),
        MetricKind::Precision => boundary_rate(PRECISION_NAME, &totals),
        MetricKind::Recall => boundary_rate(RECALL_NAME, &totals),
    };
    rate.ok()
}

pub(crate) fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
