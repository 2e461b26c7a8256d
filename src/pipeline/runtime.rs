use crate::error::MetricError;
use crate::metrics::SegmentationMetric;
use crate::report::{to_u32, MetricKind, MetricScore, PairReport};
use crate::types::Segmentation;

/// Scores reference/hypothesis pairs with coverage, purity, precision and recall.
pub struct SegmentationEvaluator {
    coverage: Box<dyn SegmentationMetric>,
    purity: Box<dyn SegmentationMetric>,
    precision: Box<dyn SegmentationMetric>,
    recall: Box<dyn SegmentationMetric>,
}

pub(crate) struct SegmentationEvaluatorParts {
    pub coverage: Box<dyn SegmentationMetric>,
    pub purity: Box<dyn SegmentationMetric>,
    pub precision: Box<dyn SegmentationMetric>,
    pub recall: Box<dyn SegmentationMetric>,
}

impl SegmentationEvaluator {
    pub(crate) fn from_parts(parts: SegmentationEvaluatorParts) -> Self {
        Self {
            coverage: parts.coverage,
            purity: parts.purity,
            precision: parts.precision,
            recall: parts.recall,
        }
    }

    pub fn metric(&self, kind: MetricKind) -> &dyn SegmentationMetric {
        match kind {
            MetricKind::Coverage => self.coverage.as_ref(),
            MetricKind::Purity => self.purity.as_ref(),
            MetricKind::Precision => self.precision.as_ref(),
            MetricKind::Recall => self.recall.as_ref(),
        }
    }

    /// Undefined rates are reported as `None` with a note; every other metric
    /// error aborts the pair.
    pub fn evaluate(
        &self,
        id: &str,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<PairReport, MetricError> {
        let mut notes = Vec::new();
        if reference.segment_count() == 0 {
            notes.push("empty_reference".to_string());
        }
        if hypothesis.segment_count() == 0 {
            notes.push("empty_hypothesis".to_string());
        }

        let mut score = |kind: MetricKind| {
            score_metric(self.metric(kind), kind, reference, hypothesis, &mut notes)
        };
        let coverage = score(MetricKind::Coverage)?;
        let purity = score(MetricKind::Purity)?;
        let precision = score(MetricKind::Precision)?;
        let recall = score(MetricKind::Recall)?;

        tracing::debug!(
            id,
            coverage = coverage.rate,
            purity = purity.rate,
            precision = precision.rate,
            recall = recall.rate,
            "evaluator: scored pair"
        );

        Ok(PairReport {
            id: id.to_string(),
            reference_segment_count: to_u32(reference.segment_count()),
            hypothesis_segment_count: to_u32(hypothesis.segment_count()),
            coverage,
            purity,
            precision,
            recall,
            notes,
        })
    }
}

fn score_metric(
    metric: &dyn SegmentationMetric,
    kind: MetricKind,
    reference: Segmentation<'_>,
    hypothesis: Segmentation<'_>,
    notes: &mut Vec<String>,
) -> Result<MetricScore, MetricError> {
    let details = metric.details(reference, hypothesis)?;
    let rate = match metric.rate(&details) {
        Ok(rate) => Some(rate),
        Err(MetricError::UndefinedRate { reason, .. }) => {
            notes.push(format!("{}_undefined: {reason}", kind.as_str()));
            None
        }
        Err(err) => return Err(err),
    };
    Ok(MetricScore { details, rate })
}
