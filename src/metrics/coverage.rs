use super::traits::SegmentationMetric;
use super::{
    component, COVERAGE_NAME, DURATION_COMPONENTS, INTERSECTION_DURATION, PURITY_NAME,
    TOTAL_DURATION,
};
use crate::error::MetricError;
use crate::segmentation::{build_partition, fill_gaps, score_cooccurrence};
use crate::timeline::Annotation;
use crate::types::{Details, Segmentation};

/// How much of each reference segment is covered by a single hypothesis segment.
///
/// Before scoring, reference gaps shorter than `tolerance` seconds between
/// segments of the same label are closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationCoverage {
    tolerance: f64,
}

/// How much of each hypothesis segment falls within a single reference segment.
///
/// Same preprocessing as [`SegmentationCoverage`], with the roles of the two
/// partitions swapped when scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationPurity {
    tolerance: f64,
}

impl SegmentationCoverage {
    pub const DEFAULT_TOLERANCE: f64 = 0.5;

    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl SegmentationPurity {
    pub const DEFAULT_TOLERANCE: f64 = SegmentationCoverage::DEFAULT_TOLERANCE;

    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for SegmentationCoverage {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

impl Default for SegmentationPurity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

impl SegmentationMetric for SegmentationCoverage {
    fn metric_name(&self) -> &'static str {
        COVERAGE_NAME
    }

    fn metric_components(&self) -> &'static [&'static str] {
        &DURATION_COMPONENTS
    }

    fn details(
        &self,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<Details, MetricError> {
        let (reference, hypothesis) =
            partition_pair(COVERAGE_NAME, reference, hypothesis, self.tolerance)?;
        Ok(duration_details(&reference, &hypothesis))
    }

    fn rate(&self, details: &Details) -> Result<f64, MetricError> {
        duration_rate(COVERAGE_NAME, details)
    }
}

impl SegmentationMetric for SegmentationPurity {
    fn metric_name(&self) -> &'static str {
        PURITY_NAME
    }

    fn metric_components(&self) -> &'static [&'static str] {
        &DURATION_COMPONENTS
    }

    fn details(
        &self,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<Details, MetricError> {
        let (reference, hypothesis) =
            partition_pair(PURITY_NAME, reference, hypothesis, self.tolerance)?;
        Ok(duration_details(&hypothesis, &reference))
    }

    fn rate(&self, details: &Details) -> Result<f64, MetricError> {
        duration_rate(PURITY_NAME, details)
    }
}

/// Gap-fills the reference, then partitions both sides over the filled reference coverage.
fn partition_pair(
    metric: &'static str,
    reference: Segmentation<'_>,
    hypothesis: Segmentation<'_>,
    tolerance: f64,
) -> Result<(Annotation, Annotation), MetricError> {
    let reference = reference
        .as_annotation()
        .ok_or_else(|| MetricError::invalid_input_type(metric, "a labeled annotation"))?;
    let hypothesis = hypothesis.to_timeline();

    let filled = fill_gaps(reference, tolerance);
    let reference_partition = build_partition(&filled.filled, &filled.coverage);
    let hypothesis_partition = build_partition(&hypothesis, &filled.coverage);
    Ok((reference_partition, hypothesis_partition))
}

fn duration_details(rows: &Annotation, columns: &Annotation) -> Details {
    let score = score_cooccurrence(rows, columns);
    let mut details = Details::with_components(&DURATION_COMPONENTS);
    details.set(TOTAL_DURATION, score.total_duration);
    details.set(INTERSECTION_DURATION, score.intersection_duration);
    details
}

pub(crate) fn duration_rate(metric: &'static str, details: &Details) -> Result<f64, MetricError> {
    let total = component(metric, details, TOTAL_DURATION)?;
    let intersection = component(metric, details, INTERSECTION_DURATION)?;
    if total <= 0.0 {
        tracing::warn!(metric, total, "zero total duration, rate is undefined");
        return Err(MetricError::undefined_rate(metric, "total duration is zero"));
    }
    Ok(intersection / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{Segment, Timeline};

    fn make_annotation(items: &[(f64, f64, &str)]) -> Annotation {
        let mut annotation = Annotation::new();
        for &(start, end, label) in items {
            annotation.insert(Segment::new(start, end), label);
        }
        annotation
    }

    fn make_timeline(bounds: &[(f64, f64)]) -> Timeline {
        bounds
            .iter()
            .map(|&(start, end)| Segment::new(start, end))
            .collect()
    }

    #[test]
    fn metric_surface() {
        let coverage = SegmentationCoverage::default();
        let purity = SegmentationPurity::default();
        assert_eq!(coverage.metric_name(), "segmentation coverage");
        assert_eq!(purity.metric_name(), "segmentation purity");
        assert_eq!(
            coverage.metric_components(),
            &["total duration", "intersection duration"]
        );
        assert_eq!(purity.metric_components(), coverage.metric_components());
        assert_eq!(coverage.tolerance(), 0.5);
        assert_eq!(purity.tolerance(), 0.5);
    }

    #[test]
    fn identical_segmentations_score_one() {
        let reference = make_annotation(&[(0.0, 1.0, "A"), (1.0, 3.0, "B"), (3.0, 4.0, "A")]);
        let hypothesis = reference.clone();
        let coverage = SegmentationCoverage::default()
            .compute((&reference).into(), (&hypothesis).into())
            .unwrap();
        let purity = SegmentationPurity::default()
            .compute((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert_eq!(coverage, 1.0);
        assert_eq!(purity, 1.0);
    }

    #[test]
    fn over_segmented_hypothesis_lowers_coverage_only() {
        let reference = make_annotation(&[(0.0, 1.0, "A"), (1.0, 2.0, "B"), (2.0, 4.0, "A")]);
        let hypothesis = make_timeline(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]);

        let coverage = SegmentationCoverage::default();
        let details = coverage
            .details((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert_eq!(details.get(TOTAL_DURATION), Some(4.0));
        assert_eq!(details.get(INTERSECTION_DURATION), Some(3.0));
        assert_eq!(coverage.rate(&details).unwrap(), 0.75);

        let purity = SegmentationPurity::default()
            .compute((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert_eq!(purity, 1.0);
    }

    #[test]
    fn under_segmented_hypothesis_lowers_purity_only() {
        let reference = make_annotation(&[(0.0, 1.0, "A"), (1.0, 2.0, "B"), (2.0, 4.0, "A")]);
        let hypothesis = make_timeline(&[(0.0, 4.0)]);
        let coverage = SegmentationCoverage::default()
            .compute((&reference).into(), (&hypothesis).into())
            .unwrap();
        let purity = SegmentationPurity::default()
            .compute((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert_eq!(coverage, 1.0);
        assert_eq!(purity, 0.5);
    }

    #[test]
    fn short_reference_gap_is_filled_before_partitioning() {
        let reference = make_annotation(&[(0.0, 1.0, "A"), (1.2, 2.0, "A")]);
        let hypothesis = make_timeline(&[(0.0, 2.0)]);
        let details = SegmentationCoverage::new(0.5)
            .details((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert_eq!(details.get(TOTAL_DURATION), Some(2.0));
        assert_eq!(details.get(INTERSECTION_DURATION), Some(2.0));

        // Without filling, the gap is not part of the coverage region.
        let details = SegmentationCoverage::new(0.1)
            .details((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert!((details.get(TOTAL_DURATION).unwrap() - 1.8).abs() < 1e-9);
    }

    #[test]
    fn identical_pair_loses_coverage_when_filling_removes_a_boundary() {
        let reference = make_annotation(&[
            (0.0, 1.0, "A"),
            (1.0, 1.25, "B"),
            (1.25, 2.0, "A"),
            (2.0, 2.25, "B"),
        ]);
        let hypothesis = reference.clone();
        let coverage_at = |tolerance: f64| {
            SegmentationCoverage::new(tolerance)
                .compute((&reference).into(), (&hypothesis).into())
                .unwrap()
        };

        assert_eq!(coverage_at(0.0), 1.0);
        assert_eq!(coverage_at(0.5), 1.0);
        // Both "B" pieces merge into 1..2.25, so the reference loses the 1.25 boundary.
        assert!((coverage_at(1.0) - 2.0 / 2.25).abs() < 1e-12);
    }

    #[test]
    fn hypothesis_outside_reference_is_ignored() {
        let reference = make_annotation(&[(1.0, 3.0, "A")]);
        let hypothesis = make_timeline(&[(0.0, 2.0), (2.0, 5.0)]);
        let coverage = SegmentationCoverage::default()
            .compute((&reference).into(), (&hypothesis).into())
            .unwrap();
        let purity = SegmentationPurity::default()
            .compute((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert_eq!(coverage, 0.5);
        assert_eq!(purity, 1.0);
    }

    #[test]
    fn timeline_reference_is_rejected() {
        let reference = make_timeline(&[(0.0, 1.0)]);
        let hypothesis = make_timeline(&[(0.0, 1.0)]);
        let err = SegmentationCoverage::default()
            .details((&reference).into(), (&hypothesis).into())
            .unwrap_err();
        assert!(matches!(err, MetricError::InvalidInputType { .. }));
        let err = SegmentationPurity::default()
            .details((&reference).into(), (&hypothesis).into())
            .unwrap_err();
        assert!(matches!(err, MetricError::InvalidInputType { .. }));
    }

    #[test]
    fn empty_reference_has_undefined_rate() {
        let reference = Annotation::new();
        let hypothesis = make_timeline(&[(0.0, 1.0)]);
        let coverage = SegmentationCoverage::default();
        let details = coverage
            .details((&reference).into(), (&hypothesis).into())
            .unwrap();
        assert_eq!(details.get(TOTAL_DURATION), Some(0.0));
        let err = coverage.rate(&details).unwrap_err();
        assert!(matches!(err, MetricError::UndefinedRate { .. }));
    }

    #[test]
    fn rate_requires_both_components() {
        let mut details = Details::new();
        details.set(TOTAL_DURATION, 1.0);
        assert!(matches!(
            SegmentationCoverage::default().rate(&details),
            Err(MetricError::InvalidInput { .. })
        ));
    }
}
