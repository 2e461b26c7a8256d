use super::traits::SegmentationMetric;
use super::{
    component, BOUNDARY_COMPONENTS, NUMBER_OF_BOUNDARIES, NUMBER_OF_MATCHES, PRECISION_NAME,
    RECALL_NAME,
};
use crate::error::MetricError;
use crate::segmentation::{interior_boundaries, match_boundaries};
use crate::types::{Details, Segmentation};

/// Share of hypothesis boundaries matched to a reference boundary within `tolerance` seconds.
///
/// ```
/// use segmentation_metrics_rs::{Segment, SegmentationMetric, SegmentationPrecision, Timeline};
///
/// let reference: Timeline = [(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)]
///     .into_iter()
///     .map(|(start, end)| Segment::new(start, end))
///     .collect();
/// let hypothesis: Timeline = [(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]
///     .into_iter()
///     .map(|(start, end)| Segment::new(start, end))
///     .collect();
///
/// let precision = SegmentationPrecision::default()
///     .compute((&reference).into(), (&hypothesis).into())
///     .unwrap();
/// assert!((precision - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationPrecision {
    tolerance: f64,
}

/// Share of reference boundaries matched to a hypothesis boundary within `tolerance` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationRecall {
    tolerance: f64,
}

impl SegmentationPrecision {
    pub const DEFAULT_TOLERANCE: f64 = 0.0;

    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl SegmentationRecall {
    pub const DEFAULT_TOLERANCE: f64 = SegmentationPrecision::DEFAULT_TOLERANCE;

    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for SegmentationPrecision {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

impl Default for SegmentationRecall {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

impl SegmentationMetric for SegmentationPrecision {
    fn metric_name(&self) -> &'static str {
        PRECISION_NAME
    }

    fn metric_components(&self) -> &'static [&'static str] {
        &BOUNDARY_COMPONENTS
    }

    fn details(
        &self,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<Details, MetricError> {
        Ok(boundary_details(reference, hypothesis, self.tolerance))
    }

    fn rate(&self, details: &Details) -> Result<f64, MetricError> {
        boundary_rate(PRECISION_NAME, details)
    }
}

impl SegmentationMetric for SegmentationRecall {
    fn metric_name(&self) -> &'static str {
        RECALL_NAME
    }

    fn metric_components(&self) -> &'static [&'static str] {
        &BOUNDARY_COMPONENTS
    }

    fn details(
        &self,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<Details, MetricError> {
        Ok(boundary_details(hypothesis, reference, self.tolerance))
    }

    fn rate(&self, details: &Details) -> Result<f64, MetricError> {
        boundary_rate(RECALL_NAME, details)
    }
}

/// Matches the boundaries of both sides; the boundary count is the second side's.
fn boundary_details(
    reference: Segmentation<'_>,
    hypothesis: Segmentation<'_>,
    tolerance: f64,
) -> Details {
    let reference_boundaries = interior_boundaries(&reference.to_timeline());
    let hypothesis_boundaries = interior_boundaries(&hypothesis.to_timeline());
    let pairs = match_boundaries(&reference_boundaries, &hypothesis_boundaries, tolerance);

    let mut details = Details::with_components(&BOUNDARY_COMPONENTS);
    details.set(NUMBER_OF_MATCHES, pairs.len() as f64);
    details.set(NUMBER_OF_BOUNDARIES, hypothesis_boundaries.len() as f64);
    details
}

pub(crate) fn boundary_rate(metric: &'static str, details: &Details) -> Result<f64, MetricError> {
    let matches = component(metric, details, NUMBER_OF_MATCHES)?;
    let boundaries = component(metric, details, NUMBER_OF_BOUNDARIES)?;
    if boundaries == 0.0 {
        if matches == 0.0 {
            return Ok(1.0);
        }
        return Err(MetricError::inconsistent(metric, matches, boundaries));
    }
    Ok(matches / boundaries)
}
