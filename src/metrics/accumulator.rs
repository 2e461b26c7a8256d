use super::traits::SegmentationMetric;
use crate::error::MetricError;
use crate::types::{Details, Segmentation};

/// Running totals of one metric over many reference/hypothesis pairs.
pub struct MetricAccumulator {
    metric: Box<dyn SegmentationMetric>,
    totals: Details,
    pairs: Vec<(String, Details)>,
}

impl MetricAccumulator {
    pub fn new(metric: Box<dyn SegmentationMetric>) -> Self {
        let totals = Details::with_components(metric.metric_components());
        Self {
            metric,
            totals,
            pairs: Vec::new(),
        }
    }

    pub fn metric_name(&self) -> &'static str {
        self.metric.metric_name()
    }

    /// Adds the pair to the totals and returns its own rate.
    ///
    /// The pair is accumulated even when its rate turns out to be undefined.
    pub fn accumulate(
        &mut self,
        id: impl Into<String>,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<f64, MetricError> {
        let details = self.metric.details(reference, hypothesis)?;
        self.totals.accumulate(&details);
        let rate = self.metric.rate(&details);
        self.pairs.push((id.into(), details));
        rate
    }

    pub fn total_details(&self) -> &Details {
        &self.totals
    }

    /// Rate of the summed details, not the mean of pair rates.
    pub fn global_rate(&self) -> Result<f64, MetricError> {
        self.metric.rate(&self.totals)
    }

    pub fn pair_details(&self) -> &[(String, Details)] {
        &self.pairs
    }

    pub fn reset(&mut self) {
        self.totals = Details::with_components(self.metric.metric_components());
        self.pairs.clear();
    }
}
