use crate::error::MetricError;
use crate::types::{Details, Segmentation};

pub trait SegmentationMetric: Send + Sync {
    fn metric_name(&self) -> &'static str;

    /// Keys of the detail record, in display order.
    fn metric_components(&self) -> &'static [&'static str];

    fn details(
        &self,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<Details, MetricError>;

    fn rate(&self, details: &Details) -> Result<f64, MetricError>;

    /// Rate of a single reference/hypothesis pair.
    fn compute(
        &self,
        reference: Segmentation<'_>,
        hypothesis: Segmentation<'_>,
    ) -> Result<f64, MetricError> {
        let details = self.details(reference, hypothesis)?;
        self.rate(&details)
    }
}
