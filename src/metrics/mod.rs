//! The four segmentation metrics and their accumulation across pairs.

pub mod accumulator;
pub mod coverage;
pub mod precision;
pub mod traits;

use crate::error::MetricError;
use crate::types::Details;

pub const COVERAGE_NAME: &str = "segmentation coverage";
pub const PURITY_NAME: &str = "segmentation purity";
pub const PRECISION_NAME: &str = "segmentation precision";
pub const RECALL_NAME: &str = "segmentation recall";

pub const TOTAL_DURATION: &str = "total duration";
pub const INTERSECTION_DURATION: &str = "intersection duration";
pub const NUMBER_OF_MATCHES: &str = "number of matches";
pub const NUMBER_OF_BOUNDARIES: &str = "number of boundaries";

pub const DURATION_COMPONENTS: [&str; 2] = [TOTAL_DURATION, INTERSECTION_DURATION];
pub const BOUNDARY_COMPONENTS: [&str; 2] = [NUMBER_OF_MATCHES, NUMBER_OF_BOUNDARIES];

pub use accumulator::MetricAccumulator;
pub use coverage::{SegmentationCoverage, SegmentationPurity};
pub use precision::{SegmentationPrecision, SegmentationRecall};
pub use traits::SegmentationMetric;

fn component(metric: &'static str, details: &Details, key: &'static str) -> Result<f64, MetricError> {
    details.get(key).ok_or_else(|| {
        MetricError::invalid_input(format!("{metric}: detail record has no '{key}' component"))
    })
}
