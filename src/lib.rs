pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod segmentation;
pub mod timeline;
pub mod types;

pub use config::EvaluationConfig;
pub use error::MetricError;
pub use metrics::{
    MetricAccumulator, SegmentationCoverage, SegmentationMetric, SegmentationPrecision,
    SegmentationPurity, SegmentationRecall,
};
pub use pipeline::builder::SegmentationEvaluatorBuilder;
pub use pipeline::runtime::SegmentationEvaluator;
pub use report::{
    aggregate_reports, AggregateCounts, AggregateReport, GlobalRates, Meta, MetricKind,
    MetricScore, PairReport, Report, REPORT_SCHEMA_VERSION,
};
pub use timeline::{Annotation, CropMode, Segment, Timeline, Track};
pub use types::{Details, Segmentation};
