use crate::config::EvaluationConfig;
use crate::error::MetricError;
use crate::metrics::{
    SegmentationCoverage, SegmentationMetric, SegmentationPrecision, SegmentationPurity,
    SegmentationRecall,
};
use crate::pipeline::runtime::{SegmentationEvaluator, SegmentationEvaluatorParts};

pub struct SegmentationEvaluatorBuilder {
    config: EvaluationConfig,
    coverage: Option<Box<dyn SegmentationMetric>>,
    purity: Option<Box<dyn SegmentationMetric>>,
    precision: Option<Box<dyn SegmentationMetric>>,
    recall: Option<Box<dyn SegmentationMetric>>,
}

impl SegmentationEvaluatorBuilder {
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            config,
            coverage: None,
            purity: None,
            precision: None,
            recall: None,
        }
    }

    pub fn with_coverage_tolerance(mut self, tolerance: f64) -> Self {
        self.config.coverage_tolerance = tolerance;
        self
    }

    pub fn with_boundary_tolerance(mut self, tolerance: f64) -> Self {
        self.config.boundary_tolerance = tolerance;
        self
    }

    pub fn with_coverage_metric(mut self, metric: Box<dyn SegmentationMetric>) -> Self {
        self.coverage = Some(metric);
        self
    }

    pub fn with_purity_metric(mut self, metric: Box<dyn SegmentationMetric>) -> Self {
        self.purity = Some(metric);
        self
    }

    pub fn with_precision_metric(mut self, metric: Box<dyn SegmentationMetric>) -> Self {
        self.precision = Some(metric);
        self
    }

    pub fn with_recall_metric(mut self, metric: Box<dyn SegmentationMetric>) -> Self {
        self.recall = Some(metric);
        self
    }

    pub fn build(self) -> Result<SegmentationEvaluator, MetricError> {
        self.config.validate()?;
        let coverage_tolerance = self.config.coverage_tolerance;
        let boundary_tolerance = self.config.boundary_tolerance;
        tracing::debug!(
            coverage_tolerance,
            boundary_tolerance,
            "evaluator: building segmentation evaluator"
        );

        Ok(SegmentationEvaluator::from_parts(SegmentationEvaluatorParts {
            coverage: self
                .coverage
                .unwrap_or_else(|| Box::new(SegmentationCoverage::new(coverage_tolerance))),
            purity: self
                .purity
                .unwrap_or_else(|| Box::new(SegmentationPurity::new(coverage_tolerance))),
            precision: self
                .precision
                .unwrap_or_else(|| Box::new(SegmentationPrecision::new(boundary_tolerance))),
            recall: self
                .recall
                .unwrap_or_else(|| Box::new(SegmentationRecall::new(boundary_tolerance))),
        }))
    }
}
