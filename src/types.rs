use std::collections::BTreeMap;

use serde::Serialize;

use crate::timeline::{Annotation, Timeline};

/// Reference or hypothesis passed to a metric.
///
/// Precision and recall accept either variant and work on its timeline.
/// Coverage and purity require the reference to carry labels.
#[derive(Debug, Clone, Copy)]
pub enum Segmentation<'a> {
    Timeline(&'a Timeline),
    Annotation(&'a Annotation),
}

impl<'a> Segmentation<'a> {
    pub fn as_annotation(&self) -> Option<&'a Annotation> {
        match *self {
            Self::Annotation(annotation) => Some(annotation),
            Self::Timeline(_) => None,
        }
    }

    /// Distinct segments, labels dropped.
    pub fn to_timeline(&self) -> Timeline {
        match *self {
            Self::Timeline(timeline) => timeline.clone(),
            Self::Annotation(annotation) => annotation.timeline(),
        }
    }

    pub fn segment_count(&self) -> usize {
        match *self {
            Self::Timeline(timeline) => timeline.len(),
            Self::Annotation(annotation) => annotation.timeline().len(),
        }
    }
}

impl<'a> From<&'a Timeline> for Segmentation<'a> {
    fn from(timeline: &'a Timeline) -> Self {
        Self::Timeline(timeline)
    }
}

impl<'a> From<&'a Annotation> for Segmentation<'a> {
    fn from(annotation: &'a Annotation) -> Self {
        Self::Annotation(annotation)
    }
}

/// Named intermediate counts of one metric evaluation, summable across pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Details {
    components: BTreeMap<&'static str, f64>,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every component set to zero.
    pub fn with_components(keys: &[&'static str]) -> Self {
        Self {
            components: keys.iter().map(|&key| (key, 0.0)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.components.get(key).copied()
    }

    pub fn set(&mut self, key: &'static str, value: f64) {
        self.components.insert(key, value);
    }

    pub fn accumulate(&mut self, other: &Details) {
        for (&key, &value) in &other.components {
            *self.components.entry(key).or_insert(0.0) += value;
        }
    }
}
