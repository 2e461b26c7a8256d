use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::MetricError;

/// Time interval in seconds, `start <= end`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Segment {
    start: f64,
    end: f64,
}

impl Segment {
    /// Builds a segment from trusted bounds. Use [`Segment::try_new`] for external input.
    pub fn new(start: f64, end: f64) -> Self {
        debug_assert!(start <= end, "segment start {start} is after end {end}");
        Self { start, end }
    }

    pub fn try_new(start: f64, end: f64) -> Result<Self, MetricError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(MetricError::invalid_input(format!(
                "segment bounds must be finite: start={start} end={end}"
            )));
        }
        if start > end {
            return Err(MetricError::invalid_input(format!(
                "segment start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.duration() <= 0.0
    }

    /// Strict overlap: segments that only touch do not intersect.
    pub fn intersects(&self, other: &Segment) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Overlapping portion, `None` when it has zero length.
    pub fn intersection(&self, other: &Segment) -> Option<Segment> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Segment { start, end })
    }

    /// Segment strictly between `self` and a later, disjoint `next`.
    pub fn gap_to(&self, next: &Segment) -> Option<Segment> {
        (self.end < next.start).then_some(Segment {
            start: self.end,
            end: next.start,
        })
    }

    pub fn contains(&self, other: &Segment) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .total_cmp(&other.start)
            .then_with(|| self.end.total_cmp(&other.end))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3} --> {:.3}]", self.start, self.end)
    }
}
