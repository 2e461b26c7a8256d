use serde::Serialize;

use super::segment::Segment;

/// How [`Timeline::crop`] and [`Annotation::crop`](super::Annotation::crop) treat
/// segments that straddle the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Keep the overlapping portion of each segment, truncated to the region.
    Intersection,
    /// Keep whole segments that intersect the region.
    Loose,
    /// Keep whole segments that lie inside a single region segment.
    Strict,
}

impl CropMode {
    /// Pieces of `segment` kept for a region given as merged, sorted segments.
    pub(crate) fn apply(self, segment: &Segment, region: &[Segment]) -> Vec<Segment> {
        match self {
            Self::Intersection => region
                .iter()
                .filter_map(|support| segment.intersection(support))
                .collect(),
            Self::Loose => {
                if region.iter().any(|support| support.intersects(segment)) {
                    vec![*segment]
                } else {
                    Vec::new()
                }
            }
            Self::Strict => {
                if region.iter().any(|support| support.contains(segment)) {
                    vec![*segment]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

/// Sorted set of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut segments: Vec<Segment> = segments.into_iter().collect();
        segments.sort();
        segments.dedup();
        Self { segments }
    }

    pub fn add(&mut self, segment: Segment) {
        if let Err(idx) = self.segments.binary_search(&segment) {
            self.segments.insert(idx, segment);
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Merged envelope: overlapping and touching segments collapse into one.
    pub fn coverage(&self) -> Timeline {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match merged.last_mut() {
                Some(current) if segment.start() <= current.end() => {
                    if segment.end() > current.end() {
                        *current = Segment::new(current.start(), segment.end());
                    }
                }
                _ => merged.push(*segment),
            }
        }
        Timeline { segments: merged }
    }

    /// Holes between consecutive coverage segments.
    pub fn gaps(&self) -> Timeline {
        let coverage = self.coverage();
        let segments = coverage
            .segments
            .windows(2)
            .filter_map(|pair| pair[0].gap_to(&pair[1]))
            .collect();
        Timeline { segments }
    }

    pub fn union(&self, other: &Timeline) -> Timeline {
        Timeline::from_segments(self.iter().chain(other.iter()).copied())
    }

    /// Total duration of the coverage.
    pub fn duration(&self) -> f64 {
        self.coverage().iter().map(Segment::duration).sum()
    }

    pub fn crop(&self, region: &Timeline, mode: CropMode) -> Timeline {
        let region = region.coverage();
        Timeline::from_segments(
            self.segments
                .iter()
                .flat_map(|segment| mode.apply(segment, region.segments())),
        )
    }
}

impl FromIterator<Segment> for Timeline {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Timeline::from_segments(iter)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
