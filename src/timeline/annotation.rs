use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::collection::{CropMode, Timeline};
use super::segment::Segment;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Track {
    pub segment: Segment,
    pub label: String,
}

/// Labeled segments. Segments may overlap and a segment may carry several labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Annotation {
    tracks: Vec<Track>,
}

/// Overlap durations between the labels of two annotations.
///
/// `values[i][j]` is the total time during which a segment labeled `rows[i]`
/// overlaps a segment labeled `columns[j]`. Rows and columns follow sorted label order.
#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl Annotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty segments and duplicate tracks are ignored.
    pub fn insert(&mut self, segment: Segment, label: impl Into<String>) {
        if segment.is_empty() {
            return;
        }
        let track = Track {
            segment,
            label: label.into(),
        };
        if let Err(idx) = self.tracks.binary_search(&track) {
            self.tracks.insert(idx, track);
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tracks
            .iter()
            .map(|track| track.label.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn label_timeline(&self, label: &str) -> Timeline {
        self.tracks
            .iter()
            .filter(|track| track.label == label)
            .map(|track| track.segment)
            .collect()
    }

    /// Distinct segments, labels dropped.
    pub fn timeline(&self) -> Timeline {
        self.tracks.iter().map(|track| track.segment).collect()
    }

    pub fn crop(&self, region: &Timeline, mode: CropMode) -> Annotation {
        let region = region.coverage();
        let mut cropped = Annotation::new();
        for track in &self.tracks {
            for piece in mode.apply(&track.segment, region.segments()) {
                cropped.insert(piece, track.label.clone());
            }
        }
        cropped
    }

    /// Gives every track its own label.
    ///
    /// Labels are zero-padded track indices, so sorted label order matches track order.
    pub fn anonymize_tracks(&self) -> Annotation {
        let width = self.tracks.len().max(1).to_string().len();
        let tracks = self
            .tracks
            .iter()
            .enumerate()
            .map(|(idx, track)| Track {
                segment: track.segment,
                label: format!("{idx:0width$}"),
            })
            .collect();
        Annotation { tracks }
    }

    pub fn cooccurrence(&self, other: &Annotation) -> CooccurrenceMatrix {
        let rows: Vec<String> = self.labels().into_iter().map(str::to_string).collect();
        let columns: Vec<String> = other.labels().into_iter().map(str::to_string).collect();
        let row_index: HashMap<&str, usize> = rows
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.as_str(), idx))
            .collect();
        let column_index: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.as_str(), idx))
            .collect();

        let mut values = vec![vec![0.0; columns.len()]; rows.len()];
        for track in &self.tracks {
            let i = row_index[track.label.as_str()];
            for other_track in &other.tracks {
                // Tracks are sorted by start time.
                if other_track.segment.start() >= track.segment.end() {
                    break;
                }
                if let Some(overlap) = track.segment.intersection(&other_track.segment) {
                    let j = column_index[other_track.label.as_str()];
                    values[i][j] += overlap.duration();
                }
            }
        }

        CooccurrenceMatrix {
            rows,
            columns,
            values,
        }
    }
}
