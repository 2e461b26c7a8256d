use crate::timeline::{Segment, Timeline};

/// Boundaries between consecutive segments: the end of every segment but the
/// last, in timeline order.
pub fn interior_boundaries(timeline: &Timeline) -> Vec<f64> {
    let count = timeline.len().saturating_sub(1);
    timeline.iter().take(count).map(Segment::end).collect()
}

/// Greedy one-to-one matching of reference and hypothesis boundaries.
///
/// Repeatedly takes the closest remaining pair whose distance is within
/// `tolerance`, then retires both boundaries. This is not an optimal
/// assignment. Equal distances resolve row-major: lowest reference index,
/// then lowest hypothesis index.
///
/// Returns matched `(reference_index, hypothesis_index)` pairs in match order.
pub fn match_boundaries(
    reference: &[f64],
    hypothesis: &[f64],
    tolerance: f64,
) -> Vec<(usize, usize)> {
    if reference.is_empty() || hypothesis.is_empty() {
        return Vec::new();
    }

    let mut distances = DistanceMatrix::new(reference, hypothesis, tolerance);
    let mut pairs = Vec::with_capacity(reference.len().min(hypothesis.len()));
    while let Some((row, column)) = distances.closest() {
        pairs.push((row, column));
        distances.retire(row, column);
    }

    tracing::debug!(
        reference_count = reference.len(),
        hypothesis_count = hypothesis.len(),
        tolerance,
        match_count = pairs.len(),
        "boundary matching: greedy matching finished"
    );
    pairs
}

/// Row-major |reference - hypothesis| distances. `None` marks a pair that can
/// no longer be matched, either because it is too far apart or because one
/// side was already used.
struct DistanceMatrix {
    cells: Vec<Option<f64>>,
    columns: usize,
}

impl DistanceMatrix {
    fn new(reference: &[f64], hypothesis: &[f64], tolerance: f64) -> Self {
        let cells = reference
            .iter()
            .flat_map(|&r| {
                hypothesis.iter().map(move |&h| {
                    let distance = (r - h).abs();
                    (distance <= tolerance).then_some(distance)
                })
            })
            .collect();
        Self {
            cells,
            columns: hypothesis.len(),
        }
    }

    /// First smallest matchable cell in row-major order.
    fn closest(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, cell) in self.cells.iter().enumerate() {
            let Some(distance) = *cell else {
                continue;
            };
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((idx, distance));
            }
        }
        best.map(|(idx, _)| (idx / self.columns, idx % self.columns))
    }

    fn retire(&mut self, row: usize, column: usize) {
        let row_start = row * self.columns;
        for cell in &mut self.cells[row_start..row_start + self.columns] {
            *cell = None;
        }
        for cell in self.cells.iter_mut().skip(column).step_by(self.columns) {
            *cell = None;
        }
    }
}
