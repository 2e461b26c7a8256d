use crate::timeline::{Annotation, CropMode, Segment, Timeline};

const PLACEHOLDER_LABEL: &str = "_";

/// Splits the span of `timeline` at every segment start and end, keeps the
/// pieces that fall inside `coverage`, and gives each piece its own label.
///
/// Returns an empty partition when `timeline` has fewer than two distinct boundaries.
pub fn build_partition(timeline: &Timeline, coverage: &Timeline) -> Annotation {
    let mut boundaries: Vec<f64> = timeline
        .iter()
        .flat_map(|segment| [segment.start(), segment.end()])
        .collect();
    boundaries.sort_by(f64::total_cmp);
    boundaries.dedup();

    let mut grid = Annotation::new();
    for pair in boundaries.windows(2) {
        grid.insert(Segment::new(pair[0], pair[1]), PLACEHOLDER_LABEL);
    }

    let partition = grid
        .crop(coverage, CropMode::Intersection)
        .anonymize_tracks();
    tracing::debug!(
        boundary_count = boundaries.len(),
        grid_len = grid.len(),
        partition_len = partition.len(),
        "partition: built atomic intervals"
    );
    partition
}
