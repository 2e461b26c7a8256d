use crate::timeline::{Annotation, Timeline};

/// Reference timeline with short intra-label gaps closed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledReference {
    /// Per-label coverages after gap closing, all labels together.
    pub filled: Timeline,
    /// Coverage of `filled`; the region both partitions are cropped to.
    pub coverage: Timeline,
}

/// Closes, label by label, every gap strictly shorter than `tolerance`.
pub fn fill_gaps(reference: &Annotation, tolerance: f64) -> FilledReference {
    let mut filled = Timeline::new();
    let mut closed_gaps = 0usize;

    for label in reference.labels() {
        let mut label_timeline = reference.label_timeline(label);
        for gap in label_timeline.gaps().iter() {
            if gap.duration() < tolerance {
                label_timeline.add(*gap);
                closed_gaps += 1;
            }
        }
        filled = filled.union(&label_timeline.coverage());
    }

    let coverage = filled.coverage();
    tracing::debug!(
        tolerance,
        closed_gaps,
        filled_len = filled.len(),
        coverage_len = coverage.len(),
        "gap filling: closed short intra-label gaps"
    );
    FilledReference { filled, coverage }
}
