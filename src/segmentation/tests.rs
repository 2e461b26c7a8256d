use super::boundary_matching::{interior_boundaries, match_boundaries};
use super::cooccurrence::score_cooccurrence;
use super::gap_filling::fill_gaps;
use super::partition::build_partition;
use crate::timeline::{Annotation, Segment, Timeline};

fn make_timeline(bounds: &[(f64, f64)]) -> Timeline {
    bounds
        .iter()
        .map(|&(start, end)| Segment::new(start, end))
        .collect()
}

fn make_annotation(items: &[(f64, f64, &str)]) -> Annotation {
    let mut annotation = Annotation::new();
    for &(start, end, label) in items {
        annotation.insert(Segment::new(start, end), label);
    }
    annotation
}

fn partition_segments(partition: &Annotation) -> Vec<(f64, f64)> {
    partition
        .tracks()
        .iter()
        .map(|track| (track.segment.start(), track.segment.end()))
        .collect()
}

#[test]
fn partition_splits_at_every_boundary() {
    let timeline = make_timeline(&[(0.0, 3.0), (1.0, 2.0), (2.5, 4.0)]);
    let coverage = make_timeline(&[(0.0, 4.0)]);
    let partition = build_partition(&timeline, &coverage);

    assert_eq!(
        partition_segments(&partition),
        vec![(0.0, 1.0), (1.0, 2.0), (2.0, 2.5), (2.5, 3.0), (3.0, 4.0)]
    );
    assert_eq!(partition.labels().len(), partition.len());
}

#[test]
fn partition_fills_holes_between_segments() {
    // Atomic intervals come from consecutive boundaries, so the hole 1..2 is one of them.
    let timeline = make_timeline(&[(0.0, 1.0), (2.0, 3.0)]);
    let coverage = make_timeline(&[(0.0, 3.0)]);
    let partition = build_partition(&timeline, &coverage);
    assert_eq!(
        partition_segments(&partition),
        vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]
    );
}

#[test]
fn partition_is_cropped_to_coverage() {
    let timeline = make_timeline(&[(0.0, 2.0), (2.0, 5.0)]);
    let coverage = make_timeline(&[(1.0, 3.0), (4.0, 4.5)]);
    let partition = build_partition(&timeline, &coverage);
    assert_eq!(
        partition_segments(&partition),
        vec![(1.0, 2.0), (2.0, 3.0), (4.0, 4.5)]
    );
}

#[test]
fn partition_of_degenerate_input_is_empty() {
    let coverage = make_timeline(&[(0.0, 1.0)]);
    assert!(build_partition(&Timeline::new(), &coverage).is_empty());
    assert!(build_partition(&make_timeline(&[(0.5, 0.5)]), &coverage).is_empty());
    assert!(build_partition(&make_timeline(&[(0.0, 1.0)]), &Timeline::new()).is_empty());
}

#[test]
fn fill_gaps_closes_short_same_label_gap() {
    let reference = make_annotation(&[(0.0, 1.0, "A"), (1.2, 2.0, "A")]);
    let filled = fill_gaps(&reference, 0.5);
    assert_eq!(filled.filled, make_timeline(&[(0.0, 2.0)]));
    assert_eq!(filled.coverage, make_timeline(&[(0.0, 2.0)]));
}

#[test]
fn fill_gaps_keeps_gap_at_or_above_tolerance() {
    let reference = make_annotation(&[(0.0, 1.0, "A"), (1.5, 2.0, "A")]);
    let filled = fill_gaps(&reference, 0.5);
    assert_eq!(filled.filled, make_timeline(&[(0.0, 1.0), (1.5, 2.0)]));
}

#[test]
fn fill_gaps_works_label_by_label() {
    // The 1..1.3 hole belongs to "A"; "B" sits inside it and stays its own segment.
    let reference = make_annotation(&[
        (0.0, 1.0, "A"),
        (1.0, 1.3, "B"),
        (1.3, 2.0, "A"),
        (5.0, 6.0, "B"),
    ]);
    let filled = fill_gaps(&reference, 0.5);
    assert_eq!(
        filled.filled,
        make_timeline(&[(0.0, 2.0), (1.0, 1.3), (5.0, 6.0)])
    );
    assert_eq!(filled.coverage, make_timeline(&[(0.0, 2.0), (5.0, 6.0)]));
}

#[test]
fn fill_gaps_with_zero_tolerance_only_merges_touching_segments() {
    let reference = make_annotation(&[(0.0, 1.0, "A"), (1.0, 2.0, "A"), (2.1, 3.0, "A")]);
    let filled = fill_gaps(&reference, 0.0);
    assert_eq!(filled.filled, make_timeline(&[(0.0, 2.0), (2.1, 3.0)]));
}

#[test]
fn cooccurrence_score_keeps_best_column_per_row() {
    let coverage = make_timeline(&[(0.0, 4.0)]);
    let reference = build_partition(&make_timeline(&[(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)]), &coverage);
    let hypothesis = build_partition(
        &make_timeline(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]),
        &coverage,
    );

    let forward = score_cooccurrence(&reference, &hypothesis);
    assert_eq!(forward.total_duration, 4.0);
    assert_eq!(forward.intersection_duration, 3.0);

    let backward = score_cooccurrence(&hypothesis, &reference);
    assert_eq!(backward.total_duration, 4.0);
    assert_eq!(backward.intersection_duration, 4.0);
}

#[test]
fn cooccurrence_row_without_columns_contributes_nothing() {
    let coverage = make_timeline(&[(0.0, 2.0)]);
    let reference = build_partition(&make_timeline(&[(0.0, 2.0)]), &coverage);
    let score = score_cooccurrence(&reference, &Annotation::new());
    assert_eq!(score.total_duration, 0.0);
    assert_eq!(score.intersection_duration, 0.0);
}

#[test]
fn interior_boundaries_skip_outer_edges() {
    let timeline = make_timeline(&[(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)]);
    assert_eq!(interior_boundaries(&timeline), vec![1.0, 2.0]);
    assert!(interior_boundaries(&make_timeline(&[(0.0, 4.0)])).is_empty());
    assert!(interior_boundaries(&Timeline::new()).is_empty());
}

#[test]
fn match_boundaries_exact_with_zero_tolerance() {
    let pairs = match_boundaries(&[1.0, 2.0], &[1.0, 2.0, 3.0], 0.0);
    assert_eq!(pairs, vec![(0, 0), (1, 1)]);
}

#[test]
fn match_boundaries_masks_pairs_beyond_tolerance() {
    // 1.0 vs 1.6 is the only candidate but lies 0.6 apart.
    assert!(match_boundaries(&[1.0], &[1.6], 0.5).is_empty());
    assert_eq!(match_boundaries(&[1.0], &[1.5], 0.5), vec![(0, 0)]);
}

#[test]
fn match_boundaries_is_greedy_not_optimal() {
    // Optimal assignment would match both, greedy takes the closest pair first.
    let reference = [1.0, 2.0];
    let hypothesis = [0.5, 1.25];
    let pairs = match_boundaries(&reference, &hypothesis, 0.75);
    assert_eq!(pairs, vec![(0, 1)]);
}

#[test]
fn match_boundaries_ties_resolve_row_major() {
    let pairs = match_boundaries(&[1.0, 2.0], &[1.5], 0.5);
    assert_eq!(pairs, vec![(0, 0)]);

    let pairs = match_boundaries(&[1.5], &[1.0, 2.0], 0.5);
    assert_eq!(pairs, vec![(0, 0)]);

    let pairs = match_boundaries(&[1.0, 1.5], &[1.25, 1.75], 0.25);
    assert_eq!(pairs, vec![(0, 0), (1, 1)]);
}

#[test]
fn match_boundaries_never_reuses_a_boundary() {
    let reference = [1.0, 1.1, 1.2, 5.0];
    let hypothesis = [1.05, 4.9];
    let pairs = match_boundaries(&reference, &hypothesis, 0.2);
    assert_eq!(pairs.len(), 2);
    assert!(pairs.len() <= reference.len().min(hypothesis.len()));
    let mut rows: Vec<usize> = pairs.iter().map(|&(row, _)| row).collect();
    rows.dedup();
    assert_eq!(rows.len(), pairs.len());
}

#[test]
fn match_boundaries_with_empty_side_matches_nothing() {
    assert!(match_boundaries(&[], &[1.0], 1.0).is_empty());
    assert!(match_boundaries(&[1.0], &[], 1.0).is_empty());
}
