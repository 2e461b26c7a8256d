use crate::timeline::Annotation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooccurrenceScore {
    /// Sum of every cell of the cross-duration matrix.
    pub total_duration: f64,
    /// Sum over rows of the largest cell in the row.
    pub intersection_duration: f64,
}

/// Reduces the cross-duration matrix of `rows` × `columns`.
///
/// Argument order matters: each row keeps only its best-overlapping column.
/// A row with no column contributes nothing to the intersection.
pub fn score_cooccurrence(rows: &Annotation, columns: &Annotation) -> CooccurrenceScore {
    let matrix = rows.cooccurrence(columns);

    let total_duration: f64 = matrix.values.iter().flatten().sum();
    let intersection_duration: f64 = matrix
        .values
        .iter()
        .map(|row| row.iter().copied().fold(0.0, f64::max))
        .sum();

    CooccurrenceScore {
        total_duration,
        intersection_duration,
    }
}
