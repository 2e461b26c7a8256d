//! Interval-partition and boundary-matching engines behind the four segmentation metrics.

pub mod boundary_matching;
pub mod cooccurrence;
pub mod gap_filling;
pub mod partition;
#[cfg(test)]
mod tests;

pub use boundary_matching::{interior_boundaries, match_boundaries};
pub use cooccurrence::{score_cooccurrence, CooccurrenceScore};
pub use gap_filling::{fill_gaps, FilledReference};
pub use partition::build_partition;
