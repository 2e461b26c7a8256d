//! Interval data model shared by the segmentation metrics.

mod annotation;
mod collection;
mod segment;

pub use annotation::{Annotation, CooccurrenceMatrix, Track};
pub use collection::{CropMode, Timeline};
pub use segment::Segment;
